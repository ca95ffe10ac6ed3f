//! Topology of the rock surface graph and its external parameter aliases.
//!
//! ```text
//! input ─► src ─► emboss ─► rgb-clip ─► crop ─► over ─► soft-light ─► multiply ─► output
//!           ▲                            │       ▲  │        ▲           ▲
//!     cell-noise (aux)                   │       │  └─► dog ─┘ (aux)   color (aux)
//!                                        └─► mantiuk06|nop ─► opacity ─┘ (aux)
//! ```
//!
//! Relinking always rebuilds every link from the static tables below instead
//! of patching the previous topology, so no stale link survives a toggle flip.

use crate::error::{Result, ResultExt};
use crate::graph::host::GraphHost;
use crate::graph::port::{AUX, OUTPUT};
use crate::rock_surface::nodes::{NodeRole, RockSurfaceNodes};
use crate::rock_surface::properties;
use serde::{Deserialize, Serialize};

/// Which node sits between crop and the opacity modulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ToneMapStage {
    /// Mantiuk06 tone map is spliced in.
    #[default]
    Mantiuk06,
    /// The no-op stands in for the tone map.
    Bypass,
}

impl ToneMapStage {
    pub fn from_enabled(enabled: bool) -> Self {
        if enabled {
            ToneMapStage::Mantiuk06
        } else {
            ToneMapStage::Bypass
        }
    }

    pub fn is_enabled(self) -> bool {
        self == ToneMapStage::Mantiuk06
    }

    /// The node linked in for this stage.
    pub fn selected(self) -> NodeRole {
        match self {
            ToneMapStage::Mantiuk06 => NodeRole::ToneMap,
            ToneMapStage::Bypass => NodeRole::NoOp,
        }
    }

    /// The node left instantiated but unlinked.
    pub fn unselected(self) -> NodeRole {
        match self {
            ToneMapStage::Mantiuk06 => NodeRole::NoOp,
            ToneMapStage::Bypass => NodeRole::ToneMap,
        }
    }
}

impl From<bool> for ToneMapStage {
    fn from(enabled: bool) -> Self {
        Self::from_enabled(enabled)
    }
}

/// Default-port chain from the input proxy to the output proxy.
pub const MAIN_CHAIN: &[NodeRole] = &[
    NodeRole::Input,
    NodeRole::SourceSelector,
    NodeRole::Emboss,
    NodeRole::Clamp,
    NodeRole::Crop,
    NodeRole::Compositor,
    NodeRole::BlendMode,
    NodeRole::Multiply,
    NodeRole::Output,
];

/// `(target, source)`: target's `aux` is fed from source's `output`.
pub const AUX_LINKS: &[(NodeRole, NodeRole)] = &[
    (NodeRole::SourceSelector, NodeRole::NoiseSource),
    (NodeRole::Multiply, NodeRole::ColorProvider),
    (NodeRole::Compositor, NodeRole::OpacityModulator),
    (NodeRole::BlendMode, NodeRole::DifferenceOfGaussians),
];

/// `(external property, internal node, internal parameter)`.
pub const REDIRECTS: &[(&str, NodeRole, &str)] = &[
    (properties::SCALE, NodeRole::NoiseSource, "scale"),
    (properties::SEED, NodeRole::NoiseSource, "seed"),
    (properties::DEPTH, NodeRole::Emboss, "depth"),
    (properties::ELEVATION, NodeRole::Emboss, "elevation"),
    (properties::AZIMUTH, NodeRole::Emboss, "azimuth"),
    (properties::VALUE, NodeRole::ColorProvider, "value"),
    (properties::TONEMAP, NodeRole::OpacityModulator, "value"),
    (properties::SLDOG, NodeRole::BlendMode, "opacity"),
];

/// Rebuild every link of the graph for `stage`, then republish the redirects.
///
/// On error the host is left with no links at all, never a partial chain.
pub fn relink<H: GraphHost + ?Sized>(
    host: &mut H,
    nodes: &RockSurfaceNodes,
    stage: ToneMapStage,
) -> Result<()> {
    host.clear_links();

    if let Err(e) = link_all(host, nodes, stage) {
        host.clear_links();
        return Err(e);
    }

    tracing::debug!("Relinked rock surface graph with {:?}", stage);
    Ok(())
}

fn link_all<H: GraphHost + ?Sized>(
    host: &mut H,
    nodes: &RockSurfaceNodes,
    stage: ToneMapStage,
) -> Result<()> {
    host.link_many(&nodes.resolve(MAIN_CHAIN))
        .context("linking main chain")?;

    for &(target, source) in AUX_LINKS {
        host.connect(nodes.get(target), AUX, nodes.get(source), OUTPUT)
            .with_context(|| format!("linking {:?} into {:?}.aux", source, target))?;
    }

    host.link_many(&[
        nodes.get(NodeRole::Crop),
        nodes.get(stage.selected()),
        nodes.get(NodeRole::OpacityModulator),
    ])
    .context("linking tone map branch")?;

    // The compositor result also drives the difference of gaussians that
    // the soft light blend reads on its aux.
    host.link_many(&[
        nodes.get(NodeRole::Compositor),
        nodes.get(NodeRole::DifferenceOfGaussians),
    ])
    .context("linking difference of gaussians")?;

    bind(host, nodes)
}

/// Install the external-to-internal parameter aliases.
///
/// A failure here means the table names a parameter the primitive does not
/// declare: an internal bug, not a runtime condition.
pub fn bind<H: GraphHost + ?Sized>(host: &mut H, nodes: &RockSurfaceNodes) -> Result<()> {
    for &(external, role, param) in REDIRECTS {
        host.redirect(external, nodes.get(role), param)
            .with_context(|| format!("redirecting '{}' to {:?}.{}", external, role, param))?;
    }
    Ok(())
}
