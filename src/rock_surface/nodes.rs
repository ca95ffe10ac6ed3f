//! Internal nodes of the rock surface graph.
//!
//! Every node plays a fixed [`NodeRole`]. All of them are created once in
//! [`RockSurfaceNodes::attach`] and live as long as the owning graph;
//! relinking only moves links between them.

use crate::error::{Result, ResultExt};
use crate::graph::host::GraphHost;
use crate::graph::id::NodeId;
use crate::graph::operation::{Operation, LAYER_MODE_SOFTLIGHT};
use crate::graph::value::ParamValue;
use crate::types::Color;
use serde::Serialize;

/// The part a node plays in the rock surface graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum NodeRole {
    Input,
    Output,
    /// Cell noise, the rock pattern source.
    NoiseSource,
    Emboss,
    /// Multiplies the result by the paint color.
    Multiply,
    /// Constant paint color.
    ColorProvider,
    /// Replaces the input with the noise on its aux.
    SourceSelector,
    Clamp,
    Crop,
    /// Alpha compositor putting the tone-mapped layer over the emboss.
    Compositor,
    OpacityModulator,
    ToneMap,
    /// Disabled substitute for `ToneMap`.
    NoOp,
    /// Soft light blend of the difference of gaussians.
    BlendMode,
    DifferenceOfGaussians,
}

impl NodeRole {
    pub const COUNT: usize = 15;

    pub fn all() -> &'static [NodeRole; NodeRole::COUNT] {
        &[
            NodeRole::Input,
            NodeRole::Output,
            NodeRole::NoiseSource,
            NodeRole::Emboss,
            NodeRole::Multiply,
            NodeRole::ColorProvider,
            NodeRole::SourceSelector,
            NodeRole::Clamp,
            NodeRole::Crop,
            NodeRole::Compositor,
            NodeRole::OpacityModulator,
            NodeRole::ToneMap,
            NodeRole::NoOp,
            NodeRole::BlendMode,
            NodeRole::DifferenceOfGaussians,
        ]
    }

    /// The primitive behind this role; `None` for the proxies.
    pub fn operation(self) -> Option<Operation> {
        Some(match self {
            NodeRole::Input | NodeRole::Output => return None,
            NodeRole::NoiseSource => Operation::CellNoise,
            NodeRole::Emboss => Operation::Emboss,
            NodeRole::Multiply => Operation::Multiply,
            NodeRole::ColorProvider => Operation::Color,
            NodeRole::SourceSelector => Operation::Src,
            NodeRole::Clamp => Operation::RgbClip,
            NodeRole::Crop => Operation::Crop,
            NodeRole::Compositor => Operation::Over,
            NodeRole::OpacityModulator => Operation::Opacity,
            NodeRole::ToneMap => Operation::Mantiuk06,
            NodeRole::NoOp => Operation::Nop,
            NodeRole::BlendMode => Operation::LayerMode,
            NodeRole::DifferenceOfGaussians => Operation::DifferenceOfGaussians,
        })
    }

    /// Parameters fixed at creation time.
    pub fn initial_params(self) -> &'static [(&'static str, ParamValue)] {
        match self {
            NodeRole::NoiseSource => &[
                ("rank", ParamValue::Int(1)),
                ("shape", ParamValue::Double(2.0)),
                ("iterations", ParamValue::Int(11)),
                ("palettize", ParamValue::Bool(false)),
            ],
            NodeRole::ColorProvider => &[("value", ParamValue::Color(Color::ROCK_TAN))],
            NodeRole::BlendMode => &[("layer-mode", ParamValue::Int(LAYER_MODE_SOFTLIGHT))],
            NodeRole::DifferenceOfGaussians => &[
                ("radius1", ParamValue::Double(5.0)),
                ("radius2", ParamValue::Double(5.0)),
            ],
            _ => &[],
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

/// Handles of every internal node plus the graph's proxies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RockSurfaceNodes {
    ids: [NodeId; NodeRole::COUNT],
}

impl RockSurfaceNodes {
    /// Create every internal node as a child of `host`.
    ///
    /// Fails if the host cannot provide one of the primitives; nothing is
    /// linked and no redirects exist yet.
    pub fn attach<H: GraphHost + ?Sized>(host: &mut H) -> Result<Self> {
        let mut ids = [NodeId::INVALID; NodeRole::COUNT];

        for &role in NodeRole::all() {
            ids[role.slot()] = match role.operation() {
                None if role == NodeRole::Input => host.input_proxy(),
                None => host.output_proxy(),
                Some(op) => host
                    .create_child_node(op, role.initial_params())
                    .with_context(|| format!("creating {:?} node", role))?,
            };
        }

        tracing::debug!("Attached {} rock surface nodes", NodeRole::COUNT);
        Ok(Self { ids })
    }

    #[inline]
    pub fn get(&self, role: NodeRole) -> NodeId {
        self.ids[role.slot()]
    }

    /// Map a slice of roles to node ids.
    pub fn resolve(&self, roles: &[NodeRole]) -> Vec<NodeId> {
        roles.iter().map(|&r| self.get(r)).collect()
    }

    /// The role a node id plays, if it belongs to this set.
    pub fn role_of(&self, id: NodeId) -> Option<NodeRole> {
        NodeRole::all().iter().copied().find(|&r| self.get(r) == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeRole, NodeId)> + '_ {
        NodeRole::all().iter().map(move |&r| (r, self.get(r)))
    }

    /// Point `role` at another node.
    #[cfg(test)]
    pub(crate) fn with_role(mut self, role: NodeRole, id: NodeId) -> Self {
        self.ids[role.slot()] = id;
        self
    }
}
