//! The rock surface meta-operation.
//!
//! A fixed graph of thirteen primitives that turns cell noise into an
//! embossed, tone-mapped, tinted rock texture. The graph is built once;
//! afterwards only the `switchm6` toggle changes its shape, by swapping
//! the Mantiuk06 tone map for a no-op.
//!
//! # Lifecycle
//!
//! ```text
//! RockSurface::new ─► attach nodes ─► relink (startup) ─► apply preset
//!                                        ▲
//!        set_property("switchm6", ..) ───┘
//! ```

pub mod bridge;
pub mod nodes;
pub mod properties;
pub mod wiring;

pub use bridge::{HostMessage, RockSurfaceBridge, RockSurfaceCommand};
pub use nodes::{NodeRole, RockSurfaceNodes};
pub use properties::{PropertySpec, PROPERTIES};
pub use wiring::ToneMapStage;

use crate::config::RockSurfaceConfig;
use crate::error::{Result, ResultExt, RockSurfaceError};
use crate::graph::{
    CompiledTopology, Graph, GraphHost, NodeId, OperationRegistry, ParamKind, ParamValue,
    TopologyCompiler, TopologySnapshot,
};
use rand::Rng;

/// Upper bound of the noise seed.
pub const SEED_MAX: i64 = i32::MAX as i64;

/// An assembled rock surface graph and its public property surface.
pub struct RockSurface {
    graph: Graph,
    nodes: RockSurfaceNodes,
    stage: ToneMapStage,
}

impl RockSurface {
    /// Build the graph on a host with `registry`, wire it, then apply `config`.
    ///
    /// An unset seed in `config` is drawn at random.
    pub fn new(registry: OperationRegistry, config: &RockSurfaceConfig) -> Result<Self> {
        let mut graph = Graph::new(registry);
        let nodes = RockSurfaceNodes::attach(&mut graph).context("Failed to construct rock surface")?;

        let mut surface = Self {
            graph,
            nodes,
            stage: ToneMapStage::default(),
        };
        surface.update()?;
        surface.apply_config(config)?;
        if config.seed.is_none() {
            surface.reseed()?;
        }

        tracing::info!(
            "Rock surface ready: {} nodes, {} links, tone map {:?}",
            surface.graph.node_count(),
            surface.graph.edges().len(),
            surface.stage
        );
        Ok(surface)
    }

    /// Defaults on the standard registry.
    pub fn with_defaults() -> Result<Self> {
        Self::new(OperationRegistry::standard(), &RockSurfaceConfig::default())
    }

    // ── Topology ──

    /// Rebuild every link for the current tone map stage.
    ///
    /// If relinking fails the graph is left with no links at all.
    pub fn update(&mut self) -> Result<()> {
        if let Err(e) = wiring::relink(&mut self.graph, &self.nodes, self.stage) {
            tracing::error!("Relink failed, graph unlinked: {}", e);
            return Err(e.with_context("Failed to relink rock surface"));
        }
        self.check_disconnected();
        Ok(())
    }

    fn set_tone_map_stage(&mut self, stage: ToneMapStage) -> Result<()> {
        if stage == self.stage {
            tracing::trace!("Tone map already {:?}", stage);
            return Ok(());
        }
        tracing::info!("Tone map {:?} -> {:?}", self.stage, stage);
        let previous = std::mem::replace(&mut self.stage, stage);
        if let Err(e) = self.update() {
            self.stage = previous;
            return Err(e);
        }
        Ok(())
    }

    /// Only the unselected tone map substitute may sit outside the live path.
    fn check_disconnected(&self) {
        match TopologyCompiler::compile(&self.graph) {
            Ok(plan) => {
                let expected = [self.nodes.get(self.stage.unselected())];
                if plan.disconnected_nodes != expected {
                    tracing::warn!(
                        "Unexpected disconnected nodes after relink: {:?}",
                        plan.disconnected_nodes
                            .iter()
                            .map(|&id| self.nodes.role_of(id))
                            .collect::<Vec<_>>()
                    );
                }
            }
            Err(e) => tracing::warn!("Topology check failed: {}", e),
        }
    }

    pub fn tone_map_stage(&self) -> ToneMapStage {
        self.stage
    }

    /// Live topology: active nodes in evaluation order plus the disconnected ones.
    pub fn topology(&self) -> Result<CompiledTopology> {
        TopologyCompiler::compile(&self.graph)
    }

    pub fn snapshot(&self) -> TopologySnapshot {
        self.graph.snapshot()
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn nodes(&self) -> &RockSurfaceNodes {
        &self.nodes
    }

    // ── Properties ──

    /// Write a public property and return the value actually stored.
    ///
    /// Out-of-range numbers are clamped. Writing the toggle relinks the
    /// graph when its value changes.
    pub fn set_property(&mut self, name: &str, value: ParamValue) -> Result<ParamValue> {
        let spec = properties::spec(name)?;
        let value = spec.clamp(value)?;

        match (spec.name, value) {
            (properties::SWITCH_M6, ParamValue::Bool(enabled)) => {
                self.set_tone_map_stage(ToneMapStage::from_enabled(enabled))?;
            }
            _ => {
                self.graph
                    .set_redirected(spec.name, value)
                    .with_context(|| format!("Failed to set '{}'", spec.name))?;
            }
        }

        tracing::debug!("Property '{}' = {}", spec.name, value);
        Ok(value)
    }

    /// Current value of a public property.
    pub fn property(&self, name: &str) -> Result<ParamValue> {
        let spec = properties::spec(name)?;
        if spec.redirected {
            self.graph.redirected(spec.name)
        } else {
            Ok(ParamValue::Bool(self.stage.is_enabled()))
        }
    }

    /// Every public property with its current value, in declaration order.
    pub fn properties(&self) -> Result<Vec<(&'static str, ParamValue)>> {
        PROPERTIES
            .iter()
            .map(|p| self.property(p.name).map(|v| (p.name, v)))
            .collect()
    }

    /// Draw a new random seed and return it.
    pub fn reseed(&mut self) -> Result<i64> {
        let seed = rand::thread_rng().gen_range(0..=SEED_MAX);
        self.set_property(properties::SEED, ParamValue::Int(seed))?;
        Ok(seed)
    }

    /// Write every value of a preset. An unset seed is left untouched.
    pub fn apply_config(&mut self, config: &RockSurfaceConfig) -> Result<()> {
        for (name, value) in config.values() {
            self.set_property(name, value)?;
        }
        Ok(())
    }

    /// The current property values as a preset.
    pub fn to_config(&self) -> Result<RockSurfaceConfig> {
        let double = |name: &str| -> Result<f64> {
            read_as(name, self.property(name)?, ParamKind::Double, ParamValue::as_double)
        };
        let int = |name: &str| -> Result<i64> {
            read_as(name, self.property(name)?, ParamKind::Int, ParamValue::as_int)
        };

        Ok(RockSurfaceConfig {
            scale: double(properties::SCALE)?,
            seed: Some(int(properties::SEED)?),
            azimuth: double(properties::AZIMUTH)?,
            elevation: double(properties::ELEVATION)?,
            depth: int(properties::DEPTH)?,
            value: read_as(
                properties::VALUE,
                self.property(properties::VALUE)?,
                ParamKind::Color,
                ParamValue::as_color,
            )?,
            switchm6: self.stage.is_enabled(),
            tonemap: double(properties::TONEMAP)?,
            sldog: double(properties::SLDOG)?,
        })
    }

    /// The host-facing input proxy of the assembled graph.
    pub fn input(&self) -> NodeId {
        self.graph.input_proxy()
    }

    /// The host-facing output proxy of the assembled graph.
    pub fn output(&self) -> NodeId {
        self.graph.output_proxy()
    }
}

/// Extract a typed property value, reporting a kind mismatch instead of defaulting.
fn read_as<T>(
    name: &str,
    value: ParamValue,
    expected: ParamKind,
    extract: impl Fn(&ParamValue) -> Option<T>,
) -> Result<T> {
    extract(&value).ok_or_else(|| RockSurfaceError::ParameterType {
        param: name.to_string(),
        expected: expected.name(),
        actual: value.kind().name(),
    })
}

impl std::fmt::Debug for RockSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RockSurface")
            .field("nodes", &self.graph.node_count())
            .field("edges", &self.graph.edges().len())
            .field("stage", &self.stage)
            .finish()
    }
}
