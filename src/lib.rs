//! # rock-surface: procedural rock texture graph
//!
//! Builds the operation graph of a "rock surface" filter: cell noise is
//! embossed, clamped, cropped, optionally tone mapped, blended with a soft
//! light difference of gaussians and tinted with a paint color. The crate
//! prepares topology and parameters only; pixel evaluation belongs to
//! whatever engine consumes the graph.
//!
//! ## Architecture
//!
//! - **graph**: an in-process operation-graph host (nodes, ports, links,
//!   parameter redirects) plus reachability analysis of the live topology
//! - **rock_surface**: the assembler that creates the fixed node set,
//!   relinks it when the tone map toggle flips, and publishes the
//!   external parameter aliases
//! - **config**: TOML/JSON presets for the public properties
//! - **Communication**: crossbeam channels serialize property changes per
//!   instance (`rock_surface::bridge`)
//!
//! ## Example
//!
//! ```no_run
//! use rock_surface::{graph::ParamValue, RockSurface};
//!
//! let mut surface = RockSurface::with_defaults()?;
//! surface.set_property("switchm6", ParamValue::Bool(false))?;
//! println!("{}", surface.snapshot().to_json_pretty()?);
//! # Ok::<(), rock_surface::RockSurfaceError>(())
//! ```

pub mod config;
pub mod error;
pub mod graph;
pub mod rock_surface;
pub mod types;

pub use config::RockSurfaceConfig;
pub use error::{Result, RockSurfaceError};
pub use rock_surface::{
    HostMessage, NodeRole, RockSurface, RockSurfaceBridge, RockSurfaceCommand, ToneMapStage,
};
pub use types::Color;
