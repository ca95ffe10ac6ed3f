//! In-process operation-graph host.
//!
//! Nodes wrap named image primitives (or one of the two boundary proxies);
//! links join an output port to an input port; redirects expose internal
//! node parameters under external names. The graph is topology only: it is
//! built and rewired here and evaluated elsewhere.
//!
//! # Architecture
//!
//! ```text
//! [input proxy] ──► [op] ──► [op] ──► [output proxy]
//!                     ▲
//!     [generator] ────┘ (aux)
//! ```
//!
//! # Design
//!
//! - **Closed operation set**: `Operation` is an enum with static port and
//!   parameter tables; no trait objects.
//! - **Index IDs**: `NodeId`/`EdgeId` index straight into the node and edge vectors.
//! - **Single-source inputs**: connecting an occupied input port replaces its link.
//! - **Host seam**: the assembler only talks to the `GraphHost` trait.

pub mod compiled;
pub mod compiler;
pub mod host;
pub mod id;
pub mod node;
pub mod operation;
pub mod port;
pub mod registry;
pub mod snapshot;
pub mod store;
pub mod value;

pub use compiled::{CompiledTopology, TopologyStats};
pub use compiler::TopologyCompiler;
pub use host::GraphHost;
#[cfg(test)]
pub use host::MockGraphHost;
pub use id::{EdgeId, NodeId};
pub use node::{NodeKind, OperationNode};
pub use operation::{Operation, ParamSpec, LAYER_MODE_SOFTLIGHT};
pub use port::{PortDescriptor, PortDirection, AUX, INPUT, OUTPUT};
pub use registry::OperationRegistry;
pub use snapshot::{EdgeSnapshot, NodeSnapshot, RedirectSnapshot, TopologySnapshot};
pub use store::{Edge, Graph, LinkKey, RedirectTarget};
pub use value::{ParamKind, ParamValue};
