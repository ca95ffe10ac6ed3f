//! Serializable snapshots of a graph's topology, for inspection and logging.

use crate::graph::id::{EdgeId, NodeId};
use crate::graph::port::PortDescriptor;
use crate::graph::value::ParamValue;
use serde::Serialize;
use std::collections::BTreeMap;

/// Snapshot of a single node.
#[derive(Debug, Clone, Serialize)]
pub struct NodeSnapshot {
    pub id: NodeId,
    pub name: String,
    pub ports: Vec<PortDescriptor>,
    pub params: BTreeMap<String, ParamValue>,
}

/// Snapshot of a single link.
#[derive(Debug, Clone, Serialize)]
pub struct EdgeSnapshot {
    pub id: EdgeId,
    pub source: NodeId,
    pub source_port: String,
    pub target: NodeId,
    pub target_port: String,
}

/// Snapshot of an external parameter alias.
#[derive(Debug, Clone, Serialize)]
pub struct RedirectSnapshot {
    pub external: String,
    pub node: NodeId,
    pub param: String,
}

/// Complete topology snapshot of a graph.
#[derive(Debug, Clone, Serialize)]
pub struct TopologySnapshot {
    pub generation: u64,
    pub nodes: Vec<NodeSnapshot>,
    pub edges: Vec<EdgeSnapshot>,
    pub redirects: Vec<RedirectSnapshot>,
}

impl TopologySnapshot {
    pub fn to_json_pretty(&self) -> crate::error::Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| crate::error::RockSurfaceError::Serialization(e.to_string()))
    }
}
