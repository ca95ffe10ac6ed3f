use crate::graph::id::NodeId;

/// Result of analysing a graph's live topology.
/// `active_nodes` only holds nodes on a path from a source to a sink.
#[derive(Debug, Clone)]
pub struct CompiledTopology {
    /// Active nodes in topological order
    pub active_nodes: Vec<NodeId>,

    /// Links between active nodes (source, target)
    pub active_edges: Vec<(NodeId, NodeId)>,

    /// Nodes that exist but carry no data from a source to a sink
    pub disconnected_nodes: Vec<NodeId>,

    /// Graph generation this analysis was made for
    pub generation: u64,

    /// Compilation statistics
    pub stats: TopologyStats,
}

/// Statistics about a compiled topology
#[derive(Debug, Clone, Default)]
pub struct TopologyStats {
    /// Total number of nodes in the graph (including disconnected)
    pub total_nodes: usize,

    /// Number of active nodes
    pub active_nodes: usize,

    /// Number of disconnected nodes
    pub disconnected_nodes: usize,

    /// Number of source nodes (no input port)
    pub source_nodes: usize,

    /// Number of sink nodes (no output port)
    pub sink_nodes: usize,
}

impl CompiledTopology {
    /// Create a new empty topology
    pub fn new() -> Self {
        Self {
            active_nodes: Vec::new(),
            active_edges: Vec::new(),
            disconnected_nodes: Vec::new(),
            generation: 0,
            stats: TopologyStats::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.active_nodes.is_empty()
    }

    pub fn is_active(&self, id: NodeId) -> bool {
        self.active_nodes.contains(&id)
    }

    /// Position of `id` in the evaluation order, if active.
    pub fn position(&self, id: NodeId) -> Option<usize> {
        self.active_nodes.iter().position(|&n| n == id)
    }
}

impl Default for CompiledTopology {
    fn default() -> Self {
        Self::new()
    }
}
