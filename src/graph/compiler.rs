use super::compiled::{CompiledTopology, TopologyStats};
use super::id::NodeId;
use super::port;
use super::store::Graph;
use crate::error::{Result, RockSurfaceError};
use std::collections::VecDeque;

/// Analyses a graph's links into a `CompiledTopology`
pub struct TopologyCompiler;

impl TopologyCompiler {
    /// Compile the live topology of `graph`.
    ///
    /// Performs bidirectional reachability analysis: a node is active when it
    /// is reachable from a source (a node without input ports: the input
    /// proxy or a generator) AND reaches a sink (a node without output ports:
    /// the output proxy). Active nodes are returned in topological order.
    ///
    /// # Errors
    /// `CycleDetected` if the active nodes cannot be ordered.
    pub fn compile(graph: &Graph) -> Result<CompiledTopology> {
        let n = graph.node_count();
        if n == 0 {
            return Ok(CompiledTopology::new());
        }

        let (fwd_adj, bwd_adj) = Self::build_adjacency(graph);

        let sources = Self::identify(graph, |ports| !port::has_input(ports));
        let sinks = Self::identify(graph, |ports| !port::has_output(ports));

        let fwd_reachable = Self::reachability(&sources, &fwd_adj, n);
        let bwd_reachable = Self::reachability(&sinks, &bwd_adj, n);

        let active_set: Vec<bool> = (0..n)
            .map(|i| fwd_reachable[i] && bwd_reachable[i])
            .collect();

        let active_nodes = Self::topological_sort_active(&fwd_adj, &active_set)?;

        let active_edges = graph
            .edges()
            .iter()
            .filter(|e| active_set[e.source.index()] && active_set[e.target.index()])
            .map(|e| (e.source, e.target))
            .collect();

        let disconnected_nodes: Vec<NodeId> = (0..n)
            .filter(|&i| !active_set[i])
            .map(|i| NodeId(i as u32))
            .collect();

        let stats = TopologyStats {
            total_nodes: n,
            active_nodes: active_nodes.len(),
            disconnected_nodes: disconnected_nodes.len(),
            source_nodes: sources.len(),
            sink_nodes: sinks.len(),
        };

        Ok(CompiledTopology {
            active_nodes,
            active_edges,
            disconnected_nodes,
            generation: graph.generation(),
            stats,
        })
    }

    /// Build forward and backward adjacency lists
    fn build_adjacency(graph: &Graph) -> (Vec<Vec<usize>>, Vec<Vec<usize>>) {
        let n = graph.node_count();
        let mut fwd_adj = vec![Vec::new(); n];
        let mut bwd_adj = vec![Vec::new(); n];

        for edge in graph.edges() {
            let from = edge.source.index();
            let to = edge.target.index();
            if from >= n || to >= n {
                continue;
            }
            fwd_adj[from].push(to);
            bwd_adj[to].push(from);
        }

        (fwd_adj, bwd_adj)
    }

    /// Nodes whose port layout satisfies `pred` (structural, not edge-based)
    fn identify(graph: &Graph, pred: impl Fn(&[port::PortDescriptor]) -> bool) -> Vec<usize> {
        graph
            .nodes()
            .filter(|(_, node)| pred(node.ports()))
            .map(|(id, _)| id.index())
            .collect()
    }

    /// DFS from `roots` along `adj`
    fn reachability(roots: &[usize], adj: &[Vec<usize>], n: usize) -> Vec<bool> {
        let mut reachable = vec![false; n];
        let mut stack = Vec::new();

        for &root in roots {
            reachable[root] = true;
            stack.push(root);
        }

        while let Some(node) = stack.pop() {
            for &neighbor in &adj[node] {
                if !reachable[neighbor] {
                    reachable[neighbor] = true;
                    stack.push(neighbor);
                }
            }
        }

        reachable
    }

    /// Topological sort of active nodes using Kahn's algorithm
    fn topological_sort_active(
        fwd_adj: &[Vec<usize>],
        active_set: &[bool],
    ) -> Result<Vec<NodeId>> {
        let n = active_set.len();
        let mut in_degree = vec![0usize; n];

        for (from, targets) in fwd_adj.iter().enumerate() {
            if !active_set[from] {
                continue;
            }
            for &to in targets {
                if active_set[to] {
                    in_degree[to] += 1;
                }
            }
        }

        let mut queue: VecDeque<usize> =
            (0..n).filter(|&i| active_set[i] && in_degree[i] == 0).collect();
        let mut result = Vec::new();

        while let Some(node) = queue.pop_front() {
            result.push(NodeId(node as u32));
            for &neighbor in &fwd_adj[node] {
                if !active_set[neighbor] {
                    continue;
                }
                in_degree[neighbor] -= 1;
                if in_degree[neighbor] == 0 {
                    queue.push_back(neighbor);
                }
            }
        }

        let active_count = active_set.iter().filter(|&&a| a).count();
        if result.len() != active_count {
            tracing::warn!(
                "Operation graph has a cycle! Only {} of {} active nodes ordered.",
                result.len(),
                active_count
            );
            return Err(RockSurfaceError::CycleDetected);
        }

        Ok(result)
    }
}
