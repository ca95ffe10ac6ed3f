//! In-process operation graph.
//!
//! `Graph` owns every node of one meta-operation, the links between their
//! ports, and the table of external parameter redirects. It only prepares
//! topology; evaluating pixels is left to whatever consumes the graph.

use crate::error::{Result, RockSurfaceError};
use crate::graph::host::GraphHost;
use crate::graph::id::{EdgeId, NodeId};
use crate::graph::node::{NodeKind, OperationNode};
use crate::graph::operation::Operation;
use crate::graph::port::{self, PortDirection};
use crate::graph::registry::OperationRegistry;
use crate::graph::snapshot::{EdgeSnapshot, NodeSnapshot, RedirectSnapshot, TopologySnapshot};
use crate::graph::value::ParamValue;
use std::collections::{BTreeMap, BTreeSet};

/// A link from an output port of one node to an input port of another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub source_port: &'static str,
    pub target: NodeId,
    pub target_port: &'static str,
}

/// Order-independent identity of a link, ignoring its `EdgeId`.
pub type LinkKey = (NodeId, &'static str, NodeId, &'static str);

impl Edge {
    pub fn key(&self) -> LinkKey {
        (self.source, self.source_port, self.target, self.target_port)
    }
}

/// The target of an external parameter alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedirectTarget {
    pub node: NodeId,
    pub param: &'static str,
}

/// Nodes, links and redirects of one meta-operation.
pub struct Graph {
    registry: OperationRegistry,
    nodes: Vec<OperationNode>,
    edges: Vec<Edge>,
    redirects: BTreeMap<String, RedirectTarget>,
    input: NodeId,
    output: NodeId,
    /// Bumped on every topology change.
    generation: u64,
}

impl Graph {
    /// A graph containing only its two proxies.
    pub fn new(registry: OperationRegistry) -> Self {
        let nodes = vec![
            OperationNode::proxy(NodeKind::InputProxy),
            OperationNode::proxy(NodeKind::OutputProxy),
        ];
        Self {
            registry,
            nodes,
            edges: Vec::new(),
            redirects: BTreeMap::new(),
            input: NodeId(0),
            output: NodeId(1),
            generation: 0,
        }
    }

    pub fn registry(&self) -> &OperationRegistry {
        &self.registry
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    // ── Nodes ──

    pub fn node(&self, id: NodeId) -> Result<&OperationNode> {
        self.nodes
            .get(id.index())
            .ok_or_else(|| RockSurfaceError::InvalidNode(format!("{:?}", id)))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut OperationNode> {
        self.nodes
            .get_mut(id.index())
            .ok_or_else(|| RockSurfaceError::InvalidNode(format!("{:?}", id)))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &OperationNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId(i as u32), n))
    }

    pub fn kind(&self, id: NodeId) -> Result<NodeKind> {
        self.node(id).map(|n| n.kind())
    }

    /// Current value of a node parameter.
    pub fn param(&self, id: NodeId, name: &str) -> Result<ParamValue> {
        let node = self.node(id)?;
        let key = node.resolve_param(name)?;
        node.param(key)
            .ok_or_else(|| RockSurfaceError::UnknownParameter {
                operation: node.name().to_string(),
                param: name.to_string(),
            })
    }

    pub fn set_param(&mut self, id: NodeId, name: &str, value: ParamValue) -> Result<()> {
        self.node_mut(id)?.set_param(name, value)
    }

    // ── Edges ──

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// The node and port feeding `target_port` of `target`, if linked.
    pub fn source_of(&self, target: NodeId, target_port: &str) -> Option<(NodeId, &'static str)> {
        self.edges
            .iter()
            .find(|e| e.target == target && e.target_port == target_port)
            .map(|e| (e.source, e.source_port))
    }

    /// Nodes fed by any output of `source`.
    pub fn consumers_of(&self, source: NodeId) -> Vec<NodeId> {
        self.edges
            .iter()
            .filter(|e| e.source == source)
            .map(|e| e.target)
            .collect()
    }

    /// Whether any link ends at or starts from `id`.
    pub fn is_linked(&self, id: NodeId) -> bool {
        self.edges.iter().any(|e| e.source == id || e.target == id)
    }

    pub fn edge_set(&self) -> BTreeSet<LinkKey> {
        self.edges.iter().map(Edge::key).collect()
    }

    /// Nodes on the default-port path from the input proxy to the output proxy.
    ///
    /// Walks `input` ports backwards from the output proxy. If the walk does
    /// not reach the input proxy the partial chain is returned, starting at
    /// the first node without a default input link.
    pub fn main_chain(&self) -> Vec<NodeId> {
        let mut chain = vec![self.output];
        let mut current = self.output;
        while let Some((source, _)) = self.source_of(current, port::INPUT) {
            if chain.contains(&source) {
                tracing::warn!("Default-port chain loops back at {:?}", source);
                break;
            }
            chain.push(source);
            current = source;
            if source == self.input {
                break;
            }
        }
        chain.reverse();
        chain
    }

    // ── Redirects ──

    pub fn redirect_target(&self, external: &str) -> Option<RedirectTarget> {
        self.redirects.get(external).copied()
    }

    pub fn redirects(&self) -> impl Iterator<Item = (&str, RedirectTarget)> {
        self.redirects.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Write through an alias to the bound internal parameter.
    pub fn set_redirected(&mut self, external: &str, value: ParamValue) -> Result<()> {
        let target = self
            .redirect_target(external)
            .ok_or_else(|| RockSurfaceError::UnknownProperty(external.to_string()))?;
        self.set_param(target.node, target.param, value)
    }

    /// Read through an alias.
    pub fn redirected(&self, external: &str) -> Result<ParamValue> {
        let target = self
            .redirect_target(external)
            .ok_or_else(|| RockSurfaceError::UnknownProperty(external.to_string()))?;
        self.param(target.node, target.param)
    }

    // ── Snapshots ──

    pub fn snapshot(&self) -> TopologySnapshot {
        let nodes = self
            .nodes()
            .map(|(id, node)| NodeSnapshot {
                id,
                name: node.name().to_string(),
                ports: node.ports().to_vec(),
                params: node.params().map(|(k, v)| (k.to_string(), v)).collect(),
            })
            .collect();
        let edges = self
            .edges
            .iter()
            .map(|e| EdgeSnapshot {
                id: e.id,
                source: e.source,
                source_port: e.source_port.to_string(),
                target: e.target,
                target_port: e.target_port.to_string(),
            })
            .collect();
        let redirects = self
            .redirects()
            .map(|(name, t)| RedirectSnapshot {
                external: name.to_string(),
                node: t.node,
                param: t.param.to_string(),
            })
            .collect();
        TopologySnapshot {
            generation: self.generation,
            nodes,
            edges,
            redirects,
        }
    }

    fn resolve_port(
        &self,
        id: NodeId,
        name: &str,
        direction: PortDirection,
    ) -> Result<&'static str> {
        let node = self.node(id)?;
        port::find(node.ports(), name, direction)
            .map(|p| p.name)
            .ok_or_else(|| {
                RockSurfaceError::InvalidEdge(format!(
                    "{} ({:?}) has no {:?} port '{}'",
                    node.name(),
                    id,
                    direction,
                    name
                ))
            })
    }
}

impl GraphHost for Graph {
    fn create_child_node(
        &mut self,
        operation: Operation,
        initial: &[(&'static str, ParamValue)],
    ) -> Result<NodeId> {
        if !self.registry.contains(operation) {
            return Err(RockSurfaceError::OperationUnavailable(
                operation.registry_name().to_string(),
            ));
        }

        let mut node = OperationNode::new(operation);
        for (name, value) in initial {
            node.set_param(name, *value)?;
        }

        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        tracing::debug!("Created child node {:?} ({})", id, operation);
        Ok(id)
    }

    fn input_proxy(&self) -> NodeId {
        self.input
    }

    fn output_proxy(&self) -> NodeId {
        self.output
    }

    fn connect(
        &mut self,
        target: NodeId,
        target_port: &str,
        source: NodeId,
        source_port: &str,
    ) -> Result<()> {
        if target == source {
            return Err(RockSurfaceError::InvalidEdge(format!(
                "Cannot connect {:?} to itself",
                target
            )));
        }
        let target_port = self.resolve_port(target, target_port, PortDirection::Input)?;
        let source_port = self.resolve_port(source, source_port, PortDirection::Output)?;

        // An input port has exactly one source: replace in place.
        if let Some(edge) = self
            .edges
            .iter_mut()
            .find(|e| e.target == target && e.target_port == target_port)
        {
            edge.source = source;
            edge.source_port = source_port;
        } else {
            let id = EdgeId(self.edges.len() as u32);
            self.edges.push(Edge {
                id,
                source,
                source_port,
                target,
                target_port,
            });
        }
        self.generation += 1;

        tracing::trace!(
            "Linked {:?}.{} -> {:?}.{}",
            source,
            source_port,
            target,
            target_port
        );
        Ok(())
    }

    fn clear_links(&mut self) {
        self.edges.clear();
        self.generation += 1;
    }

    fn redirect(&mut self, external: &str, target: NodeId, target_param: &str) -> Result<()> {
        let param = self.node(target)?.resolve_param(target_param)?;
        self.redirects.insert(
            external.to_string(),
            RedirectTarget {
                node: target,
                param,
            },
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::port::{AUX, INPUT, OUTPUT};

    fn graph() -> Graph {
        Graph::new(OperationRegistry::standard())
    }

    #[test]
    fn test_new_graph_has_proxies_only() {
        let g = graph();
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.kind(g.input_proxy()).unwrap(), NodeKind::InputProxy);
        assert_eq!(g.kind(g.output_proxy()).unwrap(), NodeKind::OutputProxy);
        assert!(g.edges().is_empty());
    }

    #[test]
    fn test_create_child_applies_initial_params() {
        let mut g = graph();
        let dog = g
            .create_child_node(
                Operation::DifferenceOfGaussians,
                &[("radius1", ParamValue::Double(5.0))],
            )
            .unwrap();
        assert_eq!(g.param(dog, "radius1").unwrap(), ParamValue::Double(5.0));
        assert_eq!(g.param(dog, "radius2").unwrap(), ParamValue::Double(2.0));
    }

    #[test]
    fn test_create_child_unavailable_operation() {
        let mut g = Graph::new(OperationRegistry::standard().without(Operation::Mantiuk06));
        let err = g.create_child_node(Operation::Mantiuk06, &[]).unwrap_err();
        assert!(matches!(err, RockSurfaceError::OperationUnavailable(_)));
        assert_eq!(g.node_count(), 2);
    }

    #[test]
    fn test_link_many_and_main_chain() {
        let mut g = graph();
        let a = g.create_child_node(Operation::Emboss, &[]).unwrap();
        let b = g.create_child_node(Operation::Crop, &[]).unwrap();
        let (input, output) = (g.input_proxy(), g.output_proxy());
        g.link_many(&[input, a, b, output]).unwrap();

        assert_eq!(g.edges().len(), 3);
        assert_eq!(g.main_chain(), vec![input, a, b, output]);
    }

    #[test]
    fn test_connect_replaces_existing_input() {
        let mut g = graph();
        let over = g.create_child_node(Operation::Over, &[]).unwrap();
        let a = g.create_child_node(Operation::Color, &[]).unwrap();
        let b = g.create_child_node(Operation::CellNoise, &[]).unwrap();

        g.connect(over, AUX, a, OUTPUT).unwrap();
        g.connect(over, AUX, b, OUTPUT).unwrap();

        assert_eq!(g.edges().len(), 1);
        assert_eq!(g.source_of(over, AUX), Some((b, OUTPUT)));
        assert!(g.consumers_of(a).is_empty());
    }

    #[test]
    fn test_connect_rejects_bad_ports() {
        let mut g = graph();
        let crop = g.create_child_node(Operation::Crop, &[]).unwrap();
        let noise = g.create_child_node(Operation::CellNoise, &[]).unwrap();

        // crop has no aux, noise has no input
        let err = g.connect(crop, AUX, noise, OUTPUT).unwrap_err();
        assert!(matches!(&err, RockSurfaceError::InvalidEdge(msg) if msg.contains("no Input port 'aux'")));
        assert!(g.connect(noise, INPUT, crop, OUTPUT).is_err());
        assert!(g.connect(crop, INPUT, crop, OUTPUT).is_err());
        assert!(g.connect(NodeId(99), INPUT, crop, OUTPUT).is_err());
    }

    #[test]
    fn test_clear_links_keeps_nodes() {
        let mut g = graph();
        let a = g.create_child_node(Operation::Nop, &[]).unwrap();
        let (input, output) = (g.input_proxy(), g.output_proxy());
        g.link_many(&[input, a, output]).unwrap();
        let gen = g.generation();

        g.clear_links();
        assert!(g.edges().is_empty());
        assert_eq!(g.node_count(), 3);
        assert!(!g.is_linked(a));
        assert!(g.generation() > gen);
    }

    #[test]
    fn test_redirect_write_through() {
        let mut g = graph();
        let emboss = g.create_child_node(Operation::Emboss, &[]).unwrap();
        g.redirect("depth", emboss, "depth").unwrap();

        g.set_redirected("depth", ParamValue::Int(6)).unwrap();
        assert_eq!(g.param(emboss, "depth").unwrap(), ParamValue::Int(6));
        assert_eq!(g.redirected("depth").unwrap(), ParamValue::Int(6));
    }

    #[test]
    fn test_redirect_to_missing_param_fails() {
        let mut g = graph();
        let emboss = g.create_child_node(Operation::Emboss, &[]).unwrap();
        let err = g.redirect("scale", emboss, "scale").unwrap_err();
        assert!(matches!(err, RockSurfaceError::UnknownParameter { .. }));
        assert!(g.redirect_target("scale").is_none());
        assert!(g.set_redirected("scale", ParamValue::Double(0.1)).is_err());
    }

    #[test]
    fn test_snapshot_contents() {
        let mut g = graph();
        let a = g.create_child_node(Operation::Opacity, &[]).unwrap();
        g.redirect("tonemap", a, "value").unwrap();
        let (input, output) = (g.input_proxy(), g.output_proxy());
        g.link_many(&[input, a, output]).unwrap();

        let snap = g.snapshot();
        assert_eq!(snap.nodes.len(), 3);
        assert_eq!(snap.edges.len(), 2);
        assert_eq!(snap.redirects[0].external, "tonemap");
        assert_eq!(snap.nodes[2].name, "gegl:opacity");
    }
}
