//! Nodes of the operation graph.
//!
//! A node is either one of the two boundary proxies or an instance of an
//! [`Operation`] carrying its current parameter values.

use crate::error::{Result, RockSurfaceError};
use crate::graph::operation::Operation;
use crate::graph::port::{self, PortDescriptor};
use crate::graph::value::ParamValue;
use std::collections::BTreeMap;

/// What a node is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Placeholder for the pipeline's external input.
    InputProxy,
    /// Placeholder for the pipeline's external output.
    OutputProxy,
    Operation(Operation),
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::InputProxy => "input",
            NodeKind::OutputProxy => "output",
            NodeKind::Operation(op) => op.registry_name(),
        }
    }

    pub fn ports(&self) -> &'static [PortDescriptor] {
        match self {
            NodeKind::InputProxy => port::SOURCE_PORTS,
            NodeKind::OutputProxy => port::SINK_PORTS,
            NodeKind::Operation(op) => op.ports(),
        }
    }

    pub fn operation(&self) -> Option<Operation> {
        match self {
            NodeKind::Operation(op) => Some(*op),
            _ => None,
        }
    }
}

/// A node and its parameter values.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationNode {
    kind: NodeKind,
    params: BTreeMap<&'static str, ParamValue>,
}

impl OperationNode {
    pub fn proxy(kind: NodeKind) -> Self {
        debug_assert!(kind.operation().is_none());
        Self {
            kind,
            params: BTreeMap::new(),
        }
    }

    /// A fresh instance of `op` with every parameter at its default.
    pub fn new(op: Operation) -> Self {
        Self {
            kind: NodeKind::Operation(op),
            params: op.params().iter().map(|p| (p.name, p.default)).collect(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn ports(&self) -> &'static [PortDescriptor] {
        self.kind.ports()
    }

    pub fn param(&self, name: &str) -> Option<ParamValue> {
        self.params.get(name).copied()
    }

    pub fn params(&self) -> impl Iterator<Item = (&'static str, ParamValue)> + '_ {
        self.params.iter().map(|(k, v)| (*k, *v))
    }

    /// Resolve `name` against the operation's schema, returning the schema's
    /// static name.
    pub fn resolve_param(&self, name: &str) -> Result<&'static str> {
        self.kind
            .operation()
            .and_then(|op| op.param(name))
            .map(|spec| spec.name)
            .ok_or_else(|| RockSurfaceError::UnknownParameter {
                operation: self.name().to_string(),
                param: name.to_string(),
            })
    }

    /// Write a parameter. The value must match the declared kind
    /// (int is widened to double).
    pub fn set_param(&mut self, name: &str, value: ParamValue) -> Result<()> {
        let key = self.resolve_param(name)?;
        let expected = self.params[key].kind();
        let value = value
            .coerce(expected)
            .ok_or_else(|| RockSurfaceError::ParameterType {
                param: format!("{}.{}", self.name(), name),
                expected: expected.name(),
                actual: value.kind().name(),
            })?;
        self.params.insert(key, value);
        Ok(())
    }
}
