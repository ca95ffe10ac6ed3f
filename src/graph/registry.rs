//! The set of operations a graph host can instantiate.

use crate::graph::operation::Operation;
use std::collections::BTreeSet;

/// Operations available to `Graph::create_child_node`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationRegistry {
    available: BTreeSet<Operation>,
}

impl OperationRegistry {
    /// Every operation this crate knows about.
    pub fn standard() -> Self {
        Self {
            available: Operation::all().iter().copied().collect(),
        }
    }

    /// This registry minus `op`, e.g. a host built without the tone mapper.
    pub fn without(mut self, op: Operation) -> Self {
        self.available.remove(&op);
        self
    }

    pub fn contains(&self, op: Operation) -> bool {
        self.available.contains(&op)
    }
}

impl Default for OperationRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
