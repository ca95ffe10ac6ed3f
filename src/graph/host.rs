//! The graph-host interface the assembler builds against.
//!
//! A host owns the nodes and links of one meta-operation and knows how to
//! create child nodes from its operation registry. [`Graph`](super::Graph)
//! is the in-process implementation; tests substitute a mock.

use crate::error::Result;
use crate::graph::id::NodeId;
use crate::graph::operation::Operation;
use crate::graph::port;
use crate::graph::value::ParamValue;

#[cfg_attr(test, mockall::automock)]
pub trait GraphHost {
    /// Create a child node for `operation`, applying `initial` parameter values.
    fn create_child_node(
        &mut self,
        operation: Operation,
        initial: &[(&'static str, ParamValue)],
    ) -> Result<NodeId>;

    /// The node standing for the pipeline's external input.
    fn input_proxy(&self) -> NodeId;

    /// The node standing for the pipeline's external output.
    fn output_proxy(&self) -> NodeId;

    /// Feed `target_port` of `target` from `source_port` of `source`.
    /// An input port has one source; an existing link into it is replaced.
    fn connect(
        &mut self,
        target: NodeId,
        target_port: &str,
        source: NodeId,
        source_port: &str,
    ) -> Result<()>;

    /// Chain nodes through their default ports: `a.output -> b.input -> ...`.
    fn link_many(&mut self, chain: &[NodeId]) -> Result<()> {
        for pair in chain.windows(2) {
            self.connect(pair[1], port::INPUT, pair[0], port::OUTPUT)?;
        }
        Ok(())
    }

    /// Drop every link. Nodes stay alive.
    fn clear_links(&mut self);

    /// Expose `target_param` of `target` under the external name `external`.
    fn redirect(&mut self, external: &str, target: NodeId, target_param: &str) -> Result<()>;
}
