use crate::maximum_flow::error::FlowError;
use crate::maximum_flow::extension::Extension;
use crate::maximum_flow::graph::FlowGraph;
use crate::maximum_flow::residual_network::ResidualNetwork;
use crate::maximum_flow::status::Status;
use num_traits::Float;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt::Debug;

impl<G, Flow, VX, EX> ResidualNetwork<'_, G, Flow, VX, EX>
where
    G: FlowGraph<Flow>,
    Flow: Float + Debug,
{
    // flow on each input edge; on undirected edges whichever direction carries it
    fn compose_flow(&self) -> HashMap<G::Edge, Flow> {
        let graph = self.graph();
        let mut flows = HashMap::with_capacity(graph.edges().size_hint().0);

        for e in graph.edges() {
            let Some(id) = self.edge_id_of(e) else { continue };
            let edge = self.edge(id);
            let value = if self.is_directed() {
                edge.flow()
            } else {
                let inverse = self.edge(edge.inverse());
                match self.comparator().compare(edge.flow(), inverse.flow()) {
                    Ordering::Less => inverse.flow(),
                    _ => edge.flow(),
                }
            };
            flows.insert(e, value);
        }

        log::debug!("composed flow for {} edges", flows.len());
        flows
    }

    /// Flow on every edge of the input graph, composed on first access and cached until the
    /// network is rebuilt.
    pub fn maximum_flow(&self) -> Result<&HashMap<G::Edge, Flow>, FlowError> {
        if self.status() == Status::Uninitialized {
            return Err(FlowError::NotInitialized);
        }
        Ok(self.composed.get_or_init(|| self.compose_flow()))
    }

    pub fn flow_on(&self, e: G::Edge) -> Result<Flow, FlowError> {
        if !self.graph().contains_edge(e) {
            return Err(FlowError::EdgeNotInGraph);
        }
        self.maximum_flow()?.get(&e).copied().ok_or(FlowError::NotInitialized)
    }

    /// Returns the vertex where the flow leaves the edge `e`.
    ///
    /// A directed edge always yields its target. An undirected edge yields the target of the
    /// direction carrying more flow; if no flow goes through the edge the result is meaningless.
    pub fn flow_direction(&self, e: G::Edge) -> Result<G::Vertex, FlowError> {
        if !self.graph().contains_edge(e) {
            return Err(FlowError::EdgeNotInGraph);
        }
        let id = self.edge_id_of(e).ok_or(FlowError::NotInitialized)?;
        let edge = self.edge(id);

        let target = if self.is_directed() {
            edge.target()
        } else {
            let inverse = self.edge(edge.inverse());
            match self.comparator().compare(edge.flow(), inverse.flow()) {
                Ordering::Greater => edge.target(),
                _ => inverse.target(),
            }
        };

        self.vertex(target).prototype().ok_or(FlowError::NotInitialized)
    }
}
