#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    #[error("cannot query the flow on an edge which does not exist in the input graph")]
    EdgeNotInGraph,

    #[error("epsilon must be a non-negative number")]
    NegativeEpsilon,

    #[error("residual network has not been initialized")]
    NotInitialized,
}
