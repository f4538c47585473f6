pub mod epsilon;
pub mod error;
pub mod extension;
pub mod flow_assignment;
pub mod graph;
pub mod residual_network;
pub mod status;
