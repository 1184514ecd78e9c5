//! Live cell/UE topology state.
//!
//! Maintains the bipartite graph of cells and user equipments observed in
//! measurement indications, and derives the normalized tensors fed to the
//! scorer:
//! - `GraphState` for capped admission and incremental mutation
//! - `ModelInputs` for the derived feature blocks and adjacency matrices

pub mod graph;
pub mod inputs;

pub use graph::GraphState;
pub use inputs::ModelInputs;
