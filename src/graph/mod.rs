pub mod dependency_graph;
pub mod dot;

pub use dependency_graph::DependencyGraph;
