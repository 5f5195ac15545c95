pub mod adjacency;
pub mod collection;
pub mod directed;
pub mod edges;
pub mod error;
pub mod graph;
pub mod iter;
pub mod marks;
pub mod undirected;
pub mod vertices;
