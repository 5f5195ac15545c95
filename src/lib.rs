//! Labelled graphs over linked vertex and edge records, with an all-pairs
//! shortest distance engine.
//!
//! A [`Graph`] owns its vertices and edges. Vertices are looked up by a
//! unique label and keep insertion order; every vertex holds the handles of
//! its incident edges. The edge orientation is a type parameter:
//! [`UndirectedGraph`] shares one edge record between both endpoints while
//! [`DirectedGraph`] attaches each edge to its source only.
//!
//! [`floyd_warshall`] reads any [`ReadGraph`] and returns a
//! [`ShortestPaths`] table whose rows follow the graph's label order.

pub mod graphs;
pub mod paths;

pub use graphs::{
    collection::Collection,
    directed::Directed,
    edges::{Edge, EdgeId, EdgeRef, EdgeType},
    error::{GraphError, GraphResult},
    graph::{DirectedGraph, Graph, ReadGraph, UndirectedGraph},
    undirected::Undirected,
    vertices::{VertexId, VertexRef},
};
pub use paths::{
    floyd::{floyd_warshall, FloydConfig, FloydWarshall, ShortestPaths},
    matrix::DistanceMatrix,
    precision::Precision,
};
