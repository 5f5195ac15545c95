use std::slice;

use indexmap::map;
use rustc_hash::FxHashSet;

use crate::graphs::{
    edges::{EdgeId, EdgeRef, EdgeType},
    graph::Graph,
    vertices::{VertexId, VertexRef},
};

/// Iterator over the vertices of a graph in insertion order.
///
/// The iterator borrows the graph, so the vertex set cannot change while it
/// is alive. Calling [`Graph::vertices`] again restarts from the first vertex.
pub struct Vertices<'g, L, D: EdgeType> {
    graph: &'g Graph<L, D>,
    inner: map::Values<'g, L, VertexId>,
}

impl<'g, L, D: EdgeType> Vertices<'g, L, D> {
    pub(crate) fn new(graph: &'g Graph<L, D>, inner: map::Values<'g, L, VertexId>) -> Self {
        Self { graph, inner }
    }
}

impl<'g, L, D: EdgeType> Iterator for Vertices<'g, L, D> {
    type Item = VertexRef<'g, L, D>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|&vertex| VertexRef::new(self.graph, vertex))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<L, D: EdgeType> ExactSizeIterator for Vertices<'_, L, D> {}

/// Iterator over the incident list of one vertex.
pub struct IncidentEdges<'g, L, D: EdgeType> {
    graph: &'g Graph<L, D>,
    inner: slice::Iter<'g, EdgeId>,
}

impl<'g, L, D: EdgeType> IncidentEdges<'g, L, D> {
    pub(crate) fn new(graph: &'g Graph<L, D>, vertex: VertexId) -> Self {
        Self {
            graph,
            inner: graph.adjacency().incident(vertex).iter(),
        }
    }
}

impl<'g, L, D: EdgeType> Iterator for IncidentEdges<'g, L, D> {
    type Item = EdgeRef<'g, L, D>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|&edge| EdgeRef::new(self.graph, edge))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<L, D: EdgeType> ExactSizeIterator for IncidentEdges<'_, L, D> {}

/// Labels across each incident edge of one vertex.
pub struct Neighbors<'g, L, D: EdgeType> {
    edges: IncidentEdges<'g, L, D>,
    vertex: VertexId,
}

impl<'g, L, D: EdgeType> Neighbors<'g, L, D> {
    pub(crate) fn new(edges: IncidentEdges<'g, L, D>, vertex: VertexId) -> Self {
        Self { edges, vertex }
    }
}

impl<'g, L, D: EdgeType> Iterator for Neighbors<'g, L, D> {
    type Item = &'g L;

    fn next(&mut self) -> Option<Self::Item> {
        self.edges
            .next()
            .map(|edge| edge.opposite_label(self.vertex))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.edges.size_hint()
    }
}

/// Iterator over every logical edge of a graph.
///
/// Walks the incident lists in vertex insertion order. Undirected edges
/// appear in two lists, so for undirected graphs the handles already yielded
/// are tracked and the second sighting is skipped. Directed edges appear
/// once and are passed through as they come.
pub struct EdgesIter<'g, L, D: EdgeType> {
    graph: &'g Graph<L, D>,
    vertices: map::Values<'g, L, VertexId>,
    current: slice::Iter<'g, EdgeId>,
    seen: Option<FxHashSet<EdgeId>>,
}

impl<'g, L, D: EdgeType> EdgesIter<'g, L, D> {
    pub(crate) fn new(graph: &'g Graph<L, D>, vertices: map::Values<'g, L, VertexId>) -> Self {
        let seen = if D::DIRECTED {
            None
        } else {
            Some(FxHashSet::default())
        };
        Self {
            graph,
            vertices,
            current: (&[] as &[EdgeId]).iter(),
            seen,
        }
    }
}

impl<'g, L, D: EdgeType> Iterator for EdgesIter<'g, L, D> {
    type Item = EdgeRef<'g, L, D>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            for &edge in self.current.by_ref() {
                let fresh = match &mut self.seen {
                    Some(seen) => seen.insert(edge),
                    None => true,
                };
                if fresh {
                    return Some(EdgeRef::new(self.graph, edge));
                }
            }

            let &vertex = self.vertices.next()?;
            self.current = self.graph.adjacency().incident(vertex).iter();
        }
    }
}
