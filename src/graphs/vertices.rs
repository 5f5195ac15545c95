use std::{
    fmt::{self, Debug, Display},
    hash::{Hash, Hasher},
};

use crate::graphs::{
    edges::{EdgeId, EdgeRef, EdgeType},
    graph::Graph,
    iter::{IncidentEdges, Neighbors},
};

/// Handle of a vertex in the graph's vertex slab.
///
/// Edges refer to their endpoints through these handles, never by owning
/// the vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub(crate) usize);

impl VertexId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Stored vertex record: its label and the handles of its incident edges in
/// insertion order.
#[derive(Debug, Clone)]
pub struct Vertex<L> {
    label: L,
    incident: Vec<EdgeId>,
}

impl<L> Vertex<L> {
    pub(crate) fn new(label: L) -> Self {
        Self {
            label,
            incident: Vec::new(),
        }
    }

    #[inline]
    pub fn label(&self) -> &L {
        &self.label
    }

    #[inline]
    pub fn incident(&self) -> &[EdgeId] {
        &self.incident
    }

    pub(crate) fn set_label(&mut self, label: L) -> L {
        std::mem::replace(&mut self.label, label)
    }

    pub(crate) fn incident_mut(&mut self) -> &mut Vec<EdgeId> {
        &mut self.incident
    }
}

/// Read view of a vertex.
///
/// Two views are equal when their labels are equal.
pub struct VertexRef<'g, L, D: EdgeType> {
    graph: &'g Graph<L, D>,
    id: VertexId,
}

impl<'g, L, D: EdgeType> VertexRef<'g, L, D> {
    pub(crate) fn new(graph: &'g Graph<L, D>, id: VertexId) -> Self {
        Self { graph, id }
    }

    #[inline]
    pub fn id(&self) -> VertexId {
        self.id
    }

    #[inline]
    pub fn label(&self) -> &'g L {
        self.graph.adjacency().label(self.id)
    }

    #[inline]
    pub fn is_marked(&self) -> bool {
        self.graph.adjacency().is_vertex_marked(self.id)
    }

    /// Number of entries in the incident list.
    ///
    /// An undirected loop is listed once.
    #[inline]
    pub fn degree(&self) -> usize {
        self.graph.adjacency().incident(self.id).len()
    }

    /// Incident edges in insertion order.
    ///
    /// For a directed graph these are the outgoing edges.
    pub fn incident_edges(&self) -> IncidentEdges<'g, L, D> {
        IncidentEdges::new(self.graph, self.id)
    }

    /// Labels across each incident edge, in incident list order.
    pub fn neighboring_vertices(&self) -> Neighbors<'g, L, D> {
        Neighbors::new(self.incident_edges(), self.id)
    }

    /// The edge from this vertex to `other`, if one is stored.
    pub fn edge_to(&self, other: &VertexRef<'g, L, D>) -> Option<EdgeRef<'g, L, D>> {
        D::get_edge_to(self.graph.adjacency(), self.id, other.id)
            .map(|edge| EdgeRef::new(self.graph, edge))
    }
}

impl<L, D: EdgeType> Clone for VertexRef<'_, L, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<L, D: EdgeType> Copy for VertexRef<'_, L, D> {}

impl<L: PartialEq, D: EdgeType> PartialEq for VertexRef<'_, L, D> {
    fn eq(&self, other: &Self) -> bool {
        self.label() == other.label()
    }
}

impl<L: Eq, D: EdgeType> Eq for VertexRef<'_, L, D> {}

impl<L: Hash, D: EdgeType> Hash for VertexRef<'_, L, D> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.label().hash(state);
    }
}

impl<L: Debug, D: EdgeType> Debug for VertexRef<'_, L, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v({:?})", self.label())
    }
}

impl<L: Display, D: EdgeType> Display for VertexRef<'_, L, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
