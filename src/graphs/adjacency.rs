use slab::Slab;

use crate::graphs::{
    edges::{Edge, EdgeId},
    marks::Marks,
    vertices::{Vertex, VertexId},
};

/// Adjacency list storage shared by both edge variants.
///
/// Vertices live in a slab and own their incident lists. Edges live in a
/// separate slab; incident lists hold [`EdgeId`] handles into it, so an
/// undirected edge is one record referenced from two lists. Slab keys stay
/// stable while the value lives and freed keys are handed out again, so
/// marks for both kinds are bit vectors indexed by key and cleared on reuse.
///
/// Handles passed to the accessors must be live. Passing a released handle
/// is a logic error in the caller and panics.
#[derive(Debug, Clone)]
pub struct Adjacency<L> {
    vertices: Slab<Vertex<L>>,
    edges: Slab<Edge>,
    vertex_marks: Marks,
    edge_marks: Marks,
}

impl<L> Default for Adjacency<L> {
    fn default() -> Self {
        Self {
            vertices: Slab::default(),
            edges: Slab::default(),
            vertex_marks: Marks::default(),
            edge_marks: Marks::default(),
        }
    }
}

impl<L> Adjacency<L> {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn vertex(&self, vertex: VertexId) -> &Vertex<L> {
        match self.vertices.get(vertex.0) {
            Some(stored) => stored,
            None => panic!("Adjacency::vertex: {vertex:?} is not live"),
        }
    }

    #[inline]
    pub fn label(&self, vertex: VertexId) -> &L {
        self.vertex(vertex).label()
    }

    #[inline]
    pub fn incident(&self, vertex: VertexId) -> &[EdgeId] {
        self.vertex(vertex).incident()
    }

    #[inline]
    pub fn edge(&self, edge: EdgeId) -> &Edge {
        match self.edges.get(edge.0) {
            Some(stored) => stored,
            None => panic!("Adjacency::edge: {edge:?} is not live"),
        }
    }

    #[inline]
    pub fn contains_edge(&self, edge: EdgeId) -> bool {
        self.edges.contains(edge.0)
    }

    pub(crate) fn vertex_mut(&mut self, vertex: VertexId) -> &mut Vertex<L> {
        match self.vertices.get_mut(vertex.0) {
            Some(stored) => stored,
            None => panic!("Adjacency::vertex_mut: {vertex:?} is not live"),
        }
    }

    pub(crate) fn edge_mut(&mut self, edge: EdgeId) -> Option<&mut Edge> {
        self.edges.get_mut(edge.0)
    }

    pub(crate) fn insert_vertex(&mut self, label: L) -> VertexId {
        let index = self.vertices.insert(Vertex::new(label));
        // A recycled slot must not inherit the previous occupant's mark.
        self.vertex_marks.clear(index);
        VertexId(index)
    }

    /// Releases a vertex slot. Its incident edges must already be gone.
    pub(crate) fn remove_vertex(&mut self, vertex: VertexId) -> Option<Vertex<L>> {
        let removed = self.vertices.try_remove(vertex.0)?;
        debug_assert!(
            removed.incident().is_empty(),
            "Adjacency::remove_vertex: {vertex:?} still has {} incident edges",
            removed.incident().len()
        );
        self.vertex_marks.clear(vertex.0);
        Some(removed)
    }

    /// Stores `edge` in the arena without registering it anywhere.
    pub(crate) fn insert_edge(&mut self, edge: Edge) -> EdgeId {
        let index = self.edges.insert(edge);
        self.edge_marks.clear(index);
        EdgeId(index)
    }

    /// Releases an edge slot. The caller unregisters it from incident lists.
    pub(crate) fn release_edge(&mut self, edge: EdgeId) -> Option<Edge> {
        let released = self.edges.try_remove(edge.0)?;
        self.edge_marks.clear(edge.0);
        Some(released)
    }

    /// Appends `edge` to the incident list of `vertex`.
    pub(crate) fn attach(&mut self, vertex: VertexId, edge: EdgeId) {
        self.vertex_mut(vertex).incident_mut().push(edge);
    }

    /// Drops the first reference to `edge` from the incident list of
    /// `vertex`, keeping the order of the rest.
    pub(crate) fn detach(&mut self, vertex: VertexId, edge: EdgeId) -> bool {
        let incident = self.vertex_mut(vertex).incident_mut();
        match incident.iter().position(|&candidate| candidate == edge) {
            Some(position) => {
                incident.remove(position);
                true
            }
            None => false,
        }
    }

    /// Takes the whole incident list of `vertex`, leaving it empty.
    pub(crate) fn take_incident(&mut self, vertex: VertexId) -> Vec<EdgeId> {
        std::mem::take(self.vertex_mut(vertex).incident_mut())
    }

    /// Live vertex handles in slot order.
    pub(crate) fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices.iter().map(|(index, _)| VertexId(index))
    }

    pub(crate) fn set_label(&mut self, vertex: VertexId, label: L) -> L {
        self.vertex_mut(vertex).set_label(label)
    }

    #[inline]
    pub fn is_vertex_marked(&self, vertex: VertexId) -> bool {
        self.vertex_marks.is_marked(vertex.0)
    }

    #[inline]
    pub fn is_edge_marked(&self, edge: EdgeId) -> bool {
        self.edge_marks.is_marked(edge.0)
    }

    pub(crate) fn mark_vertex(&mut self, vertex: VertexId) -> bool {
        self.vertex_marks.mark(vertex.0)
    }

    pub(crate) fn clear_vertex_mark(&mut self, vertex: VertexId) -> bool {
        self.vertex_marks.clear(vertex.0)
    }

    pub(crate) fn mark_edge(&mut self, edge: EdgeId) -> bool {
        self.edge_marks.mark(edge.0)
    }

    pub(crate) fn clear_edge_mark(&mut self, edge: EdgeId) -> bool {
        self.edge_marks.clear(edge.0)
    }

    pub(crate) fn clear_vertex_marks(&mut self) {
        self.vertex_marks.clear_all();
    }

    pub(crate) fn clear_edge_marks(&mut self) {
        self.edge_marks.clear_all();
    }

    pub(crate) fn clear(&mut self) {
        self.vertices.clear();
        self.edges.clear();
        self.vertex_marks.reset();
        self.edge_marks.reset();
    }

    /// Total length of all incident lists.
    #[cfg(test)]
    pub(crate) fn incidence_count(&self) -> usize {
        self.vertices
            .iter()
            .map(|(_, vertex)| vertex.incident().len())
            .sum()
    }
}
