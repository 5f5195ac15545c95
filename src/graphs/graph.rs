use std::{
    fmt::{self, Debug, Display},
    hash::Hash,
    marker::PhantomData,
};

use indexmap::{map, IndexMap};
use rustc_hash::FxBuildHasher;
use tracing::trace;

use crate::graphs::{
    adjacency::Adjacency,
    directed::Directed,
    edges::{EdgeId, EdgeRef, EdgeType},
    error::{GraphError, GraphResult},
    iter::{EdgesIter, IncidentEdges, Neighbors, Vertices},
    undirected::Undirected,
    vertices::{VertexId, VertexRef},
};

/// Read-only query surface of a weighted graph.
///
/// Algorithms such as the all-pairs shortest distance engine are written
/// against this trait and never mutate the graph they are given.
pub trait ReadGraph {
    /// Type used to identify vertices.
    type Label: Eq + Hash + Clone;

    /// Iterator over all vertex labels.
    ///
    /// The order is the canonical enumeration order and is stable for a
    /// given graph instance unless the graph is mutated.
    type Labels<'a>: Iterator<Item = &'a Self::Label>
    where
        Self: 'a;

    /// Returns an iterator over all vertex labels.
    fn labels(&self) -> Self::Labels<'_>;

    /// Number of vertices.
    fn vertex_count(&self) -> usize;

    /// Number of logical edges.
    fn edge_count(&self) -> usize;

    /// Weight of the stored edge from `from` to `to`.
    ///
    /// Returns `None` when no such edge exists. Implementors must also
    /// answer `None`, not fail, when either label is unknown: readers treat
    /// the two cases alike.
    fn weight(&self, from: &Self::Label, to: &Self::Label) -> Option<f64>;

    /// True when edges have a direction.
    fn is_directed(&self) -> bool;

    /// Size measure for the whole graph: vertices plus edges.
    fn size(&self) -> usize {
        self.vertex_count() + self.edge_count()
    }
}

/// Adjacency list graph keyed by vertex label.
///
/// The label map preserves insertion order, which is the canonical order of
/// [`Graph::vertices`]. `D` selects undirected or directed edges once for the
/// whole graph.
///
/// Queries that name a vertex fail with [`GraphError::UnknownLabel`] when the
/// label is absent, and failed operations leave the graph unchanged.
pub struct Graph<L, D: EdgeType = Undirected> {
    labels: IndexMap<L, VertexId, FxBuildHasher>,
    adjacency: Adjacency<L>,
    edge_count: usize,
    kind: PhantomData<D>,
}

pub type UndirectedGraph<L> = Graph<L, Undirected>;

pub type DirectedGraph<L> = Graph<L, Directed>;

impl<L, D: EdgeType> Default for Graph<L, D> {
    fn default() -> Self {
        Self {
            labels: IndexMap::default(),
            adjacency: Adjacency::default(),
            edge_count: 0,
            kind: PhantomData,
        }
    }
}

impl<L: Clone, D: EdgeType> Clone for Graph<L, D> {
    fn clone(&self) -> Self {
        Self {
            labels: self.labels.clone(),
            adjacency: self.adjacency.clone(),
            edge_count: self.edge_count,
            kind: PhantomData,
        }
    }
}

impl<L, D: EdgeType> Graph<L, D> {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn adjacency(&self) -> &Adjacency<L> {
        &self.adjacency
    }

    #[inline]
    pub fn is_directed(&self) -> bool {
        D::DIRECTED
    }

    /// Number of vertices.
    #[inline]
    pub fn size_vertices(&self) -> usize {
        self.labels.len()
    }

    /// Number of logical edges. An undirected edge counts once.
    #[inline]
    pub fn size_edges(&self) -> usize {
        self.edge_count
    }

    /// Number of vertices, the size of the graph as a collection.
    #[inline]
    pub fn len(&self) -> usize {
        self.size_vertices()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Reverts to the empty graph.
    pub fn clear(&mut self) {
        self.labels.clear();
        self.adjacency.clear();
        self.edge_count = 0;
    }

    /// Vertices in insertion order.
    pub fn vertices(&self) -> Vertices<'_, L, D> {
        Vertices::new(self, self.labels.values())
    }

    /// Every logical edge exactly once.
    ///
    /// Undirected edges are deduplicated across their two incident lists;
    /// directed edges are the concatenation of every outgoing list.
    pub fn edges(&self) -> EdgesIter<'_, L, D> {
        EdgesIter::new(self, self.labels.values())
    }

    /// Vertex labels in insertion order.
    pub fn labels(&self) -> map::Keys<'_, L, VertexId> {
        self.labels.keys()
    }

    /// Read view of the edge behind `edge`, if the handle is live.
    pub fn edge(&self, edge: EdgeId) -> Option<EdgeRef<'_, L, D>> {
        self.adjacency
            .contains_edge(edge)
            .then(|| EdgeRef::new(self, edge))
    }

    /// Sets the weight of the edge behind `edge`.
    ///
    /// The change is visible from both endpoints of an undirected edge.
    /// Returns false when the handle is not live.
    pub fn set_weight(&mut self, edge: EdgeId, weight: f64) -> bool {
        match self.adjacency.edge_mut(edge) {
            Some(stored) => {
                stored.set_weight(weight);
                true
            }
            None => false,
        }
    }

    /// Marks the edge behind `edge`. Returns true when it was unmarked.
    pub fn mark_edge(&mut self, edge: EdgeId) -> bool {
        self.adjacency.contains_edge(edge) && self.adjacency.mark_edge(edge)
    }

    /// Clears the mark on the edge behind `edge`. Returns true when it was
    /// marked.
    pub fn clear_edge_mark(&mut self, edge: EdgeId) -> bool {
        self.adjacency.contains_edge(edge) && self.adjacency.clear_edge_mark(edge)
    }

    pub fn clear_edge_marks(&mut self) {
        self.adjacency.clear_edge_marks();
    }

    pub fn clear_vertex_marks(&mut self) {
        self.adjacency.clear_vertex_marks();
    }

    fn check_counts(&self) {
        debug_assert_eq!(
            self.edge_count,
            self.adjacency.edge_count(),
            "Graph: edge counter {} != arena size {}",
            self.edge_count,
            self.adjacency.edge_count()
        );
        debug_assert_eq!(
            self.labels.len(),
            self.adjacency.vertex_count(),
            "Graph: label map size {} != vertex slab size {}",
            self.labels.len(),
            self.adjacency.vertex_count()
        );
    }
}

impl<L, D> Graph<L, D>
where
    L: Eq + Hash + Clone + Debug,
    D: EdgeType,
{
    /// Builds a graph from a source collection of labels, adding each in
    /// order. Fails on the first repeated label.
    pub fn from_labels<I>(labels: I) -> GraphResult<Self, L>
    where
        I: IntoIterator<Item = L>,
    {
        let mut graph = Self::new();
        for label in labels {
            graph.add_vertex(label)?;
        }
        Ok(graph)
    }

    fn vertex_id(&self, label: &L) -> GraphResult<VertexId, L> {
        self.labels
            .get(label)
            .copied()
            .ok_or_else(|| GraphError::UnknownLabel(label.clone()))
    }

    pub fn contains_vertex(&self, label: &L) -> bool {
        self.labels.contains_key(label)
    }

    /// Appends a vertex at the end of the enumeration order.
    pub fn add_vertex(&mut self, label: L) -> GraphResult<(), L> {
        if self.labels.contains_key(&label) {
            return Err(GraphError::DuplicateLabel(label));
        }

        let vertex = self.adjacency.insert_vertex(label.clone());
        trace!(?label, ?vertex, "added vertex");
        self.labels.insert(label, vertex);
        self.check_counts();
        Ok(())
    }

    pub fn get_vertex(&self, label: &L) -> GraphResult<VertexRef<'_, L, D>, L> {
        let vertex = self.vertex_id(label)?;
        Ok(VertexRef::new(self, vertex))
    }

    /// Removes a vertex along with every edge touching it.
    ///
    /// Returns false when the label is absent.
    pub fn remove_vertex(&mut self, label: &L) -> bool {
        // shift keeps the enumeration order of the remaining vertices
        let Some(vertex) = self.labels.shift_remove(label) else {
            return false;
        };

        let removed_edges = D::remove_incident(&mut self.adjacency, vertex);
        self.edge_count -= removed_edges;
        self.adjacency.remove_vertex(vertex);
        trace!(?label, removed_edges, "removed vertex");

        self.check_counts();
        true
    }

    /// Renames a vertex in place, keeping its position in the enumeration
    /// order and all its edges.
    ///
    /// Relabeling a vertex to its own label is a no-op.
    pub fn relabel(&mut self, old: &L, new: L) -> GraphResult<(), L> {
        let vertex = self.vertex_id(old)?;
        if *old == new {
            return Ok(());
        }
        if self.labels.contains_key(&new) {
            return Err(GraphError::DuplicateLabel(new));
        }

        let Some((position, _, _)) = self.labels.shift_remove_full(old) else {
            return Err(GraphError::UnknownLabel(old.clone()));
        };
        let (last, _) = self.labels.insert_full(new.clone(), vertex);
        self.labels.move_index(last, position);
        let previous = self.adjacency.set_label(vertex, new);
        trace!(?previous, label = ?self.adjacency.label(vertex), "relabeled vertex");

        self.check_counts();
        Ok(())
    }

    /// Connects `from` and `to` with a new edge of the given weight.
    ///
    /// Fails when either label is absent or when the pair is already
    /// connected under this graph's edge equality. The edge counter grows by
    /// exactly one in every successful case.
    pub fn add_edge(&mut self, from: &L, to: &L, weight: f64) -> GraphResult<EdgeId, L> {
        let source = self.vertex_id(from)?;
        let target = self.vertex_id(to)?;
        if D::get_edge_to(&self.adjacency, source, target).is_some() {
            return Err(GraphError::DuplicateEdge {
                from: from.clone(),
                to: to.clone(),
            });
        }

        let edge = D::add_edge_to(&mut self.adjacency, source, target, weight);
        self.edge_count += 1;
        trace!(?from, ?to, weight, ?edge, "added edge");

        self.check_counts();
        Ok(edge)
    }

    /// The stored edge joining `from` and `to`, if any.
    ///
    /// Linear in the degree of `from`.
    pub fn get_edge(&self, from: &L, to: &L) -> GraphResult<Option<EdgeRef<'_, L, D>>, L> {
        let source = self.vertex_id(from)?;
        let target = self.vertex_id(to)?;
        Ok(D::get_edge_to(&self.adjacency, source, target).map(|edge| EdgeRef::new(self, edge)))
    }

    pub fn contains_edge(&self, from: &L, to: &L) -> GraphResult<bool, L> {
        Ok(self.get_edge(from, to)?.is_some())
    }

    /// Removes the edge joining `from` and `to`.
    ///
    /// Returns whether an edge was removed.
    pub fn remove_edge(&mut self, from: &L, to: &L) -> GraphResult<bool, L> {
        let source = self.vertex_id(from)?;
        let target = self.vertex_id(to)?;
        let removed = D::remove_edge_to(&mut self.adjacency, source, target);
        if removed {
            self.edge_count -= 1;
            trace!(?from, ?to, "removed edge");
        }

        self.check_counts();
        Ok(removed)
    }

    /// Incident edges of the vertex labelled `label`.
    pub fn incident_edges(&self, label: &L) -> GraphResult<IncidentEdges<'_, L, D>, L> {
        Ok(self.get_vertex(label)?.incident_edges())
    }

    /// Labels adjacent to the vertex labelled `label`.
    pub fn neighboring_vertices(&self, label: &L) -> GraphResult<Neighbors<'_, L, D>, L> {
        Ok(self.get_vertex(label)?.neighboring_vertices())
    }

    pub fn degree(&self, label: &L) -> GraphResult<usize, L> {
        Ok(self.get_vertex(label)?.degree())
    }

    /// Marks the vertex labelled `label`. Returns true when it was unmarked.
    pub fn mark_vertex(&mut self, label: &L) -> GraphResult<bool, L> {
        let vertex = self.vertex_id(label)?;
        Ok(self.adjacency.mark_vertex(vertex))
    }

    /// Clears the mark on the vertex labelled `label`. Returns true when it
    /// was marked.
    pub fn clear_vertex_mark(&mut self, label: &L) -> GraphResult<bool, L> {
        let vertex = self.vertex_id(label)?;
        Ok(self.adjacency.clear_vertex_mark(vertex))
    }
}

impl<L, D> ReadGraph for Graph<L, D>
where
    L: Eq + Hash + Clone + Debug,
    D: EdgeType,
{
    type Label = L;

    type Labels<'a>
        = map::Keys<'a, L, VertexId>
    where
        Self: 'a;

    fn labels(&self) -> Self::Labels<'_> {
        self.labels.keys()
    }

    fn vertex_count(&self) -> usize {
        self.size_vertices()
    }

    fn edge_count(&self) -> usize {
        self.size_edges()
    }

    /// An unknown label reads as a missing edge.
    fn weight(&self, from: &L, to: &L) -> Option<f64> {
        self.get_edge(from, to).ok().flatten().map(|edge| edge.weight())
    }

    fn is_directed(&self) -> bool {
        D::DIRECTED
    }
}

impl<L: PartialEq, D: EdgeType> PartialEq for Graph<L, D> {
    /// Graphs compare equal when they hold the same labels in the same
    /// enumeration order. Edges are not compared.
    fn eq(&self, other: &Self) -> bool {
        self.labels.len() == other.labels.len()
            && self.labels.keys().zip(other.labels.keys()).all(|(a, b)| a == b)
    }
}

impl<'g, L, D: EdgeType> IntoIterator for &'g Graph<L, D> {
    type Item = VertexRef<'g, L, D>;

    type IntoIter = Vertices<'g, L, D>;

    fn into_iter(self) -> Self::IntoIter {
        self.vertices()
    }
}

impl<L: Debug, D: EdgeType> Debug for Graph<L, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("kind", &D::NAME)
            .field("vertices", &self.labels.keys().collect::<Vec<_>>())
            .field("edges", &self.edges().collect::<Vec<_>>())
            .finish()
    }
}

impl<L: Display, D: EdgeType> Display for Graph<L, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} graph", D::NAME)?;
        write!(f, "{} vertices:", self.size_vertices())?;
        for (position, label) in self.labels.keys().enumerate() {
            let separator = if position == 0 { " " } else { ", " };
            write!(f, "{separator}{label}")?;
        }
        write!(f, "\n{} edges:", self.size_edges())?;
        for edge in self.edges() {
            write!(f, "\n{edge}")?;
        }
        Ok(())
    }
}
