use std::{
    fmt::{self, Debug, Display},
    hash::{Hash, Hasher},
};

use crate::graphs::{
    adjacency::Adjacency,
    graph::Graph,
    vertices::{VertexId, VertexRef},
};

/// Handle of an edge in the graph's edge arena.
///
/// Both endpoints of an undirected edge hold the same handle, so weight and
/// mark changes made through one endpoint are seen through the other.
/// Handles of removed edges may be recycled by later insertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub(crate) usize);

impl EdgeId {
    /// Slot index of the edge in the arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Stored edge record.
///
/// `source` and `target` are the endpoints in insertion order. Whether that
/// order matters is decided by the graph's [`EdgeType`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    source: VertexId,
    target: VertexId,
    weight: f64,
}

impl Edge {
    pub(crate) fn new(source: VertexId, target: VertexId, weight: f64) -> Self {
        Self {
            source,
            target,
            weight,
        }
    }

    #[inline]
    pub fn source(&self) -> VertexId {
        self.source
    }

    #[inline]
    pub fn target(&self) -> VertexId {
        self.target
    }

    #[inline]
    pub fn weight(&self) -> f64 {
        self.weight
    }

    #[inline]
    pub(crate) fn set_weight(&mut self, weight: f64) {
        self.weight = weight;
    }

    /// The endpoint across the edge from `this`.
    ///
    /// For a loop both endpoints are `this`.
    #[inline]
    pub fn opposite(&self, this: VertexId) -> VertexId {
        if self.source == this {
            self.target
        } else {
            self.source
        }
    }
}

/// The capability set shared by directed and undirected edges.
///
/// A graph picks its variant once through the type parameter of
/// [`Graph`]; every vertex level operation is dispatched through it.
/// The two variants differ in endpoint equality, in which incident lists an
/// edge is registered with, and in how removing a vertex cascades.
///
/// None of the operations check uniqueness or label validity; the graph
/// container does that before calling into them.
pub trait EdgeType: Copy + Default + Debug + 'static {
    /// True when endpoint order is significant.
    const DIRECTED: bool;

    /// Name used when displaying a graph of this kind.
    const NAME: &'static str;

    /// Connector drawn between endpoint labels when displaying an edge.
    const CONNECTOR: &'static str;

    /// Canonical endpoint key of a pair.
    ///
    /// Two edges are equal exactly when their keys are equal, regardless of
    /// weight.
    fn key(from: VertexId, to: VertexId) -> (VertexId, VertexId);

    /// Returns true when `edge` joins `from` and `to` under this variant's
    /// equality.
    #[inline]
    fn connects(edge: &Edge, from: VertexId, to: VertexId) -> bool {
        Self::key(edge.source(), edge.target()) == Self::key(from, to)
    }

    /// Creates an edge and registers it in the relevant incident lists.
    fn add_edge_to<L>(
        adjacency: &mut Adjacency<L>,
        from: VertexId,
        to: VertexId,
        weight: f64,
    ) -> EdgeId;

    /// Finds the stored edge joining `from` and `to` by scanning the incident
    /// list of `from`. Cost is linear in the degree of `from`.
    fn get_edge_to<L>(adjacency: &Adjacency<L>, from: VertexId, to: VertexId) -> Option<EdgeId> {
        adjacency
            .incident(from)
            .iter()
            .copied()
            .find(|&edge| Self::connects(adjacency.edge(edge), from, to))
    }

    /// Removes the edge joining `from` and `to` from every incident list that
    /// refers to it and releases it from the arena.
    ///
    /// Returns true when an edge was removed.
    fn remove_edge_to<L>(adjacency: &mut Adjacency<L>, from: VertexId, to: VertexId) -> bool;

    /// Removes every edge touching `removed`, leaving the vertex itself in
    /// place with an empty incident list.
    ///
    /// Returns the number of logical edges removed.
    fn remove_incident<L>(adjacency: &mut Adjacency<L>, removed: VertexId) -> usize;
}

/// Read view of a stored edge.
///
/// Equality and hashing follow the graph's [`EdgeType`] and ignore the
/// weight, so the two views of an undirected edge obtained from either
/// endpoint compare equal.
pub struct EdgeRef<'g, L, D: EdgeType> {
    graph: &'g Graph<L, D>,
    id: EdgeId,
    edge: &'g Edge,
}

impl<'g, L, D: EdgeType> EdgeRef<'g, L, D> {
    pub(crate) fn new(graph: &'g Graph<L, D>, id: EdgeId) -> Self {
        let edge = graph.adjacency().edge(id);
        Self { graph, id, edge }
    }

    #[inline]
    pub fn id(&self) -> EdgeId {
        self.id
    }

    #[inline]
    pub fn weight(&self) -> f64 {
        self.edge.weight()
    }

    #[inline]
    pub fn is_marked(&self) -> bool {
        self.graph.adjacency().is_edge_marked(self.id)
    }

    #[inline]
    pub fn is_directed(&self) -> bool {
        D::DIRECTED
    }

    /// Label of the first endpoint (the source for directed edges).
    pub fn source(&self) -> &'g L {
        self.graph.adjacency().label(self.edge.source())
    }

    /// Label of the second endpoint (the destination for directed edges).
    pub fn target(&self) -> &'g L {
        self.graph.adjacency().label(self.edge.target())
    }

    /// Both endpoint labels in insertion order.
    pub fn vertices(&self) -> (&'g L, &'g L) {
        (self.source(), self.target())
    }

    /// Both endpoints as vertex views.
    pub fn endpoints(&self) -> (VertexRef<'g, L, D>, VertexRef<'g, L, D>) {
        (
            VertexRef::new(self.graph, self.edge.source()),
            VertexRef::new(self.graph, self.edge.target()),
        )
    }

    /// The endpoint label across the edge from `this`.
    ///
    /// Returns `None` when `this` is not an endpoint of the edge.
    pub fn other_vertex(&self, this: &L) -> Option<&'g L>
    where
        L: PartialEq,
    {
        let (source, target) = self.vertices();
        if source == this {
            Some(target)
        } else if target == this {
            Some(source)
        } else {
            None
        }
    }

    pub(crate) fn opposite_label(&self, this: VertexId) -> &'g L {
        self.graph.adjacency().label(self.edge.opposite(this))
    }

    fn key(&self) -> (VertexId, VertexId) {
        D::key(self.edge.source(), self.edge.target())
    }
}

impl<L, D: EdgeType> Clone for EdgeRef<'_, L, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<L, D: EdgeType> Copy for EdgeRef<'_, L, D> {}

impl<L, D: EdgeType> PartialEq for EdgeRef<'_, L, D> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl<L, D: EdgeType> Eq for EdgeRef<'_, L, D> {}

impl<L, D: EdgeType> Hash for EdgeRef<'_, L, D> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl<L: Debug, D: EdgeType> Debug for EdgeRef<'_, L, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EdgeRef")
            .field("id", &self.id)
            .field("source", self.source())
            .field("target", self.target())
            .field("weight", &self.weight())
            .finish()
    }
}

impl<L: Display, D: EdgeType> Display for EdgeRef<'_, L, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({})",
            self.source(),
            D::CONNECTOR,
            self.target(),
            self.weight()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphs::{directed::Directed, undirected::Undirected};

    #[test]
    fn opposite_handles_both_ends_and_loops() {
        let a = VertexId(0);
        let b = VertexId(1);
        let edge = Edge::new(a, b, 1.5);
        assert_eq!(edge.opposite(a), b);
        assert_eq!(edge.opposite(b), a);

        let looped = Edge::new(a, a, 0.0);
        assert_eq!(looped.opposite(a), a);
    }

    #[test]
    fn undirected_key_ignores_order() {
        let a = VertexId(3);
        let b = VertexId(7);
        assert_eq!(Undirected::key(a, b), Undirected::key(b, a));

        let edge = Edge::new(a, b, 2.0);
        assert!(Undirected::connects(&edge, a, b));
        assert!(Undirected::connects(&edge, b, a));
        assert!(!Undirected::connects(&edge, a, a));
    }

    #[test]
    fn directed_key_keeps_order() {
        let a = VertexId(3);
        let b = VertexId(7);
        assert_ne!(Directed::key(a, b), Directed::key(b, a));

        let edge = Edge::new(a, b, 2.0);
        assert!(Directed::connects(&edge, a, b));
        assert!(!Directed::connects(&edge, b, a));
    }

    #[test]
    fn edge_views_display_with_connector() {
        let mut undirected = Graph::<&str, Undirected>::new();
        undirected.add_vertex("A").unwrap();
        undirected.add_vertex("B").unwrap();
        undirected.add_edge(&"A", &"B", 3.0).unwrap();
        let edge = undirected.get_edge(&"B", &"A").unwrap().unwrap();
        assert_eq!(edge.to_string(), "A -- B (3)");

        let mut directed = Graph::<&str, Directed>::new();
        directed.add_vertex("A").unwrap();
        directed.add_vertex("B").unwrap();
        directed.add_edge(&"A", &"B", 2.5).unwrap();
        let edge = directed.get_edge(&"A", &"B").unwrap().unwrap();
        assert_eq!(edge.to_string(), "A -> B (2.5)");
    }

    #[test]
    fn other_vertex_from_either_end() {
        let mut graph = Graph::<&str, Undirected>::new();
        for label in ["A", "B", "C"] {
            graph.add_vertex(label).unwrap();
        }
        graph.add_edge(&"A", &"B", 1.0).unwrap();
        let edge = graph.get_edge(&"A", &"B").unwrap().unwrap();

        assert_eq!(edge.other_vertex(&"A"), Some(&"B"));
        assert_eq!(edge.other_vertex(&"B"), Some(&"A"));
        assert_eq!(edge.other_vertex(&"C"), None);
    }

    #[test]
    fn views_from_both_endpoints_are_equal() {
        let mut graph = Graph::<u32, Undirected>::new();
        graph.add_vertex(1).unwrap();
        graph.add_vertex(2).unwrap();
        graph.add_edge(&1, &2, 9.0).unwrap();

        let forward = graph.get_edge(&1, &2).unwrap().unwrap();
        let backward = graph.get_edge(&2, &1).unwrap().unwrap();
        assert_eq!(forward, backward);
        assert_eq!(forward.id(), backward.id());
    }
}
