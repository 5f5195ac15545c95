use crate::graphs::{
    adjacency::Adjacency,
    edges::{Edge, EdgeId, EdgeType},
    vertices::VertexId,
};

/// Undirected edges.
///
/// An edge is one arena record referenced from the incident lists of both
/// endpoints, so a weight or mark change made through either endpoint is
/// visible through the other. Endpoint order is ignored by equality.
/// A loop is referenced once from its single endpoint.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Undirected;

impl EdgeType for Undirected {
    const DIRECTED: bool = false;

    const NAME: &'static str = "Undirected";

    const CONNECTOR: &'static str = "--";

    #[inline]
    fn key(from: VertexId, to: VertexId) -> (VertexId, VertexId) {
        if from <= to {
            (from, to)
        } else {
            (to, from)
        }
    }

    fn add_edge_to<L>(
        adjacency: &mut Adjacency<L>,
        from: VertexId,
        to: VertexId,
        weight: f64,
    ) -> EdgeId {
        let edge = adjacency.insert_edge(Edge::new(from, to, weight));
        adjacency.attach(from, edge);
        if to != from {
            adjacency.attach(to, edge);
        }
        edge
    }

    fn remove_edge_to<L>(adjacency: &mut Adjacency<L>, from: VertexId, to: VertexId) -> bool {
        let Some(edge) = Self::get_edge_to(adjacency, from, to) else {
            return false;
        };

        let detached = adjacency.detach(from, edge);
        debug_assert!(detached, "Undirected::remove_edge_to: {edge:?} missing at {from:?}");
        if to != from {
            // the reciprocal reference held by the other endpoint
            let detached = adjacency.detach(to, edge);
            debug_assert!(detached, "Undirected::remove_edge_to: {edge:?} missing at {to:?}");
        }

        adjacency.release_edge(edge).is_some()
    }

    fn remove_incident<L>(adjacency: &mut Adjacency<L>, removed: VertexId) -> usize {
        let mut count = 0;
        for edge in adjacency.take_incident(removed) {
            let other = adjacency.edge(edge).opposite(removed);
            if other != removed {
                let detached = adjacency.detach(other, edge);
                debug_assert!(
                    detached,
                    "Undirected::remove_incident: {edge:?} missing at {other:?}"
                );
            }
            if adjacency.release_edge(edge).is_some() {
                count += 1;
            }
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> (Adjacency<&'static str>, VertexId, VertexId) {
        let mut adjacency = Adjacency::default();
        let a = adjacency.insert_vertex("a");
        let b = adjacency.insert_vertex("b");
        (adjacency, a, b)
    }

    #[test]
    fn add_registers_one_record_at_both_ends() {
        let (mut adjacency, a, b) = pair();
        let edge = Undirected::add_edge_to(&mut adjacency, a, b, 4.0);

        assert_eq!(adjacency.incident(a), &[edge]);
        assert_eq!(adjacency.incident(b), &[edge]);
        assert_eq!(adjacency.edge_count(), 1);
        assert_eq!(Undirected::get_edge_to(&adjacency, a, b), Some(edge));
        assert_eq!(Undirected::get_edge_to(&adjacency, b, a), Some(edge));
    }

    #[test]
    fn loop_is_listed_once() {
        let (mut adjacency, a, _) = pair();
        let edge = Undirected::add_edge_to(&mut adjacency, a, a, 1.0);
        assert_eq!(adjacency.incident(a), &[edge]);

        assert!(Undirected::remove_edge_to(&mut adjacency, a, a));
        assert!(adjacency.incident(a).is_empty());
        assert_eq!(adjacency.edge_count(), 0);
    }

    #[test]
    fn remove_from_either_end_clears_both_lists() {
        let (mut adjacency, a, b) = pair();
        Undirected::add_edge_to(&mut adjacency, a, b, 4.0);

        assert!(Undirected::remove_edge_to(&mut adjacency, b, a));
        assert!(adjacency.incident(a).is_empty());
        assert!(adjacency.incident(b).is_empty());
        assert!(!Undirected::remove_edge_to(&mut adjacency, a, b));
    }

    #[test]
    fn remove_incident_counts_each_edge_once() {
        let (mut adjacency, a, b) = pair();
        let c = adjacency.insert_vertex("c");
        Undirected::add_edge_to(&mut adjacency, a, b, 1.0);
        Undirected::add_edge_to(&mut adjacency, c, a, 2.0);
        Undirected::add_edge_to(&mut adjacency, a, a, 3.0);
        let kept = Undirected::add_edge_to(&mut adjacency, b, c, 5.0);

        assert_eq!(Undirected::remove_incident(&mut adjacency, a), 3);
        assert!(adjacency.incident(a).is_empty());
        assert_eq!(adjacency.incident(b), &[kept]);
        assert_eq!(adjacency.incident(c), &[kept]);
        assert_eq!(adjacency.edge_count(), 1);
    }
}
