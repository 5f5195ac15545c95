use crate::graphs::{
    adjacency::Adjacency,
    edges::{Edge, EdgeId, EdgeType},
    vertices::VertexId,
};

/// Directed edges.
///
/// An edge is owned by the incident list of its source only, and endpoint
/// order is significant for equality. Removing a vertex drops its outgoing
/// list directly and then scans the remaining vertices for edges pointing
/// at it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Directed;

impl EdgeType for Directed {
    const DIRECTED: bool = true;

    const NAME: &'static str = "Directed";

    const CONNECTOR: &'static str = "->";

    #[inline]
    fn key(from: VertexId, to: VertexId) -> (VertexId, VertexId) {
        (from, to)
    }

    fn add_edge_to<L>(
        adjacency: &mut Adjacency<L>,
        from: VertexId,
        to: VertexId,
        weight: f64,
    ) -> EdgeId {
        let edge = adjacency.insert_edge(Edge::new(from, to, weight));
        adjacency.attach(from, edge);
        edge
    }

    fn remove_edge_to<L>(adjacency: &mut Adjacency<L>, from: VertexId, to: VertexId) -> bool {
        let Some(edge) = Self::get_edge_to(adjacency, from, to) else {
            return false;
        };

        let detached = adjacency.detach(from, edge);
        debug_assert!(detached, "Directed::remove_edge_to: {edge:?} missing at {from:?}");
        adjacency.release_edge(edge).is_some()
    }

    fn remove_incident<L>(adjacency: &mut Adjacency<L>, removed: VertexId) -> usize {
        let mut count = 0;

        // outgoing
        for edge in adjacency.take_incident(removed) {
            if adjacency.release_edge(edge).is_some() {
                count += 1;
            }
        }

        // ingoing
        let sources: Vec<VertexId> = adjacency
            .vertex_ids()
            .filter(|&vertex| vertex != removed)
            .collect();
        for source in sources {
            let ingoing: Vec<EdgeId> = adjacency
                .incident(source)
                .iter()
                .copied()
                .filter(|&edge| adjacency.edge(edge).target() == removed)
                .collect();
            for edge in ingoing {
                adjacency.detach(source, edge);
                if adjacency.release_edge(edge).is_some() {
                    count += 1;
                }
            }
        }

        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_registers_at_source_only() {
        let mut adjacency = Adjacency::default();
        let a = adjacency.insert_vertex("a");
        let b = adjacency.insert_vertex("b");
        let edge = Directed::add_edge_to(&mut adjacency, a, b, 2.0);

        assert_eq!(adjacency.incident(a), &[edge]);
        assert!(adjacency.incident(b).is_empty());
        assert_eq!(Directed::get_edge_to(&adjacency, a, b), Some(edge));
        assert_eq!(Directed::get_edge_to(&adjacency, b, a), None);
    }

    #[test]
    fn remove_respects_direction() {
        let mut adjacency = Adjacency::default();
        let a = adjacency.insert_vertex("a");
        let b = adjacency.insert_vertex("b");
        Directed::add_edge_to(&mut adjacency, a, b, 2.0);

        assert!(!Directed::remove_edge_to(&mut adjacency, b, a));
        assert!(Directed::remove_edge_to(&mut adjacency, a, b));
        assert_eq!(adjacency.edge_count(), 0);
    }

    #[test]
    fn remove_incident_drops_outgoing_and_ingoing() {
        let mut adjacency = Adjacency::default();
        let a = adjacency.insert_vertex("a");
        let b = adjacency.insert_vertex("b");
        let c = adjacency.insert_vertex("c");
        Directed::add_edge_to(&mut adjacency, a, b, 1.0);
        Directed::add_edge_to(&mut adjacency, a, a, 1.0);
        Directed::add_edge_to(&mut adjacency, b, a, 1.0);
        Directed::add_edge_to(&mut adjacency, c, a, 1.0);
        let kept = Directed::add_edge_to(&mut adjacency, b, c, 1.0);

        assert_eq!(Directed::remove_incident(&mut adjacency, a), 4);
        assert_eq!(adjacency.incident(b), &[kept]);
        assert!(adjacency.incident(c).is_empty());
        assert_eq!(adjacency.edge_count(), 1);
        assert_eq!(adjacency.incidence_count(), 1);
    }
}
