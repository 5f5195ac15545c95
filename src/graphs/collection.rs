use std::{fmt::Debug, hash::Hash};

use crate::graphs::{
    edges::EdgeType,
    error::GraphError,
    graph::Graph,
};

/// Common contract for collections built item by item.
///
/// A collection knows its size, accepts items one at a time (possibly
/// rejecting them), and can be extended from or concatenated with any
/// source of items.
pub trait Collection {
    type Item;

    type Error;

    /// Number of items held.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Adds one item.
    fn add(&mut self, item: Self::Item) -> Result<(), Self::Error>;

    /// Adds every item in order, stopping at the first rejected one.
    ///
    /// Items added before the failure stay in the collection.
    fn add_all<I>(&mut self, items: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Item>,
    {
        for item in items {
            self.add(item)?;
        }
        Ok(())
    }

    /// A new collection holding the items of `self` followed by `other`.
    ///
    /// `self` is left untouched, even on failure.
    fn concat<I>(&self, other: I) -> Result<Self, Self::Error>
    where
        Self: Clone + Sized,
        I: IntoIterator<Item = Self::Item>,
    {
        let mut result = self.clone();
        result.add_all(other)?;
        Ok(result)
    }
}

/// A graph is a collection of vertex labels.
impl<L, D> Collection for Graph<L, D>
where
    L: Eq + Hash + Clone + Debug,
    D: EdgeType,
{
    type Item = L;

    type Error = GraphError<L>;

    fn len(&self) -> usize {
        self.size_vertices()
    }

    fn add(&mut self, item: L) -> Result<(), GraphError<L>> {
        self.add_vertex(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphs::graph::{DirectedGraph, UndirectedGraph};

    #[test]
    fn add_all_in_order() {
        let mut graph = UndirectedGraph::new();
        graph.add_all(["b", "a", "c"]).unwrap();
        assert_eq!(Collection::len(&graph), 3);
        assert!(!Collection::is_empty(&graph));
        assert_eq!(graph.labels().copied().collect::<Vec<_>>(), vec!["b", "a", "c"]);
    }

    #[test]
    fn add_all_keeps_prefix_on_failure() {
        let mut graph = DirectedGraph::new();
        let result = graph.add_all([1, 2, 2, 3]);
        assert_eq!(result, Err(GraphError::DuplicateLabel(2)));
        assert_eq!(graph.labels().copied().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn concat_leaves_source_untouched() {
        let mut graph = UndirectedGraph::from_labels(["x", "y"]).unwrap();
        graph.add_edge(&"x", &"y", 1.0).unwrap();

        let joined = graph.concat(["z"]).unwrap();
        assert_eq!(joined.labels().copied().collect::<Vec<_>>(), vec!["x", "y", "z"]);
        assert_eq!(joined.size_edges(), 1, "edges travel with the copy");
        assert_eq!(graph.size_vertices(), 2);

        assert_eq!(graph.concat(["y"]).err(), Some(GraphError::DuplicateLabel("y")));
        assert_eq!(graph.size_vertices(), 2);
    }

    #[test]
    fn empty_collection() {
        let graph = UndirectedGraph::<u8>::new();
        assert!(Collection::is_empty(&graph));
        assert_eq!(Collection::len(&graph), 0);
    }
}
