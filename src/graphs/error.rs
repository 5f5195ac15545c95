use std::fmt::Debug;

use thiserror::Error;

pub type GraphResult<T, L> = Result<T, GraphError<L>>;

/// Recoverable failures raised by the graph container.
///
/// Every operation returning one of these has left the graph untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError<L: Debug> {
    #[error("Label {0:?} already in the graph")]
    DuplicateLabel(L),

    #[error("Label {0:?} not in the graph")]
    UnknownLabel(L),

    #[error("An edge already connects {from:?} and {to:?}")]
    DuplicateEdge { from: L, to: L },
}

impl<L: Debug> GraphError<L> {
    /// Process exit code for tools wrapping the graph.
    ///
    /// Codes come from the sysexits data-error range and are distinct per kind.
    pub fn exit_code(&self) -> i32 {
        match self {
            GraphError::DuplicateLabel(_) => 65,
            GraphError::UnknownLabel(_) => 66,
            GraphError::DuplicateEdge { .. } => 67,
        }
    }

    /// The label the error is about. For duplicate edges this is the source.
    pub fn label(&self) -> &L {
        match self {
            GraphError::DuplicateLabel(label) | GraphError::UnknownLabel(label) => label,
            GraphError::DuplicateEdge { from, .. } => from,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_labels() {
        let duplicate = GraphError::DuplicateLabel("A");
        let unknown = GraphError::UnknownLabel("B");
        let edge = GraphError::DuplicateEdge { from: "A", to: "B" };

        assert_eq!(duplicate.to_string(), "Label \"A\" already in the graph");
        assert_eq!(unknown.to_string(), "Label \"B\" not in the graph");
        assert_eq!(edge.to_string(), "An edge already connects \"A\" and \"B\"");
    }

    #[test]
    fn exit_codes_are_distinct_and_non_zero() {
        let codes = [
            GraphError::DuplicateLabel(1).exit_code(),
            GraphError::UnknownLabel(1).exit_code(),
            GraphError::DuplicateEdge { from: 1, to: 2 }.exit_code(),
        ];
        assert!(codes.iter().all(|&code| code != 0));
        assert_ne!(codes[0], codes[1]);
        assert_ne!(codes[1], codes[2]);
        assert_ne!(codes[0], codes[2]);
    }

    #[test]
    fn label_accessor() {
        assert_eq!(*GraphError::UnknownLabel(7).label(), 7);
        assert_eq!(*GraphError::DuplicateEdge { from: 3, to: 4 }.label(), 3);
    }
}
