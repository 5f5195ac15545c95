use std::{fmt, hash::Hash};

use rayon::{iter::ParallelIterator, slice::ParallelSliceMut};
use rustc_hash::FxHashMap;
use tracing::{debug, instrument};

use crate::{
    graphs::graph::ReadGraph,
    paths::{
        matrix::{format_distance, DistanceMatrix, CELL_WIDTH},
        precision::Precision,
    },
};

/// Settings for one all-pairs shortest distance run.
///
/// There is no default precision: whether candidates are rounded changes
/// results, so the caller always states it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloydConfig {
    pub precision: Precision,
    /// Matrices of at least this many rows relax their rows in parallel,
    /// provided the precision is exact.
    pub parallel_threshold: usize,
}

impl FloydConfig {
    pub const DEFAULT_PARALLEL_THRESHOLD: usize = 256;

    pub fn new(precision: Precision) -> Self {
        Self {
            precision,
            parallel_threshold: Self::DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    pub fn with_parallel_threshold(mut self, parallel_threshold: usize) -> Self {
        self.parallel_threshold = parallel_threshold;
        self
    }

    /// The parallel sweep reads a snapshot of the pivot row, which only
    /// matches the in-place sweep when candidates are not rounded.
    fn runs_parallel(&self, order: usize) -> bool {
        self.precision.is_exact() && order >= self.parallel_threshold
    }
}

/// Result of an all-pairs run: the distance matrix and the label of each
/// row, in the graph's enumeration order.
#[derive(Debug, Clone)]
pub struct ShortestPaths<L> {
    matrix: DistanceMatrix,
    labels: Vec<L>,
    rows: FxHashMap<L, usize>,
}

impl<L: Eq + Hash + Clone> ShortestPaths<L> {
    fn new(matrix: DistanceMatrix, labels: Vec<L>) -> Self {
        debug_assert_eq!(
            matrix.order(),
            labels.len(),
            "ShortestPaths: matrix order {} != label count {}",
            matrix.order(),
            labels.len()
        );
        let rows = labels
            .iter()
            .enumerate()
            .map(|(row, label)| (label.clone(), row))
            .collect();
        Self {
            matrix,
            labels,
            rows,
        }
    }

    #[inline]
    pub fn matrix(&self) -> &DistanceMatrix {
        &self.matrix
    }

    /// Row to label map.
    #[inline]
    pub fn labels(&self) -> &[L] {
        &self.labels
    }

    #[inline]
    pub fn label(&self, row: usize) -> Option<&L> {
        self.labels.get(row)
    }

    #[inline]
    pub fn index_of(&self, label: &L) -> Option<usize> {
        self.rows.get(label).copied()
    }

    /// Shortest distance from `from` to `to`; infinity when unreachable and
    /// `None` when either label was not in the graph.
    pub fn distance(&self, from: &L, to: &L) -> Option<f64> {
        let row = self.index_of(from)?;
        let column = self.index_of(to)?;
        self.matrix.get(row, column)
    }

    pub fn into_parts(self) -> (DistanceMatrix, Vec<L>) {
        (self.matrix, self.labels)
    }
}

/// All-pairs shortest distances over any [`ReadGraph`].
///
/// The graph is only read. Negative weights are accepted; negative cycles
/// are not detected and leave the result unspecified.
#[derive(Debug, Clone, Copy)]
pub struct FloydWarshall {
    config: FloydConfig,
}

impl FloydWarshall {
    pub fn new(config: FloydConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FloydConfig {
        &self.config
    }

    /// Runs the engine over `graph`.
    ///
    /// Row `i` of the result belongs to the `i`-th label yielded by
    /// [`ReadGraph::labels`].
    #[instrument(skip_all, fields(vertices = graph.vertex_count(), precision = %self.config.precision))]
    pub fn run<G>(&self, graph: &G) -> ShortestPaths<G::Label>
    where
        G: ReadGraph,
    {
        let labels: Vec<G::Label> = graph.labels().cloned().collect();
        let mut matrix = DistanceMatrix::from_graph(graph);
        self.relax(&mut matrix);
        ShortestPaths::new(matrix, labels)
    }

    /// Relaxes `matrix` in place, allowing each row in turn as an
    /// intermediate hop.
    pub fn relax(&self, matrix: &mut DistanceMatrix) {
        let order = matrix.order();
        if self.config.runs_parallel(order) {
            debug!(order, "relaxing rows in parallel");
            relax_parallel(matrix);
        } else {
            debug!(order, "relaxing sequentially");
            relax_sequential(matrix, self.config.precision);
        }
    }
}

/// Runs the engine with the given precision and default settings otherwise.
pub fn floyd_warshall<G: ReadGraph>(graph: &G, precision: Precision) -> ShortestPaths<G::Label> {
    FloydWarshall::new(FloydConfig::new(precision)).run(graph)
}

/// Reference sweep: `k` outermost, then every `(i, j)` in row-major order,
/// reading the live matrix each time.
fn relax_sequential(matrix: &mut DistanceMatrix, precision: Precision) {
    let order = matrix.order();
    let cells = matrix.cells_mut();

    for k in 0..order {
        for i in 0..order {
            // an unreachable hop stays unreachable for every j
            if cells[i * order + k] == f64::INFINITY {
                continue;
            }
            for j in 0..order {
                let candidate = precision.apply(cells[i * order + k] + cells[k * order + j]);
                if candidate < cells[i * order + j] {
                    cells[i * order + j] = candidate;
                }
            }
        }
    }
}

/// For a fixed `k` with exact arithmetic, neither row `k` nor column `k`
/// changes while relaxing through `k` (their candidates add the zero
/// diagonal), so every row can be relaxed independently against a copy of
/// row `k`.
fn relax_parallel(matrix: &mut DistanceMatrix) {
    let order = matrix.order();
    let mut pivot = vec![0.0; order];

    for k in 0..order {
        pivot.copy_from_slice(&matrix.cells()[k * order..(k + 1) * order]);
        let pivot = &pivot;

        matrix.cells_mut().par_chunks_mut(order).for_each(|row| {
            let through = row[k];
            if through == f64::INFINITY {
                return;
            }
            for (cell, &onward) in row.iter_mut().zip(pivot.iter()) {
                let candidate = through + onward;
                if candidate < *cell {
                    *cell = candidate;
                }
            }
        });
    }
}

impl<L: fmt::Display> fmt::Display for ShortestPaths<L> {
    /// Matrix with a header row and column of labels.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:width$}", "", width = CELL_WIDTH)?;
        for label in &self.labels {
            write!(f, "{:<width$}", label.to_string(), width = CELL_WIDTH)?;
        }
        for (label, row) in self.labels.iter().zip(self.matrix.rows()) {
            write!(f, "\n{:<width$}", label.to_string(), width = CELL_WIDTH)?;
            for value in row {
                write!(f, "{:<width$}", format_distance(*value), width = CELL_WIDTH)?;
            }
        }
        Ok(())
    }
}
