use std::{
    fmt,
    ops::{Index, IndexMut},
};

use crate::graphs::graph::ReadGraph;

/// Square matrix of distances, stored as one flat row-major slice.
///
/// The entry at `(row, column)` lives at `row * order + column`. Missing
/// connections are `f64::INFINITY`.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    order: usize,
    cells: Box<[f64]>,
}

impl DistanceMatrix {
    /// A matrix of `order` rows with zero on the diagonal and infinity
    /// everywhere else.
    pub fn unconnected(order: usize) -> Self {
        let mut cells = vec![f64::INFINITY; order * order].into_boxed_slice();
        for index in 0..order {
            cells[index * order + index] = 0.0;
        }
        Self { order, cells }
    }

    /// Builds a matrix from rows.
    ///
    /// Returns `None` unless every row is as long as there are rows.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Option<Self> {
        let order = rows.len();
        if rows.iter().any(|row| row.len() != order) {
            return None;
        }
        let cells = rows.into_iter().flatten().collect();
        Some(Self { order, cells })
    }

    /// Initial distance matrix of `graph`.
    ///
    /// Rows and columns follow the graph's label enumeration order. The
    /// diagonal is zero regardless of stored loops; every other entry is the
    /// weight of the stored edge between the pair, or infinity. The matrix
    /// of an undirected graph is symmetric because both lookups reach the
    /// same stored edge.
    pub fn from_graph<G: ReadGraph>(graph: &G) -> Self {
        let labels: Vec<&G::Label> = graph.labels().collect();
        let mut matrix = Self::unconnected(labels.len());

        for (row, from) in labels.iter().enumerate() {
            for (column, to) in labels.iter().enumerate() {
                if row == column {
                    continue;
                }
                if let Some(weight) = graph.weight(from, to) {
                    matrix[(row, column)] = weight;
                }
            }
        }

        matrix
    }

    /// Number of rows, equal to the number of columns.
    #[inline]
    pub fn order(&self) -> usize {
        self.order
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order == 0
    }

    #[inline]
    fn offset(&self, row: usize, column: usize) -> usize {
        debug_assert!(
            row < self.order && column < self.order,
            "DistanceMatrix: ({row}, {column}) out of range for order {}",
            self.order
        );
        row * self.order + column
    }

    /// Entry at `(row, column)`, or `None` when out of range.
    #[inline]
    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        if row < self.order && column < self.order {
            Some(self.cells[row * self.order + column])
        } else {
            None
        }
    }

    #[inline]
    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.order;
        &self.cells[start..start + self.order]
    }

    /// Rows from first to last.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks_exact panics on a zero chunk size
        self.cells.chunks_exact(self.order.max(1))
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.rows().map(<[f64]>::to_vec).collect()
    }

    pub(crate) fn cells(&self) -> &[f64] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [f64] {
        &mut self.cells
    }

    pub fn is_symmetric(&self) -> bool {
        (0..self.order)
            .all(|row| (row + 1..self.order).all(|column| self[(row, column)] == self[(column, row)]))
    }
}

impl Index<(usize, usize)> for DistanceMatrix {
    type Output = f64;

    fn index(&self, (row, column): (usize, usize)) -> &f64 {
        &self.cells[self.offset(row, column)]
    }
}

impl IndexMut<(usize, usize)> for DistanceMatrix {
    fn index_mut(&mut self, (row, column): (usize, usize)) -> &mut f64 {
        let offset = self.offset(row, column);
        &mut self.cells[offset]
    }
}

/// Width of one printed cell.
pub(crate) const CELL_WIDTH: usize = 10;

impl fmt::Display for DistanceMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, row) in self.rows().enumerate() {
            if position > 0 {
                writeln!(f)?;
            }
            for value in row {
                write!(f, "{:<width$}", format_distance(*value), width = CELL_WIDTH)?;
            }
        }
        Ok(())
    }
}

/// Renders a distance, spelling the sentinel as `inf`.
pub(crate) fn format_distance(value: f64) -> String {
    if value == f64::INFINITY {
        "inf".to_owned()
    } else {
        value.to_string()
    }
}
