//! Grid qubit identities.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A qubit addressed by its position on a 2-D grid.
///
/// The serde form `{"row": r, "col": c}` is the qubit's wire form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GridQubit {
    /// Grid row.
    pub row: i32,
    /// Grid column.
    pub col: i32,
}

impl GridQubit {
    /// Create a qubit at `(row, col)`.
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Check whether `other` is a nearest neighbour on the grid.
    pub fn is_adjacent(&self, other: &GridQubit) -> bool {
        let dr = i64::from(self.row) - i64::from(other.row);
        let dc = i64::from(self.col) - i64::from(other.col);
        dr.abs() + dc.abs() == 1
    }

    /// All qubits of a `rows × cols` rectangle anchored at the origin, row-major.
    pub fn rect(rows: i32, cols: i32) -> Vec<GridQubit> {
        (0..rows)
            .flat_map(|row| (0..cols).map(move |col| GridQubit::new(row, col)))
            .collect()
    }
}

impl fmt::Display for GridQubit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i32, i32)> for GridQubit {
    fn from((row, col): (i32, i32)) -> Self {
        GridQubit::new(row, col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qubit_display() {
        assert_eq!(GridQubit::new(1, 2).to_string(), "(1, 2)");
    }

    #[test]
    fn test_adjacency() {
        let q = GridQubit::new(3, 3);
        assert!(q.is_adjacent(&GridQubit::new(3, 4)));
        assert!(q.is_adjacent(&GridQubit::new(2, 3)));
        assert!(!q.is_adjacent(&GridQubit::new(4, 4)));
        assert!(!q.is_adjacent(&q));
    }

    #[test]
    fn test_rect_is_row_major() {
        let qubits = GridQubit::rect(2, 3);
        assert_eq!(qubits.len(), 6);
        assert_eq!(qubits[0], GridQubit::new(0, 0));
        assert_eq!(qubits[3], GridQubit::new(1, 0));
    }

    #[test]
    fn test_ordering_is_row_then_col() {
        assert!(GridQubit::new(0, 5) < GridQubit::new(1, 0));
        assert!(GridQubit::new(1, 0) < GridQubit::new(1, 1));
    }
}
