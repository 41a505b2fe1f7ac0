//! Order-independent fingerprints of a shape's connectivity, and a distance between them.

use crate::{NeighborOffset, NeighborState, ShapeError};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// One 0/1 row per voxel over the sorted union of observed offsets, with rows sorted by their
/// value as a binary number (first column most significant).
///
/// Two shapes with the same multiset of neighborhood patterns produce equal matrices regardless
/// of voxel order or absolute position, so this allows hashing and comparison based only on
/// relative connectivity.
#[derive(Clone, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct CanonicalStateMatrix {
    columns: Vec<NeighborOffset>,
    num_rows: usize,
    /// Row-major.
    data: Vec<u8>,
}

impl CanonicalStateMatrix {
    pub fn from_states<I>(states: I) -> Self
    where
        I: IntoIterator<Item = NeighborState>,
    {
        let states: Vec<NeighborState> = states.into_iter().collect();
        let columns: Vec<NeighborOffset> = states
            .iter()
            .flat_map(|s| s.iter().map(|(o, _)| o))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let rows = states
            .iter()
            .map(|s| {
                columns
                    .iter()
                    .map(|o| s.is_occupied(*o) as u8)
                    .collect::<Vec<u8>>()
            })
            .sorted_by_key(|row| row_weight(row));
        let num_rows = states.len();
        let data = rows.flatten().collect();

        CanonicalStateMatrix {
            columns,
            num_rows,
            data,
        }
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// `(rows, columns)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.num_rows(), self.num_columns())
    }

    pub fn columns(&self) -> &[NeighborOffset] {
        &self.columns
    }

    pub fn row(&self, i: usize) -> &[u8] {
        let n = self.num_columns();

        &self.data[i * n..(i + 1) * n]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        (0..self.num_rows).map(move |i| self.row(i))
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}

/// Interprets `row` as a binary number, most significant bit first.
fn row_weight(row: &[u8]) -> u64 {
    row.iter().fold(0, |acc, v| (acc << 1) | u64::from(*v))
}

impl fmt::Debug for CanonicalStateMatrix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "CanonicalStateMatrix {}x{}", self.num_rows, self.num_columns())?;
        for row in self.rows() {
            writeln!(f, "  {}", row.iter().join(" "))?;
        }

        Ok(())
    }
}

/// Percentage of cells that differ between two equally sized matrices. `0.0` means identical
/// fingerprints.
pub fn similarity(a: &CanonicalStateMatrix, b: &CanonicalStateMatrix) -> Result<f64, ShapeError> {
    if a.dimensions() != b.dimensions() {
        let (left_rows, left_columns) = a.dimensions();
        let (right_rows, right_columns) = b.dimensions();

        return Err(ShapeError::ShapeMismatch {
            left_rows,
            left_columns,
            right_rows,
            right_columns,
        });
    }

    let total = a.data.len();
    if total == 0 {
        return Ok(0.0);
    }
    let mismatches = a
        .data
        .iter()
        .zip_eq(b.data.iter())
        .filter(|(x, y)| x != y)
        .count();

    Ok(100.0 * mismatches as f64 / total as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Point, ALL_OFFSETS, NUM_OFFSETS};

    fn state_of(points: &[(i32, i32)]) -> NeighborState {
        NeighborState::from_occupied(
            points
                .iter()
                .map(|p| NeighborOffset::new((*p).into()).unwrap()),
        )
    }

    #[test]
    fn test_columns_are_every_offset_in_order() {
        let m = CanonicalStateMatrix::from_states(vec![NeighborState::empty()]);

        assert_eq!(m.columns(), &ALL_OFFSETS[..]);
        assert_eq!(m.dimensions(), (1, NUM_OFFSETS));
        assert!(m.row(0).iter().all(|v| *v == 0));
    }

    #[test]
    fn test_empty_matrix() {
        let m = CanonicalStateMatrix::from_states(Vec::new());

        assert_eq!(m.dimensions(), (0, 0));
        assert_eq!(similarity(&m, &m), Ok(0.0));
    }

    #[test]
    fn test_rows_sorted_by_binary_weight() {
        // Left and right ends of a horizontal domino.
        let left_end = state_of(&[(1, 0)]);
        let right_end = state_of(&[(-1, 0)]);
        let m = CanonicalStateMatrix::from_states(vec![right_end, left_end]);

        let right_column = NeighborOffset::new(Point::new(1, 0)).unwrap().index();
        let left_column = NeighborOffset::new(Point::new(-1, 0)).unwrap().index();
        assert!(left_column < right_column);

        // (1, 0) is a less significant column than (-1, 0), so the left end sorts first.
        assert_eq!(m.row(0)[right_column], 1);
        assert_eq!(m.row(1)[left_column], 1);
        assert_eq!(m.as_slice().iter().map(|v| *v as usize).sum::<usize>(), 2);
    }

    #[test]
    fn test_row_order_does_not_matter() {
        let states = vec![
            state_of(&[(1, 0), (0, 1)]),
            state_of(&[(-1, 0)]),
            state_of(&[(0, -1), (2, 2)]),
        ];
        let mut reversed = states.clone();
        reversed.reverse();

        assert_eq!(
            CanonicalStateMatrix::from_states(states),
            CanonicalStateMatrix::from_states(reversed)
        );
    }

    #[test]
    fn test_similarity_with_self_is_zero() {
        let m = CanonicalStateMatrix::from_states(vec![
            state_of(&[(1, 0)]),
            state_of(&[(-1, 0)]),
        ]);

        assert_eq!(similarity(&m, &m), Ok(0.0));
    }

    #[test]
    fn test_similarity_counts_mismatched_cells() {
        let a = CanonicalStateMatrix::from_states(vec![state_of(&[(1, 0)]), state_of(&[(-1, 0)])]);
        let b = CanonicalStateMatrix::from_states(vec![state_of(&[(0, 1)]), state_of(&[(0, -1)])]);

        // Each row differs in exactly two cells.
        let expected = 100.0 * 4.0 / (2.0 * NUM_OFFSETS as f64);
        let actual = similarity(&a, &b).unwrap();
        assert!((actual - expected).abs() < 1e-9);
        assert_eq!(similarity(&b, &a), Ok(actual));
    }

    #[test]
    fn test_similarity_rejects_different_sizes() {
        let a = CanonicalStateMatrix::from_states(vec![NeighborState::empty()]);
        let b = CanonicalStateMatrix::from_states(vec![NeighborState::empty(); 2]);

        assert_eq!(
            similarity(&a, &b),
            Err(ShapeError::ShapeMismatch {
                left_rows: 1,
                left_columns: NUM_OFFSETS,
                right_rows: 2,
                right_columns: NUM_OFFSETS,
            })
        );
    }
}
