use crate::Point;

use thiserror::Error;

/// Failures of shape construction, editing, and comparison.
///
/// An illegal move is not an error; see `Verdict`.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ShapeError {
    /// Two voxels claim the same lattice position.
    #[error("invalid shape: more than one voxel at {position}")]
    DuplicatePosition { position: Point },

    /// Similarity is only defined between matrices of equal dimensions.
    #[error("shape mismatch: {left_rows}x{left_columns} vs {right_rows}x{right_columns}")]
    ShapeMismatch {
        left_rows: usize,
        left_columns: usize,
        right_rows: usize,
        right_columns: usize,
    },

    /// The shape changed since neighbor states were last refreshed.
    #[error("neighbor states are stale; call refresh_neighbors first")]
    StateNotRefreshed,

    /// A world position is not a multiple of the cell size.
    #[error("position {position} is not on the lattice of cell size {cell_size}")]
    MisalignedPosition { position: Point, cell_size: i32 },

    /// A position lies beyond `MAX_COORDINATE`, or a cell cannot be scaled to world units.
    #[error("position {position} is outside the supported coordinate range")]
    OutOfRange { position: Point },

    #[error("no voxel at {position}")]
    VoxelNotFound { position: Point },

    #[error("cell size must be positive, got {cell_size}")]
    InvalidCellSize { cell_size: i32 },
}
