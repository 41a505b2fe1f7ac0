use crate::{Point, ShapeError};

use serde::{Deserialize, Serialize};

/// How a world-space difference between two voxels is converted into a cell offset.
///
/// Both modes agree whenever voxel positions are exact multiples of the cell size, which `Shape`
/// enforces. They differ by one cell for negative differences that are not, e.g. `-41 / 40` is
/// `-1` when truncating and `-2` when flooring, which only matters when calling `detect` on raw
/// positions.
///
/// `Truncate` is the default. `Floor` gives the same offsets as the Python electrovoxel
/// environment, which divides with `//`.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum OffsetRounding {
    /// Round toward zero.
    Truncate,
    /// Round toward negative infinity.
    Floor,
}

impl Default for OffsetRounding {
    fn default() -> Self {
        OffsetRounding::Truncate
    }
}

impl OffsetRounding {
    pub fn divide(self, p: Point, cell_size: i32) -> Point {
        match self {
            OffsetRounding::Truncate => p.div_truncate(cell_size),
            OffsetRounding::Floor => p.div_floor(cell_size),
        }
    }
}

/// Largest magnitude of a world coordinate a `Shape` accepts. Differences between positions,
/// move destinations, and bounding extents all stay within `i32`.
pub const MAX_COORDINATE: i32 = i32::MAX / 4;

/// Parameters shared by every voxel of a `Shape`.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(default)]
pub struct ShapeConfig {
    /// World units per lattice cell. Voxel positions are stored in world units and every move
    /// displaces by whole cells.
    pub cell_size: i32,
    pub rounding: OffsetRounding,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self {
            cell_size: 1,
            rounding: OffsetRounding::default(),
        }
    }
}

impl ShapeConfig {
    pub fn with_cell_size(cell_size: i32) -> Self {
        Self {
            cell_size,
            ..Self::default()
        }
    }

    pub fn rounding(mut self, rounding: OffsetRounding) -> Self {
        self.rounding = rounding;

        self
    }

    pub fn validate(&self) -> Result<(), ShapeError> {
        if self.cell_size <= 0 {
            return Err(ShapeError::InvalidCellSize {
                cell_size: self.cell_size,
            });
        }

        Ok(())
    }

    /// Checks that `position` lies on this lattice and within `MAX_COORDINATE`.
    pub fn validate_position(&self, position: Point) -> Result<(), ShapeError> {
        self.validate()?;
        let in_range = |c: i32| (-MAX_COORDINATE..=MAX_COORDINATE).contains(&c);
        if !in_range(position.x) || !in_range(position.y) {
            return Err(ShapeError::OutOfRange { position });
        }
        if position.x % self.cell_size != 0 || position.y % self.cell_size != 0 {
            return Err(ShapeError::MisalignedPosition {
                position,
                cell_size: self.cell_size,
            });
        }

        Ok(())
    }

    /// The cell offset from `from` to `to`, both in world units. Returns `None` if the difference
    /// does not fit in an `i32`; such points are too far apart to be neighbors anyway.
    pub fn cell_offset(&self, from: Point, to: Point) -> Option<Point> {
        to.checked_sub(&from)
            .map(|d| self.rounding.divide(d, self.cell_size))
    }
}
