use crate::{NeighborState, Point};

use serde::{Deserialize, Serialize};

/// Electrical charge carried by a voxel. Display metadata only.
pub type Charge = i32;

/// Fill color of a voxel. Display metadata only.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Color {
    White,
    Red,
    Green,
    Blue,
}

impl Default for Color {
    fn default() -> Self {
        Color::White
    }
}

impl Color {
    pub fn rgb(self) -> [u8; 3] {
        match self {
            Color::White => [255, 255, 255],
            Color::Red => [255, 0, 0],
            Color::Green => [0, 255, 0],
            Color::Blue => [0, 0, 255],
        }
    }
}

/// One robot unit occupying a single lattice cell.
///
/// The neighbor state is a cache owned by the voxel's `Shape`; it is only meaningful after the
/// shape has been refreshed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Voxel {
    position: Point,
    neighbors: NeighborState,
    pub charge: Charge,
    pub color: Color,
}

impl Voxel {
    /// A white voxel with unit charge at world position `position`.
    pub fn new(position: Point) -> Self {
        Self {
            position,
            neighbors: NeighborState::empty(),
            charge: 1,
            color: Color::default(),
        }
    }

    pub fn with_charge(mut self, charge: Charge) -> Self {
        self.charge = charge;

        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;

        self
    }

    /// World position.
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn neighbors(&self) -> &NeighborState {
        &self.neighbors
    }

    pub(crate) fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub(crate) fn set_neighbors(&mut self, neighbors: NeighborState) {
        self.neighbors = neighbors;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_voxel_defaults() {
        let voxel = Voxel::new(Point::new(40, -80));

        assert_eq!(voxel.position(), Point::new(40, -80));
        assert_eq!(voxel.charge, 1);
        assert_eq!(voxel.color, Color::White);
        assert_eq!(voxel.neighbors().num_occupied(), 0);
    }

    #[test]
    fn test_builders_set_metadata() {
        let voxel = Voxel::new(Point::zero())
            .with_charge(-2)
            .with_color(Color::Green);

        assert_eq!(voxel.charge, -2);
        assert_eq!(voxel.color.rgb(), [0, 255, 0]);
        assert_eq!(Color::default().rgb(), [255, 255, 255]);
    }
}
