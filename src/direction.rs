use crate::Point;

use enum_primitive_derive::Primitive;
use num_traits::cast::FromPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A cardinal direction of travel in screen orientation, i.e. `Up` decreases `y`.
///
/// The integer order matches the discrete action encoding (see `Move::action_index`) and is used
/// for indexing rule tables.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Primitive, Serialize)]
pub enum Direction {
    Left = 0,
    Down = 1,
    Right = 2,
    Up = 3,
}

impl Direction {
    pub fn is_vertical(self) -> bool {
        self as u32 % 2 == 1
    }

    pub fn is_horizontal(self) -> bool {
        !self.is_vertical()
    }

    pub fn negate(self) -> Self {
        Direction::from_u32((self as u32 + 2) % 4).expect("Bad direction index")
    }

    /// Unit vector pointing in this direction.
    pub fn unit(self) -> Point {
        ALL_UNITS[self as usize]
    }

    /// The two candidate anchor offsets that lie across the axis of travel, positive first.
    pub fn perpendicular(self) -> [Point; 2] {
        if self.is_vertical() {
            [Point::new(1, 0), Point::new(-1, 0)]
        } else {
            [Point::new(0, 1), Point::new(0, -1)]
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Direction::Left => "left",
            Direction::Down => "down",
            Direction::Right => "right",
            Direction::Up => "up",
        };

        f.write_str(name)
    }
}

/// Allows for indexing by `Direction`.
#[derive(Clone, Copy, Debug)]
pub struct DirectionIndex<T> {
    /// Be careful to make each value correspond to the correct `Direction`.
    pub values: [T; 4],
}

impl<T> DirectionIndex<T> {
    pub const fn new(values: [T; 4]) -> Self {
        DirectionIndex { values }
    }

    pub fn get(&self, direction: Direction) -> &T {
        &self.values[direction as usize]
    }

    pub fn get_mut(&mut self, direction: Direction) -> &mut T {
        &mut self.values[direction as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Direction, &T)> {
        self.values.iter().enumerate().map(|(i, v)| {
            (
                Direction::from_usize(i).expect("Bad index for direction"),
                v,
            )
        })
    }
}

pub const ALL_DIRECTIONS: [Direction; 4] = [
    Direction::Left,
    Direction::Down,
    Direction::Right,
    Direction::Up,
];

const ALL_UNITS: [Point; 4] = [
    Point { x: -1, y: 0 },
    Point { x: 0, y: 1 },
    Point { x: 1, y: 0 },
    Point { x: 0, y: -1 },
];

impl From<Direction> for Point {
    fn from(d: Direction) -> Self {
        d.unit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negate_is_opposite_unit() {
        for d in ALL_DIRECTIONS.iter() {
            assert_eq!(d.negate().unit(), -d.unit());
            assert_eq!(d.negate().negate(), *d);
        }
    }

    #[test]
    fn test_perpendicular_is_orthogonal() {
        for d in ALL_DIRECTIONS.iter() {
            let u = d.unit();
            for a in d.perpendicular().iter() {
                assert_eq!(u.x * a.x + u.y * a.y, 0);
            }
        }
    }

    #[test]
    fn test_up_is_screen_up() {
        assert_eq!(Point::from(Direction::Up), Point::new(0, -1));
        assert!(Direction::Up.is_vertical());
        assert!(Direction::Left.is_horizontal());
    }

    #[test]
    fn test_direction_index_iter_order() {
        let index = DirectionIndex::new(['l', 'd', 'r', 'u']);
        let pairs: Vec<_> = index.iter().map(|(d, c)| (d, *c)).collect();

        assert_eq!(
            pairs,
            vec![
                (Direction::Left, 'l'),
                (Direction::Down, 'd'),
                (Direction::Right, 'r'),
                (Direction::Up, 'u'),
            ]
        );
        assert_eq!(*index.get(Direction::Right), 'r');
    }
}
