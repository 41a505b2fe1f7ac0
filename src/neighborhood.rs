//! Occupancy of the 5x5 window around a voxel.

use crate::{Point, ShapeConfig};

use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt;

/// Chebyshev radius of the neighborhood window.
pub const NEIGHBORHOOD_RADIUS: i32 = 2;

/// Number of offsets in the window, excluding the center.
pub const NUM_OFFSETS: usize = 24;

/// A relative position in `[-2, 2] x [-2, 2]`, excluding `(0, 0)`.
#[derive(
    Copy, Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(try_from = "Point", into = "Point")]
pub struct NeighborOffset(Point);

impl NeighborOffset {
    /// Returns `None` if `p` lies outside the window or is the center.
    pub fn new(p: Point) -> Option<Self> {
        let in_window = |c: i32| (-NEIGHBORHOOD_RADIUS..=NEIGHBORHOOD_RADIUS).contains(&c);
        if p == Point::zero() || !in_window(p.x) || !in_window(p.y) {
            None
        } else {
            Some(NeighborOffset(p))
        }
    }

    /// Only for compile-time tables; validity is checked by tests.
    pub(crate) const fn new_unchecked(x: i32, y: i32) -> Self {
        NeighborOffset(Point::new(x, y))
    }

    pub fn point(self) -> Point {
        self.0
    }

    /// Position of this offset in `ALL_OFFSETS`.
    pub fn index(self) -> usize {
        let Point { x, y } = self.0;
        let i = ((x + NEIGHBORHOOD_RADIUS) * 5 + (y + NEIGHBORHOOD_RADIUS)) as usize;

        // Skip the center slot.
        if i > NUM_OFFSETS / 2 {
            i - 1
        } else {
            i
        }
    }

    /// Negates the x component. Offsets are closed under reflection.
    pub fn mirror_x(self) -> Self {
        NeighborOffset(Point::new(-self.0.x, self.0.y))
    }

    /// Negates the y component.
    pub fn mirror_y(self) -> Self {
        NeighborOffset(Point::new(self.0.x, -self.0.y))
    }
}

impl fmt::Display for NeighborOffset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<NeighborOffset> for Point {
    fn from(o: NeighborOffset) -> Point {
        o.0
    }
}

impl TryFrom<Point> for NeighborOffset {
    type Error = &'static str;

    fn try_from(p: Point) -> Result<Self, Self::Error> {
        NeighborOffset::new(p).ok_or("offset outside the 5x5 neighborhood")
    }
}

const fn build_all_offsets() -> [NeighborOffset; NUM_OFFSETS] {
    let mut offsets = [NeighborOffset::new_unchecked(0, 0); NUM_OFFSETS];
    let mut i = 0;
    let mut x = -NEIGHBORHOOD_RADIUS;
    while x <= NEIGHBORHOOD_RADIUS {
        let mut y = -NEIGHBORHOOD_RADIUS;
        while y <= NEIGHBORHOOD_RADIUS {
            if x != 0 || y != 0 {
                offsets[i] = NeighborOffset::new_unchecked(x, y);
                i += 1;
            }
            y += 1;
        }
        x += 1;
    }

    offsets
}

/// Every valid offset, sorted lexicographically by `(x, y)`.
pub static ALL_OFFSETS: [NeighborOffset; NUM_OFFSETS] = build_all_offsets();

/// Occupancy of all 24 offsets around one voxel. Bit `i` is the offset `ALL_OFFSETS[i]`, so there
/// is no way to represent a missing entry.
#[derive(Clone, Copy, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct NeighborState {
    bits: u32,
}

const ALL_BITS: u32 = (1 << NUM_OFFSETS) - 1;

impl From<NeighborState> for u32 {
    fn from(state: NeighborState) -> u32 {
        state.bits
    }
}

impl TryFrom<u32> for NeighborState {
    type Error = &'static str;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        if bits & !ALL_BITS != 0 {
            return Err("neighbor state has bits beyond the 24 offsets");
        }

        Ok(NeighborState { bits })
    }
}

impl NeighborState {
    /// All offsets unoccupied.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_occupied(offsets: impl IntoIterator<Item = NeighborOffset>) -> Self {
        let mut state = Self::empty();
        for o in offsets {
            state.set(o, true);
        }

        state
    }

    pub fn is_occupied(&self, offset: NeighborOffset) -> bool {
        self.bits & (1 << offset.index()) != 0
    }

    /// Like `is_occupied`, but for an arbitrary relative point. Points outside the window are
    /// `None`.
    pub fn get(&self, p: Point) -> Option<bool> {
        NeighborOffset::new(p).map(|o| self.is_occupied(o))
    }

    pub fn set(&mut self, offset: NeighborOffset, occupied: bool) {
        let mask = 1 << offset.index();
        if occupied {
            self.bits |= mask;
        } else {
            self.bits &= !mask;
        }
    }

    /// Always `NUM_OFFSETS`.
    pub fn len(&self) -> usize {
        NUM_OFFSETS
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn num_occupied(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Every offset paired with its occupancy, in `ALL_OFFSETS` order.
    pub fn iter(&self) -> impl Iterator<Item = (NeighborOffset, bool)> + '_ {
        ALL_OFFSETS.iter().map(move |o| (*o, self.is_occupied(*o)))
    }

    pub fn occupied(&self) -> impl Iterator<Item = NeighborOffset> + '_ {
        self.iter().filter(|(_, occupied)| *occupied).map(|(o, _)| o)
    }

    /// Occupancy as 0/1 values in `ALL_OFFSETS` order.
    pub fn to_binary(&self) -> [u8; NUM_OFFSETS] {
        let mut values = [0; NUM_OFFSETS];
        for (i, (_, occupied)) in self.iter().enumerate() {
            values[i] = occupied as u8;
        }

        values
    }

    /// Reads the state as a binary number with `ALL_OFFSETS[0]` as the most significant bit.
    pub fn weight(&self) -> u32 {
        self.iter()
            .fold(0, |acc, (_, occupied)| (acc << 1) | occupied as u32)
    }
}

impl fmt::Debug for NeighborState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(o, occupied)| (o.point(), occupied)))
            .finish()
    }
}

/// Computes the occupancy around `center` given the positions of the voxels in its shape. All
/// positions are in world units; `config` converts their differences into cell offsets.
///
/// `others` may include `center` itself, which is skipped.
pub fn detect<I>(center: Point, others: I, config: &ShapeConfig) -> NeighborState
where
    I: IntoIterator<Item = Point>,
{
    let mut state = NeighborState::empty();
    for other in others {
        if other == center {
            continue;
        }
        let offset = config
            .cell_offset(center, other)
            .and_then(NeighborOffset::new);
        if let Some(offset) = offset {
            state.set(offset, true);
        }
    }

    state
}
