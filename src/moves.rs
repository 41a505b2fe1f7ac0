//! Legality rules for single-voxel pivot and transverse moves.
//!
//! Every rule looks only at the moving voxel's own `NeighborState`. Committing a move makes the
//! neighbor states of the moved voxel and of everything around its old and new positions stale;
//! refreshing them is the caller's job (see `Shape::refresh_neighbors`).

use crate::{Direction, DirectionIndex, NeighborOffset, NeighborState, Point};

use enum_primitive_derive::Primitive;
use num_traits::cast::FromPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Primitive, Serialize)]
pub enum MoveKind {
    /// Rotate 90 degrees about the corner shared with the anchor, landing diagonally.
    Pivot = 0,
    /// Slide one cell along the anchor, which requires a second contact at the hinge.
    Transverse = 1,
}

/// One of the eight discrete actions available to a voxel.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Move {
    pub kind: MoveKind,
    pub direction: Direction,
}

impl Move {
    /// Every move, in action index order.
    pub const ALL: [Move; 8] = [
        Move::pivot(Direction::Left),
        Move::pivot(Direction::Down),
        Move::pivot(Direction::Right),
        Move::pivot(Direction::Up),
        Move::transverse(Direction::Left),
        Move::transverse(Direction::Down),
        Move::transverse(Direction::Right),
        Move::transverse(Direction::Up),
    ];

    pub const fn pivot(direction: Direction) -> Self {
        Move {
            kind: MoveKind::Pivot,
            direction,
        }
    }

    pub const fn transverse(direction: Direction) -> Self {
        Move {
            kind: MoveKind::Transverse,
            direction,
        }
    }

    /// Decodes a discrete action: `0..=3` pivot left, down, right, up; `4..=7` transverse in the
    /// same order.
    pub fn from_action_index(index: u32) -> Option<Self> {
        let kind = MoveKind::from_u32(index / 4)?;
        let direction = Direction::from_u32(index % 4)?;

        Some(Move { kind, direction })
    }

    pub fn action_index(self) -> u32 {
        self.kind as u32 * 4 + self.direction as u32
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let kind = match self.kind {
            MoveKind::Pivot => "pivot",
            MoveKind::Transverse => "transverse",
        };

        write!(f, "{} {}", kind, self.direction)
    }
}

/// Which of the two perpendicular candidates is the anchor.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum AnchorSide {
    /// `(1, 0)` for vertical moves, `(0, 1)` for horizontal ones.
    Positive = 0,
    /// `(-1, 0)` for vertical moves, `(0, -1)` for horizontal ones.
    Negative = 1,
}

impl AnchorSide {
    pub fn offset(self, direction: Direction) -> NeighborOffset {
        let p = direction.perpendicular()[self as usize];

        NeighborOffset::new(p).expect("perpendicular unit vectors are valid offsets")
    }
}

/// Why a move was refused. Refusal is an ordinary outcome, not an error.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Illegal {
    /// Neither perpendicular neighbor is present.
    NoAnchor,
    /// Both perpendicular neighbors are present.
    BoxedIn,
    /// A cell swept by the rotation is occupied.
    SweepBlocked(NeighborOffset),
    /// A cell that must be clear for sliding is occupied.
    ExclusionBlocked(NeighborOffset),
    /// The diagonal second contact point is missing.
    MissingHinge(NeighborOffset),
    /// The destination cell already holds a voxel (world position).
    Occupied(Point),
    /// The destination lies beyond `MAX_COORDINATE`.
    OutOfBounds,
}

impl fmt::Display for Illegal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Illegal::NoAnchor => write!(f, "no anchor"),
            Illegal::BoxedIn => write!(f, "boxed in"),
            Illegal::SweepBlocked(o) => write!(f, "sweep blocked at {}", o),
            Illegal::ExclusionBlocked(o) => write!(f, "blocked at {}", o),
            Illegal::MissingHinge(o) => write!(f, "missing hinge at {}", o),
            Illegal::Occupied(p) => write!(f, "destination {} occupied", p),
            Illegal::OutOfBounds => write!(f, "destination out of bounds"),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Verdict {
    Legal {
        anchor: NeighborOffset,
        /// In cells.
        displacement: Point,
    },
    Illegal(Illegal),
}

impl Verdict {
    pub fn is_legal(&self) -> bool {
        matches!(self, Verdict::Legal { .. })
    }

    pub fn anchor(&self) -> Option<NeighborOffset> {
        match self {
            Verdict::Legal { anchor, .. } => Some(*anchor),
            Verdict::Illegal(_) => None,
        }
    }

    pub fn displacement(&self) -> Option<Point> {
        match self {
            Verdict::Legal { displacement, .. } => Some(*displacement),
            Verdict::Illegal(_) => None,
        }
    }
}

impl From<Illegal> for Verdict {
    fn from(reason: Illegal) -> Self {
        Verdict::Illegal(reason)
    }
}

/// Cells that must be empty for a pivot about one anchor.
#[derive(Clone, Copy, Debug)]
pub struct PivotRule {
    pub sweep: [NeighborOffset; 6],
}

/// Cells that must be empty, and the cell that must be occupied, for a transverse move along one
/// anchor.
#[derive(Clone, Copy, Debug)]
pub struct TransverseRule {
    pub exclusion: [NeighborOffset; 3],
    pub hinge: NeighborOffset,
}

const fn o(x: i32, y: i32) -> NeighborOffset {
    NeighborOffset::new_unchecked(x, y)
}

/// Indexed by direction, then by `AnchorSide`.
pub static PIVOT_RULES: DirectionIndex<[PivotRule; 2]> = DirectionIndex::new([
    // Left
    [
        PivotRule {
            sweep: [o(0, -1), o(-1, -1), o(-2, 0), o(-2, -1), o(-1, 0), o(-1, 1)],
        },
        PivotRule {
            sweep: [o(0, 1), o(-1, 1), o(-2, 0), o(-2, 1), o(-1, 0), o(-1, -1)],
        },
    ],
    // Down
    [
        PivotRule {
            sweep: [o(-1, 0), o(-1, 1), o(0, 2), o(1, 2), o(0, 1), o(1, 1)],
        },
        PivotRule {
            sweep: [o(1, 0), o(1, 1), o(0, 2), o(-1, 2), o(0, 1), o(-1, 1)],
        },
    ],
    // Right
    [
        PivotRule {
            sweep: [o(0, -1), o(1, -1), o(2, 0), o(2, -1), o(1, 0), o(1, 1)],
        },
        PivotRule {
            sweep: [o(0, 1), o(1, 1), o(2, 0), o(2, 1), o(1, 0), o(1, -1)],
        },
    ],
    // Up
    [
        PivotRule {
            sweep: [o(-1, 0), o(-1, -1), o(0, -2), o(1, -2), o(0, -1), o(1, -1)],
        },
        PivotRule {
            sweep: [o(1, 0), o(1, -1), o(0, -2), o(-1, -2), o(0, -1), o(-1, -1)],
        },
    ],
]);

/// Indexed by direction, then by `AnchorSide`.
pub static TRANSVERSE_RULES: DirectionIndex<[TransverseRule; 2]> = DirectionIndex::new([
    // Left
    [
        TransverseRule {
            exclusion: [o(0, -1), o(-1, -1), o(-1, 0)],
            hinge: o(-1, 1),
        },
        TransverseRule {
            exclusion: [o(0, 1), o(-1, 1), o(-1, 0)],
            hinge: o(-1, -1),
        },
    ],
    // Down
    [
        TransverseRule {
            exclusion: [o(-1, 0), o(-1, -1), o(0, -1)],
            hinge: o(1, 1),
        },
        TransverseRule {
            exclusion: [o(1, 0), o(1, -1), o(0, -1)],
            hinge: o(-1, 1),
        },
    ],
    // Right
    [
        TransverseRule {
            exclusion: [o(0, -1), o(1, -1), o(1, 0)],
            hinge: o(1, 1),
        },
        TransverseRule {
            exclusion: [o(0, 1), o(1, 1), o(1, 0)],
            hinge: o(1, -1),
        },
    ],
    // Up
    [
        TransverseRule {
            exclusion: [o(-1, 0), o(-1, 1), o(0, 1)],
            hinge: o(1, -1),
        },
        TransverseRule {
            exclusion: [o(1, 0), o(1, 1), o(0, 1)],
            hinge: o(-1, -1),
        },
    ],
]);

/// Finds the single occupied perpendicular neighbor a move in `direction` would use.
pub fn resolve_anchor(state: &NeighborState, direction: Direction) -> Result<AnchorSide, Illegal> {
    let positive = state.is_occupied(AnchorSide::Positive.offset(direction));
    let negative = state.is_occupied(AnchorSide::Negative.offset(direction));

    match (positive, negative) {
        (true, false) => Ok(AnchorSide::Positive),
        (false, true) => Ok(AnchorSide::Negative),
        (false, false) => Err(Illegal::NoAnchor),
        (true, true) => Err(Illegal::BoxedIn),
    }
}

fn first_occupied(state: &NeighborState, offsets: &[NeighborOffset]) -> Option<NeighborOffset> {
    offsets.iter().copied().find(|o| state.is_occupied(*o))
}

/// Decides whether a voxel with neighborhood `state` can pivot in `direction`. A legal pivot moves
/// one cell in `direction` and one cell toward the anchor.
pub fn pivot(state: &NeighborState, direction: Direction) -> Verdict {
    let side = match resolve_anchor(state, direction) {
        Ok(side) => side,
        Err(reason) => return reason.into(),
    };
    let rule = &PIVOT_RULES.get(direction)[side as usize];
    if let Some(blocked) = first_occupied(state, &rule.sweep) {
        return Illegal::SweepBlocked(blocked).into();
    }
    let anchor = side.offset(direction);

    Verdict::Legal {
        anchor,
        displacement: direction.unit() + anchor.point(),
    }
}

/// Decides whether a voxel with neighborhood `state` can slide one cell in `direction`.
///
/// Only the anchor found by `resolve_anchor` is considered. Since it is the only occupied
/// perpendicular neighbor, there is no other side to fall back to.
pub fn transverse(state: &NeighborState, direction: Direction) -> Verdict {
    let side = match resolve_anchor(state, direction) {
        Ok(side) => side,
        Err(reason) => return reason.into(),
    };
    let rule = &TRANSVERSE_RULES.get(direction)[side as usize];
    if let Some(blocked) = first_occupied(state, &rule.exclusion) {
        return Illegal::ExclusionBlocked(blocked).into();
    }
    if !state.is_occupied(rule.hinge) {
        return Illegal::MissingHinge(rule.hinge).into();
    }

    Verdict::Legal {
        anchor: side.offset(direction),
        displacement: direction.unit(),
    }
}

pub fn check(state: &NeighborState, m: Move) -> Verdict {
    match m.kind {
        MoveKind::Pivot => pivot(state, m.direction),
        MoveKind::Transverse => transverse(state, m.direction),
    }
}

/// Every legal move for `state`, in action index order.
pub fn legal_moves(state: &NeighborState) -> Vec<(Move, Verdict)> {
    Move::ALL
        .iter()
        .map(|m| (*m, check(state, *m)))
        .filter(|(_, verdict)| verdict.is_legal())
        .collect()
}
