//! Cardinal directions and the closed set of routing cases they index.

use crate::geometry::Vector;
use std::fmt;

/// The side of a shape a connector sits on, which is also the direction a path
/// travels when it leaves that connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub fn reverse(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Unit step in screen coordinates (y grows downward).
    pub fn unit(self) -> Vector {
        match self {
            Direction::North => Vector::new(0.0, -1.0),
            Direction::South => Vector::new(0.0, 1.0),
            Direction::East => Vector::new(1.0, 0.0),
            Direction::West => Vector::new(-1.0, 0.0),
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::East | Direction::West)
    }

    /// Direction of an axis-aligned step, or `None` for a zero or diagonal step.
    pub fn of_step(v: Vector) -> Option<Direction> {
        match (v.dx == 0.0, v.dy == 0.0) {
            (true, false) if v.dy < 0.0 => Some(Direction::North),
            (true, false) => Some(Direction::South),
            (false, true) if v.dx < 0.0 => Some(Direction::West),
            (false, true) => Some(Direction::East),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Direction::North => "N",
            Direction::South => "S",
            Direction::East => "E",
            Direction::West => "W",
        };
        f.write_str(tag)
    }
}

/// How the two connector directions of an attached line relate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairClass {
    /// Facing each other on one axis, e.g. W→E.
    Opposite,
    /// Both ends exit the same way, e.g. E→E.
    Same,
    /// One horizontal, one vertical, e.g. S→E.
    Perpendicular,
}

/// The routing case for a line.
///
/// `Pair` is used once both ends sit on a connector; `Single` while the to end is
/// still a free point under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteKind {
    Pair(Direction, Direction),
    Single(Direction),
}

impl RouteKind {
    pub fn from_direction(&self) -> Direction {
        match *self {
            RouteKind::Pair(from, _) | RouteKind::Single(from) => from,
        }
    }

    /// Classification of an attached pair. `None` for the single-direction case.
    pub fn class(&self) -> Option<PairClass> {
        match *self {
            RouteKind::Single(_) => None,
            RouteKind::Pair(from, to) if from == to => Some(PairClass::Same),
            RouteKind::Pair(from, to) if from == to.reverse() => Some(PairClass::Opposite),
            RouteKind::Pair(_, _) => Some(PairClass::Perpendicular),
        }
    }

    /// The same case seen from the other end. Only defined for attached pairs.
    pub fn swapped(&self) -> Option<RouteKind> {
        match *self {
            RouteKind::Pair(from, to) => Some(RouteKind::Pair(to, from)),
            RouteKind::Single(_) => None,
        }
    }
}

impl fmt::Display for RouteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteKind::Pair(from, to) => write!(f, "{}{}", from, to),
            RouteKind::Single(from) => write!(f, "{}", from),
        }
    }
}
