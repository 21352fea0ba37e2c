use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// A compass move on a grid. Rows grow southwards, so `North` decreases the
/// row index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
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

    /// The cell one step away from `(x, y)`, or `None` if that would leave the
    /// non-negative quadrant.
    pub fn apply(&self, (x, y): (usize, usize)) -> Option<(usize, usize)> {
        match self {
            Direction::North => y.checked_sub(1).map(|y| (x, y)),
            Direction::South => Some((x, y + 1)),
            Direction::East => Some((x + 1, y)),
            Direction::West => x.checked_sub(1).map(|x| (x, y)),
        }
    }

    /// The two directions at right angles to this one.
    pub fn perpendicular(&self) -> [Direction; 2] {
        match self {
            Direction::North | Direction::South => [Direction::East, Direction::West],
            Direction::East | Direction::West => [Direction::North, Direction::South],
        }
    }

    pub fn arrow(&self) -> char {
        match self {
            Direction::North => '^',
            Direction::South => 'v',
            Direction::East => '>',
            Direction::West => '<',
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "North",
            Direction::South => "South",
            Direction::East => "East",
            Direction::West => "West",
        };
        write!(f, "{name}")
    }
}
