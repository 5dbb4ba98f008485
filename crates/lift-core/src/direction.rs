//! Direction of travel for passengers, calls, and sweeps.

use std::fmt;

use crate::FloorId;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Direction of a trip from `origin` to `destination`, or `None` for a
    /// lateral (same-floor) trip.
    #[inline]
    pub fn between(origin: FloorId, destination: FloorId) -> Option<Direction> {
        match destination.cmp(&origin) {
            std::cmp::Ordering::Greater => Some(Direction::Up),
            std::cmp::Ordering::Less => Some(Direction::Down),
            std::cmp::Ordering::Equal => None,
        }
    }

    #[inline]
    pub fn flip(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => f.pad("up"),
            Direction::Down => f.pad("down"),
        }
    }
}
