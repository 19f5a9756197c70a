use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::GameError;

/// Single coordinate axis used for grid width, height, and positions.
///
/// Signed so that a candidate head one step past a wall is still representable.
pub type Coord = i16;

/// Count type used for snake lengths and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    /// Only meaningful for in-bounds coordinates.
    fn to_nd_index(self) -> Self::Output {
        [self.0.max(0) as usize, self.1.max(0) as usize]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = if a < 0 { 0 } else { a as CellCount };
    let b = if b < 0 { 0 } else { b as CellCount };
    a.saturating_mul(b)
}

pub const fn in_bounds(coords: Coord2, size: Coord2) -> bool {
    coords.0 >= 0 && coords.0 < size.0 && coords.1 >= 0 && coords.1 < size.1
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Unit vector `(dx, dy)`, y grows downwards.
    pub const fn delta(self) -> Coord2 {
        use Direction::*;
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub const fn opposite(self) -> Self {
        use Direction::*;
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub const fn is_opposite(self, other: Self) -> bool {
        matches!(
            (self, other),
            (Self::Up, Self::Down)
                | (Self::Down, Self::Up)
                | (Self::Left, Self::Right)
                | (Self::Right, Self::Left)
        )
    }

    pub const fn name(self) -> &'static str {
        use Direction::*;
        match self {
            Up => "up",
            Down => "down",
            Left => "left",
            Right => "right",
        }
    }
}

impl Default for Direction {
    fn default() -> Self {
        Self::Right
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Applies `direction` to `coords` without any bounds check.
pub const fn step(coords: Coord2, direction: Direction) -> Coord2 {
    let (dx, dy) = direction.delta();
    (coords.0.saturating_add(dx), coords.1.saturating_add(dy))
}

/// Tick period presets offered to the player.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speed {
    Slow,
    Normal,
    Fast,
}

impl Speed {
    pub const ALL: [Speed; 3] = [Self::Slow, Self::Normal, Self::Fast];

    pub const fn period_ms(self) -> u32 {
        use Speed::*;
        match self {
            Slow => 200,
            Normal => 150,
            Fast => 100,
        }
    }

    pub const fn name(self) -> &'static str {
        use Speed::*;
        match self {
            Slow => "slow",
            Normal => "normal",
            Fast => "fast",
        }
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self::Normal
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Speed {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|speed| speed.name().eq_ignore_ascii_case(s.trim()))
            .ok_or(GameError::UnknownSpeed)
    }
}
