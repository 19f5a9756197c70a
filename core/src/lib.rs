#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use collision::*;
pub use engine::*;
pub use error::*;
pub use score::*;
pub use snake::*;
pub use spawner::*;
pub use types::*;

mod board;
mod collision;
mod engine;
mod error;
mod score;
mod snake;
mod spawner;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub tail_policy: TailPolicy,
}

impl GameConfig {
    /// Narrowest grid that fits the starting snake with a free cell left over.
    pub const MIN_SIZE: Coord2 = (4, 1);
    pub const MAX_SIZE: Coord2 = (u8::MAX as Coord, u8::MAX as Coord);

    pub const fn new_unchecked(size: Coord2, tail_policy: TailPolicy) -> Self {
        Self { size, tail_policy }
    }

    pub fn new((size_x, size_y): Coord2) -> Self {
        let size_x = size_x.clamp(Self::MIN_SIZE.0, Self::MAX_SIZE.0);
        let size_y = size_y.clamp(Self::MIN_SIZE.1, Self::MAX_SIZE.1);
        Self::new_unchecked((size_x, size_y), TailPolicy::default())
    }

    pub const fn with_tail_policy(self, tail_policy: TailPolicy) -> Self {
        Self {
            size: self.size,
            tail_policy,
        }
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked((20, 20), TailPolicy::default())
    }
}
