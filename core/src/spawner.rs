use alloc::vec::Vec;
use rand::prelude::*;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Decorative sweets, picked uniformly for every new food item.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FoodKind {
    Strawberry,
    Cake,
    Cookie,
    Doughnut,
    Cupcake,
    Lollipop,
    Candy,
    Heart,
    Star,
    Blossom,
}

impl FoodKind {
    pub const ALL: [FoodKind; 10] = [
        Self::Strawberry,
        Self::Cake,
        Self::Cookie,
        Self::Doughnut,
        Self::Cupcake,
        Self::Lollipop,
        Self::Candy,
        Self::Heart,
        Self::Star,
        Self::Blossom,
    ];

    pub const fn emoji(self) -> &'static str {
        use FoodKind::*;
        match self {
            Strawberry => "🍓",
            Cake => "🍰",
            Cookie => "🍪",
            Doughnut => "🍩",
            Cupcake => "🧁",
            Lollipop => "🍭",
            Candy => "🍬",
            Heart => "💖",
            Star => "⭐",
            Blossom => "🌸",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Food {
    pub pos: Coord2,
    pub kind: FoodKind,
}

pub trait FoodSpawner {
    /// Picks a cell of `size` not covered by `snake`, `None` when the grid is full.
    fn spawn(&mut self, size: Coord2, snake: &Snake) -> Option<Food>;
}

/// Rejection sampling over the whole grid, falling back to an exhaustive pick once the grid gets crowded.
#[derive(Clone, Debug)]
pub struct RandomFoodSpawner {
    rng: SmallRng,
}

impl RandomFoodSpawner {
    /// Rejected samples tolerated before enumerating free cells.
    pub const MAX_SAMPLES: usize = 64;

    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    fn random_kind(&mut self) -> FoodKind {
        FoodKind::ALL[self.rng.random_range(0..FoodKind::ALL.len())]
    }
}

impl FoodSpawner for RandomFoodSpawner {
    fn spawn(&mut self, size: Coord2, snake: &Snake) -> Option<Food> {
        if size.0 <= 0 || size.1 <= 0 {
            return None;
        }

        for _ in 0..Self::MAX_SAMPLES {
            let pos = (
                self.rng.random_range(0..size.0),
                self.rng.random_range(0..size.1),
            );
            let kind = self.random_kind();
            if !snake.contains(pos) {
                return Some(Food { pos, kind });
            }
        }

        let free_cells: Vec<Coord2> = (0..size.1)
            .flat_map(|y| (0..size.0).map(move |x| (x, y)))
            .filter(|&pos| !snake.contains(pos))
            .collect();
        log::warn!(
            "Food sampling kept hitting the snake, picking from {} free cells",
            free_cells.len()
        );

        let pos = *free_cells.choose(&mut self.rng)?;
        let kind = self.random_kind();
        Some(Food { pos, kind })
    }
}
