use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Collision {
    Wall,
    SelfCollision,
}

/// How the cell occupied by the tail is treated when the head moves.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TailPolicy {
    /// The tail blocks like every other segment; the pre-move body is matched from index 1 onwards.
    /// This is the classic browser rule. Use [`TailPolicy::Vacating`] to let the head follow into the tail cell.
    Blocking,
    /// The tail cell is free whenever the tail is popped on the same tick, i.e. when no food is eaten.
    Vacating,
}

impl Default for TailPolicy {
    fn default() -> Self {
        Self::Blocking
    }
}

/// Checks `candidate` against the walls of `size` and the pre-move `snake`.
///
/// The head (index 0) is never compared. `tail_vacates` leaves the last segment out, the caller decides it from
/// the [`TailPolicy`] and whether the candidate is food.
pub fn check_collision(
    candidate: Coord2,
    size: Coord2,
    snake: &Snake,
    tail_vacates: bool,
) -> Option<Collision> {
    if !in_bounds(candidate, size) {
        return Some(Collision::Wall);
    }

    if snake.body_contains(candidate, tail_vacates) {
        return Some(Collision::SelfCollision);
    }

    None
}
