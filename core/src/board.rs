use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// What a renderer should draw in a single grid cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardCell {
    Empty,
    Food(FoodKind),
    /// Oriented along the effective direction.
    Head(Direction),
    Body { index: CellCount, len: CellCount },
}

impl BoardCell {
    pub const fn is_snake(self) -> bool {
        matches!(self, Self::Head(_) | Self::Body { .. })
    }
}

impl Default for BoardCell {
    fn default() -> Self {
        Self::Empty
    }
}

/// Owned, read-only copy of everything a renderer observes after a tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub size: Coord2,
    pub snake: Vec<Coord2>,
    pub food: Option<Food>,
    pub direction: Direction,
    pub score: u32,
    pub high_score: u32,
    pub state: EngineState,
}

impl Snapshot {
    const PREVIEW_LENGTH: Coord = 5;
    const PREVIEW_FOOD_DISTANCE: Coord = 3;

    /// Static picture shown before the first game: a longer snake heading for a strawberry.
    pub fn preview(config: &GameConfig, high_score: u32) -> Self {
        let (w, h) = config.size;
        let (x, y) = (w / 2, h / 2);
        let snake = (0..Self::PREVIEW_LENGTH)
            .map(|i| (x - i, y))
            .filter(|&pos| in_bounds(pos, config.size))
            .collect();
        let food_x = (x + Self::PREVIEW_FOOD_DISTANCE).min(w - 1);
        let food = (food_x != x).then_some(Food {
            pos: (food_x, y),
            kind: FoodKind::Strawberry,
        });

        Self {
            size: config.size,
            snake,
            food,
            direction: Direction::Right,
            score: 0,
            high_score,
            state: EngineState::Idle,
        }
    }

    pub fn board(&self) -> Array2<BoardCell> {
        render_board(
            self.size,
            self.snake.iter().copied(),
            self.direction,
            self.food,
        )
    }
}

/// Lays out food and snake on a `[x, y]` indexed grid, out of bounds cells are skipped.
pub fn render_board(
    size: Coord2,
    snake: impl ExactSizeIterator<Item = Coord2>,
    direction: Direction,
    food: Option<Food>,
) -> Array2<BoardCell> {
    let mut board = Array2::default(size.to_nd_index());

    if let Some(food) = food.filter(|food| in_bounds(food.pos, size)) {
        board[food.pos.to_nd_index()] = BoardCell::Food(food.kind);
    }

    let len = CellCount::try_from(snake.len()).unwrap_or(CellCount::MAX);
    for (index, pos) in snake.enumerate() {
        if !in_bounds(pos, size) {
            continue;
        }
        board[pos.to_nd_index()] = if index == 0 {
            BoardCell::Head(direction)
        } else {
            BoardCell::Body {
                index: index as CellCount,
                len,
            }
        };
    }

    board
}
