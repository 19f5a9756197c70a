use alloc::collections::VecDeque;

use crate::*;

/// Length of a freshly spawned snake.
pub const INITIAL_LENGTH: usize = 3;

/// Body segments, head at the front and tail at the back.
#[derive(Clone, Debug, PartialEq)]
pub struct Snake {
    body: VecDeque<Coord2>,
}

impl Snake {
    /// Horizontal line centered on the grid, facing right.
    pub fn centered(size: Coord2) -> Self {
        let (x, y) = (size.0 / 2, size.1 / 2);
        let body = (0..INITIAL_LENGTH as Coord).map(|i| (x - i, y)).collect();
        Self { body }
    }

    pub fn from_cells(size: Coord2, cells: &[Coord2]) -> Result<Self> {
        let snake = Self {
            body: cells.iter().copied().collect(),
        };
        snake.validate(size)?;
        Ok(snake)
    }

    /// Non-empty, inside `size` and without repeated cells.
    pub fn validate(&self, size: Coord2) -> Result<()> {
        if self.body.is_empty() {
            return Err(GameError::InvalidSnake);
        }

        for (i, &cell) in self.body.iter().enumerate() {
            if !in_bounds(cell, size) || self.body.range(..i).any(|&prev| prev == cell) {
                return Err(GameError::InvalidSnake);
            }
        }

        Ok(())
    }

    pub fn head(&self) -> Coord2 {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = Coord2> + '_ {
        self.body.iter().copied()
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        self.body.contains(&coords)
    }

    /// Matches every segment except the head, optionally leaving out the tail too.
    pub fn body_contains(&self, coords: Coord2, skip_tail: bool) -> bool {
        let end = if skip_tail {
            self.body.len() - 1
        } else {
            self.body.len()
        };
        self.body.range(1..end.max(1)).any(|&cell| cell == coords)
    }

    pub(crate) fn push_head(&mut self, coords: Coord2) {
        self.body.push_front(coords);
    }

    pub(crate) fn pop_tail(&mut self) -> Option<Coord2> {
        self.body.pop_back()
    }
}
