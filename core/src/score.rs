/// Points awarded per food item.
pub const SCORE_PER_FOOD: u32 = 10;

/// Only ever built from a high score with a zero score, so the score never exceeds the high score.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ScoreBoard {
    score: u32,
    high_score: u32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ScoreOutcome {
    Scored,
    NewHighScore,
}

impl ScoreOutcome {
    pub const fn is_new_high_score(self) -> bool {
        matches!(self, Self::NewHighScore)
    }
}

impl ScoreBoard {
    pub const fn with_high_score(high_score: u32) -> Self {
        Self {
            score: 0,
            high_score,
        }
    }

    pub const fn score(&self) -> u32 {
        self.score
    }

    pub const fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn record_food(&mut self) -> ScoreOutcome {
        self.score = self.score.saturating_add(SCORE_PER_FOOD);
        if self.score > self.high_score {
            self.high_score = self.score;
            ScoreOutcome::NewHighScore
        } else {
            ScoreOutcome::Scored
        }
    }

    pub fn reset_round(&mut self) {
        self.score = 0;
    }
}
