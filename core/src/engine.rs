use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    Wall,
    SelfCollision,
    /// The snake covers every cell, there is nowhere left to put food.
    BoardFull,
}

impl From<Collision> for EndReason {
    fn from(collision: Collision) -> Self {
        match collision {
            Collision::Wall => Self::Wall,
            Collision::SelfCollision => Self::SelfCollision,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    Idle,
    Running,
    Over(EndReason),
}

impl EngineState {
    pub const fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }

    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }

    pub const fn is_over(self) -> bool {
        matches!(self, Self::Over(_))
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Idle
    }
}

/// Everything the player (or a timer) can ask of the engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Start from `Idle`, or restart from any state.
    Start,
    Turn(Direction),
    Tick,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    Accepted,
    /// Would reverse straight into the neck.
    Rejected,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Moved,
    Ate(ScoreOutcome),
    Crashed(Collision),
    /// Ate the last food that could fit, the game is over.
    FilledBoard(ScoreOutcome),
}

impl TickOutcome {
    pub const fn ate_food(self) -> bool {
        matches!(self, Self::Ate(_) | Self::FilledBoard(_))
    }

    pub const fn is_game_over(self) -> bool {
        matches!(self, Self::Crashed(_) | Self::FilledBoard(_))
    }

    pub const fn is_new_high_score(self) -> bool {
        match self {
            Self::Ate(score) | Self::FilledBoard(score) => score.is_new_high_score(),
            Self::Moved | Self::Crashed(_) => false,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    Started,
    Turn(TurnOutcome),
    Tick(TickOutcome),
}

#[derive(Clone, Debug)]
pub struct SnakeEngine<S = RandomFoodSpawner> {
    config: GameConfig,
    spawner: S,
    snake: Snake,
    food: Option<Food>,
    direction: Direction,
    pending_direction: Direction,
    scores: ScoreBoard,
    state: EngineState,
}

impl SnakeEngine {
    pub fn with_seed(config: GameConfig, seed: u64, high_score: u32) -> Self {
        Self::new(config, RandomFoodSpawner::new(seed), high_score)
    }
}

impl<S: FoodSpawner> SnakeEngine<S> {
    pub fn new(config: GameConfig, spawner: S, high_score: u32) -> Self {
        Self {
            snake: Snake::centered(config.size),
            config,
            spawner,
            food: None,
            direction: Direction::default(),
            pending_direction: Direction::default(),
            scores: ScoreBoard::with_high_score(high_score),
            state: Default::default(),
        }
    }

    /// Resumes a running game from a known position.
    pub fn from_parts(
        config: GameConfig,
        spawner: S,
        snake: Snake,
        direction: Direction,
        food: Food,
        scores: ScoreBoard,
    ) -> Result<Self> {
        snake.validate(config.size)?;
        if !in_bounds(food.pos, config.size) || snake.contains(food.pos) {
            return Err(GameError::InvalidFood);
        }

        Ok(Self {
            config,
            spawner,
            snake,
            food: Some(food),
            direction,
            pending_direction: direction,
            scores,
            state: EngineState::Running,
        })
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Food> {
        self.food
    }

    /// The direction applied on the last tick.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The direction the next tick will apply.
    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    pub fn score(&self) -> u32 {
        self.scores.score()
    }

    pub fn high_score(&self) -> u32 {
        self.scores.high_score()
    }

    pub fn board(&self) -> Array2<BoardCell> {
        render_board(self.size(), self.snake.iter(), self.direction, self.food)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            size: self.size(),
            snake: self.snake.iter().collect(),
            food: self.food,
            direction: self.direction,
            score: self.score(),
            high_score: self.high_score(),
            state: self.state,
        }
    }

    pub fn apply(&mut self, command: Command) -> Result<CommandOutcome> {
        Ok(match command {
            Command::Start => {
                self.start();
                CommandOutcome::Started
            }
            Command::Turn(direction) => CommandOutcome::Turn(self.turn(direction)?),
            Command::Tick => CommandOutcome::Tick(self.tick()?),
        })
    }

    /// Discards the current round and begins a new one, keeping only the high score.
    pub fn start(&mut self) {
        self.snake = Snake::centered(self.size());
        self.direction = Direction::default();
        self.pending_direction = Direction::default();
        self.scores.reset_round();
        self.food = self.spawner.spawn(self.size(), &self.snake);
        self.state = EngineState::Running;

        log::debug!(
            "new game on {:?}, food at {:?}",
            self.size(),
            self.food.map(|food| food.pos)
        );
    }

    pub fn turn(&mut self, direction: Direction) -> Result<TurnOutcome> {
        self.check_running()?;

        Ok(if direction.is_opposite(self.direction) {
            TurnOutcome::Rejected
        } else {
            self.pending_direction = direction;
            TurnOutcome::Accepted
        })
    }

    pub fn tick(&mut self) -> Result<TickOutcome> {
        self.check_running()?;

        self.direction = self.pending_direction;
        let candidate = step(self.snake.head(), self.direction);
        let eats = self.food.is_some_and(|food| food.pos == candidate);
        let tail_vacates = !eats && matches!(self.config.tail_policy, TailPolicy::Vacating);

        if let Some(collision) =
            check_collision(candidate, self.size(), &self.snake, tail_vacates)
        {
            self.end_game(collision.into());
            return Ok(TickOutcome::Crashed(collision));
        }

        if !eats {
            self.snake.push_head(candidate);
            self.snake.pop_tail();
            return Ok(TickOutcome::Moved);
        }

        self.snake.push_head(candidate);
        let score = self.scores.record_food();
        if score.is_new_high_score() {
            log::debug!("new high score: {}", self.high_score());
        }

        self.food = self.spawner.spawn(self.size(), &self.snake);
        if self.food.is_none() {
            self.end_game(EndReason::BoardFull);
            return Ok(TickOutcome::FilledBoard(score));
        }

        Ok(TickOutcome::Ate(score))
    }

    fn end_game(&mut self, reason: EndReason) {
        if self.state.is_over() {
            return;
        }

        self.state = EngineState::Over(reason);
        log::info!(
            "game over ({:?}) with score {}, length {}",
            reason,
            self.score(),
            self.snake.len()
        );
    }

    fn check_running(&self) -> Result<()> {
        if self.state.is_running() {
            Ok(())
        } else {
            Err(GameError::NotRunning)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hands out food from a fixed list, then reports a full grid.
    struct ScriptedSpawner<const N: usize> {
        cells: [Coord2; N],
        next: usize,
    }

    impl<const N: usize> ScriptedSpawner<N> {
        fn new(cells: [Coord2; N]) -> Self {
            Self { cells, next: 0 }
        }
    }

    impl<const N: usize> FoodSpawner for ScriptedSpawner<N> {
        fn spawn(&mut self, _size: Coord2, snake: &Snake) -> Option<Food> {
            let pos = *self.cells.get(self.next)?;
            self.next += 1;
            assert!(!snake.contains(pos), "scripted food {:?} is on the snake", pos);
            Some(Food {
                pos,
                kind: FoodKind::Cookie,
            })
        }
    }

    fn running(
        cells: &[Coord2],
        direction: Direction,
        food: Coord2,
    ) -> SnakeEngine<RandomFoodSpawner> {
        let config = GameConfig::default();
        SnakeEngine::from_parts(
            config,
            RandomFoodSpawner::new(11),
            Snake::from_cells(config.size, cells).unwrap(),
            direction,
            Food {
                pos: food,
                kind: FoodKind::Star,
            },
            ScoreBoard::default(),
        )
        .unwrap()
    }

    #[test]
    fn start_resets_to_centered_snake_facing_right() {
        let mut engine = SnakeEngine::with_seed(GameConfig::default(), 5, 0);
        assert_eq!(engine.state(), EngineState::Idle);
        assert_eq!(engine.tick(), Err(GameError::NotRunning));

        engine.start();

        assert_eq!(engine.state(), EngineState::Running);
        assert!(engine.snake().iter().eq([(10, 10), (9, 10), (8, 10)]));
        assert_eq!(engine.direction(), Direction::Right);
        assert_eq!(engine.score(), 0);
        let food = engine.food().unwrap();
        assert!(!engine.snake().contains(food.pos));
    }

    #[test]
    fn plain_tick_translates_the_snake() {
        let mut engine = running(&[(10, 10), (9, 10), (8, 10)], Direction::Right, (3, 3));

        assert_eq!(engine.tick(), Ok(TickOutcome::Moved));

        assert!(engine.snake().iter().eq([(11, 10), (10, 10), (9, 10)]));
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn every_cell_shifts_by_the_direction_vector() {
        let mut engine = running(
            &[(10, 10), (10, 11), (11, 11), (12, 11)],
            Direction::Up,
            (0, 0),
        );
        let before: [Coord2; 4] = [(10, 10), (10, 11), (11, 11), (12, 11)];

        engine.tick().unwrap();

        assert_eq!(engine.snake().len(), before.len());
        assert_eq!(engine.snake().head(), (10, 9));
        // every remaining cell is the previous cell of the segment ahead
        assert!(engine.snake().iter().skip(1).eq(before[..3].iter().copied()));
    }

    #[test]
    fn eating_grows_scores_and_respawns() {
        let mut engine = running(&[(10, 10), (9, 10), (8, 10)], Direction::Right, (11, 10));

        let outcome = engine.tick().unwrap();

        assert!(outcome.ate_food());
        assert!(outcome.is_new_high_score());
        assert!(
            engine
                .snake()
                .iter()
                .eq([(11, 10), (10, 10), (9, 10), (8, 10)])
        );
        assert_eq!(engine.score(), 10);
        assert_eq!(engine.high_score(), 10);
        let food = engine.food().unwrap();
        assert!(!engine.snake().contains(food.pos));
    }

    #[test]
    fn left_wall_ends_the_game() {
        let mut engine = running(&[(0, 5), (1, 5), (2, 5)], Direction::Left, (10, 10));

        assert_eq!(engine.tick(), Ok(TickOutcome::Crashed(Collision::Wall)));
        assert_eq!(engine.state(), EngineState::Over(EndReason::Wall));
        // final position is kept for display
        assert!(engine.snake().iter().eq([(0, 5), (1, 5), (2, 5)]));
        assert_eq!(engine.tick(), Err(GameError::NotRunning));
        assert_eq!(engine.turn(Direction::Up), Err(GameError::NotRunning));
    }

    #[test]
    fn every_wall_ends_the_game() {
        let cases = [
            (&[(19, 5), (18, 5), (17, 5)], Direction::Right),
            (&[(5, 0), (5, 1), (5, 2)], Direction::Up),
            (&[(5, 19), (5, 18), (5, 17)], Direction::Down),
        ];

        for (cells, direction) in cases {
            let mut engine = running(cells, direction, (10, 10));
            assert_eq!(engine.tick(), Ok(TickOutcome::Crashed(Collision::Wall)));
            assert!(engine.state().is_over());
        }
    }

    #[test]
    fn reversing_is_rejected_against_the_effective_direction() {
        let mut engine = running(&[(10, 10), (9, 10), (8, 10)], Direction::Right, (0, 0));

        assert_eq!(engine.turn(Direction::Left), Ok(TurnOutcome::Rejected));
        assert_eq!(engine.pending_direction(), Direction::Right);

        // a quick up-then-left still cannot fold back within one tick
        assert_eq!(engine.turn(Direction::Up), Ok(TurnOutcome::Accepted));
        assert_eq!(engine.turn(Direction::Left), Ok(TurnOutcome::Rejected));
        assert_eq!(engine.pending_direction(), Direction::Up);

        engine.tick().unwrap();
        assert_eq!(engine.direction(), Direction::Up);
        assert_eq!(engine.snake().head(), (10, 9));
        assert_eq!(engine.turn(Direction::Left), Ok(TurnOutcome::Accepted));
        assert_eq!(engine.turn(Direction::Down), Ok(TurnOutcome::Rejected));
    }

    #[test]
    fn running_into_the_body_is_a_self_collision() {
        let mut engine = running(
            &[(5, 5), (6, 5), (6, 6), (5, 6), (4, 6)],
            Direction::Left,
            (0, 0),
        );
        engine.turn(Direction::Down).unwrap();

        assert_eq!(
            engine.tick(),
            Ok(TickOutcome::Crashed(Collision::SelfCollision))
        );
        assert_eq!(engine.state(), EngineState::Over(EndReason::SelfCollision));
    }

    #[test]
    fn tail_cell_blocks_by_default() {
        // 2x2 loop: head (5, 5) moving down onto the tail at (5, 6)
        let mut engine = running(&[(5, 5), (6, 5), (6, 6), (5, 6)], Direction::Down, (0, 0));

        assert_eq!(
            engine.tick(),
            Ok(TickOutcome::Crashed(Collision::SelfCollision))
        );
    }

    #[test]
    fn vacating_tail_can_be_chased() {
        let config = GameConfig::default().with_tail_policy(TailPolicy::Vacating);
        let snake = Snake::from_cells(config.size, &[(5, 5), (6, 5), (6, 6), (5, 6)]).unwrap();
        let food = Food {
            pos: (0, 0),
            kind: FoodKind::Candy,
        };
        let mut engine = SnakeEngine::from_parts(
            config,
            RandomFoodSpawner::new(2),
            snake,
            Direction::Down,
            food,
            ScoreBoard::default(),
        )
        .unwrap();

        for _ in 0..8 {
            assert_eq!(engine.tick(), Ok(TickOutcome::Moved));
            let turn = match engine.direction() {
                Direction::Down => Direction::Right,
                Direction::Right => Direction::Up,
                Direction::Up => Direction::Left,
                Direction::Left => Direction::Down,
            };
            engine.turn(turn).unwrap();
        }
        assert_eq!(engine.snake().len(), 4);
    }

    #[test]
    fn high_score_survives_restarts_and_never_drops() {
        let config = GameConfig::default();
        let mut engine = SnakeEngine::new(
            config,
            ScriptedSpawner::new([(11, 10), (12, 10), (3, 3), (11, 10), (0, 0)]),
            15,
        );

        engine.start();
        assert_eq!(engine.tick(), Ok(TickOutcome::Ate(ScoreOutcome::Scored)));
        assert_eq!(
            engine.tick(),
            Ok(TickOutcome::Ate(ScoreOutcome::NewHighScore))
        );
        assert_eq!(engine.high_score(), 20);

        engine.start();
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.high_score(), 20);
        assert_eq!(engine.tick(), Ok(TickOutcome::Ate(ScoreOutcome::Scored)));
        assert_eq!((engine.score(), engine.high_score()), (10, 20));
    }

    #[test]
    fn filling_the_board_ends_the_game() {
        let config = GameConfig::new((4, 1));
        let mut engine = SnakeEngine::new(config, ScriptedSpawner::new([(3, 0)]), 0);

        engine.start();
        assert!(engine.snake().iter().eq([(2, 0), (1, 0), (0, 0)]));
        assert_eq!(
            engine.tick(),
            Ok(TickOutcome::FilledBoard(ScoreOutcome::NewHighScore))
        );
        assert_eq!(engine.state(), EngineState::Over(EndReason::BoardFull));
        assert_eq!(engine.food(), None);
        assert_eq!(engine.snake().len(), 4);
    }

    #[test]
    fn commands_drive_the_same_transitions() {
        let mut engine = SnakeEngine::with_seed(GameConfig::default(), 9, 0);

        assert_eq!(
            engine.apply(Command::Turn(Direction::Up)),
            Err(GameError::NotRunning)
        );
        assert_eq!(engine.apply(Command::Start), Ok(CommandOutcome::Started));
        assert_eq!(
            engine.apply(Command::Turn(Direction::Left)),
            Ok(CommandOutcome::Turn(TurnOutcome::Rejected))
        );
        assert_eq!(
            engine.apply(Command::Turn(Direction::Down)),
            Ok(CommandOutcome::Turn(TurnOutcome::Accepted))
        );
        assert!(matches!(
            engine.apply(Command::Tick),
            Ok(CommandOutcome::Tick(_))
        ));
        assert_eq!(engine.direction(), Direction::Down);
        assert_eq!(engine.snake().head(), (10, 11));
    }

    #[test]
    fn from_parts_rejects_food_on_the_snake() {
        let config = GameConfig::default();
        let result = SnakeEngine::from_parts(
            config,
            RandomFoodSpawner::new(0),
            Snake::centered(config.size),
            Direction::Right,
            Food {
                pos: (9, 10),
                kind: FoodKind::Cake,
            },
            ScoreBoard::default(),
        );

        assert!(matches!(result, Err(GameError::InvalidFood)));
    }

    #[test]
    fn from_parts_rejects_snake_outside_the_grid() {
        let wide = GameConfig::new((40, 20));
        let snake = Snake::from_cells(wide.size, &[(30, 5), (29, 5), (28, 5)]).unwrap();
        let result = SnakeEngine::from_parts(
            GameConfig::default(),
            RandomFoodSpawner::new(0),
            snake,
            Direction::Right,
            Food {
                pos: (1, 1),
                kind: FoodKind::Cake,
            },
            ScoreBoard::default(),
        );

        assert!(matches!(result, Err(GameError::InvalidSnake)));
    }

    #[test]
    fn snapshot_mirrors_engine_state() {
        let engine = running(&[(10, 10), (9, 10), (8, 10)], Direction::Right, (1, 2));
        let snapshot = engine.snapshot();

        assert_eq!(snapshot.snake, [(10, 10), (9, 10), (8, 10)]);
        assert_eq!(snapshot.food.map(|food| food.pos), Some((1, 2)));
        assert_eq!(snapshot.state, EngineState::Running);
        assert_eq!(snapshot.board(), engine.board());
    }
}
