use super::{
    action::{Action, Direction},
    config::GameConfig,
    state::{CollisionType, GameState, GameStatus, Position, Snake},
};
use rand::Rng;

/// What happened during a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    /// Whether the snake consumed a snack this tick
    pub consumed: bool,
    /// Type of collision if one ended the game
    pub collision: Option<CollisionType>,
}

impl StepOutcome {
    fn nothing() -> Self {
        Self {
            consumed: false,
            collision: None,
        }
    }
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: rand::rngs::ThreadRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: rand::thread_rng(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Build the initial state: snake at the center heading right, with a
    /// full set of snacks on the board.
    pub fn reset(&mut self) -> GameState {
        let center_x = (self.config.grid_width / 2) as i32;
        let center_y = (self.config.grid_height / 2) as i32;

        let snake = Snake::new(
            Position::new(center_x, center_y),
            Direction::Right,
            self.config.initial_snake_length,
        );

        let mut state = GameState::new(snake, self.config.grid_width, self.config.grid_height);
        self.populate_targets(&mut state);
        state
    }

    /// Execute one tick of the game
    pub fn step(&mut self, state: &mut GameState, action: Action) -> StepOutcome {
        if !state.is_running() {
            return StepOutcome::nothing();
        }

        // Update direction based on action (prevent 180-degree turns)
        if let Action::Move(new_direction) = action {
            if !state.snake.direction.is_opposite(new_direction) {
                state.snake.direction = new_direction;
            }
        }

        // Calculate new head position
        let new_head = state.snake.next_head();

        // Check for collisions; a hit ends the game with no state mutation
        if let Some(collision) = self.check_collision(state, new_head) {
            state.status = GameStatus::GameOver;

            return StepOutcome {
                consumed: false,
                collision: Some(collision),
            };
        }

        // Check if the head landed on a snack, and remove that exact one
        let consumed = if let Some(i) = state.targets.iter().position(|&t| t == new_head) {
            state.targets.remove(i);
            state.captured += 1;
            true
        } else {
            false
        };

        // Move snake (grow if it consumed)
        state.snake.advance(new_head, consumed);

        // Refill the board back to the configured snack count
        if state.targets.len() < self.config.target_count {
            self.populate_targets(state);
        }

        StepOutcome {
            consumed,
            collision: None,
        }
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, state: &GameState, pos: Position) -> Option<CollisionType> {
        // Check wall collision
        if !state.in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        // Check self-collision against the full pre-move body. The cell the
        // tail is about to vacate still counts.
        if state.snake.collides_with_body(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Add snacks one at a time until the configured count is restored,
    /// or the board has no free cell left.
    pub fn populate_targets(&mut self, state: &mut GameState) {
        while state.targets.len() < self.config.target_count {
            match self.spawn_target(state) {
                Some(pos) => state.targets.push(pos),
                None => break,
            }
        }
    }

    /// Spawn a snack at a random unoccupied position.
    ///
    /// Rejection sampling is cheap while the board is sparse, but the attempt
    /// budget is bounded; past it a row-major scan picks the first free cell
    /// so the loop always terminates. Returns None only on a full board.
    fn spawn_target(&mut self, state: &GameState) -> Option<Position> {
        let attempts = state.grid_width * state.grid_height * 4;

        for _ in 0..attempts {
            let x = self.rng.gen_range(0..state.grid_width) as i32;
            let y = self.rng.gen_range(0..state.grid_height) as i32;
            let pos = Position::new(x, y);

            if !state.is_occupied(pos) {
                return Some(pos);
            }
        }

        for y in 0..state.grid_height {
            for x in 0..state.grid_width {
                let pos = Position::new(x as i32, y as i32);
                if !state.is_occupied(pos) {
                    return Some(pos);
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_with(target_count: usize) -> GameEngine {
        let config = GameConfig {
            target_count,
            ..GameConfig::default()
        };
        GameEngine::new(config)
    }

    /// Every snack must be in bounds and off the snake at all times
    fn assert_targets_valid(state: &GameState) {
        for (i, &t) in state.targets.iter().enumerate() {
            assert!(state.in_bounds(t), "target {:?} out of bounds", t);
            assert!(
                !state.snake.occupies(t),
                "target {:?} overlaps the snake",
                t
            );
            assert!(
                !state.targets[i + 1..].contains(&t),
                "duplicate target {:?}",
                t
            );
        }
    }

    #[test]
    fn test_reset() {
        let mut engine = engine_with(5);
        let state = engine.reset();

        assert!(state.is_running());
        assert_eq!(state.captured, 0);
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.snake.head(), Position::new(10, 5));
        assert_eq!(state.snake.direction, Direction::Right);
        assert_eq!(state.targets.len(), 5);
        assert_targets_valid(&state);
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = GameEngine::new(GameConfig::small());
        let mut state = engine.reset();
        let initial_head = state.snake.head();

        let outcome = engine.step(&mut state, Action::Continue);

        assert!(state.is_running());
        assert_eq!(outcome.collision, None);
        assert_ne!(state.snake.head(), initial_head);
        assert_targets_valid(&state);
    }

    #[test]
    fn test_consumption_grows_and_replenishes() {
        // Spec scenario: 20x10 board, one snack directly ahead of the head
        let mut engine = engine_with(1);
        let mut state = engine.reset();
        assert_eq!(state.snake.head(), Position::new(10, 5));

        state.targets = vec![Position::new(11, 5)];

        let outcome = engine.step(&mut state, Action::Continue);

        assert!(outcome.consumed);
        assert_eq!(state.snake.head(), Position::new(11, 5));
        assert_eq!(state.snake.len(), 2);
        assert_eq!(state.captured, 1);
        // The eaten snack is replaced within the same tick
        assert_eq!(state.targets.len(), 1);
        assert_ne!(state.targets[0], Position::new(11, 5));
        assert_targets_valid(&state);
    }

    #[test]
    fn test_wall_collision_leaves_state_untouched() {
        // Spec scenario: head at (0,5) heading left walks off the board
        let mut engine = engine_with(1);
        let snake = Snake::new(Position::new(0, 5), Direction::Left, 1);
        let mut state = GameState::new(snake, 20, 10);
        state.targets = vec![Position::new(15, 5)];
        let body_before = state.snake.body.clone();

        let outcome = engine.step(&mut state, Action::Continue);

        assert_eq!(state.status, GameStatus::GameOver);
        assert_eq!(outcome.collision, Some(CollisionType::Wall));
        assert_eq!(state.snake.body, body_before);
        assert_eq!(state.captured, 0);
    }

    #[test]
    fn test_self_collision() {
        let mut engine = engine_with(1);

        // Snake at (5, 5) going Right with length 4
        // Body: (5,5), (4,5), (3,5), (2,5)
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 4);
        let mut state = GameState::new(snake, 20, 10);
        state.targets = vec![Position::new(15, 8)];

        // Move in a pattern that curls back into the body:
        // Right: (6,5), (5,5), (4,5), (3,5)
        engine.step(&mut state, Action::Continue);
        // Down: (6,6), (6,5), (5,5), (4,5)
        engine.step(&mut state, Action::Move(Direction::Down));
        // Left: (5,6), (6,6), (6,5), (5,5)
        engine.step(&mut state, Action::Move(Direction::Left));
        // Up: (5,5) - collides with body at (5,5)
        let outcome = engine.step(&mut state, Action::Move(Direction::Up));

        assert_eq!(state.status, GameStatus::GameOver);
        assert_eq!(outcome.collision, Some(CollisionType::SelfCollision));
    }

    #[test]
    fn test_tail_cell_still_counts_as_collision() {
        // Reference behavior: the check runs against the full pre-move body,
        // so the cell the tail would vacate this very tick is still lethal.
        // A "tail moves out of the way" reading would let this move through;
        // relaxing it changes observable game-over timing.
        let mut engine = engine_with(1);

        // Square of length 4: head (5,5), then (5,6), (6,6), (6,5).
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 1);
        snake.body = [
            Position::new(5, 5),
            Position::new(5, 6),
            Position::new(6, 6),
            Position::new(6, 5),
        ]
        .into_iter()
        .collect();
        let mut state = GameState::new(snake, 20, 10);
        state.targets = vec![Position::new(15, 8)];

        // Heading right steps onto (6,5), the current tail
        let outcome = engine.step(&mut state, Action::Continue);

        assert_eq!(state.status, GameStatus::GameOver);
        assert_eq!(outcome.collision, Some(CollisionType::SelfCollision));
    }

    #[test]
    fn test_moving_toward_vacating_tail_gap_continues() {
        // Regression check against over-eager self-collision: heading toward
        // the tail end but landing on a free cell is a normal move.
        let mut snake = Snake::new(Position::new(5, 5), Direction::Left, 1);
        snake.body = [
            Position::new(5, 5),
            Position::new(6, 5),
            Position::new(7, 5),
        ]
        .into_iter()
        .collect();
        let mut engine = engine_with(1);
        let mut state = GameState::new(snake, 20, 10);
        state.targets = vec![Position::new(15, 8)];

        let outcome = engine.step(&mut state, Action::Continue);

        assert!(state.is_running());
        assert_eq!(outcome.collision, None);
        assert_eq!(state.snake.head(), Position::new(4, 5));
        assert_eq!(state.snake.len(), 3);
    }

    #[test]
    fn test_prevent_180_degree_turn() {
        let mut engine = engine_with(5);
        let mut state = engine.reset();
        state.snake.direction = Direction::Right;

        // Try to turn 180 degrees (should be ignored)
        engine.step(&mut state, Action::Move(Direction::Left));

        assert_eq!(state.snake.direction, Direction::Right);
    }

    #[test]
    fn test_perpendicular_turn_applied() {
        let mut engine = engine_with(5);
        let mut state = engine.reset();
        state.snake.direction = Direction::Right;

        engine.step(&mut state, Action::Move(Direction::Down));

        assert_eq!(state.snake.direction, Direction::Down);
    }

    #[test]
    fn test_terminated_game_no_update() {
        let mut engine = engine_with(5);
        let mut state = engine.reset();
        state.status = GameStatus::GameOver;
        let snapshot = state.clone();

        let outcome = engine.step(&mut state, Action::Continue);

        assert_eq!(outcome, StepOutcome::nothing());
        assert_eq!(state, snapshot);
    }

    #[test]
    fn test_targets_stay_valid_across_many_ticks() {
        let mut engine = engine_with(5);
        let mut state = engine.reset();

        // Walk a rectangle near the center for a while
        let tour = [
            Direction::Right,
            Direction::Down,
            Direction::Left,
            Direction::Up,
        ];
        for turn in tour.iter().cycle().take(40) {
            engine.step(&mut state, Action::Move(*turn));
            if !state.is_running() {
                break;
            }
            assert_eq!(state.targets.len(), 5);
            assert_targets_valid(&state);
        }
    }

    #[test]
    fn test_spawn_scan_fallback_on_nearly_full_board() {
        // 2x2 board: snake covers one cell, snacks must land on the rest
        let config = GameConfig {
            grid_width: 2,
            grid_height: 2,
            target_count: 3,
            ..GameConfig::default()
        };
        let mut engine = GameEngine::new(config);
        let snake = Snake::new(Position::new(0, 0), Direction::Right, 1);
        let mut state = GameState::new(snake, 2, 2);

        engine.populate_targets(&mut state);

        assert_eq!(state.targets.len(), 3);
        assert_targets_valid(&state);
    }

    #[test]
    fn test_spawn_gives_up_on_full_board() {
        // Snake plus snacks cover the whole board: asking for more must
        // terminate without adding anything.
        let config = GameConfig {
            grid_width: 2,
            grid_height: 1,
            target_count: 2,
            ..GameConfig::default()
        };
        let mut engine = GameEngine::new(config);
        let snake = Snake::new(Position::new(0, 0), Direction::Right, 1);
        let mut state = GameState::new(snake, 2, 1);
        state.targets = vec![Position::new(1, 0)];

        engine.populate_targets(&mut state);

        assert_eq!(state.targets, vec![Position::new(1, 0)]);
    }
}
