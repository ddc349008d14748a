use web_time::Instant;

use crate::*;

/// Front door for a presentation layer: owns the current difficulty and game, and hands
/// out only results and snapshots.
#[derive(Debug)]
pub struct BoardEngine {
    difficulty: Difficulty,
    session: GameSession,
    next_seed: Option<u64>,
}

impl BoardEngine {
    /// Starts an easy, medium or hard game with entropy-seeded mine placement.
    pub fn new(difficulty: Difficulty) -> Self {
        Self::build(difficulty, None)
    }

    /// Like [`BoardEngine::new`], but every game in this engine's lifetime is reproducible
    /// from `seed`.
    pub fn with_seed(difficulty: Difficulty, seed: u64) -> Self {
        Self::build(difficulty, Some(seed))
    }

    fn build(difficulty: Difficulty, mut next_seed: Option<u64>) -> Self {
        let generator = next_generator(&mut next_seed);
        log::debug!("New {} game", difficulty);
        Self {
            difficulty,
            session: GameSession::with_generator(difficulty.config(), generator),
            next_seed,
        }
    }

    /// Discards the current game and starts a fresh, fully covered one.
    pub fn new_game(&mut self, difficulty: Difficulty) -> Snapshot {
        let generator = next_generator(&mut self.next_seed);
        self.difficulty = difficulty;
        self.session = GameSession::with_generator(difficulty.config(), generator);
        log::debug!("New {} game", difficulty);
        self.session.snapshot()
    }

    /// Starts a new game from a preset name such as `"medium"`.
    pub fn new_game_named(&mut self, name: &str) -> Result<Snapshot> {
        let difficulty: Difficulty = name.parse()?;
        Ok(self.new_game(difficulty))
    }

    /// Starts a new game on the current difficulty.
    pub fn restart(&mut self) -> Snapshot {
        self.new_game(self.difficulty)
    }

    pub fn reveal(&mut self, row: usize, col: usize) -> RevealResult {
        match to_coords(row, col) {
            Some(coords) => self.session.reveal(coords),
            None => RevealResult::ignored(IgnoreReason::OutOfBounds),
        }
    }

    pub fn toggle_flag(&mut self, row: usize, col: usize) -> FlagResult {
        match to_coords(row, col) {
            Some(coords) => self.session.toggle_flag(coords),
            None => FlagResult {
                status: ActionStatus::Ignored(IgnoreReason::OutOfBounds),
                flagged: false,
                flag_count: self.flag_count(),
            },
        }
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.session.elapsed_secs()
    }

    pub fn elapsed_secs_at(&self, now: Instant) -> u64 {
        self.session.elapsed_secs_at(now)
    }

    pub fn flag_count(&self) -> CellCount {
        self.session.flag_count()
    }

    pub fn total_mines(&self) -> CellCount {
        self.session.total_mines()
    }

    pub fn game_active(&self) -> bool {
        self.session.game_active()
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn snapshot(&self) -> Snapshot {
        self.session.snapshot()
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }
}

impl Default for BoardEngine {
    fn default() -> Self {
        Self::new(Difficulty::default())
    }
}

fn next_generator(next_seed: &mut Option<u64>) -> RandomMineGenerator {
    match next_seed {
        Some(seed) => {
            let generator = RandomMineGenerator::new(*seed);
            *seed = seed.wrapping_add(1);
            generator
        }
        None => RandomMineGenerator::from_entropy(),
    }
}

fn to_coords(row: usize, col: usize) -> Option<Coord2> {
    Some((row.try_into().ok()?, col.try_into().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_game_is_fully_covered() {
        let mut engine = BoardEngine::with_seed(Difficulty::Easy, 3);

        let snapshot = engine.new_game(Difficulty::Hard);

        assert_eq!((snapshot.rows, snapshot.cols), (16, 30));
        assert_eq!(snapshot.total_mines, 99);
        assert_eq!(snapshot.flag_count, 0);
        assert!(snapshot.active);
        assert!(snapshot.cells.iter().flatten().all(|&view| view == CellView::Hidden));
        assert_eq!(engine.difficulty(), Difficulty::Hard);
        assert!(!engine.session().first_click_done());
    }

    #[test]
    fn first_reveal_is_always_safe() {
        let mut engine = BoardEngine::with_seed(Difficulty::Hard, 99);
        for _ in 0..25 {
            engine.restart();
            let result = engine.reveal(8, 15);
            assert_eq!(result.status, ActionStatus::Applied);
            assert_ne!(result.outcome, Outcome::Loss);
            assert_eq!(engine.session().board().mine_count(), 99);
        }
    }

    #[test]
    fn seeded_engines_repeat_games() {
        let mut a = BoardEngine::with_seed(Difficulty::Medium, 11);
        let mut b = BoardEngine::with_seed(Difficulty::Medium, 11);
        for _ in 0..3 {
            assert_eq!(a.reveal(0, 0), b.reveal(0, 0));
            assert_eq!(a.snapshot(), b.snapshot());
            a.restart();
            b.restart();
        }
    }

    #[test]
    fn named_games_switch_difficulty() {
        let mut engine = BoardEngine::default();
        assert_eq!(engine.difficulty(), Difficulty::Easy);

        let snapshot = engine.new_game_named("Medium").unwrap();
        assert_eq!((snapshot.rows, snapshot.cols, snapshot.total_mines), (16, 16, 40));

        assert_eq!(
            engine.new_game_named("nightmare"),
            Err(GameError::UnknownDifficulty("nightmare".into()))
        );
        assert_eq!(engine.difficulty(), Difficulty::Medium);
    }

    #[test]
    fn huge_coordinates_are_ignored() {
        let mut engine = BoardEngine::with_seed(Difficulty::Easy, 5);

        assert_eq!(
            engine.reveal(1_000, 2).status,
            ActionStatus::Ignored(IgnoreReason::OutOfBounds)
        );
        assert_eq!(
            engine.toggle_flag(2, 9).status,
            ActionStatus::Ignored(IgnoreReason::OutOfBounds)
        );
        assert!(!engine.session().first_click_done());
    }

    #[test]
    fn counters_follow_flags() {
        let mut engine = BoardEngine::with_seed(Difficulty::Easy, 8);
        engine.toggle_flag(0, 0);
        engine.toggle_flag(0, 1);
        assert_eq!(engine.flag_count(), 2);
        assert_eq!(engine.total_mines(), 10);
        assert!(engine.game_active());
        assert_eq!(engine.elapsed_secs(), 0);

        engine.restart();
        assert_eq!(engine.flag_count(), 0);
    }
}
