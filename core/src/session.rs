use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use web_time::Instant;

use crate::*;

/// Valid transitions:
/// - Ready -> Active
/// - Active -> Won
/// - Active -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// No cell revealed yet, mines not placed
    #[default]
    Ready,
    /// First cell revealed, timer running
    Active,
    Won,
    Lost,
}

impl SessionState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    pub const fn outcome(self) -> Outcome {
        match self {
            Self::Ready | Self::Active => Outcome::None,
            Self::Won => Outcome::Win,
            Self::Lost => Outcome::Loss,
        }
    }
}

/// One game from the first click to a win or a loss.
///
/// Mines are placed by `G` on the first reveal so that the first revealed cell is always
/// safe. Every operation either applies completely or reports why it was ignored.
#[derive(Clone, Debug)]
pub struct GameSession<G = RandomMineGenerator> {
    config: GameConfig,
    board: Board,
    generator: G,
    state: SessionState,
    flag_count: CellCount,
    revealed_count: CellCount,
    started_at: Option<Instant>,
    ended_at: Option<Instant>,
    triggered_mine: Option<Coord2>,
}

impl GameSession<RandomMineGenerator> {
    pub fn new(config: GameConfig) -> Self {
        Self::with_generator(config, RandomMineGenerator::from_entropy())
    }
}

impl<G: MineGenerator> GameSession<G> {
    pub fn with_generator(config: GameConfig, generator: G) -> Self {
        Self {
            config,
            board: Board::create(config),
            generator,
            state: Default::default(),
            flag_count: 0,
            revealed_count: 0,
            started_at: None,
            ended_at: None,
            triggered_mine: None,
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn outcome(&self) -> Outcome {
        self.state.outcome()
    }

    pub fn game_active(&self) -> bool {
        !self.state.is_finished()
    }

    pub fn first_click_done(&self) -> bool {
        self.board.mines_placed()
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines
    }

    pub fn flag_count(&self) -> CellCount {
        self.flag_count
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    /// How many mines have not been flagged yet, negative when over-flagged
    pub fn mines_left(&self) -> i32 {
        i32::from(self.total_mines()) - i32::from(self.flag_count)
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    /// Whole seconds since the first reveal, 0 when not started or already finished.
    pub fn elapsed_secs_at(&self, now: Instant) -> u64 {
        match (self.state, self.started_at) {
            (SessionState::Active, Some(started_at)) => {
                now.saturating_duration_since(started_at).as_secs()
            }
            _ => 0,
        }
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs_at(Instant::now())
    }

    /// Length of a finished game in whole seconds.
    pub fn final_secs(&self) -> Option<u64> {
        let started_at = self.started_at?;
        let ended_at = self.ended_at?;
        Some(ended_at.saturating_duration_since(started_at).as_secs())
    }

    /// Seconds for a game clock: running while active, frozen at the final time once
    /// the game is over.
    pub fn clock_secs_at(&self, now: Instant) -> u64 {
        match self.final_secs() {
            Some(secs) => secs,
            None => self.elapsed_secs_at(now),
        }
    }

    pub fn clock_secs(&self) -> u64 {
        self.clock_secs_at(Instant::now())
    }

    pub fn reveal(&mut self, coords: Coord2) -> RevealResult {
        self.reveal_at(coords, Instant::now())
    }

    /// Reveals a covered cell, cascading through zero-adjacency regions.
    ///
    /// The first reveal of the session places the mines around `coords` and starts the
    /// timer at `now`.
    pub fn reveal_at(&mut self, coords: Coord2, now: Instant) -> RevealResult {
        if let Err(reason) = self.check_playable(coords) {
            log::trace!("Ignored reveal at {:?}: {:?}", coords, reason);
            return RevealResult::ignored(reason);
        }

        let cell = self.board[coords];
        if cell.is_revealed {
            return RevealResult::ignored(IgnoreReason::AlreadyRevealed);
        }
        if cell.is_flagged {
            return RevealResult::ignored(IgnoreReason::Flagged);
        }

        if !self.board.mines_placed() {
            if let Err(err) = self.generator.place(&mut self.board, self.config, coords) {
                log::error!("Could not place mines around {:?}: {}", coords, err);
                return RevealResult::ignored(IgnoreReason::PlacementFailed);
            }
            self.mark_started(now);
        }

        let mut updates = Vec::new();
        let outcome = self.reveal_region(coords, &mut updates, now);
        let exposed = if outcome == Outcome::Loss {
            self.exposed_after_loss()
        } else {
            Vec::new()
        };

        RevealResult {
            status: ActionStatus::Applied,
            updates,
            exposed,
            outcome,
        }
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> FlagResult {
        let ignored = |reason, flagged, flag_count| FlagResult {
            status: ActionStatus::Ignored(reason),
            flagged,
            flag_count,
        };

        if let Err(reason) = self.check_playable(coords) {
            log::trace!("Ignored flag at {:?}: {:?}", coords, reason);
            return ignored(reason, false, self.flag_count);
        }

        let cell = self.board.cell_mut(coords);
        if cell.is_revealed {
            return ignored(IgnoreReason::AlreadyRevealed, false, self.flag_count);
        }

        cell.is_flagged = !cell.is_flagged;
        let flagged = cell.is_flagged;
        if flagged {
            self.flag_count += 1;
        } else {
            self.flag_count -= 1;
        }
        log::debug!("Flag at {:?} set to {}, {} flags", coords, flagged, self.flag_count);

        FlagResult {
            status: ActionStatus::Applied,
            flagged,
            flag_count: self.flag_count,
        }
    }

    /// What the player currently sees at `coords`.
    pub fn view_at(&self, coords: Coord2) -> Option<CellView> {
        let cell = self.board.cell(coords)?;
        let lost = matches!(self.state, SessionState::Lost);

        Some(match cell {
            cell if cell.is_revealed => CellView::revealed(cell),
            cell if lost && cell.is_mine && !cell.is_flagged => CellView::Mine,
            cell if lost && cell.is_flagged && !cell.is_mine => CellView::Misflagged,
            cell if cell.is_flagged => CellView::Flagged,
            _ => CellView::Hidden,
        })
    }

    pub fn snapshot(&self) -> Snapshot {
        let (rows, cols) = self.board.size();
        let cells = (0..rows)
            .map(|row| {
                (0..cols)
                    .map(|col| self.view_at((row, col)).unwrap_or_default())
                    .collect()
            })
            .collect();

        Snapshot {
            rows,
            cols,
            total_mines: self.total_mines(),
            flag_count: self.flag_count,
            active: self.game_active(),
            outcome: self.outcome(),
            cells,
        }
    }

    fn check_playable(&self, coords: Coord2) -> core::result::Result<(), IgnoreReason> {
        if self.state.is_finished() {
            Err(IgnoreReason::GameOver)
        } else if !self.board.contains(coords) {
            Err(IgnoreReason::OutOfBounds)
        } else {
            Ok(())
        }
    }

    /// Reveals `start` and, when it borders no mines, flood-fills outwards.
    ///
    /// Cells are marked revealed before they are queued, so each cell enters the queue at
    /// most once and the fill does at most `rows * cols` work. Flagged cells block the fill.
    fn reveal_region(
        &mut self,
        start: Coord2,
        updates: &mut Vec<CellUpdate>,
        now: Instant,
    ) -> Outcome {
        let cell = self.reveal_cell(start, updates);
        if cell.is_mine {
            self.triggered_mine = Some(start);
            self.end_game(SessionState::Lost, now);
            return Outcome::Loss;
        }

        if cell.adjacent_mines == 0 {
            let mut to_visit = VecDeque::from([start]);
            while let Some(visit_coords) = to_visit.pop_front() {
                for neighbor in self.board.neighbors(visit_coords) {
                    if !self.board[neighbor].is_covered() {
                        continue;
                    }
                    let opened = self.reveal_cell(neighbor, updates);
                    if opened.adjacent_mines == 0 {
                        to_visit.push_back(neighbor);
                    }
                }
            }
            log::trace!("Flood fill from {:?} opened {} cells", start, updates.len());
        }

        if self.revealed_count == self.board.safe_cell_count() {
            self.end_game(SessionState::Won, now);
            Outcome::Win
        } else {
            Outcome::None
        }
    }

    fn reveal_cell(&mut self, coords: Coord2, updates: &mut Vec<CellUpdate>) -> Cell {
        let cell = self.board.cell_mut(coords);
        cell.is_revealed = true;
        let cell = *cell;
        self.revealed_count += 1;
        updates.push(CellUpdate::new(coords, CellView::revealed(&cell)));
        log::trace!("Revealed {:?}, adjacent mines: {}", coords, cell.adjacent_mines);
        cell
    }

    fn exposed_after_loss(&self) -> Vec<CellUpdate> {
        self.board
            .cells()
            .filter(|cell| !cell.is_revealed)
            .filter_map(|cell| {
                let view = self.view_at(cell.coords())?;
                matches!(view, CellView::Mine | CellView::Misflagged)
                    .then(|| CellUpdate::new(cell.coords(), view))
            })
            .collect()
    }

    /// Changes from ready to active, recording the start time
    fn mark_started(&mut self, now: Instant) {
        if self.state.is_ready() {
            log::debug!("Game started, {} mines placed", self.board.mine_count());
            self.started_at = Some(now);
            self.state = SessionState::Active;
        }
    }

    fn end_game(&mut self, state: SessionState, now: Instant) {
        if self.state.is_finished() {
            return;
        }
        self.state = state;
        self.ended_at = Some(now);
        log::debug!(
            "Game ended: {:?} after {} revealed cells",
            state,
            self.revealed_count
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(size: Coord2, mines: &[Coord2]) -> GameSession<FixedMineGenerator> {
        let config = GameConfig::new_unchecked(size, mines.len() as CellCount);
        GameSession::with_generator(config, FixedMineGenerator::new(mines))
    }

    #[test]
    fn first_reveal_places_mines_and_starts() {
        let mut game = session((3, 3), &[(2, 2)]);
        assert!(game.game_active());
        assert!(!game.first_click_done());
        assert_eq!(game.state(), SessionState::Ready);

        game.reveal((0, 2));

        assert!(game.first_click_done());
        assert!(game.board()[(2, 2)].is_mine);
        assert!(game.started_at().is_some());
    }

    #[test]
    fn reveal_hits_mine_and_sets_triggered_cell() {
        let mut game = session((2, 2), &[(0, 0)]);
        game.reveal((1, 1));

        let result = game.reveal((0, 0));

        assert_eq!(result.outcome, Outcome::Loss);
        assert_eq!(result.updates, vec![CellUpdate::new((0, 0), CellView::Exploded)]);
        assert_eq!(game.state(), SessionState::Lost);
        assert_eq!(game.triggered_mine(), Some((0, 0)));
        assert!(!game.game_active());
    }

    #[test]
    fn reveal_flood_fill_opens_zero_region() {
        let mut game = session((3, 3), &[(2, 2)]);

        let result = game.reveal((0, 0));

        assert_eq!(result.outcome, Outcome::Win);
        assert_eq!(result.updates.len(), 8);
        assert_eq!(game.view_at((0, 0)), Some(CellView::Blank));
        assert_eq!(game.view_at((1, 1)), Some(CellView::Number(1)));
        assert_eq!(game.view_at((2, 2)), Some(CellView::Hidden));
    }

    #[test]
    fn numbered_cell_does_not_cascade() {
        let mut game = session((3, 3), &[(0, 0)]);

        let result = game.reveal((1, 1));

        assert_eq!(result.updates, vec![CellUpdate::new((1, 1), CellView::Number(1))]);
        assert_eq!(game.revealed_count(), 1);
        assert_eq!(result.outcome, Outcome::None);
    }

    #[test]
    fn flags_block_the_cascade() {
        let mut game = session((1, 5), &[(0, 4)]);
        game.toggle_flag((0, 1));

        let result = game.reveal((0, 0));

        assert_eq!(result.updates, vec![CellUpdate::new((0, 0), CellView::Blank)]);
        assert_eq!(game.view_at((0, 1)), Some(CellView::Flagged));
        assert_eq!(game.view_at((0, 2)), Some(CellView::Hidden));
    }

    #[test]
    fn flagged_and_revealed_cells_are_ignored() {
        let mut game = session((3, 3), &[(0, 0)]);
        game.toggle_flag((2, 2));

        assert_eq!(
            game.reveal((2, 2)).status,
            ActionStatus::Ignored(IgnoreReason::Flagged)
        );
        assert!(!game.first_click_done());

        game.reveal((1, 1));
        assert_eq!(
            game.reveal((1, 1)).status,
            ActionStatus::Ignored(IgnoreReason::AlreadyRevealed)
        );
        assert_eq!(
            game.toggle_flag((1, 1)).status,
            ActionStatus::Ignored(IgnoreReason::AlreadyRevealed)
        );
        assert_eq!(game.flag_count(), 1);
    }

    #[test]
    fn out_of_bounds_is_ignored() {
        let mut game = session((2, 2), &[(0, 0)]);
        assert_eq!(
            game.reveal((2, 0)).status,
            ActionStatus::Ignored(IgnoreReason::OutOfBounds)
        );
        assert_eq!(
            game.toggle_flag((0, 9)).status,
            ActionStatus::Ignored(IgnoreReason::OutOfBounds)
        );
        assert!(!game.first_click_done());
    }

    #[test]
    fn toggle_flag_twice_restores_state() {
        let mut game = session((2, 2), &[(0, 0)]);

        let on = game.toggle_flag((1, 0));
        assert_eq!(on.status, ActionStatus::Applied);
        assert!(on.flagged);
        assert_eq!(on.flag_count, 1);
        assert_eq!(game.mines_left(), 0);

        let off = game.toggle_flag((1, 0));
        assert!(!off.flagged);
        assert_eq!(off.flag_count, 0);
        assert_eq!(game.view_at((1, 0)), Some(CellView::Hidden));
    }

    #[test]
    fn loss_exposes_mines_and_misflags() {
        let mut game = session((2, 3), &[(0, 0), (0, 2)]);
        game.toggle_flag((1, 2));
        game.toggle_flag((0, 2));
        game.reveal((1, 0));

        let result = game.reveal((0, 0));

        assert_eq!(result.outcome, Outcome::Loss);
        assert_eq!(
            result.exposed,
            vec![CellUpdate::new((1, 2), CellView::Misflagged)]
        );
        assert_eq!(game.view_at((0, 2)), Some(CellView::Flagged));
        assert!(!game.board()[(0, 2)].is_revealed);

        let snapshot = game.snapshot();
        assert_eq!(snapshot.view_at((0, 0)), Some(CellView::Exploded));
        assert_eq!(snapshot.outcome, Outcome::Loss);
        assert!(!snapshot.active);
    }

    #[test]
    fn unflagged_mines_are_shown_after_loss() {
        let mut game = session((1, 4), &[(0, 0), (0, 3)]);
        game.reveal((0, 1));

        let result = game.reveal((0, 0));

        assert_eq!(result.exposed, vec![CellUpdate::new((0, 3), CellView::Mine)]);
        assert_eq!(game.revealed_count(), 2);
    }

    #[test]
    fn finished_game_ignores_input() {
        let mut game = session((2, 2), &[(0, 0)]);
        game.reveal((1, 1));
        game.reveal((0, 0));
        let before = game.snapshot();

        assert_eq!(
            game.reveal((0, 1)).status,
            ActionStatus::Ignored(IgnoreReason::GameOver)
        );
        assert_eq!(
            game.toggle_flag((1, 0)).status,
            ActionStatus::Ignored(IgnoreReason::GameOver)
        );
        assert_eq!(game.snapshot(), before);
    }

    #[test]
    fn placement_failure_is_ignored_without_starting() {
        let mut game = session((2, 2), &[(1, 1)]);

        let result = game.reveal((1, 1));

        assert_eq!(
            result.status,
            ActionStatus::Ignored(IgnoreReason::PlacementFailed)
        );
        assert_eq!(game.state(), SessionState::Ready);
        assert_eq!(game.revealed_count(), 0);
    }

    #[test]
    fn timer_runs_only_while_active() {
        let mut game = session((1, 3), &[(0, 1)]);
        let start = Instant::now();
        assert_eq!(game.elapsed_secs_at(start), 0);

        game.reveal_at((0, 0), start);
        assert_eq!(game.state(), SessionState::Active);
        assert_eq!(game.elapsed_secs_at(start + std::time::Duration::from_secs(42)), 42);

        let end = start + std::time::Duration::from_secs(50);
        game.reveal_at((0, 2), end);
        assert_eq!(game.state(), SessionState::Won);
        assert_eq!(game.elapsed_secs_at(end), 0);
        assert_eq!(game.final_secs(), Some(50));
    }

    #[test]
    fn clock_freezes_at_final_time() {
        let mut game = session((1, 3), &[(0, 1)]);
        let start = Instant::now();
        let secs = std::time::Duration::from_secs;
        assert_eq!(game.clock_secs_at(start + secs(9)), 0);

        game.reveal_at((0, 0), start);
        assert_eq!(game.clock_secs_at(start + secs(7)), 7);

        game.reveal_at((0, 1), start + secs(12));
        assert_eq!(game.state(), SessionState::Lost);
        assert_eq!(game.clock_secs_at(start + secs(12)), 12);
        assert_eq!(game.clock_secs_at(start + secs(500)), 12);
    }

    #[test]
    fn first_reveal_can_win_immediately() {
        let mut game = session((1, 2), &[(0, 1)]);

        let result = game.reveal((0, 0));

        assert_eq!(result.outcome, Outcome::Win);
        assert_eq!(game.state(), SessionState::Won);
        assert_eq!(game.final_secs(), Some(0));
    }
}
