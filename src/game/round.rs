//! Round state and the per-click protocol
//!
//! A round runs from board generation to a terminal Won/Lost phase. Two
//! inbound calls drive it: [`Round::choose_cell`] for player input and
//! [`Round::tick`] for the clock. Each call runs to completion against the
//! state left by the previous one; nothing here suspends.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::{MATCH_REWARD, MISMATCH_CLEAR_DELAY_TICKS, ROUND_DURATION_TICKS};
use crate::level::LevelConfig;

use super::board::{Board, ConfigError, Icon, Pos};
use super::connect::can_connect;
use super::selection::{Selection, Toggle};

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Round is live: clicks and clock ticks apply
    Playing,
    /// Every pair linked before the clock ran out
    Won,
    /// Clock ran out
    Lost,
}

impl RoundPhase {
    /// Whether the round has reached a terminal phase
    pub fn is_over(&self) -> bool {
        !matches!(self, RoundPhase::Playing)
    }
}

/// Result of resolving a completed pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Pair linked: both cells cleared, score awarded
    Matched,
    /// The two icons differ; board untouched
    IconMismatch,
    /// Icons match but no straight line joins them; board untouched
    NotConnectable,
}

/// Transient notifications for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundEvent {
    Matched { a: Pos, b: Pos },
    IconMismatch { a: Pos, b: Pos },
    NotConnectable { a: Pos, b: Pos },
    Won { score: u32 },
    Lost,
}

/// Per-cell render view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotCell {
    pub icon: Icon,
    pub matched: bool,
}

/// Complete render view of a round, taken after any mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub rows: usize,
    pub cols: usize,
    /// Row-major grid of cell views
    pub cells: Vec<SnapshotCell>,
    /// Currently selected positions, pick order
    pub selection: Vec<Pos>,
    pub score: u32,
    pub time_remaining: u32,
    pub phase: RoundPhase,
}

/// One playthrough: board, selection, score, and clock
///
/// Owned by the [`Game`](super::control::Game) controller and replaced
/// wholesale on restart, so a superseded round's clock and pending tasks
/// can never fire into a fresh one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    /// Seed the board was generated from, for reproducibility
    seed: u64,
    board: Board,
    selection: Selection,
    score: u32,
    time_remaining: u32,
    phase: RoundPhase,
    /// Ticks until a failed pair is deselected (None = no clear scheduled)
    pending_clear: Option<u32>,
}

impl Round {
    /// Start a round on a freshly generated board
    pub fn new(config: &LevelConfig, seed: u64) -> Result<Self, ConfigError> {
        let mut rng = Pcg32::seed_from_u64(seed);
        let board = Board::generate(config, &mut rng)?;
        log::info!(
            "round started: {}x{} board, seed {}",
            board.rows(),
            board.cols(),
            seed
        );
        Ok(Self {
            seed,
            board,
            selection: Selection::new(),
            score: 0,
            time_remaining: ROUND_DURATION_TICKS,
            phase: RoundPhase::Playing,
            pending_clear: None,
        })
    }

    /// Start a round on a scripted board layout
    #[cfg(test)]
    pub(crate) fn from_board(board: Board) -> Self {
        Self {
            seed: 0,
            board,
            selection: Selection::new(),
            score: 0,
            time_remaining: ROUND_DURATION_TICKS,
            phase: RoundPhase::Playing,
            pending_clear: None,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// Handle a cell-chosen event
    ///
    /// Ignored outside `Playing` and for matched or out-of-bounds cells.
    /// Otherwise toggles the selection and, when that completes a pair,
    /// resolves it: a match clears both cells, awards points, and may win
    /// the round; a failed pair stays selected until the scheduled clear
    /// fires on a later tick.
    pub fn choose_cell(&mut self, pos: Pos) -> Vec<RoundEvent> {
        let mut events = Vec::new();
        if self.phase.is_over() {
            return events;
        }
        let Some(cell) = self.board.get(pos) else {
            return events;
        };
        if cell.matched {
            return events;
        }

        // The selection is being edited; a previously scheduled clear for a
        // failed pair no longer applies.
        self.pending_clear = None;

        match self.selection.toggle(pos) {
            Toggle::Deselected | Toggle::Selected => {}
            Toggle::PairReady(a, b) => match self.resolve_pair(a, b) {
                Outcome::Matched => {
                    events.push(RoundEvent::Matched { a, b });
                    if self.board.all_matched() {
                        self.phase = RoundPhase::Won;
                        self.pending_clear = None;
                        log::info!("round won, final score {}", self.score);
                        events.push(RoundEvent::Won { score: self.score });
                    }
                }
                Outcome::IconMismatch => {
                    self.pending_clear = Some(MISMATCH_CLEAR_DELAY_TICKS);
                    events.push(RoundEvent::IconMismatch { a, b });
                }
                Outcome::NotConnectable => {
                    self.pending_clear = Some(MISMATCH_CLEAR_DELAY_TICKS);
                    events.push(RoundEvent::NotConnectable { a, b });
                }
            },
        }
        events
    }

    /// Resolve a completed pair against the board
    ///
    /// Icon equality is checked before connectivity; failed outcomes leave
    /// board, score, and selection untouched.
    fn resolve_pair(&mut self, a: Pos, b: Pos) -> Outcome {
        let (icon_a, icon_b) = match (self.board.get(a), self.board.get(b)) {
            (Some(ca), Some(cb)) => (ca.icon, cb.icon),
            // Selection only ever holds in-bounds cells
            _ => return Outcome::NotConnectable,
        };

        if icon_a != icon_b {
            return Outcome::IconMismatch;
        }
        if !can_connect(&self.board, a, b) {
            return Outcome::NotConnectable;
        }

        self.board.mark_matched(a);
        self.board.mark_matched(b);
        self.score += MATCH_REWARD;
        self.selection.clear();
        log::debug!(
            "matched {} and {}, score {}, {} cells left",
            a,
            b,
            self.score,
            self.board.remaining()
        );
        Outcome::Matched
    }

    /// Advance the round clock by one tick
    ///
    /// Fires a due delayed clear, then decrements the remaining time;
    /// expiry while `Playing` loses the round. Ticks against a finished
    /// round are no-ops: the clock is stopped.
    pub fn tick(&mut self) -> Vec<RoundEvent> {
        let mut events = Vec::new();
        if self.phase.is_over() {
            return events;
        }

        if let Some(ticks) = self.pending_clear {
            if ticks <= 1 {
                self.pending_clear = None;
                self.selection.clear();
            } else {
                self.pending_clear = Some(ticks - 1);
            }
        }

        self.time_remaining = self.time_remaining.saturating_sub(1);
        if self.time_remaining == 0 {
            self.phase = RoundPhase::Lost;
            self.pending_clear = None;
            log::info!("time expired, round lost at score {}", self.score);
            events.push(RoundEvent::Lost);
        }
        events
    }

    /// Render view of the current state
    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            rows: self.board.rows(),
            cols: self.board.cols(),
            cells: self
                .board
                .cells()
                .iter()
                .map(|c| SnapshotCell {
                    icon: c.icon,
                    matched: c.matched,
                })
                .collect(),
            selection: self.selection.positions().to_vec(),
            score: self.score,
            time_remaining: self.time_remaining,
            phase: self.phase,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2x2 scripted board:
    //   A B
    //   B A
    fn two_by_two() -> Round {
        let icons = [Icon(0), Icon(1), Icon(1), Icon(0)];
        Round::from_board(Board::from_icons(2, 2, &icons))
    }

    // 2x3 scripted board, fully winnable:
    //   A B A
    //   C B C
    fn two_by_three() -> Round {
        let icons = [Icon(0), Icon(1), Icon(0), Icon(2), Icon(1), Icon(2)];
        Round::from_board(Board::from_icons(2, 3, &icons))
    }

    #[test]
    fn test_adjacent_match_awards_points() {
        let mut round = two_by_three();
        let a = Pos::new(0, 1);
        let b = Pos::new(1, 1);

        assert!(round.choose_cell(a).is_empty());
        let events = round.choose_cell(b);
        assert_eq!(events, vec![RoundEvent::Matched { a, b }]);

        assert!(round.board().is_matched(a));
        assert!(round.board().is_matched(b));
        assert_eq!(round.score(), 10);
        assert!(round.selection().is_empty());
    }

    #[test]
    fn test_icon_mismatch_changes_nothing() {
        // Same column, different icons: A over B
        let mut round = two_by_two();
        let a = Pos::new(0, 0);
        let b = Pos::new(1, 0);

        round.choose_cell(a);
        let events = round.choose_cell(b);
        assert_eq!(events, vec![RoundEvent::IconMismatch { a, b }]);

        assert!(!round.board().is_matched(a));
        assert!(!round.board().is_matched(b));
        assert_eq!(round.score(), 0);
        // Failed pair stays selected until the delayed clear fires
        assert_eq!(round.selection().len(), 2);
    }

    #[test]
    fn test_diagonal_same_icon_not_connectable() {
        // A at (0,0) and (1,1): same icon, different row and column
        let mut round = two_by_two();
        let a = Pos::new(0, 0);
        let b = Pos::new(1, 1);

        round.choose_cell(a);
        let events = round.choose_cell(b);
        assert_eq!(events, vec![RoundEvent::NotConnectable { a, b }]);
        assert_eq!(round.score(), 0);
    }

    #[test]
    fn test_delayed_clear_fires_on_tick() {
        let mut round = two_by_two();
        round.choose_cell(Pos::new(0, 0));
        round.choose_cell(Pos::new(1, 0));
        assert_eq!(round.selection().len(), 2);

        round.tick();
        assert!(round.selection().is_empty());
    }

    #[test]
    fn test_click_cancels_pending_clear() {
        let mut round = two_by_three();
        // B at (0,1) and A at (0,2): mismatch, clear scheduled
        round.choose_cell(Pos::new(0, 1));
        round.choose_cell(Pos::new(0, 2));

        // Third pick replaces the failed pair and cancels its clear
        let c = Pos::new(1, 0);
        round.choose_cell(c);
        assert_eq!(round.selection().positions(), &[c]);

        round.tick();
        assert_eq!(round.selection().positions(), &[c]);
    }

    #[test]
    fn test_matched_cells_ignore_clicks() {
        let mut round = two_by_three();
        let a = Pos::new(0, 1);
        let b = Pos::new(1, 1);
        round.choose_cell(a);
        round.choose_cell(b);
        assert_eq!(round.score(), 10);

        assert!(round.choose_cell(a).is_empty());
        assert!(round.selection().is_empty());
    }

    #[test]
    fn test_out_of_bounds_click_is_ignored() {
        let mut round = two_by_two();
        assert!(round.choose_cell(Pos::new(5, 5)).is_empty());
        assert!(round.selection().is_empty());
    }

    #[test]
    fn test_clearing_middle_cell_opens_row_link() {
        let mut round = two_by_three();
        let left = Pos::new(0, 0);
        let right = Pos::new(0, 2);

        // A _ A across an unmatched B: blocked
        round.choose_cell(left);
        let events = round.choose_cell(right);
        assert_eq!(
            events,
            vec![RoundEvent::NotConnectable { a: left, b: right }]
        );
        round.tick();

        // Clear the B pair sitting between the A's
        round.choose_cell(Pos::new(0, 1));
        round.choose_cell(Pos::new(1, 1));
        assert_eq!(round.score(), 10);

        // The same A pair now links along the cleared row
        round.choose_cell(left);
        let events = round.choose_cell(right);
        assert_eq!(
            events,
            vec![RoundEvent::Matched { a: left, b: right }]
        );
        assert_eq!(round.score(), 20);
    }

    #[test]
    fn test_win_on_last_pair_stops_clock() {
        let mut round = two_by_three();
        // B pair (adjacent), A pair (cleared row), C pair (cleared row)
        round.choose_cell(Pos::new(0, 1));
        round.choose_cell(Pos::new(1, 1));
        round.choose_cell(Pos::new(0, 0));
        round.choose_cell(Pos::new(0, 2));
        assert_eq!(round.score(), 20);
        assert_eq!(round.phase(), RoundPhase::Playing);

        let time_before = round.time_remaining();
        round.choose_cell(Pos::new(1, 0));
        let events = round.choose_cell(Pos::new(1, 2));
        assert_eq!(
            events,
            vec![
                RoundEvent::Matched {
                    a: Pos::new(1, 0),
                    b: Pos::new(1, 2)
                },
                RoundEvent::Won { score: 30 }
            ]
        );
        assert_eq!(round.phase(), RoundPhase::Won);
        assert!(round.board().all_matched());

        // Stopped clock: further ticks change nothing
        assert!(round.tick().is_empty());
        assert_eq!(round.time_remaining(), time_before);
        assert_eq!(round.phase(), RoundPhase::Won);
    }

    #[test]
    fn test_clock_expiry_loses_round() {
        let mut round = two_by_two();
        let mut lost = false;
        for _ in 0..ROUND_DURATION_TICKS {
            let events = round.tick();
            if events.contains(&RoundEvent::Lost) {
                lost = true;
            }
        }
        assert!(lost);
        assert_eq!(round.phase(), RoundPhase::Lost);
        assert_eq!(round.time_remaining(), 0);

        // Terminal phase never reverts, clicks are dead
        assert!(round.tick().is_empty());
        assert!(round.choose_cell(Pos::new(0, 0)).is_empty());
        assert_eq!(round.phase(), RoundPhase::Lost);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut round = two_by_three();
        round.choose_cell(Pos::new(0, 1));
        round.choose_cell(Pos::new(1, 1));
        round.choose_cell(Pos::new(0, 0));

        let snapshot = round.snapshot();
        assert_eq!(snapshot.rows, 2);
        assert_eq!(snapshot.cols, 3);
        assert_eq!(snapshot.score, 10);
        assert_eq!(snapshot.selection, vec![Pos::new(0, 0)]);
        assert_eq!(snapshot.phase, RoundPhase::Playing);
        assert!(snapshot.cells[4].matched);
        assert!(!snapshot.cells[0].matched);

        // Snapshots cross the presentation boundary as JSON
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: RoundSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn test_same_seed_generates_same_round() {
        let config = LevelConfig {
            rows: 6,
            cols: 6,
            icon_types: 8,
        };
        let a = Round::new(&config, 123).unwrap();
        let b = Round::new(&config, 123).unwrap();
        assert_eq!(a.board(), b.board());

        let c = Round::new(&config, 124).unwrap();
        assert_ne!(a.board(), c.board());
    }
}
