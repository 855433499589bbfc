//! Swap controller and cascade loop: one player's board and everything that mutates it.

use crate::config::BoardConfig;
use crate::error::EngineError;
use crate::events::BoardEvent;
use crate::gravity;
use crate::grid::Grid;
use crate::matcher::{self, MatchResult, Scan};
use crate::rng::ColorSource;
use crate::snapshot::GridSnapshot;
use crate::token::{Position, TokenId};

/// External score/move keeper, notified once per finished cascade.
///
/// It doubles as the game-over oracle: while `is_game_over` is true no
/// detection runs, so swaps roll back and cascades stop.
pub trait TurnTracker {
    fn process_turn(&mut self, cleared: usize, subtract_moves: bool);

    fn is_game_over(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    Idle,
    AwaitingSecondSelection(TokenId),
    ProcessingMove,
}

/// Everything one cascade did, across all its passes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CascadeReport {
    pub passes: u32,
    pub cleared: usize,
    pub matches: Vec<MatchResult>,
    pub events: Vec<BoardEvent>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwapOutcome {
    /// No match: the swap was undone. Events hold the swap and its reversal.
    Reverted { events: Vec<BoardEvent> },
    /// Match found: the swap stays and the cascade ran to completion.
    Accepted {
        events: Vec<BoardEvent>,
        cascade: CascadeReport,
    },
}

impl SwapOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    pub fn cleared(&self) -> usize {
        match self {
            Self::Accepted { cascade, .. } => cascade.cleared,
            Self::Reverted { .. } => 0,
        }
    }
}

/// Result of a selection: the new state and the swap it triggered, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub state: SelectionState,
    pub swap: Option<SwapOutcome>,
}

/// Owns the grid, the colour source and the turn tracker.
pub struct Session<S: ColorSource, T: TurnTracker> {
    config: BoardConfig,
    grid: Grid,
    source: S,
    tracker: T,
    state: SelectionState,
    /// Matches from the latest detection pass, consumed by the next removal.
    pending: Scan,
}

impl<S: ColorSource, T: TurnTracker> Session<S, T> {
    /// Build a fresh match-free board.
    pub fn new(config: BoardConfig, mut source: S, tracker: T) -> Result<Self, EngineError> {
        let grid = Grid::initialize(&config, &mut source)?;
        crate::log!(
            "new {}x{} board, {} colours",
            grid.width(),
            grid.height(),
            config.palette.len()
        );
        Ok(Self::from_parts(config, grid, source, tracker))
    }

    /// Start from an existing board. `config` supplies the palette and limits;
    /// the grid's own layout replaces the configured one.
    ///
    /// Every free cell of `grid` must hold a token.
    pub fn from_grid(
        mut config: BoardConfig,
        grid: Grid,
        source: S,
        tracker: T,
    ) -> Result<Self, EngineError> {
        if grid.width() != config.width || grid.height() != config.height {
            return Err(EngineError::LayoutMismatch {
                layout_width: grid.width(),
                layout_height: grid.height(),
                width: config.width,
                height: config.height,
            });
        }
        if !grid.is_full() {
            let empty = grid.layout().free_cells() - grid.tokens().count();
            return Err(EngineError::IncompleteBoard { empty });
        }
        config.layout = grid.layout().clone();
        Ok(Self::from_parts(config, grid, source, tracker))
    }

    fn from_parts(config: BoardConfig, grid: Grid, source: S, tracker: T) -> Self {
        Self {
            config,
            grid,
            source,
            tracker,
            state: SelectionState::Idle,
            pending: Scan::default(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn tracker(&self) -> &T {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut T {
        &mut self.tracker
    }

    pub fn snapshot(&self) -> GridSnapshot {
        self.grid.snapshot()
    }

    /// Feed one selection into the state machine.
    ///
    /// Unknown tokens and non-adjacent pairs are ignored; any other error
    /// means the board broke an invariant.
    pub fn try_select(&mut self, id: TokenId) -> Result<Selection, EngineError> {
        match self.state {
            SelectionState::ProcessingMove => {
                crate::vlog!("selection of {} ignored while a move resolves", id);
            }
            SelectionState::Idle => {
                if self.grid.find(id).is_some() {
                    self.state = SelectionState::AwaitingSecondSelection(id);
                }
            }
            SelectionState::AwaitingSecondSelection(first) if first == id => {
                self.state = SelectionState::Idle;
            }
            SelectionState::AwaitingSecondSelection(first) => {
                let result = self.attempt_swap(first, id);
                self.state = SelectionState::Idle;
                let swap = match result {
                    Ok(outcome) => Some(outcome),
                    Err(err @ (EngineError::InvalidSwap { .. } | EngineError::UnknownToken(_))) => {
                        crate::vlog!("swap ignored: {}", err);
                        None
                    }
                    Err(err) => return Err(err),
                };
                return Ok(Selection {
                    state: self.state,
                    swap,
                });
            }
        }
        Ok(Selection {
            state: self.state,
            swap: None,
        })
    }

    /// Select whatever token sits at `pos`. Blocked and empty cells are ignored.
    pub fn select_at(&mut self, pos: Position) -> Result<Selection, EngineError> {
        match self.grid.token(pos).map(|t| t.id()) {
            Some(id) => self.try_select(id),
            None => Ok(Selection {
                state: self.state,
                swap: None,
            }),
        }
    }

    /// Swap two adjacent tokens, keeping the swap only if it makes a match.
    pub fn attempt_swap(&mut self, a: TokenId, b: TokenId) -> Result<SwapOutcome, EngineError> {
        let pa = self.grid.find(a).ok_or(EngineError::UnknownToken(a))?;
        let pb = self.grid.find(b).ok_or(EngineError::UnknownToken(b))?;
        if pa.manhattan(pb) != 1 {
            return Err(EngineError::InvalidSwap {
                first: pa,
                second: pb,
            });
        }

        self.grid.swap(pa, pb)?;
        let mut events = vec![
            BoardEvent::Moved {
                token: a,
                from: pa,
                to: pb,
            },
            BoardEvent::Moved {
                token: b,
                from: pb,
                to: pa,
            },
        ];

        let matched = match self.detect() {
            Ok(matched) => matched,
            Err(err) => {
                self.grid.swap(pb, pa)?;
                self.grid.reset_matched();
                self.pending = Scan::default();
                return Err(err);
            }
        };
        if matched {
            crate::vlog!("swap {} <-> {} accepted", pa, pb);
            let cascade = self.run_cascade(true)?;
            return Ok(SwapOutcome::Accepted { events, cascade });
        }

        self.grid.swap(pb, pa)?;
        events.push(BoardEvent::Moved {
            token: a,
            from: pb,
            to: pa,
        });
        events.push(BoardEvent::Moved {
            token: b,
            from: pa,
            to: pb,
        });
        crate::vlog!("swap {} <-> {} made no match, reverted", pa, pb);
        Ok(SwapOutcome::Reverted { events })
    }

    /// Resolve any matches already on the board without charging a move.
    pub fn settle(&mut self) -> Result<Option<CascadeReport>, EngineError> {
        if self.state == SelectionState::ProcessingMove || !self.detect()? {
            return Ok(None);
        }
        self.run_cascade(false).map(Some)
    }

    /// One detection pass, skipped while the game is over.
    fn detect(&mut self) -> Result<bool, EngineError> {
        if self.tracker.is_game_over() {
            self.pending = Scan::default();
            return Ok(false);
        }
        self.pending = matcher::scan_board(&mut self.grid)?;
        Ok(self.pending.has_match())
    }

    /// Holds `ProcessingMove` for the duration of the cascade.
    fn run_cascade(&mut self, subtract_moves: bool) -> Result<CascadeReport, EngineError> {
        let previous = std::mem::replace(&mut self.state, SelectionState::ProcessingMove);
        let result = self.resolve_cascade();
        self.state = previous;
        let report = result?;
        crate::log!(
            "cascade cleared {} tokens in {} pass(es)",
            report.cleared,
            report.passes
        );
        self.tracker.process_turn(report.cleared, subtract_moves);
        Ok(report)
    }

    /// Remove, refill and re-detect until the board is stable.
    fn resolve_cascade(&mut self) -> Result<CascadeReport, EngineError> {
        let mut report = CascadeReport::default();
        loop {
            if report.passes >= self.config.max_cascade_passes {
                self.grid.reset_matched();
                self.pending = Scan::default();
                return Err(EngineError::CascadeLimit {
                    passes: report.passes,
                });
            }
            report.passes += 1;

            let scan = std::mem::take(&mut self.pending);
            let removal = scan.removal_set();
            let events = gravity::remove_and_refill(
                &mut self.grid,
                &removal,
                &self.config.palette,
                &mut self.source,
            )?;
            crate::vlog!("pass {}: removed {}", report.passes, removal.len());
            report.cleared += removal.len();
            report.matches.extend(scan.into_matches());
            report.events.extend(events);

            if !self.detect()? {
                return Ok(report);
            }
        }
    }
}
