//! App: builds the session, feeds it swaps and prints what happened.

use crate::Args;
use crate::input::SwapRequest;
use anyhow::Result;
use gemgrid::{
    BoardConfig, Position, SelectionState, Session, SessionRng, SwapOutcome, TurnTracker,
};

/// Random driver swap directions: right, left, up, down.
const DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Score and move budget. Doubles as the game-over oracle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveCounter {
    pub moves_left: u32,
    pub score: u64,
    pub turns: u32,
}

impl MoveCounter {
    pub fn new(moves: u32) -> Self {
        Self {
            moves_left: moves,
            score: 0,
            turns: 0,
        }
    }
}

impl TurnTracker for MoveCounter {
    fn process_turn(&mut self, cleared: usize, subtract_moves: bool) {
        self.score += cleared as u64;
        self.turns += 1;
        if subtract_moves {
            self.moves_left = self.moves_left.saturating_sub(1);
        }
    }

    fn is_game_over(&self) -> bool {
        self.moves_left == 0
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct RunStats {
    accepted: u32,
    reverted: u32,
    /// Non-adjacent pairs and selections of blocked cells.
    ignored: u32,
    longest_cascade: u32,
}

pub struct App {
    args: Args,
    session: Session<SessionRng, MoveCounter>,
    /// Picks random swaps; separate from the board's colour source.
    driver_rng: SessionRng,
    seed: u64,
    stats: RunStats,
}

impl App {
    pub fn new(args: Args, config: BoardConfig) -> Result<Self> {
        let rng = args.seed.map_or_else(SessionRng::from_random, SessionRng::new);
        let seed = rng.seed();
        let session = Session::new(config, rng, MoveCounter::new(args.moves))?;
        Ok(Self {
            args,
            session,
            driver_rng: SessionRng::new(seed.wrapping_add(1)),
            seed,
            stats: RunStats::default(),
        })
    }

    pub fn run(&mut self) -> Result<()> {
        println!("seed {}", self.seed);
        self.print_board();

        if self.args.swaps.is_empty() {
            self.play_random()?;
        } else {
            for request in self.args.swaps.clone() {
                if self.session.tracker().is_game_over() {
                    break;
                }
                self.play(request, true)?;
            }
        }

        let counter = self.session.tracker();
        println!(
            "score {}  moves left {}  accepted {}  reverted {}  ignored {}  longest cascade {}",
            counter.score,
            counter.moves_left,
            self.stats.accepted,
            self.stats.reverted,
            self.stats.ignored,
            self.stats.longest_cascade
        );
        Ok(())
    }

    fn play_random(&mut self) -> Result<()> {
        let (width, height) = (self.session.grid().width(), self.session.grid().height());
        for _ in 0..self.args.attempts {
            if self.session.tracker().is_game_over() {
                break;
            }
            let first = Position::new(
                self.driver_rng.random_range(0..width),
                self.driver_rng.random_range(0..height),
            );
            let (dx, dy) = DIRECTIONS[self.driver_rng.random_range(0..DIRECTIONS.len())];
            let Some(second) = first.step(dx, dy, width, height) else {
                continue;
            };
            self.play(SwapRequest { first, second }, false)?;
        }
        Ok(())
    }

    /// Select both cells of `request`. Rollbacks are only printed for scripted swaps.
    fn play(&mut self, request: SwapRequest, scripted: bool) -> Result<()> {
        let SwapRequest { first, second } = request;
        let selection = self.session.select_at(first)?;
        let SelectionState::AwaitingSecondSelection(first_id) = selection.state else {
            self.stats.ignored += 1;
            if scripted {
                println!("{} -> {}: nothing to select at {}", first, second, first);
            }
            return Ok(());
        };

        let selection = self.session.select_at(second)?;
        if selection.state == SelectionState::AwaitingSecondSelection(first_id) {
            // Second cell holds no token; drop the pending selection.
            self.session.try_select(first_id)?;
            self.stats.ignored += 1;
            if scripted {
                println!("{} -> {}: nothing to select at {}", first, second, second);
            }
            return Ok(());
        }

        match selection.swap {
            None => {
                self.stats.ignored += 1;
                if scripted {
                    println!("{} -> {}: not adjacent", first, second);
                }
            }
            Some(SwapOutcome::Reverted { .. }) => {
                self.stats.reverted += 1;
                if scripted {
                    println!("{} -> {}: no match, swapped back", first, second);
                }
            }
            Some(SwapOutcome::Accepted { cascade, .. }) => {
                self.stats.accepted += 1;
                self.stats.longest_cascade = self.stats.longest_cascade.max(cascade.passes);
                let shapes: Vec<String> = cascade
                    .matches
                    .iter()
                    .map(|m| format!("{:?} {:?} x{}", m.direction, m.color, m.len()))
                    .collect();
                println!(
                    "{} -> {}: cleared {} in {} pass(es) [{}], {} moves left",
                    first,
                    second,
                    cascade.cleared,
                    cascade.passes,
                    shapes.join(", "),
                    self.session.tracker().moves_left
                );
                self.print_board();
            }
        }
        Ok(())
    }

    fn print_board(&self) {
        if !self.args.quiet {
            print!("{}", self.session.snapshot());
            println!();
        }
    }
}
