//! gemgrid: match-3 puzzle engine.
//!
//! Detects runs of three or more same-coloured tokens, upgrades T/L/plus
//! shapes to combos, removes matches, lets columns fall and refills them,
//! repeating until the board is stable. No rendering or input handling:
//! callers drive a [`Session`] and consume the [`BoardEvent`]s it returns.

pub mod logger;

pub mod combo;
pub mod config;
pub mod error;
pub mod events;
pub mod gravity;
pub mod grid;
pub mod layout;
pub mod matcher;
pub mod rng;
pub mod session;
pub mod snapshot;
pub mod token;

pub use config::BoardConfig;
pub use error::EngineError;
pub use events::BoardEvent;
pub use grid::{Cell, Grid};
pub use layout::{LayoutError, LayoutMask};
pub use matcher::{MatchDirection, MatchResult, Scan};
pub use rng::{ColorSource, Palette, SessionRng};
pub use session::{CascadeReport, Selection, SelectionState, Session, SwapOutcome, TurnTracker};
pub use snapshot::{CellView, GridSnapshot};
pub use token::{Color, Position, Token, TokenId};
