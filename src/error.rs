//! Engine error taxonomy.

use crate::layout::LayoutError;
use crate::token::{Position, TokenId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Swap between tokens that are not 4-directionally adjacent. Callers recover by ignoring it.
    #[error("cannot swap {first} and {second}: not adjacent")]
    InvalidSwap { first: Position, second: Position },

    #[error("token {0} is not on the board")]
    UnknownToken(TokenId),

    /// A cell was read as if it held a token. Indicates a gravity or detection bug.
    #[error("cell {0} holds no token")]
    EmptyCellAccessed(Position),

    /// A token was placed on a blocked, occupied or off-board cell.
    #[error("cell {0} cannot take a new token")]
    CellNotEmpty(Position),

    /// Cells that must hold a token are vacant, e.g. a session started from a partial board.
    #[error("board has {empty} vacant cell(s)")]
    IncompleteBoard { empty: usize },

    #[error("no match-free board after {attempts} attempts")]
    RegenerationLoop { attempts: u32 },

    #[error("cascade still matching after {passes} passes")]
    CascadeLimit { passes: u32 },

    #[error("invalid board dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("palette must contain at least one colour")]
    EmptyPalette,

    #[error("layout is {layout_width}x{layout_height} but board is {width}x{height}")]
    LayoutMismatch {
        layout_width: usize,
        layout_height: usize,
        width: usize,
        height: usize,
    },

    #[error("layout: {0}")]
    Layout(#[from] LayoutError),
}
