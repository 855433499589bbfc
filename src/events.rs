//! Notifications handed to a presentation layer after each mutation.

use crate::token::{Color, Position, TokenId};

/// One visible change to a token. Spawn origins may lie above the board (`y >= height`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardEvent {
    /// Token relocated by a swap, a rollback or a fall.
    Moved {
        token: TokenId,
        from: Position,
        to: Position,
    },
    /// New token appears at `from` above the column and falls to `to`.
    Spawned {
        token: TokenId,
        color: Color,
        from: Position,
        to: Position,
    },
    Removed {
        token: TokenId,
        color: Color,
        at: Position,
    },
}

impl BoardEvent {
    pub fn token(&self) -> TokenId {
        match *self {
            Self::Moved { token, .. }
            | Self::Spawned { token, .. }
            | Self::Removed { token, .. } => token,
        }
    }

    /// Rows travelled downward; zero for removals and sideways swaps.
    pub fn fall_distance(&self) -> usize {
        match *self {
            Self::Moved { from, to, .. } | Self::Spawned { from, to, .. } => {
                from.y.saturating_sub(to.y)
            }
            Self::Removed { .. } => 0,
        }
    }
}
