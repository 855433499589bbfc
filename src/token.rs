//! Tokens, colours and board positions.

use std::fmt;

/// Board coordinate. `x` counts columns from the left, `y` counts rows from the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Neighbour one step along (dx, dy), or None when it leaves a `width` x `height` board.
    pub fn step(self, dx: i8, dy: i8, width: usize, height: usize) -> Option<Self> {
        let x = self.x.checked_add_signed(isize::from(dx))?;
        let y = self.y.checked_add_signed(isize::from(dy))?;
        (x < width && y < height).then_some(Self { x, y })
    }

    pub fn manhattan(self, other: Self) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Token colours. The first five are the classic set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Blue,
    Purple,
    Green,
    Yellow,
    Orange,
}

impl Color {
    pub const ALL: [Self; 6] = [
        Self::Red,
        Self::Blue,
        Self::Purple,
        Self::Green,
        Self::Yellow,
        Self::Orange,
    ];

    /// Single-letter code used by board patterns and text dumps.
    pub fn letter(self) -> char {
        match self {
            Self::Red => 'R',
            Self::Blue => 'B',
            Self::Purple => 'P',
            Self::Green => 'G',
            Self::Yellow => 'Y',
            Self::Orange => 'O',
        }
    }

    pub fn from_letter(c: char) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|color| color.letter() == c.to_ascii_uppercase())
    }
}

/// Stable identity of a token for the lifetime of the grid that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenId(pub u64);

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A coloured unit owned by exactly one grid cell.
///
/// Only the grid moves tokens, so `position` always names the cell holding it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    id: TokenId,
    color: Color,
    position: Position,
    pub(crate) matched: bool,
}

impl Token {
    pub(crate) fn new(id: TokenId, color: Color, position: Position) -> Self {
        Self {
            id,
            color,
            position,
            matched: false,
        }
    }

    pub fn id(&self) -> TokenId {
        self.id
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// True between detection and removal within one resolution pass.
    pub fn is_matched(&self) -> bool {
        self.matched
    }

    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = position;
    }
}
