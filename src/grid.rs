//! The board: a fixed layout of cells, each blocked, empty or holding one token.

use crate::config::BoardConfig;
use crate::error::EngineError;
use crate::layout::{LayoutError, LayoutMask, layout_rows};
use crate::matcher;
use crate::rng::{ColorSource, Palette};
use crate::snapshot::GridSnapshot;
use crate::token::{Color, Position, Token, TokenId};

/// Single cell of the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// Permanently unusable, from the layout mask.
    Blocked,
    /// Vacant until gravity or a spawn fills it.
    Empty,
    Occupied(Token),
}

impl Cell {
    pub fn token(&self) -> Option<&Token> {
        match self {
            Self::Occupied(token) => Some(token),
            _ => None,
        }
    }
}

/// Board state. y = 0 is the bottom row; cells are stored row by row.
#[derive(Debug, Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    layout: LayoutMask,
    cells: Vec<Cell>,
    next_id: u64,
}

impl Grid {
    /// Board with every free cell `Empty`.
    pub fn empty(layout: LayoutMask) -> Self {
        let (width, height) = (layout.width(), layout.height());
        let cells = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| {
                if layout.is_blocked(x, y) {
                    Cell::Blocked
                } else {
                    Cell::Empty
                }
            })
            .collect();
        Self {
            width,
            height,
            layout,
            cells,
            next_id: 0,
        }
    }

    /// Fill every free cell with a random colour, regenerating until the board has no match.
    pub fn initialize(
        config: &BoardConfig,
        source: &mut impl ColorSource,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        for attempt in 1..=config.max_init_attempts {
            let mut grid = Self::empty(config.layout.clone());
            grid.populate(&config.palette, source)?;
            if !matcher::scan_board(&mut grid)?.has_match() {
                crate::vlog!(
                    "{}x{} board ready after {} attempt(s)",
                    grid.width,
                    grid.height,
                    attempt
                );
                return Ok(grid);
            }
            crate::vlog!("attempt {}: board starts with matches, regenerating", attempt);
        }
        Err(EngineError::RegenerationLoop {
            attempts: config.max_init_attempts,
        })
    }

    /// Fixed board from text rows, top row first: colour letters, `#` blocked, `.` empty.
    pub fn from_pattern(rows: &[&str]) -> Result<Self, EngineError> {
        let rows = layout_rows(&rows.join("\n"))?;
        let height = rows.len();
        let width = rows[0].1.len();
        let mut layout = LayoutMask::open(width, height);
        for (top_index, (_, cells)) in rows.iter().enumerate() {
            for (x, &c) in cells.iter().enumerate() {
                if c == '#' {
                    layout.set_blocked(x, height - 1 - top_index, true);
                }
            }
        }
        let mut grid = Self::empty(layout);
        for (top_index, (line, cells)) in rows.iter().enumerate() {
            let y = height - 1 - top_index;
            for (x, &c) in cells.iter().enumerate() {
                match c {
                    '#' | '.' => {}
                    letter => {
                        let color = Color::from_letter(letter).ok_or(LayoutError::InvalidCell {
                            line: *line,
                            found: letter,
                        })?;
                        grid.spawn(Position::new(x, y), color)?;
                    }
                }
            }
        }
        Ok(grid)
    }

    fn populate(
        &mut self,
        palette: &Palette,
        source: &mut impl ColorSource,
    ) -> Result<(), EngineError> {
        for y in 0..self.height {
            for x in 0..self.width {
                let pos = Position::new(x, y);
                if matches!(self.cell(pos), Some(Cell::Empty)) {
                    let color = source.pick(palette);
                    self.spawn(pos, color)?;
                }
            }
        }
        Ok(())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn layout(&self) -> &LayoutMask {
        &self.layout
    }

    #[inline]
    fn index(&self, pos: Position) -> Option<usize> {
        (pos.x < self.width && pos.y < self.height).then(|| pos.y * self.width + pos.x)
    }

    #[inline]
    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        self.index(pos).map(|i| &self.cells[i])
    }

    pub fn token(&self, pos: Position) -> Option<&Token> {
        self.cell(pos).and_then(Cell::token)
    }

    pub fn is_blocked(&self, pos: Position) -> bool {
        matches!(self.cell(pos), Some(Cell::Blocked))
    }

    /// Colour of the token at `pos`; reading any other cell is an invariant violation.
    pub fn color_at(&self, pos: Position) -> Result<Color, EngineError> {
        self.token(pos)
            .map(Token::color)
            .ok_or(EngineError::EmptyCellAccessed(pos))
    }

    /// Where the token with this id currently sits.
    pub fn find(&self, id: TokenId) -> Option<Position> {
        self.tokens().find(|t| t.id() == id).map(Token::position)
    }

    /// Tokens in row-major order, bottom row first.
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.cells.iter().filter_map(Cell::token)
    }

    /// True when no free cell is vacant.
    pub fn is_full(&self) -> bool {
        !self.cells.iter().any(|c| matches!(c, Cell::Empty))
    }

    /// Per-cell colours (None for blocked or empty), row-major.
    pub fn colors(&self) -> Vec<Option<Color>> {
        self.cells.iter().map(|c| c.token().map(Token::color)).collect()
    }

    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot::of(self)
    }

    pub(crate) fn reset_matched(&mut self) {
        for cell in &mut self.cells {
            if let Cell::Occupied(token) = cell {
                token.matched = false;
            }
        }
    }

    pub(crate) fn set_matched(&mut self, pos: Position) -> Result<(), EngineError> {
        match self.index(pos).map(|i| &mut self.cells[i]) {
            Some(Cell::Occupied(token)) => {
                token.matched = true;
                Ok(())
            }
            _ => Err(EngineError::EmptyCellAccessed(pos)),
        }
    }

    /// Exchange the tokens at `a` and `b`, updating both cell table and coordinates.
    pub(crate) fn swap(&mut self, a: Position, b: Position) -> Result<(), EngineError> {
        let ia = self.occupied_index(a)?;
        let ib = self.occupied_index(b)?;
        self.cells.swap(ia, ib);
        for (i, pos) in [(ia, a), (ib, b)] {
            if let Cell::Occupied(token) = &mut self.cells[i] {
                token.set_position(pos);
            }
        }
        Ok(())
    }

    /// Remove and return the token at `pos`, leaving the cell `Empty`.
    pub(crate) fn take(&mut self, pos: Position) -> Result<Token, EngineError> {
        let i = self.occupied_index(pos)?;
        match std::mem::replace(&mut self.cells[i], Cell::Empty) {
            Cell::Occupied(token) => Ok(token),
            _ => Err(EngineError::EmptyCellAccessed(pos)),
        }
    }

    /// Move the token at `from` into the empty cell `to`.
    pub(crate) fn settle(&mut self, from: Position, to: Position) -> Result<TokenId, EngineError> {
        let target = match self.index(to) {
            Some(i) if self.cells[i] == Cell::Empty => i,
            _ => return Err(EngineError::EmptyCellAccessed(to)),
        };
        let mut token = self.take(from)?;
        token.set_position(to);
        let id = token.id();
        self.cells[target] = Cell::Occupied(token);
        Ok(id)
    }

    /// Create a token in the empty cell at `pos`.
    pub(crate) fn spawn(&mut self, pos: Position, color: Color) -> Result<TokenId, EngineError> {
        let i = match self.index(pos) {
            Some(i) if self.cells[i] == Cell::Empty => i,
            _ => return Err(EngineError::CellNotEmpty(pos)),
        };
        let id = TokenId(self.next_id);
        self.next_id += 1;
        self.cells[i] = Cell::Occupied(Token::new(id, color, pos));
        Ok(id)
    }

    fn occupied_index(&self, pos: Position) -> Result<usize, EngineError> {
        match self.index(pos) {
            Some(i) if matches!(self.cells[i], Cell::Occupied(_)) => Ok(i),
            _ => Err(EngineError::EmptyCellAccessed(pos)),
        }
    }
}
