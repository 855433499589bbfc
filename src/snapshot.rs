//! Read-only copy of the board for presentation layers.

use crate::grid::{Cell, Grid};
use crate::token::{Color, Position, TokenId};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellView {
    Blocked,
    Empty,
    Token { id: TokenId, color: Color },
}

/// Cell contents at one moment, row-major with y = 0 at the bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSnapshot {
    pub width: usize,
    pub height: usize,
    cells: Vec<CellView>,
}

impl GridSnapshot {
    pub fn of(grid: &Grid) -> Self {
        let (width, height) = (grid.width(), grid.height());
        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                cells.push(match grid.cell(Position::new(x, y)) {
                    Some(Cell::Occupied(token)) => CellView::Token {
                        id: token.id(),
                        color: token.color(),
                    },
                    Some(Cell::Empty) => CellView::Empty,
                    Some(Cell::Blocked) | None => CellView::Blocked,
                });
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Option<CellView> {
        (x < self.width && y < self.height).then(|| self.cells[y * self.width + x])
    }

    pub fn color(&self, x: usize, y: usize) -> Option<Color> {
        match self.get(x, y)? {
            CellView::Token { color, .. } => Some(color),
            _ => None,
        }
    }

    pub fn cells(&self) -> &[CellView] {
        &self.cells
    }
}

/// One line per row, top row first: colour letters, `#` blocked, `.` empty.
/// The output parses back with `Grid::from_pattern`.
impl fmt::Display for GridSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                let c = match self.cells[y * self.width + x] {
                    CellView::Blocked => '#',
                    CellView::Empty => '.',
                    CellView::Token { color, .. } => color.letter(),
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
