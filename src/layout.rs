//! Layout masks: which cells of the board are permanently blocked.
//!
//! Text format, one line per row with the top row first:
//! `.` free, `#` blocked. Blank lines and lines starting with `;` are skipped.

use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: unexpected cell '{found}'")]
    InvalidCell { line: usize, found: char },
    #[error("line {line}: row has {found} cells, expected {expected}")]
    RaggedRow {
        line: usize,
        found: usize,
        expected: usize,
    },
    #[error("layout has no rows")]
    Empty,
}

/// Static free/blocked mask, fixed for the lifetime of a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutMask {
    width: usize,
    height: usize,
    /// Indexed `y * width + x`, y = 0 is the bottom row.
    blocked: Vec<bool>,
}

impl LayoutMask {
    /// Mask with every cell free.
    ///
    /// # Panics
    ///
    /// If `width * height` overflows `usize`.
    pub fn open(width: usize, height: usize) -> Self {
        let cells = width
            .checked_mul(height)
            .unwrap_or_else(|| panic!("layout {}x{} is too large", width, height));
        Self {
            width,
            height,
            blocked: vec![false; cells],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn is_blocked(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.blocked[y * self.width + x]
    }

    pub fn set_blocked(&mut self, x: usize, y: usize, blocked: bool) {
        if x < self.width && y < self.height {
            self.blocked[y * self.width + x] = blocked;
        }
    }

    pub fn free_cells(&self) -> usize {
        self.blocked.iter().filter(|&&b| !b).count()
    }

    /// Load a mask from a layout file.
    pub fn load(path: &Path) -> Result<Self, LayoutError> {
        let s = std::fs::read_to_string(path)?;
        Self::parse(&s)
    }

    pub fn parse(s: &str) -> Result<Self, LayoutError> {
        let rows = layout_rows(s)?;
        let height = rows.len();
        let width = rows[0].1.len();
        let mut mask = Self::open(width, height);
        for (top_index, (line, cells)) in rows.iter().enumerate() {
            let y = height - 1 - top_index;
            for (x, &c) in cells.iter().enumerate() {
                match c {
                    '.' => {}
                    '#' => mask.set_blocked(x, y, true),
                    found => return Err(LayoutError::InvalidCell { line: *line, found }),
                }
            }
        }
        Ok(mask)
    }
}

/// Split layout text into (1-based line number, cells) rows, top row first.
/// Rows must all have the same number of cells.
pub(crate) fn layout_rows(s: &str) -> Result<Vec<(usize, Vec<char>)>, LayoutError> {
    let mut rows: Vec<(usize, Vec<char>)> = Vec::new();
    for (i, line) in s.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with(';') {
            continue;
        }
        let cells: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
        if let Some((_, first)) = rows.first() {
            if cells.len() != first.len() {
                return Err(LayoutError::RaggedRow {
                    line: i + 1,
                    found: cells.len(),
                    expected: first.len(),
                });
            }
        }
        rows.push((i + 1, cells));
    }
    if rows.is_empty() {
        return Err(LayoutError::Empty);
    }
    Ok(rows)
}
