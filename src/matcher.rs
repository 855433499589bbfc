//! Run detection: finds lines of three or more same-coloured tokens.

use crate::combo;
use crate::error::EngineError;
use crate::grid::{Cell, Grid};
use crate::token::{Color, Position};

/// Minimum run length that counts as a match.
pub const MIN_RUN: usize = 3;

/// Shape of a match. Exactly three in a line is the plain variant, longer runs are `Long*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchDirection {
    Horizontal,
    Vertical,
    LongHorizontal,
    LongVertical,
    Combo,
    None,
}

impl MatchDirection {
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Horizontal | Self::LongHorizontal)
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Vertical | Self::LongVertical)
    }
}

/// Connected tokens found from one seed, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub positions: Vec<Position>,
    pub direction: MatchDirection,
    pub color: Color,
}

impl MatchResult {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn is_match(&self) -> bool {
        self.direction != MatchDirection::None
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.positions.contains(&pos)
    }
}

/// Outcome of one full-board detection pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scan {
    matches: Vec<MatchResult>,
}

impl Scan {
    pub fn has_match(&self) -> bool {
        !self.matches.is_empty()
    }

    pub fn matches(&self) -> &[MatchResult] {
        &self.matches
    }

    pub fn into_matches(self) -> Vec<MatchResult> {
        self.matches
    }

    /// Every matched position, in the order the matches were found.
    pub fn removal_set(&self) -> Vec<Position> {
        self.matches
            .iter()
            .flat_map(|m| m.positions.iter().copied())
            .collect()
    }
}

/// Detect every match on the board and mark its tokens.
///
/// Resets all `matched` flags first, then seeds from each unmatched token in
/// row-major order (bottom row first). Each qualifying run goes through combo
/// resolution and its tokens are marked before the scan continues, so no token
/// lands in two results.
pub fn scan_board(grid: &mut Grid) -> Result<Scan, EngineError> {
    grid.reset_matched();
    let mut matches = Vec::new();
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let pos = Position::new(x, y);
            match grid.cell(pos) {
                Some(Cell::Occupied(token)) if !token.is_matched() => {}
                Some(Cell::Empty) => return Err(EngineError::EmptyCellAccessed(pos)),
                _ => continue,
            }
            let result = is_connected(grid, pos)?;
            if !result.is_match() {
                continue;
            }
            let result = combo::resolve_combo(grid, result)?;
            for &p in &result.positions {
                grid.set_matched(p)?;
            }
            crate::vlog!(
                "{:?} match of {} {:?} from {}",
                result.direction,
                result.len(),
                result.color,
                pos
            );
            matches.push(result);
        }
    }
    Ok(Scan { matches })
}

/// Classify the run through the token at `seed`. Horizontal is checked first.
pub fn is_connected(grid: &Grid, seed: Position) -> Result<MatchResult, EngineError> {
    let color = grid.color_at(seed)?;
    let mut positions = vec![seed];

    walk(grid, seed, color, (1, 0), &mut positions)?;
    walk(grid, seed, color, (-1, 0), &mut positions)?;
    if positions.len() >= MIN_RUN {
        let direction = if positions.len() == MIN_RUN {
            MatchDirection::Horizontal
        } else {
            MatchDirection::LongHorizontal
        };
        return Ok(MatchResult {
            positions,
            direction,
            color,
        });
    }

    positions.truncate(1);
    walk(grid, seed, color, (0, 1), &mut positions)?;
    walk(grid, seed, color, (0, -1), &mut positions)?;
    let direction = match positions.len() {
        n if n == MIN_RUN => MatchDirection::Vertical,
        n if n > MIN_RUN => MatchDirection::LongVertical,
        _ => MatchDirection::None,
    };
    Ok(MatchResult {
        positions,
        direction,
        color,
    })
}

/// Collect contiguous unmatched tokens of `color` stepping away from `from`.
/// Stops at a mismatch, a blocked cell or the board edge.
pub(crate) fn walk(
    grid: &Grid,
    from: Position,
    color: Color,
    (dx, dy): (i8, i8),
    out: &mut Vec<Position>,
) -> Result<(), EngineError> {
    let mut next = from.step(dx, dy, grid.width(), grid.height());
    while let Some(pos) = next {
        match grid.cell(pos) {
            Some(Cell::Occupied(token)) if !token.is_matched() && token.color() == color => {
                out.push(pos);
                next = pos.step(dx, dy, grid.width(), grid.height());
            }
            Some(Cell::Empty) => return Err(EngineError::EmptyCellAccessed(pos)),
            _ => break,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILLER: [char; 3] = ['G', 'Y', 'P'];

    /// Row with no runs on its own or against the rows next to it.
    fn filler_row(width: usize, y: usize) -> String {
        (0..width).map(|x| FILLER[(x + 2 * y) % 3]).collect()
    }

    /// 8x8 board whose bottom row is `bottom` and the rest is filler.
    fn board_with_bottom_row(bottom: &str) -> Grid {
        let mut rows: Vec<String> = (1..8).rev().map(|y| filler_row(8, y)).collect();
        rows.push(bottom.to_string());
        let refs: Vec<&str> = rows.iter().map(String::as_str).collect();
        Grid::from_pattern(&refs).unwrap()
    }

    #[test]
    fn test_filler_has_no_matches() {
        let mut grid = board_with_bottom_row(&filler_row(8, 0));
        assert!(!scan_board(&mut grid).unwrap().has_match());
    }

    #[test]
    fn test_three_in_row_after_pair() {
        let mut grid = board_with_bottom_row("RRBRRRBB");
        let scan = scan_board(&mut grid).unwrap();
        assert_eq!(scan.matches().len(), 1);
        let m = &scan.matches()[0];
        assert_eq!(m.direction, MatchDirection::Horizontal);
        assert_eq!(m.color, Color::Red);
        assert_eq!(m.len(), 3);
        for x in 3..6 {
            assert!(m.contains(Position::new(x, 0)));
        }
        assert!(!m.contains(Position::new(0, 0)));
        assert!(!grid.token(Position::new(1, 0)).unwrap().is_matched());
        assert!(grid.token(Position::new(4, 0)).unwrap().is_matched());
    }

    #[test]
    fn test_long_horizontal() {
        let mut grid = board_with_bottom_row("BRRRRRBB");
        let scan = scan_board(&mut grid).unwrap();
        assert_eq!(scan.matches().len(), 1);
        assert_eq!(scan.matches()[0].direction, MatchDirection::LongHorizontal);
        assert_eq!(scan.matches()[0].len(), 5);
    }

    #[test]
    fn test_vertical_and_long_vertical() {
        let mut grid = Grid::from_pattern(&["RGB", "RBG", "RGB"]).unwrap();
        let scan = scan_board(&mut grid).unwrap();
        assert_eq!(scan.matches().len(), 1);
        assert_eq!(scan.matches()[0].direction, MatchDirection::Vertical);

        let mut grid = Grid::from_pattern(&["RG", "RB", "RG", "RB"]).unwrap();
        let scan = scan_board(&mut grid).unwrap();
        assert_eq!(scan.matches()[0].direction, MatchDirection::LongVertical);
        assert_eq!(scan.matches()[0].len(), 4);
    }

    #[test]
    fn test_blocked_cell_breaks_run() {
        let mut grid = Grid::from_pattern(&["RR#RR"]).unwrap();
        assert!(!scan_board(&mut grid).unwrap().has_match());
    }

    #[test]
    fn test_horizontal_wins_tie() {
        // L shape seeded at its corner: only the horizontal arm is a run from (0, 0).
        let grid = Grid::from_pattern(&["RGB", "RBG", "RRR"]).unwrap();
        let result = is_connected(&grid, Position::new(0, 0)).unwrap();
        assert_eq!(result.direction, MatchDirection::Horizontal);
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_is_connected_none_keeps_seed() {
        let grid = Grid::from_pattern(&["RG", "GR"]).unwrap();
        let result = is_connected(&grid, Position::new(0, 0)).unwrap();
        assert_eq!(result.direction, MatchDirection::None);
        assert_eq!(result.positions, vec![Position::new(0, 0)]);
    }

    #[test]
    fn test_scan_is_idempotent() {
        let mut grid = board_with_bottom_row("RRRBBBGG");
        let first = scan_board(&mut grid).unwrap();
        let second = scan_board(&mut grid).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.removal_set().len(), 6);
    }

    #[test]
    fn test_removal_set_has_no_duplicates() {
        let mut grid = Grid::from_pattern(&["RRR", "RGB", "RBG"]).unwrap();
        let scan = scan_board(&mut grid).unwrap();
        let mut removal = scan.removal_set();
        let n = removal.len();
        removal.sort();
        removal.dedup();
        assert_eq!(removal.len(), n);
        assert_eq!(n, 5);
    }

    #[test]
    fn test_scan_rejects_empty_cell() {
        let mut grid = Grid::from_pattern(&["R.R"]).unwrap();
        assert!(matches!(
            scan_board(&mut grid),
            Err(EngineError::EmptyCellAccessed(_))
        ));
    }
}
