//! Removal, gravity and refill.

use crate::error::EngineError;
use crate::events::BoardEvent;
use crate::grid::{Cell, Grid};
use crate::rng::{ColorSource, Palette};
use crate::token::Position;

/// Destroy the tokens at `removal`, let each column fall and spawn replacements.
///
/// Afterwards every free cell is occupied. Returns the removals, falls and
/// spawns in the order they happened.
pub fn remove_and_refill(
    grid: &mut Grid,
    removal: &[Position],
    palette: &Palette,
    source: &mut impl ColorSource,
) -> Result<Vec<BoardEvent>, EngineError> {
    let mut events = Vec::with_capacity(removal.len() * 3);
    for &at in removal {
        let token = grid.take(at)?;
        events.push(BoardEvent::Removed {
            token: token.id(),
            color: token.color(),
            at,
        });
    }
    for x in 0..grid.width() {
        refill_column(grid, x, palette, source, &mut events)?;
    }
    Ok(events)
}

/// Bottom-up pass over one column. Each empty cell takes the nearest token
/// above it; once none is left, new tokens drop in from above the board.
fn refill_column(
    grid: &mut Grid,
    x: usize,
    palette: &Palette,
    source: &mut impl ColorSource,
    events: &mut Vec<BoardEvent>,
) -> Result<(), EngineError> {
    let height = grid.height();
    // Spawned tokens queue up above the top row, one conceptual row each.
    let mut spawn_row = height;
    for y in 0..height {
        let to = Position::new(x, y);
        if !matches!(grid.cell(to), Some(Cell::Empty)) {
            continue;
        }
        if let Some(from) = nearest_token_above(grid, to) {
            let token = grid.settle(from, to)?;
            events.push(BoardEvent::Moved { token, from, to });
        } else {
            let color = source.pick(palette);
            let token = grid.spawn(to, color)?;
            events.push(BoardEvent::Spawned {
                token,
                color,
                from: Position::new(x, spawn_row),
                to,
            });
            spawn_row += 1;
        }
    }
    Ok(())
}

/// Blocked cells are skipped: tokens fall past them.
fn nearest_token_above(grid: &Grid, pos: Position) -> Option<Position> {
    (pos.y + 1..grid.height())
        .map(|y| Position::new(pos.x, y))
        .find(|&p| matches!(grid.cell(p), Some(Cell::Occupied(_))))
}
