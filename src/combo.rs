//! Combo resolution: upgrades a straight run to a T, L or plus shape.

use crate::error::EngineError;
use crate::grid::Grid;
use crate::matcher::{MatchDirection, MatchResult, walk};

/// Perpendicular neighbours a single run token needs to form a combo.
pub const MIN_EXTENSION: usize = 2;

/// Probe across the run from each of its tokens, in run order.
///
/// The first token with at least [`MIN_EXTENSION`] contiguous same-colour,
/// unmatched neighbours on the perpendicular axis turns the result into a
/// `Combo` holding the run plus that extension. Later tokens are not probed.
/// Results without a qualifying token come back unchanged.
pub fn resolve_combo(grid: &Grid, result: MatchResult) -> Result<MatchResult, EngineError> {
    let probes: [(i8, i8); 2] = if result.direction.is_horizontal() {
        [(0, 1), (0, -1)]
    } else if result.direction.is_vertical() {
        [(1, 0), (-1, 0)]
    } else {
        return Ok(result);
    };

    for &pos in &result.positions {
        let mut extension = Vec::new();
        for probe in probes {
            walk(grid, pos, result.color, probe, &mut extension)?;
        }
        if extension.len() >= MIN_EXTENSION {
            crate::vlog!(
                "{:?} run of {} becomes a combo at {}",
                result.direction,
                result.len(),
                pos
            );
            let mut positions = result.positions.clone();
            positions.extend(extension);
            return Ok(MatchResult {
                positions,
                direction: MatchDirection::Combo,
                color: result.color,
            });
        }
    }
    Ok(result)
}
