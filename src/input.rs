//! Scripted swap requests: `X,Y:X,Y` with y = 0 at the bottom row.

use gemgrid::Position;

/// Two cells to select in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapRequest {
    pub first: Position,
    pub second: Position,
}

/// Parse `"2,0:3,0"`. Used as a clap value parser, hence the `String` error.
pub fn parse_swap(s: &str) -> Result<SwapRequest, String> {
    let (a, b) = s
        .split_once(':')
        .ok_or_else(|| format!("expected X,Y:X,Y, got '{}'", s))?;
    Ok(SwapRequest {
        first: parse_position(a)?,
        second: parse_position(b)?,
    })
}

fn parse_position(s: &str) -> Result<Position, String> {
    let (x, y) = s
        .trim()
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{}'", s))?;
    let x = x
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("bad column '{}': {}", x, e))?;
    let y = y
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("bad row '{}': {}", y, e))?;
    Ok(Position::new(x, y))
}
