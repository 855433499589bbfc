use gemgrid::matcher::scan_board;
use gemgrid::{
    BoardConfig, BoardEvent, Grid, LayoutMask, Position, SelectionState, Session, SessionRng,
    SwapOutcome, TokenId, TurnTracker,
};

#[derive(Debug, Default)]
struct Turns {
    calls: Vec<(usize, bool)>,
}

impl TurnTracker for Turns {
    fn process_turn(&mut self, cleared: usize, subtract_moves: bool) {
        self.calls.push((cleared, subtract_moves));
    }
}

fn new_session(config: BoardConfig, seed: u64) -> Session<SessionRng, Turns> {
    Session::new(config, SessionRng::new(seed), Turns::default()).unwrap()
}

fn id_at(grid: &Grid, x: usize, y: usize) -> Option<TokenId> {
    grid.token(Position::new(x, y)).map(|t| t.id())
}

fn assert_settled(grid: &Grid) {
    assert!(grid.is_full());
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let pos = Position::new(x, y);
            if let Some(token) = grid.token(pos) {
                assert_eq!(token.position(), pos);
                assert!(!token.is_matched());
            }
        }
    }
    let mut ids: Vec<TokenId> = grid.tokens().map(|t| t.id()).collect();
    let n = ids.len();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), n);
}

/// Every horizontal and vertical neighbour pair on the board.
fn adjacent_pairs(width: usize, height: usize) -> Vec<(Position, Position)> {
    let mut pairs = Vec::new();
    for y in 0..height {
        for x in 0..width {
            if x + 1 < width {
                pairs.push((Position::new(x, y), Position::new(x + 1, y)));
            }
            if y + 1 < height {
                pairs.push((Position::new(x, y), Position::new(x, y + 1)));
            }
        }
    }
    pairs
}

#[test]
fn test_fresh_boards_have_no_matches() {
    for seed in 0..50 {
        let session = new_session(BoardConfig::default(), seed);
        let mut grid = session.grid().clone();
        assert!(!scan_board(&mut grid).unwrap().has_match(), "seed {}", seed);
        assert_settled(session.grid());
    }
}

#[test]
fn test_every_swap_keeps_invariants() {
    for seed in 0..10 {
        let mut session = new_session(BoardConfig::default(), seed);
        for (a, b) in adjacent_pairs(8, 8) {
            let before = session.grid().colors();
            let turns_before = session.tracker().calls.len();
            let ia = id_at(session.grid(), a.x, a.y);
            let ib = id_at(session.grid(), b.x, b.y);
            let (Some(ia), Some(ib)) = (ia, ib) else {
                continue;
            };
            match session.attempt_swap(ia, ib).unwrap() {
                SwapOutcome::Reverted { events } => {
                    assert_eq!(session.grid().colors(), before);
                    assert_eq!(session.grid().find(ia), Some(a));
                    assert_eq!(events.len(), 4);
                    assert_eq!(session.tracker().calls.len(), turns_before);
                }
                SwapOutcome::Accepted { cascade, .. } => {
                    assert!(cascade.cleared >= 3);
                    assert_eq!(
                        session.tracker().calls.last(),
                        Some(&(cascade.cleared, true))
                    );
                    let removed = cascade
                        .events
                        .iter()
                        .filter(|e| matches!(e, BoardEvent::Removed { .. }))
                        .count();
                    let spawned = cascade
                        .events
                        .iter()
                        .filter(|e| matches!(e, BoardEvent::Spawned { .. }))
                        .count();
                    assert_eq!(removed, cascade.cleared);
                    assert_eq!(spawned, cascade.cleared);
                }
            }
            assert_eq!(session.state(), SelectionState::Idle);
            assert_settled(session.grid());
            let mut grid = session.grid().clone();
            assert!(!scan_board(&mut grid).unwrap().has_match());
        }
    }
}

#[test]
fn test_non_adjacent_pairs_are_no_ops() {
    let mut session = new_session(BoardConfig::default(), 4);
    let before = session.grid().colors();
    let origin = id_at(session.grid(), 3, 3).unwrap();
    for y in 0..8 {
        for x in 0..8 {
            if Position::new(3, 3).manhattan(Position::new(x, y)) == 1 {
                continue;
            }
            let other = id_at(session.grid(), x, y).unwrap();
            assert!(session.attempt_swap(origin, other).is_err());
        }
    }
    assert_eq!(session.grid().colors(), before);
    assert!(session.tracker().calls.is_empty());
}

#[test]
fn test_same_seed_same_game() {
    let play = |seed: u64| {
        let mut session = new_session(BoardConfig::default(), seed);
        let mut outcomes = Vec::new();
        for (a, b) in adjacent_pairs(8, 8).into_iter().take(40) {
            session.select_at(a).unwrap();
            let selection = session.select_at(b).unwrap();
            outcomes.push(selection.swap.map(|s| s.cleared()));
        }
        (session.snapshot().to_string(), outcomes)
    };
    assert_eq!(play(21), play(21));
}

#[test]
fn test_blocked_cells_survive_cascades() {
    let layout = LayoutMask::parse(
        "#......#\n\
         ........\n\
         ...##...\n\
         ........\n\
         ........\n\
         ...##...\n\
         ........\n\
         #......#\n",
    )
    .unwrap();
    let blocked: Vec<Position> = (0..8)
        .flat_map(|y| (0..8).map(move |x| Position::new(x, y)))
        .filter(|p| layout.is_blocked(p.x, p.y))
        .collect();
    assert_eq!(blocked.len(), 8);

    for seed in 0..5 {
        let mut session = new_session(BoardConfig::with_layout(layout.clone()), seed);
        for (a, b) in adjacent_pairs(8, 8) {
            session.select_at(a).unwrap();
            session.select_at(b).unwrap();
            if let SelectionState::AwaitingSecondSelection(pending) = session.state() {
                session.try_select(pending).unwrap();
            }
            for &p in &blocked {
                assert!(session.grid().is_blocked(p));
            }
            assert_settled(session.grid());
        }
    }
}
