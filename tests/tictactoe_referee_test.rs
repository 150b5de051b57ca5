//! Tests for the referee and game state machine.

use std::collections::HashSet;
use tictactoe_arena::games::tictactoe::{GRID_SIZE, winners};
use tictactoe_arena::{GameState, Grid, Mark, Move, MoveError, Outcome, Referee, Square};

/// Every grid reachable by alternating legal moves from an empty grid,
/// stopping at terminal positions.
fn reachable_grids() -> HashSet<Grid> {
    let mut seen = HashSet::new();
    let mut stack = vec![(Grid::new(), Mark::X)];
    while let Some((grid, mark)) = stack.pop() {
        if !seen.insert(grid.clone()) {
            continue;
        }
        if Referee::evaluate(&grid).is_terminal() {
            continue;
        }
        for (row, col, sq) in grid.cells() {
            if sq == Square::Empty {
                let mut next = grid.clone();
                Referee::apply(&mut next, Move::new(row, col), mark).expect("Empty cell");
                stack.push((next, mark.opponent()));
            }
        }
    }
    seen
}

#[test]
fn test_reachable_grids_have_at_most_one_winner() {
    let grids = reachable_grids();
    // 5478 legal positions in tic-tac-toe.
    assert_eq!(grids.len(), 5478);
    for grid in &grids {
        assert!(winners(grid).len() <= 1, "Two winners on\n{}", grid);
    }
}

#[test]
fn test_validate_rejects_out_of_bounds_everywhere() {
    for grid in reachable_grids().iter().take(500) {
        for (row, col) in [(3, 0), (0, 3), (3, 3), (usize::MAX, 1), (1, 17)] {
            assert_eq!(
                Referee::validate(grid, Move::new(row, col)),
                Err(MoveError::OutOfBounds { row, col })
            );
        }
    }
}

#[test]
fn test_validate_matches_occupancy() {
    for grid in reachable_grids() {
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                let result = Referee::validate(&grid, Move::new(row, col));
                match grid.get(row, col) {
                    Some(Square::Empty) => assert_eq!(result, Ok(())),
                    _ => assert_eq!(result, Err(MoveError::CellOccupied { row, col })),
                }
            }
        }
    }
}

#[test]
fn test_x_wins_top_row() {
    let mut state = GameState::new();
    let moves = [(0, 0), (1, 0), (0, 1), (2, 1), (0, 2)];
    let mut outcome = Outcome::InProgress;
    for (row, col) in moves {
        outcome = state.play(Move::new(row, col)).expect("Legal move");
    }
    assert_eq!(outcome, Outcome::XWins);
    assert_eq!(Referee::evaluate(state.grid()), Outcome::XWins);
    assert_eq!(state.move_count(), 5);
}

#[test]
fn test_full_board_without_line_is_draw() {
    // X O X / O X O / O X O
    let grid = Grid::from_rows([
        [Some(Mark::X), Some(Mark::O), Some(Mark::X)],
        [Some(Mark::O), Some(Mark::X), Some(Mark::O)],
        [Some(Mark::O), Some(Mark::X), Some(Mark::O)],
    ]);
    assert_eq!(Referee::evaluate(&grid), Outcome::Draw);
}

#[test]
fn test_full_alternating_game_draws() {
    // X O X / X O O / O X X
    let mut state = GameState::new();
    let moves = [
        (0, 0), // X
        (0, 1), // O
        (0, 2), // X
        (1, 1), // O
        (1, 0), // X
        (2, 0), // O
        (2, 1), // X
        (1, 2), // O
        (2, 2), // X
    ];
    let mut outcome = Outcome::InProgress;
    for (row, col) in moves {
        outcome = state.play(Move::new(row, col)).expect("Legal move");
    }
    assert_eq!(outcome, Outcome::Draw);
    assert_eq!(state.move_count(), 9);
    assert_eq!(state.play(Move::new(0, 0)), Err(MoveError::GameOver));
}

#[test]
fn test_rejections_do_not_advance() {
    let mut state = GameState::new();
    state.play(Move::new(0, 0)).unwrap();

    assert_eq!(
        state.play(Move::new(0, 0)),
        Err(MoveError::CellOccupied { row: 0, col: 0 })
    );
    assert_eq!(
        state.play(Move::new(0, 9)),
        Err(MoveError::OutOfBounds { row: 0, col: 9 })
    );
    assert_eq!(state.current_turn(), Mark::O);
    assert_eq!(state.move_count(), 1);
}

#[test]
fn test_cells_are_write_once() {
    let mut grid = Grid::new();
    Referee::apply(&mut grid, Move::new(1, 2), Mark::X).unwrap();
    let err = Referee::apply(&mut grid, Move::new(1, 2), Mark::O).unwrap_err();
    assert!(matches!(err, MoveError::InvalidMove(_)));
    assert_eq!(grid.get(1, 2), Some(Square::Occupied(Mark::X)));
}
