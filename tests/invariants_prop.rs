//! Property tests for the piece, collision, line-clear and game invariants.
//!
//! - Translation is a pure shift and composes additively.
//! - `can_place` agrees with a cell-by-cell occupancy check.
//! - Collapsing a row shifts everything above it down by exactly one.
//! - Accepted moves always fit, walls survive random play and the score never drops.

use proptest::prelude::*;
use std::collections::HashSet;
use wellblocks::collision::can_place;
use wellblocks::{
    BlockColor, Command, GameConfig, GameState, Piece, Pos, RandomShapes, Shape, Status, Well,
};

const W: u16 = 10;
const H: u16 = 20;

fn shape() -> impl Strategy<Value = Shape> {
    prop::sample::select(Shape::ALL.to_vec())
}

fn settled() -> impl Strategy<Value = HashSet<Pos>> {
    prop::collection::hash_set((1..=i32::from(W), 0..i32::from(H)), 0..120)
}

fn command() -> impl Strategy<Value = Option<Command>> {
    prop::sample::select(vec![
        None,
        Some(Command::Left),
        Some(Command::Right),
        Some(Command::Down),
        Some(Command::Rotate),
    ])
}

fn well_with(cells: &HashSet<Pos>) -> Well {
    let mut well = Well::new(W, H);
    for &pos in cells {
        well.set(pos, BlockColor::Cyan);
    }
    well
}

fn wall_count(well: &Well) -> usize {
    well.iter().filter(|&(_, c)| c == BlockColor::Wall).count()
}

proptest! {
    #[test]
    fn translation_composes(
        shape in shape(),
        a in -8i32..8, b in -8i32..8, c in -8i32..8, d in -8i32..8,
    ) {
        let piece = Piece::spawn(shape);
        prop_assert_eq!(piece.translate(0, 0), piece);
        prop_assert_eq!(piece.translate(a, b).translate(c, d), piece.translate(a + c, b + d));
        let moved = piece.translate(a, b);
        for (before, after) in piece.cells().iter().zip(moved.cells()) {
            prop_assert_eq!((before.0 + a, before.1 + b), *after);
        }
    }

    #[test]
    fn rotation_keeps_four_distinct_cells(
        shape in shape(),
        dcol in -6i32..6,
        drow in -3i32..25,
        turns in 1usize..8,
    ) {
        let mut piece = Piece::spawn(shape).translate(dcol, drow);
        for _ in 0..turns {
            piece = piece.rotate();
            let distinct: HashSet<Pos> = piece.cells().iter().copied().collect();
            prop_assert_eq!(distinct.len(), 4);
            prop_assert_eq!(piece.shape(), shape);
        }
    }

    #[test]
    fn can_place_matches_occupancy(
        cells in settled(),
        shape in shape(),
        dcol in -7i32..7,
        drow in -3i32..22,
    ) {
        let well = well_with(&cells);
        let piece = Piece::spawn(shape);
        let expected = piece
            .cells()
            .iter()
            .all(|&(col, row)| !well.is_occupied((col + dcol, row + drow)));
        prop_assert_eq!(can_place(&well, &piece, dcol, drow), expected);
        prop_assert_eq!(
            can_place(&well, &piece.translate(dcol, drow), 0, 0),
            expected
        );
    }

    #[test]
    fn collapse_shifts_rows_above_by_one(cells in settled(), row in 0i32..20) {
        let before = well_with(&cells);
        let mut after = before.clone();
        after.collapse(row);

        prop_assert!(after.row(0).iter().all(Option::is_none));
        for r in 1..=row {
            prop_assert_eq!(after.row(r), before.row(r - 1));
        }
        for r in row + 1..i32::from(H) {
            prop_assert_eq!(after.row(r), before.row(r));
        }
        prop_assert_eq!(wall_count(&after), wall_count(&before));
    }

    #[test]
    fn random_play_keeps_invariants(
        seed in any::<u64>(),
        commands in prop::collection::vec(command(), 1..400),
    ) {
        let config = GameConfig { seed: Some(seed), ..GameConfig::default() };
        let mut game =
            GameState::with_shapes(&config, Box::new(RandomShapes::new(config.seed)));
        game.apply(Command::Restart);
        let walls = wall_count(&game.well);

        for command in commands {
            let score = game.score;
            let was_over = game.status == Status::GameOver;
            match command {
                Some(command) => {
                    if game.apply(command) {
                        prop_assert!(can_place(&game.well, &game.piece, 0, 0));
                    }
                }
                None => {
                    game.tick();
                }
            }

            prop_assert!(game.score >= score);
            prop_assert!(game.score <= score + 1);
            prop_assert_eq!(wall_count(&game.well), walls);
            if was_over {
                prop_assert_eq!(game.status, Status::GameOver);
            }
        }
    }
}
