//! Game state: well, active piece, score, status and the tick that drives them.

use crate::collision::can_place;
use crate::config::GameConfig;
use crate::piece::{Piece, RandomShapes, ShapeSource};
use crate::well::Well;
use tracing::{debug, info};

/// Session status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Waiting for the start signal; nothing falls.
    Paused,
    Running,
    /// A freshly spawned piece overlapped the stack. Only a restart leaves this state.
    GameOver,
}

/// Player commands the game understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Left,
    Right,
    Down,
    Rotate,
    /// Start from the paused state, or start over from anywhere.
    Restart,
}

/// What happened during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// The piece moved down one row.
    pub moved: bool,
    /// The piece locked into the well and a new one spawned.
    pub locked: bool,
    /// Row that was found full and collapsed.
    pub cleared_row: Option<i32>,
    /// This tick ended the game.
    pub game_over: bool,
}

/// One game session. Owns the well, the falling piece and the shape source.
#[derive(Debug)]
pub struct GameState {
    pub well: Well,
    pub piece: Piece,
    pub score: u32,
    pub status: Status,
    /// Pieces locked since the last restart.
    pub pieces_locked: u32,
    frame_sample: u64,
    shapes: Box<dyn ShapeSource>,
}

impl GameState {
    /// Random shapes, seeded from the config when it carries a seed.
    pub fn new(config: &GameConfig) -> Self {
        Self::with_shapes(config, Box::new(RandomShapes::new(config.seed)))
    }

    pub fn with_shapes(config: &GameConfig, mut shapes: Box<dyn ShapeSource>) -> Self {
        let well = Well::new(config.width, config.height);
        let piece = Piece::spawn_in(shapes.next_shape(), well.width());
        Self {
            well,
            piece,
            score: 0,
            status: Status::Paused,
            pieces_locked: 0,
            frame_sample: config.frame_sample.max(1),
            shapes,
        }
    }

    #[inline]
    pub fn frame_sample(&self) -> u64 {
        self.frame_sample
    }

    /// Change fall speed mid-game.
    pub fn set_frame_sample(&mut self, frame_sample: u64) {
        self.frame_sample = frame_sample.max(1);
    }

    /// Session initialization: walls only, score 0, a new piece, running.
    pub fn restart(&mut self) {
        self.well.reset();
        self.score = 0;
        self.pieces_locked = 0;
        self.piece = self.spawn_next();
        self.status = Status::Running;
        info!(shape = ?self.piece.shape(), "session started");
    }

    /// Called once per rendered frame; ticks on every `frame_sample`th frame.
    pub fn on_frame(&mut self, frame_count: u64) -> Option<TickReport> {
        if self.status != Status::Running || frame_count % self.frame_sample != 0 {
            return None;
        }
        Some(self.tick())
    }

    /// Move the piece down, or lock it and spawn the next one. Then clear at most one row.
    pub fn tick(&mut self) -> TickReport {
        let mut report = TickReport::default();
        if self.status != Status::Running {
            return report;
        }

        if can_place(&self.well, &self.piece, 0, 1) {
            self.piece = self.piece.translate(0, 1);
            report.moved = true;
        } else {
            self.lock_piece();
            report.locked = true;
            if !can_place(&self.well, &self.piece, 0, 0) {
                self.status = Status::GameOver;
                report.game_over = true;
                info!(
                    score = self.score,
                    pieces = self.pieces_locked,
                    "game over"
                );
            }
        }

        if let Some(row) = self.well.find_full_row() {
            self.well.collapse(row);
            self.score += 1;
            report.cleared_row = Some(row);
            info!(row, score = self.score, "row cleared");
        }
        report
    }

    fn lock_piece(&mut self) {
        self.well.merge(&self.piece);
        self.pieces_locked += 1;
        debug!(shape = ?self.piece.shape(), cells = ?self.piece.cells(), "piece locked");
        self.piece = self.spawn_next();
    }

    fn spawn_next(&mut self) -> Piece {
        Piece::spawn_in(self.shapes.next_shape(), self.well.width())
    }

    /// Apply a player command. Moves the piece only if the result fits; otherwise nothing
    /// happens. Returns whether anything changed.
    pub fn apply(&mut self, command: Command) -> bool {
        if command == Command::Restart {
            self.restart();
            return true;
        }
        if self.status != Status::Running {
            return false;
        }
        let candidate = match command {
            Command::Left => self.piece.translate(-1, 0),
            Command::Right => self.piece.translate(1, 0),
            Command::Down => self.piece.translate(0, 1),
            Command::Rotate => self.piece.rotate(),
            Command::Restart => return false,
        };
        self.try_replace(candidate)
    }

    fn try_replace(&mut self, candidate: Piece) -> bool {
        if can_place(&self.well, &candidate, 0, 0) {
            self.piece = candidate;
            true
        } else {
            false
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == Status::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::{Shape, ShapeCycle};
    use crate::well::BlockColor;

    fn game_with(shapes: &[Shape]) -> GameState {
        GameState::with_shapes(
            &GameConfig::default(),
            Box::new(ShapeCycle::new(shapes.iter().copied())),
        )
    }

    #[test]
    fn test_starts_paused_and_ignores_ticks() {
        let mut game = game_with(&[Shape::T]);
        assert_eq!(game.status, Status::Paused);
        let before = game.piece;
        assert_eq!(game.tick(), TickReport::default());
        assert!(!game.apply(Command::Left));
        assert_eq!(game.piece, before);
    }

    #[test]
    fn test_restart_runs() {
        let mut game = game_with(&[Shape::T]);
        game.apply(Command::Restart);
        assert_eq!(game.status, Status::Running);
        assert_eq!(game.piece, Piece::spawn(Shape::T));
        let report = game.tick();
        assert!(report.moved);
        assert_eq!(game.piece, Piece::spawn(Shape::T).translate(0, 1));
    }

    #[test]
    fn test_on_frame_samples_every_nth_frame() {
        let mut game = game_with(&[Shape::O]);
        game.restart();
        let ticks = (1..=36).filter_map(|f| game.on_frame(f)).count();
        assert_eq!(ticks, 3);
        assert_eq!(game.piece.top_row(), 3);
    }

    #[test]
    fn test_set_frame_sample_changes_speed() {
        let mut game = game_with(&[Shape::O]);
        game.restart();
        game.set_frame_sample(0);
        assert_eq!(game.frame_sample(), 1);
        game.set_frame_sample(4);
        let ticks = (1..=12).filter_map(|f| game.on_frame(f)).count();
        assert_eq!(ticks, 3);
    }

    #[test]
    fn test_wide_well_spawns_centred() {
        let config = GameConfig {
            width: 20,
            ..GameConfig::default()
        };
        let mut game = GameState::with_shapes(&config, Box::new(ShapeCycle::new([Shape::I])));
        game.restart();
        assert_eq!(game.piece.cells(), &[(9, 0), (10, 0), (11, 0), (12, 0)]);
        while game.apply(Command::Down) {}
        assert!(game.tick().locked);
        assert_eq!(game.piece, Piece::spawn_in(Shape::I, 20));
        assert_eq!(game.well.get((9, 19)), Some(BlockColor::Red));
    }

    #[test]
    fn test_left_stops_at_wall() {
        let mut game = game_with(&[Shape::I]);
        game.restart();
        for _ in 0..3 {
            assert!(game.apply(Command::Left));
        }
        assert!(!game.apply(Command::Left));
        assert_eq!(game.piece.cells(), &[(1, 0), (2, 0), (3, 0), (4, 0)]);
    }

    #[test]
    fn test_right_stops_at_wall() {
        let mut game = game_with(&[Shape::O]);
        game.restart();
        for _ in 0..3 {
            assert!(game.apply(Command::Right));
        }
        assert!(!game.apply(Command::Right));
        assert_eq!(game.piece.cells()[1], (10, 0));
    }

    #[test]
    fn test_blocked_rotation_is_ignored() {
        let mut game = game_with(&[Shape::I]);
        game.restart();
        game.well.set((5, 2), BlockColor::Red);
        let before = game.piece;
        assert!(!game.apply(Command::Rotate));
        assert_eq!(game.piece, before);
        game.well.remove((5, 2));
        assert!(game.apply(Command::Rotate));
        assert_eq!(game.piece, before.rotate());
    }

    #[test]
    fn test_soft_drop_never_locks() {
        let mut game = game_with(&[Shape::I]);
        game.restart();
        let mut moves = 0;
        while game.apply(Command::Down) {
            moves += 1;
        }
        assert_eq!(moves, 19);
        assert_eq!(game.pieces_locked, 0);
        assert_eq!(game.well.settled_count(), 0);
    }

    #[test]
    fn test_lock_merges_and_spawns_next() {
        // The first shape goes to the pre-start piece; restart draws the I.
        let mut game = game_with(&[Shape::T, Shape::I]);
        game.restart();
        assert_eq!(game.piece.shape(), Shape::I);
        while game.apply(Command::Down) {}
        let report = game.tick();
        assert!(report.locked);
        assert!(!report.moved);
        assert_eq!(game.well.get((4, 19)), Some(BlockColor::Red));
        assert_eq!(game.piece, Piece::spawn(Shape::T));
        assert_eq!(game.pieces_locked, 1);
    }

    #[test]
    fn test_full_rows_clear_one_per_tick() {
        let mut game = game_with(&[Shape::O]);
        game.restart();
        for row in [18, 19] {
            for col in 1..=10 {
                game.well.set((col, row), BlockColor::Blue);
            }
        }
        assert_eq!(game.tick().cleared_row, Some(18));
        assert_eq!(game.score, 1);
        // Row 19 was below the collapse and is still full.
        assert_eq!(game.tick().cleared_row, Some(19));
        assert_eq!(game.score, 2);
        assert_eq!(game.tick().cleared_row, None);
        assert_eq!(game.well.settled_count(), 0);
    }
}
