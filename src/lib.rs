//! Wellblocks: falling-block well simulation and L-system plant generators.
//!
//! The library holds the game rules only; the terminal front end lives in the binary.

pub mod collision;
pub mod config;
pub mod game;
pub mod line_clear;
pub mod lsystem;
pub mod piece;
pub mod well;

pub use config::{ConfigError, GameConfig};
pub use game::{Command, GameState, Status, TickReport};
pub use piece::{Piece, RandomShapes, Shape, ShapeCycle, ShapeSource};
pub use well::{BlockColor, Pos, Well};
