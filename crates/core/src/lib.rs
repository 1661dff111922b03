//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the whole simulation: the board, the shape catalog,
//! placement legality, rotation, scoring and the state machine that ties
//! them together. It has **no dependencies** on terminals, timers or I/O:
//!
//! - **Deterministic**: a seeded [`RandomPieces`] source replays the same game
//! - **Driver-agnostic**: gravity advances only when [`GameState::tick`] is called
//! - **Owned**: every session is a plain value; any number can coexist
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid of locked cells, occupancy queries and row clearing
//! - [`collision`]: the single placement-legality predicate
//! - [`pieces`]: shape catalog, clockwise rotation and the one-column wall kick
//! - [`rng`]: injectable piece sources (seeded uniform random, fixed sequence)
//! - [`scoring`]: line-clear points, drop points, level and gravity curve
//! - [`game_state`]: spawn / move / rotate / drop / lock / clear cycle
//! - [`snapshot`]: read-only copy of everything a renderer needs
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_types::{GameAction, StepOutcome};
//!
//! let mut game = GameState::new(12345);
//! game.reset();
//!
//! game.apply_action(GameAction::MoveRight).unwrap();
//! game.apply_action(GameAction::Rotate).unwrap();
//! assert_eq!(game.hard_drop().unwrap(), StepOutcome::Locked);
//!
//! assert!(game.score() > 0); // hard drop awards 2 points per row
//! ```
//!
//! # Timing
//!
//! The core owns no clock. A driver calls [`GameState::tick`] every
//! [`GameState::fall_interval_ms`] milliseconds and re-reads the interval
//! after each call, since line clears can shorten it.

pub mod board;
pub mod collision;
pub mod error;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use collision::{drop_distance, is_valid_placement};
pub use error::GameError;
pub use game_state::{GameState, Piece};
pub use pieces::{rotate_cw, shape_of, try_rotate, Shape};
pub use rng::{PieceSource, RandomPieces, SequencePieces};
pub use scoring::{calculate_drop_score, calculate_line_score, Progress};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
