//! Terminal input module.
//!
//! Maps `crossterm` key events onto [`crate::types::GameAction`]. The game
//! core never sees key codes; it only receives actions.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, should_quit};
