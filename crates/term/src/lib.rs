//! Terminal presentation layer.
//!
//! Renders a [`core::GameSnapshot`] into a framebuffer of styled characters
//! and flushes it to a crossterm terminal. Nothing here mutates game state.
//!
//! - [`fb`]: framebuffer and styles
//! - [`game_view`]: snapshot -> framebuffer layout (pure, testable)
//! - [`renderer`]: row-diffing crossterm output

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{piece_color, GameView, Viewport};
pub use renderer::{encode_frame_into, TerminalRenderer};
