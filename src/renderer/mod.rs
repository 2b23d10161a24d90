//! Rendering module
//!
//! `frame` builds a surface-independent command list each frame; `canvas`
//! replays it onto an HTML canvas in the browser.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod frame;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSink;
pub use frame::{DrawCommand, DrawSink, Frame, Hud, Rgba, build_frame};
