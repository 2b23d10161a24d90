//! Platform abstraction layer
//!
//! Browser-independent pieces of the host loop:
//! - Keyboard state (key names to movement flags)
//! - Animation-frame timing (timestamps to deltas)

pub mod input;
pub mod time;

pub use input::KeyState;
pub use time::FrameClock;
