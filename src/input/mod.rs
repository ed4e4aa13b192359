//! Interchangeable input sources
//!
//! Every source fills a FIFO action buffer from its own events and exposes it
//! through [`InputSource::drain`]. The game loop drains exactly once per
//! frame; the engine never knows which source produced the batch.

pub mod pitch;

#[cfg(target_arch = "wasm32")]
pub mod keyboard;
#[cfg(target_arch = "wasm32")]
pub mod touch;
#[cfg(target_arch = "wasm32")]
pub mod voice;

#[cfg(target_arch = "wasm32")]
pub use keyboard::KeyboardInput;
#[cfg(target_arch = "wasm32")]
pub use touch::TouchInput;
#[cfg(target_arch = "wasm32")]
pub use voice::VoiceInput;

use crate::sim::Action;

/// Uniform capability interface over keyboard, touch and voice input
pub trait InputSource {
    /// Take the actions buffered since the last call, emptying the buffer
    /// atomically. Arrival order is preserved.
    fn drain(&self) -> Vec<Action>;
}
