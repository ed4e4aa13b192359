//! Discrete input actions
//!
//! The closed set of events an input source may emit. The engine consumes a
//! batch once per tick; only [`Action::Up`] affects the simulation, the rest
//! are accepted and ignored so every source can share one vocabulary.

/// A single buffered input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
}
