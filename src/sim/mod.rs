//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Seeded RNG only
//! - Driven entirely by caller-supplied timestamps (monotonic by contract)
//! - No rendering or platform dependencies

pub mod action;
pub mod engine;
pub mod geom;
pub mod state;

pub use action::Action;
pub use engine::Engine;
pub use geom::{Rect, pixels_moved, random_int, rects_overlap, rects_overlap_with_tolerance};
pub use state::{Player, ScreenInfo, Timestamps, World, WorldConfig, WorldState};
