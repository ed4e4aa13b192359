//! Rendering: a pure scene adapter plus the wasm canvas 2d backend

pub mod scene;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use scene::{Scene, SpriteInstance, SpriteKind, TextAnchor, TextOverlay, build_scene};

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
