//! Player preferences
//!
//! The single persisted flag: which input source drives the game. Stored in
//! LocalStorage on the web, defaults everywhere else.

use serde::{Deserialize, Serialize};

/// Selectable input sources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InputKind {
    #[default]
    Keyboard,
    Touch,
    Voice,
}

impl InputKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputKind::Keyboard => "keyboard",
            InputKind::Touch => "touch",
            InputKind::Voice => "voice",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "keyboard" | "keys" => Some(InputKind::Keyboard),
            "touch" | "tap" => Some(InputKind::Touch),
            "voice" | "mic" => Some(InputKind::Voice),
            _ => None,
        }
    }
}

/// Persisted preferences
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    pub input: InputKind,
}

impl Settings {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "flappy_bubble_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage
            && let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY)
            && let Ok(settings) = serde_json::from_str(&json)
        {
            log::info!("loaded settings from LocalStorage");
            return settings;
        }

        log::info!("using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage
            && let Ok(json) = serde_json::to_string(self)
        {
            let _ = storage.set_item(Self::STORAGE_KEY, &json);
            log::info!("settings saved");
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_kind_round_trips() {
        for kind in [InputKind::Keyboard, InputKind::Touch, InputKind::Voice] {
            assert_eq!(InputKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(InputKind::from_str("MIC"), Some(InputKind::Voice));
        assert_eq!(InputKind::from_str("gamepad"), None);
    }
}
