//! Game settings and preferences
//!
//! Currently just the visual theme. The two shipped looks share every
//! gameplay constant; only the renderer's palette differs.

use serde::{Deserialize, Serialize};

use crate::platform::KvStore;

/// Storage key for persisted settings
pub const SETTINGS_KEY: &str = "snake-settings";

/// Visual theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Theme {
    #[default]
    Classic,
    Cyberpunk,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Classic => "Classic",
            Theme::Cyberpunk => "Cyberpunk",
        }
    }

    /// The other theme, for a toggle button
    pub fn toggled(&self) -> Self {
        match self {
            Theme::Classic => Theme::Cyberpunk,
            Theme::Cyberpunk => Theme::Classic,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Settings {
    pub theme: Theme,
}

impl Settings {
    /// Load settings; anything missing or unparsable yields the defaults.
    pub fn load<S: KvStore>(store: &S) -> Self {
        match store.get(SETTINGS_KEY) {
            Some(json) => match serde_json::from_str(&json) {
                Ok(settings) => settings,
                Err(_) => {
                    log::warn!("Stored settings are unreadable, using defaults");
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }

    /// Persist settings. Failure is logged and ignored.
    pub fn save<S: KvStore>(&self, store: &mut S) {
        match serde_json::to_string(self) {
            Ok(json) => {
                if !store.set(SETTINGS_KEY, &json) {
                    log::warn!("Failed to persist settings");
                }
            }
            Err(e) => log::warn!("Failed to serialize settings: {}", e),
        }
    }
}
