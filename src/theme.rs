// Theme preference.
// Light/dark choice persisted in its own slot and reflected onto the page root.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use log::{debug, warn};

use crate::cache::KeyValueStore;
use crate::error::{FolioError, Result};

/// Slot holding the theme preference.
pub const THEME_KEY: &str = "theme-preference";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Label of the toggle button: what pressing it switches to.
    pub fn button_label(&self) -> &'static str {
        match self {
            Theme::Dark => "☀️",
            Theme::Light => "🌙",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(FolioError::Other(format!("Unknown theme: {}", other))),
        }
    }
}

/// Reads and writes the theme slot.
pub struct ThemeStore<'a, S: KeyValueStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: KeyValueStore + ?Sized> ThemeStore<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// The stored preference, `Light` when nothing usable is stored.
    pub fn load(&self) -> Theme {
        match self.store.get(THEME_KEY) {
            Ok(Some(value)) => value.parse().unwrap_or_else(|e| {
                warn!("Ignoring stored theme: {}", e);
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(e) => {
                warn!("Error reading theme preference: {}", e);
                Theme::default()
            }
        }
    }

    pub fn save(&self, theme: Theme) -> Result<()> {
        debug!("Saving theme preference: {}", theme);
        self.store.set(THEME_KEY, theme.as_str())
    }

    /// Flip the stored theme and return the new one.
    pub fn toggle(&self) -> Result<Theme> {
        let theme = self.load().toggled();
        self.save(theme)?;
        Ok(theme)
    }
}
