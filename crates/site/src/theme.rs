//! Light/dark theme preference.

use clinic_core::config::SiteConfig;
use serde::{Deserialize, Serialize};

use crate::storage::PreferenceStore;

/// Current storage key.
pub const STORAGE_KEY: &str = "theme-preference";
/// Key written by earlier versions of the site; read but never written.
pub const LEGACY_STORAGE_KEY: &str = "theme";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    /// Parse a stored value. Anything but `light`/`dark` is rejected.
    pub fn from_stored(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

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
}

/// Applies and persists the page theme.
pub struct ThemeController<S: PreferenceStore> {
    store: S,
    theme: Theme,
}

impl<S: PreferenceStore> ThemeController<S> {
    /// Restore the stored theme, or use `default` when none is stored.
    pub fn new(store: S, default: Theme) -> Self {
        let theme = Self::stored_theme(&store).unwrap_or(default);
        Self { store, theme }
    }

    pub fn from_config(store: S, config: &SiteConfig) -> Self {
        let default = Theme::from_stored(&config.default_theme).unwrap_or_else(|| {
            tracing::warn!(value = %config.default_theme, "Unknown default theme, using dark");
            Theme::Dark
        });
        Self::new(store, default)
    }

    fn stored_theme(store: &S) -> Option<Theme> {
        [STORAGE_KEY, LEGACY_STORAGE_KEY].iter().find_map(|key| {
            store
                .get(key)
                .ok()
                .flatten()
                .and_then(|value| Theme::from_stored(&value))
        })
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Value of the root element's `data-theme` attribute.
    pub fn data_attribute(&self) -> &'static str {
        self.theme.as_str()
    }

    /// Accessible label of the toggle button.
    pub fn toggle_label(&self) -> &'static str {
        self.theme.as_str()
    }

    /// Flip the theme and persist it. Storage failures are logged only.
    pub fn toggle(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        if let Err(e) = self.store.set(STORAGE_KEY, self.theme.as_str()) {
            tracing::warn!(error = %e, "Failed to persist theme preference");
        }
        self.theme
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
