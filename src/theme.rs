//! Light/dark theme selection and persistence.
//!
//! The active theme is resolved once at startup from, in order: the stored
//! preference, the environment's `prefers-color-scheme`, and finally light.
//! After that only [`ThemeController::toggle`] changes it.
//!
//! TRADE-OFFS
//! ==========
//! Storage is best-effort. A throwing or missing store reads as "no stored
//! preference" and a failed write is logged and forgotten; the toggle still
//! takes visual effect for the current page.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use crate::element::ElementHandle;
use crate::error::ChromeError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The literal persisted to storage.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Client-side key-value storage (`localStorage` in the browser).
pub trait PreferenceStore {
    /// # Errors
    ///
    /// Returns an error when the storage backend is unavailable or throws.
    fn load(&self, key: &str) -> Result<Option<String>, ChromeError>;

    /// # Errors
    ///
    /// Returns an error when the storage backend is unavailable or throws.
    fn save(&self, key: &str, value: &str) -> Result<(), ChromeError>;
}

/// The environment's reported color-scheme preference.
pub trait ColorSchemeQuery {
    /// # Errors
    ///
    /// Returns an error when the media query cannot be evaluated.
    fn prefers_dark(&self) -> Result<bool, ChromeError>;
}

/// Whatever displays the theme: the root marker plus any toggle controls.
pub trait ThemeTarget {
    /// # Errors
    ///
    /// Returns an error when the marker or a control could not be updated.
    fn apply(&mut self, theme: Theme) -> Result<(), ChromeError>;
}

/// Dark-mode class on the root element plus `aria-pressed` on each toggle
/// control, so every control shows the same state as the marker.
pub struct ElementThemeTarget<E> {
    root: E,
    dark_class: String,
    controls: Vec<E>,
}

impl<E> ElementThemeTarget<E> {
    #[must_use]
    pub fn new(root: E, dark_class: &str, controls: Vec<E>) -> Self {
        Self { root, dark_class: dark_class.to_owned(), controls }
    }
}

impl<E: ElementHandle> ThemeTarget for ElementThemeTarget<E> {
    fn apply(&mut self, theme: Theme) -> Result<(), ChromeError> {
        self.root.set_class(&self.dark_class, theme.is_dark())?;
        let pressed = if theme.is_dark() { "true" } else { "false" };
        for control in &self.controls {
            control.set_attribute("aria-pressed", pressed)?;
        }
        Ok(())
    }
}

/// Toggle controls to wire, primary first. The secondary control lives
/// inside the mobile panel and is dropped unless that panel is wired.
pub fn toggle_controls<E>(primary: Option<E>, secondary: Option<E>, panel_wired: bool) -> Vec<E> {
    primary
        .into_iter()
        .chain(secondary.filter(|_| panel_wired))
        .collect()
}

/// Resolve the startup theme.
///
/// `"dark"` selects dark and any other non-empty stored value selects light.
/// An empty or absent value defers to the environment, and an unknown
/// environment means light.
#[must_use]
pub fn resolve_initial(stored: Option<&str>, env_prefers_dark: Option<bool>) -> Theme {
    match stored {
        Some("dark") => Theme::Dark,
        Some(value) if !value.is_empty() => Theme::Light,
        _ => {
            if env_prefers_dark == Some(true) {
                Theme::Dark
            } else {
                Theme::Light
            }
        }
    }
}

/// Owns the current theme and keeps target and storage in step with it.
pub struct ThemeController<S, T> {
    store: S,
    target: T,
    storage_key: String,
    theme: Theme,
}

impl<S: PreferenceStore, T: ThemeTarget> ThemeController<S, T> {
    /// Resolve the startup theme and apply it to `target`.
    ///
    /// The environment query is consulted at most once, and only when the
    /// store has nothing usable.
    pub fn init(store: S, query: &impl ColorSchemeQuery, mut target: T, storage_key: &str) -> Self {
        let stored = match store.load(storage_key) {
            Ok(value) => value,
            Err(err) => {
                log::debug!("theme: stored preference unreadable, ignoring: {err}");
                None
            }
        };
        let env = if stored.as_deref().is_some_and(|v| !v.is_empty()) {
            None
        } else {
            match query.prefers_dark() {
                Ok(dark) => Some(dark),
                Err(err) => {
                    log::debug!("theme: color-scheme query failed: {err}");
                    None
                }
            }
        };
        let theme = resolve_initial(stored.as_deref(), env);
        if let Err(err) = target.apply(theme) {
            log::warn!("theme: failed to apply {}: {err}", theme.as_str());
        }
        Self { store, target, storage_key: storage_key.to_owned(), theme }
    }

    /// Flip the theme, redisplay it, and persist the new value.
    pub fn toggle(&mut self) -> Theme {
        self.theme = self.theme.flipped();
        if let Err(err) = self.target.apply(self.theme) {
            log::warn!("theme: failed to apply {}: {err}", self.theme.as_str());
        }
        if let Err(err) = self.store.save(&self.storage_key, self.theme.as_str()) {
            log::debug!("theme: preference not persisted: {err}");
        }
        self.theme
    }

    /// The theme currently applied.
    #[must_use]
    pub fn current(&self) -> Theme {
        self.theme
    }

    /// The backing preference store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Whatever displays the theme.
    #[must_use]
    pub fn target(&self) -> &T {
        &self.target
    }
}
