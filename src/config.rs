//! Page-tunable configuration.
//!
//! Every field has a default matching the stock page markup, so an absent or
//! partial JSON override only changes what it names.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::error::ChromeError;

/// Id of the optional `<script type="application/json">` element holding overrides.
pub const CONFIG_ELEMENT_ID: &str = "portfolio-chrome-config";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    pub theme_toggle: String,
    pub theme_toggle_mobile: String,
    pub menu_button: String,
    pub menu_panel: String,
    pub overlay: String,
    pub close_button: String,
    pub icon_menu: String,
    pub icon_close: String,
    pub canvas: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            theme_toggle: "themeToggle".into(),
            theme_toggle_mobile: "themeToggleMobile".into(),
            menu_button: "mobileMenuBtn".into(),
            menu_panel: "mobileMenuPanel".into(),
            overlay: "mobileOverlay".into(),
            close_button: "mobileCloseBtn".into(),
            icon_menu: "iconMenu".into(),
            icon_close: "iconClose".into(),
            canvas: "bg-canvas".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// `localStorage` key holding `"dark"` or `"light"`.
    pub storage_key: String,
    /// Class toggled on `<html>` while dark mode is active.
    pub dark_class: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self { storage_key: "theme".into(), dark_class: "dark".into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PanelClasses {
    /// Present on the panel while it sits off-screen.
    pub offscreen: String,
    /// Present on the overlay while clicks pass through it.
    pub click_through: String,
    /// Present on the overlay while it is visible.
    pub visible: String,
    /// Present on whichever icon is not shown.
    pub hidden: String,
}

impl Default for PanelClasses {
    fn default() -> Self {
        Self {
            offscreen: "translate-x-full".into(),
            click_through: "pointer-events-none".into(),
            visible: "opacity-100".into(),
            hidden: "hidden".into(),
        }
    }
}

/// Closed numeric interval used for random draws.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Map a unit sample `t` in `[0, 1)` onto the interval.
    #[must_use]
    pub fn lerp(self, t: f64) -> f64 {
        t * (self.max - self.min) + self.min
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Either bound may be omitted in JSON; the missing one keeps its default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "BlobOverrides")]
pub struct BlobConfig {
    pub min_count: usize,
    /// Logical pixels of the shorter viewport side per blob.
    pub count_divisor: f64,
    pub radius: Range,
    /// Maximum absolute velocity per axis, in logical pixels per frame.
    pub speed: f64,
    pub inner_hue: Range,
    pub outer_hue: Range,
    pub saturation: f64,
    pub lightness: f64,
}

impl Default for BlobConfig {
    fn default() -> Self {
        Self {
            min_count: 10,
            count_divisor: 60.0,
            radius: Range::new(40.0, 140.0),
            speed: 0.6,
            inner_hue: Range::new(250.0, 290.0),
            outer_hue: Range::new(300.0, 330.0),
            saturation: 80.0,
            lightness: 60.0,
        }
    }
}

/// Partial range as written in JSON.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
struct RangeOverride {
    min: Option<f64>,
    max: Option<f64>,
}

impl RangeOverride {
    fn over(self, base: Range) -> Range {
        Range::new(self.min.unwrap_or(base.min), self.max.unwrap_or(base.max))
    }
}

/// Wire shape of [`BlobConfig`]: every field optional, filled from defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct BlobOverrides {
    min_count: Option<usize>,
    count_divisor: Option<f64>,
    radius: RangeOverride,
    speed: Option<f64>,
    inner_hue: RangeOverride,
    outer_hue: RangeOverride,
    saturation: Option<f64>,
    lightness: Option<f64>,
}

impl From<BlobOverrides> for BlobConfig {
    fn from(raw: BlobOverrides) -> Self {
        let base = Self::default();
        Self {
            min_count: raw.min_count.unwrap_or(base.min_count),
            count_divisor: raw.count_divisor.unwrap_or(base.count_divisor),
            radius: raw.radius.over(base.radius),
            speed: raw.speed.unwrap_or(base.speed),
            inner_hue: raw.inner_hue.over(base.inner_hue),
            outer_hue: raw.outer_hue.over(base.outer_hue),
            saturation: raw.saturation.unwrap_or(base.saturation),
            lightness: raw.lightness.unwrap_or(base.lightness),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChromeConfig {
    pub ids: ElementIds,
    pub theme: ThemeConfig,
    pub panel: PanelClasses,
    pub blobs: BlobConfig,
}

impl ChromeConfig {
    /// Parse a JSON override document and validate the result.
    ///
    /// # Errors
    ///
    /// Returns [`ChromeError::Config`] for malformed JSON or values that would
    /// make blob generation meaningless.
    pub fn from_json(raw: &str) -> Result<Self, ChromeError> {
        let config: Self = serde_json::from_str(raw).map_err(|e| ChromeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check blob tuning for inverted ranges and degenerate divisors.
    ///
    /// # Errors
    ///
    /// Returns [`ChromeError::Config`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ChromeError> {
        let blobs = &self.blobs;
        if !(blobs.count_divisor.is_finite() && blobs.count_divisor > 0.0) {
            return Err(ChromeError::Config("blobs.count_divisor must be positive".into()));
        }
        if !(blobs.speed.is_finite() && blobs.speed >= 0.0) {
            return Err(ChromeError::Config("blobs.speed must be non-negative".into()));
        }
        for (name, range) in [
            ("blobs.radius", blobs.radius),
            ("blobs.inner_hue", blobs.inner_hue),
            ("blobs.outer_hue", blobs.outer_hue),
        ] {
            if !(range.min.is_finite() && range.max.is_finite()) || range.min > range.max {
                return Err(ChromeError::Config(format!("{name} must satisfy min <= max")));
            }
        }
        if blobs.radius.min < 0.0 {
            return Err(ChromeError::Config("blobs.radius must be non-negative".into()));
        }
        Ok(())
    }
}
