//! The handful of element operations the controllers' views need.
//!
//! `web_sys::Element` implements this in [`crate::dom`]; tests use a shared
//! in-memory element so the per-element update loops run natively.

use crate::error::ChromeError;

pub trait ElementHandle {
    /// Add `class` when `on`, remove it otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error when the class list update throws.
    fn set_class(&self, class: &str, on: bool) -> Result<(), ChromeError>;

    /// # Errors
    ///
    /// Returns an error when the attribute update throws.
    fn set_attribute(&self, name: &str, value: &str) -> Result<(), ChromeError>;

    /// Set an inline style property; an empty `value` clears it.
    ///
    /// # Errors
    ///
    /// Returns an error when the element has no inline style or the update throws.
    fn set_style(&self, property: &str, value: &str) -> Result<(), ChromeError>;
}
