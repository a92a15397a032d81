//! Error type shared by every component.
//!
//! Nothing here ever reaches the user: component wiring turns these into log
//! lines and leaves the affected component inert.

use wasm_bindgen::JsValue;

#[derive(Debug, thiserror::Error)]
pub enum ChromeError {
    /// A required DOM element is not on the page.
    #[error("missing element: #{id}")]
    MissingElement { id: String },

    /// The browser refused to hand out a 2D drawing context.
    #[error("2d canvas context unavailable")]
    ContextUnavailable,

    /// A browser API call threw.
    #[error("browser call failed: {0}")]
    Js(String),

    /// Page-supplied configuration was malformed or inconsistent.
    #[error("config parse failed: {0}")]
    Config(String),
}

impl ChromeError {
    /// Capture a thrown JavaScript value as a readable message.
    pub fn js(value: &JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }

    /// A required element, named by id, is absent.
    pub fn missing(id: &str) -> Self {
        Self::MissingElement { id: id.to_owned() }
    }
}

impl From<JsValue> for ChromeError {
    fn from(value: JsValue) -> Self {
        Self::js(&value)
    }
}
