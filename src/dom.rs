//! `web-sys` implementations of the controller traits.
//!
//! SYSTEM CONTEXT
//! ==============
//! Everything that touches `document`, `localStorage` or event listeners
//! lives here (canvas drawing aside, see [`crate::render`]). The controllers
//! only see the traits, which keeps them testable natively.

#[cfg(test)]
#[path = "dom_test.rs"]
mod dom_test;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, Storage, Window};

use crate::element::ElementHandle;
use crate::error::ChromeError;
use crate::panel::ElementPanelView;
use crate::scheduler::{FrameCallback, FrameScheduler};
use crate::theme::{ColorSchemeQuery, ElementThemeTarget, PreferenceStore};

const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

pub type DomThemeTarget = ElementThemeTarget<Element>;
pub type DomPanelView = ElementPanelView<Element>;

/// Look up an element, logging optional collaborators that are absent.
#[must_use]
pub fn find(document: &Document, id: &str) -> Option<Element> {
    let found = document.get_element_by_id(id);
    if found.is_none() {
        log::debug!("dom: #{id} not on page");
    }
    found
}

/// Logical viewport size and device pixel ratio.
///
/// # Errors
///
/// Returns an error when the window dimensions cannot be read.
pub fn viewport(window: &Window) -> Result<(f64, f64, f64), ChromeError> {
    let width = window.inner_width()?.as_f64().unwrap_or(0.0);
    let height = window.inner_height()?.as_f64().unwrap_or(0.0);
    Ok((width, height, window.device_pixel_ratio()))
}

impl ElementHandle for Element {
    fn set_class(&self, class: &str, on: bool) -> Result<(), ChromeError> {
        self.class_list().toggle_with_force(class, on)?;
        Ok(())
    }

    fn set_attribute(&self, name: &str, value: &str) -> Result<(), ChromeError> {
        Element::set_attribute(self, name, value)?;
        Ok(())
    }

    fn set_style(&self, property: &str, value: &str) -> Result<(), ChromeError> {
        let html = self
            .dyn_ref::<HtmlElement>()
            .ok_or_else(|| ChromeError::Js(format!("<{}> has no inline style", self.tag_name())))?;
        html.style().set_property(property, value)?;
        Ok(())
    }
}

// =============================================================
// Event listeners
// =============================================================

struct Listener {
    target: EventTarget,
    event: &'static str,
    handler: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(&self) -> Result<(), ChromeError> {
        self.target
            .add_event_listener_with_callback(self.event, self.handler.as_ref().unchecked_ref())?;
        Ok(())
    }

    fn detach(&self) {
        let removed = self
            .target
            .remove_event_listener_with_callback(self.event, self.handler.as_ref().unchecked_ref());
        if let Err(err) = removed {
            log::warn!("dom: could not detach {} listener: {}", self.event, ChromeError::js(&err));
        }
    }
}

/// A component's listeners, built up front and attached all or nothing.
#[derive(Default)]
pub struct ListenerSet {
    pending: Vec<Listener>,
}

impl ListenerSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `handler` for `event` on `target`. Nothing is attached yet.
    pub fn on(&mut self, target: &EventTarget, event: &'static str, handler: impl FnMut(Event) + 'static) {
        self.pending.push(Listener {
            target: target.clone(),
            event,
            handler: Closure::<dyn FnMut(Event)>::new(handler),
        });
    }

    /// Attach every queued listener for the rest of the page's life.
    ///
    /// # Errors
    ///
    /// Returns the first `addEventListener` failure, after removing the
    /// listeners already attached, so the component stays fully unwired.
    pub fn attach(self) -> Result<(), ChromeError> {
        let attached = attach_all(self.pending, Listener::attach, Listener::detach)?;
        for listener in attached {
            listener.handler.forget();
        }
        Ok(())
    }
}

/// Attach `items` in order. On the first failure, detach the ones already
/// attached (newest first) and return the error.
///
/// # Errors
///
/// Returns the first error from `attach`.
pub fn attach_all<T, E>(
    items: Vec<T>,
    mut attach: impl FnMut(&T) -> Result<(), E>,
    mut detach: impl FnMut(&T),
) -> Result<Vec<T>, E> {
    for (index, item) in items.iter().enumerate() {
        if let Err(err) = attach(item) {
            for done in items[..index].iter().rev() {
                detach(done);
            }
            return Err(err);
        }
    }
    Ok(items)
}

// =============================================================
// Theme
// =============================================================

/// `window.localStorage`, resolved lazily so a blocked store is just an
/// error on each access.
pub struct LocalStorage {
    window: Window,
}

impl LocalStorage {
    #[must_use]
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    fn storage(&self) -> Result<Storage, ChromeError> {
        self.window
            .local_storage()?
            .ok_or_else(|| ChromeError::Js("localStorage unavailable".into()))
    }
}

impl PreferenceStore for LocalStorage {
    fn load(&self, key: &str) -> Result<Option<String>, ChromeError> {
        Ok(self.storage()?.get_item(key)?)
    }

    fn save(&self, key: &str, value: &str) -> Result<(), ChromeError> {
        self.storage()?.set_item(key, value)?;
        Ok(())
    }
}

/// `matchMedia("(prefers-color-scheme: dark)")`.
pub struct MediaColorScheme<'a> {
    window: &'a Window,
}

impl<'a> MediaColorScheme<'a> {
    #[must_use]
    pub fn new(window: &'a Window) -> Self {
        Self { window }
    }
}

impl ColorSchemeQuery for MediaColorScheme<'_> {
    fn prefers_dark(&self) -> Result<bool, ChromeError> {
        self.window
            .match_media(DARK_SCHEME_QUERY)?
            .map(|mq| mq.matches())
            .ok_or_else(|| ChromeError::Js("matchMedia returned null".into()))
    }
}

// =============================================================
// Scheduling
// =============================================================

/// `requestAnimationFrame`-driven scheduler.
pub struct RafScheduler {
    window: Window,
}

impl RafScheduler {
    #[must_use]
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&self, callback: FrameCallback) -> Result<(), ChromeError> {
        let js = Closure::once_into_js(move |_timestamp: f64| callback());
        self.window.request_animation_frame(js.unchecked_ref())?;
        Ok(())
    }
}
