//! Slide-in mobile navigation panel.
//!
//! DESIGN
//! ======
//! The panel's visual state is a set of flags spread over several elements.
//! Rather than flipping them one by one at each call site, the controller
//! derives the whole [`PanelFlags`] set from [`PanelState`] and hands it to
//! the view in one call, so open and closed are the only observable shapes.

#[cfg(test)]
#[path = "panel_test.rs"]
mod panel_test;

use crate::config::PanelClasses;
use crate::element::ElementHandle;
use crate::error::ChromeError;

/// `KeyboardEvent.key` value that dismisses the panel.
pub const DISMISS_KEY: &str = "Escape";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PanelState {
    #[default]
    Closed,
    Open,
}

/// Every visual flag the panel owns, derived from a single [`PanelState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanelFlags {
    pub panel_offscreen: bool,
    pub overlay_visible: bool,
    pub overlay_click_through: bool,
    pub scroll_locked: bool,
    /// Mirrored to `aria-expanded` on the menu button.
    pub expanded: bool,
    /// Menu icon shown; the close icon shows otherwise.
    pub menu_icon_visible: bool,
}

impl PanelFlags {
    #[must_use]
    pub fn for_state(state: PanelState) -> Self {
        let open = state == PanelState::Open;
        Self {
            panel_offscreen: !open,
            overlay_visible: open,
            overlay_click_through: !open,
            scroll_locked: open,
            expanded: open,
            menu_icon_visible: !open,
        }
    }
}

/// The elements that display the panel's state.
pub trait PanelView {
    /// Write the full flag set.
    ///
    /// # Errors
    ///
    /// Returns an error when a DOM update throws.
    fn render(&mut self, flags: &PanelFlags) -> Result<(), ChromeError>;
}

/// The elements the panel is built from. Only the first three are required.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PanelElements<E> {
    pub button: E,
    pub panel: E,
    pub overlay: E,
    pub close_button: Option<E>,
    /// Menu and close icons; swapped only when both exist.
    pub icons: Option<(E, E)>,
}

/// Select the panel's collaborators from what the page provides.
///
/// Returns `None` unless the menu button, panel and overlay are all present,
/// which leaves the whole panel unwired. A lone icon is ignored.
pub fn assemble<E>(
    button: Option<E>,
    panel: Option<E>,
    overlay: Option<E>,
    close_button: Option<E>,
    icon_menu: Option<E>,
    icon_close: Option<E>,
) -> Option<PanelElements<E>> {
    Some(PanelElements {
        button: button?,
        panel: panel?,
        overlay: overlay?,
        close_button,
        icons: icon_menu.zip(icon_close),
    })
}

/// [`PanelView`] over real (or fake) elements using the page's class names.
pub struct ElementPanelView<E> {
    elements: PanelElements<E>,
    body: Option<E>,
    classes: PanelClasses,
}

impl<E> ElementPanelView<E> {
    #[must_use]
    pub fn new(elements: PanelElements<E>, body: Option<E>, classes: PanelClasses) -> Self {
        Self { elements, body, classes }
    }
}

impl<E: ElementHandle> PanelView for ElementPanelView<E> {
    fn render(&mut self, flags: &PanelFlags) -> Result<(), ChromeError> {
        let PanelElements { button, panel, overlay, icons, .. } = &self.elements;
        let classes = &self.classes;
        panel.set_class(&classes.offscreen, flags.panel_offscreen)?;
        overlay.set_class(&classes.click_through, flags.overlay_click_through)?;
        overlay.set_class(&classes.visible, flags.overlay_visible)?;
        if let Some(body) = &self.body {
            body.set_style("overflow", if flags.scroll_locked { "hidden" } else { "" })?;
        }
        button.set_attribute("aria-expanded", if flags.expanded { "true" } else { "false" })?;
        if let Some((menu, close)) = icons {
            menu.set_class(&classes.hidden, !flags.menu_icon_visible)?;
            close.set_class(&classes.hidden, flags.menu_icon_visible)?;
        }
        Ok(())
    }
}

pub struct PanelController<V> {
    view: V,
    state: PanelState,
}

impl<V: PanelView> PanelController<V> {
    /// Take ownership of `view` and show it in the closed state.
    pub fn new(view: V) -> Self {
        let mut ctl = Self { view, state: PanelState::Closed };
        ctl.show();
        ctl
    }

    /// Closed to Open. Returns `false` if already open.
    pub fn open(&mut self) -> bool {
        self.transition(PanelState::Open)
    }

    /// Open to Closed. Returns `false` if already closed.
    pub fn close(&mut self) -> bool {
        self.transition(PanelState::Closed)
    }

    /// Menu-button action: close when expanded, open otherwise.
    pub fn toggle(&mut self) -> PanelState {
        if self.is_expanded() {
            self.close();
        } else {
            self.open();
        }
        self.state
    }

    /// Global keydown handler. Returns whether the key caused a transition.
    pub fn handle_key(&mut self, key: &str) -> bool {
        key == DISMISS_KEY && self.close()
    }

    #[must_use]
    pub fn state(&self) -> PanelState {
        self.state
    }

    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.state == PanelState::Open
    }

    #[must_use]
    pub fn view(&self) -> &V {
        &self.view
    }

    fn transition(&mut self, next: PanelState) -> bool {
        if self.state == next {
            return false;
        }
        self.state = next;
        self.show();
        true
    }

    fn show(&mut self) {
        let flags = PanelFlags::for_state(self.state);
        if let Err(err) = self.view.render(&flags) {
            log::warn!("panel: render {:?} failed: {err}", self.state);
        }
    }
}
