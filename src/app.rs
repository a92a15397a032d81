//! Page startup: logging, configuration, and wiring of the three components.
//!
//! Each component is wired on its own. A missing element or failed browser
//! call leaves that component inert and is logged; it never stops the others.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::wasm_bindgen;
use web_sys::{Document, Element, HtmlCanvasElement, KeyboardEvent, Window};

use crate::backdrop::Backdrop;
use crate::config::{CONFIG_ELEMENT_ID, ChromeConfig};
use crate::dom::{self, DomPanelView, DomThemeTarget, ListenerSet, LocalStorage, MediaColorScheme, RafScheduler};
use crate::error::ChromeError;
use crate::panel::{self, PanelController, PanelElements};
use crate::render::CanvasSurface;
use crate::scheduler::run_loop;
use crate::theme::{self, ThemeController};

/// WebAssembly entry point, run once when the module loads.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("logger already installed");
    }

    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    let config = load_config(&document);

    let panel_wired = match find_panel(&document, &config).map(|elements| wire_panel(&document, &config, elements)) {
        Some(Ok(())) => {
            log::info!("panel: ready");
            true
        }
        Some(Err(err)) => {
            log::info!("panel: inert: {err}");
            false
        }
        None => {
            log::info!("panel: inert: required elements missing");
            false
        }
    };
    match wire_theme(&window, &document, &config, panel_wired) {
        Ok(()) => log::info!("theme: ready"),
        Err(err) => log::info!("theme: inert: {err}"),
    }
    match wire_backdrop(&window, &document, &config) {
        Ok(()) => log::info!("backdrop: running"),
        Err(err) => log::info!("backdrop: inert: {err}"),
    }
}

/// Defaults, overridden by the page's JSON config element when it parses.
fn load_config(document: &Document) -> ChromeConfig {
    let Some(raw) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    else {
        return ChromeConfig::default();
    };
    match ChromeConfig::from_json(&raw) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("config: using defaults: {err}");
            ChromeConfig::default()
        }
    }
}

fn find_panel(document: &Document, config: &ChromeConfig) -> Option<PanelElements<Element>> {
    let ids = &config.ids;
    panel::assemble(
        dom::find(document, &ids.menu_button),
        dom::find(document, &ids.menu_panel),
        dom::find(document, &ids.overlay),
        dom::find(document, &ids.close_button),
        dom::find(document, &ids.icon_menu),
        dom::find(document, &ids.icon_close),
    )
}

fn wire_theme(window: &Window, document: &Document, config: &ChromeConfig, panel_wired: bool) -> Result<(), ChromeError> {
    let root = document
        .document_element()
        .ok_or_else(|| ChromeError::missing("html"))?;
    let controls = theme::toggle_controls(
        dom::find(document, &config.ids.theme_toggle),
        dom::find(document, &config.ids.theme_toggle_mobile),
        panel_wired,
    );

    let controller = Rc::new(RefCell::new(ThemeController::init(
        LocalStorage::new(window.clone()),
        &MediaColorScheme::new(window),
        DomThemeTarget::new(root, &config.theme.dark_class, controls.clone()),
        &config.theme.storage_key,
    )));

    let mut listeners = ListenerSet::new();
    for control in &controls {
        let controller = Rc::clone(&controller);
        listeners.on(control, "click", move |_| {
            let theme = controller.borrow_mut().toggle();
            log::debug!("theme: now {}", theme.as_str());
        });
    }
    listeners.attach()
}

fn wire_panel(document: &Document, config: &ChromeConfig, elements: PanelElements<Element>) -> Result<(), ChromeError> {
    let button = elements.button.clone();
    let overlay = elements.overlay.clone();
    let close_button = elements.close_button.clone();
    let body = document.body().map(Element::from);
    let controller = Rc::new(RefCell::new(PanelController::new(DomPanelView::new(
        elements,
        body,
        config.panel.clone(),
    ))));

    let mut listeners = ListenerSet::new();
    {
        let controller = Rc::clone(&controller);
        listeners.on(&button, "click", move |_| {
            controller.borrow_mut().toggle();
        });
    }
    for target in close_button.iter().chain(std::iter::once(&overlay)) {
        let controller = Rc::clone(&controller);
        listeners.on(target, "click", move |_| {
            controller.borrow_mut().close();
        });
    }
    listeners.on(document, "keydown", move |ev| {
        if let Some(key) = ev.dyn_ref::<KeyboardEvent>() {
            controller.borrow_mut().handle_key(&key.key());
        }
    });
    listeners.attach()
}

fn wire_backdrop(window: &Window, document: &Document, config: &ChromeConfig) -> Result<(), ChromeError> {
    let id = &config.ids.canvas;
    let canvas = document
        .get_element_by_id(id)
        .ok_or_else(|| ChromeError::missing(id))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| ChromeError::missing(id))?;
    let surface = CanvasSurface::new(canvas)?;
    let backdrop = Rc::new(RefCell::new(Backdrop::new(surface, config.blobs.clone(), random_seed())));

    fit_to_window(window, &mut backdrop.borrow_mut());
    let mut listeners = ListenerSet::new();
    {
        let window_for_resize = window.clone();
        let backdrop = Rc::clone(&backdrop);
        listeners.on(window, "resize", move |_| {
            fit_to_window(&window_for_resize, &mut backdrop.borrow_mut());
        });
    }
    listeners.attach()?;

    let mut failing = false;
    run_loop(Rc::new(RafScheduler::new(window.clone())), move || {
        let mut backdrop = backdrop.borrow_mut();
        match backdrop.tick() {
            Ok(()) => failing = false,
            Err(err) => {
                if !failing {
                    log::warn!("backdrop: frame {} failed: {err}", backdrop.core.frames());
                }
                failing = true;
            }
        }
    });
    Ok(())
}

fn fit_to_window(window: &Window, backdrop: &mut Backdrop<CanvasSurface>) {
    let resized = dom::viewport(window).and_then(|(width, height, dpr)| backdrop.resize(width, height, dpr));
    if let Err(err) = resized {
        log::warn!("backdrop: resize failed: {err}");
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn random_seed() -> u64 {
    let entropy = (js_sys::Math::random() * 9_007_199_254_740_992.0) as u64;
    entropy ^ (js_sys::Date::now() as u64).rotate_left(32)
}
