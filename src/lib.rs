//! Client-side chrome for the portfolio page, compiled to WebAssembly.
//!
//! Three independent behaviors start when the module loads: a persisted
//! light/dark theme, a slide-in mobile navigation panel, and an animated
//! background of drifting gradient blobs. Each controller owns its state and
//! receives its collaborators through traits, so the logic runs under native
//! `cargo test` while the `web-sys` bindings stay thin.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`theme`] | Theme resolution, toggle, and persistence |
//! | [`panel`] | Mobile panel open/closed state machine |
//! | [`blob`] | Blob generation, motion, and wraparound |
//! | [`backdrop`] | Surface sizing and the per-frame update |
//! | [`scheduler`] | Frame scheduling and the animation loop |
//! | [`render`] | Canvas 2D drawing |
//! | [`dom`] | Browser implementations of the controller traits |
//! | [`element`] | Element operations shared by the theme and panel views |
//! | [`config`] | Page-tunable ids, classes, and blob tuning |
//! | [`error`] | Shared error type |

pub mod app;
pub mod backdrop;
pub mod blob;
pub mod config;
pub mod dom;
pub mod element;
pub mod error;
pub mod panel;
pub mod render;
pub mod scheduler;
pub mod theme;
