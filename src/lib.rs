//! # Folio Behavior
//!
//! The interactive layer of a static portfolio site, modeled as plain Rust
//! state machines: auto-advancing image carousels, a lightbox that spans all
//! of them, and project/highlight detail dialogs rendered from a static
//! catalog.
//!
//! # Architecture
//!
//! Components are assembled once per page and then driven by events:
//!
//! ```text
//! layout.json ─┐
//! catalog.toml ┼─→ Page::assemble ─→ CarouselRegistry ──→ CarouselController × N
//! config.toml ─┘          │                 ↑
//!                         │           pause / resume
//!                         ├─→ Lightbox ─────┘
//!                         └─→ DialogPresenter × 2 (project, highlight)
//!
//! PageEvent + time ─→ Page::dispatch ─→ component methods ─→ render (maud)
//! ```
//!
//! Nothing reads a wall clock or touches a document. Every event carries the
//! current time in milliseconds, and timers are deadlines checked when time
//! advances. This keeps every contract testable in isolation.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`autoplay`] | Deadline-based repeating task behind carousel autoplay |
//! | [`carousel`] | One carousel: slides, wraparound navigation, autoplay |
//! | [`registry`] | Page-wide carousel collection with pause/resume-all |
//! | [`lightbox`] | Full-view overlay over the flattened slides of every carousel |
//! | [`catalog`] | Project and highlight catalogs loaded from TOML |
//! | [`dialog`] | Detail dialog population with placeholder and card fallbacks |
//! | [`clipboard`] | Copy chips with timed "Copied!" feedback |
//! | [`nav`] | Anchor/page navigation resolution |
//! | [`page`] | Page assembly, layout loading, event dispatch, snapshots |
//! | [`render`] | Maud markup for dialogs, carousels, lightbox and chips |
//! | [`replay`] | Timed event scripts run against an assembled page |
//! | [`config`] | `config.toml` loading over stock defaults |
//! | [`output`] | CLI output formatting |
//! | [`types`] | Shared types (`Slide`, `DetailRecord`, `Key`, `BodyState`) |
//!
//! # Design Decisions
//!
//! ## Explicit Registry
//!
//! The lightbox needs to reach every carousel to pause and resume it. The
//! registry is an ordinary value owned by the [`page::Page`] and passed by
//! reference into the lightbox's methods, never a global.
//!
//! ## Unconditional Resume
//!
//! Closing the lightbox restarts autoplay on every registered carousel, even
//! ones that were stopped before it opened. There is no per-carousel memory of
//! the pre-open state.

pub mod autoplay;
pub mod carousel;
pub mod catalog;
pub mod clipboard;
pub mod config;
pub mod dialog;
pub mod lightbox;
pub mod nav;
pub mod output;
pub mod page;
pub mod registry;
pub mod render;
pub mod replay;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
