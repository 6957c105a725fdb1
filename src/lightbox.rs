//! Full-view overlay across every carousel's slides.
//!
//! ## Autoplay Coordination
//!
//! Opening pauses every registered carousel before anything is shown, and
//! closing resumes all of them. Resumption is unconditional: a carousel that
//! was already stopped before the lightbox opened autoplays again after it
//! closes.
//!
//! ## Index Normalization
//!
//! Requested positions may be negative or past the end. They are mapped into
//! range with `((i mod total) + total) mod total`, so `show_at(-1)` lands on
//! the last slide.

use crate::registry::{CarouselRegistry, FlatSlide};
use crate::types::{BodyState, Focus, Key, Millis};
use tracing::debug;

/// What the overlay currently displays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LightboxView {
    pub image_src: String,
    pub image_alt: String,
    /// Mirrors the dialog's `aria-hidden` attribute.
    pub aria_hidden: bool,
}

#[derive(Debug, Clone)]
pub struct Lightbox {
    items: Vec<FlatSlide>,
    open: bool,
    flat_index: usize,
    view: LightboxView,
}

impl Lightbox {
    /// Snapshot the registry's slides in registry order.
    pub fn new(registry: &CarouselRegistry) -> Self {
        Self {
            items: registry.flatten(),
            open: false,
            flat_index: 0,
            view: LightboxView {
                aria_hidden: true,
                ..LightboxView::default()
            },
        }
    }

    /// True when there is nothing to show; an inert lightbox never opens.
    pub fn is_inert(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn total(&self) -> usize {
        self.items.len()
    }

    pub fn flat_index(&self) -> usize {
        self.flat_index
    }

    pub fn view(&self) -> &LightboxView {
        &self.view
    }

    /// The slide at the current position, with its origin carousel.
    pub fn current(&self) -> Option<&FlatSlide> {
        self.items.get(self.flat_index)
    }

    /// Flat position of a carousel's slide, if it exists.
    pub fn position_of(&self, carousel: usize, position: usize) -> Option<usize> {
        self.items
            .iter()
            .position(|f| f.carousel == carousel && f.position == position)
    }

    fn normalize(&self, i: i64) -> usize {
        let total = self.items.len() as i64;
        (((i % total) + total) % total) as usize
    }

    /// Open on slide `i`. Returns `false` when the lightbox is inert.
    pub fn open(&mut self, i: i64, registry: &mut CarouselRegistry, body: &mut BodyState) -> bool {
        if self.is_inert() {
            return false;
        }
        registry.pause_all();
        self.flat_index = self.normalize(i);
        self.render();
        self.open = true;
        self.view.aria_hidden = false;
        body.scroll_locked = true;
        body.focus = Some(Focus::LightboxNext);
        debug!(flat_index = self.flat_index, total = self.total(), "lightbox opened");
        true
    }

    /// Display slide `i` without changing open/closed state.
    pub fn show_at(&mut self, i: i64) {
        if self.is_inert() {
            return;
        }
        self.flat_index = self.normalize(i);
        self.render();
    }

    pub fn next(&mut self) {
        self.show_at(self.flat_index as i64 + 1);
    }

    pub fn prev(&mut self) {
        self.show_at(self.flat_index as i64 - 1);
    }

    pub fn close(&mut self, registry: &mut CarouselRegistry, body: &mut BodyState, now: Millis) {
        self.open = false;
        self.view.aria_hidden = true;
        body.scroll_locked = false;
        if body.focus == Some(Focus::LightboxNext) {
            body.focus = None;
        }
        registry.resume_all(now);
        debug!(now, "lightbox closed");
    }

    /// Keyboard handling while open. Returns `true` when the key was consumed
    /// and its default action must be suppressed.
    pub fn handle_key(
        &mut self,
        key: Key,
        registry: &mut CarouselRegistry,
        body: &mut BodyState,
        now: Millis,
    ) -> bool {
        if !self.open {
            return false;
        }
        match key {
            Key::ArrowRight => self.next(),
            Key::ArrowLeft => self.prev(),
            Key::Escape => self.close(registry, body, now),
            _ => return false,
        }
        true
    }

    fn render(&mut self) {
        if let Some(item) = self.items.get(self.flat_index) {
            self.view.image_src = item.slide.display_src().to_string();
            self.view.image_alt = item.slide.alt.clone();
        }
    }
}
