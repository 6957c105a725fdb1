//! A single auto-advancing carousel.
//!
//! The controller owns its slides, the per-slide "active" flags a renderer
//! reads, and the autoplay task. Autoplay is only reachable through
//! [`CarouselController::start_autoplay`] and
//! [`CarouselController::stop_autoplay`].

use crate::autoplay::RepeatingTask;
use crate::types::{Millis, Slide};
use tracing::trace;

/// Direction of a user-initiated navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Prev,
    Next,
}

#[derive(Debug, Clone)]
pub struct CarouselController {
    index: usize,
    slides: Vec<Slide>,
    active: Vec<bool>,
    current: Option<usize>,
    has_controls: bool,
    autoplay: RepeatingTask,
}

impl CarouselController {
    /// Build a controller showing the first slide, with autoplay armed.
    ///
    /// `index` is the registry position and stays fixed for the page lifetime.
    pub fn new(index: usize, slides: Vec<Slide>, period: Millis, now: Millis) -> Self {
        let current = if slides.is_empty() { None } else { Some(0) };
        let mut controller = Self {
            index,
            active: vec![false; slides.len()],
            slides,
            current,
            has_controls: true,
            autoplay: RepeatingTask::new(period),
        };
        controller.start_autoplay(now);
        controller.render();
        controller
    }

    /// Mark the carousel as lacking prev/next buttons.
    pub fn without_controls(mut self) -> Self {
        self.has_controls = false;
        self
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn has_controls(&self) -> bool {
        self.has_controls
    }

    pub fn current_slide(&self) -> Option<usize> {
        self.current
    }

    pub fn is_active(&self, slide: usize) -> bool {
        self.active.get(slide).copied().unwrap_or(false)
    }

    pub fn is_autoplaying(&self) -> bool {
        self.autoplay.is_running()
    }

    /// Advance one slide, wrapping to the first after the last.
    pub fn next(&mut self) {
        let n = self.slides.len();
        if let Some(i) = self.current {
            self.current = Some((i + 1) % n);
            self.render();
        }
    }

    /// Retreat one slide, wrapping to the last before the first.
    pub fn prev(&mut self) {
        let n = self.slides.len();
        if let Some(i) = self.current {
            self.current = Some((i + n - 1) % n);
            self.render();
        }
    }

    /// Navigation from a prev/next button press.
    ///
    /// Restarts the autoplay phase so the next automatic advance is a full
    /// period away. A paused carousel stays paused.
    pub fn navigate(&mut self, step: Step, now: Millis) {
        match step {
            Step::Prev => self.prev(),
            Step::Next => self.next(),
        }
        if self.autoplay.is_running() {
            self.autoplay.start(now);
        }
    }

    pub fn start_autoplay(&mut self, now: Millis) {
        trace!(carousel = self.index, now, "autoplay start");
        self.autoplay.start(now);
    }

    pub fn stop_autoplay(&mut self) {
        trace!(carousel = self.index, "autoplay stop");
        self.autoplay.stop();
    }

    /// Run autoplay up to `now`; returns how many slides were advanced.
    pub fn tick(&mut self, now: Millis) -> u64 {
        let fired = self.autoplay.poll(now);
        let n = self.slides.len();
        let Some(i) = self.current.filter(|_| fired > 0) else {
            return 0;
        };
        let steps = (fired % n as u64) as usize;
        self.current = Some((i + steps) % n);
        self.render();
        fired
    }

    fn render(&mut self) {
        for (i, flag) in self.active.iter_mut().enumerate() {
            *flag = Some(i) == self.current;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::slides;

    fn carousel(n: usize) -> CarouselController {
        CarouselController::new(0, slides("c", n), 3000, 0)
    }

    fn active_flags(c: &CarouselController) -> Vec<bool> {
        (0..c.len()).map(|i| c.is_active(i)).collect()
    }

    #[test]
    fn starts_on_first_slide_with_autoplay_armed() {
        let c = carousel(3);
        assert_eq!(c.current_slide(), Some(0));
        assert_eq!(active_flags(&c), vec![true, false, false]);
        assert!(c.is_autoplaying());
    }

    #[test]
    fn next_wraps_from_last_to_first() {
        let mut c = carousel(4);
        for _ in 0..3 {
            c.next();
        }
        assert_eq!(c.current_slide(), Some(3));
        c.next();
        assert_eq!(c.current_slide(), Some(0));
    }

    #[test]
    fn prev_wraps_from_first_to_last() {
        let mut c = carousel(4);
        c.prev();
        assert_eq!(c.current_slide(), Some(3));
        assert_eq!(active_flags(&c), vec![false, false, false, true]);
    }

    #[test]
    fn cycle_law_holds_for_every_size() {
        for n in 1..=7 {
            let mut c = carousel(n);
            c.next();
            let start = c.current_slide();
            for _ in 0..n {
                c.next();
            }
            assert_eq!(c.current_slide(), start, "next cycle for n={n}");
            for _ in 0..n {
                c.prev();
            }
            assert_eq!(c.current_slide(), start, "prev cycle for n={n}");
        }
    }

    #[test]
    fn exactly_one_slide_is_active() {
        let mut c = carousel(5);
        for _ in 0..12 {
            c.next();
            assert_eq!(active_flags(&c).iter().filter(|a| **a).count(), 1);
        }
    }

    #[test]
    fn render_is_idempotent() {
        let mut c = carousel(3);
        c.next();
        let before = active_flags(&c);
        c.render();
        c.render();
        assert_eq!(active_flags(&c), before);
    }

    #[test]
    fn empty_carousel_ignores_navigation() {
        let mut c = carousel(0);
        c.next();
        c.prev();
        c.navigate(Step::Next, 10);
        assert_eq!(c.current_slide(), None);
        assert!(!c.is_active(0));
        assert!(c.is_autoplaying());
        assert_eq!(c.tick(9000), 0);
        assert_eq!(c.current_slide(), None);
    }

    #[test]
    fn autoplay_advances_once_per_period() {
        let mut c = carousel(3);
        assert_eq!(c.tick(2999), 0);
        assert_eq!(c.tick(3000), 1);
        assert_eq!(c.current_slide(), Some(1));
    }

    #[test]
    fn double_start_yields_single_advance() {
        let mut c = carousel(3);
        c.start_autoplay(0);
        c.start_autoplay(0);
        assert_eq!(c.tick(3000), 1);
        assert_eq!(c.current_slide(), Some(1));
    }

    #[test]
    fn manual_navigation_resets_phase() {
        let mut c = carousel(4);
        c.navigate(Step::Next, 2500);
        assert_eq!(c.current_slide(), Some(1));
        // The original 3000 deadline is gone; the next one is 5500.
        assert_eq!(c.tick(3000), 0);
        assert_eq!(c.tick(5500), 1);
        assert_eq!(c.current_slide(), Some(2));
    }

    #[test]
    fn manual_navigation_keeps_paused_carousel_paused() {
        let mut c = carousel(4);
        c.stop_autoplay();
        c.navigate(Step::Prev, 100);
        assert_eq!(c.current_slide(), Some(3));
        assert!(!c.is_autoplaying());
        assert_eq!(c.tick(10_000), 0);
    }

    #[test]
    fn stopped_autoplay_does_not_advance() {
        let mut c = carousel(2);
        c.stop_autoplay();
        assert_eq!(c.tick(30_000), 0);
        assert_eq!(c.current_slide(), Some(0));
    }

    #[test]
    fn long_gap_advances_by_elapsed_periods_modulo_length() {
        let mut c = carousel(3);
        assert_eq!(c.tick(3_000_000_000_000), 1_000_000_000);
        assert_eq!(c.current_slide(), Some(1));
        assert_eq!(active_flags(&c), vec![false, true, false]);
    }

    #[test]
    fn tick_at_end_of_clock_does_not_overflow() {
        let mut c = CarouselController::new(0, slides("c", 3), 3000, Millis::MAX - 10);
        assert_eq!(c.tick(Millis::MAX), 0);
        assert_eq!(c.current_slide(), Some(0));
        assert!(c.is_autoplaying());
    }
}
