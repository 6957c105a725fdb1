//! Page-wide collection of carousels.
//!
//! The registry is constructed explicitly during page assembly and handed by
//! reference to whoever needs to reach every carousel (the lightbox). Entries
//! are keyed by creation order and never removed.

use crate::carousel::CarouselController;
use crate::types::{Millis, Slide};

/// A slide in the flattened, cross-carousel sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatSlide {
    /// Registry index of the carousel the slide belongs to.
    pub carousel: usize,
    /// Position within that carousel.
    pub position: usize,
    pub slide: Slide,
}

#[derive(Debug, Clone)]
pub struct CarouselRegistry {
    period: Millis,
    controllers: Vec<CarouselController>,
}

impl CarouselRegistry {
    /// An empty registry whose carousels will autoplay every `period` ms.
    pub fn new(period: Millis) -> Self {
        Self {
            period,
            controllers: Vec::new(),
        }
    }

    /// Build and register a controller; returns its index.
    pub fn register(&mut self, slides: Vec<Slide>, has_controls: bool, now: Millis) -> usize {
        let index = self.controllers.len();
        let controller = CarouselController::new(index, slides, self.period, now);
        self.controllers.push(if has_controls {
            controller
        } else {
            controller.without_controls()
        });
        index
    }

    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CarouselController> {
        self.controllers.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut CarouselController> {
        self.controllers.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CarouselController> {
        self.controllers.iter()
    }

    pub fn pause_all(&mut self) {
        for c in &mut self.controllers {
            c.stop_autoplay();
        }
    }

    /// Restart autoplay on every carousel, including ones that were stopped
    /// before the matching pause.
    pub fn resume_all(&mut self, now: Millis) {
        for c in &mut self.controllers {
            c.start_autoplay(now);
        }
    }

    /// Drive every autoplay task to `now`; returns the total number of advances.
    pub fn tick_all(&mut self, now: Millis) -> u64 {
        self.controllers
            .iter_mut()
            .fold(0, |total: u64, c| total.saturating_add(c.tick(now)))
    }

    /// All slides in registry order, each tagged with its origin.
    pub fn flatten(&self) -> Vec<FlatSlide> {
        self.controllers
            .iter()
            .flat_map(|c| {
                c.slides()
                    .iter()
                    .enumerate()
                    .map(move |(position, slide)| FlatSlide {
                        carousel: c.index(),
                        position,
                        slide: slide.clone(),
                    })
            })
            .collect()
    }
}
