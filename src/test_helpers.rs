//! Shared test utilities: fixture builders for slides, records, registries
//! and assembled pages.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let mut page = test_page(&[2, 0, 3]);
//! page.advance(3000);
//! assert_eq!(page.registry().get(0).unwrap().current_slide(), Some(1));
//! ```

use crate::catalog::Catalogs;
use crate::clipboard::MemoryClipboard;
use crate::config::BehaviorConfig;
use crate::page::{CarouselLayout, Page, PageLayout};
use crate::registry::CarouselRegistry;
use crate::types::{DetailRecord, Slide};

// =========================================================================
// Builders
// =========================================================================

/// `n` slides named `{prefix}-{i}.jpg`, each with a large variant.
pub fn slides(prefix: &str, n: usize) -> Vec<Slide> {
    (0..n)
        .map(|i| Slide {
            src: format!("{prefix}-{i}.jpg"),
            large: Some(format!("{prefix}-{i}-large.jpg")),
            alt: format!("{prefix} {i}"),
        })
        .collect()
}

/// A registry with one carousel per entry in `counts`, assembled at t=0.
pub fn registry_with(counts: &[usize]) -> CarouselRegistry {
    let mut registry = CarouselRegistry::new(3000);
    for (i, n) in counts.iter().enumerate() {
        registry.register(slides(&format!("c{i}"), *n), true, 0);
    }
    registry
}

pub fn record(id: &str, title: &str, features: &[&str], skills: &[&str]) -> DetailRecord {
    DetailRecord {
        id: id.to_string(),
        title: title.to_string(),
        summary: None,
        features: features.iter().map(|s| s.to_string()).collect(),
        skills: skills.iter().map(|s| s.to_string()).collect(),
        internal_link: None,
        repo_link: None,
    }
}

/// Project `alpha` and highlight `ops`.
pub fn test_catalogs() -> Catalogs {
    Catalogs {
        project: [record("alpha", "Alpha", &["fast"], &["Rust"])]
            .into_iter()
            .collect(),
        highlight: [record("ops", "Operations", &["on-call"], &[])]
            .into_iter()
            .collect(),
    }
}

pub fn layout_with(counts: &[usize]) -> PageLayout {
    PageLayout {
        carousels: counts
            .iter()
            .enumerate()
            .map(|(i, n)| CarouselLayout {
                slides: slides(&format!("c{i}"), *n),
                controls: true,
            })
            .collect(),
        ..PageLayout::default()
    }
}

/// A page with the given carousel sizes, a lightbox, and [`test_catalogs`],
/// assembled at t=0.
pub fn test_page(counts: &[usize]) -> Page {
    Page::assemble(
        &layout_with(counts),
        test_catalogs(),
        BehaviorConfig::default(),
        Box::new(MemoryClipboard::secure()),
        0,
    )
}
