//! Shared types used across the behavior components.
//!
//! Slides and detail records are immutable after page assembly; the body
//! state is the only page-level mutable surface outside the components.

use serde::{Deserialize, Serialize};

/// Monotonic milliseconds supplied by the caller with every event.
pub type Millis = u64;

/// One displayable image belonging to exactly one carousel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    /// Source shown inside the carousel.
    pub src: String,
    /// Higher resolution source, preferred by the lightbox when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large: Option<String>,
    #[serde(default)]
    pub alt: String,
}

impl Slide {
    /// The source a full-view display should load: `large` when present.
    pub fn display_src(&self) -> &str {
        self.large.as_deref().unwrap_or(&self.src)
    }
}

/// A catalog entry rendered by a detail dialog.
///
/// Identity is `id`. Records are built once from static configuration and
/// never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailRecord {
    pub id: String,
    pub title: String,
    pub summary: Option<String>,
    pub features: Vec<String>,
    pub skills: Vec<String>,
    /// Link to a page on the same site with the full write-up.
    pub internal_link: Option<String>,
    /// Link to the source repository.
    pub repo_link: Option<String>,
}

/// Keys the behavior layer reacts to. Anything else never reaches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Escape,
    Enter,
}

/// Element holding keyboard focus, when the behavior layer moved it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Focus {
    LightboxNext,
}

/// Page-level state owned by `<body>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BodyState {
    /// `overflow: hidden` while an overlay owns the viewport.
    pub scroll_locked: bool,
    pub focus: Option<Focus>,
}
