//! Navigation helper for in-page anchors and sibling pages.
//!
//! - `#id` targets scroll to the element on the current page, or do nothing
//!   when no such element exists.
//! - An empty target means `index.html`.
//! - A target naming the current file is a no-op; anything else is a full
//!   navigation.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Smooth-scroll to the element with this id.
    ScrollTo(String),
    /// Set `location.href` to this path.
    Goto(String),
    Stay,
}

/// The file name a location path refers to, `index.html` for a directory.
pub fn current_file(path: &str) -> &str {
    match path.rsplit('/').next() {
        Some(last) if !last.is_empty() => last,
        _ => "index.html",
    }
}

pub fn resolve(target: &str, current_path: &str, has_element: impl Fn(&str) -> bool) -> Navigation {
    let target = if target.is_empty() { "index.html" } else { target };
    if let Some(id) = target.strip_prefix('#') {
        return if has_element(id) {
            Navigation::ScrollTo(id.to_string())
        } else {
            Navigation::Stay
        };
    }
    if current_file(current_path) == target {
        return Navigation::Stay;
    }
    Navigation::Goto(target.to_string())
}
