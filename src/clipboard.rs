//! Copy-to-clipboard chips.
//!
//! A chip copies its value through a [`Clipboard`], preferring the
//! asynchronous clipboard API and falling back to the legacy selection copy
//! when that API is unavailable. The confirmation is shown whatever the
//! outcome: the label switches to the "copied" text and the card's feedback
//! element becomes visible, both for a fixed duration.

use crate::types::Millis;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("clipboard write rejected: {0}")]
    Rejected(String),
}

pub trait Clipboard {
    /// The asynchronous clipboard API. `None` when it is unavailable, e.g.
    /// outside a secure context.
    fn write_text(&mut self, value: &str) -> Option<Result<(), ClipboardError>>;

    /// Copy through a temporary selection.
    fn legacy_copy(&mut self, value: &str) -> Result<(), ClipboardError>;
}

/// In-memory clipboard used by the replay driver and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    /// Whether the asynchronous API is available.
    pub secure: bool,
    /// Make every write fail.
    pub reject: bool,
    pub contents: Option<String>,
}

impl MemoryClipboard {
    pub fn secure() -> Self {
        Self {
            secure: true,
            ..Self::default()
        }
    }

    fn store(&mut self, value: &str) -> Result<(), ClipboardError> {
        if self.reject {
            return Err(ClipboardError::Rejected("permission denied".into()));
        }
        self.contents = Some(value.to_string());
        Ok(())
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, value: &str) -> Option<Result<(), ClipboardError>> {
        if !self.secure {
            return None;
        }
        Some(self.store(value))
    }

    fn legacy_copy(&mut self, value: &str) -> Result<(), ClipboardError> {
        self.store(value)
    }
}

/// Copy `value`, using the fallback only when the primary API is missing.
pub fn copy_text(clipboard: &mut dyn Clipboard, value: &str) -> Result<(), ClipboardError> {
    match clipboard.write_text(value) {
        Some(result) => result,
        None => clipboard.legacy_copy(value),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    /// The copy failed; feedback was still shown.
    Failed,
    /// The chip has no value to copy.
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyChip {
    value: Option<String>,
    default_label: String,
    label: String,
    feedback_visible: bool,
    reset_at: Option<Millis>,
}

impl CopyChip {
    pub fn new(value: Option<String>, label: impl Into<String>) -> Self {
        let label = label.into();
        let default_label = if label.trim().is_empty() {
            "Copy".to_string()
        } else {
            label.trim().to_string()
        };
        Self {
            value: value.filter(|v| !v.is_empty()),
            label: default_label.clone(),
            default_label,
            feedback_visible: false,
            reset_at: None,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn feedback_visible(&self) -> bool {
        self.feedback_visible
    }

    /// Handle a click. Re-clicking while the confirmation shows restarts its
    /// countdown.
    pub fn activate(
        &mut self,
        clipboard: &mut dyn Clipboard,
        copied_label: &str,
        duration: Millis,
        now: Millis,
    ) -> CopyOutcome {
        let Some(value) = self.value.as_deref() else {
            return CopyOutcome::Ignored;
        };
        let outcome = match copy_text(clipboard, value) {
            Ok(()) => CopyOutcome::Copied,
            Err(e) => {
                tracing::debug!(error = %e, "copy failed, showing feedback anyway");
                CopyOutcome::Failed
            }
        };
        self.label = copied_label.to_string();
        self.feedback_visible = true;
        self.reset_at = Some(now.saturating_add(duration));
        outcome
    }

    /// Restore the default label once the confirmation has expired.
    pub fn tick(&mut self, now: Millis) {
        if self.reset_at.is_some_and(|at| now >= at) {
            self.label = self.default_label.clone();
            self.feedback_visible = false;
            self.reset_at = None;
        }
    }
}
