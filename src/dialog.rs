//! Detail dialogs for project and highlight cards.
//!
//! A [`DialogPresenter`] looks a clicked card's id up in its catalog and, on a
//! hit, populates a [`DialogView`] that the renderer turns into markup.
//! Unknown ids leave the dialog exactly as it was.
//!
//! Both kinds share the populate logic. They differ in layout: the highlight
//! dialog shows only its title and detail list, while the project dialog also
//! shows a summary, skill tags, and the internal/source actions. Only the
//! project dialog falls back to the originating card for missing values.

use crate::catalog::Catalog;
use crate::config::DialogTexts;
use crate::types::DetailRecord;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogKind {
    Project,
    Highlight,
}

impl DialogKind {
    pub fn label(self) -> &'static str {
        match self {
            DialogKind::Project => "project",
            DialogKind::Highlight => "highlight",
        }
    }

    /// Whether the kind renders summary, skills and action links.
    pub fn has_full_layout(self) -> bool {
        matches!(self, DialogKind::Project)
    }
}

/// Text and attributes read from the card element that was clicked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardContext {
    /// The card's `<h3>` text.
    pub heading: Option<String>,
    /// The card's first paragraph.
    pub blurb: Option<String>,
    /// The card's `data-repo` attribute.
    pub repo: Option<String>,
}

/// One rendered list entry or tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Entry {
    Item(String),
    /// Muted stand-in shown when the source list is empty.
    Placeholder(String),
}

impl Entry {
    pub fn text(&self) -> &str {
        match self {
            Entry::Item(s) | Entry::Placeholder(s) => s,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Entry::Placeholder(_))
    }
}

/// Populated dialog content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DialogView {
    pub record_id: String,
    pub title: String,
    pub summary: Option<String>,
    pub features: Vec<Entry>,
    pub skills: Vec<Entry>,
    /// `None` hides the "full page" action.
    pub internal_link: Option<String>,
    /// `None` hides the "source" action.
    pub repo_link: Option<String>,
}

fn populate(items: &[String], placeholder: &str) -> Vec<Entry> {
    if items.is_empty() {
        return vec![Entry::Placeholder(placeholder.to_string())];
    }
    items.iter().cloned().map(Entry::Item).collect()
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[derive(Debug, Clone)]
pub struct DialogPresenter {
    kind: DialogKind,
    catalog: Catalog,
    texts: DialogTexts,
    open: bool,
    view: Option<DialogView>,
}

impl DialogPresenter {
    pub fn new(kind: DialogKind, catalog: Catalog, texts: DialogTexts) -> Self {
        Self {
            kind,
            catalog,
            texts,
            open: false,
            view: None,
        }
    }

    pub fn kind(&self) -> DialogKind {
        self.kind
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Content from the most recent successful open, kept after closing.
    pub fn view(&self) -> Option<&DialogView> {
        self.view.as_ref()
    }

    /// Populate from `id` and show. Returns `false`, changing nothing, when
    /// the catalog has no such record.
    pub fn open(&mut self, id: &str, card: &CardContext) -> bool {
        let Some(record) = self.catalog.get(id) else {
            debug!(kind = self.kind.label(), id, "no catalog record, dialog stays closed");
            return false;
        };
        self.view = Some(self.build_view(record, card));
        self.open = true;
        true
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    fn build_view(&self, record: &DetailRecord, card: &CardContext) -> DialogView {
        let texts = &self.texts;
        let (title, summary, repo_link) = match self.kind {
            DialogKind::Project => (
                non_blank(Some(record.title.as_str()))
                    .or_else(|| non_blank(card.heading.as_deref()))
                    .unwrap_or_else(|| texts.project_title.clone()),
                Some(
                    record
                        .summary
                        .clone()
                        .or_else(|| non_blank(card.blurb.as_deref()))
                        .unwrap_or_else(|| texts.summary_placeholder.clone()),
                ),
                record
                    .repo_link
                    .clone()
                    .or_else(|| non_blank(card.repo.as_deref()).filter(|r| r != "#")),
            ),
            DialogKind::Highlight => (
                non_blank(Some(record.title.as_str())).unwrap_or_else(|| texts.highlight_title.clone()),
                record.summary.clone(),
                record.repo_link.clone(),
            ),
        };

        DialogView {
            record_id: record.id.clone(),
            title,
            summary,
            features: populate(&record.features, &texts.features_placeholder),
            skills: populate(&record.skills, &texts.skills_placeholder),
            internal_link: record.internal_link.clone(),
            repo_link,
        }
    }
}
