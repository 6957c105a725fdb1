//! Static content catalogs for the detail dialogs.
//!
//! Two independent catalogs exist, one per dialog kind. They are read once at
//! startup from `catalog.toml` in the site directory, or from the stock
//! catalog embedded in the binary when the site has none:
//!
//! ```toml
//! [project.tracker]
//! title = "Market Ticker Dashboard"
//! summary = "..."
//! features = ["...", "..."]
//! skills = ["Python", "Flask"]
//! internal = "projects/tracker.html"
//! repo = "https://example.com/code/tracker"
//!
//! [highlight.systems]
//! title = "Systems Design"
//! details = ["..."]          # alias for `features`
//! ```
//!
//! Highlight records need a title and carry only `title` and `details`; any
//! key the highlight dialog cannot display is a load error.

use crate::dialog::DialogKind;
use crate::types::DetailRecord;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

const STOCK_CATALOG: &str = include_str!("../static/catalog.toml");

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("{kind} record '{id}' has an empty title")]
    EmptyTitle { kind: &'static str, id: String },
    #[error("{kind} record '{id}' does not support '{field}'")]
    UnsupportedField {
        kind: &'static str,
        id: String,
        field: &'static str,
    },
}

/// On-disk shape of a record; the id is the table key.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RecordEntry {
    #[serde(default)]
    title: String,
    summary: Option<String>,
    #[serde(default, alias = "details")]
    features: Vec<String>,
    #[serde(default)]
    skills: Vec<String>,
    internal: Option<String>,
    repo: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    #[serde(default)]
    project: BTreeMap<String, RecordEntry>,
    #[serde(default)]
    highlight: BTreeMap<String, RecordEntry>,
}

/// Read-only lookup from id to record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    records: BTreeMap<String, DetailRecord>,
}

impl Catalog {
    pub fn get(&self, id: &str) -> Option<&DetailRecord> {
        self.records.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn records(&self) -> impl Iterator<Item = &DetailRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<DetailRecord> for Catalog {
    fn from_iter<I: IntoIterator<Item = DetailRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().map(|r| (r.id.clone(), r)).collect(),
        }
    }
}

/// The project and highlight catalogs together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalogs {
    pub project: Catalog,
    pub highlight: Catalog,
}

impl RecordEntry {
    /// First key set that only the full dialog layout can display.
    fn full_layout_field(&self) -> Option<&'static str> {
        if self.summary.is_some() {
            Some("summary")
        } else if !self.skills.is_empty() {
            Some("skills")
        } else if self.internal.is_some() {
            Some("internal")
        } else if self.repo.is_some() {
            Some("repo")
        } else {
            None
        }
    }
}

fn build_catalog(
    kind: DialogKind,
    entries: BTreeMap<String, RecordEntry>,
) -> Result<Catalog, CatalogError> {
    entries
        .into_iter()
        .map(|(id, entry)| {
            if !kind.has_full_layout() {
                if entry.title.trim().is_empty() {
                    return Err(CatalogError::EmptyTitle {
                        kind: kind.label(),
                        id,
                    });
                }
                if let Some(field) = entry.full_layout_field() {
                    return Err(CatalogError::UnsupportedField {
                        kind: kind.label(),
                        id,
                        field,
                    });
                }
            }
            Ok(DetailRecord {
                id,
                title: entry.title,
                summary: entry.summary.filter(|s| !s.trim().is_empty()),
                features: entry.features,
                skills: entry.skills,
                internal_link: entry.internal.filter(|s| !s.is_empty()),
                repo_link: entry.repo.filter(|s| !s.is_empty() && s != "#"),
            })
        })
        .collect()
}

pub fn parse_catalogs(content: &str) -> Result<Catalogs, CatalogError> {
    let file: CatalogFile = toml::from_str(content)?;
    Ok(Catalogs {
        project: build_catalog(DialogKind::Project, file.project)?,
        highlight: build_catalog(DialogKind::Highlight, file.highlight)?,
    })
}

/// The catalog shipped with the binary.
pub fn stock_catalogs() -> Catalogs {
    parse_catalogs(STOCK_CATALOG).expect("stock catalog must parse")
}

/// Load `catalog.toml` from `site_dir`, or the stock catalog if absent.
pub fn load_catalogs(site_dir: &Path) -> Result<Catalogs, CatalogError> {
    let path = site_dir.join("catalog.toml");
    if !path.exists() {
        return Ok(stock_catalogs());
    }
    parse_catalogs(&fs::read_to_string(path)?)
}
