//! Timed event scripts.
//!
//! A script is a JSON list of steps. Each step names the page clock time and,
//! optionally, an event to dispatch at that time; a step without an event
//! only lets timers run.
//!
//! ```json
//! {
//!   "steps": [
//!     { "at": 0,    "event": { "click": { "slide": { "carousel": 0, "position": 1 } } } },
//!     { "at": 500,  "event": { "key": "ArrowRight" } },
//!     { "at": 900,  "event": { "key": "Escape" } },
//!     { "at": 3900 }
//!   ]
//! }
//! ```

use crate::page::{Page, PageEvent, PageSnapshot};
use crate::types::Millis;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReplayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("step {step} goes back in time ({at} ms after {previous} ms)")]
    TimeTravel {
        step: usize,
        at: Millis,
        previous: Millis,
    },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    pub steps: Vec<ScriptStep>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptStep {
    pub at: Millis,
    #[serde(default)]
    pub event: Option<PageEvent>,
}

/// State of the page after one step.
#[derive(Debug, Clone)]
pub struct StepReport {
    pub at: Millis,
    pub event: Option<PageEvent>,
    pub prevent_default: bool,
    pub snapshot: PageSnapshot,
}

pub fn load_script(path: &Path) -> Result<Script, ReplayError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Run every step against `page`, in order.
///
/// Step times must not decrease. The page keeps the final state.
pub fn replay(page: &mut Page, script: &Script) -> Result<Vec<StepReport>, ReplayError> {
    let mut previous = 0;
    let mut reports = Vec::with_capacity(script.steps.len());
    for (i, step) in script.steps.iter().enumerate() {
        if step.at < previous {
            return Err(ReplayError::TimeTravel {
                step: i + 1,
                at: step.at,
                previous,
            });
        }
        previous = step.at;

        let prevent_default = match &step.event {
            Some(event) => page.dispatch(event.clone(), step.at).prevent_default,
            None => {
                page.advance(step.at);
                false
            }
        };
        reports.push(StepReport {
            at: step.at,
            event: step.event.clone(),
            prevent_default,
            snapshot: page.snapshot(),
        });
    }
    Ok(reports)
}
