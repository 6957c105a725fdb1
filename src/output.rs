//! CLI output formatting.
//!
//! Each command has a `format_*` function returning lines, for testability,
//! and a `print_*` wrapper that writes them to stdout.
//!
//! ## Check
//!
//! ```text
//! Carousels
//! 001 3 slides
//! 002 (empty)
//!
//! Lightbox
//!     4 slides
//!
//! Projects
//! 001 tracker: Market Ticker Dashboard
//!
//! Highlights
//! 001 systems: Systems Design
//! ```
//!
//! ## Replay
//!
//! ```text
//! @    0 click slide 0/1
//!     carousels: 0:1* 1:- 2:0*
//!     lightbox: open 1/5 (carousel 0)
//! @ 3000 tick
//!     carousels: 0:1* 1:- 2:1*
//!     lightbox: closed
//! ```
//!
//! A `*` marks a carousel whose autoplay is running.

use crate::catalog::{Catalog, Catalogs};
use crate::page::{PageEvent, PageLayout, PageSnapshot, Target};
use crate::replay::StepReport;

fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn catalog_lines(heading: &str, catalog: &Catalog) -> Vec<String> {
    let mut lines = vec![heading.to_string()];
    if catalog.is_empty() {
        lines.push(format!("{}(none)", indent(1)));
    }
    for (i, record) in catalog.records().enumerate() {
        lines.push(format!("{} {}: {}", format_index(i + 1), record.id, record.title));
    }
    lines
}

pub fn format_check_output(layout: &PageLayout, catalogs: &Catalogs) -> Vec<String> {
    let mut lines = vec!["Carousels".to_string()];
    if layout.carousels.is_empty() {
        lines.push(format!("{}(none)", indent(1)));
    }
    for (i, carousel) in layout.carousels.iter().enumerate() {
        let detail = match carousel.slides.len() {
            0 => "(empty)".to_string(),
            1 => "1 slide".to_string(),
            n => format!("{n} slides"),
        };
        let controls = if carousel.controls { "" } else { ", no controls" };
        lines.push(format!("{} {}{}", format_index(i + 1), detail, controls));
    }

    lines.push(String::new());
    lines.push("Lightbox".to_string());
    let total: usize = layout.carousels.iter().map(|c| c.slides.len()).sum();
    lines.push(match (layout.lightbox, total) {
        (false, _) => format!("{}not on page", indent(1)),
        (true, 0) => format!("{}inert (no slides)", indent(1)),
        (true, n) => format!("{}{} slides", indent(1), n),
    });

    lines.push(String::new());
    lines.extend(catalog_lines("Projects", &catalogs.project));
    lines.push(String::new());
    lines.extend(catalog_lines("Highlights", &catalogs.highlight));
    lines
}

pub fn print_check_output(layout: &PageLayout, catalogs: &Catalogs) {
    for line in format_check_output(layout, catalogs) {
        println!("{}", line);
    }
}

fn describe_event(event: Option<&PageEvent>) -> String {
    let Some(event) = event else {
        return "tick".to_string();
    };
    match event {
        PageEvent::Key(key) => format!("key {:?}", key),
        PageEvent::Navigate(target) => format!("navigate {target}"),
        PageEvent::Click(target) => match target {
            Target::ProjectCard { id, .. } => format!("click project {id}"),
            Target::HighlightCard { id } => format!("click highlight {id}"),
            Target::CarouselPrev(i) => format!("click prev {i}"),
            Target::CarouselNext(i) => format!("click next {i}"),
            Target::Slide { carousel, position } => format!("click slide {carousel}/{position}"),
            Target::LightboxPrev => "click lightbox prev".to_string(),
            Target::LightboxNext => "click lightbox next".to_string(),
            Target::LightboxClose => "click lightbox close".to_string(),
            Target::LightboxBackdrop => "click lightbox backdrop".to_string(),
            Target::DialogClose(kind) => format!("click {} close", kind.label()),
            Target::DialogBackdrop(kind) => format!("click {} backdrop", kind.label()),
            Target::CopyChip(i) => format!("click copy {i}"),
        },
    }
}

fn snapshot_lines(snapshot: &PageSnapshot) -> Vec<String> {
    let carousels: Vec<String> = snapshot
        .carousels
        .iter()
        .map(|c| {
            let current = c.current.map_or("-".to_string(), |i| i.to_string());
            let running = if c.autoplay && c.slides > 0 { "*" } else { "" };
            format!("{}:{}{}", c.index, current, running)
        })
        .collect();
    let mut lines = vec![format!("{}carousels: {}", indent(1), carousels.join(" "))];

    if let Some(lb) = &snapshot.lightbox {
        lines.push(match (lb.open, lb.carousel) {
            (true, Some(c)) => format!(
                "{}lightbox: open {}/{} (carousel {})",
                indent(1),
                lb.flat_index + 1,
                lb.total,
                c
            ),
            _ => format!("{}lightbox: closed", indent(1)),
        });
    }
    for (name, dialog) in [("project", &snapshot.project), ("highlight", &snapshot.highlight)] {
        if let (true, Some(title)) = (dialog.open, &dialog.title) {
            lines.push(format!("{}{} dialog: {}", indent(1), name, title));
        }
    }
    for (i, chip) in snapshot.chips.iter().enumerate() {
        if chip.feedback_visible {
            lines.push(format!("{}copy {}: {}", indent(1), i, chip.label));
        }
    }
    if let Some(anchor) = &snapshot.scrolled_to {
        lines.push(format!("{}scrolled to #{}", indent(1), anchor));
    }
    lines
}

pub fn format_replay_output(reports: &[StepReport]) -> Vec<String> {
    let mut lines = Vec::new();
    for report in reports {
        let suffix = if report.prevent_default { " (default prevented)" } else { "" };
        lines.push(format!(
            "@{:>5} {}{}",
            report.at,
            describe_event(report.event.as_ref()),
            suffix
        ));
        lines.extend(snapshot_lines(&report.snapshot));
    }
    lines
}

pub fn print_replay_output(reports: &[StepReport]) {
    for line in format_replay_output(reports) {
        println!("{}", line);
    }
}
