//! Page assembly and event dispatch.
//!
//! A [`Page`] is built once from a [`PageLayout`]: every carousel is
//! registered in creation order, the lightbox snapshots the registry, and the
//! two dialogs receive their catalogs. After that, every browser event becomes
//! a [`PageEvent`] handed to [`Page::dispatch`] together with the current
//! time, so component contracts can be exercised without a document.
//!
//! ## Layout File
//!
//! `layout.json` in the site directory describes what the page contains:
//!
//! ```json
//! {
//!   "current_path": "/projects.html",
//!   "carousels": [
//!     { "slides": [{ "src": "a.jpg", "large": "a@2x.jpg", "alt": "A" }] },
//!     { "slides": [], "controls": false }
//!   ],
//!   "lightbox": true,
//!   "anchors": ["work"],
//!   "copy_chips": [{ "value": "me@example.com", "label": "Copy email" }]
//! }
//! ```
//!
//! ## Escape Policy
//!
//! Escape closes the lightbox when it is open and closes both dialogs, so
//! no overlay survives it regardless of which one was opened last.

use crate::carousel::Step;
use crate::catalog::Catalogs;
use crate::clipboard::{Clipboard, CopyChip};
use crate::config::BehaviorConfig;
use crate::dialog::{CardContext, DialogKind, DialogPresenter};
use crate::lightbox::Lightbox;
use crate::nav::{self, Navigation};
use crate::registry::CarouselRegistry;
use crate::types::{BodyState, Key, Millis, Slide};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn yes() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageLayout {
    /// `location.pathname` of the page.
    pub current_path: String,
    pub carousels: Vec<CarouselLayout>,
    /// Whether the page carries the lightbox element.
    pub lightbox: bool,
    /// Element ids that in-page navigation can scroll to.
    pub anchors: Vec<String>,
    pub copy_chips: Vec<CopyChipLayout>,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            current_path: "/index.html".to_string(),
            carousels: Vec::new(),
            lightbox: true,
            anchors: Vec::new(),
            copy_chips: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CarouselLayout {
    #[serde(default)]
    pub slides: Vec<Slide>,
    /// Whether the carousel has prev/next buttons.
    #[serde(default = "yes")]
    pub controls: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CopyChipLayout {
    pub value: Option<String>,
    #[serde(default)]
    pub label: String,
}

/// Load `layout.json` from `site_dir`; a missing file yields an empty page.
pub fn load_layout(site_dir: &Path) -> Result<PageLayout, LayoutError> {
    let path = site_dir.join("layout.json");
    if !path.exists() {
        return Ok(PageLayout::default());
    }
    Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
}

/// Element that received a click.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    ProjectCard {
        id: String,
        #[serde(default)]
        card: CardContext,
    },
    HighlightCard {
        id: String,
    },
    CarouselPrev(usize),
    CarouselNext(usize),
    /// A slide image inside a carousel.
    Slide {
        carousel: usize,
        position: usize,
    },
    LightboxPrev,
    LightboxNext,
    LightboxClose,
    LightboxBackdrop,
    DialogClose(DialogKind),
    DialogBackdrop(DialogKind),
    CopyChip(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageEvent {
    Click(Target),
    Key(Key),
    /// A nav link was followed.
    Navigate(String),
}

/// What the browser should do with the event after dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dispatch {
    pub prevent_default: bool,
    pub navigation: Option<Navigation>,
}

impl Dispatch {
    fn prevented() -> Self {
        Self {
            prevent_default: true,
            navigation: None,
        }
    }
}

pub struct Page {
    config: BehaviorConfig,
    registry: CarouselRegistry,
    lightbox: Option<Lightbox>,
    project: DialogPresenter,
    highlight: DialogPresenter,
    body: BodyState,
    chips: Vec<CopyChip>,
    clipboard: Box<dyn Clipboard>,
    location: String,
    anchors: Vec<String>,
    scrolled_to: Option<String>,
}

impl Page {
    pub fn assemble(
        layout: &PageLayout,
        catalogs: Catalogs,
        config: BehaviorConfig,
        clipboard: Box<dyn Clipboard>,
        now: Millis,
    ) -> Self {
        let mut registry = CarouselRegistry::new(config.carousel.autoplay_ms);
        for carousel in &layout.carousels {
            registry.register(carousel.slides.clone(), carousel.controls, now);
        }
        let lightbox = layout.lightbox.then(|| Lightbox::new(&registry));
        let chips = layout
            .copy_chips
            .iter()
            .map(|c| CopyChip::new(c.value.clone(), c.label.clone()))
            .collect();

        debug!(
            carousels = registry.len(),
            lightbox = lightbox.is_some(),
            "page assembled"
        );

        Self {
            project: DialogPresenter::new(
                DialogKind::Project,
                catalogs.project,
                config.dialog.clone(),
            ),
            highlight: DialogPresenter::new(
                DialogKind::Highlight,
                catalogs.highlight,
                config.dialog.clone(),
            ),
            config,
            registry,
            lightbox,
            body: BodyState::default(),
            chips,
            clipboard,
            location: layout.current_path.clone(),
            anchors: layout.anchors.clone(),
            scrolled_to: None,
        }
    }

    pub fn registry(&self) -> &CarouselRegistry {
        &self.registry
    }

    pub fn lightbox(&self) -> Option<&Lightbox> {
        self.lightbox.as_ref()
    }

    pub fn dialog(&self, kind: DialogKind) -> &DialogPresenter {
        match kind {
            DialogKind::Project => &self.project,
            DialogKind::Highlight => &self.highlight,
        }
    }

    fn dialog_mut(&mut self, kind: DialogKind) -> &mut DialogPresenter {
        match kind {
            DialogKind::Project => &mut self.project,
            DialogKind::Highlight => &mut self.highlight,
        }
    }

    pub fn body(&self) -> &BodyState {
        &self.body
    }

    pub fn chips(&self) -> &[CopyChip] {
        &self.chips
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn scrolled_to(&self) -> Option<&str> {
        self.scrolled_to.as_deref()
    }

    /// Run every timer up to `now`.
    pub fn advance(&mut self, now: Millis) {
        self.registry.tick_all(now);
        for chip in &mut self.chips {
            chip.tick(now);
        }
    }

    /// Apply one event at time `now`. Timers due before `now` fire first.
    pub fn dispatch(&mut self, event: PageEvent, now: Millis) -> Dispatch {
        self.advance(now);
        match event {
            PageEvent::Click(target) => self.click(target, now),
            PageEvent::Key(key) => self.key(key, now),
            PageEvent::Navigate(target) => self.navigate(&target),
        }
    }

    fn click(&mut self, target: Target, now: Millis) -> Dispatch {
        match target {
            Target::ProjectCard { id, card } => {
                self.project.open(&id, &card);
                Dispatch::prevented()
            }
            Target::HighlightCard { id } => {
                self.highlight.open(&id, &CardContext::default());
                Dispatch::prevented()
            }
            Target::CarouselPrev(i) => {
                self.step_carousel(i, Step::Prev, now);
                Dispatch::default()
            }
            Target::CarouselNext(i) => {
                self.step_carousel(i, Step::Next, now);
                Dispatch::default()
            }
            Target::Slide { carousel, position } => {
                if let Some(lightbox) = self.lightbox.as_mut()
                    && let Some(flat) = lightbox.position_of(carousel, position)
                {
                    lightbox.open(flat as i64, &mut self.registry, &mut self.body);
                }
                Dispatch::default()
            }
            Target::LightboxPrev => {
                if let Some(lightbox) = self.lightbox.as_mut() {
                    lightbox.prev();
                }
                Dispatch::default()
            }
            Target::LightboxNext => {
                if let Some(lightbox) = self.lightbox.as_mut() {
                    lightbox.next();
                }
                Dispatch::default()
            }
            Target::LightboxClose | Target::LightboxBackdrop => {
                if let Some(lightbox) = self.lightbox.as_mut() {
                    lightbox.close(&mut self.registry, &mut self.body, now);
                }
                Dispatch::default()
            }
            Target::DialogClose(kind) | Target::DialogBackdrop(kind) => {
                self.dialog_mut(kind).close();
                Dispatch::default()
            }
            Target::CopyChip(i) => {
                if let Some(chip) = self.chips.get_mut(i) {
                    chip.activate(
                        self.clipboard.as_mut(),
                        &self.config.copy.copied_label,
                        self.config.copy.feedback_ms,
                        now,
                    );
                }
                Dispatch::prevented()
            }
        }
    }

    fn step_carousel(&mut self, index: usize, step: Step, now: Millis) {
        if let Some(carousel) = self.registry.get_mut(index)
            && carousel.has_controls()
        {
            carousel.navigate(step, now);
        }
    }

    fn key(&mut self, key: Key, now: Millis) -> Dispatch {
        let mut prevent_default = false;
        if let Some(lightbox) = self.lightbox.as_mut() {
            prevent_default = lightbox.handle_key(key, &mut self.registry, &mut self.body, now);
        }
        if key == Key::Escape {
            self.project.close();
            self.highlight.close();
        }
        Dispatch {
            prevent_default,
            navigation: None,
        }
    }

    fn navigate(&mut self, target: &str) -> Dispatch {
        let anchors = &self.anchors;
        let navigation = nav::resolve(target, &self.location, |id| {
            anchors.iter().any(|a| a == id)
        });
        match &navigation {
            Navigation::ScrollTo(id) => self.scrolled_to = Some(id.clone()),
            Navigation::Goto(path) => {
                self.location = path.clone();
                self.scrolled_to = None;
            }
            Navigation::Stay => {}
        }
        Dispatch {
            prevent_default: true,
            navigation: Some(navigation),
        }
    }

    pub fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            location: self.location.clone(),
            scrolled_to: self.scrolled_to.clone(),
            carousels: self
                .registry
                .iter()
                .map(|c| CarouselSnapshot {
                    index: c.index(),
                    slides: c.len(),
                    current: c.current_slide(),
                    autoplay: c.is_autoplaying(),
                })
                .collect(),
            lightbox: self.lightbox.as_ref().map(|l| LightboxSnapshot {
                open: l.is_open(),
                total: l.total(),
                flat_index: l.flat_index(),
                carousel: l.is_open().then(|| l.current().map(|f| f.carousel)).flatten(),
                image_src: l.is_open().then(|| l.view().image_src.clone()),
            }),
            project: DialogSnapshot::of(&self.project),
            highlight: DialogSnapshot::of(&self.highlight),
            body: self.body.clone(),
            chips: self
                .chips
                .iter()
                .map(|c| ChipSnapshot {
                    label: c.label().to_string(),
                    feedback_visible: c.feedback_visible(),
                })
                .collect(),
        }
    }
}

/// Serializable view of the whole page, used by the replay output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageSnapshot {
    pub location: String,
    pub scrolled_to: Option<String>,
    pub carousels: Vec<CarouselSnapshot>,
    pub lightbox: Option<LightboxSnapshot>,
    pub project: DialogSnapshot,
    pub highlight: DialogSnapshot,
    pub body: BodyState,
    pub chips: Vec<ChipSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CarouselSnapshot {
    pub index: usize,
    pub slides: usize,
    pub current: Option<usize>,
    pub autoplay: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LightboxSnapshot {
    pub open: bool,
    pub total: usize,
    pub flat_index: usize,
    /// Origin carousel of the displayed slide, while open.
    pub carousel: Option<usize>,
    pub image_src: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DialogSnapshot {
    pub open: bool,
    pub record: Option<String>,
    pub title: Option<String>,
}

impl DialogSnapshot {
    fn of(dialog: &DialogPresenter) -> Self {
        let view = dialog.view().filter(|_| dialog.is_open());
        Self {
            open: dialog.is_open(),
            record: view.map(|v| v.record_id.clone()),
            title: view.map(|v| v.title.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChipSnapshot {
    pub label: String,
    pub feedback_visible: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{layout_with, test_catalogs, test_page};

    #[test]
    fn assembles_registry_in_layout_order() {
        let page = test_page(&[2, 0, 3]);
        let snap = page.snapshot();
        let sizes: Vec<usize> = snap.carousels.iter().map(|c| c.slides).collect();
        assert_eq!(sizes, vec![2, 0, 3]);
        assert_eq!(snap.lightbox.unwrap().total, 5);
    }

    #[test]
    fn slide_click_opens_lightbox_at_flat_position() {
        let mut page = test_page(&[2, 0, 3]);
        page.dispatch(
            PageEvent::Click(Target::Slide {
                carousel: 2,
                position: 1,
            }),
            500,
        );
        let snap = page.snapshot();
        let lightbox = snap.lightbox.unwrap();
        assert!(lightbox.open);
        assert_eq!(lightbox.flat_index, 3);
        assert_eq!(lightbox.carousel, Some(2));
        assert!(snap.body.scroll_locked);
        assert!(snap.carousels.iter().all(|c| !c.autoplay));
    }

    #[test]
    fn carousels_stay_still_while_lightbox_open() {
        let mut page = test_page(&[2, 3]);
        page.dispatch(
            PageEvent::Click(Target::Slide {
                carousel: 0,
                position: 0,
            }),
            100,
        );
        page.advance(60_000);
        assert!(page.snapshot().carousels.iter().all(|c| c.current == Some(0)));

        page.dispatch(PageEvent::Click(Target::LightboxBackdrop), 60_000);
        page.advance(63_000);
        assert!(page.snapshot().carousels.iter().all(|c| c.current == Some(1)));
    }

    #[test]
    fn arrow_keys_prevent_default_only_while_open() {
        let mut page = test_page(&[3]);
        assert!(!page.dispatch(PageEvent::Key(Key::ArrowRight), 0).prevent_default);
        page.dispatch(
            PageEvent::Click(Target::Slide {
                carousel: 0,
                position: 0,
            }),
            0,
        );
        assert!(page.dispatch(PageEvent::Key(Key::ArrowRight), 0).prevent_default);
        assert_eq!(page.lightbox().unwrap().flat_index(), 1);
        assert!(page.dispatch(PageEvent::Key(Key::Escape), 0).prevent_default);
        assert!(!page.lightbox().unwrap().is_open());
    }

    #[test]
    fn escape_closes_every_overlay() {
        let mut page = test_page(&[1]);
        page.dispatch(
            PageEvent::Click(Target::ProjectCard {
                id: "alpha".into(),
                card: CardContext::default(),
            }),
            0,
        );
        page.dispatch(
            PageEvent::Click(Target::HighlightCard { id: "ops".into() }),
            0,
        );
        assert!(page.dialog(DialogKind::Project).is_open());
        assert!(page.dialog(DialogKind::Highlight).is_open());

        page.dispatch(PageEvent::Key(Key::Escape), 0);
        assert!(!page.dialog(DialogKind::Project).is_open());
        assert!(!page.dialog(DialogKind::Highlight).is_open());
    }

    #[test]
    fn backdrop_closes_only_its_dialog() {
        let mut page = test_page(&[]);
        page.dispatch(
            PageEvent::Click(Target::ProjectCard {
                id: "alpha".into(),
                card: CardContext::default(),
            }),
            0,
        );
        page.dispatch(
            PageEvent::Click(Target::HighlightCard { id: "ops".into() }),
            0,
        );
        page.dispatch(
            PageEvent::Click(Target::DialogBackdrop(DialogKind::Highlight)),
            0,
        );
        assert!(page.dialog(DialogKind::Project).is_open());
        assert!(!page.dialog(DialogKind::Highlight).is_open());
    }

    #[test]
    fn unknown_card_still_prevents_default() {
        let mut page = test_page(&[]);
        let result = page.dispatch(
            PageEvent::Click(Target::ProjectCard {
                id: "ghost".into(),
                card: CardContext::default(),
            }),
            0,
        );
        assert!(result.prevent_default);
        assert!(!page.dialog(DialogKind::Project).is_open());
    }

    #[test]
    fn carousel_without_controls_ignores_buttons() {
        let mut layout = layout_with(&[3]);
        layout.carousels[0].controls = false;
        let mut page = Page::assemble(
            &layout,
            test_catalogs(),
            BehaviorConfig::default(),
            Box::new(crate::clipboard::MemoryClipboard::secure()),
            0,
        );
        page.dispatch(PageEvent::Click(Target::CarouselNext(0)), 10);
        assert_eq!(page.registry().get(0).unwrap().current_slide(), Some(0));
    }

    #[test]
    fn carousel_buttons_reset_autoplay_phase() {
        let mut page = test_page(&[4]);
        page.dispatch(PageEvent::Click(Target::CarouselNext(0)), 2000);
        page.advance(3000);
        assert_eq!(page.registry().get(0).unwrap().current_slide(), Some(1));
        page.advance(5000);
        assert_eq!(page.registry().get(0).unwrap().current_slide(), Some(2));
    }

    #[test]
    fn out_of_range_targets_are_ignored() {
        let mut page = test_page(&[2]);
        page.dispatch(PageEvent::Click(Target::CarouselNext(9)), 0);
        page.dispatch(
            PageEvent::Click(Target::Slide {
                carousel: 9,
                position: 0,
            }),
            0,
        );
        page.dispatch(PageEvent::Click(Target::CopyChip(4)), 0);
        assert!(!page.lightbox().unwrap().is_open());
    }

    #[test]
    fn page_without_lightbox_ignores_slide_clicks() {
        let mut layout = layout_with(&[2]);
        layout.lightbox = false;
        let mut page = Page::assemble(
            &layout,
            test_catalogs(),
            BehaviorConfig::default(),
            Box::new(crate::clipboard::MemoryClipboard::secure()),
            0,
        );
        page.dispatch(
            PageEvent::Click(Target::Slide {
                carousel: 0,
                position: 1,
            }),
            0,
        );
        assert!(page.snapshot().lightbox.is_none());
        assert!(page.registry().get(0).unwrap().is_autoplaying());
    }

    #[test]
    fn copy_chip_feedback_runs_on_page_clock() {
        let mut layout = layout_with(&[]);
        layout.copy_chips.push(CopyChipLayout {
            value: Some("hello".into()),
            label: "Copy".into(),
        });
        let mut page = Page::assemble(
            &layout,
            test_catalogs(),
            BehaviorConfig::default(),
            Box::new(crate::clipboard::MemoryClipboard::default()),
            0,
        );
        page.dispatch(PageEvent::Click(Target::CopyChip(0)), 100);
        assert_eq!(page.chips()[0].label(), "Copied!");
        page.advance(1700);
        assert_eq!(page.chips()[0].label(), "Copy");
    }

    #[test]
    fn navigation_updates_location() {
        let mut layout = layout_with(&[]);
        layout.anchors.push("work".into());
        let mut page = Page::assemble(
            &layout,
            test_catalogs(),
            BehaviorConfig::default(),
            Box::new(crate::clipboard::MemoryClipboard::secure()),
            0,
        );
        let result = page.dispatch(PageEvent::Navigate("#work".into()), 0);
        assert_eq!(result.navigation, Some(Navigation::ScrollTo("work".into())));
        assert_eq!(page.scrolled_to(), Some("work"));

        page.dispatch(PageEvent::Navigate("about.html".into()), 0);
        assert_eq!(page.location(), "about.html");
        assert_eq!(page.scrolled_to(), None);
    }

    #[test]
    fn events_deserialize_from_json() {
        let events: Vec<PageEvent> = serde_json::from_str(
            r##"[
                {"click": {"project_card": {"id": "alpha", "card": {"repo": "https://example.com"}}}},
                {"click": {"highlight_card": {"id": "ops"}}},
                {"click": {"slide": {"carousel": 0, "position": 1}}},
                {"click": "lightbox_next"},
                {"click": {"dialog_close": "project"}},
                {"click": {"carousel_prev": 2}},
                {"key": "Escape"},
                {"navigate": "#work"}
            ]"##,
        )
        .unwrap();
        assert_eq!(events.len(), 8);
        assert_eq!(events[3], PageEvent::Click(Target::LightboxNext));
        assert_eq!(events[6], PageEvent::Key(Key::Escape));
    }

    #[test]
    fn layout_defaults_when_file_missing() {
        let tmp = tempfile::TempDir::new().unwrap();
        let layout = load_layout(tmp.path()).unwrap();
        assert!(layout.lightbox);
        assert!(layout.carousels.is_empty());
    }

    #[test]
    fn layout_parses_slides_and_controls() {
        let layout: PageLayout = serde_json::from_str(
            r#"{
                "carousels": [
                    {"slides": [{"src": "a.jpg", "large": "a-large.jpg", "alt": "A"}]},
                    {"controls": false}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(layout.carousels.len(), 2);
        assert!(layout.carousels[0].controls);
        assert_eq!(layout.carousels[0].slides[0].display_src(), "a-large.jpg");
        assert!(!layout.carousels[1].controls);
        assert!(layout.carousels[1].slides.is_empty());
        assert_eq!(layout.current_path, "/index.html");
    }
}
