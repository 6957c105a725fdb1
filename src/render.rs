//! HTML rendering of the behavior layer's visible state.
//!
//! Markup mirrors the classes and ids the site stylesheet targets: dialogs
//! live in a `.modal-backdrop` that gains `open`, carousel slides gain
//! `active`, and the lightbox toggles `aria-hidden`. Uses
//! [maud](https://maud.lambda.xyz/), so every interpolated string is escaped.

use crate::carousel::CarouselController;
use crate::clipboard::CopyChip;
use crate::dialog::{DialogKind, DialogPresenter, DialogView, Entry};
use crate::lightbox::Lightbox;
use crate::page::Page;
use maud::{Markup, html};

fn backdrop_class(open: bool) -> &'static str {
    if open { "modal-backdrop open" } else { "modal-backdrop" }
}

/// Renders a list of entries, placeholders muted.
fn render_entries(entries: &[Entry]) -> Markup {
    html! {
        @for entry in entries {
            @if entry.is_placeholder() {
                li.muted { (entry.text()) }
            } @else {
                li { (entry.text()) }
            }
        }
    }
}

fn render_tags(entries: &[Entry]) -> Markup {
    html! {
        @for entry in entries {
            @if entry.is_placeholder() {
                span.muted { (entry.text()) }
            } @else {
                span.tag { (entry.text()) }
            }
        }
    }
}

fn render_project_body(view: &DialogView) -> Markup {
    html! {
        button #modal-close .modal-close aria-label="Close project dialog" { "✕" }
        div.modal-head {
            strong #modal-title { (view.title) }
            @if let Some(summary) = &view.summary {
                p #modal-summary .modal-summary.muted { (summary) }
            }
        }
        div.modal-meta {
            div {
                h4 { "Features" }
                ul #modal-features .modal-list { (render_entries(&view.features)) }
            }
            div {
                h4 { "Skills used" }
                div #modal-skills .modal-tags { (render_tags(&view.skills)) }
            }
        }
        div.modal-actions {
            @if let Some(href) = &view.internal_link {
                a #modal-internal .btn href=(href) { "Full project page" }
            }
            @if let Some(href) = &view.repo_link {
                a #modal-repo .project-btn href=(href) target="_blank" rel="noreferrer" {
                    "Source Code"
                }
            }
        }
    }
}

fn render_highlight_body(view: &DialogView) -> Markup {
    html! {
        button #highlight-close .modal-close aria-label="Close highlight dialog" { "✕" }
        div.modal-head {
            strong #highlight-title { (view.title) }
        }
        div {
            h4 { "Details" }
            ul #highlight-list .modal-list { (render_entries(&view.features)) }
        }
    }
}

/// Renders a dialog, open or closed. A dialog that was never populated
/// renders as an empty closed shell.
pub fn render_dialog(dialog: &DialogPresenter) -> Markup {
    let open = dialog.is_open();
    html! {
        div class=(backdrop_class(open)) data-dialog=(dialog.kind().label()) {
            div.modal.highlight-modal role="dialog" aria-modal="true"
                aria-hidden=(if open { "false" } else { "true" }) {
                @if let Some(view) = dialog.view() {
                    @if dialog.kind().has_full_layout() {
                        (render_project_body(view))
                    } @else {
                        (render_highlight_body(view))
                    }
                }
            }
        }
    }
}

pub fn render_carousel(carousel: &CarouselController) -> Markup {
    html! {
        div.project-slider data-carousel=(carousel.index()) {
            @for (i, slide) in carousel.slides().iter().enumerate() {
                img class=(if carousel.is_active(i) { "project-slide active" } else { "project-slide" })
                    src=(slide.src) alt=(slide.alt) data-large=[slide.large.as_deref()];
            }
            @if carousel.has_controls() {
                button.slider-prev aria-label="Previous slide" { "‹" }
                button.slider-next aria-label="Next slide" { "›" }
            }
        }
    }
}

pub fn render_lightbox(lightbox: &Lightbox) -> Markup {
    let view = lightbox.view();
    html! {
        div #image-modal .image-modal role="dialog" aria-modal="true"
            aria-hidden=(if view.aria_hidden { "true" } else { "false" }) {
            div.image-modal__backdrop data-action="close" {}
            button data-action="close" aria-label="Close" { "✕" }
            button data-action="prev" aria-label="Previous image" { "‹" }
            img.image-modal__img src=(view.image_src) alt=(view.image_alt);
            button data-action="next" aria-label="Next image" { "›" }
        }
    }
}

pub fn render_copy_chip(chip: &CopyChip) -> Markup {
    html! {
        div.contact-card {
            button.copy-chip { (chip.label()) }
            span class=(if chip.feedback_visible() { "copy-feedback is-visible" } else { "copy-feedback" }) {
                "Copied to clipboard"
            }
        }
    }
}

/// Renders every behavior-controlled region of the page.
pub fn render_page(page: &Page) -> Markup {
    html! {
        body style=[page.body().scroll_locked.then_some("overflow: hidden")] {
            @for carousel in page.registry().iter() {
                (render_carousel(carousel))
            }
            @for chip in page.chips() {
                (render_copy_chip(chip))
            }
            (render_dialog(page.dialog(DialogKind::Project)))
            (render_dialog(page.dialog(DialogKind::Highlight)))
            @if let Some(lightbox) = page.lightbox() {
                (render_lightbox(lightbox))
            }
        }
    }
}
