//! Accessibility audit: the subset checkable from static markup.

use crate::analyzer::scorers::{CategoryScorer, Checklist};
use crate::document::DocumentModel;
use crate::{Category, CategoryScore, SignalCode};

// Point allocation (sums to 100)
const PTS_IMAGE_ALT: f64 = 30.0;
const PTS_LANGUAGE: f64 = 20.0;
const PTS_LINK_NAMES: f64 = 25.0;
const PTS_HEADING_ORDER: f64 = 25.0;

pub struct AccessibilityAudit;

impl CategoryScorer for AccessibilityAudit {
    fn category(&self) -> Category {
        Category::Accessibility
    }

    fn score(&self, doc: &DocumentModel) -> CategoryScore {
        let mut checklist = Checklist::new(Category::Accessibility);

        if doc.images.is_empty() {
            checklist.pass(
                SignalCode::ImageAltText,
                PTS_IMAGE_ALT,
                "No images requiring alt text",
            );
        } else {
            let missing = doc
                .images
                .iter()
                .filter(|i| i.alt.as_deref().map_or(true, |a| a.is_empty()))
                .count();
            if missing == 0 {
                checklist.pass(
                    SignalCode::ImageAltText,
                    PTS_IMAGE_ALT,
                    "Every image has alt text",
                );
            } else {
                let ratio = 1.0 - missing as f64 / doc.images.len() as f64;
                checklist.credit(
                    SignalCode::ImageAltText,
                    PTS_IMAGE_ALT,
                    ratio,
                    format!("{} of {} images lack alt text", missing, doc.images.len()),
                );
            }
        }

        if doc.language.is_some() {
            checklist.pass(
                SignalCode::DocumentLanguage,
                PTS_LANGUAGE,
                "Document language declared for screen readers",
            );
        } else {
            checklist.fail(
                SignalCode::DocumentLanguage,
                PTS_LANGUAGE,
                "No lang attribute on <html>",
            );
        }

        if doc.links.is_empty() {
            checklist.pass(
                SignalCode::LinkAccessibleNames,
                PTS_LINK_NAMES,
                "No links requiring accessible names",
            );
        } else {
            let unnamed = doc
                .links
                .iter()
                .filter(|l| l.anchor_text.is_empty())
                .count();
            if unnamed == 0 {
                checklist.pass(
                    SignalCode::LinkAccessibleNames,
                    PTS_LINK_NAMES,
                    "All links expose an accessible name",
                );
            } else {
                let ratio = 1.0 - unnamed as f64 / doc.links.len() as f64;
                checklist.credit(
                    SignalCode::LinkAccessibleNames,
                    PTS_LINK_NAMES,
                    ratio,
                    format!("{} link(s) have no text for assistive tech", unnamed),
                );
            }
        }

        if doc.headings.is_empty() {
            checklist.fail(
                SignalCode::HeadingOrder,
                PTS_HEADING_ORDER,
                "No headings to structure the page for screen readers",
            );
        } else {
            let starts_at_h1 = doc.headings[0].level == 1;
            let mut prev = doc.headings[0].level;
            let ordered = doc.headings[1..].iter().all(|h| {
                let ok = h.level <= prev + 1;
                prev = h.level;
                ok
            });
            if starts_at_h1 && ordered {
                checklist.pass(
                    SignalCode::HeadingOrder,
                    PTS_HEADING_ORDER,
                    "Headings start at H1 and descend in order",
                );
            } else {
                checklist.credit(
                    SignalCode::HeadingOrder,
                    PTS_HEADING_ORDER,
                    0.5,
                    "Heading order is broken (missing H1 or skipped levels)",
                );
            }
        }

        checklist.into_score()
    }
}
