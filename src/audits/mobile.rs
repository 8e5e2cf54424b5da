//! Mobile-first audit: viewport, responsive media, and legacy embeds.

use crate::analyzer::scorers::{CategoryScorer, Checklist};
use crate::document::DocumentModel;
use crate::{Category, CategoryScore, SignalCode};

// Point allocation (sums to 100)
const PTS_VIEWPORT: f64 = 40.0;
const PTS_RESPONSIVE_IMAGES: f64 = 20.0;
const PTS_NO_LEGACY: f64 = 20.0;
const PTS_TOUCH_NAV: f64 = 20.0;

pub struct MobileAudit;

impl CategoryScorer for MobileAudit {
    fn category(&self) -> Category {
        Category::Mobile
    }

    fn score(&self, doc: &DocumentModel) -> CategoryScore {
        let mut checklist = Checklist::new(Category::Mobile);
        let lower = doc.raw_html.to_lowercase();

        match doc.meta(&["viewport"]) {
            Some(viewport) if viewport.contains("width=device-width") => checklist.pass(
                SignalCode::ViewportConfigured,
                PTS_VIEWPORT,
                "Responsive viewport configured",
            ),
            Some(_) => checklist.credit(
                SignalCode::ViewportConfigured,
                PTS_VIEWPORT,
                0.5,
                "Viewport meta present but not width=device-width",
            ),
            None => checklist.fail(
                SignalCode::ViewportConfigured,
                PTS_VIEWPORT,
                "No viewport meta tag; the page renders desktop-width on phones",
            ),
        }

        if doc.images.is_empty() {
            checklist.pass(
                SignalCode::ResponsiveImages,
                PTS_RESPONSIVE_IMAGES,
                "No images requiring responsive variants",
            );
        } else if lower.contains("srcset") || lower.contains("<picture") {
            checklist.pass(
                SignalCode::ResponsiveImages,
                PTS_RESPONSIVE_IMAGES,
                "Responsive image variants (srcset/picture) in use",
            );
        } else {
            checklist.fail(
                SignalCode::ResponsiveImages,
                PTS_RESPONSIVE_IMAGES,
                "Images ship a single resolution; add srcset variants",
            );
        }

        let legacy = ["<applet", "<object", "<embed", "flash"]
            .iter()
            .any(|t| lower.contains(*t));
        if legacy {
            checklist.fail(
                SignalCode::NoLegacyPlugins,
                PTS_NO_LEGACY,
                "Legacy plugin markup (applet/object/embed) does not work on mobile",
            );
        } else {
            checklist.pass(
                SignalCode::NoLegacyPlugins,
                PTS_NO_LEGACY,
                "No legacy plugin markup",
            );
        }

        let has_nav = lower.contains("<nav");
        if has_nav {
            checklist.pass(
                SignalCode::TouchFriendlyNav,
                PTS_TOUCH_NAV,
                "Navigation landmark present for touch menus",
            );
        } else {
            checklist.fail(
                SignalCode::TouchFriendlyNav,
                PTS_TOUCH_NAV,
                "No <nav> landmark found",
            );
        }

        checklist.into_score()
    }
}
