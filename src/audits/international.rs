//! International SEO audit: language, hreflang, and encoding declarations.

use crate::analyzer::scorers::{CategoryScorer, Checklist};
use crate::document::DocumentModel;
use crate::{Category, CategoryScore, SignalCode};

// Point allocation (sums to 100)
const PTS_LANG: f64 = 40.0;
const PTS_HREFLANG: f64 = 35.0;
const PTS_CHARSET: f64 = 25.0;

pub struct InternationalSeoAudit;

impl CategoryScorer for InternationalSeoAudit {
    fn category(&self) -> Category {
        Category::International
    }

    fn score(&self, doc: &DocumentModel) -> CategoryScore {
        let mut checklist = Checklist::new(Category::International);

        match &doc.language {
            Some(lang) => checklist.pass(
                SignalCode::LangAttribute,
                PTS_LANG,
                format!("Document language declared (\"{}\")", lang),
            ),
            None => checklist.fail(
                SignalCode::LangAttribute,
                PTS_LANG,
                "No lang attribute; engines must guess the language",
            ),
        }

        if doc.hreflangs.is_empty() {
            checklist.fail(
                SignalCode::HreflangAnnotations,
                PTS_HREFLANG,
                "No hreflang alternates declared",
            );
        } else {
            checklist.pass(
                SignalCode::HreflangAnnotations,
                PTS_HREFLANG,
                format!(
                    "{} hreflang alternate(s): {}",
                    doc.hreflangs.len(),
                    doc.hreflangs.join(", ")
                ),
            );
        }

        match &doc.charset {
            Some(charset) if charset.contains("utf-8") => checklist.pass(
                SignalCode::CharsetUtf8,
                PTS_CHARSET,
                "UTF-8 encoding declared",
            ),
            Some(charset) => checklist.credit(
                SignalCode::CharsetUtf8,
                PTS_CHARSET,
                0.5,
                format!("Non-UTF-8 charset declared (\"{}\")", charset),
            ),
            None => checklist.fail(
                SignalCode::CharsetUtf8,
                PTS_CHARSET,
                "No charset declaration",
            ),
        }

        checklist.into_score()
    }
}
