//! Meta tag scorer: title, description, canonical, social, and robots tags.

use super::{CategoryScorer, Checklist};
use crate::document::DocumentModel;
use crate::{Category, CategoryScore, SignalCode};

// Point allocation (sums to 100)
const PTS_TITLE_PRESENT: f64 = 15.0;
const PTS_TITLE_LENGTH: f64 = 15.0;
const PTS_DESC_PRESENT: f64 = 15.0;
const PTS_DESC_LENGTH: f64 = 10.0;
const PTS_CANONICAL: f64 = 10.0;
const PTS_OPEN_GRAPH: f64 = 10.0;
const PTS_TWITTER_CARD: f64 = 5.0;
const PTS_VIEWPORT: f64 = 10.0;
const PTS_ROBOTS_INDEXABLE: f64 = 10.0;

const TITLE_MIN: usize = 50;
const TITLE_MAX: usize = 60;
const DESC_MIN: usize = 140;
const DESC_MAX: usize = 160;

pub struct MetaTagScorer;

impl CategoryScorer for MetaTagScorer {
    fn category(&self) -> Category {
        Category::MetaTags
    }

    fn score(&self, doc: &DocumentModel) -> CategoryScore {
        let mut checklist = Checklist::new(Category::MetaTags);

        match &doc.title {
            Some(title) => {
                checklist.pass(
                    SignalCode::TitlePresent,
                    PTS_TITLE_PRESENT,
                    format!("Title present: \"{}\"", title),
                );
                let len = title.chars().count();
                if (TITLE_MIN..=TITLE_MAX).contains(&len) {
                    checklist.pass(
                        SignalCode::TitleLength,
                        PTS_TITLE_LENGTH,
                        format!("Title length is optimal ({} chars)", len),
                    );
                } else {
                    checklist.credit(
                        SignalCode::TitleLength,
                        PTS_TITLE_LENGTH,
                        0.5,
                        format!(
                            "Title is {} chars; aim for {}-{}",
                            len, TITLE_MIN, TITLE_MAX
                        ),
                    );
                }
            }
            None => {
                checklist.fail(
                    SignalCode::TitlePresent,
                    PTS_TITLE_PRESENT,
                    "Page has no <title>",
                );
                checklist.fail(
                    SignalCode::TitleLength,
                    PTS_TITLE_LENGTH,
                    "No title to measure",
                );
            }
        }

        match doc.meta(&["description"]) {
            Some(desc) if !desc.is_empty() => {
                checklist.pass(
                    SignalCode::MetaDescriptionPresent,
                    PTS_DESC_PRESENT,
                    "Meta description present",
                );
                let len = desc.chars().count();
                if (DESC_MIN..=DESC_MAX).contains(&len) {
                    checklist.pass(
                        SignalCode::MetaDescriptionLength,
                        PTS_DESC_LENGTH,
                        format!("Meta description length is optimal ({} chars)", len),
                    );
                } else {
                    checklist.credit(
                        SignalCode::MetaDescriptionLength,
                        PTS_DESC_LENGTH,
                        0.5,
                        format!(
                            "Meta description is {} chars; aim for {}-{}",
                            len, DESC_MIN, DESC_MAX
                        ),
                    );
                }
            }
            _ => {
                checklist.fail(
                    SignalCode::MetaDescriptionPresent,
                    PTS_DESC_PRESENT,
                    "No meta description",
                );
                checklist.fail(
                    SignalCode::MetaDescriptionLength,
                    PTS_DESC_LENGTH,
                    "No meta description to measure",
                );
            }
        }

        if doc.canonical.is_some() {
            checklist.pass(
                SignalCode::CanonicalLink,
                PTS_CANONICAL,
                "Canonical link declared",
            );
        } else {
            checklist.fail(
                SignalCode::CanonicalLink,
                PTS_CANONICAL,
                "No canonical link",
            );
        }

        let og_title = doc.meta(&["og:title"]).is_some();
        let og_desc = doc.meta(&["og:description"]).is_some();
        match (og_title, og_desc) {
            (true, true) => checklist.pass(
                SignalCode::OpenGraphTags,
                PTS_OPEN_GRAPH,
                "Open Graph title and description present",
            ),
            (false, false) => checklist.fail(
                SignalCode::OpenGraphTags,
                PTS_OPEN_GRAPH,
                "No Open Graph tags",
            ),
            _ => checklist.credit(
                SignalCode::OpenGraphTags,
                PTS_OPEN_GRAPH,
                0.5,
                "Open Graph tags are incomplete (need og:title and og:description)",
            ),
        }

        if doc.meta(&["twitter:card"]).is_some() {
            checklist.pass(
                SignalCode::TwitterCard,
                PTS_TWITTER_CARD,
                "Twitter card meta present",
            );
        } else {
            checklist.fail(
                SignalCode::TwitterCard,
                PTS_TWITTER_CARD,
                "No twitter:card meta tag",
            );
        }

        if doc.meta(&["viewport"]).is_some() {
            checklist.pass(
                SignalCode::ViewportMeta,
                PTS_VIEWPORT,
                "Viewport meta tag present",
            );
        } else {
            checklist.fail(
                SignalCode::ViewportMeta,
                PTS_VIEWPORT,
                "No viewport meta tag",
            );
        }

        let robots = doc.meta(&["robots"]).unwrap_or("").to_lowercase();
        if robots.contains("noindex") {
            checklist.fail(
                SignalCode::RobotsMetaIndexable,
                PTS_ROBOTS_INDEXABLE,
                "Robots meta tag blocks indexing (noindex)",
            );
        } else {
            checklist.pass(
                SignalCode::RobotsMetaIndexable,
                PTS_ROBOTS_INDEXABLE,
                "Page is indexable (no noindex directive)",
            );
        }

        checklist.into_score()
    }
}
