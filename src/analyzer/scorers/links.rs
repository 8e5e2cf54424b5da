//! Link analysis scorer: internal/external linking and anchor quality.

use super::{CategoryScorer, Checklist};
use crate::document::DocumentModel;
use crate::{Category, CategoryScore, SignalCode};

// Point allocation (sums to 100)
const PTS_INTERNAL: f64 = 25.0;
const PTS_EXTERNAL: f64 = 20.0;
const PTS_DESCRIPTIVE: f64 = 25.0;
const PTS_DENSITY: f64 = 15.0;
const PTS_NO_FRAGMENT: f64 = 15.0;

const INTERNAL_FULL: usize = 3;
const EXTERNAL_FULL: usize = 2;
/// Links per 100 words beyond which a page reads like a link directory
const MAX_LINKS_PER_100_WORDS: f64 = 20.0;

const GENERIC_ANCHORS: &[&str] = &[
    "click here",
    "here",
    "read more",
    "more",
    "link",
    "this",
    "learn more",
];

pub struct LinkScorer;

impl CategoryScorer for LinkScorer {
    fn category(&self) -> Category {
        Category::Links
    }

    fn score(&self, doc: &DocumentModel) -> CategoryScore {
        let mut checklist = Checklist::new(Category::Links);

        let internal = doc.links.iter().filter(|l| l.is_internal).count();
        if internal >= INTERNAL_FULL {
            checklist.pass(
                SignalCode::InternalLinks,
                PTS_INTERNAL,
                format!("{} internal links connect related content", internal),
            );
        } else if internal >= 1 {
            checklist.credit(
                SignalCode::InternalLinks,
                PTS_INTERNAL,
                0.5,
                format!("Only {} internal link(s); link related pages", internal),
            );
        } else {
            checklist.fail(
                SignalCode::InternalLinks,
                PTS_INTERNAL,
                "No internal links",
            );
        }

        let external = doc.links.iter().filter(|l| !l.is_internal).count();
        if external >= EXTERNAL_FULL {
            checklist.pass(
                SignalCode::ExternalLinks,
                PTS_EXTERNAL,
                format!("{} external links reference outside sources", external),
            );
        } else if external == 1 {
            checklist.credit(
                SignalCode::ExternalLinks,
                PTS_EXTERNAL,
                0.5,
                "Only one external link",
            );
        } else {
            checklist.fail(
                SignalCode::ExternalLinks,
                PTS_EXTERNAL,
                "No external links",
            );
        }

        if doc.links.is_empty() {
            checklist.fail(
                SignalCode::DescriptiveAnchors,
                PTS_DESCRIPTIVE,
                "No anchors to evaluate",
            );
        } else {
            let generic = doc
                .links
                .iter()
                .filter(|l| {
                    let text = l.anchor_text.to_lowercase();
                    text.is_empty() || GENERIC_ANCHORS.contains(&text.as_str())
                })
                .count();
            let ratio = generic as f64 / doc.links.len() as f64;
            let fraction = if ratio <= 0.1 {
                1.0
            } else if ratio <= 0.3 {
                0.5
            } else {
                0.0
            };
            checklist.credit(
                SignalCode::DescriptiveAnchors,
                PTS_DESCRIPTIVE,
                fraction,
                if generic == 0 {
                    "All anchor text is descriptive".to_string()
                } else {
                    format!(
                        "{} of {} anchors use generic text (\"click here\", \"more\")",
                        generic,
                        doc.links.len()
                    )
                },
            );
        }

        let words = doc.text_content.split_whitespace().count();
        if doc.links.is_empty() || words == 0 {
            checklist.fail(
                SignalCode::LinkDensity,
                PTS_DENSITY,
                "Not enough links or text to measure link density",
            );
        } else {
            let per_100_words = doc.links.len() as f64 * 100.0 / words as f64;
            if per_100_words <= MAX_LINKS_PER_100_WORDS {
                checklist.pass(
                    SignalCode::LinkDensity,
                    PTS_DENSITY,
                    format!("Link density is healthy ({:.1} per 100 words)", per_100_words),
                );
            } else {
                checklist.credit(
                    SignalCode::LinkDensity,
                    PTS_DENSITY,
                    0.5,
                    format!(
                        "Very high link density ({:.1} per 100 words) reads as a directory",
                        per_100_words
                    ),
                );
            }
        }

        let dead = doc
            .links
            .iter()
            .filter(|l| l.href == "#" || l.href.is_empty() || l.href.starts_with("javascript:"))
            .count();
        if dead == 0 {
            checklist.pass(
                SignalCode::NoFragmentLinks,
                PTS_NO_FRAGMENT,
                "No placeholder or javascript: links",
            );
        } else {
            checklist.fail(
                SignalCode::NoFragmentLinks,
                PTS_NO_FRAGMENT,
                format!("{} placeholder link(s) (\"#\" or javascript:)", dead),
            );
        }

        checklist.into_score()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with(body: &str) -> DocumentModel {
        let html = format!("<html><body>{}</body></html>", body);
        DocumentModel::parse("https://example.com/guide", &html, None)
    }

    #[test]
    fn linkless_page_earns_only_placeholder_credit() {
        let score = LinkScorer.score(&doc_with("<p>No links at all in this text.</p>"));
        assert_eq!(score.score, 15.0);
    }

    #[test]
    fn well_linked_page_scores_one_hundred() {
        let body = r#"
            <p>Connection pooling guidance with sources and details follows here. A pool
            keeps a fixed set of database connections open and hands them to request
            handlers on demand, which avoids the setup cost of a fresh connection for
            every query. The sections below cover sizing, timeout tuning, and the
            monitoring signals that tell you when the pool itself is the bottleneck.</p>
            <a href="/pool-sizing">Pool sizing guide</a>
            <a href="/timeouts">Timeout tuning</a>
            <a href="/monitoring">Monitoring checklist</a>
            <a href="https://postgresql.org/docs">PostgreSQL documentation</a>
            <a href="https://redis.io/docs">Redis documentation</a>
        "#;
        let score = LinkScorer.score(&doc_with(body));
        assert_eq!(score.score, 100.0);
    }

    #[test]
    fn generic_anchor_text_is_flagged() {
        let body = r#"
            <a href="/a">click here</a>
            <a href="/b">here</a>
            <a href="/c">read more</a>
        "#;
        let score = LinkScorer.score(&doc_with(body));
        let anchors = score
            .findings
            .iter()
            .find(|f| f.code == SignalCode::DescriptiveAnchors)
            .unwrap();
        assert_eq!(anchors.severity, crate::FindingSeverity::Issue);
        assert!(anchors.message.contains("3 of 3"));
    }

    #[test]
    fn placeholder_links_fail_fragment_signal() {
        let body = r##"<a href="#">menu</a><p>some words here</p>"##;
        let score = LinkScorer.score(&doc_with(body));
        assert!(score
            .findings
            .iter()
            .any(|f| f.code == SignalCode::NoFragmentLinks
                && f.severity == crate::FindingSeverity::Issue));
    }

    #[test]
    fn directory_density_loses_credit() {
        let links: String = (0..40)
            .map(|i| format!("<a href=\"/p{}\">Page {}</a>", i, i))
            .collect();
        let score = LinkScorer.score(&doc_with(&links));
        let density = score
            .findings
            .iter()
            .find(|f| f.code == SignalCode::LinkDensity)
            .unwrap();
        assert!(density.message.contains("high link density"));
    }
}
