//! E-E-A-T scorer: experience, expertise, authoritativeness, trust signals.
//!
//! Answer engines prefer pages with a named author, dated content, and
//! verifiable sourcing. These are heuristic proxies, not a reputation score.

use super::{CategoryScorer, Checklist};
use crate::document::DocumentModel;
use crate::{Category, CategoryScore, SignalCode};
use regex::Regex;
use std::sync::OnceLock;

// Point allocation (sums to 100)
const PTS_AUTHOR: f64 = 20.0;
const PTS_DATE: f64 = 15.0;
const PTS_ABOUT_CONTACT: f64 = 15.0;
const PTS_CITATIONS: f64 = 20.0;
const PTS_EXPERTISE: f64 = 10.0;
const PTS_SAMEAS: f64 = 10.0;
const PTS_HTTPS: f64 = 10.0;

fn byline_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b[Bb]y [A-Z][a-z]+( [A-Z][a-z]+)?").unwrap())
}

fn expertise_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)\b(ph\.?d|m\.?d\.|professor|certified|licensed|years of experience|expert in|researcher)\b",
        )
        .unwrap()
    })
}

pub struct EeatScorer;

impl CategoryScorer for EeatScorer {
    fn category(&self) -> Category {
        Category::Eeat
    }

    fn score(&self, doc: &DocumentModel) -> CategoryScore {
        let mut checklist = Checklist::new(Category::Eeat);

        let has_author_meta = doc.meta(&["author", "article:author"]).is_some();
        let has_byline = byline_re().is_match(&doc.text_content);
        if has_author_meta || has_byline {
            checklist.pass(
                SignalCode::AuthorAttribution,
                PTS_AUTHOR,
                "Content is attributed to a named author",
            );
        } else {
            checklist.fail(
                SignalCode::AuthorAttribution,
                PTS_AUTHOR,
                "No author attribution (meta tag or byline)",
            );
        }

        let has_date_meta = doc
            .meta(&["article:published_time", "article:modified_time", "date"])
            .is_some();
        let has_date_schema = doc
            .structured_data_blocks
            .iter()
            .filter(|b| b.is_valid)
            .any(|b| b.raw.contains("datePublished") || b.raw.contains("dateModified"));
        let has_time_tag = doc.raw_html.contains("<time");
        if has_date_meta || has_date_schema || has_time_tag {
            checklist.pass(
                SignalCode::PublishDate,
                PTS_DATE,
                "Publish or modified date is declared",
            );
        } else {
            checklist.fail(
                SignalCode::PublishDate,
                PTS_DATE,
                "No publish date found (meta, schema, or <time>)",
            );
        }

        let has_about = doc
            .links
            .iter()
            .any(|l| l.href.to_lowercase().contains("about"));
        let has_contact = doc
            .links
            .iter()
            .any(|l| l.href.to_lowercase().contains("contact"));
        match (has_about, has_contact) {
            (true, true) => checklist.pass(
                SignalCode::AboutContactLinks,
                PTS_ABOUT_CONTACT,
                "About and contact pages are linked",
            ),
            (false, false) => checklist.fail(
                SignalCode::AboutContactLinks,
                PTS_ABOUT_CONTACT,
                "No about or contact links found",
            ),
            _ => checklist.credit(
                SignalCode::AboutContactLinks,
                PTS_ABOUT_CONTACT,
                0.5,
                "Only one of about/contact pages is linked",
            ),
        }

        let external_count = doc.links.iter().filter(|l| !l.is_internal).count();
        if external_count >= 2 {
            checklist.pass(
                SignalCode::ExternalCitations,
                PTS_CITATIONS,
                format!("{} outbound reference links support the content", external_count),
            );
        } else if external_count == 1 {
            checklist.credit(
                SignalCode::ExternalCitations,
                PTS_CITATIONS,
                0.5,
                "Only one outbound reference link; cite more sources",
            );
        } else {
            checklist.fail(
                SignalCode::ExternalCitations,
                PTS_CITATIONS,
                "No outbound reference links to supporting sources",
            );
        }

        if expertise_re().is_match(&doc.text_content) {
            checklist.pass(
                SignalCode::ExpertiseMarkers,
                PTS_EXPERTISE,
                "Credentials or expertise markers found in the text",
            );
        } else {
            checklist.fail(
                SignalCode::ExpertiseMarkers,
                PTS_EXPERTISE,
                "No credentials or expertise markers in the text",
            );
        }

        let has_sameas = doc
            .structured_data_blocks
            .iter()
            .filter(|b| b.is_valid)
            .any(|b| b.raw.contains("sameAs"));
        if has_sameas {
            checklist.pass(
                SignalCode::OrganizationSameAs,
                PTS_SAMEAS,
                "Schema sameAs links the entity to external profiles",
            );
        } else {
            checklist.fail(
                SignalCode::OrganizationSameAs,
                PTS_SAMEAS,
                "No sameAs entity links in structured data",
            );
        }

        if doc.is_https() {
            checklist.pass(SignalCode::HttpsTrust, PTS_HTTPS, "Page is served over HTTPS");
        } else {
            checklist.fail(
                SignalCode::HttpsTrust,
                PTS_HTTPS,
                "Page is not served over HTTPS",
            );
        }

        checklist.into_score()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_http_page_scores_zero() {
        let doc = DocumentModel::parse("http://example.com/", "<html></html>", None);
        let score = EeatScorer.score(&doc);
        assert_eq!(score.score, 0.0);
        assert_eq!(score.findings.len(), 7);
    }

    #[test]
    fn author_meta_earns_attribution() {
        let html = r#"<html><head><meta name="author" content="Jane Doe"></head></html>"#;
        let doc = DocumentModel::parse("http://example.com/", html, None);
        let score = EeatScorer.score(&doc);
        assert_eq!(score.score, 20.0);
    }

    #[test]
    fn byline_in_text_earns_attribution() {
        let html = "<html><body><p>Written by Jane Doe, who reviews databases.</p></body></html>";
        let doc = DocumentModel::parse("http://example.com/", html, None);
        let score = EeatScorer.score(&doc);
        assert!(score
            .findings
            .iter()
            .any(|f| f.code == SignalCode::AuthorAttribution
                && f.severity == crate::FindingSeverity::Strength));
    }

    #[test]
    fn full_trust_page_scores_one_hundred() {
        let html = r#"<html><head>
            <meta name="author" content="Jane Doe">
            <meta property="article:published_time" content="2025-03-01">
            <script type="application/ld+json">{"@type":"Organization","sameAs":["https://x.com/acme"]}</script>
            </head><body>
            <p>Jane holds a PhD in distributed systems.</p>
            <a href="/about">About</a>
            <a href="/contact">Contact</a>
            <a href="https://peer-review.org/paper">Paper</a>
            <a href="https://standards.example.org/rfc">RFC</a>
            </body></html>"#;
        let doc = DocumentModel::parse("https://example.com/", html, None);
        let score = EeatScorer.score(&doc);
        assert_eq!(score.score, 100.0);
    }

    #[test]
    fn single_external_link_gets_half_citation_credit() {
        let html = r#"<html><body><a href="https://other.org/src">source</a></body></html>"#;
        let doc = DocumentModel::parse("http://example.com/", html, None);
        let score = EeatScorer.score(&doc);
        assert_eq!(score.score, 10.0);
    }
}
