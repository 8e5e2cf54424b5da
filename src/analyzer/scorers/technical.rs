//! Technical SEO scorer: protocol, canonicalization, language, and
//! markup hygiene.

use super::{CategoryScorer, Checklist};
use crate::document::DocumentModel;
use crate::{Category, CategoryScore, SignalCode};
use url::Url;

// Point allocation (sums to 100)
const PTS_HTTPS: f64 = 20.0;
const PTS_CANONICAL: f64 = 15.0;
const PTS_LANGUAGE: f64 = 15.0;
const PTS_IMAGE_ALT: f64 = 20.0;
const PTS_CHARSET: f64 = 10.0;
const PTS_CLEAN_URL: f64 = 10.0;
const PTS_ANCHORS: f64 = 10.0;

const ALT_FULL_RATIO: f64 = 0.9;
const ALT_HALF_RATIO: f64 = 0.5;
const MAX_PATH_CHARS: usize = 80;

pub struct TechnicalSeoScorer;

impl CategoryScorer for TechnicalSeoScorer {
    fn category(&self) -> Category {
        Category::TechnicalSeo
    }

    fn score(&self, doc: &DocumentModel) -> CategoryScore {
        let mut checklist = Checklist::new(Category::TechnicalSeo);

        if doc.is_https() {
            checklist.pass(SignalCode::HttpsProtocol, PTS_HTTPS, "Served over HTTPS");
        } else {
            checklist.fail(
                SignalCode::HttpsProtocol,
                PTS_HTTPS,
                "Page is served over plain HTTP",
            );
        }

        match &doc.canonical {
            Some(canonical) => {
                let canonical_host = Url::parse(canonical)
                    .ok()
                    .and_then(|u| u.host_str().map(|h| h.to_lowercase()));
                let page_host = doc.host().map(|h| h.to_lowercase());
                if canonical_host.is_none() || canonical_host == page_host {
                    checklist.pass(
                        SignalCode::CanonicalConsistency,
                        PTS_CANONICAL,
                        "Canonical URL is consistent with the page host",
                    );
                } else {
                    checklist.credit(
                        SignalCode::CanonicalConsistency,
                        PTS_CANONICAL,
                        0.5,
                        format!("Canonical points at a different host: {}", canonical),
                    );
                }
            }
            None => checklist.fail(
                SignalCode::CanonicalConsistency,
                PTS_CANONICAL,
                "No canonical URL declared",
            ),
        }

        if doc.language.is_some() {
            checklist.pass(
                SignalCode::LanguageDeclared,
                PTS_LANGUAGE,
                "Document language is declared",
            );
        } else {
            checklist.fail(
                SignalCode::LanguageDeclared,
                PTS_LANGUAGE,
                "No lang attribute on <html>",
            );
        }

        if doc.images.is_empty() {
            checklist.pass(
                SignalCode::ImageAltCoverage,
                PTS_IMAGE_ALT,
                "No images requiring alt text",
            );
        } else {
            let with_alt = doc
                .images
                .iter()
                .filter(|i| i.alt.as_deref().is_some_and(|a| !a.is_empty()))
                .count();
            let ratio = with_alt as f64 / doc.images.len() as f64;
            let fraction = if ratio >= ALT_FULL_RATIO {
                1.0
            } else if ratio >= ALT_HALF_RATIO {
                0.5
            } else {
                0.0
            };
            checklist.credit(
                SignalCode::ImageAltCoverage,
                PTS_IMAGE_ALT,
                fraction,
                format!(
                    "{} of {} images have alt text",
                    with_alt,
                    doc.images.len()
                ),
            );
        }

        if doc.charset.is_some() {
            checklist.pass(
                SignalCode::CharsetDeclared,
                PTS_CHARSET,
                "Character encoding declared",
            );
        } else {
            checklist.fail(
                SignalCode::CharsetDeclared,
                PTS_CHARSET,
                "No charset declaration",
            );
        }

        match Url::parse(&doc.url) {
            Ok(parsed) => {
                let clean_path = parsed.path().len() <= MAX_PATH_CHARS;
                let no_query = parsed.query().is_none();
                if clean_path && no_query {
                    checklist.pass(
                        SignalCode::CleanUrl,
                        PTS_CLEAN_URL,
                        "URL is short and parameter-free",
                    );
                } else if clean_path {
                    checklist.credit(
                        SignalCode::CleanUrl,
                        PTS_CLEAN_URL,
                        0.5,
                        "URL carries query parameters",
                    );
                } else {
                    checklist.fail(
                        SignalCode::CleanUrl,
                        PTS_CLEAN_URL,
                        format!("URL path is over {} characters", MAX_PATH_CHARS),
                    );
                }
            }
            Err(_) => checklist.fail(SignalCode::CleanUrl, PTS_CLEAN_URL, "URL is not parseable"),
        }

        let empty_anchors = doc
            .links
            .iter()
            .filter(|l| l.anchor_text.is_empty())
            .count();
        if empty_anchors == 0 {
            checklist.pass(
                SignalCode::NoEmptyAnchors,
                PTS_ANCHORS,
                "All anchors carry link text",
            );
        } else {
            let ratio = 1.0 - empty_anchors as f64 / doc.links.len() as f64;
            checklist.credit(
                SignalCode::NoEmptyAnchors,
                PTS_ANCHORS,
                ratio * 0.5,
                format!("{} anchor(s) have no link text", empty_anchors),
            );
        }

        checklist.into_score()
    }
}
