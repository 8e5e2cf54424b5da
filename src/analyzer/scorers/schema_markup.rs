//! Schema markup scorer: JSON-LD structured data coverage.
//!
//! Answer engines lean heavily on structured data to attribute and cite
//! pages, so this category carries the largest weight.

use super::{CategoryScorer, Checklist};
use crate::document::DocumentModel;
use crate::{Category, CategoryScore, SignalCode};

// Point allocation (sums to 100)
const PTS_JSONLD_PRESENT: f64 = 30.0;
const PTS_ORGANIZATION: f64 = 15.0;
const PTS_ARTICLE: f64 = 15.0;
const PTS_FAQ: f64 = 15.0;
const PTS_BREADCRUMB: f64 = 10.0;
const PTS_ALL_VALID: f64 = 15.0;

pub struct SchemaMarkupScorer;

impl CategoryScorer for SchemaMarkupScorer {
    fn category(&self) -> Category {
        Category::SchemaMarkup
    }

    fn score(&self, doc: &DocumentModel) -> CategoryScore {
        let mut checklist = Checklist::new(Category::SchemaMarkup);
        let blocks = &doc.structured_data_blocks;
        let valid: Vec<_> = blocks.iter().filter(|b| b.is_valid).collect();

        if valid.is_empty() {
            checklist.fail(
                SignalCode::JsonLdPresent,
                PTS_JSONLD_PRESENT,
                "No valid JSON-LD structured data found",
            );
        } else {
            checklist.pass(
                SignalCode::JsonLdPresent,
                PTS_JSONLD_PRESENT,
                format!("{} valid JSON-LD block(s) found", valid.len()),
            );
        }

        let has = |types: &[&str]| valid.iter().any(|b| b.has_type(types));

        if has(&["Organization", "Person"]) {
            checklist.pass(
                SignalCode::SchemaOrganization,
                PTS_ORGANIZATION,
                "Organization or Person schema establishes the publishing entity",
            );
        } else {
            checklist.fail(
                SignalCode::SchemaOrganization,
                PTS_ORGANIZATION,
                "No Organization or Person schema",
            );
        }

        if has(&["Article", "BlogPosting", "NewsArticle", "WebPage"]) {
            checklist.pass(
                SignalCode::SchemaArticle,
                PTS_ARTICLE,
                "Article-level schema describes the page content",
            );
        } else {
            checklist.fail(
                SignalCode::SchemaArticle,
                PTS_ARTICLE,
                "No Article, BlogPosting, NewsArticle, or WebPage schema",
            );
        }

        if has(&["FAQPage", "QAPage", "HowTo"]) {
            checklist.pass(
                SignalCode::SchemaFaq,
                PTS_FAQ,
                "FAQ/HowTo schema maps questions to citable answers",
            );
        } else {
            checklist.fail(
                SignalCode::SchemaFaq,
                PTS_FAQ,
                "No FAQPage, QAPage, or HowTo schema",
            );
        }

        if has(&["BreadcrumbList"]) {
            checklist.pass(
                SignalCode::SchemaBreadcrumb,
                PTS_BREADCRUMB,
                "BreadcrumbList schema present",
            );
        } else {
            checklist.fail(
                SignalCode::SchemaBreadcrumb,
                PTS_BREADCRUMB,
                "No BreadcrumbList schema",
            );
        }

        let invalid_count = blocks.len() - valid.len();
        if blocks.is_empty() {
            checklist.fail(
                SignalCode::SchemaValid,
                PTS_ALL_VALID,
                "No structured data blocks to validate",
            );
        } else if invalid_count == 0 {
            checklist.pass(
                SignalCode::SchemaValid,
                PTS_ALL_VALID,
                "All structured data blocks parse as valid JSON",
            );
        } else {
            checklist.credit(
                SignalCode::SchemaValid,
                PTS_ALL_VALID,
                valid.len() as f64 / blocks.len() as f64,
                format!(
                    "{} of {} JSON-LD block(s) fail to parse",
                    invalid_count,
                    blocks.len()
                ),
            );
        }

        checklist.into_score()
    }
}
