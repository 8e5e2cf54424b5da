//! AI crawler access scorer: robots.txt and meta directives for the
//! crawlers that feed answer engines.
//!
//! Absent robots.txt means crawl-allowed under the robots exclusion
//! protocol, so missing directives earn full credit with a note; an explicit
//! blanket disallow zeroes the category.

use super::{CategoryScorer, Checklist};
use crate::document::DocumentModel;
use crate::{Category, CategoryScore, SignalCode};

// Point allocation (sums to 100)
const PTS_GPTBOT: f64 = 20.0;
const PTS_CLAUDEBOT: f64 = 20.0;
const PTS_PERPLEXITY: f64 = 15.0;
const PTS_GOOGLE_EXTENDED: f64 = 10.0;
const PTS_CCBOT: f64 = 10.0;
const PTS_NO_BLANKET: f64 = 15.0;
const PTS_NO_OPTOUT_META: f64 = 10.0;

/// Crawler agents checked individually, with their signal and weight
const AGENTS: &[(&str, SignalCode, f64)] = &[
    ("gptbot", SignalCode::GptbotAccess, PTS_GPTBOT),
    ("claudebot", SignalCode::ClaudebotAccess, PTS_CLAUDEBOT),
    ("perplexitybot", SignalCode::PerplexitybotAccess, PTS_PERPLEXITY),
    ("google-extended", SignalCode::GoogleExtendedAccess, PTS_GOOGLE_EXTENDED),
    ("ccbot", SignalCode::CcbotAccess, PTS_CCBOT),
];

pub struct AiCrawlerScorer;

impl CategoryScorer for AiCrawlerScorer {
    fn category(&self) -> Category {
        Category::AiCrawlers
    }

    fn score(&self, doc: &DocumentModel) -> CategoryScore {
        let mut checklist = Checklist::new(Category::AiCrawlers);

        match &doc.robots_directives {
            Some(robots) => {
                for (agent, code, points) in AGENTS {
                    if robots.allows(agent) {
                        checklist.pass(
                            *code,
                            *points,
                            format!("{} is allowed to crawl this site", agent),
                        );
                    } else {
                        checklist.fail(
                            *code,
                            *points,
                            format!("{} is blocked by robots.txt", agent),
                        );
                    }
                }

                if robots.blanket_disallow() {
                    checklist.fail(
                        SignalCode::NoBlanketDisallow,
                        PTS_NO_BLANKET,
                        "robots.txt disallows the entire site for all crawlers",
                    );
                } else {
                    checklist.pass(
                        SignalCode::NoBlanketDisallow,
                        PTS_NO_BLANKET,
                        "No blanket disallow in robots.txt",
                    );
                }
            }
            None => {
                // No directives: crawlers default to allowed
                for (agent, code, points) in AGENTS {
                    checklist.pass(
                        *code,
                        *points,
                        format!("No robots.txt directives; {} allowed by default", agent),
                    );
                }
                checklist.pass(
                    SignalCode::NoBlanketDisallow,
                    PTS_NO_BLANKET,
                    "No robots.txt directives to restrict crawling",
                );
            }
        }

        let robots_meta = doc.meta(&["robots"]).unwrap_or("").to_lowercase();
        if robots_meta.contains("noindex") || robots_meta.contains("noai") {
            checklist.fail(
                SignalCode::NoAiOptOutMeta,
                PTS_NO_OPTOUT_META,
                format!("Robots meta tag opts out of indexing: \"{}\"", robots_meta),
            );
        } else {
            checklist.pass(
                SignalCode::NoAiOptOutMeta,
                PTS_NO_OPTOUT_META,
                "No noindex/noai opt-out in robots meta tag",
            );
        }

        checklist.into_score()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_robots(robots: Option<&str>) -> DocumentModel {
        DocumentModel::parse("https://example.com/", "<html></html>", robots)
    }

    #[test]
    fn no_robots_file_scores_full() {
        let score = AiCrawlerScorer.score(&doc_with_robots(None));
        assert_eq!(score.score, 100.0);
    }

    #[test]
    fn blanket_disallow_scores_zero() {
        let score = AiCrawlerScorer.score(&doc_with_robots(Some("User-agent: *\nDisallow: /\n")));
        assert_eq!(score.score, 0.0);
    }

    #[test]
    fn selective_block_loses_that_agents_points() {
        let robots = "User-agent: GPTBot\nDisallow: /\n";
        let score = AiCrawlerScorer.score(&doc_with_robots(Some(robots)));
        assert_eq!(score.score, 80.0);
        assert!(score
            .findings
            .iter()
            .any(|f| f.code == SignalCode::GptbotAccess
                && f.severity == crate::FindingSeverity::Issue));
    }

    #[test]
    fn noindex_meta_loses_optout_points() {
        let html = r#"<html><head><meta name="robots" content="noindex, nofollow"></head></html>"#;
        let doc = DocumentModel::parse("https://example.com/", html, None);
        let score = AiCrawlerScorer.score(&doc);
        assert_eq!(score.score, 90.0);
    }

    #[test]
    fn allowlist_overrides_blanket_disallow_per_agent() {
        let robots = "User-agent: *\nDisallow: /\n\nUser-agent: GPTBot\nAllow: /\n";
        let score = AiCrawlerScorer.score(&doc_with_robots(Some(robots)));
        // GPTBot (20) earns; other four agents and the blanket signal fail
        assert_eq!(score.score, 30.0);
    }
}
