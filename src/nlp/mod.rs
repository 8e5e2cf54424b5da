//! Heuristic linguistic analysis of page text.
//!
//! Everything here is deterministic and self-contained: fixed lexicons,
//! frequency counts, and capitalization patterns. No external NLP service.

pub mod entities;
pub mod keywords;
pub mod readability;
pub mod sentiment;
pub mod topics;

pub use keywords::{Keyword, KeywordAnalysis, StuffingRisk};
pub use readability::{SentenceStats, SentenceVariety};
pub use sentiment::{SentimentAnalysis, SentimentLabel, ToneProfile};
pub use topics::{ContentType, TopicCluster};

use serde::{Deserialize, Serialize};

/// Thin-content threshold in words
const MIN_WORD_COUNT: usize = 500;
/// Minimum distinct keywords before topical coverage reads as adequate
const MIN_KEYWORDS: usize = 5;

/// Full linguistic analysis of one page's text
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentAnalysis {
    pub word_count: usize,
    pub keywords: KeywordAnalysis,
    pub topics: Vec<TopicCluster>,
    /// Unique content words / total content words
    pub vocabulary_diversity: f64,
    /// Content words / total words
    pub lexical_density: f64,
    pub sentences: SentenceStats,
    pub sentiment: SentimentAnalysis,
    pub tone: ToneProfile,
    pub entities: Vec<String>,
    pub content_type: ContentType,
    /// Explicit improvement suggestions for detected content gaps
    pub gaps: Vec<String>,
}

/// Analyze text. Deterministic: identical input yields identical output.
pub fn analyze(text: &str) -> ContentAnalysis {
    let tokens = keywords::tokenize(text);
    let word_count = tokens.len();
    let text_lower = text.to_lowercase();

    let keyword_analysis = keywords::analyze(&tokens);
    let unique_content: std::collections::BTreeSet<&str> = keywords::content_words(&tokens)
        .into_iter()
        .map(|s| s.as_str())
        .collect();

    let topic_clusters = topics::clusters(&unique_content);
    let entity_list = entities::extract(text);

    let mut gaps = Vec::new();
    if word_count < MIN_WORD_COUNT {
        gaps.push(format!(
            "Content is thin ({} words); aim for at least {} words of substantive coverage",
            word_count, MIN_WORD_COUNT
        ));
    }
    if entity_list.is_empty() {
        gaps.push(
            "No named entities detected; cite concrete people, organizations, or products"
                .to_string(),
        );
    }
    let distinct_keywords = keyword_analysis.primary.len() + keyword_analysis.secondary.len();
    if distinct_keywords < MIN_KEYWORDS {
        gaps.push(format!(
            "Only {} distinct keywords found; broaden topical coverage",
            distinct_keywords
        ));
    }

    ContentAnalysis {
        word_count,
        keywords: keyword_analysis,
        topics: topic_clusters,
        vocabulary_diversity: readability::vocabulary_diversity(&tokens),
        lexical_density: readability::lexical_density(&tokens),
        sentences: readability::sentence_stats(text),
        sentiment: sentiment::analyze(&tokens),
        tone: sentiment::tone(&tokens),
        entities: entity_list,
        content_type: topics::classify_content_type(&text_lower),
        gaps,
    }
}
