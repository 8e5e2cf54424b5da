//! Keyword extraction: tokenization, stop-word filtering, frequency and
//! density analysis, and keyword-stuffing classification.

use serde::{Deserialize, Serialize};

/// Common English stop words excluded from keyword and density analysis
pub const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "all", "also", "an", "and", "any", "are", "as", "at",
    "be", "because", "been", "before", "being", "below", "between", "both", "but", "by", "can",
    "could", "did", "do", "does", "doing", "down", "during", "each", "few", "for", "from",
    "further", "had", "has", "have", "having", "he", "her", "here", "hers", "him", "his", "how",
    "if", "in", "into", "is", "it", "its", "itself", "just", "like", "may", "me", "might", "more",
    "most", "my", "no", "nor", "not", "now", "of", "off", "on", "once", "only", "or", "other",
    "our", "out", "over", "own", "same", "she", "should", "so", "some", "such", "than", "that",
    "the", "their", "theirs", "them", "then", "there", "these", "they", "this", "those", "through",
    "to", "too", "under", "until", "up", "very", "was", "we", "were", "what", "when", "where",
    "which", "while", "who", "whom", "why", "will", "with", "would", "you", "your", "yours",
];

/// Keyword stuffing risk by density thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StuffingRisk {
    None,
    Low,
    High,
}

/// A keyword with its frequency and density
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Keyword {
    pub term: String,
    pub count: usize,
    /// Occurrences as a percentage of total words
    pub density: f64,
}

/// Keyword analysis result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordAnalysis {
    /// Top keywords by frequency
    pub primary: Vec<Keyword>,
    /// Next tier of keywords
    pub secondary: Vec<Keyword>,
    pub stuffing_risk: StuffingRisk,
}

const PRIMARY_COUNT: usize = 3;
const SECONDARY_COUNT: usize = 7;
const STUFFING_HIGH_DENSITY: f64 = 5.0;
const STUFFING_LOW_DENSITY: f64 = 3.0;

/// Lowercased word tokens, punctuation stripped
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|w| !w.is_empty())
        .map(|w| w.trim_matches('\'').to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.binary_search(&word).is_ok()
}

/// Content words: tokens that carry meaning (not stop words, length > 2)
pub fn content_words(tokens: &[String]) -> Vec<&String> {
    tokens
        .iter()
        .filter(|w| w.len() > 2 && !is_stop_word(w))
        .collect()
}

/// Extract primary/secondary keywords and classify stuffing risk
pub fn analyze(tokens: &[String]) -> KeywordAnalysis {
    let total_words = tokens.len();
    let content = content_words(tokens);

    let mut counts: std::collections::HashMap<&str, usize> = std::collections::HashMap::new();
    for word in &content {
        *counts.entry(word.as_str()).or_insert(0) += 1;
    }

    // Sort by count descending, then alphabetically for determinism
    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let to_keyword = |(term, count): &(&str, usize)| Keyword {
        term: term.to_string(),
        count: *count,
        density: if total_words == 0 {
            0.0
        } else {
            (*count as f64 / total_words as f64) * 100.0
        },
    };

    let primary: Vec<Keyword> = ranked.iter().take(PRIMARY_COUNT).map(to_keyword).collect();
    let secondary: Vec<Keyword> = ranked
        .iter()
        .skip(PRIMARY_COUNT)
        .take(SECONDARY_COUNT)
        .map(to_keyword)
        .collect();

    let max_density = primary.first().map(|k| k.density).unwrap_or(0.0);
    let stuffing_risk = if max_density > STUFFING_HIGH_DENSITY {
        StuffingRisk::High
    } else if max_density > STUFFING_LOW_DENSITY {
        StuffingRisk::Low
    } else {
        StuffingRisk::None
    };

    KeywordAnalysis {
        primary,
        secondary,
        stuffing_risk,
    }
}
