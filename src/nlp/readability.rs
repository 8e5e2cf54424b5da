//! Machine-readability metrics: sentence statistics, vocabulary diversity,
//! and lexical density.

use serde::{Deserialize, Serialize};

use super::entities::split_sentences;
use super::keywords::{content_words, tokenize};

/// Sentence-length variety bucket by standard deviation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentenceVariety {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentenceStats {
    pub count: usize,
    /// Mean sentence length in words
    pub mean_length: f64,
    /// Standard deviation of sentence lengths
    pub std_dev: f64,
    pub variety: SentenceVariety,
}

const VARIETY_LOW_STDDEV: f64 = 4.0;
const VARIETY_MEDIUM_STDDEV: f64 = 9.0;

/// Compute sentence statistics for the text
pub fn sentence_stats(text: &str) -> SentenceStats {
    let lengths: Vec<usize> = split_sentences(text)
        .iter()
        .map(|s| s.split_whitespace().count())
        .filter(|n| *n > 0)
        .collect();

    if lengths.is_empty() {
        return SentenceStats {
            count: 0,
            mean_length: 0.0,
            std_dev: 0.0,
            variety: SentenceVariety::Low,
        };
    }

    let count = lengths.len();
    let mean = lengths.iter().sum::<usize>() as f64 / count as f64;
    let variance = lengths
        .iter()
        .map(|n| {
            let d = *n as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / count as f64;
    let std_dev = variance.sqrt();

    let variety = if std_dev < VARIETY_LOW_STDDEV {
        SentenceVariety::Low
    } else if std_dev < VARIETY_MEDIUM_STDDEV {
        SentenceVariety::Medium
    } else {
        SentenceVariety::High
    };

    SentenceStats {
        count,
        mean_length: mean,
        std_dev,
        variety,
    }
}

/// Unique content words / total content words (0 when there are none)
pub fn vocabulary_diversity(tokens: &[String]) -> f64 {
    let content = content_words(tokens);
    if content.is_empty() {
        return 0.0;
    }
    let unique: std::collections::HashSet<&str> = content.iter().map(|s| s.as_str()).collect();
    unique.len() as f64 / content.len() as f64
}

/// Content words / total words (0 when the text is empty)
pub fn lexical_density(tokens: &[String]) -> f64 {
    if tokens.is_empty() {
        return 0.0;
    }
    content_words(tokens).len() as f64 / tokens.len() as f64
}

/// Convenience: word count of a text
pub fn word_count(text: &str) -> usize {
    tokenize(text).len()
}
