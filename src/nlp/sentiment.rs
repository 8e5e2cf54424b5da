//! Lexicon-based sentiment scoring and tone profiling.

use serde::{Deserialize, Serialize};

const POSITIVE_WORDS: &[&str] = &[
    "accurate",
    "amazing",
    "beneficial",
    "best",
    "better",
    "clear",
    "effective",
    "efficient",
    "excellent",
    "fast",
    "good",
    "great",
    "helpful",
    "impressive",
    "improved",
    "innovative",
    "outstanding",
    "perfect",
    "powerful",
    "recommended",
    "reliable",
    "robust",
    "secure",
    "simple",
    "smooth",
    "strong",
    "success",
    "successful",
    "trusted",
    "useful",
    "valuable",
    "wonderful",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad",
    "broken",
    "bug",
    "complicated",
    "confusing",
    "dangerous",
    "difficult",
    "disappointing",
    "error",
    "fail",
    "failed",
    "failure",
    "flawed",
    "fragile",
    "harmful",
    "inadequate",
    "incorrect",
    "insecure",
    "issue",
    "lacking",
    "mistake",
    "outdated",
    "poor",
    "problem",
    "risky",
    "slow",
    "terrible",
    "unreliable",
    "unstable",
    "useless",
    "weak",
    "worst",
];

const FORMAL_MARKERS: &[&str] = &[
    "accordingly",
    "consequently",
    "furthermore",
    "hence",
    "however",
    "moreover",
    "nevertheless",
    "notwithstanding",
    "regarding",
    "therefore",
    "thus",
    "whereas",
];

const CONVERSATIONAL_MARKERS: &[&str] = &[
    "actually", "anyway", "basically", "honestly", "let's", "okay", "pretty", "really", "stuff",
    "things", "you", "your",
];

const TECHNICAL_MARKERS: &[&str] = &[
    "algorithm",
    "api",
    "architecture",
    "compiler",
    "configuration",
    "database",
    "framework",
    "function",
    "implementation",
    "interface",
    "parameter",
    "protocol",
    "runtime",
    "schema",
];

const PERSUASIVE_MARKERS: &[&str] = &[
    "essential",
    "exclusive",
    "guaranteed",
    "instantly",
    "limited",
    "must",
    "proven",
    "revolutionary",
    "ultimate",
    "unbeatable",
];

/// Label thresholds for the sentiment score
const SENTIMENT_THRESHOLD: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentAnalysis {
    /// Score in [-1, 1]: (positive hits - negative hits) / total hits
    pub score: f64,
    pub label: SentimentLabel,
}

/// Tone marker counts normalized per 1,000 words
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToneProfile {
    pub formal: f64,
    pub conversational: f64,
    pub technical: f64,
    pub persuasive: f64,
}

/// Score sentiment from fixed lexicons
pub fn analyze(tokens: &[String]) -> SentimentAnalysis {
    let positive = tokens
        .iter()
        .filter(|t| POSITIVE_WORDS.binary_search(&t.as_str()).is_ok())
        .count();
    let negative = tokens
        .iter()
        .filter(|t| NEGATIVE_WORDS.binary_search(&t.as_str()).is_ok())
        .count();

    let total = positive + negative;
    let score = if total == 0 {
        0.0
    } else {
        (positive as f64 - negative as f64) / total as f64
    };

    let label = if score > SENTIMENT_THRESHOLD {
        SentimentLabel::Positive
    } else if score < -SENTIMENT_THRESHOLD {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    };

    SentimentAnalysis { score, label }
}

/// Profile tone from marker lexicons, normalized per 1,000 words
pub fn tone(tokens: &[String]) -> ToneProfile {
    if tokens.is_empty() {
        return ToneProfile::default();
    }
    let per_thousand = 1000.0 / tokens.len() as f64;
    let count = |lexicon: &[&str]| -> f64 {
        tokens
            .iter()
            .filter(|t| lexicon.binary_search(&t.as_str()).is_ok())
            .count() as f64
            * per_thousand
    };

    ToneProfile {
        formal: count(FORMAL_MARKERS),
        conversational: count(CONVERSATIONAL_MARKERS),
        technical: count(TECHNICAL_MARKERS),
        persuasive: count(PERSUASIVE_MARKERS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::keywords::tokenize;

    #[test]
    fn lexicons_sorted_for_binary_search() {
        for lexicon in [
            POSITIVE_WORDS,
            NEGATIVE_WORDS,
            FORMAL_MARKERS,
            CONVERSATIONAL_MARKERS,
            TECHNICAL_MARKERS,
            PERSUASIVE_MARKERS,
        ] {
            let mut sorted = lexicon.to_vec();
            sorted.sort_unstable();
            assert_eq!(lexicon, sorted.as_slice());
        }
    }

    #[test]
    fn positive_text_scores_positive() {
        let tokens = tokenize("This excellent reliable library is fast and helpful");
        let s = analyze(&tokens);
        assert!(s.score > 0.2);
        assert_eq!(s.label, SentimentLabel::Positive);
    }

    #[test]
    fn negative_text_scores_negative() {
        let tokens = tokenize("A broken, slow and unreliable mess full of bugs and problems");
        let s = analyze(&tokens);
        assert!(s.score < -0.2);
        assert_eq!(s.label, SentimentLabel::Negative);
    }

    #[test]
    fn balanced_text_is_neutral() {
        let tokens = tokenize("good results but slow performance");
        let s = analyze(&tokens);
        assert_eq!(s.label, SentimentLabel::Neutral);
        assert_eq!(s.score, 0.0);
    }

    #[test]
    fn no_lexicon_hits_is_neutral_zero() {
        let tokens = tokenize("the function returns a value");
        let s = analyze(&tokens);
        assert_eq!(s.score, 0.0);
        assert_eq!(s.label, SentimentLabel::Neutral);
    }

    #[test]
    fn score_stays_in_range() {
        let tokens = tokenize("excellent excellent excellent");
        let s = analyze(&tokens);
        assert_eq!(s.score, 1.0);
    }

    #[test]
    fn tone_normalized_per_thousand_words() {
        // 10 words, one technical marker = 100 per 1000
        let tokens = tokenize("the api accepts ten values and returns one value back");
        let t = tone(&tokens);
        assert!((t.technical - 100.0).abs() < 1e-9);
        assert_eq!(t.persuasive, 0.0);
    }

    #[test]
    fn tone_of_empty_text_is_zero() {
        let t = tone(&[]);
        assert_eq!(t.formal, 0.0);
        assert_eq!(t.conversational, 0.0);
    }
}
