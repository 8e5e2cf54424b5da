//! Content quality scorer, fed by the heuristic NLP analyzer.

use super::{CategoryScorer, Checklist};
use crate::document::DocumentModel;
use crate::nlp::{self, SentenceVariety, StuffingRisk};
use crate::{Category, CategoryScore, SignalCode};

// Point allocation (sums to 100)
const PTS_WORD_COUNT: f64 = 20.0;
const PTS_KEYWORD_FOCUS: f64 = 20.0;
const PTS_DIVERSITY: f64 = 10.0;
const PTS_VARIETY: f64 = 10.0;
const PTS_ENTITIES: f64 = 10.0;
const PTS_TOPIC: f64 = 10.0;
const PTS_DENSITY: f64 = 10.0;
const PTS_DIRECT_ANSWER: f64 = 10.0;

const WORDS_FULL: usize = 500;
const WORDS_HALF: usize = 300;
const DIVERSITY_FULL: f64 = 0.4;
const DIVERSITY_HALF: f64 = 0.25;
const DENSITY_RANGE: std::ops::RangeInclusive<f64> = 0.35..=0.7;
/// How far into the text a definitional opening still counts as direct
const DIRECT_ANSWER_WINDOW: usize = 250;

pub struct ContentQualityScorer;

impl CategoryScorer for ContentQualityScorer {
    fn category(&self) -> Category {
        Category::ContentQuality
    }

    fn score(&self, doc: &DocumentModel) -> CategoryScore {
        let analysis = nlp::analyze(&doc.text_content);
        let mut checklist = Checklist::new(Category::ContentQuality);

        let words = analysis.word_count;
        if words >= WORDS_FULL {
            checklist.pass(
                SignalCode::WordCount,
                PTS_WORD_COUNT,
                format!("Substantive content length ({} words)", words),
            );
        } else if words >= WORDS_HALF {
            checklist.credit(
                SignalCode::WordCount,
                PTS_WORD_COUNT,
                0.5,
                format!("Content is brief ({} words); aim for {}+", words, WORDS_FULL),
            );
        } else {
            checklist.fail(
                SignalCode::WordCount,
                PTS_WORD_COUNT,
                format!("Content is thin ({} words)", words),
            );
        }

        match analysis.keywords.stuffing_risk {
            StuffingRisk::None if !analysis.keywords.primary.is_empty() => checklist.pass(
                SignalCode::KeywordFocus,
                PTS_KEYWORD_FOCUS,
                format!(
                    "Clear keyword focus on \"{}\" without stuffing",
                    analysis.keywords.primary[0].term
                ),
            ),
            StuffingRisk::None => checklist.fail(
                SignalCode::KeywordFocus,
                PTS_KEYWORD_FOCUS,
                "No identifiable keyword focus",
            ),
            StuffingRisk::Low => checklist.credit(
                SignalCode::KeywordFocus,
                PTS_KEYWORD_FOCUS,
                0.5,
                format!(
                    "Keyword \"{}\" density is elevated ({:.1}%)",
                    analysis.keywords.primary[0].term, analysis.keywords.primary[0].density
                ),
            ),
            StuffingRisk::High => checklist.fail(
                SignalCode::KeywordFocus,
                PTS_KEYWORD_FOCUS,
                format!(
                    "Keyword stuffing detected: \"{}\" at {:.1}% density",
                    analysis.keywords.primary[0].term, analysis.keywords.primary[0].density
                ),
            ),
        }

        let diversity = analysis.vocabulary_diversity;
        if diversity >= DIVERSITY_FULL {
            checklist.pass(
                SignalCode::VocabularyDiversity,
                PTS_DIVERSITY,
                format!("Varied vocabulary (diversity {:.2})", diversity),
            );
        } else if diversity >= DIVERSITY_HALF {
            checklist.credit(
                SignalCode::VocabularyDiversity,
                PTS_DIVERSITY,
                0.5,
                format!("Repetitive vocabulary (diversity {:.2})", diversity),
            );
        } else {
            checklist.fail(
                SignalCode::VocabularyDiversity,
                PTS_DIVERSITY,
                format!("Very repetitive vocabulary (diversity {:.2})", diversity),
            );
        }

        let (variety_fraction, variety_msg) = match analysis.sentences.variety {
            SentenceVariety::High => (1.0, "Sentence lengths vary well"),
            SentenceVariety::Medium => (0.6, "Moderate sentence variety"),
            SentenceVariety::Low => (0.2, "Monotonous sentence rhythm"),
        };
        checklist.credit(
            SignalCode::SentenceVariety,
            PTS_VARIETY,
            variety_fraction,
            variety_msg,
        );

        let entity_count = analysis.entities.len();
        if entity_count >= 3 {
            checklist.pass(
                SignalCode::NamedEntities,
                PTS_ENTITIES,
                format!("{} named entities ground the content", entity_count),
            );
        } else if entity_count >= 1 {
            checklist.credit(
                SignalCode::NamedEntities,
                PTS_ENTITIES,
                0.5,
                format!("Only {} named entit(ies); cite concrete sources", entity_count),
            );
        } else {
            checklist.fail(
                SignalCode::NamedEntities,
                PTS_ENTITIES,
                "No named entities in the text",
            );
        }

        if let Some(top) = analysis.topics.first() {
            checklist.pass(
                SignalCode::TopicFocus,
                PTS_TOPIC,
                format!(
                    "Topic cluster \"{}\" at {:.0}% relevance",
                    top.topic, top.relevance
                ),
            );
        } else {
            checklist.fail(
                SignalCode::TopicFocus,
                PTS_TOPIC,
                "No recognizable topic cluster",
            );
        }

        let density = analysis.lexical_density;
        if DENSITY_RANGE.contains(&density) {
            checklist.pass(
                SignalCode::LexicalDensity,
                PTS_DENSITY,
                format!("Healthy lexical density ({:.2})", density),
            );
        } else if words > 0 {
            checklist.credit(
                SignalCode::LexicalDensity,
                PTS_DENSITY,
                0.5,
                format!("Lexical density {:.2} is outside the 0.35-0.70 band", density),
            );
        } else {
            checklist.fail(
                SignalCode::LexicalDensity,
                PTS_DENSITY,
                "No text to measure",
            );
        }

        let opening: String = doc
            .text_content
            .chars()
            .take(DIRECT_ANSWER_WINDOW)
            .collect();
        let has_direct_answer =
            opening.contains(" is ") || opening.contains(" are ") || opening.contains(" means ");
        if has_direct_answer {
            checklist.pass(
                SignalCode::DirectAnswers,
                PTS_DIRECT_ANSWER,
                "Opening text answers the topic directly",
            );
        } else {
            checklist.fail(
                SignalCode::DirectAnswers,
                PTS_DIRECT_ANSWER,
                "Opening text does not state a direct answer or definition",
            );
        }

        checklist.into_score()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_text(body: &str) -> DocumentModel {
        let html = format!("<html><body><p>{}</p></body></html>", body);
        DocumentModel::parse("https://example.com/", &html, None)
    }

    #[test]
    fn empty_page_scores_near_zero() {
        let score = ContentQualityScorer.score(&doc_with_text(""));
        assert!(score.score <= 5.0, "got {}", score.score);
    }

    #[test]
    fn stuffed_text_fails_keyword_focus() {
        // "widget" repeated far beyond 5% density
        let body = format!("widget buy {} now", "widget ".repeat(30));
        let score = ContentQualityScorer.score(&doc_with_text(&body));
        let focus = score
            .findings
            .iter()
            .find(|f| f.code == SignalCode::KeywordFocus)
            .unwrap();
        assert_eq!(focus.severity, crate::FindingSeverity::Issue);
        assert!(focus.message.contains("stuffing"));
    }

    #[test]
    fn direct_definition_opening_earns_credit() {
        let body = "Connection pooling is a technique for reusing database connections.";
        let score = ContentQualityScorer.score(&doc_with_text(body));
        assert!(score
            .findings
            .iter()
            .any(|f| f.code == SignalCode::DirectAnswers
                && f.severity == crate::FindingSeverity::Strength));
    }

    #[test]
    fn entity_rich_text_earns_entity_credit() {
        let body = "Both PostgreSQL and Redis ship pooling tools, and engineers at Netflix \
                    described theirs in a paper.";
        let score = ContentQualityScorer.score(&doc_with_text(body));
        let entities = score
            .findings
            .iter()
            .find(|f| f.code == SignalCode::NamedEntities)
            .unwrap();
        assert_eq!(entities.severity, crate::FindingSeverity::Strength);
    }

    #[test]
    fn scorer_is_deterministic() {
        let doc = doc_with_text("Caching is the practice of storing hot data near the consumer.");
        let a = ContentQualityScorer.score(&doc);
        let b = ContentQualityScorer.score(&doc);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}
