//! Structure scorer: heading outline, extractable blocks, and semantic
//! landmarks that make a page easy to quote.

use super::{CategoryScorer, Checklist};
use crate::document::DocumentModel;
use crate::{Category, CategoryScore, SignalCode};

// Point allocation (sums to 100)
const PTS_SINGLE_H1: f64 = 20.0;
const PTS_HIERARCHY: f64 = 20.0;
const PTS_LISTS_TABLES: f64 = 15.0;
const PTS_PARAGRAPHS: f64 = 15.0;
const PTS_QUESTIONS: f64 = 15.0;
const PTS_LANDMARKS: f64 = 15.0;

/// Average words per paragraph above which prose stops being quotable
const MAX_AVG_PARAGRAPH_WORDS: usize = 120;

const QUESTION_STARTERS: &[&str] = &[
    "what", "how", "why", "when", "where", "who", "which", "can", "does", "is", "should",
];

pub struct StructureScorer;

impl CategoryScorer for StructureScorer {
    fn category(&self) -> Category {
        Category::Structure
    }

    fn score(&self, doc: &DocumentModel) -> CategoryScore {
        let mut checklist = Checklist::new(Category::Structure);

        let h1_count = doc.headings.iter().filter(|h| h.level == 1).count();
        match h1_count {
            1 => checklist.pass(
                SignalCode::SingleH1,
                PTS_SINGLE_H1,
                "Exactly one H1 defines the page topic",
            ),
            0 => checklist.fail(SignalCode::SingleH1, PTS_SINGLE_H1, "Page has no H1"),
            n => checklist.credit(
                SignalCode::SingleH1,
                PTS_SINGLE_H1,
                0.5,
                format!("Page has {} H1 headings; keep exactly one", n),
            ),
        }

        if doc.headings.is_empty() {
            checklist.fail(
                SignalCode::HeadingHierarchy,
                PTS_HIERARCHY,
                "No headings to form an outline",
            );
        } else {
            let mut prev = doc.headings[0].level;
            let mut skips = 0;
            for h in &doc.headings[1..] {
                if h.level > prev + 1 {
                    skips += 1;
                }
                prev = h.level;
            }
            if skips == 0 {
                checklist.pass(
                    SignalCode::HeadingHierarchy,
                    PTS_HIERARCHY,
                    "Heading levels descend without skips",
                );
            } else {
                checklist.credit(
                    SignalCode::HeadingHierarchy,
                    PTS_HIERARCHY,
                    0.5,
                    format!("Heading outline skips levels {} time(s)", skips),
                );
            }
        }

        let lower = doc.raw_html.to_lowercase();
        let block_count = lower.matches("<ul").count()
            + lower.matches("<ol").count()
            + lower.matches("<table").count();
        if block_count >= 2 {
            checklist.pass(
                SignalCode::ListTableContent,
                PTS_LISTS_TABLES,
                format!("{} lists/tables provide extractable facts", block_count),
            );
        } else if block_count == 1 {
            checklist.credit(
                SignalCode::ListTableContent,
                PTS_LISTS_TABLES,
                0.5,
                "Only one list or table; structured blocks are easy to cite",
            );
        } else {
            checklist.fail(
                SignalCode::ListTableContent,
                PTS_LISTS_TABLES,
                "No lists or tables found",
            );
        }

        let paragraph_count =
            lower.matches("<p>").count() + lower.matches("<p ").count();
        if paragraph_count == 0 {
            checklist.fail(
                SignalCode::ParagraphLength,
                PTS_PARAGRAPHS,
                "No paragraph elements found",
            );
        } else {
            let words = doc.text_content.split_whitespace().count();
            let avg = words / paragraph_count;
            if avg <= MAX_AVG_PARAGRAPH_WORDS {
                checklist.pass(
                    SignalCode::ParagraphLength,
                    PTS_PARAGRAPHS,
                    format!("Paragraphs average {} words", avg),
                );
            } else {
                checklist.credit(
                    SignalCode::ParagraphLength,
                    PTS_PARAGRAPHS,
                    0.5,
                    format!(
                        "Paragraphs average {} words; break up walls of text",
                        avg
                    ),
                );
            }
        }

        let has_question_heading = doc.headings.iter().any(|h| {
            let t = h.text.to_lowercase();
            h.text.contains('?')
                || QUESTION_STARTERS
                    .iter()
                    .any(|q| t.starts_with(&format!("{} ", q)))
        });
        if has_question_heading {
            checklist.pass(
                SignalCode::QuestionHeadings,
                PTS_QUESTIONS,
                "Question-form headings map to answer-engine queries",
            );
        } else {
            checklist.fail(
                SignalCode::QuestionHeadings,
                PTS_QUESTIONS,
                "No question-form headings",
            );
        }

        let landmarks = ["<main", "<article", "<nav", "<header", "<footer", "<section"]
            .iter()
            .filter(|tag| lower.contains(**tag))
            .count();
        if landmarks >= 3 {
            checklist.pass(
                SignalCode::SemanticLandmarks,
                PTS_LANDMARKS,
                format!("{} semantic landmark elements in use", landmarks),
            );
        } else if landmarks >= 1 {
            checklist.credit(
                SignalCode::SemanticLandmarks,
                PTS_LANDMARKS,
                0.5,
                "Few semantic landmarks; use main/article/nav to segment the page",
            );
        } else {
            checklist.fail(
                SignalCode::SemanticLandmarks,
                PTS_LANDMARKS,
                "No semantic landmark elements",
            );
        }

        checklist.into_score()
    }
}
