//! Category scorers for the nine weighted audit categories.
//!
//! Every scorer is a pure function over the document model: no I/O, no
//! randomness, no shared state. Each evaluates a fixed checklist of signals
//! whose points sum to 100, with partial credit per signal, and emits exactly
//! one finding per signal. Missing data scores the signal minimum; it is
//! never an error.

pub mod ai_crawlers;
pub mod content_quality;
pub mod eeat;
pub mod links;
pub mod meta_tags;
pub mod performance;
pub mod schema_markup;
pub mod structure;
pub mod technical;

pub use ai_crawlers::AiCrawlerScorer;
pub use content_quality::ContentQualityScorer;
pub use eeat::EeatScorer;
pub use links::LinkScorer;
pub use meta_tags::MetaTagScorer;
pub use performance::PerformanceScorer;
pub use schema_markup::SchemaMarkupScorer;
pub use structure::StructureScorer;
pub use technical::TechnicalSeoScorer;

use crate::document::DocumentModel;
use crate::{Category, CategoryScore, Finding, SignalCode};

/// Trait implemented by every category scorer
pub trait CategoryScorer: Send + Sync {
    /// Category this scorer is responsible for
    fn category(&self) -> Category;

    /// Score the document. Pure: identical input yields identical output.
    fn score(&self, doc: &DocumentModel) -> CategoryScore;
}

/// The fixed registry of weighted scorers, in weight-table order
pub fn weighted_scorers() -> Vec<Box<dyn CategoryScorer>> {
    vec![
        Box::new(SchemaMarkupScorer),
        Box::new(AiCrawlerScorer),
        Box::new(EeatScorer),
        Box::new(TechnicalSeoScorer),
        Box::new(LinkScorer),
        Box::new(MetaTagScorer),
        Box::new(ContentQualityScorer),
        Box::new(StructureScorer),
        Box::new(PerformanceScorer),
    ]
}

/// Accumulates signal credit and evidence for one category.
///
/// Point allocations for a category sum to 100, so the final score is the
/// earned total, normalized defensively in case a table drifts.
pub(crate) struct Checklist {
    category: Category,
    earned: f64,
    possible: f64,
    findings: Vec<Finding>,
}

impl Checklist {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            earned: 0.0,
            possible: 0.0,
            findings: Vec::new(),
        }
    }

    /// Full credit: the signal passed
    pub fn pass(&mut self, code: SignalCode, points: f64, message: impl Into<String>) {
        self.add(points, 1.0, Finding::strength(self.category, code, message));
    }

    /// Zero credit: the signal failed or the data is absent
    pub fn fail(&mut self, code: SignalCode, points: f64, message: impl Into<String>) {
        self.add(points, 0.0, Finding::issue(self.category, code, message));
    }

    /// Partial credit; anything below full credit is recorded as an issue
    pub fn credit(
        &mut self,
        code: SignalCode,
        points: f64,
        fraction: f64,
        message: impl Into<String>,
    ) {
        let fraction = fraction.clamp(0.0, 1.0);
        let finding = if fraction >= 1.0 {
            Finding::strength(self.category, code, message)
        } else {
            Finding::issue(self.category, code, message)
        };
        self.add(points, fraction, finding);
    }

    /// Low-level entry used by the advanced audits for estimated findings
    pub fn add(&mut self, points: f64, fraction: f64, finding: Finding) {
        self.possible += points;
        self.earned += points * fraction.clamp(0.0, 1.0);
        self.findings.push(finding);
    }

    pub fn into_score(self) -> CategoryScore {
        let score = if self.possible > 0.0 {
            self.earned / self.possible * 100.0
        } else {
            0.0
        };
        CategoryScore::new(self.category, score, self.findings)
    }
}
