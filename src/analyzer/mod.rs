//! Audit engine: fans out over all scorers and assembles the final report.

pub mod scorers;
pub mod scoring;

pub use scoring::{CategoryWeights, ScoreCalculator};

use crate::document::DocumentModel;
use crate::recommend::RecommendationEngine;
use crate::{nlp, AuditResult, CategoryScore, Finding, Grade, GradeCutoffs};
use rayon::prelude::*;
use scorers::CategoryScorer;

/// Orchestrates the scorer fan-out and the aggregation into one AuditResult.
///
/// Scorers are pure and independent, so the fan-out is embarrassingly
/// parallel: one task per category, results joined in registry order before
/// aggregation.
pub struct AuditEngine {
    weights: CategoryWeights,
    cutoffs: GradeCutoffs,
    parallel: bool,
}

impl AuditEngine {
    pub fn new() -> Self {
        Self {
            weights: CategoryWeights::default(),
            cutoffs: GradeCutoffs::default(),
            parallel: true,
        }
    }

    /// Use custom category weights (already validated to sum to 100)
    pub fn with_weights(mut self, weights: CategoryWeights) -> Self {
        debug_assert!(weights.validate().is_ok());
        self.weights = weights;
        self
    }

    /// Use custom grade cut points
    pub fn with_cutoffs(mut self, cutoffs: GradeCutoffs) -> Self {
        self.cutoffs = cutoffs;
        self
    }

    /// Run scorers on the current thread instead of the rayon pool
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Audit one document and assemble the complete result
    pub fn audit(&self, doc: &DocumentModel) -> AuditResult {
        let mut registry: Vec<Box<dyn CategoryScorer>> = scorers::weighted_scorers();
        registry.extend(crate::audits::advisory_audits());

        let category_scores: Vec<CategoryScore> = if self.parallel {
            registry.par_iter().map(|s| s.score(doc)).collect()
        } else {
            registry.iter().map(|s| s.score(doc)).collect()
        };

        let overall_score = ScoreCalculator::overall_score(&category_scores, &self.weights);
        let grade = Grade::from_score(overall_score, &self.cutoffs);
        let component_rollup = ScoreCalculator::component_rollup(&category_scores);

        let findings: Vec<Finding> = category_scores
            .iter()
            .flat_map(|c| c.findings.iter().cloned())
            .collect();
        let recommendations = RecommendationEngine::new().from_findings(&findings);

        AuditResult {
            url: doc.url.clone(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            overall_score,
            grade,
            category_scores,
            component_rollup,
            content_analysis: nlp::analyze(&doc.text_content),
            recommendations,
        }
    }
}

impl AuditEngine {
    /// Get aggregate stats from multiple results
    pub fn aggregate_stats(results: &[AuditResult]) -> AggregateStats {
        if results.is_empty() {
            return AggregateStats::default();
        }

        let total: f64 = results.iter().map(|r| r.overall_score).sum();
        let average_score = scoring::round3(total / results.len() as f64);
        let total_issues = results.iter().map(|r| r.issues().count()).sum();
        let total_recommendations = results.iter().map(|r| r.recommendations.len()).sum();

        AggregateStats {
            pages_audited: results.len(),
            average_score,
            average_grade: Grade::from_score(average_score, &GradeCutoffs::default()),
            total_issues,
            total_recommendations,
        }
    }
}

/// Aggregate statistics from multiple page audits
#[derive(Debug)]
pub struct AggregateStats {
    pub pages_audited: usize,
    pub average_score: f64,
    pub average_grade: Grade,
    pub total_issues: usize,
    pub total_recommendations: usize,
}

impl Default for AggregateStats {
    fn default() -> Self {
        Self {
            pages_audited: 0,
            average_score: 0.0,
            average_grade: Grade::F,
            total_issues: 0,
            total_recommendations: 0,
        }
    }
}

impl Default for AuditEngine {
    fn default() -> Self {
        Self::new()
    }
}
