//! Score forecasting: trend fitting, horizon projections, what-if
//! scenarios, and rule-derived insights.

use crate::analyzer::scoring::round3;
use crate::history::HistoryRun;
use crate::{Category, Grade, GradeCutoffs};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum history points before a trend is meaningful
pub const MIN_HISTORY_POINTS: usize = 2;
/// Forecast horizons in days
pub const HORIZONS: [u32; 3] = [30, 60, 90];

/// Nominal audit cadence used to convert the per-run trend into a daily one
const NOMINAL_RUN_SPACING_DAYS: f64 = 30.0;
/// Score ceiling used for what-if gap calculations
const SCENARIO_CEILING: f64 = 95.0;
/// Trend below which the score is considered actively declining (per day)
const RISK_TREND: f64 = -0.05;
/// Trend magnitude under which the score has plateaued (per day)
const PLATEAU_TREND: f64 = 0.01;
/// Trend above which improvement has real momentum (per day)
const MOMENTUM_TREND: f64 = 0.15;
/// Score above which a plateau is fine rather than a warning
const EXCELLENCE_THRESHOLD: f64 = 85.0;

/// Forecasting requires history; everything else about it is non-fatal
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("insufficient history: {observed} run(s) recorded, need at least {required}")]
    InsufficientHistory { observed: usize, required: usize },
}

/// Score projection for one horizon
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Forecast {
    pub horizon_days: u32,
    pub predicted_score: f64,
    /// 0-100; a pure function of the horizon, never of the trend
    pub confidence: f64,
    pub range: ScoreRange,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRange {
    pub min: f64,
    pub max: f64,
}

/// A hypothetical remediation with an estimated score delta
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhatIfScenario {
    pub description: String,
    /// Estimated overall-score gain
    pub estimated_impact: f64,
    /// Fixed constant per scenario class
    pub probability: f64,
    pub implementation: String,
    pub time_to_effect: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Milestone,
    Risk,
    Plateau,
    Momentum,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    pub kind: InsightKind,
    pub message: String,
}

/// Complete forecasting output for one subject
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastReport {
    pub url: String,
    pub current_score: f64,
    /// Fitted trend in points per day
    pub trend_per_day: f64,
    pub forecasts: Vec<Forecast>,
    pub scenarios: Vec<WhatIfScenario>,
    pub insights: Vec<Insight>,
}

/// Fits a trend to a subject's score history and projects forward
pub struct ForecastEngine {
    cutoffs: GradeCutoffs,
}

impl ForecastEngine {
    pub fn new() -> Self {
        Self {
            cutoffs: GradeCutoffs::default(),
        }
    }

    pub fn with_cutoffs(mut self, cutoffs: GradeCutoffs) -> Self {
        self.cutoffs = cutoffs;
        self
    }

    /// Project forecasts, scenarios, and insights from a subject's ordered
    /// history. Fewer than two runs is a distinct insufficient-data state,
    /// never a zero forecast.
    pub fn project(&self, url: &str, runs: &[HistoryRun]) -> Result<ForecastReport, ForecastError> {
        if runs.len() < MIN_HISTORY_POINTS {
            return Err(ForecastError::InsufficientHistory {
                observed: runs.len(),
                required: MIN_HISTORY_POINTS,
            });
        }

        let mut ordered: Vec<&HistoryRun> = runs.iter().collect();
        ordered.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

        let scores: Vec<f64> = ordered.iter().map(|r| r.overall_score).collect();
        let slope_per_run = ols_slope(&scores);
        let trend_per_day = slope_per_run / NOMINAL_RUN_SPACING_DAYS;
        let current = *scores.last().expect("checked non-empty");

        let forecasts: Vec<Forecast> = HORIZONS
            .iter()
            .map(|&d| self.forecast_for(current, trend_per_day, d))
            .collect();

        let latest = ordered.last().expect("checked non-empty");
        let scenarios = self.scenarios_for(latest);
        let insights = self.insights_for(current, trend_per_day, &forecasts);

        Ok(ForecastReport {
            url: url.to_string(),
            current_score: current,
            trend_per_day: round3(trend_per_day),
            forecasts,
            scenarios,
            insights,
        })
    }

    fn forecast_for(&self, current: f64, trend_per_day: f64, horizon_days: u32) -> Forecast {
        let d = horizon_days as f64;
        // Sustained linear improvement is not realistic; decay the trend
        let diminishing = 0.95_f64.powf(d / 30.0);
        let predicted = (current + trend_per_day * d * diminishing).clamp(0.0, 100.0);
        let confidence = (95.0 - d / 90.0 * 35.0).max(60.0);
        let k = range_width(horizon_days);

        Forecast {
            horizon_days,
            predicted_score: round3(predicted),
            confidence: round3(confidence),
            range: ScoreRange {
                min: round3((predicted - k).max(0.0)),
                max: round3((predicted + k).min(100.0)),
            },
        }
    }

    /// Scenarios come from the current weakest weighted categories, not from
    /// the trend.
    fn scenarios_for(&self, latest: &HistoryRun) -> Vec<WhatIfScenario> {
        let mut weakest: Vec<(Category, f64)> = WEIGHTED_CATEGORIES
            .iter()
            .filter_map(|c| {
                latest
                    .category_scores
                    .get(c.key())
                    .map(|score| (*c, *score))
            })
            .filter(|(_, score)| *score < SCENARIO_CEILING)
            .collect();
        weakest.sort_by(|a, b| {
            a.1.partial_cmp(&b.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.key().cmp(b.0.key()))
        });

        weakest
            .into_iter()
            .take(3)
            .map(|(category, score)| {
                let class = scenario_class(category);
                let gap = SCENARIO_CEILING - score;
                WhatIfScenario {
                    description: class.description.to_string(),
                    estimated_impact: round3((gap * class.factor).min(class.cap)),
                    probability: class.probability,
                    implementation: class.implementation.to_string(),
                    time_to_effect: class.time_to_effect.to_string(),
                }
            })
            .collect()
    }

    fn insights_for(
        &self,
        current: f64,
        trend_per_day: f64,
        forecasts: &[Forecast],
    ) -> Vec<Insight> {
        let mut insights = Vec::new();

        let current_grade = Grade::from_score(current, &self.cutoffs);
        for forecast in forecasts {
            let projected_grade = Grade::from_score(forecast.predicted_score, &self.cutoffs);
            if projected_grade < current_grade {
                insights.push(Insight {
                    kind: InsightKind::Milestone,
                    message: format!(
                        "On the current trend the score reaches grade {} within {} days",
                        projected_grade, forecast.horizon_days
                    ),
                });
                break;
            }
        }

        if trend_per_day < RISK_TREND {
            insights.push(Insight {
                kind: InsightKind::Risk,
                message: format!(
                    "Score is declining {:.2} points/day; recent regressions need attention",
                    -trend_per_day
                ),
            });
        } else if trend_per_day.abs() < PLATEAU_TREND && current < EXCELLENCE_THRESHOLD {
            insights.push(Insight {
                kind: InsightKind::Plateau,
                message: format!(
                    "Score has plateaued at {:.0}; the open recommendations are not being worked",
                    current
                ),
            });
        } else if trend_per_day > MOMENTUM_TREND {
            insights.push(Insight {
                kind: InsightKind::Momentum,
                message: format!(
                    "Score is climbing {:.2} points/day; keep shipping the current fixes",
                    trend_per_day
                ),
            });
        }

        insights
    }
}

impl Default for ForecastEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// The nine weighted categories, eligible for what-if scenarios
const WEIGHTED_CATEGORIES: [Category; 9] = [
    Category::SchemaMarkup,
    Category::AiCrawlers,
    Category::Eeat,
    Category::TechnicalSeo,
    Category::Links,
    Category::MetaTags,
    Category::ContentQuality,
    Category::Structure,
    Category::Performance,
];

struct ScenarioClass {
    description: &'static str,
    implementation: &'static str,
    probability: f64,
    factor: f64,
    cap: f64,
    time_to_effect: &'static str,
}

/// Fixed per-class constants reflecting how reliably each remediation class
/// moves scores
fn scenario_class(category: Category) -> ScenarioClass {
    match category {
        Category::SchemaMarkup => ScenarioClass {
            description: "Implement comprehensive Schema markup",
            implementation: "Add Organization, Article, and FAQ JSON-LD to the page",
            probability: 0.85,
            factor: 0.14,
            cap: 12.0,
            time_to_effect: "2-4 weeks",
        },
        Category::AiCrawlers => ScenarioClass {
            description: "Open the site to AI crawlers",
            implementation: "Allow GPTBot, ClaudeBot, and PerplexityBot in robots.txt",
            probability: 0.9,
            factor: 0.14,
            cap: 14.0,
            time_to_effect: "1-2 weeks",
        },
        Category::Eeat => ScenarioClass {
            description: "Build out author and trust signals",
            implementation: "Add bylines, dates, credentials, and sourced citations",
            probability: 0.7,
            factor: 0.12,
            cap: 10.0,
            time_to_effect: "4-8 weeks",
        },
        Category::TechnicalSeo => ScenarioClass {
            description: "Close the technical SEO gaps",
            implementation: "Fix canonical, language, alt text, and protocol issues",
            probability: 0.85,
            factor: 0.11,
            cap: 9.0,
            time_to_effect: "1-2 weeks",
        },
        Category::Links => ScenarioClass {
            description: "Strengthen the link profile",
            implementation: "Add internal links and cite external sources with descriptive anchors",
            probability: 0.7,
            factor: 0.1,
            cap: 8.0,
            time_to_effect: "2-4 weeks",
        },
        Category::MetaTags => ScenarioClass {
            description: "Complete the meta tag set",
            implementation: "Tune title/description lengths and add social tags",
            probability: 0.9,
            factor: 0.08,
            cap: 6.0,
            time_to_effect: "days",
        },
        Category::ContentQuality => ScenarioClass {
            description: "Deepen the content",
            implementation: "Expand coverage, lead with direct answers, and name sources",
            probability: 0.65,
            factor: 0.08,
            cap: 7.0,
            time_to_effect: "4-6 weeks",
        },
        Category::Structure => ScenarioClass {
            description: "Restructure for extraction",
            implementation: "Fix the heading outline and add lists and question headings",
            probability: 0.8,
            factor: 0.05,
            cap: 5.0,
            time_to_effect: "1-2 weeks",
        },
        _ => ScenarioClass {
            description: "Trim page weight and scripts",
            implementation: "Reduce payload size and consolidate scripts",
            probability: 0.75,
            factor: 0.04,
            cap: 4.0,
            time_to_effect: "2-4 weeks",
        },
    }
}

/// Range half-width in points per horizon
fn range_width(horizon_days: u32) -> f64 {
    match horizon_days {
        0..=30 => 5.0,
        31..=60 => 8.0,
        _ => 10.0,
    }
}

/// Closed-form ordinary least squares slope of scores against index
fn ols_slope(scores: &[f64]) -> f64 {
    let n = scores.len() as f64;
    if scores.len() < 2 {
        return 0.0;
    }
    let sum_x: f64 = (0..scores.len()).map(|i| i as f64).sum();
    let sum_y: f64 = scores.iter().sum();
    let sum_xy: f64 = scores.iter().enumerate().map(|(i, y)| i as f64 * y).sum();
    let sum_x2: f64 = (0..scores.len()).map(|i| (i as f64) * (i as f64)).sum();

    let denominator = n * sum_x2 - sum_x * sum_x;
    if denominator.abs() < f64::EPSILON {
        return 0.0;
    }
    (n * sum_xy - sum_x * sum_y) / denominator
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn run(timestamp: &str, score: f64) -> HistoryRun {
        HistoryRun {
            url: "https://example.com/".to_string(),
            timestamp: timestamp.to_string(),
            overall_score: score,
            category_scores: BTreeMap::new(),
        }
    }

    fn weekly_runs(scores: &[f64]) -> Vec<HistoryRun> {
        scores
            .iter()
            .enumerate()
            .map(|(i, s)| run(&format!("2025-01-{:02}T00:00:00Z", 1 + i * 7), *s))
            .collect()
    }

    #[test]
    fn ols_slope_of_linear_series() {
        assert!((ols_slope(&[60.0, 62.0, 64.0, 66.0]) - 2.0).abs() < 1e-9);
        assert!((ols_slope(&[80.0, 75.0, 70.0]) - (-5.0)).abs() < 1e-9);
        assert_eq!(ols_slope(&[50.0, 50.0, 50.0]), 0.0);
    }

    #[test]
    fn fewer_than_two_points_is_insufficient() {
        let engine = ForecastEngine::new();
        let err = engine.project("https://example.com/", &[]).unwrap_err();
        assert!(matches!(
            err,
            ForecastError::InsufficientHistory { observed: 0, required: 2 }
        ));

        let err = engine
            .project("https://example.com/", &weekly_runs(&[60.0]))
            .unwrap_err();
        assert!(matches!(
            err,
            ForecastError::InsufficientHistory { observed: 1, .. }
        ));
    }

    #[test]
    fn rising_weekly_history_projects_into_spec_window() {
        let engine = ForecastEngine::new();
        let report = engine
            .project("https://example.com/", &weekly_runs(&[60.0, 62.0, 64.0, 66.0]))
            .unwrap();

        assert!(report.trend_per_day > 0.0);
        let f30 = &report.forecasts[0];
        assert_eq!(f30.horizon_days, 30);
        assert!(
            f30.predicted_score > 66.0 && f30.predicted_score < 72.0,
            "got {}",
            f30.predicted_score
        );
    }

    #[test]
    fn confidence_decreases_and_range_widens_with_horizon() {
        let engine = ForecastEngine::new();
        let report = engine
            .project("https://example.com/", &weekly_runs(&[60.0, 62.0, 64.0]))
            .unwrap();

        let f = &report.forecasts;
        assert_eq!(f.len(), 3);
        assert!(f[0].confidence > f[1].confidence);
        assert!(f[1].confidence > f[2].confidence);
        assert!(f[2].confidence >= 60.0);

        let width = |x: &Forecast| x.range.max - x.range.min;
        assert!(width(&f[0]) <= width(&f[1]));
        assert!(width(&f[1]) <= width(&f[2]));
    }

    #[test]
    fn predictions_are_clamped_to_valid_scores() {
        let engine = ForecastEngine::new();
        let report = engine
            .project("https://example.com/", &weekly_runs(&[97.0, 98.0, 99.0, 100.0]))
            .unwrap();
        for f in &report.forecasts {
            assert!(f.predicted_score <= 100.0);
            assert!(f.range.max <= 100.0);
        }

        let report = engine
            .project("https://example.com/", &weekly_runs(&[8.0, 5.0, 2.0]))
            .unwrap();
        for f in &report.forecasts {
            assert!(f.predicted_score >= 0.0);
            assert!(f.range.min >= 0.0);
        }
    }

    #[test]
    fn declining_history_yields_risk_insight() {
        let engine = ForecastEngine::new();
        let report = engine
            .project("https://example.com/", &weekly_runs(&[80.0, 72.0, 64.0]))
            .unwrap();
        assert!(report
            .insights
            .iter()
            .any(|i| i.kind == InsightKind::Risk));
    }

    #[test]
    fn flat_mediocre_history_yields_plateau_insight() {
        let engine = ForecastEngine::new();
        let report = engine
            .project("https://example.com/", &weekly_runs(&[62.0, 62.0, 62.0, 62.0]))
            .unwrap();
        assert!(report
            .insights
            .iter()
            .any(|i| i.kind == InsightKind::Plateau));
    }

    #[test]
    fn scenarios_come_from_weakest_categories() {
        let mut latest = run("2025-02-01T00:00:00Z", 55.0);
        latest.category_scores.insert("schema-markup".into(), 10.0);
        latest.category_scores.insert("ai-crawlers".into(), 95.0);
        latest.category_scores.insert("eeat".into(), 40.0);
        latest.category_scores.insert("meta-tags".into(), 90.0);
        let earlier = run("2025-01-01T00:00:00Z", 52.0);

        let engine = ForecastEngine::new();
        let report = engine
            .project("https://example.com/", &[earlier, latest])
            .unwrap();

        assert!(!report.scenarios.is_empty());
        // Weakest category (schema at 10) leads the list
        assert!(report.scenarios[0]
            .description
            .contains("Schema"));
        // A category at the ceiling generates no scenario
        assert!(!report
            .scenarios
            .iter()
            .any(|s| s.description.contains("crawlers") || s.description.contains("AI ")));
        for s in &report.scenarios {
            assert!(s.estimated_impact > 0.0);
            assert!(s.probability > 0.0 && s.probability <= 1.0);
        }
    }

    #[test]
    fn scenario_impact_is_capped() {
        let mut latest = run("2025-02-01T00:00:00Z", 30.0);
        latest.category_scores.insert("schema-markup".into(), 0.0);
        let earlier = run("2025-01-01T00:00:00Z", 28.0);

        let report = ForecastEngine::new()
            .project("https://example.com/", &[earlier, latest])
            .unwrap();
        let schema = report
            .scenarios
            .iter()
            .find(|s| s.description.contains("Schema"))
            .unwrap();
        // min(cap, (95 - 0) * 0.14) = min(12, 13.3) = 12
        assert_eq!(schema.estimated_impact, 12.0);
    }

    #[test]
    fn insufficient_history_error_message_is_explicit() {
        let err = ForecastEngine::new()
            .project("https://example.com/", &[])
            .unwrap_err();
        assert!(err.to_string().contains("insufficient history"));
    }
}
