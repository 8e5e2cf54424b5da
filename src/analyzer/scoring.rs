//! Weighted aggregation of category scores into the overall grade.

use crate::{Category, CategoryScore, ComponentRollup, Grade};

/// Weight table for the nine scored categories, in percent.
/// Must sum to exactly 100; advisory audits carry no weight.
#[derive(Debug, Clone, Copy)]
pub struct CategoryWeights {
    pub schema_markup: f64,
    pub ai_crawlers: f64,
    pub eeat: f64,
    pub technical_seo: f64,
    pub links: f64,
    pub meta_tags: f64,
    pub content_quality: f64,
    pub structure: f64,
    pub performance: f64,
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            schema_markup: 16.0,
            ai_crawlers: 15.0,
            eeat: 15.0,
            technical_seo: 13.0,
            links: 12.0,
            meta_tags: 9.0,
            content_quality: 9.0,
            structure: 6.0,
            performance: 5.0,
        }
    }
}

const WEIGHT_SUM_EPSILON: f64 = 1e-6;

impl CategoryWeights {
    /// Weight in percent for a category; advisory audits return 0
    pub fn weight_for(&self, category: Category) -> f64 {
        match category {
            Category::SchemaMarkup => self.schema_markup,
            Category::AiCrawlers => self.ai_crawlers,
            Category::Eeat => self.eeat,
            Category::TechnicalSeo => self.technical_seo,
            Category::Links => self.links,
            Category::MetaTags => self.meta_tags,
            Category::ContentQuality => self.content_quality,
            Category::Structure => self.structure,
            Category::Performance => self.performance,
            _ => 0.0,
        }
    }

    pub fn sum(&self) -> f64 {
        self.schema_markup
            + self.ai_crawlers
            + self.eeat
            + self.technical_seo
            + self.links
            + self.meta_tags
            + self.content_quality
            + self.structure
            + self.performance
    }

    /// Weights must sum to 100 (within floating-point epsilon)
    pub fn validate(&self) -> Result<(), String> {
        let sum = self.sum();
        if (sum - 100.0).abs() > WEIGHT_SUM_EPSILON {
            return Err(format!("category weights sum to {}, expected 100", sum));
        }
        Ok(())
    }

    /// Apply per-category overrides keyed by `Category::key()`.
    /// The result must still sum to 100.
    pub fn with_overrides(
        mut self,
        overrides: &std::collections::BTreeMap<String, f64>,
    ) -> Result<Self, String> {
        for (key, value) in overrides {
            match key.as_str() {
                "schema-markup" => self.schema_markup = *value,
                "ai-crawlers" => self.ai_crawlers = *value,
                "eeat" => self.eeat = *value,
                "technical-seo" => self.technical_seo = *value,
                "links" => self.links = *value,
                "meta-tags" => self.meta_tags = *value,
                "content-quality" => self.content_quality = *value,
                "structure" => self.structure = *value,
                "performance" => self.performance = *value,
                other => return Err(format!("unknown weight category: {}", other)),
            }
        }
        self.validate()?;
        Ok(self)
    }
}

/// Round to 3 decimals, the precision kept for forecasting
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Calculator for the weighted overall score and rollups
pub struct ScoreCalculator;

impl ScoreCalculator {
    /// overallScore = sum(category score x weight). Linear in each category:
    /// changing one score by d changes the overall by exactly d x weight.
    pub fn overall_score(scores: &[CategoryScore], weights: &CategoryWeights) -> f64 {
        let total: f64 = scores
            .iter()
            .map(|c| c.score * weights.weight_for(c.category) / 100.0)
            .sum();
        round3(total.clamp(0.0, 100.0))
    }

    /// Core / Technical / Content component averages, for reporting only
    pub fn component_rollup(scores: &[CategoryScore]) -> ComponentRollup {
        let avg = |categories: &[Category]| -> f64 {
            let values: Vec<f64> = scores
                .iter()
                .filter(|c| categories.contains(&c.category))
                .map(|c| c.score)
                .collect();
            if values.is_empty() {
                0.0
            } else {
                round3(values.iter().sum::<f64>() / values.len() as f64)
            }
        };

        ComponentRollup {
            core: avg(&[Category::SchemaMarkup, Category::AiCrawlers, Category::Eeat]),
            technical: avg(&[
                Category::TechnicalSeo,
                Category::Performance,
                Category::Structure,
            ]),
            content: avg(&[
                Category::ContentQuality,
                Category::MetaTags,
                Category::Links,
            ]),
        }
    }

    /// Get a description of the grade
    pub fn grade_description(grade: Grade) -> &'static str {
        match grade {
            Grade::APlus => "Exceptional - answer engines are very likely to cite this page",
            Grade::A => "Excellent - strong citation signals across categories",
            Grade::B => "Good - solid foundation with clear gaps to close",
            Grade::C => "Fair - several categories need attention",
            Grade::D => "Poor - major citation signals are missing",
            Grade::F => "Failing - the page is largely invisible to answer engines",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(category: Category, value: f64) -> CategoryScore {
        CategoryScore::new(category, value, vec![])
    }

    fn all_nine(value: f64) -> Vec<CategoryScore> {
        vec![
            score(Category::SchemaMarkup, value),
            score(Category::AiCrawlers, value),
            score(Category::Eeat, value),
            score(Category::TechnicalSeo, value),
            score(Category::Links, value),
            score(Category::MetaTags, value),
            score(Category::ContentQuality, value),
            score(Category::Structure, value),
            score(Category::Performance, value),
        ]
    }

    #[test]
    fn default_weights_sum_to_one_hundred() {
        let weights = CategoryWeights::default();
        assert!(weights.validate().is_ok());
        assert!((weights.sum() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn uniform_scores_pass_through() {
        let weights = CategoryWeights::default();
        assert_eq!(ScoreCalculator::overall_score(&all_nine(100.0), &weights), 100.0);
        assert_eq!(ScoreCalculator::overall_score(&all_nine(0.0), &weights), 0.0);
        assert_eq!(ScoreCalculator::overall_score(&all_nine(70.0), &weights), 70.0);
    }

    #[test]
    fn overall_is_linear_in_each_category() {
        let weights = CategoryWeights::default();
        let base = all_nine(50.0);
        let base_score = ScoreCalculator::overall_score(&base, &weights);

        for (i, delta) in [(0usize, 10.0), (3, 20.0), (8, 30.0)] {
            let mut bumped = base.clone();
            let category = bumped[i].category;
            bumped[i].score += delta;
            let new_score = ScoreCalculator::overall_score(&bumped, &weights);
            let expected = base_score + delta * weights.weight_for(category) / 100.0;
            assert!(
                (new_score - expected).abs() < 0.002,
                "{:?}: {} vs {}",
                category,
                new_score,
                expected
            );
        }
    }

    #[test]
    fn advisory_categories_carry_no_weight() {
        let weights = CategoryWeights::default();
        let mut scores = all_nine(50.0);
        let base = ScoreCalculator::overall_score(&scores, &weights);
        scores.push(score(Category::Security, 100.0));
        scores.push(score(Category::CoreWebVitals, 0.0));
        assert_eq!(ScoreCalculator::overall_score(&scores, &weights), base);
    }

    #[test]
    fn overall_rounds_to_three_decimals() {
        let weights = CategoryWeights::default();
        let mut scores = all_nine(0.0);
        scores[0].score = 33.3333;
        let overall = ScoreCalculator::overall_score(&scores, &weights);
        assert_eq!(overall, round3(overall));
        assert_eq!(overall, 5.333);
    }

    #[test]
    fn weight_overrides_must_sum_to_one_hundred() {
        let mut overrides = std::collections::BTreeMap::new();
        overrides.insert("schema-markup".to_string(), 20.0);
        assert!(CategoryWeights::default().with_overrides(&overrides).is_err());

        overrides.insert("performance".to_string(), 1.0);
        let weights = CategoryWeights::default().with_overrides(&overrides).unwrap();
        assert_eq!(weights.schema_markup, 20.0);
        assert_eq!(weights.performance, 1.0);
    }

    #[test]
    fn unknown_override_key_is_rejected() {
        let mut overrides = std::collections::BTreeMap::new();
        overrides.insert("made-up".to_string(), 10.0);
        assert!(CategoryWeights::default().with_overrides(&overrides).is_err());
    }

    #[test]
    fn rollup_groups_average_their_members() {
        let scores = vec![
            score(Category::SchemaMarkup, 90.0),
            score(Category::AiCrawlers, 60.0),
            score(Category::Eeat, 30.0),
            score(Category::TechnicalSeo, 80.0),
            score(Category::Performance, 40.0),
            score(Category::Structure, 60.0),
            score(Category::ContentQuality, 100.0),
            score(Category::MetaTags, 50.0),
            score(Category::Links, 0.0),
        ];
        let rollup = ScoreCalculator::component_rollup(&scores);
        assert_eq!(rollup.core, 60.0);
        assert_eq!(rollup.technical, 60.0);
        assert_eq!(rollup.content, 50.0);
    }
}
