//! Console reporter with colored output

use crate::analyzer::scoring::{CategoryWeights, ScoreCalculator};
use crate::analyzer::AggregateStats;
use crate::forecast::ForecastReport;
use crate::{AuditResult, FindingSeverity, Grade};
use colored::Colorize;

/// Reporter for terminal output
pub struct ConsoleReporter {
    /// Whether to show verbose output
    verbose: bool,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self { verbose: false }
    }

    /// Enable verbose output
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    /// Report a single audit result. `delta` is the formatted change versus
    /// the previous run, when history is available.
    pub fn report(&self, result: &AuditResult, delta: &str) {
        self.print_header(result);
        self.print_score(result, delta);
        self.print_breakdown(result);
        self.print_issues(result);
        self.print_recommendations(result);
        println!();
    }

    /// Report multiple results with summary
    pub fn report_many(&self, results: &[AuditResult], stats: &AggregateStats) {
        for result in results {
            self.report(result, "");
            println!("{}", "─".repeat(60));
        }
        self.print_summary(stats);
    }

    /// Report in quiet mode (just score)
    pub fn report_quiet(&self, result: &AuditResult, delta: &str) {
        let grade = self.colorize_grade(&result.grade);
        println!(
            "{}: {:.0} ({}){}",
            result.url, result.overall_score, grade, delta
        );
    }

    /// Report a score forecast
    pub fn report_forecast(&self, report: &ForecastReport) {
        println!();
        println!("{}", format!("📈 Score Forecast: {}", report.url).bold());
        println!(
            "   Current: {:.1} | Trend: {:+.3} points/day",
            report.current_score, report.trend_per_day
        );
        println!();

        for f in &report.forecasts {
            println!(
                "   {:>2} days: {:>5.1} (confidence {:.0}%, range {:.0}-{:.0})",
                f.horizon_days, f.predicted_score, f.confidence, f.range.min, f.range.max
            );
        }

        if !report.scenarios.is_empty() {
            println!();
            println!("   {}", "What-if scenarios:".bold());
            for s in &report.scenarios {
                println!(
                    "   {} {} (+{:.1} pts, {:.0}% likely, {})",
                    "→".cyan(),
                    s.description,
                    s.estimated_impact,
                    s.probability * 100.0,
                    s.time_to_effect
                );
                if self.verbose {
                    println!("       {} {}", "↳".dimmed(), s.implementation.dimmed());
                }
            }
        }

        for insight in &report.insights {
            println!("   {} {}", "★".yellow(), insight.message);
        }
        println!();
    }

    fn print_header(&self, result: &AuditResult) {
        println!();
        println!(
            "{}",
            format!("🔍 AI Citation Audit: {}", result.url).bold()
        );
        println!(
            "   Words: {} | Findings: {} | Recommendations: {}",
            result.content_analysis.word_count,
            result
                .category_scores
                .iter()
                .map(|c| c.findings.len())
                .sum::<usize>(),
            result.recommendations.len()
        );
        println!();
    }

    fn print_score(&self, result: &AuditResult, delta: &str) {
        let grade = self.colorize_grade(&result.grade);
        let bar = self.create_score_bar(result.overall_score);

        println!("   Score: {} {}{}", bar, grade.bold(), delta);
        println!(
            "   {}",
            ScoreCalculator::grade_description(result.grade).dimmed()
        );
        println!();
    }

    fn print_breakdown(&self, result: &AuditResult) {
        println!("   {}", "Category Breakdown:".bold());

        let weights = CategoryWeights::default();
        for category in &result.category_scores {
            let bar = self.create_mini_bar(category.score);
            let score_str = format!("{:>5.1}", category.score);
            let colored_score = if category.score >= 80.0 {
                score_str.green()
            } else if category.score >= 50.0 {
                score_str.yellow()
            } else {
                score_str.red()
            };
            let weight = weights.weight_for(category.category);
            let weight_note = if weight > 0.0 {
                format!("weight {}%", weight)
            } else {
                "advisory".to_string()
            };
            println!(
                "   {} {} {} ({})",
                bar,
                colored_score,
                category.category.label(),
                weight_note.dimmed()
            );
        }
        println!(
            "   Components: core {:.0} / technical {:.0} / content {:.0}",
            result.component_rollup.core,
            result.component_rollup.technical,
            result.component_rollup.content
        );
        println!();
    }

    fn print_issues(&self, result: &AuditResult) {
        let issues: Vec<_> = result.issues().collect();
        if issues.is_empty() {
            return;
        }

        println!("   {}", "Issues Found:".bold());
        let shown = if self.verbose { issues.len() } else { 10 };
        for issue in issues.iter().take(shown) {
            let estimate_tag = if issue.is_estimated {
                " (estimated)".dimmed().to_string()
            } else {
                String::new()
            };
            println!(
                "   {} [{}] {}{}",
                "⚠".yellow(),
                issue.code.to_string().dimmed(),
                issue.message,
                estimate_tag
            );
        }
        if issues.len() > shown {
            println!(
                "   {} {} more issues (use --verbose to show)",
                "ℹ".blue(),
                issues.len() - shown
            );
        }

        if self.verbose {
            let strengths: Vec<_> = result
                .category_scores
                .iter()
                .flat_map(|c| c.findings.iter())
                .filter(|f| f.severity == FindingSeverity::Strength)
                .collect();
            if !strengths.is_empty() {
                println!();
                println!("   {}", "Strengths:".bold());
                for s in strengths {
                    println!("   {} {}", "✓".green(), s.message);
                }
            }
        }
        println!();
    }

    fn print_recommendations(&self, result: &AuditResult) {
        if result.recommendations.is_empty() {
            return;
        }
        println!("   {}", "Top Recommendations:".bold());
        for rec in result.recommendations.iter().take(5) {
            println!(
                "   {} [{}/{}] {}",
                "→".cyan(),
                rec.priority.to_string().dimmed(),
                rec.effort.to_string().dimmed(),
                rec.title
            );
            if self.verbose {
                println!("       {} {}", "↳".dimmed(), rec.implementation.dimmed());
            }
        }
    }

    fn print_summary(&self, stats: &AggregateStats) {
        println!();
        println!("{}", "═".repeat(60));
        println!("{}", "Summary".bold());
        println!("{}", "═".repeat(60));
        println!(
            "   Pages audited:   {}",
            stats.pages_audited.to_string().bold()
        );
        println!(
            "   Average score:   {:.1} ({})",
            stats.average_score,
            self.colorize_grade(&stats.average_grade)
        );
        println!("   Total issues:    {}", stats.total_issues);
        println!("   Recommendations: {}", stats.total_recommendations);
        println!();
    }

    fn colorize_grade(&self, grade: &Grade) -> colored::ColoredString {
        let s = grade.to_string();
        match grade {
            Grade::APlus | Grade::A => s.green().bold(),
            Grade::B => s.green(),
            Grade::C => s.yellow(),
            Grade::D => s.red(),
            Grade::F => s.red().bold(),
        }
    }

    fn create_score_bar(&self, score: f64) -> String {
        let filled = ((score as usize) * 20) / 100;
        let empty = 20 - filled;
        let bar = format!(
            "[{}{}] {:>3.0}%",
            "█".repeat(filled),
            "░".repeat(empty),
            score
        );

        if score >= 80.0 {
            bar.green().to_string()
        } else if score >= 60.0 {
            bar.yellow().to_string()
        } else {
            bar.red().to_string()
        }
    }

    fn create_mini_bar(&self, score: f64) -> String {
        let filled = ((score as usize) * 10) / 100;
        let empty = 10 - filled;
        format!("[{}{}]", "▓".repeat(filled), "░".repeat(empty))
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}
