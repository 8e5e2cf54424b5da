//! Score tracking - persist audit runs to .citegeist-history.json

use crate::AuditResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const HISTORY_FILENAME: &str = ".citegeist-history.json";
const MAX_RUNS_PER_URL: usize = 50;

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct HistoryFile {
    pub runs: Vec<HistoryRun>,
}

/// One audited snapshot of one URL
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRun {
    pub url: String,
    pub timestamp: String,
    pub overall_score: f64,
    /// Category key -> score snapshot
    pub category_scores: BTreeMap<String, f64>,
}

/// Find the directory holding the history file (the dir itself, or the first
/// parent carrying a history file or .git)
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut dir = if start.is_file() { start.parent()? } else { start };

    loop {
        if dir.join(HISTORY_FILENAME).exists() || dir.join(".git").exists() {
            return Some(dir.to_path_buf());
        }
        dir = match dir.parent() {
            Some(p) => p,
            None => return None,
        };
    }
}

/// Load history from a directory (or create empty). A corrupt or missing
/// file yields an empty history, never an error.
pub fn load_history(project_root: &Path) -> HistoryFile {
    let path = project_root.join(HISTORY_FILENAME);
    if let Ok(content) = fs::read_to_string(&path) {
        if let Ok(history) = serde_json::from_str::<HistoryFile>(&content) {
            return history;
        }
    }
    HistoryFile::default()
}

/// Save history to a directory
pub fn save_history(project_root: &Path, history: &HistoryFile) -> std::io::Result<()> {
    let path = project_root.join(HISTORY_FILENAME);
    let content = serde_json::to_string_pretty(history).unwrap_or_else(|_| "{}".to_string());
    fs::write(path, content)
}

/// Append an audit result, capping stored runs per URL
pub fn append_run(history: &mut HistoryFile, result: &AuditResult) {
    let category_scores = result
        .category_scores
        .iter()
        .map(|c| (c.category.key().to_string(), c.score))
        .collect();

    history.runs.push(HistoryRun {
        url: result.url.clone(),
        timestamp: result.timestamp.clone(),
        overall_score: result.overall_score,
        category_scores,
    });

    let for_url = history
        .runs
        .iter()
        .filter(|r| r.url == result.url)
        .count();
    if for_url > MAX_RUNS_PER_URL {
        let mut to_drop = for_url - MAX_RUNS_PER_URL;
        history.runs.retain(|r| {
            if to_drop > 0 && r.url == result.url {
                to_drop -= 1;
                false
            } else {
                true
            }
        });
    }
}

/// All runs for one URL, ordered by timestamp ascending
pub fn runs_for(history: &HistoryFile, url: &str) -> Vec<HistoryRun> {
    let mut runs: Vec<HistoryRun> = history
        .runs
        .iter()
        .filter(|r| r.url == url)
        .cloned()
        .collect();
    runs.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
    runs
}

/// The most recent score for a URL, if any
pub fn previous_score(history: &HistoryFile, url: &str) -> Option<f64> {
    runs_for(history, url).last().map(|r| r.overall_score)
}

/// Format delta for console: "[was 82, up 4]" or "[was 82, down 4]" or ""
pub fn format_delta(previous: Option<f64>, current: f64) -> String {
    let Some(prev) = previous else {
        return String::new();
    };
    let prev_display = prev.round() as i64;
    let diff = current.round() as i64 - prev_display;
    if diff == 0 {
        return format!(" [unchanged at {}]", prev_display);
    }
    if diff > 0 {
        format!(" [was {}, up {}]", prev_display, diff)
    } else {
        format!(" [was {}, down {}]", prev_display, -diff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{nlp, ComponentRollup, Grade};

    fn make_result(url: &str, timestamp: &str, score: f64) -> AuditResult {
        AuditResult {
            url: url.to_string(),
            timestamp: timestamp.to_string(),
            overall_score: score,
            grade: Grade::C,
            category_scores: vec![crate::CategoryScore::new(
                crate::Category::SchemaMarkup,
                score,
                vec![],
            )],
            component_rollup: ComponentRollup::default(),
            content_analysis: nlp::analyze(""),
            recommendations: vec![],
        }
    }

    #[test]
    fn append_run_records_url_and_categories() {
        let mut history = HistoryFile::default();
        append_run(
            &mut history,
            &make_result("https://a.com/", "2025-01-01T00:00:00Z", 61.5),
        );

        assert_eq!(history.runs.len(), 1);
        assert_eq!(history.runs[0].url, "https://a.com/");
        assert_eq!(history.runs[0].overall_score, 61.5);
        assert_eq!(history.runs[0].category_scores["schema-markup"], 61.5);
    }

    #[test]
    fn append_run_caps_runs_per_url() {
        let mut history = HistoryFile::default();
        for i in 0..55 {
            append_run(
                &mut history,
                &make_result(
                    "https://a.com/",
                    &format!("2025-01-01T00:00:{:02}Z", i % 60),
                    50.0,
                ),
            );
        }
        append_run(
            &mut history,
            &make_result("https://b.com/", "2025-02-01T00:00:00Z", 70.0),
        );

        let a_runs = history.runs.iter().filter(|r| r.url == "https://a.com/").count();
        assert_eq!(a_runs, MAX_RUNS_PER_URL);
        // Other URLs are untouched by the cap
        assert_eq!(
            history.runs.iter().filter(|r| r.url == "https://b.com/").count(),
            1
        );
    }

    #[test]
    fn runs_for_orders_by_timestamp_ascending() {
        let mut history = HistoryFile::default();
        append_run(
            &mut history,
            &make_result("https://a.com/", "2025-03-01T00:00:00Z", 70.0),
        );
        append_run(
            &mut history,
            &make_result("https://a.com/", "2025-01-01T00:00:00Z", 60.0),
        );
        append_run(
            &mut history,
            &make_result("https://b.com/", "2025-02-01T00:00:00Z", 40.0),
        );

        let runs = runs_for(&history, "https://a.com/");
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].overall_score, 60.0);
        assert_eq!(runs[1].overall_score, 70.0);
    }

    #[test]
    fn previous_score_uses_latest_run() {
        let mut history = HistoryFile::default();
        assert_eq!(previous_score(&history, "https://a.com/"), None);

        append_run(
            &mut history,
            &make_result("https://a.com/", "2025-01-01T00:00:00Z", 60.0),
        );
        append_run(
            &mut history,
            &make_result("https://a.com/", "2025-01-08T00:00:00Z", 66.0),
        );
        assert_eq!(previous_score(&history, "https://a.com/"), Some(66.0));
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut history = HistoryFile::default();
        append_run(
            &mut history,
            &make_result("https://a.com/", "2025-01-01T00:00:00Z", 72.25),
        );

        save_history(dir.path(), &history).unwrap();
        let loaded = load_history(dir.path());

        assert_eq!(loaded.runs.len(), 1);
        assert_eq!(loaded.runs[0].overall_score, 72.25);
    }

    #[test]
    fn load_history_tolerates_corrupt_json() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(HISTORY_FILENAME), "not valid json {{{").unwrap();
        let history = load_history(dir.path());
        assert!(history.runs.is_empty());
    }

    #[test]
    fn load_history_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_history(dir.path()).runs.is_empty());
    }

    #[test]
    fn format_delta_variants() {
        assert_eq!(format_delta(None, 85.0), "");
        assert_eq!(format_delta(Some(80.0), 83.0), " [was 80, up 3]");
        assert_eq!(format_delta(Some(90.0), 86.0), " [was 90, down 4]");
        assert_eq!(format_delta(Some(75.0), 75.2), " [unchanged at 75]");
    }
}
