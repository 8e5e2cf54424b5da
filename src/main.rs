//! Citegeist: AI citation-readiness audit CLI

use anyhow::{Context, Result};
use citegeist::analyzer::AuditEngine;
use citegeist::config::{build_ignore_set, default_config_json, is_ignored, load_config, CONFIG_FILENAME};
use citegeist::document::DocumentModel;
use citegeist::enrich::EnrichmentClient;
use citegeist::forecast::{ForecastEngine, ForecastError};
use citegeist::history::{append_run, find_project_root, format_delta, load_history, previous_score, runs_for, save_history};
use citegeist::recommend::RecommendationEngine;
use citegeist::reporter::{ConsoleReporter, JsonReporter};
use citegeist::AuditResult;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use walkdir::WalkDir;

/// Citegeist: AI citation-readiness analyzer for web pages
#[derive(Parser, Debug)]
#[command(name = "citegeist")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
#[command(subcommand_negates_reqs = true)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    /// HTML file, directory of HTML files, or URL (with the fetch feature)
    #[arg(required = true)]
    input: Option<String>,

    /// Canonical URL for a local HTML file (defaults to a file:// URL)
    #[arg(long)]
    url: Option<String>,

    /// Output format as JSON
    #[arg(long, short)]
    json: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Minimum overall score (exit 1 if below)
    #[arg(long, short)]
    threshold: Option<f64>,

    /// Quiet mode (minimal output)
    #[arg(long, short)]
    quiet: bool,

    /// Verbose output
    #[arg(long, short)]
    verbose: bool,

    /// Path to config file (default: search .citegeistrc.json in input dir and parents)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Do not read or update .citegeist-history.json
    #[arg(long)]
    no_history: bool,

    /// Enrich recommendations with the Claude API (requires the ai feature)
    #[arg(long)]
    enrich: bool,

    /// Number of scorer threads (default: number of CPU cores)
    #[arg(long, value_name = "N")]
    jobs: Option<usize>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create .citegeistrc.json with sensible defaults
    Init {
        /// Minimum overall score threshold (e.g. 70)
        #[arg(long)]
        threshold: Option<f64>,

        /// Directory in which to create config (default: current)
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Project score forecasts from recorded history
    Forecast {
        /// URL whose history to project
        url: String,

        /// Output format as JSON
        #[arg(long, short)]
        json: bool,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<ExitCode> {
    let args = Args::parse();

    if let Some(cmd) = args.command {
        return match cmd {
            Commands::Init { threshold, dir } => run_init(threshold, dir.as_deref()),
            Commands::Forecast { url, json } => run_forecast(&url, json),
        };
    }

    let input = args.input.clone().expect("input required without subcommand");

    if let Some(jobs) = args.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .ok();
    }

    let input_path = Path::new(&input);
    if input_path.is_dir() {
        run_directory(&args, input_path)
    } else if input_path.is_file() {
        run_file(&args, input_path)
    } else if input.starts_with("http://") || input.starts_with("https://") {
        run_url(&args, &input)
    } else {
        anyhow::bail!("input is neither an existing path nor an http(s) URL: {}", input)
    }
}

fn run_init(threshold: Option<f64>, dir: Option<&Path>) -> Result<ExitCode> {
    let dir = dir.unwrap_or(Path::new("."));
    let path = dir.join(CONFIG_FILENAME);
    if path.exists() {
        anyhow::bail!("{} already exists", path.display());
    }
    std::fs::write(&path, default_config_json(threshold))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("{}: wrote {}", "Created".green(), path.display());
    Ok(ExitCode::SUCCESS)
}

fn run_forecast(url: &str, json: bool) -> Result<ExitCode> {
    let root = find_project_root(Path::new(".")).unwrap_or_else(|| PathBuf::from("."));
    let history = load_history(&root);
    let runs = runs_for(&history, url);

    match ForecastEngine::new().project(url, &runs) {
        Ok(report) => {
            if json {
                println!("{}", JsonReporter::new().pretty().report_forecast(&report));
            } else {
                ConsoleReporter::new().report_forecast(&report);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e @ ForecastError::InsufficientHistory { .. }) => {
            eprintln!(
                "{}: {} (audit the page a few times first)",
                "Info".blue(),
                e
            );
            Ok(ExitCode::from(2))
        }
    }
}

fn build_engine(args: &Args, work_dir: &Path) -> Result<AuditEngine> {
    let config = load_config(work_dir, args.config.as_deref())?;
    let weights = config
        .effective_weights()
        .map_err(|e| anyhow::anyhow!("invalid weights in config: {}", e))?;
    Ok(AuditEngine::new()
        .with_weights(weights)
        .with_cutoffs(config.effective_cutoffs()))
}

fn effective_threshold(args: &Args, work_dir: &Path) -> Result<Option<f64>> {
    let config = load_config(work_dir, args.config.as_deref())?;
    Ok(config.merge_with_cli(args.threshold).threshold)
}

fn run_file(args: &Args, path: &Path) -> Result<ExitCode> {
    let work_dir = path.parent().unwrap_or(Path::new("."));
    let html = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let url = args
        .url
        .clone()
        .unwrap_or_else(|| format!("file://{}", path.display()));

    let engine = build_engine(args, work_dir)?;
    let doc = DocumentModel::parse(&url, &html, None);
    let result = engine.audit(&doc);
    let result = maybe_enrich(args, result);

    finish_single(args, work_dir, result)
}

#[cfg(feature = "fetch")]
fn run_url(args: &Args, url: &str) -> Result<ExitCode> {
    let work_dir = Path::new(".");
    let page = citegeist::fetch::fetch_page(url)?;
    let engine = build_engine(args, work_dir)?;
    let doc = DocumentModel::parse(&page.final_url, &page.html, page.robots_txt.as_deref());
    let result = engine.audit(&doc);
    let result = maybe_enrich(args, result);
    finish_single(args, work_dir, result)
}

#[cfg(not(feature = "fetch"))]
fn run_url(_args: &Args, _url: &str) -> Result<ExitCode> {
    anyhow::bail!("URL input requires the fetch feature. Rebuild with: cargo build --features fetch")
}

fn run_directory(args: &Args, dir: &Path) -> Result<ExitCode> {
    let config = load_config(dir, args.config.as_deref())?;
    let ignore_set = if config.ignore.is_empty() {
        None
    } else {
        Some(build_ignore_set(&config.ignore)?)
    };

    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| {
            matches!(
                p.extension().and_then(|e| e.to_str()),
                Some("html") | Some("htm")
            )
        })
        .filter(|p| {
            ignore_set
                .as_ref()
                .map(|set| !is_ignored(p, set))
                .unwrap_or(true)
        })
        .collect();
    files.sort();

    if files.is_empty() {
        eprintln!("{}: No HTML files found in {}", "Warning".yellow(), dir.display());
        return Ok(ExitCode::from(2));
    }

    let engine = build_engine(args, dir)?;
    let mut results = Vec::with_capacity(files.len());
    for file in &files {
        let html = std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read {}", file.display()))?;
        let url = format!("file://{}", file.display());
        let doc = DocumentModel::parse(&url, &html, None);
        results.push(engine.audit(&doc));
    }

    if !args.no_history {
        let mut history = load_history(dir);
        for result in &results {
            append_run(&mut history, result);
        }
        if let Err(e) = save_history(dir, &history) {
            eprintln!("{}: could not save history: {}", "Warning".yellow(), e);
        }
    }

    let stats = AuditEngine::aggregate_stats(&results);
    if args.json {
        let reporter = if args.pretty {
            JsonReporter::new().pretty()
        } else {
            JsonReporter::new()
        };
        println!("{}", reporter.report_with_summary(&results, &stats));
    } else if args.quiet {
        let reporter = ConsoleReporter::new();
        for result in &results {
            reporter.report_quiet(result, "");
        }
    } else {
        let reporter = if args.verbose {
            ConsoleReporter::new().verbose()
        } else {
            ConsoleReporter::new()
        };
        reporter.report_many(&results, &stats);
    }

    let threshold = effective_threshold(args, dir)?;
    if let Some(threshold) = threshold {
        if stats.average_score < threshold {
            if !args.quiet {
                eprintln!(
                    "{}: average score {:.1} is below threshold {:.0}",
                    "Failed".red().bold(),
                    stats.average_score,
                    threshold
                );
            }
            return Ok(ExitCode::from(1));
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn maybe_enrich(args: &Args, result: AuditResult) -> AuditResult {
    if !args.enrich {
        return result;
    }
    let client = match EnrichmentClient::from_env() {
        Ok(client) => client,
        Err(e) => {
            eprintln!(
                "{}: enrichment unavailable ({}); using rule-based recommendations",
                "Warning".yellow(),
                e
            );
            return result;
        }
    };
    match client.enrich(&result) {
        Ok(response) => {
            let mut result = result;
            result.recommendations = RecommendationEngine::new()
                .merge(result.recommendations.clone(), response.recommendations);
            result
        }
        Err(e) => {
            eprintln!(
                "{}: enrichment failed ({}); using rule-based recommendations",
                "Warning".yellow(),
                e
            );
            result
        }
    }
}

fn finish_single(args: &Args, work_dir: &Path, result: AuditResult) -> Result<ExitCode> {
    let config = load_config(work_dir, args.config.as_deref())?;

    let delta = if args.no_history {
        String::new()
    } else {
        let root = find_project_root(work_dir).unwrap_or_else(|| work_dir.to_path_buf());
        let mut history = load_history(&root);
        let delta = format_delta(previous_score(&history, &result.url), result.overall_score);
        append_run(&mut history, &result);
        if let Err(e) = save_history(&root, &history) {
            eprintln!("{}: could not save history: {}", "Warning".yellow(), e);
        }
        delta
    };

    if args.json {
        let reporter = if args.pretty {
            JsonReporter::new().pretty()
        } else {
            JsonReporter::new()
        };
        println!("{}", reporter.report(&result));
    } else if args.quiet {
        ConsoleReporter::new().report_quiet(&result, &delta);
    } else {
        let reporter = if args.verbose {
            ConsoleReporter::new().verbose()
        } else {
            ConsoleReporter::new()
        };
        reporter.report(&result, &delta);

        if let Some(ref keyword) = config.primary_keyword {
            let wanted = keyword.to_lowercase();
            let prominent = result
                .content_analysis
                .keywords
                .primary
                .iter()
                .chain(result.content_analysis.keywords.secondary.iter())
                .any(|k| wanted.contains(&k.term) || k.term.contains(&wanted));
            if !prominent {
                println!(
                    "   {} expected primary keyword \"{}\" is not prominent in the content",
                    "ℹ".blue(),
                    keyword
                );
            }
        }
    }

    if let Some(threshold) = config.merge_with_cli(args.threshold).threshold {
        if result.overall_score < threshold {
            if !args.quiet {
                eprintln!(
                    "{}: score {:.1} is below threshold {:.0}",
                    "Failed".red().bold(),
                    result.overall_score,
                    threshold
                );
            }
            return Ok(ExitCode::from(1));
        }
    }
    Ok(ExitCode::SUCCESS)
}
