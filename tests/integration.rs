//! End-to-end audits over fixture pages.

use citegeist::analyzer::AuditEngine;
use citegeist::document::DocumentModel;
use citegeist::nlp::StuffingRisk;
use citegeist::{audit_html, Category, FindingSeverity, Grade, SignalCode};

const OPTIMIZED_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>What Is Connection Pooling? A Complete Guide for Teams</title>
<meta name="description" content="Connection pooling keeps a set of database connections open for reuse. Learn how pools work, how to size them, and which failure modes to monitor.">
<meta name="viewport" content="width=device-width, initial-scale=1">
<meta name="author" content="Dana Whitfield">
<meta property="article:published_time" content="2025-06-14T09:00:00Z">
<meta property="og:title" content="What Is Connection Pooling?">
<meta property="og:description" content="How pools work, how to size them, and what to monitor.">
<meta name="twitter:card" content="summary_large_image">
<link rel="canonical" href="https://example.com/guides/connection-pooling">
<link rel="alternate" hreflang="de" href="https://example.com/de/guides/connection-pooling">
<script type="application/ld+json">
{"@context":"https://schema.org","@graph":[
  {"@type":"Organization","name":"Example Engineering","url":"https://example.com","sameAs":["https://github.com/example"]},
  {"@type":"Article","headline":"What Is Connection Pooling?","author":{"@type":"Person","name":"Dana Whitfield"},"datePublished":"2025-06-14"},
  {"@type":"FAQPage","mainEntity":[{"@type":"Question","name":"How large should a pool be?"}]},
  {"@type":"BreadcrumbList","itemListElement":[]}
]}
</script>
</head>
<body>
<header><nav><a href="/">Home</a> <a href="/guides">Guides</a></nav></header>
<main><article>
<h1>What Is Connection Pooling?</h1>
<p>Connection pooling is the practice of keeping a fixed set of database
connections open and lending them to request handlers on demand. Opening a
fresh connection costs a TCP handshake, a TLS negotiation, and an
authentication round trip, so busy services amortize that cost across
thousands of queries. Engineers at Netflix and Shopify have written about
pool exhaustion as a leading cause of cascading failures, and PostgreSQL
ships pgbouncer precisely because the database's own connection model is
expensive.</p>
<h2>How does a pool decide its size?</h2>
<p>A useful starting point is the number of CPU cores on the database host
multiplied by two, plus the number of disks. Dana Whitfield, who spent nine
years as a certified database administrator, recommends measuring the
arrival rate and service time of real traffic before committing to a
number. Little's law turns those two measurements into the concurrency the
pool actually needs, which is usually far smaller than teams expect.</p>
<ul>
<li>Start with cores times two and adjust from measurements</li>
<li>Queue requests above the limit instead of opening more connections</li>
<li>Alert on wait time, not on pool utilization alone</li>
</ul>
<h2>Which failure modes should you monitor?</h2>
<p>Pools fail in predictable ways. Leaked connections drain the pool until
every handler blocks. Timeouts that are longer than the caller's own
deadline convert slow queries into thread starvation. Health checks that
run through the pool can deadlock it during a failover. The guide on
<a href="/guides/timeouts">timeout budgets</a> and the
<a href="/guides/monitoring">monitoring checklist</a> cover the remedies,
and the <a href="https://www.postgresql.org/docs/">PostgreSQL manual</a>
and <a href="https://redis.io/docs/">Redis documentation</a> describe the
server-side limits that interact with client pools.</p>
<h2>When is pooling the wrong answer?</h2>
<p>Serverless platforms that scale to thousands of short-lived instances
defeat per-instance pools; a shared proxy tier is the standard fix. Batch
jobs that hold one connection for an hour gain nothing from pooling and
should connect directly. The decision table below summarizes the cases.</p>
<table><tr><th>Workload</th><th>Approach</th></tr>
<tr><td>Web handlers</td><td>Pool per instance</td></tr>
<tr><td>Serverless</td><td>Shared proxy</td></tr>
<tr><td>Batch</td><td>Direct connection</td></tr></table>
<p>Contact the team through the <a href="/contact">contact page</a> or read
more <a href="/about">about the authors</a>. Reviewed by the platform
group; last updated June 2025.</p>
</article></main>
<footer><img src="/img/pool-diagram.png" alt="Pool architecture diagram" width="640" height="360" loading="lazy"></footer>
</body>
</html>"#;

const BARE_PAGE: &str = r#"<html><body>
<p>Widgets. We make widgets. Buy widgets. Widgets are here. More widgets
and widgets again, widgets forever, widgets always, widgets widgets.</p>
</body></html>"#;

const ROBOTS_ALLOW_AI: &str =
    "User-agent: GPTBot\nAllow: /\n\nUser-agent: ClaudeBot\nAllow: /\n\nUser-agent: PerplexityBot\nAllow: /\n";
const ROBOTS_BLOCK_ALL: &str = "User-agent: *\nDisallow: /\n";

#[test]
fn audit_always_produces_a_complete_report() {
    let result = audit_html("https://example.com/empty", "<html></html>", None);
    assert_eq!(result.category_scores.len(), 14);
    for category in &result.category_scores {
        assert!((0.0..=100.0).contains(&category.score));
        assert!(!category.findings.is_empty());
    }
    assert!((0.0..=100.0).contains(&result.overall_score));
}

#[test]
fn optimized_page_outscores_bare_page() {
    let good = audit_html(
        "https://example.com/guides/connection-pooling",
        OPTIMIZED_PAGE,
        Some(ROBOTS_ALLOW_AI),
    );
    let bad = audit_html("http://example.com/widgets", BARE_PAGE, Some(ROBOTS_BLOCK_ALL));

    assert!(good.overall_score > bad.overall_score + 30.0);
    assert_eq!(good.category_score(Category::SchemaMarkup), Some(100.0));
    assert_eq!(good.category_score(Category::MetaTags), Some(100.0));
    assert_eq!(good.category_score(Category::AiCrawlers), Some(100.0));
}

#[test]
fn bare_blocked_page_grades_d_or_worse() {
    let result = audit_html("http://example.com/widgets", BARE_PAGE, Some(ROBOTS_BLOCK_ALL));
    assert_eq!(result.category_score(Category::SchemaMarkup), Some(0.0));
    assert!(result.category_score(Category::AiCrawlers).unwrap() <= 10.0);
    assert!(result.grade >= Grade::D, "got {}", result.grade);
}

#[test]
fn keyword_stuffing_is_detected_and_reported() {
    let result = audit_html("https://example.com/widgets", BARE_PAGE, None);
    assert_eq!(
        result.content_analysis.keywords.stuffing_risk,
        StuffingRisk::High
    );
    assert!(result
        .category_scores
        .iter()
        .find(|c| c.category == Category::ContentQuality)
        .unwrap()
        .findings
        .iter()
        .any(|f| f.code == SignalCode::KeywordFocus && f.severity == FindingSeverity::Issue));
}

#[test]
fn repeated_audits_are_byte_identical_excluding_timestamp() {
    let doc = DocumentModel::parse(
        "https://example.com/guides/connection-pooling",
        OPTIMIZED_PAGE,
        Some(ROBOTS_ALLOW_AI),
    );
    let engine = AuditEngine::new();
    let mut a = engine.audit(&doc);
    let mut b = engine.audit(&doc);
    a.timestamp = String::new();
    b.timestamp = String::new();
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn estimated_findings_are_flagged() {
    let result = audit_html("https://example.com/x", OPTIMIZED_PAGE, None);
    let cwv = result
        .category_scores
        .iter()
        .find(|c| c.category == Category::CoreWebVitals)
        .unwrap();
    assert!(cwv.findings.iter().all(|f| f.is_estimated));

    let performance = result
        .category_scores
        .iter()
        .find(|c| c.category == Category::Performance)
        .unwrap();
    assert!(performance.findings.iter().all(|f| f.is_estimated));
}

#[test]
fn recommendations_are_sorted_and_deduplicated() {
    let result = audit_html("http://example.com/widgets", BARE_PAGE, Some(ROBOTS_BLOCK_ALL));
    assert!(!result.recommendations.is_empty());

    for window in result.recommendations.windows(2) {
        assert!(
            window[0].priority <= window[1].priority,
            "recommendations must be sorted critical-first"
        );
    }

    let mut seen = std::collections::HashSet::new();
    for rec in &result.recommendations {
        assert!(
            seen.insert((rec.category, rec.title.clone())),
            "duplicate recommendation: {:?} {}",
            rec.category,
            rec.title
        );
    }
}

#[test]
fn invalid_jsonld_never_aborts_the_audit() {
    let html = r#"<html><head>
        <script type="application/ld+json">{definitely broken json</script>
        </head><body><p>content</p></body></html>"#;
    let result = audit_html("https://example.com/x", html, None);
    let schema = result
        .category_scores
        .iter()
        .find(|c| c.category == Category::SchemaMarkup)
        .unwrap();
    assert!(schema
        .findings
        .iter()
        .any(|f| f.code == SignalCode::SchemaValid && f.severity == FindingSeverity::Issue));
}

#[test]
fn content_gaps_surface_for_thin_pages() {
    let result = audit_html("https://example.com/x", "<html><body><p>Tiny.</p></body></html>", None);
    assert!(!result.content_analysis.gaps.is_empty());
    assert!(result
        .content_analysis
        .gaps
        .iter()
        .any(|g| g.contains("thin")));
}
