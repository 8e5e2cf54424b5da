//! Citegeist: AI citation-readiness analyzer for web pages
//!
//! This library scores how likely AI answer-engines (ChatGPT, Claude,
//! Perplexity, Gemini) are to cite a page, and produces prioritized,
//! actionable recommendations plus score forecasts.

pub mod analyzer;
pub mod audits;
pub mod config;
pub mod document;
pub mod enrich;
pub mod forecast;
pub mod history;
pub mod nlp;
pub mod recommend;
pub mod reporter;

#[cfg(feature = "fetch")]
pub mod fetch;

use serde::{Deserialize, Serialize};

/// The main result of auditing one page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditResult {
    /// URL of the audited page
    pub url: String,
    /// RFC 3339 timestamp of the audit
    pub timestamp: String,
    /// Weighted overall score (0-100, 3-decimal precision)
    pub overall_score: f64,
    /// Letter grade (A+ to F)
    pub grade: Grade,
    /// Per-category scores: nine weighted categories plus advisory audits
    pub category_scores: Vec<CategoryScore>,
    /// Core / Technical / Content rollup (reporting only)
    pub component_rollup: ComponentRollup,
    /// Linguistic analysis of the page text
    pub content_analysis: nlp::ContentAnalysis,
    /// Prioritized remediation advice
    pub recommendations: Vec<Recommendation>,
}

impl AuditResult {
    /// Score for one category, if it was evaluated
    pub fn category_score(&self, category: Category) -> Option<f64> {
        self.category_scores
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.score)
    }

    /// All issue findings across categories
    pub fn issues(&self) -> impl Iterator<Item = &Finding> {
        self.category_scores
            .iter()
            .flat_map(|c| c.findings.iter())
            .filter(|f| f.severity == FindingSeverity::Issue)
    }

    /// All strength findings across categories
    pub fn strengths(&self) -> impl Iterator<Item = &Finding> {
        self.category_scores
            .iter()
            .flat_map(|c| c.findings.iter())
            .filter(|f| f.severity == FindingSeverity::Strength)
    }
}

/// Score for one audit category with its supporting evidence
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScore {
    /// The category this score belongs to
    pub category: Category,
    /// Score (always clamped to 0-100)
    pub score: f64,
    /// Evidence: one finding per checked signal
    pub findings: Vec<Finding>,
}

impl CategoryScore {
    pub fn new(category: Category, score: f64, findings: Vec<Finding>) -> Self {
        Self {
            category,
            score: score.clamp(0.0, 100.0),
            findings,
        }
    }
}

/// Core / Technical / Content component averages (reporting only,
/// not part of the overall score formula)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentRollup {
    pub core: f64,
    pub technical: f64,
    pub content: f64,
}

/// Audit categories. The first nine are weighted into the overall score;
/// the rest are advisory audits with the same evidence contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    SchemaMarkup,
    MetaTags,
    AiCrawlers,
    Eeat,
    Structure,
    Performance,
    ContentQuality,
    TechnicalSeo,
    Links,
    CoreWebVitals,
    Security,
    Mobile,
    Accessibility,
    International,
}

impl Category {
    /// Human-readable label for console output
    pub fn label(&self) -> &'static str {
        match self {
            Category::SchemaMarkup => "Schema Markup",
            Category::MetaTags => "Meta Tags",
            Category::AiCrawlers => "AI Crawler Access",
            Category::Eeat => "E-E-A-T",
            Category::Structure => "Content Structure",
            Category::Performance => "Performance",
            Category::ContentQuality => "Content Quality",
            Category::TechnicalSeo => "Technical SEO",
            Category::Links => "Link Profile",
            Category::CoreWebVitals => "Core Web Vitals",
            Category::Security => "Security",
            Category::Mobile => "Mobile Readiness",
            Category::Accessibility => "Accessibility",
            Category::International => "International SEO",
        }
    }

    /// Stable identifier used in config files and history keys
    pub fn key(&self) -> &'static str {
        match self {
            Category::SchemaMarkup => "schema-markup",
            Category::MetaTags => "meta-tags",
            Category::AiCrawlers => "ai-crawlers",
            Category::Eeat => "eeat",
            Category::Structure => "structure",
            Category::Performance => "performance",
            Category::ContentQuality => "content-quality",
            Category::TechnicalSeo => "technical-seo",
            Category::Links => "links",
            Category::CoreWebVitals => "core-web-vitals",
            Category::Security => "security",
            Category::Mobile => "mobile",
            Category::Accessibility => "accessibility",
            Category::International => "international",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Letter grade with A+ tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Grade from a 0-100 score using the given cut points.
    /// A pure, monotonic step function: a higher score never grades lower.
    pub fn from_score(score: f64, cutoffs: &GradeCutoffs) -> Self {
        if score >= cutoffs.a_plus {
            Grade::APlus
        } else if score >= cutoffs.a {
            Grade::A
        } else if score >= cutoffs.b {
            Grade::B
        } else if score >= cutoffs.c {
            Grade::C
        } else if score >= cutoffs.d {
            Grade::D
        } else {
            Grade::F
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Grade::APlus => write!(f, "A+"),
            Grade::A => write!(f, "A"),
            Grade::B => write!(f, "B"),
            Grade::C => write!(f, "C"),
            Grade::D => write!(f, "D"),
            Grade::F => write!(f, "F"),
        }
    }
}

/// Score thresholds for each grade tier. Configuration constants,
/// overridable from `.citegeistrc.json`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeCutoffs {
    pub a_plus: f64,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl Default for GradeCutoffs {
    fn default() -> Self {
        Self {
            a_plus: 90.0,
            a: 80.0,
            b: 70.0,
            c: 60.0,
            d: 50.0,
        }
    }
}

/// An atomic piece of evidence produced by a scorer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    /// Signal that produced this finding
    pub code: SignalCode,
    /// Whether the signal passed (strength) or failed (issue)
    pub severity: FindingSeverity,
    /// Human-readable evidence
    pub message: String,
    /// Category the finding affects
    pub category: Category,
    /// True when the underlying value is estimated rather than measured
    /// (e.g. Core Web Vitals approximated from page weight)
    #[serde(default)]
    pub is_estimated: bool,
}

impl Finding {
    pub fn strength(category: Category, code: SignalCode, message: impl Into<String>) -> Self {
        Self {
            code,
            severity: FindingSeverity::Strength,
            message: message.into(),
            category,
            is_estimated: false,
        }
    }

    pub fn issue(category: Category, code: SignalCode, message: impl Into<String>) -> Self {
        Self {
            code,
            severity: FindingSeverity::Issue,
            message: message.into(),
            category,
            is_estimated: false,
        }
    }

    /// Mark the finding as derived from an estimate, not a measurement
    pub fn estimated(mut self) -> Self {
        self.is_estimated = true;
        self
    }
}

/// Severity of a finding: evidence for or against the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingSeverity {
    Strength,
    Issue,
}

/// Checked signals. Each scorer evaluates a fixed subset and every
/// signal produces exactly one finding per audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignalCode {
    // Schema Markup
    JsonLdPresent,
    SchemaOrganization,
    SchemaArticle,
    SchemaFaq,
    SchemaBreadcrumb,
    SchemaValid,
    // Meta Tags
    TitlePresent,
    TitleLength,
    MetaDescriptionPresent,
    MetaDescriptionLength,
    CanonicalLink,
    OpenGraphTags,
    TwitterCard,
    ViewportMeta,
    RobotsMetaIndexable,
    // AI Crawler Access
    GptbotAccess,
    ClaudebotAccess,
    PerplexitybotAccess,
    GoogleExtendedAccess,
    CcbotAccess,
    NoBlanketDisallow,
    NoAiOptOutMeta,
    // E-E-A-T
    AuthorAttribution,
    PublishDate,
    AboutContactLinks,
    ExternalCitations,
    ExpertiseMarkers,
    OrganizationSameAs,
    HttpsTrust,
    // Structure
    SingleH1,
    HeadingHierarchy,
    ListTableContent,
    ParagraphLength,
    QuestionHeadings,
    SemanticLandmarks,
    // Performance
    PageWeight,
    ScriptCount,
    InlineStyleVolume,
    ImageDimensions,
    LazyLoading,
    // Content Quality
    WordCount,
    KeywordFocus,
    VocabularyDiversity,
    SentenceVariety,
    NamedEntities,
    TopicFocus,
    LexicalDensity,
    DirectAnswers,
    // Technical SEO
    HttpsProtocol,
    CanonicalConsistency,
    LanguageDeclared,
    ImageAltCoverage,
    CharsetDeclared,
    CleanUrl,
    NoEmptyAnchors,
    // Link Analysis
    InternalLinks,
    ExternalLinks,
    DescriptiveAnchors,
    LinkDensity,
    NoFragmentLinks,
    // Core Web Vitals (estimates)
    LcpEstimate,
    TbtEstimate,
    ClsEstimate,
    // Security
    HttpsEverywhere,
    NoMixedContent,
    NoInlineHandlers,
    FormSecurity,
    // Mobile
    ViewportConfigured,
    ResponsiveImages,
    NoLegacyPlugins,
    TouchFriendlyNav,
    // Accessibility
    ImageAltText,
    DocumentLanguage,
    LinkAccessibleNames,
    HeadingOrder,
    // International SEO
    LangAttribute,
    HreflangAnnotations,
    CharsetUtf8,
}

impl std::fmt::Display for SignalCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // kebab-case, matching the serde wire form
        let s = serde_json::to_string(self).unwrap_or_default();
        write!(f, "{}", s.trim_matches('"'))
    }
}

/// A prioritized remediation action derived from findings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub category: Category,
    pub priority: Priority,
    pub effort: Effort,
    pub title: String,
    pub description: String,
    pub impact: String,
    pub implementation: String,
    pub estimated_time: String,
}

/// Recommendation priority, ordered critical first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

/// Implementation cost bucket, ordered cheapest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Effort {
    QuickWin,
    Strategic,
    LongTerm,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Critical => write!(f, "critical"),
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
        }
    }
}

impl std::fmt::Display for Effort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Effort::QuickWin => write!(f, "quick-win"),
            Effort::Strategic => write!(f, "strategic"),
            Effort::LongTerm => write!(f, "long-term"),
        }
    }
}

/// Public API: audit an already-fetched page.
///
/// * `url` - canonical URL of the page (used for internal-link and HTTPS checks)
/// * `html` - raw page HTML
/// * `robots_txt` - robots.txt body for the host, if retrieved
pub fn audit_html(url: &str, html: &str, robots_txt: Option<&str>) -> AuditResult {
    let doc = document::DocumentModel::parse(url, html, robots_txt);
    analyzer::AuditEngine::new().audit(&doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_from_score_default_cutoffs() {
        let cutoffs = GradeCutoffs::default();
        assert_eq!(Grade::from_score(100.0, &cutoffs), Grade::APlus);
        assert_eq!(Grade::from_score(90.0, &cutoffs), Grade::APlus);
        assert_eq!(Grade::from_score(89.999, &cutoffs), Grade::A);
        assert_eq!(Grade::from_score(80.0, &cutoffs), Grade::A);
        assert_eq!(Grade::from_score(70.0, &cutoffs), Grade::B);
        assert_eq!(Grade::from_score(60.0, &cutoffs), Grade::C);
        assert_eq!(Grade::from_score(50.0, &cutoffs), Grade::D);
        assert_eq!(Grade::from_score(49.999, &cutoffs), Grade::F);
        assert_eq!(Grade::from_score(0.0, &cutoffs), Grade::F);
    }

    #[test]
    fn grade_is_monotonic() {
        let cutoffs = GradeCutoffs::default();
        let mut prev = Grade::from_score(0.0, &cutoffs);
        for i in 1..=1000 {
            let g = Grade::from_score(i as f64 / 10.0, &cutoffs);
            assert!(g <= prev, "score increase must never lower the grade");
            prev = g;
        }
    }

    #[test]
    fn category_score_clamps_to_range() {
        let c = CategoryScore::new(Category::SchemaMarkup, 130.0, vec![]);
        assert_eq!(c.score, 100.0);
        let c = CategoryScore::new(Category::SchemaMarkup, -5.0, vec![]);
        assert_eq!(c.score, 0.0);
    }

    #[test]
    fn signal_code_displays_kebab_case() {
        assert_eq!(SignalCode::JsonLdPresent.to_string(), "json-ld-present");
        assert_eq!(SignalCode::GptbotAccess.to_string(), "gptbot-access");
        assert_eq!(SignalCode::NoAiOptOutMeta.to_string(), "no-ai-opt-out-meta");
    }

    #[test]
    fn grade_serializes_with_plus_tier() {
        assert_eq!(serde_json::to_string(&Grade::APlus).unwrap(), "\"A+\"");
        assert_eq!(serde_json::to_string(&Grade::F).unwrap(), "\"F\"");
    }

    #[test]
    fn priority_and_effort_order_for_sorting() {
        assert!(Priority::Critical < Priority::High);
        assert!(Priority::High < Priority::Medium);
        assert!(Priority::Medium < Priority::Low);
        assert!(Effort::QuickWin < Effort::Strategic);
        assert!(Effort::Strategic < Effort::LongTerm);
    }
}
