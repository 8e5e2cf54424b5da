//! Rule-based recommendation engine.
//!
//! Issue findings map to fixed remediation templates; priority and effort
//! come from per-signal tables, so the output is a deterministic function of
//! the findings. Externally generated recommendations can be merged in with
//! per-category precedence.

use crate::{Category, Effort, Finding, FindingSeverity, Priority, Recommendation, SignalCode};

/// Fixed remediation template for one signal
struct Template {
    title: &'static str,
    impact: &'static str,
    implementation: &'static str,
}

fn template(code: SignalCode) -> Option<Template> {
    use SignalCode::*;
    let t = match code {
        JsonLdPresent => Template {
            title: "Add JSON-LD structured data",
            impact: "Structured data is the primary way answer engines attribute facts to a page",
            implementation: "Embed a script[type=application/ld+json] block describing the page with schema.org vocabulary",
        },
        SchemaOrganization => Template {
            title: "Declare the publishing entity with Organization schema",
            impact: "Entity information lets engines attribute the content to a known publisher",
            implementation: "Add an Organization (or Person) object with name, url, and logo to the JSON-LD",
        },
        SchemaArticle => Template {
            title: "Describe the page with Article schema",
            impact: "Article markup exposes headline, author, and dates in machine-readable form",
            implementation: "Add an Article or BlogPosting object with headline, author, and datePublished",
        },
        SchemaFaq => Template {
            title: "Mark up Q&A content as FAQPage",
            impact: "FAQ schema maps questions directly to citable answers",
            implementation: "Wrap question/answer pairs in a FAQPage object with Question and Answer entities",
        },
        SchemaBreadcrumb => Template {
            title: "Add BreadcrumbList schema",
            impact: "Breadcrumbs give engines the page's place in the site hierarchy",
            implementation: "Emit a BreadcrumbList with itemListElement entries for each ancestor page",
        },
        SchemaValid => Template {
            title: "Fix invalid JSON-LD blocks",
            impact: "Engines silently drop unparseable structured data",
            implementation: "Validate each block with a JSON-LD linter and fix the syntax errors",
        },
        TitlePresent => Template {
            title: "Add a descriptive page title",
            impact: "The title is the strongest single relevance signal and the default citation label",
            implementation: "Add a <title> of 50-60 characters stating the page topic",
        },
        TitleLength => Template {
            title: "Tune the title length",
            impact: "Truncated or vague titles lose clicks and citation context",
            implementation: "Rewrite the <title> to 50-60 characters with the topic up front",
        },
        MetaDescriptionPresent => Template {
            title: "Add a meta description",
            impact: "Engines quote the description when summarizing the page",
            implementation: "Add a meta description of 140-160 characters summarizing the answer the page gives",
        },
        MetaDescriptionLength => Template {
            title: "Tune the meta description length",
            impact: "Descriptions outside 140-160 characters get truncated or ignored",
            implementation: "Rewrite the description to fit the 140-160 character window",
        },
        CanonicalLink => Template {
            title: "Declare a canonical URL",
            impact: "Without a canonical, citation credit splits across duplicate URLs",
            implementation: "Add <link rel=\"canonical\"> pointing at the preferred URL",
        },
        OpenGraphTags => Template {
            title: "Complete the Open Graph tags",
            impact: "OG tags control how shares and previews render the page",
            implementation: "Add og:title and og:description meta properties",
        },
        TwitterCard => Template {
            title: "Add a Twitter card tag",
            impact: "Card metadata improves link previews",
            implementation: "Add <meta name=\"twitter:card\" content=\"summary_large_image\">",
        },
        ViewportMeta => Template {
            title: "Add a viewport meta tag",
            impact: "Pages without a viewport are penalized for mobile users",
            implementation: "Add <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">",
        },
        RobotsMetaIndexable => Template {
            title: "Remove the noindex directive",
            impact: "A noindex page is invisible to every engine",
            implementation: "Delete noindex from the robots meta tag (or the X-Robots-Tag header)",
        },
        GptbotAccess => Template {
            title: "Allow GPTBot in robots.txt",
            impact: "Blocking GPTBot removes the page from ChatGPT's browsing and training corpus",
            implementation: "Add 'User-agent: GPTBot' with 'Allow: /' to robots.txt",
        },
        ClaudebotAccess => Template {
            title: "Allow ClaudeBot in robots.txt",
            impact: "Blocking ClaudeBot removes the page from Claude's retrieval",
            implementation: "Add 'User-agent: ClaudeBot' with 'Allow: /' to robots.txt",
        },
        PerplexitybotAccess => Template {
            title: "Allow PerplexityBot in robots.txt",
            impact: "Perplexity cites pages its crawler can fetch",
            implementation: "Add 'User-agent: PerplexityBot' with 'Allow: /' to robots.txt",
        },
        GoogleExtendedAccess => Template {
            title: "Allow Google-Extended in robots.txt",
            impact: "Google-Extended gates Gemini's use of the content",
            implementation: "Add 'User-agent: Google-Extended' with 'Allow: /' to robots.txt",
        },
        CcbotAccess => Template {
            title: "Allow CCBot in robots.txt",
            impact: "Common Crawl feeds many model training sets",
            implementation: "Add 'User-agent: CCBot' with 'Allow: /' to robots.txt",
        },
        NoBlanketDisallow => Template {
            title: "Remove the blanket robots.txt disallow",
            impact: "Disallow: / hides the entire site from every crawler",
            implementation: "Replace 'Disallow: /' with targeted rules for private paths only",
        },
        NoAiOptOutMeta => Template {
            title: "Remove the AI opt-out meta directive",
            impact: "noai/noindex meta tags remove the page from answer engines",
            implementation: "Delete the opt-out value from the robots meta tag",
        },
        AuthorAttribution => Template {
            title: "Attribute the content to a named author",
            impact: "Engines weight authored content higher for expertise-sensitive topics",
            implementation: "Add an author meta tag and a visible byline with the writer's name",
        },
        PublishDate => Template {
            title: "Declare publish and modified dates",
            impact: "Undated content loses to fresher sources",
            implementation: "Add article:published_time meta and datePublished in the Article schema",
        },
        AboutContactLinks => Template {
            title: "Link about and contact pages",
            impact: "Reachable publisher information is a baseline trust signal",
            implementation: "Add footer links to /about and /contact pages",
        },
        ExternalCitations => Template {
            title: "Cite external sources",
            impact: "Outbound references mark the content as researched rather than generated",
            implementation: "Link claims to at least two authoritative external sources",
        },
        ExpertiseMarkers => Template {
            title: "Surface author credentials",
            impact: "Stated expertise strengthens E-E-A-T for the whole domain",
            implementation: "Add a short author bio with credentials or years of experience",
        },
        OrganizationSameAs => Template {
            title: "Link the entity to external profiles with sameAs",
            impact: "sameAs ties the publisher to its verified profiles elsewhere",
            implementation: "Add a sameAs array of official profile URLs to the Organization schema",
        },
        SingleH1 => Template {
            title: "Use exactly one H1",
            impact: "A single H1 tells engines what the page is about",
            implementation: "Keep one H1 stating the topic; demote the rest to H2",
        },
        HeadingHierarchy => Template {
            title: "Fix the heading outline",
            impact: "Skipped heading levels break content extraction",
            implementation: "Adjust heading levels so each step descends by at most one",
        },
        QuestionHeadings => Template {
            title: "Use question-form headings",
            impact: "Headings phrased as questions map directly onto user queries",
            implementation: "Rephrase section headings as the questions they answer",
        },
        ListTableContent => Template {
            title: "Add lists or tables for extractable facts",
            impact: "Engines quote structured blocks far more than prose",
            implementation: "Convert enumerable facts into bulleted lists or comparison tables",
        },
        WordCount => Template {
            title: "Expand thin content",
            impact: "Short pages rarely carry enough substance to cite",
            implementation: "Grow the page past 500 words of genuinely useful coverage",
        },
        KeywordFocus => Template {
            title: "Fix the keyword profile",
            impact: "Stuffing triggers spam heuristics; no focus leaves relevance unclear",
            implementation: "Keep the main keyword under 3% density and write naturally around it",
        },
        NamedEntities => Template {
            title: "Name concrete entities",
            impact: "Specific people, products, and organizations anchor the content to the real world",
            implementation: "Reference the actual tools, companies, and people the page discusses",
        },
        DirectAnswers => Template {
            title: "Answer the question in the opening",
            impact: "Engines prefer pages whose first paragraph already contains the answer",
            implementation: "Start with a one-sentence definition or answer before elaborating",
        },
        HttpsProtocol | HttpsEverywhere => Template {
            title: "Serve the page over HTTPS",
            impact: "Plain HTTP pages are flagged insecure and rarely cited",
            implementation: "Install a TLS certificate and redirect all HTTP traffic to HTTPS",
        },
        NoMixedContent => Template {
            title: "Eliminate mixed content",
            impact: "HTTP subresources break the padlock and trigger blocking",
            implementation: "Rewrite src/href references to https:// equivalents",
        },
        ImageAltCoverage | ImageAltText => Template {
            title: "Add alt text to images",
            impact: "Alt text is how engines read images",
            implementation: "Describe each informative image in its alt attribute",
        },
        LanguageDeclared | LangAttribute => Template {
            title: "Declare the document language",
            impact: "Engines must guess the language without a lang attribute",
            implementation: "Add lang=\"en\" (or the actual language) to the <html> element",
        },
        PageWeight => Template {
            title: "Reduce page weight",
            impact: "Heavy pages time out for crawlers on a budget",
            implementation: "Compress HTML, defer non-critical assets, and trim embedded payloads",
        },
        ScriptCount => Template {
            title: "Consolidate scripts",
            impact: "Each script adds fetch and parse cost before content renders",
            implementation: "Bundle scripts, drop unused tags, and defer the rest",
        },
        InternalLinks => Template {
            title: "Add internal links",
            impact: "Internal links spread authority and help crawlers find related answers",
            implementation: "Link at least three related pages from the body copy",
        },
        ExternalLinks => Template {
            title: "Add outbound reference links",
            impact: "Well-sourced pages earn more citations themselves",
            implementation: "Link the primary sources behind the page's claims",
        },
        DescriptiveAnchors => Template {
            title: "Rewrite generic anchor text",
            impact: "\"Click here\" tells engines nothing about the target",
            implementation: "Use anchors that name the destination topic",
        },
        _ => return None,
    };
    Some(t)
}

/// Fixed issue-severity table: how urgent each failed signal is
fn priority_for(code: SignalCode) -> Priority {
    use SignalCode::*;
    match code {
        HttpsProtocol | HttpsEverywhere | NoBlanketDisallow | RobotsMetaIndexable
        | NoAiOptOutMeta => Priority::Critical,
        JsonLdPresent | GptbotAccess | ClaudebotAccess | PerplexitybotAccess | TitlePresent
        | WordCount | AuthorAttribution | SingleH1 | NoMixedContent | KeywordFocus
        | ViewportMeta | ViewportConfigured => Priority::High,
        TwitterCard | SchemaBreadcrumb | LazyLoading | InlineStyleVolume | CcbotAccess
        | GoogleExtendedAccess | HreflangAnnotations | TouchFriendlyNav | LinkDensity
        | CleanUrl => Priority::Low,
        _ => Priority::Medium,
    }
}

/// Fixed implementation-cost table
fn effort_for(code: SignalCode) -> Effort {
    use SignalCode::*;
    match code {
        TitlePresent | TitleLength | MetaDescriptionPresent | MetaDescriptionLength
        | CanonicalLink | OpenGraphTags | TwitterCard | ViewportMeta | ViewportConfigured
        | RobotsMetaIndexable | NoAiOptOutMeta | GptbotAccess | ClaudebotAccess
        | PerplexitybotAccess | GoogleExtendedAccess | CcbotAccess | NoBlanketDisallow
        | LanguageDeclared | LangAttribute | CharsetDeclared | CharsetUtf8 | LazyLoading
        | ImageDimensions | ImageAltCoverage | ImageAltText | LinkAccessibleNames
        | SingleH1 => Effort::QuickWin,
        WordCount | ExpertiseMarkers | PageWeight | HttpsProtocol | HttpsEverywhere
        | HreflangAnnotations => Effort::LongTerm,
        _ => Effort::Strategic,
    }
}

fn estimated_time_for(effort: Effort) -> &'static str {
    match effort {
        Effort::QuickWin => "1-2 hours",
        Effort::Strategic => "1-2 weeks",
        Effort::LongTerm => "2-6 weeks",
    }
}

/// Deterministic recommendation assembly and merging
pub struct RecommendationEngine;

impl RecommendationEngine {
    pub fn new() -> Self {
        Self
    }

    /// Build the rule-based recommendation list from issue findings.
    /// De-duplicated by (category, title); sorted by priority then effort.
    pub fn from_findings(&self, findings: &[Finding]) -> Vec<Recommendation> {
        let mut recommendations: Vec<Recommendation> = findings
            .iter()
            .filter(|f| f.severity == FindingSeverity::Issue)
            .map(|f| self.recommendation_for(f))
            .collect();

        dedup_by_category_title(&mut recommendations);
        sort_recommendations(&mut recommendations);
        recommendations
    }

    fn recommendation_for(&self, finding: &Finding) -> Recommendation {
        let priority = priority_for(finding.code);
        let effort = effort_for(finding.code);
        match template(finding.code) {
            Some(t) => Recommendation {
                category: finding.category,
                priority,
                effort,
                title: t.title.to_string(),
                description: finding.message.clone(),
                impact: t.impact.to_string(),
                implementation: t.implementation.to_string(),
                estimated_time: estimated_time_for(effort).to_string(),
            },
            // Signals without a dedicated template still yield a
            // deterministic recommendation from the finding itself.
            None => Recommendation {
                category: finding.category,
                priority,
                effort,
                title: format!("Resolve: {}", finding.code),
                description: finding.message.clone(),
                impact: format!("Improves the {} category score", finding.category),
                implementation: finding.message.clone(),
                estimated_time: estimated_time_for(effort).to_string(),
            },
        }
    }

    /// Merge externally generated recommendations with the rule-based list.
    ///
    /// External entries take precedence per category; rule-based entries fill
    /// categories the external source did not cover. Idempotent: merging the
    /// same external list twice yields the same result.
    pub fn merge(
        &self,
        rule_based: Vec<Recommendation>,
        external: Vec<Recommendation>,
    ) -> Vec<Recommendation> {
        let covered: std::collections::BTreeSet<Category> =
            external.iter().map(|r| r.category).collect();

        let mut merged = external;
        merged.extend(
            rule_based
                .into_iter()
                .filter(|r| !covered.contains(&r.category)),
        );

        dedup_by_category_title(&mut merged);
        sort_recommendations(&mut merged);
        merged
    }
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn sort_recommendations(recommendations: &mut [Recommendation]) {
    recommendations.sort_by(|a, b| {
        a.priority
            .cmp(&b.priority)
            .then_with(|| a.effort.cmp(&b.effort))
            .then_with(|| a.title.cmp(&b.title))
    });
}

fn dedup_by_category_title(recommendations: &mut Vec<Recommendation>) {
    let mut seen = std::collections::BTreeSet::new();
    recommendations.retain(|r| seen.insert((r.category, r.title.clone())));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(category: Category, code: SignalCode, message: &str) -> Finding {
        Finding::issue(category, code, message)
    }

    fn strength(category: Category, code: SignalCode) -> Finding {
        Finding::strength(category, code, "fine")
    }

    #[test]
    fn strengths_produce_no_recommendations() {
        let findings = vec![
            strength(Category::MetaTags, SignalCode::TitlePresent),
            strength(Category::SchemaMarkup, SignalCode::JsonLdPresent),
        ];
        let recs = RecommendationEngine::new().from_findings(&findings);
        assert!(recs.is_empty());
    }

    #[test]
    fn critical_issues_sort_first() {
        let findings = vec![
            issue(Category::MetaTags, SignalCode::TwitterCard, "no card"),
            issue(Category::TechnicalSeo, SignalCode::HttpsProtocol, "http"),
            issue(Category::MetaTags, SignalCode::MetaDescriptionPresent, "none"),
        ];
        let recs = RecommendationEngine::new().from_findings(&findings);
        assert_eq!(recs[0].priority, Priority::Critical);
        assert_eq!(recs[0].title, "Serve the page over HTTPS");
        assert_eq!(recs.last().unwrap().priority, Priority::Low);
    }

    #[test]
    fn quick_wins_sort_before_strategic_within_priority() {
        let findings = vec![
            issue(Category::Eeat, SignalCode::AuthorAttribution, "no author"),
            issue(Category::MetaTags, SignalCode::TitlePresent, "no title"),
        ];
        let recs = RecommendationEngine::new().from_findings(&findings);
        // Both are High priority; the quick-win title fix comes first
        assert_eq!(recs[0].effort, Effort::QuickWin);
        assert_eq!(recs[1].effort, Effort::Strategic);
    }

    #[test]
    fn duplicate_category_title_pairs_collapse() {
        let findings = vec![
            issue(Category::TechnicalSeo, SignalCode::ImageAltCoverage, "2 of 5"),
            issue(Category::TechnicalSeo, SignalCode::ImageAltCoverage, "2 of 5"),
        ];
        let recs = RecommendationEngine::new().from_findings(&findings);
        assert_eq!(recs.len(), 1);
    }

    #[test]
    fn missing_https_is_critical_missing_description_is_medium() {
        assert_eq!(priority_for(SignalCode::HttpsProtocol), Priority::Critical);
        assert_eq!(
            priority_for(SignalCode::MetaDescriptionPresent),
            Priority::Medium
        );
    }

    #[test]
    fn merge_prefers_external_per_category() {
        let engine = RecommendationEngine::new();
        let rule_based = engine.from_findings(&[
            issue(Category::MetaTags, SignalCode::TitlePresent, "no title"),
            issue(Category::SchemaMarkup, SignalCode::JsonLdPresent, "no schema"),
        ]);
        let external = vec![Recommendation {
            category: Category::MetaTags,
            priority: Priority::High,
            effort: Effort::QuickWin,
            title: "Craft a question-led title".to_string(),
            description: "model-written".to_string(),
            impact: "better match to queries".to_string(),
            implementation: "rewrite the title".to_string(),
            estimated_time: "1 hour".to_string(),
        }];

        let merged = engine.merge(rule_based.clone(), external.clone());
        // MetaTags comes only from the external source
        let meta: Vec<_> = merged
            .iter()
            .filter(|r| r.category == Category::MetaTags)
            .collect();
        assert_eq!(meta.len(), 1);
        assert_eq!(meta[0].title, "Craft a question-led title");
        // Schema still covered by the rule-based entry
        assert!(merged.iter().any(|r| r.category == Category::SchemaMarkup));
    }

    #[test]
    fn merge_is_idempotent() {
        let engine = RecommendationEngine::new();
        let rule_based = engine.from_findings(&[
            issue(Category::MetaTags, SignalCode::TitlePresent, "no title"),
            issue(Category::Links, SignalCode::InternalLinks, "no links"),
        ]);
        let external = vec![Recommendation {
            category: Category::Links,
            priority: Priority::Medium,
            effort: Effort::Strategic,
            title: "Interlink the documentation cluster".to_string(),
            description: "model-written".to_string(),
            impact: "authority flow".to_string(),
            implementation: "add contextual links".to_string(),
            estimated_time: "3 days".to_string(),
        }];

        let once = engine.merge(rule_based, external.clone());
        let twice = engine.merge(once.clone(), external);
        assert_eq!(once, twice);
    }

    #[test]
    fn merge_with_empty_external_keeps_rule_based() {
        let engine = RecommendationEngine::new();
        let rule_based =
            engine.from_findings(&[issue(Category::MetaTags, SignalCode::TitlePresent, "x")]);
        let merged = engine.merge(rule_based.clone(), vec![]);
        assert_eq!(merged, rule_based);
    }
}
