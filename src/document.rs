//! Normalized, queryable snapshot of one fetched page.
//!
//! A `DocumentModel` is built once per audit from raw HTML and never mutated
//! afterwards. All scorers read from it concurrently without shared state.

use scraper::{Html, Node, Selector};
use std::collections::HashMap;
use std::sync::OnceLock;
use url::Url;

/// Immutable parsed representation of a page
#[derive(Debug, Clone)]
pub struct DocumentModel {
    /// Canonical URL of the page
    pub url: String,
    /// Raw HTML as fetched
    pub raw_html: String,
    /// Visible text with scripts/styles stripped, whitespace-normalized
    pub text_content: String,
    /// JSON-LD blocks; blocks that fail to parse are kept with `is_valid = false`
    pub structured_data_blocks: Vec<StructuredDataBlock>,
    /// Meta tag name/property -> content, lowercased names, first occurrence wins
    pub meta_tags: HashMap<String, String>,
    /// `<title>` text, if present and non-empty
    pub title: Option<String>,
    /// Headings in document order
    pub headings: Vec<Heading>,
    /// Anchors with an href attribute
    pub links: Vec<Link>,
    /// Images in document order
    pub images: Vec<Image>,
    /// `<html lang>` value
    pub language: Option<String>,
    /// `<link rel="canonical">` href
    pub canonical: Option<String>,
    /// Declared charset (`<meta charset>` or http-equiv content-type)
    pub charset: Option<String>,
    /// hreflang codes from alternate links
    pub hreflangs: Vec<String>,
    /// Number of external `<script src>` references
    pub external_scripts: usize,
    /// Total bytes of inline script bodies
    pub inline_script_bytes: usize,
    /// Total bytes of inline `<style>` bodies
    pub inline_style_bytes: usize,
    /// Form action attributes (None when the action is omitted)
    pub form_actions: Vec<Option<String>>,
    /// Parsed robots.txt rules supplied by the fetch collaborator
    pub robots_directives: Option<RobotsDirectives>,
}

/// One JSON-LD block from the page
#[derive(Debug, Clone)]
pub struct StructuredDataBlock {
    /// Raw block source (kept even when invalid)
    pub raw: String,
    /// False when the block is not parseable JSON
    pub is_valid: bool,
    /// Parsed value for valid blocks
    pub json: Option<serde_json::Value>,
    /// @type values found at the top level or inside @graph
    pub types: Vec<String>,
}

impl StructuredDataBlock {
    /// True if the block declares any of the given schema.org types
    pub fn has_type(&self, wanted: &[&str]) -> bool {
        self.types
            .iter()
            .any(|t| wanted.iter().any(|w| t.eq_ignore_ascii_case(w)))
    }
}

#[derive(Debug, Clone)]
pub struct Heading {
    /// 1-6
    pub level: u8,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct Link {
    pub href: String,
    pub anchor_text: String,
    pub is_internal: bool,
}

#[derive(Debug, Clone)]
pub struct Image {
    pub src: String,
    pub alt: Option<String>,
    /// Width and height attributes both present
    pub has_dimensions: bool,
}

fn selector(cache: &'static OnceLock<Selector>, css: &'static str) -> &'static Selector {
    cache.get_or_init(|| Selector::parse(css).unwrap())
}

impl DocumentModel {
    /// Parse raw HTML into a document model. Never fails: a malformed page
    /// yields a sparse model, which the scorers treat as negative evidence.
    pub fn parse(url: &str, html: &str, robots_txt: Option<&str>) -> Self {
        static META: OnceLock<Selector> = OnceLock::new();
        static HEADINGS: OnceLock<Selector> = OnceLock::new();
        static ANCHORS: OnceLock<Selector> = OnceLock::new();
        static IMAGES: OnceLock<Selector> = OnceLock::new();
        static JSONLD: OnceLock<Selector> = OnceLock::new();
        static HTML_EL: OnceLock<Selector> = OnceLock::new();
        static CANONICAL: OnceLock<Selector> = OnceLock::new();
        static HREFLANG: OnceLock<Selector> = OnceLock::new();
        static CHARSET: OnceLock<Selector> = OnceLock::new();
        static SCRIPTS: OnceLock<Selector> = OnceLock::new();
        static STYLES: OnceLock<Selector> = OnceLock::new();
        static FORMS: OnceLock<Selector> = OnceLock::new();
        static TITLE: OnceLock<Selector> = OnceLock::new();

        let doc = Html::parse_document(html);
        let base = Url::parse(url).ok();

        let mut meta_tags = HashMap::new();
        for el in doc.select(selector(&META, "meta")) {
            let name = el
                .value()
                .attr("name")
                .or_else(|| el.value().attr("property"))
                .or_else(|| el.value().attr("http-equiv"));
            if let (Some(name), Some(content)) = (name, el.value().attr("content")) {
                meta_tags
                    .entry(name.to_lowercase())
                    .or_insert_with(|| content.trim().to_string());
            }
        }

        let headings = doc
            .select(selector(&HEADINGS, "h1, h2, h3, h4, h5, h6"))
            .map(|el| Heading {
                level: el.value().name().as_bytes()[1] - b'0',
                text: normalize_whitespace(&el.text().collect::<String>()),
            })
            .collect();

        let links = doc
            .select(selector(&ANCHORS, "a[href]"))
            .filter_map(|el| {
                let href = el.value().attr("href")?.trim().to_string();
                let anchor_text = normalize_whitespace(&el.text().collect::<String>());
                let is_internal = is_internal_href(&href, base.as_ref());
                Some(Link {
                    href,
                    anchor_text,
                    is_internal,
                })
            })
            .collect();

        let images = doc
            .select(selector(&IMAGES, "img"))
            .map(|el| Image {
                src: el.value().attr("src").unwrap_or_default().to_string(),
                alt: el.value().attr("alt").map(|s| s.to_string()),
                has_dimensions: el.value().attr("width").is_some()
                    && el.value().attr("height").is_some(),
            })
            .collect();

        let structured_data_blocks = doc
            .select(selector(&JSONLD, "script[type='application/ld+json']"))
            .map(|el| {
                let raw = el.text().collect::<String>();
                match serde_json::from_str::<serde_json::Value>(&raw) {
                    Ok(json) => {
                        let types = extract_schema_types(&json);
                        StructuredDataBlock {
                            raw,
                            is_valid: true,
                            json: Some(json),
                            types,
                        }
                    }
                    Err(_) => StructuredDataBlock {
                        raw,
                        is_valid: false,
                        json: None,
                        types: Vec::new(),
                    },
                }
            })
            .collect();

        let language = doc
            .select(selector(&HTML_EL, "html"))
            .next()
            .and_then(|el| el.value().attr("lang"))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let canonical = doc
            .select(selector(&CANONICAL, "link[rel='canonical']"))
            .next()
            .and_then(|el| el.value().attr("href"))
            .map(|s| s.trim().to_string());

        let charset = doc
            .select(selector(&CHARSET, "meta[charset]"))
            .next()
            .and_then(|el| el.value().attr("charset"))
            .map(|s| s.trim().to_lowercase())
            .or_else(|| {
                meta_tags
                    .get("content-type")
                    .and_then(|v| v.split("charset=").nth(1))
                    .map(|s| s.trim().to_lowercase())
            });

        let hreflangs = doc
            .select(selector(&HREFLANG, "link[rel='alternate'][hreflang]"))
            .filter_map(|el| el.value().attr("hreflang"))
            .map(|s| s.trim().to_lowercase())
            .collect();

        let mut external_scripts = 0;
        let mut inline_script_bytes = 0;
        for el in doc.select(selector(&SCRIPTS, "script")) {
            if el.value().attr("src").is_some() {
                external_scripts += 1;
            } else {
                inline_script_bytes += el.text().map(|t| t.len()).sum::<usize>();
            }
        }

        let inline_style_bytes = doc
            .select(selector(&STYLES, "style"))
            .map(|el| el.text().map(|t| t.len()).sum::<usize>())
            .sum();

        let form_actions = doc
            .select(selector(&FORMS, "form"))
            .map(|el| el.value().attr("action").map(|s| s.to_string()))
            .collect();

        let title = doc
            .select(selector(&TITLE, "title"))
            .next()
            .map(|el| normalize_whitespace(&el.text().collect::<String>()))
            .filter(|t| !t.is_empty());

        let mut text = String::new();
        collect_text(doc.tree.root(), &mut text);
        let text_content = normalize_whitespace(&text);

        Self {
            url: url.to_string(),
            raw_html: html.to_string(),
            text_content,
            structured_data_blocks,
            meta_tags,
            title,
            headings,
            links,
            images,
            language,
            canonical,
            charset,
            hreflangs,
            external_scripts,
            inline_script_bytes,
            inline_style_bytes,
            form_actions,
            robots_directives: robots_txt.map(RobotsDirectives::parse),
        }
    }

    /// Page weight in bytes (raw HTML)
    pub fn page_weight(&self) -> usize {
        self.raw_html.len()
    }

    pub fn is_https(&self) -> bool {
        self.url.starts_with("https://")
    }

    /// Host of the page URL, if parseable
    pub fn host(&self) -> Option<String> {
        Url::parse(&self.url)
            .ok()
            .and_then(|u| u.host_str().map(|h| h.to_string()))
    }

    /// First meta tag value for any of the given names
    pub fn meta(&self, names: &[&str]) -> Option<&str> {
        names
            .iter()
            .find_map(|n| self.meta_tags.get(*n))
            .map(|s| s.as_str())
    }

}

/// Collapse all whitespace runs to single spaces
fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn collect_text(node: ego_tree::NodeRef<'_, Node>, out: &mut String) {
    if let Node::Element(el) = node.value() {
        if matches!(
            el.name(),
            "script" | "style" | "noscript" | "template" | "head"
        ) {
            return;
        }
    }
    if let Node::Text(text) = node.value() {
        out.push_str(text);
        out.push(' ');
    }
    for child in node.children() {
        collect_text(child, out);
    }
}

fn is_internal_href(href: &str, base: Option<&Url>) -> bool {
    if href.starts_with('#') {
        return true;
    }
    match Url::parse(href) {
        Ok(abs) => match (abs.host_str(), base.and_then(|b| b.host_str())) {
            (Some(h), Some(bh)) => h.eq_ignore_ascii_case(bh),
            _ => false,
        },
        // Relative URLs resolve against the page host
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            !href.starts_with("mailto:") && !href.starts_with("javascript:")
        }
        Err(_) => false,
    }
}

/// Pull @type declarations out of a JSON-LD value, including @graph nodes
fn extract_schema_types(value: &serde_json::Value) -> Vec<String> {
    let mut types = Vec::new();
    collect_types(value, &mut types);
    types
}

fn collect_types(value: &serde_json::Value, out: &mut Vec<String>) {
    match value {
        serde_json::Value::Object(map) => {
            match map.get("@type") {
                Some(serde_json::Value::String(t)) => out.push(t.clone()),
                Some(serde_json::Value::Array(items)) => {
                    for item in items {
                        if let serde_json::Value::String(t) = item {
                            out.push(t.clone());
                        }
                    }
                }
                _ => {}
            }
            if let Some(graph) = map.get("@graph") {
                collect_types(graph, out);
            }
        }
        serde_json::Value::Array(items) => {
            for item in items {
                collect_types(item, out);
            }
        }
        _ => {}
    }
}

/// Parsed robots.txt rules, grouped by user-agent
#[derive(Debug, Clone, Default)]
pub struct RobotsDirectives {
    pub groups: Vec<RobotsGroup>,
}

#[derive(Debug, Clone, Default)]
pub struct RobotsGroup {
    /// Lowercased user-agent tokens this group applies to
    pub user_agents: Vec<String>,
    pub allows: Vec<String>,
    pub disallows: Vec<String>,
}

impl RobotsDirectives {
    pub fn parse(body: &str) -> Self {
        let mut groups: Vec<RobotsGroup> = Vec::new();
        let mut current: Option<RobotsGroup> = None;
        let mut last_was_agent = false;

        for line in body.lines() {
            let line = line.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            let Some((field, value)) = line.split_once(':') else {
                continue;
            };
            let field = field.trim().to_lowercase();
            let value = value.trim().to_string();

            match field.as_str() {
                "user-agent" => {
                    if last_was_agent {
                        if let Some(ref mut group) = current {
                            group.user_agents.push(value.to_lowercase());
                        }
                    } else {
                        if let Some(group) = current.take() {
                            groups.push(group);
                        }
                        current = Some(RobotsGroup {
                            user_agents: vec![value.to_lowercase()],
                            ..RobotsGroup::default()
                        });
                    }
                    last_was_agent = true;
                }
                "disallow" => {
                    if let Some(ref mut group) = current {
                        if !value.is_empty() {
                            group.disallows.push(value);
                        }
                    }
                    last_was_agent = false;
                }
                "allow" => {
                    if let Some(ref mut group) = current {
                        group.allows.push(value);
                    }
                    last_was_agent = false;
                }
                _ => {
                    last_was_agent = false;
                }
            }
        }
        if let Some(group) = current {
            groups.push(group);
        }

        Self { groups }
    }

    /// Whether the given crawler may fetch the site root.
    ///
    /// Matching follows the robots exclusion protocol: the most specific
    /// user-agent group wins; a wildcard group applies otherwise; no matching
    /// group means allowed.
    pub fn allows(&self, agent: &str) -> bool {
        let agent = agent.to_lowercase();
        let specific = self.groups.iter().find(|g| {
            g.user_agents
                .iter()
                .any(|ua| ua != "*" && (agent.contains(ua.as_str()) || ua.contains(&agent)))
        });
        let group = specific.or_else(|| {
            self.groups
                .iter()
                .find(|g| g.user_agents.iter().any(|ua| ua == "*"))
        });

        match group {
            Some(g) => {
                let root_disallowed = g.disallows.iter().any(|d| d == "/");
                let root_allowed = g.allows.iter().any(|a| a == "/");
                !root_disallowed || root_allowed
            }
            None => true,
        }
    }

    /// True when a wildcard group disallows the whole site
    pub fn blanket_disallow(&self) -> bool {
        self.groups
            .iter()
            .filter(|g| g.user_agents.iter().any(|ua| ua == "*"))
            .any(|g| g.disallows.iter().any(|d| d == "/") && !g.allows.iter().any(|a| a == "/"))
    }
}
