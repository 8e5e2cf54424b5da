//! Topic clustering from fixed domain dictionaries and content-type
//! classification from signal phrases.

use serde::{Deserialize, Serialize};

/// A detected topic with its relevance percentage
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicCluster {
    pub topic: String,
    /// matching keywords / total dictionary keywords, as a percentage
    pub relevance: f64,
    /// Dictionary keywords found in the text
    pub matched: Vec<String>,
}

/// Page intent classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Informational,
    Commercial,
    Transactional,
    Navigational,
    Mixed,
}

/// Domain keyword dictionaries for topic clustering
const TOPIC_DOMAINS: &[(&str, &[&str])] = &[
    (
        "technology",
        &[
            "software", "api", "cloud", "data", "code", "developer", "app", "platform", "digital",
            "computer", "ai", "automation",
        ],
    ),
    (
        "health",
        &[
            "health", "medical", "doctor", "treatment", "symptoms", "wellness", "patient",
            "therapy", "diagnosis", "medicine", "nutrition", "fitness",
        ],
    ),
    (
        "finance",
        &[
            "money", "investment", "bank", "finance", "loan", "credit", "tax", "budget",
            "insurance", "savings", "stock", "mortgage",
        ],
    ),
    (
        "travel",
        &[
            "travel", "flight", "hotel", "destination", "vacation", "tour", "booking", "trip",
            "airport", "itinerary", "passport", "tourism",
        ],
    ),
    (
        "food",
        &[
            "recipe", "food", "cooking", "ingredients", "restaurant", "meal", "kitchen", "baking",
            "flavor", "dish", "cuisine", "dinner",
        ],
    ),
    (
        "education",
        &[
            "learning", "course", "student", "education", "teacher", "school", "university",
            "training", "lesson", "curriculum", "degree", "tutorial",
        ],
    ),
    (
        "marketing",
        &[
            "marketing", "brand", "audience", "campaign", "seo", "content", "conversion",
            "engagement", "advertising", "social", "traffic", "leads",
        ],
    ),
    (
        "legal",
        &[
            "law", "legal", "contract", "attorney", "court", "rights", "regulation", "compliance",
            "liability", "lawsuit", "clause", "statute",
        ],
    ),
    (
        "science",
        &[
            "research", "study", "experiment", "theory", "analysis", "scientists", "evidence",
            "hypothesis", "physics", "biology", "chemistry", "climate",
        ],
    ),
    (
        "sports",
        &[
            "game", "team", "player", "season", "league", "coach", "score", "championship",
            "tournament", "training", "athlete", "match",
        ],
    ),
];

const INFORMATIONAL_PHRASES: &[&str] = &[
    "what is", "how to", "how does", "guide", "tutorial", "learn", "definition", "explained",
    "examples", "overview", "introduction",
];
const COMMERCIAL_PHRASES: &[&str] = &[
    "best", "review", "compare", "comparison", "top 10", "vs", "alternatives", "pricing", "cheap",
    "rated",
];
const TRANSACTIONAL_PHRASES: &[&str] = &[
    "buy", "order", "purchase", "checkout", "add to cart", "discount", "coupon", "free shipping",
    "subscribe", "sign up now",
];
const NAVIGATIONAL_PHRASES: &[&str] = &[
    "login", "sign in", "contact us", "about us", "homepage", "official site", "my account",
];

/// Minimum dictionary hits before a topic cluster is reported
const MIN_TOPIC_MATCHES: usize = 2;

/// Detect topic clusters from unique content words.
/// Relevance = matching keywords / total dictionary keywords.
pub fn clusters(unique_words: &std::collections::BTreeSet<&str>) -> Vec<TopicCluster> {
    let mut out = Vec::new();
    for (topic, dictionary) in TOPIC_DOMAINS {
        let matched: Vec<String> = dictionary
            .iter()
            .filter(|k| unique_words.contains(**k))
            .map(|k| k.to_string())
            .collect();
        if matched.len() >= MIN_TOPIC_MATCHES {
            out.push(TopicCluster {
                topic: topic.to_string(),
                relevance: (matched.len() as f64 / dictionary.len() as f64) * 100.0,
                matched,
            });
        }
    }
    out.sort_by(|a, b| {
        b.relevance
            .partial_cmp(&a.relevance)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.topic.cmp(&b.topic))
    });
    out
}

/// Classify page intent by counting signal phrases. Ties between nonzero
/// counts resolve as Mixed; no signals at all reads as plain informational
/// prose.
pub fn classify_content_type(text_lower: &str) -> ContentType {
    let count = |phrases: &[&str]| -> usize {
        phrases.iter().map(|p| text_lower.matches(p).count()).sum()
    };

    let scores = [
        (ContentType::Informational, count(INFORMATIONAL_PHRASES)),
        (ContentType::Commercial, count(COMMERCIAL_PHRASES)),
        (ContentType::Transactional, count(TRANSACTIONAL_PHRASES)),
        (ContentType::Navigational, count(NAVIGATIONAL_PHRASES)),
    ];

    let max = scores.iter().map(|(_, n)| *n).max().unwrap_or(0);
    if max == 0 {
        return ContentType::Informational;
    }
    let leaders: Vec<ContentType> = scores
        .iter()
        .filter(|(_, n)| *n == max)
        .map(|(t, _)| *t)
        .collect();
    if leaders.len() > 1 {
        ContentType::Mixed
    } else {
        leaders[0]
    }
}
