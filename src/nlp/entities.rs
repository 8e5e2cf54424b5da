//! Named-entity extraction from capitalization patterns.
//!
//! No dictionary or model: a run of capitalized words that is not at the
//! start of a sentence is treated as an entity. Good enough to tell "page
//! mentions concrete organizations/people/places" from "page names nothing".

/// Split text into sentences on terminal punctuation
pub fn split_sentences(text: &str) -> Vec<&str> {
    text.split(['.', '!', '?'])
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect()
}

fn is_capitalized(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.is_uppercase(),
        None => false,
    }
}

/// Strip surrounding punctuation while keeping inner characters
fn trim_word(word: &str) -> &str {
    word.trim_matches(|c: char| !c.is_alphanumeric())
}

/// Extract named entities, excluding sentence-initial capitals.
/// Consecutive capitalized words merge into one entity ("New York Times").
/// Deduplicated, first-seen order preserved.
pub fn extract(text: &str) -> Vec<String> {
    let mut entities: Vec<String> = Vec::new();
    let mut seen = std::collections::HashSet::new();

    for sentence in split_sentences(text) {
        let words: Vec<&str> = sentence.split_whitespace().collect();
        let mut run: Vec<&str> = Vec::new();

        for (i, raw) in words.iter().enumerate() {
            let word = trim_word(raw);
            // Sentence-initial capitals are ambiguous; skip position 0
            let candidate = i > 0
                && word.len() > 1
                && is_capitalized(word)
                && !crate::nlp::keywords::is_stop_word(&word.to_lowercase());

            if candidate {
                run.push(word);
            } else {
                flush_run(&mut run, &mut entities, &mut seen);
            }
        }
        flush_run(&mut run, &mut entities, &mut seen);
    }

    entities
}

fn flush_run(
    run: &mut Vec<&str>,
    entities: &mut Vec<String>,
    seen: &mut std::collections::HashSet<String>,
) {
    if run.is_empty() {
        return;
    }
    let entity = run.join(" ");
    if seen.insert(entity.clone()) {
        entities.push(entity);
    }
    run.clear();
}
