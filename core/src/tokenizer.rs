use std::collections::HashMap;

/// Term -> share of the document's tokens.
pub type TermFrequency = HashMap<String, f64>;

/// Tokens dropped by both document and query tokenization.
const IGNORED_TOKENS: [&str; 3] = ["", ".", ","];

#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub term_count: usize,
    pub term_frequency: TermFrequency,
}

fn keep(token: &str) -> bool {
    !IGNORED_TOKENS.contains(&token)
}

/// Split extracted text into lowercase terms and compute their frequencies.
///
/// Newlines and tabs count as spaces; the text is then split on every single
/// space, so runs of spaces produce empty tokens which are dropped together
/// with bare "." and "," tokens. Returns `None` when no token survives, since
/// frequencies over zero tokens are undefined; callers must treat that as a
/// failure of the document.
pub fn analyze(text: &str) -> Option<Analysis> {
    let normalized = text.replace(['\n', '\t'], " ");
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut term_count = 0usize;
    for token in normalized.split(' ').filter(|t| keep(t)) {
        *counts.entry(token.to_lowercase()).or_insert(0) += 1;
        term_count += 1;
    }
    if term_count == 0 {
        return None;
    }

    let total = term_count as f64;
    let term_frequency = counts
        .into_iter()
        .map(|(term, count)| (term, count as f64 / total))
        .collect();
    Some(Analysis { term_count, term_frequency })
}

/// Split a search query into terms. Query terms keep their case.
pub fn tokenize_query(query: &str) -> Vec<&str> {
    query.split(' ').filter(|t| keep(t)).collect()
}
