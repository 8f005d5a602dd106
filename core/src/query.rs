use crate::document::Document;
use crate::index::Registry;
use crate::tokenizer::tokenize_query;
use serde::Serialize;
use std::cmp::Ordering;
use std::time::Instant;

/// Ranked answer to one search.
#[derive(Debug, Clone, Serialize)]
pub struct QueryResult {
    pub original_query: String,
    pub seconds_elapsed: f64,
    pub results: Vec<Document>,
}

impl QueryResult {
    pub fn results_count(&self) -> usize {
        self.results.len()
    }
}

impl Registry {
    /// Rank every document against `query` with TF-IDF and keep the best `limit`.
    ///
    /// Query terms are matched as typed; no case folding happens here, so only
    /// lowercase query terms can hit indexed terms. Equal ranks keep insertion
    /// order.
    pub fn query(&self, query: &str, limit: usize) -> QueryResult {
        let start = Instant::now();
        if self.is_empty() {
            return QueryResult {
                original_query: query.to_string(),
                seconds_elapsed: start.elapsed().as_secs_f64(),
                results: Vec::new(),
            };
        }

        let weighted: Vec<(&str, f64)> = tokenize_query(query)
            .into_iter()
            .map(|term| (term, self.idf(term)))
            .collect();

        let mut ranking: Vec<(f64, &Document)> = self
            .docs()
            .iter()
            .map(|doc| {
                let rank = weighted
                    .iter()
                    .fold(0.0, |acc, (term, idf)| acc + doc.term_frequency(term) * idf);
                (rank, doc)
            })
            .collect();
        // stable: ties stay in insertion order
        ranking.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

        let results = ranking
            .into_iter()
            .take(limit)
            .map(|(_, doc)| doc.clone())
            .collect();
        QueryResult {
            original_query: query.to_string(),
            seconds_elapsed: start.elapsed().as_secs_f64(),
            results,
        }
    }

    /// `ln(N / m)` where `m` is the term's document-frequency ratio, or 1.0
    /// for terms no document contains. Only meaningful for a non-empty registry.
    pub fn idf(&self, term: &str) -> f64 {
        let m = self.document_frequency(term).unwrap_or(1.0);
        (self.len() as f64 / m).ln()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::IndexBuilder;
    use crate::config::Config;
    use std::fs;
    use tempfile::tempdir;

    fn indexed(files: &[(&str, &str)]) -> (tempfile::TempDir, Registry) {
        let dir = tempdir().unwrap();
        for (name, body) in files {
            fs::write(dir.path().join(name), body).unwrap();
        }
        let mut r = Registry::new();
        IndexBuilder::new(&Config::default())
            .add_documents_from_directory(&mut r, dir.path())
            .unwrap();
        (dir, r)
    }

    #[test]
    fn empty_registry_returns_nothing() {
        let r = Registry::new();
        let res = r.query("anything", 10);
        assert_eq!(res.original_query, "anything");
        assert_eq!(res.results_count(), 0);
    }

    #[test]
    fn idf_of_unseen_term_uses_unit_denominator() {
        let (_dir, r) = indexed(&[("a.txt", "x"), ("b.txt", "y"), ("c.txt", "x y")]);
        assert!((r.idf("zzz") - 3f64.ln()).abs() < 1e-12);
        assert!((r.idf("x") - (3.0f64 / (2.0 / 3.0)).ln()).abs() < 1e-12);
    }

    #[test]
    fn ties_keep_insertion_order_and_limit_applies() {
        let (dir, r) = indexed(&[("a.txt", "one"), ("b.txt", "two"), ("c.txt", "three")]);
        let res = r.query("nothing", 2);
        let paths: Vec<_> = res.results.iter().map(|d| d.path.clone()).collect();
        assert_eq!(paths, vec![dir.path().join("a.txt"), dir.path().join("b.txt")]);
    }

    #[test]
    fn uppercase_query_does_not_match() {
        let (dir, r) = indexed(&[("a.txt", "alpha beta"), ("b.txt", "gamma")]);
        assert_eq!(r.query("gamma", 1).results[0].path, dir.path().join("b.txt"));
        // no case folding on the query side: "GAMMA" scores zero everywhere
        assert_eq!(r.query("GAMMA", 1).results[0].path, dir.path().join("a.txt"));
    }
}
