use crate::builder::IndexBuilder;
use crate::config::Config;
use crate::document::Document;
use crate::error::{io_error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Position of a document in insertion order.
pub type DocId = u32;

/// Every indexed document plus corpus-wide document frequencies.
///
/// The registry does no locking. Indexing takes `&mut self` and queries take
/// `&self`; callers sharing one instance across threads coordinate themselves.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Registry {
    docs: Vec<Document>, // insertion order, used to break ranking ties
    doc_ids: HashMap<PathBuf, DocId>,
    /// term -> (documents containing term) / (documents)
    global_term_frequency: HashMap<String, f64>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Documents in insertion order.
    pub fn docs(&self) -> &[Document] {
        &self.docs
    }

    pub fn get(&self, path: &Path) -> Option<&Document> {
        self.doc_ids.get(path).map(|&id| &self.docs[id as usize])
    }

    pub fn global_term_frequency(&self) -> &HashMap<String, f64> {
        &self.global_term_frequency
    }

    pub fn document_frequency(&self, term: &str) -> Option<f64> {
        self.global_term_frequency.get(term).copied()
    }

    /// True when `path` was never indexed or its file changed after it was.
    pub fn needs_reindexing(&self, path: &Path) -> Result<bool> {
        let Some(doc) = self.get(path) else {
            return Ok(true);
        };
        let modified = fs::metadata(path)
            .and_then(|m| m.modified())
            .map_err(|e| io_error(path, e))?;
        Ok(modified > doc.last_modified)
    }

    /// Index `dir` with a default-configured [`IndexBuilder`].
    pub fn add_documents_from_directory(&mut self, dir: &Path) -> Result<()> {
        IndexBuilder::new(&Config::default()).add_documents_from_directory(self, dir)?;
        Ok(())
    }

    /// Insert `doc`, replacing a previous document with the same path in place.
    pub(crate) fn upsert(&mut self, doc: Document) {
        match self.doc_ids.get(&doc.path) {
            Some(&id) => self.docs[id as usize] = doc,
            None => {
                let id = self.docs.len() as DocId;
                self.doc_ids.insert(doc.path.clone(), id);
                self.docs.push(doc);
            }
        }
    }

    /// Rebuild document frequencies from scratch over all held documents.
    pub(crate) fn recompute_global_term_frequency(&mut self) {
        let mut containing: HashMap<&str, usize> = HashMap::new();
        for doc in &self.docs {
            for term in doc.term_frequency.keys() {
                *containing.entry(term.as_str()).or_insert(0) += 1;
            }
        }
        let total = self.docs.len() as f64;
        self.global_term_frequency = containing
            .into_iter()
            .map(|(term, n)| (term.to_string(), n as f64 / total))
            .collect();
    }

    /// Structural checks run on a freshly decoded registry.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.doc_ids.len() != self.docs.len() {
            return Err(format!(
                "{} documents but {} path entries",
                self.docs.len(),
                self.doc_ids.len()
            ));
        }
        for (i, doc) in self.docs.iter().enumerate() {
            if self.doc_ids.get(&doc.path) != Some(&(i as DocId)) {
                return Err(format!("path entry mismatch for {}", doc.path.display()));
            }
            if doc.term_frequency.len() > doc.term_count {
                return Err(format!(
                    "{} has {} distinct terms but {} tokens",
                    doc.path.display(),
                    doc.term_frequency.len(),
                    doc.term_count
                ));
            }
            if doc.term_frequency.values().any(|f| !(*f > 0.0 && *f <= 1.0)) {
                return Err(format!("term frequency out of range in {}", doc.path.display()));
            }
        }
        if self.docs.is_empty() && !self.global_term_frequency.is_empty() {
            return Err("document frequencies present without documents".into());
        }
        if self.global_term_frequency.values().any(|f| !(*f > 0.0 && *f <= 1.0)) {
            return Err("document frequency out of range".into());
        }
        Ok(())
    }
}
