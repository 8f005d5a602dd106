use crate::error::{io_error, Error, Result};
use crate::extract::ExtractorTable;
use crate::tokenizer::{analyze, TermFrequency};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// One indexed file: where it lives, when it was parsed and its term statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub path: PathBuf,
    pub term_count: usize,
    /// Modification time of the source file, read when it was parsed.
    pub last_modified: SystemTime,
    pub term_frequency: TermFrequency,
}

impl Document {
    /// Extract, tokenize and analyze `path` with the extractor registered for
    /// its extension.
    pub fn from_file(path: &Path, extractors: &ExtractorTable) -> Result<Self> {
        let text = extractors.extract(path)?;
        let analysis = analyze(&text).ok_or_else(|| Error::EmptyDocument(path.to_path_buf()))?;
        let last_modified = fs::metadata(path)
            .and_then(|m| m.modified())
            .map_err(|e| io_error(path, e))?;

        Ok(Self {
            path: path.to_path_buf(),
            term_count: analysis.term_count,
            last_modified,
            term_frequency: analysis.term_frequency,
        })
    }

    pub fn term_frequency(&self, term: &str) -> f64 {
        self.term_frequency.get(term).copied().unwrap_or(0.0)
    }

    pub fn contains_term(&self, term: &str) -> bool {
        self.term_frequency.contains_key(term)
    }
}
