use crate::config::Config;
use crate::document::Document;
use crate::error::{Error, Result};
use crate::extract::ExtractorTable;
use crate::index::Registry;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use walkdir::WalkDir;

/// Outcome of one indexing batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchReport {
    /// Regular files found directly in the directory.
    pub scanned: usize,
    /// Files that were new or modified and got parsed.
    pub reindexed: usize,
    pub elapsed: Duration,
}

/// Scans directories and merges new or changed files into a [`Registry`].
#[derive(Debug, Clone)]
pub struct IndexBuilder {
    extractors: ExtractorTable,
    workers: usize,
}

impl IndexBuilder {
    pub fn new(config: &Config) -> Self {
        Self {
            extractors: ExtractorTable::default(),
            workers: config.workers.max(1),
        }
    }

    pub fn with_extractors(mut self, extractors: ExtractorTable) -> Self {
        self.extractors = extractors;
        self
    }

    pub fn extractors_mut(&mut self) -> &mut ExtractorTable {
        &mut self.extractors
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Parse every new or modified regular file directly inside `dir` and
    /// merge the results into `registry`.
    ///
    /// Parsing runs on a pool of `workers` threads. The batch is all or
    /// nothing: if any file fails, the first failure in scan order is
    /// returned as [`Error::BatchParse`] and the registry is left untouched.
    /// Document frequencies are recomputed over the whole registry afterwards.
    pub fn add_documents_from_directory(&self, registry: &mut Registry, dir: &Path) -> Result<BatchReport> {
        let start = Instant::now();
        if !dir.is_dir() {
            return Err(Error::SourceNotFound(dir.to_path_buf()));
        }

        let candidates = scan_directory(dir);
        let mut to_reindex = Vec::new();
        for path in &candidates {
            if registry.needs_reindexing(path)? {
                to_reindex.push(path.clone());
            }
        }

        let documents = self.parse_batch(&to_reindex)?;
        for doc in documents {
            registry.upsert(doc);
        }
        registry.recompute_global_term_frequency();

        let report = BatchReport {
            scanned: candidates.len(),
            reindexed: to_reindex.len(),
            elapsed: start.elapsed(),
        };
        tracing::debug!(
            dir = %dir.display(),
            scanned = report.scanned,
            reindexed = report.reindexed,
            seconds = report.elapsed.as_secs_f64(),
            "document files loaded"
        );
        Ok(report)
    }

    /// Fan out one parse per file, then fan in every outcome before deciding.
    fn parse_batch(&self, paths: &[PathBuf]) -> Result<Vec<Document>> {
        if paths.is_empty() {
            return Ok(Vec::new());
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .build()?;
        let outcomes: Vec<Result<Document>> = pool.install(|| {
            paths
                .par_iter()
                .map(|path| Document::from_file(path, &self.extractors))
                .collect()
        });

        let mut documents = Vec::with_capacity(outcomes.len());
        for (path, outcome) in paths.iter().zip(outcomes) {
            match outcome {
                Ok(doc) => documents.push(doc),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "aborting indexing batch");
                    return Err(Error::BatchParse {
                        path: path.clone(),
                        source: Box::new(e),
                    });
                }
            }
        }
        Ok(documents)
    }
}

/// Regular files directly inside `dir`, sorted by name. Symlinks are followed.
fn scan_directory(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable directory entry");
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .collect()
}
