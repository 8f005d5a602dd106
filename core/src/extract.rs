//! Text extraction per file format.
//!
//! Extractors are looked up by format tag (the lowercase file extension) in an
//! [`ExtractorTable`]; supporting a new format means registering another
//! [`TextExtractor`], not touching the indexing code.

use crate::error::{io_error, Error, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

/// Turns one file into plain text. Implementations run on indexing workers.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, path: &Path) -> Result<String>;
}

/// Reads the file as UTF-8 text.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|e| io_error(path, e))
    }
}

/// Streams an XML document and concatenates the content of every text and
/// CDATA node, each followed by a single space. Markup is discarded.
/// A document must have a root element and close every element it opens.
#[derive(Debug, Default, Clone, Copy)]
pub struct XmlExtractor;

impl TextExtractor for XmlExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        let file = File::open(path).map_err(|e| io_error(path, e))?;
        let mut reader = Reader::from_reader(BufReader::new(file));
        let xml_err = |e: quick_xml::Error| Error::Xml {
            path: path.to_path_buf(),
            reason: e.to_string(),
        };

        let mut out = String::new();
        let mut buf = Vec::new();
        let mut depth = 0usize;
        let mut saw_root = false;
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(_)) => {
                    depth += 1;
                    saw_root = true;
                }
                Ok(Event::End(_)) => depth = depth.saturating_sub(1),
                Ok(Event::Empty(_)) => saw_root = true,
                Ok(Event::Text(e)) => {
                    out.push_str(&e.unescape().map_err(xml_err)?);
                    out.push(' ');
                }
                Ok(Event::CData(e)) => {
                    out.push_str(&reader.decoder().decode(&e).map_err(xml_err)?);
                    out.push(' ');
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => return Err(xml_err(e)),
            }
            buf.clear();
        }

        let unfinished = |reason: &str| Error::Xml {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        };
        if !saw_root {
            return Err(unfinished("no element found"));
        }
        if depth != 0 {
            return Err(unfinished("unclosed element at end of file"));
        }
        Ok(out)
    }
}

/// Capability table mapping format tags to extractors.
#[derive(Clone)]
pub struct ExtractorTable {
    extractors: HashMap<String, Arc<dyn TextExtractor>>,
}

impl Default for ExtractorTable {
    fn default() -> Self {
        let mut table = Self::empty();
        table.register("txt", PlainTextExtractor);
        table.register("xml", XmlExtractor);
        table
    }
}

impl std::fmt::Debug for ExtractorTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut tags: Vec<&str> = self.extractors.keys().map(String::as_str).collect();
        tags.sort_unstable();
        f.debug_struct("ExtractorTable").field("formats", &tags).finish()
    }
}

impl ExtractorTable {
    pub fn empty() -> Self {
        Self { extractors: HashMap::new() }
    }

    /// Register `extractor` for files whose extension matches `tag`
    /// (case-insensitive, without the leading dot). Replaces any previous entry.
    pub fn register<E: TextExtractor + 'static>(&mut self, tag: &str, extractor: E) {
        self.extractors
            .insert(tag.to_lowercase(), Arc::new(extractor));
    }

    pub fn get(&self, tag: &str) -> Option<&dyn TextExtractor> {
        self.extractors.get(&tag.to_lowercase()).map(|e| e.as_ref())
    }

    pub fn supports(&self, tag: &str) -> bool {
        self.extractors.contains_key(&tag.to_lowercase())
    }

    /// Pick the extractor for `path` by its extension and run it.
    pub fn extract(&self, path: &Path) -> Result<String> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        let extractor = self.get(&extension).ok_or_else(|| Error::UnsupportedFormat {
            extension: format!(".{extension}"),
            path: path.to_path_buf(),
        })?;
        extractor.extract(path)
    }
}
