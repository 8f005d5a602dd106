//! Local document registry: term statistics for plain-text and XML files
//! and TF-IDF ranked keyword search over them.

pub mod builder;
pub mod config;
pub mod document;
pub mod error;
pub mod extract;
pub mod index;
pub mod persist;
pub mod query;
pub mod tokenizer;

pub use builder::{BatchReport, IndexBuilder};
pub use config::Config;
pub use document::Document;
pub use error::{Error, Result};
pub use extract::{ExtractorTable, TextExtractor};
pub use index::{DocId, Registry};
pub use query::QueryResult;
pub use tokenizer::{analyze, tokenize_query, Analysis, TermFrequency};
