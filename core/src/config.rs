//! Process-wide defaults, collected into an explicit [`Config`] that callers
//! build once at startup and hand to the registry, indexer and server.

use std::path::PathBuf;

/// Default interface the search server binds to.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default port of the search server.
pub const DEFAULT_PORT: u16 = 2137;

/// Default location of the persisted registry snapshot.
pub const DEFAULT_DATAFILE: &str = "./registry.bin";

/// Number of results rendered by the web front-end.
pub const DEFAULT_RESULT_LIMIT: usize = 20;

/// Upper bound for a caller-supplied result limit on the JSON API.
pub const MAX_QUERY_LIMIT: usize = 100;

/// Log filter applied when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub datafile: PathBuf,
    /// Size of the extraction worker pool used per indexing batch.
    pub workers: usize,
    pub result_limit: usize,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            datafile: PathBuf::from(DEFAULT_DATAFILE),
            workers: num_cpus::get(),
            result_limit: DEFAULT_RESULT_LIMIT,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }
}
