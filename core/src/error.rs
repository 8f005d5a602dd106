use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot parse unknown document format \"{extension}\" (file: {})", .path.display())]
    UnsupportedFormat { extension: String, path: PathBuf },

    #[error("source does not exist: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// Text produced no terms, so term frequencies cannot be computed.
    #[error("document {} contains no terms", .0.display())]
    EmptyDocument(PathBuf),

    #[error("registry file {} is corrupt: {reason}", .path.display())]
    CorruptRegistry { path: PathBuf, reason: String },

    /// One file of an indexing batch failed; nothing from the batch was merged.
    #[error("failed to index {}: {source}", .path.display())]
    BatchParse {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },

    #[error("malformed XML in {}: {reason}", .path.display())]
    Xml { path: PathBuf, reason: String },

    #[error("failed to encode registry: {0}")]
    Encode(String),

    #[error("failed to start indexing workers: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Maps a filesystem error on `path`, turning "not found" into `SourceNotFound`.
pub(crate) fn io_error(path: &Path, err: io::Error) -> Error {
    if err.kind() == io::ErrorKind::NotFound {
        Error::SourceNotFound(path.to_path_buf())
    } else {
        Error::Io(err)
    }
}
