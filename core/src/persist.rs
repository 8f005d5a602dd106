//! Single-file registry snapshots.
//!
//! The whole [`Registry`] is written as one bincode blob. There is no schema
//! version and no temp-file rename: each dump truncates and rewrites the file,
//! so a crash mid-write can leave a file that later fails to load.

use crate::error::{Error, Result};
use crate::index::Registry;
use bincode::Options;
use std::fs::{create_dir_all, File};
use std::io::{Read, Write};
use std::path::Path;
use std::time::Instant;

/// Fixed-width little-endian encoding; a snapshot must be consumed exactly,
/// so bytes after the registry make the file corrupt.
fn codec() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .reject_trailing_bytes()
}

pub fn dump(registry: &Registry, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        create_dir_all(parent)?;
    }
    let bytes = codec().serialize(registry).map_err(|e| Error::Encode(e.to_string()))?;
    let mut f = File::create(path)?;
    f.write_all(&bytes)?;
    tracing::info!(path = %path.display(), docs = registry.len(), bytes = bytes.len(), "registry saved");
    Ok(())
}

/// Load a snapshot written by [`dump`]. A missing file yields an empty registry.
pub fn load(path: &Path) -> Result<Registry> {
    let start = Instant::now();
    if !path.exists() {
        tracing::warn!(path = %path.display(), "registry file does not exist, creating new registry");
        return Ok(Registry::new());
    }

    let mut f = File::open(path)?;
    let mut buf = Vec::new();
    f.read_to_end(&mut buf)?;
    let corrupt = |reason: String| Error::CorruptRegistry {
        path: path.to_path_buf(),
        reason,
    };
    let registry: Registry = codec().deserialize(&buf).map_err(|e| corrupt(e.to_string()))?;
    registry.validate().map_err(corrupt)?;

    tracing::debug!(
        path = %path.display(),
        docs = registry.len(),
        seconds = start.elapsed().as_secs_f64(),
        "registry loaded"
    );
    Ok(registry)
}
