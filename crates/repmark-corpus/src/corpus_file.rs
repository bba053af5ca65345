//! Corpus file I/O: whole-file reads and atomic commits.

use std::fs;
use std::io::Write;
use std::path::Path;

use repmark_core::Result;
use tracing::{debug, warn};

/// Read the whole corpus into memory.
pub fn read_corpus(path: &Path) -> Result<String> {
    debug!(corpus_path = %path.display(), "Reading corpus");
    Ok(fs::read_to_string(path)?)
}

/// Commit the rewritten corpus atomically.
///
/// The text goes to a sibling temporary file first and is renamed over the
/// original, so the file on disk is always either the old or the new corpus
/// in full. The temporary file is removed if the rename fails.
pub fn commit_corpus(path: &Path, corpus: &str) -> Result<()> {
    let temp_path = path.with_extension("tmp");
    debug!(
        corpus_path = %path.display(),
        temp_path = %temp_path.display(),
        size = corpus.len(),
        "Committing corpus"
    );

    let mut file = fs::File::create(&temp_path)?;
    file.write_all(corpus.as_bytes())?;
    file.sync_all()?;
    drop(file);

    if let Err(e) = fs::rename(&temp_path, path) {
        warn!(
            from = %temp_path.display(),
            to = %path.display(),
            error = %e,
            "Commit rename failed"
        );
        let _ = fs::remove_file(&temp_path);
        return Err(e.into());
    }
    Ok(())
}
