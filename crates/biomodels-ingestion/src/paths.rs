//! Curated model discovery.

use std::path::{Path, PathBuf};

use biomodels_common::error::{BioModelsError, Result};

/// Default location of the curated model directory.
pub const DEFAULT_CURATED_DIR: &str = "./curated";

/// Every regular file in the curated directory `dir`, sorted by path.
pub fn model_paths(dir: impl AsRef<Path>) -> Result<impl Iterator<Item = PathBuf>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(BioModelsError::Config(format!(
            "'{}' is not a valid directory path.",
            dir.display()
        )));
    }

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths.into_iter())
}
