//! Checks run by the built-in commands before they touch the filesystem.
//!
//! Each helper resolves the argument against the session working directory and
//! returns the absolute path on success.

use std::path::PathBuf;

use crate::env::Environment;
use crate::error::PreconditionError;

pub(crate) fn assure_directory_exists(
    env: &Environment,
    path: &str,
) -> Result<PathBuf, PreconditionError> {
    let resolved = env.resolve(path);
    if !env.fs().exists(&resolved) {
        return Err(PreconditionError::NoSuchDirectory(path.to_owned()));
    }
    if !env.fs().is_dir(&resolved) {
        return Err(PreconditionError::NotADirectory(path.to_owned()));
    }
    Ok(resolved)
}

pub(crate) fn assure_file_exists(
    env: &Environment,
    path: &str,
) -> Result<PathBuf, PreconditionError> {
    let resolved = env.resolve(path);
    if !env.fs().exists(&resolved) {
        return Err(PreconditionError::NoSuchFile(path.to_owned()));
    }
    if env.fs().is_dir(&resolved) {
        return Err(PreconditionError::IsADirectory(path.to_owned()));
    }
    Ok(resolved)
}

/// Nothing may exist at `path` yet, but its parent directory must.
pub(crate) fn assure_can_create(
    env: &Environment,
    path: &str,
) -> Result<PathBuf, PreconditionError> {
    let resolved = env.resolve(path);
    if env.fs().exists(&resolved) {
        return Err(PreconditionError::FileExists(path.to_owned()));
    }
    match resolved.parent() {
        Some(parent) if !env.fs().exists(parent) => {
            Err(PreconditionError::NoParentDirectory(parent.to_path_buf()))
        }
        _ => Ok(resolved),
    }
}
