use std::env as stdenv;
use std::fmt;
use std::path::{Path, PathBuf};

use clean_path::Clean;
use tracing::warn;

use crate::fs::{FileSystem, OsFileSystem};

/// Session state shared by all commands of one interpreter.
///
/// The environment contains:
/// - `current_dir`: the working directory that relative paths are resolved against.
/// - `fs`: the filesystem the commands operate on.
///
/// The process working directory is read once by [`Environment::new`] and never
/// changed afterwards; `cd` only updates `current_dir`.
pub struct Environment {
    current_dir: PathBuf,
    fs: Box<dyn FileSystem>,
}

impl Environment {
    /// Capture the process working directory and use the OS filesystem.
    pub fn new() -> Self {
        let current_dir = stdenv::current_dir().unwrap_or_else(|err| {
            warn!(error = %err, "cannot read process working directory, starting at /");
            PathBuf::from("/")
        });
        Self::with_fs(current_dir, OsFileSystem)
    }

    /// Start in `current_dir` on top of a custom filesystem.
    pub fn with_fs(current_dir: impl Into<PathBuf>, fs: impl FileSystem + 'static) -> Self {
        let current_dir: PathBuf = current_dir.into();
        Self {
            current_dir: current_dir.clean(),
            fs: Box::new(fs),
        }
    }

    /// The directory relative arguments are resolved against.
    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    /// Switch the working directory. Relative paths are taken from the current one
    /// and the result is normalized lexically; callers check the target first.
    pub fn set_current_dir(&mut self, path: impl AsRef<Path>) {
        self.current_dir = self.resolve(path).clean();
    }

    /// Absolute form of `path`, left as typed otherwise.
    ///
    /// `..` and trailing slashes are kept so the filesystem resolves them: `nope/..`
    /// does not exist when `nope` does not, and `file/` is not a file.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        self.current_dir.join(path)
    }

    /// Read access to the filesystem.
    pub fn fs(&self) -> &dyn FileSystem {
        self.fs.as_ref()
    }

    /// Write access to the filesystem.
    pub fn fs_mut(&mut self) -> &mut dyn FileSystem {
        self.fs.as_mut()
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("current_dir", &self.current_dir)
            .finish_non_exhaustive()
    }
}
