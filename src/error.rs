use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The command line could not be matched to an action.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UsageError {
    #[error("{0}: command not found")]
    CommandNotFound(String),

    #[error("{command}: command takes {arity} {}", argument_noun(.arity))]
    ArgumentCount { command: String, arity: usize },
}

fn argument_noun(arity: &usize) -> &'static str {
    if *arity == 1 { "argument" } else { "arguments" }
}

/// A check performed by an action before it touches the filesystem failed.
///
/// Paths are shown the way the user typed them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PreconditionError {
    #[error("no such directory: \"{0}\"")]
    NoSuchDirectory(String),

    #[error("not a directory: \"{0}\"")]
    NotADirectory(String),

    #[error("no such file: \"{0}\"")]
    NoSuchFile(String),

    #[error("is a directory: \"{0}\"")]
    IsADirectory(String),

    #[error("file exists: \"{0}\"")]
    FileExists(String),

    /// Carries the resolved parent, not the argument.
    #[error("no parent directory: \"{}\"", .0.display())]
    NoParentDirectory(PathBuf),

    #[error("directory not empty: \"{0}\"")]
    DirectoryNotEmpty(String),
}

/// Anything an action can fail with.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    /// The filesystem refused the real operation.
    #[error("cannot {operation} \"{path}\": {source}")]
    Collaborator {
        operation: &'static str,
        path: String,
        source: io::Error,
    },

    #[error("cannot write output: {0}")]
    Output(#[from] io::Error),
}

/// Attach the failed operation and its path to a filesystem error.
pub(crate) trait CollaboratorContext<T> {
    fn collaborator(self, operation: &'static str, path: &str) -> Result<T, ActionError>;
}

impl<T> CollaboratorContext<T> for io::Result<T> {
    fn collaborator(self, operation: &'static str, path: &str) -> Result<T, ActionError> {
        self.map_err(|source| ActionError::Collaborator {
            operation,
            path: path.to_owned(),
            source,
        })
    }
}

/// Failure of a single command line. Displayed after the project name prefix.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error(transparent)]
    Usage(#[from] UsageError),

    #[error("{command}: an error occurred: {source}")]
    Action {
        command: String,
        source: ActionError,
    },
}

/// A custom command catalog breaks one of the registry rules.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("invalid command name: {0:?}")]
    InvalidName(String),

    #[error("duplicate command: {0}")]
    Duplicate(String),

    #[error("registry needs exactly one `{0}` command taking no arguments")]
    MissingExit(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argument_count_pluralization() {
        let message = |arity| {
            UsageError::ArgumentCount {
                command: "cmd".into(),
                arity,
            }
            .to_string()
        };
        assert_eq!(message(0), "cmd: command takes 0 arguments");
        assert_eq!(message(1), "cmd: command takes 1 argument");
        assert_eq!(message(2), "cmd: command takes 2 arguments");
    }

    #[test]
    fn test_action_error_message_wraps_cause() {
        let err = ShellError::Action {
            command: "rm".into(),
            source: PreconditionError::NoSuchFile("a.txt".into()).into(),
        };
        assert_eq!(
            err.to_string(),
            "rm: an error occurred: no such file: \"a.txt\""
        );
    }

    #[test]
    fn test_collaborator_context_names_operation() {
        let res: io::Result<()> = Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        let err = res.collaborator("remove", "x").unwrap_err();
        assert_eq!(err.to_string(), "cannot remove \"x\": denied");
    }
}
