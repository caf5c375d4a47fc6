//! A tiny interactive shell with a fixed set of filesystem commands.
//!
//! Every input line is split into words by [`lexer::tokenize`], the first word is
//! looked up in a [`Registry`] of [`Command`]s and the rest are handed to the
//! command's action after an exact argument-count check. Whatever goes wrong inside
//! an action is reported as a single line of text and the shell keeps running.
//!
//! The main entry point is [`Interpreter`]. The public modules [`command`], [`env`]
//! and [`fs`] expose the types needed to build a custom catalog of commands or to
//! run the built-in ones against another filesystem implementation.

mod builtin;
pub mod command;
pub mod config;
pub mod env;
pub mod error;
pub mod fs;
mod interpreter;
pub mod io_adapters;
pub mod lexer;
mod precondition;

pub use command::{Action, Command, Context, Registry};
pub use config::ShellConfig;
pub use env::Environment;
pub use error::{ActionError, PreconditionError, RegistryError, ShellError, UsageError};

/// Just a convenient re-export of the interactive command runner.
///
/// See [`Interpreter`] for the high-level API and examples.
pub use interpreter::{Interpreter, Outcome};

/// Name of the command whose successful run ends the interactive loop.
pub const EXIT_COMMAND: &str = "exit";
