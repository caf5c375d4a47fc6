use std::io::{self, IsTerminal, Write};

use rustyline::DefaultEditor;
use tracing::{debug, error, trace};

use crate::EXIT_COMMAND;
use crate::command::{Context, Registry};
use crate::config::ShellConfig;
use crate::env::Environment;
use crate::error::{ShellError, UsageError};
use crate::io_adapters::{LineSource, ScriptedInput};
use crate::lexer;

/// What happened to one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The line had no words.
    Blank,
    /// The command ran and its action succeeded.
    Success { command: String },
    /// An error message was printed instead.
    Failure { command: String },
}

impl Outcome {
    /// Whether this outcome ends the interactive loop.
    pub fn is_exit(&self) -> bool {
        matches!(self, Outcome::Success { command } if command == EXIT_COMMAND)
    }
}

/// A minimal shell-like interpreter over a fixed catalog of commands.
///
/// The interpreter owns a [`Registry`] of commands and the session [`Environment`]
/// they run in. See [`Default`] for the built-in catalog.
///
/// Example
/// ```
/// use myshell::{Interpreter, Outcome};
/// let mut sh = Interpreter::default();
/// let mut out = Vec::new();
/// let outcome = sh.run("cd one two", &mut out);
/// assert!(matches!(outcome, Outcome::Failure { .. }));
/// assert_eq!(String::from_utf8(out).unwrap(), "MyShell: cd: command takes 1 argument\n");
/// ```
#[derive(Debug)]
pub struct Interpreter {
    config: ShellConfig,
    registry: Registry,
    env: Environment,
}

impl Interpreter {
    /// Interpreter over a custom catalog, configuration and starting environment.
    pub fn new(config: ShellConfig, registry: Registry, env: Environment) -> Self {
        Self {
            config,
            registry,
            env,
        }
    }

    /// Banner and prompt settings.
    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    /// The commands this interpreter dispatches to.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Session state, including the current working directory.
    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Interpret one line, writing command output and error messages to `out`.
    ///
    /// Never fails: any error is printed as a single line prefixed with the project
    /// name and reported as [`Outcome::Failure`].
    pub fn run(&mut self, line: &str, out: &mut dyn Write) -> Outcome {
        let mut words = lexer::tokens(line);
        let Some(name) = words.next() else {
            return Outcome::Blank;
        };
        let args: Vec<String> = words.collect();
        trace!(%name, ?args, "tokenized line");

        match self.dispatch(&name, &args, out) {
            Ok(()) => Outcome::Success { command: name },
            Err(err) => {
                debug!(%name, error = ?err, "command failed");
                if let Err(write_err) = writeln!(out, "{}: {err}", self.config.project_name) {
                    error!(%name, error = %write_err, "cannot report command failure");
                }
                Outcome::Failure { command: name }
            }
        }
    }

    fn dispatch(
        &mut self,
        name: &str,
        args: &[String],
        out: &mut dyn Write,
    ) -> Result<(), ShellError> {
        let command = self
            .registry
            .resolve(name)
            .ok_or_else(|| UsageError::CommandNotFound(name.to_owned()))?;
        debug!(command = command.name(), arity = command.arity(), "dispatching");

        let mut ctx = Context {
            env: &mut self.env,
            registry: &self.registry,
            out,
        };
        command.run(args, &mut ctx)
    }

    /// Print the banner and interpret lines from `source` until `exit` succeeds or
    /// the input ends.
    pub fn repl_with(
        &mut self,
        source: &mut dyn LineSource,
        out: &mut dyn Write,
    ) -> anyhow::Result<()> {
        out.write_all(self.config.banner().as_bytes())?;
        out.flush()?;

        while let Some(line) = source.read_line(&self.config.prompt)? {
            let outcome = self.run(line.trim(), out);
            out.flush()?;
            if outcome.is_exit() {
                return Ok(());
            }
        }
        debug!("input exhausted");
        Ok(())
    }

    /// Loop over standard input.
    ///
    /// A terminal gets the line editor with history. Piped input is read line by
    /// line, with the prompt still printed before each line.
    pub fn repl(&mut self) -> anyhow::Result<()> {
        let stdin = io::stdin();
        if stdin.is_terminal() {
            let mut editor = DefaultEditor::new()?;
            self.repl_with(&mut editor, &mut io::stdout())
        } else {
            debug!("stdin is not a terminal, reading plain lines");
            let mut source = ScriptedInput::new(stdin.lock(), io::stdout());
            self.repl_with(&mut source, &mut io::stdout())
        }
    }
}

impl Default for Interpreter {
    /// The built-in commands, run from the process working directory.
    fn default() -> Self {
        Self::new(ShellConfig::default(), Registry::builtin(), Environment::new())
    }
}
