use std::collections::HashMap;
use std::fmt;
use std::io::Write;

use crate::EXIT_COMMAND;
use crate::builtin;
use crate::env::Environment;
use crate::error::{ActionError, RegistryError, ShellError, UsageError};

/// What an action returns.
pub type ActionResult = Result<(), ActionError>;

/// Everything an action may read or change while it runs.
pub struct Context<'a> {
    /// Session state, including the filesystem.
    pub env: &'a mut Environment,
    /// The catalog the running command was resolved from.
    pub registry: &'a Registry,
    /// Where the command prints its output.
    pub out: &'a mut dyn Write,
}

#[derive(Clone, Copy)]
enum Handler {
    Nullary(fn(&mut Context<'_>) -> ActionResult),
    Unary(fn(&mut Context<'_>, &str) -> ActionResult),
    Binary(fn(&mut Context<'_>, &str, &str) -> ActionResult),
}

/// The behavior bound to a command name, together with its own description.
///
/// The number of arguments is fixed by the shape of the handler, so a command can
/// never declare an arity that its action does not accept.
#[derive(Clone, Copy)]
pub struct Action {
    handler: Handler,
    description: &'static str,
}

impl Action {
    /// Action that takes no arguments.
    pub const fn nullary(
        handler: fn(&mut Context<'_>) -> ActionResult,
        description: &'static str,
    ) -> Self {
        Self {
            handler: Handler::Nullary(handler),
            description,
        }
    }

    /// Action that takes exactly one argument.
    pub const fn unary(
        handler: fn(&mut Context<'_>, &str) -> ActionResult,
        description: &'static str,
    ) -> Self {
        Self {
            handler: Handler::Unary(handler),
            description,
        }
    }

    /// Action that takes exactly two arguments.
    pub const fn binary(
        handler: fn(&mut Context<'_>, &str, &str) -> ActionResult,
        description: &'static str,
    ) -> Self {
        Self {
            handler: Handler::Binary(handler),
            description,
        }
    }

    /// Exact number of arguments the action takes.
    pub fn arity(&self) -> usize {
        match self.handler {
            Handler::Nullary(_) => 0,
            Handler::Unary(_) => 1,
            Handler::Binary(_) => 2,
        }
    }

    /// One-line help text.
    pub fn description(&self) -> &'static str {
        self.description
    }

    /// Call the handler if `args` has the right length, `None` otherwise.
    fn invoke(&self, ctx: &mut Context<'_>, args: &[String]) -> Option<ActionResult> {
        match (self.handler, args) {
            (Handler::Nullary(f), []) => Some(f(ctx)),
            (Handler::Unary(f), [arg]) => Some(f(ctx, arg)),
            (Handler::Binary(f), [first, second]) => Some(f(ctx, first, second)),
            _ => None,
        }
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("arity", &self.arity())
            .field("description", &self.description)
            .finish()
    }
}

/// A named, invocable operation.
#[derive(Debug, Clone)]
pub struct Command {
    name: String,
    action: Action,
    description: Option<String>,
}

impl Command {
    /// Command named `name`, described by its action.
    pub fn new(name: impl Into<String>, action: Action) -> Self {
        Self {
            name: name.into(),
            action,
            description: None,
        }
    }

    /// Override the description supplied by the action.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Word that invokes the command.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of arguments the command takes.
    pub fn arity(&self) -> usize {
        self.action.arity()
    }

    /// The override if one was set, the action's description otherwise.
    pub fn description(&self) -> &str {
        self.description
            .as_deref()
            .unwrap_or_else(|| self.action.description())
    }

    /// Check the argument count and run the action.
    ///
    /// The action is not called at all when the count is wrong.
    pub fn run(&self, args: &[String], ctx: &mut Context<'_>) -> Result<(), ShellError> {
        let result = self.action.invoke(ctx, args).ok_or_else(|| {
            UsageError::ArgumentCount {
                command: self.name.clone(),
                arity: self.arity(),
            }
        })?;
        result.map_err(|source| ShellError::Action {
            command: self.name.clone(),
            source,
        })
    }
}

/// Ordered catalog of commands, keyed by name.
#[derive(Debug, Clone)]
pub struct Registry {
    commands: Vec<Command>,
    index: HashMap<String, usize>,
}

impl Registry {
    /// Build a registry from a custom list of commands.
    ///
    /// Names must be non-empty, free of whitespace and unique, and the list must
    /// contain an `exit` command that takes no arguments.
    pub fn new(commands: Vec<Command>) -> Result<Self, RegistryError> {
        let mut index = HashMap::with_capacity(commands.len());
        for (i, command) in commands.iter().enumerate() {
            let name = command.name();
            if name.is_empty() || name.chars().any(char::is_whitespace) {
                return Err(RegistryError::InvalidName(name.to_owned()));
            }
            if index.insert(name.to_owned(), i).is_some() {
                return Err(RegistryError::Duplicate(name.to_owned()));
            }
        }
        let registry = Self { commands, index };
        match registry.resolve(EXIT_COMMAND) {
            Some(exit) if exit.arity() == 0 => Ok(registry),
            _ => Err(RegistryError::MissingExit(EXIT_COMMAND)),
        }
    }

    /// The built-in catalog: `pwd`, `ls`, `cd`, `cp`, `mv`, `rm`, `rmdir`, `mkdir`,
    /// `hw`, `cat`, `help` and `exit`, in that order.
    pub fn builtin() -> Self {
        let commands = builtin::commands();
        let index = commands
            .iter()
            .enumerate()
            .map(|(i, command)| (command.name().to_owned(), i))
            .collect();
        Self { commands, index }
    }

    /// Exact-match lookup.
    pub fn resolve(&self, name: &str) -> Option<&Command> {
        self.index.get(name).map(|&i| &self.commands[i])
    }

    /// Commands in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Always `false` for a registry built by [`Registry::new`], which requires `exit`.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PreconditionError;
    use crate::fs::OsFileSystem;

    fn mark(ctx: &mut Context<'_>) -> ActionResult {
        writeln!(ctx.out, "ran")?;
        Ok(())
    }

    fn echo_one(ctx: &mut Context<'_>, arg: &str) -> ActionResult {
        writeln!(ctx.out, "ran {arg}")?;
        Ok(())
    }

    fn echo_two(ctx: &mut Context<'_>, first: &str, second: &str) -> ActionResult {
        writeln!(ctx.out, "ran {first} {second}")?;
        Ok(())
    }

    fn fail(ctx: &mut Context<'_>, arg: &str) -> ActionResult {
        write!(ctx.out, "partial ")?;
        Err(PreconditionError::NoSuchFile(arg.to_owned()).into())
    }

    fn noop(_ctx: &mut Context<'_>) -> ActionResult {
        Ok(())
    }

    fn exit_command() -> Command {
        Command::new("exit", Action::nullary(noop, "leave"))
    }

    fn run(command: &Command, args: &[&str]) -> (Result<(), ShellError>, String) {
        let registry = Registry::new(vec![exit_command()]).unwrap();
        let mut env = Environment::with_fs("/", OsFileSystem);
        let mut out = Vec::new();
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        let mut ctx = Context {
            env: &mut env,
            registry: &registry,
            out: &mut out,
        };
        let res = command.run(&args, &mut ctx);
        (res, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_arity_follows_handler_shape() {
        assert_eq!(Action::nullary(mark, "").arity(), 0);
        assert_eq!(Action::unary(echo_one, "").arity(), 1);
        assert_eq!(Action::binary(echo_two, "").arity(), 2);
    }

    #[test]
    fn test_exact_arity_invokes_once() {
        let (res, out) = run(&Command::new("m", Action::nullary(mark, "")), &[]);
        assert!(res.is_ok());
        assert_eq!(out, "ran\n");

        let (res, out) = run(&Command::new("o", Action::unary(echo_one, "")), &["x"]);
        assert!(res.is_ok());
        assert_eq!(out, "ran x\n");

        let (res, out) = run(
            &Command::new("t", Action::binary(echo_two, "")),
            &["x", "y"],
        );
        assert!(res.is_ok());
        assert_eq!(out, "ran x y\n");
    }

    #[test]
    fn test_wrong_arity_never_invokes() {
        let commands = [
            Command::new("m", Action::nullary(mark, "")),
            Command::new("o", Action::unary(echo_one, "")),
            Command::new("t", Action::binary(echo_two, "")),
        ];
        for command in &commands {
            for count in 0..4 {
                if count == command.arity() {
                    continue;
                }
                let args = vec!["a"; count];
                let (res, out) = run(command, &args);
                assert!(out.is_empty());
                match res {
                    Err(ShellError::Usage(UsageError::ArgumentCount { command: name, arity })) => {
                        assert_eq!(name, command.name());
                        assert_eq!(arity, command.arity());
                    }
                    other => panic!("unexpected result {other:?}"),
                }
            }
        }
    }

    #[test]
    fn test_action_failure_keeps_partial_output() {
        let (res, out) = run(&Command::new("f", Action::unary(fail, "")), &["gone"]);
        assert_eq!(out, "partial ");
        assert_eq!(
            res.unwrap_err().to_string(),
            "f: an error occurred: no such file: \"gone\""
        );
    }

    #[test]
    fn test_description_falls_back_to_action() {
        let plain = Command::new("m", Action::nullary(mark, "from action"));
        assert_eq!(plain.description(), "from action");

        let custom = plain.with_description("from registry");
        assert_eq!(custom.description(), "from registry");
    }

    #[test]
    fn test_resolve_is_exact() {
        let registry = Registry::builtin();
        assert!(registry.resolve("rmdir").is_some());
        assert!(registry.resolve("rmd").is_none());
        assert!(registry.resolve("RMDIR").is_none());
        assert!(registry.resolve("rmdir ").is_none());
    }

    #[test]
    fn test_builtin_registry_follows_rules() {
        let builtin = Registry::builtin();
        let names: Vec<&str> = builtin.iter().map(Command::name).collect();
        assert_eq!(
            names,
            [
                "pwd", "ls", "cd", "cp", "mv", "rm", "rmdir", "mkdir", "hw", "cat", "help", "exit"
            ]
        );
        let arities: Vec<usize> = builtin.iter().map(Command::arity).collect();
        assert_eq!(arities, [0, 0, 1, 2, 2, 1, 1, 1, 1, 1, 0, 0]);
        assert_eq!(builtin.len(), 12);
        assert!(!builtin.is_empty());

        assert!(Registry::new(builtin.iter().cloned().collect()).is_ok());
    }

    #[test]
    fn test_registry_rejects_bad_catalogs() {
        assert_eq!(
            Registry::new(vec![exit_command(), exit_command()]).unwrap_err(),
            RegistryError::Duplicate("exit".into())
        );
        assert_eq!(
            Registry::new(vec![exit_command(), Command::new("two words", Action::nullary(mark, ""))])
                .unwrap_err(),
            RegistryError::InvalidName("two words".into())
        );
        assert_eq!(
            Registry::new(vec![Command::new("", Action::nullary(mark, ""))]).unwrap_err(),
            RegistryError::InvalidName(String::new())
        );
        assert_eq!(
            Registry::new(vec![Command::new("m", Action::nullary(mark, ""))]).unwrap_err(),
            RegistryError::MissingExit("exit")
        );
        assert_eq!(
            Registry::new(vec![Command::new("exit", Action::unary(echo_one, ""))]).unwrap_err(),
            RegistryError::MissingExit("exit")
        );
    }
}
