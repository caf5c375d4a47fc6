use crate::command::{Action, ActionResult, Command, Context};
use crate::error::{CollaboratorContext, PreconditionError};
use crate::precondition::{assure_can_create, assure_directory_exists, assure_file_exists};

/// Content written by `hw`.
const HELLO_WORLD: &str = "Hello, world!\n";

/// Built-in commands known to the shell at compile time, in `help` order.
pub(crate) fn commands() -> Vec<Command> {
    vec![
        Command::new("pwd", PRINT_WORKING_DIRECTORY)
            .with_description("Print name of current/working directory"),
        Command::new("ls", LIST_DIRECTORY).with_description("List directory contents"),
        Command::new("cd", CHANGE_DIRECTORY),
        Command::new("cp", COPY_FILE),
        Command::new("mv", MOVE_FILE),
        Command::new("rm", REMOVE_FILE),
        Command::new("rmdir", REMOVE_DIRECTORY),
        Command::new("mkdir", MAKE_DIRECTORY),
        Command::new("hw", HELLO),
        Command::new("cat", PRINT_FILE),
        Command::new("help", HELP).with_description("Print this help message"),
        Command::new("exit", EXIT).with_description("Cause normal process termination"),
    ]
}

const PRINT_WORKING_DIRECTORY: Action =
    Action::nullary(print_working_directory, "Print the current working directory");
const LIST_DIRECTORY: Action =
    Action::nullary(list_directory, "List the current working directory");
const CHANGE_DIRECTORY: Action =
    Action::unary(change_directory, "Change the current working directory");
const COPY_FILE: Action = Action::binary(copy_file, "Copy a file");
const MOVE_FILE: Action = Action::binary(move_file, "Move (rename) a file");
const REMOVE_FILE: Action = Action::unary(remove_file, "Remove a file");
const REMOVE_DIRECTORY: Action = Action::unary(remove_directory, "Remove an empty directory");
const MAKE_DIRECTORY: Action = Action::unary(make_directory, "Make a directory");
const HELLO: Action = Action::unary(hello, "Make a text file with \"Hello, world!\" in it");
const PRINT_FILE: Action = Action::unary(print_file, "Print file contents");
const HELP: Action = Action::nullary(help, "Print a list of all available commands");
const EXIT: Action = Action::nullary(exit, "Do nothing");

fn print_working_directory(ctx: &mut Context<'_>) -> ActionResult {
    writeln!(ctx.out, "{}", ctx.env.current_dir().display())?;
    Ok(())
}

fn list_directory(ctx: &mut Context<'_>) -> ActionResult {
    let mut names = ctx
        .env
        .fs()
        .list_dir(ctx.env.current_dir())
        .collaborator("list", ".")?;
    names.sort();
    writeln!(ctx.out, "{}", names.join("  "))?;
    Ok(())
}

fn change_directory(ctx: &mut Context<'_>, path: &str) -> ActionResult {
    let target = assure_directory_exists(ctx.env, path)?;
    let target = ctx.env.fs().canonicalize(&target).collaborator("enter", path)?;
    ctx.env.set_current_dir(target);
    Ok(())
}

fn copy_file(ctx: &mut Context<'_>, source: &str, dest: &str) -> ActionResult {
    let from = assure_file_exists(ctx.env, source)?;
    let to = assure_can_create(ctx.env, dest)?;
    ctx.env.fs_mut().copy_file(&from, &to).collaborator("copy", source)
}

fn move_file(ctx: &mut Context<'_>, source: &str, dest: &str) -> ActionResult {
    let from = assure_file_exists(ctx.env, source)?;
    let to = assure_can_create(ctx.env, dest)?;
    ctx.env.fs_mut().rename(&from, &to).collaborator("move", source)
}

fn remove_file(ctx: &mut Context<'_>, path: &str) -> ActionResult {
    let target = assure_file_exists(ctx.env, path)?;
    ctx.env.fs_mut().remove_file(&target).collaborator("remove", path)
}

fn remove_directory(ctx: &mut Context<'_>, path: &str) -> ActionResult {
    let target = assure_directory_exists(ctx.env, path)?;
    let entries = ctx.env.fs().list_dir(&target).collaborator("list", path)?;
    if !entries.is_empty() {
        return Err(PreconditionError::DirectoryNotEmpty(path.to_owned()).into());
    }
    ctx.env.fs_mut().remove_dir(&target).collaborator("remove", path)
}

fn make_directory(ctx: &mut Context<'_>, path: &str) -> ActionResult {
    let target = assure_can_create(ctx.env, path)?;
    ctx.env.fs_mut().create_dir(&target).collaborator("create", path)
}

fn hello(ctx: &mut Context<'_>, filename: &str) -> ActionResult {
    let target = assure_can_create(ctx.env, filename)?;
    ctx.env
        .fs_mut()
        .create_file(&target, HELLO_WORLD.as_bytes())
        .collaborator("write", filename)
}

fn print_file(ctx: &mut Context<'_>, filename: &str) -> ActionResult {
    let target = assure_file_exists(ctx.env, filename)?;
    let contents = ctx.env.fs().read(&target).collaborator("read", filename)?;
    ctx.out.write_all(&contents)?;
    Ok(())
}

fn help(ctx: &mut Context<'_>) -> ActionResult {
    writeln!(ctx.out, "Available commands:")?;
    for command in ctx.registry.iter() {
        writeln!(ctx.out, "{} - {}", command.name(), command.description())?;
    }
    Ok(())
}

fn exit(_ctx: &mut Context<'_>) -> ActionResult {
    Ok(())
}
