use anyhow::Result;
use myshell::Interpreter;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `MYSHELL_LOG=debug`.
const LOG_ENV: &str = "MYSHELL_LOG";

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    Interpreter::default().repl()
}
