use std::cell::RefCell;
use std::io::{BufRead, Result as IoResult, Write};
use std::rc::Rc;

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;

/// Where the interactive loop gets its lines from.
pub trait LineSource {
    /// Show `prompt` and read one line without its terminator.
    ///
    /// Returns `Ok(None)` once the input is exhausted.
    fn read_line(&mut self, prompt: &str) -> anyhow::Result<Option<String>>;
}

/// Terminal input with line editing and in-memory history.
///
/// Ctrl-C drops the line being edited and prompts again; Ctrl-D ends the input.
impl LineSource for DefaultEditor {
    fn read_line(&mut self, prompt: &str) -> anyhow::Result<Option<String>> {
        loop {
            match self.readline(prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        self.add_history_entry(line.as_str())?;
                    }
                    return Ok(Some(line));
                }
                Err(ReadlineError::Interrupted) => {
                    debug!("line discarded by interrupt");
                }
                Err(ReadlineError::Eof) => return Ok(None),
                Err(err) => return Err(err.into()),
            }
        }
    }
}

/// Lines read from any buffered reader, with prompts echoed to a writer.
pub struct ScriptedInput<R, W> {
    input: R,
    echo: W,
}

impl<R: BufRead, W: Write> ScriptedInput<R, W> {
    pub fn new(input: R, echo: W) -> Self {
        Self { input, echo }
    }
}

impl<R: BufRead, W: Write> LineSource for ScriptedInput<R, W> {
    fn read_line(&mut self, prompt: &str) -> anyhow::Result<Option<String>> {
        self.echo.write_all(prompt.as_bytes())?;
        self.echo.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(len);
        Ok(Some(line))
    }
}

/// Memory-backed writer whose clones share one buffer.
///
/// Lets prompts and command output land in the same place during tests.
#[derive(Debug, Clone, Default)]
pub struct MemWriter {
    buf: Rc<RefCell<Vec<u8>>>,
}

impl MemWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, decoded lossily.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buf.borrow()).into_owned()
    }
}

impl Write for MemWriter {
    fn write(&mut self, data: &[u8]) -> IoResult<usize> {
        self.buf.borrow_mut().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> IoResult<()> {
        Ok(())
    }
}
