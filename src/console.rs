use std::io::{BufRead, Write};

use crate::prelude::*;

/// Line-oriented console the sequencer talks to.
///
/// The production implementation wraps stdio; tests substitute a scripted
/// double with a canned input queue and a captured transcript.
pub trait Console {
    /// Write without a trailing newline, flushed so a prompt shows up before
    /// the operator starts typing.
    fn print(&mut self, text: &str) -> Result;

    /// Write one full line.
    fn print_line(&mut self, line: &str) -> Result;

    /// Read one line, trailing newline stripped. Closed input is an error.
    fn read_line(&mut self) -> Result<String>;
}

pub struct StdConsole;

impl Console for StdConsole {
    fn print(&mut self, text: &str) -> Result {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }

    fn print_line(&mut self, line: &str) -> Result {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(line.as_bytes())?;
        stdout.write_all(b"\n")?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        let n_read = std::io::stdin()
            .lock()
            .read_line(&mut line)
            .context("failed to read from the console")?;
        ensure!(n_read != 0, "the console input was closed");
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(line)
    }
}
