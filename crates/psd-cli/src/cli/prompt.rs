//! Terminal credential prompt: the CLI rendering of the credential dialog.

use anyhow::Result;
use std::io::{self, BufRead, Write};

/// Prints `message` to stderr and reads one line from stdin.
/// Returns `None` on EOF, which the caller treats as cancelling the dialog.
pub fn prompt_line(message: &str) -> Result<Option<String>> {
    eprint!("{message}");
    io::stderr().flush()?;

    let mut line = String::new();
    let n = io::stdin().lock().read_line(&mut line)?;
    if n == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}
