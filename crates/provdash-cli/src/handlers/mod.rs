pub mod batch;
pub mod config;
pub mod doctor;
pub mod explain;
pub mod providers;
pub mod report;
pub mod review;
pub mod reviews;
pub mod show;
pub mod stats;
pub mod tui;

use anyhow::Result;
use std::io::{BufRead, Write};

/// Ask on stderr and read one line from stdin. `None` on EOF or a blank
/// answer.
pub(crate) fn prompt_line(question: &str) -> Result<Option<String>> {
    let mut stderr = std::io::stderr();
    write!(stderr, "{question} ")?;
    stderr.flush()?;

    let mut answer = String::new();
    let read = std::io::stdin().lock().read_line(&mut answer)?;
    let answer = answer.trim();
    if read == 0 || answer.is_empty() {
        return Ok(None);
    }
    Ok(Some(answer.to_string()))
}

/// Yes/no prompt; anything but `y`/`yes` is a no.
pub(crate) fn confirm(question: &str) -> Result<bool> {
    let answer = prompt_line(&format!("{question} [y/N]"))?.map(|a| a.to_ascii_lowercase());
    Ok(matches!(answer.as_deref(), Some("y" | "yes")))
}
