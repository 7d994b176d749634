//! Reading graph text from a file or standard input.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

/// Path argument meaning "read standard input".
pub const STDIN_PATH: &str = "-";

/// Returns `true` when `path` names standard input.
pub fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == STDIN_PATH
}

/// Read the whole input named by `path` into a string.
///
/// # Errors
///
/// Returns an error if the file (or stdin) cannot be read or is not UTF-8.
pub fn read_input(path: &Path) -> Result<String> {
    if is_stdin(path) {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read standard input")?;
        debug!(bytes = text.len(), "read graph from stdin");
        return Ok(text);
    }

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    debug!(path = %path.display(), bytes = text.len(), "read graph file");
    Ok(text)
}
