//! Pre-flight checks before expensive operations.
//!
//! Validates that required tools are available before starting a run that
//! would otherwise fail midway. The OpenAI credential is checked by the
//! summarizer itself, before its first request.

use crate::error::{CheatsheetError, Result};
use std::process::Command;

/// Tools every run may need.
const REQUIRED_TOOLS: &[&str] = &["yt-dlp"];

/// Run pre-flight checks.
pub fn check() -> Result<()> {
    REQUIRED_TOOLS.iter().try_for_each(|tool| check_tool(tool))
}

/// Check if an external tool is available.
fn check_tool(name: &str) -> Result<()> {
    match Command::new(name).arg("--version").output() {
        Ok(output) if output.status.success() => Ok(()),
        Ok(_) => Err(CheatsheetError::ToolNotFound(format!(
            "{} is installed but not working correctly",
            name
        ))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(CheatsheetError::ToolNotFound(name.to_string()))
        }
        Err(e) => Err(CheatsheetError::ToolNotFound(format!("{}: {}", name, e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tool() {
        let err = check_tool("yt-cheatsheet-no-such-tool").unwrap_err();
        assert!(matches!(err, CheatsheetError::ToolNotFound(name) if name == "yt-cheatsheet-no-such-tool"));
    }
}
