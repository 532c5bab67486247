use scriptdeck::error::{Result, ScriptError};
use std::io::Write;
use std::process::{Command, Stdio};

/// Copies text to the system clipboard through the platform's copy tool:
/// pbcopy on macOS, xclip or xsel on Linux, clip.exe on Windows.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        pipe_to(Command::new("pbcopy"), "pbcopy", text)
    }

    #[cfg(target_os = "linux")]
    {
        let mut xclip = Command::new("xclip");
        xclip.args(["-selection", "clipboard"]);
        pipe_to(xclip, "xclip", text).or_else(|_| {
            let mut xsel = Command::new("xsel");
            xsel.args(["--clipboard", "--input"]);
            pipe_to(xsel, "xsel", text)
        })
    }

    #[cfg(target_os = "windows")]
    {
        pipe_to(Command::new("clip"), "clip", text)
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        let _ = text;
        Err(ScriptError::Api(
            "Clipboard not supported on this platform".to_string(),
        ))
    }
}

#[allow(dead_code)]
fn pipe_to(mut command: Command, name: &str, text: &str) -> Result<()> {
    let mut child = command
        .stdin(Stdio::piped())
        .spawn()
        .map_err(|e| ScriptError::Api(format!("Failed to spawn {}: {}", name, e)))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .map_err(|e| ScriptError::Api(format!("Failed to write to {}: {}", name, e)))?;
    }

    let status = child
        .wait()
        .map_err(|e| ScriptError::Api(format!("Failed to wait for {}: {}", name, e)))?;

    if status.success() {
        Ok(())
    } else {
        Err(ScriptError::Api(format!("{} exited with error", name)))
    }
}

/// Clipboard text for a card: the body, with a trailing newline.
pub fn format_for_clipboard(body: &str) -> String {
    let trimmed = body.trim_end_matches(['\n', '\r']);
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{}\n", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_for_clipboard_normalizes_trailing_newlines() {
        assert_eq!(format_for_clipboard("Fade in.\n\n\n"), "Fade in.\n");
        assert_eq!(format_for_clipboard("Fade in."), "Fade in.\n");
    }

    #[test]
    fn test_format_for_clipboard_empty_body() {
        assert_eq!(format_for_clipboard(""), "");
        assert_eq!(format_for_clipboard("\n\n"), "");
    }
}
