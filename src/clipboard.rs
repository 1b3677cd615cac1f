use std::{
    io::Write,
    process::{Command, Stdio},
};

use anyhow::{Context, Result, bail};
use tracing::debug;

/// Copy text to the system clipboard using the platform's clipboard tool
pub fn copy(text: &str) -> Result<()> {
    let (program, args) = clipboard_command();
    debug!("Copying to clipboard with {}", program);

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("Failed to run clipboard command '{program}'"))?;

    child
        .stdin
        .take()
        .context("Clipboard command has no stdin")?
        .write_all(text.as_bytes())
        .context("Failed to write to clipboard command")?;

    let status = child
        .wait()
        .context("Failed to wait for clipboard command")?;
    if !status.success() {
        bail!("Clipboard command '{program}' returned error: {status}");
    }

    Ok(())
}

#[cfg(target_os = "macos")]
fn clipboard_command() -> (&'static str, &'static [&'static str]) {
    ("pbcopy", &[])
}

#[cfg(target_os = "windows")]
fn clipboard_command() -> (&'static str, &'static [&'static str]) {
    ("clip", &[])
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn clipboard_command() -> (&'static str, &'static [&'static str]) {
    select_unix_command(std::env::var_os("WAYLAND_DISPLAY").is_some())
}

#[cfg_attr(any(target_os = "macos", target_os = "windows"), allow(dead_code))]
fn select_unix_command(wayland: bool) -> (&'static str, &'static [&'static str]) {
    if wayland {
        ("wl-copy", &[])
    } else {
        ("xclip", &["-selection", "clipboard"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_unix_command() {
        assert_eq!(select_unix_command(true).0, "wl-copy");

        let (program, args) = select_unix_command(false);
        assert_eq!(program, "xclip");
        assert_eq!(args, &["-selection", "clipboard"]);
    }
}
