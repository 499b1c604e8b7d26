use std::io::Write;
use std::process::{Command, Stdio};

use base64::Engine;

/// Copies the query to the clipboard. Errors are only logged; a failed copy
/// never changes what the user sees of the search itself.
pub fn copy_query(query: &str) -> bool {
    match copy_to_clipboard(query) {
        Ok(()) => {
            log::info!("copied query to clipboard ({} bytes)", query.len());
            true
        }
        Err(e) => {
            log::error!("failed to copy query to clipboard: {e}");
            false
        }
    }
}

/// Tries OSC52 first (works over ssh and in tmux), then native tools.
pub fn copy_to_clipboard(text: &str) -> Result<(), String> {
    if try_osc52_copy(text) {
        return Ok(());
    }
    try_native_clipboard(text)
}

pub fn osc52_sequence(text: &str, in_tmux: bool) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text);
    if in_tmux {
        format!("\x1bPtmux;\x1b\x1b]52;c;{encoded}\x07\x1b\\")
    } else {
        format!("\x1b]52;c;{encoded}\x07")
    }
}

fn try_osc52_copy(text: &str) -> bool {
    use std::io::IsTerminal;

    let mut stdout = std::io::stdout().lock();
    // writing escapes into a pipe would corrupt the output instead of copying
    if !stdout.is_terminal() {
        return false;
    }
    let sequence = osc52_sequence(text, std::env::var("TMUX").is_ok());
    stdout.write_all(sequence.as_bytes()).is_ok() && stdout.flush().is_ok()
}

/// Feeds `text` to `cmd` on stdin; true only if the write and the exit both succeed.
fn pipe_to_command(cmd: &str, args: &[&str], text: &str) -> bool {
    let Ok(mut child) = Command::new(cmd)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    else {
        return false;
    };
    let written = child
        .stdin
        .take()
        .map(|mut stdin| stdin.write_all(text.as_bytes()).is_ok())
        .unwrap_or(false);
    // reap the child even when the write failed
    let exited_ok = child.wait().map(|s| s.success()).unwrap_or(false);
    written && exited_ok
}

fn try_native_clipboard(text: &str) -> Result<(), String> {
    let try_command = |cmd: &str, args: &[&str]| pipe_to_command(cmd, args, text);

    if std::env::var("WAYLAND_DISPLAY").is_ok() && try_command("wl-copy", &[]) {
        return Ok(());
    }
    if try_command("xclip", &["-selection", "clipboard"]) {
        return Ok(());
    }
    if try_command("xsel", &["--clipboard", "--input"]) {
        return Ok(());
    }
    if try_command("pbcopy", &[]) {
        return Ok(());
    }

    Err("No clipboard tool available".to_string())
}
