//! Platform-specific configuration

use std::process::Command;

/// Submit shortcut display for form help text
pub const SUBMIT_SHORTCUT: &str = "Ctrl+S";

/// Command that opens a URL in the default browser
/// - macOS: `open`
/// - Windows: `rundll32 url.dll,FileProtocolHandler`
/// - Others: `xdg-open`
#[cfg(target_os = "macos")]
pub fn browser_command(url: &str) -> Command {
    let mut command = Command::new("open");
    command.arg(url);
    command
}

#[cfg(target_os = "windows")]
pub fn browser_command(url: &str) -> Command {
    // No shell in between, so `&` in query strings reaches the browser intact
    let mut command = Command::new("rundll32");
    command.args(["url.dll,FileProtocolHandler", url]);
    command
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
pub fn browser_command(url: &str) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(url);
    command
}
