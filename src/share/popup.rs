//! Popup windows for share composers

use anyhow::{Context, Result};
use std::io;
use std::process::{Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};

pub const POPUP_WIDTH: u32 = 600;
pub const POPUP_HEIGHT: u32 = 400;

/// Size and position of a share popup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopupFeatures {
    pub width: u32,
    pub height: u32,
    pub left: u32,
    pub top: u32,
}

impl PopupFeatures {
    /// A fixed-size popup centred on a screen of `(width, height)`
    pub fn centered((screen_width, screen_height): (u32, u32)) -> Self {
        Self {
            width: POPUP_WIDTH,
            height: POPUP_HEIGHT,
            left: screen_width.saturating_sub(POPUP_WIDTH) / 2,
            top: screen_height.saturating_sub(POPUP_HEIGHT) / 2,
        }
    }

    /// Window feature list in the `key=value,...` form browsers accept
    pub fn to_feature_string(&self) -> String {
        format!(
            "width={},height={},left={},top={},scrollbars=yes,resizable=yes",
            self.width, self.height, self.left, self.top
        )
    }
}

/// Opens a URL in a new named window. The result of the window is not observed.
#[cfg_attr(test, mockall::automock)]
pub trait WindowOpener {
    fn open(&self, url: &str, window_name: &str, features: &PopupFeatures) -> Result<()>;
}

/// Hands the URL to the desktop's default browser
pub struct SystemBrowser;

impl WindowOpener for SystemBrowser {
    fn open(&self, url: &str, window_name: &str, features: &PopupFeatures) -> Result<()> {
        tracing::debug!(
            window = window_name,
            features = %features.to_feature_string(),
            "Opening share window"
        );
        launch_detached(crate::platform::browser_command(url))
            .with_context(|| format!("Failed to launch browser for {window_name}"))?;
        Ok(())
    }
}

/// Start `command` and reap it on a helper thread once it exits
fn launch_detached(mut command: Command) -> io::Result<JoinHandle<io::Result<ExitStatus>>> {
    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    Ok(thread::spawn(move || child.wait()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_on_large_screen() {
        let features = PopupFeatures::centered((1920, 1080));
        assert_eq!(features.left, 660);
        assert_eq!(features.top, 340);
        assert_eq!(
            features.to_feature_string(),
            "width=600,height=400,left=660,top=340,scrollbars=yes,resizable=yes"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_launched_process_is_reaped() {
        let reaper = launch_detached(Command::new("true")).unwrap();
        let status = reaper.join().unwrap().unwrap();
        assert!(status.success());
    }

    #[test]
    fn test_launch_failure_is_reported() {
        assert!(launch_detached(Command::new("technews-no-such-browser")).is_err());
    }

    #[test]
    fn test_small_screen_clamps_to_origin() {
        let features = PopupFeatures::centered((500, 300));
        assert_eq!((features.left, features.top), (0, 0));
        assert_eq!((features.width, features.height), (600, 400));
    }
}
