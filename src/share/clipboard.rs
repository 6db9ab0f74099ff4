//! Clipboard access with a terminal fallback
//!
//! The desktop clipboard is tried first. When it cannot be opened (no display
//! server, remote session) the text is sent to the terminal emulator as an
//! OSC 52 sequence, which most terminals forward to the local clipboard.

use base64::Engine as _;
use std::io::Write;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("clipboard write failed: {0}")]
    Write(String),
}

/// Something text can be copied into
#[cfg_attr(test, mockall::automock)]
pub trait ClipboardBackend {
    fn name(&self) -> &'static str;
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The desktop clipboard, opened on first use
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    fn clipboard(&mut self) -> Result<&mut arboard::Clipboard, ClipboardError> {
        if self.inner.is_none() {
            let clipboard = arboard::Clipboard::new()
                .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
            self.inner = Some(clipboard);
        }
        self.inner
            .as_mut()
            .ok_or_else(|| ClipboardError::Unavailable("clipboard not initialised".into()))
    }
}

impl ClipboardBackend for SystemClipboard {
    fn name(&self) -> &'static str {
        "system"
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let result = self
            .clipboard()?
            .set_text(text)
            .map_err(|e| ClipboardError::Write(e.to_string()));
        if result.is_err() {
            // Reopen on the next attempt, the display connection may have gone away
            self.inner = None;
        }
        result
    }
}

/// Copies through the terminal with an OSC 52 escape sequence
pub struct TerminalClipboard<W: Write> {
    out: W,
}

impl<W: Write> TerminalClipboard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

/// OSC 52 "set clipboard" sequence for `text`
fn osc52_sequence(text: &str) -> String {
    let payload = base64::engine::general_purpose::STANDARD.encode(text);
    format!("\x1b]52;c;{payload}\x07")
}

impl<W: Write> ClipboardBackend for TerminalClipboard<W> {
    fn name(&self) -> &'static str {
        "terminal"
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let sequence = osc52_sequence(text);
        self.out
            .write_all(sequence.as_bytes())
            .and_then(|()| self.out.flush())
            .map_err(|e| ClipboardError::Write(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_osc52_sequence_encodes_payload() {
        assert_eq!(
            osc52_sequence("https://site.example/article/42"),
            "\x1b]52;c;aHR0cHM6Ly9zaXRlLmV4YW1wbGUvYXJ0aWNsZS80Mg==\x07"
        );
    }

    #[test]
    fn test_terminal_clipboard_writes_sequence() {
        let mut clipboard = TerminalClipboard::new(Vec::new());
        clipboard.write_text("oi").unwrap();
        assert_eq!(clipboard.into_inner(), b"\x1b]52;c;b2k=\x07".to_vec());
    }

    #[test]
    fn test_terminal_clipboard_reports_write_errors() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("closed"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let mut clipboard = TerminalClipboard::new(Broken);
        assert!(matches!(
            clipboard.write_text("oi"),
            Err(ClipboardError::Write(_))
        ));
    }
}
