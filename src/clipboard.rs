//! Handing the shopping list text to a clipboard.

use std::io::{self, Write};
use std::time::Instant;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::{debug, warn};

use crate::servings::CopyIndicator;

/// Somewhere text can be copied to.
#[async_trait]
pub trait Clipboard: Send {
    async fn write_text(&mut self, text: &str) -> io::Result<()>;
}

/// Copies through the terminal with an OSC 52 escape sequence, which most
/// modern terminal emulators forward to the system clipboard.
pub struct Osc52Clipboard<W> {
    writer: W,
}

impl<W: Write + Send> Osc52Clipboard<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

#[async_trait]
impl<W: Write + Send> Clipboard for Osc52Clipboard<W> {
    async fn write_text(&mut self, text: &str) -> io::Result<()> {
        let payload = STANDARD.encode(text);
        write!(self.writer, "\x1b]52;c;{payload}\x07")?;
        self.writer.flush()
    }
}

/// Keeps the last copied text in memory.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
    fail_writes: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard whose every write fails, for exercising the error path.
    pub fn failing() -> Self {
        Self {
            contents: None,
            fail_writes: true,
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

#[async_trait]
impl Clipboard for MemoryClipboard {
    async fn write_text(&mut self, text: &str) -> io::Result<()> {
        if self.fail_writes {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "clipboard unavailable",
            ));
        }
        self.contents = Some(text.to_string());
        Ok(())
    }
}

/// Copies `text` and shows the acknowledgment on success.
///
/// A failed write is logged and otherwise ignored: the indicator is left as
/// it was and `false` is returned.
pub async fn copy_shopping_list<C>(
    clipboard: &mut C,
    text: &str,
    indicator: &mut CopyIndicator,
    now: Instant,
) -> bool
where
    C: Clipboard + ?Sized,
{
    match clipboard.write_text(text).await {
        Ok(()) => {
            debug!(bytes = text.len(), "shopping list copied");
            indicator.acknowledge(now);
            true
        }
        Err(err) => {
            warn!(error = %err, "failed to copy shopping list");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_copy_success_acknowledges() {
        let mut clipboard = MemoryClipboard::new();
        let mut indicator = CopyIndicator::default();
        let now = Instant::now();

        let copied = copy_shopping_list(&mut clipboard, "2 eggs", &mut indicator, now).await;

        assert!(copied);
        assert_eq!(clipboard.contents(), Some("2 eggs"));
        assert!(indicator.is_copied(now));
    }

    #[tokio::test]
    async fn test_copy_failure_is_swallowed() {
        let mut clipboard = MemoryClipboard::failing();
        let mut indicator = CopyIndicator::default();
        let now = Instant::now();

        let copied = copy_shopping_list(&mut clipboard, "2 eggs", &mut indicator, now).await;

        assert!(!copied);
        assert_eq!(clipboard.contents(), None);
        assert_eq!(indicator, CopyIndicator::Idle);
    }

    #[tokio::test]
    async fn test_osc52_sequence() {
        let mut clipboard = Osc52Clipboard::new(Vec::new());

        clipboard
            .write_text("flour")
            .await
            .expect("Failed to write to buffer");

        assert_eq!(clipboard.writer, b"\x1b]52;c;ZmxvdXI=\x07".to_vec());
    }

    #[tokio::test]
    async fn test_copy_through_trait_object() {
        let mut clipboard: Box<dyn Clipboard> = Box::new(MemoryClipboard::new());
        let mut indicator = CopyIndicator::default();

        let copied =
            copy_shopping_list(clipboard.as_mut(), "", &mut indicator, Instant::now()).await;

        assert!(copied);
    }
}
