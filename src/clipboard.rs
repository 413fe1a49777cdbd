use crate::traits::Clipboard;

/// Reads pasted text from the operating system clipboard.
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self, arboard::Error> {
        Ok(Self {
            inner: arboard::Clipboard::new()?,
        })
    }
}

impl Clipboard for SystemClipboard {
    fn get(&mut self) -> Option<String> {
        match self.inner.get_text() {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::debug!(error = %e, "system clipboard has no text");
                None
            }
        }
    }
}
