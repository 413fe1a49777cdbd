use otp_mini::traits::Clipboard;

#[derive(Default, Debug, Clone)]
pub struct MockClipboard {
    content: Option<String>,
}

impl MockClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: &str) -> Self {
        Self {
            content: Some(text.to_string()),
        }
    }
}

impl Clipboard for MockClipboard {
    fn get(&mut self) -> Option<String> {
        self.content.clone()
    }
}
