//! Clipboard payloads passed between the browser and the session.
//!
//! A clipboard snapshot is an ordered list of representations of the same
//! content, each tagged with a MIME type (`text/plain`, `image/png`, ...).
//! An empty snapshot is meaningful: it tells the server the local clipboard
//! was cleared.

use serde::{Deserialize, Serialize};

/// The content of one clipboard representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum ClipboardValue {
    Text(String),
    Binary(Vec<u8>),
}

/// One MIME-typed representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipboardItem {
    mime_type: String,
    value: ClipboardValue,
}

impl ClipboardItem {
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn value(&self) -> &ClipboardValue {
        &self.value
    }
}

/// A clipboard snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipboardData {
    items: Vec<ClipboardItem>,
}

impl ClipboardData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_text(&mut self, mime_type: impl Into<String>, text: impl Into<String>) {
        self.items.push(ClipboardItem {
            mime_type: mime_type.into(),
            value: ClipboardValue::Text(text.into()),
        });
    }

    pub fn add_binary(&mut self, mime_type: impl Into<String>, binary: impl Into<Vec<u8>>) {
        self.items.push(ClipboardItem {
            mime_type: mime_type.into(),
            value: ClipboardValue::Binary(binary.into()),
        });
    }

    pub fn items(&self) -> &[ClipboardItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Convenience constructor for a single `text/plain` item.
    pub fn plain_text(text: impl Into<String>) -> Self {
        let mut data = Self::new();
        data.add_text("text/plain", text);
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clipboard_is_empty() {
        assert!(ClipboardData::new().is_empty());
    }

    #[test]
    fn test_items_keep_insertion_order() {
        // Arrange
        let mut data = ClipboardData::new();

        // Act
        data.add_text("text/plain", "hello");
        data.add_binary("image/png", vec![0x89, 0x50]);

        // Assert
        assert_eq!(data.items().len(), 2);
        assert_eq!(data.items()[0].mime_type(), "text/plain");
        assert_eq!(data.items()[0].value(), &ClipboardValue::Text("hello".into()));
        assert_eq!(data.items()[1].mime_type(), "image/png");
        assert_eq!(data.items()[1].value(), &ClipboardValue::Binary(vec![0x89, 0x50]));
    }

    #[test]
    fn test_plain_text_helper() {
        let data = ClipboardData::plain_text("abc");
        assert!(!data.is_empty());
        assert_eq!(data.items()[0].mime_type(), "text/plain");
    }
}
