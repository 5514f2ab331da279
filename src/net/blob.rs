use crate::net::ArrayBuffer;
use std::sync::Arc;

/// Immutable binary content tagged with a MIME type.
///
/// The type is an empty string when the response carried no `Content-Type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    content: Arc<[u8]>,
    mime_type: String,
}

impl Blob {
    pub fn new(content: impl Into<Arc<[u8]>>, mime_type: Option<String>) -> Self {
        Self {
            content: content.into(),
            mime_type: mime_type.unwrap_or_default(),
        }
    }

    /// Size in bytes.
    pub fn size(&self) -> usize {
        self.content.len()
    }

    /// MIME type, possibly empty.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Content decoded as UTF-8, invalid sequences replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.content).into_owned()
    }

    pub fn array_buffer(&self) -> ArrayBuffer {
        ArrayBuffer::from(&self.content[..])
    }

    /// New blob over `start..end` (clamped). Keeps the current type unless
    /// `mime_type` is given.
    pub fn slice(&self, start: usize, end: usize, mime_type: Option<String>) -> Blob {
        let end = end.min(self.content.len());
        let start = start.min(end);
        Blob {
            content: Arc::from(&self.content[start..end]),
            mime_type: mime_type.unwrap_or_else(|| self.mime_type.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_and_type() {
        let blob = Blob::new(&b"<p>hi</p>"[..], Some("text/html".into()));
        assert_eq!(blob.size(), 9);
        assert_eq!(blob.mime_type(), "text/html");
        assert_eq!(blob.text(), "<p>hi</p>");
    }

    #[test]
    fn missing_type_is_empty() {
        let blob = Blob::new(Vec::<u8>::new(), None);
        assert_eq!(blob.size(), 0);
        assert_eq!(blob.mime_type(), "");
        assert!(blob.array_buffer().is_empty());
    }

    #[test]
    fn slice_inherits_or_overrides_type() {
        let blob = Blob::new(&b"0123456789"[..], Some("text/plain".into()));

        let part = blob.slice(2, 5, None);
        assert_eq!(part.content(), b"234");
        assert_eq!(part.mime_type(), "text/plain");

        let part = blob.slice(8, 50, Some("application/octet-stream".into()));
        assert_eq!(part.content(), b"89");
        assert_eq!(part.mime_type(), "application/octet-stream");
    }
}
