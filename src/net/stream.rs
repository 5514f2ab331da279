//! Write-then-drain byte stream backing a response body.
//!
//! Bytes are appended with [`Stream::write`] and read back exactly once with
//! [`Stream::drain`]. [`Stream::contents`] peeks at whatever has not been
//! consumed yet without moving the read position.

/// In-memory body stream.
#[derive(Debug, Default, Clone)]
pub struct Stream {
    buffer: Vec<u8>,
    /// Read position; everything before it has been consumed
    position: usize,
}

impl Stream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `bytes` to the stream and returns how many bytes were written.
    pub fn write(&mut self, bytes: impl AsRef<[u8]>) -> usize {
        let bytes = bytes.as_ref();
        self.buffer.extend_from_slice(bytes);
        bytes.len()
    }

    /// Buffered bytes that have not been consumed yet. Does not drain.
    pub fn contents(&self) -> &[u8] {
        &self.buffer[self.position..]
    }

    /// Reads the stream to completion. A second drain returns nothing.
    pub fn drain(&mut self) -> Vec<u8> {
        let remaining = self.buffer[self.position..].to_vec();
        self.position = self.buffer.len();
        remaining
    }

    /// Total number of bytes ever written.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// True once everything written has been consumed.
    pub fn is_drained(&self) -> bool {
        self.position == self.buffer.len()
    }
}

impl From<Vec<u8>> for Stream {
    fn from(buffer: Vec<u8>) -> Self {
        Self { buffer, position: 0 }
    }
}

impl From<&[u8]> for Stream {
    fn from(bytes: &[u8]) -> Self {
        Self::from(bytes.to_vec())
    }
}

impl From<&str> for Stream {
    fn from(text: &str) -> Self {
        Self::from(text.as_bytes())
    }
}

impl From<String> for Stream {
    fn from(text: String) -> Self {
        Self::from(text.into_bytes())
    }
}
