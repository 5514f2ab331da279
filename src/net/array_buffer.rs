use std::ops::{Index, IndexMut};

/// Fixed-length byte buffer, the response body seen as `Uint8` values.
///
/// The length is set at construction. Individual bytes may be overwritten but
/// the buffer never grows or shrinks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArrayBuffer {
    bytes: Box<[u8]>,
}

impl ArrayBuffer {
    /// Creates a zero-filled buffer of `byte_length` bytes.
    pub fn new(byte_length: usize) -> Self {
        Self { bytes: vec![0; byte_length].into_boxed_slice() }
    }

    pub fn byte_length(&self) -> usize {
        self.bytes.len()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<u8> {
        self.bytes.get(index).copied()
    }

    /// Overwrites the byte at `index`. Returns `false` when out of bounds.
    pub fn set(&mut self, index: usize, value: u8) -> bool {
        match self.bytes.get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Copies `begin..end` into a new buffer. Bounds are clamped to the length.
    pub fn slice(&self, begin: usize, end: usize) -> ArrayBuffer {
        let end = end.min(self.bytes.len());
        let begin = begin.min(end);
        ArrayBuffer::from(&self.bytes[begin..end])
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, u8> {
        self.bytes.iter()
    }
}

impl From<&[u8]> for ArrayBuffer {
    fn from(bytes: &[u8]) -> Self {
        Self { bytes: bytes.into() }
    }
}

impl From<Vec<u8>> for ArrayBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self { bytes: bytes.into_boxed_slice() }
    }
}

impl Index<usize> for ArrayBuffer {
    type Output = u8;

    fn index(&self, index: usize) -> &u8 {
        &self.bytes[index]
    }
}

impl IndexMut<usize> for ArrayBuffer {
    fn index_mut(&mut self, index: usize) -> &mut u8 {
        &mut self.bytes[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_zero_filled() {
        let buf = ArrayBuffer::new(4);
        assert_eq!(buf.byte_length(), 4);
        assert_eq!(buf.as_slice(), &[0, 0, 0, 0]);
        assert!(ArrayBuffer::new(0).is_empty());
    }

    #[test]
    fn bytes_map_to_ordinals() {
        let buf = ArrayBuffer::from(&b"A\x00\xff"[..]);
        assert_eq!(buf.len(), 3);
        assert_eq!(buf[0], 65);
        assert_eq!(buf[1], 0);
        assert_eq!(buf[2], 255);
        assert_eq!(buf.get(3), None);
    }

    #[test]
    fn set_keeps_length_fixed() {
        let mut buf = ArrayBuffer::new(2);
        assert!(buf.set(1, 7));
        assert!(!buf.set(2, 7));
        buf[0] = 9;
        assert_eq!(buf.as_slice(), &[9, 7]);
        assert_eq!(buf.byte_length(), 2);
    }

    #[test]
    fn slice_clamps_bounds() {
        let buf = ArrayBuffer::from(vec![1, 2, 3, 4, 5]);
        assert_eq!(buf.slice(1, 3).as_slice(), &[2, 3]);
        assert_eq!(buf.slice(3, 100).as_slice(), &[4, 5]);
        assert!(buf.slice(4, 2).is_empty());
        assert_eq!(buf.iter().sum::<u8>(), 15);
    }
}
