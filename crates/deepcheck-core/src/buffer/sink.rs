//! Backing stores for the diagnostic buffer.

use crate::errors::{CheckError, CheckErrorKind, Result};

/// Added on every growth step so small buffers do not grow byte by byte
pub const GROWTH_CONSTANT: usize = 64;

/// How a sink reacts to running out of room
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkMode {
    /// Grows geometrically; failures are recorded and the scope continues
    Growable,
    /// Pre-sized, never reallocates; a failure aborts the scope
    Fixed,
}

/// Append-only byte store behind a [`super::DiagnosticBuffer`]
pub trait Sink {
    /// # Errors
    ///
    /// `BufferOverflow` when a fixed sink has no room for `bytes`.
    fn append(&mut self, bytes: &[u8]) -> Result<()>;

    fn contents(&self) -> &[u8];

    /// Forget all content, keeping the storage
    fn reset(&mut self);

    /// Drop content past `len`; no-op when already shorter
    fn truncate(&mut self, len: usize);

    fn mode(&self) -> SinkMode;

    fn len(&self) -> usize {
        self.contents().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Heap sink growing by `old + old / 2 + GROWTH_CONSTANT`
#[derive(Debug, Default)]
pub struct GrowableSink {
    data: Vec<u8>,
    capacity: usize,
}

impl GrowableSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Capacity as tracked by the growth policy
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn ensure_capacity(&mut self, additional: usize) {
        let needed = self.data.len() + additional;
        if needed <= self.capacity {
            return;
        }
        let mut capacity = self.capacity;
        while capacity < needed {
            capacity = capacity + capacity / 2 + GROWTH_CONSTANT;
        }
        self.data.reserve_exact(capacity - self.data.len());
        self.capacity = capacity;
    }
}

impl Sink for GrowableSink {
    fn append(&mut self, bytes: &[u8]) -> Result<()> {
        self.ensure_capacity(bytes.len());
        self.data.extend_from_slice(bytes);
        Ok(())
    }

    fn contents(&self) -> &[u8] {
        &self.data
    }

    fn reset(&mut self) {
        self.data.clear();
    }

    fn truncate(&mut self, len: usize) {
        self.data.truncate(len);
    }

    fn mode(&self) -> SinkMode {
        SinkMode::Growable
    }
}

/// Inline, fixed-capacity sink; never allocates
#[derive(Debug)]
pub struct FixedSink<const N: usize> {
    data: [u8; N],
    len: usize,
}

impl<const N: usize> FixedSink<N> {
    pub const fn new() -> Self {
        Self {
            data: [0; N],
            len: 0,
        }
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn remaining(&self) -> usize {
        N - self.len
    }
}

impl<const N: usize> Default for FixedSink<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Sink for FixedSink<N> {
    fn append(&mut self, bytes: &[u8]) -> Result<()> {
        if bytes.len() > self.remaining() {
            return Err(CheckError::new(CheckErrorKind::BufferOverflow)
                .with_op("append")
                .with_message(format!(
                    "fixed buffer of {} bytes cannot take {} more ({} used)",
                    N,
                    bytes.len(),
                    self.len
                )));
        }
        self.data[self.len..self.len + bytes.len()].copy_from_slice(bytes);
        self.len += bytes.len();
        Ok(())
    }

    fn contents(&self) -> &[u8] {
        &self.data[..self.len]
    }

    fn reset(&mut self) {
        self.len = 0;
    }

    fn truncate(&mut self, len: usize) {
        self.len = self.len.min(len);
    }

    fn mode(&self) -> SinkMode {
        SinkMode::Fixed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_growth_formula() {
        let mut sink = GrowableSink::new();
        sink.append(b"x").unwrap();
        assert_eq!(sink.capacity(), 64);
        sink.append(&[b'y'; 64]).unwrap();
        // 64 + 32 + 64
        assert_eq!(sink.capacity(), 160);
        sink.append(&[b'z'; 500]).unwrap();
        // 160 -> 304 -> 520 -> 844
        assert_eq!(sink.capacity(), 844);
        assert_eq!(sink.len(), 565);
    }

    #[test]
    fn test_reset_keeps_capacity() {
        let mut sink = GrowableSink::with_capacity(10);
        sink.append(b"hello").unwrap();
        sink.reset();
        assert!(sink.is_empty());
        assert_eq!(sink.capacity(), 10);
    }

    #[test]
    fn test_fixed_overflow() {
        let mut sink = FixedSink::<4>::new();
        sink.append(b"abc").unwrap();
        let err = sink.append(b"de").unwrap_err();
        assert_eq!(err.kind(), CheckErrorKind::BufferOverflow);
        assert_eq!(sink.contents(), b"abc");
        sink.append(b"d").unwrap();
        assert_eq!(sink.remaining(), 0);
    }

    #[test]
    fn test_truncate() {
        let mut fixed = FixedSink::<8>::new();
        fixed.append(b"abcdef").unwrap();
        fixed.truncate(2);
        assert_eq!(fixed.contents(), b"ab");
        fixed.truncate(5);
        assert_eq!(fixed.contents(), b"ab");

        let mut growable = GrowableSink::new();
        growable.append(b"abcdef").unwrap();
        growable.truncate(3);
        assert_eq!(growable.contents(), b"abc");
    }
}
