/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use crate::bytestream::{ByteIoError, ByteReaderTrait};

/// An in-memory byte source.
///
/// Wraps anything that dereferences to a byte slice and yields its
/// bytes one at a time, tracking the read position.
///
/// # Example
/// ```
/// use flif_core::bytestream::{ByteCursor, ByteReaderTrait};
///
/// let mut source = ByteCursor::new([0x41_u8, 0x42]);
/// assert_eq!(source.read_byte().unwrap(), 0x41);
/// assert_eq!(source.read_byte().unwrap(), 0x42);
/// assert!(source.read_byte().is_err());
/// ```
pub struct ByteCursor<T: AsRef<[u8]>> {
    inner:    T,
    position: usize
}

impl<T: AsRef<[u8]>> ByteCursor<T> {
    /// Create a new cursor over `inner` starting at position zero
    pub const fn new(inner: T) -> ByteCursor<T> {
        ByteCursor { inner, position: 0 }
    }

    /// Return the current read position
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Destroy the cursor returning the underlying bytes
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: AsRef<[u8]>> ByteReaderTrait for ByteCursor<T> {
    #[inline(always)]
    fn read_byte(&mut self) -> Result<u8, ByteIoError> {
        match self.inner.as_ref().get(self.position) {
            Some(byte) => {
                self.position += 1;
                Ok(*byte)
            }
            None => Err(ByteIoError::Exhausted(self.position))
        }
    }
}

/// A byte source backed by any [`std::io::BufRead`] reader.
///
/// Sources should be buffered so that single byte reads do not turn
/// into syscalls; wrap plain readers in a [`BufReader`](std::io::BufReader)
/// first.
#[cfg(feature = "std")]
pub struct StdReader<R: std::io::BufRead> {
    inner:    R,
    position: usize
}

#[cfg(feature = "std")]
impl<R: std::io::BufRead> StdReader<R> {
    /// Create a new source wrapping `inner`
    pub const fn new(inner: R) -> StdReader<R> {
        StdReader { inner, position: 0 }
    }

    /// Destroy the source returning the underlying reader
    pub fn into_inner(self) -> R {
        self.inner
    }
}

#[cfg(feature = "std")]
impl<R: std::io::BufRead> ByteReaderTrait for StdReader<R> {
    #[inline(always)]
    fn read_byte(&mut self) -> Result<u8, ByteIoError> {
        let mut buf = [0];
        match self.inner.read(&mut buf) {
            Ok(0) => Err(ByteIoError::Exhausted(self.position)),
            Ok(_) => {
                self.position += 1;
                Ok(buf[0])
            }
            Err(e) => Err(ByteIoError::StdIoError(e))
        }
    }
}
