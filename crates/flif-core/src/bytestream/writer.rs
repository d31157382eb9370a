/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::bytestream::{ByteIoError, ByteWriterTrait};

// We cannot keep these impls together with the std ones because `Vec`
// already implements `std::io::Write`, which the blanket impl below
// covers. Ending up with two separate implementations.
#[cfg(not(feature = "std"))]
impl ByteWriterTrait for &mut Vec<u8> {
    fn write_byte(&mut self, byte: u8) -> Result<(), ByteIoError> {
        self.push(byte);
        Ok(())
    }

    fn flush_bytes(&mut self) -> Result<(), ByteIoError> {
        Ok(())
    }
}

#[cfg(not(feature = "std"))]
impl ByteWriterTrait for Vec<u8> {
    fn write_byte(&mut self, byte: u8) -> Result<(), ByteIoError> {
        self.push(byte);
        Ok(())
    }

    fn flush_bytes(&mut self) -> Result<(), ByteIoError> {
        Ok(())
    }
}

#[cfg(feature = "std")]
impl<T: std::io::Write> crate::bytestream::ByteWriterTrait for T {
    #[inline(always)]
    fn write_byte(&mut self, byte: u8) -> Result<(), crate::bytestream::ByteIoError> {
        self.write_all(&[byte])
            .map_err(crate::bytestream::ByteIoError::from)
    }

    fn flush_bytes(&mut self) -> Result<(), crate::bytestream::ByteIoError> {
        self.flush().map_err(crate::bytestream::ByteIoError::from)
    }
}

/// An adapter turning any [`std::io::Write`] into a byte sink while
/// counting the bytes that went through it.
///
/// Useful when the caller wants to know how long the coded stream was
/// without asking the underlying writer.
#[cfg(feature = "std")]
pub struct StdWriter<W: std::io::Write> {
    inner:         W,
    bytes_written: usize
}

#[cfg(feature = "std")]
impl<W: std::io::Write> StdWriter<W> {
    /// Create a new sink wrapping `inner`
    pub const fn new(inner: W) -> StdWriter<W> {
        StdWriter {
            inner,
            bytes_written: 0
        }
    }

    /// Return the number of bytes written so far
    pub const fn bytes_written(&self) -> usize {
        self.bytes_written
    }

    /// Destroy the sink returning the underlying writer
    pub fn into_inner(self) -> W {
        self.inner
    }
}

#[cfg(feature = "std")]
impl<W: std::io::Write> std::io::Write for StdWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let written = self.inner.write(buf)?;
        self.bytes_written += written;
        Ok(written)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use crate::bytestream::ByteWriterTrait;

    #[test]
    fn vec_sink_collects_bytes() {
        let mut sink = vec![];
        sink.write_byte(0xDE).unwrap();
        sink.write_byte(0xAD).unwrap();
        sink.flush_bytes().unwrap();
        assert_eq!(sink, [0xDE, 0xAD]);
    }

    #[cfg(feature = "std")]
    #[test]
    fn std_writer_counts_bytes() {
        let mut sink = crate::bytestream::StdWriter::new(vec![]);
        sink.write_byte(1).unwrap();
        sink.write_byte(2).unwrap();
        assert_eq!(sink.bytes_written(), 2);
        assert_eq!(sink.into_inner(), [1, 2]);
    }
}
