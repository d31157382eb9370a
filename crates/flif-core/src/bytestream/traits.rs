/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Traits for reading and writing coded streams
//!
//! This exposes the traits implemented by byte sources and sinks used
//! by the flif family of coders.

use crate::bytestream::ByteIoError;

/// The input trait implemented for byte sources.
///
/// The range coder pulls single bytes from its source in a hot loop,
/// so implementations should make [`read_byte`](Self::read_byte) as
/// cheap as possible; in-memory sources should be a bounds check and
/// an index increment.
///
/// # Considerations
///
/// If you have an in memory buffer, prefer [`ByteCursor`](crate::bytestream::ByteCursor)
/// over [`Cursor`](std::io::Cursor); the latter goes through the
/// `BufRead` machinery on every byte.
pub trait ByteReaderTrait {
    /// Read a single byte from the source, or return an error if the
    /// source is exhausted.
    ///
    /// A well-formed coded stream never reads past its end, so
    /// exhaustion during a decode means the stream was truncated.
    fn read_byte(&mut self) -> Result<u8, ByteIoError>;
}

/// The output trait implemented for byte sinks.
///
/// Anything that implements this trait can collect the bytes the
/// range coder emits.
pub trait ByteWriterTrait {
    /// Write a single byte into the sink, or error out if the sink
    /// cannot accept it.
    fn write_byte(&mut self, byte: u8) -> Result<(), ByteIoError>;

    /// Ensure bytes are written to the sink.
    ///
    /// In-memory sinks may treat this as a no-op; file backed sinks
    /// should behave like a flush on the underlying writer.
    fn flush_bytes(&mut self) -> Result<(), ByteIoError>;
}
