/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Byte sources and sinks for the arithmetic coder
//!
//! The range coder at the bottom of the codec consumes and produces its
//! stream one byte at a time, so the traits here are deliberately narrow:
//! a source yields single bytes until it is exhausted, a sink accepts
//! single bytes and can be flushed. Exhaustion is an error, not a
//! sentinel value, because a truncated stream must abort a decode.

use core::fmt::{Debug, Display, Formatter};

mod reader;
mod traits;
mod writer;

pub use reader::ByteCursor;
#[cfg(feature = "std")]
pub use reader::StdReader;
pub use traits::{ByteReaderTrait, ByteWriterTrait};
#[cfg(feature = "std")]
pub use writer::StdWriter;

/// Errors produced by byte sources and sinks
pub enum ByteIoError {
    /// The source ran out of bytes.
    ///
    /// The argument is the position at which the read failed
    Exhausted(usize),
    /// Anything else that isn't significant
    Generic(&'static str),
    /// A standard library I/O error
    ///
    /// Only present with the `std` feature
    #[cfg(feature = "std")]
    StdIoError(std::io::Error)
}

impl Debug for ByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            ByteIoError::Exhausted(position) => {
                writeln!(f, "Byte source exhausted at position {position}")
            }
            ByteIoError::Generic(reason) => {
                writeln!(f, "{reason}")
            }
            #[cfg(feature = "std")]
            ByteIoError::StdIoError(err) => {
                writeln!(f, "Underlying I/O error {err}")
            }
        }
    }
}

impl Display for ByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{self:?}")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ByteIoError {}

impl From<&'static str> for ByteIoError {
    fn from(value: &'static str) -> Self {
        ByteIoError::Generic(value)
    }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for ByteIoError {
    fn from(value: std::io::Error) -> Self {
        ByteIoError::StdIoError(value)
    }
}
