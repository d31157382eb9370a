/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::{Debug, Display, Formatter};

use flif_core::bytestream::ByteIoError;

/// Possible errors that may occur during decoding
pub enum ManiacDecodeErrors {
    /// The byte source ran out in the middle of a symbol.
    ///
    /// The arithmetic coder state is not recoverable after this, the
    /// whole image or frame must be abandoned
    StreamTruncated,
    /// The serialized context tree was malformed.
    ///
    /// Raised when a subtree splits a property whose range is already
    /// exhausted, the stream cannot have been produced by an encoder
    InvalidTree(&'static str),
    /// An I/O error from the byte source
    IoErrors(ByteIoError)
}

impl Debug for ManiacDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            ManiacDecodeErrors::StreamTruncated => {
                writeln!(f, "Byte source exhausted in the middle of a symbol")
            }
            ManiacDecodeErrors::InvalidTree(reason) => {
                writeln!(f, "Invalid context tree: {reason}")
            }
            ManiacDecodeErrors::IoErrors(err) => {
                writeln!(f, "I/O error {:?}", err)
            }
        }
    }
}

impl Display for ManiacDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{self:?}")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ManiacDecodeErrors {}

impl From<ByteIoError> for ManiacDecodeErrors {
    fn from(value: ByteIoError) -> Self {
        match value {
            // EOF mid-decode means the stream was cut short
            ByteIoError::Exhausted(_) => ManiacDecodeErrors::StreamTruncated,
            other => ManiacDecodeErrors::IoErrors(other)
        }
    }
}

/// Possible errors that may occur during encoding
pub enum ManiacEncodeErrors {
    /// An I/O error from the byte sink
    IoErrors(ByteIoError)
}

impl Debug for ManiacEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            ManiacEncodeErrors::IoErrors(err) => {
                writeln!(f, "I/O error {:?}", err)
            }
        }
    }
}

impl Display for ManiacEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{self:?}")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ManiacEncodeErrors {}

impl From<ByteIoError> for ManiacEncodeErrors {
    fn from(value: ByteIoError) -> Self {
        ManiacEncodeErrors::IoErrors(value)
    }
}
