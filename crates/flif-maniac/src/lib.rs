/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! The FLIF compression core.
//!
//! This crate implements MANIAC (Meta-Adaptive Near-zero Integer
//! Arithmetic Coding), the entropy engine of the FLIF lossless image
//! format, together with the reversible YCoCg color transform whose
//! conditional ranges feed it.
//!
//! The engine stacks, bottom up:
//!
//! - a binary range coder with 12 bit probability granularity
//!   ([`RacDecoder`]/[`RacEncoder`])
//! - adaptive bit probabilities driven by a precomputed transition
//!   table ([`BitChance`]/[`ChanceTable`])
//! - a structured prior over signed integers, with separate contexts
//!   for the zero flag, sign, exponent and mantissa ([`SymbolChance`],
//!   [`SimpleSymbolCoder`])
//! - a context decision tree that routes each symbol to a leaf model by
//!   its property vector, splitting leaves lazily as they warm up
//!   ([`PropertySymbolCoder`])
//! - a meta coder that serializes the tree itself
//!   ([`MetaPropertySymbolCoder`])
//!
//! Everything is bit-exact between encoder and decoder; a single bit of
//! drift corrupts the rest of the stream. Container framing, headers
//! and the remaining transforms of the format live in the layers above
//! this crate.
//!
//! # Example
//!
//! Round-trip a couple of values through a context tree:
//!
//! ```
//! use flif_core::bytestream::ByteCursor;
//! use flif_maniac::{
//!     MetaPropertySymbolCoder, PropertySymbolCoder, RacDecoder, RacEncoder, Tree
//! };
//!
//! let ranges = [(0, 255)];
//!
//! let mut sink = vec![];
//! let mut rac = RacEncoder::new(&mut sink);
//! MetaPropertySymbolCoder::new(&ranges).write_tree(&mut rac, &Tree::new()).unwrap();
//! let mut coder = PropertySymbolCoder::new(&ranges, Tree::new());
//! coder.write_int(&mut rac, &[200], 0, 1000, 17).unwrap();
//! coder.write_int(&mut rac, &[40], -10, 10, -3).unwrap();
//! rac.flush().unwrap();
//!
//! let mut rac = RacDecoder::new(ByteCursor::new(sink)).unwrap();
//! let tree = MetaPropertySymbolCoder::new(&ranges).read_tree(&mut rac).unwrap();
//! let mut coder = PropertySymbolCoder::new(&ranges, tree);
//! assert_eq!(coder.read_int(&mut rac, &[200], 0, 1000).unwrap(), 17);
//! assert_eq!(coder.read_int(&mut rac, &[40], -10, 10).unwrap(), -3);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
extern crate alloc;

pub use chance::{BitChance, ChanceTable};
pub use errors::{ManiacDecodeErrors, ManiacEncodeErrors};
pub use rac::{RacDecoder, RacEncoder};
pub use ranges::{ColorRanges, ColorValue, SourceRanges};
pub use symbol::{SimpleSymbolCoder, SymbolChance};
pub use tree::{
    MetaPropertySymbolCoder, PropertyDecisionNode, PropertyRanges, PropertySymbolCoder,
    PropertyValue, Tree
};
pub use ycocg::{TransformYCoCg, YCoCgRanges};

mod chance;
pub mod constants;
mod errors;
mod rac;
mod ranges;
mod symbol;
mod tree;
mod ycocg;
