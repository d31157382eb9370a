/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Binary range coder with 12 bit probability granularity.
//!
//! The coder keeps a 24 bit interval `[low, low + range)` and splits it
//! per bit: the zero region sits at the bottom with a size proportional
//! to the 12 bit chance of a zero, the one region takes the rest. When
//! `range` drops to 16 bits the coder renormalizes one byte at a time,
//! so encoder emission and decoder consumption line up exactly.
//!
//! The encoder resolves carries with a delayed byte and a run counter
//! for `0xFF` bytes whose final value depends on a carry that may still
//! arrive.

use flif_core::bytestream::{ByteReaderTrait, ByteWriterTrait};

use crate::errors::{ManiacDecodeErrors, ManiacEncodeErrors};

const MIN_RANGE_BITS: u32 = 16;
const MAX_RANGE_BITS: u32 = 24;
const MIN_RANGE: u32 = 1 << MIN_RANGE_BITS;
const BASE_RANGE: u32 = 1 << MAX_RANGE_BITS;

/// Size of the bottom interval region for a zero bit with probability
/// `chance`/4096 inside `range`
#[inline(always)]
fn zero_region(chance: u16, range: u32) -> u32 {
    debug_assert!(chance > 0 && chance < 4096);
    ((u64::from(range) * u64::from(chance) + 0x800) >> 12) as u32
}

/// Decoding half of the range coder.
///
/// Priming reads three bytes from the source; every renormalization
/// afterwards reads one more. A source that ends early produces
/// [`StreamTruncated`](ManiacDecodeErrors::StreamTruncated).
pub struct RacDecoder<T: ByteReaderTrait> {
    io:    T,
    range: u32,
    low:   u32
}

impl<T: ByteReaderTrait> RacDecoder<T> {
    /// Create a decoder over `io` and prime the 24 bit window
    pub fn new(mut io: T) -> Result<RacDecoder<T>, ManiacDecodeErrors> {
        let mut low = 0;
        for _ in 0..MAX_RANGE_BITS / 8 {
            low = (low << 8) | u32::from(io.read_byte()?);
        }
        Ok(RacDecoder {
            io,
            range: BASE_RANGE,
            low
        })
    }

    /// Decode one bit whose probability of being zero is `chance`/4096
    #[inline]
    pub fn read_12bit_chance(&mut self, chance: u16) -> Result<bool, ManiacDecodeErrors> {
        let split = zero_region(chance, self.range);
        let bit = self.low >= split;

        if bit {
            self.low -= split;
            self.range -= split;
        } else {
            self.range = split;
        }

        while self.range <= MIN_RANGE {
            self.low = (self.low << 8) | u32::from(self.io.read_byte()?);
            self.range <<= 8;
        }
        Ok(bit)
    }

    /// Destroy the decoder returning the underlying byte source
    pub fn into_inner(self) -> T {
        self.io
    }
}

/// Encoding half of the range coder.
///
/// [`flush`](RacEncoder::flush) must be called exactly once after the
/// last bit, otherwise up to four bytes of state never reach the sink.
pub struct RacEncoder<T: ByteWriterTrait> {
    io:            T,
    range:         u32,
    low:           u32,
    delayed_byte:  Option<u8>,
    delayed_count: u32
}

impl<T: ByteWriterTrait> RacEncoder<T> {
    /// Create an encoder writing into `io`
    pub fn new(io: T) -> RacEncoder<T> {
        RacEncoder {
            io,
            range: BASE_RANGE,
            low: 0,
            delayed_byte: None,
            delayed_count: 0
        }
    }

    /// Encode one bit whose probability of being zero is `chance`/4096
    #[inline]
    pub fn write_12bit_chance(&mut self, chance: u16, bit: bool) -> Result<(), ManiacEncodeErrors> {
        let split = zero_region(chance, self.range);

        if bit {
            self.low += split;
            self.range -= split;
        } else {
            self.range = split;
        }
        self.output()
    }

    fn output(&mut self) -> Result<(), ManiacEncodeErrors> {
        while self.range <= MIN_RANGE {
            // top window byte plus a possible carry bit, 0..=0x1FF
            let byte = self.low >> MIN_RANGE_BITS;

            match self.delayed_byte {
                None => self.delayed_byte = Some(byte as u8),
                Some(pending) => {
                    if byte < 0xFF {
                        // the pending bytes can no longer be touched by
                        // a carry, ship them
                        self.io.write_byte(pending)?;
                        for _ in 0..self.delayed_count {
                            self.io.write_byte(0xFF)?;
                        }
                        self.delayed_count = 0;
                        self.delayed_byte = Some(byte as u8);
                    } else if byte == 0xFF {
                        // still undecided, a later carry would turn it
                        // into 0x00
                        self.delayed_count += 1;
                    } else {
                        // carry: propagate through the pending run
                        self.io.write_byte(pending + 1)?;
                        for _ in 0..self.delayed_count {
                            self.io.write_byte(0x00)?;
                        }
                        self.delayed_count = 0;
                        self.delayed_byte = Some((byte & 0xFF) as u8);
                    }
                }
            }

            self.low = (self.low & (MIN_RANGE - 1)) << 8;
            self.range <<= 8;
        }
        Ok(())
    }

    /// Emit the residual coder state and flush the sink.
    ///
    /// Emits exactly the number of bytes the matching decoder will
    /// consume, so streams can be concatenated by the container.
    pub fn flush(&mut self) -> Result<(), ManiacEncodeErrors> {
        // commit the smallest 16 bit aligned value inside the interval
        self.low += MIN_RANGE - 1;
        self.low &= !(MIN_RANGE - 1);

        // drain the 24 bit window through the carry machinery
        self.range = 1;
        self.output()?;

        if let Some(pending) = self.delayed_byte.take() {
            self.io.write_byte(pending)?;
            for _ in 0..self.delayed_count {
                self.io.write_byte(0xFF)?;
            }
            self.delayed_count = 0;
        }
        self.io.flush_bytes()?;
        Ok(())
    }

    /// Destroy the encoder returning the underlying byte sink
    pub fn into_inner(self) -> T {
        self.io
    }
}

#[cfg(test)]
mod tests {
    use flif_core::bytestream::ByteCursor;
    use nanorand::{Rng, WyRand};

    use super::*;

    #[test]
    fn empty_stream_is_three_bytes() {
        let mut sink = vec![];
        let mut enc = RacEncoder::new(&mut sink);
        enc.flush().unwrap();
        assert_eq!(sink.len(), 3);

        RacDecoder::new(ByteCursor::new(sink)).unwrap();
    }

    #[test]
    fn bit_roundtrip_with_fixed_chances() {
        let mut rng = WyRand::new_seed(0x1337);
        let chances = [1_u16, 7, 100, 1000, 2048, 3000, 4000, 4095];

        let mut bits = vec![];
        for _ in 0..4096 {
            let chance = chances[rng.generate_range(0..chances.len())];
            bits.push((chance, rng.generate::<bool>()));
        }

        let mut sink = vec![];
        let mut enc = RacEncoder::new(&mut sink);
        for (chance, bit) in &bits {
            enc.write_12bit_chance(*chance, *bit).unwrap();
        }
        enc.flush().unwrap();

        let mut dec = RacDecoder::new(ByteCursor::new(sink)).unwrap();
        for (chance, bit) in &bits {
            assert_eq!(dec.read_12bit_chance(*chance).unwrap(), *bit);
        }
    }

    #[test]
    fn decoder_consumes_exactly_what_the_encoder_emitted() {
        let mut rng = WyRand::new_seed(99);

        let mut bits = vec![];
        for _ in 0..1000 {
            // skewed chances exercise long runs and the carry path
            bits.push((17_u16, rng.generate_range(0_u32..100) < 95));
        }

        let mut sink = vec![];
        let mut enc = RacEncoder::new(&mut sink);
        for (chance, bit) in &bits {
            enc.write_12bit_chance(*chance, *bit).unwrap();
        }
        enc.flush().unwrap();
        let emitted = sink.len();

        let mut dec = RacDecoder::new(ByteCursor::new(sink)).unwrap();
        for (chance, bit) in &bits {
            assert_eq!(dec.read_12bit_chance(*chance).unwrap(), *bit);
        }
        assert_eq!(dec.into_inner().position(), emitted);
    }

    #[test]
    fn truncated_stream_errors_out() {
        let mut sink = vec![];
        let mut enc = RacEncoder::new(&mut sink);
        for _ in 0..256 {
            enc.write_12bit_chance(2048, true).unwrap();
        }
        enc.flush().unwrap();

        sink.truncate(sink.len() / 2);

        let mut dec = RacDecoder::new(ByteCursor::new(sink)).unwrap();
        let mut result = Ok(true);
        for _ in 0..256 {
            result = dec.read_12bit_chance(2048);
            if result.is_err() {
                break;
            }
        }
        assert!(matches!(result, Err(ManiacDecodeErrors::StreamTruncated)));
    }
}
