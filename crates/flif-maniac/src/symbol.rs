/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Structured coding of signed integers.
//!
//! A signed value in `[min, max]` is coded as a zero flag, a sign, a
//! unary exponent and a mantissa, each bit under its own adaptive
//! context from a [`SymbolChance`] bundle. At every step both sides
//! recompute the interval of still possible values from the bits coded
//! so far; any bit whose outcome is forced by that interval is elided,
//! so encoder and decoder must derive identical forcings.

use flif_core::bytestream::{ByteReaderTrait, ByteWriterTrait};

use crate::chance::{BitChance, ChanceTable};
use crate::constants::SYMBOL_BITS;
use crate::errors::{ManiacDecodeErrors, ManiacEncodeErrors};
use crate::rac::{RacDecoder, RacEncoder};

/// Slots in a bundle: zero, sign, one exponent and one mantissa context
/// per bit of the budget
const SLOTS: usize = 2 * SYMBOL_BITS + 2;

// Starting probabilities (of the bit being zero) for fresh bundles.
// Biased so that near-zero magnitudes start out cheap.
const ZERO_CHANCE: u16 = 3096;
const SIGN_CHANCE: u16 = 2048;
const MANT_CHANCE: u16 = 3072;
const EXP_CHANCES: [u16; SYMBOL_BITS] = [
    3200, 2800, 2600, 2400, 2000, 1500, 800, 300, 300, 300, 300, 300, 300, 300, 300, 300, 300, 300
];

/// Addresses of the individual contexts inside a [`SymbolChance`]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SymbolBit {
    /// The value is zero
    Zero,
    /// The value is positive
    Sign,
    /// The magnitude is at least `2^(i + 1)`
    Exp(usize),
    /// Mantissa bit `i` of the magnitude
    Mant(usize)
}

/// A bundle of adaptive contexts covering one integer distribution
#[derive(Clone, Debug)]
pub struct SymbolChance {
    chances: [BitChance; SLOTS]
}

impl SymbolChance {
    /// Create a bundle with the standard starting probabilities
    pub fn new() -> SymbolChance {
        let mut chances = [BitChance::default(); SLOTS];
        chances[0].set_12bit(ZERO_CHANCE);
        chances[1].set_12bit(SIGN_CHANCE);
        for (i, chance) in EXP_CHANCES.iter().enumerate() {
            chances[2 + i].set_12bit(*chance);
        }
        for slot in chances[2 + SYMBOL_BITS..].iter_mut() {
            slot.set_12bit(MANT_CHANCE);
        }
        SymbolChance { chances }
    }

    #[inline(always)]
    pub(crate) fn bit(&mut self, bit: SymbolBit) -> &mut BitChance {
        match bit {
            SymbolBit::Zero => &mut self.chances[0],
            SymbolBit::Sign => &mut self.chances[1],
            SymbolBit::Exp(i) => &mut self.chances[2 + i],
            SymbolBit::Mant(i) => &mut self.chances[2 + SYMBOL_BITS + i]
        }
    }
}

impl Default for SymbolChance {
    fn default() -> SymbolChance {
        SymbolChance::new()
    }
}

/// Reads context bits for one symbol, adapting the bundle as it goes
pub(crate) struct SymbolBitReader<'a, T: ByteReaderTrait> {
    pub rac:     &'a mut RacDecoder<T>,
    pub chances: &'a mut SymbolChance,
    pub table:   &'a ChanceTable
}

impl<T: ByteReaderTrait> SymbolBitReader<'_, T> {
    #[inline]
    fn read(&mut self, bit: SymbolBit) -> Result<bool, ManiacDecodeErrors> {
        let chance = self.chances.bit(bit).get_12bit();
        let value = self.rac.read_12bit_chance(chance)?;
        self.chances.bit(bit).put(value, self.table);
        Ok(value)
    }
}

/// Writes context bits for one symbol, adapting the bundle as it goes
pub(crate) struct SymbolBitWriter<'a, T: ByteWriterTrait> {
    pub rac:     &'a mut RacEncoder<T>,
    pub chances: &'a mut SymbolChance,
    pub table:   &'a ChanceTable
}

impl<T: ByteWriterTrait> SymbolBitWriter<'_, T> {
    #[inline]
    fn write(&mut self, bit: SymbolBit, value: bool) -> Result<(), ManiacEncodeErrors> {
        let chance = self.chances.bit(bit).get_12bit();
        self.rac.write_12bit_chance(chance, value)?;
        self.chances.bit(bit).put(value, self.table);
        Ok(())
    }
}

/// Decode a signed value from `[min, max]`.
///
/// Must consume exactly the bits the matching [`write_int`] emitted.
pub(crate) fn read_int<T: ByteReaderTrait>(
    coder: &mut SymbolBitReader<T>, min: i32, max: i32
) -> Result<i32, ManiacDecodeErrors> {
    assert!(min <= max);
    if min == max {
        return Ok(min);
    }
    let (mut min, mut max) = (min, max);

    let sign;
    if max >= 0 && min <= 0 {
        if coder.read(SymbolBit::Zero)? {
            return Ok(0);
        }
        if min < 0 {
            if max > 0 {
                sign = coder.read(SymbolBit::Sign)?;
            } else {
                sign = false;
            }
        } else {
            sign = true;
        }
        if sign {
            min = 1;
        } else {
            max = -1;
        }
    } else {
        // zero is out of range so the sign is implied
        sign = min > 0;
    }

    let amin = if sign { min as u32 } else { -max as u32 };
    let amax = if sign { max as u32 } else { -min as u32 };
    debug_assert!(amax < 1 << SYMBOL_BITS);

    let emax = amax.ilog2();
    let mut e = amin.ilog2();
    while e < emax {
        // a one continues to a larger exponent, a zero stops at e
        if !coder.read(SymbolBit::Exp(e as usize))? {
            break;
        }
        e += 1;
    }

    let mut have = 1_u32 << e;
    for pos in (0..e).rev() {
        let left = (1_u32 << pos) - 1;
        let minabs1 = have | (1 << pos);
        let maxabs0 = have | left;
        if minabs1 > amax {
            // a set bit would overshoot, the bit is implied zero
        } else if maxabs0 >= amin {
            if coder.read(SymbolBit::Mant(pos as usize))? {
                have = minabs1;
            }
        } else {
            // a clear bit would undershoot, the bit is implied one
            have = minabs1;
        }
    }

    Ok(if sign { have as i32 } else { -(have as i32) })
}

/// Encode a signed `value` from `[min, max]`
pub(crate) fn write_int<T: ByteWriterTrait>(
    coder: &mut SymbolBitWriter<T>, min: i32, max: i32, value: i32
) -> Result<(), ManiacEncodeErrors> {
    assert!(min <= value && value <= max);
    if min == max {
        return Ok(());
    }
    let (mut min, mut max) = (min, max);

    let sign;
    if max >= 0 && min <= 0 {
        coder.write(SymbolBit::Zero, value == 0)?;
        if value == 0 {
            return Ok(());
        }
        sign = value > 0;
        if min < 0 && max > 0 {
            coder.write(SymbolBit::Sign, sign)?;
        }
        if sign {
            min = 1;
        } else {
            max = -1;
        }
    } else {
        sign = min > 0;
    }

    let amin = if sign { min as u32 } else { -max as u32 };
    let amax = if sign { max as u32 } else { -min as u32 };
    let a = value.unsigned_abs();
    debug_assert!(amax < 1 << SYMBOL_BITS);

    let emax = amax.ilog2();
    let e = a.ilog2();
    for i in amin.ilog2()..e {
        coder.write(SymbolBit::Exp(i as usize), true)?;
    }
    if e < emax {
        coder.write(SymbolBit::Exp(e as usize), false)?;
    }

    let mut have = 1_u32 << e;
    for pos in (0..e).rev() {
        let left = (1_u32 << pos) - 1;
        let minabs1 = have | (1 << pos);
        let maxabs0 = have | left;
        if minabs1 > amax {
            // implied zero
        } else if maxabs0 >= amin {
            let bit = a & (1 << pos) != 0;
            coder.write(SymbolBit::Mant(pos as usize), bit)?;
            if bit {
                have = minabs1;
            }
        } else {
            // implied one
            have = minabs1;
        }
    }
    debug_assert_eq!(have, a);

    Ok(())
}

/// Decode a sign and `nbits` magnitude bits without range pruning
pub(crate) fn read_int_bits<T: ByteReaderTrait>(
    coder: &mut SymbolBitReader<T>, nbits: usize
) -> Result<i32, ManiacDecodeErrors> {
    debug_assert!(nbits <= SYMBOL_BITS);
    let sign = coder.read(SymbolBit::Sign)?;
    let mut value: i32 = 0;
    for pos in (0..nbits).rev() {
        if coder.read(SymbolBit::Mant(pos))? {
            value |= 1 << pos;
        }
    }
    Ok(if sign { value } else { -value })
}

/// Encode a sign and `nbits` magnitude bits without range pruning
pub(crate) fn write_int_bits<T: ByteWriterTrait>(
    coder: &mut SymbolBitWriter<T>, nbits: usize, value: i32
) -> Result<(), ManiacEncodeErrors> {
    debug_assert!(nbits <= SYMBOL_BITS);
    debug_assert!(value.unsigned_abs() < 1 << nbits);
    coder.write(SymbolBit::Sign, value >= 0)?;
    let a = value.unsigned_abs();
    for pos in (0..nbits).rev() {
        coder.write(SymbolBit::Mant(pos), a & (1 << pos) != 0)?;
    }
    Ok(())
}

/// An integer coder with a single context bundle.
///
/// This is the coder the tree serializer runs on; the per-leaf variant
/// lives in [`PropertySymbolCoder`](crate::tree::PropertySymbolCoder).
pub struct SimpleSymbolCoder {
    chances: SymbolChance,
    table:   ChanceTable
}

impl SimpleSymbolCoder {
    /// Create a coder whose transition table uses `(cut, alpha)`
    pub fn new(cut: u16, alpha: u32) -> SimpleSymbolCoder {
        SimpleSymbolCoder {
            chances: SymbolChance::new(),
            table:   ChanceTable::new(cut, alpha)
        }
    }

    /// Decode a value in `[min, max]`
    pub fn read_int<T: ByteReaderTrait>(
        &mut self, rac: &mut RacDecoder<T>, min: i32, max: i32
    ) -> Result<i32, ManiacDecodeErrors> {
        let mut bits = SymbolBitReader {
            rac,
            chances: &mut self.chances,
            table: &self.table
        };
        read_int(&mut bits, min, max)
    }

    /// Encode a value in `[min, max]`
    pub fn write_int<T: ByteWriterTrait>(
        &mut self, rac: &mut RacEncoder<T>, min: i32, max: i32, value: i32
    ) -> Result<(), ManiacEncodeErrors> {
        let mut bits = SymbolBitWriter {
            rac,
            chances: &mut self.chances,
            table: &self.table
        };
        write_int(&mut bits, min, max, value)
    }

    /// Decode a sign and `nbits` magnitude bits
    pub fn read_int_bits<T: ByteReaderTrait>(
        &mut self, rac: &mut RacDecoder<T>, nbits: usize
    ) -> Result<i32, ManiacDecodeErrors> {
        let mut bits = SymbolBitReader {
            rac,
            chances: &mut self.chances,
            table: &self.table
        };
        read_int_bits(&mut bits, nbits)
    }

    /// Encode a sign and `nbits` magnitude bits
    pub fn write_int_bits<T: ByteWriterTrait>(
        &mut self, rac: &mut RacEncoder<T>, nbits: usize, value: i32
    ) -> Result<(), ManiacEncodeErrors> {
        let mut bits = SymbolBitWriter {
            rac,
            chances: &mut self.chances,
            table: &self.table
        };
        write_int_bits(&mut bits, nbits, value)
    }
}

#[cfg(test)]
mod tests {
    use flif_core::bytestream::ByteCursor;
    use nanorand::{Rng, WyRand};

    use super::*;
    use crate::constants::{SIMPLE_CODER_ALPHA, SIMPLE_CODER_CUT};

    fn coder() -> SimpleSymbolCoder {
        SimpleSymbolCoder::new(SIMPLE_CODER_CUT, SIMPLE_CODER_ALPHA)
    }

    #[test]
    fn singleton_range_consumes_no_bits() {
        let mut sink = vec![];
        let mut rac = RacEncoder::new(&mut sink);
        coder().write_int(&mut rac, 7, 7, 7).unwrap();
        rac.flush().unwrap();
        // nothing but the flush residue
        assert_eq!(sink.len(), 3);

        let mut rac = RacDecoder::new(ByteCursor::new(sink)).unwrap();
        assert_eq!(coder().read_int(&mut rac, 7, 7).unwrap(), 7);
    }

    #[test]
    fn zero_in_tiny_range_codes_one_bit() {
        let mut sink = vec![];
        let mut rac = RacEncoder::new(&mut sink);
        coder().write_int(&mut rac, -1, 1, 0).unwrap();
        rac.flush().unwrap();
        // a single likely bit stays inside the flush residue
        assert_eq!(sink.len(), 3);

        let mut rac = RacDecoder::new(ByteCursor::new(sink)).unwrap();
        assert_eq!(coder().read_int(&mut rac, -1, 1).unwrap(), 0);
    }

    #[test]
    fn forced_sign_and_forced_bits_roundtrip() {
        let ranges = [(5, 10), (-10, -5), (1, 1 << 17), (-(1 << 17), -1), (0, 1), (-1, 0)];

        let mut values = vec![];
        let mut rng = WyRand::new_seed(7);
        for (min, max) in ranges {
            for _ in 0..64 {
                let value = min + (rng.generate_range(0..=(max - min) as u32)) as i32;
                values.push((min, max, value));
            }
        }

        let mut sink = vec![];
        let mut rac = RacEncoder::new(&mut sink);
        let mut enc = coder();
        for (min, max, value) in &values {
            enc.write_int(&mut rac, *min, *max, *value).unwrap();
        }
        rac.flush().unwrap();

        let mut rac = RacDecoder::new(ByteCursor::new(sink)).unwrap();
        let mut dec = coder();
        for (min, max, value) in &values {
            assert_eq!(dec.read_int(&mut rac, *min, *max).unwrap(), *value);
        }
    }

    #[test]
    fn nbits_form_roundtrips() {
        let mut rng = WyRand::new_seed(21);
        let mut values = vec![];
        for _ in 0..512 {
            let magnitude = (rng.generate::<u32>() & 0x3FF) as i32;
            let value = if rng.generate::<bool>() { magnitude } else { -magnitude };
            values.push(value);
        }

        let mut sink = vec![];
        let mut rac = RacEncoder::new(&mut sink);
        let mut enc = coder();
        for value in &values {
            enc.write_int_bits(&mut rac, 10, *value).unwrap();
        }
        rac.flush().unwrap();

        let mut rac = RacDecoder::new(ByteCursor::new(sink)).unwrap();
        let mut dec = coder();
        for value in &values {
            assert_eq!(dec.read_int_bits(&mut rac, 10).unwrap(), *value);
        }
    }
}
