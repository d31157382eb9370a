/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Valid-range oracles for color planes.
//!
//! The entropy core codes every sample inside a `[min, max]` interval
//! supplied by the active range oracle; the tighter the interval, the
//! smaller the alphabet the coder sees. [`ColorRanges`] is a closed
//! family: the plain per-plane limits of the source image, and the
//! conditional limits after the YCoCg transform.

use alloc::vec::Vec;

use crate::ycocg::YCoCgRanges;

/// A single sample of a color plane
pub type ColorValue = i32;

/// Static per plane `[min, max]` limits as they come from the container
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SourceRanges {
    ranges: Vec<(ColorValue, ColorValue)>
}

impl SourceRanges {
    /// Create limits from one `(min, max)` pair per plane
    ///
    /// # Panics
    /// If any pair has `min > max`
    pub fn new(ranges: Vec<(ColorValue, ColorValue)>) -> SourceRanges {
        for (min, max) in &ranges {
            assert!(min <= max, "plane range [{min}, {max}] is inverted");
        }
        SourceRanges { ranges }
    }

    pub(crate) fn num_planes(&self) -> usize {
        self.ranges.len()
    }

    pub(crate) fn min(&self, plane: usize) -> ColorValue {
        self.ranges[plane].0
    }

    pub(crate) fn max(&self, plane: usize) -> ColorValue {
        self.ranges[plane].1
    }
}

/// The range oracle consulted while coding samples.
///
/// `minmax` may depend on the already decoded planes of the same pixel;
/// a returned pair with `min > max` is the sentinel for an unreachable
/// state and such a sample must be skipped, never coded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ColorRanges {
    /// Limits of the untransformed source planes
    Source(SourceRanges),
    /// Limits after the reversible YCoCg transform
    YCoCg(YCoCgRanges)
}

impl ColorRanges {
    /// Number of planes the oracle covers
    pub fn num_planes(&self) -> usize {
        match self {
            ColorRanges::Source(ranges) => ranges.num_planes(),
            ColorRanges::YCoCg(ranges) => ranges.num_planes()
        }
    }

    /// Unconditional lower bound of `plane`
    pub fn min(&self, plane: usize) -> ColorValue {
        match self {
            ColorRanges::Source(ranges) => ranges.min(plane),
            ColorRanges::YCoCg(ranges) => ranges.min(plane)
        }
    }

    /// Unconditional upper bound of `plane`
    pub fn max(&self, plane: usize) -> ColorValue {
        match self {
            ColorRanges::Source(ranges) => ranges.max(plane),
            ColorRanges::YCoCg(ranges) => ranges.max(plane)
        }
    }

    /// Bounds of `plane` given the previous planes of the same pixel
    pub fn minmax(&self, plane: usize, prev_planes: &[ColorValue]) -> (ColorValue, ColorValue) {
        match self {
            ColorRanges::Source(ranges) => (ranges.min(plane), ranges.max(plane)),
            ColorRanges::YCoCg(ranges) => ranges.minmax(plane, prev_planes)
        }
    }
}
