//! # Interpolated Alpha
//!
//! BC3 (and BC4) alpha: two 8-bit endpoints and a 3-bit code per pixel.
//!
//! ```text
//! byte 0:    a0
//! byte 1:    a1
//! bytes 2-7: 16 x 3-bit codes, little endian, pixel i at bit 3i
//! ```
//!
//! The endpoint order selects the ramp:
//!
//! - `a0 > a1`: 8 values, `a0`, `a1` and six interpolants in sevenths.
//! - `a0 <= a1`: 6 values, `a0`, `a1` and four interpolants in fifths, then the
//!   fixed values 0 (code 6) and 255 (code 7).
//!
//! The encoder fits both ramps and keeps the one with the lower squared error,
//! preferring the 6 value ramp on ties.

use derive_enum_all_values::AllValues;
use dxt_block_codec_common::least_squares::LeastSquaresSums;

/// Size of an interpolated alpha block in bytes.
pub const INTERPOLATED_ALPHA_SIZE: usize = 8;

/// Least squares passes after the min/max start.
const REFINEMENT_ROUNDS: usize = 4;

/// The two interpolation ramps of an alpha block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AllValues)]
pub enum AlphaRamp {
    /// `a0 > a1`: 8 interpolated values.
    EightValue,
    /// `a0 <= a1`: 6 interpolated values plus 0 and 255.
    SixValue,
}

impl AlphaRamp {
    /// The ramp a decoder selects for the endpoints as stored.
    #[inline]
    pub fn for_endpoints(a0: u8, a1: u8) -> Self {
        if a0 > a1 {
            AlphaRamp::EightValue
        } else {
            AlphaRamp::SixValue
        }
    }

    /// Interpolation weight of `a0` for a code, [`None`] for the fixed 0/255 codes.
    fn weight(self, code: u8) -> Option<f32> {
        match (self, code) {
            (_, 0) => Some(1.0),
            (_, 1) => Some(0.0),
            (AlphaRamp::EightValue, 2..=7) => Some((8 - code) as f32 / 7.0),
            (AlphaRamp::SixValue, 2..=5) => Some((6 - code) as f32 / 5.0),
            _ => None,
        }
    }
}

/// Expands two endpoints into the 8 alpha values addressed by the codes.
pub fn alpha_palette(a0: u8, a1: u8) -> [u8; 8] {
    let (a0w, a1w) = (a0 as u16, a1 as u16);
    let mut values = [0u8; 8];
    values[0] = a0;
    values[1] = a1;

    match AlphaRamp::for_endpoints(a0, a1) {
        AlphaRamp::EightValue => {
            for code in 2..8u16 {
                values[code as usize] = (((8 - code) * a0w + (code - 1) * a1w) / 7) as u8;
            }
        }
        AlphaRamp::SixValue => {
            for code in 2..6u16 {
                values[code as usize] = (((6 - code) * a0w + (code - 1) * a1w) / 5) as u8;
            }
            values[6] = 0;
            values[7] = 255;
        }
    }

    values
}

/// Endpoints plus one 3-bit code per pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AlphaBlock {
    /// `a0` and `a1`, in storage order.
    pub endpoints: [u8; 2],
    /// Code of each pixel (row-major), each in `0..8`.
    pub indices: [u8; 16],
}

impl AlphaBlock {
    /// Serializes the block into its 8 byte layout.
    pub fn to_bytes(&self) -> [u8; INTERPOLATED_ALPHA_SIZE] {
        let mut packed = 0u64;
        for (i, &code) in self.indices.iter().enumerate() {
            debug_assert!(code < 8, "alpha code {code} out of range");
            packed |= ((code & 0b111) as u64) << (i * 3);
        }

        let codes = packed.to_le_bytes();
        let mut bytes = [0u8; INTERPOLATED_ALPHA_SIZE];
        bytes[0] = self.endpoints[0];
        bytes[1] = self.endpoints[1];
        bytes[2..].copy_from_slice(&codes[..6]);
        bytes
    }

    /// Deserializes a block from its 8 byte layout.
    pub fn from_bytes(bytes: &[u8; INTERPOLATED_ALPHA_SIZE]) -> Self {
        let mut codes = [0u8; 8];
        codes[..6].copy_from_slice(&bytes[2..]);
        let packed = u64::from_le_bytes(codes);

        let mut indices = [0u8; 16];
        for (i, code) in indices.iter_mut().enumerate() {
            *code = ((packed >> (i * 3)) & 0b111) as u8;
        }

        Self {
            endpoints: [bytes[0], bytes[1]],
            indices,
        }
    }

    /// The ramp this block decodes with.
    #[inline]
    pub fn ramp(&self) -> AlphaRamp {
        AlphaRamp::for_endpoints(self.endpoints[0], self.endpoints[1])
    }

    /// Resolves every code to its alpha value.
    pub fn decode(&self) -> [u8; 16] {
        let palette = alpha_palette(self.endpoints[0], self.endpoints[1]);
        let mut alpha = [0u8; 16];
        for (value, &code) in alpha.iter_mut().zip(self.indices.iter()) {
            *value = palette[(code & 0b111) as usize];
        }
        alpha
    }
}

/// Distinct unmasked alpha values with their pixel counts, in first-occurrence order.
struct AlphaValues {
    values: [u8; 16],
    counts: [u32; 16],
    len: usize,
    /// Entry of each pixel, [`None`] when masked.
    slots: [Option<u8>; 16],
}

impl AlphaValues {
    fn new(alpha: &[u8; 16], mask: u16) -> Self {
        let mut result = Self {
            values: [0; 16],
            counts: [0; 16],
            len: 0,
            slots: [None; 16],
        };

        for (i, &value) in alpha.iter().enumerate() {
            if mask & (1 << i) == 0 {
                continue;
            }
            let entry = match result.values[..result.len].iter().position(|&v| v == value) {
                Some(existing) => existing,
                None => {
                    result.values[result.len] = value;
                    result.len += 1;
                    result.len - 1
                }
            };
            result.counts[entry] += 1;
            result.slots[i] = Some(entry as u8);
        }

        result
    }

    fn iter(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        self.values[..self.len]
            .iter()
            .copied()
            .zip(self.counts[..self.len].iter().copied())
    }
}

#[derive(Debug, Clone, Copy)]
struct AlphaCandidate {
    endpoints: [u8; 2],
    /// Code of each distinct value.
    codes: [u8; 16],
    error: u32,
}

/// Nearest code for `value`, lowest code on ties.
fn nearest_code(palette: &[u8; 8], value: u8) -> (u8, u32) {
    let mut best = (0u8, u32::MAX);
    for (code, &entry) in palette.iter().enumerate() {
        let delta = entry.abs_diff(value) as u32;
        let error = delta * delta;
        if error < best.1 {
            best = (code as u8, error);
        }
    }
    best
}

fn evaluate(values: &AlphaValues, a0: u8, a1: u8) -> AlphaCandidate {
    let palette = alpha_palette(a0, a1);
    let mut codes = [0u8; 16];
    let mut error = 0;
    for (entry, (value, count)) in values.iter().enumerate() {
        let (code, distance) = nearest_code(&palette, value);
        codes[entry] = code;
        error += count * distance;
    }

    AlphaCandidate {
        endpoints: [a0, a1],
        codes,
        error,
    }
}

/// Orders refined endpoints so they still select `ramp`.
fn legalise(ramp: AlphaRamp, a0: u8, a1: u8) -> (u8, u8) {
    match ramp {
        AlphaRamp::EightValue => {
            if a0 > a1 {
                (a0, a1)
            } else if a0 < a1 {
                (a1, a0)
            } else if a0 < 255 {
                (a0 + 1, a1)
            } else {
                (a0, a1 - 1)
            }
        }
        AlphaRamp::SixValue => (a0.min(a1), a0.max(a1)),
    }
}

#[inline]
fn round_to_u8(value: f32) -> u8 {
    // `as` saturates, and maps NaN to 0
    value.round().clamp(0.0, 255.0) as u8
}

/// Best endpoints for one ramp: min/max start, then least squares refinement.
fn fit_ramp(values: &AlphaValues, ramp: AlphaRamp) -> AlphaCandidate {
    let (a0, a1) = match ramp {
        AlphaRamp::EightValue => {
            let min = values.iter().map(|(v, _)| v).min().unwrap_or(0);
            let max = values.iter().map(|(v, _)| v).max().unwrap_or(0);
            legalise(ramp, max, min)
        }
        AlphaRamp::SixValue => {
            // 0 and 255 come from the fixed codes.
            let mut range: Option<(u8, u8)> = None;
            for (value, _) in values.iter().filter(|&(v, _)| v != 0 && v != 255) {
                range = Some(match range {
                    Some((min, max)) => (min.min(value), max.max(value)),
                    None => (value, value),
                });
            }
            range.unwrap_or((0, 0))
        }
    };

    let mut best = evaluate(values, a0, a1);
    let mut current = best;
    for _ in 0..REFINEMENT_ROUNDS {
        if best.error == 0 {
            break;
        }

        let mut sums = LeastSquaresSums::<1>::default();
        for (entry, (value, count)) in values.iter().enumerate() {
            if let Some(alpha) = ramp.weight(current.codes[entry]) {
                sums.add(alpha, count as f32, [value as f32]);
            }
        }

        let (start, end) = sums.solve();
        let (a0, a1) = legalise(ramp, round_to_u8(start[0]), round_to_u8(end[0]));
        if [a0, a1] == current.endpoints {
            break;
        }

        current = evaluate(values, a0, a1);
        if current.error < best.error {
            best = current;
        }
    }

    best
}

/// Compresses the alpha of 16 pixels (row-major).
///
/// # Parameters
///
/// - `alpha`: Source alpha values
/// - `mask`: Bit `i` set means pixel `i` is considered by the fit; masked pixels still receive
///   the code nearest to their own alpha
pub fn compress_interpolated_alpha(alpha: &[u8; 16], mask: u16) -> AlphaBlock {
    let values = AlphaValues::new(alpha, mask);

    let candidate = match values.len {
        0 => evaluate(&values, 0, 0),
        1 => evaluate(&values, values.values[0], values.values[0]),
        _ => {
            let eight = fit_ramp(&values, AlphaRamp::EightValue);
            let six = fit_ramp(&values, AlphaRamp::SixValue);
            if eight.error < six.error {
                eight
            } else {
                six
            }
        }
    };

    let palette = alpha_palette(candidate.endpoints[0], candidate.endpoints[1]);
    let mut indices = [0u8; 16];
    for (i, index) in indices.iter_mut().enumerate() {
        *index = match values.slots[i] {
            Some(entry) => candidate.codes[entry as usize],
            None => nearest_code(&palette, alpha[i]).0,
        };
    }

    AlphaBlock {
        endpoints: candidate.endpoints,
        indices,
    }
}

/// Squared error of a decoded alpha block against its source, over `mask`.
#[cfg(test)]
pub(crate) fn alpha_error(source: &[u8; 16], decoded: &[u8; 16], mask: u16) -> u32 {
    let mut error = 0;
    for (i, (&a, &b)) in source.iter().zip(decoded.iter()).enumerate() {
        if mask & (1 << i) != 0 {
            let delta = a.abs_diff(b) as u32;
            error += delta * delta;
        }
    }
    error
}
