//! # Explicit Alpha
//!
//! BC2 stores alpha directly, 4 bits per pixel:
//!
//! ```text
//! bytes 0-7: 16 x 4-bit alpha, pixel i in byte i / 2, even pixels in the low nibble
//! ```
//!
//! Every pixel is quantised, masked or not. Decoding expands `q` to `q * 17`.

/// Size of an explicit alpha block in bytes.
pub const EXPLICIT_ALPHA_SIZE: usize = 8;

/// Rounds an 8-bit alpha to the nearest 4-bit level.
#[inline]
pub const fn quantise_alpha(alpha: u8) -> u8 {
    ((alpha as u32 * 15 + 127) / 255) as u8
}

/// Expands a 4-bit alpha level to 8 bits.
#[inline]
pub const fn expand_alpha(level: u8) -> u8 {
    (level & 0x0F) * 17
}

/// Packs the alpha of 16 pixels (row-major).
pub fn encode_explicit_alpha(alpha: &[u8; 16]) -> [u8; EXPLICIT_ALPHA_SIZE] {
    let mut bytes = [0u8; EXPLICIT_ALPHA_SIZE];
    for (i, &value) in alpha.iter().enumerate() {
        let level = quantise_alpha(value);
        bytes[i / 2] |= level << ((i & 1) * 4);
    }
    bytes
}

/// Unpacks 16 alpha values (row-major), already expanded to 8 bits.
pub fn decode_explicit_alpha(bytes: &[u8; EXPLICIT_ALPHA_SIZE]) -> [u8; 16] {
    let mut alpha = [0u8; 16];
    for (i, value) in alpha.iter_mut().enumerate() {
        *value = expand_alpha(bytes[i / 2] >> ((i & 1) * 4));
    }
    alpha
}
