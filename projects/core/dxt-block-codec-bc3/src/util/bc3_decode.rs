//! BC3 (DXT4/DXT5) decoding implementation; based on etcpak
//! <https://github.com/wolfpld/etcpak> and MSDN
//! <https://learn.microsoft.com/en-us/windows/win32/direct3d10/d3d10-graphics-programming-guide-resources-block-compression#bc3>
//!
//! Uses the 'ideal' rounding/computing method described in the DX9 docs, as opposed to DX10, AMD or Nvidia
//! method.

use core::ptr;

use crate::alpha::{AlphaBlock, INTERPOLATED_ALPHA_SIZE};
use crate::BC3_BLOCK_SIZE;
use dxt_block_codec_common::{
    colour_block::{ColourBlock, PaletteMode, COLOUR_BLOCK_SIZE},
    decoded_4x4_block::Decoded4x4Block,
};

/// Decodes a BC3 block into a structured representation of pixels
///
/// # Parameters
///
/// - `src`: Pointer to the source BC3 block (must point to at least 16 bytes of valid memory)
///
/// # Returns
///
/// A [`Decoded4x4Block`] containing all 16 decoded pixels with alpha
///
/// # Safety
///
/// The caller must ensure that `src` points to at least 16 bytes of valid memory.
///
/// # Example
///
/// ```
/// use dxt_block_codec_bc3::util::decode_bc3_block;
///
/// let bc3_block = [0u8; 16]; // Compressed BC3 block
///
/// unsafe {
///     let decoded = decode_bc3_block(bc3_block.as_ptr());
///     let pixel_at_0_0 = decoded.get_pixel_unchecked(0, 0);
/// }
/// ```
#[inline]
pub unsafe fn decode_bc3_block(src: *const u8) -> Decoded4x4Block {
    // First 8 bytes contain the BC4 compressed alpha data
    let alpha_bytes = ptr::read_unaligned(src as *const [u8; INTERPOLATED_ALPHA_SIZE]);
    let colour_bytes =
        ptr::read_unaligned(src.add(INTERPOLATED_ALPHA_SIZE) as *const [u8; COLOUR_BLOCK_SIZE]);

    // BC3 always uses the 4-color mode regardless of c0/c1 comparison
    let mut pixels = ColourBlock::from_bytes(&colour_bytes).decode(PaletteMode::FourColour);
    let alpha = AlphaBlock::from_bytes(&alpha_bytes).decode();
    for (pixel, &a) in pixels.iter_mut().zip(alpha.iter()) {
        pixel.a = a;
    }

    Decoded4x4Block { pixels }
}

/// Safely wraps the unsafe [`decode_bc3_block`] function for use with slices
///
/// # Returns
///
/// A decoded block, else [`None`] if the slice is too short.
#[inline]
pub fn decode_bc3_block_from_slice(src: &[u8]) -> Option<Decoded4x4Block> {
    if src.len() < BC3_BLOCK_SIZE {
        return None;
    }
    unsafe { Some(decode_bc3_block(src.as_ptr())) }
}

#[cfg(test)]
mod tests {
    use super::*;

    // There is also a fuzz test against rgbcx-sys, so this is minimal/very basic.

    #[test]
    fn can_decode_bc3_block() {
        let bc3_block = [
            // Alpha data (BC4 compression)
            0, 0, 0, 255, 255, 255, 255, 255, // Color data (BC1-style format)
            255, 255, // c0 = R:31 G:63 B:31 (white)
            255, 255, // c1 = R:31 G:63 B:31 (white)
            0, 0, 0, 0, // All pixels use index 0
        ];

        let decoded = decode_bc3_block_from_slice(&bc3_block).unwrap();

        // a0 == a1 selects the 6 value ramp. Pixels 0-1 use code 0, pixel 2 straddles
        // the first 0xFF byte (code 4, still 0) and the rest use code 7 (255).
        let mut expected = [255u8; 16];
        expected[0] = 0;
        expected[1] = 0;
        expected[2] = 0;
        for (i, pixel) in decoded.pixels.iter().enumerate() {
            assert_eq!((pixel.r, pixel.g, pixel.b), (255, 255, 255));
            assert_eq!(pixel.a, expected[i], "pixel {i}");
        }
    }

    #[test]
    fn test_slice_too_small() {
        let bc3_block = [0u8; 15]; // BC3 requires 16 bytes
        assert!(decode_bc3_block_from_slice(&bc3_block).is_none());
    }
}
