//! BC1 (DXT1) decoding implementation; based on etcpak
//! <https://github.com/wolfpld/etcpak> and MSDN
//! <https://learn.microsoft.com/en-us/windows/win32/direct3d9/opaque-and-1-bit-alpha-textures>
//!
//! Uses the 'ideal' rounding/computing method described in the DX9 docs, as opposed to DX10, AMD or Nvidia
//! method. The encoder scores its candidates against the same palette.

use core::ptr;

use crate::BC1_BLOCK_SIZE;
use dxt_block_codec_common::{
    colour_block::{ColourBlock, PaletteMode},
    decoded_4x4_block::Decoded4x4Block,
};

/// Decodes a BC1 block into a structured representation of pixels
///
/// Index 3 of a 3 colour block decodes to transparent black; every other pixel is opaque.
///
/// # Parameters
///
/// - `src`: Pointer to the source BC1 block (must point to at least 8 bytes of valid memory)
///
/// # Returns
///
/// A [`Decoded4x4Block`] containing all 16 decoded pixels
///
/// # Safety
///
/// The caller must ensure that `src` points to at least 8 bytes of valid memory.
///
/// # Example
///
/// ```
/// use dxt_block_codec_bc1::util::decode_bc1_block;
///
/// let bc1_block = [0u8; 8]; // Compressed BC1 block
///
/// unsafe {
///     let decoded = decode_bc1_block(bc1_block.as_ptr());
///     let pixel_at_0_0 = decoded.get_pixel_unchecked(0, 0);
/// }
/// ```
#[inline]
pub unsafe fn decode_bc1_block(src: *const u8) -> Decoded4x4Block {
    let bytes = ptr::read_unaligned(src as *const [u8; BC1_BLOCK_SIZE]);
    let block = ColourBlock::from_bytes(&bytes);
    let mode = PaletteMode::for_bc1_endpoints(block.endpoints[0], block.endpoints[1]);

    Decoded4x4Block {
        pixels: block.decode(mode),
    }
}

/// Safely wraps the unsafe [`decode_bc1_block`] function for use with slices
///
/// # Returns
///
/// A decoded block, else [`None`] if the slice is too short.
#[inline]
pub fn decode_bc1_block_from_slice(src: &[u8]) -> Option<Decoded4x4Block> {
    if src.len() < BC1_BLOCK_SIZE {
        return None;
    }
    unsafe { Some(decode_bc1_block(src.as_ptr())) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dxt_block_codec_common::color_8888::Color8888;

    // There is also a fuzz test against rgbcx-sys, so this is minimal.

    #[test]
    fn can_decode_four_colour_block() {
        let block = [
            0x00, 0xF8, // c0 = red
            0x1F, 0x00, // c1 = blue
            0xE4, 0xE4, 0xE4, 0xE4, // indices 0, 1, 2, 3 on every row
        ];
        let decoded = decode_bc1_block_from_slice(&block).unwrap();

        let expected = [
            Color8888::new(255, 0, 0, 255),
            Color8888::new(0, 0, 255, 255),
            Color8888::new(170, 0, 85, 255),
            Color8888::new(85, 0, 170, 255),
        ];
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(decoded.get_pixel(x, y), expected[x], "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn can_decode_three_colour_block_with_transparency() {
        let block = [
            0x1F, 0x00, // c0 = blue
            0x00, 0xF8, // c1 = red, so c0 <= c1
            0xE4, 0xE4, 0xE4, 0xE4,
        ];
        let decoded = decode_bc1_block_from_slice(&block).unwrap();

        assert_eq!(decoded.get_pixel(2, 0), Color8888::new(127, 0, 127, 255));
        assert_eq!(decoded.get_pixel(3, 0), Color8888::new(0, 0, 0, 0));
    }

    #[test]
    fn test_slice_too_small() {
        let block = [0u8; 7];
        assert!(decode_bc1_block_from_slice(&block).is_none());
    }
}
