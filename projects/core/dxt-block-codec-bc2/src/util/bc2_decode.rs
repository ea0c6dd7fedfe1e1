//! BC2 (DXT2/DXT3) decoding implementation; based on etcpak
//! <https://github.com/wolfpld/etcpak> and MSDN
//! <https://learn.microsoft.com/en-us/windows/win32/direct3d10/d3d10-graphics-programming-guide-resources-block-compression#bc2>
//!
//! Uses the 'ideal' rounding/computing method described in the DX9 docs, as opposed to DX10, AMD or Nvidia
//! method.

use core::ptr;

use crate::alpha::{decode_explicit_alpha, EXPLICIT_ALPHA_SIZE};
use crate::BC2_BLOCK_SIZE;
use dxt_block_codec_common::{
    colour_block::{ColourBlock, PaletteMode, COLOUR_BLOCK_SIZE},
    decoded_4x4_block::Decoded4x4Block,
};

/// Decodes a BC2 block into a structured representation of pixels
///
/// # Parameters
///
/// - `src`: Pointer to the source BC2 block (must point to at least 16 bytes of valid memory)
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
/// use dxt_block_codec_bc2::util::decode_bc2_block;
///
/// let bc2_block = [0u8; 16]; // Compressed BC2 block
///
/// unsafe {
///     let decoded = decode_bc2_block(bc2_block.as_ptr());
///     let pixel_at_0_0 = decoded.get_pixel_unchecked(0, 0);
/// }
/// ```
#[inline]
pub unsafe fn decode_bc2_block(src: *const u8) -> Decoded4x4Block {
    let alpha_bytes = ptr::read_unaligned(src as *const [u8; EXPLICIT_ALPHA_SIZE]);
    // Last 8 bytes contain the color data (same format as BC1)
    let colour_bytes =
        ptr::read_unaligned(src.add(EXPLICIT_ALPHA_SIZE) as *const [u8; COLOUR_BLOCK_SIZE]);

    // BC2 always uses the 4-color mode regardless of c0/c1 comparison
    let mut pixels = ColourBlock::from_bytes(&colour_bytes).decode(PaletteMode::FourColour);
    let alpha = decode_explicit_alpha(&alpha_bytes);
    for (pixel, &a) in pixels.iter_mut().zip(alpha.iter()) {
        pixel.a = a;
    }

    Decoded4x4Block { pixels }
}

/// Safely wraps the unsafe [`decode_bc2_block`] function for use with slices
///
/// # Returns
///
/// A decoded block, else [`None`] if the slice is too short.
#[inline]
pub fn decode_bc2_block_from_slice(src: &[u8]) -> Option<Decoded4x4Block> {
    if src.len() < BC2_BLOCK_SIZE {
        return None;
    }
    unsafe { Some(decode_bc2_block(src.as_ptr())) }
}
