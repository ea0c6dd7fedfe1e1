use crate::alpha::{encode_explicit_alpha, EXPLICIT_ALPHA_SIZE};
use crate::BC2_BLOCK_SIZE;
use dxt_block_codec_common::{
    colour_fit::compress_colours, colour_set::ColourSet, decoded_4x4_block::Decoded4x4Block,
    settings::CompressionSettings,
};

/// Compresses a 4x4 block of pixels into a BC2 block.
///
/// Alpha is quantised per pixel for every pixel, masked or not.
/// The colour block never uses the 3 colour palette, and
/// [`CompressionSettings::punch_through_alpha`] has no effect.
///
/// # Parameters
///
/// - `block`: The pixels to compress, row-major
/// - `mask`: Bit `i` set means pixel `i` is considered by the colour fit
/// - `settings`: Fit strategy, metric and weighting
pub fn compress_bc2_block(
    block: &Decoded4x4Block,
    mask: u16,
    settings: &CompressionSettings,
) -> [u8; BC2_BLOCK_SIZE] {
    let mut alpha = [0u8; 16];
    for (value, pixel) in alpha.iter_mut().zip(block.pixels.iter()) {
        *value = pixel.a;
    }

    let set = ColourSet::new(block, mask, settings.colour_set_options(false));
    let colour = compress_colours(&set, settings, false).to_bytes();

    let mut result = [0u8; BC2_BLOCK_SIZE];
    result[..EXPLICIT_ALPHA_SIZE].copy_from_slice(&encode_explicit_alpha(&alpha));
    result[EXPLICIT_ALPHA_SIZE..].copy_from_slice(&colour);
    result
}
