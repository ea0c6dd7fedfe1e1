use crate::BC1_BLOCK_SIZE;
use dxt_block_codec_common::{
    colour_fit::compress_colours, colour_set::ColourSet, decoded_4x4_block::Decoded4x4Block,
    settings::CompressionSettings,
};

/// Compresses a 4x4 block of pixels into a BC1 block.
///
/// With [`CompressionSettings::punch_through_alpha`] set, pixels with alpha below 128 decode
/// as transparent black and the block is forced into 3 colour mode. Otherwise alpha is ignored
/// and the whole block decodes opaque.
///
/// # Parameters
///
/// - `block`: The pixels to compress, row-major
/// - `mask`: Bit `i` set means pixel `i` is considered by the fit; masked pixels still receive
///   the palette entry nearest to their colour
/// - `settings`: Fit strategy, metric and weighting
///
/// # Example
///
/// ```
/// use dxt_block_codec_bc1::{compress_bc1_block, util::decode_bc1_block_from_slice};
/// use dxt_block_codec_common::color_8888::Color8888;
/// use dxt_block_codec_common::colour_set::ALL_PIXELS;
/// use dxt_block_codec_common::decoded_4x4_block::Decoded4x4Block;
/// use dxt_block_codec_common::settings::CompressionSettings;
///
/// let block = Decoded4x4Block::new(Color8888::new(255, 0, 0, 255));
/// let compressed = compress_bc1_block(&block, ALL_PIXELS, &CompressionSettings::default());
/// let decoded = decode_bc1_block_from_slice(&compressed).unwrap();
/// assert_eq!(decoded, block);
/// ```
pub fn compress_bc1_block(
    block: &Decoded4x4Block,
    mask: u16,
    settings: &CompressionSettings,
) -> [u8; BC1_BLOCK_SIZE] {
    let set = ColourSet::new(block, mask, settings.colour_set_options(true));
    compress_colours(&set, settings, true).to_bytes()
}
