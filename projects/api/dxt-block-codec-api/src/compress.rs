//! Single block compression and decompression.

use crate::{BlockCodecError, BlockFormat, CompressedBlock, CompressionQuality};
use dxt_block_codec_bc1::{compress_bc1_block, util::decode_bc1_block};
use dxt_block_codec_bc2::{compress_bc2_block, util::decode_bc2_block};
use dxt_block_codec_bc3::{compress_bc3_block, util::decode_bc3_block};
use dxt_block_codec_common::colour_set::ALL_PIXELS;
use dxt_block_codec_common::decoded_4x4_block::Decoded4x4Block;
use dxt_block_codec_common::metric::Metric;
use dxt_block_codec_common::settings::CompressionSettings;

/// Compresses 16 pixels into one block.
///
/// # Parameters
///
/// - `pixels`: The block to compress, row-major
/// - `format`: Output format
/// - `quality`: Endpoint search effort
/// - `metric`: Error weighting; [`Metric::UNIFORM`] when `None`
///
/// BC1 output uses punch-through alpha: pixels with alpha below 128 decode transparent.
///
/// # Examples
///
/// ```
/// use dxt_block_codec_api::*;
///
/// let pixels = Decoded4x4Block::new(Color8888::new(0, 255, 0, 255));
/// let block = compress_block(&pixels, BlockFormat::Bc3, CompressionQuality::Fast, None);
/// assert_eq!(block.as_bytes().len(), 16);
/// ```
pub fn compress_block(
    pixels: &Decoded4x4Block,
    format: BlockFormat,
    quality: CompressionQuality,
    metric: Option<Metric>,
) -> CompressedBlock {
    let settings = CompressionSettings {
        strategy: quality.strategy(),
        metric: metric.unwrap_or_default(),
        ..CompressionSettings::default()
    };
    compress_block_masked(pixels, ALL_PIXELS, format, &settings)
}

/// Compresses a block where only the pixels whose bit is set in `mask` matter.
///
/// Bit `i` of `mask` covers pixel `i` (row-major). Pixels outside the mask add no error,
/// but still decode to a valid palette entry.
pub fn compress_block_masked(
    pixels: &Decoded4x4Block,
    mask: u16,
    format: BlockFormat,
    settings: &CompressionSettings,
) -> CompressedBlock {
    match format {
        BlockFormat::Bc1 => CompressedBlock::Bc1(compress_bc1_block(pixels, mask, settings)),
        BlockFormat::Bc2 => CompressedBlock::Bc2(compress_bc2_block(pixels, mask, settings)),
        BlockFormat::Bc3 => CompressedBlock::Bc3(compress_bc3_block(pixels, mask, settings)),
    }
}

/// Compresses 64 bytes of RGBA8888 pixel data.
///
/// # Errors
///
/// [`BlockCodecError::InvalidPixelDataLength`] if `rgba` is not exactly 64 bytes.
pub fn compress_block_from_slice(
    rgba: &[u8],
    format: BlockFormat,
    quality: CompressionQuality,
    metric: Option<Metric>,
) -> Result<CompressedBlock, BlockCodecError> {
    let rgba: &[u8; 64] = rgba
        .try_into()
        .map_err(|_| BlockCodecError::InvalidPixelDataLength(rgba.len()))?;
    Ok(compress_block(
        &Decoded4x4Block::from_rgba_bytes(rgba),
        format,
        quality,
        metric,
    ))
}

/// Decompresses a block into its 16 pixels.
pub fn decompress_block(block: &CompressedBlock) -> Decoded4x4Block {
    // SAFETY: each variant holds exactly one block of its format.
    unsafe {
        match block {
            CompressedBlock::Bc1(bytes) => decode_bc1_block(bytes.as_ptr()),
            CompressedBlock::Bc2(bytes) => decode_bc2_block(bytes.as_ptr()),
            CompressedBlock::Bc3(bytes) => decode_bc3_block(bytes.as_ptr()),
        }
    }
}

/// Decompresses a block of the given format from raw bytes.
///
/// # Errors
///
/// [`BlockCodecError::InvalidBlockLength`] if `data` is not exactly one block long.
pub fn decompress_block_from_slice(
    data: &[u8],
    format: BlockFormat,
) -> Result<Decoded4x4Block, BlockCodecError> {
    Ok(decompress_block(&CompressedBlock::from_slice(data, format)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dxt_block_codec_common::color_8888::Color8888;
    use rstest::rstest;

    #[rstest]
    #[case(BlockFormat::Bc1)]
    #[case(BlockFormat::Bc2)]
    #[case(BlockFormat::Bc3)]
    fn solid_block_survives(#[case] format: BlockFormat) {
        let pixels = Decoded4x4Block::new(Color8888::new(255, 255, 255, 255));
        let block = compress_block(&pixels, format, CompressionQuality::default(), None);
        assert_eq!(block.format(), format);
        assert_eq!(decompress_block(&block), pixels);
    }

    #[rstest]
    #[case(0)]
    #[case(63)]
    #[case(65)]
    fn compress_from_slice_rejects_wrong_length(#[case] len: usize) {
        let rgba = vec![0u8; len];
        let result =
            compress_block_from_slice(&rgba, BlockFormat::Bc1, CompressionQuality::Fast, None);
        assert_eq!(result, Err(BlockCodecError::InvalidPixelDataLength(len)));
    }

    #[test]
    fn compress_from_slice_matches_typed_call() {
        let mut rgba = [0u8; 64];
        for (i, byte) in rgba.iter_mut().enumerate() {
            *byte = (i * 37) as u8;
        }
        let pixels = Decoded4x4Block::from_rgba_bytes(&rgba);
        for &format in BlockFormat::all_values() {
            let from_slice =
                compress_block_from_slice(&rgba, format, CompressionQuality::Balanced, None)
                    .unwrap();
            let typed = compress_block(&pixels, format, CompressionQuality::Balanced, None);
            assert_eq!(from_slice, typed);
        }
    }

    #[test]
    fn decompress_from_slice_matches_typed_call() {
        let pixels = Decoded4x4Block::new(Color8888::new(12, 200, 99, 180));
        for &format in BlockFormat::all_values() {
            let block = compress_block(&pixels, format, CompressionQuality::Best, None);
            let decoded = decompress_block_from_slice(block.as_bytes(), format).unwrap();
            assert_eq!(decoded, decompress_block(&block));
        }
    }

    #[test]
    fn decompress_from_slice_rejects_wrong_length() {
        let result = decompress_block_from_slice(&[0u8; 8], BlockFormat::Bc2);
        assert!(matches!(
            result,
            Err(BlockCodecError::InvalidBlockLength {
                format: BlockFormat::Bc2,
                expected: 16,
                actual: 8
            })
        ));
    }

    #[test]
    fn fully_masked_block_is_still_valid() {
        let pixels = Decoded4x4Block::new(Color8888::new(1, 2, 3, 4));
        let settings = CompressionSettings::default();
        for &format in BlockFormat::all_values() {
            let block = compress_block_masked(&pixels, 0, format, &settings);
            assert_eq!(block.as_bytes().len(), format.block_size());
        }
    }
}
