//! Builder pattern implementation for block compression settings.

use crate::{
    BlockCodecError, BlockFormat, CompressedBlock, CompressionQuality, compress_block_masked,
};
use dxt_block_codec_common::colour_set::ALL_PIXELS;
use dxt_block_codec_common::decoded_4x4_block::Decoded4x4Block;
use dxt_block_codec_common::metric::Metric;
use dxt_block_codec_common::settings::CompressionSettings;

/// Block compression configuration builder.
///
/// Every setting is optional; unset settings fall back to the defaults of
/// [`CompressionSettings`]. Settings are applied per call, so one builder can be
/// shared between threads.
///
/// For one-off calls with default settings, use [`crate::compress_block`].
#[derive(Debug, Clone, Copy)]
pub struct BlockCompressBuilder {
    format: BlockFormat,
    quality: Option<CompressionQuality>,
    metric: Option<Metric>,
    weight_colour_by_alpha: Option<bool>,
    punch_through_alpha: Option<bool>,
}

impl BlockCompressBuilder {
    /// Create a new builder producing blocks of `format`.
    pub fn new(format: BlockFormat) -> Self {
        Self {
            format,
            quality: None,
            metric: None,
            weight_colour_by_alpha: None,
            punch_through_alpha: None,
        }
    }

    /// Set the output format.
    pub fn format(mut self, format: BlockFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the endpoint search effort. Defaults to [`CompressionQuality::Best`].
    pub fn quality(mut self, quality: CompressionQuality) -> Self {
        self.quality = Some(quality);
        self
    }

    /// Set the error metric. Defaults to [`Metric::UNIFORM`].
    pub fn metric(mut self, metric: Metric) -> Self {
        self.metric = Some(metric);
        self
    }

    /// Set the error metric from raw per-channel weights.
    ///
    /// # Errors
    ///
    /// Returns [`BlockCodecError::InvalidMetric`] if a weight is negative or not finite.
    pub fn metric_weights(self, weights: [f32; 3]) -> Result<Self, BlockCodecError> {
        Ok(self.metric(Metric::new(weights)?))
    }

    /// Set whether colour error is weighted by pixel alpha.
    ///
    /// Nearly transparent pixels then contribute little to the choice of endpoints.
    /// Off by default.
    pub fn weight_colour_by_alpha(mut self, enabled: bool) -> Self {
        self.weight_colour_by_alpha = Some(enabled);
        self
    }

    /// Set whether BC1 encodes pixels with alpha below 128 as transparent.
    ///
    /// When disabled, BC1 output is always opaque. Has no effect on BC2 and BC3.
    /// On by default.
    pub fn punch_through_alpha(mut self, enabled: bool) -> Self {
        self.punch_through_alpha = Some(enabled);
        self
    }

    /// The settings the encoders will receive.
    pub fn settings(&self) -> CompressionSettings {
        let defaults = CompressionSettings::default();
        CompressionSettings {
            strategy: self
                .quality
                .map_or(defaults.strategy, CompressionQuality::strategy),
            metric: self.metric.unwrap_or(defaults.metric),
            weight_colour_by_alpha: self
                .weight_colour_by_alpha
                .unwrap_or(defaults.weight_colour_by_alpha),
            punch_through_alpha: self
                .punch_through_alpha
                .unwrap_or(defaults.punch_through_alpha),
        }
    }

    /// Compress a block using the configured settings.
    ///
    /// # Examples
    ///
    /// ```
    /// use dxt_block_codec_api::*;
    ///
    /// let pixels = Decoded4x4Block::new(Color8888::new(255, 255, 255, 0));
    /// let opaque = BlockCompressBuilder::new(BlockFormat::Bc1)
    ///     .quality(CompressionQuality::Fast)
    ///     .punch_through_alpha(false)
    ///     .compress(&pixels);
    ///
    /// assert_eq!(decompress_block(&opaque).pixels[0].a, 255);
    /// ```
    pub fn compress(&self, pixels: &Decoded4x4Block) -> CompressedBlock {
        self.compress_masked(pixels, ALL_PIXELS)
    }

    /// Compress a block where only the pixels whose bit is set in `mask` matter.
    ///
    /// Use this for blocks overhanging the edge of an image.
    pub fn compress_masked(&self, pixels: &Decoded4x4Block, mask: u16) -> CompressedBlock {
        compress_block_masked(pixels, mask, self.format, &self.settings())
    }

    /// Compress 64 bytes of RGBA8888 pixel data using the configured settings.
    ///
    /// # Errors
    ///
    /// Returns [`BlockCodecError::InvalidPixelDataLength`] if `rgba` is not 64 bytes long.
    pub fn compress_slice(&self, rgba: &[u8]) -> Result<CompressedBlock, BlockCodecError> {
        let rgba: &[u8; 64] = rgba
            .try_into()
            .map_err(|_| BlockCodecError::InvalidPixelDataLength(rgba.len()))?;
        Ok(self.compress(&Decoded4x4Block::from_rgba_bytes(rgba)))
    }
}

impl Default for BlockCompressBuilder {
    fn default() -> Self {
        Self::new(BlockFormat::Bc1)
    }
}
