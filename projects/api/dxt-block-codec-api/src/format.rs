//! Supported block formats and quality levels.

use derive_enum_all_values::AllValues;
use dxt_block_codec_common::settings::ColourFitStrategy;

/// A compressed block format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AllValues)]
pub enum BlockFormat {
    /// BC1 (DXT1): 4 bit per pixel colour, optional 1-bit alpha.
    Bc1,
    /// BC2 (DXT2/DXT3): BC1 colour plus explicit 4-bit alpha.
    Bc2,
    /// BC3 (DXT4/DXT5): BC1 colour plus interpolated alpha.
    Bc3,
}

impl BlockFormat {
    /// Size of one compressed block in bytes.
    #[inline]
    pub const fn block_size(self) -> usize {
        match self {
            BlockFormat::Bc1 => dxt_block_codec_bc1::BC1_BLOCK_SIZE,
            BlockFormat::Bc2 => dxt_block_codec_bc2::BC2_BLOCK_SIZE,
            BlockFormat::Bc3 => dxt_block_codec_bc3::BC3_BLOCK_SIZE,
        }
    }
}

/// How hard the encoder searches for colour endpoints.
///
/// Each level is at least as accurate as the one before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AllValues)]
pub enum CompressionQuality {
    /// Range fit.
    Fast,
    /// Cluster fit.
    Balanced,
    /// Iterative cluster fit.
    #[default]
    Best,
}

impl CompressionQuality {
    /// The endpoint search used for this quality level.
    #[inline]
    pub const fn strategy(self) -> ColourFitStrategy {
        match self {
            CompressionQuality::Fast => ColourFitStrategy::Range,
            CompressionQuality::Balanced => ColourFitStrategy::Cluster,
            CompressionQuality::Best => ColourFitStrategy::IterativeCluster,
        }
    }
}

impl From<CompressionQuality> for ColourFitStrategy {
    fn from(quality: CompressionQuality) -> Self {
        quality.strategy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(BlockFormat::Bc1, 8)]
    #[case(BlockFormat::Bc2, 16)]
    #[case(BlockFormat::Bc3, 16)]
    fn block_sizes(#[case] format: BlockFormat, #[case] size: usize) {
        assert_eq!(format.block_size(), size);
    }

    #[test]
    fn default_quality_is_best() {
        assert_eq!(CompressionQuality::default(), CompressionQuality::Best);
        assert_eq!(
            ColourFitStrategy::from(CompressionQuality::default()),
            ColourFitStrategy::default()
        );
    }

    #[test]
    fn every_quality_maps_to_a_distinct_strategy() {
        let strategies: Vec<_> = CompressionQuality::all_values()
            .iter()
            .map(|quality| quality.strategy())
            .collect();
        assert_eq!(strategies, ColourFitStrategy::all_values());
    }
}
