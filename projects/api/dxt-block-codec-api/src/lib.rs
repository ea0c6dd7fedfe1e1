#![doc = include_str!("../README.MD")]
#![warn(missing_docs)]

pub mod builder;
pub mod compressed_block;
pub mod error;
pub mod format;

mod compress;

pub use builder::BlockCompressBuilder;
pub use compress::*;
pub use compressed_block::CompressedBlock;
pub use error::BlockCodecError;
pub use format::{BlockFormat, CompressionQuality};

// Types that appear in the public API.
pub use dxt_block_codec_common::color_8888::Color8888;
pub use dxt_block_codec_common::colour_set::ALL_PIXELS;
pub use dxt_block_codec_common::decoded_4x4_block::Decoded4x4Block;
pub use dxt_block_codec_common::metric::{Metric, MetricError};
pub use dxt_block_codec_common::settings::{ColourFitStrategy, CompressionSettings};
