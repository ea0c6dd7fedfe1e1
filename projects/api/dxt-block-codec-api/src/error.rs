//! Error types for block codec operations.

use crate::BlockFormat;
use dxt_block_codec_common::metric::MetricError;
use thiserror::Error;

/// Errors that can occur when compressing or decompressing blocks from raw data.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum BlockCodecError {
    /// The pixel data is not exactly 16 RGBA8888 pixels.
    #[error("Invalid pixel data length: {0} bytes. Length must be 64 bytes (16 RGBA8888 pixels).")]
    InvalidPixelDataLength(usize),

    /// The compressed data does not match the size of a block in the given format.
    #[error("Invalid {format:?} block length: need {expected} bytes, but got {actual} bytes.")]
    InvalidBlockLength {
        /// The format the data was read as
        format: BlockFormat,
        /// Size of a block in that format
        expected: usize,
        /// The actual size in bytes
        actual: usize,
    },

    /// The error metric weights were rejected.
    #[error("Invalid metric: {0}")]
    InvalidMetric(#[from] MetricError),
}
