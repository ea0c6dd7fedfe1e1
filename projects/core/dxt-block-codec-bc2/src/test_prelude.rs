//! Common test imports and utilities for BC2 tests
//!
//! This module provides a common prelude for test modules to avoid
//! duplicate imports across the codebase.

// External crates commonly used in tests
pub use rstest::rstest;

// Core functionality from this crate
pub use crate::util::decode_bc2_block_from_slice;
pub use crate::{compress_bc2_block, BC2_BLOCK_SIZE};

// Common types from dxt_block_codec_common
pub use dxt_block_codec_common::color_8888::Color8888;
pub use dxt_block_codec_common::colour_set::ALL_PIXELS;
pub use dxt_block_codec_common::decoded_4x4_block::Decoded4x4Block;
pub use dxt_block_codec_common::settings::{ColourFitStrategy, CompressionSettings};

/// Decodes a compressed block, which is always the right size in tests.
pub(crate) fn decode(block: &[u8; BC2_BLOCK_SIZE]) -> Decoded4x4Block {
    decode_bc2_block_from_slice(block).unwrap()
}

/// Pixels with random colour and alpha from a small xorshift generator.
pub(crate) fn random_block(state: &mut u32) -> Decoded4x4Block {
    let mut block = Decoded4x4Block::default();
    for pixel in block.pixels.iter_mut() {
        *state ^= *state << 13;
        *state ^= *state >> 17;
        *state ^= *state << 5;
        *pixel = Color8888::from_bytes(state.to_le_bytes());
    }
    block
}
