#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![warn(missing_docs)]

pub mod alpha;
mod compress;
pub mod util;

pub use compress::compress_bc2_block;

/// Size of a BC2 block in bytes.
pub const BC2_BLOCK_SIZE: usize = 16;

#[cfg(test)]
pub(crate) mod test_prelude;
