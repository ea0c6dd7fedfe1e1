#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![warn(missing_docs)]

pub mod alpha;
mod compress;
pub mod util;

pub use compress::compress_bc3_block;

/// Size of a BC3 block in bytes.
pub const BC3_BLOCK_SIZE: usize = 16;

#[cfg(test)]
pub(crate) mod test_prelude;
