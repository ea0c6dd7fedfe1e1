#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![warn(missing_docs)]

mod compress;
pub mod util;

pub use compress::compress_bc1_block;

/// Size of a BC1 block in bytes.
pub const BC1_BLOCK_SIZE: usize = 8;

/// Common test prelude for avoiding duplicate imports in test modules
#[cfg(test)]
pub(crate) mod test_prelude;
