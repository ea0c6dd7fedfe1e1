//! Block decoding helpers.

mod bc2_decode;

pub use bc2_decode::*;
