//! Block decoding helpers.

mod bc3_decode;

pub use bc3_decode::*;
