#![doc = include_str!(concat!("../", std::env!("CARGO_PKG_README")))]

pub mod color_565;
pub mod color_8888;
pub mod colour_block;
pub mod colour_fit;
pub mod colour_set;
pub mod decoded_4x4_block;
pub mod least_squares;
pub mod metric;
pub mod settings;
