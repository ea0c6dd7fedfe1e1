#![no_main]

// Compares the BC3 decoder against rgbcx-sys, which decodes both the colour and alpha halves.

use dxt_block_codec_bc3::util::decode_bc3_block;
use dxt_block_codec_common::color_565::Color565;
use libfuzzer_sys::{arbitrary, fuzz_target};
use rgbcx_sys::root::rgbcx;

#[derive(Clone, Debug, arbitrary::Arbitrary)]
pub struct Bc3Block {
    pub bytes: [u8; 16],
}

fuzz_target!(|block: Bc3Block| {
    // BC3 always decodes 4 colours; skip blocks rgbcx would read in 3 colour mode.
    let c0 = Color565::from_raw(u16::from_le_bytes([block.bytes[8], block.bytes[9]]));
    let c1 = Color565::from_raw(u16::from_le_bytes([block.bytes[10], block.bytes[11]]));
    if !c0.greater_than(&c1) {
        return;
    }

    let ours = unsafe { decode_bc3_block(block.bytes.as_ptr()) };

    let mut reference = [0u8; 4 * 16];
    unsafe {
        rgbcx::unpack_bc3(
            block.bytes.as_ptr() as *const core::ffi::c_void,
            reference.as_mut_ptr() as *mut core::ffi::c_void,
            rgbcx::bc1_approx_mode::cBC1Ideal,
        );
    }

    assert_eq!(ours.to_rgba_bytes(), reference, "Decoded blocks don't match");
});
