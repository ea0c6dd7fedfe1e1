#![no_main]

// Compares the BC2 decoder against rgbcx-sys for colours and bcdec_rs for alpha.

use dxt_block_codec_bc2::util::decode_bc2_block;
use dxt_block_codec_common::color_565::Color565;
use libfuzzer_sys::{arbitrary, fuzz_target};
use rgbcx_sys::root::rgbcx;

#[derive(Clone, Debug, arbitrary::Arbitrary)]
pub struct Bc2Block {
    pub bytes: [u8; 16],
}

fuzz_target!(|block: Bc2Block| {
    // BC2 always decodes 4 colours; rgbcx follows BC1 and would switch to 3 when c0 <= c1.
    let c0 = Color565::from_raw(u16::from_le_bytes([block.bytes[8], block.bytes[9]]));
    let c1 = Color565::from_raw(u16::from_le_bytes([block.bytes[10], block.bytes[11]]));
    if !c0.greater_than(&c1) {
        return;
    }

    let ours = unsafe { decode_bc2_block(block.bytes.as_ptr()) };

    let mut reference = [0u8; 4 * 16];
    let mut alpha_reference = [0u8; 4 * 16];
    unsafe {
        rgbcx::unpack_bc1(
            block.bytes.as_ptr().add(8) as *const core::ffi::c_void,
            reference.as_mut_ptr() as *mut core::ffi::c_void,
            true, // set_alpha
            rgbcx::bc1_approx_mode::cBC1Ideal,
        );
    }
    bcdec_rs::bc2(&block.bytes, &mut alpha_reference, 4 * 4);
    for (pixel, alpha) in reference.chunks_exact_mut(4).zip(alpha_reference.chunks_exact(4)) {
        pixel[3] = alpha[3];
    }

    assert_eq!(ours.to_rgba_bytes(), reference, "Decoded blocks don't match");
});
