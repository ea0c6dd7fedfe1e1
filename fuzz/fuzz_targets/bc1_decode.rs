#![no_main]

// Compares the BC1 decoder against rgbcx-sys using the Ideal method, in both palette modes.
// Extra reading: https://fgiesen.wordpress.com/2021/10/04/gpu-bcn-decoding/

use dxt_block_codec_bc1::util::{decode_bc1_block, decode_bc1_block_from_slice};
use libfuzzer_sys::{arbitrary, fuzz_target};
use rgbcx_sys::root::rgbcx;

#[derive(Clone, Debug, arbitrary::Arbitrary)]
pub struct Bc1Block {
    pub bytes: [u8; 8],
}

fuzz_target!(|block: Bc1Block| {
    let ours = unsafe { decode_bc1_block(block.bytes.as_ptr()) };
    assert_eq!(Some(ours), decode_bc1_block_from_slice(&block.bytes));

    let mut reference = [0u8; 4 * 16];
    unsafe {
        rgbcx::unpack_bc1(
            block.bytes.as_ptr() as *const core::ffi::c_void,
            reference.as_mut_ptr() as *mut core::ffi::c_void,
            true, // set_alpha
            rgbcx::bc1_approx_mode::cBC1Ideal,
        );
    }

    assert_eq!(ours.to_rgba_bytes(), reference, "Decoded blocks don't match");
});
