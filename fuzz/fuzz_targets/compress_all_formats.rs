#![no_main]

// Compresses arbitrary pixels into every format and checks the output is a block
// reference decoders agree on, and that raising the quality never raises the error.

use dxt_block_codec_api::{
    BlockFormat, CompressedBlock, CompressionQuality, CompressionSettings,
    Decoded4x4Block, Metric, compress_block_masked, decompress_block,
};
use dxt_block_codec_common::color_565::Color565;
use libfuzzer_sys::{arbitrary, fuzz_target};
use rgbcx_sys::root::rgbcx;

#[derive(Clone, Debug, arbitrary::Arbitrary)]
pub struct Input {
    pub pixels: [u8; 64],
    pub mask: u16,
    pub perceptual: bool,
    pub weight_colour_by_alpha: bool,
    pub punch_through_alpha: bool,
}

fuzz_target!(|input: Input| {
    let pixels = Decoded4x4Block::from_rgba_bytes(&input.pixels);
    let metric = if input.perceptual {
        Metric::PERCEPTUAL
    } else {
        Metric::UNIFORM
    };

    for &format in BlockFormat::all_values() {
        let mut errors = [0u64; 3];
        for (quality_idx, &quality) in CompressionQuality::all_values().iter().enumerate() {
            let settings = CompressionSettings {
                strategy: quality.strategy(),
                metric,
                weight_colour_by_alpha: input.weight_colour_by_alpha,
                punch_through_alpha: input.punch_through_alpha,
            };
            let block = compress_block_masked(&pixels, input.mask, format, &settings);
            assert_eq!(block.as_bytes().len(), format.block_size());

            let decoded = decompress_block(&block);
            check_against_reference(&block, &decoded);
            check_alpha(&input, &pixels, &block, &decoded);
            errors[quality_idx] = colour_error(&input, &pixels, &decoded, format);
        }

        // Errors match the encoder's own scoring only for unweighted, uniform metrics.
        if !input.perceptual && !input.weight_colour_by_alpha {
            assert!(errors[1] <= errors[0], "{format:?}: cluster fit lost to range fit");
            assert!(errors[2] <= errors[1], "{format:?}: iterative fit lost to cluster fit");
        }
    }
});

/// Decodes our output with rgbcx-sys, which must agree with our decoder.
fn check_against_reference(block: &CompressedBlock, decoded: &Decoded4x4Block) {
    let mut reference = [0u8; 4 * 16];
    match block {
        CompressedBlock::Bc1(bytes) => unsafe {
            rgbcx::unpack_bc1(
                bytes.as_ptr() as *const core::ffi::c_void,
                reference.as_mut_ptr() as *mut core::ffi::c_void,
                true, // set_alpha
                rgbcx::bc1_approx_mode::cBC1Ideal,
            );
        },
        CompressedBlock::Bc2(bytes) => {
            // Encoders never emit c0 < c1, and c0 == c1 only with every index at 0.
            let c0 = Color565::from_raw(u16::from_le_bytes([bytes[8], bytes[9]]));
            let c1 = Color565::from_raw(u16::from_le_bytes([bytes[10], bytes[11]]));
            assert!(!c1.greater_than(&c0));
            if !c0.greater_than(&c1) {
                return;
            }
            bcdec_rs::bc2(bytes, &mut reference, 4 * 4);
        }
        CompressedBlock::Bc3(bytes) => unsafe {
            let c0 = Color565::from_raw(u16::from_le_bytes([bytes[8], bytes[9]]));
            let c1 = Color565::from_raw(u16::from_le_bytes([bytes[10], bytes[11]]));
            assert!(!c1.greater_than(&c0));
            if !c0.greater_than(&c1) {
                return;
            }
            rgbcx::unpack_bc3(
                bytes.as_ptr() as *const core::ffi::c_void,
                reference.as_mut_ptr() as *mut core::ffi::c_void,
                rgbcx::bc1_approx_mode::cBC1Ideal,
            );
        },
    }

    // bcdec rounds BC2 colours differently; only its alpha is comparable.
    if let CompressedBlock::Bc2(_) = block {
        for (pixel, reference) in decoded.pixels.iter().zip(reference.chunks_exact(4)) {
            assert_eq!(pixel.a, reference[3]);
        }
    } else {
        assert_eq!(decoded.to_rgba_bytes(), reference);
    }
}

fn check_alpha(
    input: &Input,
    pixels: &Decoded4x4Block,
    block: &CompressedBlock,
    decoded: &Decoded4x4Block,
) {
    let in_mask = |i: usize| input.mask & (1 << i) != 0;
    match block {
        CompressedBlock::Bc1(_) => {
            for (i, (source, out)) in pixels.pixels.iter().zip(decoded.pixels.iter()).enumerate() {
                let transparent = input.punch_through_alpha && in_mask(i) && source.a < 128;
                assert_eq!(out.a, if transparent { 0 } else { 255 }, "pixel {i}");
            }
        }
        CompressedBlock::Bc2(_) => {
            // Explicit alpha is quantised for every pixel, masked or not.
            for (source, out) in pixels.pixels.iter().zip(decoded.pixels.iter()) {
                assert!(source.a.abs_diff(out.a) <= 8);
            }
        }
        CompressedBlock::Bc3(_) => {
            // A single distinct alpha value is always stored exactly.
            let mut values = (0..16).filter(|&i| in_mask(i)).map(|i| pixels.pixels[i].a);
            if let Some(first) = values.next() {
                if values.all(|value| value == first) {
                    for i in (0..16).filter(|&i| in_mask(i)) {
                        assert_eq!(decoded.pixels[i].a, first);
                    }
                }
            }
        }
    }
}

/// Sum of squared RGB differences over the pixels the colour encoder scored.
fn colour_error(
    input: &Input,
    pixels: &Decoded4x4Block,
    decoded: &Decoded4x4Block,
    format: BlockFormat,
) -> u64 {
    let mut error = 0u64;
    for (i, (a, b)) in pixels.pixels.iter().zip(decoded.pixels.iter()).enumerate() {
        if input.mask & (1 << i) == 0 {
            continue;
        }
        if format == BlockFormat::Bc1 && input.punch_through_alpha && a.a < 128 {
            continue;
        }
        let dr = a.r as i64 - b.r as i64;
        let dg = a.g as i64 - b.g as i64;
        let db = a.b as i64 - b.b as i64;
        error += (dr * dr + dg * dg + db * db) as u64;
    }
    error
}
