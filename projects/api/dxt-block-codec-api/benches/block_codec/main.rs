use core::alloc::Layout;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dxt_block_codec_api::{
    BlockFormat, CompressedBlock, CompressionQuality, Decoded4x4Block, compress_block,
    decompress_block,
};
use safe_allocator_api::RawAlloc;

#[cfg(not(target_os = "windows"))]
use pprof::criterion::{Output, PProfProfiler};

pub(crate) fn allocate_align_64(num_bytes: usize) -> RawAlloc {
    let layout = Layout::from_size_align(num_bytes, 64).unwrap();
    RawAlloc::new(layout).unwrap()
}

/// Fills the buffer with a noisy gradient, so blocks have several distinct colours.
fn fill_pixels(input: &mut RawAlloc) {
    let mut state = 0x9E37_79B9u32;
    let bytes = unsafe { core::slice::from_raw_parts_mut(input.as_mut_ptr(), input.len()) };
    for (i, byte) in bytes.iter_mut().enumerate() {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        *byte = ((i / 4) as u8).wrapping_add((state & 0x1F) as u8);
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Block Compression (RGBA8888 -> BCn)");

    // 256x256px
    let pixels_size = 262144;
    let blocks_count = pixels_size / 64;
    let mut input = allocate_align_64(pixels_size);
    fill_pixels(&mut input);

    let pixels = unsafe { core::slice::from_raw_parts(input.as_ptr(), input.len()) };
    let blocks: Vec<Decoded4x4Block> = pixels
        .chunks_exact(64)
        .map(|chunk| {
            let mut rgba = [0u8; 64];
            rgba.copy_from_slice(chunk);
            Decoded4x4Block::from_rgba_bytes(&rgba)
        })
        .collect();

    group.throughput(criterion::Throughput::Bytes(pixels_size as u64));
    for &format in BlockFormat::all_values() {
        for &quality in CompressionQuality::all_values() {
            let id = BenchmarkId::new(format!("{format:?}"), format!("{quality:?}"));
            group.bench_with_input(id, &blocks, |b, blocks| {
                b.iter(|| {
                    for block in blocks {
                        black_box(compress_block(block, format, quality, None));
                    }
                })
            });
        }
    }
    group.finish();

    let mut group = c.benchmark_group("Block Decompression (BCn -> RGBA8888)");
    let mut output = allocate_align_64(blocks_count * core::mem::size_of::<Decoded4x4Block>());
    let output_blocks = output.as_mut_ptr() as *mut Decoded4x4Block;

    for &format in BlockFormat::all_values() {
        let compressed: Vec<CompressedBlock> = blocks
            .iter()
            .map(|block| compress_block(block, format, CompressionQuality::Fast, None))
            .collect();

        group.throughput(criterion::Throughput::Bytes(
            (blocks_count * format.block_size()) as u64,
        ));
        group.bench_function(format!("{format:?}"), |b| {
            b.iter(|| unsafe {
                for (block_idx, block) in compressed.iter().enumerate() {
                    *output_blocks.add(block_idx) = decompress_block(block);
                }
            })
        });
    }
    group.finish();
}

#[cfg(not(target_os = "windows"))]
criterion_group! {
    name = benches;
    config = Criterion::default().with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)));
    targets = criterion_benchmark
}

#[cfg(target_os = "windows")]
criterion_group! {
    name = benches;
    config = Criterion::default();
    targets = criterion_benchmark
}

criterion_main!(benches);
