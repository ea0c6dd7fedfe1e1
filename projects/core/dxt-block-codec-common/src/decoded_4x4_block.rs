//! # Decoded 4x4 Block
//!
//! This module provides the [`Decoded4x4Block`] structure for representing uncompressed
//! 4x4 pixel blocks: the input of every block encoder and the output of every block decoder.
//!
//! ## Usage
//!
//! ```
//! use dxt_block_codec_common::color_8888::Color8888;
//! use dxt_block_codec_common::decoded_4x4_block::Decoded4x4Block;
//!
//! // Create a block filled with red pixels
//! let red_pixel = Color8888::new(255, 0, 0, 255);
//! let block = Decoded4x4Block::new(red_pixel);
//!
//! // Check if all pixels are identical
//! assert!(block.has_identical_pixels());
//! ```
//!
//! ## Memory Layout
//!
//! The pixels are stored in row-major order:
//! ```text
//! [ 0] [ 1] [ 2] [ 3]
//! [ 4] [ 5] [ 6] [ 7]
//! [ 8] [ 9] [10] [11]
//! [12] [13] [14] [15]
//! ```

use crate::color_8888::Color8888;

/// Represents a decoded 4x4 block of BC pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Decoded4x4Block {
    /// The 16 pixels in the block (row-major order)
    /// (i.e. `pixels[0]` is top-left, `pixels[3]` is top-right, etc.)
    pub pixels: [Color8888; 16],
}

impl Decoded4x4Block {
    /// Constructs a new decoded block initialised with 16 copies of the provided pixel.
    ///
    /// # Examples
    ///
    /// ```
    /// use dxt_block_codec_common::color_8888::Color8888;
    /// use dxt_block_codec_common::decoded_4x4_block::Decoded4x4Block;
    ///
    /// let pixel = Color8888::new(255, 0, 0, 255);
    /// let block = Decoded4x4Block::new(pixel);
    /// assert!(block.pixels.iter().all(|&p| p == pixel));
    /// ```
    pub fn new(pixel: Color8888) -> Self {
        Self {
            pixels: [pixel; 16],
        }
    }

    /// Builds a block from 64 bytes of tightly packed RGBA8888 pixels (row-major).
    pub fn from_rgba_bytes(rgba: &[u8; 64]) -> Self {
        let mut pixels = [Color8888::default(); 16];
        for (pixel, bytes) in pixels.iter_mut().zip(rgba.chunks_exact(4)) {
            *pixel = Color8888::new(bytes[0], bytes[1], bytes[2], bytes[3]);
        }
        Self { pixels }
    }

    /// Writes the block out as 64 bytes of tightly packed RGBA8888 pixels (row-major).
    pub fn to_rgba_bytes(&self) -> [u8; 64] {
        let mut rgba = [0u8; 64];
        for (bytes, pixel) in rgba.chunks_exact_mut(4).zip(self.pixels.iter()) {
            bytes.copy_from_slice(&[pixel.r, pixel.g, pixel.b, pixel.a]);
        }
        rgba
    }

    /// Gets a pixel at the specified coordinates (0-3, 0-3)
    ///
    /// # Panics
    ///
    /// If `x` or `y` is out of range.
    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> Color8888 {
        assert!(x < 4 && y < 4, "pixel coordinates out of range: ({x}, {y})");
        self.pixels[y * 4 + x]
    }

    /// Gets a pixel at the specified coordinates (0-3, 0-3) without bounds checking
    ///
    /// # Safety
    ///
    /// The caller must ensure that `x < 4` and `y < 4`.
    #[inline]
    pub unsafe fn get_pixel_unchecked(&self, x: usize, y: usize) -> Color8888 {
        *self.pixels.get_unchecked(y * 4 + x)
    }

    /// Sets a pixel at the specified coordinates (0-3, 0-3) without bounds checking
    ///
    /// # Safety
    ///
    /// The caller must ensure that `x < 4` and `y < 4`.
    #[inline]
    pub unsafe fn set_pixel_unchecked(&mut self, x: usize, y: usize, pixel: Color8888) {
        *self.pixels.get_unchecked_mut(y * 4 + x) = pixel;
    }

    /// Checks if all pixels in the block have the same color values
    ///
    /// # Returns
    /// `true` if all pixels in the block are identical, `false` otherwise
    #[inline]
    pub fn has_identical_pixels(&self) -> bool {
        let first = self.pixels[0];
        self.pixels.iter().all(|pixel| *pixel == first)
    }

    /// Checks if all pixels in the block have the same color values
    /// Ignoring the alpha values.
    #[inline]
    pub fn has_identical_pixels_ignore_alpha(&self) -> bool {
        let first = self.pixels[0].without_alpha();
        self.pixels
            .iter()
            .all(|pixel| pixel.without_alpha() == first)
    }

    /// Checks if all pixels in the block have the same alpha values
    #[inline]
    pub fn has_identical_alpha(&self) -> bool {
        let first_pixel_alpha = self.pixels[0].a;
        self.pixels.iter().all(|pixel| pixel.a == first_pixel_alpha)
    }
}
