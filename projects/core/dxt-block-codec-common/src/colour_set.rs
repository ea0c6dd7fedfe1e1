//! # Colour Set
//!
//! Reduces a 4x4 block to its distinct RGB colours, each weighted by the number of
//! pixels that share it. Every endpoint fit works on this reduced form.
//!
//! Entries appear in the order their colour first occurs in the block (row-major),
//! so the same block and mask always produce the same set.
//!
//! Each source pixel is tracked by a [`PixelSlot`]:
//!
//! - [`PixelSlot::Colour`]: the pixel maps onto a set entry.
//! - [`PixelSlot::Transparent`]: BC1 punch-through alpha; encoded with the transparent index.
//! - [`PixelSlot::Masked`]: excluded by the caller's mask; it carries no weight but still
//!   receives an index once the palette is known.

use crate::color_8888::Color8888;
use crate::decoded_4x4_block::Decoded4x4Block;
use likely_stable::unlikely;

/// Mask selecting every pixel of a block.
pub const ALL_PIXELS: u16 = 0xFFFF;

/// Alpha values below this are treated as transparent when punch-through alpha is enabled.
pub const TRANSPARENCY_THRESHOLD: u8 = 128;

/// Where a source pixel ended up while building a [`ColourSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelSlot {
    /// The pixel contributes to the set entry at this position.
    Colour(u8),
    /// The pixel is transparent and skipped the colour pool.
    Transparent,
    /// The pixel was excluded by the mask.
    Masked,
}

/// Controls how pixels are admitted into a [`ColourSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColourSetOptions {
    /// Route pixels with alpha below [`TRANSPARENCY_THRESHOLD`] to the transparent index.
    /// Only meaningful for BC1; when unset, alpha is ignored completely.
    pub transparency: bool,
    /// Weight each pixel by `(alpha + 1) / 256` instead of 1.
    pub weight_by_alpha: bool,
}

/// Deduplicated, weighted colours of a single 4x4 block.
#[derive(Debug, Clone)]
pub struct ColourSet {
    pixels: Decoded4x4Block,
    colours: [Color8888; 16],
    weights: [f32; 16],
    count: usize,
    slots: [PixelSlot; 16],
    transparent: bool,
}

impl ColourSet {
    /// Extracts the colour set of a block.
    ///
    /// # Parameters
    ///
    /// - `block`: The source pixels
    /// - `mask`: Bit `i` set means pixel `i` takes part; use [`ALL_PIXELS`] for whole blocks
    /// - `options`: Transparency and weighting behaviour
    pub fn new(block: &Decoded4x4Block, mask: u16, options: ColourSetOptions) -> Self {
        let mut set = Self {
            pixels: *block,
            colours: [Color8888::default(); 16],
            weights: [0.0; 16],
            count: 0,
            slots: [PixelSlot::Masked; 16],
            transparent: false,
        };

        for (i, pixel) in block.pixels.iter().enumerate() {
            if mask & (1 << i) == 0 {
                continue;
            }

            if unlikely(options.transparency && pixel.a < TRANSPARENCY_THRESHOLD) {
                set.slots[i] = PixelSlot::Transparent;
                set.transparent = true;
                continue;
            }

            let weight = if options.weight_by_alpha {
                (pixel.a as f32 + 1.0) / 256.0
            } else {
                1.0
            };

            let colour = pixel.without_alpha();
            match set.colours[..set.count].iter().position(|&c| c == colour) {
                Some(existing) => {
                    set.weights[existing] += weight;
                    set.slots[i] = PixelSlot::Colour(existing as u8);
                }
                None => {
                    set.colours[set.count] = colour;
                    set.weights[set.count] = weight;
                    set.slots[i] = PixelSlot::Colour(set.count as u8);
                    set.count += 1;
                }
            }
        }

        debug_assert!(set.count <= 16);
        set
    }

    /// Number of distinct colours.
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Whether no pixel made it into the colour pool.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Whether any pixel was routed to the transparent index.
    #[inline]
    pub fn is_transparent(&self) -> bool {
        self.transparent
    }

    /// The distinct colours, alpha forced to 255.
    #[inline]
    pub fn colours(&self) -> &[Color8888] {
        &self.colours[..self.count]
    }

    /// Weight of each entry in [`Self::colours`].
    #[inline]
    pub fn weights(&self) -> &[f32] {
        &self.weights[..self.count]
    }

    /// RGB of entry `index` as floats.
    #[inline]
    pub fn point(&self, index: usize) -> [f32; 3] {
        self.colours()[index].rgb_f32()
    }

    /// Sum of all weights.
    pub fn total_weight(&self) -> f32 {
        self.weights().iter().sum()
    }

    /// Where each source pixel went.
    #[inline]
    pub fn slots(&self) -> &[PixelSlot; 16] {
        &self.slots
    }

    /// The block the set was built from.
    #[inline]
    pub fn pixels(&self) -> &Decoded4x4Block {
        &self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opaque(r: u8, g: u8, b: u8) -> Color8888 {
        Color8888::new(r, g, b, 255)
    }

    #[test]
    fn merges_identical_colours_in_first_occurrence_order() {
        let mut block = Decoded4x4Block::new(opaque(1, 2, 3));
        block.pixels[3] = opaque(9, 9, 9);
        block.pixels[7] = opaque(4, 5, 6);
        block.pixels[8] = opaque(9, 9, 9);

        let set = ColourSet::new(&block, ALL_PIXELS, ColourSetOptions::default());

        assert_eq!(
            set.colours(),
            &[opaque(1, 2, 3), opaque(9, 9, 9), opaque(4, 5, 6)]
        );
        assert_eq!(set.weights(), &[13.0, 2.0, 1.0]);
        assert_eq!(set.slots()[3], PixelSlot::Colour(1));
        assert_eq!(set.slots()[7], PixelSlot::Colour(2));
        assert_eq!(set.slots()[8], PixelSlot::Colour(1));
        assert!(!set.is_transparent());
    }

    #[test]
    fn alpha_does_not_split_colours() {
        let mut block = Decoded4x4Block::new(Color8888::new(50, 60, 70, 200));
        block.pixels[0].a = 10;

        let set = ColourSet::new(&block, ALL_PIXELS, ColourSetOptions::default());
        assert_eq!(set.len(), 1);
        assert_eq!(set.total_weight(), 16.0);
    }

    #[test]
    fn masked_pixels_carry_no_weight() {
        let mut block = Decoded4x4Block::new(opaque(0, 0, 0));
        block.pixels[15] = opaque(255, 255, 255);

        let set = ColourSet::new(&block, 0x7FFF, ColourSetOptions::default());
        assert_eq!(set.len(), 1);
        assert_eq!(set.total_weight(), 15.0);
        assert_eq!(set.slots()[15], PixelSlot::Masked);
    }

    #[test]
    fn transparent_pixels_leave_the_pool() {
        let mut block = Decoded4x4Block::new(opaque(10, 20, 30));
        block.pixels[2] = Color8888::new(200, 0, 0, 127);
        block.pixels[4] = Color8888::new(10, 20, 30, 128);

        let options = ColourSetOptions {
            transparency: true,
            weight_by_alpha: false,
        };
        let set = ColourSet::new(&block, ALL_PIXELS, options);

        assert!(set.is_transparent());
        assert_eq!(set.len(), 1);
        assert_eq!(set.total_weight(), 15.0);
        assert_eq!(set.slots()[2], PixelSlot::Transparent);
        assert_eq!(set.slots()[4], PixelSlot::Colour(0));
    }

    #[test]
    fn weight_by_alpha_scales_contributions() {
        let mut block = Decoded4x4Block::new(Color8888::new(10, 20, 30, 255));
        block.pixels[0] = Color8888::new(90, 90, 90, 127);

        let options = ColourSetOptions {
            transparency: false,
            weight_by_alpha: true,
        };
        let set = ColourSet::new(&block, ALL_PIXELS, options);

        assert_eq!(set.weights(), &[0.5, 15.0]);
    }

    #[test]
    fn fully_masked_block_is_empty() {
        let block = Decoded4x4Block::new(opaque(1, 1, 1));
        let set = ColourSet::new(&block, 0, ColourSetOptions::default());
        assert!(set.is_empty());
        assert!(set.slots().iter().all(|&slot| slot == PixelSlot::Masked));
    }
}
