//! # Colour Block
//!
//! The 8 byte colour block shared by BC1, BC2 and BC3:
//!
//! ```text
//! bytes 0-1: colour 0 (RGB565, little endian)
//! bytes 2-3: colour 1 (RGB565, little endian)
//! bytes 4-7: 16 x 2-bit indices, little endian, pixel 0 in the lowest bits
//! ```
//!
//! Palette interpolation uses the 'ideal' rounding described in the DX9 docs (as does
//! etcpak), and the encoders score candidates against this exact palette, so a packed
//! block always decodes to precisely the entries its indices select.

use crate::color_565::Color565;
use crate::color_8888::Color8888;
use derive_enum_all_values::AllValues;

/// Size of a colour block in bytes.
pub const COLOUR_BLOCK_SIZE: usize = 8;

/// Palette entry of the three colour mode that decodes to transparent black.
pub const TRANSPARENT_INDEX: u8 = 3;

/// Which palette a pair of endpoints expands into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AllValues)]
pub enum PaletteMode {
    /// `c0`, `c1`, `(2·c0 + c1) / 3`, `(c0 + 2·c1) / 3`.
    FourColour,
    /// `c0`, `c1`, `(c0 + c1) / 2`, transparent black.
    ThreeColour,
}

impl PaletteMode {
    /// The mode a BC1 decoder selects for the endpoints as stored.
    #[inline]
    pub fn for_bc1_endpoints(c0: Color565, c1: Color565) -> Self {
        if c0.greater_than(&c1) {
            PaletteMode::FourColour
        } else {
            PaletteMode::ThreeColour
        }
    }
}

/// Expands two endpoints into their 4 entry palette.
#[inline]
pub fn colour_palette(c0: Color565, c1: Color565, mode: PaletteMode) -> [Color8888; 4] {
    let (r0, g0, b0) = (c0.red() as u32, c0.green() as u32, c0.blue() as u32);
    let (r1, g1, b1) = (c1.red() as u32, c1.green() as u32, c1.blue() as u32);

    let mut dict = [Color8888::new(0, 0, 0, 0); 4];
    dict[0] = c0.to_color_8888();
    dict[1] = c1.to_color_8888();

    match mode {
        PaletteMode::FourColour => {
            let r = (2 * r0 + r1) / 3;
            let g = (2 * g0 + g1) / 3;
            let b = (2 * b0 + b1) / 3;
            dict[2] = Color8888::new(r as u8, g as u8, b as u8, 255);

            let r = (r0 + 2 * r1) / 3;
            let g = (g0 + 2 * g1) / 3;
            let b = (b0 + 2 * b1) / 3;
            dict[3] = Color8888::new(r as u8, g as u8, b as u8, 255);
        }
        PaletteMode::ThreeColour => {
            let r = (r0 + r1) / 2;
            let g = (g0 + g1) / 2;
            let b = (b0 + b1) / 2;
            dict[2] = Color8888::new(r as u8, g as u8, b as u8, 255);
            // dict[3] stays transparent black
        }
    }

    dict
}

/// Endpoints plus one 2-bit palette index per pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColourBlock {
    /// `c0` and `c1`, in storage order.
    pub endpoints: [Color565; 2],
    /// Palette index of each pixel (row-major), each in `0..4`.
    pub indices: [u8; 16],
}

impl ColourBlock {
    /// Serializes the block into its 8 byte layout.
    pub fn to_bytes(&self) -> [u8; COLOUR_BLOCK_SIZE] {
        let mut packed = 0u32;
        for (i, &index) in self.indices.iter().enumerate() {
            debug_assert!(index < 4, "colour index {index} out of range");
            packed |= ((index & 0b11) as u32) << (i * 2);
        }

        let c0 = self.endpoints[0].raw_value().to_le_bytes();
        let c1 = self.endpoints[1].raw_value().to_le_bytes();
        let idx = packed.to_le_bytes();
        [c0[0], c0[1], c1[0], c1[1], idx[0], idx[1], idx[2], idx[3]]
    }

    /// Deserializes a block from its 8 byte layout.
    pub fn from_bytes(bytes: &[u8; COLOUR_BLOCK_SIZE]) -> Self {
        let c0 = Color565::from_raw(u16::from_le_bytes([bytes[0], bytes[1]]));
        let c1 = Color565::from_raw(u16::from_le_bytes([bytes[2], bytes[3]]));
        let packed = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);

        let mut indices = [0u8; 16];
        for (i, index) in indices.iter_mut().enumerate() {
            *index = ((packed >> (i * 2)) & 0b11) as u8;
        }

        Self {
            endpoints: [c0, c1],
            indices,
        }
    }

    /// The palette of this block under the given mode.
    #[inline]
    pub fn palette(&self, mode: PaletteMode) -> [Color8888; 4] {
        colour_palette(self.endpoints[0], self.endpoints[1], mode)
    }

    /// Resolves every index against the palette.
    pub fn decode(&self, mode: PaletteMode) -> [Color8888; 16] {
        let palette = self.palette(mode);
        let mut pixels = [Color8888::default(); 16];
        for (pixel, &index) in pixels.iter_mut().zip(self.indices.iter()) {
            *pixel = palette[(index & 0b11) as usize];
        }
        pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    /// Small deterministic generator so the tests need no extra dependencies.
    fn next(state: &mut u32) -> u32 {
        *state ^= *state << 13;
        *state ^= *state >> 17;
        *state ^= *state << 5;
        *state
    }

    #[test]
    fn layout_matches_reference_block() {
        // Red/blue endpoints, indices 0,1,2,3 repeating.
        let block = ColourBlock {
            endpoints: [Color565::from_raw(0xF800), Color565::from_raw(0x001F)],
            indices: [0, 1, 2, 3, 0, 1, 2, 3, 0, 1, 2, 3, 0, 1, 2, 3],
        };
        assert_eq!(
            block.to_bytes(),
            [0x00, 0xF8, 0x1F, 0x00, 0xE4, 0xE4, 0xE4, 0xE4]
        );
    }

    #[rstest]
    #[case(PaletteMode::FourColour)]
    #[case(PaletteMode::ThreeColour)]
    fn packed_block_decodes_to_selected_palette_entries(#[case] mode: PaletteMode) {
        let mut state = 0x1234_5678;
        for _ in 0..256 {
            let mut indices = [0u8; 16];
            for index in indices.iter_mut() {
                *index = (next(&mut state) & 3) as u8;
            }
            let block = ColourBlock {
                endpoints: [
                    Color565::from_raw(next(&mut state) as u16),
                    Color565::from_raw(next(&mut state) as u16),
                ],
                indices,
            };

            let unpacked = ColourBlock::from_bytes(&block.to_bytes());
            assert_eq!(unpacked, block);

            let palette = block.palette(mode);
            let decoded = unpacked.decode(mode);
            for (pixel, &index) in decoded.iter().zip(indices.iter()) {
                assert_eq!(*pixel, palette[index as usize]);
            }
        }
    }

    #[test]
    fn three_colour_palette_has_transparent_black() {
        let palette = colour_palette(
            Color565::from_raw(0x0000),
            Color565::from_raw(0xFFFF),
            PaletteMode::ThreeColour,
        );
        assert_eq!(palette[2], Color8888::new(127, 127, 127, 255));
        assert_eq!(palette[TRANSPARENT_INDEX as usize], Color8888::new(0, 0, 0, 0));
    }

    #[test]
    fn four_colour_palette_interpolates_thirds() {
        let palette = colour_palette(
            Color565::from_raw(0xFFFF),
            Color565::from_raw(0x0000),
            PaletteMode::FourColour,
        );
        assert_eq!(palette[2], Color8888::new(170, 170, 170, 255));
        assert_eq!(palette[3], Color8888::new(85, 85, 85, 255));
    }

    #[test]
    fn bc1_mode_follows_endpoint_order() {
        let hi = Color565::from_raw(0x8000);
        let lo = Color565::from_raw(0x0001);
        assert_eq!(PaletteMode::for_bc1_endpoints(hi, lo), PaletteMode::FourColour);
        assert_eq!(PaletteMode::for_bc1_endpoints(lo, hi), PaletteMode::ThreeColour);
        assert_eq!(PaletteMode::for_bc1_endpoints(lo, lo), PaletteMode::ThreeColour);
    }
}
