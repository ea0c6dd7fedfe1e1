use crate::color_8888::Color8888;

/// Represents a 16-bit RGB565 color (5 bits red, 6 bits green, 5 bits blue)
/// As encountered in the endpoints of every BC1 style colour block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, PartialOrd, Ord, Hash)]
pub struct Color565 {
    /// The underlying 16-bit RGB565 value
    value: u16,
}

impl Color565 {
    /// Creates a new [`Color565`] from the raw 16-bit value
    #[inline]
    pub const fn from_raw(value: u16) -> Self {
        Self { value }
    }

    /// Creates a new [`Color565`] from separate RGB components
    ///
    /// # Parameters
    ///
    /// - `r`: The red component (0-255)
    /// - `g`: The green component (0-255)
    /// - `b`: The blue component (0-255)
    ///
    /// The low bits of each channel are truncated. Encoders should prefer
    /// [`Color565::from_rgb_nearest`], which rounds to the closest decodable value.
    #[inline]
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        // Implementation matches etcpak's optimized to565 function
        // Source: https://github.com/wolfpld/etcpak/blob/master/ProcessDxtc.cpp
        Self {
            value: ((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | (b as u16 >> 3),
        }
    }

    /// Creates a new [`Color565`] from already quantized components.
    ///
    /// # Parameters
    ///
    /// - `r5`: The red component (0-31)
    /// - `g6`: The green component (0-63)
    /// - `b5`: The blue component (0-31)
    #[inline]
    pub const fn from_components(r5: u8, g6: u8, b5: u8) -> Self {
        debug_assert!(r5 < 32 && g6 < 64 && b5 < 32);
        Self {
            value: ((r5 as u16) << 11) | ((g6 as u16) << 5) | (b5 as u16),
        }
    }

    /// Creates the [`Color565`] whose decoded (bit replicated) value is closest
    /// to the given colour, channel by channel.
    ///
    /// Inputs are clamped to the 0-255 range first.
    ///
    /// # Examples
    ///
    /// ```
    /// use dxt_block_codec_common::color_565::Color565;
    ///
    /// let color = Color565::from_rgb_nearest([255.0, 127.0, 3.0]);
    /// assert_eq!(color.red(), 255);
    /// assert_eq!(color.green(), 125);
    /// assert_eq!(color.blue(), 0);
    /// ```
    #[inline]
    pub fn from_rgb_nearest(rgb: [f32; 3]) -> Self {
        Self::from_components(
            nearest_component(rgb[0], 5),
            nearest_component(rgb[1], 6),
            nearest_component(rgb[2], 5),
        )
    }

    /// Returns the raw 16-bit value
    #[inline]
    pub const fn raw_value(&self) -> u16 {
        self.value
    }

    // NOTE: https://fgiesen.wordpress.com/2021/10/04/gpu-bcn-decoding/
    // BC1 as written in the D3D11 functional spec first expands the endpoint values from 5 or 6 bits
    // to 8 bits by replicating the top bits; all three vendors appear to do this or something equivalent,
    // and then convert the result from 8-bit UNorm to float exactly.

    /// Extracts the expanded 8-bit red component
    #[inline]
    pub const fn red(&self) -> u8 {
        let r = (self.value & 0b11111000_00000000) >> 11;
        ((r << 3) | (r >> 2)) as u8
    }

    /// Extracts the expanded 8-bit green component
    #[inline]
    pub const fn green(&self) -> u8 {
        let g = (self.value & 0b00000111_11100000) >> 5;
        ((g << 2) | (g >> 4)) as u8
    }

    /// Extracts the expanded 8-bit blue component
    #[inline]
    pub const fn blue(&self) -> u8 {
        let b = self.value & 0b00000000_00011111;
        ((b << 3) | (b >> 2)) as u8
    }

    /// Returns the expanded RGB channels as floats in the 0-255 range.
    #[inline]
    pub fn rgb_f32(&self) -> [f32; 3] {
        [self.red() as f32, self.green() as f32, self.blue() as f32]
    }

    /// Compares two [`Color565`] values
    #[inline]
    pub fn greater_than(&self, other: &Self) -> bool {
        self.value > other.value
    }

    /// Converts this [`Color565`] to a [`Color8888`] with full opacity (alpha=255)
    ///
    /// # Examples
    ///
    /// ```
    /// use dxt_block_codec_common::color_565::Color565;
    ///
    /// let rgb565 = Color565::from_rgb(255, 0, 0);
    /// let rgba8888 = rgb565.to_color_8888();
    /// assert_eq!(rgba8888.r, 255);
    /// assert_eq!(rgba8888.g, 0);
    /// assert_eq!(rgba8888.b, 0);
    /// assert_eq!(rgba8888.a, 255);
    /// ```
    #[inline]
    pub fn to_color_8888(&self) -> Color8888 {
        Color8888::new(self.red(), self.green(), self.blue(), 255)
    }

    /// Converts this RGB565 color to a RGBA8888 color with the specified alpha value
    ///
    /// # Examples
    ///
    /// ```
    /// use dxt_block_codec_common::color_565::Color565;
    ///
    /// let rgb565 = Color565::from_rgb(255, 0, 0);
    /// let rgba8888 = rgb565.to_color_8888_with_alpha(128);
    /// assert_eq!(rgba8888.r, 255);
    /// assert_eq!(rgba8888.g, 0);
    /// assert_eq!(rgba8888.b, 0);
    /// assert_eq!(rgba8888.a, 128);
    /// ```
    #[inline]
    pub fn to_color_8888_with_alpha(&self, alpha: u8) -> Color8888 {
        Color8888::new(self.red(), self.green(), self.blue(), alpha)
    }
}

/// Expands a `bits` wide component to 8 bits by replicating its top bits.
#[inline]
pub const fn expand_component(value: u8, bits: u32) -> u8 {
    let value = value as u16;
    ((value << (8 - bits)) | (value >> (2 * bits - 8))) as u8
}

/// Finds the `bits` wide component whose expansion is closest to `value`.
/// Ties resolve towards the smaller component.
#[inline]
pub fn nearest_component(value: f32, bits: u32) -> u8 {
    let max = ((1u32 << bits) - 1) as i32;
    let value = value.clamp(0.0, 255.0);
    let guess = (value * max as f32 / 255.0).round() as i32;

    let mut best = guess.clamp(0, max);
    let mut best_error = f32::MAX;
    for candidate in (guess - 1).max(0)..=(guess + 1).min(max) {
        let error = (expand_component(candidate as u8, bits) as f32 - value).abs();
        if error < best_error {
            best_error = error;
            best = candidate;
        }
    }

    best as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(5)]
    #[case(6)]
    fn expand_component_matches_channel_accessors(#[case] bits: u32) {
        let max = (1u8 << bits) - 1;
        for value in 0..=max {
            let color = if bits == 5 {
                Color565::from_components(value, 0, value)
            } else {
                Color565::from_components(0, value, 0)
            };
            let expanded = expand_component(value, bits);
            if bits == 5 {
                assert_eq!(color.red(), expanded);
                assert_eq!(color.blue(), expanded);
            } else {
                assert_eq!(color.green(), expanded);
            }
        }
    }

    #[rstest]
    #[case(5)]
    #[case(6)]
    fn nearest_component_is_exact_for_representable_values(#[case] bits: u32) {
        let max = (1u8 << bits) - 1;
        for value in 0..=max {
            let expanded = expand_component(value, bits);
            assert_eq!(nearest_component(expanded as f32, bits), value);
        }
    }

    #[test]
    fn nearest_component_never_loses_to_neighbours() {
        for value in 0..=255u8 {
            for bits in [5, 6] {
                let chosen = nearest_component(value as f32, bits);
                let chosen_error = (expand_component(chosen, bits) as i32 - value as i32).abs();
                let max = (1u8 << bits) - 1;
                for other in 0..=max {
                    let other_error = (expand_component(other, bits) as i32 - value as i32).abs();
                    assert!(
                        chosen_error <= other_error,
                        "value {value} bits {bits}: chose {chosen} but {other} is closer"
                    );
                }
            }
        }
    }

    #[test]
    fn nearest_clamps_out_of_range_input() {
        let color = Color565::from_rgb_nearest([-40.0, 300.0, 512.0]);
        assert_eq!(color.red(), 0);
        assert_eq!(color.green(), 255);
        assert_eq!(color.blue(), 255);
    }
}
