use crate::color_565::Color565;

/// Represents a single RGBA8888 pixel color, as read from a source block or
/// produced by decoding a compressed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(C)]
pub struct Color8888 {
    /// Red component (0-255)
    pub r: u8,
    /// Green component (0-255)
    pub g: u8,
    /// Blue component (0-255)
    pub b: u8,
    /// Alpha component (0-255)
    pub a: u8,
}

impl Color8888 {
    /// Constructs a new [`Color8888`] from the specified red, green, blue, and alpha components.
    ///
    /// Each parameter represents the intensity of its corresponding colour channel (0–255).
    ///
    /// # Examples
    ///
    /// ```
    /// use dxt_block_codec_common::color_8888::Color8888;
    ///
    /// let pixel = Color8888::new(255, 0, 0, 255);
    /// assert_eq!(pixel.r, 255);
    /// assert_eq!(pixel.g, 0);
    /// assert_eq!(pixel.b, 0);
    /// assert_eq!(pixel.a, 255);
    /// ```
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a [`Color8888`] from 4 bytes laid out as R, G, B, A.
    #[inline]
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2], bytes[3])
    }

    /// Returns the colour with the alpha channel forced to 255.
    ///
    /// Used for comparisons where only the RGB components matter.
    #[inline]
    pub const fn without_alpha(&self) -> Self {
        Self::new(self.r, self.g, self.b, 255)
    }

    /// Returns the RGB channels as floats in the 0-255 range.
    #[inline]
    pub fn rgb_f32(&self) -> [f32; 3] {
        [self.r as f32, self.g as f32, self.b as f32]
    }

    /// Converts this colour to a [`Color565`], truncating the low bits of each channel.
    ///
    /// For the nearest representable colour, see [`Color565::from_rgb_nearest`].
    #[inline]
    pub fn to_color_565(&self) -> Color565 {
        Color565::from_rgb(self.r, self.g, self.b)
    }
}
