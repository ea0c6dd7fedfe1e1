//! Per-channel error weighting used by every colour fit.

use thiserror::Error;

/// Errors raised when constructing a [`Metric`] from caller supplied weights.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum MetricError {
    /// A weight was below zero.
    #[error("Metric weight for channel {channel} is negative: {value}")]
    Negative {
        /// Channel index (0 = red, 1 = green, 2 = blue).
        channel: usize,
        /// The offending weight.
        value: f32,
    },

    /// A weight was NaN or infinite.
    #[error("Metric weight for channel {channel} is not finite: {value}")]
    NonFinite {
        /// Channel index (0 = red, 1 = green, 2 = blue).
        channel: usize,
        /// The offending weight.
        value: f32,
    },
}

/// Weights applied to the red, green and blue differences before squaring.
///
/// The error of a reconstructed colour is `Σ (weight_c · (source_c - decoded_c))²`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metric {
    weights: [f32; 3],
}

impl Metric {
    /// Every channel counts the same.
    pub const UNIFORM: Self = Self {
        weights: [1.0, 1.0, 1.0],
    };

    /// Rec. 709 luma coefficients, biasing the error towards green.
    pub const PERCEPTUAL: Self = Self {
        weights: [0.2126, 0.7152, 0.0722],
    };

    /// Creates a metric from caller supplied weights.
    ///
    /// # Errors
    ///
    /// - [`MetricError::NonFinite`] if a weight is NaN or infinite
    /// - [`MetricError::Negative`] if a weight is below zero
    pub fn new(weights: [f32; 3]) -> Result<Self, MetricError> {
        for (channel, &value) in weights.iter().enumerate() {
            if !value.is_finite() {
                return Err(MetricError::NonFinite { channel, value });
            }
            if value < 0.0 {
                return Err(MetricError::Negative { channel, value });
            }
        }

        Ok(Self { weights })
    }

    /// The raw weights, as supplied.
    #[inline]
    pub fn weights(&self) -> [f32; 3] {
        self.weights
    }

    /// The weights squared; the factors applied to squared channel differences.
    #[inline]
    pub fn squared(&self) -> [f32; 3] {
        let [r, g, b] = self.weights;
        [r * r, g * g, b * b]
    }

    /// Weighted squared distance between two colours.
    #[inline]
    pub fn distance(&self, a: [f32; 3], b: [f32; 3]) -> f32 {
        let squared = self.squared();
        let mut total = 0.0;
        for channel in 0..3 {
            let delta = a[channel] - b[channel];
            total += squared[channel] * delta * delta;
        }
        total
    }
}

impl Default for Metric {
    fn default() -> Self {
        Self::UNIFORM
    }
}
