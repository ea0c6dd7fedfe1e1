//! Settings shared by all block encoders.

use crate::colour_set::ColourSetOptions;
use crate::metric::Metric;
use derive_enum_all_values::AllValues;

/// How colour endpoints are searched for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AllValues)]
pub enum ColourFitStrategy {
    /// Extremes along the principal axis. Fast, lowest quality.
    Range,
    /// Exhaustive search over contiguous index groups along the principal axis.
    Cluster,
    /// [`ColourFitStrategy::Cluster`], re-deriving the axis from the best endpoints
    /// until the colour ordering stops changing.
    #[default]
    IterativeCluster,
}

/// Settings for compressing a single block.
///
/// Settings are passed per call and never cached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressionSettings {
    /// Endpoint search strategy.
    pub strategy: ColourFitStrategy,
    /// Per-channel error weighting.
    pub metric: Metric,
    /// Weight each pixel's colour by its alpha, so nearly transparent pixels matter less.
    pub weight_colour_by_alpha: bool,
    /// BC1 only: encode pixels with alpha below 128 as transparent (3 colour mode).
    /// When unset, BC1 ignores alpha and always decodes opaque.
    pub punch_through_alpha: bool,
}

impl Default for CompressionSettings {
    fn default() -> Self {
        Self {
            strategy: ColourFitStrategy::default(),
            metric: Metric::UNIFORM,
            weight_colour_by_alpha: false,
            punch_through_alpha: true,
        }
    }
}

impl CompressionSettings {
    /// Colour set options for a format; `bc1` enables the punch-through alpha handling.
    #[inline]
    pub fn colour_set_options(&self, bc1: bool) -> ColourSetOptions {
        ColourSetOptions {
            transparency: bc1 && self.punch_through_alpha,
            weight_by_alpha: self.weight_colour_by_alpha,
        }
    }
}
