//! # Colour Fits
//!
//! Finds the two endpoints and 16 indices of a colour block.
//!
//! Three fits are available, all behind [`ColourFit`]:
//!
//! - [`SingleColourFit`]: sets with exactly one colour.
//! - [`RangeFit`]: endpoints at the extremes of the principal axis.
//! - [`ClusterFit`]: exhaustive search over contiguous index groups, seeded with the range fit.
//!
//! Whatever the fit, the final candidate is scored by [`ColourFitResult::evaluate`], which
//! maps every colour to its nearest entry of the palette a decoder would produce.

mod cluster;
mod principal_axis;
mod range;
mod single;

pub use cluster::ClusterFit;
pub use range::RangeFit;
pub use single::SingleColourFit;

use crate::color_565::Color565;
use crate::colour_block::{colour_palette, ColourBlock, PaletteMode, TRANSPARENT_INDEX};
use crate::colour_set::{ColourSet, PixelSlot};
use crate::metric::Metric;
use crate::settings::{ColourFitStrategy, CompressionSettings};

/// Iteration cap of [`ColourFitStrategy::IterativeCluster`].
pub const MAX_CLUSTER_ITERATIONS: usize = 8;

/// An endpoint fit restricted to one palette mode.
pub trait ColourFit {
    /// Best result using the 4 colour palette.
    fn fit4(&self, set: &ColourSet, metric: &Metric) -> ColourFitResult;

    /// Best result using the 3 colour palette (BC1 only).
    fn fit3(&self, set: &ColourSet, metric: &Metric) -> ColourFitResult;

    /// Best result for `mode`.
    fn fit(&self, set: &ColourSet, metric: &Metric, mode: PaletteMode) -> ColourFitResult {
        match mode {
            PaletteMode::FourColour => self.fit4(set, metric),
            PaletteMode::ThreeColour => self.fit3(set, metric),
        }
    }
}

/// Endpoints, per-pixel indices and total weighted error of a fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColourFitResult {
    start: Color565,
    end: Color565,
    mode: PaletteMode,
    indices: [u8; 16],
    error: f32,
}

impl ColourFitResult {
    /// Scores a pair of endpoints against a colour set.
    ///
    /// Each set entry takes the nearest palette entry (lowest index on ties); the error is
    /// the weighted sum of their distances. Masked pixels take the entry nearest to their
    /// own colour and add no error. Transparent pixels take [`TRANSPARENT_INDEX`].
    pub fn evaluate(
        set: &ColourSet,
        metric: &Metric,
        start: Color565,
        end: Color565,
        mode: PaletteMode,
    ) -> Self {
        let palette = colour_palette(start, end, mode);
        let usable = match mode {
            PaletteMode::FourColour => 4,
            PaletteMode::ThreeColour => 3,
        };
        let mut points = [[0.0f32; 3]; 4];
        for (point, colour) in points.iter_mut().zip(palette.iter()) {
            *point = colour.rgb_f32();
        }

        let nearest = |colour: [f32; 3]| -> (u8, f32) {
            let mut best = (0u8, f32::MAX);
            for (index, point) in points[..usable].iter().enumerate() {
                let distance = metric.distance(colour, *point);
                if distance < best.1 {
                    best = (index as u8, distance);
                }
            }
            best
        };

        let mut set_indices = [0u8; 16];
        let mut error = 0.0;
        for (entry, (colour, weight)) in set.colours().iter().zip(set.weights()).enumerate() {
            let (index, distance) = nearest(colour.rgb_f32());
            set_indices[entry] = index;
            error += weight * distance;
        }

        let mut indices = [0u8; 16];
        for (i, slot) in set.slots().iter().enumerate() {
            indices[i] = match *slot {
                PixelSlot::Colour(entry) => set_indices[entry as usize],
                PixelSlot::Transparent => {
                    debug_assert_eq!(mode, PaletteMode::ThreeColour);
                    TRANSPARENT_INDEX
                }
                PixelSlot::Masked => nearest(set.pixels().pixels[i].rgb_f32()).0,
            };
        }

        Self {
            start,
            end,
            mode,
            indices,
            error,
        }
    }

    /// Total weighted squared error over the colour set.
    #[inline]
    pub fn error(&self) -> f32 {
        self.error
    }

    /// Palette mode the result was scored with.
    #[inline]
    pub fn mode(&self) -> PaletteMode {
        self.mode
    }

    /// The endpoints as found, before any reordering for storage.
    #[inline]
    pub fn endpoints(&self) -> (Color565, Color565) {
        (self.start, self.end)
    }

    /// Per-pixel palette indices matching [`Self::endpoints`].
    #[inline]
    pub fn indices(&self) -> &[u8; 16] {
        &self.indices
    }

    /// Orders the endpoints the way a BC1 decoder expects for the result's mode, and
    /// remaps the indices to match.
    ///
    /// - 4 colours need `c0 > c1`; equal endpoints collapse every index to 0.
    /// - 3 colours need `c0 <= c1`.
    ///
    /// BC2 and BC3 always decode 4 colours, for which this ordering is harmless.
    pub fn into_colour_block(self) -> ColourBlock {
        let mut endpoints = [self.start, self.end];
        let mut indices = self.indices;

        match self.mode {
            PaletteMode::FourColour => {
                if endpoints[1].greater_than(&endpoints[0]) {
                    endpoints.swap(0, 1);
                    for index in indices.iter_mut() {
                        *index ^= 1;
                    }
                } else if endpoints[0] == endpoints[1] {
                    indices = [0; 16];
                }
            }
            PaletteMode::ThreeColour => {
                if endpoints[0].greater_than(&endpoints[1]) {
                    endpoints.swap(0, 1);
                    for index in indices.iter_mut() {
                        if *index < 2 {
                            *index ^= 1;
                        }
                    }
                }
            }
        }

        ColourBlock { endpoints, indices }
    }
}

/// Runs `fit` for every palette mode the block may use and keeps the best.
///
/// The 4 colour result wins ties. Transparent sets can only use 3 colours.
pub fn run_fit<F: ColourFit>(
    fit: &F,
    set: &ColourSet,
    metric: &Metric,
    allow_three_colour: bool,
) -> ColourFitResult {
    if !allow_three_colour {
        return fit.fit4(set, metric);
    }

    let three = fit.fit3(set, metric);
    if set.is_transparent() {
        return three;
    }

    let four = fit.fit4(set, metric);
    if four.error <= three.error {
        four
    } else {
        three
    }
}

/// Picks and runs the fit for a colour set.
///
/// # Parameters
///
/// - `set`: Colours of the block
/// - `metric`: Error weighting
/// - `strategy`: Fit used for sets with two or more colours
/// - `allow_three_colour`: BC1 may use the 3 colour palette; BC2 and BC3 may not
pub fn fit_colours(
    set: &ColourSet,
    metric: &Metric,
    strategy: ColourFitStrategy,
    allow_three_colour: bool,
) -> ColourFitResult {
    if set.is_empty() {
        let mode = if set.is_transparent() {
            PaletteMode::ThreeColour
        } else {
            PaletteMode::FourColour
        };
        let black = Color565::from_raw(0);
        return ColourFitResult::evaluate(set, metric, black, black, mode);
    }

    if set.len() == 1 {
        return run_fit(&SingleColourFit, set, metric, allow_three_colour);
    }

    match strategy {
        ColourFitStrategy::Range => run_fit(&RangeFit::new(set), set, metric, allow_three_colour),
        ColourFitStrategy::Cluster => {
            run_fit(&ClusterFit::new(set, 1), set, metric, allow_three_colour)
        }
        ColourFitStrategy::IterativeCluster => run_fit(
            &ClusterFit::new(set, MAX_CLUSTER_ITERATIONS),
            set,
            metric,
            allow_three_colour,
        ),
    }
}

/// Compresses the colour part of a block into storage-ordered endpoints and indices.
pub fn compress_colours(
    set: &ColourSet,
    settings: &CompressionSettings,
    allow_three_colour: bool,
) -> ColourBlock {
    fit_colours(set, &settings.metric, settings.strategy, allow_three_colour).into_colour_block()
}
