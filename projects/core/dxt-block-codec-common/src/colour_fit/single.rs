//! Fit for sets holding exactly one colour.
//!
//! RGB565 cannot represent most colours, but an interpolated palette entry often lands
//! closer than either endpoint. Each channel is searched independently for the endpoint
//! pair whose interpolant is nearest to the target.

use super::{ColourFit, ColourFitResult};
use crate::color_565::{expand_component, Color565};
use crate::colour_block::PaletteMode;
use crate::colour_set::ColourSet;
use crate::metric::Metric;

/// Exhaustive per-channel endpoint search for a single colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SingleColourFit;

/// Endpoint components `(e0, e1)` whose interpolant is nearest to `target`.
fn best_component_pair(target: u8, bits: u32, mode: PaletteMode) -> (u8, u8) {
    let max = 1u8 << bits;
    let target = target as i32;
    let mut best = (0u8, 0u8, i32::MAX);
    for e0 in 0..max {
        let v0 = expand_component(e0, bits) as i32;
        for e1 in 0..max {
            let v1 = expand_component(e1, bits) as i32;
            let value = match mode {
                PaletteMode::FourColour => (2 * v0 + v1) / 3,
                PaletteMode::ThreeColour => (v0 + v1) / 2,
            };
            let error = (value - target).abs();
            if error < best.2 {
                best = (e0, e1, error);
            }
        }
    }
    (best.0, best.1)
}

impl SingleColourFit {
    fn fit_mode(set: &ColourSet, metric: &Metric, mode: PaletteMode) -> ColourFitResult {
        debug_assert!(!set.is_empty());
        let colour = set.colours()[0];

        let nearest = Color565::from_rgb_nearest(colour.rgb_f32());
        let mut best = ColourFitResult::evaluate(set, metric, nearest, nearest, mode);
        if best.error() == 0.0 {
            return best;
        }

        let (r0, r1) = best_component_pair(colour.r, 5, mode);
        let (g0, g1) = best_component_pair(colour.g, 6, mode);
        let (b0, b1) = best_component_pair(colour.b, 5, mode);
        let start = Color565::from_components(r0, g0, b0);
        let end = Color565::from_components(r1, g1, b1);

        let interpolated = ColourFitResult::evaluate(set, metric, start, end, mode);
        if interpolated.error() < best.error() {
            best = interpolated;
        }
        best
    }
}

impl ColourFit for SingleColourFit {
    fn fit4(&self, set: &ColourSet, metric: &Metric) -> ColourFitResult {
        Self::fit_mode(set, metric, PaletteMode::FourColour)
    }

    fn fit3(&self, set: &ColourSet, metric: &Metric) -> ColourFitResult {
        Self::fit_mode(set, metric, PaletteMode::ThreeColour)
    }
}
