//! # Cluster Fit
//!
//! Orders the colours along the principal axis, then tries every way of splitting that
//! order into contiguous groups, one group per palette entry. For each split the optimal
//! endpoints follow from a least squares solve, so only the split has to be searched:
//! `C(n + 3, 3)` splits for the 4 colour ramp and `C(n + 2, 2)` for the 3 colour one.
//!
//! The range fit result is the starting candidate, so a cluster fit never does worse.
//! With more than one iteration the axis is re-derived from the best endpoints and the
//! search repeats until the colour order stops changing.

use super::principal_axis::dot;
use super::range::RangeFit;
use super::{ColourFit, ColourFitResult};
use crate::color_565::Color565;
use crate::colour_block::PaletteMode;
use crate::colour_set::ColourSet;
use crate::least_squares::LeastSquaresSums;
use crate::metric::Metric;

/// Interpolation weight of endpoint 0 for palette entries 0, 2, 3, 1.
const FOUR_COLOUR_RAMP: [f32; 4] = [1.0, 2.0 / 3.0, 1.0 / 3.0, 0.0];

/// Interpolation weight of endpoint 0 for palette entries 0, 2, 1.
const THREE_COLOUR_RAMP: [f32; 3] = [1.0, 0.5, 0.0];

/// Exhaustive search over contiguous index groups.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterFit {
    seed: RangeFit,
    iterations: usize,
}

#[derive(Debug, Clone, Copy)]
struct Split {
    start: [f32; 3],
    end: [f32; 3],
    quantised: (Color565, Color565),
    error: f32,
}

impl ClusterFit {
    /// # Parameters
    ///
    /// - `set`: The colours to fit
    /// - `iterations`: How many times the axis may be refined; at least 1
    pub fn new(set: &ColourSet, iterations: usize) -> Self {
        Self {
            seed: RangeFit::new(set),
            iterations: iterations.max(1),
        }
    }

    fn search(
        &self,
        set: &ColourSet,
        metric: &Metric,
        ramp: &[f32],
        mode: PaletteMode,
    ) -> ColourFitResult {
        let mut best = self.seed.fit(set, metric, mode);
        let scale = metric.squared();
        let mut axis = self.seed.axis();
        let mut previous: Option<[u8; 16]> = None;

        for _ in 0..self.iterations {
            let order = order_along(set, axis);
            if previous == Some(order) {
                break;
            }
            previous = Some(order);

            let Some(split) = best_split(set, &order[..set.len()], ramp, scale) else {
                break;
            };
            let (start, end) = split.quantised;
            let candidate = ColourFitResult::evaluate(set, metric, start, end, mode);
            if candidate.error() < best.error() {
                best = candidate;
            }

            axis = [
                split.end[0] - split.start[0],
                split.end[1] - split.start[1],
                split.end[2] - split.start[2],
            ];
            if dot(axis, axis) <= f32::EPSILON {
                break;
            }
        }

        best
    }
}

impl ColourFit for ClusterFit {
    fn fit4(&self, set: &ColourSet, metric: &Metric) -> ColourFitResult {
        self.search(set, metric, &FOUR_COLOUR_RAMP, PaletteMode::FourColour)
    }

    fn fit3(&self, set: &ColourSet, metric: &Metric) -> ColourFitResult {
        self.search(set, metric, &THREE_COLOUR_RAMP, PaletteMode::ThreeColour)
    }
}

/// Set entries sorted by their projection onto `axis`; ties keep set order.
fn order_along(set: &ColourSet, axis: [f32; 3]) -> [u8; 16] {
    let mut projections = [0.0f32; 16];
    for (i, projection) in projections.iter_mut().enumerate().take(set.len()) {
        *projection = dot(set.point(i), axis);
    }

    let mut order = [0u8; 16];
    for (i, entry) in order.iter_mut().enumerate() {
        *entry = i as u8;
    }
    order[..set.len()]
        .sort_by(|&a, &b| projections[a as usize].total_cmp(&projections[b as usize]));
    order
}

/// Lowest error split of `order` into `ramp.len()` contiguous groups.
///
/// Splits are visited in lexicographic order of their cut points and only a strictly
/// lower error replaces the current best.
fn best_split(set: &ColourSet, order: &[u8], ramp: &[f32], scale: [f32; 3]) -> Option<Split> {
    let n = order.len();
    if n == 0 || ramp.len() < 2 {
        return None;
    }

    // Prefix sums of w, w·x and w·x² along the order.
    let mut weight = [0.0f32; 17];
    let mut x = [[0.0f32; 3]; 17];
    let mut x2 = [[0.0f32; 3]; 17];
    for (k, &entry) in order.iter().enumerate() {
        let point = set.point(entry as usize);
        let w = set.weights()[entry as usize];
        weight[k + 1] = weight[k] + w;
        for c in 0..3 {
            x[k + 1][c] = x[k][c] + w * point[c];
            x2[k + 1][c] = x2[k][c] + w * point[c] * point[c];
        }
    }

    let mut cut_storage = [0usize; 3];
    let cuts = &mut cut_storage[..ramp.len() - 1];
    let mut best: Option<Split> = None;

    loop {
        let mut sums = LeastSquaresSums::<3>::default();
        let mut lo = 0;
        for (group, &alpha) in ramp.iter().enumerate() {
            let hi = cuts.get(group).copied().unwrap_or(n);
            if hi > lo {
                let mut group_x = [0.0; 3];
                let mut group_x2 = [0.0; 3];
                for c in 0..3 {
                    group_x[c] = x[hi][c] - x[lo][c];
                    group_x2[c] = x2[hi][c] - x2[lo][c];
                }
                sums.add_group(alpha, weight[hi] - weight[lo], group_x, group_x2);
            }
            lo = hi;
        }

        let (start, end) = sums.solve();
        let quantised = (
            Color565::from_rgb_nearest(start),
            Color565::from_rgb_nearest(end),
        );
        let error = sums.error(quantised.0.rgb_f32(), quantised.1.rgb_f32(), scale);
        if best.map_or(true, |current| error < current.error) {
            best = Some(Split {
                start,
                end,
                quantised,
                error,
            });
        }

        // Advance to the next non-decreasing cut sequence.
        let Some(m) = (0..cuts.len()).rev().find(|&m| cuts[m] < n) else {
            break;
        };
        let next = cuts[m] + 1;
        for cut in cuts[m..].iter_mut() {
            *cut = next;
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_count_matches_combinations() {
        // Walk the same cut sequence and count the visits.
        for n in 1..=16usize {
            let mut cuts = [0usize; 3];
            let mut visits = 0;
            loop {
                visits += 1;
                let Some(m) = (0..3).rev().find(|&m| cuts[m] < n) else {
                    break;
                };
                let next = cuts[m] + 1;
                for cut in cuts[m..].iter_mut() {
                    *cut = next;
                }
            }
            assert_eq!(visits, (n + 3) * (n + 2) * (n + 1) / 6);
        }
    }
}
