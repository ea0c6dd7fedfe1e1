//! Principal axis of a weighted colour set via power iteration.

use crate::colour_set::ColourSet;

const POWER_ITERATIONS: usize = 64;

#[inline]
pub(crate) fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// Weighted covariance as the upper triangle `[xx, xy, xz, yy, yz, zz]`.
pub(crate) fn weighted_covariance(set: &ColourSet) -> [f32; 6] {
    let total = set.total_weight();
    if total <= 0.0 {
        return [0.0; 6];
    }

    let mut centroid = [0.0f32; 3];
    for (i, &weight) in set.weights().iter().enumerate() {
        let point = set.point(i);
        for c in 0..3 {
            centroid[c] += weight * point[c];
        }
    }
    for value in centroid.iter_mut() {
        *value /= total;
    }

    let mut covariance = [0.0f32; 6];
    for (i, &weight) in set.weights().iter().enumerate() {
        let point = set.point(i);
        let a = [
            point[0] - centroid[0],
            point[1] - centroid[1],
            point[2] - centroid[2],
        ];
        let b = [weight * a[0], weight * a[1], weight * a[2]];
        covariance[0] += a[0] * b[0];
        covariance[1] += a[0] * b[1];
        covariance[2] += a[0] * b[2];
        covariance[3] += a[1] * b[1];
        covariance[4] += a[1] * b[2];
        covariance[5] += a[2] * b[2];
    }
    covariance
}

#[inline]
fn multiply(covariance: &[f32; 6], v: [f32; 3]) -> [f32; 3] {
    [
        covariance[0] * v[0] + covariance[1] * v[1] + covariance[2] * v[2],
        covariance[1] * v[0] + covariance[3] * v[1] + covariance[4] * v[2],
        covariance[2] * v[0] + covariance[4] * v[1] + covariance[5] * v[2],
    ]
}

/// Power iteration from `start`, [`None`] if the vector collapses to zero.
fn power_iterate(covariance: &[f32; 6], start: [f32; 3]) -> Option<[f32; 3]> {
    let mut axis = start;
    for _ in 0..POWER_ITERATIONS {
        let next = multiply(covariance, axis);
        let scale = next[0].abs().max(next[1].abs()).max(next[2].abs());
        // `!(a > b)` also rejects NaN
        if !(scale > f32::EPSILON) {
            return None;
        }
        axis = [next[0] / scale, next[1] / scale, next[2] / scale];
    }
    Some(axis)
}

/// Direction of greatest weighted variance. Not normalised.
///
/// Iterates from the grey diagonal, which is never an eigenvector of an axis-aligned
/// channel alone. Sets whose variance is orthogonal to the diagonal restart from the
/// coordinate axis of the highest variance channel, which is also returned when both
/// collapse (e.g. a set with a single colour).
pub(crate) fn principal_axis(set: &ColourSet) -> [f32; 3] {
    let covariance = weighted_covariance(set);
    let variances = [covariance[0], covariance[3], covariance[5]];

    let mut channel = 0;
    for c in 1..3 {
        if variances[c] > variances[channel] {
            channel = c;
        }
    }
    let mut fallback = [0.0; 3];
    fallback[channel] = 1.0;

    power_iterate(&covariance, [1.0; 3])
        .or_else(|| power_iterate(&covariance, fallback))
        .unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color_8888::Color8888;
    use crate::colour_set::{ColourSetOptions, ALL_PIXELS};
    use crate::decoded_4x4_block::Decoded4x4Block;

    fn set_of(colours: &[Color8888]) -> ColourSet {
        let mut block = Decoded4x4Block::new(colours[0]);
        for (i, pixel) in block.pixels.iter_mut().enumerate() {
            *pixel = colours[i % colours.len()];
        }
        ColourSet::new(&block, ALL_PIXELS, ColourSetOptions::default())
    }

    #[test]
    fn follows_a_grey_ramp() {
        let set = set_of(&[
            Color8888::new(0, 0, 0, 255),
            Color8888::new(100, 100, 100, 255),
            Color8888::new(200, 200, 200, 255),
        ]);
        let axis = principal_axis(&set);
        assert!((axis[0] - axis[1]).abs() < 1e-3);
        assert!((axis[1] - axis[2]).abs() < 1e-3);
    }

    #[test]
    fn single_channel_variation_gives_that_channel() {
        let set = set_of(&[
            Color8888::new(10, 0, 40, 255),
            Color8888::new(10, 250, 40, 255),
        ]);
        let axis = principal_axis(&set);
        assert!(axis[1].abs() > 0.99);
        assert!(axis[0].abs() < 1e-3);
        assert!(axis[2].abs() < 1e-3);
    }

    /// Rayleigh quotient: the variance along `axis`.
    fn variance_along(covariance: &[f32; 6], axis: [f32; 3]) -> f32 {
        dot(axis, multiply(covariance, axis)) / dot(axis, axis)
    }

    #[test]
    fn finds_correlated_pair_over_larger_single_channel() {
        // Red alone varies most, but green and blue together vary more.
        let set = set_of(&[
            Color8888::new(0, 0, 0, 255),
            Color8888::new(200, 0, 0, 255),
            Color8888::new(0, 150, 150, 255),
            Color8888::new(200, 150, 150, 255),
        ]);
        let covariance = weighted_covariance(&set);
        assert!(covariance[0] > covariance[3]);

        let axis = principal_axis(&set);
        let dominant = variance_along(&covariance, [0.0, 1.0, 1.0]);
        assert!(variance_along(&covariance, axis) > dominant * 0.999);
        assert!(axis[0].abs() < 0.01 * axis[1].abs());
        assert!((axis[1] - axis[2]).abs() < 1e-3);
    }

    #[test]
    fn variance_orthogonal_to_grey_restarts_from_channel_axis() {
        // Red against blue: the grey diagonal collapses to zero.
        let set = set_of(&[
            Color8888::new(255, 0, 0, 255),
            Color8888::new(0, 0, 255, 255),
        ]);
        let axis = principal_axis(&set);
        assert!((axis[0] + axis[2]).abs() < 1e-3);
        assert!(axis[0].abs() > 0.99);
        assert!(axis[1].abs() < 1e-3);
    }

    #[test]
    fn degenerate_set_uses_fallback_axis() {
        let set = set_of(&[Color8888::new(7, 7, 7, 255)]);
        assert_eq!(principal_axis(&set), [1.0, 0.0, 0.0]);
    }
}
