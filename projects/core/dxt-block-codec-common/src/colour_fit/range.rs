//! Endpoints at the two extremes of the principal axis.

use super::principal_axis::{dot, principal_axis};
use super::{ColourFit, ColourFitResult};
use crate::color_565::Color565;
use crate::colour_block::PaletteMode;
use crate::colour_set::ColourSet;
use crate::metric::Metric;

/// Projects every colour onto the principal axis and uses the two extremes as endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeFit {
    start: Color565,
    end: Color565,
    axis: [f32; 3],
}

impl RangeFit {
    pub fn new(set: &ColourSet) -> Self {
        let axis = principal_axis(set);

        let mut start = [0.0; 3];
        let mut end = [0.0; 3];
        if !set.is_empty() {
            start = set.point(0);
            end = start;
            let mut min = dot(start, axis);
            let mut max = min;
            for i in 1..set.len() {
                let point = set.point(i);
                let projection = dot(point, axis);
                if projection < min {
                    min = projection;
                    start = point;
                } else if projection > max {
                    max = projection;
                    end = point;
                }
            }
        }

        Self {
            start: Color565::from_rgb_nearest(start),
            end: Color565::from_rgb_nearest(end),
            axis,
        }
    }

    /// The principal axis the endpoints were picked from.
    #[inline]
    pub fn axis(&self) -> [f32; 3] {
        self.axis
    }
}

impl ColourFit for RangeFit {
    fn fit4(&self, set: &ColourSet, metric: &Metric) -> ColourFitResult {
        ColourFitResult::evaluate(set, metric, self.start, self.end, PaletteMode::FourColour)
    }

    fn fit3(&self, set: &ColourSet, metric: &Metric) -> ColourFitResult {
        ColourFitResult::evaluate(set, metric, self.start, self.end, PaletteMode::ThreeColour)
    }
}
