//! Closed form weighted least squares for a pair of endpoints.
//!
//! Every sample `x` is modelled as `α·a + (1 - α)·b`, where `α` is the interpolation
//! weight of the palette entry the sample was assigned to. Minimising the weighted
//! squared error over `a` and `b` gives a 2x2 linear system per channel:
//!
//! ```text
//! ( Σwα²   Σwαβ ) (a)   ( Σwαx )
//! ( Σwαβ   Σwβ² ) (b) = ( Σwβx )
//! ```
//!
//! All channels share the same matrix, so it is inverted once.
//! <https://fgiesen.wordpress.com/2024/08/29/when-is-a-bcn-astc-endpoints-from-indices-solve-singular/>

/// Relative determinant below which the system is treated as singular.
const SINGULAR_THRESHOLD: f32 = 1e-4;

/// Accumulated sums for fitting two endpoints with `N` channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeastSquaresSums<const N: usize> {
    weight: f32,
    alpha2: f32,
    beta2: f32,
    alphabeta: f32,
    alpha_x: [f32; N],
    beta_x: [f32; N],
    x: [f32; N],
    x2: [f32; N],
}

impl<const N: usize> Default for LeastSquaresSums<N> {
    fn default() -> Self {
        Self {
            weight: 0.0,
            alpha2: 0.0,
            beta2: 0.0,
            alphabeta: 0.0,
            alpha_x: [0.0; N],
            beta_x: [0.0; N],
            x: [0.0; N],
            x2: [0.0; N],
        }
    }
}

impl<const N: usize> LeastSquaresSums<N> {
    /// Adds a single sample with the given interpolation weight.
    #[inline]
    pub fn add(&mut self, alpha: f32, weight: f32, sample: [f32; N]) {
        let mut x = [0.0; N];
        let mut x2 = [0.0; N];
        for c in 0..N {
            x[c] = weight * sample[c];
            x2[c] = weight * sample[c] * sample[c];
        }
        self.add_group(alpha, weight, x, x2);
    }

    /// Adds a group of samples sharing one interpolation weight.
    ///
    /// # Parameters
    ///
    /// - `alpha`: Interpolation weight of endpoint `a` for the whole group
    /// - `weight`: `Σw` over the group
    /// - `x`: `Σw·x` over the group
    /// - `x2`: `Σw·x²` over the group
    #[inline]
    pub fn add_group(&mut self, alpha: f32, weight: f32, x: [f32; N], x2: [f32; N]) {
        let beta = 1.0 - alpha;
        self.weight += weight;
        self.alpha2 += alpha * alpha * weight;
        self.beta2 += beta * beta * weight;
        self.alphabeta += alpha * beta * weight;
        for c in 0..N {
            self.alpha_x[c] += alpha * x[c];
            self.beta_x[c] += beta * x[c];
            self.x[c] += x[c];
            self.x2[c] += x2[c];
        }
    }

    /// Total weight of all samples.
    #[inline]
    pub fn weight(&self) -> f32 {
        self.weight
    }

    /// Solves for the endpoints `(a, b)`.
    ///
    /// When the system is singular (every sample shares one interpolation weight, or
    /// there are no samples) both endpoints become the weighted mean.
    pub fn solve(&self) -> ([f32; N], [f32; N]) {
        let det = self.alpha2 * self.beta2 - self.alphabeta * self.alphabeta;
        if self.weight <= 0.0 || det.abs() <= SINGULAR_THRESHOLD * self.alpha2 * self.beta2 {
            let mean = self.mean();
            return (mean, mean);
        }

        let factor = det.recip();
        let mut a = [0.0; N];
        let mut b = [0.0; N];
        for c in 0..N {
            a[c] = (self.alpha_x[c] * self.beta2 - self.beta_x[c] * self.alphabeta) * factor;
            b[c] = (self.beta_x[c] * self.alpha2 - self.alpha_x[c] * self.alphabeta) * factor;
        }
        (a, b)
    }

    /// Weighted mean of all samples, zero when empty.
    pub fn mean(&self) -> [f32; N] {
        let mut mean = [0.0; N];
        if self.weight > 0.0 {
            for c in 0..N {
                mean[c] = self.x[c] / self.weight;
            }
        }
        mean
    }

    /// Weighted squared error of the samples against endpoints `a` and `b`,
    /// with per-channel factors `scale`.
    pub fn error(&self, a: [f32; N], b: [f32; N], scale: [f32; N]) -> f32 {
        let mut total = 0.0;
        for c in 0..N {
            let channel = a[c] * a[c] * self.alpha2
                + b[c] * b[c] * self.beta2
                + self.x2[c]
                + 2.0
                    * (a[c] * b[c] * self.alphabeta
                        - a[c] * self.alpha_x[c]
                        - b[c] * self.beta_x[c]);
            total += scale[c] * channel;
        }
        total.max(0.0)
    }
}
