//! Small preprocessing utilities shared by examples and models.
//!
//! Provides a per-column standard scaler operating on the crate math
//! `Array2` so it can be reused ahead of any selector or model.

use crate::math::Array2;

/// Simple standard scaler (per-column mean/std).
#[derive(Clone, Debug)]
pub struct Scaler {
    mean: Vec<f32>,
    std: Vec<f32>,
}

impl Scaler {
    /// Minimum stddev to avoid division by zero when transforming.
    const MIN_STD: f32 = 1e-6;

    /// Fit a scaler from a matrix where rows are samples and columns
    /// are features.
    pub fn fit(x: &Array2<f32>) -> Scaler {
        let (nrows, ncols) = x.shape();
        assert!(nrows > 0 && ncols > 0, "Scaler::fit requires non-empty matrix");

        let nrows_f = nrows as f32;
        let mut mean = vec![0.0f32; ncols];
        for r in 0..nrows {
            for c in 0..ncols {
                mean[c] += x[(r, c)];
            }
        }
        for v in mean.iter_mut() {
            *v /= nrows_f;
        }

        let mut std = vec![0.0f32; ncols];
        for r in 0..nrows {
            for c in 0..ncols {
                let d = x[(r, c)] - mean[c];
                std[c] += d * d;
            }
        }
        for v in std.iter_mut() {
            *v = (*v / nrows_f).sqrt().max(Scaler::MIN_STD);
        }

        Scaler { mean, std }
    }

    /// Standardize all rows and return a new matrix.
    ///
    /// Panics if `x` has a different column count than the matrix the
    /// scaler was fit on; callers inside this crate expect the shapes
    /// to be valid.
    pub fn transform(&self, x: &Array2<f32>) -> Array2<f32> {
        let (nrows, ncols) = x.shape();
        assert_eq!(ncols, self.mean.len(), "Scaler::transform: column count mismatch");

        let mut out = Vec::with_capacity(nrows * ncols);
        for r in 0..nrows {
            for c in 0..ncols {
                out.push((x[(r, c)] - self.mean[c]) / self.std[c]);
            }
        }

        Array2::from_shape_vec((nrows, ncols), out).expect("Scaler::transform: shape mismatch")
    }

    /// Fit and transform in one call.
    pub fn fit_transform(x: &Array2<f32>) -> Array2<f32> {
        Scaler::fit(x).transform(x)
    }

    pub fn mean(&self) -> &[f32] {
        &self.mean
    }

    pub fn std(&self) -> &[f32] {
        &self.std
    }
}
