use anyhow::Result;

use crate::math::{Array1, Array2};

/// A small trait abstraction for trainable models consumed by the
/// feature selectors. The contract is deliberately minimal: a model must
/// be able to fit on a column-restricted matrix and report a scalar
/// quality score for one. Implementations must be safe to call
/// repeatedly with differing column subsets.
pub trait Estimator {
    /// Fit the model. `y` is row-aligned with `x`; classifiers in this
    /// crate use the 0/1 label convention.
    fn fit(&mut self, x: &Array2<f32>, y: &Array1<f32>) -> Result<()>;

    /// Scalar quality score of the fitted model on `x`/`y`. Higher is
    /// better; selectors assume scores are non-negative.
    fn score(&self, x: &Array2<f32>, y: &Array1<f32>) -> Result<f32>;

    /// Optional human readable name for the model
    fn name(&self) -> &str {
        "estimator"
    }
}
