//! Univariate feature selection methods following scikit-learn's API.
//!
//! These are filter methods: each feature is scored against the target
//! on its own, independent of any model. Columns are scored in parallel
//! since the per-column statistics are independent.

use ndarray::{Array1, Array2};
use rayon::prelude::*;
use statrs::distribution::{ContinuousCDF, FisherSnedecor};

/// Compute Pearson's r between each feature column and the target.
///
/// Columns and the target are centered before the correlation is taken.
/// Non-finite coefficients (constant columns, zero-variance targets) are
/// replaced with 0.0 so downstream ranking stays well defined.
///
/// # Parameters
///
/// * `x` - Data matrix of shape (n_samples, n_features).
/// * `y` - Target vector of shape (n_samples,).
///
/// # Returns
///
/// An array of shape (n_features,) with one correlation coefficient per
/// feature.
pub fn r_regression(x: &Array2<f64>, y: &Array1<f64>) -> Array1<f64> {
    let n_features = x.ncols();
    let y_mean = y.mean().unwrap_or(0.0);
    let y_centered = y.mapv(|v| v - y_mean);
    let y_norm = y_centered.dot(&y_centered).sqrt();

    let coefficients: Vec<f64> = (0..n_features)
        .into_par_iter()
        .map(|j| {
            let col = x.column(j);
            let col_mean = col.mean().unwrap_or(0.0);
            let centered = col.mapv(|v| v - col_mean);
            let r = centered.dot(&y_centered) / (centered.dot(&centered).sqrt() * y_norm);
            if r.is_finite() {
                r
            } else {
                0.0
            }
        })
        .collect();

    Array1::from_vec(coefficients)
}

/// Univariate linear regression tests returning F-statistics and p-values.
///
/// This is a quick linear model test assessing the effect of each
/// regressor on the target, sequentially for many regressors. Infinite
/// F-statistics (perfectly correlated features) are capped at `f64::MAX`
/// with a p-value of 0; NaN statistics become 0 with a p-value of 1.
///
/// # Parameters
///
/// * `x` - Data matrix of shape (n_samples, n_features).
/// * `y` - Target vector of shape (n_samples,); needs at least 3 entries
///   so the F-distribution has positive degrees of freedom.
///
/// # Returns
///
/// A tuple of two (n_features,) arrays: F-statistics and their p-values.
pub fn f_regression(x: &Array2<f64>, y: &Array1<f64>) -> (Array1<f64>, Array1<f64>) {
    let correlation_coefficient = r_regression(x, y);
    let deg_of_freedom = y.len() as f64 - 2.0;

    let corr_coef_squared = correlation_coefficient.mapv(|r| r.powi(2));
    let mut f_statistic = corr_coef_squared.mapv(|r2| r2 / (1.0 - r2) * deg_of_freedom);
    let mut p_values = Array1::zeros(f_statistic.len());

    let f_dist = FisherSnedecor::new(1.0, deg_of_freedom).unwrap();
    for (i, f) in f_statistic.iter_mut().enumerate() {
        if f.is_infinite() {
            *f = f64::MAX;
            p_values[i] = 0.0;
        } else if f.is_nan() {
            *f = 0.0;
            p_values[i] = 1.0;
        } else {
            p_values[i] = 1.0 - f_dist.cdf(*f);
        }
    }

    (f_statistic, p_values)
}

/// Selects the k features scoring highest under `f_regression`.
pub struct SelectKBest {
    k: usize,
}

impl SelectKBest {
    pub fn new(k: usize) -> Self {
        SelectKBest { k }
    }

    /// Rank all features and return the column indices of the k best,
    /// best first. Ties break toward the lower column index.
    pub fn fit(&self, x: &Array2<f64>, y: &Array1<f64>) -> Vec<usize> {
        let (f_scores, _) = f_regression(x, y);

        let mut indices: Vec<usize> = (0..f_scores.len()).collect();
        indices.sort_by(|&i, &j| {
            f_scores[j]
                .partial_cmp(&f_scores[i])
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(i.cmp(&j))
        });

        indices.into_iter().take(self.k).collect()
    }
}
