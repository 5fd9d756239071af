//! Univariate feature ranking with F-statistics.
//!
//! Generates a regression target driven by two of six features and
//! shows how the filter selectors rank the columns.

use anyhow::Result;
use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use featselect::feature_selection::univariate_selection::{f_regression, SelectKBest};

fn main() -> Result<()> {
    env_logger::init();

    let mut rng = StdRng::seed_from_u64(13);
    let n_samples = 100;
    let n_features = 6;

    let mut data = Vec::with_capacity(n_samples * n_features);
    let mut target = Vec::with_capacity(n_samples);
    for _ in 0..n_samples {
        let row: Vec<f64> = (0..n_features).map(|_| rng.gen::<f64>()).collect();
        // Only the first two features drive the target
        target.push(3.0 * row[0] - 2.0 * row[1] + 0.1 * rng.gen::<f64>());
        data.extend(row);
    }

    let x = Array2::from_shape_vec((n_samples, n_features), data)?;
    let y = Array1::from_vec(target);

    let (f_scores, p_values) = f_regression(&x, &y);
    println!("feature  f-score      p-value");
    for i in 0..n_features {
        println!("{:>7}  {:>10.3}  {:.6}", i, f_scores[i], p_values[i]);
    }

    let selected = SelectKBest::new(2).fit(&x, &y);
    println!("top 2 features: {:?}", selected);

    Ok(())
}
