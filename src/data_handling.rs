//! Data structures for labeled feature datasets.
//!
//! This module defines `Dataset`, the container the examples and higher
//! level tooling use to keep a feature matrix, its labels, and the
//! feature names together and row-aligned.
use crate::math::{Array1, Array2};

#[derive(Debug, Clone)]
pub struct Dataset {
    pub x: Array2<f32>,
    pub y: Array1<f32>,
    pub feature_names: Vec<String>,
}

impl Dataset {
    /// Build a dataset, checking that labels and names line up with the
    /// matrix.
    pub fn new(x: Array2<f32>, y: Array1<f32>, feature_names: Vec<String>) -> anyhow::Result<Self> {
        if y.len() != x.nrows() {
            anyhow::bail!(
                "Label length {} does not match number of rows {}",
                y.len(),
                x.nrows()
            );
        }
        if feature_names.len() != x.ncols() {
            anyhow::bail!(
                "{} feature names for {} columns",
                feature_names.len(),
                x.ncols()
            );
        }
        Ok(Dataset {
            x,
            y,
            feature_names,
        })
    }

    /// Build a dataset with generated names ("f0", "f1", ...).
    pub fn with_default_names(x: Array2<f32>, y: Array1<f32>) -> anyhow::Result<Self> {
        let names = (0..x.ncols()).map(|i| format!("f{}", i)).collect();
        Dataset::new(x, y, names)
    }

    pub fn n_samples(&self) -> usize {
        self.x.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.x.ncols()
    }

    /// Names of the features at the given column indices.
    ///
    /// # Returns
    /// * `Ok(Vec<&str>)` with one name per index
    /// * `Err` if any index is out of range
    pub fn names_for(&self, indices: &[usize]) -> anyhow::Result<Vec<&str>> {
        indices
            .iter()
            .map(|&i| {
                self.feature_names
                    .get(i)
                    .map(|name| name.as_str())
                    .ok_or_else(|| anyhow::anyhow!("No feature at column index {}", i))
            })
            .collect()
    }

    /// New dataset restricted to the given columns.
    pub fn subset(&self, indices: &[usize]) -> anyhow::Result<Dataset> {
        let names = self
            .names_for(indices)?
            .into_iter()
            .map(str::to_string)
            .collect();
        Ok(Dataset {
            x: self.x.select_columns(indices),
            y: self.y.clone(),
            feature_names: names,
        })
    }

    pub fn log_input_data_summary(&self) {
        println!("----- Input Data Summary -----");
        println!(
            "Info: {} samples ({} positive, {} negative)",
            self.n_samples(),
            self.y.iter().filter(|&&v| v > 0.5).count(),
            self.y.iter().filter(|&&v| v <= 0.5).count()
        );
        println!("Info: {} feature columns", self.n_features());
        println!("-------------------------------");
    }
}
