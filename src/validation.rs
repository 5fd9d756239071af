//! Cross-validation used by the wrapper selectors.
//!
//! The selector only needs one capability from a validator: score a
//! model on a feature matrix and labels, once per resampled fold. The
//! mean of the returned fold scores is taken by the caller.
use anyhow::Result;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{thread_rng, SeedableRng};

use crate::error::SelectionError;
use crate::math::{Array1, Array2};
use crate::models::estimator_trait::Estimator;

/// External scoring collaborator: evaluates a model over resampled
/// train/test splits and returns one score per fold.
pub trait CrossValidator {
    fn evaluate(
        &self,
        model: &mut dyn Estimator,
        x: &Array2<f32>,
        y: &Array1<f32>,
    ) -> Result<Vec<f32>>;
}

/// K-fold cross-validation over contiguous index chunks.
///
/// The model is refit on the training rows of every fold and scored on
/// the held-out rows, so after `evaluate` returns the model is fit on
/// the last fold's training split. Shuffling is off unless requested;
/// a seeded shuffle makes fold assignment reproducible.
pub struct KFold {
    n_folds: usize,
    shuffle: bool,
    seed: Option<u64>,
}

impl KFold {
    /// Fold counts below 2 are clamped to 2.
    pub fn new(n_folds: usize) -> Self {
        KFold {
            n_folds: n_folds.max(2),
            shuffle: false,
            seed: None,
        }
    }

    pub fn with_shuffle(mut self, seed: Option<u64>) -> Self {
        self.shuffle = true;
        self.seed = seed;
        self
    }

    pub fn n_folds(&self) -> usize {
        self.n_folds
    }
}

impl Default for KFold {
    fn default() -> Self {
        KFold::new(5)
    }
}

impl CrossValidator for KFold {
    fn evaluate(
        &self,
        model: &mut dyn Estimator,
        x: &Array2<f32>,
        y: &Array1<f32>,
    ) -> Result<Vec<f32>> {
        let n_samples = x.nrows();
        if n_samples < self.n_folds {
            return Err(SelectionError::NotEnoughSamples {
                n_samples,
                n_folds: self.n_folds,
            }
            .into());
        }

        let mut indices: Vec<usize> = (0..n_samples).collect();
        if self.shuffle {
            match self.seed {
                Some(seed) => indices.shuffle(&mut StdRng::seed_from_u64(seed)),
                None => indices.shuffle(&mut thread_rng()),
            }
        }

        // The first n_samples % n_folds folds take one extra sample
        let base_size = n_samples / self.n_folds;
        let remainder = n_samples % self.n_folds;

        let mut fold_scores = Vec::with_capacity(self.n_folds);
        let mut start = 0;
        for fold in 0..self.n_folds {
            let fold_size = base_size + usize::from(fold < remainder);
            let test_indices = &indices[start..start + fold_size];
            let train_indices: Vec<usize> = indices[..start]
                .iter()
                .chain(indices[start + fold_size..].iter())
                .copied()
                .collect();
            start += fold_size;

            model.fit(&x.select_rows(&train_indices), &y.select(&train_indices))?;
            let score = model.score(&x.select_rows(test_indices), &y.select(test_indices))?;

            log::trace!(
                "Fold {}: {} training samples, {} testing samples, score {:.4}",
                fold,
                train_indices.len(),
                test_indices.len(),
                score
            );

            fold_scores.push(score);
        }

        Ok(fold_scores)
    }
}
