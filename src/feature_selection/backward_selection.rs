use anyhow::{bail, Result};
use itertools::Itertools;
use serde::Serialize;

use crate::config::SelectionConfig;
use crate::error::SelectionError;
use crate::math::{Array1, Array2};
use crate::models::estimator_trait::Estimator;
use crate::validation::{CrossValidator, KFold};

/// Outcome of one search round: the best-scoring combination found at
/// one target subset size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundRecord {
    pub feature_size: usize,
    pub score: f32,
    pub features: Vec<usize>,
}

/// Sequential backward selector for trainable estimators.
///
/// Starting from the full feature set, each round evaluates every
/// combination of the retained features at the current target size and
/// keeps the highest-scoring one. The winning combination becomes the
/// candidate pool for the next, smaller round, so the retained set
/// shrinks monotonically until the configured floor is reached.
///
/// The search is exhaustive: a round over a pool of k features at size s
/// evaluates all C(k, s) combinations, with no pruning or early
/// stopping. Selecting from many features down to a small floor is
/// exponential in the worst case.
pub struct SequentialBackwardSelector {
    model: Box<dyn Estimator>,
    validator: Box<dyn CrossValidator>,
    reduced_feature_size: usize,
    use_cross_val: bool,
    records: Vec<RoundRecord>,
}

impl SequentialBackwardSelector {
    /// Create a new selector around a boxed model.
    ///
    /// Scoring uses 5-fold cross-validation unless
    /// `config.use_cross_val` is false, in which case each combination
    /// is scored on its own training data. A different validator can be
    /// installed with [`with_validator`](Self::with_validator).
    pub fn new(model: Box<dyn Estimator>, config: SelectionConfig) -> Self {
        SequentialBackwardSelector {
            model,
            validator: Box::new(KFold::default()),
            reduced_feature_size: config.reduced_feature_size.max(1),
            use_cross_val: config.use_cross_val,
            records: Vec::new(),
        }
    }

    pub fn with_validator(mut self, validator: Box<dyn CrossValidator>) -> Self {
        self.validator = validator;
        self
    }

    /// Find the reduced feature sets that score highest at each size.
    ///
    /// Runs one round per target size from `x.ncols()` down to the
    /// configured floor and appends a [`RoundRecord`] per round. If the
    /// floor exceeds the number of columns no rounds execute. Results
    /// are read from [`records`](Self::records) afterwards; repeated
    /// calls keep appending (use [`clear`](Self::clear) between runs for
    /// a fresh log).
    ///
    /// # Arguments
    ///
    /// * `x` - Feature matrix, shape (n_samples, n_features)
    /// * `y` - Labels, row-aligned with `x`
    ///
    /// # Errors
    ///
    /// Fails with [`SelectionError::NoViableCombination`] when every
    /// combination in a round scores <= 0 (there is no winner to carry
    /// into the next round). Model and validator failures propagate and
    /// abort the search; records from completed rounds are kept.
    pub fn fit(&mut self, x: &Array2<f32>, y: &Array1<f32>) -> Result<()> {
        let mut feature_size = x.ncols();
        let mut keep_features: Vec<usize> = (0..feature_size).collect();

        while feature_size >= self.reduced_feature_size {
            let mut best_score = 0.0f32;
            let mut best_feature_combination: Option<Vec<usize>> = None;
            let mut n_evaluated = 0usize;

            for feature_combination in keep_features
                .iter()
                .copied()
                .combinations(feature_size)
            {
                let score = self.score_subset(x, y, &feature_combination)?;
                log::trace!(
                    "Combination {:?} scored {:.4}",
                    feature_combination,
                    score
                );
                n_evaluated += 1;
                // Strictly greater: on ties the first combination in
                // lexicographic order keeps the win
                if score > best_score {
                    best_score = score;
                    best_feature_combination = Some(feature_combination);
                }
            }

            let Some(winner) = best_feature_combination else {
                return Err(SelectionError::NoViableCombination(feature_size).into());
            };

            log::debug!(
                "Size {}: evaluated {} combinations, best score {:.4} for {:?}",
                feature_size,
                n_evaluated,
                best_score,
                winner
            );

            self.records.push(RoundRecord {
                feature_size,
                score: best_score,
                features: winner.clone(),
            });
            keep_features = winner;
            feature_size -= 1;
        }

        Ok(())
    }

    /// Round records in search order (descending feature size).
    pub fn records(&self) -> &[RoundRecord] {
        &self.records
    }

    /// Drop all accumulated round records.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    fn score_subset(
        &mut self,
        x: &Array2<f32>,
        y: &Array1<f32>,
        selected_features: &[usize],
    ) -> Result<f32> {
        let x_subset = x.select_columns(selected_features);
        if self.use_cross_val {
            let fold_scores = self.validator.evaluate(self.model.as_mut(), &x_subset, y)?;
            match Array1::from_vec(fold_scores).mean() {
                Some(mean) => Ok(mean),
                None => bail!("Cross-validator returned no fold scores"),
            }
        } else {
            // Training score: the model is left fit on this combination
            self.model.fit(&x_subset, y)?;
            self.model.score(&x_subset, y)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scores a column subset by applying `f` to the first row of the
    /// restricted matrix. Tests build matrices whose columns are
    /// constant, so the first row identifies which columns were kept.
    struct FirstRowScorer {
        f: fn(&[f32]) -> f32,
    }

    impl Estimator for FirstRowScorer {
        fn fit(&mut self, _x: &Array2<f32>, _y: &Array1<f32>) -> Result<()> {
            Ok(())
        }

        fn score(&self, x: &Array2<f32>, _y: &Array1<f32>) -> Result<f32> {
            Ok((self.f)(x.row_slice(0)))
        }
    }

    /// 2-row matrix with n constant columns, column j holding the value j.
    fn index_matrix(n: usize) -> (Array2<f32>, Array1<f32>) {
        let mut data = Vec::with_capacity(2 * n);
        for _ in 0..2 {
            data.extend((0..n).map(|j| j as f32));
        }
        let x = Array2::from_shape_vec((2, n), data).unwrap();
        let y = Array1::from_vec(vec![0.0, 1.0]);
        (x, y)
    }

    fn selector(f: fn(&[f32]) -> f32, floor: usize) -> SequentialBackwardSelector {
        SequentialBackwardSelector::new(
            Box::new(FirstRowScorer { f }),
            SelectionConfig {
                reduced_feature_size: floor,
                use_cross_val: false,
            },
        )
    }

    #[test]
    fn ties_keep_the_first_combination_in_lexicographic_order() {
        let (x, y) = index_matrix(4);
        // Every combination scores 1.0, so the first one enumerated
        // must win every round
        let mut sbs = selector(|_| 1.0, 1);
        sbs.fit(&x, &y).unwrap();

        let features: Vec<&[usize]> = sbs.records().iter().map(|r| r.features.as_slice()).collect();
        assert_eq!(
            features,
            vec![&[0, 1, 2, 3][..], &[0, 1, 2][..], &[0, 1][..], &[0][..]]
        );
    }

    #[test]
    fn all_nonpositive_scores_fail_fast() {
        let (x, y) = index_matrix(3);
        let mut sbs = selector(|_| 0.0, 1);
        let err = sbs.fit(&x, &y).unwrap_err();
        let err = err.downcast::<SelectionError>().unwrap();
        assert!(matches!(err, SelectionError::NoViableCombination(3)));
        assert!(sbs.records().is_empty());
    }

    #[test]
    fn zero_floor_is_clamped_to_one() {
        let (x, y) = index_matrix(3);
        let mut sbs = selector(|row| row.len() as f32, 0);
        sbs.fit(&x, &y).unwrap();
        // Sizes 3, 2, 1 and nothing below
        assert_eq!(sbs.records().len(), 3);
        assert_eq!(sbs.records().last().unwrap().feature_size, 1);
    }

    #[test]
    fn refitting_appends_and_clear_resets() {
        let (x, y) = index_matrix(3);
        let mut sbs = selector(|row| row.len() as f32, 2);
        sbs.fit(&x, &y).unwrap();
        assert_eq!(sbs.records().len(), 2);

        sbs.fit(&x, &y).unwrap();
        assert_eq!(sbs.records().len(), 4);

        sbs.clear();
        assert!(sbs.records().is_empty());
    }

    #[test]
    fn round_records_serialize() {
        let record = RoundRecord {
            feature_size: 2,
            score: 0.75,
            features: vec![0, 3],
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"feature_size\":2"));
        assert!(json.contains("\"features\":[0,3]"));
    }
}
