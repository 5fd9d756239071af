use anyhow::{bail, Result};
use gbdt::config::Config;
use gbdt::decision_tree::{Data, DataVec};
use gbdt::gradient_boost::GBDT;

use crate::config::{ModelConfig, ModelType};
use crate::math::{Array1, Array2};
use crate::models::estimator_trait::Estimator;

/// Gradient Boosting Decision Tree (GBDT) classifier
pub struct GBDTClassifier {
    model: Option<GBDT>,
    params: ModelConfig,
}

impl GBDTClassifier {
    pub fn new(params: ModelConfig) -> Self {
        GBDTClassifier {
            model: None,
            params,
        }
    }

    /// Predict raw scores for each row. With the log-likelihood loss the
    /// outputs are probabilities of the positive class.
    pub fn predict(&self, x: &Array2<f32>) -> Result<Vec<f32>> {
        let Some(model) = self.model.as_ref() else {
            bail!("GBDT model has not been fit");
        };
        let mut test_x = DataVec::new();
        for row in 0..x.nrows() {
            let test_row = x.row_slice(row).to_vec();
            test_x.push(Data::new_test_data(test_row, None));
        }
        Ok(model.predict(&test_x))
    }
}

impl Estimator for GBDTClassifier {
    fn fit(&mut self, x: &Array2<f32>, y: &Array1<f32>) -> Result<()> {
        let feature_size = x.ncols();

        let ModelType::GBDT {
            max_depth,
            num_boost_round,
            debug,
            training_optimization_level,
            loss_type,
        } = &self.params.model_type;

        let mut config = Config::new();

        config.set_feature_size(feature_size);
        config.set_shrinkage(self.params.learning_rate);
        config.set_max_depth(*max_depth);
        config.set_iterations(*num_boost_round as usize);
        config.set_debug(*debug);
        config.set_training_optimization_level(*training_optimization_level);
        config.set_loss(loss_type);

        let mut gbdt = GBDT::new(&config);

        let mut train_x = DataVec::new();

        // The log-likelihood loss trains on -1/+1 labels
        for row in 0..x.nrows() {
            let train_row = x.row_slice(row).to_vec();
            let label = if y[row] > 0.5 { 1.0 } else { -1.0 };
            train_x.push(Data::new_training_data(train_row, 1.0, label, None));
        }

        gbdt.fit(&mut train_x);

        self.model = Some(gbdt);
        Ok(())
    }

    fn score(&self, x: &Array2<f32>, y: &Array1<f32>) -> Result<f32> {
        let predictions = self.predict(x)?;
        if predictions.len() != y.len() {
            bail!(
                "Prediction length {} does not match label length {}",
                predictions.len(),
                y.len()
            );
        }
        if y.is_empty() {
            bail!("Cannot score on an empty dataset");
        }
        let correct = predictions
            .iter()
            .zip(y.iter())
            .filter(|(&pred, &label)| (pred > 0.5) == (label > 0.5))
            .count();
        Ok(correct as f32 / y.len() as f32)
    }

    fn name(&self) -> &str {
        "gbdt"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gbdt_classifier_fit_and_score() {
        // Two well separated clusters on the first feature
        let x = Array2::from_shape_vec(
            (10, 2),
            vec![
                0.1, 5.0, 0.2, 5.0, 0.15, 5.0, 0.3, 5.0, 0.25, 5.0, 2.1, 5.0, 2.2, 5.0, 2.15, 5.0,
                2.3, 5.0, 2.25, 5.0,
            ],
        )
        .unwrap();
        let y = Array1::from_vec(vec![0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0]);

        let params = ModelConfig {
            learning_rate: 0.1,
            model_type: ModelType::GBDT {
                max_depth: 3,
                num_boost_round: 10,
                debug: false,
                training_optimization_level: 2,
                loss_type: "LogLikelyhood".to_string(),
            },
        };

        let mut classifier = GBDTClassifier::new(params);
        classifier.fit(&x, &y).unwrap();

        let predictions = classifier.predict(&x).unwrap();
        assert_eq!(predictions.len(), y.len());

        let score = classifier.score(&x, &y).unwrap();
        assert!(score >= 0.5, "training accuracy too low: {}", score);
    }

    #[test]
    fn test_score_before_fit_errors() {
        let x = Array2::from_shape_vec((2, 1), vec![0.0, 1.0]).unwrap();
        let y = Array1::from_vec(vec![0.0, 1.0]);
        let classifier = GBDTClassifier::new(ModelConfig::default());
        assert!(classifier.score(&x, &y).is_err());
    }
}
