use featselect::config::{ModelConfig, ModelType};
use featselect::math::{Array1, Array2};
use featselect::models::estimator_trait::Estimator;
use featselect::models::factory;

#[test]
fn test_factory_builds_fits_and_scores() {
    // tiny dataset, class separable on the first feature
    let x = Array2::from_shape_vec(
        (6, 2),
        vec![
            1.0, 0.0, // class 1
            0.0, 1.0, // class 0
            1.0, 0.1, // class 1
            0.0, 0.9, // class 0
            1.1, 0.0, // class 1
            0.0, 1.2, // class 0
        ],
    )
    .expect("failed to create feature matrix");

    let y = Array1::from_vec(vec![1.0f32, 0.0, 1.0, 0.0, 1.0, 0.0]);

    let params = ModelConfig {
        learning_rate: 0.1,
        model_type: ModelType::GBDT {
            max_depth: 3,
            num_boost_round: 3,
            debug: false,
            training_optimization_level: 2,
            loss_type: "LogLikelyhood".to_string(),
        },
    };

    let mut model = factory::build_model(params);
    assert_eq!(model.name(), "gbdt");

    model.fit(&x, &y).unwrap();
    let score = model.score(&x, &y).unwrap();
    assert!((0.0..=1.0).contains(&score), "accuracy out of range: {}", score);
}
