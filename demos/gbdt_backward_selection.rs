//! Backward feature selection around a GBDT classifier.
//!
//! Usage: gbdt_backward_selection [features.csv labels.csv]
//!
//! With no arguments a small synthetic dataset is generated: two
//! informative features and three noise features. Pass two headerless
//! CSV paths (comma-separated features, one 0/1 label per line) to run
//! on real data.

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use featselect::config::{ModelConfig, SelectionConfig};
use featselect::data_handling::Dataset;
use featselect::feature_selection::backward_selection::SequentialBackwardSelector;
use featselect::math::{Array1, Array2};
use featselect::models::factory;
use featselect::preprocessing::Scaler;

fn read_features_csv(path: &str) -> Result<Array2<f32>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b',')
        .from_path(path)
        .with_context(|| format!("opening {}", path))?;

    let mut data = Vec::new();
    let mut n_features = 0;

    for result in reader.records() {
        let record = result?;
        let row: Vec<f32> = record
            .iter()
            .map(|field| field.trim().parse::<f32>())
            .collect::<Result<_, _>>()?;
        n_features = row.len();
        data.push(row);
    }

    let n_samples = data.len();
    Array2::from_shape_vec(
        (n_samples, n_features),
        data.into_iter().flatten().collect(),
    )
    .map_err(|e| e.into())
}

fn read_labels_csv(path: &str) -> Result<Array1<f32>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("opening {}", path))?;

    let labels: Vec<f32> = reader
        .records()
        .map(|r| {
            let record = r?;
            let value = record.get(0).context("empty row")?;
            Ok(value.trim().parse::<f32>()?)
        })
        .collect::<Result<_>>()?;

    Ok(Array1::from_vec(labels))
}

fn synthetic_dataset() -> Result<Dataset> {
    let mut rng = StdRng::seed_from_u64(7);
    let n_samples = 60;
    let n_features = 5;

    let mut data = Vec::with_capacity(n_samples * n_features);
    let mut labels = Vec::with_capacity(n_samples);
    for i in 0..n_samples {
        let label = (i % 2) as f32;
        data.push(label + 0.2 * rng.gen::<f32>());
        data.push(0.5 * label + 0.5 * rng.gen::<f32>());
        for _ in 2..n_features {
            data.push(rng.gen::<f32>());
        }
        labels.push(label);
    }

    let x = Array2::from_shape_vec((n_samples, n_features), data)?;
    let y = Array1::from_vec(labels);
    Dataset::with_default_names(x, y)
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let dataset = match (args.next(), args.next()) {
        (Some(features_path), Some(labels_path)) => {
            let x = read_features_csv(&features_path)?;
            let y = read_labels_csv(&labels_path)?;
            Dataset::with_default_names(x, y)?
        }
        _ => synthetic_dataset()?,
    };

    dataset.log_input_data_summary();

    let x = Scaler::fit_transform(&dataset.x);

    let model = factory::build_model(ModelConfig::default());
    let mut selector = SequentialBackwardSelector::new(
        model,
        SelectionConfig {
            reduced_feature_size: 2,
            use_cross_val: true,
        },
    );

    selector.fit(&x, &dataset.y)?;

    println!("size   score  features");
    for record in selector.records() {
        let names = dataset.names_for(&record.features)?;
        println!(
            "{:>4}  {:.4}  {}",
            record.feature_size,
            record.score,
            names.join(", ")
        );
    }

    Ok(())
}
