//! featselect: feature selection helpers for classical ML estimators.
//!
//! This crate provides a wrapper-based sequential backward selector that
//! searches feature-index combinations against a trainable model, a
//! univariate (filter) selector, a small GBDT model wrapper, k-fold
//! cross-validation, and data handling and preprocessing utilities used
//! by the examples.
//!
//! The design favors small, testable modules. Models are consumed through
//! a two-method capability trait so the selector stays polymorphic over
//! model families.
pub mod config;
pub mod data_handling;
pub mod error;
pub mod feature_selection;
pub mod math;
pub mod models;
pub mod preprocessing;
pub mod validation;
