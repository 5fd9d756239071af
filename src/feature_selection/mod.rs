//! Feature selection methods.
//!
//! `backward_selection` wraps a trainable model and searches feature
//! combinations for the best-scoring subset at each size.
//! `univariate_selection` contains filter-style routines (a la
//! scikit-learn) for scoring and ranking individual features.
pub mod backward_selection;
pub mod univariate_selection;
