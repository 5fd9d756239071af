pub mod gbdt;

pub mod estimator_trait;
pub mod factory;
