pub mod alert;
pub mod cross_validation;
pub mod domain;
pub mod protocol;
pub mod recomputation;
pub mod score;
pub mod suspicion;
