pub mod artifacts;
pub mod cells;
pub mod config;
pub mod display;
pub mod encoding;
pub mod gridsearch;
pub mod linalg;
pub mod metrics;
pub mod training;
