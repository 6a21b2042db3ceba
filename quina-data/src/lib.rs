pub mod config;
pub mod features;
pub mod loader;
pub mod models;
