pub mod dataset;
pub mod error;
pub mod models;
pub mod registry;
