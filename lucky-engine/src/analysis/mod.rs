pub mod advisor;
pub mod frequency;

pub use advisor::advise;
pub use frequency::{analyze, cold_numbers, days_since, hot_numbers};
