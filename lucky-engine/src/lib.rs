pub mod analysis;
pub mod error;
pub mod gaming;
pub mod generator;
pub mod numerology;
