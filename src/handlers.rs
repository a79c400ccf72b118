pub mod analytics;
pub mod pages;
pub mod probability;
