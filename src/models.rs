pub mod analytics;
pub mod locale;
pub mod probability;
