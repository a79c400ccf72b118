pub mod analytics_service;
pub mod locale_service;
pub mod probability_client;
pub mod retention_job;
