// src/services/probability_client.rs

use std::time::Duration;

use serde_json::Value;

use crate::{common::error::AppError, models::probability::ProbabilityRequest};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// Cliente do serviço externo que calcula a probabilidade de vitória
#[derive(Clone)]
pub struct ProbabilityClient {
    http: reqwest::Client,
    base_url: Option<String>,
}

impl ProbabilityClient {
    pub fn new(base_url: Option<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self { http, base_url }
    }

    /// Repassa os quatro jogadores e devolve o JSON do serviço sem alterações.
    pub async fn get_probability(&self, request: &ProbabilityRequest) -> Result<Value, AppError> {
        let base_url = self.base_url.as_deref().ok_or(AppError::UpstreamNotConfigured)?;

        let response = self
            .http
            .post(format!("{}/get-probability", base_url))
            .json(&request.to_upstream_body())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::UpstreamStatus(response.status()));
        }

        Ok(response.json::<Value>().await?)
    }
}
