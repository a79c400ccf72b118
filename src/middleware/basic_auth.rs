// src/middleware/basic_auth.rs

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{FromRef, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{authorization::Basic, Authorization, HeaderMapExt};

use crate::{common::error::AppError, common::security::credentials_match, config::AppState};

struct Credentials {
    username: String,
    password: String,
}

// Credenciais do dashboard de analytics (ANALYTICS_USER / ANALYTICS_PASSWORD)
#[derive(Clone, Default)]
pub struct AnalyticsAuth {
    credentials: Option<Arc<Credentials>>,
}

impl AnalyticsAuth {
    /// Só fica configurado quando usuário e senha estão presentes.
    pub fn new(username: Option<String>, password: Option<String>) -> Self {
        let credentials = match (username, password) {
            (Some(username), Some(password)) => Some(Arc::new(Credentials { username, password })),
            _ => None,
        };
        Self { credentials }
    }

    pub fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    /// Sem header Basic: 401 com desafio, mesmo sem credenciais configuradas.
    /// Com header e sem configuração: 500.
    pub fn check(&self, headers: &HeaderMap) -> Result<(), AppError> {
        // Header ausente ou malformado (base64 inválido etc.) vira None
        let basic = headers
            .typed_get::<Authorization<Basic>>()
            .ok_or(AppError::Unauthorized)?;

        let expected = self.credentials.as_ref().ok_or(AppError::AuthNotConfigured)?;

        // Compara os dois sempre, para não vazar qual deles falhou
        let user_ok = credentials_match(basic.username(), &expected.username);
        let pass_ok = credentials_match(basic.password(), &expected.password);

        if user_ok && pass_ok {
            Ok(())
        } else {
            Err(AppError::Unauthorized)
        }
    }
}

impl FromRef<AppState> for AnalyticsAuth {
    fn from_ref(state: &AppState) -> Self {
        state.analytics_auth.clone()
    }
}

// O middleware em si
pub async fn basic_auth_guard(
    State(auth): State<AnalyticsAuth>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    if let Err(e) = auth.check(request.headers()) {
        if matches!(e, AppError::Unauthorized) {
            tracing::warn!("🔒 Acesso negado ao analytics: {}", request.uri().path());
        }
        return Err(e);
    }

    Ok(next.run(request).await)
}
