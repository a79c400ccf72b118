// src/middleware/i18n.rs

use axum::extract::{FromRef, FromRequestParts};
use axum::http::{header, request::Parts};

use crate::services::locale_service::LocaleResolver;

// Extrator de idioma para os handlers.
// Ordem: idioma do caminho, depois Accept-Language, depois fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locale(pub &'static str);

impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
    LocaleResolver: FromRef<S>,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let resolver = LocaleResolver::from_ref(state);

        let lang = resolver
            .language_in_path(parts.uri.path())
            .unwrap_or_else(|| {
                let header_str = parts
                    .headers
                    .get(header::ACCEPT_LANGUAGE)
                    .and_then(|header_value| header_value.to_str().ok());
                resolver.negotiate(header_str)
            });

        Ok(Locale(lang))
    }
}
