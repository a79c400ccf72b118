// src/handlers/pages.rs

use axum::{
    extract::{FromRef, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::{
    common::error::AppError,
    models::locale::{Namespaces, TranslationOptions},
    services::locale_service::LocaleResolver,
};

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    // "common" ou "common,errors"
    pub ns: Option<String>,
}

// O que o front precisa para inicializar as traduções da página
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContext {
    pub lng: &'static str,
    pub dir: &'static str,
    pub path: String,
    pub translation_options: TranslationOptions,
}

fn page_context(
    resolver: &LocaleResolver,
    lng: &str,
    rest: Option<&str>,
    query: PageQuery,
) -> Result<PageContext, AppError> {
    // Só chega aqui sem idioma válido quando o caminho é estático (ex.: /images/x.png sem arquivo)
    let lng = resolver.config().supported(lng).ok_or(AppError::NotFound)?;
    let namespaces = query.ns.as_deref().and_then(Namespaces::parse);

    Ok(PageContext {
        lng,
        // Nenhum dos idiomas suportados é RTL
        dir: "ltr",
        path: format!("/{}", rest.unwrap_or_default()),
        translation_options: resolver.config().translation_options(Some(lng), namespaces),
    })
}

// Páginas localizadas. `/{lng}/` precisa de rota própria: é o destino do redirect da raiz.
pub fn routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    LocaleResolver: FromRef<S>,
{
    Router::new()
        .route("/{lng}", get(home))
        .route("/{lng}/", get(home))
        .route("/{lng}/{*rest}", get(page))
}

// GET /{lng} e /{lng}/
pub async fn home(
    State(resolver): State<LocaleResolver>,
    Path(lng): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, AppError> {
    let context = page_context(&resolver, &lng, None, query)?;
    Ok((StatusCode::OK, Json(context)))
}

// GET /{lng}/{*rest}
pub async fn page(
    State(resolver): State<LocaleResolver>,
    Path((lng, rest)): Path<(String, String)>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, AppError> {
    let context = page_context(&resolver, &lng, Some(&rest), query)?;
    Ok((StatusCode::OK, Json(context)))
}

// Tudo que não casou com nenhuma rota (o middleware de idioma já redirecionou o resto)
pub async fn not_found() -> AppError {
    AppError::NotFound
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::locale::locale_redirect;
    use axum::{
        body::Body,
        http::{header, Request},
        middleware::from_fn_with_state,
        response::Response,
    };
    use tower::ServiceExt;

    fn app() -> Router {
        let resolver = LocaleResolver::default();

        routes()
            .fallback(not_found)
            .layer(from_fn_with_state(resolver.clone(), locale_redirect))
            .with_state(resolver)
    }

    async fn get_path(path: &str, accept_language: Option<&str>) -> Response {
        let mut builder = Request::builder().uri(path);
        if let Some(value) = accept_language {
            builder = builder.header(header::ACCEPT_LANGUAGE, value);
        }
        app().oneshot(builder.body(Body::empty()).unwrap()).await.unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn root_redirect_lands_on_the_home_page() {
        for (accept_language, expected) in [(None, "/en/"), (Some("es"), "/es/")] {
            let first = get_path("/", accept_language).await;
            assert_eq!(first.status(), StatusCode::TEMPORARY_REDIRECT);
            let target = first.headers()[header::LOCATION].to_str().unwrap().to_string();
            assert_eq!(target, expected);

            let second = get_path(&target, accept_language).await;
            assert_eq!(second.status(), StatusCode::OK, "{target}");

            let json = body_json(second).await;
            assert_eq!(json["lng"], expected.trim_matches('/'));
            assert_eq!(json["path"], "/");
        }
    }

    #[tokio::test]
    async fn nested_redirect_lands_on_the_page_handler() {
        let first = get_path("/analytics?range=7", Some("fr")).await;
        let target = first.headers()[header::LOCATION].to_str().unwrap().to_string();
        assert_eq!(target, "/fr/analytics?range=7");

        let second = get_path(&target, Some("fr")).await;
        assert_eq!(second.status(), StatusCode::OK);

        let json = body_json(second).await;
        assert_eq!(json["lng"], "fr");
        assert_eq!(json["path"], "/analytics");
    }

    #[tokio::test]
    async fn home_without_trailing_slash_is_served() {
        let response = get_path("/de", None).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn context_for_supported_language() {
        let resolver = LocaleResolver::default();
        let context = page_context(&resolver, "es", Some("analytics"), PageQuery::default()).unwrap();

        assert_eq!(context.lng, "es");
        assert_eq!(context.dir, "ltr");
        assert_eq!(context.path, "/analytics");
        assert_eq!(context.translation_options.lng, "es");
        assert_eq!(context.translation_options.fallback_lng, "en");
    }

    #[test]
    fn home_context_uses_root_path_and_requested_namespaces() {
        let resolver = LocaleResolver::default();
        let query = PageQuery { ns: Some("common,errors".to_string()) };
        let context = page_context(&resolver, "de", None, query).unwrap();

        assert_eq!(context.path, "/");
        assert_eq!(
            context.translation_options.ns,
            Namespaces::Many(vec!["common".to_string(), "errors".to_string()])
        );
    }

    #[test]
    fn unsupported_language_is_not_found() {
        let resolver = LocaleResolver::default();
        let result = page_context(&resolver, "images", Some("logo.png"), PageQuery::default());

        assert!(matches!(result, Err(AppError::NotFound)));
    }
}
