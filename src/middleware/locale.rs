// src/middleware/locale.rs

use axum::{
    body::Body,
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};

use crate::services::locale_service::{LocaleResolver, RequestSignals};

// Garante que todo caminho (fora os estáticos) comece com um idioma suportado.
// O cookie do referer é avaliado à parte, com ou sem redirect.
pub async fn locale_redirect(
    State(resolver): State<LocaleResolver>,
    jar: CookieJar,
    request: Request<Body>,
    next: Next,
) -> Response {
    let headers = request.headers();
    let cookie_name = resolver.config().cookie_name;

    let decision = resolver.resolve(RequestSignals {
        path: request.uri().path(),
        query: request.uri().query(),
        accept_language: headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok()),
        referer: headers
            .get(header::REFERER)
            .and_then(|value| value.to_str().ok()),
        cookie: jar.get(cookie_name).map(|cookie| cookie.value()),
    });

    let jar = match decision.set_cookie {
        Some(lang) => {
            tracing::debug!("🍪 Idioma '{}' propagado do referer para o cookie", lang);
            jar.add(Cookie::build((cookie_name, lang)).path("/"))
        }
        None => jar,
    };

    match decision.redirect_to {
        Some(location) => {
            tracing::debug!("↪️  {} -> {}", request.uri(), location);
            (jar, Redirect::temporary(&location)).into_response()
        }
        None => (jar, next.run(request).await).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        http::StatusCode,
        middleware::from_fn_with_state,
        routing::get,
        Router,
    };
    use tower::ServiceExt;

    fn app() -> Router {
        let resolver = LocaleResolver::default();

        Router::new()
            .route("/{lng}", get(|| async { "page" }))
            .route("/{lng}/{*rest}", get(|| async { "page" }))
            .fallback(|| async { (StatusCode::NOT_FOUND, "not found") })
            .layer(from_fn_with_state(resolver, locale_redirect))
    }

    fn request(path: &str, headers: &[(&str, &str)]) -> Request<Body> {
        let mut builder = Request::builder().uri(path);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn location(response: &Response) -> Option<&str> {
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
    }

    fn set_cookie(response: &Response) -> Option<&str> {
        response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
    }

    #[tokio::test]
    async fn images_pass_through() {
        let response = app()
            .oneshot(request("/images/logo.png", &[("accept-language", "es")]))
            .await
            .unwrap();

        assert_ne!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert!(location(&response).is_none());
    }

    #[tokio::test]
    async fn icons_pass_through() {
        let response = app().oneshot(request("/favicon.icon", &[])).await.unwrap();

        assert!(location(&response).is_none());
        assert!(set_cookie(&response).is_none());
    }

    #[tokio::test]
    async fn root_redirects_to_fallback() {
        let response = app().oneshot(request("/", &[])).await.unwrap();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location(&response), Some("/en/"));
    }

    #[tokio::test]
    async fn root_redirects_to_accept_language() {
        let response = app()
            .oneshot(request("/", &[("accept-language", "es")]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location(&response), Some("/es/"));
    }

    #[tokio::test]
    async fn unsupported_accept_language_redirects_to_fallback() {
        let response = app()
            .oneshot(request("/", &[("accept-language", "ja")]))
            .await
            .unwrap();

        assert_eq!(location(&response), Some("/en/"));
    }

    #[tokio::test]
    async fn query_string_is_preserved() {
        let response = app()
            .oneshot(request("/?param=value", &[("accept-language", "de")]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location(&response), Some("/de/?param=value"));
    }

    #[tokio::test]
    async fn localized_path_is_not_redirected() {
        for path in ["/en/some-page", "/es/some-page", "/it"] {
            let response = app().oneshot(request(path, &[])).await.unwrap();

            assert_eq!(response.status(), StatusCode::OK, "{path}");
            assert!(location(&response).is_none());
        }
    }

    #[tokio::test]
    async fn referer_sets_cookie_on_pass_through() {
        let response = app()
            .oneshot(request(
                "/en/page",
                &[("referer", "http://localhost:3000/es/other-page")],
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let cookie = set_cookie(&response).expect("deveria definir o cookie");
        assert!(cookie.contains("i18next=es"));
        assert!(cookie.contains("Path=/"));
    }

    #[tokio::test]
    async fn referer_matching_cookie_is_a_no_op() {
        let response = app()
            .oneshot(request(
                "/en/page",
                &[
                    ("referer", "http://localhost:3000/es/other-page"),
                    ("cookie", "i18next=es"),
                ],
            ))
            .await
            .unwrap();

        assert!(set_cookie(&response).is_none());
    }

    #[tokio::test]
    async fn redirect_also_carries_referer_cookie() {
        let response = app()
            .oneshot(request(
                "/about",
                &[
                    ("accept-language", "nl"),
                    ("referer", "http://localhost:3000/pt/"),
                ],
            ))
            .await
            .unwrap();

        assert_eq!(location(&response), Some("/nl/about"));
        assert!(set_cookie(&response).unwrap().contains("i18next=pt"));
    }

    #[tokio::test]
    async fn following_the_redirect_does_not_redirect_again() {
        let first = app()
            .oneshot(request("/some/page?x=1", &[("accept-language", "fr")]))
            .await
            .unwrap();
        let target = location(&first).unwrap().to_string();
        assert_eq!(target, "/fr/some/page?x=1");

        let second = app()
            .oneshot(request(&target, &[("accept-language", "fr")]))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::OK);
        assert!(location(&second).is_none());
    }
}
