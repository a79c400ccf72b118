// src/services/locale_service.rs

use std::{cmp::Ordering, sync::Arc};

use axum::http::Uri;

use crate::models::locale::LocaleConfig;

/// O que o middleware sabe de cada request.
#[derive(Debug, Default, Clone, Copy)]
pub struct RequestSignals<'a> {
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub accept_language: Option<&'a str>,
    pub referer: Option<&'a str>,
    pub cookie: Option<&'a str>,
}

/// Resultado das duas decisões independentes: redirect e cookie.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LocaleDecision {
    pub redirect_to: Option<String>,
    pub set_cookie: Option<&'static str>,
}

#[derive(Debug, Clone)]
pub struct LocaleResolver {
    config: Arc<LocaleConfig>,
}

impl LocaleResolver {
    pub fn new(config: LocaleConfig) -> Self {
        Self { config: Arc::new(config) }
    }

    pub fn config(&self) -> &LocaleConfig {
        &self.config
    }

    /// Primeiro segmento do caminho, se for um idioma suportado.
    pub fn language_in_path(&self, path: &str) -> Option<&'static str> {
        let segment = path.trim_start_matches('/').split('/').next()?;
        self.config.supported(segment)
    }

    /// Negocia o idioma a partir do Accept-Language (q-values).
    /// `q=0` é recusa explícita e sai da lista. Empates mantêm a ordem do
    /// header; nada compatível vira fallback.
    pub fn negotiate(&self, accept_language: Option<&str>) -> &'static str {
        accept_language
            .and_then(|header| {
                let mut ranked: Vec<(String, f32)> = accept_language::parse_with_quality(header)
                    .into_iter()
                    .filter(|(_, quality)| *quality > 0.0)
                    .collect();
                // sort_by é estável: empates ficam na ordem do header
                ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

                ranked.into_iter().find_map(|(tag, _)| {
                    // "es-MX" -> "es"
                    let primary = tag.split('-').next().unwrap_or(&tag).to_ascii_lowercase();
                    self.config.supported(&primary)
                })
            })
            .unwrap_or(self.config.fallback())
    }

    /// `/<lang><path>[?query]`, sem barra dupla quando o caminho é `/`.
    pub fn redirect_target(&self, lang: &str, path: &str, query: Option<&str>) -> String {
        let mut target = String::with_capacity(lang.len() + path.len() + 2);
        target.push('/');
        target.push_str(lang);

        if path.starts_with('/') {
            target.push_str(path);
        } else {
            target.push('/');
            target.push_str(path);
        }

        if let Some(query) = query.filter(|q| !q.is_empty()) {
            target.push('?');
            target.push_str(query);
        }

        target
    }

    /// Idioma presente no caminho do referer (URL absoluta ou relativa).
    pub fn referer_language(&self, referer: Option<&str>) -> Option<&'static str> {
        let uri: Uri = referer?.trim().parse().ok()?;
        self.language_in_path(uri.path())
    }

    pub fn resolve(&self, signals: RequestSignals<'_>) -> LocaleDecision {
        if self.config.is_static_asset(signals.path) {
            return LocaleDecision::default();
        }

        let redirect_to = match self.language_in_path(signals.path) {
            Some(_) => None,
            None => {
                let lang = self.negotiate(signals.accept_language);
                Some(self.redirect_target(lang, signals.path, signals.query))
            }
        };

        let set_cookie = self
            .referer_language(signals.referer)
            .filter(|lang| signals.cookie != Some(*lang));

        LocaleDecision { redirect_to, set_cookie }
    }
}

impl Default for LocaleResolver {
    fn default() -> Self {
        Self::new(LocaleConfig::default())
    }
}
