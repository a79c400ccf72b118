// src/models/locale.rs

use serde::Serialize;

// Idiomas suportados, na ordem em que aparecem no seletor
pub const LANGUAGES: [&str; 7] = ["en", "es", "it", "nl", "de", "fr", "pt"];
pub const FALLBACK_LANGUAGE: &str = "en";
pub const COOKIE_NAME: &str = "i18next";
pub const DEFAULT_NAMESPACE: &str = "translation";

// Caminhos que nunca passam pelo roteamento de idioma
const STATIC_PREFIXES: [&str; 4] = ["/images/", "/assets/", "/api/", "/_next/"];
const STATIC_MARKERS: [&str; 2] = ["icon", "chrome"];
const STATIC_SUFFIXES: [&str; 9] = [
    ".ico", ".svg", ".png", ".jpg", ".webp", ".webmanifest", ".txt", ".xml", "sw.js",
];

/// Configuração imutável de idiomas, construída uma vez no startup.
#[derive(Debug, Clone)]
pub struct LocaleConfig {
    languages: Vec<&'static str>,
    fallback: &'static str,
    pub cookie_name: &'static str,
    pub default_namespace: &'static str,
    static_prefixes: Vec<&'static str>,
    static_markers: Vec<&'static str>,
    static_suffixes: Vec<&'static str>,
}

impl LocaleConfig {
    /// O fallback precisa ser membro do conjunto de idiomas.
    pub fn new(languages: &[&'static str], fallback: &'static str) -> anyhow::Result<Self> {
        if languages.is_empty() {
            anyhow::bail!("A lista de idiomas suportados não pode ser vazia");
        }
        if !languages.contains(&fallback) {
            anyhow::bail!("Idioma de fallback '{}' não está na lista de idiomas suportados", fallback);
        }

        Ok(Self {
            languages: languages.to_vec(),
            fallback,
            cookie_name: COOKIE_NAME,
            default_namespace: DEFAULT_NAMESPACE,
            static_prefixes: STATIC_PREFIXES.to_vec(),
            static_markers: STATIC_MARKERS.to_vec(),
            static_suffixes: STATIC_SUFFIXES.to_vec(),
        })
    }

    pub fn languages(&self) -> &[&'static str] {
        &self.languages
    }

    pub fn fallback(&self) -> &'static str {
        self.fallback
    }

    /// Busca exata (case-sensitive). Devolve o `&'static str` da lista.
    pub fn supported(&self, code: &str) -> Option<&'static str> {
        self.languages.iter().copied().find(|lang| *lang == code)
    }

    pub fn is_supported(&self, code: &str) -> bool {
        self.supported(code).is_some()
    }

    /// Imagens, ícones e afins passam direto, sem redirect nem cookie.
    pub fn is_static_asset(&self, path: &str) -> bool {
        self.static_prefixes.iter().any(|prefix| path.starts_with(prefix))
            || self.static_markers.iter().any(|marker| path.contains(marker))
            || self.static_suffixes.iter().any(|suffix| path.ends_with(suffix))
    }

    /// Opções consumidas pelo inicializador de traduções.
    pub fn translation_options(&self, lng: Option<&str>, ns: Option<Namespaces>) -> TranslationOptions {
        TranslationOptions {
            supported_lngs: self.languages.clone(),
            fallback_lng: self.fallback,
            lng: lng.unwrap_or(self.fallback).to_string(),
            fallback_ns: self.default_namespace,
            default_ns: self.default_namespace,
            ns: ns.unwrap_or_else(|| Namespaces::One(self.default_namespace.to_string())),
        }
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            languages: LANGUAGES.to_vec(),
            fallback: FALLBACK_LANGUAGE,
            cookie_name: COOKIE_NAME,
            default_namespace: DEFAULT_NAMESPACE,
            static_prefixes: STATIC_PREFIXES.to_vec(),
            static_markers: STATIC_MARKERS.to_vec(),
            static_suffixes: STATIC_SUFFIXES.to_vec(),
        }
    }
}

// Um namespace ou uma lista deles ("common" ou ["common", "errors"])
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Namespaces {
    One(String),
    Many(Vec<String>),
}

impl Namespaces {
    /// `ns=common,errors` na query vira uma lista; um nome só vira `One`.
    pub fn parse(raw: &str) -> Option<Self> {
        let names: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();

        match names.len() {
            0 => None,
            1 => names.into_iter().next().map(Namespaces::One),
            _ => Some(Namespaces::Many(names)),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationOptions {
    pub supported_lngs: Vec<&'static str>,
    pub fallback_lng: &'static str,
    pub lng: String,
    #[serde(rename = "fallbackNS")]
    pub fallback_ns: &'static str,
    #[serde(rename = "defaultNS")]
    pub default_ns: &'static str,
    pub ns: Namespaces,
}
