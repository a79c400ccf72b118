pub mod basic_auth;
pub mod i18n;
pub mod locale;
