//! Persistence and environment helpers for the app shell.

use crate::core::config::ApiConfig;
use crate::core::theme::ThemeMode;
use crate::i18n::{DEFAULT_LOCALE, LocaleCode};
use gloo::console;
use gloo::storage::{LocalStorage, Storage};
use gloo::utils::window;

pub(crate) const THEME_KEY: &str = "filmcat.theme";
pub(crate) const LOCALE_KEY: &str = "filmcat.locale";

pub(crate) fn load_theme() -> ThemeMode {
    LocalStorage::get::<String>(THEME_KEY)
        .ok()
        .and_then(|value| ThemeMode::parse(&value))
        .unwrap_or_default()
}

pub(crate) fn load_locale() -> LocaleCode {
    if let Ok(value) = LocalStorage::get::<String>(LOCALE_KEY) {
        if let Some(locale) = LocaleCode::from_lang_tag(&value) {
            return locale;
        }
    }
    if let Some(nav) = window().navigator().language() {
        if let Some(locale) = LocaleCode::from_lang_tag(&nav) {
            return locale;
        }
    }
    DEFAULT_LOCALE
}

pub(crate) fn persist_theme(theme: ThemeMode) {
    set_storage(THEME_KEY, theme.as_str());
}

pub(crate) fn persist_locale(locale: LocaleCode) {
    set_storage(LOCALE_KEY, locale.code());
}

/// API settings baked in at build time via `FILMCAT_API_URL`.
pub(crate) fn api_config() -> ApiConfig {
    ApiConfig::from_override(option_env!("FILMCAT_API_URL"))
}

fn set_storage(key: &'static str, value: &str) {
    if let Err(err) = LocalStorage::set(key, value) {
        log_storage_error("set", key, &err.to_string());
    }
}

fn log_storage_error(operation: &'static str, key: &'static str, detail: &str) {
    console::error!("storage operation failed", operation, key, detail);
}
