//! `document.cookie` token store.

use crate::core::auth::TokenStore;
use crate::core::diagnostics::log_error;
use crate::core::token::{ACCESS_TOKEN_COOKIE, expired_token_cookie, read_cookie, token_cookie};
use gloo::utils::document;
use std::time::Duration;
use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

/// Persists the bearer token in the `access_token` cookie.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct CookieTokenStore;

impl TokenStore for CookieTokenStore {
    fn load(&self) -> Option<String> {
        let header = html_document()?.cookie().ok()?;
        read_cookie(&header, ACCESS_TOKEN_COOKIE)
    }

    fn save(&self, token: &str, ttl: Duration) {
        write_cookie(&token_cookie(token, ttl));
    }

    fn clear(&self) {
        write_cookie(&expired_token_cookie());
    }
}

fn html_document() -> Option<HtmlDocument> {
    document().dyn_into::<HtmlDocument>().ok()
}

fn write_cookie(assignment: &str) {
    let Some(doc) = html_document() else {
        log_error("cookie write failed", "document is not an HTML document");
        return;
    };
    if let Err(err) = doc.set_cookie(assignment) {
        log_error("cookie write failed", &format!("{err:?}"));
    }
}
