//! Access-token cookie codec.
//!
//! # Design
//! - Produce and parse raw `document.cookie` strings so the browser adapter
//!   only moves strings in and out.
//! - The token lives for a fixed window after sign-in; nothing refreshes it.

use std::time::Duration;

/// Cookie name holding the bearer token.
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Lifetime of a freshly issued token (480 seconds, i.e. `480 / 86_400` of a day).
pub const TOKEN_TTL: Duration = Duration::from_secs(480);

/// `Set-Cookie`-style assignment for storing `token` for `ttl`.
#[must_use]
pub fn token_cookie(token: &str, ttl: Duration) -> String {
    format!(
        "{ACCESS_TOKEN_COOKIE}={}; max-age={}; path=/; SameSite=Lax",
        urlencoding::encode(token),
        ttl.as_secs()
    )
}

/// Assignment that expires the token cookie immediately.
#[must_use]
pub fn expired_token_cookie() -> String {
    format!("{ACCESS_TOKEN_COOKIE}=; max-age=0; path=/; SameSite=Lax")
}

/// Read a cookie value from a `document.cookie` header, ignoring blank values.
#[must_use]
pub fn read_cookie(header: &str, name: &str) -> Option<String> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| {
            urlencoding::decode(value).map_or_else(|_| value.to_string(), |v| v.into_owned())
        })
        .filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ttl_is_eight_minutes() {
        assert_eq!(TOKEN_TTL, Duration::from_secs(480));
    }

    #[test]
    fn token_cookie_carries_max_age() {
        assert_eq!(
            token_cookie("a b", TOKEN_TTL),
            "access_token=a%20b; max-age=480; path=/; SameSite=Lax"
        );
        assert!(expired_token_cookie().contains("max-age=0"));
    }

    #[test]
    fn read_cookie_finds_named_value() {
        let header = "theme=dark; access_token=abc%2Fdef; other=1";
        assert_eq!(read_cookie(header, ACCESS_TOKEN_COOKIE).as_deref(), Some("abc/def"));
        assert_eq!(read_cookie("access_token=", ACCESS_TOKEN_COOKIE), None);
        assert_eq!(read_cookie("", ACCESS_TOKEN_COOKIE), None);
        assert_eq!(read_cookie("x_access_token=1", ACCESS_TOKEN_COOKIE), None);
    }
}
