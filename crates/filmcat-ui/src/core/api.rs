//! Transport-agnostic API contracts and the client error taxonomy.
//!
//! # Design
//! - Describe remote collaborators as traits so the session service and the
//!   films page can run against in-memory fakes off-wasm.
//! - Decode envelopes from `(status, body)` pairs so the HTTP client stays a
//!   thin adapter.

use crate::core::config::OAuthProvider;
use async_trait::async_trait;
use filmcat_api_models::{
    AccessTokenData, Actor, ApiEnvelope, Film, Genre, ProfileUpdate, SignInRequest, SignUpRequest,
    UserProfile,
};
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Sign-in endpoint path.
pub const SIGN_IN_PATH: &str = "/v1/auth/sign-in";
/// Sign-up endpoint path.
pub const SIGN_UP_PATH: &str = "/v1/auth/sign-up";
/// Logout endpoint path.
pub const LOGOUT_PATH: &str = "/v1/auth/logout";
/// Profile read/update/delete endpoint path.
pub const PROFILE_PATH: &str = "/v1/profile";
/// Film listing endpoint path.
pub const FILMS_PATH: &str = "/v1/films";
/// Free-text film search endpoint path.
pub const FILM_SEARCH_PATH: &str = "/v1/films/search";
/// Genre listing endpoint path.
pub const GENRES_PATH: &str = "/v1/genres";
/// Actor listing endpoint path.
pub const ACTORS_PATH: &str = "/v1/actors";

/// Failures surfaced by API calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Credentials were rejected or the session expired.
    #[error("{0}")]
    Unauthorized(String),
    /// The API answered with a non-success status.
    #[error("{message} (HTTP {status})")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Message taken from the response envelope or body.
        message: String,
    },
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),
    /// The response body could not be interpreted.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Whether the failure means the stored session is no longer valid.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }
}

/// A single avatar image selected for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarUpload {
    /// Original file name.
    pub file_name: String,
    /// MIME type reported by the browser.
    pub content_type: String,
    /// Raw file bytes.
    pub bytes: Vec<u8>,
}

/// Remote auth and profile operations used by the session service.
#[async_trait(?Send)]
pub trait AuthApi {
    /// Exchange email/password for an access token.
    async fn sign_in(&self, request: &SignInRequest) -> Result<AccessTokenData, ApiError>;
    /// Register a new account.
    async fn sign_up(&self, request: &SignUpRequest) -> Result<(), ApiError>;
    /// Revoke the session identified by `token` (when still known).
    async fn logout(&self, token: Option<&str>) -> Result<(), ApiError>;
    /// Exchange OAuth provider callback parameters for an access token.
    async fn oauth_exchange(
        &self,
        provider: &OAuthProvider,
        params: &[(String, String)],
    ) -> Result<AccessTokenData, ApiError>;
    /// Fetch the authenticated user's profile.
    async fn profile(&self) -> Result<UserProfile, ApiError>;
    /// Update profile fields, upload an avatar, or reset it to the default.
    async fn update_profile(
        &self,
        update: &ProfileUpdate,
        avatar: Option<&AvatarUpload>,
        reset_avatar: bool,
    ) -> Result<(), ApiError>;
    /// Delete the authenticated user's account.
    async fn delete_profile(&self) -> Result<(), ApiError>;
}

/// Read-only catalog operations used by the films page.
#[async_trait(?Send)]
pub trait CatalogApi {
    /// List films for an encoded request query (see `FilmFilters::api_query`).
    async fn list_films(&self, query: &str) -> Result<Vec<Film>, ApiError>;
    /// Free-text film search.
    async fn search_films(&self, text: &str) -> Result<Vec<Film>, ApiError>;
    /// All genres.
    async fn genres(&self) -> Result<Vec<Genre>, ApiError>;
    /// All actors.
    async fn actors(&self) -> Result<Vec<Actor>, ApiError>;
}

/// Path for the OAuth code exchange of `provider`, carrying the callback params.
#[must_use]
pub fn oauth_exchange_path(provider: &OAuthProvider, params: &[(String, String)]) -> String {
    let provider = provider.as_str();
    let query = crate::core::logic::encode_pairs(
        params
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str())),
    );
    if query.is_empty() {
        format!("/v1/auth/{provider}/callback")
    } else {
        format!("/v1/auth/{provider}/callback?{query}")
    }
}

/// Path for a film listing request.
#[must_use]
pub fn films_path(query: &str) -> String {
    if query.is_empty() {
        FILMS_PATH.to_string()
    } else {
        format!("{FILMS_PATH}?{query}")
    }
}

/// Path for a free-text film search.
#[must_use]
pub fn film_search_path(text: &str) -> String {
    format!("{FILM_SEARCH_PATH}?query={}", urlencoding::encode(text.trim()))
}

/// Decode an enveloped response given its HTTP status and raw body.
///
/// # Errors
/// Returns [`ApiError::Unauthorized`] for 401/403, [`ApiError::Status`] for
/// other failures (including `status: "error"` envelopes on 2xx), and
/// [`ApiError::Decode`] when a success body is not a valid envelope.
pub fn decode_envelope<T: DeserializeOwned>(status: u16, body: &str) -> Result<Option<T>, ApiError> {
    let envelope = if body.trim().is_empty() {
        None
    } else {
        Some(serde_json::from_str::<ApiEnvelope<T>>(body))
    };
    if !(200..300).contains(&status) {
        let message = match envelope {
            Some(Ok(envelope)) => envelope
                .into_result()
                .err()
                .unwrap_or_else(|| fallback_message(status)),
            _ => failure_text(status, body),
        };
        return Err(classify_failure(status, message));
    }
    match envelope {
        None => Ok(None),
        Some(Ok(envelope)) => envelope
            .into_result()
            .map_err(|message| ApiError::Status { status, message }),
        Some(Err(err)) => Err(ApiError::Decode(err.to_string())),
    }
}

/// Map a failed status plus message onto the error taxonomy.
#[must_use]
pub fn classify_failure(status: u16, message: String) -> ApiError {
    match status {
        401 | 403 => ApiError::Unauthorized(message),
        _ => ApiError::Status { status, message },
    }
}

fn failure_text(status: u16, body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed.starts_with('<') {
        fallback_message(status)
    } else {
        trimmed.to_string()
    }
}

fn fallback_message(status: u16) -> String {
    match status {
        401 => "session expired, sign in again".to_string(),
        403 => "access denied".to_string(),
        404 => "not found".to_string(),
        500..=599 => "server error".to_string(),
        _ => format!("request failed with status {status}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(slug: &str) -> OAuthProvider {
        OAuthProvider::parse(slug).expect("valid provider")
    }

    #[test]
    fn success_envelope_yields_payload() {
        let token: Option<AccessTokenData> =
            decode_envelope(200, r#"{"status":"success","data":{"access_token":"t"}}"#)
                .expect("decoded");
        assert_eq!(token.map(|t| t.access_token).as_deref(), Some("t"));
    }

    #[test]
    fn empty_body_is_empty_payload() {
        let decoded: Option<Vec<Film>> = decode_envelope(204, "").expect("decoded");
        assert!(decoded.is_none());
    }

    #[test]
    fn unauthorized_status_maps_to_auth_failure() {
        let err = decode_envelope::<UserProfile>(
            401,
            r#"{"status":"error","error":"invalid credentials"}"#,
        )
        .expect_err("unauthorized");
        assert_eq!(err, ApiError::Unauthorized("invalid credentials".into()));
        assert!(err.is_unauthorized());
    }

    #[test]
    fn server_error_without_envelope_uses_fallback_message() {
        let err = decode_envelope::<UserProfile>(502, "<html>bad gateway</html>")
            .expect_err("failure");
        assert_eq!(
            err,
            ApiError::Status {
                status: 502,
                message: "server error".into()
            }
        );
        assert_eq!(err.to_string(), "server error (HTTP 502)");
    }

    #[test]
    fn error_envelope_on_success_status_is_failure() {
        let err = decode_envelope::<UserProfile>(200, r#"{"status":"error","error":"nope"}"#)
            .expect_err("failure");
        assert_eq!(
            err,
            ApiError::Status {
                status: 200,
                message: "nope".into()
            }
        );
    }

    #[test]
    fn malformed_success_body_is_decode_error() {
        let err = decode_envelope::<UserProfile>(200, "not json").expect_err("decode");
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn paths_encode_queries() {
        assert_eq!(films_path(""), "/v1/films");
        assert_eq!(films_path("page=2"), "/v1/films?page=2");
        assert_eq!(film_search_path(" the thing "), "/v1/films/search?query=the%20thing");
        let params = vec![
            ("code".to_string(), "a/b".to_string()),
            ("state".to_string(), "xyz".to_string()),
        ];
        assert_eq!(
            oauth_exchange_path(&provider("google"), &params),
            "/v1/auth/google/callback?code=a%2Fb&state=xyz"
        );
        assert_eq!(
            oauth_exchange_path(&provider("yandex"), &[]),
            "/v1/auth/yandex/callback"
        );
    }
}
