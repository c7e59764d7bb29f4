#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
//! Shared HTTP DTOs for the film catalog API.
//!
//! Every response from the catalog service is wrapped in an [`ApiEnvelope`];
//! the payload types here describe the `data` member of those envelopes and
//! the request bodies the client sends. Records are read-only on the client.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome marker carried by every response envelope.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ApiStatus {
    /// The request succeeded and `data` (if any) is the payload.
    Success,
    /// The request failed and `error` carries the reason.
    Error,
}

/// Standard response wrapper emitted by the catalog API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiEnvelope<T> {
    /// Success or error marker.
    pub status: ApiStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Human-readable failure reason when `status` is `error`.
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Response payload; `null` or absent for empty results.
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// Split the envelope into its payload or its failure message.
    ///
    /// # Errors
    /// Returns the envelope error (or a generic message) when the status is
    /// [`ApiStatus::Error`].
    pub fn into_result(self) -> Result<Option<T>, String> {
        match self.status {
            ApiStatus::Success => Ok(self.data),
            ApiStatus::Error => Err(self
                .error
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| "request failed".to_string())),
        }
    }
}

/// Bearer token issued by sign-in and OAuth exchange.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessTokenData {
    /// Opaque access token used in the `Authorization` header.
    pub access_token: String,
}

/// Profile of the authenticated user.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Account email address.
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Public login name.
    pub login: Option<String>,
    #[serde(default)]
    /// Avatar URL prefix; the client appends the size/theme suffix.
    pub avatar_url: Option<String>,
}

/// Email/password credentials for sign-in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignInRequest {
    /// Account email address.
    pub email: String,
    /// Account password.
    pub password: String,
}

/// Registration payload for a new account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignUpRequest {
    /// Email address that receives the confirmation link.
    pub email: String,
    /// Desired login name.
    pub login: String,
    /// Account password.
    pub password: String,
}

/// Editable profile fields; absent members are left untouched server-side.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Replacement login name.
    pub login: Option<String>,
}

impl ProfileUpdate {
    /// Whether the update carries no field changes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.login.is_none()
    }
}

/// Genre record from `/v1/genres` and embedded in films.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Genre {
    #[serde(rename = "genre_id")]
    /// Stable genre identifier.
    pub id: u32,
    #[serde(default)]
    /// Display name.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Creation timestamp.
    pub created_at: Option<DateTime<Utc>>,
}

/// Actor record from `/v1/actors` and embedded in films.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Actor {
    #[serde(rename = "actor_id")]
    /// Stable actor identifier.
    pub id: u32,
    #[serde(default)]
    /// Display name.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Wikipedia article URL.
    pub wiki_url: Option<String>,
    #[serde(default)]
    /// Avatar URL prefix.
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Creation timestamp.
    pub created_at: Option<DateTime<Utc>>,
}

/// Film record returned by list and search endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Film {
    #[serde(rename = "film_id")]
    /// Stable film identifier.
    pub id: u32,
    #[serde(default)]
    /// Film title.
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Synopsis text.
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Release date as sent by the API (ISO-8601 date or timestamp).
    pub release_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Running time in minutes.
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Aggregate rating on a 0–100 scale.
    pub rating: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Producer name.
    pub producer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Poster image URL.
    pub poster_url: Option<String>,
    #[serde(default)]
    /// Genres attached to the film.
    pub genres: Vec<Genre>,
    #[serde(default)]
    /// Cast members.
    pub actors: Vec<Actor>,
}

impl Film {
    /// Release year extracted from the leading `YYYY` of the release date.
    #[must_use]
    pub fn release_year(&self) -> Option<i32> {
        self.release_date
            .as_deref()
            .and_then(|date| date.get(..4))
            .and_then(|year| year.parse().ok())
    }
}
