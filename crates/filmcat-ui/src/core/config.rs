//! Client configuration: API base URL and OAuth redirect template.

/// Hosted catalog API used when no build-time override is provided.
pub const DEFAULT_API_BASE_URL: &str = "https://film-catalog-8re5.onrender.com";

/// Resolved connection settings for the catalog API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

impl ApiConfig {
    /// Build a config from a base URL, dropping trailing slashes.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        let trimmed = base_url.trim().trim_end_matches('/');
        let base_url = if trimmed.is_empty() {
            DEFAULT_API_BASE_URL.to_string()
        } else {
            trimmed.to_string()
        };
        Self { base_url }
    }

    /// Resolve from an optional override (e.g. `option_env!("FILMCAT_API_URL")`).
    #[must_use]
    pub fn from_override(value: Option<&str>) -> Self {
        value.map_or_else(Self::default, Self::new)
    }

    /// Absolute URL for an API path starting with `/`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Full-page authorization URL for an OAuth provider.
    #[must_use]
    pub fn oauth_authorize_url(&self, provider: &OAuthProvider) -> String {
        self.endpoint(&format!("/v1/auth/{}", provider.as_str()))
    }
}

/// Validated OAuth provider slug (`[a-z0-9_-]+`), safe to embed in paths.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OAuthProvider(String);

impl OAuthProvider {
    /// Parse a provider slug, normalizing to lowercase.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let slug = raw.trim().to_ascii_lowercase();
        let valid = !slug.is_empty()
            && slug
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');
        valid.then_some(Self(slug))
    }

    /// Provider slug.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        assert_eq!(
            ApiConfig::new("http://localhost:8080/").endpoint("/v1/films"),
            "http://localhost:8080/v1/films"
        );
        assert_eq!(ApiConfig::new("   "), ApiConfig::default());
        assert_eq!(ApiConfig::from_override(None), ApiConfig::default());
        assert_eq!(
            ApiConfig::from_override(Some("http://api.local")).endpoint("/v1/genres"),
            "http://api.local/v1/genres"
        );
    }

    #[test]
    fn oauth_url_uses_provider_template() {
        let config = ApiConfig::new("https://api.example");
        let provider = OAuthProvider::parse("Google").expect("valid provider");
        assert_eq!(
            config.oauth_authorize_url(&provider),
            "https://api.example/v1/auth/google"
        );
    }

    #[test]
    fn provider_slugs_reject_path_characters() {
        assert!(OAuthProvider::parse("yandex").is_some());
        assert!(OAuthProvider::parse("git_hub-2").is_some());
        assert!(OAuthProvider::parse("").is_none());
        assert!(OAuthProvider::parse("../admin").is_none());
        assert!(OAuthProvider::parse("a b").is_none());
    }
}
