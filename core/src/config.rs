//! Connection settings consumed by `ApiClient`.
//!
//! Where the values come from (file, environment, defaults) is up to the
//! caller. The client copies them once at construction and never re-reads.

/// Source of the service base URL and bearer token.
pub trait ConfigProvider {
    fn base_url(&self) -> &str;
    fn token(&self) -> &str;
}

/// Fixed base URL and token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub token: String,
}

impl ClientConfig {
    pub fn new(base_url: &str, token: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            token: token.to_string(),
        }
    }
}

impl ConfigProvider for ClientConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn token(&self) -> &str {
        &self.token
    }
}
