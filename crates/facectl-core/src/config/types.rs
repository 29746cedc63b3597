//! The `[faceplusplus]` settings table and its first-run defaults.

use serde::{Deserialize, Serialize};

/// Default base URL written into a fresh config file.
pub const DEFAULT_API_URL: &str = "https://apius.faceplusplus.com";

/// Placeholder credentials written into a fresh config file.
pub const PLACEHOLDER_API_KEY: &str = "yourapikey";
pub const PLACEHOLDER_API_SECRET: &str = "yourapisecret";

/// Default number of in-flight uploads for glob-based add-face.
pub const DEFAULT_CONCURRENT_REQUESTS: usize = 3;

/// Key names inside the `[faceplusplus]` table.
pub const KEY_API_KEY: &str = "api key";
pub const KEY_API_SECRET: &str = "api secret";
pub const KEY_API_URL: &str = "api url";
pub const KEY_CONCURRENT_REQUESTS: &str = "concurrent requests";

/// API credentials, endpoint and batch concurrency.
///
/// Every field is optional: a partially filled file is passed through as-is
/// and only fails later (auth errors at the HTTP layer, or a bad
/// concurrency value when a batch starts).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceppConfig {
    #[serde(rename = "api key", skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(rename = "api secret", skip_serializing_if = "Option::is_none")]
    pub api_secret: Option<String>,

    #[serde(rename = "api url", skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Kept as text; parsed by `concurrent_requests()` when a batch needs it.
    #[serde(
        rename = "concurrent requests",
        deserialize_with = "string_or_integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub concurrent_requests: Option<String>,
}

impl FaceppConfig {
    /// Values written by the first-run bootstrap.
    pub fn template() -> Self {
        Self {
            api_key: Some(PLACEHOLDER_API_KEY.to_string()),
            api_secret: Some(PLACEHOLDER_API_SECRET.to_string()),
            api_url: Some(DEFAULT_API_URL.to_string()),
            concurrent_requests: Some(DEFAULT_CONCURRENT_REQUESTS.to_string()),
        }
    }

    /// True when none of the four keys is present.
    pub fn is_blank(&self) -> bool {
        self.api_key.is_none()
            && self.api_secret.is_none()
            && self.api_url.is_none()
            && self.concurrent_requests.is_none()
    }

    pub fn api_key(&self) -> &str {
        self.api_key.as_deref().unwrap_or_default()
    }

    pub fn api_secret(&self) -> &str {
        self.api_secret.as_deref().unwrap_or_default()
    }

    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or_default()
    }
}

/// Accept `"3"` as well as a bare `3`.
fn string_or_integer<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Integer(i64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(s) => s,
        Raw::Integer(n) => n.to_string(),
    }))
}
