use anyhow::{Context, Result};
use clap::Parser;
use pixabay_sdk::{PixabayClient, DEFAULT_BASE_URL};
use std::time::Duration;

/// Process settings, read from flags or the environment.
#[derive(Parser, Clone)]
#[command(name = "pixabay-mcp", version)]
#[command(about = "MCP server exposing Pixabay image search and download over stdio", long_about = None)]
pub struct Settings {
    /// Pixabay API key
    #[arg(long, env = "PIXABAY_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Pixabay search endpoint
    #[arg(long, env = "PIXABAY_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Upstream request timeout in seconds (no timeout when unset)
    #[arg(long, env = "PIXABAY_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, env = "PIXABAY_MCP_LOG_JSON")]
    pub log_json: bool,
}

impl Settings {
    /// Build the upstream client these settings describe.
    pub fn client(&self) -> Result<PixabayClient> {
        let mut builder = PixabayClient::builder()
            .api_key(self.api_key.clone())
            .base_url(self.base_url.clone())
            .user_agent(concat!("pixabay-mcp/", env!("CARGO_PKG_VERSION")));

        if let Some(secs) = self.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        builder.build().context("Invalid Pixabay client configuration")
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("log_json", &self.log_json)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let settings = Settings::try_parse_from([
            "pixabay-mcp",
            "--api-key",
            "abc",
            "--timeout-secs",
            "15",
        ])
        .unwrap();

        assert_eq!(settings.api_key, "abc");
        assert_eq!(settings.timeout_secs, Some(15));
        assert!(!settings.log_json);

        let client = settings.client().unwrap();
        assert_eq!(client.base_url().as_str(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_blank_api_key_fails() {
        let settings =
            Settings::try_parse_from(["pixabay-mcp", "--api-key", " ", "--base-url", "http://localhost/api/"])
                .unwrap();
        assert!(settings.client().is_err());
    }

    #[test]
    fn test_debug_hides_api_key() {
        let settings = Settings::try_parse_from(["pixabay-mcp", "--api-key", "secret-value"]).unwrap();
        assert!(!format!("{:?}", settings).contains("secret-value"));
    }
}
