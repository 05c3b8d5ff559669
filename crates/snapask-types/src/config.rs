// crates/snapask-types/src/config.rs
// Client configuration

/// Build-time override for the backend origin
const API_BASE_OVERRIDE: Option<&str> = option_env!("SNAPASK_API_BASE");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Origin of the backend, without a trailing slash
    pub api_base: String,
    /// Streaming flag used until the user picks one
    pub default_streaming: bool,
    /// How long transient notices stay on screen
    pub toast_ms: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            default_streaming: true,
            toast_ms: 4000,
        }
    }
}

impl ClientConfig {
    /// Same-origin backend unless SNAPASK_API_BASE was set at build time
    pub fn from_location(protocol: &str, host: &str) -> Self {
        let api_base = match API_BASE_OVERRIDE.map(str::trim).filter(|b| !b.is_empty()) {
            Some(base) => base.to_string(),
            None => format!("{}//{}", protocol, host),
        };
        Self::with_base(api_base)
    }

    pub fn with_base(api_base: impl Into<String>) -> Self {
        let api_base = api_base.into().trim_end_matches('/').to_string();
        Self {
            api_base,
            ..Self::default()
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_single_slash() {
        let config = ClientConfig::with_base("http://127.0.0.1:5000/");
        assert_eq!(config.endpoint("/chat_with_file"), "http://127.0.0.1:5000/chat_with_file");
        assert_eq!(config.endpoint("api/available_models"), "http://127.0.0.1:5000/api/available_models");
    }

    #[test]
    fn test_from_location() {
        let config = ClientConfig::from_location("https:", "chat.example.com");
        match API_BASE_OVERRIDE {
            Some(base) if !base.trim().is_empty() => {
                assert_eq!(config.api_base, base.trim().trim_end_matches('/'))
            }
            _ => assert_eq!(config.api_base, "https://chat.example.com"),
        }
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert!(config.default_streaming);
        assert_eq!(config.toast_ms, 4000);
    }
}
