use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Base URL of the recommendation server (the one exposing `POST /recommend`)
    #[serde(default = "default_recommender_url")]
    pub recommender_url: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Timeout for a single upstream recommendation call, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Result count used when the submitted `top-k` is missing or unparseable
    #[serde(default = "default_top_k")]
    pub default_top_k: u32,

    /// Language code used when the submitted `language` is blank
    #[serde(default = "default_language")]
    pub default_language: String,

    /// Most browser sessions whose results are kept in memory at once
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

fn default_recommender_url() -> String {
    "http://127.0.0.1:4708".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_top_k() -> u32 {
    3
}

fn default_language() -> String {
    "en".to_string()
}

fn default_max_sessions() -> usize {
    1024
}

impl Default for Config {
    fn default() -> Self {
        Self {
            recommender_url: default_recommender_url(),
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout_secs(),
            default_top_k: default_top_k(),
            default_language: default_language(),
            max_sessions: default_max_sessions(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Socket address string the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_env() {
        let vars: Vec<(String, String)> = Vec::new();
        let config: Config = envy::from_iter(vars).unwrap();
        assert_eq!(config.recommender_url, "http://127.0.0.1:4708");
        assert_eq!(config.port, 3000);
        assert_eq!(config.default_top_k, 3);
        assert_eq!(config.default_language, "en");
        assert_eq!(config.max_sessions, 1024);
    }

    #[test]
    fn test_overrides() {
        let vars = vec![
            ("RECOMMENDER_URL".to_string(), "http://reco:8000".to_string()),
            ("PORT".to_string(), "8080".to_string()),
            ("DEFAULT_TOP_K".to_string(), "5".to_string()),
            ("MAX_SESSIONS".to_string(), "16".to_string()),
        ];
        let config: Config = envy::from_iter(vars).unwrap();
        assert_eq!(config.recommender_url, "http://reco:8000");
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert_eq!(config.default_top_k, 5);
        assert_eq!(config.max_sessions, 16);
    }
}
