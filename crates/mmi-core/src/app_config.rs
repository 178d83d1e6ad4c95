use std::net::SocketAddr;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// How articles whose sentiment is not one of the five known labels affect
/// the mood index denominator.
///
/// Non-scoring articles always contribute `0` to the sum. `Exclude` drops them
/// from the article count as well; `CountAsNeutral` keeps them in the count,
/// which pulls the index toward `0.5`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownLabelPolicy {
    #[default]
    Exclude,
    CountAsNeutral,
}

impl std::fmt::Display for UnknownLabelPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnknownLabelPolicy::Exclude => write!(f, "exclude"),
            UnknownLabelPolicy::CountAsNeutral => write!(f, "neutral"),
        }
    }
}

/// Settings needed to read the local symbol directory without touching any
/// remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryConfig {
    pub log_level: String,
    pub symbols_path: PathBuf,
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub symbols_path: PathBuf,
    pub flowise_api_key: String,
    pub sentiment_url: String,
    pub insights_url: String,
    pub quote_base_url: String,
    pub quote_cookie_url: String,
    pub feed_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub unknown_label_policy: UnknownLabelPolicy,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("symbols_path", &self.symbols_path)
            .field("flowise_api_key", &"[redacted]")
            .field("sentiment_url", &self.sentiment_url)
            .field("insights_url", &self.insights_url)
            .field("quote_base_url", &self.quote_base_url)
            .field("quote_cookie_url", &self.quote_cookie_url)
            .field("feed_url", &self.feed_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("unknown_label_policy", &self.unknown_label_policy)
            .finish()
    }
}
