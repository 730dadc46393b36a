use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
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

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub env: Environment,
    pub log_level: String,
    pub session_path: PathBuf,
    pub user_agent: String,
    /// Bound applied to every request except the influencer search. `None`
    /// leaves those requests unbounded.
    pub request_timeout_secs: Option<u64>,
    pub search_timeout_secs: u64,
    pub navigate_delay_ms: u64,
    pub overlay_failsafe_secs: u64,
    pub toast_ttl_secs: u64,
}

impl AppConfig {
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    #[must_use]
    pub fn search_timeout(&self) -> Duration {
        Duration::from_secs(self.search_timeout_secs)
    }

    #[must_use]
    pub fn navigate_delay(&self) -> Duration {
        Duration::from_millis(self.navigate_delay_ms)
    }

    #[must_use]
    pub fn overlay_failsafe(&self) -> Duration {
        Duration::from_secs(self.overlay_failsafe_secs)
    }

    #[must_use]
    pub fn toast_ttl(&self) -> Duration {
        Duration::from_secs(self.toast_ttl_secs)
    }
}
