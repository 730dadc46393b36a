//! Domain types, display rules, configuration, and client-side state for the
//! `inflo` campaign workflow client.

pub mod app_config;
pub mod campaign;
pub mod config;
pub mod display;
pub mod influencer;
pub mod lenient;
pub mod selection;
pub mod session;
pub mod state;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use campaign::{CampaignAnalysis, CampaignData, CampaignDraft, CampaignSummary};
pub use config::{load_app_config, load_app_config_from_env};
pub use display::{
    format_compact_count, format_engagement_rate, format_score, profile_url, BrandFitBadge,
    DEFAULT_BRAND_FIT_SCORE, DEFAULT_ENGAGEMENT_RATE,
};
pub use influencer::{Influencer, InstagramProfile, SearchFilters};
pub use selection::Selection;
pub use session::{SessionRecord, SessionStore, SESSION_CAMPAIGN_KEY};
pub use state::AppState;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("influencer {0} is already selected")]
    AlreadySelected(String),

    #[error("session store I/O error at {path}: {source}")]
    SessionIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("session store at {path} is not valid JSON: {source}")]
    SessionFormat {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
