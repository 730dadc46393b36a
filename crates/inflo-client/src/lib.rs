pub mod client;
pub mod error;
pub mod types;

pub use client::{ApiClient, DEFAULT_SEARCH_TIMEOUT};
pub use error::ClientError;
pub use types::{ActionAck, CreatedCampaign, InfluencerSearch, ProxiedImage};
