//! Request bodies and response payloads for the campaign API.
//!
//! Every response is a JSON object carrying a `success` flag and an optional
//! `message`; the client checks the flag before decoding the remaining fields
//! into the types below.

use inflo_core::{
    CampaignAnalysis, CampaignData, CampaignSummary, Influencer, InstagramProfile, SearchFilters,
};
use serde::{Deserialize, Deserializer, Serialize};

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number campaign_id, got {other}"
        ))),
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub(crate) struct SearchRequest<'a> {
    pub campaign_id: &'a str,
    pub filters: &'a SearchFilters,
}

#[derive(Debug, Serialize)]
pub(crate) struct InfluencerIdsRequest<'a> {
    pub campaign_id: &'a str,
    pub influencer_ids: &'a [String],
}

#[derive(Debug, Serialize)]
pub(crate) struct EmailRequest<'a> {
    pub campaign_id: &'a str,
    pub influencer_ids: &'a [String],
    pub email_template: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct CampaignIdRequest<'a> {
    pub campaign_id: &'a str,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// `create_campaign` result.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedCampaign {
    #[serde(deserialize_with = "id_as_string")]
    pub campaign_id: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// `fetch_influencers` result.
#[derive(Debug, Clone, Deserialize)]
pub struct InfluencerSearch {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub influencers: Vec<Influencer>,
    #[serde(default, deserialize_with = "inflo_core::lenient::count")]
    pub count: Option<u64>,
    #[serde(default)]
    pub message: Option<String>,
}

impl InfluencerSearch {
    /// Server-reported count, falling back to the number of returned rows.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
            .and_then(|c| usize::try_from(c).ok())
            .unwrap_or(self.influencers.len())
    }
}

/// Acknowledgement for `add_influencers` and `send_emails`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActionAck {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AnalysisResponse {
    #[serde(default)]
    pub analysis: CampaignAnalysis,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CampaignListResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub campaigns: Vec<CampaignSummary>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CampaignDataResponse {
    #[serde(default)]
    pub campaign_data: CampaignData,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProfileResponse {
    #[serde(default)]
    pub profile: InstagramProfile,
}

/// Image bytes relayed by the backend's proxy endpoint.
#[derive(Debug, Clone)]
pub struct ProxiedImage {
    pub content_type: String,
    pub bytes: Vec<u8>,
}
