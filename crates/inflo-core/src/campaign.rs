//! Campaign view models.
//!
//! The client never owns campaign state; these types mirror what the backend
//! accepts and returns.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::influencer::Influencer;

/// Attributes collected by the create-campaign form.
///
/// Every field is sent, including empty ones, the way a submitted form would
/// send them. `budget` travels as a decimal string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CampaignDraft {
    pub campaign_name: String,
    pub goal: String,
    pub target_audience: String,
    pub brand_name: String,
    pub niche: String,
    pub brand_website: String,
    pub platform: String,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub budget: Option<Decimal>,
}

/// One entry of the campaign picker.
///
/// The backend forwards raw database rows, so the id may arrive as `id` or
/// `campaign_id`, as a string or a number, and the name as `campaign_name` or
/// `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CampaignSummary {
    pub id: String,
    pub name: String,
}

#[derive(Deserialize)]
struct RawCampaignRow {
    #[serde(default)]
    id: Option<serde_json::Value>,
    #[serde(default)]
    campaign_id: Option<serde_json::Value>,
    #[serde(default)]
    campaign_name: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

fn id_text(value: Option<&serde_json::Value>) -> Option<String> {
    match value? {
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl<'de> Deserialize<'de> for CampaignSummary {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawCampaignRow::deserialize(deserializer)?;
        let id = id_text(raw.id.as_ref())
            .or_else(|| id_text(raw.campaign_id.as_ref()))
            .unwrap_or_default();
        let name = raw
            .campaign_name
            .filter(|n| !n.is_empty())
            .or(raw.name.filter(|n| !n.is_empty()))
            .unwrap_or_else(|| id.clone());
        Ok(Self { id, name })
    }
}

/// Aggregate metrics plus ordered recommendations for one campaign.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CampaignAnalysis {
    #[serde(default, deserialize_with = "crate::lenient::count")]
    pub total_influencers: Option<u64>,
    #[serde(default, deserialize_with = "crate::lenient::float")]
    pub avg_brand_fit: Option<f64>,
    #[serde(default, deserialize_with = "crate::lenient::count")]
    pub total_reach: Option<u64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub recommendations: Vec<String>,
}

/// Previously stored influencers and analysis for a campaign.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CampaignData {
    #[serde(default)]
    pub influencers: Option<Vec<Influencer>>,
    #[serde(default)]
    pub analysis: Option<CampaignAnalysis>,
}

pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
