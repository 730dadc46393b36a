use serde::{Deserialize, Serialize};

/// An influencer as returned by search or stored campaign data.
///
/// Only `id` is reliably present; enrichment on the backend may fail and
/// leave counts `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Influencer {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub channel_id: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::count")]
    pub followers: Option<u64>,
    #[serde(default, deserialize_with = "crate::lenient::count")]
    pub following: Option<u64>,
    #[serde(default, deserialize_with = "crate::lenient::count")]
    pub posts: Option<u64>,
    #[serde(default, deserialize_with = "crate::lenient::float")]
    pub avg_engagement_rate: Option<f64>,
    #[serde(default, deserialize_with = "crate::lenient::float")]
    pub brand_fit_score: Option<f64>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub biography: Option<String>,
    #[serde(default)]
    pub verified: Option<bool>,
    #[serde(default)]
    pub profile_url: Option<String>,
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}

impl Influencer {
    /// Display name: `name`, else `username`, else empty.
    #[must_use]
    pub fn display_name(&self) -> &str {
        non_empty(self.name.as_ref())
            .or_else(|| non_empty(self.username.as_ref()))
            .unwrap_or("")
    }

    /// Handle without the `@`: `username`, else `channel_id`, else empty.
    #[must_use]
    pub fn handle(&self) -> &str {
        non_empty(self.username.as_ref())
            .or_else(|| non_empty(self.channel_id.as_ref()))
            .unwrap_or("")
    }

    #[must_use]
    pub fn platform_label(&self) -> &str {
        non_empty(self.platform.as_ref()).unwrap_or("Instagram")
    }

    /// Brand fit score, or [`crate::DEFAULT_BRAND_FIT_SCORE`] when the backend
    /// omitted it or sent something unreadable.
    #[must_use]
    pub fn brand_fit(&self) -> f64 {
        self.brand_fit_score
            .unwrap_or(crate::display::DEFAULT_BRAND_FIT_SCORE)
    }

    #[must_use]
    pub fn engagement_rate(&self) -> f64 {
        self.avg_engagement_rate
            .unwrap_or(crate::display::DEFAULT_ENGAGEMENT_RATE)
    }

    #[must_use]
    pub fn summary_text(&self) -> Option<&str> {
        non_empty(self.summary.as_ref())
    }
}

/// Public Instagram profile fields from the lookup endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstagramProfile {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub biography: Option<String>,
    #[serde(default)]
    pub profile_pic_url: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::count")]
    pub followers: Option<u64>,
    #[serde(default, deserialize_with = "crate::lenient::count")]
    pub following: Option<u64>,
    #[serde(default, deserialize_with = "crate::lenient::count")]
    pub posts: Option<u64>,
    #[serde(default)]
    pub is_private: Option<bool>,
    #[serde(default)]
    pub is_verified: Option<bool>,
    /// Which backend strategy produced the record, e.g. `web_profile_info`.
    #[serde(default)]
    pub source: Option<String>,
}

/// Optional search criteria. Unset and blank values are omitted from the
/// request body entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub niche: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub followers_min: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub followers_max: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience_age_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience_gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience_location: Option<String>,
}

impl SearchFilters {
    /// Turns blank text filters into `None`, matching how an empty form field
    /// is dropped.
    #[must_use]
    pub fn normalized(self) -> Self {
        let clean = |v: Option<String>| {
            v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
        };
        Self {
            platform: clean(self.platform),
            niche: clean(self.niche),
            followers_min: self.followers_min,
            followers_max: self.followers_max,
            audience_age_range: clean(self.audience_age_range),
            audience_gender: clean(self.audience_gender),
            audience_location: clean(self.audience_location),
        }
    }
}
