//! View models and their plain-text rendering.

use std::fmt::Write as _;

use inflo_client::ApiClient;
use inflo_core::{
    format_compact_count, format_engagement_rate, format_score, profile_url, BrandFitBadge,
    CampaignAnalysis, Influencer, InstagramProfile,
};

use super::CampaignPicker;

pub(crate) const INFLUENCER_PLACEHOLDER: &str =
    "https://via.placeholder.com/80x80/3b82f6/ffffff?text=IN";
pub(crate) const PROFILE_PLACEHOLDER: &str =
    "https://via.placeholder.com/80x80/3b82f6/ffffff?text=IG";

const ANSI_RESET: &str = "\x1b[0m";

/// Avatars are always loaded through the backend proxy.
fn avatar_src(client: &ApiClient, avatar: Option<&str>, placeholder: &str) -> String {
    match avatar.filter(|a| !a.is_empty()) {
        Some(url) => client.proxy_image_url(url).to_string(),
        None => placeholder.to_string(),
    }
}

fn count_label(n: Option<u64>) -> String {
    format_compact_count(n.unwrap_or(0))
}

/// One influencer, with every display default already applied.
#[derive(Debug, Clone, PartialEq)]
pub struct InfluencerCard {
    pub id: String,
    pub name: String,
    pub handle: String,
    pub platform: String,
    pub avatar_src: String,
    pub followers: String,
    pub following: String,
    pub posts: String,
    pub engagement: String,
    pub score: f64,
    pub badge: BrandFitBadge,
    pub summary: Option<String>,
    pub profile_url: String,
    pub selected: bool,
}

impl InfluencerCard {
    pub fn build(influencer: &Influencer, client: &ApiClient, selected: bool) -> Self {
        let score = influencer.brand_fit();
        let handle = influencer.handle().to_string();
        let platform = influencer.platform_label().to_string();
        Self {
            id: influencer.id.clone(),
            name: influencer.display_name().to_string(),
            profile_url: profile_url(&handle, &platform),
            handle,
            platform,
            avatar_src: avatar_src(
                client,
                influencer.avatar.as_deref(),
                INFLUENCER_PLACEHOLDER,
            ),
            followers: count_label(influencer.followers),
            following: count_label(influencer.following),
            posts: count_label(influencer.posts),
            engagement: format_engagement_rate(influencer.engagement_rate()),
            score,
            badge: BrandFitBadge::for_score(score),
            summary: influencer.summary_text().map(str::to_string),
            selected,
        }
    }
}

/// The profile lookup result card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileCard {
    pub name: String,
    pub handle: String,
    pub avatar_src: String,
    pub followers: String,
    pub following: String,
    pub posts: String,
    pub biography: String,
    pub link: String,
}

impl ProfileCard {
    /// `requested` is the sanitized username the user asked for; it stands in
    /// for a missing `username`. A missing `name` stays blank.
    pub fn build(profile: &InstagramProfile, requested: &str, client: &ApiClient) -> Self {
        let handle = profile
            .username
            .clone()
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| requested.to_string());
        Self {
            name: profile.name.clone().unwrap_or_default(),
            avatar_src: avatar_src(
                client,
                profile.profile_pic_url.as_deref(),
                PROFILE_PLACEHOLDER,
            ),
            followers: count_label(profile.followers),
            following: count_label(profile.following),
            posts: count_label(profile.posts),
            biography: profile.biography.clone().unwrap_or_default(),
            link: profile_url(&handle, "Instagram"),
            handle,
        }
    }
}

pub(crate) fn influencer_grid(cards: &[InfluencerCard], color: bool) -> String {
    if cards.is_empty() {
        return "No influencers found.\n".to_string();
    }
    let mut out = String::new();
    for card in cards {
        out.push_str(&influencer_card(card, color));
        out.push('\n');
    }
    out
}

pub(crate) fn influencer_card(card: &InfluencerCard, color: bool) -> String {
    let mut out = String::new();
    let marker = if card.selected { "[x]" } else { "[ ]" };
    let score = if color {
        format!(
            "{}{}{ANSI_RESET}",
            card.badge.ansi(),
            format_score(card.score)
        )
    } else {
        format_score(card.score)
    };
    let _ = writeln!(
        out,
        "{marker} {} (@{})  [{}]  fit {score}",
        card.name, card.handle, card.platform
    );
    let _ = writeln!(
        out,
        "    followers {}  following {}  posts {}  engagement {}",
        card.followers, card.following, card.posts, card.engagement
    );
    if let Some(summary) = &card.summary {
        let _ = writeln!(out, "    {summary}");
    }
    let _ = writeln!(out, "    id {}  {}", card.id, card.profile_url);
    let _ = writeln!(out, "    avatar {}", card.avatar_src);
    out
}

pub(crate) fn analysis_report(analysis: &CampaignAnalysis) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Campaign Analysis");
    let _ = writeln!(
        out,
        "  Total Influencers  {}",
        analysis.total_influencers.unwrap_or(0)
    );
    let _ = writeln!(
        out,
        "  Avg Brand Fit      {}%",
        format_score(analysis.avg_brand_fit.unwrap_or(0.0))
    );
    let _ = writeln!(
        out,
        "  Total Reach        {}",
        analysis.total_reach.unwrap_or(0)
    );
    let _ = writeln!(out, "  Recommendations");
    if analysis.recommendations.is_empty() {
        let _ = writeln!(out, "    No recommendations available");
    }
    for rec in &analysis.recommendations {
        let _ = writeln!(out, "    - {rec}");
    }
    out
}

pub(crate) fn profile_report(card: &ProfileCard) -> String {
    let mut out = String::new();
    if card.name.is_empty() {
        let _ = writeln!(out, "@{}", card.handle);
    } else {
        let _ = writeln!(out, "{} (@{})", card.name, card.handle);
    }
    let _ = writeln!(
        out,
        "  followers {}  following {}  posts {}",
        card.followers, card.following, card.posts
    );
    if !card.biography.is_empty() {
        let _ = writeln!(out, "  {}", card.biography);
    }
    let _ = writeln!(out, "  {}", card.link);
    let _ = writeln!(out, "  avatar {}", card.avatar_src);
    out
}

pub(crate) fn campaign_picker(picker: &CampaignPicker) -> String {
    match picker {
        CampaignPicker::Loading => "Loading campaigns...\n".to_string(),
        CampaignPicker::Empty => "No campaigns found\n".to_string(),
        CampaignPicker::Failed => "Error loading campaigns\n".to_string(),
        CampaignPicker::Ready {
            campaigns,
            selected,
        } => {
            let mut out = String::new();
            for campaign in campaigns {
                let marker = if selected.as_deref() == Some(campaign.id.as_str()) {
                    '*'
                } else {
                    ' '
                };
                let _ = writeln!(out, "{marker} {:<24} {}", campaign.id, campaign.name);
            }
            out
        }
    }
}
