//! Display rules shared by every rendered view.

/// Shown when the backend omits `brand_fit_score`. Matches the backend's own
/// default so a re-render never changes the number.
pub const DEFAULT_BRAND_FIT_SCORE: f64 = 85.0;

/// Shown when the backend omits `avg_engagement_rate`.
pub const DEFAULT_ENGAGEMENT_RATE: f64 = 2.5;

/// Compacts a count: `1.5M` at or above a million, `2.5K` at or above a
/// thousand, the plain integer otherwise.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_compact_count(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

#[must_use]
pub fn format_engagement_rate(rate: f64) -> String {
    format!("{rate:.1}%")
}

/// Colour band for a brand fit score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrandFitBadge {
    Excellent,
    Strong,
    Fair,
    Weak,
}

impl BrandFitBadge {
    #[must_use]
    pub fn for_score(score: f64) -> Self {
        if score >= 90.0 {
            Self::Excellent
        } else if score >= 80.0 {
            Self::Strong
        } else if score >= 70.0 {
            Self::Fair
        } else {
            Self::Weak
        }
    }

    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            Self::Excellent => "#10b981",
            Self::Strong => "#f59e0b",
            Self::Fair => "#ef4444",
            Self::Weak => "#6b7280",
        }
    }

    /// 24-bit ANSI foreground escape for the badge colour.
    #[must_use]
    pub fn ansi(self) -> &'static str {
        match self {
            Self::Excellent => "\x1b[38;2;16;185;129m",
            Self::Strong => "\x1b[38;2;245;158;11m",
            Self::Fair => "\x1b[38;2;239;68;68m",
            Self::Weak => "\x1b[38;2;107;114;128m",
        }
    }
}

/// External profile link for a handle on a platform. Unknown platforms are
/// treated as Instagram.
#[must_use]
pub fn profile_url(username: &str, platform: &str) -> String {
    if platform.eq_ignore_ascii_case("youtube") {
        format!("https://youtube.com/channel/{username}")
    } else {
        format!("https://instagram.com/{username}")
    }
}

/// Formats a score without a trailing `.0` for whole numbers.
#[must_use]
pub fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{score:.0}")
    } else {
        format!("{score:.1}")
    }
}
