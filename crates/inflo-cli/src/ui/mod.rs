//! Presentation ports used by the workflow handlers.
//!
//! Handlers never print. They talk to a [`Presenter`] for output and a
//! [`TemplatePrompt`] for the one interactive question they ask, so the same
//! handlers drive the one-shot commands, the shell, and the tests.

pub(crate) mod render;
pub(crate) mod terminal;

use std::time::{Duration, Instant};

use async_trait::async_trait;
use inflo_core::{CampaignAnalysis, CampaignSummary};

pub(crate) use render::{InfluencerCard, ProfileCard};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingKind {
    Standard,
    /// Long-running backend work; the indicator explains the wait.
    LongRunning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Campaign,
    Results,
    Analysis,
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            View::Campaign => write!(f, "campaign"),
            View::Results => write!(f, "results"),
            View::Analysis => write!(f, "analysis"),
        }
    }
}

/// State of the campaign picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CampaignPicker {
    Loading,
    Empty,
    Failed,
    Ready {
        campaigns: Vec<CampaignSummary>,
        selected: Option<String>,
    },
}

pub trait Presenter: Send + Sync {
    fn show_loading(&self, message: &str, kind: LoadingKind);
    fn hide_loading(&self);
    fn notify(&self, kind: NoticeKind, message: &str);
    /// Inline status line, used by the profile lookup.
    fn status(&self, message: &str);
    fn show_influencers(&self, cards: &[InfluencerCard]);
    fn show_analysis(&self, analysis: &CampaignAnalysis);
    fn show_profile(&self, card: &ProfileCard);
    fn show_campaigns(&self, picker: &CampaignPicker);
    fn navigate(&self, view: View);
    fn open_url(&self, url: &str);

    fn success(&self, message: &str) {
        self.notify(NoticeKind::Success, message);
    }

    fn error(&self, message: &str) {
        self.notify(NoticeKind::Error, message);
    }
}

/// Asks the user for an email template.
///
/// Resolves to `None` when the user cancels.
#[async_trait]
pub trait TemplatePrompt: Send + Sync {
    async fn request_template(&self, default_template: &str) -> Option<String>;
}

/// Shows the loading overlay for as long as it is alive.
///
/// Dropping the guard hides the overlay, so every exit path of a handler,
/// including `?` and panics, clears it.
pub struct LoadingGuard<'a> {
    presenter: &'a dyn Presenter,
}

impl<'a> LoadingGuard<'a> {
    pub fn show(presenter: &'a dyn Presenter, message: &str, kind: LoadingKind) -> Self {
        presenter.show_loading(message, kind);
        Self { presenter }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.presenter.hide_loading();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: NoticeKind,
    pub message: String,
    pub shown_at: Instant,
}

/// Notifications in insertion order, each expiring `ttl` after it was shown.
/// Identical messages are kept as separate entries.
#[derive(Debug, Clone)]
pub struct ToastStack {
    ttl: Duration,
    toasts: Vec<Toast>,
}

impl ToastStack {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            toasts: Vec::new(),
        }
    }

    pub fn push(&mut self, kind: NoticeKind, message: &str, now: Instant) {
        self.toasts.push(Toast {
            kind,
            message: message.to_string(),
            shown_at: now,
        });
    }

    /// Drops expired toasts and returns the rest, oldest first.
    pub fn active(&mut self, now: Instant) -> &[Toast] {
        let ttl = self.ttl;
        self.toasts
            .retain(|t| now.saturating_duration_since(t.shown_at) < ttl);
        &self.toasts
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[test]
    fn toasts_stack_without_dedup_and_expire() {
        let start = Instant::now();
        let mut stack = ToastStack::new(Duration::from_secs(5));
        stack.push(NoticeKind::Success, "Saved", start);
        stack.push(NoticeKind::Success, "Saved", start + Duration::from_secs(3));

        let active = stack.active(start + Duration::from_secs(4));
        assert_eq!(active.len(), 2);
        assert_eq!(active[0].shown_at, start);

        let active = stack.active(start + Duration::from_secs(5));
        assert_eq!(active.len(), 1);

        assert!(stack.active(start + Duration::from_secs(9)).is_empty());
    }

    #[derive(Default)]
    struct CountingPresenter {
        calls: Mutex<Vec<&'static str>>,
    }

    impl Presenter for CountingPresenter {
        fn show_loading(&self, _: &str, _: LoadingKind) {
            self.calls.lock().unwrap().push("show");
        }
        fn hide_loading(&self) {
            self.calls.lock().unwrap().push("hide");
        }
        fn notify(&self, _: NoticeKind, _: &str) {}
        fn status(&self, _: &str) {}
        fn show_influencers(&self, _: &[InfluencerCard]) {}
        fn show_analysis(&self, _: &CampaignAnalysis) {}
        fn show_profile(&self, _: &ProfileCard) {}
        fn show_campaigns(&self, _: &CampaignPicker) {}
        fn navigate(&self, _: View) {}
        fn open_url(&self, _: &str) {}
    }

    fn work(presenter: &dyn Presenter, fail: bool) -> Result<(), &'static str> {
        let _overlay = LoadingGuard::show(presenter, "Working...", LoadingKind::Standard);
        if fail {
            return Err("boom");
        }
        Ok(())
    }

    #[test]
    fn guard_hides_overlay_on_early_return() {
        let presenter = CountingPresenter::default();
        assert!(work(&presenter, true).is_err());
        assert!(work(&presenter, false).is_ok());
        assert_eq!(
            *presenter.calls.lock().unwrap(),
            ["show", "hide", "show", "hide"]
        );
    }
}
