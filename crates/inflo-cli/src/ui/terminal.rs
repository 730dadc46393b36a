//! Terminal implementations of the presentation ports.

use std::io::IsTerminal;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use inflo_core::CampaignAnalysis;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use super::render;
use super::{
    CampaignPicker, InfluencerCard, LoadingKind, NoticeKind, Presenter, ProfileCard,
    TemplatePrompt, ToastStack, View,
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Default)]
struct Overlay {
    message: Option<String>,
    /// Bumped on every show; a fail-safe timer only clears its own showing.
    generation: u64,
}

/// Writes everything to the terminal. Results go to stdout, progress and
/// notifications to stderr.
pub struct TerminalPresenter {
    color: bool,
    failsafe: Duration,
    overlay: Arc<Mutex<Overlay>>,
    toasts: Mutex<ToastStack>,
    pending_view: Mutex<Option<View>>,
}

impl TerminalPresenter {
    pub fn new(failsafe: Duration, toast_ttl: Duration) -> Self {
        Self {
            color: std::io::stdout().is_terminal(),
            failsafe,
            overlay: Arc::new(Mutex::new(Overlay::default())),
            toasts: Mutex::new(ToastStack::new(toast_ttl)),
            pending_view: Mutex::new(None),
        }
    }

    /// The view requested by the last `navigate`, if the shell has not
    /// entered it yet.
    pub fn take_pending_view(&self) -> Option<View> {
        lock(&self.pending_view).take()
    }

    /// Notifications that have not yet expired, oldest first.
    pub fn active_toasts(&self) -> Vec<(NoticeKind, String)> {
        lock(&self.toasts)
            .active(Instant::now())
            .iter()
            .map(|t| (t.kind, t.message.clone()))
            .collect()
    }

    fn arm_failsafe(&self, generation: u64) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            return;
        };
        let overlay = Arc::clone(&self.overlay);
        let after = self.failsafe;
        handle.spawn(async move {
            tokio::time::sleep(after).await;
            let mut overlay = lock(&overlay);
            if overlay.generation == generation && overlay.message.take().is_some() {
                tracing::warn!(
                    after_secs = after.as_secs(),
                    "loading indicator cleared by fail-safe timer"
                );
            }
        });
    }
}

impl Presenter for TerminalPresenter {
    fn show_loading(&self, message: &str, kind: LoadingKind) {
        let generation = {
            let mut overlay = lock(&self.overlay);
            overlay.generation += 1;
            overlay.message = Some(message.to_string());
            overlay.generation
        };
        match kind {
            LoadingKind::Standard => eprintln!("... {message}"),
            LoadingKind::LongRunning => eprintln!("... {message} (please keep this open)"),
        }
        self.arm_failsafe(generation);
    }

    fn hide_loading(&self) {
        lock(&self.overlay).message = None;
    }

    fn notify(&self, kind: NoticeKind, message: &str) {
        let icon = match kind {
            NoticeKind::Success => "ok",
            NoticeKind::Error => "error",
            NoticeKind::Info => "info",
        };
        eprintln!("[{icon}] {message}");
        lock(&self.toasts).push(kind, message, Instant::now());
    }

    fn status(&self, message: &str) {
        if !message.is_empty() {
            eprintln!("{message}");
        }
    }

    fn show_influencers(&self, cards: &[InfluencerCard]) {
        print!("{}", render::influencer_grid(cards, self.color));
    }

    fn show_analysis(&self, analysis: &CampaignAnalysis) {
        print!("{}", render::analysis_report(analysis));
    }

    fn show_profile(&self, card: &ProfileCard) {
        print!("{}", render::profile_report(card));
    }

    fn show_campaigns(&self, picker: &CampaignPicker) {
        // The loading state is transient; only the outcome is printed.
        if *picker != CampaignPicker::Loading {
            print!("{}", render::campaign_picker(picker));
        }
    }

    fn navigate(&self, view: View) {
        tracing::debug!(%view, "navigate");
        *lock(&self.pending_view) = Some(view);
    }

    fn open_url(&self, url: &str) {
        println!("{url}");
    }
}

/// Shared line reader over stdin, so the shell and the template prompt never
/// buffer input away from each other.
pub type SharedLines = Arc<tokio::sync::Mutex<Lines<BufReader<Stdin>>>>;

pub fn stdin_lines() -> SharedLines {
    Arc::new(tokio::sync::Mutex::new(
        BufReader::new(tokio::io::stdin()).lines(),
    ))
}

/// Prompts on the terminal. An empty line accepts the default template, end
/// of input cancels, and a literal `\n` in the answer becomes a line break.
pub struct StdinPrompt {
    lines: SharedLines,
}

impl StdinPrompt {
    pub fn new(lines: SharedLines) -> Self {
        Self { lines }
    }
}

#[async_trait]
impl TemplatePrompt for StdinPrompt {
    async fn request_template(&self, default_template: &str) -> Option<String> {
        eprintln!("Enter email template (blank line for default, Ctrl-D to cancel).");
        eprintln!("Default:");
        for line in default_template.lines() {
            eprintln!("  {line}");
        }
        eprint!("template> ");
        let answer = match self.lines.lock().await.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read template from stdin");
                return None;
            }
        };
        if answer.trim().is_empty() {
            Some(default_template.to_string())
        } else {
            Some(answer.replace("\\n", "\n"))
        }
    }
}

/// Answers with a template fixed up front, e.g. from `--template`.
pub struct FixedPrompt(pub Option<String>);

#[async_trait]
impl TemplatePrompt for FixedPrompt {
    async fn request_template(&self, _default_template: &str) -> Option<String> {
        self.0.clone()
    }
}
