//! Workflow handlers: one per user action.
//!
//! Each handler checks its preconditions before any request goes out, holds
//! a [`LoadingGuard`] for exactly the duration of the request, and reports
//! every outcome through the presenter. The returned error is for the caller
//! to pick an exit code; it has already been shown to the user.

mod analysis;
mod campaign;
mod outreach;
mod profile;
mod search;

use std::time::Duration;

use inflo_client::{ApiClient, ClientError};
use inflo_core::{AppState, SessionStore};
use thiserror::Error;

use crate::ui::{InfluencerCard, LoadingGuard, LoadingKind, Presenter, TemplatePrompt};

pub(crate) use analysis::{analyze_campaign, enter_analysis_view};
pub(crate) use campaign::{create_campaign, enter_results_view, load_campaign_picker};
pub(crate) use outreach::{
    add_influencers, contact_influencer, open_profile, select_influencer, send_emails,
    toggle_influencer,
};
pub(crate) use profile::{download_avatar, lookup_instagram_profile};
pub(crate) use search::search_influencers;

pub(crate) const TIMEOUT_MESSAGE: &str = "The request timed out. Please try again.";

/// Everything a handler needs besides the mutable [`AppState`].
#[derive(Clone, Copy)]
pub struct Context<'a> {
    pub client: &'a ApiClient,
    pub presenter: &'a dyn Presenter,
    pub prompt: &'a dyn TemplatePrompt,
    pub session: &'a SessionStore,
    /// Pause between a successful create and the switch to the results view.
    pub navigate_delay: Duration,
}

impl Context<'_> {
    fn report(&self, err: WorkflowError) -> WorkflowError {
        self.presenter.error(&err.to_string());
        err
    }

    fn precondition(&self, unmet: Precondition) -> WorkflowError {
        self.report(WorkflowError::Precondition(unmet))
    }

    fn failed(&self, operation: Operation, err: ClientError) -> WorkflowError {
        self.report(WorkflowError::from_client(operation, err))
    }

    fn loading(&self, message: &str, kind: LoadingKind) -> LoadingGuard<'_> {
        LoadingGuard::show(self.presenter, message, kind)
    }

    pub(crate) fn render_influencers(&self, state: &AppState) {
        let cards: Vec<InfluencerCard> = state
            .influencers
            .iter()
            .map(|i| {
                InfluencerCard::build(i, self.client, state.selection.contains(&i.id))
            })
            .collect();
        self.presenter.show_influencers(&cards);
    }

    /// Campaign id held in memory, else the one in the session store. A
    /// session value is adopted into `state`.
    fn current_campaign(&self, state: &mut AppState) -> Option<String> {
        if let Some(id) = state.campaign_id.as_ref().filter(|id| !id.is_empty()) {
            return Some(id.clone());
        }
        let stored = self.session.campaign_id()?;
        state.campaign_id = Some(stored.clone());
        Some(stored)
    }
}

/// A user action that talks to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CreateCampaign,
    SearchInfluencers,
    AddInfluencers,
    SendEmails,
    AnalyzeCampaign,
    ListCampaigns,
    LookupProfile,
    DownloadAvatar,
}

impl Operation {
    /// Shown when the backend rejects the request without a message.
    fn rejected_fallback(self) -> &'static str {
        match self {
            Self::CreateCampaign => "Failed to create campaign",
            Self::SearchInfluencers => "Failed to fetch influencers",
            Self::AddInfluencers => "Failed to add influencers",
            Self::SendEmails => "Failed to send emails",
            Self::AnalyzeCampaign => "Failed to analyze campaign",
            Self::ListCampaigns => "Could not load campaigns",
            Self::LookupProfile => "Failed to fetch profile",
            Self::DownloadAvatar => "Failed to download image",
        }
    }

    /// Shown when the request never produced a usable response.
    fn transport_fallback(self) -> &'static str {
        match self {
            Self::CreateCampaign => "An error occurred while creating the campaign",
            Self::SearchInfluencers => "An error occurred while searching for influencers",
            Self::AddInfluencers => "An error occurred while adding influencers",
            Self::SendEmails => "An error occurred while sending emails",
            Self::AnalyzeCampaign => "An error occurred while analyzing the campaign",
            Self::ListCampaigns => "Could not load campaigns",
            Self::LookupProfile => "Failed to fetch profile",
            Self::DownloadAvatar => "Failed to download image",
        }
    }
}

/// A local check that failed before any request was made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Precondition {
    #[error("Please select or create a campaign first")]
    NoCampaign,
    #[error("Please select a campaign")]
    CampaignNotChosen,
    #[error("Please create a campaign first")]
    NoCampaignToAnalyze,
    #[error("Please select at least one influencer")]
    NothingToAdd,
    #[error("Please select influencers first")]
    NothingToEmail,
    #[error("Influencer already selected")]
    AlreadySelected,
    #[error("No influencer with id {0} in the current results")]
    UnknownInfluencer(String),
}

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Precondition(#[from] Precondition),

    /// The backend answered with `success: false`.
    #[error("{message}")]
    Rejected {
        operation: Operation,
        message: String,
    },

    /// Network failure, timeout, or an unreadable response.
    #[error("{message}")]
    Transport {
        operation: Operation,
        message: String,
        #[source]
        source: ClientError,
    },

    #[error("failed to write {path}: {source}")]
    Output {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl WorkflowError {
    /// The backend operation that failed, if a request was made.
    pub(crate) fn operation(&self) -> Option<Operation> {
        match self {
            Self::Rejected { operation, .. } | Self::Transport { operation, .. } => {
                Some(*operation)
            }
            Self::Precondition(_) | Self::Output { .. } => None,
        }
    }

    pub(crate) fn from_client(operation: Operation, err: ClientError) -> Self {
        if matches!(err, ClientError::Api { .. }) {
            let message = err
                .server_message()
                .filter(|_| operation != Operation::ListCampaigns)
                .unwrap_or(operation.rejected_fallback())
                .to_string();
            return Self::Rejected { operation, message };
        }

        let message = match operation {
            Operation::SearchInfluencers if err.is_timeout() => TIMEOUT_MESSAGE.to_string(),
            Operation::SearchInfluencers | Operation::LookupProfile => err.to_string(),
            _ => operation.transport_fallback().to_string(),
        };
        tracing::error!(?operation, error = %err, "request failed");
        Self::Transport {
            operation,
            message,
            source: err,
        }
    }
}

#[cfg(test)]
#[path = "workflow_test.rs"]
mod tests;
