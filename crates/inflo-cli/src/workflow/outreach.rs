use inflo_client::ActionAck;
use inflo_core::{profile_url, AppState};

use super::{Context, Operation, Precondition, WorkflowError};
use crate::ui::{LoadingKind, NoticeKind};

pub(crate) const DEFAULT_EMAIL_TEMPLATE: &str = "Hi @username,\n\nWe love your content and would \
like to collaborate on our campaign. Are you interested?\n\nBest regards,\nYour Team";

/// Adds the selected influencers to the current campaign.
///
/// # Errors
///
/// - [`Precondition::NothingToAdd`] or [`Precondition::NoCampaign`] without
///   sending a request.
/// - [`WorkflowError::Rejected`] / [`WorkflowError::Transport`] on failure.
pub(crate) async fn add_influencers(
    ctx: &Context<'_>,
    state: &mut AppState,
) -> Result<ActionAck, WorkflowError> {
    if state.selection.is_empty() {
        return Err(ctx.precondition(Precondition::NothingToAdd));
    }
    let campaign_id = ctx
        .current_campaign(state)
        .ok_or_else(|| ctx.precondition(Precondition::NoCampaign))?;
    let ids = state.selection.ids().to_vec();

    let result = {
        let _overlay = ctx.loading("Adding influencers to campaign...", LoadingKind::Standard);
        ctx.client.add_influencers(&campaign_id, &ids).await
    };
    let ack = result.map_err(|e| ctx.failed(Operation::AddInfluencers, e))?;

    state.selection.mark_all(&ids);
    let message = ack
        .message
        .clone()
        .unwrap_or_else(|| format!("Added {} influencers to campaign", ids.len()));
    ctx.presenter.success(&message);
    Ok(ack)
}

/// Sends the outreach email to the selected influencers.
///
/// Resolves to `Ok(None)` when the template prompt is cancelled or answered
/// with an empty template; nothing is sent in that case.
///
/// # Errors
///
/// - [`Precondition::NothingToEmail`] or [`Precondition::NoCampaign`] without
///   prompting or sending.
/// - [`WorkflowError::Rejected`] / [`WorkflowError::Transport`] on failure.
pub(crate) async fn send_emails(
    ctx: &Context<'_>,
    state: &mut AppState,
) -> Result<Option<ActionAck>, WorkflowError> {
    if state.selection.is_empty() {
        return Err(ctx.precondition(Precondition::NothingToEmail));
    }
    let campaign_id = ctx
        .current_campaign(state)
        .ok_or_else(|| ctx.precondition(Precondition::NoCampaign))?;

    let Some(template) = ctx
        .prompt
        .request_template(DEFAULT_EMAIL_TEMPLATE)
        .await
        .filter(|t| !t.trim().is_empty())
    else {
        tracing::debug!("email template prompt cancelled");
        return Ok(None);
    };
    let ids = state.selection.ids().to_vec();

    let result = {
        let _overlay = ctx.loading("Sending emails...", LoadingKind::Standard);
        ctx.client.send_emails(&campaign_id, &ids, &template).await
    };
    let ack = result.map_err(|e| ctx.failed(Operation::SendEmails, e))?;

    let message = ack
        .message
        .clone()
        .unwrap_or_else(|| format!("Emails sent to {} influencers", ids.len()));
    ctx.presenter.success(&message);
    Ok(Some(ack))
}

/// Adds a single influencer to the selection.
///
/// # Errors
///
/// Returns [`Precondition::AlreadySelected`] if the id is already selected.
pub(crate) fn select_influencer(
    ctx: &Context<'_>,
    state: &mut AppState,
    influencer_id: &str,
) -> Result<(), WorkflowError> {
    state
        .selection
        .add(influencer_id)
        .map_err(|_| ctx.precondition(Precondition::AlreadySelected))?;
    ctx.presenter.success("Influencer added to selection");
    Ok(())
}

/// Flips the selection state of one influencer; returns whether it is now
/// selected.
pub(crate) fn toggle_influencer(
    ctx: &Context<'_>,
    state: &mut AppState,
    influencer_id: &str,
) -> bool {
    let selected = state.selection.toggle(influencer_id);
    let verb = if selected { "Selected" } else { "Deselected" };
    ctx.presenter
        .notify(NoticeKind::Info, &format!("{verb} {influencer_id}"));
    selected
}

pub(crate) fn contact_influencer(ctx: &Context<'_>, influencer_id: &str) {
    ctx.presenter.notify(
        NoticeKind::Info,
        &format!("Contacting influencer {influencer_id}"),
    );
}

/// Opens the external profile of an influencer in the current results.
///
/// # Errors
///
/// Returns [`Precondition::UnknownInfluencer`] if the id is not in the list.
pub(crate) fn open_profile(
    ctx: &Context<'_>,
    state: &AppState,
    influencer_id: &str,
) -> Result<String, WorkflowError> {
    let influencer = state.influencer(influencer_id).ok_or_else(|| {
        ctx.precondition(Precondition::UnknownInfluencer(influencer_id.to_string()))
    })?;
    let url = profile_url(influencer.handle(), influencer.platform_label());
    ctx.presenter.open_url(&url);
    Ok(url)
}
