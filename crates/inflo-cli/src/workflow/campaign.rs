use inflo_core::{AppState, CampaignDraft, CampaignSummary};

use super::{Context, Operation, WorkflowError};
use crate::ui::{CampaignPicker, LoadingKind, View};

/// Creates a campaign, makes it current, and moves to the results view once
/// the navigate delay has passed.
///
/// # Errors
///
/// Returns [`WorkflowError::Rejected`] or [`WorkflowError::Transport`] when
/// the backend did not create the campaign; `state` is left untouched.
pub(crate) async fn create_campaign(
    ctx: &Context<'_>,
    state: &mut AppState,
    draft: &CampaignDraft,
) -> Result<String, WorkflowError> {
    let result = {
        let _overlay = ctx.loading("Creating campaign...", LoadingKind::Standard);
        ctx.client.create_campaign(draft).await
    };
    let created = result.map_err(|e| ctx.failed(Operation::CreateCampaign, e))?;

    let campaign_id = created.campaign_id;
    state.campaign_id = Some(campaign_id.clone());
    if let Err(e) = ctx.session.set_campaign_id(&campaign_id) {
        tracing::warn!(error = %e, "campaign created but not persisted to session");
    }
    tracing::info!(campaign_id = %campaign_id, "campaign created");
    ctx.presenter.success("Campaign created successfully!");

    tokio::time::sleep(ctx.navigate_delay).await;
    ctx.presenter.navigate(View::Results);
    Ok(campaign_id)
}

/// Fills the campaign picker, marking the current campaign.
///
/// # Errors
///
/// Returns the list failure after showing it; the picker is left in its
/// failed state.
pub(crate) async fn load_campaign_picker(
    ctx: &Context<'_>,
    state: &AppState,
) -> Result<Vec<CampaignSummary>, WorkflowError> {
    ctx.presenter.show_campaigns(&CampaignPicker::Loading);
    let result = {
        let _overlay = ctx.loading("Loading campaigns...", LoadingKind::Standard);
        ctx.client.list_campaigns().await
    };
    match result {
        Ok(campaigns) if campaigns.is_empty() => {
            ctx.presenter.show_campaigns(&CampaignPicker::Empty);
            Ok(campaigns)
        }
        Ok(campaigns) => {
            ctx.presenter.show_campaigns(&CampaignPicker::Ready {
                campaigns: campaigns.clone(),
                selected: state.campaign_id.clone(),
            });
            Ok(campaigns)
        }
        Err(e) => {
            ctx.presenter.show_campaigns(&CampaignPicker::Failed);
            Err(ctx.failed(Operation::ListCampaigns, e))
        }
    }
}

/// Entering the results view: fall back to the session campaign when none is
/// held in memory, fill the picker, and show any influencers already stored
/// for the campaign.
///
/// A failure to load stored influencers is logged only; the view stays
/// usable.
///
/// # Errors
///
/// Returns the campaign list failure, after the stored influencers have
/// still been attempted.
pub(crate) async fn enter_results_view(
    ctx: &Context<'_>,
    state: &mut AppState,
) -> Result<(), WorkflowError> {
    let current = ctx.current_campaign(state);
    let picker = load_campaign_picker(ctx, state).await;

    if let Some(campaign_id) = current {
        let result = {
            let _overlay = ctx.loading("Loading campaign data...", LoadingKind::Standard);
            ctx.client.fetch_campaign_data(&campaign_id).await
        };
        match result {
            Ok(data) => {
                if let Some(influencers) = data.influencers {
                    state.replace_influencers(influencers);
                    ctx.render_influencers(state);
                }
            }
            Err(e) => {
                tracing::warn!(
                    campaign_id = %campaign_id,
                    error = %e,
                    "could not load stored influencers"
                );
            }
        }
    }

    picker.map(|_| ())
}
