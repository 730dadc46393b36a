use inflo_core::{AppState, SearchFilters};

use super::{Context, Operation, Precondition, WorkflowError};
use crate::ui::LoadingKind;

/// Picks the campaign to search: the picker choice if one was made, else
/// the current campaign. An explicitly empty choice is refused even when a
/// campaign is current.
fn resolve_search_campaign(
    choice: Option<&str>,
    current: Option<String>,
) -> Result<String, Precondition> {
    let chosen = choice
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .or(current);
    let Some(campaign_id) = chosen else {
        return Err(Precondition::NoCampaign);
    };
    if choice.is_some_and(str::is_empty) {
        return Err(Precondition::CampaignNotChosen);
    }
    Ok(campaign_id)
}

/// Runs an influencer search and replaces the result list wholesale.
///
/// # Errors
///
/// - [`Precondition::NoCampaign`] / [`Precondition::CampaignNotChosen`]
///   without sending a request.
/// - [`WorkflowError::Rejected`] / [`WorkflowError::Transport`] on failure,
///   including the search timeout. The previous results stay in place.
pub(crate) async fn search_influencers(
    ctx: &Context<'_>,
    state: &mut AppState,
    choice: Option<&str>,
    filters: SearchFilters,
) -> Result<usize, WorkflowError> {
    let current = ctx.current_campaign(state);
    let campaign_id =
        resolve_search_campaign(choice, current).map_err(|p| ctx.precondition(p))?;
    state.campaign_id = Some(campaign_id.clone());

    let filters = filters.normalized();
    tracing::debug!(campaign_id = %campaign_id, ?filters, "searching influencers");
    let result = {
        let _overlay = ctx.loading(
            "AI is analyzing influencers... This may take 40-60 seconds.",
            LoadingKind::LongRunning,
        );
        ctx.client.fetch_influencers(&campaign_id, &filters).await
    };
    let search = result.map_err(|e| ctx.failed(Operation::SearchInfluencers, e))?;

    let count = search.count();
    state.replace_influencers(search.influencers);
    ctx.render_influencers(state);
    ctx.presenter.success(&format!("Found {count} influencers"));
    Ok(count)
}
