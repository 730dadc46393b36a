use inflo_core::{AppState, CampaignAnalysis};

use super::{Context, Operation, Precondition, WorkflowError};
use crate::ui::LoadingKind;

/// Asks the backend to analyze the current campaign and renders the result.
///
/// # Errors
///
/// - [`Precondition::NoCampaignToAnalyze`] without sending a request.
/// - [`WorkflowError::Rejected`] / [`WorkflowError::Transport`] on failure.
pub(crate) async fn analyze_campaign(
    ctx: &Context<'_>,
    state: &mut AppState,
) -> Result<CampaignAnalysis, WorkflowError> {
    let campaign_id = ctx
        .current_campaign(state)
        .ok_or_else(|| ctx.precondition(Precondition::NoCampaignToAnalyze))?;

    let result = {
        let _overlay = ctx.loading("Analyzing campaign...", LoadingKind::Standard);
        ctx.client.analyze_campaign(&campaign_id).await
    };
    let analysis = result.map_err(|e| ctx.failed(Operation::AnalyzeCampaign, e))?;

    ctx.presenter.show_analysis(&analysis);
    ctx.presenter.success("Campaign analysis completed!");
    Ok(analysis)
}

/// Entering the analysis view: show the stored analysis of the current
/// campaign, if any. Failures are logged only.
pub(crate) async fn enter_analysis_view(
    ctx: &Context<'_>,
    state: &mut AppState,
) -> Option<CampaignAnalysis> {
    let campaign_id = ctx.current_campaign(state)?;

    let result = {
        let _overlay = ctx.loading("Loading campaign data...", LoadingKind::Standard);
        ctx.client.fetch_campaign_data(&campaign_id).await
    };
    match result {
        Ok(data) => {
            let analysis = data.analysis?;
            ctx.presenter.show_analysis(&analysis);
            Some(analysis)
        }
        Err(e) => {
            tracing::warn!(
                campaign_id = %campaign_id,
                error = %e,
                "could not load stored analysis"
            );
            None
        }
    }
}
