use std::path::Path;

use inflo_client::ProxiedImage;
use inflo_core::InstagramProfile;

use super::{Context, Operation, WorkflowError};
use crate::ui::{LoadingKind, ProfileCard};

/// Trims the input and strips any leading `@`s.
fn sanitize_username(raw: &str) -> &str {
    raw.trim().trim_start_matches('@')
}

/// Looks up a public Instagram profile. Blank input is a no-op.
///
/// # Errors
///
/// Returns [`WorkflowError::Rejected`] / [`WorkflowError::Transport`] when
/// the lookup fails.
pub(crate) async fn lookup_instagram_profile(
    ctx: &Context<'_>,
    raw_username: &str,
) -> Result<Option<InstagramProfile>, WorkflowError> {
    if raw_username.trim().is_empty() {
        return Ok(None);
    }
    let username = sanitize_username(raw_username);

    ctx.presenter.status("Fetching profile...");
    let result = {
        let _overlay = ctx.loading("Fetching profile...", LoadingKind::Standard);
        ctx.client.instagram_profile(username).await
    };
    match result {
        Ok(profile) => {
            ctx.presenter
                .show_profile(&ProfileCard::build(&profile, username, ctx.client));
            ctx.presenter.status("Done");
            Ok(Some(profile))
        }
        Err(e) => {
            ctx.presenter.status("");
            Err(ctx.failed(Operation::LookupProfile, e))
        }
    }
}

/// Downloads an avatar through the backend proxy and writes it to `out`.
///
/// # Errors
///
/// Returns [`WorkflowError::Rejected`] / [`WorkflowError::Transport`] when
/// the proxy fails, or [`WorkflowError::Output`] when the file cannot be
/// written.
pub(crate) async fn download_avatar(
    ctx: &Context<'_>,
    image_url: &str,
    out: &Path,
) -> Result<ProxiedImage, WorkflowError> {
    let result = {
        let _overlay = ctx.loading("Downloading image...", LoadingKind::Standard);
        ctx.client.fetch_proxy_image(image_url).await
    };
    let image = result.map_err(|e| ctx.failed(Operation::DownloadAvatar, e))?;

    tokio::fs::write(out, &image.bytes).await.map_err(|source| {
        ctx.report(WorkflowError::Output {
            path: out.display().to_string(),
            source,
        })
    })?;
    ctx.presenter.success(&format!(
        "Saved {} ({} bytes) to {}",
        image.content_type,
        image.bytes.len(),
        out.display()
    ));
    Ok(image)
}
