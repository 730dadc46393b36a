mod shell;
mod ui;
mod workflow;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use inflo_client::ApiClient;
use inflo_core::{AppState, CampaignDraft, SearchFilters, SessionStore};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

use crate::ui::terminal::{stdin_lines, FixedPrompt, StdinPrompt, TerminalPresenter};
use crate::ui::{TemplatePrompt, View};
use crate::workflow::{Context, WorkflowError};

#[derive(Debug, Parser)]
#[command(name = "inflo")]
#[command(about = "Influencer campaign workflow client")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create a campaign and make it the current one
    Create(CreateArgs),
    /// List campaigns known to the backend
    Campaigns,
    /// Search influencers for a campaign
    Search(SearchArgs),
    /// Add influencers to the current campaign
    Add {
        /// Influencer id; repeat for several
        #[arg(long = "id", required = true)]
        ids: Vec<String>,
        /// Campaign to use instead of the current one
        #[arg(long)]
        campaign: Option<String>,
    },
    /// Email influencers about the current campaign
    Email {
        /// Influencer id; repeat for several
        #[arg(long = "id", required = true)]
        ids: Vec<String>,
        /// Campaign to use instead of the current one
        #[arg(long)]
        campaign: Option<String>,
        /// Email template; prompts when omitted
        #[arg(long)]
        template: Option<String>,
    },
    /// Analyze the current campaign
    Analyze {
        /// Campaign to use instead of the current one
        #[arg(long)]
        campaign: Option<String>,
    },
    /// Look up a public Instagram profile
    Profile {
        /// Username, with or without a leading @
        username: String,
    },
    /// Download an image through the backend proxy
    Avatar {
        /// Remote image URL
        url: String,
        /// File to write
        #[arg(long, short)]
        out: PathBuf,
    },
    /// Print the external profile link for a handle
    Open {
        username: String,
        #[arg(long, default_value = "Instagram")]
        platform: String,
    },
    /// Inspect or end the stored session
    Session {
        #[command(subcommand)]
        command: SessionCommands,
    },
    /// Interactive shell (the default)
    Shell,
}

#[derive(Debug, Subcommand)]
enum SessionCommands {
    /// Show the current campaign id
    Show,
    /// Forget the current campaign id
    Clear,
}

/// Campaign form fields.
#[derive(Debug, Clone, Args)]
pub(crate) struct CreateArgs {
    /// Campaign name
    #[arg(long)]
    pub name: String,
    #[arg(long, default_value = "")]
    pub goal: String,
    #[arg(long = "audience", default_value = "")]
    pub target_audience: String,
    #[arg(long = "brand", default_value = "")]
    pub brand_name: String,
    #[arg(long, default_value = "")]
    pub niche: String,
    #[arg(long = "website", default_value = "")]
    pub brand_website: String,
    #[arg(long, default_value = "Instagram")]
    pub platform: String,
    #[arg(long)]
    pub budget: Option<Decimal>,
}

impl CreateArgs {
    pub(crate) fn into_draft(self) -> CampaignDraft {
        CampaignDraft {
            campaign_name: self.name,
            goal: self.goal,
            target_audience: self.target_audience,
            brand_name: self.brand_name,
            niche: self.niche,
            brand_website: self.brand_website,
            platform: self.platform,
            budget: self.budget,
        }
    }
}

/// Search form fields.
#[derive(Debug, Clone, Default, Args)]
pub(crate) struct SearchArgs {
    /// Campaign to search; defaults to the current campaign
    #[arg(long)]
    pub campaign: Option<String>,
    #[arg(long)]
    pub platform: Option<String>,
    #[arg(long)]
    pub niche: Option<String>,
    #[arg(long)]
    pub followers_min: Option<u64>,
    #[arg(long)]
    pub followers_max: Option<u64>,
    /// Audience age range, e.g. 18-24
    #[arg(long = "age-range")]
    pub audience_age_range: Option<String>,
    #[arg(long = "gender")]
    pub audience_gender: Option<String>,
    #[arg(long = "location")]
    pub audience_location: Option<String>,
}

impl SearchArgs {
    pub(crate) fn into_parts(self) -> (Option<String>, SearchFilters) {
        let filters = SearchFilters {
            platform: self.platform,
            niche: self.niche,
            followers_min: self.followers_min,
            followers_max: self.followers_max,
            audience_age_range: self.audience_age_range,
            audience_gender: self.audience_gender,
            audience_location: self.audience_location,
        };
        (self.campaign, filters)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let config = inflo_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Shell);

    let client = ApiClient::from_config(&config)?;
    let session = SessionStore::new(config.session_path.clone());
    let presenter = TerminalPresenter::new(config.overlay_failsafe(), config.toast_ttl());
    let lines = stdin_lines();
    let prompt: Box<dyn TemplatePrompt> = match &command {
        Commands::Email {
            template: Some(template),
            ..
        } => Box::new(FixedPrompt(Some(template.clone()))),
        _ => Box::new(StdinPrompt::new(Arc::clone(&lines))),
    };
    let ctx = Context {
        client: &client,
        presenter: &presenter,
        prompt: prompt.as_ref(),
        session: &session,
        navigate_delay: config.navigate_delay(),
    };
    tracing::debug!(env = %config.env, base_url = %client.base_url(), "starting");

    let mut state = AppState::new();
    let outcome = match command {
        Commands::Shell => {
            shell::run(&ctx, &presenter, &lines, &mut state).await?;
            return Ok(ExitCode::SUCCESS);
        }
        Commands::Session { command } => {
            run_session_command(&session, &command)?;
            return Ok(ExitCode::SUCCESS);
        }
        command => run_command(&ctx, &mut state, command).await,
    };

    if let Err(e) = &outcome {
        tracing::debug!(error = %e, operation = ?e.operation(), "command failed");
    }
    if presenter.take_pending_view() == Some(View::Results) {
        eprintln!("Run `inflo search` to find influencers for this campaign.");
    }
    Ok(if outcome.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Runs one non-interactive command. Failures have already been shown.
async fn run_command(
    ctx: &Context<'_>,
    state: &mut AppState,
    command: Commands,
) -> Result<(), WorkflowError> {
    match command {
        Commands::Create(args) => {
            workflow::create_campaign(ctx, state, &args.into_draft()).await?;
        }
        Commands::Campaigns => {
            state.campaign_id = ctx.session.campaign_id();
            workflow::load_campaign_picker(ctx, state).await?;
        }
        Commands::Search(args) => {
            let (choice, filters) = args.into_parts();
            workflow::search_influencers(ctx, state, choice.as_deref(), filters).await?;
        }
        Commands::Add { ids, campaign } => {
            state.campaign_id = campaign;
            state.selection.mark_all(&ids);
            workflow::add_influencers(ctx, state).await?;
        }
        Commands::Email { ids, campaign, .. } => {
            state.campaign_id = campaign;
            state.selection.mark_all(&ids);
            workflow::send_emails(ctx, state).await?;
        }
        Commands::Analyze { campaign } => {
            state.campaign_id = campaign;
            workflow::analyze_campaign(ctx, state).await?;
        }
        Commands::Profile { username } => {
            workflow::lookup_instagram_profile(ctx, &username).await?;
        }
        Commands::Avatar { url, out } => {
            workflow::download_avatar(ctx, &url, &out).await?;
        }
        Commands::Open { username, platform } => {
            ctx.presenter
                .open_url(&inflo_core::profile_url(&username, &platform));
        }
        Commands::Session { .. } | Commands::Shell => {}
    }
    Ok(())
}

fn run_session_command(session: &SessionStore, command: &SessionCommands) -> anyhow::Result<()> {
    match command {
        SessionCommands::Show => match session.load()? {
            Some(record) => println!(
                "{}  (saved {})",
                record.campaign_id,
                record.saved_at.format("%Y-%m-%d %H:%M:%S UTC")
            ),
            None => println!("no current campaign"),
        },
        SessionCommands::Clear => {
            session.clear()?;
            println!("session cleared ({})", session.path().display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests;
