//! Interactive shell. One shell run is one browsing session: state carries
//! over between lines and commands run one at a time.

use std::io::Write as _;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use inflo_core::AppState;
use thiserror::Error;

use crate::ui::terminal::{FixedPrompt, SharedLines, TerminalPresenter};
use crate::ui::{NoticeKind, Presenter, View};
use crate::workflow::{self, Context, WorkflowError};
use crate::{CreateArgs, SearchArgs};

#[derive(Debug, Parser)]
#[command(no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Debug, Subcommand)]
enum ShellCommand {
    /// Create a campaign and switch to the results view
    Create(CreateArgs),
    /// List campaigns
    Campaigns,
    /// Make a campaign current
    Use { campaign_id: String },
    /// Search influencers
    Search(SearchArgs),
    /// Show the current influencer list
    List,
    /// Add an influencer to the selection
    Select { id: String },
    /// Flip the selection state of an influencer
    Toggle { id: String },
    /// Empty the selection
    Clear,
    /// Add the selected influencers to the campaign
    Add,
    /// Email the selected influencers
    Email {
        /// Skip the prompt and use this template
        #[arg(long)]
        template: Option<String>,
    },
    /// Analyze the current campaign
    Analyze,
    /// Look up a public Instagram profile
    Profile { username: String },
    /// Print the profile link of a listed influencer
    Open { id: String },
    /// Contact a listed influencer
    Contact { id: String },
    /// Download an image through the backend proxy
    Avatar {
        url: String,
        #[arg(long, short)]
        out: PathBuf,
    },
    /// Switch view
    View { view: ViewArg },
    /// Show notifications that have not expired yet
    Notices,
    /// Leave the shell
    #[command(alias = "quit")]
    Exit,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ViewArg {
    Campaign,
    Results,
    Analysis,
}

impl From<ViewArg> for View {
    fn from(arg: ViewArg) -> Self {
        match arg {
            ViewArg::Campaign => View::Campaign,
            ViewArg::Results => View::Results,
            ViewArg::Analysis => View::Analysis,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Error)]
#[error("unterminated quote in command line")]
pub(crate) struct UnterminatedQuote;

/// Splits a shell line into words. Single or double quotes group words;
/// there are no escapes.
pub(crate) fn split_words(line: &str) -> Result<Vec<String>, UnterminatedQuote> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }
    if quote.is_some() {
        return Err(UnterminatedQuote);
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

/// Runs the shell until `exit` or end of input.
///
/// # Errors
///
/// Returns an error only if stdin cannot be read.
pub(crate) async fn run(
    ctx: &Context<'_>,
    presenter: &TerminalPresenter,
    lines: &SharedLines,
    state: &mut AppState,
) -> anyhow::Result<()> {
    if ctx.session.campaign_id().is_some() {
        enter_view(ctx, state, View::Results).await;
    } else {
        eprintln!("No current campaign. Start with `create --name <name>` or `campaigns`.");
    }

    loop {
        print!("inflo> ");
        let _ = std::io::stdout().flush();
        let Some(line) = lines.lock().await.next_line().await? else {
            break;
        };

        let words = match split_words(&line) {
            Ok(words) if words.is_empty() => continue,
            Ok(words) => words,
            Err(e) => {
                presenter.error(&e.to_string());
                continue;
            }
        };
        let command = match ShellLine::try_parse_from(&words) {
            Ok(parsed) => parsed.command,
            Err(e) => {
                let _ = e.print();
                continue;
            }
        };
        if matches!(command, ShellCommand::Exit) {
            break;
        }
        if matches!(command, ShellCommand::Notices) {
            for (kind, message) in presenter.active_toasts() {
                println!("{kind:?}: {message}");
            }
            continue;
        }

        if let Err(e) = execute(ctx, state, command).await {
            tracing::debug!(error = %e, operation = ?e.operation(), "shell command failed");
        }
        while let Some(view) = presenter.take_pending_view() {
            enter_view(ctx, state, view).await;
        }
    }
    Ok(())
}

async fn execute(
    ctx: &Context<'_>,
    state: &mut AppState,
    command: ShellCommand,
) -> Result<(), WorkflowError> {
    match command {
        ShellCommand::Create(args) => {
            workflow::create_campaign(ctx, state, &args.into_draft()).await?;
        }
        ShellCommand::Campaigns => {
            workflow::load_campaign_picker(ctx, state).await?;
        }
        ShellCommand::Use { campaign_id } => {
            if let Err(e) = ctx.session.set_campaign_id(&campaign_id) {
                tracing::warn!(error = %e, "could not persist current campaign");
            }
            state.campaign_id = Some(campaign_id);
            ctx.presenter.navigate(View::Results);
        }
        ShellCommand::Search(args) => {
            let (choice, filters) = args.into_parts();
            workflow::search_influencers(ctx, state, choice.as_deref(), filters).await?;
        }
        ShellCommand::List => ctx.render_influencers(state),
        ShellCommand::Select { id } => workflow::select_influencer(ctx, state, &id)?,
        ShellCommand::Toggle { id } => {
            workflow::toggle_influencer(ctx, state, &id);
        }
        ShellCommand::Clear => {
            state.selection.clear();
            ctx.presenter.notify(NoticeKind::Info, "Selection cleared");
        }
        ShellCommand::Add => {
            workflow::add_influencers(ctx, state).await?;
        }
        ShellCommand::Email { template } => {
            let fixed;
            let ctx = match template {
                Some(template) => {
                    fixed = FixedPrompt(Some(template));
                    Context {
                        prompt: &fixed,
                        ..*ctx
                    }
                }
                None => *ctx,
            };
            workflow::send_emails(&ctx, state).await?;
        }
        ShellCommand::Analyze => {
            workflow::analyze_campaign(ctx, state).await?;
        }
        ShellCommand::Profile { username } => {
            workflow::lookup_instagram_profile(ctx, &username).await?;
        }
        ShellCommand::Open { id } => {
            workflow::open_profile(ctx, state, &id)?;
        }
        ShellCommand::Contact { id } => workflow::contact_influencer(ctx, &id),
        ShellCommand::Avatar { url, out } => {
            workflow::download_avatar(ctx, &url, &out).await?;
        }
        ShellCommand::View { view } => ctx.presenter.navigate(view.into()),
        ShellCommand::Notices | ShellCommand::Exit => {}
    }
    Ok(())
}

async fn enter_view(ctx: &Context<'_>, state: &mut AppState, view: View) {
    tracing::debug!(%view, "entering view");
    match view {
        View::Campaign => eprintln!("Campaign form: `create --name <name> [--goal ...]`"),
        View::Results => {
            // Failures were already shown; the view stays usable.
            let _ = workflow::enter_results_view(ctx, state).await;
        }
        View::Analysis => {
            workflow::enter_analysis_view(ctx, state).await;
        }
    }
}
