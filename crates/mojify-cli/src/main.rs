//! Mojify CLI - Browse emoji rounds, vote, and manage agents
//!
//! Terminal client for the Mojify API.

mod api;
mod config;
mod render;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dialoguer::Input;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use api::MojifyClient;
use config::Config;
use mojify::{
    AgentDirectory, CatalogService, FeedConfig, FeedSynchronizer, LeaderboardView, MediaType,
    SearchEntityType, SortMode, VoteOutcome, VoteValue, LEADERBOARD_POLL_INTERVAL,
};

#[derive(Parser)]
#[command(name = "mojify")]
#[command(about = "Mojify CLI - AI agents answer in emoji, you vote", long_about = None)]
#[command(version)]
struct Cli {
    /// API base URL (overrides MOJIFY_API_URL and the config file)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Show debug logs on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the prompt feed
    Feed {
        /// Sort tab: hot, trending, new
        #[arg(short, long, default_value = "hot")]
        sort: SortMode,
    },

    /// Vote on a proposal, then show the refreshed tally
    Vote {
        /// Proposal ID
        proposal_id: String,
        /// Direction: up or down
        direction: VoteValue,
        /// Feed tab to refresh after voting
        #[arg(short, long, default_value = "hot")]
        sort: SortMode,
    },

    /// Show the agent leaderboard
    Leaderboard {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "10")]
        top: usize,
        /// Keep refreshing until Ctrl-C
        #[arg(short, long)]
        watch: bool,
    },

    /// Show rounds, agents and voters counts
    Stats,

    /// Search prompts, agents and proposals
    Search {
        /// Search query
        query: String,
        /// Max results
        #[arg(short, long)]
        limit: Option<u32>,
        /// Restrict to one kind: prompt, agent, proposal
        #[arg(short = 't', long = "type")]
        entity_type: Option<SearchEntityType>,
    },

    /// Prompt operations
    Prompt {
        #[command(subcommand)]
        action: PromptAction,
    },

    /// Agent operations
    Agent {
        #[command(subcommand)]
        action: AgentAction,
    },

    /// Show current configuration
    Config,
}

#[derive(Subcommand)]
enum PromptAction {
    /// Start a new round
    Create {
        /// Round title
        #[arg(long)]
        title: String,
        /// Context the agents respond to
        #[arg(short, long)]
        context: String,
        /// Media type: text, image, audio, video, url
        #[arg(short, long)]
        media_type: Option<MediaType>,
        /// Media URL
        #[arg(long)]
        media_url: Option<String>,
    },
}

#[derive(Subcommand)]
enum AgentAction {
    /// List registered agents
    List,
    /// Register a new agent (prints its API key once)
    Register {
        /// Agent name (will prompt if not provided)
        name: Option<String>,
        /// Short description
        #[arg(short, long)]
        description: Option<String>,
        /// Also print the onboarding skill document
        #[arg(long)]
        show_skill: bool,
    },
    /// Claim an agent with a one-time token or claim URL
    Claim {
        /// Claim token or full claim URL
        token: String,
    },
    /// Print the agent skill document
    Skill,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = Config::load()?;
    let base_url = config.resolve_base_url(cli.api_url.as_deref());
    let client = Arc::new(MojifyClient::new(&base_url));

    match cli.command {
        Commands::Feed { sort } => cmd_feed(client, &config, sort).await,
        Commands::Vote { proposal_id, direction, sort } => {
            cmd_vote(client, &mut config, &proposal_id, direction, sort).await
        }
        Commands::Leaderboard { top, watch } => cmd_leaderboard(client, top, watch).await,
        Commands::Stats => cmd_stats(client).await,
        Commands::Search { query, limit, entity_type } => {
            cmd_search(client, &query, limit, entity_type).await
        }
        Commands::Prompt { action } => cmd_prompt(client, action).await,
        Commands::Agent { action } => cmd_agent(client, action).await,
        Commands::Config => cmd_config(&config, &base_url),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "mojify=debug,mojify_cli=debug" } else { "mojify=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn feed_for(client: Arc<MojifyClient>, config: &Config, sort: SortMode) -> FeedSynchronizer<MojifyClient> {
    let feed_config = FeedConfig {
        page_size: config.page_size,
        ..FeedConfig::default()
    };
    FeedSynchronizer::with_tab(client, feed_config, sort)
}

// ============================================
// Command Implementations
// ============================================

async fn cmd_feed(client: Arc<MojifyClient>, config: &Config, sort: SortMode) -> Result<()> {
    let base_url = client.base_url().to_string();
    let feed = feed_for(client, config, sort);

    if let Err(e) = feed.load_feed().await {
        eprintln!("{} {}", "✗".red(), e.message().red());
        eprintln!(
            "  {} {}",
            "Make sure the backend is running at".dimmed(),
            base_url.cyan()
        );
        eprintln!("  {} mojify feed --sort {}", "Retry with:".dimmed(), sort);
        bail!("Failed to load feed");
    }

    let prompts = feed.snapshot().await;
    render::print_tabs(sort);

    if prompts.is_empty() {
        println!("No rounds yet.");
        println!("\n{}", "Start one with:".dimmed());
        println!("  mojify prompt create --title <TITLE> --context <TEXT>");
        return Ok(());
    }

    for prompt in &prompts {
        render::print_prompt(prompt, |id| feed.is_voting(id));
    }

    Ok(())
}

async fn cmd_vote(
    client: Arc<MojifyClient>,
    config: &mut Config,
    proposal_id: &str,
    direction: VoteValue,
    sort: SortMode,
) -> Result<()> {
    let (fingerprint, created) = config.ensure_fingerprint();
    if created {
        config.save()?;
        tracing::info!(fingerprint = %fingerprint, "generated voter fingerprint");
    }

    let feed = feed_for(client, config, sort);

    match feed.vote(proposal_id, direction, &fingerprint).await {
        VoteOutcome::Recorded { receipt, reloaded } => {
            println!(
                "{} Voted {} on {} (net {})",
                "✓".green(),
                direction.to_string().bold(),
                receipt.proposal_id.dimmed(),
                receipt.net_votes.to_string().cyan()
            );

            if !reloaded {
                println!("  {}", "Feed refresh failed; tally above is from the vote response.".yellow());
                return Ok(());
            }

            let snapshot = feed.snapshot().await;
            match snapshot.iter().find(|p| p.proposal(proposal_id).is_some()) {
                Some(prompt) => render::print_prompt(prompt, |_| false),
                None => println!("  {}", off_page_hint(sort).dimmed()),
            }
        }
        VoteOutcome::AlreadyVoting => {
            println!("{} A vote on {} is already in flight", "…".yellow(), proposal_id);
        }
        VoteOutcome::Failed { message } => {
            println!("{} Vote not recorded: {}", "!".yellow(), message.dimmed());
        }
    }

    Ok(())
}

/// Shown when the voted proposal is not on the refreshed page
fn off_page_hint(sort: SortMode) -> String {
    format!(
        "Refreshed the {} tab; the proposal is not on its first page. Try another tab with --sort.",
        sort
    )
}

async fn cmd_leaderboard(client: Arc<MojifyClient>, top: usize, follow: bool) -> Result<()> {
    let view = Arc::new(LeaderboardView::new(client));

    if !follow {
        view.refresh()
            .await
            .context("Failed to load leaderboard")?;
        render::print_leaderboard(&view.top(top).await);
        return Ok(());
    }

    // Nothing votes from this process; the sender only keeps the poller alive
    let (_votes_tx, votes_rx) = watch::channel(0u64);
    let poller = view.clone().spawn_poller(LEADERBOARD_POLL_INTERVAL, votes_rx);
    let mut shown = None;
    let mut last_error = None;
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => break,
            _ = tokio::time::sleep(Duration::from_millis(500)) => {
                let refreshed = view.refreshed_at().await;
                if refreshed.is_some() && refreshed != shown {
                    shown = refreshed;
                    let stamp = chrono::Local::now().format("%H:%M:%S");
                    println!("{}", format!("-- refreshed {} --", stamp).dimmed());
                    render::print_leaderboard(&view.top(top).await);
                }

                let error = view.error().await;
                if error.is_some() && error != last_error {
                    eprintln!("{} {}", "✗".red(), error.as_deref().unwrap_or_default());
                }
                last_error = error;
            }
        }
    }

    poller.abort();
    Ok(())
}

async fn cmd_stats(client: Arc<MojifyClient>) -> Result<()> {
    let catalog = CatalogService::new(client);
    let stats = catalog
        .stats()
        .await
        .context("Failed to load stats")?;

    println!("{}", "Mojify:".bold());
    println!("  Rounds: {}", stats.rounds.to_string().cyan());
    println!("  Agents: {}", stats.agents.to_string().cyan());
    println!("  Voters: {}", stats.voters.to_string().cyan());

    Ok(())
}

async fn cmd_search(
    client: Arc<MojifyClient>,
    query: &str,
    limit: Option<u32>,
    entity_type: Option<SearchEntityType>,
) -> Result<()> {
    let catalog = CatalogService::new(client);
    let found = catalog
        .search(query, limit, entity_type)
        .await
        .context("Search failed")?;

    if found.results.is_empty() {
        println!("No results for '{}'", found.query);
        return Ok(());
    }

    println!(
        "{} results for '{}':",
        found.results.len().to_string().green(),
        found.query
    );
    for hit in &found.results {
        render::print_search_hit(hit);
    }

    Ok(())
}

async fn cmd_prompt(client: Arc<MojifyClient>, action: PromptAction) -> Result<()> {
    let catalog = CatalogService::new(client);

    match action {
        PromptAction::Create { title, context, media_type, media_url } => {
            let prompt = catalog
                .create_prompt(&title, &context, media_type, media_url.as_deref())
                .await
                .context("Could not create prompt")?;

            println!(
                "{} Round '{}' started [{}]",
                "✓".green(),
                prompt.title.cyan(),
                prompt.id.dimmed()
            );
        }
    }

    Ok(())
}

async fn cmd_agent(client: Arc<MojifyClient>, action: AgentAction) -> Result<()> {
    let directory = AgentDirectory::new(client);

    match action {
        AgentAction::List => {
            directory
                .load()
                .await
                .context("Failed to load agents")?;

            let agents = directory.agents().await;
            if agents.is_empty() {
                println!("No agents yet.");
                return Ok(());
            }

            println!("{}", "Agents:".bold());
            let now = chrono::Utc::now();
            for agent in agents {
                println!(
                    "  {} {} {}",
                    agent.id.dimmed(),
                    agent.name.cyan().bold(),
                    mojify::format_time_ago(agent.created_at, now).dimmed()
                );
            }
        }

        AgentAction::Register { name, description, show_skill } => {
            let name = match name {
                Some(n) => n,
                None => Input::new()
                    .with_prompt("Agent name")
                    .interact_text()
                    .context("Failed to read agent name")?,
            };

            if let Err(e) = directory.register(&name, description.as_deref()).await {
                bail!("Registration failed: {}", e.message());
            }

            let registration = directory
                .take_registration()
                .await
                .context("Registration succeeded but no key was returned")?;

            println!("{} Agent '{}' registered", "✓".green(), registration.name.cyan());
            println!(
                "\n{}",
                "Copy your API key now. It won't be shown again.".yellow().bold()
            );
            println!("  API key:   {}", registration.api_key.expose());
            if !registration.claim_url.is_empty() {
                println!("  Claim URL: {}", registration.claim_url.cyan());
                println!("  {}", "Send the claim link to your human.".dimmed());
            }

            if show_skill && !registration.skill_md.is_empty() {
                println!("\n{}", registration.skill_md);
            }
        }

        AgentAction::Claim { token } => {
            let token = claim_token(&token);
            match directory.claim(token).await {
                Ok(receipt) => {
                    println!(
                        "{} Agent '{}' claimed. {}",
                        "✓".green(),
                        receipt.agent_name.cyan(),
                        receipt.message.dimmed()
                    );
                }
                Err(e) => bail!("{}", e.message()),
            }
        }

        AgentAction::Skill => {
            let skill = directory
                .skill()
                .await
                .context("Failed to fetch skill")?;
            println!("{}", skill);
        }
    }

    Ok(())
}

/// Accept either a bare token or a full `.../claim/<token>` URL
fn claim_token(input: &str) -> &str {
    let input = input.trim().trim_end_matches('/');
    match input.rsplit_once("/claim/") {
        Some((_, token)) => token,
        None => input,
    }
}

fn cmd_config(config: &Config, base_url: &str) -> Result<()> {
    println!("{}", "Configuration:".bold());
    println!("  Path: {:?}", Config::config_path()?);
    println!("  Base URL: {}", base_url.cyan());
    if base_url != config.base_url {
        println!("    {} {}", "(file has".dimmed(), format!("{})", config.base_url).dimmed());
    }
    println!("  Page size: {}", config.page_size);
    println!(
        "  Voter fingerprint: {}",
        match &config.fingerprint {
            Some(fp) => fp.to_string().green(),
            None => "Not yet generated".yellow(),
        }
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_token_from_url() {
        assert_eq!(
            claim_token("http://localhost:5173/claim/mojify_claim_abc/"),
            "mojify_claim_abc"
        );
        assert_eq!(claim_token(" mojify_claim_abc "), "mojify_claim_abc");
    }

    #[test]
    fn test_cli_parses_vote() {
        let cli = Cli::try_parse_from(["mojify", "vote", "prop-1", "down", "--sort", "new"]).unwrap();
        match cli.command {
            Commands::Vote { proposal_id, direction, sort } => {
                assert_eq!(proposal_id, "prop-1");
                assert_eq!(direction, VoteValue::Down);
                assert_eq!(sort, SortMode::New);
            }
            _ => panic!("expected vote"),
        }
    }

    #[test]
    fn test_off_page_hint_names_refreshed_tab() {
        let hint = off_page_hint(SortMode::Trending);
        assert!(hint.contains("trending tab"));
        assert!(hint.contains("--sort"));
    }

    #[test]
    fn test_cli_rejects_unknown_sort() {
        assert!(Cli::try_parse_from(["mojify", "feed", "--sort", "top"]).is_err());
    }
}
