//! Fantasy Roster CLI
//!
//! Builds squads and lineups from plan files, checks them against the roster
//! rules and submits them to the fantasy service. Also covers the account,
//! league and admin calls needed to run a league end to end.

mod display;
mod plan;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use colored::*;
use fantasy_gateway::{
    GameweekSpec, GatewayConfig, GatewayError, HttpFantasyClient, LeagueId, PlayerStatLine,
    SubmissionGateway, UserId,
};
use plan::RosterPlan;
use roster_engine::{Gameweek, PlayerCatalog};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "roster-cli")]
#[command(about = "Build, check and submit fantasy squads and lineups")]
#[command(version = "0.1.0")]
struct Cli {
    /// Fantasy service URL (overrides FANTASY_API_BASE_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Acting user id (overrides FANTASY_USER_ID)
    #[arg(long, global = true)]
    user: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the service's demo data
    Seed,

    /// List players by position
    Players {
        /// Read players from a snapshot file instead of the service
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Only show players whose name contains this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Check a roster plan without submitting it
    Check {
        plan: PathBuf,

        /// Read players from a snapshot file instead of the service
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Check a roster plan, then submit its squad and lineup
    Submit {
        plan: PathBuf,

        /// Submit the squad only
        #[arg(long)]
        squad_only: bool,
    },

    /// Show a league table
    Standings { league: u64 },

    /// Register an account
    Register { name: String, email: String },

    /// Show the acting account
    Me,

    League {
        #[command(subcommand)]
        action: LeagueCommand,
    },

    Gameweek {
        #[command(subcommand)]
        action: GameweekCommand,
    },

    Stats {
        #[command(subcommand)]
        action: StatsCommand,
    },

    /// Score a gameweek
    Compute {
        #[arg(value_parser = parse_gameweek)]
        gameweek: Gameweek,
    },
}

#[derive(Subcommand)]
enum LeagueCommand {
    /// Create a league and enter it
    Create { name: String, team_name: String },

    /// Enter an existing league
    Join { league_id: u64, team_name: String },
}

#[derive(Subcommand)]
enum GameweekCommand {
    /// Open a gameweek for selections
    Create {
        #[arg(value_parser = parse_gameweek)]
        gameweek: Gameweek,

        /// RFC 3339 deadline, defaults to one hour from now
        #[arg(long)]
        deadline: Option<DateTime<Utc>>,
    },
}

#[derive(Subcommand)]
enum StatsCommand {
    /// Upload raw player stats from a JSON file
    Upload {
        #[arg(value_parser = parse_gameweek)]
        gameweek: Gameweek,
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = GatewayConfig::from_env()?;
    if let Some(api_url) = cli.api_url {
        config.api_base_url = api_url;
    }
    if let Some(user) = cli.user {
        config.user_id = Some(UserId(user));
    }

    let client = Arc::new(HttpFantasyClient::new(&config)?);
    let gateway = SubmissionGateway::new(client.clone());
    info!("Using fantasy service at {}", client.base_url());

    match cli.command {
        Commands::Seed => {
            client.seed_demo().await?;
            println!("{}", "✅ Demo data loaded".green());
        }
        Commands::Players { catalog, search } => {
            let catalog = load_catalog(catalog.as_deref(), &gateway).await?;
            match search {
                Some(query) => display::print_search(&catalog, &query),
                None => display::print_catalog(&catalog),
            }
        }
        Commands::Check { plan, catalog } => {
            let plan = RosterPlan::load(&plan).await?;
            let catalog = load_catalog(catalog.as_deref(), &gateway).await?;
            check_plan(&plan, &catalog, &config)?;
        }
        Commands::Submit { plan, squad_only } => {
            let user = config.require_user()?;
            let plan = RosterPlan::load(&plan).await?;
            submit_plan(&gateway, user, &plan, &config, squad_only).await?;
        }
        Commands::Standings { league } => {
            let standings = gateway.standings(LeagueId(league)).await?;
            display::print_standings(&standings);
        }
        Commands::Register { name, email } => {
            let user = client.register(&name, &email).await?;
            println!("{}", format!("✅ Registered as user {user}").green());
            println!("   Set FANTASY_USER_ID={user} to act as this account");
        }
        Commands::Me => {
            let account = client.me(config.require_user()?).await?;
            println!("{} {} <{}>", account.id, account.name.bold(), account.email);
        }
        Commands::League { action } => {
            let user = config.require_user()?;
            match action {
                LeagueCommand::Create { name, team_name } => {
                    let created = client.create_league(user, &name, &team_name).await?;
                    let message =
                        format!("✅ League {} created, entry {}", created.league_id, created.entry_id);
                    println!("{}", message.green());
                }
                LeagueCommand::Join { league_id, team_name } => {
                    let joined = client.join_league(user, LeagueId(league_id), &team_name).await?;
                    println!("{}", format!("✅ Joined as entry {}", joined.entry_id).green());
                }
            }
        }
        Commands::Gameweek { action: GameweekCommand::Create { gameweek, deadline } } => {
            let spec = match deadline {
                Some(deadline) => GameweekSpec::with_deadline(gameweek, deadline),
                None => GameweekSpec::new(gameweek),
            };
            client.create_gameweek(config.require_user()?, &spec).await?;
            println!(
                "{}",
                format!("✅ {} open until {}", spec.name, spec.deadline_at.to_rfc3339()).green()
            );
        }
        Commands::Stats { action: StatsCommand::Upload { gameweek, file } } => {
            let json = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("Failed to read stats {}", file.display()))?;
            let stats: Vec<PlayerStatLine> = serde_json::from_str(&json)
                .with_context(|| format!("Malformed stats {}", file.display()))?;
            client.upload_stats(config.require_user()?, gameweek, &stats).await?;
            println!("{}", format!("✅ Uploaded {} stat lines for {gameweek}", stats.len()).green());
        }
        Commands::Compute { gameweek } => {
            let report = client.compute_gameweek(gameweek).await?;
            println!("{}", format!("✅ {gameweek} scored").green());
            println!("{}", serde_json::to_string_pretty(&report.gw_points)?);
        }
    }

    Ok(())
}

fn parse_gameweek(value: &str) -> Result<Gameweek, String> {
    value
        .parse::<u32>()
        .ok()
        .and_then(Gameweek::new)
        .ok_or_else(|| format!("`{value}` is not a gameweek number"))
}

async fn load_catalog(
    path: Option<&Path>,
    gateway: &SubmissionGateway,
) -> anyhow::Result<PlayerCatalog> {
    match path {
        Some(path) => PlayerCatalog::load_from_file(path)
            .await
            .with_context(|| format!("Failed to load catalog {}", path.display())),
        None => Ok(gateway.refresh_catalog().await?),
    }
}

fn check_plan(
    plan: &RosterPlan,
    catalog: &PlayerCatalog,
    config: &GatewayConfig,
) -> anyhow::Result<()> {
    let squad = plan.build_squad(&config.rules);
    display::print_squad(&squad, catalog);
    let mut ready = squad.validate(catalog).is_valid();

    if plan.has_lineup() {
        println!();
        let lineup = plan.compose_lineup(&squad);
        display::print_lineup(&lineup, catalog);
        ready &= lineup.validate().is_valid();
    }

    if !ready {
        anyhow::bail!("Plan for {} is not ready to submit", plan.gameweek);
    }
    Ok(())
}

async fn submit_plan(
    gateway: &SubmissionGateway,
    user: UserId,
    plan: &RosterPlan,
    config: &GatewayConfig,
    squad_only: bool,
) -> anyhow::Result<()> {
    let catalog = gateway.refresh_catalog().await?;
    let mut squad = plan.build_squad(&config.rules);
    display::print_squad(&squad, &catalog);

    match gateway.submit_squad(user, &mut squad, &catalog).await {
        Ok(_) => println!("{}", format!("✅ Squad submitted for {}", plan.gameweek).green()),
        Err(e) => return Err(report_failure(e)),
    }

    if squad_only || !plan.has_lineup() {
        return Ok(());
    }

    println!();
    let mut lineup = plan.compose_lineup(&squad);
    display::print_lineup(&lineup, &catalog);
    match gateway.submit_lineup(user, &mut lineup).await {
        Ok(_) => println!("{}", format!("✅ Lineup submitted for {}", plan.gameweek).green()),
        Err(e) => return Err(report_failure(e)),
    }
    Ok(())
}

fn report_failure(error: GatewayError) -> anyhow::Error {
    if let GatewayError::Rejected { status, message } = &error {
        warn!("Service refused submission with status {}", status);
        println!("{}", format!("❌ {message}").red());
    }
    error.into()
}
