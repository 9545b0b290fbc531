//! CLI command definitions, routing, and tracing setup.

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use slicevote_api::ApiClient;
use slicevote_orders::OrdersApi;
use slicevote_shared::{
    ApiConfig, AppConfig, OrderKind, VoteModeKind, admin_token, config_file_path, init_config,
    load_config,
};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// SliceVote — team pizza ordering and voting from the terminal.
#[derive(Parser)]
#[command(
    name = "slicevote",
    version,
    about = "Browse teams and ingredients, inspect vote state, and manage order settings.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Team management.
    Team {
        #[command(subcommand)]
        action: TeamAction,
    },

    /// List all selectable pizza ingredients.
    Ingredients,

    /// List all predefined pizza templates.
    Templates,

    /// Show a team's vote mode and freeze state.
    Show {
        /// Team name.
        team: String,
    },

    /// Admin order settings (requires the admin bearer token).
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },

    /// Configuration management.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Team subcommands.
#[derive(Subcommand)]
pub(crate) enum TeamAction {
    /// List all registered teams.
    List,
    /// Register a new team.
    Create {
        /// Team name.
        name: String,
    },
    /// Delete a team.
    Delete {
        /// Team name.
        name: String,

        /// Admin bearer token (falls back to the configured env var).
        #[arg(long)]
        token: Option<String>,
    },
}

/// Admin subcommands.
#[derive(Subcommand)]
pub(crate) enum AdminAction {
    /// Show the current order settings.
    Show {
        /// Admin bearer token (falls back to the configured env var).
        #[arg(long)]
        token: Option<String>,
    },
    /// Change order settings. Only the given flags are written.
    Set {
        /// Admin bearer token (falls back to the configured env var).
        #[arg(long)]
        token: Option<String>,

        /// Order size (people or pieces, see --kind).
        #[arg(long)]
        size: Option<u32>,

        /// Order size unit: persons or pizzaPieces.
        #[arg(long)]
        kind: Option<String>,

        /// Number of vegetarian portions.
        #[arg(long)]
        vegetarian: Option<u32>,

        /// Number of pork-free portions.
        #[arg(long)]
        no_pork: Option<u32>,

        /// Vote mode: std or registration.
        #[arg(long)]
        mode: Option<String>,

        /// Freeze (true) or unfreeze (false) the order.
        #[arg(long)]
        freeze: Option<bool>,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Create a default config file.
    Init,
    /// Print the active configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "slicevote=info",
        1 => "slicevote=debug",
        _ => "slicevote=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Team { action } => match action {
            TeamAction::List => cmd_team_list().await,
            TeamAction::Create { name } => cmd_team_create(&name).await,
            TeamAction::Delete { name, token } => cmd_team_delete(&name, token).await,
        },
        Command::Ingredients => cmd_ingredients().await,
        Command::Templates => cmd_templates().await,
        Command::Show { team } => cmd_show(&team).await,
        Command::Admin { action } => match action {
            AdminAction::Show { token } => cmd_admin_show(token).await,
            AdminAction::Set {
                token,
                size,
                kind,
                vegetarian,
                no_pork,
                mode,
                freeze,
            } => cmd_admin_set(token, size, kind, vegetarian, no_pork, mode, freeze).await,
        },
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(),
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build the high-level API from the loaded config.
fn build_api(config: &AppConfig) -> Result<OrdersApi> {
    let api_config = ApiConfig::try_from(config)?;
    let client = ApiClient::new(api_config)?;
    Ok(OrdersApi::new(client))
}

/// Resolve the admin token from the flag or the configured env var.
fn resolve_token(config: &AppConfig, flag: Option<String>) -> Result<String> {
    flag.or_else(|| admin_token(config)).ok_or_else(|| {
        eyre!(
            "no admin token: pass --token or set the {} environment variable",
            config.api.token_env
        )
    })
}

fn parse_kind(raw: &str) -> Result<OrderKind> {
    match raw {
        "persons" => Ok(OrderKind::Persons),
        "pizzaPieces" => Ok(OrderKind::PizzaPieces),
        other => Err(eyre!("unknown order kind {other:?} (persons | pizzaPieces)")),
    }
}

fn parse_mode(raw: &str) -> Result<VoteModeKind> {
    match raw {
        "std" => Ok(VoteModeKind::Std),
        "registration" => Ok(VoteModeKind::Registration),
        other => Err(eyre!("unknown vote mode {other:?} (std | registration)")),
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_team_list() -> Result<()> {
    let api = build_api(&load_config()?)?;
    let teams = api.list_teams().await?;

    if teams.is_empty() {
        println!("No teams registered.");
        return Ok(());
    }
    for team in teams {
        println!("{}", team.name);
    }
    Ok(())
}

async fn cmd_team_create(name: &str) -> Result<()> {
    let api = build_api(&load_config()?)?;
    let created = api.create_team(name).await?;

    match created {
        Some(team) => println!("Created team {}", team.name),
        None => println!("Created team {name}"),
    }
    Ok(())
}

async fn cmd_team_delete(name: &str, token: Option<String>) -> Result<()> {
    let config = load_config()?;
    let token = resolve_token(&config, token)?;
    let api = build_api(&config)?;

    let teams = api.list_teams().await?;
    let team = teams
        .into_iter()
        .find(|t| t.name == name)
        .ok_or_else(|| eyre!("no team named {name:?}"))?;

    api.delete_team(&team, &token).await?;
    info!(team = name, "team deleted");
    Ok(())
}

async fn cmd_ingredients() -> Result<()> {
    let api = build_api(&load_config()?)?;
    for ingredient in api.get_ingredients().await? {
        println!("{}", ingredient.name);
    }
    Ok(())
}

async fn cmd_templates() -> Result<()> {
    let api = build_api(&load_config()?)?;
    for template in api.get_templates().await? {
        println!("{}", template.name);
    }
    Ok(())
}

async fn cmd_show(team: &str) -> Result<()> {
    let api = build_api(&load_config()?)?;

    let (mode, freeze) = tokio::join!(api.get_vote_mode(team), api.get_freeze(team));
    let mode = mode?;
    let freeze = freeze?;

    println!("team:      {team}");
    println!("vote mode: {}", mode.vote_mode);
    println!("frozen:    {}", freeze.freeze);
    Ok(())
}

async fn cmd_admin_show(token: Option<String>) -> Result<()> {
    let config = load_config()?;
    let token = resolve_token(&config, token)?;
    let api = build_api(&config)?;

    let (size, kind, vegetarian, pork) = tokio::join!(
        api.get_size(&token),
        api.get_order_type(&token),
        api.get_vegetarian(&token),
        api.get_pork(&token),
    );

    println!("size:       {}", size?.size);
    println!("kind:       {}", kind?.kind);
    println!("vegetarian: {}", vegetarian?.vegetarian);
    println!("no pork:    {}", pork?.no_pork);
    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn cmd_admin_set(
    token: Option<String>,
    size: Option<u32>,
    kind: Option<String>,
    vegetarian: Option<u32>,
    no_pork: Option<u32>,
    mode: Option<String>,
    freeze: Option<bool>,
) -> Result<()> {
    let config = load_config()?;
    let token = resolve_token(&config, token)?;
    let api = build_api(&config)?;

    let mut changed = false;

    if let Some(size) = size {
        api.patch_size(&token, size).await?;
        changed = true;
    }
    if let Some(kind) = kind {
        api.patch_order_type(&token, parse_kind(&kind)?).await?;
        changed = true;
    }
    if let Some(vegetarian) = vegetarian {
        api.patch_vegetarian(&token, vegetarian).await?;
        changed = true;
    }
    if let Some(no_pork) = no_pork {
        api.patch_pork(&token, no_pork).await?;
        changed = true;
    }
    if let Some(mode) = mode {
        api.patch_vote_mode(&token, parse_mode(&mode)?).await?;
        changed = true;
    }
    if let Some(freeze) = freeze {
        api.patch_freeze(&token, freeze).await?;
        changed = true;
    }

    if !changed {
        return Err(eyre!("nothing to set: pass at least one of --size, --kind, --vegetarian, --no-pork, --mode, --freeze"));
    }
    info!("order settings updated");
    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config = load_config()?;
    println!("config file: {}", config_file_path()?.display());
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_kind_accepts_wire_names() {
        assert_eq!(parse_kind("persons").unwrap(), OrderKind::Persons);
        assert_eq!(parse_kind("pizzaPieces").unwrap(), OrderKind::PizzaPieces);
        assert!(parse_kind("slices").is_err());
    }

    #[test]
    fn parse_mode_accepts_wire_names() {
        assert_eq!(parse_mode("std").unwrap(), VoteModeKind::Std);
        assert_eq!(
            parse_mode("registration").unwrap(),
            VoteModeKind::Registration
        );
        assert!(parse_mode("open").is_err());
    }
}
