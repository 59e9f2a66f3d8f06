//! Main entry point for the Postboard CLI.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use shared::config::ClientConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod storage;

use commands::Session;
use commands::posts::{CreateArgs, UpdateArgs};
use commands::session::{LoginArgs, SignupArgs};

/// Postboard CLI
#[derive(Parser, Debug)]
#[command(name = "postboard")]
#[command(about = "Command-line client for Postboard", long_about = None)]
struct Cli {
    /// Path to a `.toml` or `.json` configuration file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Where the signed-in profile is kept (defaults to the user data directory)
    #[arg(long, global = true, env = "POSTBOARD_PROFILE")]
    profile: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Subcommands for the Postboard CLI
#[derive(Subcommand, Debug)]
enum Commands {
    /// List every post on the board
    List,
    /// Publish a new post
    Create(CreateArgs),
    /// Edit one of your posts
    Update(UpdateArgs),
    /// Delete one of your posts
    Delete {
        /// Id of the post to delete
        id: String,
    },
    /// Like a post
    Like {
        /// Id of the post to like
        id: String,
    },
    /// Sign in and remember the session
    Login(LoginArgs),
    /// Create an account and sign in
    Signup(SignupArgs),
    /// Forget the stored session
    Logout,
    /// Show who is signed in
    Whoami,
    /// Print the resolved configuration as TOML
    Config,
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();

    let config = ClientConfig::load_config(cli.config.as_deref())
        .context("failed to load configuration")?;
    init_tracing(&config.log_level);

    let session = Session::open(config, cli.profile)?;
    match cli.command {
        Commands::List => commands::posts::list(&session).await?,
        Commands::Create(args) => commands::posts::create(&session, args).await?,
        Commands::Update(args) => commands::posts::update(&session, args).await?,
        Commands::Delete { id } => commands::posts::delete(&session, id).await?,
        Commands::Like { id } => commands::posts::like(&session, id).await?,
        Commands::Login(args) => commands::session::login(&session, args).await?,
        Commands::Signup(args) => commands::session::signup(&session, args).await?,
        Commands::Logout => commands::session::logout(&session),
        Commands::Whoami => commands::session::whoami(&session),
        Commands::Config => commands::config::print_config(&session.config)?,
    }

    Ok(())
}
