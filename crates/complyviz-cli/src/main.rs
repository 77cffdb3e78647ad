use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use complyviz_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "complyviz")]
#[command(author, version, about = "Animated compliance dashboard for the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive dashboard
    Run,
    /// Print the frame-by-frame value timeline of one dashboard panel
    Trace {
        /// Panel id (frameworks, controls, risk, maturity, incident, response)
        widget: String,
        /// Frame step in milliseconds
        #[arg(long, default_value_t = 16)]
        step_ms: u64,
        /// Print every Nth frame only
        #[arg(long, default_value_t = 1)]
        every: usize,
    },
    /// Sign in and store the session token
    Login {
        #[arg(short, long)]
        email: String,
        /// Password; prompted for when not given
        #[arg(long, env = "COMPLYVIZ_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Sign out and forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// List assessment questions with their answers
    Questions {
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Answer an assessment question
    Answer {
        question_id: String,
        value: String,
        #[arg(short, long)]
        comment: Option<String>,
    },
    /// Organization registry lookup
    Org {
        #[command(subcommand)]
        action: OrgAction,
    },
}

#[derive(Subcommand)]
enum OrgAction {
    /// Search organizations by name
    Search { query: String },
    /// Show one organization by its nine-digit number
    Get { org_number: String },
}

/// Install the global subscriber; the dashboard logs to a file so output
/// does not tear the alternate screen
fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    if to_file {
        let path = config.log_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::load()?;

    let interactive = matches!(cli.command, Some(Commands::Run) | None);
    init_logging(&config, interactive)?;

    // Handle commands
    match cli.command {
        Some(Commands::Run) | None => commands::run::run(config).await,
        Some(Commands::Trace {
            widget,
            step_ms,
            every,
        }) => commands::trace::run(&config, &widget, step_ms, every),
        Some(Commands::Login { email, password }) => {
            commands::auth::login(&config, &email, password).await
        }
        Some(Commands::Logout) => commands::auth::logout(&config).await,
        Some(Commands::Whoami) => commands::auth::whoami(&config).await,
        Some(Commands::Questions { category }) => {
            commands::questions::run(&config, category.as_deref()).await
        }
        Some(Commands::Answer {
            question_id,
            value,
            comment,
        }) => commands::answer::run(&config, &question_id, &value, comment).await,
        Some(Commands::Org { action }) => match action {
            OrgAction::Search { query } => commands::org::search(&config, &query).await,
            OrgAction::Get { org_number } => commands::org::get(&config, &org_number).await,
        },
    }
}
