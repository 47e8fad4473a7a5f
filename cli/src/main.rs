use clap::{Parser, Subcommand, ValueEnum};
use discfx_cli::commands;
use discfx_cli::readline;
use discfx_cli::state::AppState;
use discfx_core::{Hand, Settings};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing_subscriber::filter::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Music disc effect engine")]
struct Args {
    /// Settings file (defaults to the platform config location)
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Trigger file, overriding the one named in the settings
    #[arg(long)]
    config: Option<PathBuf>,
}

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    // If DISCFX_LOG_PATH is set, append to that file so REPL output stays clean
    if let Ok(path) = std::env::var("DISCFX_LOG_PATH")
        && let Ok(file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
    {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_ansi(false)
            .with_writer(file)
            .init();
        return;
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), String> {
    init_logging();
    let args = Args::parse();

    let mut settings = match &args.settings {
        Some(path) => Settings::load_path(path),
        None => Settings::load(),
    }
    .map_err(|e| e.to_string())?;
    if let Some(config) = args.config {
        settings.config_path = Some(config);
    }

    let state = AppState::new(settings).map_err(|e| e.to_string())?;
    let state = Arc::new(RwLock::new(state));

    loop {
        let line = readline()?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, Arc::clone(&state)).await {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                write!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
        }
    }

    Ok(())
}

#[derive(Parser)]
#[command(about = "discfx commands")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, ValueEnum)]
enum HandArg {
    Main,
    Off,
}

impl From<HandArg> for Hand {
    fn from(hand: HandArg) -> Self {
        match hand {
            HandArg::Main => Hand::Main,
            HandArg::Off => Hand::Off,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Re-read the trigger file
    Reload,
    /// Show configured disc effects
    List {
        #[arg(long)]
        json: bool,
    },
    /// Configure a disc: set <disc> <effect|NONE> <level> [infinite]
    Set {
        disc: String,
        effect: String,
        #[arg(allow_hyphen_values = true)]
        level: String,
        infinite: Option<String>,
    },
    /// Remove a disc's effect
    Clear { disc: String },
    Join { name: String },
    Leave { name: String },
    /// Put an item (or `empty`) in a player's hand
    Hold {
        name: String,
        #[arg(value_enum)]
        hand: HandArg,
        item: String,
    },
    /// Apply an effect from outside the engine
    Grant {
        name: String,
        effect: String,
        level: u8,
        ticks: u32,
    },
    Status { name: Option<String> },
    /// Run scheduler passes without waiting
    Tick {
        #[arg(default_value_t = 1)]
        count: u32,
    },
    /// Drive the scheduler in real time
    Run { seconds: u64 },
    Config,
    Exit,
}

async fn respond(line: &str, state: Arc<RwLock<AppState>>) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting\n")?;
    args.insert(0, "discfx".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match cli.command {
        Some(Commands::Reload) => commands::reload(state).await?,
        Some(Commands::List { json }) => commands::list(state, json).await?,
        Some(Commands::Set {
            disc,
            effect,
            level,
            infinite,
        }) => commands::set_trigger(state, &disc, &effect, &level, infinite.as_deref()).await?,
        Some(Commands::Clear { disc }) => commands::clear_trigger(state, &disc).await?,
        Some(Commands::Join { name }) => commands::join(state, &name).await?,
        Some(Commands::Leave { name }) => commands::leave(state, &name).await?,
        Some(Commands::Hold { name, hand, item }) => {
            commands::hold(state, &name, hand.into(), &item).await?
        }
        Some(Commands::Grant {
            name,
            effect,
            level,
            ticks,
        }) => commands::grant(state, &name, &effect, level, ticks).await?,
        Some(Commands::Status { name }) => commands::status(state, name.as_deref()).await?,
        Some(Commands::Tick { count }) => commands::tick(state, count).await?,
        Some(Commands::Run { seconds }) => commands::run(state, seconds).await?,
        Some(Commands::Config) => commands::show_settings(state).await?,
        Some(Commands::Exit) => {
            commands::exit();
            return Ok(true);
        }
        None => {}
    }
    Ok(false)
}
