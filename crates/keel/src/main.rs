use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use keel::commands::{run_id, run_user, Command};
use keel::config::Config;
use keel::state::AppState;

/// keel - users behind a cache-aside repository
#[derive(Parser, Debug)]
#[command(name = "keel")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text, env = "LOG_FORMAT")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    init_tracing(cli.log_format);

    let mut stdout = std::io::stdout();
    let result = match cli.command {
        Command::Id(args) => run_id(&args, &mut stdout),
        Command::User(command) => {
            let config = Config::from_env();
            let state = AppState::new(&config).await?;
            run_user(state.users.as_ref(), command, &mut stdout).await
        }
    };

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            tracing::debug!(error = ?err, "Command failed");
            eprintln!("keel: {}", err.report());
            Ok(ExitCode::from(err.exit_code()))
        }
    }
}

/// Logs go to stderr so command output on stdout stays machine-readable.
fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "keel=info".into());

    let json = (format == LogFormat::Json).then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
    });
    let text = (format == LogFormat::Text)
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(text)
        .init();
}
