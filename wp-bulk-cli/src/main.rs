mod commands;
mod progress;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wp_bulk_core::config::{
    timeout_from_secs, DEFAULT_BATCH_SIZE, DEFAULT_ENDPOINT, DEFAULT_POOL_SIZE,
    DEFAULT_TIMEOUT_SECS,
};
use wp_bulk_core::{Credentials, RunConfig};

#[derive(Parser)]
#[command(name = "wp-bulk")]
#[command(about = "Bulk WordPress maintenance over the REST API", long_about = None)]
struct Cli {
    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Permanently delete every record listed in a JSONL file
    Delete {
        /// JSONL file with an `id` field per line (.gz supported)
        #[arg(short, long, env = "WP_INPUT_FILE")]
        input: PathBuf,

        /// Status file to write (.gz compresses); defaults to a temp file
        #[arg(short, long, env = "WP_STATUS_FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        api: ApiArgs,
    },

    /// Look up record ids for the slugs listed in a JSONL file
    Resolve {
        /// JSONL file with a `slug` field per line (.gz supported)
        input: PathBuf,

        /// JSONL file to write `{"slug", "id"}` records to (.gz compresses)
        output: PathBuf,

        #[command(flatten)]
        api: ApiArgs,
    },
}

#[derive(Args)]
struct ApiArgs {
    /// WordPress REST collection endpoint
    #[arg(long, env = "WP_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Basic-auth username
    #[arg(long, env = "WP_USERNAME")]
    username: Option<String>,

    /// Basic-auth (application) password
    #[arg(long, env = "WP_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Maximum number of requests in flight
    #[arg(long, env = "WP_POOL_SIZE", default_value_t = DEFAULT_POOL_SIZE)]
    pool_size: usize,

    /// Records submitted per batch
    #[arg(long, env = "WP_BATCH_SIZE", default_value_t = DEFAULT_BATCH_SIZE)]
    batch_size: usize,

    /// Per-request timeout in seconds
    #[arg(long, env = "WP_TIMEOUT_SEC", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: f64,
}

impl ApiArgs {
    fn into_config(self, input: PathBuf, output: Option<PathBuf>) -> Result<RunConfig> {
        let credentials = match (self.username, self.password) {
            (Some(username), password) => {
                Some(Credentials::new(username, password.unwrap_or_default()))
            }
            (None, Some(_)) => anyhow::bail!("A password was given without a username"),
            (None, None) => None,
        };

        let mut config = RunConfig::new(&self.endpoint, input)?
            .with_credentials(credentials)
            .with_pool_size(self.pool_size)
            .with_batch_size(self.batch_size)
            .with_timeout(timeout_from_secs(self.timeout_secs)?);

        if let Some(output) = output {
            config = config.with_output_path(output);
        }

        config.validate()?;
        Ok(config)
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

/// Load `.env`, or the file named by `WP_ENV_FILE` when it is set
fn load_env_file() -> Result<Option<PathBuf>> {
    match std::env::var_os("WP_ENV_FILE") {
        Some(path) => {
            let path = PathBuf::from(path);
            dotenvy::from_path(&path)
                .with_context(|| format!("Failed to load environment file {}", path.display()))?;
            Ok(Some(path))
        }
        None => Ok(dotenvy::dotenv().ok()),
    }
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "wp_bulk_cli=info,wp_bulk_core=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Delete { input, output, api } => {
            commands::delete::execute(api.into_config(input, output)?).await?;
        }
        Commands::Resolve { input, output, api } => {
            commands::resolve::execute(api.into_config(input, Some(output))?).await?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Must run before parsing so clap sees the variables
    let env_file = load_env_file();
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    match env_file {
        Ok(Some(path)) => tracing::debug!("Loaded environment from {}", path.display()),
        Ok(None) => {}
        Err(e) => {
            tracing::error!("{:?}", e);
            return ExitCode::FAILURE;
        }
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:?}", e);
            ExitCode::FAILURE
        }
    }
}
