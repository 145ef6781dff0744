//! bktrigger - trigger a Buildkite build and optionally wait for it.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use bktrigger_client::{BuildkiteClient, DEFAULT_BASE_URL};
use bktrigger_core::{validate_required, Build, BuildRequest, Validation};
use bktrigger_step::{BuildkiteStep, ConsoleSink, CredentialStore, EnvCredentialStore};

mod config;
mod host;

use config::{Config, DEFAULT_CREDENTIALS_ID};
use host::CliHost;

/// bktrigger - Buildkite build trigger
#[derive(Parser)]
#[command(name = "bktrigger")]
#[command(about = "Trigger Buildkite builds and wait for them", long_about = None)]
struct Cli {
    /// Buildkite API host
    #[arg(long, env = "BUILDKITE_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Environment variable holding the API token
    #[arg(long, env = "BKTRIGGER_CREDENTIALS_ID", default_value = DEFAULT_CREDENTIALS_ID)]
    credentials_id: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a build, then wait for it unless --async is given
    Trigger {
        /// Organization slug
        #[arg(short, long)]
        organization: String,

        /// Pipeline slug
        #[arg(short, long)]
        pipeline: String,

        /// Branch to build (default: main)
        #[arg(short, long)]
        branch: Option<String>,

        /// Commit to build (default: HEAD)
        #[arg(short, long)]
        commit: Option<String>,

        /// Build message (default: derived from --display-name)
        #[arg(short, long)]
        message: Option<String>,

        /// Return as soon as the build is created
        #[arg(long = "async")]
        async_mode: bool,

        /// Name of the invoking job, used in the default message
        #[arg(long, env = "BKTRIGGER_DISPLAY_NAME")]
        display_name: Option<String>,

        /// Stop waiting once this file exists
        #[arg(long)]
        stop_file: Option<PathBuf>,

        /// Delay before the first status check, in milliseconds
        #[arg(long, default_value = "2000")]
        initial_delay_ms: u64,

        /// Delay between status checks, in milliseconds
        #[arg(long, default_value = "7000")]
        poll_interval_ms: u64,
    },

    /// Check that the API token is accepted
    #[command(name = "test-connection")]
    TestConnection,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries progress lines
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let config = Config {
        base_url: cli.base_url,
        credentials_id: cli.credentials_id,
        ..Config::default()
    };
    config.check()?;

    match cli.command {
        Commands::Trigger {
            organization,
            pipeline,
            branch,
            commit,
            message,
            async_mode,
            display_name,
            stop_file,
            initial_delay_ms,
            poll_interval_ms,
        } => {
            for (field, value) in [("Organization", &organization), ("Pipeline", &pipeline)] {
                if let Validation::Error(msg) = validate_required(field, value) {
                    return Err(msg.into());
                }
            }

            let request = BuildRequest::builder(organization, pipeline)
                .branch(branch.unwrap_or_default())
                .commit(commit.unwrap_or_default())
                .message(message.unwrap_or_default())
                .async_mode(async_mode)
                .build();
            let config = config.with_poll_millis(initial_delay_ms, poll_interval_ms);
            let host = CliHost::new(display_name, stop_file);

            trigger(config, request, host).await?;
        }
        Commands::TestConnection => {
            test_connection(config).await?;
        }
    }

    Ok(())
}

async fn trigger(
    config: Config,
    request: BuildRequest,
    host: CliHost,
) -> Result<(), Box<dyn std::error::Error>> {
    let cancel = CancellationToken::new();

    // Ctrl-C ends the wait
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupt received, cancelling wait");
            ctrl_c.cancel();
        }
    });

    let step = BuildkiteStep::new(&config.base_url, &config.credentials_id)
        .with_settings(config.poll);
    let sink = ConsoleSink::stdout();

    match step
        .run(request, &EnvCredentialStore, &host, &sink, &cancel)
        .await
    {
        Ok(build) => {
            print_build(&build);
            Ok(())
        }
        Err(e) => {
            error!(error = %e, cancelled = e.is_cancelled(), "Build step failed");
            Err(e.into())
        }
    }
}

async fn test_connection(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let token = EnvCredentialStore
        .lookup(&config.credentials_id)
        .ok_or_else(|| format!("API key not found in {}", config.credentials_id))?;

    let client = BuildkiteClient::new(&config.base_url, token)?;
    match client.test_connection().await {
        Ok(()) => {
            println!("Connection successful");
            Ok(())
        }
        Err(e) => {
            println!("Connection failed: {}", e);
            Err(e.into())
        }
    }
}

fn print_build(build: &Build) {
    println!("Build:");
    println!("  ID:         {}", build.id);
    println!("  Number:     {}", build.number);
    println!("  State:      {}", build.state);
    println!("  Branch:     {}", build.branch);
    println!("  Commit:     {}", build.commit);
    println!("  URL:        {}", build.web_url);
}
