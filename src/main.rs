//! wsboot - WebSocket endpoint bootstrap
//!
//! Main entry point for the wsboot CLI.

mod bootstrap;
mod cli;
mod report;

use std::path::Path;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use wsboot_config::{Config, ConfigValidator, LoggingConfig, ScanManifest};
use wsboot_core::{EndpointContainer, HostContext, Initializer};

use crate::cli::{Cli, Commands};

/// Keeps the file writer flushing until exit.
static GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Initialize tracing with console output and, when a log directory is
/// configured, a daily rolling file.
fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let file_layer = match &logging.dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir))?;

            // Daily rotation, keeping a month of files
            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("wsboot")
                .filename_suffix("log")
                .max_log_files(30)
                .build(dir)?;
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let _ = GUARD.set(guard);

            let layer = if logging.json {
                fmt::layer()
                    .json()
                    .with_writer(non_blocking)
                    .with_ansi(false)
                    .boxed()
            } else {
                fmt::layer()
                    .with_writer(non_blocking)
                    .with_ansi(false)
                    .boxed()
            };
            Some(layer)
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(file_layer)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = bootstrap::load_config(cli.config.as_deref())?;
    init_tracing(&config.logging)?;

    match cli.command {
        Commands::Deploy {
            manifest,
            context_path,
            format,
            wait,
        } => deploy(config, &manifest, context_path, &format, wait).await,
        Commands::Plan { manifest, format } => plan(&config, &manifest, &format),
        Commands::CheckConfig => check_config(&config),
    }
}

/// Deploy a manifest into a fresh container, then stop the host.
async fn deploy(
    mut config: Config,
    manifest_path: &Path,
    context_path: Option<String>,
    format: &str,
    wait: bool,
) -> anyhow::Result<()> {
    if let Some(context_path) = context_path {
        config.server.context_path = context_path;
    }
    validate(&config)?;
    let manifest = load_manifest(manifest_path)?;

    info!("Starting wsboot v{}", env!("CARGO_PKG_VERSION"));

    let container = Arc::new(EndpointContainer::new());
    let host = HostContext::new(config.server.context_path.as_str())
        .with_shutdown_timeout(Duration::from_secs(config.server.shutdown_timeout_secs));
    let classifier = bootstrap::classifier(&config);
    let initializer = Initializer::for_container(
        Arc::new(bootstrap::class_loader(&manifest, &classifier)),
        container.clone(),
    )
    .with_classifier(classifier);

    let candidates = manifest.candidates();
    let report = initializer
        .on_startup(Some(candidates.as_slice()), &host)
        .context("Endpoint deployment failed")?;

    host.start().await?;
    println!("{}", report::render_deployment(&report, &container.list(), format)?);

    if wait {
        info!("Host running, press Ctrl-C to stop");
        tokio::signal::ctrl_c().await?;
        info!("Received Ctrl-C, shutting down...");
    }

    host.stop().await?;
    Ok(())
}

/// Print what a manifest would deploy.
fn plan(config: &Config, manifest_path: &Path, format: &str) -> anyhow::Result<()> {
    validate(config)?;
    let manifest = load_manifest(manifest_path)?;

    let classifier = bootstrap::classifier(config);
    let initializer = Initializer::for_container(
        Arc::new(bootstrap::class_loader(&manifest, &classifier)),
        Arc::new(EndpointContainer::new()),
    )
    .with_classifier(classifier);

    let plan = initializer.plan(&manifest.candidates())?;
    println!("{}", report::render_plan(&plan, format)?);
    Ok(())
}

fn check_config(config: &Config) -> anyhow::Result<()> {
    let result = ConfigValidator::validate(config);
    for warning in &result.warnings {
        println!("warning: {}", warning);
    }
    for error in &result.errors {
        println!("error: {}", error);
    }

    if !result.is_valid() {
        anyhow::bail!("Configuration has {} errors", result.errors.len());
    }
    println!("Configuration OK");
    Ok(())
}

fn validate(config: &Config) -> anyhow::Result<()> {
    let warnings = ConfigValidator::validate(config)
        .into_result()
        .context("Invalid configuration")?;
    for warning in warnings {
        warn!("{}", warning);
    }
    Ok(())
}

fn load_manifest(path: &Path) -> anyhow::Result<ScanManifest> {
    ScanManifest::load(path).with_context(|| format!("Failed to load manifest {}", path.display()))
}
