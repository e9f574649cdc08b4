//! Minerva Inspector CLI
//!
//! Runs the handlers the way the pipeline host does: one attribute or report
//! per invocation, read as JSON, with the result written to stdout.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use minerva_core::{Attribute, Report};
use minerva_handlers::{
    EmitHandler, InspectHandler, InspectorConfig, Invocation, ReportEmitter, SearchInspector,
};
use minerva_secrets::AwsSecretStore;

#[derive(Parser)]
#[command(name = "minerva-inspector")]
#[command(author, version, about = "Minerva Inspector: link alert attributes to log searches", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity level (0-3), overridden by RUST_LOG
    #[arg(short, long, default_value = "1", global = true)]
    verbose: u8,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    /// Queue the host publishes report contents to
    #[arg(long, env = "CONTENT_QUEUE", global = true)]
    content_queue: Option<String>,

    /// Queue the host publishes new attributes to
    #[arg(long, env = "ATTRIBUTE_QUEUE", global = true)]
    attribute_queue: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect one attribute and print the task result
    Inspect {
        /// Attribute JSON file (default: stdin)
        #[arg(short, long)]
        attr: Option<PathBuf>,

        /// ARN of the secret holding the Minerva key and endpoints
        #[arg(long, env = "SECRET_ARN")]
        secret_arn: String,
    },

    /// Hand one finished report to the emitter
    Emit {
        /// Report JSON file (default: stdin)
        #[arg(short, long)]
        report: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);

    debug!(
        content_queue = cli.content_queue.as_deref().unwrap_or(""),
        attribute_queue = cli.attribute_queue.as_deref().unwrap_or(""),
        "Host queues"
    );

    match cli.command {
        Commands::Inspect { attr, secret_arn } => {
            run_inspect(attr, &secret_arn).await?;
        }
        Commands::Emit { report } => {
            run_emit(report).await?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8, json: bool) {
    let level = match verbose {
        0 => "error",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let builder = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.compact().init();
    }
}

fn read_input(path: Option<PathBuf>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

async fn run_inspect(path: Option<PathBuf>, secret_arn: &str) -> Result<()> {
    let attr: Attribute = serde_json::from_str(&read_input(path)?)
        .context("Failed to parse attribute JSON")?;

    let handler = SearchInspector::new(
        InspectorConfig::default().with_secret_arn(secret_arn),
        Arc::new(AwsSecretStore::new()),
    );
    let ctx = Invocation::new();
    info!(invocation = ctx.id(), author = handler.author(), "Inspecting {} attribute", attr.attr_type);

    let result = handler
        .inspect(&ctx, &attr)
        .await
        .with_context(|| format!("Inspection of {} failed", attr.value))?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

async fn run_emit(path: Option<PathBuf>) -> Result<()> {
    let report: Report =
        serde_json::from_str(&read_input(path)?).context("Failed to parse report JSON")?;

    let handler = ReportEmitter::new();
    let ctx = Invocation::new();
    info!(invocation = ctx.id(), author = handler.author(), "Emitting report {}", report.id);

    handler
        .emit(&ctx, &report)
        .await
        .with_context(|| format!("Emitting report {} failed", report.id))?;

    Ok(())
}
