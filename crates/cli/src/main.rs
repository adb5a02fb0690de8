//! gpuscope CLI
//!
//! A command-line tool for inspecting GPU capacity and usage of a
//! Kubernetes LLM serving cluster: per-namespace and per-workload usage
//! tables, node capacity, a plain-text report, and a one-shot inference
//! endpoint probe.

mod client;
mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{endpoint, nodes, report, usage, workloads};
use gpuscope_lib::report::DEFAULT_BAR_WIDTH;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// GPU usage inspector for Kubernetes clusters
#[derive(Parser)]
#[command(name = "gpuscope")]
#[command(author, version, about = "Inspect GPU capacity and usage of a Kubernetes cluster", long_about = None)]
pub struct Cli {
    /// Path to kubeconfig file (uses default discovery if not specified)
    #[arg(long, env = "KUBECONFIG")]
    pub kubeconfig: Option<String>,

    /// Output format
    #[arg(long, short, default_value = "table")]
    pub format: output::OutputFormat,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the GPU usage dashboard (namespaces, totals, utilization bar)
    Usage {
        /// Restrict the view to one namespace
        #[arg(long, short)]
        namespace: Option<String>,

        /// Width of the utilization bar in glyphs
        #[arg(long)]
        bar_width: Option<usize>,
    },

    /// Show GPU usage grouped by logical workload
    Workloads {
        /// Restrict the view to one namespace
        #[arg(long, short)]
        namespace: Option<String>,
    },

    /// Show advertised GPU capacity per node
    Nodes,

    /// Render the plain-text usage report
    Report {
        /// Write the report to a file instead of stdout
        #[arg(long, short)]
        output: Option<String>,

        /// Width of the utilization bar in glyphs
        #[arg(long)]
        bar_width: Option<usize>,
    },

    /// Inference endpoint checks
    #[command(subcommand)]
    Endpoint(EndpointCommands),
}

#[derive(Subcommand)]
pub enum EndpointCommands {
    /// Probe an OpenAI-compatible inference endpoint once
    Check {
        /// Base URL of the endpoint
        #[arg(long, env = "GPUSCOPE_ENDPOINT", default_value = "http://localhost:8000")]
        url: String,

        /// Also send one small chat completion to this model
        #[arg(long, short)]
        model: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so table output stays pipeable.
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let file_config = config::Config::load().unwrap_or_default();

    match cli.command {
        Commands::Usage {
            namespace,
            bar_width,
        } => {
            let inventory = config::make_inventory(cli.kubeconfig.as_deref()).await?;
            let namespace = namespace.or(file_config.default_namespace);
            let bar_width = bar_width
                .or(file_config.bar_width)
                .unwrap_or(DEFAULT_BAR_WIDTH);
            usage::show_usage(&inventory, namespace, bar_width, cli.format).await?;
        }
        Commands::Workloads { namespace } => {
            let inventory = config::make_inventory(cli.kubeconfig.as_deref()).await?;
            let namespace = namespace.or(file_config.default_namespace);
            workloads::show_workloads(&inventory, namespace, cli.format).await?;
        }
        Commands::Nodes => {
            let inventory = config::make_inventory(cli.kubeconfig.as_deref()).await?;
            nodes::show_nodes(&inventory, cli.format).await?;
        }
        Commands::Report { output, bar_width } => {
            let inventory = config::make_inventory(cli.kubeconfig.as_deref()).await?;
            let bar_width = bar_width
                .or(file_config.bar_width)
                .unwrap_or(DEFAULT_BAR_WIDTH);
            report::run_report(&inventory, bar_width, output, cli.format).await?;
        }
        Commands::Endpoint(endpoint_cmd) => match endpoint_cmd {
            EndpointCommands::Check { url, model } => {
                let client = client::InferenceClient::new(&url)?;
                endpoint::check(&client, model.as_deref(), cli.format).await?;
            }
        },
    }

    Ok(())
}
