//! Cluster GPU usage dashboard

use anyhow::Result;
use colored::Colorize;
use gpuscope_lib::aggregate::aggregate;
use gpuscope_lib::inventory::ClusterInventory;
use gpuscope_lib::report::render_bar;
use tabled::Tabled;

use crate::output::{
    color_utilization, colorize_by_utilization, format_phase_counts, print_warning, OutputFormat,
};

/// Row for the per-namespace usage table
#[derive(Tabled)]
struct NamespaceRow {
    #[tabled(rename = "Namespace")]
    namespace: String,
    #[tabled(rename = "Running GPUs")]
    running: u64,
    #[tabled(rename = "Requested GPUs")]
    requested: u64,
    #[tabled(rename = "Pods")]
    pods: u64,
    #[tabled(rename = "R/P/F")]
    phases: String,
}

/// Show the usage dashboard: namespace table, cluster totals, utilization bar
pub async fn show_usage(
    inventory: &impl ClusterInventory,
    namespace: Option<String>,
    bar_width: usize,
    format: OutputFormat,
) -> Result<()> {
    let (mut claims, capacity) = tokio::try_join!(
        inventory.list_gpu_claims(),
        inventory.list_node_gpu_capacity()
    )?;
    if let Some(ns) = &namespace {
        claims.retain(|c| &c.namespace == ns);
    }

    let outcome = aggregate(&claims, &capacity);

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&outcome)?;
            println!("{}", json);
        }
        OutputFormat::Table => {
            println!("{}", "GPU Usage".bold());
            println!("{}", "=".repeat(60));
            match &namespace {
                Some(ns) => println!("Scope:        {}", ns.cyan()),
                None => println!("Scope:        {}", "Cluster-wide".cyan()),
            }
            println!();

            if outcome.namespaces.is_empty() {
                print_warning("No GPU claims found");
            } else {
                let rows: Vec<NamespaceRow> = outcome
                    .namespaces
                    .iter()
                    .map(|(namespace, summary)| NamespaceRow {
                        namespace: namespace.clone(),
                        running: summary.running_gpus,
                        requested: summary.total_requested_gpus,
                        pods: summary.phase_counts.total(),
                        phases: format_phase_counts(&summary.phase_counts),
                    })
                    .collect();

                let table = tabled::Table::new(rows)
                    .with(tabled::settings::Style::rounded())
                    .to_string();
                println!("{}", table);
            }
            println!();

            let t = &outcome.totals;
            println!("{}", "Cluster Totals".bold());
            println!("{}", "-".repeat(60));
            println!("Capacity:     {}", t.total_capacity_gpus);
            println!("Running:      {}", t.total_running_gpus.to_string().green());
            println!("Pending:      {}", t.total_pending_gpus.to_string().yellow());
            println!("Requested:    {}", t.total_requested_gpus);
            if t.available_gpus < 0 {
                // Over-subscribed: stale capacity or cordoned nodes.
                println!("Available:    {}", t.available_gpus.to_string().red().bold());
            } else {
                println!("Available:    {}", t.available_gpus);
            }
            println!("Utilization:  {}", color_utilization(t.utilization_pct));
            println!();

            let pending_pct = if t.total_capacity_gpus == 0 {
                0
            } else {
                t.total_pending_gpus * 100 / t.total_capacity_gpus
            };
            let bar = render_bar(t.utilization_pct, pending_pct, bar_width);
            println!(
                "[{}] {}",
                colorize_by_utilization(&bar, t.utilization_pct),
                color_utilization(t.utilization_pct)
            );
        }
    }

    Ok(())
}
