//! Per-workload GPU usage view

use anyhow::Result;
use gpuscope_lib::aggregate::aggregate;
use gpuscope_lib::inventory::ClusterInventory;
use tabled::Tabled;

use crate::output::{
    color_priority_band, format_phase_counts, print_warning, OutputFormat,
};

/// Row for the workloads table
#[derive(Tabled)]
struct WorkloadRow {
    #[tabled(rename = "Namespace")]
    namespace: String,
    #[tabled(rename = "Workload")]
    workload: String,
    #[tabled(rename = "Pods")]
    pods: u64,
    #[tabled(rename = "Running GPUs")]
    running: u64,
    #[tabled(rename = "Requested GPUs")]
    requested: u64,
    #[tabled(rename = "R/P/F")]
    phases: String,
    #[tabled(rename = "Priority")]
    priority: String,
}

/// Show GPU usage grouped by logical workload (replica pods merged)
pub async fn show_workloads(
    inventory: &impl ClusterInventory,
    namespace: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let mut claims = inventory.list_gpu_claims().await?;
    if let Some(ns) = &namespace {
        claims.retain(|c| &c.namespace == ns);
    }

    let outcome = aggregate(&claims, &[]);

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&outcome.workloads)?;
            println!("{}", json);
        }
        OutputFormat::Table => {
            if outcome.workloads.is_empty() {
                print_warning("No GPU workloads found");
                return Ok(());
            }

            let rows: Vec<WorkloadRow> = outcome
                .workloads
                .iter()
                .map(|w| WorkloadRow {
                    namespace: w.namespace.clone(),
                    workload: w.workload_key.clone(),
                    pods: w.pod_count,
                    running: w.running_gpus,
                    requested: w.requested_gpus,
                    phases: format_phase_counts(&w.phase_counts),
                    priority: color_priority_band(w.priority_band),
                })
                .collect();

            let table = tabled::Table::new(rows)
                .with(tabled::settings::Style::rounded())
                .to_string();
            println!("{}", table);
            println!("\nTotal: {} workloads", outcome.workloads.len());
        }
    }

    Ok(())
}
