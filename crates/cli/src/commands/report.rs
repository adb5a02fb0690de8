//! Plain-text usage report

use anyhow::{Context, Result};
use gpuscope_lib::inventory::ClusterInventory;
use gpuscope_lib::report::generate_report;

use crate::output::{print_success, OutputFormat};

/// Render the plain-text usage report, to stdout or a file.
///
/// The report itself carries no color codes or timestamps so repeated runs
/// diff cleanly; the generation time is printed as a separate header line.
pub async fn run_report(
    inventory: &impl ClusterInventory,
    bar_width: usize,
    output: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let (claims, capacity) = tokio::try_join!(
        inventory.list_gpu_claims(),
        inventory.list_node_gpu_capacity()
    )?;
    let report = generate_report(&claims, &capacity, bar_width);

    let text = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&report)?,
        OutputFormat::Table => report.to_string(),
    };

    match output {
        Some(path) => {
            std::fs::write(&path, &text)
                .with_context(|| format!("Failed to write report to {}", path))?;
            print_success(&format!("Report written to {}", path));
        }
        None => {
            let generated = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
            println!("Generated: {}", generated);
            println!();
            println!("{}", text);
        }
    }

    Ok(())
}
