//! Per-node GPU capacity view

use anyhow::Result;
use gpuscope_lib::inventory::ClusterInventory;
use tabled::Tabled;

use crate::output::{print_warning, OutputFormat};

/// Row for the node capacity table
#[derive(Tabled)]
struct NodeRow {
    #[tabled(rename = "Node")]
    node: String,
    #[tabled(rename = "GPUs")]
    gpus: u64,
    #[tabled(rename = "Resource")]
    resource: String,
}

/// Show advertised GPU capacity per node
pub async fn show_nodes(inventory: &impl ClusterInventory, format: OutputFormat) -> Result<()> {
    let capacity = inventory.list_node_gpu_capacity().await?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&capacity)?;
            println!("{}", json);
        }
        OutputFormat::Table => {
            if capacity.is_empty() {
                print_warning("No GPU nodes found");
                return Ok(());
            }

            let rows: Vec<NodeRow> = capacity
                .iter()
                .map(|n| NodeRow {
                    node: n.node_name.clone(),
                    gpus: n.gpu_count,
                    resource: n.resource_name.clone(),
                })
                .collect();

            let table = tabled::Table::new(rows)
                .with(tabled::settings::Style::rounded())
                .to_string();
            println!("{}", table);

            let total: u64 = capacity.iter().map(|n| n.gpu_count).sum();
            println!("\nTotal capacity: {} GPUs across {} nodes", total, capacity.len());
        }
    }

    Ok(())
}
