//! Library for inspecting GPU capacity and usage on a Kubernetes cluster
//!
//! This crate provides the core functionality for:
//! - Listing per-pod GPU claims and per-node GPU capacity from the cluster API
//! - Aggregating claims into namespace, workload, and cluster-level summaries
//! - Rendering plain-text usage reports with a utilization bar

pub mod aggregate;
pub mod inventory;
pub mod models;
pub mod report;

pub use aggregate::{
    aggregate, derive_workload_key, AggregateOutcome, ClusterTotals, NamespaceSummary,
    PhaseCounts, WorkloadSummary,
};
pub use inventory::{ClusterInventory, InventoryError, KubeInventory};
pub use models::{GpuClaim, NodeGpuCapacity, PodPhase, PriorityBand};
pub use report::{generate_report, render_bar, RenderedReport};
