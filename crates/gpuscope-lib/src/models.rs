//! Core data models for GPU inventory

use serde::{Deserialize, Serialize};

/// Pod lifecycle phase as reported by the Kubernetes API.
///
/// Anything the API reports that is not one of the four well-known phases
/// maps to `Unknown` rather than failing the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PodPhase {
    Running,
    Pending,
    Failed,
    Succeeded,
    Unknown,
}

impl PodPhase {
    /// Parse the `status.phase` string, defaulting to `Unknown`.
    pub fn parse(phase: Option<&str>) -> Self {
        match phase {
            Some("Running") => PodPhase::Running,
            Some("Pending") => PodPhase::Pending,
            Some("Failed") => PodPhase::Failed,
            Some("Succeeded") => PodPhase::Succeeded,
            _ => PodPhase::Unknown,
        }
    }

    /// Whether a claim in this phase still holds its GPU request.
    ///
    /// Succeeded pods have released their claim; Unknown pods are not
    /// counted either since their state cannot be trusted.
    pub fn holds_request(self) -> bool {
        matches!(self, PodPhase::Running | PodPhase::Pending | PodPhase::Failed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PodPhase::Running => "Running",
            PodPhase::Pending => "Pending",
            PodPhase::Failed => "Failed",
            PodPhase::Succeeded => "Succeeded",
            PodPhase::Unknown => "Unknown",
        }
    }
}

/// Display classification for pod priority. Never feeds GPU totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PriorityBand {
    Normal,
    High,
    System,
}

impl PriorityBand {
    /// Classify a pod priority value. The system-critical priority classes
    /// sit at two billion; anything at or above one billion is treated as
    /// system-reserved, any other positive priority as elevated.
    pub fn from_priority(priority: Option<i32>) -> Self {
        match priority {
            Some(p) if p >= 1_000_000_000 => PriorityBand::System,
            Some(p) if p > 0 => PriorityBand::High,
            _ => PriorityBand::Normal,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PriorityBand::System => "system",
            PriorityBand::High => "high",
            PriorityBand::Normal => "normal",
        }
    }
}

/// A single pod's declared GPU claim.
///
/// One record per pod: the collector sums per-container GPU quantities so
/// that `(namespace, pod_name)` is unique within one listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GpuClaim {
    pub namespace: String,
    pub pod_name: String,
    /// Logical grouping name with generated pod suffixes stripped.
    pub workload_key: String,
    pub gpu_requested: u64,
    pub phase: PodPhase,
    pub node_name: Option<String>,
    pub priority: Option<i32>,
}

/// Advertised GPU capacity of one node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeGpuCapacity {
    pub node_name: String,
    pub gpu_count: u64,
    /// Device plugin resource name the capacity was read from,
    /// e.g. `nvidia.com/gpu`.
    pub resource_name: String,
}
