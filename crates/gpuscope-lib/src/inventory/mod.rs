//! Cluster inventory collection
//!
//! This module owns all cluster I/O: listing per-pod GPU claims and
//! per-node GPU capacity through the Kubernetes API. The aggregator never
//! talks to the cluster or parses text itself; it only consumes the
//! structured records produced here.

mod kube_impl;


pub use kube_impl::{claim_from_pod, capacity_from_node, KubeInventory};

use crate::models::{GpuClaim, NodeGpuCapacity};

pub use async_trait::async_trait;

/// Device plugin resource names recognized as GPU capacity.
pub const GPU_RESOURCE_NAMES: &[&str] = &["nvidia.com/gpu", "amd.com/gpu"];

/// Errors raised while querying the cluster.
///
/// Malformed data inside a pod or node object is never an error: bad GPU
/// quantities normalize to zero and unknown phases to `Unknown`. Only the
/// API round-trip itself can fail.
#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("cluster API request failed: {0}")]
    Api(#[from] kube::Error),
}

/// Trait for cluster inventory implementations
#[async_trait]
pub trait ClusterInventory: Send + Sync {
    /// List one GPU claim per pod that requests GPU resources, across all
    /// namespaces. Pods without a GPU claim are omitted.
    async fn list_gpu_claims(&self) -> Result<Vec<GpuClaim>, InventoryError>;

    /// List advertised GPU capacity per node. Nodes without GPU capacity
    /// are omitted, not reported as zero.
    async fn list_node_gpu_capacity(&self) -> Result<Vec<NodeGpuCapacity>, InventoryError>;
}
