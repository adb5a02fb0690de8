//! Kubernetes API implementation of the inventory collector

use k8s_openapi::api::core::v1::{Node, Pod, ResourceRequirements};
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use kube::{
    api::{Api, ListParams},
    Client,
};
use tracing::debug;

use super::{async_trait, ClusterInventory, InventoryError, GPU_RESOURCE_NAMES};
use crate::aggregate::derive_workload_key;
use crate::models::{GpuClaim, NodeGpuCapacity, PodPhase};

/// Inventory collector backed by the kube client.
pub struct KubeInventory {
    client: Client,
}

impl KubeInventory {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Create a collector from the ambient cluster configuration:
    /// in-cluster service account, `KUBECONFIG`, or `~/.kube/config`.
    pub async fn try_default() -> Result<Self, InventoryError> {
        let client = Client::try_default().await?;
        debug!("Kubernetes client initialized");
        Ok(Self::new(client))
    }
}

#[async_trait]
impl ClusterInventory for KubeInventory {
    async fn list_gpu_claims(&self) -> Result<Vec<GpuClaim>, InventoryError> {
        let pods: Api<Pod> = Api::all(self.client.clone());
        let pod_list = pods.list(&ListParams::default()).await?;
        let claims: Vec<GpuClaim> = pod_list.items.iter().filter_map(claim_from_pod).collect();
        debug!(
            pods = pod_list.items.len(),
            claims = claims.len(),
            "Listed GPU claims"
        );
        Ok(claims)
    }

    async fn list_node_gpu_capacity(&self) -> Result<Vec<NodeGpuCapacity>, InventoryError> {
        let nodes: Api<Node> = Api::all(self.client.clone());
        let node_list = nodes.list(&ListParams::default()).await?;
        let capacity: Vec<NodeGpuCapacity> =
            node_list.items.iter().filter_map(capacity_from_node).collect();
        debug!(
            nodes = node_list.items.len(),
            gpu_nodes = capacity.len(),
            "Listed node GPU capacity"
        );
        Ok(capacity)
    }
}

/// Resolve a pod into a GPU claim, or `None` if the pod claims no GPUs.
///
/// Per-container quantities are summed so one pod yields one record. The
/// phase defaults to `Unknown` when missing or unrecognized.
pub fn claim_from_pod(pod: &Pod) -> Option<GpuClaim> {
    let name = pod.metadata.name.clone()?;
    let namespace = pod.metadata.namespace.clone()?;

    let spec = pod.spec.as_ref()?;
    let gpu_requested: u64 = spec
        .containers
        .iter()
        .map(|c| resolve_container_gpus(c.resources.as_ref()))
        .sum();
    if gpu_requested == 0 {
        return None;
    }

    let phase = PodPhase::parse(
        pod.status
            .as_ref()
            .and_then(|s| s.phase.as_deref()),
    );

    Some(GpuClaim {
        workload_key: derive_workload_key(&name),
        namespace,
        pod_name: name,
        gpu_requested,
        phase,
        node_name: spec.node_name.clone(),
        priority: spec.priority,
    })
}

/// The request-or-limit resolution rule: for each GPU resource name, take
/// the container's request if one is set, otherwise its limit. Quantities
/// that do not parse as a whole number resolve to zero.
pub(crate) fn resolve_container_gpus(resources: Option<&ResourceRequirements>) -> u64 {
    let Some(resources) = resources else {
        return 0;
    };
    GPU_RESOURCE_NAMES
        .iter()
        .map(|resource| {
            let quantity = resources
                .requests
                .as_ref()
                .and_then(|r| r.get(*resource))
                .or_else(|| resources.limits.as_ref().and_then(|l| l.get(*resource)));
            quantity.map_or(0, parse_gpu_quantity)
        })
        .sum()
}

/// Resolve a node's advertised GPU capacity, or `None` for non-GPU nodes.
pub fn capacity_from_node(node: &Node) -> Option<NodeGpuCapacity> {
    let name = node.metadata.name.clone()?;
    let capacity = node.status.as_ref()?.capacity.as_ref()?;

    let mut gpu_count = 0;
    let mut resource_name = None;
    for resource in GPU_RESOURCE_NAMES {
        if let Some(quantity) = capacity.get(*resource) {
            let count = parse_gpu_quantity(quantity);
            if count > 0 {
                gpu_count += count;
                resource_name.get_or_insert(*resource);
            }
        }
    }

    resource_name.map(|resource_name| NodeGpuCapacity {
        node_name: name,
        gpu_count,
        resource_name: resource_name.to_string(),
    })
}

/// GPU quantities are whole device counts. Anything else normalizes to
/// zero rather than failing the listing.
fn parse_gpu_quantity(quantity: &Quantity) -> u64 {
    match quantity.0.trim().parse::<u64>() {
        Ok(count) => count,
        Err(_) => {
            debug!(value = %quantity.0, "Ignoring non-integer GPU quantity");
            0
        }
    }
}
