//! GPU claim aggregation
//!
//! A single reducing pass over the claim listing produces per-namespace
//! summaries, per-workload groups, and cluster-wide totals. The pass is a
//! pure in-memory transform: the inventory collector has already resolved
//! every field, so nothing in here can fail.

use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::{GpuClaim, NodeGpuCapacity, PodPhase, PriorityBand};

/// Per-phase claim counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseCounts {
    pub running: u64,
    pub pending: u64,
    pub failed: u64,
    pub succeeded: u64,
    pub unknown: u64,
}

impl PhaseCounts {
    pub fn record(&mut self, phase: PodPhase) {
        match phase {
            PodPhase::Running => self.running += 1,
            PodPhase::Pending => self.pending += 1,
            PodPhase::Failed => self.failed += 1,
            PodPhase::Succeeded => self.succeeded += 1,
            PodPhase::Unknown => self.unknown += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.running + self.pending + self.failed + self.succeeded + self.unknown
    }
}

/// GPU totals for one namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceSummary {
    /// GPUs held by Running pods.
    pub running_gpus: u64,
    /// GPUs held by Running, Pending, and Failed pods. Succeeded pods have
    /// released their claim and are excluded.
    pub total_requested_gpus: u64,
    pub phase_counts: PhaseCounts,
}

/// One logical workload: the pods of a namespace sharing a workload key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadSummary {
    pub namespace: String,
    pub workload_key: String,
    pub pod_count: u64,
    pub running_gpus: u64,
    pub requested_gpus: u64,
    pub phase_counts: PhaseCounts,
    /// Highest priority band observed across the group's pods.
    pub priority_band: PriorityBand,
}

/// Cluster-wide GPU totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterTotals {
    pub total_capacity_gpus: u64,
    pub total_running_gpus: u64,
    pub total_pending_gpus: u64,
    pub total_requested_gpus: u64,
    /// Capacity minus running. Negative values are surfaced as-is: an
    /// over-subscribed total means the scheduler's capacity view is stale
    /// or cordoned nodes still carry running pods.
    pub available_gpus: i64,
    /// Whole-percent floor of running over capacity; 0 when capacity is 0.
    pub utilization_pct: u64,
}

/// Result of one aggregation pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AggregateOutcome {
    /// Keyed by namespace; BTreeMap so rendering iterates lexicographically.
    pub namespaces: BTreeMap<String, NamespaceSummary>,
    /// Sorted by (namespace, workload_key).
    pub workloads: Vec<WorkloadSummary>,
    pub totals: ClusterTotals,
}

static SUFFIX_RE: OnceLock<Regex> = OnceLock::new();

fn suffix_re() -> &'static Regex {
    // Matches the generated ReplicaSet hash plus optional pod suffix at the
    // end of a pod name, e.g. "-7f8b9c" or "-7f8b9c-abcde".
    SUFFIX_RE.get_or_init(|| Regex::new(r"-[a-z0-9]{5,10}(-[a-z0-9]{5})?$").expect("valid regex"))
}

/// Derive the logical workload name for a pod by stripping generated
/// instance suffixes. Pure and deterministic; a name that does not carry a
/// recognizable suffix is returned unchanged, and stripping never produces
/// an empty key.
pub fn derive_workload_key(pod_name: &str) -> String {
    if let Some(m) = suffix_re().find(pod_name) {
        let head = &pod_name[..m.start()];
        if !head.is_empty() {
            return head.to_string();
        }
    }
    pod_name.to_string()
}

/// Reduce a claim listing and a node capacity listing into namespace,
/// workload, and cluster summaries.
///
/// Claims are walked in input order with last-write-wins deduplication on
/// `(namespace, pod_name)`: a re-listing of a changing cluster may contain
/// the same pod twice, and the later observation is the fresher one. All
/// arithmetic is integer; the pass cannot fail.
pub fn aggregate(claims: &[GpuClaim], capacity: &[NodeGpuCapacity]) -> AggregateOutcome {
    // First pass: index of the last occurrence of each (namespace, pod).
    let mut last_seen: HashMap<(&str, &str), usize> = HashMap::new();
    for (idx, claim) in claims.iter().enumerate() {
        last_seen.insert((claim.namespace.as_str(), claim.pod_name.as_str()), idx);
    }

    let mut namespaces: BTreeMap<String, NamespaceSummary> = BTreeMap::new();
    let mut workloads: BTreeMap<(String, String), WorkloadSummary> = BTreeMap::new();
    let mut totals = ClusterTotals::default();

    for (idx, claim) in claims.iter().enumerate() {
        let key = (claim.namespace.as_str(), claim.pod_name.as_str());
        if last_seen.get(&key) != Some(&idx) {
            continue; // superseded by a later observation
        }

        let ns = namespaces.entry(claim.namespace.clone()).or_default();
        ns.phase_counts.record(claim.phase);
        if claim.phase == PodPhase::Running {
            ns.running_gpus += claim.gpu_requested;
            totals.total_running_gpus += claim.gpu_requested;
        }
        if claim.phase == PodPhase::Pending {
            totals.total_pending_gpus += claim.gpu_requested;
        }
        if claim.phase.holds_request() {
            ns.total_requested_gpus += claim.gpu_requested;
            totals.total_requested_gpus += claim.gpu_requested;
        }

        let group = workloads
            .entry((claim.namespace.clone(), claim.workload_key.clone()))
            .or_insert_with(|| WorkloadSummary {
                namespace: claim.namespace.clone(),
                workload_key: claim.workload_key.clone(),
                pod_count: 0,
                running_gpus: 0,
                requested_gpus: 0,
                phase_counts: PhaseCounts::default(),
                priority_band: PriorityBand::Normal,
            });
        group.pod_count += 1;
        group.phase_counts.record(claim.phase);
        if claim.phase == PodPhase::Running {
            group.running_gpus += claim.gpu_requested;
        }
        if claim.phase.holds_request() {
            group.requested_gpus += claim.gpu_requested;
        }
        let band = PriorityBand::from_priority(claim.priority);
        if band > group.priority_band {
            group.priority_band = band;
        }
    }

    totals.total_capacity_gpus = capacity.iter().map(|n| n.gpu_count).sum();
    totals.available_gpus =
        totals.total_capacity_gpus as i64 - totals.total_running_gpus as i64;
    totals.utilization_pct = if totals.total_capacity_gpus == 0 {
        0
    } else {
        totals.total_running_gpus * 100 / totals.total_capacity_gpus
    };

    AggregateOutcome {
        namespaces,
        workloads: workloads.into_values().collect(),
        totals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claim(ns: &str, pod: &str, gpus: u64, phase: PodPhase) -> GpuClaim {
        GpuClaim {
            namespace: ns.to_string(),
            pod_name: pod.to_string(),
            workload_key: derive_workload_key(pod),
            gpu_requested: gpus,
            phase,
            node_name: None,
            priority: None,
        }
    }

    fn node(name: &str, gpus: u64) -> NodeGpuCapacity {
        NodeGpuCapacity {
            node_name: name.to_string(),
            gpu_count: gpus,
            resource_name: "nvidia.com/gpu".to_string(),
        }
    }

    #[test]
    fn workload_key_strips_replicaset_and_pod_suffix() {
        assert_eq!(derive_workload_key("ms-decode-7f8b9c-abcde"), "ms-decode");
    }

    #[test]
    fn workload_key_strips_single_suffix() {
        assert_eq!(derive_workload_key("vllm-worker-x9k2mq"), "vllm-worker");
    }

    #[test]
    fn workload_key_without_suffix_is_unchanged() {
        assert_eq!(derive_workload_key("plain-name"), "plain-name");
        assert_eq!(derive_workload_key("router"), "router");
    }

    #[test]
    fn workload_key_never_empty() {
        // The whole name looks like a suffix; keep it rather than
        // producing an empty key.
        assert_eq!(derive_workload_key("-abcde"), "-abcde");
    }

    #[test]
    fn empty_input_yields_zero_totals() {
        let out = aggregate(&[], &[]);
        assert!(out.namespaces.is_empty());
        assert!(out.workloads.is_empty());
        assert_eq!(out.totals, ClusterTotals::default());
        assert_eq!(out.totals.utilization_pct, 0);
    }

    #[test]
    fn running_never_exceeds_requested_per_namespace() {
        let claims = vec![
            claim("a", "w1-aaaaa", 3, PodPhase::Running),
            claim("a", "w2-bbbbb", 2, PodPhase::Pending),
            claim("a", "w3-ccccc", 1, PodPhase::Failed),
            claim("a", "w4-ddddd", 5, PodPhase::Succeeded),
        ];
        let out = aggregate(&claims, &[node("n1", 8)]);
        let ns = &out.namespaces["a"];
        assert!(ns.running_gpus <= ns.total_requested_gpus);
        assert_eq!(ns.running_gpus, 3);
        assert_eq!(ns.total_requested_gpus, 6); // Succeeded excluded
        assert_eq!(ns.phase_counts.succeeded, 1);
    }

    #[test]
    fn namespace_running_sums_match_cluster_total() {
        let claims = vec![
            claim("a", "p1-aaaaa", 2, PodPhase::Running),
            claim("b", "p2-bbbbb", 3, PodPhase::Running),
            claim("c", "p3-ccccc", 4, PodPhase::Pending),
        ];
        let out = aggregate(&claims, &[node("n1", 16)]);
        let ns_running: u64 = out.namespaces.values().map(|s| s.running_gpus).sum();
        assert_eq!(ns_running, out.totals.total_running_gpus);
        assert_eq!(out.totals.total_pending_gpus, 4);
    }

    #[test]
    fn duplicate_pod_is_last_write_wins() {
        let claims = vec![
            claim("a", "job-abcde", 4, PodPhase::Running),
            claim("a", "job-abcde", 4, PodPhase::Failed),
        ];
        let out = aggregate(&claims, &[node("n1", 8)]);
        let ns = &out.namespaces["a"];
        assert_eq!(ns.running_gpus, 0);
        assert_eq!(ns.total_requested_gpus, 4);
        assert_eq!(ns.phase_counts.running, 0);
        assert_eq!(ns.phase_counts.failed, 1);
        assert_eq!(ns.phase_counts.total(), 1);
    }

    #[test]
    fn unknown_phase_counted_but_not_requested() {
        let claims = vec![claim("a", "ghost-zzzzz", 2, PodPhase::Unknown)];
        let out = aggregate(&claims, &[]);
        let ns = &out.namespaces["a"];
        assert_eq!(ns.total_requested_gpus, 0);
        assert_eq!(ns.phase_counts.unknown, 1);
    }

    #[test]
    fn oversubscription_surfaces_negative_available() {
        let claims = vec![claim("a", "big-abcde", 10, PodPhase::Running)];
        let out = aggregate(&claims, &[node("n1", 8)]);
        assert_eq!(out.totals.available_gpus, -2);
        assert_eq!(out.totals.utilization_pct, 125);
    }

    #[test]
    fn workload_groups_merge_replicas() {
        let claims = vec![
            claim("serve", "ms-decode-7f8b9c-abcde", 2, PodPhase::Running),
            claim("serve", "ms-decode-7f8b9c-fghij", 2, PodPhase::Pending),
            claim("serve", "router-5d4c2b-klmno", 0, PodPhase::Running),
        ];
        let out = aggregate(&claims, &[node("n1", 8)]);
        assert_eq!(out.workloads.len(), 2);
        let decode = out
            .workloads
            .iter()
            .find(|w| w.workload_key == "ms-decode")
            .unwrap();
        assert_eq!(decode.pod_count, 2);
        assert_eq!(decode.running_gpus, 2);
        assert_eq!(decode.requested_gpus, 4);
    }

    #[test]
    fn workload_priority_band_takes_highest() {
        let mut a = claim("serve", "ms-decode-7f8b9c-abcde", 1, PodPhase::Running);
        a.priority = Some(0);
        let mut b = claim("serve", "ms-decode-7f8b9c-fghij", 1, PodPhase::Running);
        b.priority = Some(2_000_000_000);
        let out = aggregate(&[a, b], &[]);
        assert_eq!(out.workloads[0].priority_band, PriorityBand::System);
    }

    #[test]
    fn workloads_sorted_by_namespace_then_key() {
        let claims = vec![
            claim("b", "zeta-abcde", 1, PodPhase::Running),
            claim("a", "beta-abcde", 1, PodPhase::Running),
            claim("a", "alpha-abcde", 1, PodPhase::Running),
        ];
        let out = aggregate(&claims, &[]);
        let keys: Vec<(&str, &str)> = out
            .workloads
            .iter()
            .map(|w| (w.namespace.as_str(), w.workload_key.as_str()))
            .collect();
        assert_eq!(keys, vec![("a", "alpha"), ("a", "beta"), ("b", "zeta")]);
    }

    #[test]
    fn end_to_end_scenario() {
        let claims = vec![
            claim("a", "x-abcde1", 2, PodPhase::Running),
            claim("a", "y-fghij2", 1, PodPhase::Pending),
            claim("b", "z-klmno3", 4, PodPhase::Failed),
        ];
        let out = aggregate(&claims, &[node("node1", 8)]);

        let a = &out.namespaces["a"];
        assert_eq!(a.running_gpus, 2);
        assert_eq!(a.total_requested_gpus, 3);

        let b = &out.namespaces["b"];
        assert_eq!(b.running_gpus, 0);
        assert_eq!(b.total_requested_gpus, 4);

        assert_eq!(out.totals.total_capacity_gpus, 8);
        assert_eq!(out.totals.total_running_gpus, 2);
        assert_eq!(out.totals.total_requested_gpus, 7);
        assert_eq!(out.totals.available_gpus, 6);
        assert_eq!(out.totals.utilization_pct, 25);
    }
}
