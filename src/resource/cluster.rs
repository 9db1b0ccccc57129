//! Cluster kinds.
//!
//! Two kinds describe a managed cluster: the cluster-api `Cluster` and the
//! `SveltosCluster` registered directly with Sveltos. Only the latter reports
//! readiness.

use serde::{Deserialize, Serialize};

use super::meta::{Labels, ObjectMeta};
use super::Resource;

/// Fields the cluster predicate reads, common to both cluster kinds.
pub trait ClusterView: Resource {
    /// Whether reconciliation of this cluster is paused.
    fn paused(&self) -> bool;

    /// Readiness flag, or `None` for kinds that do not expose one.
    fn ready(&self) -> Option<bool>;

    /// Cluster labels.
    fn labels(&self) -> &Labels {
        &self.meta().labels
    }
}

/// Cluster-api cluster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    /// Object metadata.
    #[serde(rename = "metadata")]
    pub meta: ObjectMeta,
    /// Desired state.
    #[serde(default)]
    pub spec: ClusterSpec,
}

/// Desired state of a cluster-api cluster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSpec {
    /// Stops all controllers from reconciling the cluster.
    #[serde(default)]
    pub paused: bool,
}

impl Cluster {
    /// Creates an unpaused cluster.
    #[must_use]
    pub fn new(meta: ObjectMeta) -> Self {
        Self {
            meta,
            spec: ClusterSpec::default(),
        }
    }

    /// Sets the pause flag.
    #[must_use]
    pub fn with_paused(mut self, paused: bool) -> Self {
        self.spec.paused = paused;
        self
    }
}

impl ClusterView for Cluster {
    fn paused(&self) -> bool {
        self.spec.paused
    }

    fn ready(&self) -> Option<bool> {
        None
    }
}

/// Cluster registered with Sveltos through a kubeconfig.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SveltosCluster {
    /// Object metadata.
    #[serde(rename = "metadata")]
    pub meta: ObjectMeta,
    /// Desired state.
    #[serde(default)]
    pub spec: SveltosClusterSpec,
    /// Observed state.
    #[serde(default)]
    pub status: SveltosClusterStatus,
}

/// Desired state of a Sveltos cluster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SveltosClusterSpec {
    /// Stops Sveltos from deploying to the cluster.
    #[serde(default)]
    pub paused: bool,
}

/// Observed state of a Sveltos cluster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SveltosClusterStatus {
    /// The API server is reachable with the registered kubeconfig.
    #[serde(default)]
    pub ready: bool,
    /// Kubernetes version reported by the cluster.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Last connectivity error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_message: Option<String>,
}

impl SveltosCluster {
    /// Creates an unpaused, not-ready cluster.
    #[must_use]
    pub fn new(meta: ObjectMeta) -> Self {
        Self {
            meta,
            spec: SveltosClusterSpec::default(),
            status: SveltosClusterStatus::default(),
        }
    }

    /// Sets the pause flag.
    #[must_use]
    pub fn with_paused(mut self, paused: bool) -> Self {
        self.spec.paused = paused;
        self
    }

    /// Sets the readiness flag.
    #[must_use]
    pub fn with_ready(mut self, ready: bool) -> Self {
        self.status.ready = ready;
        self
    }
}

impl ClusterView for SveltosCluster {
    fn paused(&self) -> bool {
        self.spec.paused
    }

    fn ready(&self) -> Option<bool> {
        Some(self.status.ready)
    }
}
