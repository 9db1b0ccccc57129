//! Cluster-api machines.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::meta::ObjectMeta;

/// Lifecycle phase of a machine.
///
/// The upstream status carries the phase as a free-form string; unrecognized
/// or missing values map to [`MachinePhase::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MachinePhase {
    /// Waiting for its bootstrap data.
    Pending,
    /// Infrastructure is being created.
    Provisioning,
    /// Infrastructure exists; the node has not joined yet.
    Provisioned,
    /// Node joined the cluster.
    Running,
    /// Deletion in progress.
    Deleting,
    /// Infrastructure removed.
    Deleted,
    /// Unrecoverable error.
    Failed,
    /// Missing or unrecognized phase.
    Unknown,
}

impl MachinePhase {
    /// Parses an upstream phase string.
    #[must_use]
    pub fn parse(phase: &str) -> Self {
        match phase {
            "Pending" => Self::Pending,
            "Provisioning" => Self::Provisioning,
            "Provisioned" => Self::Provisioned,
            "Running" => Self::Running,
            "Deleting" => Self::Deleting,
            "Deleted" => Self::Deleted,
            "Failed" => Self::Failed,
            _ => Self::Unknown,
        }
    }

    /// Upstream phase string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Provisioning => "Provisioning",
            Self::Provisioned => "Provisioned",
            Self::Running => "Running",
            Self::Deleting => "Deleting",
            Self::Deleted => "Deleted",
            Self::Failed => "Failed",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for MachinePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Worker or control-plane node of a cluster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Machine {
    /// Object metadata.
    #[serde(rename = "metadata")]
    pub meta: ObjectMeta,
    /// Desired state.
    #[serde(default)]
    pub spec: MachineSpec,
    /// Observed state.
    #[serde(default)]
    pub status: MachineStatus,
}

/// Desired state of a machine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineSpec {
    /// Cluster the machine belongs to.
    pub cluster_name: String,
    /// Kubernetes version the machine runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Observed state of a machine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineStatus {
    /// Upstream phase string; see [`Machine::typed_phase`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    /// Node backing this machine, once it joined.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_ref: Option<NodeRef>,
}

/// Object reference to the node backing a machine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRef {
    /// API version of the referent, `v1` for nodes.
    #[serde(default)]
    pub api_version: String,
    /// Kind of the referent, `Node` for nodes.
    #[serde(default)]
    pub kind: String,
    /// Node name.
    pub name: String,
    /// Always empty for nodes; kept so any object reference decodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Node uid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<Uuid>,
}

impl NodeRef {
    /// Reference to the node called `name`.
    #[must_use]
    pub fn node(name: impl Into<String>) -> Self {
        Self {
            api_version: "v1".to_string(),
            kind: "Node".to_string(),
            name: name.into(),
            namespace: None,
            uid: None,
        }
    }
}

impl Machine {
    /// Creates a machine with no phase reported yet.
    #[must_use]
    pub fn new(meta: ObjectMeta, cluster_name: impl Into<String>) -> Self {
        Self {
            meta,
            spec: MachineSpec {
                cluster_name: cluster_name.into(),
                version: None,
            },
            status: MachineStatus::default(),
        }
    }

    /// Sets the reported phase.
    #[must_use]
    pub fn with_phase(mut self, phase: MachinePhase) -> Self {
        self.status.phase = Some(phase.as_str().to_string());
        self
    }

    /// Typed view of `status.phase`.
    #[must_use]
    pub fn typed_phase(&self) -> MachinePhase {
        self.status
            .phase
            .as_deref()
            .map_or(MachinePhase::Unknown, MachinePhase::parse)
    }
}
