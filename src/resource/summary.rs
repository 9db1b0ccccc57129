//! Cluster summaries: per-cluster rollup of the features applied to it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::meta::ObjectMeta;

/// Per-cluster summary of deployed add-ons.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSummary {
    /// Object metadata.
    #[serde(rename = "metadata")]
    pub meta: ObjectMeta,
    /// Observed deployment state.
    #[serde(default)]
    pub status: ClusterSummaryStatus,
}

/// Observed deployment state of a cluster summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSummaryStatus {
    /// One entry per feature, in the order the summary controller wrote them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub feature_summaries: Vec<FeatureSummary>,
}

/// Kind of add-on a feature summary tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureId {
    /// Raw Kubernetes resources.
    Resources,
    /// Helm charts.
    Helm,
    /// Kustomize overlays.
    Kustomize,
}

/// Deployment state of a feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureStatus {
    /// Deployment in progress.
    Provisioning,
    /// Deployed and up to date.
    Provisioned,
    /// Last attempt failed; will be retried.
    Failed,
    /// Last attempt failed; retrying cannot help.
    FailedNonRetriable,
    /// Removal in progress.
    Removing,
    /// Waiting for the in-cluster agent to remove it.
    AgentRemoving,
    /// Removed from the cluster.
    Removed,
}

/// Deployment state of one feature on one cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureSummary {
    /// Feature this entry is about.
    #[serde(rename = "featureID")]
    pub feature_id: FeatureId,
    /// Hash of the configuration last deployed for this feature. Base64 on
    /// the wire.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "base64_bytes")]
    pub hash: Option<Vec<u8>>,
    /// Deployment state, unset until the first attempt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<FeatureStatus>,
    /// Last deployment error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_message: Option<String>,
    /// When the configuration was last applied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_applied_time: Option<DateTime<Utc>>,
    /// Failed attempts since the last success.
    #[serde(default)]
    pub consecutive_failures: u32,
    /// Group/version/kinds deployed by this feature.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deployed_group_version_kind: Vec<String>,
}

/// Serde adapter for optional byte strings encoded as standard base64.
mod base64_bytes {
    use base64::prelude::*;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(bytes) => serializer.serialize_str(&BASE64_STANDARD.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|encoded| BASE64_STANDARD.decode(encoded).map_err(D::Error::custom))
            .transpose()
    }
}

impl FeatureSummary {
    /// Creates a summary entry with only the feature and status set.
    #[must_use]
    pub fn new(feature_id: FeatureId, status: FeatureStatus) -> Self {
        Self {
            feature_id,
            hash: None,
            status: Some(status),
            failure_message: None,
            last_applied_time: None,
            consecutive_failures: 0,
            deployed_group_version_kind: Vec::new(),
        }
    }
}

impl ClusterSummary {
    /// Creates a summary with the given feature entries.
    #[must_use]
    pub fn new(meta: ObjectMeta, feature_summaries: Vec<FeatureSummary>) -> Self {
        Self {
            meta,
            status: ClusterSummaryStatus { feature_summaries },
        }
    }
}
