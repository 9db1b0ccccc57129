//! Health-check reports: health observations collected from one cluster.

use serde::{Deserialize, Serialize};

use super::meta::ObjectMeta;

/// Report of resource health for one cluster and one health check.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckReport {
    /// Object metadata.
    #[serde(rename = "metadata")]
    pub meta: ObjectMeta,
    /// The report body. Reports carry their content in `spec`.
    pub spec: HealthCheckReportSpec,
}

/// Which kind of cluster a report is about.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClusterType {
    /// Cluster-api `Cluster`.
    #[default]
    Capi,
    /// `SveltosCluster`.
    Sveltos,
}

/// Health observations for one cluster and one health check.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckReportSpec {
    /// Namespace of the observed cluster.
    pub cluster_namespace: String,
    /// Name of the observed cluster.
    pub cluster_name: String,
    #[allow(missing_docs)]
    pub cluster_type: ClusterType,
    /// Health check that produced the report.
    pub health_check_name: String,
    /// One entry per evaluated resource.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resource_statuses: Vec<ResourceStatus>,
}

/// Verdict of the health script for one resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthStatus {
    /// Resource is healthy.
    Healthy,
    /// Resource is converging.
    Progressing,
    /// Resource is unhealthy.
    Degraded,
    /// Resource is intentionally inactive.
    Suspended,
}

/// Reference to the object a status entry is about.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectRef {
    pub api_version: String,
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    pub name: String,
}

/// Health of one evaluated resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceStatus {
    /// The evaluated resource.
    pub object_ref: ObjectRef,
    /// Collected copy of the resource, when the health check asks for it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<serde_json::Value>,
    /// Verdict of the health script.
    pub health_status: HealthStatus,
    /// Explanation returned by the health script.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl HealthCheckReport {
    /// Creates a report with no resource statuses.
    #[must_use]
    pub fn new(
        meta: ObjectMeta,
        cluster_namespace: impl Into<String>,
        cluster_name: impl Into<String>,
        health_check_name: impl Into<String>,
    ) -> Self {
        Self {
            meta,
            spec: HealthCheckReportSpec {
                cluster_namespace: cluster_namespace.into(),
                cluster_name: cluster_name.into(),
                cluster_type: ClusterType::Capi,
                health_check_name: health_check_name.into(),
                resource_statuses: Vec::new(),
            },
        }
    }
}
