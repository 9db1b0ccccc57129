//! Health-check definitions: the policy that says which resources to look at
//! and how to judge them.

use serde::{Deserialize, Serialize};

use super::meta::ObjectMeta;

/// Cluster-scoped health-check policy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheck {
    /// Object metadata.
    #[serde(rename = "metadata")]
    pub meta: ObjectMeta,
    /// The policy.
    #[serde(default)]
    pub spec: HealthCheckSpec,
}

/// Health-check policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckSpec {
    /// Resources to evaluate, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resource_selectors: Vec<ResourceSelector>,
    /// Lua function judging the selected resources.
    #[serde(default)]
    pub evaluate_health: String,
    /// Copy each evaluated resource into the report.
    #[serde(default)]
    pub collect_resources: bool,
}

/// Selects the resources a health check evaluates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSelector {
    /// API group; empty for the core group.
    #[serde(default)]
    pub group: String,
    /// API version.
    pub version: String,
    /// Resource kind.
    pub kind: String,
    /// Restricts the selection to one namespace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Restricts the selection to one object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Label conditions, all of which must hold.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub label_filters: Vec<LabelFilter>,
    /// Optional Lua filter applied per resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluate: Option<String>,
}

/// Comparison a [`LabelFilter`] applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LabelOperation {
    /// Label must have the value.
    Equal,
    /// Label must not have the value.
    Different,
}

/// One label condition of a [`ResourceSelector`].
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelFilter {
    pub key: String,
    pub operation: LabelOperation,
    pub value: String,
}

impl HealthCheck {
    /// Creates a health check with the given selectors and evaluation script.
    #[must_use]
    pub fn new(
        meta: ObjectMeta,
        resource_selectors: Vec<ResourceSelector>,
        evaluate_health: impl Into<String>,
    ) -> Self {
        Self {
            meta,
            spec: HealthCheckSpec {
                resource_selectors,
                evaluate_health: evaluate_health.into(),
                collect_resources: false,
            },
        }
    }
}

impl ResourceSelector {
    /// Selects every object of a group/version/kind.
    #[must_use]
    pub fn gvk(group: impl Into<String>, version: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            version: version.into(),
            kind: kind.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_check_deserializes() {
        let json = r#"{
            "metadata": {"name": "deployment-replicas"},
            "spec": {
                "resourceSelectors": [{
                    "group": "apps", "version": "v1", "kind": "Deployment",
                    "labelFilters": [{"key": "app", "operation": "Equal", "value": "web"}]
                }],
                "evaluateHealth": "function evaluate() end"
            }
        }"#;
        let hc: HealthCheck = serde_json::from_str(json).unwrap();
        assert!(hc.meta.namespace.is_none());
        assert_eq!(hc.spec.resource_selectors[0].label_filters[0].operation, LabelOperation::Equal);
        assert!(!hc.spec.collect_resources);
    }
}
