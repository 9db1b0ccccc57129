//! Object metadata shared by every watched kind.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Label set of an object.
///
/// A `BTreeMap` so that equality never depends on insertion order. An object
/// without labels and an object with an empty label map are the same value.
pub type Labels = BTreeMap<String, String>;

/// Subset of object metadata the engine cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    /// Namespace; `None` for cluster-scoped kinds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Object name.
    pub name: String,
    /// Server-assigned uid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<Uuid>,
    /// Labels.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: Labels,
}

impl ObjectMeta {
    /// Metadata for a namespaced object.
    #[must_use]
    pub fn namespaced(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Metadata for a cluster-scoped object.
    #[must_use]
    pub fn cluster_scoped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds a label, replacing any previous value for the key.
    #[must_use]
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    /// Sets the server-assigned uid.
    #[must_use]
    pub fn with_uid(mut self, uid: Uuid) -> Self {
        self.uid = Some(uid);
        self
    }

    /// Identity of the object.
    #[must_use]
    pub fn key(&self) -> ObjectKey {
        ObjectKey {
            namespace: self.namespace.clone(),
            name: self.name.clone(),
            uid: self.uid,
        }
    }
}

/// Object identity, used for observability only.
///
/// Displays as `namespace/name`. The uid tells a recreated object apart from
/// the one it replaced; it is not part of the display form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectKey {
    /// Namespace; `None` for cluster-scoped kinds.
    pub namespace: Option<String>,
    /// Object name.
    pub name: String,
    /// Server-assigned uid, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<Uuid>,
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{ns}/{}", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_display_namespaced() {
        let meta = ObjectMeta::namespaced("default", "prod-1");
        assert_eq!(meta.key().to_string(), "default/prod-1");
    }

    #[test]
    fn test_key_display_cluster_scoped() {
        let meta = ObjectMeta::cluster_scoped("pods-ready");
        assert_eq!(meta.key().to_string(), "pods-ready");
    }

    #[test]
    fn test_missing_labels_deserialize_as_empty() {
        let meta: ObjectMeta = serde_json::from_str(r#"{"name":"a","namespace":"ns"}"#).unwrap();
        assert!(meta.labels.is_empty());
        assert_eq!(meta, ObjectMeta::namespaced("ns", "a"));
    }

    #[test]
    fn test_key_carries_uid() {
        let json = r#"{
            "namespace": "default",
            "name": "prod",
            "uid": "6f1c2a9e-58b3-4c1d-9f4e-2b7d0c8a1e35",
            "creationTimestamp": "2024-05-01T12:00:00Z",
            "resourceVersion": "81234"
        }"#;
        let meta: ObjectMeta = serde_json::from_str(json).unwrap();
        let uid = Uuid::parse_str("6f1c2a9e-58b3-4c1d-9f4e-2b7d0c8a1e35").unwrap();

        let key = meta.key();
        assert_eq!(key.uid, Some(uid));
        assert_eq!(key.to_string(), "default/prod");
    }

    #[test]
    fn test_recreated_object_has_distinct_key() {
        let first = ObjectMeta::namespaced("default", "prod").with_uid(Uuid::from_u128(1));
        let second = ObjectMeta::namespaced("default", "prod").with_uid(Uuid::from_u128(2));
        assert_ne!(first.key(), second.key());
        assert_eq!(first.key().to_string(), second.key().to_string());
    }

    #[test]
    fn test_with_label_overwrites() {
        let meta = ObjectMeta::cluster_scoped("a")
            .with_label("env", "dev")
            .with_label("env", "prod");
        assert_eq!(meta.labels.get("env").map(String::as_str), Some("prod"));
        assert_eq!(meta.labels.len(), 1);
    }
}
