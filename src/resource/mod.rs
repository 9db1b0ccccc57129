//! Typed views of the watched kinds.
//!
//! Each view carries identity metadata plus the fields the relevance
//! predicates inspect. Everything else in the upstream schemas is left out.

/// Cluster-api and Sveltos clusters.
pub mod cluster;
/// Health-check definitions.
pub mod health_check;
/// Cluster machines.
pub mod machine;
/// Object metadata.
pub mod meta;
/// Health-check reports.
pub mod report;
/// Cluster summaries.
pub mod summary;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::notification::{Event, Notification};

pub use cluster::{Cluster, ClusterSpec, ClusterView, SveltosCluster, SveltosClusterSpec, SveltosClusterStatus};
pub use health_check::{HealthCheck, HealthCheckSpec, LabelFilter, LabelOperation, ResourceSelector};
pub use machine::{Machine, MachinePhase, MachineSpec, MachineStatus, NodeRef};
pub use meta::{Labels, ObjectKey, ObjectMeta};
pub use report::{ClusterType, HealthCheckReport, HealthCheckReportSpec, HealthStatus, ObjectRef, ResourceStatus};
pub use summary::{ClusterSummary, ClusterSummaryStatus, FeatureId, FeatureStatus, FeatureSummary};

/// Tag identifying a watched kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Cluster-api `Cluster`.
    Cluster,
    /// Sveltos-registered cluster.
    SveltosCluster,
    /// Cluster-api `Machine`.
    Machine,
    /// Per-cluster rollup of applied features.
    ClusterSummary,
    /// Per-cluster health observations.
    HealthCheckReport,
    /// Health-check policy definition.
    HealthCheck,
}

impl ResourceKind {
    /// Every kind, in the order watches are listed.
    pub const ALL: [Self; 6] = [
        Self::Cluster,
        Self::SveltosCluster,
        Self::Machine,
        Self::ClusterSummary,
        Self::HealthCheckReport,
        Self::HealthCheck,
    ];

    /// Upstream kind name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cluster => "Cluster",
            Self::SveltosCluster => "SveltosCluster",
            Self::Machine => "Machine",
            Self::ClusterSummary => "ClusterSummary",
            Self::HealthCheckReport => "HealthCheckReport",
            Self::HealthCheck => "HealthCheck",
        }
    }

    /// Returns true for kinds without a namespace.
    #[must_use]
    pub const fn is_cluster_scoped(&self) -> bool {
        matches!(self, Self::HealthCheck)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A watched kind with a typed view.
///
/// `event` and `into_notification` are the two halves of the tagged union:
/// one narrows a [`Notification`] to this kind's typed event, the other wraps
/// a typed event back up.
pub trait Resource: Send + Sync + Sized + 'static {
    /// Kind tag of this view.
    const KIND: ResourceKind;

    /// Object metadata.
    fn meta(&self) -> &ObjectMeta;

    /// Narrows a notification to this kind, or `None` if the tag differs.
    fn event(notification: &Notification) -> Option<&Event<Self>>;

    /// Wraps a typed event into a notification.
    fn into_notification(event: Event<Self>) -> Notification;
}

macro_rules! impl_resource {
    ($ty:ident) => {
        impl Resource for $ty {
            const KIND: ResourceKind = ResourceKind::$ty;

            fn meta(&self) -> &ObjectMeta {
                &self.meta
            }

            fn event(notification: &Notification) -> Option<&Event<Self>> {
                match notification {
                    Notification::$ty(event) => Some(event),
                    _ => None,
                }
            }

            fn into_notification(event: Event<Self>) -> Notification {
                Notification::$ty(event)
            }
        }
    };
}

impl_resource!(Cluster);
impl_resource!(SveltosCluster);
impl_resource!(Machine);
impl_resource!(ClusterSummary);
impl_resource!(HealthCheckReport);
impl_resource!(HealthCheck);
