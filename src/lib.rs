//! # chc-relevance - change relevance for ClusterHealthCheck reconciliation
//!
//! The ClusterHealthCheck controller watches clusters, machines, cluster
//! summaries, health-check reports and health-check definitions. Reconciling
//! a ClusterHealthCheck is expensive, so every watch notification first goes
//! through a relevance predicate that decides whether the change can affect
//! the aggregate at all.
//!
//! ## Core Concepts
//!
//! - **Notification**: a typed create/update/delete/generic event for one watched kind
//! - **RelevancePredicate**: a pure per-kind decision function returning a [`Decision`]
//! - **PredicateRegistry**: kind to predicate bindings, frozen after start-up
//! - **TriggerSink**: where relevant notifications go next
//!
//! ## Usage
//!
//! ```
//! use chc_relevance::{
//!     Cluster, Event, Notification, ObjectMeta, PredicateRegistry, RegistryConfig,
//! };
//!
//! let registry = PredicateRegistry::cluster_health_check(RegistryConfig::default());
//!
//! let old = Cluster::new(ObjectMeta::namespaced("default", "prod")).with_paused(true);
//! let new = old.clone().with_paused(false);
//! let notification = Notification::from(Event::Update { old: Some(old), new });
//!
//! assert!(registry.evaluate(&notification));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod compare;
pub mod config;
pub mod error;
pub mod notification;
pub mod predicate;
pub mod registry;
pub mod resource;
pub mod sink;

// Re-export primary types at crate root for convenience
pub use config::{RegistryConfig, UnknownKindPolicy};
pub use error::{ConfigError, RegistryError, RegistryResult};
pub use notification::{Event, Notification, Operation};
pub use predicate::{
    ClusterPredicate, ClusterSummaryPredicate, Decision, HealthCheckPredicate,
    HealthCheckReportPredicate, MachinePredicate, Reason, RelevancePredicate,
};
pub use registry::{PredicateRegistry, RegistryBuilder};
pub use resource::{
    Cluster, ClusterSummary, ClusterView, FeatureId, FeatureStatus, FeatureSummary, HealthCheck,
    HealthCheckReport, Labels, Machine, MachinePhase, ObjectKey, ObjectMeta, Resource,
    ResourceKind, SveltosCluster,
};
pub use sink::{ChannelSink, TriggerEvent, TriggerSink};
