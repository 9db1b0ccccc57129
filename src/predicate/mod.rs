//! Relevance predicates.
//!
//! One predicate per watched kind decides whether a notification can affect
//! ClusterHealthCheck correctness. Predicates are pure: no I/O, no logging,
//! no interior state. When a change cannot be proven immaterial, they trigger.

/// Cluster-api and Sveltos cluster predicate.
pub mod cluster;
/// Health-check definition predicate.
pub mod health_check;
/// Machine predicate.
pub mod machine;
/// Health-check report predicate.
pub mod report;
/// Cluster summary predicate.
pub mod summary;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::notification::Event;
use crate::resource::Resource;

pub use cluster::ClusterPredicate;
pub use health_check::HealthCheckPredicate;
pub use machine::MachinePredicate;
pub use report::HealthCheckReportPredicate;
pub use summary::ClusterSummaryPredicate;

/// Why a predicate reached its verdict.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    NotPaused,
    Paused,
    OldStateMissing,
    Unpaused,
    BecameReady,
    LabelsChanged,
    PhaseRunning,
    PhaseNotRunning,
    EnteredRunning,
    FeatureSummariesChanged,
    SpecChanged,
    Created,
    CreateNotActionable,
    Deleted,
    DeleteIgnored,
    Resync,
    Unchanged,
}

impl Reason {
    /// Human-readable explanation.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::NotPaused => "object is not paused",
            Self::Paused => "object is paused",
            Self::OldStateMissing => "old state is missing",
            Self::Unpaused => "cluster was unpaused",
            Self::BecameReady => "cluster became ready",
            Self::LabelsChanged => "cluster labels changed",
            Self::PhaseRunning => "machine is running",
            Self::PhaseNotRunning => "machine is not running",
            Self::EnteredRunning => "machine entered running phase",
            Self::FeatureSummariesChanged => "feature summaries changed",
            Self::SpecChanged => "spec changed",
            Self::Created => "object created",
            Self::CreateNotActionable => "newly created object is not actionable",
            Self::Deleted => "object deleted",
            Self::DeleteIgnored => "deletion does not affect health checks",
            Self::Resync => "resync carries no new information",
            Self::Unchanged => "no relevant field changed",
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Verdict of a relevance predicate, with the reason behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Decision {
    triggers: bool,
    reason: Reason,
}

impl Decision {
    /// The change may affect the aggregate; reconcile.
    #[must_use]
    pub const fn trigger(reason: Reason) -> Self {
        Self { triggers: true, reason }
    }

    /// The change is provably immaterial.
    #[must_use]
    pub const fn skip(reason: Reason) -> Self {
        Self { triggers: false, reason }
    }

    /// Returns true if reconciliation should run.
    #[must_use]
    pub const fn triggers(&self) -> bool {
        self.triggers
    }

    /// Why the verdict was reached.
    #[must_use]
    pub const fn reason(&self) -> Reason {
        self.reason
    }
}

/// Relevance decision for one kind.
///
/// Implementations must be pure functions of their arguments so they can be
/// called concurrently and repeatedly with identical results.
pub trait RelevancePredicate<R: Resource>: Send + Sync {
    /// Name used in logs and in the watch listing.
    fn name(&self) -> &'static str;

    /// Decides on a newly observed object.
    fn create(&self, object: &R) -> Decision;

    /// `old` is `None` when no prior snapshot was available.
    fn update(&self, old: Option<&R>, new: &R) -> Decision;

    /// Decides on a deletion. `object` is the last known state.
    fn delete(&self, object: &R) -> Decision;

    /// Decides on a resync.
    fn generic(&self, object: &R) -> Decision;

    /// Dispatches on the event's operation.
    fn decide(&self, event: &Event<R>) -> Decision {
        match event {
            Event::Create { object } => self.create(object),
            Event::Update { old, new } => self.update(old.as_ref(), new),
            Event::Delete { object, .. } => self.delete(object),
            Event::Generic { object } => self.generic(object),
        }
    }

    /// Returns true if the event should trigger reconciliation.
    fn evaluate(&self, event: &Event<R>) -> bool {
        self.decide(event).triggers()
    }
}
