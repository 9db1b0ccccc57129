//! Watch notifications.
//!
//! A [`Notification`] is a tagged union keyed by kind. Each variant carries a
//! typed [`Event`], so narrowing to a concrete view is a single `match` and
//! never a runtime cast.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::resource::{
    Cluster, ClusterSummary, HealthCheck, HealthCheckReport, Machine, ObjectKey, ObjectMeta,
    Resource, ResourceKind, SveltosCluster,
};

/// Kind of mutation a watch callback reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Object appeared.
    Create,
    /// Object changed.
    Update,
    /// Object disappeared.
    Delete,
    /// Periodic resync; carries no new information.
    Generic,
}

impl Operation {
    /// Lower-case name, as logged.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Generic => "generic",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed watch event for one kind.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq)]
pub enum Event<R> {
    Create {
        object: R,
    },

    /// `old` is `None` when the watch layer had no prior snapshot. That is a
    /// valid input, not an error.
    Update {
        old: Option<R>,
        new: R,
    },

    /// `object` is the last known state. With `final_state_unknown` set, only
    /// its identity is trustworthy.
    Delete {
        object: R,
        final_state_unknown: bool,
    },

    Generic {
        object: R,
    },
}

impl<R> Event<R> {
    /// Operation this event reports.
    #[must_use]
    pub const fn operation(&self) -> Operation {
        match self {
            Self::Create { .. } => Operation::Create,
            Self::Update { .. } => Operation::Update,
            Self::Delete { .. } => Operation::Delete,
            Self::Generic { .. } => Operation::Generic,
        }
    }

    /// Snapshot before the mutation, when one exists.
    #[must_use]
    pub const fn old_state(&self) -> Option<&R> {
        match self {
            Self::Update { old, .. } => old.as_ref(),
            _ => None,
        }
    }

    /// Snapshot after the mutation; the last known state for deletes.
    #[must_use]
    pub const fn new_state(&self) -> &R {
        match self {
            Self::Create { object }
            | Self::Delete { object, .. }
            | Self::Generic { object } => object,
            Self::Update { new, .. } => new,
        }
    }
}

impl<R: Resource> Event<R> {
    /// Identity of the object the event is about.
    #[must_use]
    pub fn key(&self) -> ObjectKey {
        self.new_state().meta().key()
    }
}

/// Normalized watch callback delivered to the registry.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    Cluster(Event<Cluster>),
    SveltosCluster(Event<SveltosCluster>),
    Machine(Event<Machine>),
    ClusterSummary(Event<ClusterSummary>),
    HealthCheckReport(Event<HealthCheckReport>),
    HealthCheck(Event<HealthCheck>),
}

macro_rules! with_event {
    ($notification:expr, $event:ident => $body:expr) => {
        match $notification {
            Notification::Cluster($event) => $body,
            Notification::SveltosCluster($event) => $body,
            Notification::Machine($event) => $body,
            Notification::ClusterSummary($event) => $body,
            Notification::HealthCheckReport($event) => $body,
            Notification::HealthCheck($event) => $body,
        }
    };
}

impl Notification {
    /// Kind tag of the object.
    #[must_use]
    pub const fn kind(&self) -> ResourceKind {
        match self {
            Self::Cluster(_) => ResourceKind::Cluster,
            Self::SveltosCluster(_) => ResourceKind::SveltosCluster,
            Self::Machine(_) => ResourceKind::Machine,
            Self::ClusterSummary(_) => ResourceKind::ClusterSummary,
            Self::HealthCheckReport(_) => ResourceKind::HealthCheckReport,
            Self::HealthCheck(_) => ResourceKind::HealthCheck,
        }
    }

    /// Operation the event reports.
    #[must_use]
    pub const fn operation(&self) -> Operation {
        with_event!(self, e => e.operation())
    }

    /// Identity of the object, for logging only.
    #[must_use]
    pub fn key(&self) -> ObjectKey {
        with_event!(self, e => e.key())
    }

    /// Metadata of the newest snapshot.
    #[must_use]
    pub fn meta(&self) -> &ObjectMeta {
        with_event!(self, e => e.new_state().meta())
    }

    /// Returns true for an update that carries no prior snapshot.
    #[must_use]
    pub const fn is_missing_old_state(&self) -> bool {
        with_event!(self, e => matches!(e, Event::Update { old: None, .. }))
    }
}

impl<R: Resource> From<Event<R>> for Notification {
    fn from(event: Event<R>) -> Self {
        R::into_notification(event)
    }
}
