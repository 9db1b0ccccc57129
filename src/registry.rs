//! Predicate registry.
//!
//! Binds each watched kind to its relevance predicate and dispatches
//! notifications. The registry is assembled once through [`RegistryBuilder`]
//! and has no mutating API afterwards, so it can be shared across watch
//! threads behind an `Arc` without locking.

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use crate::config::{RegistryConfig, UnknownKindPolicy};
use crate::error::{RegistryError, RegistryResult};
use crate::notification::Notification;
use crate::predicate::{
    ClusterPredicate, ClusterSummaryPredicate, Decision, HealthCheckPredicate,
    HealthCheckReportPredicate, MachinePredicate, RelevancePredicate,
};
use crate::resource::{
    Cluster, ClusterSummary, HealthCheck, HealthCheckReport, Machine, Resource, ResourceKind,
    SveltosCluster,
};
use crate::sink::TriggerSink;

/// Type-erased predicate stored in the registry.
trait ErasedPredicate: Send + Sync {
    fn name(&self) -> &'static str;

    /// `None` if the notification is not of the kind this entry was built for.
    fn decide(&self, notification: &Notification) -> Option<Decision>;
}

struct Typed<R, P> {
    predicate: P,
    _kind: PhantomData<fn() -> R>,
}

impl<R, P> ErasedPredicate for Typed<R, P>
where
    R: Resource,
    P: RelevancePredicate<R>,
{
    fn name(&self) -> &'static str {
        RelevancePredicate::<R>::name(&self.predicate)
    }

    fn decide(&self, notification: &Notification) -> Option<Decision> {
        R::event(notification).map(|event| RelevancePredicate::<R>::decide(&self.predicate, event))
    }
}

/// Assembles a [`PredicateRegistry`].
pub struct RegistryBuilder {
    config: RegistryConfig,
    predicates: BTreeMap<ResourceKind, Box<dyn ErasedPredicate>>,
}

impl RegistryBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            config,
            predicates: BTreeMap::new(),
        }
    }

    /// Binds `R::KIND` to `predicate`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateRegistration`] if `R::KIND` already
    /// has a predicate. The builder is consumed either way.
    pub fn try_register<R, P>(mut self, predicate: P) -> RegistryResult<Self>
    where
        R: Resource,
        P: RelevancePredicate<R> + 'static,
    {
        if self.predicates.contains_key(&R::KIND) {
            return Err(RegistryError::DuplicateRegistration { kind: R::KIND });
        }

        self.predicates.insert(
            R::KIND,
            Box::new(Typed::<R, P> {
                predicate,
                _kind: PhantomData,
            }),
        );
        Ok(self)
    }

    /// Binds `R::KIND` to `predicate`.
    ///
    /// # Panics
    ///
    /// Panics if `R::KIND` already has a predicate. A double registration is a
    /// wiring bug and must stop start-up.
    #[must_use]
    pub fn register<R, P>(self, predicate: P) -> Self
    where
        R: Resource,
        P: RelevancePredicate<R> + 'static,
    {
        match self.try_register::<R, P>(predicate) {
            Ok(builder) => builder,
            Err(err) => panic!("{err}"),
        }
    }

    /// Freezes the bindings.
    #[must_use]
    pub fn build(self) -> PredicateRegistry {
        PredicateRegistry {
            config: self.config,
            predicates: self.predicates,
        }
    }
}

impl fmt::Debug for RegistryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryBuilder")
            .field("config", &self.config)
            .field("kinds", &self.predicates.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Kind to predicate bindings, read-only after construction.
pub struct PredicateRegistry {
    config: RegistryConfig,
    predicates: BTreeMap<ResourceKind, Box<dyn ErasedPredicate>>,
}

impl PredicateRegistry {
    /// Starts an empty registry with the default configuration.
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new(RegistryConfig::default())
    }

    /// Starts an empty registry with `config`.
    #[must_use]
    pub fn builder_with_config(config: RegistryConfig) -> RegistryBuilder {
        RegistryBuilder::new(config)
    }

    /// Registry with every kind the ClusterHealthCheck controller watches.
    #[must_use]
    pub fn cluster_health_check(config: RegistryConfig) -> Self {
        Self::builder_with_config(config)
            .register::<Cluster, _>(ClusterPredicate)
            .register::<SveltosCluster, _>(ClusterPredicate)
            .register::<Machine, _>(MachinePredicate)
            .register::<ClusterSummary, _>(ClusterSummaryPredicate)
            .register::<HealthCheckReport, _>(HealthCheckReportPredicate)
            .register::<HealthCheck, _>(HealthCheckPredicate)
            .build()
    }

    /// Configuration the registry was built with.
    #[must_use]
    pub const fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Returns true if `kind` has a predicate.
    #[must_use]
    pub fn contains(&self, kind: ResourceKind) -> bool {
        self.predicates.contains_key(&kind)
    }

    /// Watched kinds and the name of the predicate bound to each, in kind
    /// order.
    pub fn watches(&self) -> impl Iterator<Item = (ResourceKind, &'static str)> + '_ {
        self.predicates.iter().map(|(kind, p)| (*kind, p.name()))
    }

    /// Runs the kind's predicate and logs its verdict.
    ///
    /// Returns `None` if no predicate is bound to the notification's kind.
    pub fn decide(&self, notification: &Notification) -> Option<Decision> {
        let entry = self.predicates.get(&notification.kind())?;
        let decision = entry.decide(notification)?;

        if self.config.log_verdicts {
            tracing::debug!(
                predicate = entry.name(),
                kind = %notification.kind(),
                operation = %notification.operation(),
                key = %notification.key(),
                uid = ?notification.meta().uid,
                reason = %decision.reason(),
                triggers = decision.triggers(),
                "relevance verdict"
            );
        }

        Some(decision)
    }

    /// Returns true if the notification should trigger reconciliation.
    ///
    /// A kind without a predicate is handled according to
    /// [`UnknownKindPolicy`]; it is never dropped silently.
    ///
    /// # Panics
    ///
    /// Panics on an unregistered kind when the policy is
    /// [`UnknownKindPolicy::Panic`].
    pub fn evaluate(&self, notification: &Notification) -> bool {
        match self.decide(notification) {
            Some(decision) => decision.triggers(),
            None => self.unregistered(notification),
        }
    }

    /// Evaluates the notification and hands it to `sink` if it is relevant.
    /// Returns the verdict.
    pub fn dispatch(&self, notification: &Notification, sink: &dyn TriggerSink) -> bool {
        let triggers = self.evaluate(notification);
        if triggers {
            sink.trigger(notification);
        }
        triggers
    }

    fn unregistered(&self, notification: &Notification) -> bool {
        let err = RegistryError::Unregistered {
            kind: notification.kind(),
        };
        match self.config.unknown_kind {
            UnknownKindPolicy::Panic => panic!("{err}"),
            UnknownKindPolicy::Trigger => {
                tracing::error!(
                    kind = %notification.kind(),
                    operation = %notification.operation(),
                    key = %notification.key(),
                    uid = ?notification.meta().uid,
                    error = %err,
                    "watch wired without a relevance predicate, reconciling conservatively"
                );
                true
            }
        }
    }
}

impl fmt::Debug for PredicateRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredicateRegistry")
            .field("config", &self.config)
            .field("watches", &self.watches().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;
    use uuid::Uuid;

    use super::*;
    use crate::notification::Event;
    use crate::predicate::Reason;
    use crate::resource::{MachinePhase, ObjectMeta};
    use crate::sink::ChannelSink;

    fn registry() -> PredicateRegistry {
        PredicateRegistry::cluster_health_check(RegistryConfig::default())
    }

    fn running_machine() -> Machine {
        Machine::new(ObjectMeta::namespaced("default", "m-0"), "prod").with_phase(MachinePhase::Running)
    }

    #[test]
    fn cluster_health_check_registers_every_kind() {
        let registry = registry();
        for kind in ResourceKind::ALL {
            assert!(registry.contains(kind), "{kind} not registered");
        }
    }

    #[test]
    fn watches_lists_kinds_in_order() {
        let watches: Vec<_> = registry().watches().collect();
        assert_eq!(
            watches,
            vec![
                (ResourceKind::Cluster, "cluster"),
                (ResourceKind::SveltosCluster, "cluster"),
                (ResourceKind::Machine, "machine"),
                (ResourceKind::ClusterSummary, "cluster-summary"),
                (ResourceKind::HealthCheckReport, "health-check-report"),
                (ResourceKind::HealthCheck, "health-check"),
            ]
        );
    }

    #[test]
    fn try_register_rejects_duplicate_kind() {
        let err = PredicateRegistry::builder()
            .register::<Machine, _>(MachinePredicate)
            .try_register::<Machine, _>(MachinePredicate)
            .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateRegistration { kind: ResourceKind::Machine });
    }

    #[test]
    #[should_panic(expected = "registered twice")]
    fn register_panics_on_duplicate_kind() {
        let _ = PredicateRegistry::builder()
            .register::<Cluster, _>(ClusterPredicate)
            .register::<Cluster, _>(ClusterPredicate);
    }

    #[test]
    fn both_cluster_kinds_may_share_a_predicate() {
        let registry = PredicateRegistry::builder()
            .register::<Cluster, _>(ClusterPredicate)
            .register::<SveltosCluster, _>(ClusterPredicate)
            .build();
        assert!(registry.contains(ResourceKind::Cluster));
        assert!(registry.contains(ResourceKind::SveltosCluster));
        assert!(!registry.contains(ResourceKind::Machine));
    }

    #[test]
    fn evaluate_dispatches_to_kind_predicate() {
        let registry = registry();
        let create = Notification::from(Event::Create {
            object: running_machine(),
        });
        assert!(registry.evaluate(&create));
        assert_eq!(registry.decide(&create).map(|d| d.reason()), Some(Reason::PhaseRunning));

        let delete = Notification::from(Event::Delete {
            object: running_machine(),
            final_state_unknown: false,
        });
        assert!(!registry.evaluate(&delete));
    }

    #[test]
    fn unregistered_kind_triggers_conservatively() {
        let registry = PredicateRegistry::builder()
            .register::<Cluster, _>(ClusterPredicate)
            .build();
        let generic = Notification::from(Event::Generic {
            object: running_machine(),
        });
        assert!(registry.decide(&generic).is_none());
        assert!(registry.evaluate(&generic));
    }

    #[test]
    #[traced_test]
    fn unregistered_kind_logs_error() {
        let registry = PredicateRegistry::builder()
            .register::<Cluster, _>(ClusterPredicate)
            .build();
        let machine = Machine::new(
            ObjectMeta::namespaced("default", "m-7").with_uid(Uuid::from_u128(7)),
            "prod",
        );
        assert!(registry.evaluate(&Notification::from(Event::Create { object: machine })));

        assert!(logs_contain("ERROR"));
        assert!(logs_contain("No predicate registered for kind Machine"));
        assert!(logs_contain("key=default/m-7"));
        assert!(logs_contain(&Uuid::from_u128(7).to_string()));
    }

    #[test]
    #[traced_test]
    fn verdict_logged_at_debug() {
        let registry = registry();
        assert!(registry.evaluate(&Notification::from(Event::Create {
            object: running_machine(),
        })));

        assert!(logs_contain("DEBUG"));
        assert!(logs_contain("relevance verdict"));
        assert!(logs_contain("reason=machine is running"));
        assert!(logs_contain("triggers=true"));
        assert!(!logs_contain("ERROR"));
    }

    #[test]
    #[should_panic(expected = "No predicate registered for kind Machine")]
    fn unregistered_kind_panics_when_configured() {
        let config = RegistryConfig {
            unknown_kind: UnknownKindPolicy::Panic,
            ..RegistryConfig::default()
        };
        let registry = PredicateRegistry::builder_with_config(config).build();
        registry.evaluate(&Notification::from(Event::Create {
            object: running_machine(),
        }));
    }

    #[test]
    fn dispatch_forwards_only_relevant_notifications() {
        let registry = registry();
        let (sink, rx) = ChannelSink::new(8);

        let relevant = Notification::from(Event::Create {
            object: running_machine(),
        });
        let resync = Notification::from(Event::Generic {
            object: running_machine(),
        });

        assert!(registry.dispatch(&relevant, &sink));
        assert!(!registry.dispatch(&resync, &sink));

        let queued: Vec<_> = rx.try_iter().collect();
        assert_eq!(queued.len(), 1);
        assert_eq!(queued[0].kind, ResourceKind::Machine);
        assert_eq!(queued[0].key.to_string(), "default/m-0");
    }

    #[test]
    fn verdict_logging_can_be_disabled() {
        let config = RegistryConfig {
            log_verdicts: false,
            ..RegistryConfig::default()
        };
        let registry = PredicateRegistry::cluster_health_check(config);
        assert!(!registry.config().log_verdicts);
        assert!(registry.evaluate(&Notification::from(Event::Create {
            object: running_machine(),
        })));
    }

    #[test]
    fn registry_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PredicateRegistry>();
    }
}
