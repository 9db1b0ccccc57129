use crate::compare::subtree_changed;
use crate::resource::HealthCheck;

use super::{Decision, Reason, RelevancePredicate};

/// Predicate for health-check definitions. Any change to the policy itself
/// re-evaluates every binding that references it.
#[derive(Debug, Clone, Copy, Default)]
pub struct HealthCheckPredicate;

impl RelevancePredicate<HealthCheck> for HealthCheckPredicate {
    fn name(&self) -> &'static str {
        "health-check"
    }

    fn create(&self, _object: &HealthCheck) -> Decision {
        Decision::trigger(Reason::Created)
    }

    fn update(&self, old: Option<&HealthCheck>, new: &HealthCheck) -> Decision {
        let Some(old) = old else {
            return Decision::trigger(Reason::OldStateMissing);
        };

        if subtree_changed(&old.spec, &new.spec) {
            return Decision::trigger(Reason::SpecChanged);
        }

        Decision::skip(Reason::Unchanged)
    }

    fn delete(&self, _object: &HealthCheck) -> Decision {
        Decision::trigger(Reason::Deleted)
    }

    fn generic(&self, _object: &HealthCheck) -> Decision {
        Decision::skip(Reason::Resync)
    }
}
