use crate::compare::labels_changed;
use crate::resource::ClusterView;

use super::{Decision, Reason, RelevancePredicate};

/// Predicate shared by both cluster kinds.
///
/// A cluster matters when it becomes eligible for health checks (unpaused,
/// ready) or when its labels change, since labels drive cluster selection.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClusterPredicate;

impl<C: ClusterView> RelevancePredicate<C> for ClusterPredicate {
    fn name(&self) -> &'static str {
        "cluster"
    }

    fn create(&self, object: &C) -> Decision {
        if object.paused() {
            Decision::skip(Reason::Paused)
        } else {
            Decision::trigger(Reason::NotPaused)
        }
    }

    fn update(&self, old: Option<&C>, new: &C) -> Decision {
        let Some(old) = old else {
            return Decision::trigger(Reason::OldStateMissing);
        };

        if old.paused() && !new.paused() {
            return Decision::trigger(Reason::Unpaused);
        }

        if let (Some(false), Some(true)) = (old.ready(), new.ready()) {
            return Decision::trigger(Reason::BecameReady);
        }

        if labels_changed(old.labels(), new.labels()) {
            return Decision::trigger(Reason::LabelsChanged);
        }

        Decision::skip(Reason::Unchanged)
    }

    fn delete(&self, _object: &C) -> Decision {
        Decision::trigger(Reason::Deleted)
    }

    fn generic(&self, _object: &C) -> Decision {
        Decision::skip(Reason::Resync)
    }
}
