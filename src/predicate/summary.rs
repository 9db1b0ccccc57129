use crate::compare::subtree_changed;
use crate::resource::ClusterSummary;

use super::{Decision, Reason, RelevancePredicate};

/// Predicate for cluster summaries.
///
/// Only `status.feature_summaries` is compared.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClusterSummaryPredicate;

impl RelevancePredicate<ClusterSummary> for ClusterSummaryPredicate {
    fn name(&self) -> &'static str {
        "cluster-summary"
    }

    fn create(&self, _object: &ClusterSummary) -> Decision {
        Decision::skip(Reason::CreateNotActionable)
    }

    fn update(&self, old: Option<&ClusterSummary>, new: &ClusterSummary) -> Decision {
        let Some(old) = old else {
            return Decision::trigger(Reason::OldStateMissing);
        };

        if subtree_changed(&old.status.feature_summaries, &new.status.feature_summaries) {
            return Decision::trigger(Reason::FeatureSummariesChanged);
        }

        Decision::skip(Reason::Unchanged)
    }

    fn delete(&self, _object: &ClusterSummary) -> Decision {
        Decision::trigger(Reason::Deleted)
    }

    fn generic(&self, _object: &ClusterSummary) -> Decision {
        Decision::skip(Reason::Resync)
    }
}
