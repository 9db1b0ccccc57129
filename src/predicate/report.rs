use crate::compare::subtree_changed;
use crate::resource::HealthCheckReport;

use super::{Decision, Reason, RelevancePredicate};

/// Predicate for health-check reports. Any new or changed report is new
/// information about a cluster's health.
#[derive(Debug, Clone, Copy, Default)]
pub struct HealthCheckReportPredicate;

impl RelevancePredicate<HealthCheckReport> for HealthCheckReportPredicate {
    fn name(&self) -> &'static str {
        "health-check-report"
    }

    fn create(&self, _object: &HealthCheckReport) -> Decision {
        Decision::trigger(Reason::Created)
    }

    fn update(&self, old: Option<&HealthCheckReport>, new: &HealthCheckReport) -> Decision {
        let Some(old) = old else {
            return Decision::trigger(Reason::OldStateMissing);
        };

        if subtree_changed(&old.spec, &new.spec) {
            return Decision::trigger(Reason::SpecChanged);
        }

        Decision::skip(Reason::Unchanged)
    }

    fn delete(&self, _object: &HealthCheckReport) -> Decision {
        Decision::trigger(Reason::Deleted)
    }

    fn generic(&self, _object: &HealthCheckReport) -> Decision {
        Decision::skip(Reason::Resync)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::notification::Event;
    use crate::resource::{HealthStatus, ObjectMeta, ObjectRef, ResourceStatus};

    fn coredns(status: HealthStatus, resource: Option<serde_json::Value>) -> ResourceStatus {
        ResourceStatus {
            object_ref: ObjectRef {
                api_version: "apps/v1".to_string(),
                kind: "Deployment".to_string(),
                namespace: Some("kube-system".to_string()),
                name: "coredns".to_string(),
            },
            resource,
            health_status: status,
            message: None,
        }
    }

    fn report(statuses: Vec<ResourceStatus>) -> HealthCheckReport {
        let mut report = HealthCheckReport::new(
            ObjectMeta::namespaced("default", "deployments--capi--default--prod"),
            "default",
            "prod",
            "deployments",
        );
        report.spec.resource_statuses = statuses;
        report
    }

    fn update(old: Option<HealthCheckReport>, new: HealthCheckReport) -> Decision {
        HealthCheckReportPredicate.decide(&Event::Update { old, new })
    }

    #[test]
    fn create_triggers() {
        assert_eq!(
            HealthCheckReportPredicate.decide(&Event::Create { object: report(Vec::new()) }),
            Decision::trigger(Reason::Created)
        );
    }

    #[test]
    fn update_without_old_state_triggers() {
        assert_eq!(update(None, report(Vec::new())), Decision::trigger(Reason::OldStateMissing));
    }

    #[test]
    fn update_health_status_change_triggers() {
        assert_eq!(
            update(
                Some(report(vec![coredns(HealthStatus::Healthy, None)])),
                report(vec![coredns(HealthStatus::Degraded, None)])
            ),
            Decision::trigger(Reason::SpecChanged)
        );
    }

    #[test]
    fn update_metadata_only_skips() {
        let old = report(vec![coredns(HealthStatus::Healthy, None)]);
        let mut new = old.clone();
        new.meta.labels.insert("projectsveltos.io/cluster".to_string(), "prod".to_string());
        assert_eq!(update(Some(old), new), Decision::skip(Reason::Unchanged));
    }

    #[test]
    fn update_collected_resource_key_order_irrelevant() {
        let a: serde_json::Value =
            serde_json::from_str(r#"{"spec": {"replicas": 2}, "status": {"readyReplicas": 2}}"#).unwrap();
        let b: serde_json::Value =
            serde_json::from_str(r#"{"status": {"readyReplicas": 2}, "spec": {"replicas": 2}}"#).unwrap();
        assert_eq!(
            update(
                Some(report(vec![coredns(HealthStatus::Healthy, Some(a))])),
                report(vec![coredns(HealthStatus::Healthy, Some(b))])
            ),
            Decision::skip(Reason::Unchanged)
        );
    }

    #[test]
    fn update_collected_resource_change_triggers() {
        let before = json!({"status": {"readyReplicas": 2}});
        let after = json!({"status": {"readyReplicas": 1}});
        assert!(update(
            Some(report(vec![coredns(HealthStatus::Healthy, Some(before))])),
            report(vec![coredns(HealthStatus::Healthy, Some(after))])
        )
        .triggers());
    }

    #[test]
    fn delete_triggers() {
        assert!(HealthCheckReportPredicate.evaluate(&Event::Delete {
            object: report(Vec::new()),
            final_state_unknown: true,
        }));
    }

    #[test]
    fn generic_skips() {
        assert!(!HealthCheckReportPredicate.evaluate(&Event::Generic { object: report(Vec::new()) }));
    }
}
