use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};

use chc_relevance::resource::{HealthCheckReport, HealthStatus, ObjectRef, ResourceStatus};
use chc_relevance::{
    ClusterSummary, Event, FeatureId, FeatureStatus, FeatureSummary, Notification, ObjectMeta,
    PredicateRegistry, RegistryConfig, SveltosCluster,
};

fn make_registry() -> PredicateRegistry {
    PredicateRegistry::cluster_health_check(RegistryConfig {
        log_verdicts: false,
        ..RegistryConfig::default()
    })
}

fn make_report(replicas: u64) -> HealthCheckReport {
    let mut report = HealthCheckReport::new(
        ObjectMeta::namespaced("default", "deployments--capi--default--prod"),
        "default",
        "prod",
        "deployments",
    );
    // 128 collected deployments so the deep comparison does realistic work.
    report.spec.resource_statuses = (0..128)
        .map(|i| ResourceStatus {
            object_ref: ObjectRef {
                api_version: "apps/v1".to_string(),
                kind: "Deployment".to_string(),
                namespace: Some("apps".to_string()),
                name: format!("svc-{i}"),
            },
            resource: Some(serde_json::json!({
                "spec": {"replicas": replicas},
                "status": {"readyReplicas": replicas, "conditions": [{"type": "Available", "status": "True"}]}
            })),
            health_status: HealthStatus::Healthy,
            message: None,
        })
        .collect();
    report
}

fn bench_cluster_update(c: &mut Criterion) {
    let registry = make_registry();
    let mut meta = ObjectMeta::namespaced("mgmt", "edge");
    for i in 0..32 {
        meta = meta.with_label(format!("label-{i}"), format!("value-{i}"));
    }
    let old = SveltosCluster::new(meta).with_ready(true);
    let n = Notification::from(Event::Update {
        old: Some(old.clone()),
        new: old,
    });

    c.bench_function("predicates/cluster_update_labels_equal", |b| {
        b.iter(|| registry.evaluate(black_box(&n)));
    });
}

fn bench_summary_update(c: &mut Criterion) {
    let registry = make_registry();
    let entries: Vec<FeatureSummary> = [FeatureId::Resources, FeatureId::Helm, FeatureId::Kustomize]
        .into_iter()
        .map(|id| {
            let mut entry = FeatureSummary::new(id, FeatureStatus::Provisioned);
            entry.hash = Some(vec![0xab; 32]);
            entry
        })
        .collect();
    let old = ClusterSummary::new(ObjectMeta::namespaced("default", "capi-prod-profile"), entries);
    let n = Notification::from(Event::Update {
        old: Some(old.clone()),
        new: old,
    });

    c.bench_function("predicates/summary_update_equal", |b| {
        b.iter(|| registry.evaluate(black_box(&n)));
    });
}

fn bench_report_update(c: &mut Criterion) {
    let registry = make_registry();
    let equal = Notification::from(Event::Update {
        old: Some(make_report(2)),
        new: make_report(2),
    });
    let changed = Notification::from(Event::Update {
        old: Some(make_report(2)),
        new: make_report(3),
    });

    c.bench_function("predicates/report_update_equal_128", |b| {
        b.iter(|| registry.evaluate(black_box(&equal)));
    });
    c.bench_function("predicates/report_update_changed_128", |b| {
        b.iter(|| registry.evaluate(black_box(&changed)));
    });
}

criterion_group!(
    benches,
    bench_cluster_update,
    bench_summary_update,
    bench_report_update
);
criterion_main!(benches);
