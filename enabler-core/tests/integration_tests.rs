use enabler_core::*;

#[test]
fn test_cluster_context_filters_follow_kind_naming() {
    for name in ["keitaro", "dev", "a", "team-x_2"] {
        let ctx = ClusterContext::new(name).unwrap();
        assert_eq!(ctx.control_plane_filter(), format!("{name}-control-plane"));
        assert_eq!(ctx.worker_filter(), format!("{name}-worker"));
    }
}

#[test]
fn test_cluster_context_serialization() {
    let ctx = ClusterContext::new("dev").unwrap();

    let json = serde_json::to_string(&ctx).unwrap();
    assert_eq!(json, "\"dev\"");

    let deserialized: ClusterContext = serde_json::from_str(&json).unwrap();
    assert_eq!(ctx, deserialized);

    // Empty contexts are rejected on the way in too
    assert!(serde_json::from_str::<ClusterContext>("\"\"").is_err());
}

#[test]
fn test_container_record_serialization() {
    let record = ContainerRecord::new(
        ContainerId::new("f00d").unwrap(),
        vec!["/dev-worker2".to_string()],
        ContainerState::Restarting,
    );

    let json = serde_json::to_string(&record).unwrap();
    let deserialized: ContainerRecord = serde_json::from_str(&json).unwrap();

    assert_eq!(record, deserialized);
    assert_eq!(deserialized.display_name(), "dev-worker2");
}

#[test]
fn test_every_error_kind_maps_to_an_exit_code() {
    let errors = [
        Error::ClusterNotFound {
            context: "dev".to_string(),
            exit_code: Some(3),
            detail: String::new(),
        },
        Error::RuntimeUnavailable {
            message: String::new(),
        },
        Error::ListFailure {
            filters: "dev-worker".to_string(),
            message: String::new(),
        },
        Error::StopFailure {
            container: "dev-worker".to_string(),
            message: String::new(),
        },
        Error::InvalidConfig {
            message: String::new(),
        },
    ];

    let codes: Vec<i32> = errors
        .iter()
        .map(|e| e.exit_code(MissingClusterPolicy::Ignore))
        .collect();

    assert_eq!(codes, vec![3, 69, 70, 1, 1]);
}

#[test]
fn test_report_preserves_order() {
    let mut report = StopReport::new(ClusterContext::default());
    for (id, state) in [("c", "running"), ("a", "exited"), ("b", "running")] {
        let record = ContainerRecord::new(
            ContainerId::new(id).unwrap(),
            vec![format!("/{id}")],
            ContainerState::from(state),
        );
        let outcome = if record.state.is_running() {
            StopOutcome::Stopped
        } else {
            StopOutcome::Skipped {
                state: record.state.clone(),
            }
        };
        report.push(StopEntry::new(&record, outcome));
    }

    let names: Vec<&str> = report.entries().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["c", "a", "b"]);
    assert_eq!(report.stopped(), 2);
    assert_eq!(report.skipped(), 1);
    assert!(!report.is_empty());
}
