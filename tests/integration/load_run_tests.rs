//! Fixture load integration tests
//!
//! Runs the whole fixture -> chunker -> writer -> reporter path.

#[cfg(test)]
mod tests {
    use crate::common::assertions::RunReportAssertions;
    use crate::common::{FixtureDir, RecordFactory, ScriptedStore};
    use db_seeds::SeedError;
    use db_seeds::config::UsersSeedConfig;
    use db_seeds::core::seed::{
        FixtureSource, RunDisposition, load_records, seed_collection, seed_records, seed_users,
    };
    use db_seeds::storage::{MemoryStore, StoreError};
    use serde_json::Value;
    use std::sync::Arc;

    fn users_source(path: std::path::PathBuf) -> FixtureSource {
        FixtureSource::new(path, "id")
            .collection("users")
            .fields(["id", "name", "email", "role", "avatar"])
    }

    /// 52 users go out as 25 + 25 + 2 and all land
    #[tokio::test]
    async fn test_fifty_two_users_in_three_batches() {
        let dir = FixtureDir::new();
        let store = Arc::new(ScriptedStore::accepting());

        let (records, report) = seed_collection(store.clone(), &users_source(dir.users(52)), 25)
            .await
            .unwrap();

        report.assert_succeeded();
        assert_eq!(records.len(), 52);
        assert_eq!(report.summary.total_batches, 3);

        let sizes: Vec<usize> = store.submitted().iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![25, 25, 2]);
        assert_eq!(store.submitted()[2], vec!["user-050", "user-051"]);
        assert_eq!(store.closes(), 1);
    }

    #[tokio::test]
    async fn test_projection_drops_unlisted_fields() {
        let dir = FixtureDir::new();
        let store = Arc::new(MemoryStore::new("users", "id").unwrap());

        seed_collection(store.clone(), &users_source(dir.users(3)), 25)
            .await
            .unwrap();

        for record in store.records() {
            assert!(record.get("password").is_none());
            assert_eq!(record.get("avatar"), Some(&Value::Null));
        }
    }

    /// A missing document aborts before any store call
    #[tokio::test]
    async fn test_missing_source_submits_nothing() {
        let dir = FixtureDir::new();
        let store = Arc::new(ScriptedStore::accepting());

        let err = seed_collection(store.clone(), &users_source(dir.path().join("absent.json")), 25)
            .await
            .unwrap_err();

        assert!(matches!(err, SeedError::SourceUnavailable { .. }));
        assert!(err.is_fatal_before_write());
        assert_eq!(store.submissions(), 0);
        assert_eq!(store.closes(), 1);
    }

    #[tokio::test]
    async fn test_malformed_source_submits_nothing() {
        let dir = FixtureDir::new();
        let path = dir.write("master-data.json", r#"{"users": [{"id": "a"}, "#);
        let store = Arc::new(ScriptedStore::accepting());

        let err = seed_collection(store.clone(), &users_source(path), 25)
            .await
            .unwrap_err();

        assert!(matches!(err, SeedError::MalformedSource(_)));
        assert_eq!(store.submissions(), 0);
    }

    /// 10 records with a transport failure on the only batch
    #[tokio::test]
    async fn test_single_batch_transport_failure() {
        let store = ScriptedStore::accepting()
            .failing_at(0, StoreError::Transport("connection refused".into()));

        let report = seed_records(store, &RecordFactory::records(10), 25)
            .await
            .unwrap();

        report.assert_failed_at(0);
        assert_eq!(report.summary.total_batches, 1);
        match report.disposition {
            RunDisposition::Failed { reason, .. } => assert!(reason.contains("connection refused")),
            RunDisposition::Succeeded => unreachable!(),
        }
    }

    /// A failure at batch k leaves k+1 submissions and no more
    #[tokio::test]
    async fn test_failure_stops_subsequent_batches() {
        for k in 0..3 {
            let store = Arc::new(
                ScriptedStore::accepting().failing_at(k, StoreError::Rejected("throttled".into())),
            );

            let report = load_records(&store, &RecordFactory::records(60), 25)
                .await
                .unwrap();

            report.assert_failed_at(k);
            assert_eq!(store.submissions(), k + 1);
        }
    }

    #[tokio::test]
    async fn test_failed_run_maps_to_batch_error() {
        let store = ScriptedStore::accepting().failing_at(1, StoreError::Rejected("bad item".into()));
        let report = seed_records(store, &RecordFactory::records(30), 25)
            .await
            .unwrap();

        let err = report.into_result().unwrap_err();
        assert!(matches!(err, SeedError::BatchFailed { index: 1, .. }));
        assert!(err.to_string().starts_with("Batch 2 failed"));
    }

    /// Configuration errors abort instead of being recorded as a batch failure
    #[tokio::test]
    async fn test_configuration_error_aborts_run() {
        let store = ScriptedStore::accepting()
            .failing_at(0, StoreError::Configuration("no credentials".into()));

        let err = seed_records(store, &RecordFactory::records(5), 25)
            .await
            .unwrap_err();
        assert!(matches!(err, SeedError::Config(_)));
    }

    /// Re-running the same load leaves the same keyed contents
    #[tokio::test]
    async fn test_rerun_is_idempotent() {
        let dir = FixtureDir::new();
        let source = users_source(dir.users(52));
        let store = Arc::new(MemoryStore::new("users", "id").unwrap());

        seed_collection(store.clone(), &source, 25).await.unwrap();
        let first = store.records();
        seed_collection(store.clone(), &source, 25).await.unwrap();

        assert_eq!(store.records(), first);
        assert_eq!(store.len(), 52);
        assert_eq!(store.submissions(), 6);
    }

    #[tokio::test]
    async fn test_seed_users_uses_config() {
        let dir = FixtureDir::new();
        let path = dir.users(7);
        let store = Arc::new(MemoryStore::new("users", "id").unwrap());
        let config = UsersSeedConfig {
            max_batch_size: 3,
            ..UsersSeedConfig::default()
        };

        let report = seed_users(store.clone(), &config, &path).await.unwrap();

        report.assert_succeeded();
        assert_eq!(report.summary.total_batches, 3);
        assert_eq!(store.len(), 7);
    }
}
