//! DynamoDB Local tests
//!
//! Start DynamoDB Local with a `users-service-db` table keyed on `id`, then:
//! `DYNAMODB_ENDPOINT=http://localhost:8000 cargo test -- --ignored`

#[cfg(test)]
mod tests {
    use crate::common::FixtureDir;
    use crate::common::assertions::RunReportAssertions;
    use crate::skip_without_env;
    use db_seeds::config::{DynamoDbConfig, UsersSeedConfig};
    use db_seeds::core::seed::seed_users;
    use db_seeds::storage::DynamoDbStore;

    fn config() -> UsersSeedConfig {
        UsersSeedConfig {
            dynamodb: DynamoDbConfig {
                endpoint: std::env::var("DYNAMODB_ENDPOINT").ok(),
                timeout_ms: Some(5_000),
                ..DynamoDbConfig::default()
            },
            ..UsersSeedConfig::default()
        }
    }

    #[tokio::test]
    #[ignore]
    async fn test_seed_users_into_dynamodb_local() {
        skip_without_env!("DYNAMODB_ENDPOINT");

        let dir = FixtureDir::new();
        let path = dir.users(52);
        let config = config();

        let store = DynamoDbStore::connect(&config.dynamodb).await.unwrap();
        let report = seed_users(store, &config, &path).await.unwrap();

        report.assert_succeeded();
        assert_eq!(report.summary.total_batches, 3);
    }

    #[tokio::test]
    #[ignore]
    async fn test_missing_table_fails_first_batch() {
        skip_without_env!("DYNAMODB_ENDPOINT");

        let dir = FixtureDir::new();
        let path = dir.users(3);
        let mut config = config();
        config.dynamodb.table_name = "no-such-table".to_string();

        let store = DynamoDbStore::connect(&config.dynamodb).await.unwrap();
        let report = seed_users(store, &config, &path).await.unwrap();

        report.assert_failed_at(0);
    }
}
