//! SQL target integration tests
//!
//! Script replay and table upserts against file-backed SQLite.

#[cfg(test)]
mod tests {
    use crate::common::assertions::RunReportAssertions;
    use crate::common::{FixtureDir, TestDatabase};
    use db_seeds::SeedError;
    use db_seeds::config::SqlSeedConfig;
    use db_seeds::core::seed::{
        FixtureSource, SeedTarget, SqlScript, seed_collection, seed_sql_target,
    };
    use db_seeds::storage::database::execute_script;
    use db_seeds::storage::{BatchStore, SqlTableStore};

    const SCRIPT: &str = "
        CREATE TABLE IF NOT EXISTS categories (id TEXT PRIMARY KEY, name TEXT NOT NULL);
        INSERT OR REPLACE INTO categories (id, name) VALUES ('c-1', 'Peripherals');
        INSERT OR REPLACE INTO categories (id, name) VALUES ('c-2', 'Displays');
    ";

    fn sqlite_target(db: &TestDatabase, script: &str) -> SqlSeedConfig {
        SqlSeedConfig {
            database: db.config(),
            script: script.into(),
            summary_query: Some("SELECT COUNT(*) AS categories FROM categories".to_string()),
        }
    }

    #[tokio::test]
    async fn test_execute_script_with_summary() {
        let db = TestDatabase::new().await;
        let dir = FixtureDir::new();
        let script = SqlScript::load(&dir.write("seed.sql", SCRIPT)).await.unwrap();

        let conn = db.connect().await;
        let report = execute_script(
            &conn,
            &script,
            Some("SELECT COUNT(*) AS categories FROM categories"),
        )
        .await
        .unwrap();
        conn.close().await.unwrap();

        assert_eq!(report.bytes, SCRIPT.len());
        assert_eq!(report.summary.len(), 1);
        assert_eq!(db.count("categories").await, 2);
    }

    #[tokio::test]
    async fn test_seed_sql_target_is_rerunnable() {
        let db = TestDatabase::new().await;
        let dir = FixtureDir::new();
        let path = dir.write("seed.sql", SCRIPT);
        let config = sqlite_target(&db, "seed.sql");

        seed_sql_target(SeedTarget::Inventory, &config, &path).await.unwrap();
        seed_sql_target(SeedTarget::Inventory, &config, &path).await.unwrap();

        assert_eq!(db.count("categories").await, 2);
    }

    #[tokio::test]
    async fn test_missing_script_fails_before_connecting() {
        let dir = FixtureDir::new();
        let mut config = SqlSeedConfig::auth_defaults();
        // Nothing listens here; a connection attempt would be a different error
        config.database.host = "127.0.0.1".to_string();
        config.database.port = 1;

        let err = seed_sql_target(SeedTarget::Auth, &config, &dir.path().join("missing.sql"))
            .await
            .unwrap_err();
        assert!(matches!(err, SeedError::SourceUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_failing_statement_is_database_error() {
        let db = TestDatabase::new().await;
        let dir = FixtureDir::new();
        let path = dir.write("seed.sql", "INSERT INTO nowhere VALUES (1);");

        let err = seed_sql_target(SeedTarget::Orders, &sqlite_target(&db, "seed.sql"), &path)
            .await
            .unwrap_err();
        assert!(matches!(err, SeedError::Database(_)));
    }

    #[tokio::test]
    async fn test_table_store_upserts_batches() {
        let db = TestDatabase::with_products_table().await;
        let dir = FixtureDir::new();
        let source = FixtureSource::new(dir.products(30), "id");

        let store = SqlTableStore::new(db.connect().await, "products", "id").unwrap();
        assert_eq!(store.name(), "SQLite table products");
        let (_, report) = seed_collection(store, &source, 25).await.unwrap();

        report.assert_succeeded();
        assert_eq!(report.summary.total_batches, 2);
        assert_eq!(db.count("products").await, 30);
    }

    #[tokio::test]
    async fn test_table_store_rerun_overwrites_in_place() {
        let db = TestDatabase::with_products_table().await;
        let dir = FixtureDir::new();
        let source = FixtureSource::new(dir.products(5), "id");

        for _ in 0..2 {
            let store = SqlTableStore::new(db.connect().await, "products", "id").unwrap();
            seed_collection(store, &source, 2).await.unwrap();
        }
        assert_eq!(db.count("products").await, 5);

        let path = dir.write("products.json", r#"[{"id": "p-000", "name": "Renamed"}]"#);
        let store = SqlTableStore::new(db.connect().await, "products", "id").unwrap();
        seed_collection(store, &FixtureSource::new(path, "id"), 25)
            .await
            .unwrap();

        assert_eq!(db.count("products").await, 5);
        assert_eq!(
            db.text("products", "p-000", "name").await.as_deref(),
            Some("Renamed")
        );
    }

    /// A rejected batch rolls back and stops the run
    #[tokio::test]
    async fn test_table_store_rejected_batch_stops_run() {
        let db = TestDatabase::with_products_table().await;
        let dir = FixtureDir::new();
        let path = dir.write(
            "products.json",
            r#"[{"id": "a", "name": "ok"}, {"id": "b", "colour": "no such column"}, {"id": "c"}]"#,
        );

        let store = SqlTableStore::new(db.connect().await, "products", "id").unwrap();
        let (_, report) = seed_collection(store, &FixtureSource::new(path, "id"), 1)
            .await
            .unwrap();

        report.assert_failed_at(1);
        assert_eq!(db.count("products").await, 1);
    }

    #[tokio::test]
    async fn test_table_store_requires_names() {
        let db = TestDatabase::new().await;
        assert!(matches!(
            SqlTableStore::new(db.connect().await, "", "id"),
            Err(SeedError::Config(_))
        ));
    }
}
