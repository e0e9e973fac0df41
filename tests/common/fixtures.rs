//! Test fixtures and data factories

use db_seeds::core::seed::Record;
use serde_json::{Value, json};
use std::path::PathBuf;
use tempfile::TempDir;

/// Factory for user-shaped records
pub struct RecordFactory;

impl RecordFactory {
    /// A user document element, as found in master-data.json
    pub fn user(i: usize) -> Value {
        json!({
            "id": format!("user-{:03}", i),
            "name": format!("User {}", i),
            "email": format!("user{}@example.com", i),
            "role": if i % 10 == 0 { "admin" } else { "customer" },
            "avatar": null,
            "password": "not-copied"
        })
    }

    pub fn users(n: usize) -> Vec<Value> {
        (0..n).map(Self::user).collect()
    }

    /// Records keyed by `id`, ready to hand to a store
    pub fn records(n: usize) -> Vec<Record> {
        (0..n)
            .map(|i| match Self::user(i) {
                Value::Object(mut map) => {
                    map.remove("password");
                    Record::new(map).expect("factory record is valid")
                }
                _ => unreachable!(),
            })
            .collect()
    }
}

/// Temporary directory holding fixture documents and scripts
pub struct FixtureDir {
    dir: TempDir,
}

impl FixtureDir {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Write `content` to `name` and return its path
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content).expect("Failed to write fixture");
        path
    }

    /// `master-data.json` with `n` users under the `users` member
    pub fn users(&self, n: usize) -> PathBuf {
        let document = json!({
            "users": RecordFactory::users(n),
            "products": [{ "id": "p-1", "name": "Keyboard", "price": 49.9 }]
        });
        self.write("master-data.json", &document.to_string())
    }

    /// A root-level array of products
    pub fn products(&self, n: usize) -> PathBuf {
        let products: Vec<Value> = (0..n)
            .map(|i| {
                json!({
                    "id": format!("p-{:03}", i),
                    "name": format!("Product {}", i),
                    "price": 10 + i,
                })
            })
            .collect();
        self.write("products.json", &Value::Array(products).to_string())
    }
}

impl Default for FixtureDir {
    fn default() -> Self {
        Self::new()
    }
}
