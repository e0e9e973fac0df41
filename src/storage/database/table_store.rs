//! Table-backed batch store
//!
//! Each batch is applied as one transaction of keyed upserts, so a rejected
//! batch leaves the table as it was and a re-run overwrites rows in place.

use super::connection::SeedDatabase;
use crate::core::seed::{Batch, Record};
use crate::storage::{BatchStore, StoreError};
use crate::utils::error::{Result, SeedError};
use async_trait::async_trait;
use sea_orm::sea_query::{
    Alias, MysqlQueryBuilder, OnConflict, PostgresQueryBuilder, Query, QueryStatementWriter,
    SimpleExpr, SqliteQueryBuilder, Value as SqlValue,
};
use sea_orm::{ConnectionTrait, DbBackend, DbErr, Statement, TransactionTrait};
use serde_json::Value;
use tracing::debug;

/// Writes records into `table`, keyed on `key_column`
#[derive(Debug, Clone)]
pub struct SqlTableStore {
    db: SeedDatabase,
    table: String,
    key_column: String,
    name: String,
}

impl SqlTableStore {
    pub fn new(db: SeedDatabase, table: impl Into<String>, key_column: impl Into<String>) -> Result<Self> {
        let table = table.into();
        let key_column = key_column.into();
        if table.trim().is_empty() {
            return Err(SeedError::config("table name cannot be empty"));
        }
        if key_column.trim().is_empty() {
            return Err(SeedError::config("key column cannot be empty"));
        }

        let name = format!("{} table {}", db.engine().label(), table);
        Ok(Self {
            db,
            table,
            key_column,
            name,
        })
    }

    /// Upsert for `record`, rendered for the connected backend
    fn upsert(&self, record: &Record) -> std::result::Result<Statement, StoreError> {
        let backend = self.db.backend();
        let sql = upsert_sql(backend, &self.table, &self.key_column, record)?;
        Ok(Statement::from_string(backend, sql))
    }
}

/// `INSERT .. ON CONFLICT` for one record with values inlined as literals.
///
/// Untyped literals let Postgres coerce text into uuid, date or numeric
/// columns, which a bound TEXT parameter does not.
pub(crate) fn upsert_sql(
    backend: DbBackend,
    table: &str,
    key_column: &str,
    record: &Record,
) -> std::result::Result<String, StoreError> {
    if record.get(key_column).is_none() {
        return Err(StoreError::Rejected(format!(
            "record has no '{}' value",
            key_column
        )));
    }

    let columns: Vec<Alias> = record.fields().map(|(k, _)| Alias::new(k.as_str())).collect();
    let values: Vec<SimpleExpr> = record
        .fields()
        .map(|(_, v)| SimpleExpr::Value(sql_value(v)))
        .collect();
    let mut updates: Vec<Alias> = record
        .fields()
        .filter(|(k, _)| k.as_str() != key_column)
        .map(|(k, _)| Alias::new(k.as_str()))
        .collect();
    // Key-only rows rewrite the key onto itself; MySQL has no DO NOTHING
    if updates.is_empty() {
        updates.push(Alias::new(key_column));
    }

    let mut insert = Query::insert();
    insert
        .into_table(Alias::new(table))
        .columns(columns)
        .values(values)
        .map_err(|e| StoreError::Rejected(e.to_string()))?
        .on_conflict(
            OnConflict::column(Alias::new(key_column))
                .update_columns(updates)
                .to_owned(),
        );

    Ok(match backend {
        DbBackend::Postgres => insert.to_string(PostgresQueryBuilder),
        DbBackend::MySql => insert.to_string(MysqlQueryBuilder),
        DbBackend::Sqlite => insert.to_string(SqliteQueryBuilder),
    })
}

#[async_trait]
impl BatchStore for SqlTableStore {
    fn name(&self) -> &str {
        &self.name
    }

    async fn submit(&self, batch: &Batch<'_>) -> std::result::Result<(), StoreError> {
        let statements = batch
            .records()
            .iter()
            .map(|record| self.upsert(record))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let txn = self.db.connection().begin().await.map_err(db_error)?;
        for statement in statements {
            txn.execute(statement).await.map_err(db_error)?;
        }
        txn.commit().await.map_err(db_error)?;

        debug!("Upserted {} rows into {}", batch.len(), self.table);
        Ok(())
    }

    async fn close(&self) -> std::result::Result<(), StoreError> {
        self.db
            .close()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))
    }
}

fn sql_value(value: &Value) -> SqlValue {
    match value {
        Value::String(s) => SqlValue::from(s.clone()),
        Value::Number(n) => match n.as_i64() {
            Some(i) => SqlValue::from(i),
            None => match n.as_f64() {
                Some(f) => SqlValue::from(f),
                None => SqlValue::from(n.to_string()),
            },
        },
        _ => SqlValue::String(None),
    }
}

fn db_error(err: DbErr) -> StoreError {
    match err {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => StoreError::Transport(err.to_string()),
        other => StoreError::Rejected(other.to_string()),
    }
}
