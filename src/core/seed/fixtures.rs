//! Fixture sources: JSON record documents and SQL scripts

use super::types::{Record, value_kind};
use crate::utils::error::{Result, SeedError};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// An ordered collection of records inside a JSON document
#[derive(Debug, Clone, PartialEq)]
pub struct FixtureSource {
    pub path: PathBuf,
    /// Top-level member holding the array; `None` means the root is the array
    pub collection: Option<String>,
    /// Projection applied to every element; `None` keeps all fields
    pub fields: Option<Vec<String>>,
    /// Field that must hold a unique, non-empty string per record
    pub key_field: String,
}

impl FixtureSource {
    pub fn new<P: Into<PathBuf>>(path: P, key_field: &str) -> Self {
        Self {
            path: path.into(),
            collection: None,
            fields: None,
            key_field: key_field.to_string(),
        }
    }

    pub fn collection(mut self, name: &str) -> Self {
        self.collection = Some(name.to_string());
        self
    }

    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        self.fields = if fields.is_empty() { None } else { Some(fields) };
        self
    }

    /// Read and validate the document
    pub async fn load(&self) -> Result<Vec<Record>> {
        debug!("Reading fixture document {}", self.path.display());
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| SeedError::source_unavailable(&self.path, e))?;

        let records = self.parse(&content)?;
        info!(
            "Loaded {} records from {}",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }

    /// Parse an already-read document
    pub fn parse(&self, content: &str) -> Result<Vec<Record>> {
        let document: Value = serde_json::from_str(content).map_err(|e| {
            SeedError::malformed(format!("{}: invalid JSON: {}", self.path.display(), e))
        })?;

        let elements = self.elements(document)?;
        let mut records = Vec::with_capacity(elements.len());
        let mut seen = HashSet::with_capacity(elements.len());

        for (index, element) in elements.into_iter().enumerate() {
            let record = self.to_record(index, element)?;
            let key = record
                .key(&self.key_field)
                .filter(|key| !key.is_empty())
                .ok_or_else(|| {
                    SeedError::malformed(format!(
                        "{}: element {} has no string '{}' key",
                        self.path.display(),
                        index,
                        self.key_field
                    ))
                })?;
            if !seen.insert(key.to_string()) {
                return Err(SeedError::malformed(format!(
                    "{}: duplicate key '{}' at element {}",
                    self.path.display(),
                    key,
                    index
                )));
            }
            records.push(record);
        }

        Ok(records)
    }

    fn elements(&self, document: Value) -> Result<Vec<Value>> {
        let target = match &self.collection {
            Some(name) => match document {
                Value::Object(mut root) => root.remove(name).ok_or_else(|| {
                    SeedError::malformed(format!(
                        "{}: missing '{}' collection",
                        self.path.display(),
                        name
                    ))
                })?,
                other => {
                    return Err(SeedError::malformed(format!(
                        "{}: expected an object at the root, found {}",
                        self.path.display(),
                        value_kind(&other)
                    )));
                }
            },
            None => document,
        };

        match target {
            Value::Array(elements) => Ok(elements),
            other => Err(SeedError::malformed(format!(
                "{}: expected an array of records, found {}",
                self.path.display(),
                value_kind(&other)
            ))),
        }
    }

    fn to_record(&self, index: usize, element: Value) -> Result<Record> {
        let mut object = match element {
            Value::Object(object) => object,
            other => {
                return Err(SeedError::malformed(format!(
                    "{}: element {} is {}, expected an object",
                    self.path.display(),
                    index,
                    value_kind(&other)
                )));
            }
        };

        if let Some(fields) = &self.fields {
            let mut projected = Map::new();
            for field in fields {
                if let Some(value) = object.remove(field) {
                    projected.insert(field.clone(), value);
                }
            }
            object = projected;
        }

        Record::new(object).map_err(|e| match e {
            SeedError::MalformedSource(message) => SeedError::malformed(format!(
                "{}: element {}: {}",
                self.path.display(),
                index,
                message
            )),
            other => other,
        })
    }
}

/// A SQL script executed as one unit
#[derive(Debug, Clone, PartialEq)]
pub struct SqlScript {
    pub path: PathBuf,
    pub sql: String,
}

impl SqlScript {
    pub async fn load(path: &Path) -> Result<Self> {
        let sql = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| SeedError::source_unavailable(path, e))?;

        if sql.trim().is_empty() {
            return Err(SeedError::malformed(format!(
                "{}: script is empty",
                path.display()
            )));
        }

        Ok(Self {
            path: path.to_path_buf(),
            sql,
        })
    }

    pub fn len(&self) -> usize {
        self.sql.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }
}
