//! Named environment overrides with documented defaults

use crate::utils::error::{Result, SeedError};
use std::fmt::Display;
use std::str::FromStr;

/// Reads overrides through an injectable lookup so configuration can be
/// built from the process environment or from a fixed map in tests.
pub(crate) struct EnvReader<'a> {
    lookup: &'a dyn Fn(&str) -> Option<String>,
}

impl<'a> EnvReader<'a> {
    pub(crate) fn new(lookup: &'a dyn Fn(&str) -> Option<String>) -> Self {
        Self { lookup }
    }

    /// Value of `key`; empty values count as unset
    pub(crate) fn get(&self, key: &str) -> Option<String> {
        (self.lookup)(key).filter(|v| !v.is_empty())
    }

    /// First set value among `keys`
    pub(crate) fn first(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|key| self.get(key))
    }

    pub(crate) fn string(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    pub(crate) fn parse<T>(&self, key: &str, default: T) -> Result<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        match self.get(key) {
            Some(raw) => raw.trim().parse().map_err(|e| {
                SeedError::config(format!("{} has invalid value '{}': {}", key, raw, e))
            }),
            None => Ok(default),
        }
    }
}
