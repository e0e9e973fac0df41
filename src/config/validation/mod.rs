//! Configuration validation
//!
//! - `trait_def`: Core Validate trait definition
//! - `storage_validators`: database, key-value store and seed target validators
//! - `stack_validators`: infrastructure stack and logging validators
//! - `tests`: Test suite for all validators

mod stack_validators;
mod storage_validators;
mod trait_def;

pub use trait_def::Validate;
