//! Error handling for the seeder
//!
//! This module defines all error types used throughout the crate.

mod helpers;
mod types;

pub use types::{Result, SeedError};
