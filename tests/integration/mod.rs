//! Integration tests for db-seeds
//!
//! These tests verify the interaction between multiple components
//! and test real system behavior without mocking.

pub mod load_run_tests;
pub mod sql_seed_tests;
pub mod stack_synth_tests;
