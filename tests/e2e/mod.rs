//! End-to-end tests
//!
//! These need running services (DynamoDB Local, PostgreSQL, MySQL) and are
//! ignored by default.

pub mod dynamodb;
pub mod relational;
