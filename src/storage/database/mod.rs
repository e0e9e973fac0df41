//! Relational storage using SeaORM
//!
//! Connection handling, SQL script execution and a table-backed batch store.

mod connection;
mod script;
mod table_store;

pub use connection::SeedDatabase;
pub use script::{ScriptReport, execute_script};
pub use table_store::SqlTableStore;
