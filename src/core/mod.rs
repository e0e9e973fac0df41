//! Core seeding logic

pub mod seed;
