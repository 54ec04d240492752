//! CLI subcommand implementations.

pub mod customer;
pub mod migrate;
pub mod seed;
