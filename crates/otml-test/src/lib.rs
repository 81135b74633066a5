//! Shared test fixtures for OTML crates.
//!
//! This crate provides feature tables, grammar texts and configurations for
//! testing. It does NOT depend on `otml-grammar` so that crate can use it as
//! a dev-dependency.
//!
//! - [`feature_table`] - Small feature tables
//! - [`config`] - Configurations selecting a single mutation operator
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! otml-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use otml_test::feature_table::stop_voice_table;
//! use otml_test::config::only;
//! ```

pub mod config;
pub mod feature_table;

pub use config::{only, test_config};
pub use feature_table::{stop_voice_table, STOP_VOICE_TABLE_JSON};
