//! # Rolecall Config
//!
//! Type-safe configuration management for Rolecall.
//!
//! This crate provides configuration loading from YAML, TOML or JSON,
//! environment overrides, validation, and an atomically swappable cache.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validator;

pub use cache::*;
pub use defaults::*;
pub use loader::*;
pub use schema::*;
pub use validator::*;
