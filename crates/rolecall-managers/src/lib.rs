//! # Rolecall Managers
//!
//! Read-side services the command and reaction flows consult: per-guild
//! settings, reaction role mappings, and the guild emoji directory.
//!
//! Each service is a trait so handlers can be exercised against in-memory
//! implementations.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod emoji_directory;
pub mod roles;
pub mod settings;

pub use emoji_directory::*;
pub use roles::*;
pub use settings::*;
