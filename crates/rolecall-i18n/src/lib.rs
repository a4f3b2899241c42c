//! # Rolecall I18n
//!
//! Localized reply messages using the Fluent localization system.
//!
//! Fluent resources are embedded into the binary. A requested locale that
//! is not shipped falls back to `en-US`.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod loader;
pub mod messages;

pub use loader::*;
pub use messages::*;
