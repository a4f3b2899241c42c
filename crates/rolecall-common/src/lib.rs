//! # Rolecall Common
//!
//! Shared types, utilities, and common functionality for Rolecall.
//!
//! This crate provides the snowflake id newtypes, the [`Emoji`] identity, the
//! [`ChatPlatform`] seam that every flow talks through, two-stage reaction
//! data, and the best-effort operation wrapper.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod best_effort;
pub mod emoji;
pub mod error;
pub mod platform;
pub mod reaction;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use best_effort::*;
pub use emoji::*;
pub use error::*;
pub use platform::*;
pub use reaction::*;
pub use types::*;
pub use utils::*;
