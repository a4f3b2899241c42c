//! # Rolecall Bot
//!
//! Discord bot handing out reaction roles and maintaining a generated emoji
//! list channel.
//!
//! This is the main binary crate: it wires the configuration, logging, the
//! serenity-backed chat platform and the Poise framework together.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod bot;
pub mod error;
pub mod logging;
pub mod platform;

pub use bot::*;
pub use error::*;
pub use logging::*;
pub use platform::*;
