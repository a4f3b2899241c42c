//! # Rolecall Commands
//!
//! Discord command and event handlers using Poise framework for Rolecall.
//!
//! This crate provides the `emojilist` command and the reaction role
//! handlers. Every handler takes its collaborators through [`Services`], so
//! the flows run unchanged against the live Discord client or an in-memory
//! platform.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod emoji_list;
pub mod events;
pub mod framework;
pub mod reaction_add;
pub mod reaction_remove;
pub mod role_limit;

pub use emoji_list::*;
pub use events::*;
pub use framework::*;
pub use reaction_add::*;
pub use reaction_remove::*;
pub use role_limit::*;
