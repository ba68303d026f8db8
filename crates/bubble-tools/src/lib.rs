//! # Bubble Tools
//!
//! Development tooling for the Bubble NPC crates.
//!
//! - NPC debug overlay: gizmo descriptions built from read-only NPC state

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod npc_debug;

pub use npc_debug::*;
