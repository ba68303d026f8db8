//! # Bubble Common
//!
//! Common types, utilities, and shared abstractions for the Bubble NPC crates.
//!
//! This crate provides foundational types used across the workspace:
//! - Planar geometry helpers on top of `glam::Vec2`
//! - ID types (EntityId)
//! - Common error types
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod geometry;
pub mod ids;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::*;
    pub use crate::geometry::*;
    pub use crate::ids::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id_generation() {
        let id1 = EntityId::new();
        let id2 = EntityId::new();
        assert_ne!(id1, id2);
        assert!(id1.is_valid());
    }

    #[test]
    fn test_direction_of_coincident_points_is_zero() {
        let p = Vec2::new(4.0, -2.0);
        assert_eq!(unit_direction(p, p), Vec2::ZERO);
    }

    #[test]
    fn test_config_error_wraps_into_bubble_error() {
        let err: BubbleError = ConfigError::InvalidWanderRadius(-1.0).into();
        assert!(err.to_string().contains("wander radius"));
    }
}
