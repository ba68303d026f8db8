//! # Bubble Gameplay
//!
//! NPC behavior for the bubble absorption game.
//!
//! This crate provides the per-NPC behavior layer:
//! - Tether state machine (wander, approach, tethered)
//! - Steering through an external movement primitive
//! - Presentation selection (facing + animation clip)
//! - Absorption event hub with scoped subscriptions
//! - Reference collaborators for headless runs and tests

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod events;
pub mod movement;
pub mod npc;
pub mod presentation;
pub mod target;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::*;
    pub use crate::events::*;
    pub use crate::movement::*;
    pub use crate::npc::*;
    pub use crate::presentation::*;
    pub use crate::target::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;
    use bubble_common::Vec2;

    #[test]
    fn test_npc_creation() {
        let npc = Npc::new(NpcConfig::default()).expect("default config is valid");
        assert!(npc.id().is_valid());
        assert_eq!(npc.state(), NpcState::Wandering);
    }

    #[test]
    fn test_hub_roundtrip_through_npc() {
        let hub = AbsorptionHub::default();
        let npc = Npc::spawn(NpcConfig::default(), &hub).expect("valid config");
        assert!(hub.publish(npc.id(), BubbleEvent::BecameIndividual));
        drop(npc);
        assert_eq!(hub.subscriber_count(), 0);
    }

    #[test]
    fn test_presentation_idle_below_threshold() {
        assert_eq!(walk_clip(Vec2::new(0.1, 0.1)), AnimationClip::Idle);
    }
}
