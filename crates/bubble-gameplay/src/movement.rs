//! Movement primitive interface and a kinematic reference body.
//!
//! The NPC never writes positions. It issues seek / stand-still intents with
//! a [`MovementProfile`] and the primitive owns velocity integration.

use bubble_common::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::MovementProfile;

/// Movement primitive driving an NPC body.
///
/// This trait abstracts the physics body the NPC is attached to.
pub trait MovementBody {
    /// Current body position.
    fn position(&self) -> Vec2;

    /// Current body velocity.
    fn velocity(&self) -> Vec2;

    /// Overrides the velocity (used for bounce impulses).
    fn set_velocity(&mut self, velocity: Vec2);

    /// Steers toward `direction` (not necessarily normalized).
    fn move_toward(&mut self, profile: &MovementProfile, direction: Vec2, dt: f32);

    /// Decelerates toward rest.
    fn stand_still(&mut self, profile: &MovementProfile, dt: f32);
}

/// Simple kinematic body: accelerates toward a desired velocity and bleeds
/// speed through friction when asked to stand still.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct KinematicBody {
    /// World position
    pub position: Vec2,
    /// Velocity in units per second
    pub velocity: Vec2,
}

impl KinematicBody {
    /// Creates a body at rest.
    #[must_use]
    pub const fn new(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
        }
    }

    /// Advances position by the current velocity.
    pub fn integrate(&mut self, dt: f32) {
        self.position += self.velocity * dt;
    }

    /// Current speed.
    #[must_use]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

impl MovementBody for KinematicBody {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    fn move_toward(&mut self, profile: &MovementProfile, direction: Vec2, dt: f32) {
        let desired = direction.normalize_or_zero() * profile.max_speed;
        let delta = desired - self.velocity;
        self.velocity += delta.clamp_length_max(profile.acceleration * dt);
    }

    fn stand_still(&mut self, profile: &MovementProfile, dt: f32) {
        let step = profile.friction * dt;
        let speed = self.velocity.length();
        if speed <= step {
            self.velocity = Vec2::ZERO;
        } else {
            self.velocity -= self.velocity / speed * step;
        }
    }
}
