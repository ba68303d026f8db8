//! Tracked-target provider.

use bubble_common::Vec2;
use serde::{Deserialize, Serialize};

/// Read-only source of the tracked target's position, refreshed externally
/// once per tick.
pub trait TargetProvider {
    /// Current target position.
    fn target_position(&self) -> Vec2;
}

/// Global player position holder.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TrackedTarget {
    position: Vec2,
}

impl TrackedTarget {
    /// Creates a tracked target at `position`.
    #[must_use]
    pub const fn new(position: Vec2) -> Self {
        Self { position }
    }

    /// Moves the target.
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }
}

impl TargetProvider for TrackedTarget {
    fn target_position(&self) -> Vec2 {
        self.position
    }
}
