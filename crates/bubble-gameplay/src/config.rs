//! Per-NPC configuration.
//!
//! An [`NpcConfig`] is fixed at construction and never changes afterwards.
//! It carries the three movement profiles, tether semantics, wander
//! parameters, and bounce tuning.

use bubble_common::ConfigError;
use serde::{Deserialize, Serialize};

/// How a tethered NPC relates to the tracked target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TetherBehavior {
    /// Follows the target forever once absorbed by it
    #[default]
    Friendly,
    /// Holds position and shouts; breaks free when released
    Negative,
}

impl TetherBehavior {
    /// Returns the display name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Friendly => "Friendly",
            Self::Negative => "Negative",
        }
    }

    /// Whether a release event sends this NPC back to wandering.
    #[must_use]
    pub const fn can_break_free(self) -> bool {
        matches!(self, Self::Negative)
    }
}

/// Tuning constants consumed by the movement primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementProfile {
    /// Acceleration toward the desired velocity (units/s²)
    pub acceleration: f32,
    /// Top speed while seeking (units/s)
    pub max_speed: f32,
    /// Deceleration while standing still (units/s²)
    pub friction: f32,
}

impl Default for MovementProfile {
    fn default() -> Self {
        Self::new(20.0, 2.0, 10.0)
    }
}

impl MovementProfile {
    /// Creates a movement profile.
    #[must_use]
    pub const fn new(acceleration: f32, max_speed: f32, friction: f32) -> Self {
        Self {
            acceleration,
            max_speed,
            friction,
        }
    }

    /// Slow ambling used while wandering.
    #[must_use]
    pub const fn wander() -> Self {
        Self::new(20.0, 2.0, 10.0)
    }

    /// Brisk approach used while moving toward the player.
    #[must_use]
    pub const fn follow() -> Self {
        Self::new(30.0, 4.0, 12.0)
    }

    /// Responsive tracking used while tethered.
    #[must_use]
    pub const fn tethered() -> Self {
        Self::new(40.0, 5.0, 20.0)
    }

    fn validate(&self, profile: &'static str) -> Result<(), ConfigError> {
        let fields = [
            ("acceleration", self.acceleration),
            ("max_speed", self.max_speed),
            ("friction", self.friction),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidProfile {
                    profile,
                    reason: format!("{field} = {value}"),
                });
            }
        }
        Ok(())
    }
}

/// Bounds (seconds) for the random delay between wander target changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WanderInterval {
    /// Shortest delay
    pub min: f32,
    /// Longest delay
    pub max: f32,
}

impl Default for WanderInterval {
    fn default() -> Self {
        Self { min: 1.0, max: 3.0 }
    }
}

impl WanderInterval {
    /// Creates a new interval.
    #[must_use]
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Checks whether `secs` lies within the interval.
    #[must_use]
    pub fn contains(&self, secs: f32) -> bool {
        secs >= self.min && secs <= self.max
    }
}

/// Immutable per-instance NPC tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NpcConfig {
    /// Profile while wandering around the spawn point
    pub wander_movement: MovementProfile,
    /// Profile while approaching the player
    pub follow_movement: MovementProfile,
    /// Profile while tethered to the player
    pub tethered_movement: MovementProfile,
    /// Speed imparted when bouncing off a hardened bubble
    pub bounce_away_speed: f32,
    /// Friendly tether arrival distance
    pub follow_distance: f32,
    /// Tether semantics
    pub tether_behavior: TetherBehavior,
    /// Radius of the wander disk and the player detection zone
    pub wander_radius: f32,
    /// Delay range between wander target changes
    pub wander_change_interval: WanderInterval,
}

impl Default for NpcConfig {
    fn default() -> Self {
        Self {
            wander_movement: MovementProfile::wander(),
            follow_movement: MovementProfile::follow(),
            tethered_movement: MovementProfile::tethered(),
            bounce_away_speed: 6.0,
            follow_distance: 1.5,
            tether_behavior: TetherBehavior::Friendly,
            wander_radius: 5.0,
            wander_change_interval: WanderInterval::default(),
        }
    }
}

impl NpcConfig {
    /// Creates the default configuration with the given tether behavior.
    #[must_use]
    pub fn with_tether(tether_behavior: TetherBehavior) -> Self {
        Self {
            tether_behavior,
            ..Self::default()
        }
    }

    /// Sets the wander radius.
    #[must_use]
    pub const fn with_wander_radius(mut self, radius: f32) -> Self {
        self.wander_radius = radius;
        self
    }

    /// Sets the wander change interval.
    #[must_use]
    pub const fn with_wander_interval(mut self, min: f32, max: f32) -> Self {
        self.wander_change_interval = WanderInterval::new(min, max);
        self
    }

    /// Sets the friendly tether arrival distance.
    #[must_use]
    pub const fn with_follow_distance(mut self, distance: f32) -> Self {
        self.follow_distance = distance;
        self
    }

    /// Checks every tunable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.wander_radius.is_finite() || self.wander_radius <= 0.0 {
            return Err(ConfigError::InvalidWanderRadius(self.wander_radius));
        }

        let WanderInterval { min, max } = self.wander_change_interval;
        if !min.is_finite() || !max.is_finite() || min < 0.0 || max < min {
            return Err(ConfigError::InvalidWanderInterval { min, max });
        }

        for (name, value) in [
            ("bounce_away_speed", self.bounce_away_speed),
            ("follow_distance", self.follow_distance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidScalar { name, value });
            }
        }

        self.wander_movement.validate("wander")?;
        self.follow_movement.validate("follow")?;
        self.tethered_movement.validate("tethered")?;
        Ok(())
    }

    /// Validates and returns the configuration.
    pub fn validated(self) -> Result<Self, ConfigError> {
        self.validate()?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(NpcConfig::default().validate().is_ok());
    }

    #[test]
    fn test_tether_break_free() {
        assert!(TetherBehavior::Negative.can_break_free());
        assert!(!TetherBehavior::Friendly.can_break_free());
    }

    #[test]
    fn test_rejects_non_positive_radius() {
        let config = NpcConfig::default().with_wander_radius(0.0);
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidWanderRadius(0.0))
        );
    }

    #[test]
    fn test_rejects_inverted_interval() {
        let config = NpcConfig::default().with_wander_interval(3.0, 1.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidWanderInterval { .. })
        ));
    }

    #[test]
    fn test_rejects_negative_follow_distance() {
        let config = NpcConfig::default().with_follow_distance(-1.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidScalar {
                name: "follow_distance",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_nan_profile() {
        let mut config = NpcConfig::default();
        config.follow_movement.max_speed = f32::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidProfile {
                profile: "follow",
                ..
            })
        ));
    }

    #[test]
    fn test_interval_contains_bounds() {
        let interval = WanderInterval::new(1.0, 2.0);
        assert!(interval.contains(1.0));
        assert!(interval.contains(2.0));
        assert!(!interval.contains(2.1));
    }
}
