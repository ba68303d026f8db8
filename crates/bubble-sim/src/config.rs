//! Scenario configuration.
//!
//! A scenario describes the player's route, the NPCs to spawn, and the
//! absorption events the bubble subsystem fires along the way. Scenarios are
//! loaded from TOML; a missing file falls back to the built-in demo.

use std::fs;
use std::path::Path;

use bubble_common::{BubbleResult, ConfigError, Vec2};
use bubble_gameplay::{NpcConfig, TetherBehavior};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Scenario parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Simulation ticks per second
    pub tick_rate: u32,
    /// Scenario length in seconds
    pub duration_secs: f32,
    /// Base seed; NPC `i` wanders with `seed + i`
    pub seed: u64,
    /// Player walking speed
    pub player_speed: f32,
    /// Player route, walked in a loop
    pub player_waypoints: Vec<Vec2>,
    /// NPCs to spawn
    pub npcs: Vec<NpcSpawn>,
    /// Scripted absorption events
    pub events: Vec<ScriptedEvent>,
}

/// One NPC in a scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NpcSpawn {
    /// Name used by scripted events and logs
    pub name: String,
    /// Spawn position, which becomes the wander center
    pub spawn: Vec2,
    /// Behavior tunables
    #[serde(default)]
    pub config: NpcConfig,
}

/// Absorption event fired at a fixed time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptedEvent {
    /// Scenario time in seconds
    pub at_secs: f32,
    /// Target NPC name
    pub npc: String,
    /// What happens
    #[serde(flatten)]
    pub action: ScriptedAction,
}

/// Scripted bubble interaction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScriptedAction {
    /// The player absorbs the NPC
    AbsorbedByPlayer,
    /// The NPC absorbs the player
    AbsorbedPlayer,
    /// The NPC is released from its group
    Released,
    /// The NPC bumps into a hardened bubble
    Bump {
        /// Hardened bubble position
        obstacle: Vec2,
    },
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60,
            duration_secs: 20.0,
            seed: 7,
            player_speed: 3.0,
            player_waypoints: vec![
                Vec2::new(-10.0, 0.0),
                Vec2::new(2.0, 1.0),
                Vec2::new(14.0, 0.0),
                Vec2::new(2.0, -6.0),
            ],
            npcs: vec![
                NpcSpawn {
                    name: "pip".to_string(),
                    spawn: Vec2::ZERO,
                    config: NpcConfig::with_tether(TetherBehavior::Friendly),
                },
                NpcSpawn {
                    name: "grub".to_string(),
                    spawn: Vec2::new(12.0, 0.0),
                    config: NpcConfig::with_tether(TetherBehavior::Negative),
                },
            ],
            events: vec![
                ScriptedEvent {
                    at_secs: 3.0,
                    npc: "pip".to_string(),
                    action: ScriptedAction::Bump {
                        obstacle: Vec2::new(1.0, 1.0),
                    },
                },
                ScriptedEvent {
                    at_secs: 5.0,
                    npc: "pip".to_string(),
                    action: ScriptedAction::AbsorbedByPlayer,
                },
                ScriptedEvent {
                    at_secs: 9.0,
                    npc: "grub".to_string(),
                    action: ScriptedAction::AbsorbedPlayer,
                },
                ScriptedEvent {
                    at_secs: 13.0,
                    npc: "grub".to_string(),
                    action: ScriptedAction::Released,
                },
            ],
        }
    }
}

impl SimConfig {
    /// Loads a scenario from `path`.
    /// Returns the built-in scenario if the file doesn't exist.
    pub fn load_from<P: AsRef<Path>>(path: P) -> BubbleResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            info!("Scenario file not found, using built-in scenario");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        info!("Loaded scenario from {}", path.display());
        Ok(config)
    }

    /// Validates run length, the player route, spawns, event times and
    /// every NPC's tunables.
    pub fn validate(&self) -> BubbleResult<()> {
        non_negative("duration_secs", self.duration_secs)?;
        non_negative("player_speed", self.player_speed)?;
        for waypoint in &self.player_waypoints {
            finite_point("player_waypoints", *waypoint)?;
        }
        for spawn in &self.npcs {
            finite_point("npcs.spawn", spawn.spawn)?;
            spawn.config.validate()?;
        }
        for event in &self.events {
            if !event.at_secs.is_finite() {
                return Err(invalid("events.at_secs", event.at_secs).into());
            }
            if let ScriptedAction::Bump { obstacle } = event.action {
                finite_point("events.obstacle", obstacle)?;
            }
        }
        Ok(())
    }

    /// Fixed tick length in seconds.
    #[must_use]
    pub fn dt(&self) -> f32 {
        1.0 / self.tick_rate.max(1) as f32
    }

    /// Number of ticks the scenario runs.
    #[must_use]
    pub fn total_ticks(&self) -> u64 {
        (self.duration_secs.max(0.0) * self.tick_rate.max(1) as f32).round() as u64
    }
}

fn invalid(name: &'static str, value: f32) -> ConfigError {
    ConfigError::InvalidScalar { name, value }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(name, value))
    }
}

fn finite_point(name: &'static str, point: Vec2) -> Result<(), ConfigError> {
    if point.x.is_finite() {
        if point.y.is_finite() {
            Ok(())
        } else {
            Err(invalid(name, point.y))
        }
    } else {
        Err(invalid(name, point.x))
    }
}
