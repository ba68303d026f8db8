//! NPC debug overlay.
//!
//! Builds renderer-agnostic gizmos (label, target line, wander circle) from
//! an NPC's public state. Nothing here feeds back into behavior.

use bubble_common::{EntityId, Vec2};
use bubble_gameplay::{Npc, NpcState, TetherBehavior};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// RGB colour for overlay primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GizmoColor {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
}

impl GizmoColor {
    /// Yellow.
    pub const YELLOW: Self = Self::rgb(255, 235, 4);
    /// Red.
    pub const RED: Self = Self::rgb(255, 0, 0);

    /// Creates a colour.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Colour for a tether behavior.
    #[must_use]
    pub const fn for_tether(tether: TetherBehavior) -> Self {
        match tether {
            TetherBehavior::Friendly => Self::YELLOW,
            TetherBehavior::Negative => Self::RED,
        }
    }
}

/// Configuration for the NPC debug overlay.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NpcDebugOverlayConfig {
    /// Show state labels.
    pub show_state: bool,
    /// Show lines to the steering target.
    pub show_targets: bool,
    /// Show wander radius circles.
    pub show_wander_radius: bool,
    /// Label offset from the body.
    pub label_offset: Vec2,
}

impl Default for NpcDebugOverlayConfig {
    fn default() -> Self {
        Self {
            show_state: true,
            show_targets: true,
            show_wander_radius: true,
            label_offset: Vec2::X,
        }
    }
}

/// Text anchored in world space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GizmoLabel {
    /// Anchor position
    pub position: Vec2,
    /// Text
    pub text: String,
}

/// Line segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GizmoLine {
    /// Start point
    pub from: Vec2,
    /// End point
    pub to: Vec2,
}

/// Wireframe circle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GizmoCircle {
    /// Center
    pub center: Vec2,
    /// Radius
    pub radius: f32,
}

/// Everything drawn for one NPC.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NpcGizmos {
    /// NPC id
    pub id: EntityId,
    /// Current state
    pub state: NpcState,
    /// Colour shared by all primitives
    pub color: GizmoColor,
    /// State label
    pub label: Option<GizmoLabel>,
    /// Body-to-target line (only once the NPC is running)
    pub target_line: Option<GizmoLine>,
    /// Wander zone
    pub wander_circle: Option<GizmoCircle>,
}

/// Builds gizmos for one NPC whose body is at `body_position`.
///
/// Before the first tick there is no wander center or target yet, so the
/// circle is drawn around the body and no target line is emitted.
#[must_use]
pub fn build_gizmos(npc: &Npc, body_position: Vec2, config: &NpcDebugOverlayConfig) -> NpcGizmos {
    let running = npc.wander_center();

    let label = config.show_state.then(|| GizmoLabel {
        position: body_position + config.label_offset,
        text: npc.state().display_name().to_string(),
    });

    let target_line = running
        .filter(|_| config.show_targets)
        .map(|_| GizmoLine {
            from: body_position,
            to: npc.target_position(),
        });

    let wander_circle = config.show_wander_radius.then(|| GizmoCircle {
        center: running.unwrap_or(body_position),
        radius: npc.config().wander_radius,
    });

    NpcGizmos {
        id: npc.id(),
        state: npc.state(),
        color: GizmoColor::for_tether(npc.tether_behavior()),
        label,
        target_line,
        wander_circle,
    }
}

/// Serializes a frame of gizmos for an external viewer.
pub fn gizmos_to_json(gizmos: &[NpcGizmos]) -> serde_json::Result<String> {
    debug!(count = gizmos.len(), "exporting NPC gizmos");
    serde_json::to_string_pretty(gizmos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bubble_gameplay::{KinematicBody, NpcConfig, SpriteAnimator, TrackedTarget};

    fn npc(tether: TetherBehavior) -> Npc {
        Npc::new(NpcConfig::with_tether(tether))
            .expect("valid config")
            .with_seed(5)
    }

    #[test]
    fn test_before_first_tick() {
        let npc = npc(TetherBehavior::Negative);
        let body = Vec2::new(2.0, 2.0);
        let gizmos = build_gizmos(&npc, body, &NpcDebugOverlayConfig::default());

        assert_eq!(gizmos.color, GizmoColor::RED);
        assert!(gizmos.target_line.is_none());
        let circle = gizmos.wander_circle.expect("circle enabled");
        assert_eq!(circle.center, body);
        let label = gizmos.label.expect("label enabled");
        assert_eq!(label.text, "Wandering");
        assert_eq!(label.position, Vec2::new(3.0, 2.0));
    }

    #[test]
    fn test_after_tick_uses_runtime_state() {
        let mut npc = npc(TetherBehavior::Friendly);
        let mut body = KinematicBody::new(Vec2::new(1.0, 0.0));
        let mut anim = SpriteAnimator::new();
        npc.update(
            1.0 / 60.0,
            &mut body,
            &TrackedTarget::new(Vec2::new(50.0, 0.0)),
            &mut anim,
        );
        body.integrate(1.0 / 60.0);

        let gizmos = build_gizmos(&npc, body.position, &NpcDebugOverlayConfig::default());
        assert_eq!(gizmos.color, GizmoColor::YELLOW);
        let line = gizmos.target_line.expect("targets enabled");
        assert_eq!(line.to, npc.target_position());
        let circle = gizmos.wander_circle.expect("circle enabled");
        assert_eq!(circle.center, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_disabled_elements() {
        let npc = npc(TetherBehavior::Friendly);
        let config = NpcDebugOverlayConfig {
            show_state: false,
            show_targets: false,
            show_wander_radius: false,
            ..NpcDebugOverlayConfig::default()
        };
        let gizmos = build_gizmos(&npc, Vec2::ZERO, &config);
        assert!(gizmos.label.is_none());
        assert!(gizmos.target_line.is_none());
        assert!(gizmos.wander_circle.is_none());
    }

    #[test]
    fn test_json_export() {
        let npc = npc(TetherBehavior::Friendly);
        let gizmos = build_gizmos(&npc, Vec2::ZERO, &NpcDebugOverlayConfig::default());
        let json = gizmos_to_json(&[gizmos]).expect("serializable");
        assert!(json.contains("\"Wandering\""));
        assert!(json.contains("wander_circle"));
    }
}
