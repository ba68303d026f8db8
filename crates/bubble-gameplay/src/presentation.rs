//! Presentation selection: facing and animation clip from velocity.
//!
//! Everything here is a pure function of its inputs, so repeated calls with
//! the same velocity always pick the same clip and facing.

use bubble_common::Vec2;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Below this speed (units/s) the NPC plays the idle clip.
pub const IDLE_SPEED_THRESHOLD: f32 = 1.0;

/// Animation clips an NPC sprite can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimationClip {
    /// Standing still
    Idle,
    /// Walking away from the camera
    WalkUp,
    /// Walking toward the camera
    WalkDown,
    /// Walking sideways
    WalkStraight,
    /// Negative tether alert
    Shout,
}

impl AnimationClip {
    /// Clip name as authored in the sprite sheet.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::WalkUp => "Walk Up R",
            Self::WalkDown => "Walk Down R",
            Self::WalkStraight => "Walk Straight R",
            Self::Shout => "Shout",
        }
    }
}

/// Horizontal sprite facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Facing {
    /// Sprite mirrored
    Left,
    /// Sprite as authored
    #[default]
    Right,
}

impl Facing {
    /// Whether the sprite is mirrored horizontally.
    #[must_use]
    pub const fn flip_x(self) -> bool {
        matches!(self, Self::Left)
    }
}

/// Picks the walk clip for a velocity.
///
/// Signed `y` is compared against `|x|`; the up check wins first, then down,
/// and only an exact tie walks straight.
#[must_use]
pub fn walk_clip(velocity: Vec2) -> AnimationClip {
    if velocity.length() < IDLE_SPEED_THRESHOLD {
        return AnimationClip::Idle;
    }

    let horizontal = velocity.x.abs();
    if velocity.y > horizontal {
        AnimationClip::WalkUp
    } else if velocity.y < horizontal {
        AnimationClip::WalkDown
    } else {
        AnimationClip::WalkStraight
    }
}

/// Facing after moving with `velocity`; unchanged when `x` is exactly zero.
#[must_use]
pub fn facing_from_velocity(current: Facing, velocity: Vec2) -> Facing {
    if velocity.x > 0.0 {
        Facing::Right
    } else if velocity.x < 0.0 {
        Facing::Left
    } else {
        current
    }
}

/// Facing toward a target at `offset` from the body.
#[must_use]
pub fn facing_from_offset(offset: Vec2) -> Facing {
    if offset.x < 0.0 {
        Facing::Left
    } else {
        Facing::Right
    }
}

/// Render sink that plays clips and mirrors the sprite.
pub trait AnimationSink {
    /// Requests a clip; requesting the playing clip again is a no-op.
    fn play(&mut self, clip: AnimationClip);

    /// Sets the horizontal mirror flag.
    fn set_flip_x(&mut self, flip: bool);
}

/// Animation sink that tracks what a sprite renderer would show.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpriteAnimator {
    current: Option<AnimationClip>,
    clip_changes: u32,
    flip_x: bool,
}

impl SpriteAnimator {
    /// Creates an animator with nothing playing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently playing clip.
    #[must_use]
    pub const fn current(&self) -> Option<AnimationClip> {
        self.current
    }

    /// Number of times the playing clip actually changed.
    #[must_use]
    pub const fn clip_changes(&self) -> u32 {
        self.clip_changes
    }

    /// Whether the sprite is mirrored.
    #[must_use]
    pub const fn flip_x(&self) -> bool {
        self.flip_x
    }
}

impl AnimationSink for SpriteAnimator {
    fn play(&mut self, clip: AnimationClip) {
        if self.current == Some(clip) {
            return;
        }
        trace!(clip = clip.name(), "animation clip changed");
        self.current = Some(clip);
        self.clip_changes += 1;
    }

    fn set_flip_x(&mut self, flip: bool) {
        self.flip_x = flip;
    }
}
