//! NPC tether behavior state machine.
//!
//! Each NPC is in exactly one [`NpcState`]. Proximity to the tracked target
//! moves it between wandering and approaching; absorption events move it in
//! and out of the tethered state. Every tick the active state picks a
//! steering target, hands a seek or stand-still intent to the movement
//! primitive, and updates the sprite's clip and facing.

use bubble_common::{
    sample_in_disk, sample_in_range, unit_direction, within_radius, ConfigError, EntityId, Vec2,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::{MovementProfile, NpcConfig, TetherBehavior};
use crate::events::{AbsorptionHub, BubbleEvent, BubbleRef, Subscription};
use crate::movement::MovementBody;
use crate::presentation::{
    facing_from_offset, facing_from_velocity, walk_clip, AnimationClip, AnimationSink, Facing,
};
use crate::target::TargetProvider;

/// Distance at which a wandering NPC considers its wander point reached.
pub const WANDER_ARRIVAL_DISTANCE: f32 = 0.5;

/// Behavior state of an NPC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NpcState {
    /// Ambling around the spawn point
    #[default]
    Wandering,
    /// Approaching the player inside the wander zone
    MovingTowardsPlayer,
    /// Bound to the player by absorption
    TetheredToPlayer,
}

impl NpcState {
    /// Returns the display name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Wandering => "Wandering",
            Self::MovingTowardsPlayer => "MovingTowardsPlayer",
            Self::TetheredToPlayer => "TetheredToPlayer",
        }
    }
}

/// Arrival policy for a seek step.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Arrival {
    /// Always seek
    Never,
    /// Stand still once within the distance
    Within(f32),
}

/// A single NPC driven by the tether state machine.
#[derive(Debug)]
pub struct Npc {
    id: EntityId,
    config: NpcConfig,
    state: NpcState,
    wander_center: Option<Vec2>,
    target_position: Vec2,
    time_to_next_wander_change: f32,
    facing: Facing,
    rng: fastrand::Rng,
    subscription: Option<Subscription>,
}

impl Npc {
    /// Creates an NPC without an event subscription.
    pub fn new(config: NpcConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            id: EntityId::new(),
            config: config.validated()?,
            state: NpcState::Wandering,
            wander_center: None,
            target_position: Vec2::ZERO,
            time_to_next_wander_change: 0.0,
            facing: Facing::Right,
            rng: fastrand::Rng::new(),
            subscription: None,
        })
    }

    /// Creates an NPC subscribed to `hub`. The subscription is released when
    /// the NPC is dropped.
    pub fn spawn(config: NpcConfig, hub: &AbsorptionHub) -> Result<Self, ConfigError> {
        let mut npc = Self::new(config)?;
        npc.subscription = Some(hub.subscribe(npc.id));
        debug!(id = %npc.id, tether = npc.config.tether_behavior.display_name(), "NPC spawned");
        Ok(npc)
    }

    /// Reseeds the wander RNG for reproducible runs.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = fastrand::Rng::with_seed(seed);
        self
    }

    /// Entity id, also the absorption routing key.
    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.id
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> NpcState {
        self.state
    }

    /// Configured tether behavior.
    #[must_use]
    pub const fn tether_behavior(&self) -> TetherBehavior {
        self.config.tether_behavior
    }

    /// Immutable configuration.
    #[must_use]
    pub const fn config(&self) -> &NpcConfig {
        &self.config
    }

    /// Wander anchor, known after the first tick.
    #[must_use]
    pub const fn wander_center(&self) -> Option<Vec2> {
        self.wander_center
    }

    /// Steering destination as of the last tick.
    #[must_use]
    pub const fn target_position(&self) -> Vec2 {
        self.target_position
    }

    /// Seconds until the next wander target is sampled.
    #[must_use]
    pub const fn time_to_next_wander_change(&self) -> f32 {
        self.time_to_next_wander_change
    }

    /// Current sprite facing.
    #[must_use]
    pub const fn facing(&self) -> Facing {
        self.facing
    }

    /// Whether the NPC still receives absorption events.
    #[must_use]
    pub const fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    /// Runs one simulation tick.
    ///
    /// Pending absorption events are applied first, then the active state's
    /// handler runs.
    pub fn update<B, T, A>(&mut self, dt: f32, body: &mut B, target: &T, anim: &mut A)
    where
        B: MovementBody,
        T: TargetProvider,
        A: AnimationSink,
    {
        let center = *self.wander_center.get_or_insert_with(|| body.position());

        let pending = self
            .subscription
            .as_ref()
            .map(Subscription::drain)
            .unwrap_or_default();
        for event in pending {
            self.handle_event(&event, body);
        }

        let player = target.target_position();
        match self.state {
            NpcState::Wandering => self.wander(dt, center, player, body, anim),
            NpcState::MovingTowardsPlayer => {
                self.move_towards_player(dt, center, player, body, anim);
            },
            NpcState::TetheredToPlayer => self.tethered(dt, player, body, anim),
        }
    }

    /// Applies one absorption event immediately.
    pub fn handle_event<B: MovementBody>(&mut self, event: &BubbleEvent, body: &mut B) {
        match event {
            BubbleEvent::BecameIndividual => self.on_became_individual(),
            BubbleEvent::AbsorbedByOther(other) => self.on_absorbed_by_other(other),
            BubbleEvent::AbsorbedOther(other) => self.on_absorbed_other(other),
            BubbleEvent::BumpIntoHardened(obstacle) => self.on_bump_into_hardened(obstacle, body),
        }
    }

    /// Released from an absorbing group. Only negative NPCs break free.
    pub fn on_became_individual(&mut self) {
        if self.config.tether_behavior.can_break_free() {
            self.transition(NpcState::Wandering, "became_individual");
        } else {
            trace!(id = %self.id, "friendly NPC stays tethered after release");
        }
    }

    /// Absorbed by `other`; the player's absorption always tethers.
    pub fn on_absorbed_by_other(&mut self, other: &BubbleRef) {
        if other.kind.is_tracked_target() {
            self.transition(NpcState::TetheredToPlayer, "absorbed_by_player");
        }
    }

    /// Absorbed `other`; negative NPCs tether when they swallow the player.
    pub fn on_absorbed_other(&mut self, other: &BubbleRef) {
        if other.kind.is_tracked_target() && self.config.tether_behavior == TetherBehavior::Negative
        {
            self.transition(NpcState::TetheredToPlayer, "absorbed_player");
        }
    }

    /// Bounced off a hardened bubble: velocity points away from it.
    pub fn on_bump_into_hardened<B: MovementBody>(&mut self, obstacle: &BubbleRef, body: &mut B) {
        let away = unit_direction(obstacle.position, body.position());
        body.set_velocity(away * self.config.bounce_away_speed);
        trace!(id = %self.id, ?away, "bounced off hardened bubble");
    }

    fn wander<B, A>(&mut self, dt: f32, center: Vec2, player: Vec2, body: &mut B, anim: &mut A)
    where
        B: MovementBody,
        A: AnimationSink,
    {
        if self.time_to_next_wander_change <= 0.0 {
            let interval = self.config.wander_change_interval;
            self.time_to_next_wander_change =
                sample_in_range(&mut self.rng, interval.min, interval.max);
            self.target_position = sample_in_disk(&mut self.rng, center, self.config.wander_radius);
            trace!(
                id = %self.id,
                target = ?self.target_position,
                next_change = self.time_to_next_wander_change,
                "new wander target"
            );
        } else {
            self.time_to_next_wander_change -= dt;
        }

        let profile = self.config.wander_movement;
        Self::steer(
            body,
            &profile,
            self.target_position,
            Arrival::Within(WANDER_ARRIVAL_DISTANCE),
            dt,
        );
        anim.play(walk_clip(body.velocity()));
        self.face_velocity(body, anim);

        if within_radius(center, player, self.config.wander_radius) {
            self.transition(NpcState::MovingTowardsPlayer, "player_entered_zone");
        }
    }

    fn move_towards_player<B, A>(
        &mut self,
        dt: f32,
        center: Vec2,
        player: Vec2,
        body: &mut B,
        anim: &mut A,
    ) where
        B: MovementBody,
        A: AnimationSink,
    {
        // The downgrade still takes this tick's follow step.
        if !within_radius(center, player, self.config.wander_radius) {
            self.transition(NpcState::Wandering, "player_left_zone");
        }

        self.target_position = player;
        let profile = self.config.follow_movement;
        Self::steer(body, &profile, player, Arrival::Never, dt);
        anim.play(walk_clip(body.velocity()));
        self.face_velocity(body, anim);
    }

    fn tethered<B, A>(&mut self, dt: f32, player: Vec2, body: &mut B, anim: &mut A)
    where
        B: MovementBody,
        A: AnimationSink,
    {
        self.target_position = player;
        let profile = self.config.tethered_movement;

        match self.config.tether_behavior {
            TetherBehavior::Friendly => {
                Self::steer(
                    body,
                    &profile,
                    player,
                    Arrival::Within(self.config.follow_distance),
                    dt,
                );
                anim.play(walk_clip(body.velocity()));
                self.face_velocity(body, anim);
            },
            TetherBehavior::Negative => {
                let offset = player - body.position();
                body.stand_still(&profile, dt);
                anim.play(AnimationClip::Shout);
                self.facing = facing_from_offset(offset);
                anim.set_flip_x(self.facing.flip_x());
            },
        }
    }

    /// Seeks `target` unless within the arrival distance, then stands still.
    fn steer<B: MovementBody>(
        body: &mut B,
        profile: &MovementProfile,
        target: Vec2,
        arrival: Arrival,
        dt: f32,
    ) {
        let direction = target - body.position();
        let arrived = match arrival {
            Arrival::Never => false,
            Arrival::Within(distance) => direction.length() <= distance,
        };

        if arrived {
            body.stand_still(profile, dt);
        } else {
            body.move_toward(profile, direction, dt);
        }
    }

    fn face_velocity<B: MovementBody, A: AnimationSink>(&mut self, body: &B, anim: &mut A) {
        self.facing = facing_from_velocity(self.facing, body.velocity());
        anim.set_flip_x(self.facing.flip_x());
    }

    fn transition(&mut self, next: NpcState, cause: &'static str) {
        if self.state == next {
            return;
        }
        debug!(
            id = %self.id,
            from = self.state.display_name(),
            to = next.display_name(),
            cause,
            "NPC state transition"
        );
        self.state = next;
    }
}
