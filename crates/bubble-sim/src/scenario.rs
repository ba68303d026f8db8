//! Fixed-step scenario runner.

use bubble_common::{BubbleResult, EntityId, Vec2};
use bubble_gameplay::{
    AbsorptionHub, BubbleEvent, BubbleKind, BubbleRef, KinematicBody, Npc, NpcState,
    SpriteAnimator, TrackedTarget,
};
use bubble_tools::{build_gizmos, NpcDebugOverlayConfig, NpcGizmos};
use tracing::{debug, info, warn};

use crate::config::{ScriptedAction, ScriptedEvent, SimConfig};

/// Distance at which the player counts as having reached a waypoint.
const WAYPOINT_REACHED: f32 = 0.1;

/// One NPC and its collaborators.
#[derive(Debug)]
struct Actor {
    name: String,
    npc: Npc,
    body: KinematicBody,
    anim: SpriteAnimator,
}

/// Outcome of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimSummary {
    /// Ticks executed
    pub ticks: u64,
    /// State changes observed across all NPCs
    pub transitions: usize,
    /// Scripted events accepted by the hub
    pub events_delivered: usize,
    /// Final state per NPC, in spawn order
    pub final_states: Vec<(String, NpcState)>,
}

/// A running scenario.
#[derive(Debug)]
pub struct Simulation {
    config: SimConfig,
    hub: AbsorptionHub,
    player_id: EntityId,
    player: TrackedTarget,
    player_position: Vec2,
    waypoint: usize,
    actors: Vec<Actor>,
    schedule: Vec<ScriptedEvent>,
    next_event: usize,
    time: f32,
    ticks: u64,
    transitions: usize,
    events_delivered: usize,
}

impl Simulation {
    /// Spawns every NPC in the scenario.
    pub fn new(config: SimConfig) -> BubbleResult<Self> {
        let hub = AbsorptionHub::default();

        let mut actors = Vec::with_capacity(config.npcs.len());
        for (i, spawn) in config.npcs.iter().enumerate() {
            let npc = Npc::spawn(spawn.config.clone(), &hub)?
                .with_seed(config.seed.wrapping_add(i as u64));
            info!(name = %spawn.name, id = %npc.id(), "spawned NPC");
            actors.push(Actor {
                name: spawn.name.clone(),
                npc,
                body: KinematicBody::new(spawn.spawn),
                anim: SpriteAnimator::new(),
            });
        }

        let mut schedule = config.events.clone();
        schedule.sort_by(|a, b| a.at_secs.total_cmp(&b.at_secs));

        let player_position = config.player_waypoints.first().copied().unwrap_or(Vec2::ZERO);

        Ok(Self {
            hub,
            player_id: EntityId::new(),
            player: TrackedTarget::new(player_position),
            player_position,
            waypoint: 0,
            actors,
            schedule,
            next_event: 0,
            time: 0.0,
            ticks: 0,
            transitions: 0,
            events_delivered: 0,
            config,
        })
    }

    /// Runs the scenario to completion.
    pub fn run(&mut self) -> SimSummary {
        let dt = self.config.dt();
        for _ in 0..self.config.total_ticks() {
            self.step(dt);
        }
        self.summary()
    }

    /// Advances the scenario by one tick.
    pub fn step(&mut self, dt: f32) {
        self.fire_due_events();
        self.move_player(dt);

        for actor in &mut self.actors {
            let before = actor.npc.state();
            actor
                .npc
                .update(dt, &mut actor.body, &self.player, &mut actor.anim);
            actor.body.integrate(dt);

            let after = actor.npc.state();
            if before != after {
                self.transitions += 1;
                info!(
                    name = %actor.name,
                    time = self.time,
                    from = before.display_name(),
                    to = after.display_name(),
                    "state changed"
                );
            }
        }

        self.time += dt;
        self.ticks += 1;
    }

    /// Current summary.
    #[must_use]
    pub fn summary(&self) -> SimSummary {
        SimSummary {
            ticks: self.ticks,
            transitions: self.transitions,
            events_delivered: self.events_delivered,
            final_states: self
                .actors
                .iter()
                .map(|a| (a.name.clone(), a.npc.state()))
                .collect(),
        }
    }

    /// Debug gizmos for every NPC.
    #[must_use]
    pub fn gizmos(&self, overlay: &NpcDebugOverlayConfig) -> Vec<NpcGizmos> {
        self.actors
            .iter()
            .map(|a| build_gizmos(&a.npc, a.body.position, overlay))
            .collect()
    }

    fn fire_due_events(&mut self) {
        while let Some(scripted) = self.schedule.get(self.next_event) {
            if scripted.at_secs > self.time {
                break;
            }
            self.next_event += 1;

            let Some(actor) = self.actors.iter().find(|a| a.name == scripted.npc) else {
                warn!(npc = %scripted.npc, "scripted event targets unknown NPC");
                continue;
            };

            let player = BubbleRef::player(self.player_id, self.player_position);
            let event = match scripted.action {
                ScriptedAction::AbsorbedByPlayer => BubbleEvent::AbsorbedByOther(player),
                ScriptedAction::AbsorbedPlayer => BubbleEvent::AbsorbedOther(player),
                ScriptedAction::Released => BubbleEvent::BecameIndividual,
                ScriptedAction::Bump { obstacle } => BubbleEvent::BumpIntoHardened(BubbleRef::new(
                    EntityId::new(),
                    BubbleKind::Hardened,
                    obstacle,
                )),
            };

            if self.hub.publish(actor.npc.id(), event) {
                self.events_delivered += 1;
                debug!(npc = %scripted.npc, event = event.name(), "scripted event fired");
            }
        }
    }

    fn move_player(&mut self, dt: f32) {
        let waypoints = &self.config.player_waypoints;
        if waypoints.is_empty() {
            return;
        }

        let goal = waypoints[self.waypoint % waypoints.len()];
        let to_goal = goal - self.player_position;
        let step = self.config.player_speed * dt;
        if to_goal.length() <= step.max(WAYPOINT_REACHED) {
            self.player_position = goal;
            self.waypoint = (self.waypoint + 1) % waypoints.len();
        } else {
            self.player_position += to_goal.normalize_or_zero() * step;
        }
        self.player.set_position(self.player_position);
    }
}
