//! End-to-end NPC scenarios driven through the public API.

use bubble_common::{EntityId, Vec2};
use bubble_gameplay::{
    AbsorptionHub, AnimationClip, BubbleEvent, BubbleKind, BubbleRef, KinematicBody, Npc,
    NpcConfig, NpcState, SpriteAnimator, TargetProvider, TetherBehavior, TrackedTarget,
};

const DT: f32 = 1.0 / 60.0;

struct World {
    hub: AbsorptionHub,
    player_id: EntityId,
    player: TrackedTarget,
    npc: Npc,
    body: KinematicBody,
    anim: SpriteAnimator,
}

impl World {
    fn new(tether: TetherBehavior, spawn: Vec2, player: Vec2) -> Self {
        let hub = AbsorptionHub::default();
        let config = NpcConfig::with_tether(tether).with_wander_radius(5.0);
        let npc = Npc::spawn(config, &hub).expect("valid config").with_seed(99);
        Self {
            hub,
            player_id: EntityId::new(),
            player: TrackedTarget::new(player),
            npc,
            body: KinematicBody::new(spawn),
            anim: SpriteAnimator::new(),
        }
    }

    fn step(&mut self, ticks: usize) {
        for _ in 0..ticks {
            self.npc
                .update(DT, &mut self.body, &self.player, &mut self.anim);
            self.body.integrate(DT);
        }
    }

    fn send(&self, event: BubbleEvent) {
        assert!(self.hub.publish(self.npc.id(), event));
    }

    fn player_ref(&self) -> BubbleRef {
        BubbleRef::player(self.player_id, self.player_position())
    }

    fn player_position(&self) -> Vec2 {
        self.player.target_position()
    }
}

#[test]
fn player_approaching_and_retreating() {
    let mut world = World::new(TetherBehavior::Friendly, Vec2::ZERO, Vec2::new(10.0, 0.0));

    world.step(60);
    assert_eq!(world.npc.state(), NpcState::Wandering);
    let center = world.npc.wander_center().expect("center captured");
    assert!(world.body.position.distance(center) <= 5.0 + 1.0);

    world.player.set_position(Vec2::new(3.0, 0.0));
    world.step(1);
    assert_eq!(world.npc.state(), NpcState::MovingTowardsPlayer);

    world.step(60);
    assert_eq!(world.npc.state(), NpcState::MovingTowardsPlayer);
    assert!(world.body.position.distance(Vec2::new(3.0, 0.0)) < 3.0);

    world.player.set_position(Vec2::new(12.0, 0.0));
    world.step(1);
    assert_eq!(world.npc.state(), NpcState::Wandering);
}

#[test]
fn friendly_npc_is_bound_for_good() {
    let mut world = World::new(TetherBehavior::Friendly, Vec2::ZERO, Vec2::new(1.0, 0.0));
    world.step(5);

    world.send(BubbleEvent::AbsorbedByOther(world.player_ref()));
    world.step(1);
    assert_eq!(world.npc.state(), NpcState::TetheredToPlayer);

    world.send(BubbleEvent::BecameIndividual);
    world.player.set_position(Vec2::new(40.0, 40.0));
    world.step(240);
    assert_eq!(world.npc.state(), NpcState::TetheredToPlayer);
    // Following the player well outside the wander zone.
    assert!(world.body.position.length() > 5.0);
}

#[test]
fn negative_npc_breaks_free_on_release() {
    let mut world = World::new(TetherBehavior::Negative, Vec2::ZERO, Vec2::new(20.0, 0.0));
    world.step(5);

    world.send(BubbleEvent::AbsorbedOther(world.player_ref()));
    world.step(30);
    assert_eq!(world.npc.state(), NpcState::TetheredToPlayer);
    assert_eq!(world.anim.current(), Some(AnimationClip::Shout));
    assert_eq!(world.body.velocity, Vec2::ZERO);

    world.send(BubbleEvent::BecameIndividual);
    world.step(1);
    assert_eq!(world.npc.state(), NpcState::Wandering);
}

#[test]
fn events_apply_in_publish_order() {
    let mut world = World::new(TetherBehavior::Negative, Vec2::ZERO, Vec2::new(20.0, 0.0));
    world.send(BubbleEvent::AbsorbedByOther(world.player_ref()));
    world.send(BubbleEvent::BecameIndividual);
    world.step(1);
    assert_eq!(world.npc.state(), NpcState::Wandering);

    world.send(BubbleEvent::BecameIndividual);
    world.send(BubbleEvent::AbsorbedByOther(world.player_ref()));
    world.step(1);
    assert_eq!(world.npc.state(), NpcState::TetheredToPlayer);
}

#[test]
fn bounce_keeps_state_and_pushes_away() {
    let mut world = World::new(TetherBehavior::Friendly, Vec2::new(1.0, 0.0), Vec2::new(50.0, 0.0));
    let hardened = BubbleRef::new(EntityId::new(), BubbleKind::Hardened, Vec2::new(3.0, 0.0));

    world.npc.handle_event(&BubbleEvent::BumpIntoHardened(hardened), &mut world.body);
    assert_eq!(world.body.velocity.x, -world.npc.config().bounce_away_speed);
    assert_eq!(world.npc.state(), NpcState::Wandering);
}

#[test]
fn destroyed_npc_receives_nothing() {
    let world = World::new(TetherBehavior::Friendly, Vec2::ZERO, Vec2::ZERO);
    let id = world.npc.id();
    let hub = world.hub.clone();
    drop(world);

    assert_eq!(hub.subscriber_count(), 0);
    assert!(!hub.publish(id, BubbleEvent::BecameIndividual));
}
