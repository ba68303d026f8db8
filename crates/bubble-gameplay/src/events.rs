//! Absorption events and the hub that routes them to NPCs.
//!
//! The bubble subsystem publishes relationship events addressed to a single
//! entity. Each NPC holds a [`Subscription`]; events queue in a bounded
//! channel until the NPC drains them on its next tick. Dropping the
//! subscription unregisters it, after which publishing to that entity is a
//! no-op.

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use bubble_common::{EntityId, Vec2};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

/// Default per-subscriber queue capacity.
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Classification of the other party in a bubble interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BubbleKind {
    /// The tracked player bubble
    Player,
    /// Another NPC bubble
    Npc,
    /// A hardened, impassable bubble
    Hardened,
}

impl BubbleKind {
    /// Whether this is the tracked target.
    #[must_use]
    pub const fn is_tracked_target(self) -> bool {
        matches!(self, Self::Player)
    }
}

/// The other bubble involved in an event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BubbleRef {
    /// Entity owning the bubble
    pub id: EntityId,
    /// Bubble classification
    pub kind: BubbleKind,
    /// Bubble position when the event fired
    pub position: Vec2,
}

impl BubbleRef {
    /// Creates a bubble reference.
    #[must_use]
    pub const fn new(id: EntityId, kind: BubbleKind, position: Vec2) -> Self {
        Self { id, kind, position }
    }

    /// Reference to the player bubble.
    #[must_use]
    pub const fn player(id: EntityId, position: Vec2) -> Self {
        Self::new(id, BubbleKind::Player, position)
    }
}

/// Relationship event fired by the absorption subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BubbleEvent {
    /// Released from an absorbing group
    BecameIndividual,
    /// Absorbed into another bubble
    AbsorbedByOther(BubbleRef),
    /// Absorbed another bubble
    AbsorbedOther(BubbleRef),
    /// Collided with a hardened bubble
    BumpIntoHardened(BubbleRef),
}

impl BubbleEvent {
    /// Short name for logging.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::BecameIndividual => "became_individual",
            Self::AbsorbedByOther(_) => "absorbed_by_other",
            Self::AbsorbedOther(_) => "absorbed_other",
            Self::BumpIntoHardened(_) => "bump_into_hardened",
        }
    }
}

#[derive(Debug)]
struct Subscriber {
    generation: u64,
    sender: Sender<BubbleEvent>,
}

#[derive(Debug)]
struct HubInner {
    subscribers: HashMap<EntityId, Subscriber>,
    capacity: usize,
    next_generation: u64,
}

/// Routes absorption events to subscribed NPCs.
///
/// Cloning the hub yields another handle to the same registry.
#[derive(Debug, Clone)]
pub struct AbsorptionHub {
    inner: Arc<Mutex<HubInner>>,
}

impl Default for AbsorptionHub {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}

impl AbsorptionHub {
    /// Creates a hub whose per-subscriber queues hold `capacity` events.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HubInner {
                subscribers: HashMap::new(),
                capacity: capacity.max(1),
                next_generation: 0,
            })),
        }
    }

    /// Registers `id`, replacing any previous subscription for it.
    pub fn subscribe(&self, id: EntityId) -> Subscription {
        let mut inner = self.inner.lock();
        let (sender, receiver) = bounded(inner.capacity);
        let generation = inner.next_generation;
        inner.next_generation += 1;
        if inner
            .subscribers
            .insert(id, Subscriber { generation, sender })
            .is_some()
        {
            warn!(%id, "replaced existing absorption subscription");
        }
        debug!(%id, "subscribed to absorption events");

        Subscription {
            id,
            generation,
            receiver,
            hub: Arc::downgrade(&self.inner),
        }
    }

    /// Publishes an event to `id`. Returns false if nobody is listening or
    /// the queue is full.
    pub fn publish(&self, id: EntityId, event: BubbleEvent) -> bool {
        let inner = self.inner.lock();
        let Some(subscriber) = inner.subscribers.get(&id) else {
            trace!(%id, event = event.name(), "no subscriber, event dropped");
            return false;
        };

        match subscriber.sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                warn!(%id, event = event.name(), "event queue full, event dropped");
                false
            },
            Err(TrySendError::Disconnected(_)) => false,
        }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().subscribers.len()
    }

    /// Whether `id` currently has a live subscription.
    #[must_use]
    pub fn is_subscribed(&self, id: EntityId) -> bool {
        self.inner.lock().subscribers.contains_key(&id)
    }
}

/// An entity's registration with the hub. Unsubscribes on drop.
#[derive(Debug)]
pub struct Subscription {
    id: EntityId,
    generation: u64,
    receiver: Receiver<BubbleEvent>,
    hub: Weak<Mutex<HubInner>>,
}

impl Subscription {
    /// Subscribed entity.
    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.id
    }

    /// Takes all pending events in publish order.
    pub fn drain(&self) -> Vec<BubbleEvent> {
        self.receiver.try_iter().collect()
    }

    /// Number of events waiting.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(hub) = self.hub.upgrade() else {
            return;
        };
        let mut inner = hub.lock();
        // A newer subscription for the same id must survive this drop.
        let owned = inner
            .subscribers
            .get(&self.id)
            .is_some_and(|s| s.generation == self.generation);
        if owned {
            inner.subscribers.remove(&self.id);
            debug!(id = %self.id, "unsubscribed from absorption events");
        }
    }
}
