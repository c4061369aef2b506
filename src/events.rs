//! Game event system for decoupled communication between systems.
//!
//! The simulation emits events; the UI consumes them for the message log.
//! This keeps notifications out of the combat code.

/// Game events that systems can emit and subscribe to
#[derive(Debug, Clone)]
pub enum GameEvent {
    /// Player walked through the exit into a new room
    RoomEntered { room_id: u32, tier: u32, boss: bool },
    /// All enemies in the room are dead and the chest appeared
    ChestSpawned,
    /// An item moved from the chest into the inventory
    ItemTaken { name: String },
    /// A chest item could not be picked up
    InventoryFull { name: String },
    /// The chest has already been emptied
    ChestEmpty,
    /// Player drank from the health fountain
    FountainUsed,
    /// Player touched the level gate and the wildboy offer opened
    LevelGateTouched,
    /// Player picked a wildboy modifier
    WildboySelected { name: String },
    /// Player declined the wildboy offer
    WildboySkipped,
    /// Player health reached zero
    PlayerDied,
}

/// Simple event queue - events are pushed during update, processed at end of frame
#[derive(Default)]
pub struct EventQueue {
    events: Vec<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Push an event to be processed later
    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain all events for processing
    pub fn drain(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }

    /// Check if there are pending events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
