//! Core game state - owns the simulation data.

use glam::Vec2;
use rand::Rng;

use crate::constants::*;
use crate::enemy::Enemy;
use crate::events::EventQueue;
use crate::geometry::Rect;
use crate::inventory::{Equipment, Inventory};
use crate::items::{generate_equipment, Item, ItemKind, WildboyModifier};
use crate::room::ColorScheme;
use crate::stats::{derive_stats, StatBlock};

use super::progression;

/// Simulation clock. Advanced once per tick; every cooldown comparison in a
/// tick uses the same sampled timestamp to avoid skew. The accumulator holds
/// the fraction of a tick left over after a frame's whole ticks have run.
#[derive(Clone, Copy, Debug, Default)]
pub struct GameClock {
    pub time: f64,
    pub accumulator: f64,
}

impl GameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, dt: f64) {
        self.time += dt;
    }
}

/// Player dash in flight.
#[derive(Clone, Copy, Debug)]
pub struct DashState {
    pub active: bool,
    /// Fixed direction for the whole dash, unit length
    pub direction: Vec2,
    /// Distance left to travel in pixels
    pub remaining: f32,
    /// When the dash began; the invulnerability window counts from here
    pub started_at: f64,
}

impl Default for DashState {
    fn default() -> Self {
        Self {
            active: false,
            direction: Vec2::ZERO,
            remaining: 0.0,
            started_at: f64::NEG_INFINITY,
        }
    }
}

/// Room-local chest state. The chest appears once per cleared room and holds
/// at most one lazily-generated item.
#[derive(Clone, Debug, Default)]
pub struct ChestState {
    pub rect: Option<Rect>,
    pub spawned: bool,
    pub opened: bool,
    pub item: Option<Item>,
    /// Edge latch so a held interact key opens the chest only once
    pub interacted: bool,
}

/// Boss-room interactable (health fountain or level gate) with its
/// arm/disarm flags. `should_spawn` is re-armed on boss-room entry and
/// consumed on use.
#[derive(Clone, Copy, Debug, Default)]
pub struct BossRoomFixture {
    pub rect: Option<Rect>,
    pub spawned: bool,
    pub used: bool,
    pub should_spawn: bool,
}

/// Core game state - owns all simulation data.
///
/// Everything the per-frame resolution touches lives here; the UI receives a
/// shared reference and reads it as a snapshot.
pub struct GameState {
    /// Persistent base stats; Health is the only cross-frame mutable stat
    pub base_stats: StatBlock,
    pub inventory: Inventory,
    pub equipment: Equipment,

    pub player: Rect,
    pub dash: DashState,
    /// Last time a dash started, for the dash cooldown
    pub last_dash_time: f64,
    /// Last time the player swung, for the attack cooldown
    pub last_attack_time: f64,
    /// Last time contact damage landed (shared across all enemies)
    pub last_damage_time: f64,
    /// The player's sword hitbox on the frame it swings
    pub sword_hitbox: Option<Rect>,

    pub room_id: u32,
    pub walls: Vec<Rect>,
    pub colors: ColorScheme,
    pub enemies: Vec<Enemy>,

    pub chest: ChestState,
    pub fountain: BossRoomFixture,
    pub levelgate: BossRoomFixture,

    /// While `Some`, the wildboy offer is open and the simulation is paused
    pub pending_wildboys: Option<Vec<WildboyModifier>>,

    pub game_over: bool,
    pub clock: GameClock,
}

impl GameState {
    /// Create a fresh run: default stats, a tier-0 starter weapon equipped,
    /// and room 1 generated.
    pub fn new(rng: &mut impl Rng, events: &mut EventQueue) -> Self {
        let mut equipment = Equipment::new();
        equipment.weapon = Some(generate_equipment(0, ItemKind::Weapon, rng));

        let mut state = Self {
            base_stats: StatBlock::player_defaults(),
            inventory: Inventory::new(),
            equipment,
            player: Rect::new(0.0, 0.0, PLAYER_SIZE, PLAYER_SIZE),
            dash: DashState::default(),
            last_dash_time: f64::NEG_INFINITY,
            last_attack_time: f64::NEG_INFINITY,
            last_damage_time: 0.0,
            sword_hitbox: None,
            room_id: 0,
            walls: Vec::new(),
            colors: crate::room::colors_for_tier(1),
            enemies: Vec::new(),
            chest: ChestState::default(),
            fountain: BossRoomFixture::default(),
            levelgate: BossRoomFixture::default(),
            pending_wildboys: None,
            game_over: false,
            clock: GameClock::new(),
        };
        progression::advance_room(&mut state, rng, events);
        state
    }

    /// Effective stats for this frame; a pure read of base + bonuses.
    pub fn derived_stats(&mut self) -> StatBlock {
        derive_stats(&mut self.base_stats, &self.equipment, 0.0)
    }

    /// Apply incoming damage through the stats pipeline.
    pub fn apply_damage(&mut self, damage: f32) -> StatBlock {
        derive_stats(&mut self.base_stats, &self.equipment, damage)
    }

    /// Whether the dash-invulnerability window is open. Depends only on time
    /// since the dash started, not on whether the dash is still running.
    pub fn dash_invulnerable(&self, now: f64) -> bool {
        now - self.dash.started_at < DASH_INVULN_DURATION
    }

    /// Difficulty tier of the current room.
    pub fn tier(&self) -> u32 {
        crate::room::tier_for_room(self.room_id)
    }

    /// Whether the current room hosts a boss.
    pub fn is_boss_room(&self) -> bool {
        crate::room::is_boss_room(self.room_id)
    }

    /// Move the player to the room spawn point at bottom-center.
    pub fn place_player_at_spawn(&mut self) {
        self.player.x = WINDOW_WIDTH / 2.0 - self.player.width / 2.0;
        self.player.y = ROOM_BOTTOM - WALL_THICKNESS - PLAYER_SPAWN_GAP - self.player.height;
    }
}
