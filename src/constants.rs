//! Game constants organized by category.
//!
//! Centralizing magic numbers makes tuning easier and documents intent.

// =============================================================================
// WINDOW / ARENA
// =============================================================================

/// Window width in pixels
pub const WINDOW_WIDTH: f32 = 800.0;
/// Window height in pixels
pub const WINDOW_HEIGHT: f32 = 600.0;

/// Arena width (rooms fill the window)
pub const ROOM_WIDTH: f32 = 800.0;
/// Arena height
pub const ROOM_HEIGHT: f32 = 600.0;
/// Thickness of boundary walls
pub const WALL_THICKNESS: f32 = 20.0;
/// Width of the exit gap in the top wall
pub const EXIT_WIDTH: f32 = 100.0;

/// Left edge of the arena (centered in the window)
pub const ROOM_LEFT: f32 = (WINDOW_WIDTH - ROOM_WIDTH) / 2.0;
/// Top edge of the arena
pub const ROOM_TOP: f32 = (WINDOW_HEIGHT - ROOM_HEIGHT) / 2.0;
/// Right edge of the arena
pub const ROOM_RIGHT: f32 = (WINDOW_WIDTH + ROOM_WIDTH) / 2.0;
/// Bottom edge of the arena
pub const ROOM_BOTTOM: f32 = (WINDOW_HEIGHT + ROOM_HEIGHT) / 2.0;

// =============================================================================
// ROOM GENERATION
// =============================================================================

/// Obstacles attempted per room
pub const OBSTACLE_COUNT: usize = 5;
/// Minimum obstacle side length
pub const OBSTACLE_MIN_SIZE: f32 = 40.0;
/// Maximum obstacle side length
pub const OBSTACLE_MAX_SIZE: f32 = 80.0;
/// Placement attempts before an obstacle is dropped
pub const OBSTACLE_PLACEMENT_ATTEMPTS: usize = 50;
/// Vertical inset keeping obstacles away from the exit and spawn rows
pub const OBSTACLE_VERTICAL_INSET: f32 = 50.0;
/// Half-width of the protected corridor from spawn to exit
pub const CORRIDOR_HALF_WIDTH: f32 = 50.0;

/// Rooms per tier; every tenth room is a boss room
pub const ROOMS_PER_TIER: u32 = 10;

// =============================================================================
// PLAYER
// =============================================================================

/// Player rectangle side length
pub const PLAYER_SIZE: f32 = 20.0;
/// Gap between the player's spawn position and the bottom wall
pub const PLAYER_SPAWN_GAP: f32 = 10.0;

/// Dash travel speed in pixels per second
pub const DASH_SPEED: f32 = 2000.0;
/// Invulnerability window measured from dash start, in seconds
pub const DASH_INVULN_DURATION: f64 = 0.2;

// =============================================================================
// COMBAT
// =============================================================================

/// Shared cooldown between contact-damage hits, in seconds
pub const CONTACT_DAMAGE_COOLDOWN: f64 = 0.5;
/// Minimum damage that always pierces armor
pub const DAMAGE_FLOOR: f32 = 1.0;

/// Enemy attack range per point of weapon attack_size
pub const ENEMY_ATTACK_RANGE_PER_SIZE: f32 = 50.0;
/// Enemy sword length per point of weapon attack_size
pub const ENEMY_SWORD_LENGTH_PER_SIZE: f32 = 20.0;
/// Enemy sword width per point of weapon attack_size
pub const ENEMY_SWORD_WIDTH_PER_SIZE: f32 = 10.0;
/// How long an enemy swing stays visible, in seconds
pub const ENEMY_SWING_DURATION: f64 = 0.2;

// =============================================================================
// ENCOUNTERS
// =============================================================================

/// Placement attempts before an enemy is skipped
pub const ENEMY_PLACEMENT_ATTEMPTS: usize = 100;
/// Inset from the inner wall faces when placing enemies
pub const ENEMY_PLACEMENT_INSET: f32 = 30.0;
/// Boss rectangle side length
pub const BOSS_SIZE: f32 = 60.0;
/// Multiplier applied to boss health and damage ranges
pub const BOSS_STAT_SCALE: f32 = 4.0;

// =============================================================================
// INTERACTABLES
// =============================================================================

/// Chest rectangle side length
pub const CHEST_SIZE: f32 = 40.0;
/// Health fountain rectangle side length
pub const FOUNTAIN_SIZE: f32 = 40.0;

// =============================================================================
// INVENTORY
// =============================================================================

/// Maximum unequipped weapons carried
pub const INVENTORY_WEAPON_CAP: usize = 3;
/// Maximum unequipped armor pieces carried
pub const INVENTORY_ARMOR_CAP: usize = 3;
/// Wildboy modifiers offered per level gate
pub const WILDBOY_OFFER_COUNT: usize = 3;

// =============================================================================
// UI
// =============================================================================

/// Number of recent event messages kept in the on-screen log
pub const MESSAGE_LOG_CAP: usize = 6;

// =============================================================================
// TIMING
// =============================================================================

/// Cap on the per-frame delta so a stalled frame cannot teleport entities
pub const MAX_FRAME_DT: f64 = 0.1;

/// Fixed simulation tick. Per-tick quantities (movement speeds in px/tick)
/// are tuned for 60 Hz, so the tick rate is locked regardless of refresh rate
pub const TICK_DT: f64 = 1.0 / 60.0;
