//! Room generation: boundary walls, the exit gap, and obstacles.
//!
//! Every room is the same 800x600 arena. The top wall is split around a
//! centered exit gap, and up to five obstacles are rejection-sampled into the
//! interior while a vertical corridor through the middle stays clear so the
//! exit is always reachable from the spawn point.

use rand::Rng;

use crate::constants::*;
use crate::geometry::Rect;

/// Per-tier background and wall colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorScheme {
    pub background: (u8, u8, u8),
    pub wall: (u8, u8, u8),
}

const COLOR_SCHEMES: [ColorScheme; 10] = [
    ColorScheme { background: (30, 30, 30), wall: (80, 80, 80) },     // Tier 1
    ColorScheme { background: (40, 35, 30), wall: (90, 80, 70) },     // Tier 2
    ColorScheme { background: (35, 30, 40), wall: (85, 75, 90) },     // Tier 3
    ColorScheme { background: (30, 40, 35), wall: (80, 90, 85) },     // Tier 4
    ColorScheme { background: (40, 40, 30), wall: (100, 100, 75) },   // Tier 5
    ColorScheme { background: (30, 30, 45), wall: (70, 70, 100) },    // Tier 6
    ColorScheme { background: (25, 35, 25), wall: (60, 80, 60) },     // Tier 7
    ColorScheme { background: (50, 40, 30), wall: (110, 90, 70) },    // Tier 8
    ColorScheme { background: (35, 35, 35), wall: (100, 100, 100) },  // Tier 9
    ColorScheme { background: (20, 20, 20), wall: (60, 60, 60) },     // Tier 10+
];

/// Difficulty tier for a 1-based room id: rooms 1-9 are tier 1, the boss room
/// at 10 closes the tier, and rooms 10-19 onward advance one tier per ten.
pub fn tier_for_room(room_id: u32) -> u32 {
    if room_id == 0 {
        return 1;
    }
    (room_id - 1) / ROOMS_PER_TIER + 1
}

/// Every tenth room hosts a boss instead of a regular encounter.
pub fn is_boss_room(room_id: u32) -> bool {
    room_id % ROOMS_PER_TIER == 0 && room_id != 0
}

/// Color scheme for a tier, clamped to the last entry for deep runs.
pub fn colors_for_tier(tier: u32) -> ColorScheme {
    let index = (tier.max(1) as usize).min(COLOR_SCHEMES.len()) - 1;
    COLOR_SCHEMES[index]
}

/// Left edge of the exit gap in the top wall.
pub fn exit_left() -> f32 {
    (WINDOW_WIDTH - EXIT_WIDTH) / 2.0
}

/// The rectangle a level gate occupies: the exit gap itself, one wall thick.
pub fn exit_gap_rect() -> Rect {
    Rect::new(exit_left(), ROOM_TOP, EXIT_WIDTH, WALL_THICKNESS)
}

/// Build the wall set for a fresh room: boundary walls with the top wall
/// split around the exit gap, then up to [`OBSTACLE_COUNT`] obstacles placed
/// by rejection sampling. Obstacles that fail every attempt are dropped, so
/// the obstacle count may fall short - density degrades instead of stalling.
pub fn build_walls(rng: &mut impl Rng) -> Vec<Rect> {
    // Side walls run the full height; the top and bottom spans are inset
    // between them so no two wall rectangles ever overlap.
    let inner_left = ROOM_LEFT + WALL_THICKNESS;
    let inner_right = ROOM_RIGHT - WALL_THICKNESS;
    let mut walls = vec![
        Rect::new(ROOM_LEFT, ROOM_TOP, WALL_THICKNESS, ROOM_HEIGHT),
        Rect::new(inner_right, ROOM_TOP, WALL_THICKNESS, ROOM_HEIGHT),
        Rect::new(
            inner_left,
            ROOM_BOTTOM - WALL_THICKNESS,
            inner_right - inner_left,
            WALL_THICKNESS,
        ),
        // Top wall segments flanking the exit gap
        Rect::new(inner_left, ROOM_TOP, exit_left() - inner_left, WALL_THICKNESS),
        Rect::new(
            exit_left() + EXIT_WIDTH,
            ROOM_TOP,
            inner_right - (exit_left() + EXIT_WIDTH),
            WALL_THICKNESS,
        ),
    ];

    let corridor_left = WINDOW_WIDTH / 2.0 - CORRIDOR_HALF_WIDTH;
    let corridor_right = WINDOW_WIDTH / 2.0 + CORRIDOR_HALF_WIDTH;

    for _ in 0..OBSTACLE_COUNT {
        let width = rng.gen_range(OBSTACLE_MIN_SIZE..=OBSTACLE_MAX_SIZE).floor();
        let height = rng.gen_range(OBSTACLE_MIN_SIZE..=OBSTACLE_MAX_SIZE).floor();

        for _ in 0..OBSTACLE_PLACEMENT_ATTEMPTS {
            let x = rng.gen_range(ROOM_LEFT + WALL_THICKNESS..=ROOM_RIGHT - WALL_THICKNESS - width);
            let y = rng.gen_range(
                ROOM_TOP + WALL_THICKNESS + OBSTACLE_VERTICAL_INSET
                    ..=ROOM_BOTTOM - WALL_THICKNESS - height - OBSTACLE_VERTICAL_INSET,
            );

            // Keep the spawn-to-exit corridor clear
            if x + width > corridor_left && x < corridor_right {
                continue;
            }

            let candidate = Rect::new(x, y, width, height);
            if !candidate.intersects_any(&walls) {
                walls.push(candidate);
                break;
            }
        }
    }

    walls
}
