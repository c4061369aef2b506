//! Enemies and encounter spawning.
//!
//! Regular rooms get a tier-scaled pack of enemies placed by rejection
//! sampling; boss rooms get a single enemy at room center with health and
//! damage ranges scaled x4 (bosses are not faster). Spawning always replaces
//! the previous room's enemy list wholesale.

use rand::Rng;

use crate::constants::*;
use crate::geometry::Rect;

/// An enemy's melee loadout, rolled at spawn time.
#[derive(Clone, Copy, Debug)]
pub struct EnemyWeapon {
    pub attack_damage: f32,
    /// Attacks per second
    pub attack_speed: f32,
    /// Scales reach and the sword hitbox
    pub attack_size: f32,
}

/// A live enemy. Created at room spawn, destroyed on death or room change.
#[derive(Clone, Debug)]
pub struct Enemy {
    pub rect: Rect,
    pub health: f32,
    pub max_health: f32,
    /// Pixels moved toward the player per simulation tick
    pub speed: f32,
    /// Contact damage dealt while touching the player
    pub damage: f32,
    /// Erraticism coefficient: jitter mixed into the seek vector
    pub behavior: f32,
    pub weapon: EnemyWeapon,
    pub last_attack_time: f64,
    /// Transient swing hitbox and the time it stops being drawn
    pub sword: Option<(Rect, f64)>,
}

impl Enemy {
    /// Reach of this enemy's melee swing, from center to player center.
    pub fn attack_range(&self) -> f32 {
        ENEMY_ATTACK_RANGE_PER_SIZE * self.weapon.attack_size
    }

    /// Swing hitbox dimensions (length away from the enemy, width across).
    pub fn sword_dimensions(&self) -> (f32, f32) {
        (
            ENEMY_SWORD_LENGTH_PER_SIZE * self.weapon.attack_size,
            ENEMY_SWORD_WIDTH_PER_SIZE * self.weapon.attack_size,
        )
    }
}

/// Stat sampling ranges for one tier.
struct TierRanges {
    health: (i32, i32),
    speed: (f32, f32),
    damage: (i32, i32),
    size: (i32, i32),
    behavior: (f32, f32),
    count: (u32, u32),
}

const HEALTH_RANGES: [(i32, i32); 10] = [
    (10, 20), (20, 30), (30, 40), (40, 50), (50, 60),
    (60, 70), (70, 80), (80, 90), (90, 100), (100, 120),
];
const SPEED_RANGES: [(f32, f32); 10] = [
    (1.0, 2.0), (2.0, 3.0), (3.0, 4.0), (4.0, 5.0), (5.0, 6.0),
    (6.0, 7.0), (7.0, 8.0), (8.0, 9.0), (9.0, 10.0), (10.0, 12.0),
];
const DAMAGE_RANGES: [(i32, i32); 10] = [
    (5, 10), (10, 15), (15, 20), (20, 25), (25, 30),
    (30, 35), (35, 40), (40, 45), (45, 50), (50, 60),
];
const SIZE_RANGES: [(i32, i32); 10] = [
    (20, 30), (25, 35), (30, 40), (35, 45), (40, 50),
    (45, 55), (50, 60), (55, 65), (60, 70), (65, 75),
];
const BEHAVIOR_RANGES: [(f32, f32); 10] = [
    (0.0, 1.0), (0.0, 1.0), (1.0, 2.0), (1.0, 2.0), (2.0, 3.0),
    (2.0, 3.0), (3.0, 4.0), (3.0, 4.0), (4.0, 5.0), (4.0, 5.0),
];
const COUNT_RANGES: [(u32, u32); 10] = [
    (2, 4), (3, 5), (4, 6), (5, 7), (6, 8),
    (7, 9), (8, 10), (9, 11), (10, 12), (12, 15),
];

fn ranges_for_tier(tier: u32) -> TierRanges {
    let index = (tier.max(1) as usize).min(10) - 1;
    TierRanges {
        health: HEALTH_RANGES[index],
        speed: SPEED_RANGES[index],
        damage: DAMAGE_RANGES[index],
        size: SIZE_RANGES[index],
        behavior: BEHAVIOR_RANGES[index],
        count: COUNT_RANGES[index],
    }
}

fn sample_f32(range: (f32, f32), rng: &mut impl Rng) -> f32 {
    if range.0 == range.1 {
        range.0
    } else {
        rng.gen_range(range.0..range.1)
    }
}

/// Spawn a regular encounter for the given tier.
///
/// Enemy count is sampled from the tier range; each enemy gets up to
/// [`ENEMY_PLACEMENT_ATTEMPTS`] tries to find a spot where its full rectangle
/// overlaps no wall and no already-placed enemy. Enemies that exhaust their
/// attempts are skipped, so the pack can come up short.
pub fn spawn_enemies(tier: u32, walls: &[Rect], rng: &mut impl Rng) -> Vec<Enemy> {
    let ranges = ranges_for_tier(tier);
    let count = rng.gen_range(ranges.count.0..=ranges.count.1);
    let mut enemies: Vec<Enemy> = Vec::with_capacity(count as usize);

    for _ in 0..count {
        for _ in 0..ENEMY_PLACEMENT_ATTEMPTS {
            let size = rng.gen_range(ranges.size.0..=ranges.size.1) as f32;
            let x = rng.gen_range(
                ROOM_LEFT + WALL_THICKNESS + ENEMY_PLACEMENT_INSET
                    ..=ROOM_RIGHT - WALL_THICKNESS - ENEMY_PLACEMENT_INSET,
            );
            let y = rng.gen_range(
                ROOM_TOP + WALL_THICKNESS + ENEMY_PLACEMENT_INSET
                    ..=ROOM_BOTTOM - WALL_THICKNESS - ENEMY_PLACEMENT_INSET,
            );
            let rect = Rect::new(x, y, size, size);

            if rect.intersects_any(walls) {
                continue;
            }
            if enemies.iter().any(|e| rect.intersects(&e.rect)) {
                continue;
            }

            let health = rng.gen_range(ranges.health.0..=ranges.health.1) as f32;
            enemies.push(Enemy {
                rect,
                health,
                max_health: health,
                speed: sample_f32(ranges.speed, rng),
                damage: rng.gen_range(ranges.damage.0..=ranges.damage.1) as f32,
                behavior: sample_f32(ranges.behavior, rng),
                weapon: EnemyWeapon {
                    attack_damage: (rng.gen_range(5..=15) * tier.max(1) as i32) as f32,
                    attack_speed: rng.gen_range(0.5..1.5),
                    attack_size: rng.gen_range(1.0..2.0),
                },
                last_attack_time: f64::NEG_INFINITY,
                sword: None,
            });
            break;
        }
    }

    enemies
}

/// Spawn a single boss at room center with stats x4 the tier's normal ranges.
/// Speed stays at the normal range and the weapon damage scales by tier
/// directly rather than x4.
pub fn spawn_boss(tier: u32, rng: &mut impl Rng) -> Vec<Enemy> {
    let ranges = ranges_for_tier(tier);
    let scale = BOSS_STAT_SCALE as i32;

    let health = rng.gen_range(ranges.health.0 * scale..=ranges.health.1 * scale) as f32;
    let boss = Enemy {
        rect: Rect::new(
            WINDOW_WIDTH / 2.0 - BOSS_SIZE / 2.0,
            WINDOW_HEIGHT / 2.0 - BOSS_SIZE / 2.0,
            BOSS_SIZE,
            BOSS_SIZE,
        ),
        health,
        max_health: health,
        speed: sample_f32(ranges.speed, rng),
        damage: rng.gen_range(ranges.damage.0 * scale..=ranges.damage.1 * scale) as f32,
        behavior: sample_f32(ranges.behavior, rng),
        weapon: EnemyWeapon {
            attack_damage: (rng.gen_range(15..=30) * tier.max(1) as i32) as f32,
            attack_speed: rng.gen_range(0.5..1.0),
            attack_size: rng.gen_range(2.0..4.0),
        },
        last_attack_time: f64::NEG_INFINITY,
        sword: None,
    };

    vec![boss]
}
