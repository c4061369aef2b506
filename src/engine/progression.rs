//! Room transitions, the wildboy offer, and run restarts.
//!
//! Everything here runs at room boundaries rather than every frame: the
//! simulation calls [`advance_room`] when the player crosses the exit and
//! [`open_wildboy_offer`] when a level gate is touched.

use rand::Rng;

use crate::constants::*;
use crate::enemy::{spawn_boss, spawn_enemies};
use crate::events::{EventQueue, GameEvent};
use crate::geometry::Rect;
use crate::items::select_random_wildboys;
use crate::room;
use crate::stats::StatKind;

use super::game_state::{BossRoomFixture, ChestState, GameState};

/// Advance to the next room: new walls, a fresh encounter, reset room-local
/// transients, and the player back at the bottom-center spawn point.
///
/// The fountain and level gate only ever exist in boss rooms; entering a boss
/// room re-arms their should-spawn flags, and the flags stay consumed until
/// the next one.
pub fn advance_room(state: &mut GameState, rng: &mut impl Rng, events: &mut EventQueue) {
    state.room_id += 1;
    let tier = state.tier();
    let boss = state.is_boss_room();

    state.walls = room::build_walls(rng);
    state.colors = room::colors_for_tier(tier);
    state.chest = ChestState::default();

    state.fountain = BossRoomFixture {
        should_spawn: boss,
        ..BossRoomFixture::default()
    };
    state.levelgate = BossRoomFixture {
        should_spawn: boss,
        ..BossRoomFixture::default()
    };

    state.enemies = if boss {
        spawn_boss(tier, rng)
    } else {
        spawn_enemies(tier, &state.walls, rng)
    };

    state.sword_hitbox = None;
    state.place_player_at_spawn();

    events.push(GameEvent::RoomEntered {
        room_id: state.room_id,
        tier,
        boss,
    });
}

/// Spawn the room-clear rewards: the chest at room center, and in boss rooms
/// whatever fixtures are still armed.
pub fn spawn_room_rewards(state: &mut GameState, events: &mut EventQueue) {
    state.chest.rect = Some(Rect::from_center(
        glam::Vec2::new(WINDOW_WIDTH / 2.0, WINDOW_HEIGHT / 2.0),
        CHEST_SIZE,
        CHEST_SIZE,
    ));
    state.chest.spawned = true;
    events.push(GameEvent::ChestSpawned);

    if !state.is_boss_room() {
        return;
    }

    if state.fountain.should_spawn && !state.fountain.spawned {
        state.fountain.rect = Some(Rect::from_center(
            glam::Vec2::new(WINDOW_WIDTH / 2.0, WINDOW_HEIGHT / 2.0 + ROOM_HEIGHT / 4.0),
            FOUNTAIN_SIZE,
            FOUNTAIN_SIZE,
        ));
        state.fountain.spawned = true;
        state.fountain.used = false;
    }

    if state.levelgate.should_spawn && !state.levelgate.spawned {
        state.levelgate.rect = Some(room::exit_gap_rect());
        state.levelgate.spawned = true;
        state.levelgate.used = false;
    }
}

/// Open the wildboy offer: up to three distinct modifiers plus an implicit
/// skip. The simulation pauses until [`choose_wildboy`] is called.
pub fn open_wildboy_offer(state: &mut GameState, rng: &mut impl Rng, events: &mut EventQueue) {
    state.pending_wildboys = Some(select_random_wildboys(rng));
    events.push(GameEvent::LevelGateTouched);
}

/// Resolve the wildboy offer. `choice` indexes the offered list; `None`
/// skips. The selected modifier is applied unconditionally - its flavor
/// condition never gates anything.
pub fn choose_wildboy(state: &mut GameState, choice: Option<usize>, events: &mut EventQueue) {
    let Some(offered) = state.pending_wildboys.take() else {
        return;
    };
    let mut offered = offered;
    match choice {
        Some(index) if index < offered.len() => {
            let wildboy = offered.swap_remove(index);
            events.push(GameEvent::WildboySelected {
                name: wildboy.name.clone(),
            });
            state.equipment.wildboys.push(wildboy);
        }
        _ => events.push(GameEvent::WildboySkipped),
    }
}

/// Drink from the health fountain: restore Health to the derived MaxHealth
/// and consume the fountain for this tier.
pub fn use_fountain(state: &mut GameState, events: &mut EventQueue) {
    let derived = state.derived_stats();
    state
        .base_stats
        .set(StatKind::Health, derived.get(StatKind::MaxHealth));
    state.fountain.used = true;
    state.fountain.should_spawn = false;
    events.push(GameEvent::FountainUsed);
}

/// Restart after game over: everything back to defaults, room 1 regenerated.
pub fn reset(state: &mut GameState, rng: &mut impl Rng, events: &mut EventQueue) {
    *state = GameState::new(rng, events);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh_state() -> GameState {
        let mut rng = rand::thread_rng();
        let mut events = EventQueue::new();
        GameState::new(&mut rng, &mut events)
    }

    #[test]
    fn test_first_room_setup() {
        let mut state = fresh_state();
        assert_eq!(state.room_id, 1);
        assert_eq!(state.tier(), 1);
        assert!(!state.is_boss_room());
        assert!(!state.enemies.is_empty());
        assert!(!state.chest.spawned);
        // Player spawns at bottom-center, inside the walls
        let center = state.player.center();
        assert_eq!(center.x, WINDOW_WIDTH / 2.0);
        assert!(!state.player.intersects_any(&state.walls));
        // Starter weapon equipped, nothing else
        assert_eq!(state.equipment.weapon.as_ref().unwrap().name, "Starter Weapon");
        assert_eq!(state.inventory.count(), 0);
    }

    #[test]
    fn test_boss_room_spawns_single_boss_and_arms_fixtures() {
        let mut rng = rand::thread_rng();
        let mut events = EventQueue::new();
        let mut state = fresh_state();
        for _ in 0..9 {
            advance_room(&mut state, &mut rng, &mut events);
        }
        assert_eq!(state.room_id, 10);
        assert!(state.is_boss_room());
        assert_eq!(state.tier(), 1);
        assert_eq!(state.enemies.len(), 1);
        assert!(state.fountain.should_spawn);
        assert!(state.levelgate.should_spawn);
        assert!(state.fountain.rect.is_none(), "fixtures appear on clear, not entry");

        advance_room(&mut state, &mut rng, &mut events);
        assert_eq!(state.room_id, 11);
        assert_eq!(state.tier(), 2);
        assert!(!state.is_boss_room());
        assert!(!state.fountain.should_spawn);
    }

    #[test]
    fn test_room_rewards_spawn_once_armed() {
        let mut rng = rand::thread_rng();
        let mut events = EventQueue::new();
        let mut state = fresh_state();
        for _ in 0..9 {
            advance_room(&mut state, &mut rng, &mut events);
        }
        state.enemies.clear();
        spawn_room_rewards(&mut state, &mut events);
        assert!(state.chest.spawned);
        assert!(state.fountain.spawned);
        assert!(state.levelgate.spawned);
        assert_eq!(state.levelgate.rect.unwrap(), room::exit_gap_rect());
    }

    #[test]
    fn test_wildboy_offer_and_choice() {
        let mut rng = rand::thread_rng();
        let mut events = EventQueue::new();
        let mut state = fresh_state();

        open_wildboy_offer(&mut state, &mut rng, &mut events);
        let offered = state.pending_wildboys.clone().unwrap();
        assert_eq!(offered.len(), WILDBOY_OFFER_COUNT);

        choose_wildboy(&mut state, Some(1), &mut events);
        assert!(state.pending_wildboys.is_none());
        assert_eq!(state.equipment.wildboys.len(), 1);
        assert_eq!(state.equipment.wildboys[0].name, offered[1].name);

        // Skipping leaves equipment untouched
        open_wildboy_offer(&mut state, &mut rng, &mut events);
        choose_wildboy(&mut state, None, &mut events);
        assert_eq!(state.equipment.wildboys.len(), 1);
    }

    #[test]
    fn test_fountain_restores_to_max_and_disarms() {
        let mut events = EventQueue::new();
        let mut state = fresh_state();
        state.base_stats.set(StatKind::Health, 20.0);
        state.fountain.should_spawn = true;
        state.fountain.spawned = true;

        use_fountain(&mut state, &mut events);
        assert_eq!(state.base_stats.get(StatKind::Health), 100.0);
        assert!(state.fountain.used);
        assert!(!state.fountain.should_spawn);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut rng = rand::thread_rng();
        let mut events = EventQueue::new();
        let mut state = fresh_state();
        for _ in 0..4 {
            advance_room(&mut state, &mut rng, &mut events);
        }
        state.base_stats.set(StatKind::Health, 1.0);
        state.game_over = true;

        reset(&mut state, &mut rng, &mut events);
        assert_eq!(state.room_id, 1);
        assert!(!state.game_over);
        assert_eq!(state.base_stats.get(StatKind::Health), 100.0);
        assert!(state.equipment.weapon.is_some());
        assert!(state.equipment.wildboys.is_empty());
    }
}
