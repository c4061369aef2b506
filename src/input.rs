//! Input handling.
//!
//! The window shell accumulates raw winit events into [`InputState`] and
//! snapshots a [`FrameInput`] once per frame for the simulation. The core
//! never sees winit types beyond this module.

use std::collections::HashSet;

use glam::Vec2;
use winit::keyboard::KeyCode;

/// Raw input state tracked across window events.
pub struct InputState {
    pub keys_held: HashSet<KeyCode>,
    /// Keys that went down since the last frame snapshot
    pub keys_pressed: HashSet<KeyCode>,
    pub mouse_pos: Vec2,
    pub mouse_down: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            keys_held: HashSet::new(),
            keys_pressed: HashSet::new(),
            mouse_pos: Vec2::ZERO,
            mouse_down: false,
        }
    }

    pub fn key_down(&mut self, key: KeyCode) {
        if self.keys_held.insert(key) {
            self.keys_pressed.insert(key);
        }
    }

    pub fn key_up(&mut self, key: KeyCode) {
        self.keys_held.remove(&key);
    }

    /// Build the per-frame input snapshot and clear edge-triggered state.
    pub fn frame_input(&mut self) -> FrameInput {
        let input = FrameInput {
            move_up: self.keys_held.contains(&KeyCode::KeyW),
            move_down: self.keys_held.contains(&KeyCode::KeyS),
            move_left: self.keys_held.contains(&KeyCode::KeyA),
            move_right: self.keys_held.contains(&KeyCode::KeyD),
            attack_held: self.mouse_down,
            dash_pressed: self.keys_pressed.contains(&KeyCode::Space),
            interact_held: self.keys_held.contains(&KeyCode::KeyE),
            cursor: self.mouse_pos,
        };
        self.keys_pressed.clear();
        input
    }

    /// Edge query for shell-level keys (inventory toggle, restart).
    pub fn take_pressed(&mut self, key: KeyCode) -> bool {
        self.keys_pressed.remove(&key)
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything the simulation reads for one frame.
///
/// Movement keys and the attack/interact keys are level-triggered; the dash
/// is edge-triggered here. Chest interaction is additionally edge-tracked
/// inside the simulation while the fountain and level gate deliberately are
/// not - they re-trigger every overlapping frame until their used flag sets.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameInput {
    pub move_up: bool,
    pub move_down: bool,
    pub move_left: bool,
    pub move_right: bool,
    /// Primary attack button held
    pub attack_held: bool,
    /// Dash key went down this frame
    pub dash_pressed: bool,
    /// Interact key currently held
    pub interact_held: bool,
    /// Cursor position in window coordinates, for attack direction
    pub cursor: Vec2,
}

impl FrameInput {
    /// Raw held-key movement direction, un-normalized (axis-independent
    /// application makes diagonal movement faster; preserved quirk).
    pub fn move_direction(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.move_up {
            dir.y -= 1.0;
        }
        if self.move_down {
            dir.y += 1.0;
        }
        if self.move_left {
            dir.x -= 1.0;
        }
        if self.move_right {
            dir.x += 1.0;
        }
        dir
    }
}
