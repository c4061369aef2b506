//! UI rendering using egui.
//!
//! The world itself is painted with egui's background layer painter; the HUD,
//! inventory window, wildboy offer, and game-over screen sit on top. Draw
//! functions read the game state and report clicks back through [`UiActions`]
//! for the shell to apply after the frame.

use std::collections::VecDeque;

use crate::constants::*;
use crate::engine::GameState;
use crate::events::GameEvent;
use crate::geometry::Rect;
use crate::items::{Item, ItemKind, WildboyModifier};
use crate::stats::{StatBlock, StatKind};

const COLOR_PLAYER: egui::Color32 = egui::Color32::from_rgb(200, 200, 50);
const COLOR_ENEMY: egui::Color32 = egui::Color32::from_rgb(200, 50, 50);
const COLOR_HEALTH_BG: egui::Color32 = egui::Color32::from_rgb(100, 0, 0);
const COLOR_HEALTH: egui::Color32 = egui::Color32::from_rgb(200, 0, 0);
const COLOR_SWORD: egui::Color32 = egui::Color32::from_rgb(150, 150, 150);
const COLOR_CHEST: egui::Color32 = egui::Color32::from_rgb(150, 100, 50);
const COLOR_FOUNTAIN: egui::Color32 = egui::Color32::from_rgb(255, 150, 150);

/// Actions the UI wants to perform (returned to game logic)
#[derive(Default)]
pub struct UiActions {
    /// Equip the inventory item at (kind, index)
    pub equip: Option<(ItemKind, usize)>,
    /// Unequip the worn item of this kind back into the inventory
    pub unequip: Option<ItemKind>,
    /// Delete the inventory item at (kind, index)
    pub discard: Option<(ItemKind, usize)>,
    /// Wildboy offer resolved: `Some(i)` picks option i, `None` skips
    pub wildboy_choice: Option<Option<usize>>,
    pub restart: bool,
}

/// Rolling message log fed by game events, shown in the bottom-left.
pub struct MessageLog {
    lines: VecDeque<String>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self {
            lines: VecDeque::with_capacity(MESSAGE_LOG_CAP),
        }
    }

    pub fn record(&mut self, event: &GameEvent) {
        let line = match event {
            GameEvent::RoomEntered { room_id, tier, boss } => {
                if *boss {
                    format!("Room {room_id}: the boss awaits")
                } else {
                    format!("Room {room_id} (tier {tier})")
                }
            }
            GameEvent::ChestSpawned => "A chest appears".to_string(),
            GameEvent::ItemTaken { name } => format!("Picked up {name}"),
            GameEvent::InventoryFull { name } => format!("No room for {name}"),
            GameEvent::ChestEmpty => "The chest is empty".to_string(),
            GameEvent::FountainUsed => "The fountain restores you".to_string(),
            GameEvent::LevelGateTouched => "The gate hums with power".to_string(),
            GameEvent::WildboySelected { name } => format!("Bonded with {name}"),
            GameEvent::WildboySkipped => "The offer fades".to_string(),
            GameEvent::PlayerDied => "You died".to_string(),
        };
        if self.lines.len() == MESSAGE_LOG_CAP {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::new()
    }
}

fn rgb(color: (u8, u8, u8)) -> egui::Color32 {
    egui::Color32::from_rgb(color.0, color.1, color.2)
}

fn to_egui(rect: &Rect) -> egui::Rect {
    egui::Rect::from_min_size(
        egui::pos2(rect.x, rect.y),
        egui::vec2(rect.width, rect.height),
    )
}

/// Paint the room and everything in it on the background layer.
pub fn draw_world(ctx: &egui::Context, state: &GameState) {
    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Background,
        egui::Id::new("world"),
    ));
    let now = state.clock.time;

    painter.rect_filled(
        egui::Rect::from_min_size(
            egui::Pos2::ZERO,
            egui::vec2(WINDOW_WIDTH, WINDOW_HEIGHT),
        ),
        0.0,
        rgb(state.colors.background),
    );

    let wall_color = rgb(state.colors.wall);
    for wall in &state.walls {
        painter.rect_filled(to_egui(wall), 0.0, wall_color);
    }

    for enemy in &state.enemies {
        painter.rect_filled(to_egui(&enemy.rect), 0.0, COLOR_ENEMY);

        // Health bar floating just above the enemy
        let ratio = (enemy.health / enemy.max_health).clamp(0.0, 1.0);
        let bar = egui::Rect::from_min_size(
            egui::pos2(enemy.rect.x, enemy.rect.y - 7.0),
            egui::vec2(enemy.rect.width, 5.0),
        );
        painter.rect_filled(bar, 0.0, COLOR_HEALTH_BG);
        let fill = egui::Rect::from_min_size(bar.min, egui::vec2(bar.width() * ratio, 5.0));
        painter.rect_filled(fill, 0.0, COLOR_HEALTH);

        if let Some((sword, swing_end)) = &enemy.sword {
            if now < *swing_end {
                painter.rect_filled(to_egui(sword), 0.0, COLOR_SWORD);
            }
        }
    }

    if let Some(chest) = &state.chest.rect {
        painter.rect_filled(to_egui(chest), 0.0, COLOR_CHEST);
        if state.chest.opened {
            // Smaller inset square in the floor color marks it opened
            painter.rect_filled(
                to_egui(chest).shrink(5.0),
                0.0,
                rgb(state.colors.background),
            );
        }
    }

    if let Some(fountain) = &state.fountain.rect {
        painter.rect_filled(to_egui(fountain), 0.0, COLOR_FOUNTAIN);
        if state.fountain.used {
            painter.rect_filled(
                to_egui(fountain).shrink(5.0),
                0.0,
                rgb(state.colors.background),
            );
        }
    }

    // The level gate is invisible; it occupies the exit gap

    painter.rect_filled(to_egui(&state.player), 0.0, COLOR_PLAYER);

    if let Some(sword) = &state.sword_hitbox {
        painter.rect_filled(to_egui(sword), 0.0, COLOR_SWORD);
    }
}

/// HUD: the health bar with the stat readout under it, the room number in
/// the top-right, and the message log in the bottom-left.
pub fn draw_hud(ctx: &egui::Context, state: &GameState, stats: &StatBlock, log: &MessageLog) {
    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Middle,
        egui::Id::new("hud"),
    ));

    let ratio = stats.health_fraction();
    let bar = egui::Rect::from_min_size(egui::pos2(10.0, 10.0), egui::vec2(200.0, 20.0));
    painter.rect_filled(bar, 0.0, COLOR_HEALTH_BG);
    let fill = egui::Rect::from_min_size(bar.min, egui::vec2(bar.width() * ratio, bar.height()));
    painter.rect_filled(fill, 0.0, COLOR_HEALTH);

    let font = egui::FontId::monospace(13.0);
    let mut y = 40.0;
    for (kind, value) in stats.entries() {
        painter.text(
            egui::pos2(10.0, y),
            egui::Align2::LEFT_TOP,
            format!("{}: {:.2}", kind.label(), value),
            font.clone(),
            egui::Color32::WHITE,
        );
        y += 16.0;
    }

    painter.text(
        egui::pos2(WINDOW_WIDTH - 150.0, 10.0),
        egui::Align2::LEFT_TOP,
        format!("Room #{}", state.room_id),
        egui::FontId::proportional(24.0),
        egui::Color32::WHITE,
    );

    let mut log_y = WINDOW_HEIGHT - 10.0;
    for line in log.lines.iter().rev() {
        painter.text(
            egui::pos2(10.0, log_y),
            egui::Align2::LEFT_BOTTOM,
            line,
            font.clone(),
            egui::Color32::from_gray(200),
        );
        log_y -= 16.0;
    }
}

fn describe_bonuses(bonuses: &StatBlock) -> String {
    let parts: Vec<String> = bonuses
        .entries()
        .filter(|(_, value)| *value != 0.0)
        .map(|(kind, value)| format!("{} {:+.2}", kind.label(), value))
        .collect();
    if parts.is_empty() {
        "no bonuses".to_string()
    } else {
        parts.join(", ")
    }
}

fn item_button(ui: &mut egui::Ui, item: &Item, delete_mode: bool) -> egui::Response {
    let text = if delete_mode {
        egui::RichText::new(&item.name).color(egui::Color32::from_rgb(255, 80, 80))
    } else {
        egui::RichText::new(&item.name)
    };
    ui.button(text).on_hover_text(describe_bonuses(&item.bonuses))
}

/// Render the inventory/character window. Click equips or unequips; holding
/// shift turns clicks into deletion.
pub fn draw_inventory_window(ctx: &egui::Context, state: &GameState, actions: &mut UiActions) {
    let delete_mode = ctx.input(|i| i.modifiers.shift);

    egui::Window::new("Inventory")
        .default_pos([WINDOW_WIDTH / 2.0 - 250.0, WINDOW_HEIGHT / 2.0 - 180.0])
        .default_size([500.0, 360.0])
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            if delete_mode {
                ui.colored_label(
                    egui::Color32::from_rgb(255, 80, 80),
                    "DELETE MODE: click an item to destroy it",
                );
                ui.separator();
            }

            ui.columns(2, |columns| {
                draw_equipment_column(&mut columns[0], state, actions);
                draw_carried_column(&mut columns[1], state, delete_mode, actions);
            });
        });
}

fn draw_equipment_column(ui: &mut egui::Ui, state: &GameState, actions: &mut UiActions) {
    ui.heading("EQUIPPED");
    ui.separator();
    ui.add_space(5.0);

    for (label, kind, slot) in [
        ("Weapon:", ItemKind::Weapon, &state.equipment.weapon),
        ("Armor:", ItemKind::Armor, &state.equipment.armor),
    ] {
        ui.horizontal(|ui| {
            ui.label(label);
            match slot {
                Some(item) => {
                    if item_button(ui, item, false)
                        .on_hover_text("Click to unequip")
                        .clicked()
                    {
                        actions.unequip = Some(kind);
                    }
                }
                None => {
                    ui.label(
                        egui::RichText::new("(none)")
                            .italics()
                            .color(egui::Color32::GRAY),
                    );
                }
            }
        });
        ui.add_space(5.0);
    }

    ui.add_space(10.0);
    ui.heading("WILDBOYS");
    ui.separator();
    if state.equipment.wildboys.is_empty() {
        ui.label(
            egui::RichText::new("(none)")
                .italics()
                .color(egui::Color32::GRAY),
        );
    } else {
        for wildboy in &state.equipment.wildboys {
            ui.label(&wildboy.name)
                .on_hover_text(describe_bonuses(&wildboy.bonuses));
        }
    }
}

fn draw_carried_column(
    ui: &mut egui::Ui,
    state: &GameState,
    delete_mode: bool,
    actions: &mut UiActions,
) {
    ui.heading("CARRIED");
    ui.separator();
    ui.add_space(5.0);

    for (title, kind, items) in [
        ("Weapons", ItemKind::Weapon, &state.inventory.weapons),
        ("Armor", ItemKind::Armor, &state.inventory.armor),
    ] {
        ui.label(egui::RichText::new(title).strong());
        if items.is_empty() {
            ui.label(
                egui::RichText::new("(empty)")
                    .italics()
                    .color(egui::Color32::GRAY),
            );
        }
        for (i, item) in items.iter().enumerate() {
            let hover = if delete_mode {
                "Click to DELETE"
            } else {
                "Click to equip"
            };
            if item_button(ui, item, delete_mode)
                .on_hover_text(hover)
                .clicked()
            {
                if delete_mode {
                    actions.discard = Some((kind, i));
                } else {
                    actions.equip = Some((kind, i));
                }
            }
        }
        ui.add_space(10.0);
    }
}

/// The level-up modal: pick one of the offered wildboys or walk away.
pub fn draw_wildboy_offer(
    ctx: &egui::Context,
    offers: &[WildboyModifier],
    stats: &StatBlock,
    actions: &mut UiActions,
) {
    egui::Window::new("LEVEL UP!")
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.label("Pick a wildboy (permanent stat boost):");
            ui.add_space(10.0);

            for (i, offer) in offers.iter().enumerate() {
                if ui
                    .button(&offer.name)
                    .on_hover_text(describe_bonuses(&offer.bonuses))
                    .clicked()
                {
                    actions.wildboy_choice = Some(Some(i));
                }
            }
            ui.add_space(5.0);
            if ui.button("Exit").clicked() {
                actions.wildboy_choice = Some(None);
            }

            ui.add_space(10.0);
            ui.separator();
            ui.label(egui::RichText::new("Player Stats").strong());
            for (kind, value) in stats.entries() {
                ui.label(format!("{}: {:.2}", kind.label(), value));
            }
        });
}

/// Full-screen game over message.
pub fn draw_game_over(ctx: &egui::Context, actions: &mut UiActions) {
    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Middle,
        egui::Id::new("game_over"),
    ));
    painter.text(
        egui::pos2(WINDOW_WIDTH / 2.0, WINDOW_HEIGHT / 2.0),
        egui::Align2::CENTER_CENTER,
        "Game Over! Press R to Restart",
        egui::FontId::proportional(32.0),
        egui::Color32::WHITE,
    );

    egui::Window::new("restart")
        .title_bar(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 60.0])
        .show(ctx, |ui| {
            if ui.button("Restart").clicked() {
                actions.restart = true;
            }
        });
}
