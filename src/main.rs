#![allow(dead_code)]

mod app;
mod constants;
mod enemy;
mod engine;
mod events;
mod geometry;
mod input;
mod inventory;
mod items;
mod room;
mod stats;
mod ui;

use std::sync::Arc;
use std::time::Instant;

use glam::Vec2;
use glutin::prelude::*;
use glutin::surface::WindowSurface;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use egui_glow::EguiGlow;

use constants::*;
use engine::{progression, simulation, GameState};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let event_loop = EventLoop::new()?;
    let mut app = App::new();
    event_loop.run_app(&mut app)?;
    Ok(())
}

struct App {
    state: Option<AppState>,
}

struct AppState {
    // Window and GL
    window: Window,
    gl_surface: glutin::surface::Surface<WindowSurface>,
    gl_context: glutin::context::PossiblyCurrentContext,
    gl: Arc<glow::Context>,
    egui_glow: EguiGlow,

    // Game state
    game: GameState,
    events: events::EventQueue,
    log: ui::MessageLog,

    // UI state
    show_inventory: bool,

    // Input state
    input: input::InputState,

    // Timing
    last_frame_time: Instant,
}

impl App {
    fn new() -> Self {
        Self { state: None }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        let app::WindowContext {
            window,
            gl_surface,
            gl_context,
            gl,
            egui_glow,
        } = app::create_window(event_loop);

        let mut rng = rand::thread_rng();
        let mut events = events::EventQueue::new();
        let game = GameState::new(&mut rng, &mut events);

        let mut log = ui::MessageLog::new();
        for event in events.drain() {
            log.record(&event);
        }

        self.state = Some(AppState {
            window,
            gl_surface,
            gl_context,
            gl,
            egui_glow,
            game,
            events,
            log,
            show_inventory: false,
            input: input::InputState::new(),
            last_frame_time: Instant::now(),
        });
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let state = match &mut self.state {
            Some(s) => s,
            None => return,
        };

        // Let egui handle the event first
        let egui_consumed = state.egui_glow.on_window_event(&state.window, &event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                app::resize_surface(&state.gl_surface, &state.gl_context, size.width, size.height);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if !egui_consumed.consumed {
                    if let PhysicalKey::Code(key) = event.physical_key {
                        match event.state {
                            ElementState::Pressed => {
                                if key == KeyCode::Escape {
                                    event_loop.exit();
                                }
                                state.input.key_down(key);
                            }
                            ElementState::Released => {
                                state.input.key_up(key);
                            }
                        }
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let logical = position.to_logical::<f32>(state.window.scale_factor());
                state.input.mouse_pos = Vec2::new(logical.x, logical.y);
            }
            WindowEvent::MouseInput {
                state: btn_state,
                button,
                ..
            } => {
                if button == MouseButton::Left {
                    if btn_state == ElementState::Pressed && egui_consumed.consumed {
                        // Click landed on a UI window, not the game field
                    } else {
                        state.input.mouse_down = btn_state == ElementState::Pressed;
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                state.update_and_render();
                state.window.request_redraw();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            state.window.request_redraw();
        }
    }
}

impl AppState {
    fn update_and_render(&mut self) {
        puffin::GlobalProfiler::lock().new_frame();

        let current_time = Instant::now();
        let raw_dt = (current_time - self.last_frame_time).as_secs_f64();
        self.last_frame_time = current_time;
        let dt = raw_dt.min(MAX_FRAME_DT);

        // Shell-level edge keys must be taken before the frame snapshot
        // clears the pressed set
        if self.input.take_pressed(KeyCode::KeyF) {
            self.show_inventory = !self.show_inventory;
        }
        let restart_pressed = self.input.take_pressed(KeyCode::KeyR);
        let frame = self.input.frame_input();

        if restart_pressed && self.game.game_over {
            self.restart();
        }

        // The inventory screen pauses the world
        if !self.show_inventory {
            simulation::advance(&mut self.game, &frame, dt, &mut self.events);
        }
        for event in self.events.drain() {
            self.log.record(&event);
        }

        let actions = self.run_ui();
        self.process_ui_actions(actions);
        for event in self.events.drain() {
            self.log.record(&event);
        }

        unsafe {
            use glow::HasContext;
            self.gl.clear_color(0.1, 0.1, 0.1, 1.0);
            self.gl.clear(glow::COLOR_BUFFER_BIT);
        }

        self.egui_glow.paint(&self.window);
        self.gl_surface.swap_buffers(&self.gl_context).unwrap();
    }

    fn run_ui(&mut self) -> ui::UiActions {
        let mut actions = ui::UiActions::default();

        let derived = self.game.derived_stats();
        let game = &self.game;
        let log = &self.log;
        let show_inventory = self.show_inventory;

        self.egui_glow.run(&self.window, |ctx| {
            ui::draw_world(ctx, game);
            ui::draw_hud(ctx, game, &derived, log);

            if show_inventory {
                ui::draw_inventory_window(ctx, game, &mut actions);
            }

            if let Some(offers) = &game.pending_wildboys {
                ui::draw_wildboy_offer(ctx, offers, &derived, &mut actions);
            }

            if game.game_over {
                ui::draw_game_over(ctx, &mut actions);
            }
        });

        actions
    }

    fn process_ui_actions(&mut self, actions: ui::UiActions) {
        if let Some((kind, index)) = actions.equip {
            inventory::equip(&mut self.game.inventory, &mut self.game.equipment, kind, index);
        }
        if let Some(kind) = actions.unequip {
            inventory::unequip(&mut self.game.inventory, &mut self.game.equipment, kind);
        }
        if let Some((kind, index)) = actions.discard {
            self.game.inventory.discard(kind, index);
        }
        if let Some(choice) = actions.wildboy_choice {
            progression::choose_wildboy(&mut self.game, choice, &mut self.events);
        }
        if actions.restart {
            self.restart();
        }
    }

    fn restart(&mut self) {
        let mut rng = rand::thread_rng();
        progression::reset(&mut self.game, &mut rng, &mut self.events);
        self.log.clear();
        self.show_inventory = false;
    }
}
