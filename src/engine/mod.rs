//! The simulation core: state, per-frame resolution, and room progression.

pub mod game_state;
pub mod progression;
pub mod simulation;

pub use game_state::GameState;
