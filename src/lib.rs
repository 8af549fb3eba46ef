//! Terminal pac-man: a tick-driven maze chase with a timed power pill.
//!
//! - `level`, `components`: the maze grid and sprites
//! - `movement`, `player`, `ghost`: per-tick rules
//! - `power`: the pill countdown shared with the ghosts
//! - `game`, `engine`: game state and the fixed-tick loop
//! - `input`, `render`, `config`: terminal collaborators

pub mod components;
pub mod config;
pub mod engine;
pub mod error;
pub mod game;
pub mod ghost;
pub mod input;
pub mod level;
pub mod movement;
pub mod player;
pub mod power;
pub mod render;

pub use config::Config;
pub use engine::{run, EngineSettings};
pub use game::{GameOver, GameState};
pub use level::Level;
