use std::io;
use std::time::Duration;

use rand::Rng;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::{self, MissedTickBehavior};

use crate::game::{GameOver, GameState};
use crate::input::InputEvent;
use crate::render::Screen;

pub const DEFAULT_TICK_MS: u64 = 600;
pub const DEFAULT_DEATH_PAUSE_MS: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    pub tick: Duration,
    /// How long the death glyph stays up after a lost life.
    pub death_pause: Duration,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(DEFAULT_TICK_MS),
            death_pause: Duration::from_millis(DEFAULT_DEATH_PAUSE_MS),
        }
    }
}

/// Runs ticks until the game is over.
///
/// Each tick takes at most one pending input event without waiting for one,
/// then moves the ghosts, settles collisions and draws a frame.
pub async fn run<S, R>(
    state: &mut GameState,
    input: &mut UnboundedReceiver<InputEvent>,
    screen: &mut S,
    rng: &mut R,
    settings: EngineSettings,
) -> io::Result<GameOver>
where
    S: Screen,
    R: Rng,
{
    let mut ticker = time::interval(settings.tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        match input.try_recv() {
            Ok(event) => state.apply_input(event),
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                log::warn!("input source closed");
                state.apply_input(InputEvent::Cancel);
            }
        }

        state.step_ghosts(rng);
        let report = state.resolve_collisions();
        if let Some(at) = report.death_at {
            screen.draw_death(at)?;
            time::sleep(settings.death_pause).await;
            ticker.reset();
        }

        let frame = state.frame();
        screen.draw_frame(&frame)?;

        if let Some(over) = state.outcome() {
            if over.lives_exhausted() {
                screen.draw_game_over(&frame)?;
            }
            log::info!("game over: {over:?}, score {}", state.score());
            return Ok(over);
        }
    }
}
