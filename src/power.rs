use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

use crate::ghost::StatusBoard;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerPhase {
    Idle,
    Active { remaining: Duration },
}

/// Countdown for the power pill effect. At most one countdown is live; a new
/// trigger replaces the running one and restarts the full duration.
#[derive(Debug)]
pub struct PowerTimer {
    board: Arc<StatusBoard>,
    duration: Duration,
    countdown: Option<JoinHandle<()>>,
}

impl PowerTimer {
    pub fn new(board: Arc<StatusBoard>, duration: Duration) -> Self {
        Self {
            board,
            duration,
            countdown: None,
        }
    }

    /// Empowers every ghost now and schedules the revert on a background task.
    ///
    /// Must be called from inside a tokio runtime. Returns immediately.
    pub fn trigger(&mut self) {
        let deadline = Instant::now() + self.duration;
        let epoch = self.board.empower(deadline);
        if let Some(previous) = self.countdown.take() {
            previous.abort();
            log::debug!("power pill restarted, epoch {epoch}");
        } else {
            log::debug!("power pill started, epoch {epoch}");
        }

        let board = Arc::clone(&self.board);
        self.countdown = Some(tokio::spawn(async move {
            time::sleep_until(deadline).await;
            if board.expire(epoch) {
                log::info!("power pill wore off");
            }
        }));
    }

    pub fn phase(&self) -> PowerPhase {
        match self.board.deadline() {
            Some(deadline) => PowerPhase::Active {
                remaining: deadline.saturating_duration_since(Instant::now()),
            },
            None => PowerPhase::Idle,
        }
    }
}
