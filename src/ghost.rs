use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use rand::Rng;
use tokio::time::Instant;

use crate::components::{GhostStatus, Pos, Sprite};
use crate::level::Grid;
use crate::movement::{random_dir, resolve};

/// Ghost statuses, shared between the game loop, the renderer and the power
/// timer task.
///
/// Every write takes the exclusive lock once and never nests another lock,
/// so readers always observe a whole collection.
#[derive(Debug)]
pub struct StatusBoard {
    inner: RwLock<Board>,
}

#[derive(Debug)]
struct Board {
    statuses: Vec<GhostStatus>,
    // Bumped by every empowerment; an expiry only applies to its own epoch.
    epoch: u64,
    deadline: Option<Instant>,
}

impl StatusBoard {
    pub fn new(count: usize) -> Self {
        Self {
            inner: RwLock::new(Board {
                statuses: vec![GhostStatus::Normal; count],
                epoch: 0,
                deadline: None,
            }),
        }
    }

    pub fn status(&self, idx: usize) -> GhostStatus {
        self.read().statuses[idx]
    }

    pub fn snapshot(&self) -> Vec<GhostStatus> {
        self.read().statuses.clone()
    }

    pub fn set(&self, idx: usize, status: GhostStatus) {
        self.write().statuses[idx] = status;
    }

    /// When the running empowerment ends, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.read().deadline
    }

    /// Flips every ghost to `Empowered` and opens a new epoch that ends at `until`.
    pub(crate) fn empower(&self, until: Instant) -> u64 {
        let mut board = self.write();
        board.statuses.fill(GhostStatus::Empowered);
        board.epoch += 1;
        board.deadline = Some(until);
        board.epoch
    }

    /// Reverts every ghost to `Normal` if `epoch` has not been superseded.
    pub(crate) fn expire(&self, epoch: u64) -> bool {
        let mut board = self.write();
        if board.epoch != epoch {
            return false;
        }
        board.statuses.fill(GhostStatus::Normal);
        board.deadline = None;
        true
    }

    fn read(&self) -> RwLockReadGuard<'_, Board> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Board> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Ghost positions (owned by the game loop) plus their shared statuses.
#[derive(Debug)]
pub struct Ghosts {
    sprites: Vec<Sprite>,
    board: Arc<StatusBoard>,
}

impl Ghosts {
    pub fn new(spawns: &[Pos]) -> Self {
        Self {
            sprites: spawns.iter().copied().map(Sprite::new).collect(),
            board: Arc::new(StatusBoard::new(spawns.len())),
        }
    }

    pub fn board(&self) -> &Arc<StatusBoard> {
        &self.board
    }

    pub fn sprites(&self) -> &[Sprite] {
        &self.sprites
    }

    pub fn sprites_mut(&mut self) -> &mut [Sprite] {
        &mut self.sprites
    }

    /// Each ghost takes one step in an independently drawn random direction.
    pub fn step_all(&mut self, grid: &Grid, rng: &mut impl Rng) {
        for ghost in &mut self.sprites {
            ghost.pos = resolve(ghost.pos, random_dir(rng), grid);
        }
    }

    /// Positions paired with statuses, read under one shared lock.
    pub fn snapshot(&self) -> Vec<(Pos, GhostStatus)> {
        let statuses = self.board.snapshot();
        self.sprites
            .iter()
            .zip(statuses)
            .map(|(sprite, status)| (sprite.pos, status))
            .collect()
    }

    /// Sends a captured ghost home.
    pub fn capture(&mut self, idx: usize) {
        self.board.set(idx, GhostStatus::Normal);
        self.sprites[idx].respawn();
    }
}
