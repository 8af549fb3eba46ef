use std::time::Duration;

use rand::Rng;

use crate::components::{Dir, GhostStatus, Pos, Sprite};
use crate::ghost::Ghosts;
use crate::input::InputEvent;
use crate::level::{Grid, Level};
use crate::player::{move_and_eat, Consumed};
use crate::power::PowerTimer;
use crate::render::Frame;

pub const STARTING_LIVES: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOver {
    /// Every dot was eaten.
    Cleared,
    /// A ghost took the last life.
    Caught,
    /// The player pressed a cancel key (or input failed).
    Quit,
}

impl GameOver {
    pub fn lives_exhausted(self) -> bool {
        matches!(self, GameOver::Caught | GameOver::Quit)
    }
}

/// What a collision pass did, so the loop can play the death pause.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionReport {
    pub captured: Vec<usize>,
    pub life_lost: bool,
    /// Cell to mark with the death glyph; unset when the last life went.
    pub death_at: Option<Pos>,
}

/// Everything a running game owns. Only the ghost statuses are shared (with
/// the power timer task); the rest is touched by the loop alone.
#[derive(Debug)]
pub struct GameState {
    grid: Grid,
    player: Sprite,
    ghosts: Ghosts,
    power: PowerTimer,
    score: u32,
    lives: u32,
    dots_left: usize,
    quit: bool,
}

impl GameState {
    pub fn new(level: Level, pill_duration: Duration) -> Self {
        let ghosts = Ghosts::new(&level.ghost_spawns);
        let power = PowerTimer::new(ghosts.board().clone(), pill_duration);
        Self {
            grid: level.grid,
            player: Sprite::new(level.player_spawn),
            ghosts,
            power,
            score: 0,
            lives: STARTING_LIVES,
            dots_left: level.dots,
            quit: false,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn player(&self) -> &Sprite {
        &self.player
    }

    pub fn ghosts(&self) -> &Ghosts {
        &self.ghosts
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn dots_left(&self) -> usize {
        self.dots_left
    }

    pub fn apply_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Move(dir) => {
                self.apply_player_move(dir);
            }
            InputEvent::Cancel => {
                log::info!("game cancelled");
                self.quit = true;
                self.lives = 0;
            }
        }
    }

    /// Moves the player and applies whatever it ate. A pill empowers the
    /// ghosts immediately; the countdown runs on its own task.
    pub fn apply_player_move(&mut self, dir: Dir) -> Consumed {
        let consumed = move_and_eat(&mut self.player, dir, &mut self.grid);
        self.score += consumed.score();
        match consumed {
            Consumed::Dot => self.dots_left = self.dots_left.saturating_sub(1),
            Consumed::Pill => {
                log::info!("power pill eaten at {:?}", self.player.pos);
                self.power.trigger();
            }
            Consumed::Nothing => {}
        }
        consumed
    }

    pub fn step_ghosts(&mut self, rng: &mut impl Rng) {
        self.ghosts.step_all(&self.grid, rng);
    }

    /// Settles every ghost sharing the player's cell.
    ///
    /// Empowered ghosts are all captured. At most one life is lost per call,
    /// to the first normal ghost in roster order.
    pub fn resolve_collisions(&mut self) -> CollisionReport {
        let at = self.player.pos;
        let statuses = self.ghosts.board().snapshot();
        let mut report = CollisionReport::default();
        let mut caught_by = None;

        for (idx, (sprite, status)) in self.ghosts.sprites().iter().zip(statuses).enumerate() {
            if sprite.pos != at {
                continue;
            }
            match status {
                GhostStatus::Empowered => report.captured.push(idx),
                GhostStatus::Normal => {
                    caught_by.get_or_insert(idx);
                }
            }
        }

        for &idx in &report.captured {
            log::info!("ghost {idx} captured at {at:?}");
            self.ghosts.capture(idx);
        }

        if let Some(idx) = caught_by {
            report.life_lost = true;
            self.lives = self.lives.saturating_sub(1);
            log::info!("caught by ghost {idx} at {at:?}, {} lives left", self.lives);
            if self.lives > 0 {
                self.ghosts.board().set(idx, GhostStatus::Normal);
                self.player.respawn();
                report.death_at = Some(at);
            }
        }
        report
    }

    pub fn outcome(&self) -> Option<GameOver> {
        if self.lives == 0 {
            Some(if self.quit {
                GameOver::Quit
            } else {
                GameOver::Caught
            })
        } else if self.dots_left == 0 {
            Some(GameOver::Cleared)
        } else {
            None
        }
    }

    pub fn frame(&self) -> Frame<'_> {
        Frame {
            grid: &self.grid,
            player: self.player.pos,
            player_spawn: self.player.spawn(),
            ghosts: self.ghosts.snapshot(),
            score: self.score,
            lives: self.lives,
            power: self.power.phase(),
        }
    }

    #[cfg(test)]
    pub(crate) fn place_ghost(&mut self, idx: usize, pos: Pos) {
        self.ghosts.sprites_mut()[idx].pos = pos;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Tile;
    use crate::power::PowerPhase;
    use tokio::time;

    const SCENARIO: &str = "P.#\n...\n#.G";

    fn state(maze: &str) -> GameState {
        GameState::new(Level::parse(maze).unwrap(), Duration::from_secs(2))
    }

    fn statuses(state: &GameState) -> Vec<GhostStatus> {
        state.ghosts().board().snapshot()
    }

    #[test]
    fn eating_a_dot_scores_and_clears_the_cell() {
        let mut state = state(SCENARIO);
        let dots = state.dots_left();
        assert_eq!(state.apply_player_move(Dir::Right), Consumed::Dot);
        assert_eq!(state.score(), 1);
        assert_eq!(state.dots_left(), dots - 1);
        assert_eq!(state.grid().tile(Pos::new(0, 1)), Tile::Empty);
    }

    #[test]
    fn blocked_move_changes_nothing() {
        let mut state = state(SCENARIO);
        state.apply_player_move(Dir::Right);
        assert_eq!(state.apply_player_move(Dir::Right), Consumed::Nothing);
        assert_eq!(state.player().pos, Pos::new(0, 1));
        assert_eq!(state.score(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn pill_empowers_ghosts_until_duration_elapses() {
        let mut state = state("PX.\n...\n..G");
        assert_eq!(state.apply_player_move(Dir::Right), Consumed::Pill);
        assert_eq!(state.score(), 10);
        assert_eq!(statuses(&state), vec![GhostStatus::Empowered]);
        assert!(matches!(state.frame().power, PowerPhase::Active { .. }));

        time::sleep(Duration::from_millis(1900)).await;
        assert_eq!(statuses(&state), vec![GhostStatus::Empowered]);
        time::sleep(Duration::from_millis(200)).await;
        assert_eq!(statuses(&state), vec![GhostStatus::Normal]);
        assert_eq!(state.frame().power, PowerPhase::Idle);

        // Once the pill wears off, touching a ghost costs a life again.
        state.place_ghost(0, Pos::new(0, 1));
        let report = state.resolve_collisions();
        assert!(report.life_lost);
        assert!(report.captured.is_empty());
        assert_eq!(state.lives(), STARTING_LIVES - 1);
        assert_eq!(state.ghosts().sprites()[0].pos, Pos::new(0, 1));
    }

    #[test]
    fn no_overlap_is_a_no_op() {
        let mut state = state(SCENARIO);
        let report = state.resolve_collisions();
        assert_eq!(report, CollisionReport::default());
        assert_eq!(state.lives(), STARTING_LIVES);
        assert_eq!(state.score(), 0);
        assert_eq!(state.player().pos, Pos::new(0, 0));
        assert_eq!(state.ghosts().sprites()[0].pos, Pos::new(2, 2));
    }

    #[test]
    fn normal_ghost_costs_a_life_and_respawns_player() {
        let mut state = state(SCENARIO);
        state.apply_player_move(Dir::Down);
        state.place_ghost(0, Pos::new(1, 0));

        let report = state.resolve_collisions();
        assert!(report.life_lost);
        assert_eq!(report.death_at, Some(Pos::new(1, 0)));
        assert_eq!(state.lives(), STARTING_LIVES - 1);
        assert_eq!(state.player().pos, Pos::new(0, 0));
        assert_eq!(state.outcome(), None);
    }

    #[test]
    fn last_life_skips_respawn() {
        let mut state = state(SCENARIO);
        state.lives = 1;
        state.apply_player_move(Dir::Down);
        state.place_ghost(0, Pos::new(1, 0));

        let report = state.resolve_collisions();
        assert!(report.life_lost);
        assert_eq!(report.death_at, None);
        assert_eq!(state.lives(), 0);
        assert_eq!(state.player().pos, Pos::new(1, 0));
        assert_eq!(state.outcome(), Some(GameOver::Caught));
    }

    #[tokio::test(start_paused = true)]
    async fn empowered_ghost_is_captured() {
        let mut state = state("PX.\n...\n..G");
        state.apply_player_move(Dir::Right);
        state.place_ghost(0, Pos::new(0, 1));

        let report = state.resolve_collisions();
        assert_eq!(report.captured, vec![0]);
        assert!(!report.life_lost);
        assert_eq!(state.lives(), STARTING_LIVES);
        assert_eq!(state.player().pos, Pos::new(0, 1));
        assert_eq!(state.ghosts().sprites()[0].pos, Pos::new(2, 2));
        assert_eq!(statuses(&state), vec![GhostStatus::Normal]);
    }

    #[tokio::test(start_paused = true)]
    async fn stacked_ghosts_cost_one_life_and_all_empowered_are_captured() {
        let mut state = state("P.X\n...\nGGG");
        state.apply_player_move(Dir::Right);
        state.apply_player_move(Dir::Right);
        // Ghost 1 was captured earlier and is back to normal.
        state.ghosts.board().set(1, GhostStatus::Normal);
        for idx in 0..3 {
            state.place_ghost(idx, Pos::new(1, 1));
        }
        state.player.pos = Pos::new(1, 1);

        let report = state.resolve_collisions();
        assert_eq!(report.captured, vec![0, 2]);
        assert!(report.life_lost);
        assert_eq!(state.lives(), STARTING_LIVES - 1);
        assert_eq!(state.ghosts().sprites()[0].pos, Pos::new(2, 0));
        assert_eq!(state.ghosts().sprites()[1].pos, Pos::new(1, 1));
        assert_eq!(state.ghosts().sprites()[2].pos, Pos::new(2, 2));
    }

    #[test]
    fn two_normal_ghosts_cost_a_single_life() {
        let mut state = state("P..\n...\nGG.");
        state.place_ghost(0, Pos::new(0, 0));
        state.place_ghost(1, Pos::new(0, 0));
        state.resolve_collisions();
        assert_eq!(state.lives(), STARTING_LIVES - 1);
    }

    #[test]
    fn cancel_ends_the_game() {
        let mut state = state(SCENARIO);
        state.apply_input(InputEvent::Cancel);
        assert_eq!(state.lives(), 0);
        assert_eq!(state.outcome(), Some(GameOver::Quit));
        assert!(GameOver::Quit.lives_exhausted());
    }

    #[test]
    fn eating_the_last_dot_clears_the_maze() {
        let mut state = state("P.#\n###");
        state.apply_input(InputEvent::Move(Dir::Right));
        assert_eq!(state.dots_left(), 0);
        assert_eq!(state.outcome(), Some(GameOver::Cleared));
    }
}
