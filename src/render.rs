use std::io::{self, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{ExecutableCommand, QueueableCommand};
use unicode_width::UnicodeWidthStr;

use crate::components::{GhostStatus, Pos};
use crate::config::Config;
use crate::level::{Grid, Tile};
use crate::power::PowerPhase;

const GAME_OVER: &str = "GAME OVER";

/// Read-only view of one tick, handed to a [`Screen`].
#[derive(Debug, Clone)]
pub struct Frame<'a> {
    pub grid: &'a Grid,
    pub player: Pos,
    pub player_spawn: Pos,
    pub ghosts: Vec<(Pos, GhostStatus)>,
    pub score: u32,
    pub lives: u32,
    pub power: PowerPhase,
}

/// Output sink for the game loop.
pub trait Screen {
    fn draw_frame(&mut self, frame: &Frame<'_>) -> io::Result<()>;

    /// Marks the cell where the player just lost a life.
    fn draw_death(&mut self, at: Pos) -> io::Result<()>;

    /// Drawn over the last frame when the lives run out.
    fn draw_game_over(&mut self, frame: &Frame<'_>) -> io::Result<()>;
}

pub struct TerminalScreen<W: Write> {
    out: W,
    config: Config,
    height: usize,
}

impl<W: Write> TerminalScreen<W> {
    pub fn new(out: W, config: Config, grid: &Grid) -> Self {
        Self {
            out,
            config,
            height: grid.height(),
        }
    }

    /// Puts the terminal in raw mode so keys arrive unbuffered.
    pub fn enter(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        self.out.execute(Hide)?;
        self.out.execute(Clear(ClearType::All))?;
        Ok(())
    }

    /// Restores the terminal, leaving the last frame visible.
    pub fn leave(&mut self) -> io::Result<()> {
        self.out.queue(MoveTo(0, coord(self.height + 2)?))?;
        self.out.queue(Show)?;
        self.out.flush()?;
        terminal::disable_raw_mode()
    }

    fn cell_width(&self) -> usize {
        self.config.cell_width()
    }

    /// Pads narrow glyphs so every cell has the same width.
    fn padded(&self, glyph: &str) -> String {
        let width = UnicodeWidthStr::width(glyph);
        let mut text = glyph.to_string();
        for _ in width..self.cell_width() {
            text.push(' ');
        }
        text
    }

    fn move_to(&mut self, pos: Pos) -> io::Result<()> {
        let col = coord(pos.col * self.cell_width())?;
        self.out.queue(MoveTo(col, coord(pos.row)?))?;
        Ok(())
    }

    fn put(&mut self, pos: Pos, glyph: &str, color: Option<Color>) -> io::Result<()> {
        let text = self.padded(glyph);
        self.move_to(pos)?;
        if let Some(color) = color {
            self.out.queue(SetForegroundColor(color))?;
        }
        self.out.queue(Print(text))?;
        self.out.queue(ResetColor)?;
        Ok(())
    }

    fn lives_text(&self, lives: u32) -> String {
        if self.config.use_emoji {
            self.config.player.repeat(lives as usize)
        } else {
            lives.to_string()
        }
    }
}

impl<W: Write> Screen for TerminalScreen<W> {
    fn draw_frame(&mut self, frame: &Frame<'_>) -> io::Result<()> {
        self.out.queue(Clear(ClearType::All))?;
        for (row, tiles) in frame.grid.rows().enumerate() {
            self.out.queue(MoveTo(0, coord(row)?))?;
            for tile in tiles {
                let text = match tile {
                    Tile::Wall => {
                        let wall = self.padded(&self.config.wall);
                        self.out.queue(SetBackgroundColor(Color::Blue))?;
                        self.out.queue(Print(wall))?;
                        self.out.queue(ResetColor)?;
                        continue;
                    }
                    Tile::Dot => self.padded(&self.config.dot),
                    Tile::Pill => self.padded(&self.config.pill),
                    Tile::Empty => self.padded(&self.config.space),
                };
                self.out.queue(Print(text))?;
            }
        }

        let player = self.config.player.clone();
        self.put(frame.player, &player, Some(Color::Yellow))?;
        for &(pos, status) in &frame.ghosts {
            let glyph = match status {
                GhostStatus::Normal => self.config.ghost.clone(),
                GhostStatus::Empowered => self.config.ghost_blue.clone(),
            };
            let color = match status {
                GhostStatus::Normal => Color::Red,
                GhostStatus::Empowered => Color::Blue,
            };
            self.put(pos, &glyph, Some(color))?;
        }

        let mut hud = format!(
            "Score: {}\tLives: {}",
            frame.score,
            self.lives_text(frame.lives)
        );
        if let PowerPhase::Active { remaining } = frame.power {
            hud.push_str(&format!("\tPower: {}s", remaining.as_millis().div_ceil(1000)));
        }
        self.out.queue(MoveTo(0, coord(self.height + 1)?))?;
        self.out.queue(Print(hud))?;
        self.out.flush()
    }

    fn draw_death(&mut self, at: Pos) -> io::Result<()> {
        let death = self.config.death.clone();
        self.put(at, &death, None)?;
        self.out.queue(MoveTo(0, coord(self.height + 2)?))?;
        self.out.flush()
    }

    fn draw_game_over(&mut self, frame: &Frame<'_>) -> io::Result<()> {
        let death = self.config.death.clone();
        self.put(frame.player, &death, None)?;

        let cell = self.cell_width();
        let centre = frame.player_spawn.col * cell + cell / 2;
        let col = centre.saturating_sub(GAME_OVER.len() / 2);
        self.out
            .queue(MoveTo(coord(col)?, coord(frame.player_spawn.row)?))?;
        self.out.queue(SetForegroundColor(Color::White))?;
        self.out.queue(Print(GAME_OVER))?;
        self.out.queue(ResetColor)?;
        self.out.queue(MoveTo(0, coord(self.height + 2)?))?;
        self.out.flush()
    }
}

/// Terminal cursor coordinate, rejecting mazes too big to address.
fn coord(value: usize) -> io::Result<u16> {
    u16::try_from(value).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("screen coordinate {value} is out of terminal range"),
        )
    })
}
