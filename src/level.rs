use std::fs;
use std::path::Path;

use crate::components::Pos;
use crate::error::MazeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Empty,
    Dot,
    Pill,
}

impl Tile {
    fn from_symbol(symbol: char) -> Self {
        match symbol {
            '#' => Tile::Wall,
            '.' => Tile::Dot,
            'X' => Tile::Pill,
            _ => Tile::Empty,
        }
    }
}

/// Rectangular maze. Dimensions never change after load; the only mutation
/// is eating a dot or pill, which turns the cell into `Tile::Empty`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<Tile>>,
    width: usize,
}

impl Grid {
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn tile(&self, pos: Pos) -> Tile {
        self.rows[pos.row][pos.col]
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.row < self.height() && pos.col < self.width
    }

    /// Removes a dot or pill at `pos`, returning what was there.
    pub fn consume(&mut self, pos: Pos) -> Tile {
        let cell = &mut self.rows[pos.row][pos.col];
        let before = *cell;
        if matches!(before, Tile::Dot | Tile::Pill) {
            *cell = Tile::Empty;
        }
        before
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.rows.iter().map(Vec::as_slice)
    }

    pub fn count(&self, tile: Tile) -> usize {
        self.rows
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&cell| cell == tile)
            .count()
    }
}

/// Everything the maze text describes: the grid plus where sprites start.
#[derive(Debug, Clone)]
pub struct Level {
    pub grid: Grid,
    pub player_spawn: Pos,
    pub ghost_spawns: Vec<Pos>,
    pub dots: usize,
}

impl Level {
    pub fn load(path: &Path) -> Result<Self, MazeError> {
        let text = fs::read_to_string(path).map_err(|source| MazeError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let level = Self::parse(&text)?;
        log::info!(
            "loaded maze {}: {}x{}, {} ghosts, {} dots",
            path.display(),
            level.grid.height(),
            level.grid.width(),
            level.ghost_spawns.len(),
            level.dots
        );
        Ok(level)
    }

    pub fn parse(text: &str) -> Result<Self, MazeError> {
        let mut lines: Vec<&str> = text.lines().collect();
        while lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }
        let width = match lines.first() {
            Some(first) if !first.is_empty() => first.chars().count(),
            _ => return Err(MazeError::Empty),
        };

        let mut rows = Vec::with_capacity(lines.len());
        let mut player_spawn = None;
        let mut ghost_spawns = Vec::new();
        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(MazeError::Ragged {
                    row,
                    expected: width,
                    found,
                });
            }
            let mut tiles = Vec::with_capacity(width);
            for (col, symbol) in line.chars().enumerate() {
                match symbol {
                    'P' => {
                        if player_spawn.is_some() {
                            return Err(MazeError::DuplicatePlayer { row, col });
                        }
                        player_spawn = Some(Pos::new(row, col));
                    }
                    'G' => ghost_spawns.push(Pos::new(row, col)),
                    _ => {}
                }
                tiles.push(Tile::from_symbol(symbol));
            }
            rows.push(tiles);
        }

        let player_spawn = player_spawn.ok_or(MazeError::MissingPlayer)?;
        let grid = Grid { rows, width };
        let dots = grid.count(Tile::Dot);
        Ok(Self {
            grid,
            player_spawn,
            ghost_spawns,
            dots,
        })
    }
}
