/// A cell coordinate, row first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    pub const ALL: [Dir; 4] = [Dir::Up, Dir::Down, Dir::Left, Dir::Right];

    /// (row, col) delta of one step.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Dir::Up => (-1, 0),
            Dir::Down => (1, 0),
            Dir::Left => (0, -1),
            Dir::Right => (0, 1),
        }
    }
}

/// A position anchored to the spawn point it was loaded at.
///
/// The spawn is private so it can only be set once, at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sprite {
    pub pos: Pos,
    spawn: Pos,
}

impl Sprite {
    pub fn new(spawn: Pos) -> Self {
        Self { pos: spawn, spawn }
    }

    pub fn spawn(&self) -> Pos {
        self.spawn
    }

    pub fn respawn(&mut self) {
        self.pos = self.spawn;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GhostStatus {
    #[default]
    Normal,
    /// Frightened: touching the player sends the ghost home instead of costing a life.
    Empowered,
}
