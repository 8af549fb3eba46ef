use rand::seq::SliceRandom;
use rand::Rng;

use crate::components::{Dir, Pos};
use crate::level::{Grid, Tile};

/// One step from `pos` towards `dir`, wrapping at the edges.
///
/// Returns `pos` unchanged when the wrapped destination is a wall.
pub fn resolve(pos: Pos, dir: Dir, grid: &Grid) -> Pos {
    let (dr, dc) = dir.delta();
    let next = Pos {
        row: wrap(pos.row, dr, grid.height()),
        col: wrap(pos.col, dc, grid.width()),
    };
    if grid.tile(next) == Tile::Wall {
        pos
    } else {
        next
    }
}

fn wrap(index: usize, delta: isize, len: usize) -> usize {
    (index as isize + delta).rem_euclid(len as isize) as usize
}

/// Uniform draw over the four directions.
pub fn random_dir(rng: &mut impl Rng) -> Dir {
    *Dir::ALL.choose(rng).unwrap_or(&Dir::Up)
}
