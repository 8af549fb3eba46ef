use crate::components::{Dir, Sprite};
use crate::level::{Grid, Tile};
use crate::movement::resolve;

pub const DOT_SCORE: u32 = 1;
pub const PILL_SCORE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Consumed {
    Nothing,
    Dot,
    Pill,
}

impl Consumed {
    pub fn score(self) -> u32 {
        match self {
            Consumed::Nothing => 0,
            Consumed::Dot => DOT_SCORE,
            Consumed::Pill => PILL_SCORE,
        }
    }
}

/// Moves the player one step and eats whatever is on the destination cell.
pub fn move_and_eat(player: &mut Sprite, dir: Dir, grid: &mut Grid) -> Consumed {
    player.pos = resolve(player.pos, dir, grid);
    match grid.consume(player.pos) {
        Tile::Dot => Consumed::Dot,
        Tile::Pill => Consumed::Pill,
        Tile::Wall | Tile::Empty => Consumed::Nothing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Pos;
    use crate::level::Level;

    #[test]
    fn eats_once_then_walks_on_empty() {
        let mut level = Level::parse("P.X").unwrap();
        let mut player = Sprite::new(level.player_spawn);

        assert_eq!(move_and_eat(&mut player, Dir::Right, &mut level.grid), Consumed::Dot);
        assert_eq!(player.pos, Pos::new(0, 1));
        assert_eq!(move_and_eat(&mut player, Dir::Right, &mut level.grid), Consumed::Pill);
        assert_eq!(move_and_eat(&mut player, Dir::Left, &mut level.grid), Consumed::Nothing);
        assert_eq!(level.grid.count(Tile::Dot), 0);
        assert_eq!(level.grid.count(Tile::Pill), 0);
    }

    #[test]
    fn blocked_move_eats_nothing() {
        let mut level = Level::parse("#P#\n#.#").unwrap();
        let mut player = Sprite::new(level.player_spawn);
        assert_eq!(move_and_eat(&mut player, Dir::Left, &mut level.grid), Consumed::Nothing);
        assert_eq!(player.pos, level.player_spawn);
    }
}
