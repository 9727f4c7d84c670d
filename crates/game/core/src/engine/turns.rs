//! Order in which kingdoms act within a day.

use crate::state::{Color, Control, World};

/// Kingdoms in playing order: humans by ascending color, then computers by
/// ascending color.
///
/// A game can only be saved during a human turn, so resuming has to reach the
/// saved human before any computer kingdom gets to act again.
pub fn turn_order(world: &World) -> Vec<(Color, Control)> {
    let mut order: Vec<_> = world
        .kingdoms()
        .map(|kingdom| (kingdom.color, kingdom.control))
        .collect();
    order.sort_by_key(|(color, control)| (*control != Control::Human, *color));
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Terrain, TileMap};

    #[test]
    fn humans_precede_computers() {
        let mut world = World::new(TileMap::new(4, 4, Terrain::Grass));
        world.add_kingdom(Color::Purple, Control::Human).unwrap();
        world.add_kingdom(Color::Blue, Control::Ai).unwrap();
        world.add_kingdom(Color::Red, Control::Human).unwrap();
        world.add_kingdom(Color::Green, Control::Ai).unwrap();

        let colors: Vec<_> = turn_order(&world).into_iter().map(|(color, _)| color).collect();

        assert_eq!(
            colors,
            vec![Color::Red, Color::Purple, Color::Blue, Color::Green]
        );
    }
}
