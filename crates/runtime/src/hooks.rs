//! Standard adventure-map rules plugged into the turn loop.

use game_core::{
    ActionReport, DayReport, GameConfig, HeroId, Position, TileAction, TurnResult, World,
    apply_tile_action,
};
use tracing::info;

use crate::api::{Result, WorldHooks};

/// Rules of the standard scenario: lost-town countdown, last-kingdom-standing
/// victory, and the stock tile actions.
#[derive(Clone, Debug, Default)]
pub struct StandardWorldHooks {
    config: GameConfig,
}

impl StandardWorldHooks {
    pub fn new(config: GameConfig) -> Self {
        Self { config }
    }
}

impl WorldHooks for StandardWorldHooks {
    fn begin_new_day(&mut self, world: &mut World) -> DayReport {
        let report = world.advance_day(&self.config);
        for color in &report.dismissed {
            info!(
                target: "runtime::hooks",
                day = report.day,
                %color,
                "kingdom held no castle for too long; its heroes left"
            );
        }
        report
    }

    /// Defeat once no human kingdom is live. Victory once a single live human
    /// kingdom has no enemy left: every other live kingdom, human or not, is
    /// its ally. Rival human kingdoms keep a hot-seat game going.
    fn check_game_over(&self, world: &World) -> Option<TurnResult> {
        let live: Vec<_> = world.kingdoms().filter(|kingdom| kingdom.is_live()).collect();
        let humans: Vec<_> = live.iter().filter(|kingdom| kingdom.is_human()).collect();
        if humans.is_empty() {
            return Some(TurnResult::Defeat);
        }
        let unopposed = humans.iter().any(|human| {
            live.iter()
                .all(|other| other.color == human.color || human.is_friend(other.color))
        });
        unopposed.then_some(TurnResult::Victory)
    }

    fn hero_action(
        &mut self,
        world: &mut World,
        hero: HeroId,
        tile: Position,
        _action: &TileAction,
    ) -> Result<ActionReport> {
        Ok(apply_tile_action(world, hero, tile)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{Color, Colors, Control, Terrain, TileMap};

    fn world() -> World {
        let mut world = World::new(TileMap::new(8, 8, Terrain::Grass));
        world.add_kingdom(Color::Blue, Control::Human).unwrap();
        world.add_kingdom(Color::Red, Control::Ai).unwrap();
        world
            .spawn_hero(Color::Blue, "Alaric", Position::new(1, 1))
            .unwrap();
        world
            .build_castle(Some(Color::Red), "Redmoor", Position::new(6, 6))
            .unwrap();
        world
    }

    #[test]
    fn game_goes_on_while_enemies_stand() {
        let hooks = StandardWorldHooks::default();
        assert_eq!(hooks.check_game_over(&world()), None);
    }

    #[test]
    fn allies_do_not_block_victory() {
        let hooks = StandardWorldHooks::default();
        let mut world = world();
        world.form_alliance(Colors::BLUE | Colors::RED);
        assert_eq!(hooks.check_game_over(&world), Some(TurnResult::Victory));
    }

    #[test]
    fn rival_humans_keep_playing() {
        let hooks = StandardWorldHooks::default();
        let mut world = world();
        world.add_kingdom(Color::Green, Control::Human).unwrap();
        world
            .spawn_hero(Color::Green, "Vesna", Position::new(4, 4))
            .unwrap();
        let red = world.castles_of(Color::Red).next().unwrap().id;
        world.transfer_castle(red, None).unwrap();
        assert!(!world.is_live(Color::Red));

        assert_eq!(hooks.check_game_over(&world), None);

        world.form_alliance(Colors::BLUE | Colors::GREEN);
        assert_eq!(hooks.check_game_over(&world), Some(TurnResult::Victory));
    }

    #[test]
    fn last_human_standing_wins_a_hot_seat_game() {
        let hooks = StandardWorldHooks::default();
        let mut world = World::new(TileMap::new(8, 8, Terrain::Grass));
        world.add_kingdom(Color::Blue, Control::Human).unwrap();
        world.add_kingdom(Color::Red, Control::Human).unwrap();
        world
            .spawn_hero(Color::Blue, "Alaric", Position::new(1, 1))
            .unwrap();
        let korr = world
            .spawn_hero(Color::Red, "Korr", Position::new(6, 6))
            .unwrap();
        assert_eq!(hooks.check_game_over(&world), None);

        world.dismiss_hero(korr).unwrap();

        assert_eq!(hooks.check_game_over(&world), Some(TurnResult::Victory));
    }

    #[test]
    fn losing_every_human_asset_is_defeat() {
        let hooks = StandardWorldHooks::default();
        let mut world = world();
        let hero = world.heroes_of(Color::Blue).next().unwrap().id;
        world.dismiss_hero(hero).unwrap();
        assert_eq!(hooks.check_game_over(&world), Some(TurnResult::Defeat));
    }

    #[test]
    fn new_day_restores_movement() {
        let mut hooks = StandardWorldHooks::default();
        let mut world = world();
        let hero = world.heroes_of(Color::Blue).next().unwrap().id;
        world.hero_mut(hero).unwrap().move_points = 0;

        let report = hooks.begin_new_day(&mut world);

        assert_eq!(report.day, 1);
        assert!(world.hero(hero).unwrap().has_full_move_points());
    }
}
