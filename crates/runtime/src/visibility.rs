//! Fog-of-war bookkeeping for the colors that render a map.
//!
//! The world records which colors revealed each tile; this scheduler turns
//! that into per-color [`VisibilityMask`]s and decides when to recompute
//! them. Reveals produced while a hero walks are queued and flushed before
//! the next frame, so a frame never shows fog the hero already cleared.

use game_core::{Color, Region, VisibilityMask, VisibilityPolicy, World};
use tracing::debug;

use crate::events::{AdventureEvent, EventBus, RefreshScope};

pub struct VisibilityScheduler {
    policy: VisibilityPolicy,
    masks: Vec<VisibilityMask>,
    /// At most one merged window per color.
    pending: Vec<(Color, Region)>,
    events: EventBus,
}

impl VisibilityScheduler {
    pub fn new(policy: VisibilityPolicy, events: EventBus) -> Self {
        Self {
            policy,
            masks: Vec::new(),
            pending: Vec::new(),
            events,
        }
    }

    pub fn policy(&self) -> VisibilityPolicy {
        self.policy
    }

    pub fn mask(&self, color: Color) -> Option<&VisibilityMask> {
        self.masks.iter().find(|mask| mask.color() == color)
    }

    /// Scouts around every hero and castle of `color`, then recomputes the
    /// whole mask. Running it twice in a row changes nothing.
    pub fn full_refresh(&mut self, world: &mut World, color: Color) {
        world.scout_kingdom(color);
        self.recompute_all(world, color);
        self.pending.retain(|(owner, _)| *owner != color);
        debug!(target: "runtime::visibility", %color, "full refresh");
        self.events.publish(AdventureEvent::VisibilityRefreshed {
            color,
            scope: RefreshScope::Full,
        });
    }

    /// Recomputes only the tiles in `region`.
    pub fn incremental_refresh(&mut self, world: &World, color: Color, region: Region) {
        let viewers = self.policy.viewers(world, color);
        self.mask_mut(world, color).recompute(world, region, viewers);
        self.events.publish(AdventureEvent::VisibilityRefreshed {
            color,
            scope: RefreshScope::Region(region),
        });
    }

    /// Reveals the entire map for `color`.
    pub fn clear_all(&mut self, world: &mut World, color: Color) {
        world.reveal_all(color);
        self.recompute_all(world, color);
        self.pending.retain(|(owner, _)| *owner != color);
        debug!(target: "runtime::visibility", %color, "map revealed");
        self.events.publish(AdventureEvent::VisibilityRefreshed {
            color,
            scope: RefreshScope::ClearAll,
        });
    }

    /// Defers a refresh of `region` to the next [`flush`](Self::flush).
    pub fn queue(&mut self, color: Color, region: Region) {
        match self.pending.iter_mut().find(|(owner, _)| *owner == color) {
            Some((_, window)) => *window = window.union(region),
            None => self.pending.push((color, region)),
        }
    }

    pub fn is_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Runs every queued refresh.
    pub fn flush(&mut self, world: &World) {
        for (color, region) in std::mem::take(&mut self.pending) {
            self.incremental_refresh(world, color, region);
        }
    }

    fn recompute_all(&mut self, world: &World, color: Color) {
        let viewers = self.policy.viewers(world, color);
        self.mask_mut(world, color).recompute_all(world, viewers);
    }

    fn mask_mut(&mut self, world: &World, color: Color) -> &mut VisibilityMask {
        let (width, height) = (world.map.width(), world.map.height());
        let index = match self.masks.iter().position(|mask| mask.color() == color) {
            Some(index) => index,
            None => {
                self.masks.push(VisibilityMask::new(color, width, height));
                self.masks.len() - 1
            }
        };
        let mask = &mut self.masks[index];
        if (mask.width(), mask.height()) != (width, height) {
            *mask = VisibilityMask::new(color, width, height);
        }
        mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{Colors, Control, Position, Terrain, TileMap};

    fn world() -> World {
        let mut world = World::new(TileMap::new(16, 16, Terrain::Grass));
        world.add_kingdom(Color::Blue, Control::Human).unwrap();
        world.add_kingdom(Color::Red, Control::Human).unwrap();
        world
            .spawn_hero(Color::Blue, "Mira", Position::new(4, 4))
            .unwrap();
        world
    }

    fn scheduler() -> VisibilityScheduler {
        VisibilityScheduler::new(VisibilityPolicy::Coalition, EventBus::new())
    }

    #[test]
    fn full_refresh_is_idempotent() {
        let mut world = world();
        let mut visibility = scheduler();

        visibility.full_refresh(&mut world, Color::Blue);
        let first = visibility.mask(Color::Blue).unwrap().clone();
        visibility.full_refresh(&mut world, Color::Blue);

        assert_eq!(visibility.mask(Color::Blue).unwrap(), &first);
        assert!(!first.is_fogged(Position::new(4, 4)));
        assert!(first.is_fogged(Position::new(12, 12)));
    }

    #[test]
    fn queued_reveals_show_up_after_flush() {
        let mut world = world();
        let mut visibility = scheduler();
        visibility.full_refresh(&mut world, Color::Blue);

        let window = world
            .reveal(Position::new(10, 10), 1, Color::Blue)
            .unwrap()
            .expand(1);
        visibility.queue(Color::Blue, window);
        assert!(visibility.is_pending());
        assert!(visibility.mask(Color::Blue).unwrap().is_fogged(Position::new(10, 10)));

        visibility.flush(&world);

        assert!(!visibility.is_pending());
        assert!(!visibility.mask(Color::Blue).unwrap().is_fogged(Position::new(10, 10)));
    }

    #[test]
    fn queued_windows_merge_per_color() {
        let mut visibility = scheduler();
        visibility.queue(Color::Blue, Region::around(Position::new(2, 2), 1));
        visibility.queue(Color::Blue, Region::around(Position::new(6, 6), 1));
        visibility.queue(Color::Red, Region::around(Position::new(6, 6), 1));

        assert_eq!(visibility.pending.len(), 2);
        assert_eq!(
            visibility.pending[0].1,
            Region::new(Position::new(1, 1), Position::new(7, 7))
        );
    }

    #[test]
    fn policies_differ_only_for_computer_colors() {
        let mut world = World::new(TileMap::new(16, 16, Terrain::Grass));
        world.add_kingdom(Color::Blue, Control::Ai).unwrap();
        world.add_kingdom(Color::Red, Control::Human).unwrap();
        world.add_kingdom(Color::Green, Control::Ai).unwrap();
        world.form_alliance(Colors::BLUE | Colors::RED);
        world
            .spawn_hero(Color::Blue, "Korr", Position::new(12, 12))
            .unwrap();
        world
            .spawn_hero(Color::Red, "Mira", Position::new(3, 3))
            .unwrap();
        world
            .spawn_hero(Color::Green, "Tamsin", Position::new(3, 12))
            .unwrap();

        let mut coalition = scheduler();
        let mut auto = VisibilityScheduler::new(VisibilityPolicy::AutoControl, EventBus::new());
        for color in [Color::Blue, Color::Red, Color::Green] {
            coalition.full_refresh(&mut world, color);
            auto.full_refresh(&mut world, color);
        }

        // The human sees its ally's discoveries either way.
        let red = coalition.mask(Color::Red).unwrap();
        assert!(!red.is_fogged(Position::new(12, 12)));
        assert_eq!(red, auto.mask(Color::Red).unwrap());

        // A computer color keeps its own coalition, or shows the humans' map.
        let green = coalition.mask(Color::Green).unwrap();
        assert!(!green.is_fogged(Position::new(3, 12)));
        assert!(green.is_fogged(Position::new(3, 3)));
        let green = auto.mask(Color::Green).unwrap();
        assert!(green.is_fogged(Position::new(3, 12)));
        assert!(!green.is_fogged(Position::new(3, 3)));
    }

    #[test]
    fn clear_all_reveals_everything_for_one_color() {
        let mut world = world();
        let mut visibility = scheduler();
        visibility.full_refresh(&mut world, Color::Red);

        visibility.clear_all(&mut world, Color::Red);

        let mask = visibility.mask(Color::Red).unwrap();
        assert!(!mask.is_fogged(Position::new(15, 15)));
        assert!(world.map.is_fog(Position::new(15, 15), Colors::BLUE));
    }
}
