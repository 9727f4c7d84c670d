//! The single hero or castle the player is interacting with.

use game_core::{CastleId, Color, Focus, FocusKind, HeroId, Position, World};
use tracing::debug;

use crate::api::AudioSink;

/// Result of a focus update, for the caller to recenter and redraw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FocusChange {
    pub previous: Focus,
    pub current: Focus,
    /// Tile to center the view on.
    pub center: Option<Position>,
}

impl FocusChange {
    pub fn changed(&self) -> bool {
        self.previous != self.current
    }
}

/// Tracks focus during a human turn.
#[derive(Clone, Copy, Debug, Default)]
pub struct FocusManager {
    current: Focus,
}

impl FocusManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from a focus remembered from an earlier turn, without side effects.
    pub fn restored(focus: Focus) -> Self {
        Self { current: focus }
    }

    pub fn current(&self) -> Focus {
        self.current
    }

    /// Moves focus to `focus`.
    ///
    /// The previously focused hero's route is hidden, the new hero's route is
    /// shown, and the audio layer hears about any change of entity.
    pub fn set_focus(
        &mut self,
        world: &mut World,
        focus: Focus,
        audio: &mut dyn AudioSink,
    ) -> FocusChange {
        let previous = self.current;
        if let Focus::Hero(old) = previous
            && previous != focus
            && let Ok(hero) = world.hero_mut(old)
        {
            hero.route_visible = false;
        }

        let center = match focus {
            Focus::Hero(id) => world.hero_mut(id).ok().map(|hero| {
                hero.route_visible = !hero.route.is_empty();
                hero.position
            }),
            Focus::Castle(id) => world.castle(id).ok().map(|castle| castle.position),
            Focus::None => None,
        };

        self.current = focus;
        if previous != focus {
            debug!(target: "runtime::focus", ?previous, current = ?focus, "focus changed");
            audio.focus_changed(focus);
        }
        FocusChange {
            previous,
            current: focus,
            center,
        }
    }

    /// Picks a new focus for `color` following `preferred`.
    pub fn reset_focus(
        &mut self,
        world: &mut World,
        color: Color,
        preferred: FocusKind,
        audio: &mut dyn AudioSink,
    ) -> FocusChange {
        let focus = choose(world, color, preferred, self.current);
        self.set_focus(world, focus, audio)
    }

    /// Cycles to the next hero that may still move. `None` when there is none.
    pub fn next_hero(
        &mut self,
        world: &mut World,
        color: Color,
        audio: &mut dyn AudioSink,
    ) -> Option<FocusChange> {
        let movable: Vec<HeroId> = world
            .heroes_of(color)
            .filter(|hero| hero.may_still_move())
            .map(|hero| hero.id)
            .collect();
        let next = cycle(&movable, self.current.hero())?;
        Some(self.set_focus(world, Focus::Hero(next), audio))
    }

    /// Cycles through the kingdom's castles. `None` when it has none.
    pub fn next_castle(
        &mut self,
        world: &mut World,
        color: Color,
        audio: &mut dyn AudioSink,
    ) -> Option<FocusChange> {
        let castles: Vec<CastleId> = world.castles_of(color).map(|castle| castle.id).collect();
        let next = cycle(&castles, self.current.castle())?;
        Some(self.set_focus(world, Focus::Castle(next), audio))
    }
}

fn choose(world: &World, color: Color, preferred: FocusKind, current: Focus) -> Focus {
    let first_hero = || world.heroes_of(color).next().map(|hero| Focus::Hero(hero.id));
    let first_castle = || {
        world
            .castles_of(color)
            .next()
            .map(|castle| Focus::Castle(castle.id))
    };

    let chosen = match preferred {
        FocusKind::FirstHero => world
            .heroes_of(color)
            .find(|hero| hero.may_still_move())
            .map(|hero| Focus::Hero(hero.id))
            .or_else(first_castle),
        FocusKind::Heroes => current
            .hero()
            .filter(|id| world.hero(*id).is_ok_and(|hero| hero.is_owned_by(color)))
            .map(Focus::Hero)
            .or_else(first_hero)
            .or_else(first_castle),
        FocusKind::Castle => current
            .castle()
            .filter(|id| world.castle(*id).is_ok_and(|castle| castle.is_owned_by(color)))
            .map(Focus::Castle)
            .or_else(first_castle)
            .or_else(first_hero),
    };
    chosen.unwrap_or(Focus::None)
}

/// Entry after `current` in `items`, wrapping around; the first entry when
/// `current` is not listed.
fn cycle<T: Copy + PartialEq>(items: &[T], current: Option<T>) -> Option<T> {
    let index = current
        .and_then(|current| items.iter().position(|item| *item == current))
        .map_or(0, |index| (index + 1) % items.len());
    items.get(index).copied()
}
