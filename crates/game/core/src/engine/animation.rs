//! Frame-by-frame hero movement between adjacent tiles.
//!
//! A transition commits to one tile at start time and is never re-validated
//! in flight. Each tick removes `speed multiplier` frame units from a fixed
//! per-tile budget; the walk-cycle sprite advances every
//! [`GameConfig::FRAMES_PER_SPRITE`] units whatever the multiplier, so faster
//! speeds skip sprites instead of cycling them faster. When the budget hits
//! zero the hero is snapped onto the tile and only then does any tile action
//! get reported.

use crate::config::GameConfig;
use crate::state::{
    Direction, HeroId, PixelOffset, Position, Region, Tick, TileAction, World,
};

use super::movement::{MoveError, Step, validate_step};

/// Transient animation data of the hero currently walking.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeroMotion {
    pub hero: HeroId,
    pub from: Position,
    pub to: Position,
    pub direction: Direction,
    /// Movement points charged when the hero settles.
    pub cost: u32,
    pub frames_remaining: u32,
    /// Pixel displacement per consumed frame unit.
    pub pixel_step: PixelOffset,
    pub base_sprite: u32,
    pub stop_requested: bool,
}

impl HeroMotion {
    fn new(step: Step) -> Self {
        let (dx, dy) = step.direction.delta();
        let scale = GameConfig::TILE_SIZE / GameConfig::FRAMES_PER_TILE as i32;
        Self {
            hero: step.hero,
            from: step.from,
            to: step.to,
            direction: step.direction,
            cost: step.cost,
            frames_remaining: GameConfig::FRAMES_PER_TILE,
            pixel_step: PixelOffset::new(dx * scale, dy * scale),
            base_sprite: step.direction.sprite_base(),
            stop_requested: false,
        }
    }

    fn consumed(&self) -> u32 {
        GameConfig::FRAMES_PER_TILE - self.frames_remaining
    }

    /// Offset of the sprite from its source tile after the frames consumed so far.
    pub fn offset(&self) -> PixelOffset {
        let consumed = self.consumed() as i32;
        PixelOffset::new(self.pixel_step.dx * consumed, self.pixel_step.dy * consumed)
    }

    pub fn sprite_index(&self) -> u32 {
        self.base_sprite + self.consumed() / GameConfig::FRAMES_PER_SPRITE
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum MotionPhase {
    #[default]
    Stationary,
    Transitioning(HeroMotion),
}

/// A hero settled on a tile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Arrival {
    pub hero: HeroId,
    pub tile: Position,
    /// Object on the tile. Fire it only after the arrival has been processed.
    pub action: Option<TileAction>,
    pub tick: Tick,
}

/// Everything a single animation tick asks the caller to do.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// A new leg began during this tick.
    pub started: Option<Step>,
    pub arrival: Option<Arrival>,
    /// Fog window touched by the arrival, including the one-tile border whose
    /// edge shapes depend on it.
    pub reveal: Option<Region>,
    pub recenter: Option<Position>,
    /// Why the route stopped early, if it did.
    pub halted: Option<MoveError>,
    pub redraw: bool,
}

/// Drives one hero at a time across its route.
#[derive(Clone, Debug)]
pub struct HeroMovementAnimator {
    phase: MotionPhase,
    multiplier: u32,
    /// Hero whose route keeps being walked once the current leg settles.
    walking: Option<HeroId>,
    completed_at: Option<Tick>,
}

impl HeroMovementAnimator {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            phase: MotionPhase::Stationary,
            multiplier: config.speed_multiplier(),
            walking: None,
            completed_at: None,
        }
    }

    pub fn set_speed(&mut self, config: &GameConfig) {
        self.multiplier = config.speed_multiplier();
    }

    pub fn phase(&self) -> &MotionPhase {
        &self.phase
    }

    pub fn motion(&self) -> Option<&HeroMotion> {
        match &self.phase {
            MotionPhase::Transitioning(motion) => Some(motion),
            MotionPhase::Stationary => None,
        }
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.phase, MotionPhase::Transitioning(_))
    }

    /// Mid-transition, or about to start the next leg of a route.
    pub fn is_busy(&self) -> bool {
        self.is_transitioning() || self.walking.is_some()
    }

    pub fn walking_hero(&self) -> Option<HeroId> {
        self.motion().map(|motion| motion.hero).or(self.walking)
    }

    /// Tick at which the most recent transition reached zero frames.
    pub fn completed_at(&self) -> Option<Tick> {
        self.completed_at
    }

    /// Commits `hero` to walking onto `target`, the first tile of its route.
    pub fn start_transition(
        &mut self,
        world: &mut World,
        hero: HeroId,
        target: Position,
    ) -> Result<Step, MoveError> {
        if let Some(walking) = self.walking_hero() {
            return Err(MoveError::AlreadyMoving(walking));
        }
        let step = validate_step(world, hero, target)?;
        self.begin(world, step)?;
        Ok(step)
    }

    /// Finish the current tile, then stop.
    pub fn request_stop(&mut self) {
        match &mut self.phase {
            MotionPhase::Transitioning(motion) => motion.stop_requested = true,
            MotionPhase::Stationary => self.walking = None,
        }
    }

    /// Forgets any pending route continuation without touching a leg in flight.
    pub fn cancel_continuation(&mut self) {
        if !self.is_transitioning() {
            self.walking = None;
        }
    }

    pub fn tick(&mut self, world: &mut World, now: Tick) -> Result<TickOutcome, MoveError> {
        let mut outcome = TickOutcome::default();

        let motion = match &mut self.phase {
            MotionPhase::Transitioning(motion) => motion,
            MotionPhase::Stationary => {
                if let Some(hero) = self.walking {
                    self.continue_route(world, hero, &mut outcome)?;
                }
                return Ok(outcome);
            }
        };

        motion.frames_remaining = motion.frames_remaining.saturating_sub(self.multiplier);
        let walker = world.hero_mut(motion.hero)?;
        walker.offset = motion.offset();
        walker.sprite_index = motion.sprite_index();
        outcome.redraw = true;
        if motion.frames_remaining > 0 {
            return Ok(outcome);
        }

        let MotionPhase::Transitioning(motion) = std::mem::take(&mut self.phase) else {
            return Ok(outcome);
        };
        self.completed_at = Some(now);
        let arrival = self.settle(world, &motion, now, &mut outcome)?;
        let route_left = !world.hero(motion.hero)?.route.is_empty();

        if motion.stop_requested || !route_left {
            self.walking = None;
        } else if arrival.action.is_some() {
            // The next leg starts on the following tick, after the action fired.
            self.walking = Some(motion.hero);
        } else {
            self.continue_route(world, motion.hero, &mut outcome)?;
        }
        outcome.arrival = Some(arrival);
        Ok(outcome)
    }

    fn begin(&mut self, world: &mut World, step: Step) -> Result<(), MoveError> {
        world.hero_mut(step.hero)?.face(step.direction);
        self.phase = MotionPhase::Transitioning(HeroMotion::new(step));
        self.walking = Some(step.hero);
        Ok(())
    }

    fn settle(
        &mut self,
        world: &mut World,
        motion: &HeroMotion,
        now: Tick,
        outcome: &mut TickOutcome,
    ) -> Result<Arrival, MoveError> {
        let walker = world.hero_mut(motion.hero)?;
        walker.position = motion.to;
        walker.move_points = walker.move_points.saturating_sub(motion.cost);
        if walker.route.front() == Some(motion.to) {
            walker.route.pop_front();
        }
        walker.route_visible = !walker.route.is_empty();
        walker.face(motion.direction);
        let (owner, scout) = (walker.owner, walker.scout);

        if let Some(color) = owner {
            outcome.reveal = world.reveal(motion.to, scout, color).map(|window| window.expand(1));
        }
        outcome.recenter = Some(motion.to);
        outcome.redraw = true;

        Ok(Arrival {
            hero: motion.hero,
            tile: motion.to,
            action: world
                .map
                .tile(motion.to)
                .and_then(|tile| tile.action.clone()),
            tick: now,
        })
    }

    fn continue_route(
        &mut self,
        world: &mut World,
        hero: HeroId,
        outcome: &mut TickOutcome,
    ) -> Result<(), MoveError> {
        let Some(next) = world.hero(hero)?.route.front() else {
            self.walking = None;
            return Ok(());
        };
        match validate_step(world, hero, next) {
            Ok(step) => {
                self.begin(world, step)?;
                outcome.started = Some(step);
                outcome.redraw = true;
            }
            Err(MoveError::World(error)) => return Err(MoveError::World(error)),
            Err(reason) => {
                self.walking = None;
                outcome.halted = Some(reason);
            }
        }
        Ok(())
    }
}
