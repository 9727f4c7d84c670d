use game_core::{
    ActionError, Color, DigOutcome, Focus, FocusKind, GameError, HeroId, HeroMovementAnimator,
    MoveError, Position, Route, Tick, TurnResult, dig, plan_route,
};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::api::{Frame, InputEvent, PollOutcome, Result};
use crate::config::RuntimeConfig;
use crate::events::AdventureEvent;
use crate::focus::{FocusChange, FocusManager};
use crate::repository::{SaveSlot, SaveSnapshot};

use super::commands::Command;
use super::interface::{ConsumerContext, PanelKind, Redraw};
use super::timers::DelayTimer;
use super::{TurnContext, hotkeys};

const END_TURN_CONFIRM: &str =
    "One or more heroes may still move, are you sure you want to end your turn?";
const NEW_GAME_CONFIRM: &str = "Are you sure you want to restart? (Your current game will be lost.)";
const LOAD_GAME_CONFIRM: &str =
    "Are you sure you want to load a new game? (Your current game will be lost.)";
const QUIT_CONFIRM: &str = "Are you sure you want to quit?";
const DIG_FOUND: &str = "Congratulations! After spending many hours digging here, your hero has uncovered the Ultimate Artifact";
const DIG_NOTHING: &str = "Nothing here. Where could it be?";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnState {
    AwaitingInput,
    /// A hero is walking; presses only ask it to stop.
    HeroAnimating,
    TurnEnding,
}

/// Runs one human kingdom's turn to completion.
pub struct HumanTurnController {
    color: Color,
    state: TurnState,
    resumed: bool,
    focus: FocusManager,
    animator: HeroMovementAnimator,
    hero_timer: DelayTimer,
    scroll_timer: DelayTimer,
    redraw: Redraw,
    tick: Tick,
}

impl HumanTurnController {
    pub fn new(color: Color, config: &RuntimeConfig, resumed: bool) -> Self {
        Self {
            color,
            state: TurnState::AwaitingInput,
            resumed,
            focus: FocusManager::new(),
            animator: HeroMovementAnimator::new(&config.game),
            hero_timer: DelayTimer::new(config.hero_delay()),
            scroll_timer: DelayTimer::new(config.scroll_delay()),
            redraw: Redraw::all(),
            tick: Tick::ZERO,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn focus(&self) -> Focus {
        self.focus.current()
    }

    /// Plays the turn until the player ends it, something ends the game, or
    /// quit is requested.
    pub async fn run(&mut self, ctx: &mut TurnContext<'_>) -> Result<TurnResult> {
        info!(target: "runtime::turn", color = %self.color, day = ctx.world.day, resumed = self.resumed, "human turn started");

        let result = match self.begin_turn(ctx) {
            Some(result) => result,
            None => self.event_loop(ctx).await?,
        };

        self.state = TurnState::TurnEnding;
        ctx.cursor.remember_focus(self.color, self.focus.current());
        if result == TurnResult::EndTurn {
            self.end_turn_effects(ctx);
        }

        info!(target: "runtime::turn", color = %self.color, %result, "human turn finished");
        Ok(result)
    }

    /// Turn setup. `Some` when the game is already over.
    fn begin_turn(&mut self, ctx: &mut TurnContext<'_>) -> Option<TurnResult> {
        let humans = ctx
            .world
            .kingdoms()
            .filter(|kingdom| kingdom.is_human() && kingdom.is_live())
            .count();
        if humans > 1 && ctx.cursor.last_human != Some(self.color) {
            ctx.renderer.render_hidden();
            ctx.dialogs.announce_player_turn(self.color);
        }
        ctx.cursor.last_human = Some(self.color);

        let preferred = if self.resumed && ctx.config.remember_last_focus {
            let remembered = ctx.cursor.last_focus_of(self.color);
            self.focus = FocusManager::restored(remembered);
            if remembered.hero().is_some() {
                FocusKind::Heroes
            } else {
                FocusKind::Castle
            }
        } else {
            FocusKind::FirstHero
        };
        let change = self
            .focus
            .reset_focus(ctx.world, self.color, preferred, ctx.audio);
        self.apply_focus_change(ctx, change);

        ctx.visibility.full_refresh(ctx.world, self.color);

        let autosave = ctx.config.autosave;
        if !self.resumed && autosave.enabled && autosave.at_day_begin {
            self.autosave(ctx);
        }

        if let Some(result) = ctx.hooks.check_game_over(ctx.world) {
            return Some(result);
        }

        self.warn_lost_towns(ctx);
        None
    }

    async fn event_loop(&mut self, ctx: &mut TurnContext<'_>) -> Result<TurnResult> {
        self.render(ctx);
        loop {
            self.tick = self.tick.next();
            let deadline = self.next_deadline();
            let events = match ctx.input.poll(deadline, ctx.quit).await? {
                PollOutcome::Quit => {
                    info!(target: "runtime::turn", color = %self.color, "quit requested");
                    return Ok(TurnResult::Quit);
                }
                PollOutcome::Timeout => Vec::new(),
                PollOutcome::Events(events) => events,
            };

            for event in events {
                if let Some(result) = self.handle_event(ctx, event)? {
                    return Ok(result);
                }
            }

            let now = Instant::now();
            if self.hero_timer.fire(now)
                && let Some(result) = self.animate(ctx)?
            {
                return Ok(result);
            }
            self.autoscroll(ctx, now);

            if !ctx.world.is_live(self.color) {
                info!(target: "runtime::turn", color = %self.color, "kingdom lost everything; turn ends");
                return Ok(TurnResult::EndTurn);
            }

            if !self.redraw.is_empty() && !ctx.input.has_pending() {
                self.render(ctx);
            }
        }
    }

    fn next_deadline(&self) -> Option<Instant> {
        match (self.hero_timer.deadline(), self.scroll_timer.deadline()) {
            (Some(hero), Some(scroll)) => Some(hero.min(scroll)),
            (hero, scroll) => hero.or(scroll),
        }
    }

    fn handle_event(
        &mut self,
        ctx: &mut TurnContext<'_>,
        event: InputEvent,
    ) -> Result<Option<TurnResult>> {
        if let InputEvent::Resize { width, height } = event {
            ctx.interface.resize(width, height);
            self.redraw = Redraw::all();
            return Ok(None);
        }

        if self.animator.is_busy() {
            if event.is_press() {
                debug!(target: "runtime::turn", ?event, "stop requested");
                self.animator.request_stop();
            }
            return Ok(None);
        }

        let context = ConsumerContext {
            world: &*ctx.world,
            color: self.color,
            focus: self.focus.current(),
            screen: ctx.interface.screen(),
        };
        let dispatched = match event {
            InputEvent::Key(_) => ctx.interface.dispatch_grabbed_key(&event, &context),
            _ => ctx.interface.dispatch_pointer(&event, &context),
        };
        let commands = match (dispatched, event) {
            (Some((consumer, commands)), _) => {
                self.publish_dispatch(ctx, consumer);
                commands
            }
            (None, InputEvent::Key(key)) => hotkeys::command_for(key, ctx.config.debug)
                .into_iter()
                .collect(),
            (None, _) => Vec::new(),
        };

        for command in commands {
            match self.apply(ctx, command) {
                Ok(Some(result)) => return Ok(Some(result)),
                Ok(None) => {}
                Err(error) if error.severity().is_recoverable() => {
                    debug!(
                        target: "runtime::turn",
                        ?command,
                        code = error.error_code(),
                        %error,
                        "command rejected"
                    );
                    ctx.dialogs.message(&error.to_string());
                }
                Err(error) => return Err(error),
            }
        }
        Ok(None)
    }

    fn publish_dispatch(&self, ctx: &TurnContext<'_>, consumer: PanelKind) {
        ctx.events.publish(AdventureEvent::InputDispatched {
            consumer,
            tick: self.tick,
        });
    }

    fn apply(&mut self, ctx: &mut TurnContext<'_>, command: Command) -> Result<Option<TurnResult>> {
        match command {
            Command::EndTurn => {
                let may_move = ctx
                    .world
                    .heroes_of(self.color)
                    .any(|hero| hero.may_still_move());
                if may_move && !ctx.dialogs.confirm(END_TURN_CONFIRM) {
                    return Ok(None);
                }
                return Ok(Some(TurnResult::EndTurn));
            }
            Command::NewGame => {
                return Ok(ctx
                    .dialogs
                    .confirm(NEW_GAME_CONFIRM)
                    .then_some(TurnResult::NewGame));
            }
            Command::LoadGame => {
                return Ok(ctx
                    .dialogs
                    .confirm(LOAD_GAME_CONFIRM)
                    .then_some(TurnResult::LoadGame));
            }
            Command::Quit => {
                return Ok(ctx.dialogs.confirm(QUIT_CONFIRM).then_some(TurnResult::Quit));
            }
            Command::NextHero => {
                if let Some(change) = self.focus.next_hero(ctx.world, self.color, ctx.audio) {
                    self.apply_focus_change(ctx, change);
                }
            }
            Command::NextTown => {
                if let Some(change) = self.focus.next_castle(ctx.world, self.color, ctx.audio) {
                    self.apply_focus_change(ctx, change);
                }
            }
            Command::FocusHero(hero) => self.focus_on(ctx, Focus::Hero(hero)),
            Command::FocusCastle(castle) => self.focus_on(ctx, Focus::Castle(castle)),
            Command::OpenFocus => self.describe_focus(ctx)?,
            Command::KingdomSummary => self.describe_kingdom(ctx),
            Command::ContinueMovement => {
                let hero = self.focused_hero()?;
                self.start_walking(ctx, hero)?;
            }
            Command::SleepHero => {
                let hero = self.focused_hero()?;
                let walker = ctx.world.hero_mut(hero)?;
                walker.sleeping = !walker.sleeping;
                self.redraw |= Redraw::GAME_AREA | Redraw::ICONS;
            }
            Command::Dig => self.dig(ctx)?,
            Command::Save => {
                let snapshot = SaveSnapshot::capture(ctx.world, ctx.cursor);
                match ctx.saves.save(SaveSlot::Quick, &snapshot) {
                    Ok(()) => {
                        info!(target: "runtime::turn", color = %self.color, day = ctx.world.day, "game saved");
                        ctx.dialogs.message("Game saved successfully.");
                    }
                    Err(error) => {
                        warn!(target: "runtime::turn", %error, "save failed");
                        ctx.dialogs.warning(&format!("Save failed: {error}"));
                    }
                }
            }
            Command::MoveFocusedHeroTo(destination) => {
                let hero = self.focused_hero()?;
                let route = plan_route(ctx.world, hero, destination)?;
                ctx.world.hero_mut(hero)?.set_route(route);
                self.start_walking(ctx, hero)?;
            }
            Command::StepFocusedHero(direction) => {
                let hero = self.focused_hero()?;
                let target = direction.apply(ctx.world.hero(hero)?.position);
                ctx.world.hero_mut(hero)?.set_route(Route::new([target]));
                self.start_walking(ctx, hero)?;
            }
            Command::CenterOn(position) => {
                ctx.interface
                    .game_area_mut()
                    .viewport_mut()
                    .center_on(position, ctx.world);
                self.redraw |= Redraw::GAME_AREA | Redraw::RADAR;
            }
            Command::QuickInfo(position) => self.describe_tile(ctx, position),
            Command::ToggleInterface => {
                ctx.interface.toggle_hidden();
                self.redraw = Redraw::all();
            }
            Command::TogglePanel(kind) => {
                ctx.interface.toggle_panel(kind);
                self.redraw = Redraw::all();
            }
            Command::RevealMap => {
                if ctx.config.debug {
                    ctx.visibility.clear_all(ctx.world, self.color);
                    self.redraw = Redraw::all();
                }
            }
            Command::Redraw(parts) => self.redraw |= parts,
        }
        Ok(None)
    }

    fn focused_hero(&self) -> std::result::Result<HeroId, ActionError> {
        self.focus.current().hero().ok_or(ActionError::NoHeroSelected)
    }

    fn focus_on(&mut self, ctx: &mut TurnContext<'_>, focus: Focus) {
        let change = self.focus.set_focus(ctx.world, focus, ctx.audio);
        self.apply_focus_change(ctx, change);
    }

    fn apply_focus_change(&mut self, ctx: &mut TurnContext<'_>, change: FocusChange) {
        if let Some(center) = change.center {
            ctx.interface
                .game_area_mut()
                .viewport_mut()
                .center_on(center, ctx.world);
        }
        if change.changed() {
            ctx.events.publish(AdventureEvent::FocusChanged {
                color: self.color,
                focus: change.current,
            });
        }
        self.redraw |= Redraw::GAME_AREA | Redraw::RADAR | Redraw::ICONS | Redraw::STATUS;
    }

    fn start_walking(&mut self, ctx: &mut TurnContext<'_>, hero: HeroId) -> Result<()> {
        let target = ctx
            .world
            .hero(hero)?
            .route
            .front()
            .ok_or(MoveError::NoRoute(hero))?;
        self.redraw |= Redraw::GAME_AREA;
        let step = self.animator.start_transition(ctx.world, hero, target)?;

        debug!(target: "runtime::turn", %hero, from = %step.from, to = %step.to, "hero starts walking");
        ctx.events.publish(AdventureEvent::HeroStepStarted {
            hero,
            from: step.from,
            to: step.to,
            tick: self.tick,
        });
        self.hero_timer.arm(Instant::now());
        self.scroll_timer.disarm();
        self.state = TurnState::HeroAnimating;
        Ok(())
    }

    /// One hero-timer expiration.
    fn animate(&mut self, ctx: &mut TurnContext<'_>) -> Result<Option<TurnResult>> {
        let walking = self.animator.motion().map(|motion| motion.hero);
        let outcome = self.animator.tick(ctx.world, self.tick)?;

        if let Some(hero) = walking {
            let frames_remaining = match outcome.arrival {
                Some(_) => 0,
                None => self
                    .animator
                    .motion()
                    .map_or(0, |motion| motion.frames_remaining),
            };
            ctx.events.publish(AdventureEvent::AnimationTick {
                hero,
                frames_remaining,
                tick: self.tick,
            });
        }
        if let Some(region) = outcome.reveal {
            ctx.visibility.queue(self.color, region);
        }
        if let Some(position) = outcome.recenter {
            ctx.interface
                .game_area_mut()
                .viewport_mut()
                .center_on(position, ctx.world);
        }
        if let Some(reason) = &outcome.halted {
            debug!(target: "runtime::turn", %reason, "route halted");
        }
        if outcome.redraw {
            self.redraw |= Redraw::GAME_AREA | Redraw::RADAR;
        }

        if let Some(arrival) = outcome.arrival {
            ctx.events.publish(AdventureEvent::HeroArrived {
                hero: arrival.hero,
                tile: arrival.tile,
                tick: arrival.tick,
            });
            self.redraw |= Redraw::STATUS | Redraw::ICONS;

            if let Some(action) = &arrival.action {
                let report =
                    ctx.hooks
                        .hero_action(ctx.world, arrival.hero, arrival.tile, action)?;
                ctx.events.publish(AdventureEvent::ActionFired {
                    hero: arrival.hero,
                    tile: arrival.tile,
                    tick: self.tick,
                });
                debug!(target: "runtime::turn", hero = %arrival.hero, tile = %arrival.tile, ?report, "tile action fired");
                if let Some(text) = report.message() {
                    ctx.dialogs.message(&text);
                }
                self.redraw = Redraw::all();

                let still_ours = ctx
                    .world
                    .hero(arrival.hero)
                    .is_ok_and(|hero| hero.is_owned_by(self.color));
                if !still_ours {
                    self.animator.request_stop();
                    let change = self.focus.reset_focus(
                        ctx.world,
                        self.color,
                        FocusKind::Heroes,
                        ctx.audio,
                    );
                    self.apply_focus_change(ctx, change);
                }
                if let Some(result) = ctx.hooks.check_game_over(ctx.world) {
                    return Ok(Some(result));
                }
            }
        }

        if let Some(step) = outcome.started {
            ctx.events.publish(AdventureEvent::HeroStepStarted {
                hero: step.hero,
                from: step.from,
                to: step.to,
                tick: self.tick,
            });
        }

        if !self.animator.is_busy() {
            self.hero_timer.disarm();
            self.state = TurnState::AwaitingInput;
        }
        Ok(None)
    }

    fn autoscroll(&mut self, ctx: &mut TurnContext<'_>, now: Instant) {
        let request = ctx.interface.game_area().scroll_request();
        let Some(direction) = request.filter(|_| !self.animator.is_busy()) else {
            self.scroll_timer.disarm();
            return;
        };
        if !self.scroll_timer.is_armed() {
            self.scroll_timer.arm(now);
            return;
        }
        if self.scroll_timer.fire(now)
            && ctx
                .interface
                .game_area_mut()
                .viewport_mut()
                .scroll(direction, ctx.world)
        {
            self.redraw |= Redraw::GAME_AREA | Redraw::RADAR;
        }
    }

    fn render(&mut self, ctx: &mut TurnContext<'_>) {
        if ctx.visibility.is_pending() {
            ctx.visibility.flush(ctx.world);
        }
        let frame = Frame {
            world: &*ctx.world,
            color: self.color,
            mask: ctx.visibility.mask(self.color),
            focus: self.focus.current(),
            interface: &*ctx.interface,
            redraw: self.redraw,
            tick: self.tick,
        };
        ctx.renderer.render(&frame);
        ctx.events.publish(AdventureEvent::Rendered {
            color: self.color,
            tick: self.tick,
        });
        self.redraw = Redraw::empty();
    }

    fn dig(&mut self, ctx: &mut TurnContext<'_>) -> Result<()> {
        let hero = self.focused_hero()?;
        let outcome = dig(ctx.world, hero)?;
        info!(target: "runtime::turn", %hero, ?outcome, "hero dug");
        let text = match outcome {
            DigOutcome::Found(_) => DIG_FOUND,
            DigOutcome::Nothing => DIG_NOTHING,
        };
        ctx.dialogs.message(text);
        self.redraw |= Redraw::STATUS | Redraw::ICONS;
        Ok(())
    }

    fn describe_focus(&self, ctx: &mut TurnContext<'_>) -> Result<()> {
        let text = match self.focus.current() {
            Focus::Hero(id) => {
                let hero = ctx.world.hero(id)?;
                format!(
                    "{}: {}/{} movement points, {} artifacts.",
                    hero.name,
                    hero.move_points,
                    hero.max_move_points,
                    hero.artifacts.len()
                )
            }
            Focus::Castle(id) => format!("{}.", ctx.world.castle(id)?.name),
            Focus::None => return Ok(()),
        };
        ctx.dialogs.message(&text);
        Ok(())
    }

    fn describe_kingdom(&self, ctx: &mut TurnContext<'_>) {
        let Some(kingdom) = ctx.world.kingdom(self.color) else {
            return;
        };
        let text = format!(
            "Day {}: {} heroes, {} castles, {} gold.",
            ctx.world.day,
            kingdom.heroes.len(),
            kingdom.castles.len(),
            kingdom.gold
        );
        ctx.dialogs.message(&text);
    }

    fn describe_tile(&self, ctx: &mut TurnContext<'_>, position: Position) {
        let fogged = ctx
            .visibility
            .mask(self.color)
            .is_none_or(|mask| mask.is_fogged(position));
        let text = if fogged {
            "Uncharted Territory".to_string()
        } else if let Some(hero) = ctx.world.hero_at(position).and_then(|id| ctx.world.hero(id).ok()) {
            hero.name.clone()
        } else if let Some(castle) = ctx
            .world
            .castle_at(position)
            .and_then(|id| ctx.world.castle(id).ok())
        {
            castle.name.clone()
        } else {
            match ctx.world.map.tile(position) {
                Some(tile) => tile.terrain.to_string(),
                None => return,
            }
        };
        ctx.dialogs.message(&text);
    }

    fn warn_lost_towns(&self, ctx: &mut TurnContext<'_>) {
        let Some(kingdom) = ctx.world.kingdom(self.color) else {
            return;
        };
        if !kingdom.castles.is_empty() || kingdom.heroes.is_empty() {
            return;
        }
        let days_left = ctx
            .config
            .game
            .lost_town_days
            .saturating_sub(kingdom.lost_town_days);
        let text = if days_left == 0 {
            format!(
                "{} player, this is your last day to capture a town, or you will be banished from this land.",
                self.color.name()
            )
        } else {
            format!(
                "{} player, you only have {} days left to capture a town, or you will be banished from this land.",
                self.color.name(),
                days_left
            )
        };
        ctx.dialogs.warning(&text);
    }

    fn end_turn_effects(&mut self, ctx: &mut TurnContext<'_>) {
        if let Some(hero) = self.focus.current().hero()
            && let Ok(walker) = ctx.world.hero_mut(hero)
        {
            walker.route_visible = false;
        }
        self.warn_lost_towns(ctx);

        let autosave = ctx.config.autosave;
        if autosave.enabled && !autosave.at_day_begin {
            self.autosave(ctx);
        }
    }

    fn autosave(&self, ctx: &mut TurnContext<'_>) {
        let snapshot = SaveSnapshot::capture(ctx.world, ctx.cursor);
        match ctx.saves.save(SaveSlot::Autosave, &snapshot) {
            Ok(()) => {
                debug!(target: "runtime::turn", color = %self.color, day = ctx.world.day, "autosaved")
            }
            Err(error) => {
                warn!(target: "runtime::turn", %error, "autosave failed");
                ctx.dialogs.warning(&format!("Autosave failed: {error}"));
            }
        }
    }
}
