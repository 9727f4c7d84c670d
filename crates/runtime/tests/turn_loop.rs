mod common;

use std::sync::Arc;

use game_core::{
    ActionReport, ArtifactId, Color, Control, DayReport, GameConfig, HeroId, Position,
    TileAction, TurnCursor, TurnResult, World,
};
use runtime::{
    AdventureEvent, CollaboratorKind, Event, InMemorySaveRepository, InputEvent, Key,
    PanelKind, RefreshScope, RuntimeConfig, RuntimeError, SaveRepository, SaveSlot, SaveSnapshot,
    StandardWorldHooks, Topic, TurnEvent, TurnScheduler, WorldHooks, events::drain,
};

use common::{
    Drawn, RecordingAi, RecordingDialogs, RecordingRenderer, ScriptedInput, Step, world_with,
};

struct Harness {
    scheduler: TurnScheduler,
    renderer: RecordingRenderer,
    dialogs: RecordingDialogs,
    ai: RecordingAi,
    saves: Arc<InMemorySaveRepository>,
}

fn quiet_config() -> RuntimeConfig {
    let mut config = RuntimeConfig::default().with_autosave(false, false);
    config.event_buffer_size = 4096;
    config
}

fn harness(world: World, input: ScriptedInput, dialogs: RecordingDialogs) -> Harness {
    harness_with(world, input, dialogs, quiet_config(), InMemorySaveRepository::new())
}

fn harness_with(
    world: World,
    input: ScriptedInput,
    dialogs: RecordingDialogs,
    config: RuntimeConfig,
    saves: InMemorySaveRepository,
) -> Harness {
    let renderer = RecordingRenderer::default();
    let ai = RecordingAi::default();
    let saves = Arc::new(saves);
    let scheduler = TurnScheduler::builder()
        .config(config)
        .world(world)
        .ai(ai.clone())
        .saves(saves.clone())
        .input(input)
        .renderer(renderer.clone())
        .dialogs(dialogs.clone())
        .build()
        .unwrap();
    Harness {
        scheduler,
        renderer,
        dialogs,
        ai,
        saves,
    }
}

fn turns_started(events: &[Event]) -> Vec<Color> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::Turn(TurnEvent::TurnStarted { color, .. }) => Some(*color),
            _ => None,
        })
        .collect()
}

fn adventure(events: Vec<Event>) -> Vec<AdventureEvent> {
    events
        .into_iter()
        .filter_map(|event| match event {
            Event::Adventure(event) => Some(event),
            _ => None,
        })
        .collect()
}

/// Hero standing on (5, 5), which the default layout draws at cell (10, 5).
fn with_hero(mut world: World, color: Color) -> (World, HeroId) {
    let hero = world.spawn_hero(color, "Ariane", Position::new(5, 5)).unwrap();
    (world, hero)
}

/// Left click on the map tile right of the hero.
fn click_east_of_hero() -> InputEvent {
    InputEvent::click(12, 5)
}

#[tokio::test]
async fn test_humans_play_before_computers_every_day() {
    let world = world_with(&[
        (Color::Red, Control::Human),
        (Color::Blue, Control::Ai),
        (Color::Green, Control::Human),
    ]);
    let mut h = harness(world, ScriptedInput::keys(&['e', 'e']), RecordingDialogs::default());
    let mut turns = h.scheduler.events().subscribe(Topic::Turn);

    let result = h.scheduler.run_game_loop(false).await.unwrap();

    assert_eq!(result, TurnResult::Quit);
    let events = drain(&mut turns);
    assert_eq!(
        turns_started(&events),
        vec![Color::Green, Color::Red, Color::Blue, Color::Green]
    );
    assert_eq!(*h.ai.turns.lock().unwrap(), vec![Color::Blue]);
    assert_eq!(
        events.first(),
        Some(&Event::Turn(TurnEvent::DayStarted { day: 1 }))
    );
}

#[tokio::test]
async fn test_resume_starts_with_the_saved_player() {
    let mut world = world_with(&[
        (Color::Blue, Control::Human),
        (Color::Red, Control::Human),
        (Color::Green, Control::Ai),
    ]);
    world.day = 3;
    let cursor = TurnCursor::resumed_at(Color::Red);
    let saves = InMemorySaveRepository::resuming(
        SaveSlot::Quick,
        SaveSnapshot::capture(&world, &cursor),
    );
    let renderer = RecordingRenderer::default();
    let mut scheduler = TurnScheduler::builder()
        .config(quiet_config())
        .world(world)
        .cursor(cursor)
        .ai(RecordingAi::default())
        .saves(Arc::new(saves))
        .input(ScriptedInput::keys(&['e']))
        .renderer(renderer)
        .dialogs(RecordingDialogs::default())
        .build()
        .unwrap();
    let mut turns = scheduler.events().subscribe(Topic::Turn);

    let result = scheduler.run_game_loop(true).await.unwrap();

    assert_eq!(result, TurnResult::Quit);
    let events = drain(&mut turns);
    assert_eq!(
        events.first(),
        Some(&Event::Turn(TurnEvent::TurnStarted {
            color: Color::Red,
            control: Control::Human,
            day: 3,
        }))
    );
    assert_eq!(
        turns_started(&events),
        vec![Color::Red, Color::Green, Color::Blue]
    );
    assert!(events.contains(&Event::Turn(TurnEvent::DayStarted { day: 4 })));
    assert!(!scheduler.cursor().resumed);
}

#[tokio::test]
async fn test_resume_fails_when_a_computer_comes_first() {
    let world = world_with(&[
        (Color::Blue, Control::Human),
        (Color::Green, Control::Ai),
    ]);
    let cursor = TurnCursor::resumed_at(Color::Yellow);
    let saves = InMemorySaveRepository::resuming(
        SaveSlot::Autosave,
        SaveSnapshot::capture(&world, &cursor),
    );
    let dialogs = RecordingDialogs::default();
    let mut h = harness_with(
        world,
        ScriptedInput::keys(&[]),
        dialogs,
        quiet_config(),
        saves,
    );
    let mut turns = h.scheduler.events().subscribe(Topic::Turn);

    let error = h.scheduler.run_game_loop(true).await.unwrap_err();

    assert!(matches!(
        error,
        RuntimeError::ResumeMismatch {
            saved: Color::Yellow,
            encountered: Color::Green,
        }
    ));
    assert!(turns_started(&drain(&mut turns)).is_empty());
    assert_eq!(h.dialogs.log.borrow().warnings.len(), 1);
}

#[tokio::test]
async fn test_resume_rejects_a_saved_computer_turn() {
    let world = world_with(&[(Color::Blue, Control::Human), (Color::Red, Control::Ai)]);
    let cursor = TurnCursor::resumed_at(Color::Red);
    let saves = InMemorySaveRepository::resuming(
        SaveSlot::Autosave,
        SaveSnapshot::capture(&world, &cursor),
    );
    let mut h = harness_with(
        world,
        ScriptedInput::keys(&[]),
        RecordingDialogs::default(),
        quiet_config(),
        saves,
    );
    let mut turns = h.scheduler.events().subscribe(Topic::Turn);

    let error = h.scheduler.run_game_loop(true).await.unwrap_err();

    assert!(matches!(
        error,
        RuntimeError::SavedColorNotHuman { saved: Color::Red }
    ));
    assert!(turns_started(&drain(&mut turns)).is_empty());
    assert!(h.ai.turns.lock().unwrap().is_empty());
    assert_eq!(h.dialogs.log.borrow().warnings.len(), 1);
}

#[tokio::test]
async fn test_vanquished_kingdoms_are_announced_once() {
    let mut world = world_with(&[(Color::Blue, Control::Human), (Color::Red, Control::Ai)]);
    world.add_kingdom(Color::Green, Control::Ai).unwrap();
    world
        .spawn_hero(Color::Green, "Vesna", Position::new(10, 10))
        .unwrap();
    let mut config = quiet_config();
    config.game = GameConfig::new().with_lost_town_days(0);
    let mut h = harness_with(
        world,
        ScriptedInput::keys(&['e', 'e']),
        RecordingDialogs::default(),
        config,
        InMemorySaveRepository::new(),
    );
    let mut turns = h.scheduler.events().subscribe(Topic::Turn);

    let result = h.scheduler.run_game_loop(false).await.unwrap();

    assert_eq!(result, TurnResult::Quit);
    let events = drain(&mut turns);
    let vanquished: Vec<_> = events
        .iter()
        .filter(|event| matches!(event, Event::Turn(TurnEvent::KingdomVanquished { .. })))
        .collect();
    assert_eq!(
        vanquished,
        vec![&Event::Turn(TurnEvent::KingdomVanquished {
            color: Color::Green
        })]
    );
    assert!(!turns_started(&events).contains(&Color::Green));
    let log = h.dialogs.log.borrow();
    assert_eq!(
        log.messages
            .iter()
            .filter(|text| *text == "Green player has been vanquished!")
            .count(),
        1
    );
}

#[tokio::test(start_paused = true)]
async fn test_click_to_move_takes_budget_over_multiplier_ticks() {
    let world = world_with(&[(Color::Blue, Control::Human), (Color::Red, Control::Ai)]);
    let (world, hero) = with_hero(world, Color::Blue);
    let config = quiet_config();
    let expected_ticks = config.game.ticks_per_tile() as usize;
    let input = ScriptedInput::new([
        Step::Now(vec![click_east_of_hero()]),
        Step::AfterIdle(vec![InputEvent::Key(Key::Char('e'))]),
    ]);
    let mut h = harness_with(
        world,
        input,
        RecordingDialogs::default(),
        config,
        InMemorySaveRepository::new(),
    );
    let mut events = h.scheduler.events().subscribe(Topic::Adventure);

    h.scheduler.run_game_loop(false).await.unwrap();

    let events = adventure(drain(&mut events));
    let ticks: Vec<_> = events
        .iter()
        .filter_map(|event| match event {
            AdventureEvent::AnimationTick {
                hero: walker,
                frames_remaining,
                tick,
            } if *walker == hero => Some((*frames_remaining, *tick)),
            _ => None,
        })
        .collect();
    assert_eq!(ticks.len(), expected_ticks);
    assert_eq!(ticks.last().map(|(frames, _)| *frames), Some(0));

    let arrival = events.iter().find_map(|event| match event {
        AdventureEvent::HeroArrived { tile, tick, .. } => Some((*tile, *tick)),
        _ => None,
    });
    let (tile, arrived_at) = arrival.unwrap();
    assert_eq!(tile, Position::new(6, 5));
    assert!(arrived_at >= ticks.last().unwrap().1);
    assert_eq!(
        h.scheduler.world().hero(hero).unwrap().position,
        Position::new(6, 5)
    );
}

/// Swallows any hero that steps on `trap`.
struct TrapHooks {
    standard: StandardWorldHooks,
    trap: Position,
}

impl WorldHooks for TrapHooks {
    fn begin_new_day(&mut self, world: &mut World) -> DayReport {
        self.standard.begin_new_day(world)
    }

    fn check_game_over(&self, world: &World) -> Option<TurnResult> {
        self.standard.check_game_over(world)
    }

    fn hero_action(
        &mut self,
        world: &mut World,
        hero: HeroId,
        tile: Position,
        action: &TileAction,
    ) -> runtime::Result<ActionReport> {
        if tile != self.trap {
            return self.standard.hero_action(world, hero, tile, action);
        }
        world.dismiss_hero(hero)?;
        Ok(ActionReport::Event {
            message: "The ground swallows your hero.".into(),
        })
    }
}

#[tokio::test(start_paused = true)]
async fn test_kingdom_that_loses_everything_ends_its_turn_at_once() {
    let mut world = world_with(&[
        (Color::Blue, Control::Human),
        (Color::Green, Control::Human),
        (Color::Red, Control::Ai),
    ]);
    let keep = world.castle_at(Position::new(1, 18)).unwrap();
    world.transfer_castle(keep, None).unwrap();
    let (mut world, hero) = with_hero(world, Color::Blue);
    let trap = Position::new(6, 5);
    world.map.tile_mut(trap).unwrap().action = Some(TileAction::Event {
        message: "A sinkhole.".into(),
    });

    let renderer = RecordingRenderer::default();
    let dialogs = RecordingDialogs::default();
    let mut scheduler = TurnScheduler::builder()
        .config(quiet_config())
        .world(world)
        .hooks(TrapHooks {
            standard: StandardWorldHooks::default(),
            trap,
        })
        .ai(RecordingAi::default())
        .saves(Arc::new(InMemorySaveRepository::new()))
        .input(ScriptedInput::new([
            Step::Now(vec![click_east_of_hero()]),
            Step::AfterIdle(vec![InputEvent::Key(Key::Char('e'))]),
        ]))
        .renderer(renderer)
        .dialogs(dialogs.clone())
        .build()
        .unwrap();
    let mut turns = scheduler.events().subscribe(Topic::Turn);

    scheduler.run_game_loop(false).await.unwrap();

    let events = drain(&mut turns);
    assert!(events.contains(&Event::Turn(TurnEvent::TurnEnded {
        color: Color::Blue,
        result: TurnResult::EndTurn,
    })));
    assert_eq!(
        turns_started(&events),
        vec![Color::Blue, Color::Green, Color::Red, Color::Green]
    );
    assert!(!scheduler.world().is_live(Color::Blue));
    assert!(scheduler.world().hero(hero).unwrap().owner.is_none());

    let log = dialogs.log.borrow();
    // The end-turn key went to Green, who has no hero left to warn about.
    assert!(log.confirms.is_empty());
    assert!(log
        .messages
        .contains(&"The ground swallows your hero.".to_string()));
    assert!(log
        .messages
        .contains(&"Blue player has been vanquished!".to_string()));
}

#[tokio::test]
async fn test_hot_seat_refreshes_fog_before_the_first_frame() {
    let world = world_with(&[
        (Color::Blue, Control::Human),
        (Color::Red, Control::Human),
        (Color::Green, Control::Ai),
    ]);
    let mut h = harness(world, ScriptedInput::keys(&['e']), RecordingDialogs::default());
    let mut events = h.scheduler.events().subscribe(Topic::Adventure);

    h.scheduler.run_game_loop(false).await.unwrap();

    let events = adventure(drain(&mut events));
    let first_red_frame = events
        .iter()
        .position(|event| {
            matches!(event, AdventureEvent::Rendered { color: Color::Red, .. })
        })
        .unwrap();
    let last_blue_frame = events
        .iter()
        .rposition(|event| {
            matches!(event, AdventureEvent::Rendered { color: Color::Blue, .. })
        })
        .unwrap();
    assert!(events[last_blue_frame..first_red_frame].contains(
        &AdventureEvent::VisibilityRefreshed {
            color: Color::Red,
            scope: RefreshScope::Full,
        }
    ));

    let drawn = h.renderer.log.borrow();
    let red_frame = drawn
        .iter()
        .position(|drawn| matches!(drawn, Drawn::Frame { color: Color::Red, .. }))
        .unwrap();
    assert_eq!(drawn[red_frame - 1], Drawn::Hidden);
    assert_eq!(
        h.dialogs.log.borrow().announcements,
        vec![Color::Blue, Color::Red]
    );
}

#[tokio::test]
async fn test_hot_seat_game_without_computers_keeps_going() {
    let world = world_with(&[(Color::Blue, Control::Human), (Color::Red, Control::Human)]);
    let mut h = harness(world, ScriptedInput::keys(&['e', 'e']), RecordingDialogs::default());
    let mut turns = h.scheduler.events().subscribe(Topic::Turn);

    let result = h.scheduler.run_game_loop(false).await.unwrap();

    assert_eq!(result, TurnResult::Quit);
    assert_eq!(
        turns_started(&drain(&mut turns)),
        vec![Color::Blue, Color::Red, Color::Blue]
    );
    let drawn = h.renderer.log.borrow();
    assert!(drawn
        .iter()
        .any(|drawn| matches!(drawn, Drawn::Frame { color: Color::Red, .. })));
}

#[tokio::test]
async fn test_end_turn_asks_while_heroes_can_move() {
    let world = world_with(&[(Color::Blue, Control::Human), (Color::Red, Control::Ai)]);
    let (world, _) = with_hero(world, Color::Blue);
    let mut h = harness(
        world,
        ScriptedInput::keys(&['e', 'e']),
        RecordingDialogs::answering(&[false, true]),
    );
    let mut turns = h.scheduler.events().subscribe(Topic::Turn);

    h.scheduler.run_game_loop(false).await.unwrap();

    let confirms = h.dialogs.log.borrow().confirms.clone();
    assert_eq!(confirms.len(), 2);
    assert!(confirms[0].starts_with("One or more heroes may still move"));
    let ended: Vec<_> = drain(&mut turns)
        .into_iter()
        .filter(|event| {
            matches!(
                event,
                Event::Turn(TurnEvent::TurnEnded {
                    color: Color::Blue,
                    result: TurnResult::EndTurn,
                })
            )
        })
        .collect();
    assert_eq!(ended.len(), 1);
}

#[tokio::test]
async fn test_autosave_at_day_begin_happens_before_any_input() {
    let world = world_with(&[(Color::Blue, Control::Human), (Color::Red, Control::Ai)]);
    let config = quiet_config().with_autosave(true, true);
    let h = harness_with(
        world,
        ScriptedInput::keys(&[]),
        RecordingDialogs::default(),
        config,
        InMemorySaveRepository::new(),
    );
    let Harness {
        mut scheduler,
        saves,
        ..
    } = h;

    assert_eq!(scheduler.run_game_loop(false).await.unwrap(), TurnResult::Quit);

    let snapshot = saves.load(SaveSlot::Autosave).unwrap().unwrap();
    assert_eq!(snapshot.cursor.current, Some(Color::Blue));
    assert_eq!(snapshot.day(), 1);
}

#[tokio::test]
async fn test_autosave_at_day_end_waits_for_end_turn() {
    let config = quiet_config().with_autosave(true, false);
    let world = || world_with(&[(Color::Blue, Control::Human), (Color::Red, Control::Ai)]);

    let mut quitter = harness_with(
        world(),
        ScriptedInput::keys(&[]),
        RecordingDialogs::default(),
        config.clone(),
        InMemorySaveRepository::new(),
    );
    quitter.scheduler.run_game_loop(false).await.unwrap();
    assert!(!quitter.saves.exists(SaveSlot::Autosave));

    let mut finisher = harness_with(
        world(),
        ScriptedInput::keys(&['e']),
        RecordingDialogs::default(),
        config,
        InMemorySaveRepository::new(),
    );
    finisher.scheduler.run_game_loop(false).await.unwrap();
    assert!(finisher.saves.exists(SaveSlot::Autosave));
}

#[tokio::test]
async fn test_digging_reports_the_ultimate_artifact_then_needs_a_new_day() {
    let world = world_with(&[(Color::Blue, Control::Human), (Color::Red, Control::Ai)]);
    let (mut world, hero) = with_hero(world, Color::Blue);
    world.ultimate_artifact = Some(Position::new(5, 5));
    let mut h = harness(world, ScriptedInput::keys(&['d', 'd']), RecordingDialogs::default());

    h.scheduler.run_game_loop(false).await.unwrap();

    let messages = h.dialogs.log.borrow().messages.clone();
    assert_eq!(messages.len(), 2);
    assert!(messages[0].contains("uncovered the Ultimate Artifact"));
    assert_eq!(
        messages[1],
        "Digging for artifacts requires a whole day, try again tomorrow."
    );
    assert_eq!(
        h.scheduler.world().hero(hero).unwrap().artifacts,
        vec![ArtifactId::ULTIMATE]
    );
}

#[tokio::test]
async fn test_status_panel_takes_clicks_over_the_hidden_interface_map() {
    let world = world_with(&[(Color::Blue, Control::Human), (Color::Red, Control::Ai)]);
    let config = quiet_config().with_hidden_interface(true);
    let input = ScriptedInput::new([Step::Now(vec![InputEvent::click(60, 20)])]);
    let mut h = harness_with(
        world,
        input,
        RecordingDialogs::default(),
        config,
        InMemorySaveRepository::new(),
    );
    let mut events = h.scheduler.events().subscribe(Topic::Adventure);

    h.scheduler.run_game_loop(false).await.unwrap();

    let consumers: Vec<_> = adventure(drain(&mut events))
        .into_iter()
        .filter_map(|event| match event {
            AdventureEvent::InputDispatched { consumer, .. } => Some(consumer),
            _ => None,
        })
        .collect();
    assert_eq!(consumers, vec![PanelKind::Status]);
}

#[tokio::test]
async fn test_quit_request_stops_before_the_first_turn() {
    let world = world_with(&[(Color::Blue, Control::Human), (Color::Red, Control::Ai)]);
    let mut h = harness(world, ScriptedInput::keys(&['e']), RecordingDialogs::default());
    let mut turns = h.scheduler.events().subscribe(Topic::Turn);

    let quit = h.scheduler.quit_handle();
    quit.request();
    let result = h.scheduler.run_game_loop(false).await.unwrap();

    assert_eq!(result, TurnResult::Quit);
    assert!(quit.is_requested());
    assert!(turns_started(&drain(&mut turns)).is_empty());
    assert!(h.renderer.log.borrow().is_empty());
}

#[test]
fn test_builder_reports_the_missing_collaborator() {
    let built = TurnScheduler::builder()
        .world(world_with(&[(Color::Blue, Control::Human)]))
        .saves(Arc::new(InMemorySaveRepository::new()))
        .input(ScriptedInput::keys(&[]))
        .renderer(RecordingRenderer::default())
        .dialogs(RecordingDialogs::default())
        .build();

    assert!(matches!(
        built,
        Err(RuntimeError::MissingCollaborator {
            kind: CollaboratorKind::Ai
        })
    ));
}
