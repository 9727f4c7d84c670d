//! Scripted collaborators shared by the turn loop tests.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use game_core::{Color, Control, Position, Terrain, TileMap, World};
use runtime::{
    AiExecutor, Dialogs, Frame, InputEvent, InputSource, Key, PollOutcome, Renderer, Result,
};
use tokio::sync::watch;
use tokio::time::Instant;

pub enum Step {
    /// Delivered on the next poll.
    Now(Vec<InputEvent>),
    /// Delivered once no timer is armed; until then every poll times out.
    AfterIdle(Vec<InputEvent>),
}

/// Plays back a fixed script, then asks to quit.
pub struct ScriptedInput {
    steps: VecDeque<Step>,
}

impl ScriptedInput {
    pub fn new(steps: impl IntoIterator<Item = Step>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
        }
    }

    pub fn keys(keys: &[char]) -> Self {
        Self::new(
            keys.iter()
                .map(|key| Step::Now(vec![InputEvent::Key(Key::Char(*key))])),
        )
    }
}

#[async_trait]
impl InputSource for ScriptedInput {
    async fn poll(
        &mut self,
        deadline: Option<Instant>,
        quit: &mut watch::Receiver<bool>,
    ) -> Result<PollOutcome> {
        let requested = *quit.borrow();
        if requested {
            return Ok(PollOutcome::Quit);
        }
        let wait = match (self.steps.front(), deadline) {
            (None, _) => return Ok(PollOutcome::Quit),
            (Some(Step::AfterIdle(_)), Some(deadline)) => Some(deadline),
            _ => None,
        };
        if let Some(deadline) = wait {
            tokio::time::sleep_until(deadline).await;
            return Ok(PollOutcome::Timeout);
        }
        match self.steps.pop_front() {
            Some(Step::Now(events)) | Some(Step::AfterIdle(events)) => {
                Ok(PollOutcome::Events(events))
            }
            None => Ok(PollOutcome::Quit),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Drawn {
    Hidden,
    Frame { color: Color, fogged_tiles: usize },
}

/// Keeps a log of every frame.
#[derive(Clone, Default)]
pub struct RecordingRenderer {
    pub log: Rc<RefCell<Vec<Drawn>>>,
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, frame: &Frame<'_>) {
        let (width, height) = (frame.world.map.width() as i32, frame.world.map.height() as i32);
        let fogged_tiles = (0..height)
            .flat_map(|y| (0..width).map(move |x| Position::new(x, y)))
            .filter(|position| frame.is_fogged(*position))
            .count();
        self.log.borrow_mut().push(Drawn::Frame {
            color: frame.color,
            fogged_tiles,
        });
    }

    fn render_hidden(&mut self) {
        self.log.borrow_mut().push(Drawn::Hidden);
    }
}

#[derive(Default)]
pub struct DialogLog {
    pub messages: Vec<String>,
    pub warnings: Vec<String>,
    pub confirms: Vec<String>,
    pub announcements: Vec<Color>,
    /// Answers to confirmations, in order. Empty means yes.
    pub answers: VecDeque<bool>,
}

#[derive(Clone, Default)]
pub struct RecordingDialogs {
    pub log: Rc<RefCell<DialogLog>>,
}

impl RecordingDialogs {
    pub fn answering(answers: &[bool]) -> Self {
        let dialogs = Self::default();
        dialogs.log.borrow_mut().answers = answers.iter().copied().collect();
        dialogs
    }
}

impl Dialogs for RecordingDialogs {
    fn message(&mut self, text: &str) {
        self.log.borrow_mut().messages.push(text.to_string());
    }

    fn warning(&mut self, text: &str) {
        self.log.borrow_mut().warnings.push(text.to_string());
    }

    fn confirm(&mut self, text: &str) -> bool {
        let mut log = self.log.borrow_mut();
        log.confirms.push(text.to_string());
        log.answers.pop_front().unwrap_or(true)
    }

    fn announce_player_turn(&mut self, color: Color) {
        self.log.borrow_mut().announcements.push(color);
    }
}

/// Computer player that only records whose turn it played.
#[derive(Clone, Default)]
pub struct RecordingAi {
    pub turns: Arc<Mutex<Vec<Color>>>,
}

#[async_trait]
impl AiExecutor for RecordingAi {
    async fn run_kingdom_turn(&mut self, _world: &mut World, color: Color) -> Result<()> {
        self.turns.lock().unwrap().push(color);
        Ok(())
    }
}

/// A 20x20 grass map with one castle per kingdom, placed along the diagonal.
pub fn world_with(kingdoms: &[(Color, Control)]) -> World {
    let mut world = World::new(TileMap::new(20, 20, Terrain::Grass));
    for (index, (color, control)) in kingdoms.iter().enumerate() {
        world.add_kingdom(*color, *control).unwrap();
        let spot = 3 * index as i32 + 1;
        world
            .build_castle(Some(*color), format!("{color} keep"), Position::new(spot, 18))
            .unwrap();
    }
    world
}
