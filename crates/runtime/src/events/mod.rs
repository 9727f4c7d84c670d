//! Topic-based event bus for runtime events.
//!
//! The scheduler and the human turn publish what they do; clients, logs, and
//! tests subscribe only to the topics they need. Publishing never blocks and
//! never fails the game loop.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic, drain};
pub use types::{AdventureEvent, RefreshScope, TurnEvent};
