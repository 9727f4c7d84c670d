//! Adventure-map rules that mutate the [`World`](crate::state::World).
//!
//! Everything here is synchronous and deterministic; timers, input and
//! rendering belong to the runtime that drives these functions.
mod actions;
mod animation;
mod fog;
mod movement;
mod turns;

pub use actions::{ActionError, ActionReport, DigOutcome, apply_tile_action, dig};
pub use animation::{Arrival, HeroMotion, HeroMovementAnimator, MotionPhase, TickOutcome};
pub use fog::{FogDirections, VisibilityMask, VisibilityPolicy, fog_directions};
pub use movement::{MoveError, Step, plan_route, validate_step};
pub use turns::turn_order;
