//! Hero interactions with the adventure map: arrival actions and digging.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{ArtifactId, CastleId, Color, HeroId, Position, TileAction, World, WorldError};

/// Player-facing failures of a single adventure-map command.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    #[error("No hero is selected.")]
    NoHeroSelected,

    #[error("Try looking on land!!!")]
    DigOnWater,

    #[error("Digging for artifacts requires a whole day, try again tomorrow.")]
    DigNeedsFullDay,

    #[error("Searching for the Ultimate Artifact is fruitless. Your hero could not carry it even if it were found - all the artifact slots are full.")]
    BagFull,

    #[error(transparent)]
    World(#[from] WorldError),
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ActionError::NoHeroSelected => ErrorSeverity::Validation,
            ActionError::DigOnWater | ActionError::DigNeedsFullDay | ActionError::BagFull => {
                ErrorSeverity::Recoverable
            }
            ActionError::World(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ActionError::NoHeroSelected => "ACTION_NO_HERO",
            ActionError::DigOnWater => "ACTION_DIG_ON_WATER",
            ActionError::DigNeedsFullDay => "ACTION_DIG_NEEDS_FULL_DAY",
            ActionError::BagFull => "ACTION_BAG_FULL",
            ActionError::World(error) => error.error_code(),
        }
    }
}

/// What happened when a hero triggered a tile action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionReport {
    Nothing,
    Gold { amount: u32 },
    Artifact { artifact: ArtifactId },
    /// The artifact stayed on the ground.
    ArtifactLeft { artifact: ArtifactId },
    CastleVisited { castle: CastleId },
    CastleCaptured { castle: CastleId, from: Option<Color> },
    Event { message: String },
}

impl ActionReport {
    /// Line shown to the player, if the action deserves one.
    pub fn message(&self) -> Option<String> {
        match self {
            ActionReport::Nothing | ActionReport::CastleVisited { .. } => None,
            ActionReport::Gold { amount } => Some(format!("You found {amount} gold.")),
            ActionReport::Artifact { artifact } => {
                Some(format!("You found artifact #{}.", artifact.0))
            }
            ActionReport::ArtifactLeft { .. } => {
                Some("You cannot pick up this artifact, you already have a full load!".into())
            }
            ActionReport::CastleCaptured { .. } => Some("The castle is yours.".into()),
            ActionReport::Event { message } => Some(message.clone()),
        }
    }
}

/// Applies the object on `position` to `hero`. One-shot objects are removed.
pub fn apply_tile_action(
    world: &mut World,
    hero: HeroId,
    position: Position,
) -> Result<ActionReport, WorldError> {
    let Some(action) = world.map.tile(position).and_then(|tile| tile.action.clone()) else {
        return Ok(ActionReport::Nothing);
    };
    let owner = world.hero(hero)?.owner;

    let report = match &action {
        TileAction::Resource { gold } => {
            if let Some(kingdom) = owner.and_then(|color| world.kingdom_mut(color)) {
                kingdom.gold += gold;
            }
            ActionReport::Gold { amount: *gold }
        }
        TileAction::Artifact(artifact) => {
            let walker = world.hero_mut(hero)?;
            if walker.is_bag_full() {
                return Ok(ActionReport::ArtifactLeft {
                    artifact: *artifact,
                });
            }
            walker.artifacts.push(*artifact);
            ActionReport::Artifact {
                artifact: *artifact,
            }
        }
        TileAction::Castle(castle) => {
            let current = world.castle(*castle)?.owner;
            let friendly = match (current, owner) {
                (Some(current), Some(owner)) => {
                    world.kingdom(owner).is_some_and(|kingdom| kingdom.is_friend(current))
                }
                _ => false,
            };
            if friendly || owner.is_none() {
                ActionReport::CastleVisited { castle: *castle }
            } else {
                let from = world.transfer_castle(*castle, owner)?;
                ActionReport::CastleCaptured {
                    castle: *castle,
                    from,
                }
            }
        }
        TileAction::Event { message } => ActionReport::Event {
            message: message.clone(),
        },
    };

    if action.is_consumed_on_visit()
        && let Some(tile) = world.map.tile_mut(position)
    {
        tile.action = None;
    }
    Ok(report)
}

/// Result of a successful dig.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DigOutcome {
    Found(ArtifactId),
    Nothing,
}

/// Spends the hero's whole day digging at its feet.
pub fn dig(world: &mut World, hero: HeroId) -> Result<DigOutcome, ActionError> {
    let ultimate = world.ultimate_artifact;
    let walker = world.hero(hero)?;
    let on_water = world
        .map
        .tile(walker.position)
        .is_some_and(|tile| tile.terrain.is_water());
    if on_water {
        return Err(ActionError::DigOnWater);
    }
    if !walker.has_full_move_points() {
        return Err(ActionError::DigNeedsFullDay);
    }
    if walker.is_bag_full() {
        return Err(ActionError::BagFull);
    }

    let position = walker.position;
    let walker = world.hero_mut(hero)?;
    walker.move_points = 0;
    if ultimate == Some(position) {
        walker.artifacts.push(ArtifactId::ULTIMATE);
        world.ultimate_artifact = None;
        return Ok(DigOutcome::Found(ArtifactId::ULTIMATE));
    }
    Ok(DigOutcome::Nothing)
}
