//! Computer opponent for the demo scenario.
use async_trait::async_trait;
use game_core::{Color, World};
use runtime::{AiExecutor, Result};
use tracing::debug;

/// Holds its ground: heroes stay in place and castles keep their owner.
///
/// Enough to exercise turn order, scouting and the victory check without a
/// real strategy.
#[derive(Debug, Default)]
pub struct PassiveAi {
    turns_played: u64,
}

#[async_trait]
impl AiExecutor for PassiveAi {
    async fn run_kingdom_turn(&mut self, world: &mut World, color: Color) -> Result<()> {
        self.turns_played += 1;
        let heroes = world.heroes_of(color).count();
        let castles = world.castles_of(color).count();
        debug!(
            target: "kingdoms::ai",
            %color,
            day = world.day,
            heroes,
            castles,
            turns = self.turns_played,
            "computer kingdom waits"
        );
        tokio::task::yield_now().await;
        Ok(())
    }
}
