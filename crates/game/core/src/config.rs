/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Hero walking speed on the 1..=10 scale of the options menu.
    pub hero_speed: u8,
    /// Days a kingdom may hold heroes without any castle before they leave.
    pub lost_town_days: u32,
}

impl GameConfig {
    // ===== compile-time constants =====
    /// Animation budget of a single tile transition, in frame units.
    pub const FRAMES_PER_TILE: u32 = 32;
    /// Frame units consumed between two walk-cycle sprites.
    pub const FRAMES_PER_SPRITE: u32 = 4;
    /// Adventure map tile edge in pixels.
    pub const TILE_SIZE: i32 = 32;
    pub const SPRITES_PER_DIRECTION: u32 = 9;
    pub const ARTIFACT_BAG_CAPACITY: usize = 14;
    pub const MIN_HERO_SPEED: u8 = 1;
    pub const MAX_HERO_SPEED: u8 = 10;
    pub const DEFAULT_HERO_MOVE_POINTS: u32 = 1500;
    pub const DEFAULT_HERO_SCOUT: u32 = 2;
    pub const DEFAULT_CASTLE_SCOUT: u32 = 3;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_HERO_SPEED: u8 = 5;
    pub const DEFAULT_LOST_TOWN_DAYS: u32 = 7;

    /// Milliseconds between hero animation ticks at speed 5.
    const BASE_HERO_DELAY_MS: i64 = 40;
    const HERO_DELAY_STEP_MS: i64 = 8;

    pub fn new() -> Self {
        Self {
            hero_speed: Self::DEFAULT_HERO_SPEED,
            lost_town_days: Self::DEFAULT_LOST_TOWN_DAYS,
        }
    }

    #[must_use]
    pub fn with_hero_speed(mut self, hero_speed: u8) -> Self {
        self.hero_speed = hero_speed.clamp(Self::MIN_HERO_SPEED, Self::MAX_HERO_SPEED);
        self
    }

    #[must_use]
    pub fn with_lost_town_days(mut self, lost_town_days: u32) -> Self {
        self.lost_town_days = lost_town_days;
        self
    }

    /// Frame units removed per animation tick. Always divides [`Self::FRAMES_PER_TILE`].
    pub fn speed_multiplier(&self) -> u32 {
        match self.hero_speed {
            0..=3 => 1,
            4..=6 => 2,
            7..=9 => 4,
            _ => 8,
        }
    }

    /// Delay between hero animation ticks.
    pub fn hero_delay_ms(&self) -> u64 {
        let speed = i64::from(self.hero_speed);
        let delay = Self::BASE_HERO_DELAY_MS
            - (speed - i64::from(Self::DEFAULT_HERO_SPEED)) * Self::HERO_DELAY_STEP_MS;
        delay.max(1) as u64
    }

    /// Number of animation ticks one tile takes at the configured speed.
    pub fn ticks_per_tile(&self) -> u32 {
        Self::FRAMES_PER_TILE / self.speed_multiplier()
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiplier_divides_the_tile_budget() {
        for speed in GameConfig::MIN_HERO_SPEED..=GameConfig::MAX_HERO_SPEED {
            let config = GameConfig::new().with_hero_speed(speed);
            assert_eq!(
                GameConfig::FRAMES_PER_TILE % config.speed_multiplier(),
                0,
                "speed {speed}"
            );
        }
    }

    #[test]
    fn faster_speeds_shorten_the_delay() {
        let slow = GameConfig::new().with_hero_speed(1);
        let normal = GameConfig::new();
        let fast = GameConfig::new().with_hero_speed(10);

        assert_eq!(normal.hero_delay_ms(), 40);
        assert_eq!(slow.hero_delay_ms(), 72);
        assert_eq!(fast.hero_delay_ms(), 1);
        assert_eq!(fast.ticks_per_tile(), 4);
        assert_eq!(slow.ticks_per_tile(), 32);
    }
}
