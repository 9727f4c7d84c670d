//! Runtime configuration and its environment loader.

use std::env;
use std::time::Duration;

use game_core::{GameConfig, VisibilityPolicy};

/// Settings of the turn loop, shared by the scheduler and the human turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub game: GameConfig,
    pub autosave: AutosaveConfig,
    /// Restore each color's last focus when a saved game resumes.
    pub remember_last_focus: bool,
    pub scroll_delay_ms: u64,
    /// Start with floating panels over a full-screen map.
    pub hide_interface: bool,
    /// The computer drives human slots; computer turns show the humans' map.
    pub auto_control: bool,
    /// Enables cheat keys such as revealing the map.
    pub debug: bool,
    pub event_buffer_size: usize,
    pub screen: ScreenConfig,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AutosaveConfig {
    pub enabled: bool,
    /// Save when a human turn begins instead of when it ends.
    pub at_day_begin: bool,
}

/// Initial screen size in terminal cells. Resize events replace it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenConfig {
    pub width: u16,
    pub height: u16,
}

impl RuntimeConfig {
    pub const DEFAULT_SCROLL_DELAY_MS: u64 = 30;
    pub const DEFAULT_EVENT_BUFFER: usize = 256;

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `KINGDOMS_AUTOSAVE` - Autosave every human turn (default: true)
    /// - `KINGDOMS_AUTOSAVE_DAY_BEGIN` - Autosave at turn start, not end (default: false)
    /// - `KINGDOMS_REMEMBER_FOCUS` - Restore last focus on resume (default: true)
    /// - `KINGDOMS_HERO_SPEED` - Hero speed 1..=10 (default: 5)
    /// - `KINGDOMS_SCROLL_DELAY_MS` - Edge scroll delay (default: 30)
    /// - `KINGDOMS_HIDE_INTERFACE` - Floating panels (default: false)
    /// - `KINGDOMS_AUTO_CONTROL` - Show computer turns on the human map (default: false)
    /// - `KINGDOMS_DEBUG` - Cheat keys (default: false)
    /// - `KINGDOMS_EVENT_BUFFER` - Event channel capacity per topic (default: 256)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(enabled) = read_env_bool("KINGDOMS_AUTOSAVE") {
            config.autosave.enabled = enabled;
        }
        if let Some(at_day_begin) = read_env_bool("KINGDOMS_AUTOSAVE_DAY_BEGIN") {
            config.autosave.at_day_begin = at_day_begin;
        }
        if let Some(remember) = read_env_bool("KINGDOMS_REMEMBER_FOCUS") {
            config.remember_last_focus = remember;
        }
        if let Some(speed) = read_env::<u8>("KINGDOMS_HERO_SPEED") {
            config.game = config.game.with_hero_speed(speed);
        }
        if let Some(delay) = read_env::<u64>("KINGDOMS_SCROLL_DELAY_MS") {
            config.scroll_delay_ms = delay.max(1);
        }
        if let Some(hide) = read_env_bool("KINGDOMS_HIDE_INTERFACE") {
            config.hide_interface = hide;
        }
        if let Some(auto) = read_env_bool("KINGDOMS_AUTO_CONTROL") {
            config.auto_control = auto;
        }
        if let Some(debug) = read_env_bool("KINGDOMS_DEBUG") {
            config.debug = debug;
        }
        if let Some(capacity) = read_env::<usize>("KINGDOMS_EVENT_BUFFER") {
            config.event_buffer_size = capacity.max(1);
        }

        config
    }

    #[must_use]
    pub fn with_game(mut self, game: GameConfig) -> Self {
        self.game = game;
        self
    }

    #[must_use]
    pub fn with_autosave(mut self, enabled: bool, at_day_begin: bool) -> Self {
        self.autosave = AutosaveConfig {
            enabled,
            at_day_begin,
        };
        self
    }

    #[must_use]
    pub fn with_screen(mut self, width: u16, height: u16) -> Self {
        self.screen = ScreenConfig { width, height };
        self
    }

    #[must_use]
    pub fn with_hidden_interface(mut self, hidden: bool) -> Self {
        self.hide_interface = hidden;
        self
    }

    pub fn visibility_policy(&self) -> VisibilityPolicy {
        if self.auto_control {
            VisibilityPolicy::AutoControl
        } else {
            VisibilityPolicy::Coalition
        }
    }

    pub fn hero_delay(&self) -> Duration {
        Duration::from_millis(self.game.hero_delay_ms())
    }

    pub fn scroll_delay(&self) -> Duration {
        Duration::from_millis(self.scroll_delay_ms)
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            autosave: AutosaveConfig {
                enabled: true,
                at_day_begin: false,
            },
            remember_last_focus: true,
            scroll_delay_ms: Self::DEFAULT_SCROLL_DELAY_MS,
            hide_interface: false,
            auto_control: false,
            debug: false,
            event_buffer_size: Self::DEFAULT_EVENT_BUFFER,
            screen: ScreenConfig {
                width: 80,
                height: 24,
            },
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

fn read_env_bool(key: &str) -> Option<bool> {
    match env::var(key).ok()?.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_the_options_menu() {
        let config = RuntimeConfig::default();
        assert_eq!(config.hero_delay(), Duration::from_millis(40));
        assert_eq!(config.scroll_delay(), Duration::from_millis(30));
        assert_eq!(config.visibility_policy(), VisibilityPolicy::Coalition);
        assert!(config.autosave.enabled && !config.autosave.at_day_begin);
    }

    #[test]
    fn fastest_speed_has_the_shortest_delay() {
        let config = RuntimeConfig::default().with_game(GameConfig::new().with_hero_speed(10));
        assert_eq!(config.hero_delay(), Duration::from_millis(1));
    }
}
