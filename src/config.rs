use std::str::FromStr;

use thiserror::Error;

use crate::input::ToggleMode;
use crate::rule_set::RuleSetError;
use crate::rule_set::RuleSet;
use crate::ScreenSize;

/// Cell edge length of the windowed layout, in pixels
pub const CELL_SIZE: ScreenSize = 10;

/// Number of running frames per generation. Lower value means faster updates.
pub const UPDATE_SPEED: u32 = 1;

/// Probability of a cell being alive after a Randomize
pub const RANDOM_DENSITY: f64 = 0.2;

pub const WINDOW_TITLE: &str = "Game of Life";

/// Environment variables read by [`Config::with_env`]
pub const ENV_RULE: &str = "LIFE_RULE";
pub const ENV_TICK_EVERY: &str = "LIFE_TICK_EVERY";
pub const ENV_DENSITY: &str = "LIFE_DENSITY";
pub const ENV_CELL_SIZE: &str = "LIFE_CELL_SIZE";
pub const ENV_TOGGLE: &str = "LIFE_TOGGLE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key}: cannot parse \"{value}\"")]
    Parse { key: &'static str, value: String },

    #[error("{key}: {source}")]
    Rule {
        key: &'static str,
        #[source]
        source: RuleSetError,
    },

    #[error("{key} must be at least 1")]
    Zero { key: &'static str },

    #[error("{key}: density {value} is outside of [0, 1]")]
    Density { key: &'static str, value: f64 },
}

/// Size and placement of the control buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonLayout {
    pub width: ScreenSize,
    pub height: ScreenSize,

    /// Distance between the top of the buttons and the bottom of the viewport
    pub bottom_margin: ScreenSize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Viewport width at startup, in pixels
    pub width: ScreenSize,

    /// Viewport height at startup, in pixels
    pub height: ScreenSize,

    pub cell_size: ScreenSize,
    pub tick_every: u32,
    pub density: f64,
    pub rule: RuleSet,
    pub buttons: ButtonLayout,
    pub toggle_mode: ToggleMode,
    pub title: String,
}

impl Default for Config {
    /// The windowed layout: 1200x900 pixels, 10 pixel cells and 120x30 buttons.
    fn default() -> Self {
        Self {
            width: 1200,
            height: 900,
            cell_size: CELL_SIZE,
            tick_every: UPDATE_SPEED,
            density: RANDOM_DENSITY,
            rule: RuleSet::default(),
            buttons: ButtonLayout {
                width: 120,
                height: 30,
                bottom_margin: 50,
            },
            toggle_mode: ToggleMode::default(),
            title: WINDOW_TITLE.to_string(),
        }
    }
}

impl Config {
    /// Layout for a terminal, where every character cell is one pixel and one life cell.
    pub fn terminal(width: ScreenSize, height: ScreenSize) -> Self {
        Self {
            width,
            height,
            cell_size: 1,
            tick_every: 3,
            buttons: ButtonLayout {
                width: 14,
                height: 1,
                bottom_margin: 2,
            },
            ..Self::default()
        }
    }

    /// Apply overrides from the process environment.
    pub fn with_env(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`, which maps a variable name to its value if set.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_RULE) {
            self.rule = value.parse().map_err(|source| ConfigError::Rule {
                key: ENV_RULE,
                source,
            })?;
        }

        if let Some(value) = lookup(ENV_TICK_EVERY) {
            self.tick_every = parse(ENV_TICK_EVERY, &value)?;
        }

        if let Some(value) = lookup(ENV_DENSITY) {
            self.density = parse(ENV_DENSITY, &value)?;
        }

        if let Some(value) = lookup(ENV_CELL_SIZE) {
            self.cell_size = parse(ENV_CELL_SIZE, &value)?;
        }

        if let Some(value) = lookup(ENV_TOGGLE) {
            self.toggle_mode = parse(ENV_TOGGLE, &value)?;
        }

        self.validate()?;

        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_every == 0 {
            return Err(ConfigError::Zero {
                key: ENV_TICK_EVERY,
            });
        }

        if self.cell_size == 0 {
            return Err(ConfigError::Zero { key: ENV_CELL_SIZE });
        }

        if !(0.0..=1.0).contains(&self.density) {
            return Err(ConfigError::Density {
                key: ENV_DENSITY,
                value: self.density,
            });
        }

        Ok(())
    }
}

fn parse<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Parse {
        key,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;

    use super::Config;
    use super::ConfigError;
    use crate::input::ToggleMode;
    use crate::rule_set::B3S23;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_match_windowed_layout() {
        let config = Config::default();

        assert_eq!((config.width, config.height), (1200, 900));
        assert_eq!(config.cell_size, 10);
        assert_eq!(config.tick_every, 1);
        assert_eq!(config.density, 0.2);
        assert_eq!(config.rule, B3S23);
        assert_eq!(config.toggle_mode, ToggleMode::EveryFrame);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn no_overrides_is_identity() {
        let config = Config::terminal(80, 24).with_overrides(lookup(&[])).unwrap();

        assert_eq!(config, Config::terminal(80, 24));
    }

    #[test]
    fn overrides_apply() {
        let config = Config::default()
            .with_overrides(lookup(&[
                ("LIFE_RULE", "B36/S23"),
                ("LIFE_TICK_EVERY", " 4 "),
                ("LIFE_DENSITY", "0.5"),
                ("LIFE_CELL_SIZE", "2"),
                ("LIFE_TOGGLE", "edge"),
            ]))
            .unwrap();

        assert_eq!(config.rule.to_string(), "B36/S23");
        assert_eq!(config.tick_every, 4);
        assert_eq!(config.density, 0.5);
        assert_eq!(config.cell_size, 2);
        assert_eq!(config.toggle_mode, ToggleMode::RisingEdge);
    }

    #[test]
    fn invalid_overrides_are_rejected() {
        let err = Config::default()
            .with_overrides(lookup(&[("LIFE_TICK_EVERY", "0")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Zero { .. }));

        let err = Config::default()
            .with_overrides(lookup(&[("LIFE_DENSITY", "1.5")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Density { .. }));

        let err = Config::default()
            .with_overrides(lookup(&[("LIFE_CELL_SIZE", "ten")]))
            .unwrap_err();
        assert_eq!(err.to_string(), "LIFE_CELL_SIZE: cannot parse \"ten\"");

        let err = Config::default()
            .with_overrides(lookup(&[("LIFE_RULE", "23/3")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Rule { .. }));
    }
}
