//! Page configuration. Every field defaults to the values the demos were
//! tuned with; the browser entry point overrides them from the URL query
//! string (`?demo=felix&tick_ms=20`).

use std::str::FromStr;

use thiserror::Error;

/// Largest grid side; every WebGL2 implementation supports 4096² textures.
pub const MAX_GRID_SIDE: u32 = 4096;

/// Browser timers take a signed 32-bit delay.
pub const MAX_INTERVAL_MS: u32 = i32::MAX as u32;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for `{key}`")]
    Invalid { key: String, value: String },
    #[error("`{key}` must be at least {min}")]
    TooSmall { key: &'static str, min: u32 },
    #[error("`{key}` must be at most {max}")]
    TooLarge { key: &'static str, max: u32 },
    #[error("`horizon` must be positive, got {0}")]
    Horizon(f64),
    #[error("unknown demo {0:?}")]
    UnknownDemo(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Demo {
    #[default]
    Snake,
    Felix,
}

impl FromStr for Demo {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "snake" | "tron" => Ok(Demo::Snake),
            "felix" => Ok(Demo::Felix),
            other => Err(ConfigError::UnknownDemo(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub frame_interval_ms: u32,
    pub fps_interval_ms: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: 15,
            fps_interval_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SnakeConfig {
    pub grid_width: u32,
    pub grid_height: u32,
    pub tick_interval_ms: u32,
    pub autopilot: bool,
    /// Ticks a centered autopilot holds a heading before a turn is certain.
    pub autopilot_horizon: f64,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            grid_width: 100,
            grid_height: 60,
            tick_interval_ms: 10,
            autopilot: true,
            autopilot_horizon: 60.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FelixConfig {
    /// Must be same-origin, the texture upload taints otherwise.
    pub image_url: String,
    pub load_timeout_ms: u32,
}

impl Default for FelixConfig {
    fn default() -> Self {
        Self {
            image_url: "felix-why.jpg".to_owned(),
            load_timeout_ms: 10_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub demo: Demo,
    pub render: RenderConfig,
    pub snake: SnakeConfig,
    pub felix: FelixConfig,
}

impl Config {
    /// Applies `key=value` overrides on top of the defaults. Unknown keys are
    /// skipped so pages can carry their own query parameters.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Config::default();
        for (key, value) in pairs {
            config.set(key.as_ref(), value.as_ref())?;
        }
        config.validate()?;
        Ok(config)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "demo" => self.demo = value.parse()?,
            "frame_ms" => self.render.frame_interval_ms = parse(key, value)?,
            "fps_ms" => self.render.fps_interval_ms = parse(key, value)?,
            "width" => self.snake.grid_width = parse(key, value)?,
            "height" => self.snake.grid_height = parse(key, value)?,
            "tick_ms" => self.snake.tick_interval_ms = parse(key, value)?,
            "autopilot" => self.snake.autopilot = parse_flag(key, value)?,
            "horizon" => self.snake.autopilot_horizon = parse(key, value)?,
            "image" => self.felix.image_url = value.to_owned(),
            "image_timeout_ms" => self.felix.load_timeout_ms = parse(key, value)?,
            _ => {}
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        within("frame_ms", self.render.frame_interval_ms, 1, MAX_INTERVAL_MS)?;
        within("fps_ms", self.render.fps_interval_ms, 1, MAX_INTERVAL_MS)?;
        within("width", self.snake.grid_width, 2, MAX_GRID_SIDE)?;
        within("height", self.snake.grid_height, 2, MAX_GRID_SIDE)?;
        within("tick_ms", self.snake.tick_interval_ms, 1, MAX_INTERVAL_MS)?;
        within("image_timeout_ms", self.felix.load_timeout_ms, 1, MAX_INTERVAL_MS)?;
        let horizon = self.snake.autopilot_horizon;
        if !(horizon.is_finite() && horizon > 0.0) {
            return Err(ConfigError::Horizon(horizon));
        }
        Ok(())
    }
}

fn parse<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        key: key.to_owned(),
        value: value.to_owned(),
    })
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key: key.to_owned(),
            value: value.to_owned(),
        }),
    }
}

fn within(key: &'static str, value: u32, min: u32, max: u32) -> Result<(), ConfigError> {
    if value < min {
        return Err(ConfigError::TooSmall { key, min });
    }
    if value > max {
        return Err(ConfigError::TooLarge { key, max });
    }
    Ok(())
}
