//! Simulation settings
//!
//! Every tunable constant of a round: arena, brick grid, ball and paddle.
//! Fixed at construction; there is no runtime reconfiguration. Loaded from
//! JSON by the driver, every field falls back to [`crate::consts`].

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Settings loading / validation failure
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl SettingsError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        SettingsError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Playfield bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaSettings {
    pub width: f32,
    pub height: f32,
}

impl Default for ArenaSettings {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
        }
    }
}

/// Brick grid layout (anchored at the arena's top-left corner)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    pub rows: usize,
    pub cols: usize,
    pub brick_width: f32,
    pub brick_height: f32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            rows: GRID_ROWS,
            cols: GRID_COLS,
            brick_width: BRICK_WIDTH,
            brick_height: BRICK_HEIGHT,
        }
    }
}

impl GridSettings {
    pub fn brick_size(&self) -> Vec2 {
        Vec2::new(self.brick_width, self.brick_height)
    }
}

/// Ball spawn state (velocity in pixels per tick)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallSettings {
    pub radius: f32,
    pub start: Vec2,
    pub velocity: Vec2,
}

impl Default for BallSettings {
    fn default() -> Self {
        Self {
            radius: BALL_RADIUS,
            start: Vec2::new(BALL_START_X, BALL_START_Y),
            velocity: Vec2::new(BALL_START_VX, BALL_START_VY),
        }
    }
}

/// How held input moves the paddle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PaddleControl {
    /// Fixed displacement per tick while a key is held
    Direct { speed: f32 },
    /// Acceleration with friction; side walls knock the paddle back
    Momentum {
        accel: f32,
        friction: f32,
        max_speed: f32,
        wall_restitution: f32,
    },
}

impl Default for PaddleControl {
    fn default() -> Self {
        PaddleControl::Direct {
            speed: PADDLE_SPEED,
        }
    }
}

impl PaddleControl {
    pub fn momentum() -> Self {
        PaddleControl::Momentum {
            accel: PADDLE_ACCEL,
            friction: PADDLE_FRICTION,
            max_speed: PADDLE_MAX_SPEED,
            wall_restitution: PADDLE_WALL_RESTITUTION,
        }
    }
}

/// What happens to the ball when it lands on the paddle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PaddleBounce {
    /// Pure sign flip of vy
    #[default]
    Elastic,
    /// Paddle motion adds english; speed renormalized to `max_speed`
    Spin {
        english: f32,
        max_speed: f32,
        max_horizontal_ratio: f32,
    },
}

impl PaddleBounce {
    pub fn spin() -> Self {
        PaddleBounce::Spin {
            english: SPIN_ENGLISH,
            max_speed: SPIN_MAX_BALL_SPEED,
            max_horizontal_ratio: SPIN_MAX_HORIZONTAL_RATIO,
        }
    }
}

/// Paddle geometry and behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaddleSettings {
    pub width: f32,
    pub height: f32,
    /// Top-left corner at round start
    pub start: Vec2,
    pub control: PaddleControl,
    pub bounce: PaddleBounce,
}

impl Default for PaddleSettings {
    fn default() -> Self {
        Self {
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            start: Vec2::new(PADDLE_START_X, PADDLE_START_Y),
            control: PaddleControl::default(),
            bounce: PaddleBounce::default(),
        }
    }
}

/// Complete simulation settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub arena: ArenaSettings,
    pub grid: GridSettings,
    pub ball: BallSettings,
    pub paddle: PaddleSettings,
}

fn positive(field: &'static str, value: f32) -> Result<(), SettingsError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SettingsError::invalid(
            field,
            format!("must be finite and positive, got {value}"),
        ))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), SettingsError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SettingsError::invalid(
            field,
            format!("must be finite and non-negative, got {value}"),
        ))
    }
}

impl Settings {
    /// Parse settings from JSON (missing fields use defaults) and validate
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Reject configurations that would break the simulation invariants
    pub fn validate(&self) -> Result<(), SettingsError> {
        positive("arena.width", self.arena.width)?;
        positive("arena.height", self.arena.height)?;

        positive("grid.brick_width", self.grid.brick_width)?;
        positive("grid.brick_height", self.grid.brick_height)?;

        let ball = &self.ball;
        positive("ball.radius", ball.radius)?;
        // A ball with no vertical speed never reaches the paddle or the floor
        if !ball.velocity.is_finite() || ball.velocity.y == 0.0 {
            return Err(SettingsError::invalid(
                "ball.velocity",
                "must be finite with a non-zero vertical component",
            ));
        }
        let x_range = ball.radius..=self.arena.width - ball.radius;
        // Spawning on the floor line would lose the round every tick
        let y_range = ball.radius..self.arena.height - ball.radius;
        if !x_range.contains(&ball.start.x) || !y_range.contains(&ball.start.y) {
            return Err(SettingsError::invalid(
                "ball.start",
                format!("({}, {}) is outside the arena interior", ball.start.x, ball.start.y),
            ));
        }

        let paddle = &self.paddle;
        positive("paddle.width", paddle.width)?;
        positive("paddle.height", paddle.height)?;
        if paddle.width > self.arena.width {
            return Err(SettingsError::invalid(
                "paddle.width",
                format!("{} exceeds arena width {}", paddle.width, self.arena.width),
            ));
        }
        let paddle_x_range = 0.0..=self.arena.width - paddle.width;
        if !paddle.start.is_finite() || !paddle_x_range.contains(&paddle.start.x) {
            return Err(SettingsError::invalid(
                "paddle.start",
                format!("x = {} leaves the arena", paddle.start.x),
            ));
        }

        match paddle.control {
            PaddleControl::Direct { speed } => positive("paddle.control.speed", speed)?,
            PaddleControl::Momentum {
                accel,
                friction,
                max_speed,
                wall_restitution,
            } => {
                positive("paddle.control.accel", accel)?;
                positive("paddle.control.max_speed", max_speed)?;
                if !(friction > 0.0 && friction <= 1.0) {
                    return Err(SettingsError::invalid(
                        "paddle.control.friction",
                        format!("must be in (0, 1], got {friction}"),
                    ));
                }
                non_negative("paddle.control.wall_restitution", wall_restitution)?;
            }
        }

        match paddle.bounce {
            PaddleBounce::Elastic => {}
            PaddleBounce::Spin {
                english,
                max_speed,
                max_horizontal_ratio,
            } => {
                non_negative("paddle.bounce.english", english)?;
                positive("paddle.bounce.max_speed", max_speed)?;
                if !(max_horizontal_ratio > 0.0 && max_horizontal_ratio < 1.0) {
                    return Err(SettingsError::invalid(
                        "paddle.bounce.max_horizontal_ratio",
                        format!("must be in (0, 1), got {max_horizontal_ratio}"),
                    ));
                }
            }
        }

        Ok(())
    }
}
