//! Brick Breaker - grid brick-breaker simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, brick grid, collisions, tick)
//! - `settings`: Data-driven arena/ball/paddle configuration
//!
//! Rendering, input capture and frame pacing live outside the library. A
//! driver calls [`sim::tick()`] once per frame and draws from
//! [`sim::GameState::snapshot`].

pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};
pub use sim::{GameState, Snapshot, TickInput, tick};

/// Game configuration constants (defaults for [`Settings`])
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz display refresh)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 600.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Brick grid layout (10 x 60 fills the arena width)
    pub const GRID_ROWS: usize = 10;
    pub const GRID_COLS: usize = 10;
    pub const BRICK_WIDTH: f32 = 60.0;
    pub const BRICK_HEIGHT: f32 = 20.0;

    /// Ball defaults (velocity is per tick)
    pub const BALL_RADIUS: f32 = 12.0;
    pub const BALL_START_X: f32 = 300.0;
    pub const BALL_START_Y: f32 = 300.0;
    pub const BALL_START_VX: f32 = 7.0;
    pub const BALL_START_VY: f32 = 4.0;

    /// Paddle defaults - centered near the bottom edge
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 12.0;
    pub const PADDLE_START_X: f32 = 250.0;
    pub const PADDLE_START_Y: f32 = 560.0;
    /// Direct control speed (pixels per tick)
    pub const PADDLE_SPEED: f32 = 8.0;

    /// Momentum control defaults
    pub const PADDLE_ACCEL: f32 = 1.2;
    pub const PADDLE_FRICTION: f32 = 0.9;
    pub const PADDLE_MAX_SPEED: f32 = 12.0;
    pub const PADDLE_WALL_RESTITUTION: f32 = 0.5;

    /// Spin bounce defaults
    pub const SPIN_ENGLISH: f32 = 0.3;
    pub const SPIN_MAX_BALL_SPEED: f32 = 10.0;
    /// Fraction of max speed the horizontal component may reach after spin
    pub const SPIN_MAX_HORIZONTAL_RATIO: f32 = 0.9;
}
