//! Game state and core simulation types
//!
//! Everything a round owns lives in [`GameState`]; only [`super::tick()`]
//! mutates it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Direction, Rect};
use super::grid::BrickGrid;
use crate::settings::{BallSettings, PaddleSettings, Settings, SettingsError};

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Center
    pub pos: Vec2,
    /// Center at the start of the current tick
    pub prev_pos: Vec2,
    /// Velocity (pixels per tick)
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(settings: &BallSettings) -> Self {
        Self {
            pos: settings.start,
            prev_pos: settings.start,
            vel: settings.velocity,
            radius: settings.radius,
        }
    }

    /// Bounding box at the current position
    pub fn bounds(&self) -> Rect {
        Rect::around_circle(self.pos, self.radius)
    }

    /// Bounding box at the start of the tick
    pub fn prev_bounds(&self) -> Rect {
        Rect::around_circle(self.prev_pos, self.radius)
    }

    /// Displacement over the current tick
    pub fn motion(&self) -> Vec2 {
        self.pos - self.prev_pos
    }

    /// Move one tick, remembering where we came from
    pub fn advance(&mut self) {
        self.prev_pos = self.pos;
        self.pos += self.vel;
    }
}

/// The player's paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal velocity (for momentum control and english on the ball)
    pub vel_x: f32,
}

impl Paddle {
    pub fn new(settings: &PaddleSettings) -> Self {
        Self {
            pos: settings.start,
            size: Vec2::new(settings.width, settings.height),
            vel_x: 0.0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }

    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }
}

/// Things that happened during a tick (for sound/FX/logging collaborators)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball bounced off the paddle's top face
    PaddleHit,
    /// A brick's exposed face was struck and the brick destroyed
    BrickDestroyed { row: usize, col: usize, face: Direction },
    /// Ball bounced off an arena wall (W, E or the ceiling N)
    WallBounce { face: Direction },
    /// Ball left through the bottom; `round` is the round that ended
    RoundLost { round: u32 },
}

/// A live brick as seen by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrickView {
    pub row: usize,
    pub col: usize,
    pub rect: Rect,
}

/// Read-only view of a completed tick, safe to hand to another thread
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub time_ticks: u64,
    pub round: u32,
    pub ball_pos: Vec2,
    pub ball_radius: f32,
    pub paddle: Rect,
    pub bricks: Vec<BrickView>,
    pub live_bricks: usize,
}

/// Complete simulation state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Construction-time configuration, reused on round reset
    settings: Settings,
    /// All-alive layout every round starts from
    fresh_grid: BrickGrid,
    pub grid: BrickGrid,
    pub ball: Ball,
    pub paddle: Paddle,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Current round (1-based)
    pub round: u32,
    /// Events raised by the most recent tick
    #[serde(skip)]
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// Validate the settings and build the first round
    pub fn new(settings: Settings) -> Result<Self, SettingsError> {
        settings.validate()?;
        let fresh_grid = new_grid(&settings)?;

        Ok(Self {
            ball: Ball::new(&settings.ball),
            paddle: Paddle::new(&settings.paddle),
            grid: fresh_grid.clone(),
            fresh_grid,
            settings,
            time_ticks: 0,
            round: 1,
            events: Vec::new(),
        })
    }

    /// Throw the round away: fresh grid, ball and paddle back at spawn
    pub fn reset_round(&mut self) {
        self.grid.clone_from(&self.fresh_grid);
        self.ball = Ball::new(&self.settings.ball);
        self.paddle = Paddle::new(&self.settings.paddle);
        self.round += 1;
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn arena_size(&self) -> Vec2 {
        Vec2::new(self.settings.arena.width, self.settings.arena.height)
    }

    /// Events raised by the last tick
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Render view of the current state
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            time_ticks: self.time_ticks,
            round: self.round,
            ball_pos: self.ball.pos,
            ball_radius: self.ball.radius,
            paddle: self.paddle.rect(),
            bricks: self
                .grid
                .iter()
                .filter(|b| b.is_alive())
                .map(|b| BrickView {
                    row: b.row(),
                    col: b.col(),
                    rect: self.grid.rect_of(b),
                })
                .collect(),
            live_bricks: self.grid.live_count(),
        }
    }
}

fn new_grid(settings: &Settings) -> Result<BrickGrid, SettingsError> {
    BrickGrid::new(
        settings.grid.rows,
        settings.grid.cols,
        settings.grid.brick_size(),
    )
    .map_err(|e| SettingsError::Invalid {
        field: "grid",
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_from_defaults() {
        let state = GameState::new(Settings::default()).unwrap();
        assert_eq!(state.round, 1);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.ball.pos, Vec2::new(300.0, 300.0));
        assert_eq!(state.ball.prev_pos, state.ball.pos);
        assert_eq!(state.ball.vel, Vec2::new(7.0, 4.0));
        assert_eq!(state.paddle.rect(), Rect::new(250.0, 560.0, 100.0, 12.0));
        assert_eq!(state.grid.live_count(), 100);
        assert!(state.events().is_empty());
    }

    #[test]
    fn test_new_state_rejects_invalid_settings() {
        let mut settings = Settings::default();
        settings.ball.radius = -3.0;
        assert!(GameState::new(settings).is_err());
    }

    #[test]
    fn test_ball_advance_records_previous() {
        let mut ball = Ball::new(&BallSettings::default());
        ball.advance();
        assert_eq!(ball.prev_pos, Vec2::new(300.0, 300.0));
        assert_eq!(ball.pos, Vec2::new(307.0, 304.0));
        assert_eq!(ball.prev_bounds(), Rect::new(288.0, 288.0, 24.0, 24.0));
    }

    #[test]
    fn test_reset_round_restores_spawn() {
        let mut state = GameState::new(Settings::default()).unwrap();
        state.grid.get_mut(0, 0).unwrap().kill();
        state.ball.pos = Vec2::new(10.0, 10.0);
        state.paddle.pos.x = 0.0;
        state.paddle.vel_x = 5.0;

        state.reset_round();

        assert_eq!(state.round, 2);
        assert_eq!(state.grid.live_count(), 100);
        assert_eq!(state.ball, Ball::new(&state.settings().ball));
        assert_eq!(state.paddle, Paddle::new(&state.settings().paddle));
    }

    #[test]
    fn test_reset_round_ignores_later_settings_changes() {
        let mut state = GameState::new(Settings::default()).unwrap();
        // A brick size that could never build a grid
        state.settings.grid.brick_width = 0.0;

        for round in 2..5 {
            state.grid.get_mut(0, 0).unwrap().kill();
            state.grid.get_mut(9, 9).unwrap().kill();
            state.reset_round();
            assert_eq!(state.round, round);
            assert_eq!(state.grid.live_count(), 10 * 10);
            assert_eq!(state.grid.brick_size(), Vec2::new(60.0, 20.0));
        }
    }

    #[test]
    fn test_snapshot_skips_dead_bricks() {
        let mut state = GameState::new(Settings::default()).unwrap();
        state.grid.get_mut(9, 5).unwrap().kill();

        let snap = state.snapshot();
        assert_eq!(snap.bricks.len(), 99);
        assert_eq!(snap.live_bricks, 99);
        assert!(!snap.bricks.iter().any(|b| (b.row, b.col) == (9, 5)));
        assert_eq!(snap.ball_radius, 12.0);

        let json = serde_json::to_string(&snap).unwrap();
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snap);
    }
}
