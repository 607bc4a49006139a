//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (velocities are per tick)
//! - Stable iteration order (row-major over the brick grid)
//! - No rendering, input capture or wall-clock dependencies

pub mod collision;
pub mod geometry;
pub mod grid;
pub mod state;
pub mod tick;

pub use collision::{fresh_faces, spin_bounce};
pub use geometry::{Axis, Direction, Faces, Rect, overlaps};
pub use grid::{Brick, BrickGrid, GridError};
pub use state::{Ball, BrickView, GameEvent, GameState, Paddle, Snapshot};
pub use tick::{TickInput, tick};
