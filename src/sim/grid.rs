//! Brick grid
//!
//! A dense `rows x cols` matrix of fixed-size bricks. Bricks are never
//! removed; a destroyed brick keeps its slot with `dead` set so indices stay
//! stable for the lifetime of the grid. Positions are derived from indices.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::geometry::{Direction, Rect};

/// Grid construction failure
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    #[error("invalid brick size {width}x{height}: dimensions must be finite and positive")]
    InvalidBrickSize { width: f32, height: f32 },
}

/// A single destructible cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brick {
    row: usize,
    col: usize,
    dead: bool,
}

impl Brick {
    fn new(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            dead: false,
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn is_alive(&self) -> bool {
        !self.dead
    }

    /// Destroy the brick. One-way; killing a dead brick is a no-op.
    ///
    /// Returns true if this call destroyed it.
    pub fn kill(&mut self) -> bool {
        let was_alive = !self.dead;
        self.dead = true;
        was_alive
    }
}

/// The brick field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrickGrid {
    rows: usize,
    cols: usize,
    /// Cell size shared by every brick
    brick_size: Vec2,
    /// Row-major storage, `rows * cols` entries
    bricks: Vec<Brick>,
}

impl BrickGrid {
    /// Allocate a grid with every brick alive
    pub fn new(rows: usize, cols: usize, brick_size: Vec2) -> Result<Self, GridError> {
        if !brick_size.is_finite() || brick_size.x <= 0.0 || brick_size.y <= 0.0 {
            return Err(GridError::InvalidBrickSize {
                width: brick_size.x,
                height: brick_size.y,
            });
        }

        let mut bricks = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                bricks.push(Brick::new(row, col));
            }
        }

        Ok(Self {
            rows,
            cols,
            brick_size,
            bricks,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn brick_size(&self) -> Vec2 {
        self.brick_size
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Brick> {
        self.index(row, col).map(|i| &self.bricks[i])
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Brick> {
        self.index(row, col).map(move |i| &mut self.bricks[i])
    }

    /// Adjacent brick in `dir`, or `None` past the grid edge
    pub fn neighbor(&self, brick: &Brick, dir: Direction) -> Option<&Brick> {
        let (d_row, d_col) = dir.offset();
        let row = brick.row.checked_add_signed(d_row)?;
        let col = brick.col.checked_add_signed(d_col)?;
        self.get(row, col)
    }

    /// True if the face of `brick` toward `dir` is exposed: nothing alive
    /// sits on the other side of it.
    pub fn is_exposed(&self, brick: &Brick, dir: Direction) -> bool {
        self.neighbor(brick, dir).is_none_or(Brick::is_dead)
    }

    /// AABB of a brick, derived from its indices
    pub fn rect_of(&self, brick: &Brick) -> Rect {
        Rect::new(
            brick.col as f32 * self.brick_size.x,
            brick.row as f32 * self.brick_size.y,
            self.brick_size.x,
            self.brick_size.y,
        )
    }

    /// Every brick in row-major order, dead ones included
    pub fn iter(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter()
    }

    pub fn live_count(&self) -> usize {
        self.bricks.iter().filter(|b| b.is_alive()).count()
    }
}
