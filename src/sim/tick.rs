//! Fixed timestep simulation tick
//!
//! Advances a round by exactly one frame. Velocities are per tick, so the
//! driver never passes a time delta.

use glam::Vec2;

use super::collision::{fresh_faces, spin_bounce};
use super::geometry::{Axis, Direction};
use super::grid::BrickGrid;
use super::state::{Ball, GameEvent, GameState, Paddle};
use crate::settings::{PaddleBounce, PaddleControl};

/// Held direction intents for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
}

impl TickInput {
    /// -1, 0 or 1; holding both cancels out
    pub fn horizontal(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// A brick face that was really struck this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BrickHit {
    row: usize,
    col: usize,
    face: Direction,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();
    state.time_ticks += 1;

    let arena = state.arena_size();
    let control = state.settings().paddle.control;
    let bounce = state.settings().paddle.bounce;

    // Paddle first so the ball sees where it is this frame
    update_paddle(&mut state.paddle, control, input, arena.x);

    state.ball.advance();

    // --- PADDLE ---
    let faces = fresh_faces(
        &state.ball.prev_bounds(),
        &state.ball.bounds(),
        &state.paddle.rect(),
        state.ball.motion(),
    );
    if faces.contains(Direction::N) {
        state.ball.vel = match bounce {
            PaddleBounce::Elastic => Vec2::new(state.ball.vel.x, -state.ball.vel.y.abs()),
            PaddleBounce::Spin {
                english,
                max_speed,
                max_horizontal_ratio,
            } => spin_bounce(
                state.ball.vel,
                state.paddle.vel_x,
                english,
                max_speed,
                max_horizontal_ratio,
            ),
        };
        state.events.push(GameEvent::PaddleHit);
    }

    // --- BRICKS ---
    let hits = brick_hits(&state.grid, &state.ball);
    let mut flip_x = false;
    let mut flip_y = false;
    for hit in &hits {
        match hit.face.axis() {
            Axis::X => flip_x = true,
            Axis::Y => flip_y = true,
        }
        if let Some(brick) = state.grid.get_mut(hit.row, hit.col) {
            if brick.kill() {
                log::debug!(
                    "Brick ({}, {}) destroyed on {:?} face at tick {}",
                    hit.row,
                    hit.col,
                    hit.face,
                    state.time_ticks
                );
            }
        }
        state.events.push(GameEvent::BrickDestroyed {
            row: hit.row,
            col: hit.col,
            face: hit.face,
        });
    }
    // One flip per axis, however many bricks were struck on it
    if flip_x {
        state.ball.vel.x = -state.ball.vel.x;
    }
    if flip_y {
        state.ball.vel.y = -state.ball.vel.y;
    }

    // --- WALLS ---
    bounce_off_walls(&mut state.ball, arena, &mut state.events);

    // --- ROUND LOSS ---
    if state.ball.pos.y + state.ball.radius >= arena.y {
        log::info!(
            "Round {} lost at tick {} ({} bricks left)",
            state.round,
            state.time_ticks,
            state.grid.live_count()
        );
        state.events.push(GameEvent::RoundLost { round: state.round });
        state.reset_round();
    }
}

/// Apply input to the paddle and keep it inside `[0, arena_width - width]`
fn update_paddle(paddle: &mut Paddle, control: PaddleControl, input: &TickInput, arena_width: f32) {
    let dir = input.horizontal();
    let max_x = arena_width - paddle.size.x;

    match control {
        PaddleControl::Direct { speed } => {
            let old_x = paddle.pos.x;
            paddle.pos.x = (old_x + dir * speed).clamp(0.0, max_x);
            paddle.vel_x = paddle.pos.x - old_x;
        }
        PaddleControl::Momentum {
            accel,
            friction,
            max_speed,
            wall_restitution,
        } => {
            paddle.vel_x = ((paddle.vel_x + dir * accel) * friction).clamp(-max_speed, max_speed);
            paddle.pos.x += paddle.vel_x;

            // Knock back off the side walls with damping
            if paddle.pos.x < 0.0 {
                paddle.pos.x = 0.0;
                paddle.vel_x = paddle.vel_x.abs() * wall_restitution;
            } else if paddle.pos.x > max_x {
                paddle.pos.x = max_x;
                paddle.vel_x = -paddle.vel_x.abs() * wall_restitution;
            }
        }
    }
}

/// Every exposed brick face the ball freshly entered this tick.
///
/// Exposure is judged against the grid as it stood before any of this
/// tick's kills, so iteration order never changes the outcome.
fn brick_hits(grid: &BrickGrid, ball: &Ball) -> Vec<BrickHit> {
    let prev = ball.prev_bounds();
    let curr = ball.bounds();
    // The paddle may already have turned `vel` around this tick
    let motion = ball.motion();

    let mut hits = Vec::new();
    for brick in grid.iter().filter(|b| b.is_alive()) {
        let faces = fresh_faces(&prev, &curr, &grid.rect_of(brick), motion);
        for face in faces.iter() {
            // A live neighbor on the other side of this face means we are at
            // an internal seam; the neighbor's outer face is the real wall.
            if grid.is_exposed(brick, face) {
                hits.push(BrickHit {
                    row: brick.row(),
                    col: brick.col(),
                    face,
                });
            }
        }
    }
    hits
}

/// Clamp the ball to the arena interior, bouncing off side walls and ceiling.
/// The floor is open.
fn bounce_off_walls(ball: &mut Ball, arena: Vec2, events: &mut Vec<GameEvent>) {
    let r = ball.radius;

    if ball.pos.x < r {
        ball.pos.x = r;
        ball.vel.x = ball.vel.x.abs();
        events.push(GameEvent::WallBounce { face: Direction::W });
    } else if ball.pos.x > arena.x - r {
        ball.pos.x = arena.x - r;
        ball.vel.x = -ball.vel.x.abs();
        events.push(GameEvent::WallBounce { face: Direction::E });
    }

    if ball.pos.y < r {
        ball.pos.y = r;
        ball.vel.y = ball.vel.y.abs();
        events.push(GameEvent::WallBounce { face: Direction::N });
    }
}
