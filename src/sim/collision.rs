//! Collision detection and response for axis-aligned boxes
//!
//! The ball moves a whole step at a time, so a plain overlap test would keep
//! firing while the ball is embedded in a brick. Instead we compare the
//! ball's bounds before and after the move and only report the faces of the
//! target that were *entered* this step.

use glam::Vec2;

use super::geometry::{Direction, Faces, Rect};

/// Faces of `target` that the moving box freshly crossed this step.
///
/// `prev` and `curr` are the mover's bounds before and after the step and
/// `motion` its velocity over the step. At most one face per axis is
/// reported; two faces means a corner was entered on both axes at once.
pub fn fresh_faces(prev: &Rect, curr: &Rect, target: &Rect, motion: Vec2) -> Faces {
    if !curr.overlaps_x(target) || !curr.overlaps_y(target) {
        return Faces::NONE;
    }

    let mut faces = Faces::NONE;

    if !prev.overlaps_x(target) {
        let from_left = if motion.x != 0.0 {
            motion.x > 0.0
        } else {
            // Target moved into us
            prev.center().x < target.center().x
        };
        faces.insert(if from_left { Direction::W } else { Direction::E });
    }

    if !prev.overlaps_y(target) {
        let from_above = if motion.y != 0.0 {
            motion.y > 0.0
        } else {
            prev.center().y < target.center().y
        };
        faces.insert(if from_above { Direction::N } else { Direction::S });
    }

    faces
}

/// Upper bound on the horizontal share of the speed after a spin bounce
const HORIZONTAL_RATIO_LIMIT: f32 = 0.99;

/// Paddle bounce with "english": the paddle's horizontal velocity bleeds
/// into the ball, then the ball is renormalized to `max_speed` heading up.
///
/// `|vx|` is capped at `max_speed * max_horizontal_ratio` first so the
/// vertical component can never collapse to zero (or go NaN). The ratio is
/// itself held inside `[0, 0.99]`, whatever the caller passes.
pub fn spin_bounce(
    vel: Vec2,
    paddle_vel_x: f32,
    english: f32,
    max_speed: f32,
    max_horizontal_ratio: f32,
) -> Vec2 {
    // f32::max drops NaN, so a NaN ratio becomes 0
    let ratio = max_horizontal_ratio.max(0.0).min(HORIZONTAL_RATIO_LIMIT);
    let max_vx = max_speed.abs() * ratio;
    let vx = (vel.x + paddle_vel_x * english).max(-max_vx).min(max_vx);
    let vy = -(max_speed * max_speed - vx * vx).max(f32::MIN_POSITIVE).sqrt();
    Vec2::new(vx, vy)
}
