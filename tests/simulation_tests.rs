//! End-to-end simulation scenarios through the public API

use std::collections::HashSet;

use brick_breaker::sim::{GameEvent, GameState, TickInput, tick};
use brick_breaker::{Settings, settings::PaddleBounce, settings::PaddleControl};
use glam::Vec2;

fn chase(state: &GameState) -> TickInput {
    let dx = state.ball.pos.x - state.paddle.center_x();
    TickInput {
        left: dx < -4.0,
        right: dx > 4.0,
    }
}

/// Run `ticks` steps checking per-tick invariants; returns bricks destroyed
fn run_checked(
    state: &mut GameState,
    ticks: usize,
    mut input: impl FnMut(&GameState) -> TickInput,
) -> usize {
    let arena = state.arena_size();
    let mut total_destroyed = 0;

    for _ in 0..ticks {
        let before = state.grid.clone();
        let round = state.round;

        let tick_input = input(state);
        tick(state, &tick_input);

        if state.round != round {
            assert_eq!(state.round, round + 1);
            assert_eq!(state.grid.live_count(), state.grid.rows() * state.grid.cols());
            assert_eq!(state.ball.pos, state.settings().ball.start);
            assert_eq!(state.ball.vel, state.settings().ball.velocity);
            assert_eq!(state.paddle.pos, state.settings().paddle.start);
            continue;
        }

        let ball = &state.ball;
        let r = ball.radius;
        assert!(ball.pos.x >= r && ball.pos.x <= arena.x - r, "x out of bounds: {}", ball.pos.x);
        assert!(ball.pos.y >= r, "y above ceiling: {}", ball.pos.y);
        assert!(ball.vel.is_finite());
        assert!(ball.vel.y != 0.0);

        let paddle = state.paddle.rect();
        assert!(paddle.x >= 0.0 && paddle.right() <= arena.x);

        let mut killed = HashSet::new();
        for event in state.events() {
            if let GameEvent::BrickDestroyed { row, col, face } = *event {
                let brick = before.get(row, col).expect("event for brick outside grid");
                assert!(brick.is_alive(), "dead brick ({row}, {col}) hit again");
                assert!(before.is_exposed(brick, face), "internal face ({row}, {col}) {face:?}");
                assert!(state.grid.get(row, col).unwrap().is_dead());
                killed.insert((row, col));
            }
        }
        assert_eq!(killed.len(), before.live_count() - state.grid.live_count());
        total_destroyed += killed.len();
    }

    total_destroyed
}

#[test]
fn test_straight_line_run_without_input() {
    let mut state = GameState::new(Settings::default()).unwrap();
    state.grid.get_mut(9, 5).unwrap().kill();

    run_checked(&mut state, 5000, |_| TickInput::default());

    // The untouched paddle misses, so rounds keep resetting
    assert!(state.round > 1);
}

#[test]
fn test_autopilot_run_destroys_bricks() {
    let mut state = GameState::new(Settings::default()).unwrap();
    state.grid.get_mut(9, 5).unwrap().kill();

    let destroyed = run_checked(&mut state, 5000, chase);

    assert!(destroyed > 0);
}

#[test]
fn test_momentum_and_spin_stay_well_behaved() {
    let mut settings = Settings::default();
    settings.paddle.control = PaddleControl::momentum();
    settings.paddle.bounce = PaddleBounce::spin();
    let mut state = GameState::new(settings).unwrap();

    let mut paddle_hits = 0;
    for _ in 0..3000 {
        let input = chase(&state);
        tick(&mut state, &input);
        if state.events().contains(&GameEvent::PaddleHit) {
            paddle_hits += 1;
            assert!((state.ball.vel.length() - 10.0).abs() < 1e-3);
            assert!(state.ball.vel.y < 0.0);
        }
        assert!(state.ball.vel.is_finite());
        assert!(state.ball.vel.y != 0.0);
    }
    assert!(paddle_hits > 0);
}

#[test]
fn test_round_reset_from_settings_file_json() {
    let json = r#"{ "grid": { "rows": 2, "cols": 5, "brick_width": 120.0 } }"#;
    let mut state = GameState::new(Settings::from_json(json).unwrap()).unwrap();
    assert_eq!(state.grid.live_count(), 10);

    state.grid.get_mut(1, 4).unwrap().kill();
    state.ball.pos = Vec2::new(100.0, 589.0);
    tick(&mut state, &TickInput::default());

    assert_eq!(state.round, 2);
    assert_eq!(state.grid.live_count(), 10);
    assert!(state.events().contains(&GameEvent::RoundLost { round: 1 }));
}

#[test]
fn test_snapshot_crosses_threads() {
    let mut state = GameState::new(Settings::default()).unwrap();
    tick(&mut state, &TickInput::default());
    let expected = state.snapshot();

    let snapshot = std::thread::spawn(move || state.snapshot()).join().unwrap();

    assert_eq!(snapshot, expected);
    assert_eq!(snapshot.time_ticks, 1);
    assert_eq!(snapshot.bricks.len(), 100);
    assert_eq!(snapshot.live_bricks, 100);
}
