//! Brick Breaker entry point
//!
//! Headless driver: plays the clock, input and render collaborators without a
//! window. The simulation runs on its own thread and only hands completed
//! frames (events and snapshots) to the reporting side.

use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, anyhow};
use clap::Parser;

use brick_breaker::Settings;
use brick_breaker::consts::{MAX_SUBSTEPS, SIM_DT};
use brick_breaker::sim::{GameEvent, GameState, Snapshot, TickInput, tick};

/// Paddle stops chasing the ball inside this many pixels
const AUTOPILOT_DEAD_ZONE: f32 = 4.0;

#[derive(Debug, Clone, Parser)]
#[command(name = "brick-breaker", about = "Run the brick-breaker simulation headless")]
struct Args {
    /// JSON settings file (built-in defaults when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of ticks to simulate
    #[arg(long, default_value_t = 3600)]
    ticks: u64,

    /// Steer the paddle toward the ball
    #[arg(long)]
    autopilot: bool,

    /// Print a JSON snapshot every N ticks (0 = final snapshot only)
    #[arg(long, default_value_t = 0)]
    snapshot_every: u64,

    /// Pace ticks against the wall clock instead of running flat out
    #[arg(long)]
    realtime: bool,
}

/// A completed frame crossing from the simulation thread
enum Frame {
    Events { tick: u64, events: Vec<GameEvent> },
    Snapshot(Snapshot),
}

/// Fixed-timestep pacing
struct Clock {
    realtime: bool,
    accumulator: f32,
    last: Instant,
}

impl Clock {
    fn new(realtime: bool) -> Self {
        Self {
            realtime,
            accumulator: 0.0,
            last: Instant::now(),
        }
    }

    /// How many ticks to run now
    fn due_ticks(&mut self) -> u32 {
        if !self.realtime {
            return 1;
        }

        let now = Instant::now();
        self.accumulator += now.duration_since(self.last).as_secs_f32();
        self.last = now;

        let mut due = 0;
        while self.accumulator >= SIM_DT && due < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            due += 1;
        }
        if due == MAX_SUBSTEPS {
            // Drop the backlog instead of spiraling
            self.accumulator = 0.0;
        }
        if due == 0 {
            thread::sleep(Duration::from_secs_f32(SIM_DT - self.accumulator));
        }
        due
    }
}

/// Chase the ball with the paddle center
fn autopilot(state: &GameState) -> TickInput {
    let dx = state.ball.pos.x - state.paddle.center_x();
    TickInput {
        left: dx < -AUTOPILOT_DEAD_ZONE,
        right: dx > AUTOPILOT_DEAD_ZONE,
    }
}

fn simulate(mut state: GameState, args: Args, tx: mpsc::Sender<Frame>) {
    let mut clock = Clock::new(args.realtime);

    while state.time_ticks < args.ticks {
        for _ in 0..clock.due_ticks() {
            if state.time_ticks >= args.ticks {
                break;
            }

            let input = if args.autopilot {
                autopilot(&state)
            } else {
                TickInput::default()
            };
            tick(&mut state, &input);

            if !state.events().is_empty() {
                let frame = Frame::Events {
                    tick: state.time_ticks,
                    events: state.events().to_vec(),
                };
                if tx.send(frame).is_err() {
                    return;
                }
            }

            if args.snapshot_every > 0 && state.time_ticks % args.snapshot_every == 0 {
                if tx.send(Frame::Snapshot(state.snapshot())).is_err() {
                    return;
                }
            }
        }
    }

    let _ = tx.send(Frame::Snapshot(state.snapshot()));
}

#[derive(Debug, Default)]
struct Stats {
    bricks_destroyed: u64,
    paddle_hits: u64,
    wall_bounces: u64,
    rounds_lost: u64,
}

impl Stats {
    fn record(&mut self, tick: u64, events: &[GameEvent]) {
        for event in events {
            match *event {
                GameEvent::PaddleHit => self.paddle_hits += 1,
                GameEvent::WallBounce { .. } => self.wall_bounces += 1,
                GameEvent::BrickDestroyed { row, col, face } => {
                    self.bricks_destroyed += 1;
                    log::debug!("tick {tick}: brick ({row}, {col}) hit on {face:?}");
                }
                GameEvent::RoundLost { round } => {
                    self.rounds_lost += 1;
                    log::info!("tick {tick}: round {round} lost");
                }
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let settings = match &args.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    let state = GameState::new(settings).context("invalid settings")?;

    log::info!(
        "Brick Breaker starting: {}x{} grid, {} ticks{}",
        state.grid.rows(),
        state.grid.cols(),
        args.ticks,
        if args.autopilot { ", autopilot" } else { "" }
    );

    let (tx, rx) = mpsc::channel();
    let sim_args = args.clone();
    let sim = thread::Builder::new()
        .name("simulation".into())
        .spawn(move || simulate(state, sim_args, tx))
        .context("spawning simulation thread")?;

    let mut stats = Stats::default();
    for frame in rx {
        match frame {
            Frame::Events { tick, events } => stats.record(tick, &events),
            Frame::Snapshot(snapshot) => {
                println!("{}", serde_json::to_string(&snapshot)?);
            }
        }
    }

    sim.join()
        .map_err(|_| anyhow!("simulation thread panicked"))?;

    log::info!(
        "Done: {} bricks destroyed, {} paddle hits, {} wall bounces, {} rounds lost",
        stats.bricks_destroyed,
        stats.paddle_hits,
        stats.wall_bounces,
        stats.rounds_lost
    );
    Ok(())
}
