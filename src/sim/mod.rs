//! Snake/Tron simulation: one head walking a fixed grid, stamping each cell
//! it leaves with the tick count so the fragment shader can fade a trail.
//!
//! `Simulation` is the single writer. The render path only ever sees a
//! `SimView`, a borrowed read-only snapshot, so a port to threads needs a
//! lock around the `Simulation` and nothing else.

mod autopilot;
mod direction;
mod grid;

pub use autopilot::{edge_proximity, Autopilot};
pub use direction::Direction;
pub use grid::{Grid, Position};

use rand::Rng;
use tracing::debug;

use crate::config::SnakeConfig;
use crate::input::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    GameOver,
}

/// What a single `step` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Head advanced one cell and the tick counter went up by one.
    Moved,
    /// Next cell was off the field; nothing moved and the game is over.
    HitWall,
}

#[derive(Debug, Clone)]
pub struct Simulation {
    grid: Grid,
    head: Position,
    direction: Direction,
    tick: u32,
    phase: Phase,
    autopilot: Autopilot,
    autopilot_enabled: bool,
    last_update_ms: f64,
}

impl Simulation {
    pub fn new(config: &SnakeConfig, now_ms: f64) -> Self {
        let grid = Grid::new(config.grid_width, config.grid_height);
        Self {
            head: grid.center(),
            grid,
            direction: Direction::Left,
            tick: 0,
            phase: Phase::Running,
            autopilot: Autopilot::new(config.autopilot_horizon),
            autopilot_enabled: config.autopilot,
            last_update_ms: now_ms,
        }
    }

    /// Back to a fresh field. The autopilot flag and its stability counter
    /// survive a restart.
    pub fn reset(&mut self) {
        self.grid.clear();
        self.head = self.grid.center();
        self.direction = Direction::Left;
        self.tick = 0;
        self.phase = Phase::Running;
    }

    /// Advances one tick. A game that ended on the previous tick restarts
    /// first, so game-over is visible for exactly one tick interval.
    pub fn step<R: Rng + ?Sized>(&mut self, now_ms: f64, rng: &mut R) -> StepOutcome {
        if self.phase == Phase::GameOver {
            debug!(tick = self.tick, "restarting after game over");
            self.reset();
        }

        if self.autopilot_enabled {
            self.direction = self.autopilot.decide(
                self.head,
                self.grid.width(),
                self.grid.height(),
                self.direction,
                rng,
            );
        }

        let next = self.head.offset(self.direction.vector());

        // The cell being left is stamped even when the move fails, so the
        // last legal cell always carries a trail mark.
        self.grid.stamp(self.head, self.tick);

        if !self.grid.contains(next) {
            debug!(x = self.head.x, y = self.head.y, tick = self.tick, "head left the field");
            self.phase = Phase::GameOver;
            return StepOutcome::HitWall;
        }

        self.head = next;
        self.tick += 1;
        self.last_update_ms = now_ms;
        StepOutcome::Moved
    }

    /// Player steering; ignored while the autopilot has the wheel.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if self.autopilot_enabled {
            return false;
        }
        self.direction = direction;
        true
    }

    pub fn toggle_autopilot(&mut self) -> bool {
        self.set_autopilot(!self.autopilot_enabled);
        self.autopilot_enabled
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        debug!(enabled, "autopilot");
        self.autopilot_enabled = enabled;
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Steer(direction) => {
                self.steer(direction);
            }
            Command::ToggleAutopilot => {
                self.toggle_autopilot();
            }
        }
    }

    pub fn view(&self) -> SimView<'_> {
        SimView {
            cells: self.grid.cells(),
            width: self.grid.width(),
            height: self.grid.height(),
            head: self.head,
            origin: self.grid.center(),
            tick: self.tick,
            game_over: self.phase == Phase::GameOver,
            last_update_ms: self.last_update_ms,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn head(&self) -> Position {
        self.head
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn tick(&self) -> u32 {
        self.tick
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn autopilot_enabled(&self) -> bool {
        self.autopilot_enabled
    }

    pub fn autopilot(&self) -> &Autopilot {
        &self.autopilot
    }

    pub fn last_update_ms(&self) -> f64 {
        self.last_update_ms
    }
}

/// Everything the render loop uploads for one frame.
#[derive(Debug, Clone, Copy)]
pub struct SimView<'a> {
    pub cells: &'a [u32],
    pub width: u32,
    pub height: u32,
    pub head: Position,
    /// Where the current run started; its stamp is always tick 0.
    pub origin: Position,
    pub tick: u32,
    pub game_over: bool,
    pub last_update_ms: f64,
}

impl SimView<'_> {
    /// Ticks' worth of time since the head last moved; the shader uses it to
    /// interpolate the fade between updates.
    pub fn ticks_since_update(&self, now_ms: f64, tick_interval_ms: u32) -> f32 {
        ((now_ms - self.last_update_ms) / f64::from(tick_interval_ms)) as f32
    }

    /// Grid encoded for the texture: `stamp + 1` for visited cells, 0 for
    /// untouched ones. A raw 0 is ambiguous only at the origin, which has
    /// been left (and stamped) as soon as any step ran this game.
    pub fn trail_texels(&self) -> Vec<u32> {
        let origin = self.origin.y as usize * self.width as usize + self.origin.x as usize;
        let origin_visited = self.tick > 0 || self.game_over;
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &stamp)| {
                if stamp > 0 || (i == origin && origin_visited) {
                    stamp.saturating_add(1)
                } else {
                    0
                }
            })
            .collect()
    }
}
