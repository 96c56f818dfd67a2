use rand::Rng;

use super::{Direction, Position};

/// Biased random walk steering the head when nobody is at the keys.
///
/// The longer a heading has been held, and the closer the head is to an
/// edge, the likelier a quarter turn becomes. Turns are always ±90°, so the
/// autopilot never reverses into its own trail in one step.
#[derive(Debug, Clone)]
pub struct Autopilot {
    horizon: f64,
    stable_ticks: u32,
}

impl Autopilot {
    pub fn new(horizon: f64) -> Self {
        Self {
            horizon,
            stable_ticks: 0,
        }
    }

    /// Consecutive ticks since the autopilot last turned.
    pub fn stable_ticks(&self) -> u32 {
        self.stable_ticks
    }

    pub fn horizon(&self) -> f64 {
        self.horizon
    }

    /// Probability (possibly above 1) that this tick turns. At an edge the
    /// denominator vanishes and the result is infinite, which forces a turn.
    pub fn change_probability(&self, head: Position, width: u32, height: u32) -> f64 {
        let proximity = edge_proximity(head, width, height);
        if proximity >= 1.0 {
            return f64::INFINITY;
        }
        f64::from(self.stable_ticks) / ((1.0 - proximity) * self.horizon)
    }

    pub fn decide<R: Rng + ?Sized>(
        &mut self,
        head: Position,
        width: u32,
        height: u32,
        current: Direction,
        rng: &mut R,
    ) -> Direction {
        let p = self.change_probability(head, width, height);
        if rng.gen::<f64>() < p {
            self.stable_ticks = 0;
            let turn = if rng.gen::<bool>() { 1 } else { -1 };
            current.rotated(turn)
        } else {
            self.stable_ticks += 1;
            current
        }
    }
}

/// 0 at the center of the field, 1 on the nearest edge; the larger of the
/// two per-axis values.
pub fn edge_proximity(head: Position, width: u32, height: u32) -> f64 {
    axis_proximity(head.x, width).max(axis_proximity(head.y, height))
}

fn axis_proximity(coord: i32, size: u32) -> f64 {
    let coord = f64::from(coord);
    let size = f64::from(size);
    1.0 - coord.min(size - coord) / (size / 2.0)
}
