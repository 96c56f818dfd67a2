//! Render-loop bookkeeping that does not touch the GPU.

/// Two triangles covering clip space, as `(x, y)` pairs.
pub const FULLSCREEN_QUAD: [f32; 12] = [
    -1.0, 1.0, //
    1.0, 1.0, //
    -1.0, -1.0, //
    -1.0, -1.0, //
    1.0, 1.0, //
    1.0, -1.0, //
];

pub const QUAD_VERTEX_COUNT: i32 = (FULLSCREEN_QUAD.len() / 2) as i32;

/// Physical pixel size of a canvas laid out at `client_*` CSS pixels.
pub fn backing_size(client_width: i32, client_height: i32, device_pixel_ratio: f64) -> (u32, u32) {
    let scale = |css: i32| (f64::from(css.max(0)) * device_pixel_ratio).floor().max(0.0) as u32;
    (scale(client_width), scale(client_height))
}

/// Per-frame timing handed to a scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTiming {
    pub now_ms: f64,
    /// Seconds since the loop started.
    pub elapsed_s: f32,
    pub delta_ms: f64,
}

/// Tracks frame-to-frame deltas for the FPS readout.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start_ms: f64,
    last_ms: f64,
    delta_ms: f64,
}

impl FrameClock {
    pub fn new(now_ms: f64) -> Self {
        Self {
            start_ms: now_ms,
            last_ms: now_ms,
            delta_ms: 0.0,
        }
    }

    pub fn advance(&mut self, now_ms: f64) -> FrameTiming {
        self.delta_ms = now_ms - self.last_ms;
        self.last_ms = now_ms;
        FrameTiming {
            now_ms,
            elapsed_s: ((now_ms - self.start_ms) / 1000.0) as f32,
            delta_ms: self.delta_ms,
        }
    }

    /// Instantaneous rate from the last delta; 0 before two frames have run.
    pub fn fps(&self) -> u32 {
        if self.delta_ms <= 0.0 {
            return 0;
        }
        (1000.0 / self.delta_ms).floor() as u32
    }
}
