use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, error};
use web_sys::{window, Element, HtmlCanvasElement, WebGl2RenderingContext as GL, WebGlProgram};

use super::gl::Quad;
use super::timer::{now_ms, Interval};
use crate::config::RenderConfig;
use crate::error::Result;
use crate::frame::{backing_size, FrameClock, FrameTiming};

/// Per-demo half of the render loop: owns the program and pushes its
/// uniforms and textures each frame.
pub trait Scene {
    fn program(&self) -> &WebGlProgram;

    fn prepare(&mut self, gl: &GL, surface: (u32, u32), timing: &FrameTiming) -> Result<()>;
}

pub struct Renderer<S> {
    gl: GL,
    canvas: HtmlCanvasElement,
    quad: Quad,
    clock: FrameClock,
    scene: S,
    failing: bool,
}

impl<S: Scene> Renderer<S> {
    pub fn new(gl: GL, canvas: HtmlCanvasElement, scene: S) -> Result<Self> {
        let quad = Quad::new(&gl, scene.program())?;
        Ok(Self {
            gl,
            canvas,
            quad,
            clock: FrameClock::new(now_ms()),
            scene,
            failing: false,
        })
    }

    /// Matches the backing store to the canvas's physical pixel size,
    /// reallocating only when it changed.
    fn resize(&self) -> (u32, u32) {
        let ratio = window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
        let (width, height) =
            backing_size(self.canvas.client_width(), self.canvas.client_height(), ratio);
        if self.canvas.width() != width || self.canvas.height() != height {
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            debug!(width, height, "resized canvas");
        }
        (width, height)
    }

    pub fn draw(&mut self, now_ms: f64) -> Result<()> {
        let gl = &self.gl;
        let (width, height) = self.resize();
        gl.viewport(0, 0, width as i32, height as i32);
        gl.clear_color(0.0, 0.0, 0.0, 0.0);
        gl.clear(GL::COLOR_BUFFER_BIT);

        gl.use_program(Some(self.scene.program()));
        let timing = self.clock.advance(now_ms);
        self.scene.prepare(gl, (width, height), &timing)?;
        self.quad.draw(gl);
        Ok(())
    }

    pub fn fps(&self) -> u32 {
        self.clock.fps()
    }

    fn frame(&mut self) {
        match self.draw(now_ms()) {
            Ok(()) => self.failing = false,
            Err(err) => {
                // log the first failure of a run, not every frame
                if !self.failing {
                    error!(error = %err, "frame failed");
                }
                self.failing = true;
            }
        }
    }
}

/// Starts the fixed-interval draw loop, plus the slower FPS readout when a
/// status element is present. Both run for the lifetime of the page.
pub fn run<S: Scene + 'static>(
    renderer: Renderer<S>,
    config: &RenderConfig,
    status: Option<Element>,
) -> Result<()> {
    let renderer = Rc::new(RefCell::new(renderer));

    let frame = {
        let renderer = renderer.clone();
        Interval::every(config.frame_interval_ms, move || {
            renderer.borrow_mut().frame();
        })?
    };
    frame.detach();

    if let Some(status) = status {
        let readout = Interval::every(config.fps_interval_ms, move || {
            let fps = renderer.borrow().fps();
            status.set_text_content(Some(&fps.to_string()));
        })?;
        readout.detach();
    }
    Ok(())
}
