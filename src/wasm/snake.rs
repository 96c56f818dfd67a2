use std::cell::RefCell;
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{
    Element, HtmlCanvasElement, KeyboardEvent, WebGl2RenderingContext as GL, WebGlProgram,
    WebGlTexture, WebGlUniformLocation,
};

use super::gl;
use super::render::{self, Renderer, Scene};
use super::timer::{now_ms, Interval};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::frame::FrameTiming;
use crate::input::Command;
use crate::shaders::{self, QUAD_VERT, SNAKE_FRAG};
use crate::sim::Simulation;

type SharedSim = Rc<RefCell<Simulation>>;

struct Uniforms {
    resolution: Option<WebGlUniformLocation>,
    time: Option<WebGlUniformLocation>,
    field_size: Option<WebGlUniformLocation>,
    game_over: Option<WebGlUniformLocation>,
    time_since_update: Option<WebGlUniformLocation>,
    update_count: Option<WebGlUniformLocation>,
    cells: Option<WebGlUniformLocation>,
}

impl Uniforms {
    fn locate(gl: &GL, program: &WebGlProgram) -> Self {
        let at = |name| gl.get_uniform_location(program, name);
        Self {
            resolution: at(shaders::U_RESOLUTION),
            time: at(shaders::U_TIME),
            field_size: at(shaders::U_FIELD_SIZE),
            game_over: at(shaders::U_GAME_OVER),
            time_since_update: at(shaders::U_TIME_SINCE_UPDATE),
            update_count: at(shaders::U_UPDATE_COUNT),
            cells: at(shaders::U_CELLS),
        }
    }
}

/// Reads the simulation through `SimView` only; the tick interval is the
/// sole writer.
struct SnakeScene {
    program: WebGlProgram,
    texture: WebGlTexture,
    uniforms: Uniforms,
    sim: SharedSim,
    tick_interval_ms: u32,
}

impl Scene for SnakeScene {
    fn program(&self) -> &WebGlProgram {
        &self.program
    }

    fn prepare(&mut self, gl: &GL, (width, height): (u32, u32), timing: &FrameTiming) -> Result<()> {
        let u = &self.uniforms;
        let sim = self.sim.borrow();
        let view = sim.view();

        gl.uniform2f(u.resolution.as_ref(), width as f32, height as f32);
        gl.uniform1f(u.time.as_ref(), timing.elapsed_s);
        gl.uniform2f(u.field_size.as_ref(), view.width as f32, view.height as f32);
        gl.uniform1f(u.game_over.as_ref(), if view.game_over { 1.0 } else { 0.0 });
        gl.uniform1f(
            u.time_since_update.as_ref(),
            view.ticks_since_update(timing.now_ms, self.tick_interval_ms),
        );
        gl.uniform1f(u.update_count.as_ref(), view.tick as f32);

        // Whole grid every frame; there is no dirty tracking.
        gl.active_texture(GL::TEXTURE0);
        gl.bind_texture(GL::TEXTURE_2D, Some(&self.texture));
        gl.uniform1i(u.cells.as_ref(), 0);
        gl::upload_u32_texture(gl, view.width, view.height, &view.trail_texels())
    }
}

pub fn start(canvas: HtmlCanvasElement, status: Option<Element>, config: &Config) -> Result<()> {
    let gl = gl::context(&canvas)?;
    let program = gl::build_program(&gl, QUAD_VERT, SNAKE_FRAG)?;
    let texture = gl::create_texture(&gl)?;
    let uniforms = Uniforms::locate(&gl, &program);

    let sim: SharedSim = Rc::new(RefCell::new(Simulation::new(&config.snake, now_ms())));
    let scene = SnakeScene {
        program,
        texture,
        uniforms,
        sim: sim.clone(),
        tick_interval_ms: config.snake.tick_interval_ms,
    };

    render::run(Renderer::new(gl, canvas, scene)?, &config.render, status)?;
    run_simulation(sim.clone(), config.snake.tick_interval_ms)?;
    listen_for_keys(sim)?;

    info!(
        width = config.snake.grid_width,
        height = config.snake.grid_height,
        tick_ms = config.snake.tick_interval_ms,
        autopilot = config.snake.autopilot,
        "snake running"
    );
    Ok(())
}

fn run_simulation(sim: SharedSim, tick_interval_ms: u32) -> Result<()> {
    let mut rng = StdRng::from_entropy();
    Interval::every(tick_interval_ms, move || {
        sim.borrow_mut().step(now_ms(), &mut rng);
    })?
    .detach();
    Ok(())
}

fn listen_for_keys(sim: SharedSim) -> Result<()> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| Error::Js("no document".to_owned()))?;

    let on_key = Closure::wrap(Box::new(move |event: KeyboardEvent| {
        if let Some(command) = Command::from_key(&event.key()) {
            // arrow keys would scroll the page otherwise
            event.prevent_default();
            sim.borrow_mut().apply(command);
        }
    }) as Box<dyn FnMut(KeyboardEvent)>);
    document.add_event_listener_with_callback("keydown", on_key.as_ref().unchecked_ref())?;
    on_key.forget();
    Ok(())
}
