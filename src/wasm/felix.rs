use std::cell::RefCell;
use std::rc::Rc;

use tracing::{error, info};
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{
    Element, HtmlCanvasElement, HtmlImageElement, WebGl2RenderingContext as GL, WebGlProgram,
    WebGlTexture, WebGlUniformLocation,
};

use super::gl;
use super::render::{self, Renderer, Scene};
use super::timer::Timeout;
use crate::asset::AssetLoad;
use crate::config::{Config, RenderConfig};
use crate::error::{Error, Result};
use crate::frame::FrameTiming;
use crate::shaders::{self, FELIX_FRAG, QUAD_VERT};

struct FelixScene {
    program: WebGlProgram,
    texture: WebGlTexture,
    image_size: (u32, u32),
    resolution: Option<WebGlUniformLocation>,
    size: Option<WebGlUniformLocation>,
    time: Option<WebGlUniformLocation>,
    sampler: Option<WebGlUniformLocation>,
}

impl Scene for FelixScene {
    fn program(&self) -> &WebGlProgram {
        &self.program
    }

    fn prepare(&mut self, gl: &GL, (width, height): (u32, u32), timing: &FrameTiming) -> Result<()> {
        gl.uniform2f(self.resolution.as_ref(), width as f32, height as f32);
        gl.uniform2f(
            self.size.as_ref(),
            self.image_size.0 as f32,
            self.image_size.1 as f32,
        );
        gl.uniform1f(self.time.as_ref(), timing.elapsed_s);
        gl.active_texture(GL::TEXTURE0);
        gl.bind_texture(GL::TEXTURE_2D, Some(&self.texture));
        gl.uniform1i(self.sampler.as_ref(), 0);
        Ok(())
    }
}

/// Everything GL setup needs once the image has arrived.
struct Pending {
    gl: GL,
    canvas: HtmlCanvasElement,
    status: Option<Element>,
    render: RenderConfig,
}

/// Requests the image and defers GL setup to its load callback. The load
/// settles exactly once: loaded, failed, or timed out.
pub fn start(canvas: HtmlCanvasElement, status: Option<Element>, config: &Config) -> Result<()> {
    // Fail fast on a missing context rather than after the download.
    let gl = gl::context(&canvas)?;
    let image = HtmlImageElement::new()?;
    let url = config.felix.image_url.clone();
    let timeout_ms = config.felix.load_timeout_ms;

    let load = Rc::new(RefCell::new(AssetLoad::new(url.clone())));
    let timer: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));
    let mut pending = Some(Pending {
        gl,
        canvas,
        status: status.clone(),
        render: config.render.clone(),
    });

    let on_load = {
        let (load, timer, image) = (load.clone(), timer.clone(), image.clone());
        Closure::wrap(Box::new(move || {
            if !load.borrow_mut().loaded() {
                return;
            }
            if let Some(timeout) = timer.borrow_mut().take() {
                timeout.cancel();
            }
            if let Some(pending) = pending.take() {
                let status = pending.status.clone();
                if let Err(err) = setup(pending, &image) {
                    report(status.as_ref(), &err);
                }
            }
        }) as Box<dyn FnMut()>)
    };

    let on_error = {
        let (load, timer, status) = (load.clone(), timer.clone(), status.clone());
        Closure::wrap(Box::new(move || {
            if !load.borrow_mut().failed() {
                return;
            }
            if let Some(timeout) = timer.borrow_mut().take() {
                timeout.cancel();
            }
            if let Some(err) = load.borrow().error() {
                report(status.as_ref(), &Error::Asset(err.clone()));
            }
        }) as Box<dyn FnMut()>)
    };

    image.set_onload(Some(on_load.as_ref().unchecked_ref()));
    image.set_onerror(Some(on_error.as_ref().unchecked_ref()));
    on_load.forget();
    on_error.forget();

    let timeout = {
        let (load, image) = (load.clone(), image.clone());
        Timeout::after(timeout_ms, move || {
            if !load.borrow_mut().timed_out(timeout_ms) {
                return;
            }
            // stop the download; a late onerror is ignored by the settled load
            image.set_src("");
            if let Some(err) = load.borrow().error() {
                report(status.as_ref(), &Error::Asset(err.clone()));
            }
        })?
    };
    *timer.borrow_mut() = Some(timeout);

    info!(url = %url, timeout_ms, "loading image");
    image.set_src(&url);
    Ok(())
}

fn setup(pending: Pending, image: &HtmlImageElement) -> Result<()> {
    let Pending {
        gl,
        canvas,
        status,
        render: render_config,
    } = pending;

    let program = gl::build_program(&gl, QUAD_VERT, FELIX_FRAG)?;
    let texture = gl::create_texture(&gl)?;
    gl::upload_image_texture(&gl, image)?;

    let image_size = (image.natural_width(), image.natural_height());
    info!(width = image_size.0, height = image_size.1, "image loaded");

    let scene = FelixScene {
        resolution: gl.get_uniform_location(&program, shaders::U_RESOLUTION),
        size: gl.get_uniform_location(&program, shaders::U_IMAGE_SIZE),
        time: gl.get_uniform_location(&program, shaders::U_TIME),
        sampler: gl.get_uniform_location(&program, shaders::U_IMAGE),
        program,
        texture,
        image_size,
    };
    render::run(Renderer::new(gl, canvas, scene)?, &render_config, status)
}

fn report(status: Option<&Element>, err: &Error) {
    error!(error = %err, "felix failed");
    if let Some(status) = status {
        status.set_text_content(Some(&err.to_string()));
    }
}
