//! Thin `Result`-returning wrappers over the WebGL2 calls both demos share.

use js_sys::{Float32Array, Uint32Array};
use wasm_bindgen::JsCast;
use web_sys::{
    HtmlCanvasElement, HtmlImageElement, WebGl2RenderingContext as GL, WebGlBuffer, WebGlProgram,
    WebGlShader, WebGlTexture, WebGlVertexArrayObject,
};

use crate::error::{Error, Result, ShaderStage};
use crate::frame::{FULLSCREEN_QUAD, QUAD_VERTEX_COUNT};
use crate::shaders::A_POSITION;

pub fn context(canvas: &HtmlCanvasElement) -> Result<GL> {
    let gl = canvas
        .get_context("webgl2")?
        .ok_or(Error::ContextUnavailable)?
        .dyn_into::<GL>()
        .map_err(|_| Error::ContextUnavailable)?;
    Ok(gl)
}

pub fn compile_shader(gl: &GL, stage: ShaderStage, source: &str) -> Result<WebGlShader> {
    let kind = match stage {
        ShaderStage::Vertex => GL::VERTEX_SHADER,
        ShaderStage::Fragment => GL::FRAGMENT_SHADER,
    };
    let shader = gl.create_shader(kind).ok_or(Error::Resource("shader"))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    let ok = gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false);
    if ok {
        return Ok(shader);
    }
    let log = gl.get_shader_info_log(&shader).unwrap_or_default();
    gl.delete_shader(Some(&shader));
    Err(Error::ShaderCompile { stage, log })
}

pub fn link_program(gl: &GL, vertex: &WebGlShader, fragment: &WebGlShader) -> Result<WebGlProgram> {
    let program = gl.create_program().ok_or(Error::Resource("program"))?;
    gl.attach_shader(&program, vertex);
    gl.attach_shader(&program, fragment);
    gl.link_program(&program);

    let ok = gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false);
    if ok {
        return Ok(program);
    }
    let log = gl.get_program_info_log(&program).unwrap_or_default();
    gl.delete_program(Some(&program));
    Err(Error::ProgramLink { log })
}

/// Compiles and links a vertex/fragment pair. The shader objects are
/// released once linked (or once either step fails).
pub fn build_program(gl: &GL, vertex_src: &str, fragment_src: &str) -> Result<WebGlProgram> {
    let vertex = compile_shader(gl, ShaderStage::Vertex, vertex_src)?;
    let fragment = match compile_shader(gl, ShaderStage::Fragment, fragment_src) {
        Ok(shader) => shader,
        Err(err) => {
            gl.delete_shader(Some(&vertex));
            return Err(err);
        }
    };
    let program = link_program(gl, &vertex, &fragment);
    gl.delete_shader(Some(&vertex));
    gl.delete_shader(Some(&fragment));
    program
}

/// Vertex array holding the fullscreen quad bound to `a_position`.
pub struct Quad {
    vao: WebGlVertexArrayObject,
    _buffer: WebGlBuffer,
}

impl Quad {
    pub fn new(gl: &GL, program: &WebGlProgram) -> Result<Self> {
        let location = gl.get_attrib_location(program, A_POSITION);
        if location < 0 {
            return Err(Error::MissingAttribute(A_POSITION));
        }
        let location = location as u32;

        let vao = gl
            .create_vertex_array()
            .ok_or(Error::Resource("vertex array"))?;
        gl.bind_vertex_array(Some(&vao));

        let buffer = gl.create_buffer().ok_or(Error::Resource("buffer"))?;
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));
        let vertices = Float32Array::from(&FULLSCREEN_QUAD[..]);
        gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &vertices, GL::STATIC_DRAW);
        gl.enable_vertex_attrib_array(location);
        gl.vertex_attrib_pointer_with_i32(location, 2, GL::FLOAT, false, 0, 0);

        gl.bind_vertex_array(None);
        Ok(Self { vao, _buffer: buffer })
    }

    pub fn draw(&self, gl: &GL) {
        gl.bind_vertex_array(Some(&self.vao));
        gl.draw_arrays(GL::TRIANGLES, 0, QUAD_VERTEX_COUNT);
    }
}

/// Nearest-filtered, edge-clamped texture; integer textures cannot be
/// sampled with anything else.
pub fn create_texture(gl: &GL) -> Result<WebGlTexture> {
    let texture = gl.create_texture().ok_or(Error::Resource("texture"))?;
    gl.bind_texture(GL::TEXTURE_2D, Some(&texture));
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_S, GL::CLAMP_TO_EDGE as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_T, GL::CLAMP_TO_EDGE as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MIN_FILTER, GL::NEAREST as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MAG_FILTER, GL::NEAREST as i32);
    Ok(texture)
}

/// Uploads `cells` as a `width`×`height` single-channel `R32UI` image into
/// the texture bound to `TEXTURE_2D`.
pub fn upload_u32_texture(gl: &GL, width: u32, height: u32, cells: &[u32]) -> Result<()> {
    let pixels = Uint32Array::from(cells);
    gl.tex_image_2d_with_i32_and_i32_and_i32_and_format_and_type_and_opt_array_buffer_view(
        GL::TEXTURE_2D,
        0,
        GL::R32UI as i32,
        width as i32,
        height as i32,
        0,
        GL::RED_INTEGER,
        GL::UNSIGNED_INT,
        Some(&*pixels),
    )?;
    Ok(())
}

pub fn upload_image_texture(gl: &GL, image: &HtmlImageElement) -> Result<()> {
    gl.tex_image_2d_with_u32_and_u32_and_html_image_element(
        GL::TEXTURE_2D,
        0,
        GL::RGBA as i32,
        GL::RGBA,
        GL::UNSIGNED_BYTE,
        image,
    )?;
    Ok(())
}
