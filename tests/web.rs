#![cfg(target_arch = "wasm32")]

use shader_wasm::error::{Error, ShaderStage};
use shader_wasm::shaders;
use shader_wasm::wasm::gl;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{HtmlCanvasElement, WebGl2RenderingContext};

wasm_bindgen_test_configure!(run_in_browser);

/// Headless runners may not expose WebGL2; those tests pass vacuously.
fn context() -> Option<WebGl2RenderingContext> {
    let document = web_sys::window()?.document()?;
    let canvas = document
        .create_element("canvas")
        .ok()?
        .dyn_into::<HtmlCanvasElement>()
        .ok()?;
    gl::context(&canvas).ok()
}

#[wasm_bindgen_test]
fn bundled_programs_link() {
    let Some(ctx) = context() else { return };
    gl::build_program(&ctx, shaders::QUAD_VERT, shaders::SNAKE_FRAG).unwrap();
    gl::build_program(&ctx, shaders::QUAD_VERT, shaders::FELIX_FRAG).unwrap();
}

#[wasm_bindgen_test]
fn compile_errors_carry_the_stage() {
    let Some(ctx) = context() else { return };
    let broken = "#version 300 es\nvoid main() { nope }";
    match gl::build_program(&ctx, shaders::QUAD_VERT, broken) {
        Err(Error::ShaderCompile { stage, .. }) => assert_eq!(stage, ShaderStage::Fragment),
        other => panic!("expected compile error, got {:?}", other.map(|_| ())),
    }
}

#[wasm_bindgen_test]
fn grid_texture_uploads() {
    let Some(ctx) = context() else { return };
    let texture = gl::create_texture(&ctx).unwrap();
    ctx.bind_texture(WebGl2RenderingContext::TEXTURE_2D, Some(&texture));
    gl::upload_u32_texture(&ctx, 4, 3, &[7; 12]).unwrap();
    assert_eq!(ctx.get_error(), WebGl2RenderingContext::NO_ERROR);
}
