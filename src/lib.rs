//! Two WebGL2 shader toys: a snake/Tron trail simulation drawn from a
//! per-frame grid texture, and an animated image viewer.

pub mod asset;
pub mod config;
pub mod error;
pub mod frame;
pub mod input;
pub mod shaders;
pub mod sim;

pub use config::{Config, Demo};
pub use error::{Error, Result};

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement};

    use crate::config::{Config, Demo};
    use crate::error::Error;

    mod felix;
    pub mod gl;
    mod render;
    mod snake;
    mod timer;

    const CANVAS_ID: &str = "c";
    const STATUS_ID: &str = "fps";

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        tracing_wasm::set_as_global_default();

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas = document
            .get_element_by_id(CANVAS_ID)
            .ok_or(Error::MissingElement(CANVAS_ID))?
            .dyn_into::<HtmlCanvasElement>()?;
        let status = document.get_element_by_id(STATUS_ID);

        let config = read_config(&document, &canvas)?;
        tracing::info!(demo = ?config.demo, "starting");

        let started = match config.demo {
            Demo::Snake => snake::start(canvas, status.clone(), &config),
            Demo::Felix => felix::start(canvas, status.clone(), &config),
        };
        if let Err(err) = started {
            tracing::error!(error = %err, "demo failed to start");
            if let Some(status) = status {
                status.set_text_content(Some(&err.to_string()));
            }
            return Err(err.into());
        }
        Ok(())
    }

    /// Canvas `data-demo` first, then the query string, so the URL wins.
    fn read_config(document: &Document, canvas: &HtmlCanvasElement) -> Result<Config, Error> {
        let mut pairs = Vec::new();
        if let Some(demo) = canvas.dataset().get("demo") {
            pairs.push(("demo".to_owned(), demo));
        }
        if let Some(location) = document.location() {
            let params = web_sys::UrlSearchParams::new_with_str(&location.search()?)?;
            for entry in params.entries() {
                let entry = js_sys::Array::from(&entry?);
                if let (Some(key), Some(value)) = (entry.get(0).as_string(), entry.get(1).as_string()) {
                    pairs.push((key, value));
                }
            }
        }
        Ok(Config::from_pairs(pairs)?)
    }
}
