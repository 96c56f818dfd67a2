use std::fmt;

use thiserror::Error;
use wasm_bindgen::JsValue;

use crate::asset::AssetError;
use crate::config::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("WebGL2 not supported")]
    ContextUnavailable,
    #[error("error compiling {stage} shader: {log}")]
    ShaderCompile { stage: ShaderStage, log: String },
    #[error("error linking program: {log}")]
    ProgramLink { log: String },
    #[error("failed to create {0}")]
    Resource(&'static str),
    #[error("element #{0} not found")]
    MissingElement(&'static str),
    #[error("attribute {0} not active in program")]
    MissingAttribute(&'static str),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Asset(#[from] AssetError),
    #[error("{0}")]
    Js(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl From<JsValue> for Error {
    fn from(value: JsValue) -> Self {
        match value.as_string() {
            Some(message) => Error::Js(message),
            None => Error::Js(format!("{value:?}")),
        }
    }
}

impl From<Error> for JsValue {
    fn from(err: Error) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
