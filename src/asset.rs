//! Load state of an out-of-band image. The browser reports success, failure
//! and our own timeout through separate callbacks; whichever lands first
//! decides the outcome and the rest are ignored.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AssetError {
    #[error("failed to load image {url}")]
    Failed { url: String },
    #[error("image {url} did not load within {after_ms} ms")]
    TimedOut { url: String, after_ms: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetState {
    Pending,
    Ready,
    Failed(AssetError),
}

#[derive(Debug, Clone)]
pub struct AssetLoad {
    url: String,
    state: AssetState,
}

impl AssetLoad {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            state: AssetState::Pending,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn state(&self) -> &AssetState {
        &self.state
    }

    pub fn is_pending(&self) -> bool {
        self.state == AssetState::Pending
    }

    /// Returns true if this call settled the load.
    pub fn loaded(&mut self) -> bool {
        self.settle(AssetState::Ready)
    }

    pub fn failed(&mut self) -> bool {
        let err = AssetError::Failed {
            url: self.url.clone(),
        };
        self.settle(AssetState::Failed(err))
    }

    pub fn timed_out(&mut self, after_ms: u32) -> bool {
        let err = AssetError::TimedOut {
            url: self.url.clone(),
            after_ms,
        };
        self.settle(AssetState::Failed(err))
    }

    pub fn error(&self) -> Option<&AssetError> {
        match &self.state {
            AssetState::Failed(err) => Some(err),
            _ => None,
        }
    }

    fn settle(&mut self, state: AssetState) -> bool {
        if !self.is_pending() {
            return false;
        }
        self.state = state;
        true
    }
}
