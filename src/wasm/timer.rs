use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::window;

use crate::error::{Error, Result};

fn browser_window() -> Result<web_sys::Window> {
    window().ok_or_else(|| Error::Js("no window".to_owned()))
}

/// Milliseconds from the page's monotonic clock.
pub fn now_ms() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// A `setInterval` registration that owns its callback. The loops never
/// stop, so there is no cancel; dropping one without `detach` leaves the
/// browser calling a freed closure.
pub struct Interval {
    closure: Closure<dyn FnMut()>,
}

impl Interval {
    pub fn every(period_ms: u32, callback: impl FnMut() + 'static) -> Result<Self> {
        let closure = Closure::wrap(Box::new(callback) as Box<dyn FnMut()>);
        browser_window()?.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            i32::try_from(period_ms).unwrap_or(i32::MAX),
        )?;
        Ok(Self { closure })
    }

    /// Leaves the interval running for the lifetime of the page.
    pub fn detach(self) {
        self.closure.forget();
    }
}

/// A one-shot `setTimeout`. Dropping it before it fires is not allowed, so
/// callers either `detach` or `cancel`.
pub struct Timeout {
    handle: i32,
    closure: Closure<dyn FnMut()>,
}

impl Timeout {
    pub fn after(delay_ms: u32, callback: impl FnOnce() + 'static) -> Result<Self> {
        let mut callback = Some(callback);
        let closure = Closure::wrap(Box::new(move || {
            if let Some(callback) = callback.take() {
                callback();
            }
        }) as Box<dyn FnMut()>);
        let handle = browser_window()?.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            i32::try_from(delay_ms).unwrap_or(i32::MAX),
        )?;
        Ok(Self { handle, closure })
    }

    pub fn detach(self) {
        self.closure.forget();
    }

    /// Clears the pending timeout. Must not be called from inside the
    /// callback itself, since that drops the running closure.
    pub fn cancel(self) {
        if let Some(w) = window() {
            w.clear_timeout_with_handle(self.handle);
        }
    }
}
