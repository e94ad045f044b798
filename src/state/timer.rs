// Owned browser timers. Dropping the guard clears the timer and frees the closure.
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;

use crate::util::cwarn;

pub struct Interval {
    id: i32,
    _tick: Closure<dyn FnMut()>,
}

impl Interval {
    pub fn start(period_ms: i32, f: impl FnMut() + 'static) -> Option<Self> {
        let window = web_sys::window()?;
        let tick = Closure::wrap(Box::new(f) as Box<dyn FnMut()>);
        match window.set_interval_with_callback_and_timeout_and_arguments_0(
            tick.as_ref().unchecked_ref(),
            period_ms,
        ) {
            Ok(id) => Some(Self { id, _tick: tick }),
            Err(_) => {
                cwarn(&format!("setInterval({period_ms}) failed"));
                None
            }
        }
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(self.id);
        }
    }
}

pub struct Timeout {
    id: i32,
    _fire: Closure<dyn FnMut()>,
}

impl Timeout {
    pub fn start(delay_ms: i32, f: impl FnMut() + 'static) -> Option<Self> {
        let window = web_sys::window()?;
        let fire = Closure::wrap(Box::new(f) as Box<dyn FnMut()>);
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            fire.as_ref().unchecked_ref(),
            delay_ms,
        ) {
            Ok(id) => Some(Self { id, _fire: fire }),
            Err(_) => {
                cwarn(&format!("setTimeout({delay_ms}) failed"));
                None
            }
        }
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            window.clear_timeout_with_handle(self.id);
        }
    }
}
