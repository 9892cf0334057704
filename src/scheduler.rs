//! Frame scheduling: a cancellable `requestAnimationFrame` loop.
//!
//! The callback re-checks its cancellation token both before doing work and
//! before requesting the next frame, so [`FrameLoop::stop`] (or dropping the
//! loop) guarantees no further ticks land on a torn-down canvas.

#[cfg(test)]
#[path = "scheduler_test.rs"]
mod scheduler_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

/// Cancellation flag shared between a [`FrameLoop`] and its callback.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Rc<Cell<bool>>,
}

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the token; every clone observes the cancellation.
    pub fn cancel(&self) {
        self.flag.set(true);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.get()
    }
}

type TickClosure = Closure<dyn FnMut(f64)>;
type ClosureHolder = Rc<RefCell<Option<TickClosure>>>;

/// Continuous animation-frame loop, one tick per display refresh.
pub struct FrameLoop {
    token: CancelToken,
    pending: Rc<Cell<Option<i32>>>,
    // Keeps the JS-side callback alive for the lifetime of the loop.
    _tick: ClosureHolder,
}

impl FrameLoop {
    /// Start calling `tick` once per animation frame until [`Self::stop`].
    ///
    /// # Errors
    ///
    /// Returns `Err` when there is no window or the initial frame request is
    /// refused.
    pub fn start(mut tick: impl FnMut() + 'static) -> Result<Self, JsValue> {
        let token = CancelToken::new();
        let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let holder: ClosureHolder = Rc::new(RefCell::new(None));

        let cb_token = token.clone();
        let cb_pending = Rc::clone(&pending);
        let cb_holder = Rc::clone(&holder);
        let closure = Closure::wrap(Box::new(move |_timestamp: f64| {
            cb_pending.set(None);
            if cb_token.is_cancelled() {
                return;
            }
            tick();
            // The tick itself may have torn the loop down.
            if cb_token.is_cancelled() {
                return;
            }
            match request_frame(&cb_holder) {
                Ok(id) => cb_pending.set(Some(id)),
                Err(err) => log::warn!("animation frame request failed: {err:?}"),
            }
        }) as Box<dyn FnMut(f64)>);

        *holder.borrow_mut() = Some(closure);
        pending.set(Some(request_frame(&holder)?));

        Ok(Self { token, pending, _tick: holder })
    }

    /// Cancel the token and any pending frame request.
    pub fn stop(&self) {
        self.token.cancel();
        if let Some(id) = self.pending.take() {
            if let Some(window) = web_sys::window() {
                if let Err(err) = window.cancel_animation_frame(id) {
                    log::warn!("cancel_animation_frame failed: {err:?}");
                }
            }
        }
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

fn request_frame(holder: &ClosureHolder) -> Result<i32, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let guard = holder.borrow();
    let Some(closure) = guard.as_ref() else {
        return Err(JsValue::from_str("frame callback missing"));
    };
    window.request_animation_frame(closure.as_ref().unchecked_ref())
}
