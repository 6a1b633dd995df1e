//! Trailing-edge debounce.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use crate::runtime::Runtime;

/// Delays a callback until calls stop arriving for `wait`.
///
/// Every [`call`](Debouncer::call) restarts the wait. Only the last call's
/// argument is delivered. Clones share the same pending state.
pub struct Debouncer<R: Runtime, T> {
    inner: Rc<DebouncerInner<R, T>>,
}

struct DebouncerInner<R, T> {
    runtime: R,
    wait: Duration,
    generation: Cell<u64>,
    callback: Box<dyn Fn(T)>,
}

impl<R: Runtime, T: 'static> Debouncer<R, T> {
    pub fn new(runtime: R, wait: Duration, callback: impl Fn(T) + 'static) -> Self {
        Self {
            inner: Rc::new(DebouncerInner {
                runtime,
                wait,
                generation: Cell::new(0),
                callback: Box::new(callback),
            }),
        }
    }

    /// Schedule `arg`, superseding any call still waiting.
    pub fn call(&self, arg: T) {
        let generation = self.inner.generation.get().wrapping_add(1);
        self.inner.generation.set(generation);

        let inner = Rc::clone(&self.inner);
        let sleep = self.inner.runtime.sleep(self.inner.wait);
        self.inner.runtime.spawn(async move {
            sleep.await;
            if inner.generation.get() == generation {
                (inner.callback)(arg);
            }
        });
    }

    #[must_use]
    pub fn wait(&self) -> Duration {
        self.inner.wait
    }
}

impl<R: Runtime, T> Clone for Debouncer<R, T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}
