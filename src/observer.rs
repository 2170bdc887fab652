//! The per-subscription receiver of notifications.

use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    fmt,
    rc::Rc,
};

use crate::{
    subscription::subscribe::{Subscriber, Teardown, Unsubscribeable},
    ObservableError,
};

struct Inner<T, E> {
    next_fn: RefCell<Option<Box<dyn FnMut(T)>>>,
    error_fn: RefCell<Option<Box<dyn FnMut(E)>>>,
    complete_fn: RefCell<Option<Box<dyn FnMut()>>>,
    // Values passed to `next` while the `next` handler is running.
    pending: RefCell<VecDeque<T>>,
    dispatching: Cell<bool>,
    // Set as soon as a terminal notification starts, before its handler runs.
    stopped: Cell<bool>,
    closed: Cell<bool>,
    teardown: RefCell<Teardown>,
}

/// Delivers notifications from a producer to the handlers of one `Subscriber`.
///
/// An `Observer` is created by [`Observable::subscribe`] and handed to the
/// subscribe function. It is a shared handle: clones refer to the same state, so
/// a producer may keep one around and emit later, or capture one in its
/// teardown logic.
///
/// Once closed, by `unsubscribe`, `error` or `complete`, every further
/// notification is ignored and the teardown logic has run exactly once.
///
/// [`Observable::subscribe`]: crate::Subscribeable::subscribe
pub struct Observer<T, E = ObservableError> {
    inner: Rc<Inner<T, E>>,
}

impl<T, E> Observer<T, E> {
    pub(crate) fn new(subscriber: Subscriber<T, E>) -> Self {
        Observer {
            inner: Rc::new(Inner {
                next_fn: RefCell::new(subscriber.next_fn),
                error_fn: RefCell::new(subscriber.error_fn),
                complete_fn: RefCell::new(subscriber.complete_fn),
                pending: RefCell::new(VecDeque::new()),
                dispatching: Cell::new(false),
                stopped: Cell::new(false),
                closed: Cell::new(false),
                teardown: RefCell::new(Teardown::Nil),
            }),
        }
    }

    /// Emits `v` to the `next` handler, unless the observer is closed.
    ///
    /// A `next` call made from inside the `next` handler of the same observer is
    /// queued and delivered, in order, once the running handler returns.
    pub fn next(&self, v: T) {
        if self.is_stopped() {
            return;
        }
        let Some(mut next_fn) = self.inner.next_fn.take() else {
            if self.inner.dispatching.get() {
                self.inner.pending.borrow_mut().push_back(v);
            }
            return;
        };

        self.inner.dispatching.set(true);
        let mut v = v;
        loop {
            next_fn(v);
            if self.is_stopped() {
                break;
            }
            let queued = self.inner.pending.borrow_mut().pop_front();
            match queued {
                Some(q) => v = q,
                None => break,
            }
        }
        self.inner.dispatching.set(false);
        self.restore(&self.inner.next_fn, next_fn);
    }

    /// Delivers a terminal error and closes the observer.
    ///
    /// Nothing reaches the handlers after this call starts, including
    /// notifications issued by the `error` handler itself.
    pub fn error(&self, e: E) {
        if self.inner.stopped.replace(true) || self.inner.closed.get() {
            return;
        }
        if let Some(mut error_fn) = self.inner.error_fn.take() {
            error_fn(e);
        }
        self.close("error");
    }

    /// Signals completion and closes the observer.
    ///
    /// Like `error`, this wins over any notification issued while its handler
    /// runs.
    pub fn complete(&self) {
        if self.inner.stopped.replace(true) || self.inner.closed.get() {
            return;
        }
        if let Some(mut complete_fn) = self.inner.complete_fn.take() {
            complete_fn();
        }
        self.close("complete");
    }

    /// Closes the observer without notifying the handlers.
    pub fn unsubscribe(&self) {
        self.close("unsubscribe");
    }

    /// Producers that emit over a long period can poll this to stop early.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inner.closed.get()
    }

    // Second phase of construction. The teardown only exists after the subscribe
    // function returned, by which point a synchronous producer may already have
    // closed the observer.
    pub(crate) fn set_teardown(&self, teardown: Teardown) {
        if self.inner.closed.get() {
            teardown.run();
            return;
        }
        let previous = self.inner.teardown.replace(teardown);
        debug_assert!(previous.is_nil(), "teardown attached twice");
    }

    fn is_stopped(&self) -> bool {
        self.inner.stopped.get() || self.inner.closed.get()
    }

    fn restore<F>(&self, slot: &RefCell<Option<F>>, handler: F) {
        if self.is_stopped() {
            return;
        }
        let mut slot = slot.borrow_mut();
        if slot.is_none() {
            *slot = Some(handler);
        }
    }

    fn close(&self, reason: &'static str) {
        if self.inner.closed.replace(true) {
            return;
        }
        tracing::trace!(reason, "observer closed");

        drop(self.inner.next_fn.take());
        drop(self.inner.error_fn.take());
        drop(self.inner.complete_fn.take());
        drop(self.inner.pending.take());

        self.inner.teardown.take().run();
    }
}

impl<T, E> Clone for Observer<T, E> {
    fn clone(&self) -> Self {
        Observer {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T, E> Unsubscribeable for Observer<T, E> {
    fn unsubscribe(&self) {
        Observer::unsubscribe(self);
    }

    fn is_closed(&self) -> bool {
        Observer::is_closed(self)
    }
}

impl<T, E> fmt::Debug for Observer<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observer")
            .field("closed", &self.inner.closed.get())
            .finish_non_exhaustive()
    }
}
