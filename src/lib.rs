//! `rxcore` is a small, synchronous implementation of the observable pattern.
//!
//! An [`Observable`] describes how to push a sequence of values to a consumer.
//! Nothing happens until it is subscribed to: every call to
//! [`subscribe`](Subscribeable::subscribe) builds a fresh [`Observer`] around the
//! supplied [`Subscriber`] handlers and runs the producer logic against it, on the
//! caller's stack, before returning a [`Subscription`].
//!
//! The `Observer` guarantees that at most one terminal notification (`error` or
//! `complete`) reaches the handlers, that nothing reaches them afterwards, and that
//! the producer's [`Teardown`] runs exactly once, whichever way the subscription
//! ends.
//!
//! ```
//! use std::{cell::RefCell, rc::Rc};
//!
//! use rxcore::{Observable, Subscribeable, Subscriber, Unsubscribeable};
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let seen_c = Rc::clone(&seen);
//!
//! let subscription = Observable::<_>::from([1, 2, 3])
//!     .subscribe(Subscriber::on_next(move |v| seen_c.borrow_mut().push(v)));
//!
//! assert_eq!(*seen.borrow(), vec![1, 2, 3]);
//! assert!(subscription.is_closed());
//!
//! // Already completed, so this is a no-op.
//! subscription.unsubscribe();
//! ```

mod observable;
mod observer;
mod subscription;

pub use observable::*;
pub use observer::Observer;

pub use subscription::subscribe::{
    Subscribeable, Subscriber, Subscription, Teardown, Unsubscribeable,
};

/// Default payload carried by `error` notifications.
///
/// The core never inspects error payloads, so any type can be used instead by
/// naming it as the second type parameter of [`Observable`] and [`Observer`].
pub type ObservableError = std::rc::Rc<dyn std::error::Error>;
