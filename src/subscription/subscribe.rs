use std::fmt;

use crate::ObservableError;

/// A trait for types that can be subscribed to, allowing consumers to receive
/// values emitted by an observable stream.
pub trait Subscribeable {
    /// The type of items emitted by the observable stream.
    type ObsType;

    /// The payload type carried by the `error` notification.
    type ErrType;

    /// Subscribes to the observable stream and specifies how to handle emitted values.
    ///
    /// The `Subscriber` parameter defines the handlers for values, errors and
    /// completion. Every call starts an independent execution of the producer
    /// logic, which runs to completion before this method returns.
    ///
    /// The returned `Subscription` can be used to cancel the subscription early.
    fn subscribe(&self, s: Subscriber<Self::ObsType, Self::ErrType>) -> Subscription;
}

/// A trait for types that can be unsubscribed, releasing whatever the producer
/// registered as its [`Teardown`].
pub trait Unsubscribeable {
    /// Stops delivery of further notifications and runs the teardown logic.
    ///
    /// Calling this more than once is harmless: the teardown logic runs only on
    /// the first call, and not at all if the subscription already ended through
    /// `error` or `complete`.
    fn unsubscribe(&self);

    /// Returns `true` once the subscription has ended, for any reason.
    fn is_closed(&self) -> bool;
}

type NextFn<T> = Box<dyn FnMut(T)>;
type ErrorFn<E> = Box<dyn FnMut(E)>;
type CompleteFn = Box<dyn FnMut()>;

/// The set of handlers a consumer registers when subscribing to an `Observable`.
///
/// Every handler is optional. Notifications without a matching handler are
/// dropped, which for `error` means the payload is discarded silently.
///
/// ```
/// use rxcore::{Observable, Subscribeable, Subscriber};
///
/// let subscriber = Subscriber::on_next(|v: i32| println!("Emitted {}", v))
///     .with_complete(|| println!("Completed"));
///
/// Observable::<_>::from([1, 2, 3]).subscribe(subscriber);
/// ```
pub struct Subscriber<NextFnType, ErrorType = ObservableError> {
    pub(crate) next_fn: Option<NextFn<NextFnType>>,
    pub(crate) error_fn: Option<ErrorFn<ErrorType>>,
    pub(crate) complete_fn: Option<CompleteFn>,
}

impl<NextFnType, ErrorType> Subscriber<NextFnType, ErrorType> {
    /// Creates a new `Subscriber` with handlers for emitted values, errors and
    /// completion.
    pub fn new(
        next_fn: impl FnMut(NextFnType) + 'static,
        error_fn: impl FnMut(ErrorType) + 'static,
        complete_fn: impl FnMut() + 'static,
    ) -> Self {
        Subscriber {
            next_fn: Some(Box::new(next_fn)),
            error_fn: Some(Box::new(error_fn)),
            complete_fn: Some(Box::new(complete_fn)),
        }
    }

    /// Create a new Subscriber with only the provided `next` function.
    pub fn on_next(next_fn: impl FnMut(NextFnType) + 'static) -> Self {
        Subscriber {
            next_fn: Some(Box::new(next_fn)),
            error_fn: None,
            complete_fn: None,
        }
    }

    /// Set the error-handling function for the Subscriber.
    pub fn on_error(&mut self, error_fn: impl FnMut(ErrorType) + 'static) {
        self.error_fn = Some(Box::new(error_fn));
    }

    /// Set the completion function for the Subscriber.
    pub fn on_complete(&mut self, complete_fn: impl FnMut() + 'static) {
        self.complete_fn = Some(Box::new(complete_fn));
    }

    #[must_use]
    pub fn with_error(mut self, error_fn: impl FnMut(ErrorType) + 'static) -> Self {
        self.on_error(error_fn);
        self
    }

    #[must_use]
    pub fn with_complete(mut self, complete_fn: impl FnMut() + 'static) -> Self {
        self.on_complete(complete_fn);
        self
    }
}

impl<N, E> Default for Subscriber<N, E> {
    fn default() -> Self {
        Subscriber {
            next_fn: None,
            error_fn: None,
            complete_fn: None,
        }
    }
}

impl<N, E> fmt::Debug for Subscriber<N, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscriber")
            .field("next", &self.next_fn.is_some())
            .field("error", &self.error_fn.is_some())
            .field("complete", &self.complete_fn.is_some())
            .finish()
    }
}

/// Cleanup logic returned by an `Observable`'s subscribe function.
///
/// The `Observer` stores it and runs it exactly once, when the subscription
/// ends through `unsubscribe`, `error` or `complete`.
#[derive(Default)]
pub enum Teardown {
    /// Nothing to clean up.
    #[default]
    Nil,

    /// Teardown logic defined by a function.
    Logic(Box<dyn FnOnce()>),

    /// If one subscription depends on another. The wrapped subscription is
    /// unsubscribed on teardown.
    Wrapped(Box<Subscription>),

    /// Several teardowns, run in order.
    Many(Vec<Teardown>),
}

impl Teardown {
    pub fn new(logic: impl FnOnce() + 'static) -> Self {
        Teardown::Logic(Box::new(logic))
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        matches!(self, Teardown::Nil)
    }

    /// Combines two teardowns so that `self` runs before `other`.
    #[must_use]
    pub fn and(self, other: impl Into<Teardown>) -> Self {
        match (self, other.into()) {
            (Teardown::Nil, t) | (t, Teardown::Nil) => t,
            (Teardown::Many(mut ts), t) => {
                ts.push(t);
                Teardown::Many(ts)
            }
            (t, other) => Teardown::Many(vec![t, other]),
        }
    }

    pub(crate) fn run(self) {
        match self {
            Teardown::Nil => (),
            Teardown::Logic(fnc) => fnc(),
            Teardown::Wrapped(subscription) => subscription.unsubscribe(),
            Teardown::Many(teardowns) => {
                for t in teardowns {
                    t.run();
                }
            }
        }
    }
}

impl From<()> for Teardown {
    fn from((): ()) -> Self {
        Teardown::Nil
    }
}

impl From<Subscription> for Teardown {
    fn from(subscription: Subscription) -> Self {
        Teardown::Wrapped(Box::new(subscription))
    }
}

impl fmt::Debug for Teardown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Teardown::Nil => f.write_str("Nil"),
            Teardown::Logic(_) => f.write_str("Logic(..)"),
            Teardown::Wrapped(s) => f.debug_tuple("Wrapped").field(s).finish(),
            Teardown::Many(ts) => f.debug_tuple("Many").field(ts).finish(),
        }
    }
}

/// Represents a subscription to an observable, allowing it to be cancelled.
///
/// Dropping a `Subscription` does not unsubscribe; the subscription keeps
/// running until the producer terminates it or `unsubscribe` is called.
pub struct Subscription {
    observer: Box<dyn Unsubscribeable>,
}

impl Subscription {
    pub(crate) fn new(observer: impl Unsubscribeable + 'static) -> Self {
        Subscription {
            observer: Box::new(observer),
        }
    }
}

impl Unsubscribeable for Subscription {
    fn unsubscribe(&self) {
        self.observer.unsubscribe();
    }

    fn is_closed(&self) -> bool {
        self.observer.is_closed()
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("closed", &self.is_closed())
            .finish()
    }
}
