//! The `observable` module provides the `Observable` type, a cold, synchronous
//! source of values.

use std::fmt;

use crate::{
    observer::Observer,
    subscription::subscribe::{Subscribeable, Subscriber, Subscription, Teardown},
    ObservableError,
};

type SubscribeFn<T, E> = Box<dyn Fn(Observer<T, E>) -> Teardown>;

/// The `Observable` struct represents a source of values that can be observed.
///
/// It wraps a subscribe function which receives an [`Observer`] and drives it
/// with `next`, `error` and `complete` calls. The subscribe function may return
/// a [`Teardown`] (or `()` when there is nothing to release); it runs once the
/// subscription ends.
///
/// Observables are cold: nothing is emitted until `subscribe` is called, and each
/// call runs the subscribe function again for a new, independent `Observer`.
///
/// # Example: custom `Observable` with teardown
///
/// ```
/// use std::{cell::Cell, rc::Rc};
///
/// use rxcore::{Observable, Subscribeable, Subscriber, Teardown};
///
/// let released = Rc::new(Cell::new(false));
/// let released_c = Rc::clone(&released);
///
/// let observable: Observable<i32> = Observable::new(move |o| {
///     for i in 1..=10 {
///         o.next(i);
///     }
///     o.complete();
///
///     let released = Rc::clone(&released_c);
///     Teardown::new(move || released.set(true))
/// });
///
/// observable.subscribe(Subscriber::on_next(|v| println!("Emitted {}", v)));
/// assert!(released.get());
/// ```
pub struct Observable<T, E = ObservableError> {
    subscribe_fn: SubscribeFn<T, E>,
}

impl<T: 'static, E: 'static> Observable<T, E> {
    /// Creates a new `Observable` with the provided subscribe function.
    ///
    /// The function is stored and only invoked when the `Observable` is
    /// subscribed to, once per subscription.
    pub fn new<R>(sf: impl Fn(Observer<T, E>) -> R + 'static) -> Self
    where
        R: Into<Teardown>,
    {
        Observable {
            subscribe_fn: Box::new(move |o| sf(o).into()),
        }
    }

    /// Creates an `Observable` that emits every item of `values`, in order, and
    /// then completes.
    ///
    /// The items are collected up front and cloned for each subscription. An
    /// empty sequence completes without emitting.
    ///
    /// The error type is not inferred from its default. When neither the
    /// subscriber nor a type annotation fixes it, name the value type only to
    /// get [`ObservableError`]:
    ///
    /// ```
    /// use rxcore::{Observable, Subscribeable, Subscriber};
    ///
    /// Observable::<_>::from(["a", "b"]).subscribe(Subscriber::on_next(|v| println!("{}", v)));
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Clone,
    {
        let values: Vec<T> = values.into_iter().collect();

        Observable::new(move |o: Observer<T, E>| {
            for v in &values {
                o.next(v.clone());
            }
            o.complete();

            let emitted = values.len();
            Teardown::new(move || tracing::debug!(emitted, "from sequence torn down"))
        })
    }

    /// Creates an `Observable` that completes immediately.
    #[must_use]
    pub fn empty() -> Self {
        Observable::new(|o: Observer<T, E>| o.complete())
    }

    /// Creates an `Observable` that emits `err` as a terminal error immediately.
    pub fn throw(err: E) -> Self
    where
        E: Clone,
    {
        Observable::new(move |o: Observer<T, E>| o.error(err.clone()))
    }
}

impl<T: 'static, E: 'static> Subscribeable for Observable<T, E> {
    type ObsType = T;
    type ErrType = E;

    fn subscribe(&self, s: Subscriber<T, E>) -> Subscription {
        tracing::trace!(subscriber = ?s, "subscribing to observable");

        let observer = Observer::new(s);
        let teardown = (self.subscribe_fn)(observer.clone());
        observer.set_teardown(teardown);

        Subscription::new(observer)
    }
}

impl<T, E> fmt::Debug for Observable<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
