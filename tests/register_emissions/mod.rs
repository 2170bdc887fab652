use std::{cell::RefCell, fmt::Debug, rc::Rc};

use rxcore::{Subscriber, Teardown};

#[derive(Debug, Clone, PartialEq)]
pub enum Notification<T, E> {
    Next(T),
    Error(E),
    Complete,
    Teardown,
}

pub type Emissions<T, E> = Rc<RefCell<Vec<Notification<T, E>>>>;

/// Builds a `Subscriber` that records every notification it receives, in order,
/// into the returned log.
pub fn register_emissions_subscriber<T, E>() -> (Subscriber<T, E>, Emissions<T, E>)
where
    T: Debug + 'static,
    E: Debug + 'static,
{
    let emissions: Emissions<T, E> = Rc::new(RefCell::new(Vec::with_capacity(5)));
    let nexts_c = Rc::clone(&emissions);
    let errors_c = Rc::clone(&emissions);
    let completes_c = Rc::clone(&emissions);

    let subscriber = Subscriber::new(
        move |n| {
            // Track next() calls.
            nexts_c.borrow_mut().push(Notification::Next(n));
        },
        move |e| {
            // Track error() calls.
            errors_c.borrow_mut().push(Notification::Error(e));
        },
        move || {
            // Track complete() calls.
            completes_c.borrow_mut().push(Notification::Complete);
        },
    );
    (subscriber, emissions)
}

/// A teardown that records itself into `emissions` when run.
pub fn recording_teardown<T: 'static, E: 'static>(emissions: &Emissions<T, E>) -> Teardown {
    let emissions = Rc::clone(emissions);
    Teardown::new(move || emissions.borrow_mut().push(Notification::Teardown))
}

pub fn teardown_count<T, E>(emissions: &Emissions<T, E>) -> usize {
    emissions
        .borrow()
        .iter()
        .filter(|n| matches!(n, Notification::Teardown))
        .count()
}
