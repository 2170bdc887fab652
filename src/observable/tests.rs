use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use super::*;
use crate::Unsubscribeable;

fn counter() -> (Rc<Cell<u32>>, impl Fn() + Clone) {
    let count = Rc::new(Cell::new(0));
    let count_c = Rc::clone(&count);
    (count, move || count_c.set(count_c.get() + 1))
}

#[test]
fn subscribe_fn_is_not_invoked_until_subscription() {
    let (calls, bump) = counter();

    let observable: Observable<i32, ()> = Observable::new(move |_o| bump());
    assert_eq!(calls.get(), 0);

    observable.subscribe(Subscriber::default());
    assert_eq!(calls.get(), 1);
}

#[test]
fn each_subscription_runs_independently() {
    let (calls, bump) = counter();
    let (teardowns, bump_teardown) = counter();

    let observable: Observable<i32, ()> = Observable::new(move |o| {
        bump();
        o.next(1);
        Teardown::new(bump_teardown.clone())
    });

    let first = observable.subscribe(Subscriber::on_next(|_| {}));
    let second = observable.subscribe(Subscriber::on_next(|_| {}));
    assert_eq!(calls.get(), 2);

    first.unsubscribe();
    assert!(first.is_closed());
    assert!(!second.is_closed());
    assert_eq!(teardowns.get(), 1);

    second.unsubscribe();
    assert_eq!(teardowns.get(), 2);
}

#[test]
fn from_emits_in_order_and_completes() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let (l1, l2) = (Rc::clone(&log), Rc::clone(&log));

    let subscription = Observable::<_, ()>::from(vec!["a", "b", "c"]).subscribe(
        Subscriber::on_next(move |v: &str| l1.borrow_mut().push(v.to_string()))
            .with_complete(move || l2.borrow_mut().push("done".to_string())),
    );

    assert_eq!(*log.borrow(), vec!["a", "b", "c", "done"]);
    assert!(subscription.is_closed());
}

#[test]
fn from_can_be_subscribed_repeatedly() {
    let observable = Observable::<_, ()>::from([1, 2]);

    for _ in 0..3 {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_c = Rc::clone(&seen);
        observable.subscribe(Subscriber::on_next(move |v| seen_c.borrow_mut().push(v)));
        assert_eq!(*seen.borrow(), vec![1, 2]);
    }
}

#[test]
fn empty_completes_without_emitting() {
    let (completes, bump) = counter();
    let (nexts, bump_next) = counter();

    Observable::<i32, ()>::empty().subscribe(
        Subscriber::on_next(move |_| bump_next()).with_complete(move || bump()),
    );

    assert_eq!(completes.get(), 1);
    assert_eq!(nexts.get(), 0);
}

#[test]
fn throw_delivers_error_to_every_subscriber() {
    let errors = Rc::new(RefCell::new(Vec::<&str>::new()));
    let observable = Observable::<i32, &'static str>::throw("nope");

    for _ in 0..2 {
        let errors_c = Rc::clone(&errors);
        let subscription = observable.subscribe(
            Subscriber::default().with_error(move |e: &'static str| errors_c.borrow_mut().push(e)),
        );
        assert!(subscription.is_closed());
    }

    assert_eq!(*errors.borrow(), vec!["nope", "nope"]);
}

#[test]
fn wrapped_teardown_unsubscribes_inner_subscription() {
    let held: Rc<RefCell<Option<Observer<i32, ()>>>> = Rc::new(RefCell::new(None));
    let held_c = Rc::clone(&held);

    let inner: Rc<Observable<i32, ()>> = Rc::new(Observable::new(move |o| {
        *held_c.borrow_mut() = Some(o);
    }));

    let seen = Rc::new(RefCell::new(Vec::new()));
    let seen_c = Rc::clone(&seen);

    let inner_c = Rc::clone(&inner);
    let outer: Observable<i32, ()> = Observable::new(move |o: Observer<i32, ()>| {
        let forward = o.clone();
        inner_c.subscribe(Subscriber::on_next(move |v| forward.next(v)))
    });

    let subscription = outer.subscribe(Subscriber::on_next(move |v| seen_c.borrow_mut().push(v)));

    let inner_observer = held.borrow_mut().take().expect("inner subscribed");
    inner_observer.next(1);
    subscription.unsubscribe();
    inner_observer.next(2);

    assert!(inner_observer.is_closed());
    assert_eq!(*seen.borrow(), vec![1]);
}

#[test]
fn debug_output() {
    let observable = Observable::<i32, ()>::empty();
    assert_eq!(format!("{observable:?}"), "Observable { .. }");

    let subscription = observable.subscribe(Subscriber::default());
    assert_eq!(format!("{subscription:?}"), "Subscription { closed: true }");
}
