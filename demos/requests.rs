//! Streams a couple of mock HTTP requests through an `Observable` and handles
//! them with plain callbacks.
//!
//! Run with `RUST_LOG=trace cargo run --example requests` to also see the
//! subscription lifecycle events emitted by `rxcore`.

use std::{collections::HashMap, rc::Rc, time::SystemTime};

use rxcore::{Observable, ObservableError, Subscribeable, Subscriber, Unsubscribeable};
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

const HTTP_STATUS_OK: u16 = 200;
const HTTP_STATUS_INTERNAL_SERVER_ERROR: u16 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    Get,
    Post,
}

#[derive(Debug, Clone)]
struct User {
    name: String,
    age: u32,
    roles: Vec<String>,
    created_at: SystemTime,
    is_deleted: bool,
}

#[derive(Debug, Clone)]
struct CustomRequest {
    method: Method,
    host: String,
    path: String,
    body: Option<User>,
    params: HashMap<String, String>,
}

#[derive(Debug)]
struct Response {
    status: u16,
}

#[derive(Debug, Error)]
#[error("request stream failed: {0}")]
struct RequestError(String);

fn user_mock() -> User {
    User {
        name: "User Name".to_string(),
        age: 26,
        roles: vec!["user".to_string(), "admin".to_string()],
        created_at: SystemTime::now(),
        is_deleted: false,
    }
}

fn requests_mock() -> Vec<CustomRequest> {
    vec![
        CustomRequest {
            method: Method::Post,
            host: "service.example".to_string(),
            path: "user".to_string(),
            body: Some(user_mock()),
            params: HashMap::new(),
        },
        CustomRequest {
            method: Method::Get,
            host: "service.example".to_string(),
            path: "user".to_string(),
            body: None,
            params: HashMap::from([("id".to_string(), "3f5h67s4s".to_string())]),
        },
    ]
}

fn handle_request(request: CustomRequest) -> Response {
    info!(
        method = ?request.method,
        host = %request.host,
        path = %request.path,
        params = ?request.params,
        user = ?request.body.as_ref().map(|u| (&u.name, u.age, &u.roles, u.created_at, u.is_deleted)),
        "handling request"
    );
    Response {
        status: HTTP_STATUS_OK,
    }
}

fn handle_error(error: ObservableError) -> Response {
    info!(%error, "handling error");
    Response {
        status: HTTP_STATUS_INTERNAL_SERVER_ERROR,
    }
}

fn handle_complete() {
    info!("complete");
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let requests: Observable<CustomRequest> = Observable::from(requests_mock());

    let subscription = requests.subscribe(Subscriber::new(
        |request| {
            let response = handle_request(request);
            info!(status = response.status, "request handled");
        },
        |error| {
            let response = handle_error(error);
            info!(status = response.status, "error handled");
        },
        handle_complete,
    ));

    subscription.unsubscribe();

    // A stream that fails instead of completing.
    let failing: Observable<CustomRequest> =
        Observable::throw(Rc::new(RequestError("upstream unavailable".to_string())) as ObservableError);
    failing.subscribe(
        Subscriber::on_next(|request| {
            handle_request(request);
        })
        .with_error(|error| {
            handle_error(error);
        }),
    );
}
