//! Provides structures and traits related to subscription management.
//!
//! This module includes `Subscriber`, the set of handlers for observed values,
//! errors and completion, `Teardown` for the cleanup logic a producer hands back,
//! and `Subscription` for cancelling a running subscription.
pub mod subscribe;
