//! Client-side state reconciliation for the todo service.
//!
//! # Overview
//! A `Store` keeps an in-memory todo list that strictly reflects the remote
//! service: every mutation performs one remote call and is applied to the
//! list only once the server has answered. `view` derives the filtered list
//! and counts the presentation layer renders.
//!
//! # Design
//! - `TodoClient` is stateless and sans-IO: `build_*` produces an
//!   `HttpRequest`, `parse_*` consumes an `HttpResponse`.
//! - `Transport` is the only I/O seam; `ReqwestTransport` is the production
//!   implementation. `TodoApi` pairs the two into async endpoint calls.
//! - Remote failures never escape a store mutation. They are recorded as a
//!   `StoreError` in the store's error slot. Local precondition failures come
//!   back as `Rejected` without any request being sent.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod store;
pub mod transport;
pub mod types;
pub mod view;

#[cfg(test)]
mod testing;

pub use api::TodoApi;
pub use client::TodoClient;
pub use config::ClientConfig;
pub use error::{ApiError, Rejected, StoreError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use store::{Store, TodoView};
pub use transport::{ReqwestTransport, Transport};
pub use types::{Health, Todo, TodoId, TodoInput};
pub use view::{Counts, Filter};
