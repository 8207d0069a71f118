//! Error types for the todo client.
//!
//! # Design
//! Three layers, each with its own audience:
//! - `ApiError` describes what went wrong talking to the remote service.
//!   `NotFound` gets a dedicated variant because callers distinguish "the
//!   resource does not exist" from "the server returned an unexpected status."
//! - `StoreError` is the user-facing category a failed store operation
//!   records. Every `ApiError` collapses into exactly one of these.
//! - `Rejected` is a local precondition failure caught before any request is
//!   built. It never reaches the store's error slot.

use thiserror::Error;

use crate::types::{TodoId, MAX_DESCRIPTION_LEN, MAX_TITLE_LEN};

/// Errors returned by `TodoClient` parse methods and by transports.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404, the requested todo does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// A request URL could not be assembled from the base URL.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// The request never produced a response (connect failure, timeout).
    #[error("transport failed: {0}")]
    Transport(String),
}

/// The category recorded in the store's error slot when a remote call fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Failed to load todos. Please make sure the backend is running.")]
    LoadFailed,
    #[error("Failed to create todo")]
    CreateFailed,
    #[error("Failed to update todo")]
    UpdateFailed,
    #[error("Failed to update todo")]
    ToggleFailed,
    #[error("Failed to delete todo")]
    DeleteFailed,
}

/// A store call refused locally; no request was sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejected {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("title exceeds {} characters", MAX_TITLE_LEN)]
    TitleTooLong,
    #[error("description exceeds {} characters", MAX_DESCRIPTION_LEN)]
    DescriptionTooLong,
    #[error("todo {0} not found")]
    UnknownTodo(TodoId),
}
