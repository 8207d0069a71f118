//! Session-scoped todo store.
//!
//! # Design
//! The store's list only ever reflects what the remote service confirmed:
//! - every mutation performs exactly one remote call and touches the list
//!   only after that call resolves, using only that call's response;
//! - a failed call leaves the list untouched and records a `StoreError`;
//! - nothing speculative is ever inserted.
//!
//! Methods take `&self` so several operations can be in flight at once on a
//! single thread (e.g. under `join!`). State sits in a `RefCell` that is
//! borrowed only between suspension points, never across an `.await`, so
//! each response is merged into the list as it stands when that response
//! arrives. Concurrent writes to the same todo are last-writer-wins; a later
//! `load()` resynchronises with the server.

use std::cell::RefCell;

use tracing::{debug, warn};

use crate::api::TodoApi;
use crate::config::ClientConfig;
use crate::error::{ApiError, Rejected, StoreError};
use crate::transport::{ReqwestTransport, Transport};
use crate::types::{Health, Todo, TodoId, TodoInput};
use crate::view::{self, Counts, Filter};

#[derive(Debug, Default)]
struct State {
    todos: Vec<Todo>,
    loads_in_flight: usize,
    error: Option<StoreError>,
    filter: Filter,
}

/// Everything the presentation layer renders, captured at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoView {
    pub todos: Vec<Todo>,
    pub filtered: Vec<Todo>,
    pub counts: Counts,
    pub filter: Filter,
    pub loading: bool,
    pub error: Option<StoreError>,
}

#[derive(Debug)]
pub struct Store<T> {
    api: TodoApi<T>,
    state: RefCell<State>,
}

impl Store<ReqwestTransport> {
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        Ok(Self::new(TodoApi::from_config(config)?))
    }
}

impl<T: Transport> Store<T> {
    pub fn new(api: TodoApi<T>) -> Self {
        Self {
            api,
            state: RefCell::default(),
        }
    }

    /// Direct access to the remote endpoints the store does not mirror
    /// (search, status queries, single fetch).
    pub fn api(&self) -> &TodoApi<T> {
        &self.api
    }

    /// Replace the list with the server's. Clears `error` on entry.
    pub async fn load(&self) {
        let _loading = LoadGuard::enter(&self.state);
        match self.api.list().await {
            Ok(todos) => {
                debug!(count = todos.len(), "loaded todos");
                self.state.borrow_mut().todos = todos;
            }
            Err(err) => self.record(StoreError::LoadFailed, &err),
        }
    }

    pub async fn create(&self, title: &str, description: &str) -> Result<(), Rejected> {
        let input = TodoInput::new(title, description, false);
        input.validate()?;

        match self.api.create(&input).await {
            Ok(todo) => {
                debug!(id = %todo.id, "created todo");
                self.state.borrow_mut().todos.push(todo);
            }
            Err(err) => self.record(StoreError::CreateFailed, &err),
        }
        Ok(())
    }

    /// Full-record replace of title and description. The completion flag is
    /// carried over from the local copy, so `id` must be present locally.
    pub async fn update(&self, id: TodoId, title: &str, description: &str) -> Result<(), Rejected> {
        let completed = self
            .state
            .borrow()
            .todos
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.completed)
            .ok_or(Rejected::UnknownTodo(id))?;
        let input = TodoInput::new(title, description, completed);
        input.validate()?;

        match self.api.update(id, &input).await {
            Ok(todo) => self.replace(todo),
            Err(err) => self.record(StoreError::UpdateFailed, &err),
        }
        Ok(())
    }

    /// The server flips the flag; the local copy is replaced with its answer.
    pub async fn toggle(&self, id: TodoId) {
        match self.api.toggle(id).await {
            Ok(todo) => self.replace(todo),
            Err(err) => self.record(StoreError::ToggleFailed, &err),
        }
    }

    pub async fn remove(&self, id: TodoId) {
        match self.api.delete(id).await {
            Ok(()) => {
                debug!(%id, "deleted todo");
                self.state.borrow_mut().todos.retain(|t| t.id != id);
            }
            Err(err) => self.record(StoreError::DeleteFailed, &err),
        }
    }

    pub async fn remove_all(&self) {
        match self.api.delete_all().await {
            Ok(()) => {
                debug!("deleted all todos");
                self.state.borrow_mut().todos.clear();
            }
            Err(err) => self.record(StoreError::DeleteFailed, &err),
        }
    }

    /// Liveness probe. Does not touch `error`.
    pub async fn health(&self) -> Result<Health, ApiError> {
        self.api.health().await
    }

    pub fn todos(&self) -> Vec<Todo> {
        self.state.borrow().todos.clone()
    }

    pub fn filtered_todos(&self) -> Vec<Todo> {
        let state = self.state.borrow();
        state
            .todos
            .iter()
            .filter(|t| state.filter.matches(t))
            .cloned()
            .collect()
    }

    pub fn counts(&self) -> Counts {
        view::counts(&self.state.borrow().todos)
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loads_in_flight > 0
    }

    pub fn error(&self) -> Option<StoreError> {
        self.state.borrow().error
    }

    pub fn clear_error(&self) {
        self.state.borrow_mut().error = None;
    }

    pub fn filter(&self) -> Filter {
        self.state.borrow().filter
    }

    pub fn set_filter(&self, filter: Filter) {
        self.state.borrow_mut().filter = filter;
    }

    pub fn view(&self) -> TodoView {
        let state = self.state.borrow();
        let filtered: Vec<Todo> = view::filtered_todos(&state.todos, state.filter)
            .into_iter()
            .cloned()
            .collect();
        TodoView {
            todos: state.todos.clone(),
            filtered,
            counts: view::counts(&state.todos),
            filter: state.filter,
            loading: state.loads_in_flight > 0,
            error: state.error,
        }
    }

    /// Swap in the server's copy at the entry's current position. If the
    /// entry vanished while the call was in flight the response is dropped.
    fn replace(&self, todo: Todo) {
        let mut state = self.state.borrow_mut();
        match state.todos.iter_mut().find(|t| t.id == todo.id) {
            Some(slot) => {
                debug!(id = %todo.id, completed = todo.completed, "applied server copy");
                *slot = todo;
            }
            None => debug!(id = %todo.id, "todo no longer listed, response dropped"),
        }
    }

    fn record(&self, error: StoreError, cause: &ApiError) {
        warn!(%cause, "{error}");
        self.state.borrow_mut().error = Some(error);
    }
}

/// Marks a load as in flight; unmarks it on drop, including when the load
/// future is dropped before completing.
struct LoadGuard<'a> {
    state: &'a RefCell<State>,
}

impl<'a> LoadGuard<'a> {
    fn enter(state: &'a RefCell<State>) -> Self {
        {
            let mut state = state.borrow_mut();
            state.error = None;
            state.loads_in_flight += 1;
        }
        Self { state }
    }
}

impl Drop for LoadGuard<'_> {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.try_borrow_mut() {
            state.loads_in_flight = state.loads_in_flight.saturating_sub(1);
        }
    }
}
