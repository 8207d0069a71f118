//! In-process stand-in for the remote todo service.
//!
//! Implements the full REST contract the client consumes: list (optionally
//! filtered by status), search, get, create, full-replace update, toggle,
//! delete, delete-all and a health probe. Identifiers and timestamps are
//! assigned here, never by the client.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_DESCRIPTION_LEN: usize = 1000;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Body of both `POST /todos` and `PUT /todos/{id}`.
#[derive(Deserialize)]
pub struct TodoInput {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

impl TodoInput {
    fn is_valid(&self) -> bool {
        let title_len = self.title.chars().count();
        let description_len = self.description.as_deref().map_or(0, |d| d.chars().count());
        !self.title.trim().is_empty()
            && title_len <= MAX_TITLE_LEN
            && description_len <= MAX_DESCRIPTION_LEN
    }
}

#[derive(Deserialize)]
pub struct ListParams {
    pub completed: Option<bool>,
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub title: String,
}

/// Rows keyed by id; ids grow monotonically so iteration order is creation
/// order.
#[derive(Debug, Default)]
pub struct Todos {
    next_id: i64,
    rows: BTreeMap<i64, Todo>,
}

impl Todos {
    pub fn insert(&mut self, input: TodoInput) -> Todo {
        self.next_id += 1;
        let now = Local::now().naive_local();
        let todo = Todo {
            id: self.next_id,
            title: input.title,
            description: input.description,
            completed: input.completed,
            created_at: now,
            updated_at: now,
        };
        self.rows.insert(todo.id, todo.clone());
        todo
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub type Db = Arc<RwLock<Todos>>;

/// Router over an empty store.
pub fn app() -> Router {
    app_with(Db::default())
}

pub fn app_with(db: Db) -> Router {
    Router::new()
        .route("/todos", get(list_todos).post(create_todo).delete(delete_all_todos))
        .route("/todos/health", get(health))
        .route("/todos/search", get(search_todos))
        .route("/todos/{id}", get(get_todo).put(update_todo).delete(delete_todo))
        .route("/todos/{id}/toggle", patch(toggle_todo))
        .with_state(db)
}

/// A store pre-populated with the five workshop sample todos.
pub fn sample_db() -> Db {
    let samples = [
        (
            "Complete Module 01 - Getting Started",
            "Set up the development environment and verify all tools are installed",
            true,
        ),
        (
            "Explore Module 02 - Backend API",
            "Understand the Spring Boot application structure and REST API endpoints",
            false,
        ),
        (
            "Build Module 03 - React Frontend",
            "Create the React application and connect it to the backend API",
            false,
        ),
        (
            "Configure CI/CD Pipeline",
            "Set up GitHub Actions for automated deployment",
            false,
        ),
        (
            "Deploy to Production",
            "Deploy backend to Render and frontend to GitHub Pages",
            false,
        ),
    ];

    let mut todos = Todos::default();
    for (title, description, completed) in samples {
        todos.insert(TodoInput {
            title: title.to_string(),
            description: Some(description.to_string()),
            completed,
        });
    }
    Arc::new(RwLock::new(todos))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, Db::default()).await
}

pub async fn run_with(listener: TcpListener, db: Db) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(db)).await
}

async fn list_todos(
    State(db): State<Db>,
    Query(params): Query<ListParams>,
) -> Json<Vec<Todo>> {
    let todos = db.read().await;
    Json(
        todos
            .rows
            .values()
            .filter(|t| params.completed.map_or(true, |c| t.completed == c))
            .cloned()
            .collect(),
    )
}

async fn search_todos(
    State(db): State<Db>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<Todo>> {
    let needle = params.title.to_lowercase();
    let todos = db.read().await;
    Json(
        todos
            .rows
            .values()
            .filter(|t| t.title.to_lowercase().contains(&needle))
            .cloned()
            .collect(),
    )
}

async fn create_todo(
    State(db): State<Db>,
    Json(input): Json<TodoInput>,
) -> Result<(StatusCode, Json<Todo>), StatusCode> {
    if !input.is_valid() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let todo = db.write().await.insert(input);
    tracing::debug!(id = todo.id, "created todo");
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn get_todo(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<Todo>, StatusCode> {
    let todos = db.read().await;
    todos.rows.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<TodoInput>,
) -> Result<Json<Todo>, StatusCode> {
    if !input.is_valid() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let mut todos = db.write().await;
    let todo = todos.rows.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    todo.title = input.title;
    todo.description = input.description;
    todo.completed = input.completed;
    todo.updated_at = Local::now().naive_local();
    Ok(Json(todo.clone()))
}

async fn toggle_todo(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<Todo>, StatusCode> {
    let mut todos = db.write().await;
    let todo = todos.rows.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    todo.completed = !todo.completed;
    todo.updated_at = Local::now().naive_local();
    Ok(Json(todo.clone()))
}

async fn delete_todo(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, StatusCode> {
    let mut todos = db.write().await;
    todos.rows.remove(&id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(json!({ "message": "Todo deleted successfully" })))
}

async fn delete_all_todos(State(db): State<Db>) -> Json<Value> {
    db.write().await.rows.clear();
    Json(json!({ "message": "All todos deleted successfully" }))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "UP", "message": "TODO API is running" }))
}
