//! Domain DTOs for the todo API.
//!
//! # Design
//! These types mirror the remote service's JSON schema (camelCase keys,
//! zone-less ISO-8601 timestamps) but are defined independently from the
//! mock-server crate. Integration tests catch any schema drift between the
//! two.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Rejected;

pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_DESCRIPTION_LEN: usize = 1000;

/// Server-assigned identifier. The client never mints one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(pub i64);

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single todo item returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    pub completed: bool,
    pub created_at: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Request payload for both create (`POST`) and full-replace update (`PUT`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoInput {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

impl TodoInput {
    pub fn new(title: &str, description: &str, completed: bool) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            completed,
        }
    }

    /// Local precondition check run before any request is built.
    /// Lengths are counted in characters, not bytes.
    pub fn validate(&self) -> Result<(), Rejected> {
        if self.title.trim().is_empty() {
            return Err(Rejected::EmptyTitle);
        }
        if self.title.chars().count() > MAX_TITLE_LEN {
            return Err(Rejected::TitleTooLong);
        }
        if self.description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(Rejected::DescriptionTooLong);
        }
        Ok(())
    }
}

/// Body of `GET /todos/health`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Health {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

impl Health {
    pub fn is_up(&self) -> bool {
        self.status.eq_ignore_ascii_case("up")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_reads_camel_case_payload() {
        let todo: Todo = serde_json::from_str(
            r#"{"id":7,"title":"Read","description":"a book","completed":true,
                "createdAt":"2024-01-15T10:30:00","updatedAt":"2024-01-16T08:00:00.123"}"#,
        )
        .unwrap();
        assert_eq!(todo.id, TodoId(7));
        assert_eq!(todo.description, "a book");
        assert!(todo.completed);
        assert!(todo.updated_at.is_some());
    }

    #[test]
    fn null_or_missing_description_reads_as_empty() {
        let with_null: Todo = serde_json::from_str(
            r#"{"id":1,"title":"t","description":null,"completed":false,"createdAt":"2024-01-15T10:30:00"}"#,
        )
        .unwrap();
        assert_eq!(with_null.description, "");

        let missing: Todo = serde_json::from_str(
            r#"{"id":1,"title":"t","completed":false,"createdAt":"2024-01-15T10:30:00"}"#,
        )
        .unwrap();
        assert_eq!(missing.description, "");
        assert!(missing.updated_at.is_none());
    }

    #[test]
    fn blank_title_is_rejected() {
        assert_eq!(TodoInput::new("", "", false).validate(), Err(Rejected::EmptyTitle));
        assert_eq!(TodoInput::new(" \t\n", "", false).validate(), Err(Rejected::EmptyTitle));
    }

    #[test]
    fn length_limits_count_characters() {
        let title = "é".repeat(MAX_TITLE_LEN);
        assert!(TodoInput::new(&title, "", false).validate().is_ok());

        let title = "a".repeat(MAX_TITLE_LEN + 1);
        assert_eq!(TodoInput::new(&title, "", false).validate(), Err(Rejected::TitleTooLong));

        let description = "d".repeat(MAX_DESCRIPTION_LEN + 1);
        assert_eq!(
            TodoInput::new("ok", &description, false).validate(),
            Err(Rejected::DescriptionTooLong)
        );
    }

    #[test]
    fn health_status_is_case_insensitive() {
        let health: Health = serde_json::from_str(r#"{"status":"UP"}"#).unwrap();
        assert!(health.is_up());
        assert_eq!(health.message, "");
    }
}
