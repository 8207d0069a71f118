//! Derived view state: the status filter and aggregate counts.
//!
//! Everything here is a pure function of the todo list and the filter. No
//! remote calls, no mutation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Todo;

/// Which todos the presentation layer shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Active, Filter::Completed];

    pub fn matches(self, todo: &Todo) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !todo.completed,
            Filter::Completed => todo.completed,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Active => "active",
            Filter::Completed => "completed",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown filter {0:?}, expected all, active or completed")]
pub struct UnknownFilter(pub String);

impl FromStr for Filter {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Filter::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownFilter(s.to_string()))
    }
}

/// `active + completed == total` by construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counts {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
}

/// The subsequence of `todos` that `filter` keeps, in original order.
pub fn filtered_todos(todos: &[Todo], filter: Filter) -> Vec<&Todo> {
    todos.iter().filter(|t| filter.matches(t)).collect()
}

pub fn counts(todos: &[Todo]) -> Counts {
    let completed = todos.iter().filter(|t| t.completed).count();
    Counts {
        total: todos.len(),
        active: todos.len() - completed,
        completed,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;
    use proptest::prelude::*;

    use super::*;
    use crate::types::TodoId;

    fn todo(id: i64, completed: bool) -> Todo {
        Todo {
            id: TodoId(id),
            title: format!("todo {id}"),
            description: String::new(),
            completed,
            created_at: NaiveDateTime::parse_from_str("2024-01-15 10:30:00", "%Y-%m-%d %H:%M:%S").unwrap(),
            updated_at: None,
        }
    }

    fn list(flags: &[bool]) -> Vec<Todo> {
        flags
            .iter()
            .enumerate()
            .map(|(i, &done)| todo(i as i64 + 1, done))
            .collect()
    }

    #[test]
    fn filter_keeps_order() {
        let todos = list(&[false, true, false, true]);
        let ids = |f| {
            filtered_todos(&todos, f)
                .into_iter()
                .map(|t| t.id.0)
                .collect::<Vec<_>>()
        };
        assert_eq!(ids(Filter::All), vec![1, 2, 3, 4]);
        assert_eq!(ids(Filter::Active), vec![1, 3]);
        assert_eq!(ids(Filter::Completed), vec![2, 4]);
    }

    #[test]
    fn counts_of_empty_list_are_zero() {
        assert_eq!(counts(&[]), Counts::default());
    }

    #[test]
    fn counts_split_by_completion() {
        let c = counts(&list(&[true, false, false]));
        assert_eq!(
            c,
            Counts {
                total: 3,
                active: 2,
                completed: 1
            }
        );
    }

    #[test]
    fn filter_parses_and_displays() {
        assert_eq!("active".parse::<Filter>(), Ok(Filter::Active));
        assert_eq!(" Completed ".parse::<Filter>(), Ok(Filter::Completed));
        assert!("done".parse::<Filter>().is_err());
        for f in Filter::ALL {
            assert_eq!(f.to_string().parse::<Filter>(), Ok(f));
        }
        assert_eq!(Filter::default(), Filter::All);
    }

    proptest! {
        #[test]
        fn active_plus_completed_is_total(flags in proptest::collection::vec(any::<bool>(), 0..64)) {
            let c = counts(&list(&flags));
            prop_assert_eq!(c.active + c.completed, c.total);
            prop_assert_eq!(c.total, flags.len());
        }

        #[test]
        fn active_and_completed_partition_the_list(flags in proptest::collection::vec(any::<bool>(), 0..64)) {
            let todos = list(&flags);
            let active = filtered_todos(&todos, Filter::Active);
            let completed = filtered_todos(&todos, Filter::Completed);
            prop_assert_eq!(active.len() + completed.len(), todos.len());
            for t in &todos {
                let in_active = active.iter().any(|a| a.id == t.id);
                let in_completed = completed.iter().any(|c| c.id == t.id);
                prop_assert!(in_active != in_completed);
            }
            prop_assert_eq!(filtered_todos(&todos, Filter::All).len(), todos.len());
        }
    }
}
