use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned identity, also used as the pagination cursor.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct TodoId(pub i64);

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub subject: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Page size used when the caller does not ask for a positive one.
pub const DEFAULT_PAGE_SIZE: i64 = 5;

/// A resolved keyset page over descending ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// Only rows with `id < before` are returned when set.
    pub before: Option<TodoId>,
    pub limit: i64,
}

impl Page {
    /// The cursor is honoured only together with a positive size; a
    /// non-positive size falls back to the newest `DEFAULT_PAGE_SIZE` rows.
    pub fn resolve(prev_id: i64, size: i64) -> Self {
        if prev_id > 0 && size > 0 {
            Self { before: Some(TodoId(prev_id)), limit: size }
        } else if size > 0 {
            Self { before: None, limit: size }
        } else {
            Self { before: None, limit: DEFAULT_PAGE_SIZE }
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateTodoRequest {
    pub subject: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateTodoResponse {
    pub todo: Todo,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateTodoRequest {
    pub id: i64,
    pub subject: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateTodoResponse {
    pub todo: Todo,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ReadTodoRequest {
    pub prev_id: i64,
    pub size: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReadTodoResponse {
    pub todos: Vec<Todo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DeleteTodoRequest {
    pub ids: Vec<i64>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DeleteTodoResponse {}
