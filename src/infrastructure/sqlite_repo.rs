use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow}, Pool, QueryBuilder, Row, Sqlite};

use crate::domain::{
    repository::TodoRepository,
    todo::{Page, Todo, TodoId},
};

/// RFC 3339 UTC with millisecond precision, produced by SQLite itself.
const NOW: &str = "strftime('%Y-%m-%dT%H:%M:%fZ', 'now')";

#[derive(Clone)]
pub struct SqliteTodoRepository {
    pool: Arc<Pool<Sqlite>>,
}

impl SqliteTodoRepository {
    /// Opens the pool, creating the database file when it does not exist yet.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let connect_options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("invalid database url {database_url}"))?
            .create_if_missing(true);
        // Every connection to `:memory:` opens a separate database, so the
        // pool must keep exactly one alive.
        let options = if is_memory(database_url) {
            SqlitePoolOptions::new().max_connections(1).idle_timeout(None).max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections)
        };
        let pool = options
            .connect_with(connect_options)
            .await
            .with_context(|| format!("failed to open {database_url}"))?;
        Ok(Self { pool: Arc::new(pool) })
    }
}

fn is_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

#[async_trait]
impl TodoRepository for SqliteTodoRepository {
    async fn init(&self) -> Result<()> {
        sqlx::query(&format!(
            "CREATE TABLE IF NOT EXISTS todos (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                subject TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL DEFAULT ({NOW}),
                updated_at TEXT NOT NULL DEFAULT ({NOW})
            )"
        ))
        .execute(&*self.pool)
        .await?;
        Ok(())
    }

    async fn insert(&self, subject: &str, description: &str) -> Result<TodoId> {
        let result = sqlx::query("INSERT INTO todos (subject, description) VALUES (?1, ?2)")
            .bind(subject)
            .bind(description)
            .execute(&*self.pool)
            .await?;
        Ok(TodoId(result.last_insert_rowid()))
    }

    async fn find(&self, id: TodoId) -> Result<Option<Todo>> {
        let row = sqlx::query("SELECT id, subject, description, created_at, updated_at FROM todos WHERE id = ?1")
            .bind(id.0)
            .fetch_optional(&*self.pool)
            .await?;
        row.as_ref().map(row_to_todo).transpose().map_err(Into::into)
    }

    async fn list(&self, page: Page) -> Result<Vec<Todo>> {
        let rows = match page.before {
            Some(before) => {
                sqlx::query("SELECT id, subject, description, created_at, updated_at FROM todos WHERE id < ?1 ORDER BY id DESC LIMIT ?2")
                    .bind(before.0)
                    .bind(page.limit)
                    .fetch_all(&*self.pool)
                    .await?
            }
            None => {
                sqlx::query("SELECT id, subject, description, created_at, updated_at FROM todos ORDER BY id DESC LIMIT ?1")
                    .bind(page.limit)
                    .fetch_all(&*self.pool)
                    .await?
            }
        };

        let mut todos = Vec::with_capacity(rows.len());
        for row in &rows {
            match row_to_todo(row) {
                Ok(todo) => todos.push(todo),
                Err(err) => {
                    tracing::warn!(error = %err, returned = todos.len(), "stopping at undecodable row");
                    break;
                }
            }
        }
        Ok(todos)
    }

    async fn update(&self, id: TodoId, subject: &str, description: &str) -> Result<()> {
        sqlx::query(&format!("UPDATE todos SET subject = ?2, description = ?3, updated_at = {NOW} WHERE id = ?1"))
            .bind(id.0)
            .bind(subject)
            .bind(description)
            .execute(&*self.pool)
            .await?;
        Ok(())
    }

    async fn delete_many(&self, ids: &[TodoId]) -> Result<u64> {
        if ids.is_empty() { return Ok(0); }

        let mut builder = QueryBuilder::<Sqlite>::new("DELETE FROM todos WHERE id IN (");
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(id.0);
        }
        separated.push_unseparated(")");

        let result = builder.build().execute(&*self.pool).await?;
        Ok(result.rows_affected())
    }
}

fn row_to_todo(row: &SqliteRow) -> Result<Todo, sqlx::Error> {
    Ok(Todo {
        id: TodoId(row.try_get("id")?),
        subject: row.try_get("subject")?,
        description: row.try_get("description")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
