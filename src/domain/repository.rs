use async_trait::async_trait;
use super::todo::{Page, Todo, TodoId};

/// Row-level access to the backing store. Business rules live in the service.
#[async_trait]
pub trait TodoRepository: Send + Sync + 'static {
    async fn init(&self) -> anyhow::Result<()>;
    /// Inserts a row and returns the id the store assigned to it.
    async fn insert(&self, subject: &str, description: &str) -> anyhow::Result<TodoId>;
    async fn find(&self, id: TodoId) -> anyhow::Result<Option<Todo>>;
    /// Rows are decoded in order; decoding stops at the first bad row and
    /// the rows read so far are returned.
    async fn list(&self, page: Page) -> anyhow::Result<Vec<Todo>>;
    /// Does not report whether a row matched.
    async fn update(&self, id: TodoId, subject: &str, description: &str) -> anyhow::Result<()>;
    /// Returns the number of rows removed.
    async fn delete_many(&self, ids: &[TodoId]) -> anyhow::Result<u64>;
}
