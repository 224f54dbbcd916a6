use crate::domain::error::TodoError;
use crate::domain::repository::TodoRepository;
use crate::domain::todo::{Page, Todo, TodoId};
use async_trait::async_trait;
use chrono::Utc;

pub type ServiceResult<T> = Result<T, TodoError>;

#[async_trait]
pub trait TodoService: Send + Sync + 'static {
    async fn create(&self, subject: String, description: String) -> ServiceResult<Todo>;
    async fn read(&self, prev_id: i64, size: i64) -> ServiceResult<Vec<Todo>>;
    async fn update(&self, id: i64, subject: String, description: String) -> ServiceResult<Todo>;
    async fn delete(&self, ids: &[i64]) -> ServiceResult<()>;
}

#[derive(Clone)]
pub struct TodoServiceImpl<R: TodoRepository> {
    repo: R,
}

impl<R: TodoRepository> TodoServiceImpl<R> {
    pub fn new(repo: R) -> Self { Self { repo } }
}

#[async_trait]
impl<R: TodoRepository> TodoService for TodoServiceImpl<R> {
    async fn create(&self, subject: String, description: String) -> ServiceResult<Todo> {
        // Defensive no-op: the handler rejects empty subjects first, but the
        // service never persists one either.
        if subject.is_empty() {
            let now = Utc::now();
            return Ok(Todo { id: TodoId::default(), subject, description, created_at: now, updated_at: now });
        }

        let id = self.repo.insert(&subject, &description).await?;
        // Timestamps come from the store, not the local clock.
        match self.repo.find(id).await? {
            Some(todo) => Ok(todo),
            None => Err(TodoError::Internal(anyhow::anyhow!("inserted todo {} vanished", id.0))),
        }
    }

    async fn read(&self, prev_id: i64, size: i64) -> ServiceResult<Vec<Todo>> {
        let page = Page::resolve(prev_id, size);
        tracing::debug!(?page, "reading todos");
        Ok(self.repo.list(page).await?)
    }

    async fn update(&self, id: i64, subject: String, description: String) -> ServiceResult<Todo> {
        if id <= 0 { return Err(TodoError::NotFound); }
        if subject.is_empty() { return Err(TodoError::InvalidSubject); }

        let id = TodoId(id);
        self.repo.update(id, &subject, &description).await?;
        // Existence is checked after the write: a missing row simply matched nothing.
        self.repo.find(id).await?.ok_or(TodoError::NotFound)
    }

    async fn delete(&self, ids: &[i64]) -> ServiceResult<()> {
        if ids.is_empty() { return Ok(()); }

        let ids: Vec<TodoId> = ids.iter().copied().map(TodoId).collect();
        let removed = self.repo.delete_many(&ids).await?;
        tracing::debug!(requested = ids.len(), removed, "deleted todos");
        if removed == 0 { Err(TodoError::NotFound) } else { Ok(()) }
    }
}
