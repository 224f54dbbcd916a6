#[cfg(test)]
mod tests {
    use super::super::todo_service::{TodoService, TodoServiceImpl};
    use crate::domain::{error::TodoError, repository::TodoRepository, todo::{Page, Todo, TodoId}};
    use anyhow::Result;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::collections::BTreeMap;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Store {
        rows: BTreeMap<i64, Todo>,
        next_id: i64,
        writes: usize,
    }

    #[derive(Clone, Default)]
    struct InMemoryRepo {
        store: Arc<Mutex<Store>>,
    }

    impl InMemoryRepo {
        fn writes(&self) -> usize { self.store.lock().unwrap().writes }
        fn len(&self) -> usize { self.store.lock().unwrap().rows.len() }
    }

    #[async_trait]
    impl TodoRepository for InMemoryRepo {
        async fn init(&self) -> Result<()> { Ok(()) }
        async fn insert(&self, subject: &str, description: &str) -> Result<TodoId> {
            let mut store = self.store.lock().unwrap();
            store.next_id += 1;
            store.writes += 1;
            let now = Utc::now();
            let id = TodoId(store.next_id);
            store.rows.insert(id.0, Todo { id, subject: subject.into(), description: description.into(), created_at: now, updated_at: now });
            Ok(id)
        }
        async fn find(&self, id: TodoId) -> Result<Option<Todo>> { Ok(self.store.lock().unwrap().rows.get(&id.0).cloned()) }
        async fn list(&self, page: Page) -> Result<Vec<Todo>> {
            let store = self.store.lock().unwrap();
            Ok(store.rows.values().rev()
                .filter(|t| page.before.is_none_or(|before| t.id < before))
                .take(page.limit as usize)
                .cloned()
                .collect())
        }
        async fn update(&self, id: TodoId, subject: &str, description: &str) -> Result<()> {
            let mut store = self.store.lock().unwrap();
            store.writes += 1;
            if let Some(todo) = store.rows.get_mut(&id.0) {
                todo.subject = subject.into();
                todo.description = description.into();
                todo.updated_at = Utc::now();
            }
            Ok(())
        }
        async fn delete_many(&self, ids: &[TodoId]) -> Result<u64> {
            let mut store = self.store.lock().unwrap();
            store.writes += 1;
            Ok(ids.iter().filter(|id| store.rows.remove(&id.0).is_some()).count() as u64)
        }
    }

    struct FailingRepo;

    #[async_trait]
    impl TodoRepository for FailingRepo {
        async fn init(&self) -> Result<()> { Ok(()) }
        async fn insert(&self, _: &str, _: &str) -> Result<TodoId> { anyhow::bail!("disk full") }
        async fn find(&self, _: TodoId) -> Result<Option<Todo>> { anyhow::bail!("disk full") }
        async fn list(&self, _: Page) -> Result<Vec<Todo>> { anyhow::bail!("disk full") }
        async fn update(&self, _: TodoId, _: &str, _: &str) -> Result<()> { anyhow::bail!("disk full") }
        async fn delete_many(&self, _: &[TodoId]) -> Result<u64> { anyhow::bail!("disk full") }
    }

    async fn seeded(n: usize) -> (InMemoryRepo, TodoServiceImpl<InMemoryRepo>) {
        let repo = InMemoryRepo::default();
        let service = TodoServiceImpl::new(repo.clone());
        for i in 0..n {
            service.create(format!("todo {i}"), String::new()).await.unwrap();
        }
        (repo, service)
    }

    #[tokio::test]
    async fn unit_create_then_read_newest() {
        let (_, service) = seeded(0).await;
        let created = service.create("X".into(), "desc".into()).await.unwrap();
        assert!(created.id.0 > 0);
        let page = service.read(0, 1).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].subject, "X");
        assert_eq!(page[0].id, created.id);
    }

    #[tokio::test]
    async fn unit_create_with_empty_subject_is_not_persisted() {
        let (repo, service) = seeded(2).await;
        let todo = service.create(String::new(), "ignored".into()).await.unwrap();
        assert_eq!(todo.id, TodoId(0));
        assert_eq!(repo.len(), 2);
        assert_eq!(repo.writes(), 2);
    }

    #[tokio::test]
    async fn unit_read_pages_without_overlap() {
        let (_, service) = seeded(10).await;
        let first = service.read(0, 3).await.unwrap();
        let ids: Vec<i64> = first.iter().map(|t| t.id.0).collect();
        assert_eq!(ids, vec![10, 9, 8]);
        let second = service.read(first[2].id.0, 3).await.unwrap();
        let ids: Vec<i64> = second.iter().map(|t| t.id.0).collect();
        assert_eq!(ids, vec![7, 6, 5]);
    }

    #[tokio::test]
    async fn unit_read_defaults_to_five() {
        let (_, service) = seeded(8).await;
        assert_eq!(service.read(0, 0).await.unwrap().len(), 5);
        assert_eq!(service.read(4, 0).await.unwrap().len(), 5);
        assert!(seeded(0).await.1.read(0, 0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unit_update_rejects_before_touching_store() {
        let (repo, service) = seeded(1).await;
        assert!(matches!(service.update(0, "x".into(), String::new()).await, Err(TodoError::NotFound)));
        assert!(matches!(service.update(-3, "x".into(), String::new()).await, Err(TodoError::NotFound)));
        assert!(matches!(service.update(1, String::new(), String::new()).await, Err(TodoError::InvalidSubject)));
        assert_eq!(repo.writes(), 1);
        assert_eq!(service.read(0, 1).await.unwrap()[0].subject, "todo 0");
    }

    #[tokio::test]
    async fn unit_update_missing_row_is_not_found() {
        let (_, service) = seeded(1).await;
        let err = service.update(999_999, "x".into(), String::new()).await.unwrap_err();
        assert!(matches!(err, TodoError::NotFound));
    }

    #[tokio::test]
    async fn unit_update_changes_fields() {
        let (_, service) = seeded(1).await;
        let before = service.read(0, 1).await.unwrap().remove(0);
        let after = service.update(before.id.0, "new".into(), "body".into()).await.unwrap();
        assert_eq!(after.subject, "new");
        assert_eq!(after.description, "body");
        assert!(after.updated_at >= before.updated_at);
        assert_eq!(after.created_at, before.created_at);
    }

    #[tokio::test]
    async fn unit_delete_semantics() {
        let (repo, service) = seeded(3).await;
        service.delete(&[]).await.unwrap();
        assert_eq!(repo.len(), 3);

        assert!(matches!(service.delete(&[100, 200]).await, Err(TodoError::NotFound)));
        assert_eq!(repo.len(), 3);

        service.delete(&[1, 100]).await.unwrap();
        assert_eq!(repo.len(), 2);
        assert!(matches!(service.delete(&[1]).await, Err(TodoError::NotFound)));
    }

    #[tokio::test]
    async fn unit_store_failures_are_internal() {
        let service = TodoServiceImpl::new(FailingRepo);
        assert!(matches!(service.create("x".into(), String::new()).await, Err(TodoError::Internal(_))));
        assert!(matches!(service.read(0, 0).await, Err(TodoError::Internal(_))));
        assert!(matches!(service.update(1, "x".into(), String::new()).await, Err(TodoError::Internal(_))));
        assert!(matches!(service.delete(&[1]).await, Err(TodoError::Internal(_))));
    }
}
