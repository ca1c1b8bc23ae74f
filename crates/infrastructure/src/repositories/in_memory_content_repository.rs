use async_trait::async_trait;
use domain::{Content, ContentInput, ContentRepository, DomainError};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct Contents {
    by_id: HashMap<Uuid, Content>,
    order: Vec<Uuid>,
}

/// Process-local store. Reads return records in creation order.
#[derive(Clone, Default)]
pub struct InMemoryContentRepository {
    contents: Arc<RwLock<Contents>>,
}

impl InMemoryContentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContentRepository for InMemoryContentRepository {
    async fn find_all(&self) -> Result<Vec<Content>, DomainError> {
        let contents = self.contents.read().await;
        Ok(contents
            .order
            .iter()
            .filter_map(|id| contents.by_id.get(id).cloned())
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Content>, DomainError> {
        let contents = self.contents.read().await;
        Ok(contents.by_id.get(&id).cloned())
    }

    async fn create(&self, input: &ContentInput) -> Result<Option<Content>, DomainError> {
        let content = Content::from_input(Uuid::new_v4(), input.clone());

        let mut contents = self.contents.write().await;
        contents.order.push(content.id);
        contents.by_id.insert(content.id, content.clone());

        Ok(Some(content))
    }

    async fn update(&self, id: Uuid, input: &ContentInput) -> Result<Option<Content>, DomainError> {
        let mut contents = self.contents.write().await;
        match contents.by_id.get_mut(&id) {
            Some(stored) => {
                *stored = Content::from_input(id, input.clone());
                Ok(Some(stored.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<Uuid, DomainError> {
        let mut contents = self.contents.write().await;
        if contents.by_id.remove(&id).is_some() {
            contents.order.retain(|existing| *existing != id);
        }
        Ok(id)
    }
}
