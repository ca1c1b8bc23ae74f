use crate::entities::{Content, ContentInput};
use crate::errors::DomainError;
use async_trait::async_trait;
use uuid::Uuid;

/// Keyed persistence for content records.
/// This is a PORT in hexagonal architecture
///
/// `Ok(None)` means "no such record" (or, for `create`, the store declined);
/// `Err` is reserved for storage failures.
#[async_trait]
pub trait ContentRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Content>, DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Content>, DomainError>;
    async fn create(&self, input: &ContentInput) -> Result<Option<Content>, DomainError>;
    async fn update(&self, id: Uuid, input: &ContentInput) -> Result<Option<Content>, DomainError>;
    /// Returns `id` whether or not a record was removed.
    async fn delete(&self, id: Uuid) -> Result<Uuid, DomainError>;
}
