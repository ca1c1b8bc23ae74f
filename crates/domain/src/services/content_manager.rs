use crate::entities::{merge_genres, subtract_genres, Content, ContentInput, FilterQuery};
use crate::errors::DomainError;
use crate::repositories::ContentRepository;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// Content Manager - business logic between the transport and the store
///
/// Holds no state besides the repository handle, so one instance can serve
/// any number of concurrent callers. Store errors are returned untouched.
///
/// `add_genres` and `remove_genres` read and then write in two separate
/// store calls. Two concurrent mutations of the same record can therefore
/// race and the later write wins.
pub struct ContentManager {
    content_repository: Arc<dyn ContentRepository>,
}

impl ContentManager {
    pub fn new(content_repository: Arc<dyn ContentRepository>) -> Self {
        Self { content_repository }
    }

    /// Get all contents in store order
    pub async fn get_all(&self) -> Result<Vec<Content>, DomainError> {
        self.content_repository.find_all().await
    }

    /// Get the contents matching both the title and the genre filter
    pub async fn get_filtered(&self, query: &FilterQuery) -> Result<Vec<Content>, DomainError> {
        let contents = self.content_repository.find_all().await?;
        let total = contents.len();

        let filtered: Vec<Content> = contents
            .into_iter()
            .filter(|content| query.matches(content))
            .collect();

        debug!(
            title = %query.title,
            genre = %query.genre,
            matched = filtered.len(),
            total,
            "Filtered contents"
        );

        Ok(filtered)
    }

    pub async fn get_one(&self, id: Uuid) -> Result<Option<Content>, DomainError> {
        self.content_repository.find_by_id(id).await
    }

    pub async fn create(&self, input: &ContentInput) -> Result<Option<Content>, DomainError> {
        info!(title = %input.title, "Creating new content");

        self.content_repository.create(input).await
    }

    /// Replace every mutable field of a content. Not a partial patch.
    pub async fn update(&self, id: Uuid, input: &ContentInput) -> Result<Option<Content>, DomainError> {
        info!(%id, "Updating content");

        self.content_repository.update(id, input).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<Uuid, DomainError> {
        info!(%id, "Deleting content");

        self.content_repository.delete(id).await
    }

    /// Merge `genres` into the content's genre list
    pub async fn add_genres(&self, id: Uuid, genres: &[String]) -> Result<Option<Content>, DomainError> {
        let Some(content) = self.content_repository.find_by_id(id).await? else {
            debug!(%id, "Content not found, no genres added");
            return Ok(None);
        };

        let merged = merge_genres(genres, &content.genre_list);
        let input = content.to_input().with_genres(merged);

        info!(%id, added = ?genres, "Adding genres to content");

        self.content_repository.update(id, &input).await
    }

    /// Drop `genres` from the content's genre list
    pub async fn remove_genres(&self, id: Uuid, genres: &[String]) -> Result<Option<Content>, DomainError> {
        let Some(content) = self.content_repository.find_by_id(id).await? else {
            debug!(%id, "Content not found, no genres removed");
            return Ok(None);
        };

        let remaining = subtract_genres(&content.genre_list, genres);
        let input = content.to_input().with_genres(remaining);

        info!(%id, removed = ?genres, "Removing genres from content");

        self.content_repository.update(id, &input).await
    }
}
