pub mod in_memory_content_repository;
pub mod sqlite_content_repository;

pub use in_memory_content_repository::InMemoryContentRepository;
pub use sqlite_content_repository::SqliteContentRepository;
