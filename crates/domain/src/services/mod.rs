pub mod content_manager;

pub use content_manager::ContentManager;
