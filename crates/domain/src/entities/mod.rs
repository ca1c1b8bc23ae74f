pub mod content;
pub mod filter;
pub mod genre;

pub use content::*;
pub use filter::*;
pub use genre::*;
