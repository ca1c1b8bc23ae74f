use serde::Deserialize;

use super::Content;

/// Title and genre substring filter. An empty string matches everything.
///
/// Deserializes from a query string; absent fields become empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FilterQuery {
    pub title: String,
    pub genre: String,
}

impl FilterQuery {
    pub fn new(title: Option<String>, genre: Option<String>) -> Self {
        Self {
            title: title.unwrap_or_default(),
            genre: genre.unwrap_or_default(),
        }
    }

    pub fn matches(&self, content: &Content) -> bool {
        self.matches_title(content) && self.matches_genre(content)
    }

    fn matches_title(&self, content: &Content) -> bool {
        self.title.is_empty() || contains_ignore_case(&content.title, &self.title)
    }

    fn matches_genre(&self, content: &Content) -> bool {
        self.genre.is_empty()
            || content
                .genre_list
                .iter()
                .any(|genre| contains_ignore_case(genre, &self.genre))
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
