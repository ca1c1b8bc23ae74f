use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A catalogued media item with its schedule window and genre tags.
///
/// The `id` is assigned by the store when the record is created and never
/// changes afterwards. Everything else is replaced wholesale through a
/// [`ContentInput`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    pub id: Uuid,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub image_url: String,
    pub duration: i32, // minutes
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub genre_list: Vec<String>,
}

impl Content {
    pub fn from_input(id: Uuid, input: ContentInput) -> Self {
        Self {
            id,
            title: input.title,
            subtitle: input.subtitle,
            description: input.description,
            image_url: input.image_url,
            duration: input.duration,
            start_time: input.start_time,
            end_time: input.end_time,
            genre_list: input.genre_list,
        }
    }

    /// Payload carrying every field of this record except its id.
    pub fn to_input(&self) -> ContentInput {
        ContentInput {
            title: self.title.clone(),
            subtitle: self.subtitle.clone(),
            description: self.description.clone(),
            image_url: self.image_url.clone(),
            duration: self.duration,
            start_time: self.start_time,
            end_time: self.end_time,
            genre_list: self.genre_list.clone(),
        }
    }
}

/// Full replacement payload for a content record.
///
/// No field is validated here: negative durations and `end_time` before
/// `start_time` are passed through to the store as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentInput {
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub duration: i32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub genre_list: Vec<String>,
}

impl ContentInput {
    pub fn with_genres(mut self, genre_list: Vec<String>) -> Self {
        self.genre_list = genre_list;
        self
    }
}
