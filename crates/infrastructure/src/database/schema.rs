// Database schema for the content catalogue
diesel::table! {
    contents (seq) {
        seq -> Integer,            // Insertion order, keeps read-all stable
        id -> Text,                // UUID assigned on create
        title -> Text,
        subtitle -> Text,
        description -> Text,
        image_url -> Text,
        duration -> Integer,       // Minutes
        start_time -> Timestamp,
        end_time -> Timestamp,
        genre_list -> Text,        // JSON array of genre names
    }
}

pub const CREATE_CONTENTS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS contents (
    seq INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
    id TEXT NOT NULL UNIQUE,
    title TEXT NOT NULL,
    subtitle TEXT NOT NULL,
    description TEXT NOT NULL,
    image_url TEXT NOT NULL,
    duration INTEGER NOT NULL,
    start_time TIMESTAMP NOT NULL,
    end_time TIMESTAMP NOT NULL,
    genre_list TEXT NOT NULL
)";
