use crate::database::{contents, SqlitePool};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use domain::{Content, ContentInput, ContentRepository, DomainError};
use uuid::Uuid;

// Database model - separate from domain entity
#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = contents)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
struct ContentModel {
    #[allow(dead_code)]
    seq: i32,
    id: String,
    title: String,
    subtitle: String,
    description: String,
    image_url: String,
    duration: i32,
    start_time: NaiveDateTime,
    end_time: NaiveDateTime,
    genre_list: String,
}

#[derive(Insertable)]
#[diesel(table_name = contents)]
struct NewContentModel {
    id: String,
    title: String,
    subtitle: String,
    description: String,
    image_url: String,
    duration: i32,
    start_time: NaiveDateTime,
    end_time: NaiveDateTime,
    genre_list: String,
}

#[derive(AsChangeset)]
#[diesel(table_name = contents)]
struct ContentChangeset {
    title: String,
    subtitle: String,
    description: String,
    image_url: String,
    duration: i32,
    start_time: NaiveDateTime,
    end_time: NaiveDateTime,
    genre_list: String,
}

// Convert between domain and database models
impl TryFrom<ContentModel> for Content {
    type Error = DomainError;

    fn try_from(model: ContentModel) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&model.id)
            .map_err(|e| DomainError::ValidationError(format!("Invalid content id {}: {}", model.id, e)))?;
        let genre_list: Vec<String> = serde_json::from_str(&model.genre_list)
            .map_err(|e| DomainError::ValidationError(format!("Invalid genre list for {}: {}", model.id, e)))?;

        Ok(Content {
            id,
            title: model.title,
            subtitle: model.subtitle,
            description: model.description,
            image_url: model.image_url,
            duration: model.duration,
            start_time: model.start_time.and_utc(),
            end_time: model.end_time.and_utc(),
            genre_list,
        })
    }
}

fn encode_genres(genre_list: &[String]) -> Result<String, DomainError> {
    serde_json::to_string(genre_list).map_err(|e| DomainError::ValidationError(e.to_string()))
}

impl ContentChangeset {
    fn from_input(input: &ContentInput) -> Result<Self, DomainError> {
        Ok(Self {
            title: input.title.clone(),
            subtitle: input.subtitle.clone(),
            description: input.description.clone(),
            image_url: input.image_url.clone(),
            duration: input.duration,
            start_time: input.start_time.naive_utc(),
            end_time: input.end_time.naive_utc(),
            genre_list: encode_genres(&input.genre_list)?,
        })
    }
}

impl NewContentModel {
    fn from_input(id: Uuid, input: &ContentInput) -> Result<Self, DomainError> {
        let changeset = ContentChangeset::from_input(input)?;
        Ok(Self {
            id: id.to_string(),
            title: changeset.title,
            subtitle: changeset.subtitle,
            description: changeset.description,
            image_url: changeset.image_url,
            duration: changeset.duration,
            start_time: changeset.start_time,
            end_time: changeset.end_time,
            genre_list: changeset.genre_list,
        })
    }
}

pub struct SqliteContentRepository {
    pool: SqlitePool,
}

impl SqliteContentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Check out a connection and run `query` on the blocking pool.
    ///
    /// Both the checkout and the query can block, so neither runs on the async worker.
    async fn run<T, F>(&self, query: F) -> Result<T, DomainError>
    where
        T: Send + 'static,
        F: FnOnce(&mut SqliteConnection) -> QueryResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();

        tokio::task::spawn_blocking(move || {
            let mut conn = pool
                .get()
                .map_err(|e| DomainError::RepositoryError(e.to_string()))?;

            query(&mut conn).map_err(|e| DomainError::RepositoryError(e.to_string()))
        })
        .await
        .map_err(|e| DomainError::RepositoryError(e.to_string()))?
    }
}

#[async_trait]
impl ContentRepository for SqliteContentRepository {
    async fn find_all(&self) -> Result<Vec<Content>, DomainError> {
        let result = self
            .run(|conn| {
                contents::table
                    .order(contents::seq.asc())
                    .select(ContentModel::as_select())
                    .load::<ContentModel>(conn)
            })
            .await?;

        result.into_iter().map(Content::try_from).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Content>, DomainError> {
        let id = id.to_string();
        let result = self
            .run(move |conn| {
                contents::table
                    .filter(contents::id.eq(id))
                    .select(ContentModel::as_select())
                    .first::<ContentModel>(conn)
                    .optional()
            })
            .await?;

        result.map(Content::try_from).transpose()
    }

    async fn create(&self, input: &ContentInput) -> Result<Option<Content>, DomainError> {
        let new_content = NewContentModel::from_input(Uuid::new_v4(), input)?;

        let result = self
            .run(move |conn| {
                diesel::insert_into(contents::table)
                    .values(&new_content)
                    .execute(conn)?;

                // Read back the row we just inserted
                contents::table
                    .filter(contents::id.eq(new_content.id.as_str()))
                    .select(ContentModel::as_select())
                    .first::<ContentModel>(conn)
                    .optional()
            })
            .await?;

        result.map(Content::try_from).transpose()
    }

    async fn update(&self, id: Uuid, input: &ContentInput) -> Result<Option<Content>, DomainError> {
        let changeset = ContentChangeset::from_input(input)?;
        let id = id.to_string();

        let result = self
            .run(move |conn| {
                let updated = diesel::update(contents::table.filter(contents::id.eq(id.as_str())))
                    .set(&changeset)
                    .execute(conn)?;

                if updated == 0 {
                    return Ok(None);
                }

                // Fetch the updated content
                contents::table
                    .filter(contents::id.eq(id.as_str()))
                    .select(ContentModel::as_select())
                    .first::<ContentModel>(conn)
                    .optional()
            })
            .await?;

        result.map(Content::try_from).transpose()
    }

    async fn delete(&self, id: Uuid) -> Result<Uuid, DomainError> {
        let key = id.to_string();
        self.run(move |conn| diesel::delete(contents::table.filter(contents::id.eq(key))).execute(conn))
            .await?;

        Ok(id)
    }
}
