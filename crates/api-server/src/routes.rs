use crate::error::ApiError;
use application::ContentApp;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use domain::{Content, ContentInput, FilterQuery};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub content_app: Arc<ContentApp>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/content", get(list_contents).post(create_content))
        .route("/api/v1/content/filtered", get(filter_contents))
        .route(
            "/api/v1/content/:id",
            get(get_content).patch(update_content).delete(delete_content),
        )
        .route(
            "/api/v1/content/:id/genre",
            post(add_genres).delete(remove_genres),
        )
        .route("/health", get(health_check))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn non_empty(contents: Vec<Content>) -> Result<Json<Vec<Content>>, ApiError> {
    if contents.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(contents))
}

// Handler functions
async fn list_contents(State(state): State<AppState>) -> Result<Json<Vec<Content>>, ApiError> {
    let contents = state.content_app.content_manager.get_all().await?;
    non_empty(contents)
}

async fn filter_contents(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<Vec<Content>>, ApiError> {
    let contents = state.content_app.content_manager.get_filtered(&query).await?;
    non_empty(contents)
}

async fn get_content(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Content>, ApiError> {
    state
        .content_app
        .content_manager
        .get_one(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

async fn create_content(
    State(state): State<AppState>,
    Json(input): Json<ContentInput>,
) -> Result<Json<Content>, ApiError> {
    state
        .content_app
        .content_manager
        .create(&input)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::Problem("Content could not be created".to_string()))
}

async fn update_content(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<ContentInput>,
) -> Result<Json<Content>, ApiError> {
    state
        .content_app
        .content_manager
        .update(id, &input)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

async fn delete_content(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Uuid>, ApiError> {
    let deleted = state.content_app.content_manager.delete(id).await?;
    Ok(Json(deleted))
}

async fn add_genres(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(genres): Json<Vec<String>>,
) -> Result<Json<Content>, ApiError> {
    state
        .content_app
        .content_manager
        .add_genres(id, &genres)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

async fn remove_genres(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(genres): Json<Vec<String>>,
) -> Result<Json<Content>, ApiError> {
    state
        .content_app
        .content_manager
        .remove_genres(id, &genres)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use async_trait::async_trait;
    use domain::{ContentRepository, DomainError};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    /// Store that declines every create and knows no records
    struct DecliningRepository;

    #[async_trait]
    impl ContentRepository for DecliningRepository {
        async fn find_all(&self) -> Result<Vec<Content>, DomainError> {
            Ok(Vec::new())
        }

        async fn find_by_id(&self, _id: Uuid) -> Result<Option<Content>, DomainError> {
            Ok(None)
        }

        async fn create(&self, _input: &ContentInput) -> Result<Option<Content>, DomainError> {
            Ok(None)
        }

        async fn update(&self, _id: Uuid, _input: &ContentInput) -> Result<Option<Content>, DomainError> {
            Ok(None)
        }

        async fn delete(&self, id: Uuid) -> Result<Uuid, DomainError> {
            Ok(id)
        }
    }

    /// Store whose every call fails
    struct UnavailableRepository;

    fn unavailable() -> DomainError {
        DomainError::RepositoryError("storage unavailable".to_string())
    }

    #[async_trait]
    impl ContentRepository for UnavailableRepository {
        async fn find_all(&self) -> Result<Vec<Content>, DomainError> {
            Err(unavailable())
        }

        async fn find_by_id(&self, _id: Uuid) -> Result<Option<Content>, DomainError> {
            Err(unavailable())
        }

        async fn create(&self, _input: &ContentInput) -> Result<Option<Content>, DomainError> {
            Err(unavailable())
        }

        async fn update(&self, _id: Uuid, _input: &ContentInput) -> Result<Option<Content>, DomainError> {
            Err(unavailable())
        }

        async fn delete(&self, _id: Uuid) -> Result<Uuid, DomainError> {
            Err(unavailable())
        }
    }

    fn app() -> Router {
        router(AppState {
            content_app: Arc::new(ContentApp::in_memory()),
        })
    }

    fn app_with(repository: Arc<dyn ContentRepository>) -> Router {
        router(AppState {
            content_app: Arc::new(ContentApp::with_repository(repository)),
        })
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    fn payload(title: &str, genres: &[&str]) -> Value {
        json!({
            "title": title,
            "subtitle": "sub",
            "description": "desc",
            "imageUrl": "http://img/1.png",
            "duration": 90,
            "startTime": "2024-05-01T20:00:00Z",
            "endTime": "2024-05-01T21:30:00Z",
            "genreList": genres,
        })
    }

    async fn create(app: &Router, title: &str, genres: &[&str]) -> String {
        let (status, body) = send(app, "POST", "/api/v1/content", Some(payload(title, genres))).await;
        assert_eq!(status, StatusCode::OK);
        body["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_empty_catalogue_is_not_found() {
        let app = app();

        let (status, body) = send(&app, "GET", "/api/v1/content", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Not found");
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let app = app();
        let id = create(&app, "Die Hard", &["Action"]).await;

        let (status, body) = send(&app, "GET", &format!("/api/v1/content/{}", id), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Die Hard");
        assert_eq!(body["genreList"], json!(["Action"]));
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_not_found() {
        let app = app();

        let (status, _) = send(&app, "GET", &format!("/api/v1/content/{}", Uuid::new_v4()), None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_filtered() {
        let app = app();
        create(&app, "Die Hard", &["Action", "Thriller"]).await;
        create(&app, "Speed", &["Action"]).await;

        let (status, body) = send(&app, "GET", "/api/v1/content/filtered?title=die", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["title"], "Die Hard");

        let (status, body) = send(&app, "GET", "/api/v1/content/filtered?genre=ACTION", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);

        let (status, _) = send(&app, "GET", "/api/v1/content/filtered?genre=comedy", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_replaces_content() {
        let app = app();
        let id = create(&app, "Old", &["Drama"]).await;

        let uri = format!("/api/v1/content/{}", id);
        let (status, body) = send(&app, "PATCH", &uri, Some(payload("New", &["Comedy"]))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], id.as_str());
        assert_eq!(body["title"], "New");
        assert_eq!(body["genreList"], json!(["Comedy"]));

        let missing = format!("/api/v1/content/{}", Uuid::new_v4());
        let (status, _) = send(&app, "PATCH", &missing, Some(payload("New", &[]))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_returns_id() {
        let app = app();
        let id = create(&app, "Gone", &[]).await;
        let uri = format!("/api/v1/content/{}", id);

        let (status, body) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!(id));

        let (status, _) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_genre_endpoints() {
        let app = app();
        let id = create(&app, "Title 1", &["Action", "Horror"]).await;
        let uri = format!("/api/v1/content/{}/genre", id);

        let (status, body) = send(&app, "POST", &uri, Some(json!(["Action", "Sci-fi"]))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["genreList"], json!(["Action", "Sci-fi", "Horror"]));

        let (status, body) = send(&app, "DELETE", &uri, Some(json!(["Horror", "Western"]))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["genreList"], json!(["Action", "Sci-fi"]));

        let missing = format!("/api/v1/content/{}/genre", Uuid::new_v4());
        let (status, _) = send(&app, "POST", &missing, Some(json!(["Action"]))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, "DELETE", &missing, Some(json!(["Action"]))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = app();

        let (status, body) = send(&app, "GET", "/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_declined_create_is_problem() {
        let app = app_with(Arc::new(DecliningRepository));

        let (status, body) = send(&app, "POST", "/api/v1/content", Some(payload("Refused", &[]))).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Content could not be created");
    }

    #[tokio::test]
    async fn test_store_failure_is_server_error() {
        let app = app_with(Arc::new(UnavailableRepository));
        let item = format!("/api/v1/content/{}", Uuid::new_v4());
        let genre = format!("{}/genre", item);

        let requests = [
            ("GET", "/api/v1/content".to_string(), None),
            ("GET", "/api/v1/content/filtered?title=x".to_string(), None),
            ("GET", item.clone(), None),
            ("POST", "/api/v1/content".to_string(), Some(payload("X", &[]))),
            ("PATCH", item.clone(), Some(payload("X", &[]))),
            ("DELETE", item.clone(), None),
            ("POST", genre.clone(), Some(json!(["Action"]))),
            ("DELETE", genre.clone(), Some(json!(["Action"]))),
        ];

        for (method, uri, body) in requests {
            let (status, json) = send(&app, method, &uri, body).await;

            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{} {}", method, uri);
            assert_eq!(json["error"], "Repository error: storage unavailable");
        }
    }
}
