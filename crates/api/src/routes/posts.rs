//! Post endpoints: the thin layer between HTTP and the command bus /
//! query capability.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use common::AggregateId;
use domain::{
    CommandBus, CreatePost, DisablePost, EnablePost, HidePost, PublishPost, UpdatePostContent,
};
use event_store::EventStore;
use projections::{PostQueries, PostSummary, ProjectionProcessor};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<S: EventStore> {
    pub bus: CommandBus,
    pub queries: Arc<dyn PostQueries>,
    pub processor: Arc<ProjectionProcessor<S>>,
}

// -- Request types --

#[derive(Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Deserialize)]
pub struct PostActionRequest {
    pub id: AggregateId,
}

#[derive(Deserialize)]
pub struct UpdateContentRequest {
    pub id: AggregateId,
    pub content: String,
}

// -- Response types --

#[derive(Serialize)]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub content: String,
    pub moderation: String,
    pub visibility: String,
    pub version: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<PostSummary> for PostResponse {
    fn from(post: PostSummary) -> Self {
        Self {
            id: post.post_id.to_string(),
            title: post.title,
            content: post.content,
            moderation: post.moderation.to_string(),
            visibility: post.visibility.to_string(),
            version: post.version.as_i64(),
            created_at: post.created_at.to_rfc3339(),
            updated_at: post.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Serialize)]
pub struct PostCreatedResponse {
    pub id: String,
}

// -- Handlers --

/// GET /api/posts — the full post collection.
#[tracing::instrument(skip(state))]
pub async fn list<S: EventStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<PostResponse>>, ApiError> {
    // Fold any not-yet-projected events into the read model first.
    state
        .processor
        .run_catch_up()
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    let posts = state.queries.list_all().await;
    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}

/// GET /api/posts/{id} — one post, 404 when the id is unknown.
#[tracing::instrument(skip(state))]
pub async fn get<S: EventStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<PostResponse>, ApiError> {
    let post_id = parse_post_id(&id)?;

    state
        .processor
        .run_catch_up()
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    let post = state
        .queries
        .get_by_id(post_id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("post {id} not found")))?;

    Ok(Json(post.into()))
}

/// POST /api/posts — create a post; 201 with the new id and its location.
#[tracing::instrument(skip(state, req))]
pub async fn create<S: EventStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<CreatePostRequest>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<PostCreatedResponse>), ApiError> {
    let id = state
        .bus
        .send(CreatePost::new(req.title, req.content))
        .await?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/api/posts/{id}"))],
        Json(PostCreatedResponse { id: id.to_string() }),
    ))
}

/// PATCH /api/posts/Enable
#[tracing::instrument(skip(state, req))]
pub async fn enable<S: EventStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<PostActionRequest>,
) -> Result<StatusCode, ApiError> {
    state.bus.send(EnablePost::new(req.id)).await?;
    Ok(StatusCode::OK)
}

/// PATCH /api/posts/Disable
#[tracing::instrument(skip(state, req))]
pub async fn disable<S: EventStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<PostActionRequest>,
) -> Result<StatusCode, ApiError> {
    state.bus.send(DisablePost::new(req.id)).await?;
    Ok(StatusCode::OK)
}

/// PATCH /api/posts/Publish
#[tracing::instrument(skip(state, req))]
pub async fn publish<S: EventStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<PostActionRequest>,
) -> Result<StatusCode, ApiError> {
    state.bus.send(PublishPost::new(req.id)).await?;
    Ok(StatusCode::OK)
}

/// PATCH /api/posts/Hide
#[tracing::instrument(skip(state, req))]
pub async fn hide<S: EventStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<PostActionRequest>,
) -> Result<StatusCode, ApiError> {
    state.bus.send(HidePost::new(req.id)).await?;
    Ok(StatusCode::OK)
}

/// PATCH /api/posts/UpdateContent
#[tracing::instrument(skip(state, req))]
pub async fn update_content<S: EventStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<UpdateContentRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .bus
        .send(UpdatePostContent::new(req.id, req.content))
        .await?;
    Ok(StatusCode::OK)
}

fn parse_post_id(id: &str) -> Result<AggregateId, ApiError> {
    AggregateId::parse(id).map_err(|e| ApiError::BadRequest(e.to_string()))
}
