use axum::extract::{rejection::JsonRejection, Query, State};
use axum::{routing::post, Json, Router};
use serde::Deserialize;

use crate::application::todo_service::TodoService;
use crate::domain::todo::{
    CreateTodoRequest, CreateTodoResponse, DeleteTodoRequest, DeleteTodoResponse, ReadTodoRequest,
    ReadTodoResponse, UpdateTodoRequest, UpdateTodoResponse,
};
use crate::http::types::ApiError;

#[derive(Clone)]
pub struct AppState<S: TodoService> { pub service: S }

/// `/todos` dispatches on method; anything other than POST, PUT, GET and
/// DELETE is answered with 405 by the method router.
pub fn router<S: TodoService + Clone + Send + Sync + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route(
            "/todos",
            post(create_todo::<S>).put(update_todo::<S>).get(read_todos::<S>).delete(delete_todos::<S>),
        )
        .with_state(state)
}

async fn create_todo<S: TodoService>(
    State(state): State<AppState<S>>,
    payload: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> Result<Json<CreateTodoResponse>, ApiError> {
    let Json(req) = payload?;
    if req.subject.is_empty() {
        return Err(ApiError::BadRequest("subject is required".into()));
    }
    let todo = state.service.create(req.subject, req.description).await?;
    tracing::info!(id = todo.id.0, "created todo");
    Ok(Json(CreateTodoResponse { todo }))
}

async fn update_todo<S: TodoService>(
    State(state): State<AppState<S>>,
    payload: Result<Json<UpdateTodoRequest>, JsonRejection>,
) -> Result<Json<UpdateTodoResponse>, ApiError> {
    let Json(req) = payload?;
    if req.id == 0 || req.subject.is_empty() {
        return Err(ApiError::BadRequest("id and subject are required".into()));
    }
    let todo = state.service.update(req.id, req.subject, req.description).await?;
    Ok(Json(UpdateTodoResponse { todo }))
}

/// Raw query values; anything missing or non-numeric reads as 0.
#[derive(Debug, Default, Deserialize)]
struct ReadParams { prev_id: Option<String>, size: Option<String> }

impl From<ReadParams> for ReadTodoRequest {
    fn from(params: ReadParams) -> Self {
        Self { prev_id: parse_or_zero(params.prev_id.as_deref()), size: parse_or_zero(params.size.as_deref()) }
    }
}

fn parse_or_zero(value: Option<&str>) -> i64 { value.and_then(|v| v.parse().ok()).unwrap_or(0) }

async fn read_todos<S: TodoService>(
    State(state): State<AppState<S>>,
    params: Option<Query<ReadParams>>,
) -> Result<Json<ReadTodoResponse>, ApiError> {
    let req = ReadTodoRequest::from(params.map(|Query(p)| p).unwrap_or_default());
    let todos = state.service.read(req.prev_id, req.size).await?;
    Ok(Json(ReadTodoResponse { todos }))
}

async fn delete_todos<S: TodoService>(
    State(state): State<AppState<S>>,
    payload: Result<Json<DeleteTodoRequest>, JsonRejection>,
) -> Result<Json<DeleteTodoResponse>, ApiError> {
    let Json(req) = payload?;
    if req.ids.is_empty() {
        return Err(ApiError::BadRequest("ids must not be empty".into()));
    }
    state.service.delete(&req.ids).await?;
    tracing::info!(ids = ?req.ids, "deleted todos");
    Ok(Json(DeleteTodoResponse {}))
}
