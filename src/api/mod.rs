use axum::Json;
use axum::extract::{Path, State};
use axum::routing::{post, put};
use axum::{Router, http::StatusCode, routing::get};

use crate::error::AppError;
use crate::models::{Batch, Course, NewBatchRequest, NewCourseRequest, UpdateBatchRequest, UpdateCourseRequest};
use crate::repository::{batches, courses};
use crate::state::AppState;
use crate::stats::{self, DashboardStats};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/courses", get(list_courses).post(create_course))
        .route("/courses/{id}", put(update_course).delete(delete_course))
        .route("/courses/{id}/batches", post(add_batch))
        .route(
            "/courses/{id}/batches/{index}",
            put(update_batch).delete(delete_batch),
        )
        .route("/dashboard", get(dashboard))
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    sqlx::query("select 1").execute(&state.db).await?;
    Ok(StatusCode::OK)
}

async fn list_courses(State(state): State<AppState>) -> Result<Json<Vec<Course>>, AppError> {
    let courses = courses::list_courses(state.store.as_ref()).await?;
    Ok(Json(courses))
}

async fn create_course(
    State(state): State<AppState>,
    Json(req): Json<NewCourseRequest>,
) -> Result<Json<Course>, AppError> {
    let course = courses::create_course(state.store.as_ref(), req).await?;
    Ok(Json(course))
}

async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateCourseRequest>,
) -> Result<Json<Course>, AppError> {
    let course = courses::update_course(state.store.as_ref(), &id, req).await?;
    Ok(Json(course))
}

async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    courses::delete_course(state.store.as_ref(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn add_batch(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<NewBatchRequest>,
) -> Result<Json<Batch>, AppError> {
    let batch = batches::add_batch(state.store.as_ref(), &id, req).await?;
    Ok(Json(batch))
}

async fn update_batch(
    State(state): State<AppState>,
    Path((id, index)): Path<(String, usize)>,
    Json(req): Json<UpdateBatchRequest>,
) -> Result<Json<Batch>, AppError> {
    let batch = batches::update_batch_at(state.store.as_ref(), &id, index, req).await?;
    Ok(Json(batch))
}

async fn delete_batch(
    State(state): State<AppState>,
    Path((id, index)): Path<(String, usize)>,
) -> Result<Json<Batch>, AppError> {
    let batch = batches::delete_batch_at(state.store.as_ref(), &id, index).await?;
    Ok(Json(batch))
}

async fn dashboard(State(state): State<AppState>) -> Result<Json<DashboardStats>, AppError> {
    let stats = stats::dashboard(state.store.as_ref()).await?;
    Ok(Json(stats))
}
