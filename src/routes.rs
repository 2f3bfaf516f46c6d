use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, put},
};

use crate::{
    AppState,
    error::{AppError, AppResult},
    models::CreateMovie,
    store::Movie,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/movies", get(get_all).post(create))
        .route("/movies/size", get(count))
        .route("/movies/{id}", get(get_by_id).delete(delete_by_id))
        .route("/movies/{id}/{title}", put(update_by_id))
        .route("/movies/title/{title}", get(get_by_title))
        .route("/movies/country/{country}", get(get_by_country))
        .with_state(state)
}

pub async fn get_all(State(state): State<AppState>) -> AppResult<Json<Vec<Movie>>> {
    let movies = state.store.list_all().await?;
    Ok(Json(movies))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Movie>> {
    match state.store.find_by_id(id).await? {
        Some(movie) => Ok(Json(movie)),
        None => Err(AppError::NotFound),
    }
}

pub async fn get_by_title(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> AppResult<Json<Movie>> {
    match state.store.find_by_title(&title).await? {
        Some(movie) => Ok(Json(movie)),
        None => Err(AppError::NotFound),
    }
}

/// An empty match list is a successful response, not a 404.
pub async fn get_by_country(
    State(state): State<AppState>,
    Path(country): Path<String>,
) -> AppResult<Json<Vec<Movie>>> {
    let movies = state.store.find_by_country(&country).await?;
    Ok(Json(movies))
}

pub async fn count(State(state): State<AppState>) -> AppResult<String> {
    let n = state.store.count().await?;
    Ok(n.to_string())
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateMovie>,
) -> AppResult<Response> {
    let created = match state.store.insert(payload).await {
        Ok(movie) => movie,
        Err(err) => {
            tracing::warn!(error = %err, "movie creation failed");
            return Err(AppError::BadRequest);
        }
    };

    // Location keeps the legacy "/movies{id}" format, no slash before the id.
    let location = format!("/movies{}", created.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(created)).into_response())
}

pub async fn update_by_id(
    State(state): State<AppState>,
    Path((id, title)): Path<(i64, String)>,
) -> AppResult<Json<Movie>> {
    match state.store.update_title(id, &title).await? {
        Some(movie) => Ok(Json(movie)),
        None => Err(AppError::NotFound),
    }
}

pub async fn delete_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    if state.store.delete_by_id(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound)
    }
}
