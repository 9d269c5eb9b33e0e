use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::AuthSubject,
    error::ApiError,
    state::AppState,
    todos::{
        dto::{ShowTodo, TodoPayload},
        repo::Todo,
    },
    users::repo::User,
};

// Column bounds from the schema.
const TITLE_MAX: usize = 25;
const DESC_MAX: usize = 100;

pub fn todo_routes() -> Router<AppState> {
    Router::new()
        .route("/todo/", get(list_todos).post(create_todo))
        .route(
            "/todo/:id",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
}

fn check_bounds(payload: &TodoPayload) -> Result<(), ApiError> {
    if payload.title.len() > TITLE_MAX {
        return Err(ApiError::Validation(format!(
            "title longer than {TITLE_MAX} characters"
        )));
    }
    if payload.desc.len() > DESC_MAX {
        return Err(ApiError::Validation(format!(
            "desc longer than {DESC_MAX} characters"
        )));
    }
    Ok(())
}

#[instrument(skip(state))]
pub async fn list_todos(
    State(state): State<AppState>,
    AuthSubject(_subject): AuthSubject,
) -> Result<Json<Vec<ShowTodo>>, ApiError> {
    let todos = Todo::list(&state.db).await?;
    Ok(Json(todos.into_iter().map(ShowTodo::from).collect()))
}

/// Creates a todo owned by the authenticated caller: the subject from the
/// gate is resolved to a user row and that id becomes `user_id`.
#[instrument(skip(state, payload))]
pub async fn create_todo(
    State(state): State<AppState>,
    AuthSubject(subject): AuthSubject,
    Json(payload): Json<TodoPayload>,
) -> Result<(StatusCode, Json<ShowTodo>), ApiError> {
    check_bounds(&payload)?;

    // The token outlived its account only if the row was removed out of
    // band; treat that as an authentication failure.
    let owner = User::find_by_email(&state.db, &subject)
        .await?
        .ok_or_else(|| {
            warn!(subject = %subject, "token subject has no user row");
            ApiError::Unauthenticated
        })?;

    let todo = Todo::create(&state.db, &payload.title, &payload.desc, owner.id).await?;
    info!(todo_id = %todo.id, user_id = %owner.id, "todo created");
    Ok((StatusCode::CREATED, Json(todo.into())))
}

#[instrument(skip(state))]
pub async fn get_todo(
    State(state): State<AppState>,
    AuthSubject(_subject): AuthSubject,
    Path(id): Path<Uuid>,
) -> Result<Json<ShowTodo>, ApiError> {
    let todo = Todo::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("task with id {id} not found")))?;
    Ok(Json(todo.into()))
}

#[instrument(skip(state, payload))]
pub async fn update_todo(
    State(state): State<AppState>,
    AuthSubject(_subject): AuthSubject,
    Path(id): Path<Uuid>,
    Json(payload): Json<TodoPayload>,
) -> Result<(StatusCode, Json<ShowTodo>), ApiError> {
    check_bounds(&payload)?;
    let todo = Todo::update(&state.db, id, &payload.title, &payload.desc)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("task with id {id} not found")))?;
    info!(todo_id = %id, "todo updated");
    Ok((StatusCode::ACCEPTED, Json(todo.into())))
}

#[instrument(skip(state))]
pub async fn delete_todo(
    State(state): State<AppState>,
    AuthSubject(_subject): AuthSubject,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if !Todo::delete(&state.db, id).await? {
        return Err(ApiError::NotFound(format!("task with id {id} not found")));
    }
    info!(todo_id = %id, "todo deleted");
    Ok(StatusCode::NO_CONTENT)
}
