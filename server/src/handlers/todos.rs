use crate::response::{ApiError, JsonResponse, NoContentResponse};
use crate::state::StateRef;
use crate::types::{TodoChangeset, TodoId, TodoItem};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use todoauth::Principal;
use tracing::{error, info, warn};

//--------------------------------------------------------------------------------------------------
// Requests
//--------------------------------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoRequest {
    pub name: String,
    pub due_date: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoRequest {
    pub name: String,
    pub due_date: String,
    pub done: bool,
}

//--------------------------------------------------------------------------------------------------
// Responses
//--------------------------------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TodoListResponse {
    pub items: Vec<TodoItem>,
}

#[derive(Serialize)]
pub struct TodoResponse {
    pub item: TodoItem,
}

pub enum TodoError {
    EmptyName,
    TodoNotFound,
    DatabaseError,
}

impl ApiError for TodoError {
    fn response_data(&self) -> (StatusCode, &'static str, String) {
        match self {
            TodoError::EmptyName => (
                StatusCode::BAD_REQUEST,
                "empty_name",
                "TODO name must not be empty".to_string(),
            ),
            TodoError::TodoNotFound => (
                StatusCode::NOT_FOUND,
                "todo_not_found",
                "TODO not found".to_string(),
            ),
            TodoError::DatabaseError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "database_error",
                "Database error".to_string(),
            ),
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Handlers
//--------------------------------------------------------------------------------------------------

pub async fn get_todos(
    State(state): State<StateRef>,
    user_id: Principal,
) -> JsonResponse<TodoListResponse, TodoError> {
    let items = match state.todos().get_todos(&user_id).await {
        Ok(items) => items,
        Err(err) => {
            error!("Failed to get TODOs for {}: {}", user_id, err);
            return Err(TodoError::DatabaseError).into();
        }
    };

    info!("Returning {} TODOs for {}", items.len(), user_id);

    Ok(TodoListResponse { items }).into()
}

pub async fn create_todo(
    State(state): State<StateRef>,
    user_id: Principal,
    Json(request): Json<CreateTodoRequest>,
) -> JsonResponse<TodoResponse, TodoError> {
    if request.name.trim().is_empty() {
        warn!("TODO with empty name requested by {}", user_id);
        return Err(TodoError::EmptyName).into();
    }

    let item = TodoItem::new(user_id, request.name, request.due_date);

    let item = match state.todos().create_todo(item).await {
        Ok(item) => item,
        Err(err) => {
            error!("Failed to create TODO: {}", err);
            return Err(TodoError::DatabaseError).into();
        }
    };

    info!("Created TODO {} for {}", item.todo_id, item.user_id);

    Ok(TodoResponse { item }).into()
}

pub async fn update_todo(
    State(state): State<StateRef>,
    user_id: Principal,
    Path(todo_id): Path<TodoId>,
    Json(request): Json<UpdateTodoRequest>,
) -> NoContentResponse<TodoError> {
    if request.name.trim().is_empty() {
        warn!("Update to empty name requested for TODO {}", todo_id);
        return Err(TodoError::EmptyName).into();
    }

    let changeset = TodoChangeset {
        name: request.name,
        due_date: request.due_date,
        done: request.done,
    };

    match state.todos().update_todo(&user_id, todo_id, changeset).await {
        Ok(Some(item)) => {
            info!("Updated TODO {} (done: {})", todo_id, item.done);
            Ok(()).into()
        }
        Ok(None) => {
            warn!("TODO not found to update: {} for {}", todo_id, user_id);
            Err(TodoError::TodoNotFound).into()
        }
        Err(err) => {
            error!("Failed to update TODO {}: {}", todo_id, err);
            Err(TodoError::DatabaseError).into()
        }
    }
}

pub async fn delete_todo(
    State(state): State<StateRef>,
    user_id: Principal,
    Path(todo_id): Path<TodoId>,
) -> NoContentResponse<TodoError> {
    match state.todos().delete_todo(&user_id, todo_id).await {
        Ok(true) => {
            info!("Deleted TODO {}", todo_id);
            Ok(()).into()
        }
        Ok(false) => {
            warn!("TODO not found to delete: {} for {}", todo_id, user_id);
            Err(TodoError::TodoNotFound).into()
        }
        Err(err) => {
            error!("Failed to delete TODO {}: {}", todo_id, err);
            Err(TodoError::DatabaseError).into()
        }
    }
}

//--------------------------------------------------------------------------------------------------
