use crate::handlers::authorize::TokenAuthorizerEvent;
use crate::handlers::todos::{
    CreateTodoRequest, TodoError, TodoListResponse, TodoResponse, UpdateTodoRequest,
};
use crate::handlers::{authorize, todos};
use crate::response::{JsonResponse, NoContentResponse};
use crate::state::StateRef;
use crate::types::TodoId;
use axum::extract::{Path, State};
use axum::Json;
use todoauth::extract::Caller;
use todoauth::AuthorizerResponse;

//--------------------------------------------------------------------------------------------------
// Re-export handlers, enforcing the authorizer's decision where applicable
//--------------------------------------------------------------------------------------------------

// The authorizer endpoint itself is open: it reports a decision rather than enforcing one
pub async fn authorize(
    state: State<StateRef>,
    event: Json<TokenAuthorizerEvent>,
) -> Json<AuthorizerResponse> {
    authorize::handler(state, event).await
}

//--------------------------------------------------------------------------------------------------

pub async fn get_todos(
    state: State<StateRef>,
    Caller(user_id): Caller,
) -> JsonResponse<TodoListResponse, TodoError> {
    todos::get_todos(state, user_id).await
}

pub async fn create_todo(
    state: State<StateRef>,
    Caller(user_id): Caller,
    request: Json<CreateTodoRequest>,
) -> JsonResponse<TodoResponse, TodoError> {
    todos::create_todo(state, user_id, request).await
}

pub async fn update_todo(
    state: State<StateRef>,
    Caller(user_id): Caller,
    todo_id: Path<TodoId>,
    request: Json<UpdateTodoRequest>,
) -> NoContentResponse<TodoError> {
    todos::update_todo(state, user_id, todo_id, request).await
}

pub async fn delete_todo(
    state: State<StateRef>,
    Caller(user_id): Caller,
    todo_id: Path<TodoId>,
) -> NoContentResponse<TodoError> {
    todos::delete_todo(state, user_id, todo_id).await
}

//--------------------------------------------------------------------------------------------------
