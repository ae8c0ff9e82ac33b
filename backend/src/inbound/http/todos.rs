//! Todo API handlers.
//!
//! ```text
//! GET    /todos/getall
//! GET    /todos/{id}
//! GET    /todos/search?Title=milk
//! POST   /todos/add {"title":"Buy milk"}
//! PUT    /todos/toggle/{id}
//! DELETE /todos/delete/{id}
//! ```

use actix_web::http::header;
use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{TodosCommand, TodosQuery};
use crate::domain::{Error, Todo, TodoId, TodoSearchTerm, TodoTitle};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::map_todo_validation_error;

/// Request body for `POST /todos/add`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddTodoRequest {
    #[schema(example = "Buy milk")]
    #[serde(default)]
    pub title: String,
}

/// Query string for `GET /todos/search`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchTodosQuery {
    /// Case-insensitive substring of the title.
    #[serde(rename = "Title", alias = "title")]
    pub title: Option<String>,
}

/// List every todo.
#[utoipa::path(
    get,
    path = "/todos/getall",
    responses(
        (status = 200, description = "All todos", body = [Todo]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["todos"],
    operation_id = "listTodos"
)]
#[get("/getall")]
pub async fn list_todos(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Todo>>> {
    state.todos_query.list().await.map(web::Json)
}

/// Search todos by title.
#[utoipa::path(
    get,
    path = "/todos/search",
    params(SearchTodosQuery),
    responses(
        (status = 200, description = "Matching todos", body = [Todo]),
        (status = 400, description = "Title is required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["todos"],
    operation_id = "searchTodos"
)]
#[get("/search")]
pub async fn search_todos(
    state: web::Data<HttpState>,
    query: web::Query<SearchTodosQuery>,
) -> ApiResult<web::Json<Vec<Todo>>> {
    let term = TodoSearchTerm::new(query.title.as_deref()).map_err(map_todo_validation_error)?;
    state.todos_query.search(&term).await.map(web::Json)
}

/// Fetch one todo.
#[utoipa::path(
    get,
    path = "/todos/{id}",
    params(("id" = i32, Path, description = "Todo identifier")),
    responses(
        (status = 200, description = "Todo", body = Todo),
        (status = 404, description = "No such todo"),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["todos"],
    operation_id = "getTodo"
)]
#[get("/{id}")]
pub async fn get_todo(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<Todo>> {
    state
        .todos_query
        .get(TodoId::new(path.into_inner()))
        .await
        .map(web::Json)
}

/// Create a todo.
#[utoipa::path(
    post,
    path = "/todos/add",
    request_body = AddTodoRequest,
    responses(
        (status = 201, description = "Todo created", body = Todo,
            headers(("Location" = String, description = "URI of the new todo"))),
        (status = 400, description = "Title is required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["todos"],
    operation_id = "addTodo"
)]
#[post("/add")]
pub async fn add_todo(
    state: web::Data<HttpState>,
    payload: web::Json<AddTodoRequest>,
) -> ApiResult<HttpResponse> {
    let title = TodoTitle::new(payload.into_inner().title).map_err(map_todo_validation_error)?;
    let todo = state.todos.add(&title).await?;
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/todos/{}", todo.id())))
        .json(todo))
}

/// Flip a todo's done flag.
#[utoipa::path(
    put,
    path = "/todos/toggle/{id}",
    params(("id" = i32, Path, description = "Todo identifier")),
    responses(
        (status = 200, description = "Toggled todo", body = Todo),
        (status = 404, description = "No such todo"),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["todos"],
    operation_id = "toggleTodo"
)]
#[put("/toggle/{id}")]
pub async fn toggle_todo(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<Todo>> {
    state
        .todos
        .toggle(TodoId::new(path.into_inner()))
        .await
        .map(web::Json)
}

/// Delete a todo.
#[utoipa::path(
    delete,
    path = "/todos/delete/{id}",
    params(("id" = i32, Path, description = "Todo identifier")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "No such todo"),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["todos"],
    operation_id = "deleteTodo"
)]
#[delete("/delete/{id}")]
pub async fn delete_todo(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    state.todos.delete(TodoId::new(path.into_inner())).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Register the todo routes on a `/todos` scope.
///
/// Literal segments are registered before `/{id}` so they win the match.
pub fn scope() -> actix_web::Scope {
    web::scope("/todos")
        .service(list_todos)
        .service(search_todos)
        .service(add_todo)
        .service(toggle_todo)
        .service(delete_todo)
        .service(get_todo)
}

#[cfg(test)]
#[path = "todos_tests.rs"]
mod tests;
