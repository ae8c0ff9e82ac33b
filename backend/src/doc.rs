//! OpenAPI documentation.
//!
//! [`ApiDoc`] collects every handler annotated with `#[utoipa::path]` plus
//! the request and response schemas. Swagger UI serves it at `/docs` in
//! debug builds; `cargo run --bin openapi-dump` prints it.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode, Todo, User};
use crate::inbound::http::auth::{LoginRequest, RegisterRequest};
use crate::inbound::http::todos::AddTodoRequest;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Todo backend API",
        description = "Account registration, login and a shared todo list."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::login,
        crate::inbound::http::users::register_user,
        crate::inbound::http::users::login_user,
        crate::inbound::http::users::get_user,
        crate::inbound::http::todos::list_todos,
        crate::inbound::http::todos::search_todos,
        crate::inbound::http::todos::get_todo,
        crate::inbound::http::todos::add_todo,
        crate::inbound::http::todos::toggle_todo,
        crate::inbound::http::todos::delete_todo,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        User,
        Todo,
        Error,
        ErrorCode,
        RegisterRequest,
        LoginRequest,
        AddTodoRequest
    )),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "users", description = "User accounts"),
        (name = "todos", description = "Shared todo list"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
