//! Users API handlers.
//!
//! ```text
//! POST /users/register {"username":"alice","email":"alice@ex.com","password":"secret1"}
//! POST /users/login {"usernameOrEmail":"alice","password":"secret1"}
//! GET /users/1
//! ```
//!
//! Same account semantics as `/auth`, except registration answers 201 with
//! a `Location` header pointing at the new user.

use actix_web::http::header;
use actix_web::{HttpResponse, get, post, web};

use crate::domain::ports::UserProfileQuery;
use crate::domain::{Error, User, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{LoginRequest, RegisterRequest, login_account, register_account};
use crate::inbound::http::state::HttpState;

/// Register a new account and point at its resource.
#[utoipa::path(
    post,
    path = "/users/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = User,
            headers(("Location" = String, description = "URI of the new user"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Username or email already exists", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "registerUser"
)]
#[post("/register")]
pub async fn register_user(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let user = register_account(&state, payload.into_inner()).await?;
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/users/{}", user.id())))
        .json(user))
}

/// Check credentials and return the caller's identity.
#[utoipa::path(
    post,
    path = "/users/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = User),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "loginUser"
)]
#[post("/login")]
pub async fn login_user(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<User>> {
    login_account(&state, payload.into_inner())
        .await
        .map(web::Json)
}

/// Fetch a user's public identity.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use todo_backend::inbound::http::users::get_user;
///
/// let app = App::new().service(web::scope("/users").service(get_user));
/// ```
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = i32, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User identity", body = User),
        (status = 400, description = "Invalid identifier", body = Error),
        (status = 404, description = "No such user"),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<User>> {
    let id = UserId::new(path.into_inner());
    state.profile.fetch_user(id).await.map(web::Json)
}

/// Register the user routes on a `/users` scope.
pub fn scope() -> actix_web::Scope {
    web::scope("/users")
        .service(register_user)
        .service(login_user)
        .service(get_user)
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::inbound::http::test_utils::{extractor_configs, in_memory_state};
    use crate::test_support::InMemoryUserRepository;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use serde_json::{Value, json};

    fn test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let (json_cfg, query_cfg, path_cfg) = extractor_configs();
        App::new()
            .app_data(in_memory_state(InMemoryUserRepository::default()))
            .app_data(json_cfg)
            .app_data(query_cfg)
            .app_data(path_cfg)
            .service(scope())
    }

    #[actix_web::test]
    async fn register_answers_created_with_location() {
        let app = actix_test::init_service(test_app()).await;
        let request = actix_test::TestRequest::post()
            .uri("/users/register")
            .set_json(json!({ "username": "alice", "email": "alice@ex.com", "password": "secret1" }))
            .to_request();

        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response
                .headers()
                .get(header::LOCATION)
                .and_then(|value| value.to_str().ok()),
            Some("/users/1")
        );
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["username"], json!("alice"));
    }

    #[actix_web::test]
    async fn get_user_returns_registered_identity() {
        let app = actix_test::init_service(test_app()).await;
        let register = actix_test::TestRequest::post()
            .uri("/users/register")
            .set_json(json!({ "username": "alice", "email": "Alice@Ex.com", "password": "secret1" }))
            .to_request();
        actix_test::call_service(&app, register).await;

        let request = actix_test::TestRequest::get().uri("/users/1").to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, request).await;

        assert_eq!(
            body,
            json!({ "id": 1, "username": "alice", "email": "alice@ex.com" })
        );
    }

    #[actix_web::test]
    async fn unknown_user_is_not_found_with_empty_body() {
        let app = actix_test::init_service(test_app()).await;
        let request = actix_test::TestRequest::get().uri("/users/42").to_request();

        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(actix_test::read_body(response).await.is_empty());
    }

    #[actix_web::test]
    async fn non_numeric_id_is_bad_request() {
        let app = actix_test::init_service(test_app()).await;
        let request = actix_test::TestRequest::get().uri("/users/abc").to_request();

        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn login_uses_the_shared_account_flow() {
        let app = actix_test::init_service(test_app()).await;
        let register = actix_test::TestRequest::post()
            .uri("/users/register")
            .set_json(json!({ "username": "alice", "email": "alice@ex.com", "password": "secret1" }))
            .to_request();
        actix_test::call_service(&app, register).await;

        let request = actix_test::TestRequest::post()
            .uri("/users/login")
            .set_json(json!({ "usernameOrEmail": "ALICE@EX.COM", "password": "secret1" }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
    }
}
