//! Cross-origin policy for the browser frontend.
//!
//! Configured origins are echoed in `Access-Control-Allow-Origin`; any method
//! and request header is allowed. The `actix-cors` middleware is not `Send`,
//! so workers build their own instance from the shared [`CorsPolicy`].

use std::sync::Arc;

use actix_cors::Cors;
use tracing::warn;

/// Origins allowed to call the API.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use todo_backend::middleware::CorsPolicy;
///
/// let policy = CorsPolicy::new(["http://localhost:5173"]);
/// let app = App::new().wrap(policy.middleware());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CorsPolicy {
    origins: Arc<[String]>,
}

impl CorsPolicy {
    /// Build the policy; trailing slashes are dropped and `*` is ignored.
    pub fn new<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let origins = origins
            .into_iter()
            .map(Into::into)
            .map(|origin: String| origin.trim_end_matches('/').to_owned())
            .filter(|origin| {
                if origin == "*" {
                    warn!("wildcard CORS origin ignored");
                    return false;
                }
                !origin.is_empty()
            })
            .collect::<Vec<_>>();
        Self {
            origins: origins.into(),
        }
    }

    /// Allowed origins.
    pub fn origins(&self) -> &[String] {
        &self.origins
    }

    /// A fresh middleware instance for one worker.
    pub fn middleware(&self) -> Cors {
        self.origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allow_any_method()
            .allow_any_header()
    }
}
