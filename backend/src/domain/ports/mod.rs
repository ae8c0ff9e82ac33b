//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports (`*Repository`) are implemented by outbound adapters.
//! Driving ports are called by inbound adapters and implemented by the
//! domain services.

mod macros;
pub(crate) use macros::define_port_error;

mod login_service;
mod registration_service;
mod todo_repository;
mod todos_command;
mod todos_query;
mod user_profile_query;
mod user_repository;

pub use login_service::LoginService;
#[cfg(test)]
pub use login_service::MockLoginService;
pub use registration_service::RegistrationService;
#[cfg(test)]
pub use registration_service::MockRegistrationService;
#[cfg(test)]
pub use todo_repository::MockTodoRepository;
pub use todo_repository::{TodoPersistenceError, TodoRepository};
pub use todos_command::TodosCommand;
#[cfg(test)]
pub use todos_command::MockTodosCommand;
pub use todos_query::TodosQuery;
#[cfg(test)]
pub use todos_query::MockTodosQuery;
pub use user_profile_query::UserProfileQuery;
#[cfg(test)]
pub use user_profile_query::MockUserProfileQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
