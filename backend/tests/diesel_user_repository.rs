//! Integration tests for `DieselUserRepository` against embedded PostgreSQL.
//!
//! Tests are synchronous and drive the async repository through a dedicated
//! Tokio runtime, because the embedded cluster bootstrap cannot run inside
//! one.

use std::sync::Arc;

use pg_embedded_setup_unpriv::TestCluster;
use postgres::{Client, NoTls};
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;

use todo_backend::domain::ports::{RegistrationService, UserPersistenceError, UserRepository};
use todo_backend::domain::{
    AccountService, EmailAddress, ErrorCode, NewUser, PasswordHash, Registration, UserId,
    Username, hash_password, verify_password,
};
use todo_backend::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};

mod support;

use support::pg_embed::test_cluster;
use support::{handle_cluster_setup_failure, provision_migrated_database};

struct TestContext {
    runtime: Runtime,
    repository: DieselUserRepository,
    database_url: String,
    _cluster: TestCluster,
}

impl TestContext {
    fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    fn insert(&self, username: &str, email: &str) -> Result<UserId, UserPersistenceError> {
        let user = new_user(username, email, "secret1");
        self.block_on(self.repository.insert(&user))
            .map(|stored| stored.id())
    }

    fn count_users(&self) -> i64 {
        let mut client = Client::connect(&self.database_url, NoTls).expect("connect");
        client
            .query_one("SELECT count(*) FROM users", &[])
            .expect("count users")
            .get(0)
    }
}

fn setup_test_context() -> Result<TestContext, String> {
    let cluster = test_cluster()?;
    let database_url = provision_migrated_database(&cluster)?;
    let runtime = Runtime::new().map_err(|err| err.to_string())?;

    let config = PoolConfig::new(&database_url)
        .with_max_size(2)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(DbPool::new(config))
        .map_err(|err| err.to_string())?;

    Ok(TestContext {
        runtime,
        repository: DieselUserRepository::new(pool),
        database_url,
        _cluster: cluster,
    })
}

#[fixture]
fn diesel_world() -> Option<TestContext> {
    match setup_test_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn new_user(username: &str, email: &str, password: &str) -> NewUser {
    NewUser::new(
        Username::new(username).expect("valid username"),
        EmailAddress::new(email).expect("valid email"),
        hash_password(password).expect("hash"),
    )
}

#[rstest]
fn insert_assigns_increasing_ids_and_stores_identity(diesel_world: Option<TestContext>) {
    let Some(ctx) = diesel_world else { return };

    let first = ctx
        .block_on(ctx.repository.insert(&new_user("alice", "Alice@Ex.com", "secret1")))
        .expect("first insert");
    let second = ctx.insert("bob", "bob@ex.com").expect("second insert");

    assert_eq!(first.username(), "alice");
    assert_eq!(first.email(), "alice@ex.com");
    assert!(second.get() > first.id().get());
    let fetched = ctx
        .block_on(ctx.repository.find_by_id(first.id()))
        .expect("find by id");
    assert_eq!(fetched, Some(first));
}

#[rstest]
#[case("alice", "other@ex.com", "users_username_key")]
#[case("bob", "alice@ex.com", "users_email_key")]
fn unique_constraints_surface_as_duplicates(
    diesel_world: Option<TestContext>,
    #[case] username: &str,
    #[case] email: &str,
    #[case] constraint: &str,
) {
    let Some(ctx) = diesel_world else { return };
    ctx.insert("alice", "alice@ex.com").expect("seed user");

    let error = ctx.insert(username, email).expect_err("duplicate insert");

    assert_eq!(error, UserPersistenceError::duplicate(constraint));
}

#[rstest]
fn existence_check_matches_username_or_email(diesel_world: Option<TestContext>) {
    let Some(ctx) = diesel_world else { return };
    ctx.insert("alice", "alice@ex.com").expect("seed user");

    let exists = |username: &str, email: &str| {
        ctx.block_on(ctx.repository.exists_with_username_or_email(
            &Username::new(username).expect("valid username"),
            &EmailAddress::new(email).expect("valid email"),
        ))
        .expect("exists query")
    };

    assert!(exists("alice", "fresh@ex.com"));
    assert!(exists("fresh", "ALICE@ex.com"));
    assert!(!exists("Alice", "fresh@ex.com"));
}

#[rstest]
fn login_lookup_is_exact_on_username_and_case_insensitive_on_email(
    diesel_world: Option<TestContext>,
) {
    let Some(ctx) = diesel_world else { return };
    let id = ctx.insert("alice", "alice@ex.com").expect("seed user");

    let find = |username: &str, email_key: &str| {
        ctx.block_on(ctx.repository.find_for_login(username, email_key))
            .expect("login lookup")
    };

    let by_username = find("alice", "alice").expect("matched by username");
    assert_eq!(by_username.user().id(), id);
    assert!(verify_password("secret1", by_username.password_hash()).expect("verify"));
    assert!(find("ALICE@EX.COM", "alice@ex.com").is_some());
    assert!(find("ALICE", "alice").is_none());
}

#[rstest]
fn login_lookup_prefers_the_lowest_id(diesel_world: Option<TestContext>) {
    let Some(ctx) = diesel_world else { return };
    let first = ctx.insert("carol@ex.com", "carol1@ex.com").expect("first");
    ctx.insert("carol", "carol@ex.com").expect("second");

    let record = ctx
        .block_on(ctx.repository.find_for_login("carol@ex.com", "carol@ex.com"))
        .expect("login lookup")
        .expect("matched");

    assert_eq!(record.user().id(), first);
}

#[rstest]
fn unknown_id_is_absent(diesel_world: Option<TestContext>) {
    let Some(ctx) = diesel_world else { return };

    let fetched = ctx
        .block_on(ctx.repository.find_by_id(UserId::new(404)))
        .expect("find by id");

    assert!(fetched.is_none());
}

#[rstest]
fn stored_hash_is_not_the_plain_password(diesel_world: Option<TestContext>) {
    let Some(ctx) = diesel_world else { return };
    ctx.insert("dave", "dave@ex.com").expect("seed user");

    let record = ctx
        .block_on(ctx.repository.find_for_login("dave", "dave"))
        .expect("login lookup")
        .expect("matched");

    let encoded: &PasswordHash = record.password_hash();
    assert!(encoded.as_str().starts_with("$argon2id$"));
}

#[rstest]
fn concurrent_registrations_leave_one_account(diesel_world: Option<TestContext>) {
    let Some(ctx) = diesel_world else { return };
    let service = AccountService::new(Arc::new(ctx.repository.clone()));
    let first = Registration::try_from_parts("erin", "erin@ex.com", "secret1")
        .expect("valid registration");
    let second = Registration::try_from_parts("erin", "erin@other.com", "secret1")
        .expect("valid registration");

    let (first, second) = ctx.block_on(async {
        tokio::join!(service.register(&first), service.register(&second))
    });

    let outcomes = [first, second];
    assert_eq!(outcomes.iter().filter(|outcome| outcome.is_ok()).count(), 1);
    let conflict = outcomes
        .iter()
        .find_map(|outcome| outcome.as_ref().err())
        .expect("one registration loses");
    assert_eq!(conflict.code(), ErrorCode::Conflict);
    assert_eq!(ctx.count_users(), 1);
}
