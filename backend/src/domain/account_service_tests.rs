//! Tests for the account service.

use std::sync::Arc;

use rstest::rstest;

use super::*;
use crate::domain::ports::MockUserRepository;
use crate::domain::{EmailAddress, ErrorCode, UserRecord, Username};

fn alice() -> User {
    User::new(
        UserId::new(1),
        Username::new("alice").expect("username"),
        EmailAddress::new("alice@ex.com").expect("email"),
    )
}

fn alice_record(password: &str) -> UserRecord {
    UserRecord::new(alice(), hash_password(password).expect("hash"))
}

fn registration(username: &str, email: &str, password: &str) -> Registration {
    Registration::try_from_parts(username, email, password).expect("valid registration")
}

fn credentials(identifier: &str, password: &str) -> LoginCredentials {
    LoginCredentials::try_from_parts(identifier, password).expect("valid credentials")
}

#[tokio::test]
async fn register_inserts_normalised_user_with_hashed_password() {
    let mut repo = MockUserRepository::new();
    repo.expect_exists_with_username_or_email()
        .withf(|username, email| username.as_ref() == "alice" && email.as_ref() == "alice@ex.com")
        .times(1)
        .return_once(|_, _| Ok(false));
    repo.expect_insert()
        .withf(|user| {
            user.username().as_ref() == "alice"
                && user.email().as_ref() == "alice@ex.com"
                && verify_password("secret1", user.password_hash()).unwrap_or(false)
        })
        .times(1)
        .return_once(|_| Ok(alice()));

    let service = AccountService::new(Arc::new(repo));
    let user = service
        .register(&registration(" alice ", "Alice@Ex.com", "secret1"))
        .await
        .expect("registration succeeds");

    assert_eq!(user, alice());
}

#[tokio::test]
async fn register_rejects_existing_identity_before_hashing() {
    let mut repo = MockUserRepository::new();
    repo.expect_exists_with_username_or_email()
        .times(1)
        .return_once(|_, _| Ok(true));
    repo.expect_insert().times(0);

    let service = AccountService::new(Arc::new(repo));
    let error = service
        .register(&registration("alice", "other@ex.com", "secret2"))
        .await
        .expect_err("duplicate rejected");

    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(error.message(), DUPLICATE_ACCOUNT_MESSAGE);
}

#[tokio::test]
async fn register_reports_constraint_race_as_same_conflict() {
    let mut repo = MockUserRepository::new();
    repo.expect_exists_with_username_or_email()
        .times(1)
        .return_once(|_, _| Ok(false));
    repo.expect_insert()
        .times(1)
        .return_once(|_| Err(UserPersistenceError::duplicate("users_email_key")));

    let service = AccountService::new(Arc::new(repo));
    let error = service
        .register(&registration("alice", "alice@ex.com", "secret1"))
        .await
        .expect_err("race rejected");

    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(error.message(), DUPLICATE_ACCOUNT_MESSAGE);
}

#[rstest]
#[case(UserPersistenceError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(UserPersistenceError::query("syntax"), ErrorCode::InternalError)]
#[tokio::test]
async fn register_maps_repository_failures(
    #[case] failure: UserPersistenceError,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockUserRepository::new();
    repo.expect_exists_with_username_or_email()
        .times(1)
        .return_once(move |_, _| Err(failure));

    let service = AccountService::new(Arc::new(repo));
    let error = service
        .register(&registration("alice", "alice@ex.com", "secret1"))
        .await
        .expect_err("repository failure");

    assert_eq!(error.code(), expected);
}

#[tokio::test]
async fn login_passes_exact_username_and_lowercased_email_key() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_for_login()
        .withf(|username, email_key| username == "Alice@EX.com" && email_key == "alice@ex.com")
        .times(1)
        .return_once(|_, _| Ok(Some(alice_record("secret1"))));

    let service = AccountService::new(Arc::new(repo));
    let user = service
        .authenticate(&credentials(" Alice@EX.com ", "secret1"))
        .await
        .expect("login succeeds");

    assert_eq!(user, alice());
}

#[tokio::test]
async fn login_unknown_user_is_unauthorized() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_for_login()
        .times(1)
        .return_once(|_, _| Ok(None));

    let service = AccountService::new(Arc::new(repo));
    let error = service
        .authenticate(&credentials("ALICE", "secret1"))
        .await
        .expect_err("unknown user");

    assert_eq!(error.code(), ErrorCode::Unauthorized);
    assert_eq!(error.message(), INVALID_CREDENTIALS_MESSAGE);
}

#[tokio::test]
async fn login_wrong_password_matches_unknown_user_error() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_for_login()
        .times(1)
        .return_once(|_, _| Ok(Some(alice_record("secret1"))));

    let service = AccountService::new(Arc::new(repo));
    let error = service
        .authenticate(&credentials("alice", "secret2"))
        .await
        .expect_err("wrong password");

    assert_eq!(error.code(), ErrorCode::Unauthorized);
    assert_eq!(error.message(), INVALID_CREDENTIALS_MESSAGE);
}

#[tokio::test]
async fn login_with_malformed_stored_hash_is_internal() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_for_login().times(1).return_once(|_, _| {
        Ok(Some(UserRecord::new(
            alice(),
            crate::domain::PasswordHash::from_encoded("not-a-phc-string"),
        )))
    });

    let service = AccountService::new(Arc::new(repo));
    let error = service
        .authenticate(&credentials("alice", "secret1"))
        .await
        .expect_err("malformed hash");

    assert_eq!(error.code(), ErrorCode::InternalError);
}

#[tokio::test]
async fn fetch_user_returns_identity_or_not_found() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .withf(|id| *id == UserId::new(1))
        .times(1)
        .return_once(|_| Ok(Some(alice())));
    repo.expect_find_by_id()
        .withf(|id| *id == UserId::new(2))
        .times(1)
        .return_once(|_| Ok(None));

    let service = AccountService::new(Arc::new(repo));
    assert_eq!(
        service.fetch_user(UserId::new(1)).await.expect("found"),
        alice()
    );
    let error = service
        .fetch_user(UserId::new(2))
        .await
        .expect_err("missing user");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

/// Drive `work` alongside a ticker on the current-thread runtime and report
/// how often the ticker ran before `work` finished.
async fn ticks_while<F, T>(work: F) -> (T, usize)
where
    F: std::future::Future<Output = T>,
{
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    let done = AtomicBool::new(false);
    let ticks = AtomicUsize::new(0);
    let (output, ()) = tokio::join!(
        async {
            let output = work.await;
            done.store(true, Ordering::SeqCst);
            output
        },
        async {
            while !done.load(Ordering::SeqCst) {
                ticks.fetch_add(1, Ordering::SeqCst);
                tokio::task::yield_now().await;
            }
        }
    );
    (output, ticks.load(Ordering::SeqCst))
}

#[tokio::test]
async fn register_hashes_without_stalling_the_runtime() {
    let mut repo = MockUserRepository::new();
    repo.expect_exists_with_username_or_email()
        .return_once(|_, _| Ok(false));
    repo.expect_insert().return_once(|_| Ok(alice()));
    let service = AccountService::new(Arc::new(repo));
    let request = registration("alice", "alice@ex.com", "secret1");

    let (result, ticks) = ticks_while(service.register(&request)).await;

    result.expect("registration succeeds");
    assert!(ticks > 0, "other tasks must run while the password is hashed");
}

#[tokio::test]
async fn login_verifies_without_stalling_the_runtime() {
    let record = alice_record("secret1");
    let mut repo = MockUserRepository::new();
    repo.expect_find_for_login()
        .return_once(move |_, _| Ok(Some(record)));
    let service = AccountService::new(Arc::new(repo));
    let login = credentials("alice", "secret1");

    let (result, ticks) = ticks_while(service.authenticate(&login)).await;

    assert_eq!(result.expect("login succeeds"), alice());
    assert!(ticks > 0, "other tasks must run while the password is checked");
}
