//! Tests for the administrator provisioning service.

use std::sync::Arc;

use super::*;
use crate::domain::ports::{MockPasswordHasher, MockUserRepository};
use crate::domain::{ErrorCode, PasswordHash, Role, RoleSet, UserId};
use mockall::predicate::always;
use rstest::{fixture, rstest};

const HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA";

type Service = AdminProvisioningService<MockUserRepository, MockPasswordHasher>;

fn make_service(repo: MockUserRepository, hasher: MockPasswordHasher) -> Service {
    AdminProvisioningService::new(Arc::new(repo), Arc::new(hasher))
}

#[fixture]
fn email() -> EmailAddress {
    EmailAddress::new("admin@example.com").expect("valid email")
}

#[fixture]
fn password() -> PlainPassword {
    PlainPassword::new("s3cret!").expect("valid password")
}

fn existing_account(email: &EmailAddress, roles: &[&str]) -> UserAccount {
    UserAccount::new(
        UserId::random(),
        email.clone(),
        PasswordHash::new(HASH).expect("valid hash"),
        RoleSet::try_from_strings(roles.iter().copied()).expect("valid roles"),
    )
}

#[rstest]
#[case(false)]
#[case(true)]
#[tokio::test]
async fn unknown_email_awaits_password(email: EmailAddress, #[case] promote: bool) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email()
        .times(1)
        .return_once(|_| Ok(None));
    repo.expect_update_roles().never();
    repo.expect_insert().never();

    let service = make_service(repo, MockPasswordHasher::new());
    let step = service.resolve(&email, promote).await.expect("resolve");

    match step {
        ProvisionStep::AwaitingPassword(pending) => assert_eq!(pending.email(), &email),
        other => panic!("expected pending admin, got {other:?}"),
    }
}

#[rstest]
#[tokio::test]
async fn existing_email_without_promote_is_duplicate(email: EmailAddress) {
    let account = existing_account(&email, &[]);
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email()
        .times(1)
        .return_once(move |_| Ok(Some(account)));
    repo.expect_update_roles().never();
    repo.expect_insert().never();

    let service = make_service(repo, MockPasswordHasher::new());
    let err = service.resolve(&email, false).await.expect_err("duplicate");

    assert_eq!(
        err,
        ProvisionError::DuplicateAccount {
            email: "admin@example.com".into()
        }
    );
    assert_eq!(
        err.to_string(),
        "User with email \"admin@example.com\" already exists!"
    );
}

#[rstest]
#[tokio::test]
async fn promotion_adds_admin_and_keeps_other_roles(email: EmailAddress) {
    let account = existing_account(&email, &["ROLE_SALES"]);
    let original_hash = account.password_hash().clone();
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email()
        .times(1)
        .return_once(move |_| Ok(Some(account)));
    repo.expect_update_roles()
        .times(1)
        .withf(|account| account.roles().to_strings() == vec!["ROLE_ADMIN", "ROLE_SALES"])
        .return_once(|_| Ok(()));
    repo.expect_insert().never();

    let mut hasher = MockPasswordHasher::new();
    hasher.expect_hash().never();

    let service = make_service(repo, hasher);
    let step = service.resolve(&email, true).await.expect("promote");

    let ProvisionStep::Promoted {
        account,
        already_admin,
    } = step
    else {
        panic!("expected promotion");
    };
    assert!(!already_admin);
    assert!(account.is_admin());
    assert_eq!(account.password_hash(), &original_hash);
}

#[rstest]
#[tokio::test]
async fn promoting_an_admin_is_reported_without_writing(email: EmailAddress) {
    let account = existing_account(&email, &[Role::ADMIN]);
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email()
        .times(1)
        .return_once(move |_| Ok(Some(account)));
    repo.expect_update_roles().never();

    let service = make_service(repo, MockPasswordHasher::new());
    let step = service.resolve(&email, true).await.expect("promote");

    assert!(matches!(
        step,
        ProvisionStep::Promoted {
            already_admin: true,
            ..
        }
    ));
}

#[rstest]
#[tokio::test]
async fn create_hashes_and_inserts_admin(email: EmailAddress, password: PlainPassword) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email()
        .times(1)
        .return_once(|_| Ok(None));
    repo.expect_insert()
        .times(1)
        .withf(|account| account.is_admin() && account.password_hash().as_str() == HASH)
        .return_once(|_| Ok(()));

    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .times(1)
        .withf(|password| password.expose() == "s3cret!")
        .returning(|_| Ok(PasswordHash::new(HASH).expect("valid hash")));

    let service = make_service(repo, hasher);
    let ProvisionStep::AwaitingPassword(pending) =
        service.resolve(&email, false).await.expect("resolve")
    else {
        panic!("expected pending admin");
    };
    let account = service.create(pending, &password).await.expect("create");

    assert_eq!(account.email(), &email);
    assert_eq!(account.roles().to_strings(), vec![Role::ADMIN]);
    assert_ne!(account.password_hash().as_str(), password.expose());
}

#[rstest]
#[tokio::test]
async fn racing_insert_maps_to_duplicate(email: EmailAddress, password: PlainPassword) {
    let mut repo = MockUserRepository::new();
    repo.expect_insert()
        .times(1)
        .return_once(|account| Err(UserPersistenceError::duplicate(account.email().as_ref())));

    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .with(always())
        .returning(|_| Ok(PasswordHash::new(HASH).expect("valid hash")));

    let service = make_service(repo, hasher);
    let pending = PendingAdmin {
        email: email.clone(),
    };
    let err = service.create(pending, &password).await.expect_err("duplicate");

    assert!(matches!(err, ProvisionError::DuplicateAccount { .. }));
}

#[rstest]
#[tokio::test]
async fn hashing_failure_skips_insert(email: EmailAddress, password: PlainPassword) {
    let mut repo = MockUserRepository::new();
    repo.expect_insert().never();

    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .returning(|_| Err(PasswordHashError::hash("out of memory")));

    let service = make_service(repo, hasher);
    let err = service
        .create(PendingAdmin { email }, &password)
        .await
        .expect_err("hash failure");

    assert_eq!(
        err,
        ProvisionError::Hashing(PasswordHashError::hash("out of memory"))
    );
}

#[rstest]
#[tokio::test]
async fn lookup_failure_is_propagated(email: EmailAddress) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email()
        .return_once(|_| Err(UserPersistenceError::connection("refused")));

    let service = make_service(repo, MockPasswordHasher::new());
    let err = service.resolve(&email, true).await.expect_err("lookup fails");

    assert_eq!(
        Error::from(err).code(),
        ErrorCode::ServiceUnavailable
    );
}

#[rstest]
#[case(PasswordValidationError::Mismatch, ProvisionError::PasswordMismatch)]
#[case(
    PasswordValidationError::TooShort { min: 6 },
    ProvisionError::PasswordTooShort { min: 6 }
)]
fn password_validation_maps_to_provision_errors(
    #[case] source: PasswordValidationError,
    #[case] expected: ProvisionError,
) {
    assert_eq!(ProvisionError::from(source), expected);
}

#[rstest]
#[case(ProvisionError::DuplicateAccount { email: "a@b.c".into() }, ErrorCode::Conflict)]
#[case(ProvisionError::PasswordMismatch, ErrorCode::InvalidRequest)]
#[case(ProvisionError::PasswordTooShort { min: 6 }, ErrorCode::InvalidRequest)]
#[case(ProvisionError::Hashing(PasswordHashError::hash("x")), ErrorCode::InternalError)]
#[case(ProvisionError::Persistence(UserPersistenceError::query("x")), ErrorCode::InternalError)]
fn provision_errors_map_to_domain_codes(#[case] err: ProvisionError, #[case] code: ErrorCode) {
    assert_eq!(Error::from(err).code(), code);
}
