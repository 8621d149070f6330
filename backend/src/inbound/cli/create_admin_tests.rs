//! Tests for the `create-admin` command flow.

use std::sync::Arc;

use super::*;
use crate::domain::ports::{MockUserRepository, UserPersistenceError};
use crate::domain::{PasswordHash, RoleSet, UserAccount, UserId};
use crate::outbound::hashing::Argon2PasswordHasher;
use crate::test_support::{InMemoryUserRepository, ScriptedPrompt};
use rstest::rstest;

type Service = AdminProvisioningService<InMemoryUserRepository, Argon2PasswordHasher>;

struct Harness {
    repo: Arc<InMemoryUserRepository>,
    service: Service,
    prompt: ScriptedPrompt,
}

impl Harness {
    fn new(repo: InMemoryUserRepository, answers: &[&str]) -> Self {
        let repo = Arc::new(repo);
        let service =
            AdminProvisioningService::new(Arc::clone(&repo), Arc::new(Argon2PasswordHasher::new()));
        Self {
            repo,
            service,
            prompt: ScriptedPrompt::new(answers.iter().copied()),
        }
    }

    async fn run(&mut self, args: CreateAdminArgs) -> (CommandStatus, String) {
        let mut console = Console::new(Vec::new());
        let status = CreateAdminCommand::new(&self.service, &mut self.prompt, &mut console)
            .run(args)
            .await
            .expect("console writes succeed");
        let output = String::from_utf8(console.into_inner()).expect("utf-8 output");
        (status, output)
    }
}

fn args(email: Option<&str>, password: Option<&str>, promote: bool) -> CreateAdminArgs {
    CreateAdminArgs {
        email: email.map(str::to_owned),
        password: password.map(str::to_owned),
        promote,
    }
}

fn existing(email: &str, roles: &[&str]) -> UserAccount {
    UserAccount::new(
        UserId::random(),
        EmailAddress::new(email).expect("valid email"),
        PasswordHash::new("$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA").expect("valid hash"),
        RoleSet::try_from_strings(roles.iter().copied()).expect("valid roles"),
    )
}

#[rstest]
#[tokio::test]
async fn creates_admin_from_arguments() {
    let mut harness = Harness::new(InMemoryUserRepository::new(), &[]);

    let (status, output) = harness
        .run(args(Some("Admin@Example.com"), Some("s3cret!"), false))
        .await;

    assert_eq!(status, CommandStatus::Success);
    assert!(output.contains(" [OK] Admin user created successfully!"));
    assert!(output.contains("  admin@example.com   ROLE_ADMIN"));
    assert!(output.contains(" ! [NOTE] You can now log in with these credentials"));
    assert!(harness.prompt.questions().is_empty());

    let stored = harness.repo.get("admin@example.com").expect("stored account");
    assert!(stored.is_admin());
    assert_ne!(stored.password_hash().as_str(), "s3cret!");
}

#[rstest]
#[tokio::test]
async fn prompts_for_missing_values_and_confirms_password() {
    let mut harness = Harness::new(
        InMemoryUserRepository::new(),
        &["admin@example.com", "s3cret!", "s3cret!"],
    );

    let (status, _) = harness.run(args(None, None, false)).await;

    assert_eq!(status, CommandStatus::Success);
    assert_eq!(
        harness.prompt.questions(),
        [
            EMAIL_QUESTION.to_owned(),
            "Enter admin password (min 6 characters)".to_owned(),
            CONFIRM_QUESTION.to_owned(),
        ]
    );
}

#[rstest]
#[tokio::test]
async fn mismatched_confirmation_fails_without_writing() {
    let mut harness = Harness::new(InMemoryUserRepository::new(), &["s3cret!", "s3cret?"]);

    let (status, output) = harness
        .run(args(Some("admin@example.com"), None, false))
        .await;

    assert_eq!(status, CommandStatus::Failure);
    assert!(output.contains(" [ERROR] Passwords do not match!"));
    assert!(harness.repo.is_empty());
}

#[rstest]
#[case(Some("abc"), &[])]
#[case(None, &["abc", "abc"])]
#[tokio::test]
async fn short_password_fails_without_writing(
    #[case] password: Option<&str>,
    #[case] answers: &[&str],
) {
    let mut harness = Harness::new(InMemoryUserRepository::new(), answers);

    let (status, output) = harness
        .run(args(Some("admin@example.com"), password, false))
        .await;

    assert_eq!(status, CommandStatus::Failure);
    assert!(output.contains(" [ERROR] Password must be at least 6 characters long!"));
    assert_eq!(harness.repo.writes(), 0);
}

#[rstest]
#[tokio::test]
async fn duplicate_without_promote_suggests_flag() {
    let repo = InMemoryUserRepository::with_accounts([existing("admin@example.com", &[])]);
    let mut harness = Harness::new(repo, &[]);

    let (status, output) = harness
        .run(args(Some("admin@example.com"), Some("s3cret!"), false))
        .await;

    assert_eq!(status, CommandStatus::Failure);
    assert!(output.contains(" [ERROR] User with email \"admin@example.com\" already exists!"));
    assert!(output.contains(" ! [NOTE] Use --promote option to promote this user to admin"));
    assert_eq!(harness.repo.writes(), 0);
}

#[rstest]
#[tokio::test]
async fn promote_never_asks_for_a_password() {
    let account = existing("sales@example.com", &["ROLE_SALES"]);
    let original_hash = account.password_hash().clone();
    let repo = InMemoryUserRepository::with_accounts([account]);
    let mut harness = Harness::new(repo, &[]);

    let (status, output) = harness
        .run(args(Some("sales@example.com"), None, true))
        .await;

    assert_eq!(status, CommandStatus::Success);
    assert!(output.contains(" [OK] User \"sales@example.com\" has been promoted to admin!"));
    assert!(harness.prompt.questions().is_empty());

    let stored = harness.repo.get("sales@example.com").expect("stored account");
    assert_eq!(stored.roles().to_strings(), vec!["ROLE_ADMIN", "ROLE_SALES"]);
    assert_eq!(stored.password_hash(), &original_hash);
}

#[rstest]
#[tokio::test]
async fn promote_on_unknown_email_creates_account() {
    let mut harness = Harness::new(InMemoryUserRepository::new(), &[]);

    let (status, output) = harness
        .run(args(Some("new@example.com"), Some("s3cret!"), true))
        .await;

    assert_eq!(status, CommandStatus::Success);
    assert!(output.contains("Admin user created successfully!"));
    assert_eq!(harness.repo.len(), 1);
}

#[rstest]
#[case("not-an-email")]
#[case("   ")]
#[tokio::test]
async fn invalid_email_is_reported(#[case] email: &str) {
    let mut harness = Harness::new(InMemoryUserRepository::new(), &[]);

    let (status, output) = harness.run(args(Some(email), Some("s3cret!"), false)).await;

    assert_eq!(status, CommandStatus::Failure);
    assert!(output.contains(" [ERROR] email address"));
    assert!(harness.repo.is_empty());
}

#[rstest]
#[tokio::test]
async fn empty_email_argument_is_asked_for() {
    let mut harness = Harness::new(InMemoryUserRepository::new(), &["admin@example.com"]);

    let (status, _) = harness.run(args(Some(""), Some("s3cret!"), false)).await;

    assert_eq!(status, CommandStatus::Success);
    assert_eq!(harness.prompt.questions(), [EMAIL_QUESTION.to_owned()]);
    assert!(harness.repo.get("admin@example.com").is_some());
}

#[rstest]
#[tokio::test]
async fn empty_password_argument_is_asked_for_and_confirmed() {
    let mut harness = Harness::new(InMemoryUserRepository::new(), &["s3cret!", "s3cret!"]);

    let (status, output) = harness
        .run(args(Some("new@example.com"), Some(""), false))
        .await;

    assert_eq!(status, CommandStatus::Success);
    assert!(output.contains(" [OK] Admin user created successfully!"));
    assert_eq!(
        harness.prompt.questions(),
        [
            "Enter admin password (min 6 characters)".to_owned(),
            CONFIRM_QUESTION.to_owned(),
        ]
    );
}

#[rstest]
#[tokio::test]
async fn exhausted_prompt_is_a_failure() {
    let mut harness = Harness::new(InMemoryUserRepository::new(), &[]);

    let (status, output) = harness.run(args(None, None, false)).await;

    assert_eq!(status, CommandStatus::Failure);
    assert!(output.contains(" [ERROR] failed to read answer"));
}

#[rstest]
#[tokio::test]
async fn unreachable_store_is_reported_as_unavailable() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email()
        .return_once(|_| Err(UserPersistenceError::connection("refused")));
    repo.expect_insert().never();
    let service =
        AdminProvisioningService::new(Arc::new(repo), Arc::new(Argon2PasswordHasher::new()));
    let mut prompt = ScriptedPrompt::new(Vec::<String>::new());
    let mut console = Console::new(Vec::new());

    let status = CreateAdminCommand::new(&service, &mut prompt, &mut console)
        .run(args(Some("admin@example.com"), Some("s3cret!"), false))
        .await
        .expect("console writes succeed");

    let output = String::from_utf8(console.into_inner()).expect("utf-8 output");
    assert_eq!(status, CommandStatus::Failure);
    assert!(output.contains(" [ERROR] user repository unavailable: refused"));
}
