//! Test doubles shared by unit tests and the integration suites in
//! `backend/tests`. Compiled for `cfg(test)` and the `test-support` feature.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, UserAccount};
use crate::inbound::cli::{Prompt, PromptError};

/// `UserRepository` keeping accounts in memory, keyed by email.
///
/// Enforces the unique email constraint the way the database does.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    accounts: Mutex<HashMap<String, UserAccount>>,
    writes: Mutex<usize>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the repository with existing accounts.
    pub fn with_accounts(accounts: impl IntoIterator<Item = UserAccount>) -> Self {
        let repo = Self::new();
        {
            let mut guard = repo.accounts.lock().expect("accounts lock");
            for account in accounts {
                guard.insert(account.email().to_string(), account);
            }
        }
        repo
    }

    /// Stored account for `email`, if any.
    pub fn get(&self, email: &str) -> Option<UserAccount> {
        self.accounts
            .lock()
            .expect("accounts lock")
            .get(email)
            .cloned()
    }

    /// Number of stored accounts.
    pub fn len(&self) -> usize {
        self.accounts.lock().expect("accounts lock").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of successful inserts and role updates.
    pub fn writes(&self) -> usize {
        *self.writes.lock().expect("writes lock")
    }

    fn record_write(&self) {
        *self.writes.lock().expect("writes lock") += 1;
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        Ok(self.get(email.as_ref()))
    }

    async fn insert(&self, account: &UserAccount) -> Result<(), UserPersistenceError> {
        let key = account.email().to_string();
        {
            let mut guard = self.accounts.lock().expect("accounts lock");
            if guard.contains_key(&key) {
                return Err(UserPersistenceError::duplicate(key));
            }
            guard.insert(key, account.clone());
        }
        self.record_write();
        Ok(())
    }

    async fn update_roles(&self, account: &UserAccount) -> Result<(), UserPersistenceError> {
        {
            let mut guard = self.accounts.lock().expect("accounts lock");
            let stored = guard
                .values_mut()
                .find(|stored| stored.id() == account.id())
                .ok_or_else(|| UserPersistenceError::query("user not found for role update"))?;
            *stored = UserAccount::new(
                *stored.id(),
                stored.email().clone(),
                stored.password_hash().clone(),
                account.roles().clone(),
            );
        }
        self.record_write();
        Ok(())
    }
}

/// `Prompt` replaying canned answers and recording the questions asked.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<String>,
    questions: Vec<String>,
}

impl ScriptedPrompt {
    /// Answer questions in order with `answers`.
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            questions: Vec::new(),
        }
    }

    /// Questions asked so far, in order.
    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    fn next(&mut self, question: &str) -> Result<String, PromptError> {
        self.questions.push(question.to_owned());
        self.answers
            .pop_front()
            .ok_or_else(|| PromptError::new(format!("no scripted answer for \"{question}\"")))
    }
}

impl Prompt for ScriptedPrompt {
    fn ask(&mut self, question: &str) -> Result<String, PromptError> {
        self.next(question)
    }

    fn ask_hidden(&mut self, question: &str) -> Result<Zeroizing<String>, PromptError> {
        self.next(question).map(Zeroizing::new)
    }
}
