//! `create-admin` console command.
//!
//! ```text
//! create-admin [EMAIL] [PASSWORD] [-p|--promote]
//! ```
//!
//! Missing or empty arguments are asked for interactively. A password typed at the
//! prompt must be confirmed; a password passed as an argument is taken as is.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Args;
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::domain::ports::{PasswordHasher, UserRepository};
use crate::domain::{
    AdminProvisioningService, EmailAddress, Error, PASSWORD_MIN_LENGTH, PlainPassword,
    ProvisionError, ProvisionStep, Role,
};

use super::console::Console;
use super::prompt::Prompt;

pub const EMAIL_QUESTION: &str = "Enter admin email address";
pub const CONFIRM_QUESTION: &str = "Confirm password";
pub const PROMOTE_HINT: &str = "Use --promote option to promote this user to admin";
pub const LOGIN_NOTE: &str = "You can now log in with these credentials";

/// Question asked for a new password.
pub fn password_question() -> String {
    format!("Enter admin password (min {PASSWORD_MIN_LENGTH} characters)")
}

/// Arguments accepted by `create-admin`.
#[derive(Debug, Clone, Default, Args)]
pub struct CreateAdminArgs {
    /// Admin email address.
    pub email: Option<String>,
    /// Admin password.
    pub password: Option<String>,
    /// Promote an existing user to admin.
    #[arg(short, long)]
    pub promote: bool,
}

/// Process outcome of a command run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    Success,
    Failure,
}

impl From<CommandStatus> for ExitCode {
    fn from(value: CommandStatus) -> Self {
        match value {
            CommandStatus::Success => ExitCode::SUCCESS,
            CommandStatus::Failure => ExitCode::FAILURE,
        }
    }
}

/// Runs `create-admin` against a provisioning service.
pub struct CreateAdminCommand<'a, R, H, P, W> {
    service: &'a AdminProvisioningService<R, H>,
    prompt: &'a mut P,
    console: &'a mut Console<W>,
}

impl<'a, R, H, P, W> CreateAdminCommand<'a, R, H, P, W>
where
    R: UserRepository,
    H: PasswordHasher,
    P: Prompt,
    W: Write,
{
    pub fn new(
        service: &'a AdminProvisioningService<R, H>,
        prompt: &'a mut P,
        console: &'a mut Console<W>,
    ) -> Self {
        Self {
            service,
            prompt,
            console,
        }
    }

    /// Execute the command.
    ///
    /// Every domain failure is reported on the console and yields
    /// [`CommandStatus::Failure`]. Only failures to write to the console
    /// itself are returned as errors.
    pub async fn run(mut self, args: CreateAdminArgs) -> io::Result<CommandStatus> {
        let CreateAdminArgs {
            email,
            password,
            promote,
        } = args;
        let email = email.filter(|value| !value.is_empty());
        let password = password
            .filter(|value| !value.is_empty())
            .map(Zeroizing::new);

        let raw_email = match email {
            Some(email) => email,
            None => match self.prompt.ask(EMAIL_QUESTION) {
                Ok(answer) => answer,
                Err(err) => return self.fail(&err.to_string()),
            },
        };
        let email = match EmailAddress::new(&raw_email) {
            Ok(email) => email,
            Err(err) => return self.fail(&err.to_string()),
        };

        let pending = match self.service.resolve(&email, promote).await {
            Ok(ProvisionStep::Promoted { already_admin, .. }) => {
                debug!(%email, already_admin, "promotion finished");
                self.console
                    .success(&format!("User \"{email}\" has been promoted to admin!"))?;
                return Ok(CommandStatus::Success);
            }
            Ok(ProvisionStep::AwaitingPassword(pending)) => pending,
            Err(err @ ProvisionError::DuplicateAccount { .. }) => {
                self.console.error(&err.to_string())?;
                self.console.note(PROMOTE_HINT)?;
                return Ok(CommandStatus::Failure);
            }
            Err(err) => return self.report(err),
        };

        let password = match self.read_password(password) {
            Ok(password) => password,
            Err(message) => return self.fail(&message),
        };

        match self.service.create(pending, &password).await {
            Ok(account) => {
                self.console.success("Admin user created successfully!")?;
                let rows = [vec![account.email().to_string(), Role::ADMIN.to_owned()]];
                self.console.table(&["Email", "Role"], &rows)?;
                self.console.note(LOGIN_NOTE)?;
                Ok(CommandStatus::Success)
            }
            Err(err) => self.report(err),
        }
    }

    fn read_password(
        &mut self,
        supplied: Option<Zeroizing<String>>,
    ) -> Result<PlainPassword, String> {
        let validated = match supplied {
            Some(raw) => PlainPassword::new(&raw),
            None => {
                let question = password_question();
                let raw = self.prompt.ask_hidden(&question).map_err(|e| e.to_string())?;
                let confirmation = self
                    .prompt
                    .ask_hidden(CONFIRM_QUESTION)
                    .map_err(|e| e.to_string())?;
                PlainPassword::confirmed(&raw, &confirmation)
            }
        };
        validated.map_err(|err| ProvisionError::from(err).to_string())
    }

    fn report(&mut self, err: ProvisionError) -> io::Result<CommandStatus> {
        let err = Error::from(err);
        warn!(code = ?err.code(), error = err.message(), "create-admin failed");
        self.console.error(err.message())?;
        Ok(CommandStatus::Failure)
    }

    fn fail(&mut self, message: &str) -> io::Result<CommandStatus> {
        warn!(error = message, "create-admin failed");
        self.console.error(message)?;
        Ok(CommandStatus::Failure)
    }
}

#[cfg(test)]
#[path = "create_admin_tests.rs"]
mod tests;
