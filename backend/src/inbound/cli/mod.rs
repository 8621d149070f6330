//! Console inbound adapter for operator commands.

pub mod console;
pub mod create_admin;
pub mod prompt;

pub use console::Console;
pub use create_admin::{CommandStatus, CreateAdminArgs, CreateAdminCommand};
pub use prompt::{Prompt, PromptError, TerminalPrompt};
