//! Interactive questions asked by console commands.

use dialoguer::{Input, Password};
use zeroize::Zeroizing;

/// Failure while reading an answer from the operator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to read answer: {message}")]
pub struct PromptError {
    message: String,
}

impl PromptError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<dialoguer::Error> for PromptError {
    fn from(value: dialoguer::Error) -> Self {
        Self::new(value.to_string())
    }
}

/// Source of operator answers.
pub trait Prompt {
    /// Ask a visible question.
    fn ask(&mut self, question: &str) -> Result<String, PromptError>;

    /// Ask a question whose answer is not echoed.
    fn ask_hidden(&mut self, question: &str) -> Result<Zeroizing<String>, PromptError>;
}

/// Prompts on the controlling terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn ask(&mut self, question: &str) -> Result<String, PromptError> {
        Ok(Input::<String>::new()
            .with_prompt(question)
            .allow_empty(true)
            .interact_text()?)
    }

    fn ask_hidden(&mut self, question: &str) -> Result<Zeroizing<String>, PromptError> {
        let answer = Password::new()
            .with_prompt(question)
            .allow_empty_password(true)
            .interact()?;
        Ok(Zeroizing::new(answer))
    }
}
