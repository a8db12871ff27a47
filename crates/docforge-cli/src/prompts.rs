//! Interactive questions.
//!
//! Commands ask through the [`Prompt`] trait so the question flow can be
//! driven by scripted answers in tests. [`TerminalPrompt`] uses `dialoguer`
//! when the `interactive` feature is enabled.

use std::io::IsTerminal as _;

use crate::error::{CliError, CliResult};

/// One question at a time, blocking on the answer.
pub trait Prompt {
    /// Free text; an empty answer yields `default`.
    fn input(&self, question: &str, default: &str) -> CliResult<String>;

    fn confirm(&self, question: &str, default: bool) -> CliResult<bool>;

    /// Index into `items`.
    fn select(&self, question: &str, items: &[&str], default: usize) -> CliResult<usize>;
}

/// `true` when stdin is attached to a terminal.
pub fn stdin_is_tty() -> bool {
    std::io::stdin().is_terminal()
}

/// Prompts on the controlling terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompt;

#[cfg(feature = "interactive")]
impl Prompt for TerminalPrompt {
    fn input(&self, question: &str, default: &str) -> CliResult<String> {
        let mut input = dialoguer::Input::<String>::new()
            .with_prompt(question)
            .allow_empty(true);
        if !default.is_empty() {
            input = input.default(default.to_string());
        }
        let answer = input.interact_text().map_err(prompt_failed)?;
        let answer = answer.trim();
        Ok(if answer.is_empty() {
            default.to_string()
        } else {
            answer.to_string()
        })
    }

    fn confirm(&self, question: &str, default: bool) -> CliResult<bool> {
        dialoguer::Confirm::new()
            .with_prompt(question)
            .default(default)
            .interact()
            .map_err(prompt_failed)
    }

    fn select(&self, question: &str, items: &[&str], default: usize) -> CliResult<usize> {
        dialoguer::Select::new()
            .with_prompt(question)
            .items(items)
            .default(default)
            .interact()
            .map_err(prompt_failed)
    }
}

#[cfg(feature = "interactive")]
fn prompt_failed(err: dialoguer::Error) -> CliError {
    CliError::PromptFailed {
        message: err.to_string(),
    }
}

#[cfg(not(feature = "interactive"))]
impl Prompt for TerminalPrompt {
    fn input(&self, _question: &str, _default: &str) -> CliResult<String> {
        Err(unavailable())
    }

    fn confirm(&self, _question: &str, _default: bool) -> CliResult<bool> {
        Err(unavailable())
    }

    fn select(&self, _question: &str, _items: &[&str], _default: usize) -> CliResult<usize> {
        Err(unavailable())
    }
}

#[cfg(not(feature = "interactive"))]
fn unavailable() -> CliError {
    CliError::FeatureNotAvailable {
        feature: "interactive",
    }
}

/// Answers fed from a list, for tests.
#[cfg(test)]
pub mod scripted {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use super::*;

    /// A canned answer. `Default` takes whatever default the question offers.
    #[derive(Debug, Clone)]
    pub enum Answer {
        Text(String),
        Yes,
        No,
        Pick(usize),
        Default,
    }

    #[derive(Debug, Default)]
    pub struct ScriptedPrompt {
        answers: RefCell<VecDeque<Answer>>,
        pub asked: RefCell<Vec<String>>,
    }

    impl ScriptedPrompt {
        pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
            Self {
                answers: RefCell::new(answers.into_iter().collect()),
                asked: RefCell::default(),
            }
        }

        fn next(&self, question: &str) -> Answer {
            self.asked.borrow_mut().push(question.to_string());
            self.answers
                .borrow_mut()
                .pop_front()
                .unwrap_or(Answer::Default)
        }
    }

    impl Prompt for ScriptedPrompt {
        fn input(&self, question: &str, default: &str) -> CliResult<String> {
            Ok(match self.next(question) {
                Answer::Text(text) if !text.trim().is_empty() => text,
                _ => default.to_string(),
            })
        }

        fn confirm(&self, question: &str, default: bool) -> CliResult<bool> {
            Ok(match self.next(question) {
                Answer::Yes => true,
                Answer::No => false,
                _ => default,
            })
        }

        fn select(&self, question: &str, _items: &[&str], default: usize) -> CliResult<usize> {
            Ok(match self.next(question) {
                Answer::Pick(index) => index,
                _ => default,
            })
        }
    }
}
