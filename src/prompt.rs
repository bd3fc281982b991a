//! Interactive prompting behind a small capability trait.
//!
//! The resolver, the overwrite guard and the commands only ever talk to
//! a `Prompter`.  `TerminalPrompter` drives a real terminal through
//! `dialoguer`; `ScriptedPrompter` replays canned answers in tests.

use std::collections::VecDeque;

use zeroize::Zeroizing;

use crate::errors::{NostrVaultError, Result};

/// Environment variable that answers passphrase prompts (CI/CD).
pub const PASSPHRASE_ENV: &str = "NOSTRVAULT_PASSPHRASE";

/// Ask the user for strings, secrets and yes/no decisions.
pub trait Prompter {
    /// Free-form text, falling back to `default` on empty input.
    fn input(&mut self, prompt: &str, default: Option<&str>) -> Result<String>;

    /// Hidden input; may be empty.
    fn secret(&mut self, prompt: &str) -> Result<Zeroizing<String>>;

    /// Yes/no question.
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool>;
}

/// Ask for a new passphrase twice.  An empty passphrase is allowed and
/// means the secret is stored unencrypted.
pub fn prompt_new_passphrase(prompter: &mut dyn Prompter) -> Result<Zeroizing<String>> {
    let first = prompter.secret("Enter passphrase (empty for no passphrase)")?;
    let second = prompter.secret("Enter passphrase again")?;
    if first.as_str() != second.as_str() {
        return Err(NostrVaultError::PassphraseMismatch);
    }
    Ok(first)
}

/// `Prompter` backed by the terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for TerminalPrompter {
    fn input(&mut self, prompt: &str, default: Option<&str>) -> Result<String> {
        let mut input = dialoguer::Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true);
        if let Some(d) = default {
            input = input.default(d.to_string());
        }
        input
            .interact_text()
            .map_err(|e| NostrVaultError::Prompt(format!("input prompt: {e}")))
    }

    fn secret(&mut self, prompt: &str) -> Result<Zeroizing<String>> {
        if let Ok(pw) = std::env::var(PASSPHRASE_ENV) {
            if !pw.is_empty() {
                return Ok(Zeroizing::new(pw));
            }
        }

        let pw = dialoguer::Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()
            .map_err(|e| NostrVaultError::Prompt(format!("passphrase prompt: {e}")))?;
        Ok(Zeroizing::new(pw))
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(|e| NostrVaultError::Prompt(format!("confirm prompt: {e}")))
    }
}

/// One canned answer for a `ScriptedPrompter`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Reply to `input`; an empty string selects the default.
    Text(String),
    /// Reply to `secret`.
    Secret(String),
    /// Reply to `confirm`; `None` accepts the default.
    Confirm(Option<bool>),
}

/// `Prompter` that replays a fixed script and records every prompt.
///
/// Asking a question whose answer is missing or of the wrong type is
/// a `Prompt` error, so tests fail loudly on unexpected prompts.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            asked: Vec::new(),
        }
    }

    /// Prompts shown so far, in order.
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    /// Answers that were never consumed.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next(&mut self, prompt: &str) -> Result<Answer> {
        self.asked.push(prompt.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| NostrVaultError::Prompt(format!("no scripted answer for '{prompt}'")))
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&mut self, prompt: &str, default: Option<&str>) -> Result<String> {
        match self.next(prompt)? {
            Answer::Text(t) if t.is_empty() => Ok(default.unwrap_or_default().to_string()),
            Answer::Text(t) => Ok(t),
            other => Err(NostrVaultError::Prompt(format!(
                "expected text answer for '{prompt}', got {other:?}"
            ))),
        }
    }

    fn secret(&mut self, prompt: &str) -> Result<Zeroizing<String>> {
        match self.next(prompt)? {
            Answer::Secret(s) => Ok(Zeroizing::new(s)),
            other => Err(NostrVaultError::Prompt(format!(
                "expected secret answer for '{prompt}', got {other:?}"
            ))),
        }
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        match self.next(prompt)? {
            Answer::Confirm(choice) => Ok(choice.unwrap_or(default)),
            other => Err(NostrVaultError::Prompt(format!(
                "expected yes/no answer for '{prompt}', got {other:?}"
            ))),
        }
    }
}
