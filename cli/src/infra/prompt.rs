//! Infrastructure implementation of the `Prompter` port over `dialoguer`.

use std::io::ErrorKind;

use anyhow::Result;
use console::Term;
use dialoguer::{Input, Password};

use crate::application::ports::Prompter;
use crate::domain::error::PromptError;

/// Terminal prompter. Ctrl-C surfaces as [`PromptError::Interrupted`].
pub struct DialoguerPrompter;

fn map_err(err: dialoguer::Error) -> anyhow::Error {
    match err {
        dialoguer::Error::IO(e) if e.kind() == ErrorKind::Interrupted => PromptError::Interrupted.into(),
        dialoguer::Error::IO(e) => anyhow::Error::new(e).context("reading terminal input"),
    }
}

impl Prompter for DialoguerPrompter {
    fn input(&self, prompt: &str, default: Option<&str>) -> Result<String> {
        let mut input = Input::<String>::new().with_prompt(prompt).allow_empty(true);
        if let Some(default) = default.filter(|d| !d.is_empty()) {
            input = input.default(default.to_string());
        }
        let answer = input.interact_text().map_err(map_err)?;
        let answer = answer.trim();
        Ok(match default {
            Some(default) if answer.is_empty() => default.to_string(),
            _ => answer.to_string(),
        })
    }

    fn password(&self, prompt: &str) -> Result<String> {
        Password::new().with_prompt(prompt).interact().map_err(map_err)
    }

    fn clear_screen(&self) {
        let term = Term::stdout();
        if term.is_term() {
            let _ = term.clear_screen();
        }
    }
}
