// Input seam. Handlers ask for values through `Prompt`; the terminal
// implementation uses `dialoguer`, tests feed a scripted queue.

use crate::model::parse_price;
use anyhow::{bail, Result};
use dialoguer::Input;
use rust_decimal::Decimal;
use std::collections::VecDeque;

pub trait Prompt {
    /// Free text. Blank input is returned as an empty string.
    fn text(&mut self, label: &str) -> Result<String>;

    /// A non-negative decimal price.
    fn price(&mut self, label: &str) -> Result<Decimal>;
}

/// Interactive prompts on the controlling terminal.
#[derive(Default)]
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn text(&mut self, label: &str) -> Result<String> {
        // `Input::interact_text()` prompts the user for input and returns it.
        let value: String = Input::new()
            .with_prompt(label)
            .allow_empty(true)
            .interact_text()?;
        Ok(value)
    }

    fn price(&mut self, label: &str) -> Result<Decimal> {
        // Re-prompts until the input parses.
        let raw: String = Input::new()
            .with_prompt(label)
            .validate_with(|input: &String| parse_price(input).map(|_| ()).map_err(|e| e.to_string()))
            .interact_text()?;
        Ok(parse_price(&raw)?)
    }
}

/// Answers prompts from a fixed list, in order.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<String>,
}

impl ScriptedPrompt {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedPrompt {
            answers: answers.into_iter().map(Into::into).collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompt for ScriptedPrompt {
    fn text(&mut self, label: &str) -> Result<String> {
        match self.answers.pop_front() {
            Some(answer) => Ok(answer),
            None => bail!("no scripted answer left for '{}'", label),
        }
    }

    fn price(&mut self, label: &str) -> Result<Decimal> {
        // Invalid answers are skipped, like the terminal re-prompting.
        loop {
            let answer = self.text(label)?;
            if let Ok(price) = parse_price(&answer) {
                return Ok(price);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_answers_in_order() {
        let mut prompt = ScriptedPrompt::new(["list", ""]);
        assert_eq!(prompt.text("op").unwrap(), "list");
        assert_eq!(prompt.text("name").unwrap(), "");
        assert!(prompt.text("more").is_err());
    }

    #[test]
    fn scripted_price_skips_invalid() {
        let mut prompt = ScriptedPrompt::new(["abc", "-2", "3.10"]);
        assert_eq!(prompt.price("price").unwrap().to_string(), "3.10");
        assert_eq!(prompt.remaining(), 0);
    }
}
