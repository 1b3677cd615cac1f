use anyhow::{Context, Result};
use dialoguer::{Input, theme::ColorfulTheme};

/// Source of operator answers for the interactive commands
pub trait Prompter {
    /// Ask a question and return the trimmed answer, which may be empty
    fn input(&mut self, prompt: &str) -> Result<String>;

    /// Report a problem with the previous answer
    fn notice(&mut self, message: &str);
}

/// Terminal prompter backed by dialoguer
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn input(&mut self, prompt: &str) -> Result<String> {
        let answer = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .with_context(|| format!("Failed to read answer for '{prompt}'"))?;
        Ok(answer.trim().to_string())
    }

    fn notice(&mut self, message: &str) {
        println!("{message}");
    }
}

/// Ask until the answer is non-empty
pub fn required<P: Prompter + ?Sized>(
    prompter: &mut P,
    prompt: &str,
    retry_message: Option<&str>,
) -> Result<String> {
    loop {
        let answer = prompter.input(prompt)?;
        if !answer.is_empty() {
            return Ok(answer);
        }
        if let Some(message) = retry_message {
            prompter.notice(message);
        }
    }
}

/// `y`/`Y` confirms, anything else declines
pub fn confirm<P: Prompter + ?Sized>(prompter: &mut P, prompt: &str) -> Result<bool> {
    let answer = prompter.input(prompt)?;
    Ok(answer.eq_ignore_ascii_case("y"))
}
