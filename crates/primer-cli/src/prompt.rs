//! Prompters: how `primer run` asks its questions.
//!
//! [`LinePrompter`] reads one answer per line and works with piped input.
//! With the `interactive` feature, [`TermPrompter`] uses `dialoguer` when
//! stdin is a terminal.

use std::cell::RefCell;
use std::io::{self, BufRead, Write};

use primer_core::{
    application::{ApplicationError, ports::Prompter},
    domain::Rejection,
    error::PrimerResult,
};

/// Pick the prompter for this process.
pub fn for_session() -> Box<dyn Prompter> {
    #[cfg(feature = "interactive")]
    if std::io::IsTerminal::is_terminal(&io::stdin()) {
        return Box::new(TermPrompter::default());
    }
    Box::new(LinePrompter::stdio())
}

fn prompt_failed(e: impl std::fmt::Display) -> ApplicationError {
    ApplicationError::PromptFailed {
        reason: e.to_string(),
    }
}

/// Prompts on `output`, reads answers from `input` one line at a time.
pub struct LinePrompter<R, W> {
    input: RefCell<R>,
    output: RefCell<W>,
}

impl LinePrompter<io::StdinLock<'static>, io::Stderr> {
    /// Answers from stdin, prompts on stderr; stdout is left to results.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input: RefCell::new(input),
            output: RefCell::new(output),
        }
    }

    #[cfg(test)]
    fn into_output(self) -> W {
        self.output.into_inner()
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn ask(&self, prompt: &str) -> PrimerResult<String> {
        {
            let mut out = self.output.borrow_mut();
            write!(out, "{prompt}: ").map_err(prompt_failed)?;
            out.flush().map_err(prompt_failed)?;
        }

        let mut line = String::new();
        let read = self
            .input
            .borrow_mut()
            .read_line(&mut line)
            .map_err(prompt_failed)?;
        if read == 0 {
            return Err(prompt_failed("input ended before all questions were answered").into());
        }
        Ok(line.trim_end_matches(['\n', '\r']).to_owned())
    }

    fn reject(&self, response: &str, reason: &Rejection) -> PrimerResult<()> {
        writeln!(self.output.borrow_mut(), "\"{response}\" {reason}").map_err(prompt_failed)?;
        Ok(())
    }
}

/// Terminal prompter backed by `dialoguer`.
#[cfg(feature = "interactive")]
#[derive(Default)]
pub struct TermPrompter {
    theme: dialoguer::theme::ColorfulTheme,
}

#[cfg(feature = "interactive")]
impl Prompter for TermPrompter {
    fn ask(&self, prompt: &str) -> PrimerResult<String> {
        let answer = dialoguer::Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_failed)?;
        Ok(answer)
    }

    fn reject(&self, response: &str, reason: &Rejection) -> PrimerResult<()> {
        let style = console::Style::new().for_stderr().red();
        console::Term::stderr()
            .write_line(&format!(
                "{}",
                style.apply_to(format!("\"{response}\" {reason}"))
            ))
            .map_err(prompt_failed)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_one_answer_per_line() {
        let prompter = LinePrompter::new(Cursor::new("Jane Doe\r\nmyproj\n"), Vec::new());
        assert_eq!(prompter.ask("Enter your name").unwrap(), "Jane Doe");
        assert_eq!(prompter.ask("Module name").unwrap(), "myproj");

        let shown = String::from_utf8(prompter.into_output()).unwrap();
        assert_eq!(shown, "Enter your name: Module name: ");
    }

    #[test]
    fn empty_line_is_an_empty_answer() {
        let prompter = LinePrompter::new(Cursor::new("\n"), Vec::new());
        assert_eq!(prompter.ask("x").unwrap(), "");
    }

    #[test]
    fn end_of_input_fails() {
        let prompter = LinePrompter::new(Cursor::new(""), Vec::new());
        assert!(prompter.ask("x").is_err());
    }

    #[test]
    fn rejection_quotes_the_response() {
        let prompter = LinePrompter::new(Cursor::new(""), Vec::new());
        prompter.reject("My_Proj", &Rejection::NotLowercase).unwrap();
        let shown = String::from_utf8(prompter.into_output()).unwrap();
        assert_eq!(shown, "\"My_Proj\" should be all lower case.\n");
    }
}
