//! # Prompter
//!
//! Line-oriented questions over any `BufRead`/`Write` pair. The binary
//! wires it to stdin/stdout; tests wire it to a `Cursor` and a `Vec<u8>`.
//!
//! A value that fails to parse prints the reason and asks again, and so
//! does a line that is not valid UTF-8. End of input surfaces as
//! [`PromptError::Closed`] so the menu loop can exit.

use std::fmt::Display;
use std::io::{self, BufRead, Write};

use grocer_core::validation::{optional_text, ValidationResult};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("input closed")]
    Closed,

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type PromptResult<T> = Result<T, PromptError>;

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompter { input, output }
    }

    /// Prints one line.
    pub fn say(&mut self, text: impl Display) -> PromptResult<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Asks a question and returns the trimmed answer.
    pub fn ask(&mut self, question: &str) -> PromptResult<String> {
        loop {
            write!(self.output, "{} ", question.trim_end())?;
            self.output.flush()?;

            let mut raw = Vec::new();
            if self.input.read_until(b'\n', &mut raw)? == 0 {
                writeln!(self.output)?;
                return Err(PromptError::Closed);
            }
            match String::from_utf8(raw) {
                Ok(line) => return Ok(line.trim().to_string()),
                Err(_) => self.say("  Input is not valid UTF-8 text")?,
            }
        }
    }

    /// Asks until `parse` accepts the answer.
    pub fn ask_parsed<T>(
        &mut self,
        question: &str,
        parse: impl Fn(&str) -> ValidationResult<T>,
    ) -> PromptResult<T> {
        loop {
            let answer = self.ask(question)?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(err) => self.say(format_args!("  {}", err))?,
            }
        }
    }

    /// Asks for a value the operator may leave blank.
    pub fn ask_optional(&mut self, question: &str) -> PromptResult<Option<String>> {
        Ok(optional_text(&self.ask(question)?))
    }

    /// Asks a Y/N question.
    pub fn confirm(&mut self, question: &str) -> PromptResult<bool> {
        loop {
            let answer = self.ask(&format!("{} (Y/N)", question))?;
            match answer.to_ascii_uppercase().as_str() {
                "Y" | "YES" => return Ok(true),
                "N" | "NO" => return Ok(false),
                _ => self.say("  Please answer Y or N")?,
            }
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grocer_core::validation::parse_id;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn printed(p: Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(p.into_output()).unwrap()
    }

    #[test]
    fn test_ask_trims() {
        let mut p = prompter("  Ana  \n");
        assert_eq!(p.ask("First name:").unwrap(), "Ana");
        assert_eq!(printed(p), "First name: ");
    }

    #[test]
    fn test_ask_parsed_reprompts() {
        let mut p = prompter("abc\n-3\n12\n");
        let id = p.ask_parsed("Customer ID:", |raw| parse_id("customer ID", raw)).unwrap();
        assert_eq!(id, 12);

        let out = printed(p);
        assert_eq!(out.matches("Customer ID:").count(), 3);
        assert!(out.contains("must be a whole number"));
        assert!(out.contains("must be positive"));
    }

    #[test]
    fn test_eof_is_closed() {
        let mut p = prompter("");
        assert!(matches!(p.ask("Choice:"), Err(PromptError::Closed)));

        let mut p = prompter("nope\n");
        let result = p.ask_parsed("ID:", |raw| parse_id("ID", raw));
        assert!(matches!(result, Err(PromptError::Closed)));
    }

    #[test]
    fn test_invalid_utf8_is_asked_again() {
        let mut p = Prompter::new(Cursor::new(b"Jos\xe9\nJos\xc3\xa9\n".to_vec()), Vec::new());
        assert_eq!(p.ask("First name:").unwrap(), "José");

        let out = printed(p);
        assert_eq!(out.matches("First name:").count(), 2);
        assert!(out.contains("not valid UTF-8"));
    }

    #[test]
    fn test_ask_optional_blank_is_none() {
        let mut p = prompter("\n  \n555-0101\n");
        assert_eq!(p.ask_optional("Phone:").unwrap(), None);
        assert_eq!(p.ask_optional("Phone:").unwrap(), None);
        assert_eq!(p.ask_optional("Phone:").unwrap().as_deref(), Some("555-0101"));
    }

    #[test]
    fn test_confirm() {
        let mut p = prompter("maybe\ny\nN\n");
        assert!(p.confirm("Continue?").unwrap());
        assert!(!p.confirm("Continue?").unwrap());
        assert!(printed(p).contains("Please answer Y or N"));
    }
}
