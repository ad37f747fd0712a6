// Prompting: where answers come from, where messages go, and the bounded
// retry loop that ties a field parser to both.

use crate::validate::FieldError;
use anyhow::{Context, Result};
use crossterm::style::Stylize;
use dialoguer::Input;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

pub const TOO_MANY_ATTEMPTS: &str = "Too many invalid attempts - operation cancelled.";

/// A source of operator answers, one line per prompt.
pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> Result<String>;
}

/// Interactive terminal prompts via `dialoguer`. Empty answers are allowed
/// because a blank line means "cancel".
#[derive(Default)]
pub struct TerminalInput;

impl LineSource for TerminalInput {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        let line = Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .context("Failed to read from terminal")?;
        Ok(line)
    }
}

/// Plain line reader for piped input, so the binary can be scripted.
pub struct StdinInput<R> {
    reader: R,
}

impl StdinInput<io::StdinLock<'static>> {
    pub fn new() -> Self {
        StdinInput {
            reader: io::stdin().lock(),
        }
    }
}

impl Default for StdinInput<io::StdinLock<'static>> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: BufRead> StdinInput<R> {
    pub fn from_reader(reader: R) -> Self {
        StdinInput { reader }
    }
}

impl<R: BufRead> LineSource for StdinInput<R> {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        let mut stdout = io::stdout();
        write!(stdout, "{prompt}: ")?;
        stdout.flush()?;

        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .context("Failed to read from stdin")?;
        if read == 0 {
            anyhow::bail!("Input closed");
        }
        let trimmed = line.trim_end_matches(&['\r', '\n'][..]).len();
        line.truncate(trimmed);
        Ok(line)
    }
}

/// Canned answers, handy for driving a session without a terminal.
/// Every prompt shown is recorded in order.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
    pub prompts: Vec<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedInput {
            lines: lines.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl LineSource for ScriptedInput {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        self.prompts.push(prompt.to_string());
        self.lines
            .pop_front()
            .with_context(|| format!("No scripted answer left for prompt {prompt:?}"))
    }
}

/// Operator-facing output. Colour is optional so captured output stays plain.
pub struct Screen<W> {
    out: W,
    color: bool,
}

impl<W: Write> Screen<W> {
    pub fn new(out: W, color: bool) -> Self {
        Screen { out, color }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn say(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.out, "{line}")
    }

    pub fn success(&mut self, line: &str) -> io::Result<()> {
        if self.color {
            writeln!(self.out, "{}", line.green())
        } else {
            self.say(line)
        }
    }

    pub fn warn(&mut self, line: &str) -> io::Result<()> {
        if self.color {
            writeln!(self.out, "{}", line.yellow())
        } else {
            self.say(line)
        }
    }

    pub fn error(&mut self, line: &str) -> io::Result<()> {
        if self.color {
            writeln!(self.out, "{}", line.red().bold())
        } else {
            self.say(line)
        }
    }
}

/// What a field prompt produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer<T> {
    Value(T),
    /// The operator entered a blank line.
    Blank,
    /// Every allowed attempt was invalid.
    GaveUp,
}

impl<T> Answer<T> {
    /// The value, treating both blank and exhausted answers as cancellation.
    pub fn value(self) -> Option<T> {
        match self {
            Answer::Value(v) => Some(v),
            Answer::Blank | Answer::GaveUp => None,
        }
    }
}

/// Prompts until `parse` accepts the line, the line is blank, or
/// `max_attempts` invalid answers have been given.
pub fn ask<T, L, W, F>(
    input: &mut L,
    screen: &mut Screen<W>,
    prompt: &str,
    max_attempts: u32,
    parse: F,
) -> Result<Answer<T>>
where
    L: LineSource + ?Sized,
    W: Write,
    F: Fn(&str) -> Result<Option<T>, FieldError>,
{
    for attempt in 1..=max_attempts {
        let line = input.read_line(prompt)?;
        match parse(&line) {
            Ok(Some(value)) => return Ok(Answer::Value(value)),
            Ok(None) => return Ok(Answer::Blank),
            Err(e) => {
                tracing::debug!(attempt, max_attempts, error = %e, "invalid answer");
                screen.warn(&e.to_string())?;
            }
        }
    }
    screen.warn(TOO_MANY_ATTEMPTS)?;
    Ok(Answer::GaveUp)
}

/// Single-shot prompt: an invalid answer is reported and yields no value.
pub fn ask_once<T, L, W, F>(
    input: &mut L,
    screen: &mut Screen<W>,
    prompt: &str,
    parse: F,
) -> Result<Option<T>>
where
    L: LineSource + ?Sized,
    W: Write,
    F: Fn(&str) -> Result<Option<T>, FieldError>,
{
    let line = input.read_line(prompt)?;
    match parse(&line) {
        Ok(value) => Ok(value),
        Err(e) => {
            screen.warn(&e.to_string())?;
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::{parse_convertible, parse_id, parse_production_year};
    use std::io::Cursor;

    fn plain_screen() -> Screen<Vec<u8>> {
        Screen::new(Vec::new(), false)
    }

    fn text(screen: Screen<Vec<u8>>) -> String {
        String::from_utf8(screen.into_inner()).unwrap()
    }

    #[test]
    fn ask_retries_until_valid() {
        let mut input = ScriptedInput::new(["1850", "abc", "1965"]);
        let mut screen = plain_screen();
        let answer = ask(&mut input, &mut screen, "Year", 3, parse_production_year).unwrap();
        assert_eq!(answer, Answer::Value(1965));
        assert_eq!(input.prompts.len(), 3);
        let out = text(screen);
        assert!(out.contains("greater than or equal to 1900"));
        assert!(out.contains("must be an integer"));
    }

    #[test]
    fn ask_gives_up_after_max_attempts() {
        let mut input = ScriptedInput::new(["maybe", "perhaps", "y"]);
        let mut screen = plain_screen();
        let answer = ask(&mut input, &mut screen, "Convertible", 2, parse_convertible).unwrap();
        assert_eq!(answer, Answer::GaveUp);
        assert_eq!(input.remaining(), 1);
        assert!(text(screen).ends_with(&format!("{TOO_MANY_ATTEMPTS}\n")));
    }

    #[test]
    fn blank_line_cancels_immediately() {
        let mut input = ScriptedInput::new(["  ", "n"]);
        let mut screen = plain_screen();
        let answer = ask(&mut input, &mut screen, "Convertible", 3, parse_convertible).unwrap();
        assert_eq!(answer, Answer::Blank);
        assert_eq!(answer.value(), None);
        assert!(text(screen).is_empty());
    }

    #[test]
    fn ask_once_does_not_retry() {
        let mut input = ScriptedInput::new(["x1", "7"]);
        let mut screen = plain_screen();
        let id = ask_once(&mut input, &mut screen, "Car ID", parse_id).unwrap();
        assert_eq!(id, None);
        assert_eq!(input.remaining(), 1);
        assert_eq!(text(screen), "Car ID must only contain digits!\n");
    }

    #[test]
    fn exhausted_script_is_an_error() {
        let mut input = ScriptedInput::new(Vec::<String>::new());
        assert!(input.read_line("anything").is_err());
    }

    #[test]
    fn stdin_input_strips_line_endings_and_reports_eof() {
        let mut input = StdinInput::from_reader(Cursor::new("Ford\r\n\n"));
        assert_eq!(input.read_line("Brand").unwrap(), "Ford");
        assert_eq!(input.read_line("Model").unwrap(), "");
        assert!(input.read_line("Year").is_err());
    }
}
