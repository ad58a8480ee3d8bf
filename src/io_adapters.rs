use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::BufRead;

/// One step of console input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// A line of text, without its line terminator.
    Line(String),
    /// The input stream was closed.
    Eof,
    /// The user interrupted (Ctrl-C).
    Interrupted,
}

/// Source of console lines for a session.
pub trait LineSource {
    /// Block until the next line is available.
    fn next_line(&mut self) -> Result<Input>;
}

/// Interactive terminal input with a prompt and line editing.
pub struct Prompt {
    editor: DefaultEditor,
    prompt: String,
}

impl Prompt {
    pub fn new(prompt: impl Into<String>) -> Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
            prompt: prompt.into(),
        })
    }
}

impl LineSource for Prompt {
    fn next_line(&mut self) -> Result<Input> {
        match self.editor.readline(&self.prompt) {
            Ok(line) => {
                if !line.is_empty() {
                    self.editor.add_history_entry(line.as_str())?;
                }
                Ok(Input::Line(line))
            }
            Err(ReadlineError::Interrupted) => Ok(Input::Interrupted),
            Err(ReadlineError::Eof) => Ok(Input::Eof),
            Err(err) => Err(err.into()),
        }
    }
}

/// Line input from any buffered reader, e.g. piped stdin.
///
/// Only the line terminator is removed; invalid UTF-8 is an error.
pub struct ReaderLines<R> {
    reader: R,
}

impl<R: BufRead> ReaderLines<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineSource for ReaderLines<R> {
    fn next_line(&mut self) -> Result<Input> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(Input::Eof);
        }
        strip_line_ending(&mut line);
        Ok(Input::Line(line))
    }
}

/// Remove one trailing `\n` or `\r\n`.
pub(crate) fn strip_line_ending(line: &mut String) {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
}
