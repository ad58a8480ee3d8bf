use crate::engine::Engine;
use crate::io_adapters::{Input, LineSource};
use anyhow::{Context, Result};
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info};

/// Knowledge resource learned when no other is given.
pub const DEFAULT_STARTUP: &str = "std-startup.xml";

/// Command sent to the engine right after the startup resource is learned.
pub const DEFAULT_INIT_COMMAND: &str = "load aiml b";

/// Prompt shown before each console line.
pub const DEFAULT_PROMPT: &str = "Enter your message >> ";

/// What a session does before handing control to the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Knowledge resource learned exactly once, before anything else.
    pub startup: PathBuf,
    /// Opaque command sent before the first console line; its reply is printed.
    pub init_command: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            startup: PathBuf::from(DEFAULT_STARTUP),
            init_command: DEFAULT_INIT_COMMAND.to_string(),
        }
    }
}

/// A conversation between the console and one engine.
///
/// Every console line is passed to the engine verbatim and every reply is
/// written verbatim, followed by a newline.
///
/// Example
/// ```
/// use aiml_console::io_adapters::ReaderLines;
/// use aiml_console::{Registry, Session, SessionConfig};
///
/// let engine = Registry::default().create("echo", &["--no-learn"]).unwrap();
/// let session = Session::new(engine, SessionConfig::default());
/// let mut input = ReaderLines::new(&b"hello\n"[..]);
/// let mut out = Vec::new();
/// session.run(&mut input, &mut out).unwrap();
/// assert_eq!(out, b"load aiml b\nhello\n");
/// ```
pub struct Session {
    engine: Box<dyn Engine>,
    config: SessionConfig,
}

impl Session {
    pub fn new(engine: Box<dyn Engine>, config: SessionConfig) -> Self {
        Self { engine, config }
    }

    /// Learn the startup resource, send the init command, then answer console
    /// lines until end of input or an interrupt.
    ///
    /// Any engine or I/O failure ends the session with an error.
    pub fn run(mut self, input: &mut dyn LineSource, output: &mut dyn Write) -> Result<()> {
        let startup = &self.config.startup;
        self.engine
            .learn(startup)
            .with_context(|| format!("can't learn {}", startup.display()))?;
        info!(resource = %startup.display(), "knowledge resource learned");

        let init_command = self.config.init_command.clone();
        self.exchange(&init_command, output)
            .with_context(|| format!("init command {:?} failed", init_command))?;

        loop {
            match input.next_line()? {
                Input::Line(line) => self.exchange(&line, output)?,
                Input::Eof => {
                    info!("end of input");
                    break;
                }
                Input::Interrupted => {
                    info!("interrupted");
                    break;
                }
            }
        }
        Ok(())
    }

    fn exchange(&mut self, request: &str, output: &mut dyn Write) -> Result<()> {
        let reply = self.engine.respond(request)?;
        debug!(request, reply = reply.as_str(), "exchange");
        writeln!(output, "{}", reply)?;
        output.flush()?;
        Ok(())
    }
}
