use crate::env::Environment;
use std::io;
use std::path::{Path, PathBuf};

/// Failures reported by a conversational engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The knowledge resource could not be read.
    #[error("can't read knowledge resource {}: {source}", path.display())]
    Resource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The engine program could not be started.
    #[error("can't start engine {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// `respond` was called before anything was learned.
    #[error("engine has not learned a knowledge resource yet")]
    NotLoaded,

    /// `learn` was called on an engine that only learns once.
    #[error("engine has already learned its knowledge resource")]
    AlreadyLoaded,

    /// The request would not fit on a single line.
    #[error("request contains a line break")]
    MultilineRequest,

    /// The engine stopped producing replies.
    #[error("engine closed its output")]
    Closed,

    /// Engine arguments were rejected; carries the usage text.
    #[error("{0}")]
    Usage(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Capabilities the console needs from a conversational engine.
///
/// The engine owns all matching and reply logic. The console only asks it to
/// learn a knowledge resource and to answer a line of text.
pub trait Engine {
    /// Load a knowledge resource, mutating the engine's internal state.
    fn learn(&mut self, path: &Path) -> Result<(), EngineError>;

    /// Produce the reply to `input`.
    fn respond(&mut self, input: &str) -> Result<String, EngineError>;
}

/// Factory that tries to create an engine from a name and its arguments.
///
/// Returns `None` when the factory doesn't recognize the `name`, and
/// `Some(Err(_))` when it does but the arguments are unusable.
pub trait EngineFactory {
    fn try_create(
        &self,
        env: &Environment,
        name: &str,
        args: &[&str],
    ) -> Option<Result<Box<dyn Engine>, EngineError>>;
}
