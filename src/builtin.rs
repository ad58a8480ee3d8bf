use crate::engine::{Engine, EngineError, EngineFactory};
use crate::env::Environment;
use crate::registry::Factory;
use argh::{EarlyExit, FromArgs};
use std::fs;
use std::path::Path;
use tracing::info;

/// Engines known to the console at compile time.
///
/// Builtins are parsed using the [`argh`] crate (`FromArgs`) and run in-process.
pub(crate) trait BuiltinEngine: Engine + Sized {
    /// Command-line arguments accepted after the engine name.
    type Args: FromArgs;

    /// Name the engine is selected by, e.g. "echo".
    fn name() -> &'static str;

    fn with_args(args: Self::Args) -> Self;
}

impl<T: BuiltinEngine + 'static> EngineFactory for Factory<T> {
    fn try_create(
        &self,
        _env: &Environment,
        name: &str,
        args: &[&str],
    ) -> Option<Result<Box<dyn Engine>, EngineError>> {
        if name != T::name() {
            return None;
        }
        Some(match T::Args::from_args(&[name], args) {
            Ok(args) => Ok(Box::new(T::with_args(args))),
            Err(EarlyExit { output, .. }) => Err(EngineError::Usage(output.trim_end().to_string())),
        })
    }
}

#[derive(FromArgs)]
/// reply to every message with the message itself.
/// useful for checking a knowledge resource path and the console wiring.
pub struct EchoArgs {
    #[argh(option, default = "String::new()")]
    /// text placed in front of every reply.
    pub prefix: String,

    #[argh(switch)]
    /// skip reading the knowledge resource.
    pub no_learn: bool,
}

/// Builtin engine that answers with its input.
pub struct Echo {
    args: EchoArgs,
    /// Bytes of knowledge read so far.
    learned: u64,
}

impl BuiltinEngine for Echo {
    type Args = EchoArgs;

    fn name() -> &'static str {
        "echo"
    }

    fn with_args(args: EchoArgs) -> Self {
        Self { args, learned: 0 }
    }
}

impl Engine for Echo {
    fn learn(&mut self, path: &Path) -> Result<(), EngineError> {
        if self.args.no_learn {
            return Ok(());
        }
        let content = fs::read(path).map_err(|source| EngineError::Resource {
            path: path.to_path_buf(),
            source,
        })?;
        self.learned += content.len() as u64;
        info!(
            path = %path.display(),
            bytes = content.len(),
            total = self.learned,
            "echo: resource read"
        );
        Ok(())
    }

    fn respond(&mut self, input: &str) -> Result<String, EngineError> {
        Ok(format!("{}{}", self.args.prefix, input))
    }
}
