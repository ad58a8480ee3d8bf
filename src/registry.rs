use crate::engine::{Engine, EngineFactory};
use crate::env::Environment;
use anyhow::Context;
use tracing::debug;

/// Factory allows creating engines of type `T`.
///
/// Only supports engines defined in this crate: builtins and `ExternalEngine`.
pub(crate) struct Factory<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

/// Ordered set of engine factories.
///
/// Factories are queried in order and the first one that recognizes a name
/// wins, so builtins shadow programs of the same name on PATH.
///
/// Example
/// ```
/// use aiml_console::{Engine, Registry};
/// let registry = Registry::default();
/// let mut engine = registry.create("echo", &["--prefix", "> "]).unwrap();
/// assert_eq!(engine.respond("hello").unwrap(), "> hello");
/// ```
pub struct Registry {
    env: Environment,
    factories: Vec<Box<dyn EngineFactory>>,
}

impl Registry {
    /// Create a registry with a custom set of factories.
    pub fn new(factories: Vec<Box<dyn EngineFactory>>) -> Self {
        Self {
            env: Environment::new(),
            factories,
        }
    }

    /// Environment handed to engines on creation.
    ///
    /// Library users can adjust variables or the working directory here
    /// before calling [`Registry::create`]; external engines inherit both.
    ///
    /// ```
    /// use aiml_console::Registry;
    /// let mut registry = Registry::default();
    /// registry.env_mut().set_var("AIML_SET", "standard");
    /// assert_eq!(registry.env_mut().get_var("AIML_SET").as_deref(), Some("standard"));
    /// ```
    pub fn env_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    /// Create the engine called `name`, passing it `args`.
    pub fn create(&self, name: &str, args: &[&str]) -> anyhow::Result<Box<dyn Engine>> {
        for factory in &self.factories {
            if let Some(engine) = factory.try_create(&self.env, name, args) {
                debug!(engine = name, ?args, "engine created");
                return engine.with_context(|| format!("engine {name}"));
            }
        }
        Err(anyhow::anyhow!("engine not found: {}", name))
    }
}

impl Default for Registry {
    /// Create a registry with the default engines:
    /// - builtin: `echo`
    /// - external program launcher
    fn default() -> Self {
        use crate::builtin::Echo;
        use crate::external::ExternalEngine;
        Self::new(vec![
            Box::new(Factory::<Echo>::default()),
            Box::new(Factory::<ExternalEngine>::default()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::Echo;

    fn builtins_only() -> Registry {
        Registry::new(vec![Box::new(Factory::<Echo>::default())])
    }

    #[test]
    fn test_create_builtin_by_name() {
        let mut engine = builtins_only().create("echo", &[]).unwrap();
        assert_eq!(engine.respond("hello").unwrap(), "hello");
    }

    #[test]
    fn test_unknown_engine_is_an_error() {
        let err = builtins_only().create("eliza", &[]).err().unwrap();
        assert_eq!(err.to_string(), "engine not found: eliza");
    }

    #[test]
    fn test_bad_arguments_surface_usage() {
        let err = builtins_only().create("echo", &["--bogus"]).err().unwrap();
        let chain = format!("{:#}", err);
        assert!(chain.starts_with("engine echo"), "got {chain}");
        assert!(chain.contains("--bogus"), "got {chain}");
    }

    #[test]
    #[cfg(unix)]
    fn test_default_falls_back_to_programs_on_path() {
        let mut registry = Registry::default();
        registry.env_mut().set_var("PATH", "/bin:/usr/bin");
        assert!(registry.create("sh", &["-c", "true"]).is_ok());
        assert!(registry.create("no-such-engine-7781", &[]).is_err());
    }

    #[test]
    #[cfg(unix)]
    fn test_env_vars_reach_external_engines() {
        let mut registry = Registry::default();
        registry.env_mut().set_var("PATH", "/bin:/usr/bin");
        registry.env_mut().set_var("AIML_SET", "standard");

        let script = r#"while IFS= read -r line; do printf '%s\n' "$AIML_SET"; done"#;
        let mut engine = registry.create("sh", &["-c", script, "bridge"]).unwrap();
        engine.learn(std::path::Path::new("std-startup.xml")).unwrap();

        assert_eq!(engine.respond("which set?").unwrap(), "standard");
    }
}
