use std::collections::HashMap;
use std::env as stdenv;
use std::path::PathBuf;

/// Process environment handed to engines when they are created.
///
/// A registry captures one of these at construction. Builtin engines ignore it;
/// external engines are resolved against its `PATH` and spawned with its
/// variables in its working directory.
///
/// Fields are public so embedders can build one by hand, e.g. to pin PATH in
/// tests or to run engines from a knowledge-base directory.
#[derive(Debug, Clone)]
pub struct Environment {
    /// Variables passed to spawned engines, on top of the inherited ones.
    pub vars: HashMap<String, String>,
    /// Working directory of spawned engines. Relative startup paths resolve here.
    pub current_dir: PathBuf,
}

impl Environment {
    /// Snapshot the running process.
    ///
    /// An unreadable working directory falls back to `.`.
    pub fn new() -> Self {
        Self {
            vars: stdenv::vars().collect(),
            current_dir: stdenv::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

    pub fn get_var(&self, key: &str) -> Option<String> {
        match self.vars.get(key) {
            Some(val) => Some(val.clone()),
            None => stdenv::var(key).ok(),
        }
    }

    /// Override `key` for engines created afterwards, e.g. an engine's
    /// home directory. Already running engines keep what they started with.
    pub fn set_var(&mut self, key: impl Into<String>, val: impl Into<String>) {
        self.vars.insert(key.into(), val.into());
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use crate::env::Environment;
    use std::collections::HashMap;
    use std::path::PathBuf;

    #[test]
    fn test_env_set_and_get_var() {
        let mut env = Environment {
            vars: HashMap::new(),
            current_dir: PathBuf::from("."),
        };

        assert_eq!(env.get_var("AIML_CONSOLE_UNSET_VAR_9317"), None);

        env.set_var("ENGINE_HOME", "/opt/engine");

        assert_eq!(env.get_var("ENGINE_HOME"), Some("/opt/engine".to_string()));
    }

    #[test]
    fn test_env_captures_process_state() {
        let env = Environment::new();
        assert!(env.get_var("PATH").is_some());
        assert_eq!(env.current_dir, std::env::current_dir().unwrap());
    }
}
