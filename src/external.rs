use crate::engine::{Engine, EngineError, EngineFactory};
use crate::env::Environment;
use crate::io_adapters::strip_line_ending;
use crate::registry::Factory;
use std::borrow::Cow;
use std::ffi::{OsStr, OsString};
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use tracing::{debug, info, warn};

/// Engine that runs in a child process.
///
/// The child is started by [`Engine::learn`] as `program args... <resource>`,
/// then reads one request per line on stdin and writes exactly one reply line
/// on stdout for each. Stderr is inherited so engine diagnostics reach the
/// terminal untouched.
pub struct ExternalEngine {
    program: OsString,
    args: Vec<OsString>,
    env: Environment,
    bridge: Option<Bridge>,
}

struct Bridge {
    child: Child,
    requests: ChildStdin,
    replies: BufReader<ChildStdout>,
}

impl ExternalEngine {
    pub fn new(program: OsString, args: Vec<OsString>, env: Environment) -> Self {
        Self {
            program,
            args,
            env,
            bridge: None,
        }
    }

    fn program_name(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }
}

impl EngineFactory for Factory<ExternalEngine> {
    fn try_create(
        &self,
        env: &Environment,
        name: &str,
        args: &[&str],
    ) -> Option<Result<Box<dyn Engine>, EngineError>> {
        let search_paths = env.get_var("PATH")?;
        let program = find_program(OsStr::new(&search_paths), Path::new(name))?;
        Some(Ok(Box::new(ExternalEngine::new(
            program.as_os_str().to_owned(),
            args.iter().map(OsString::from).collect(),
            env.clone(),
        ))))
    }
}

impl Engine for ExternalEngine {
    fn learn(&mut self, path: &Path) -> Result<(), EngineError> {
        if self.bridge.is_some() {
            return Err(EngineError::AlreadyLoaded);
        }
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .envs(self.env.vars.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .current_dir(&self.env.current_dir)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| EngineError::Spawn {
                program: self.program_name(),
                source,
            })?;
        info!(program = %self.program_name(), pid = child.id(), resource = %path.display(), "engine started");

        let (Some(requests), Some(replies)) = (child.stdin.take(), child.stdout.take()) else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(EngineError::Closed);
        };
        self.bridge = Some(Bridge {
            child,
            requests,
            replies: BufReader::new(replies),
        });
        Ok(())
    }

    fn respond(&mut self, input: &str) -> Result<String, EngineError> {
        let bridge = self.bridge.as_mut().ok_or(EngineError::NotLoaded)?;
        if input.contains(['\n', '\r']) {
            return Err(EngineError::MultilineRequest);
        }
        let sent = writeln!(bridge.requests, "{}", input).and_then(|()| bridge.requests.flush());
        match sent {
            Err(err) if err.kind() == io::ErrorKind::BrokenPipe => return Err(bridge.closed()),
            other => other?,
        }

        let mut reply = String::new();
        if bridge.replies.read_line(&mut reply)? == 0 {
            return Err(bridge.closed());
        }
        strip_line_ending(&mut reply);
        debug!(bytes = reply.len(), "engine replied");
        Ok(reply)
    }
}

impl Bridge {
    /// The child stopped reading requests or writing replies.
    fn closed(&mut self) -> EngineError {
        if let Ok(Some(status)) = self.child.try_wait() {
            warn!(%status, "engine exited");
        }
        EngineError::Closed
    }
}

impl Drop for Bridge {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Resolve an engine program the way a typical shell would.
///
/// Behavior:
/// - Absolute path: returned if it exists.
/// - `./foo` on Unix or any relative path on other platforms: returned if it exists.
/// - Relative with several components (e.g. `bin/bridge`): returned if it exists.
/// - Single component: each directory of `search_paths` is tried in order.
/// - Empty path: `None`.
pub fn find_program<'a>(search_paths: &OsStr, path: &'a Path) -> Option<Cow<'a, Path>> {
    if path.is_absolute() {
        return existing(path).map(Cow::Borrowed);
    }

    let search_in_current_dir = cfg!(not(unix)) || path.starts_with("./");
    if search_in_current_dir && path.exists() {
        return Some(Cow::Borrowed(path));
    }

    let mut components = path.components();
    match (components.next(), components.next()) {
        (None, _) => None,
        (Some(name), None) => std::env::split_paths(search_paths)
            .map(|dir| dir.join(name))
            .find(|candidate| candidate.exists())
            .map(Cow::Owned),
        _ => existing(path).map(Cow::Borrowed),
    }
}

fn existing(path: &Path) -> Option<&Path> {
    if path.exists() { Some(path) } else { None }
}
