//! Console front-end for conversational engines.
//!
//! A [`Session`] makes an [`Engine`] learn a startup knowledge resource, sends
//! it one initialization command, and then relays console lines to it, one
//! reply per line. The engine does all of the matching and reply generation;
//! this crate only moves text between it and the terminal.
//!
//! Engines are looked up by name in a [`Registry`]: builtins such as `echo`
//! run in-process, anything else is resolved on PATH and driven as a child
//! process (see [`external::ExternalEngine`]).

mod builtin;
pub mod engine;
pub mod env;
pub mod external;
pub mod io_adapters;
pub mod logging;
mod registry;
mod session;

pub use engine::{Engine, EngineError, EngineFactory};
pub use registry::Registry;
pub use session::{DEFAULT_INIT_COMMAND, DEFAULT_PROMPT, DEFAULT_STARTUP, Session, SessionConfig};
