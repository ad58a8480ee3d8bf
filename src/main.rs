use aiml_console::io_adapters::{Prompt, ReaderLines};
use aiml_console::{
    DEFAULT_INIT_COMMAND, DEFAULT_PROMPT, DEFAULT_STARTUP, Registry, Session, SessionConfig,
    logging,
};
use argh::FromArgs;
use std::io::IsTerminal;
use std::path::PathBuf;

#[derive(FromArgs)]
/// Chat with a conversational engine from the terminal.
///
/// The engine learns the startup resource, answers the init command, and then
/// answers every line typed until Ctrl-C or end of input.
struct Args {
    #[argh(option, short = 's', default = "PathBuf::from(DEFAULT_STARTUP)")]
    /// knowledge resource the engine learns first (default: std-startup.xml).
    startup: PathBuf,

    #[argh(option, short = 'c', default = "DEFAULT_INIT_COMMAND.to_string()")]
    /// command sent once before reading input (default: "load aiml b").
    init_command: String,

    #[argh(option, short = 'p', default = "DEFAULT_PROMPT.to_string()")]
    /// prompt shown when reading from a terminal.
    prompt: String,

    #[argh(switch, short = 'v')]
    /// log every exchange to stderr.
    verbose: bool,

    #[argh(positional)]
    /// engine to talk to: a builtin (echo) or a program on PATH.
    engine: String,

    #[argh(positional, greedy)]
    /// arguments passed to the engine.
    engine_args: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let args: Args = argh::from_env();
    logging::init_logger(args.verbose);

    let engine_args: Vec<&str> = args.engine_args.iter().map(String::as_str).collect();
    let engine = Registry::default().create(&args.engine, &engine_args)?;
    let session = Session::new(
        engine,
        SessionConfig {
            startup: args.startup,
            init_command: args.init_command,
        },
    );

    let mut stdout = std::io::stdout().lock();
    if std::io::stdin().is_terminal() {
        let mut input = Prompt::new(args.prompt)?;
        session.run(&mut input, &mut stdout)
    } else {
        let mut input = ReaderLines::new(std::io::stdin().lock());
        session.run(&mut input, &mut stdout)
    }
}
