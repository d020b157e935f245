use anyhow::{Context, Result};
use argh::FromArgs;
use polshell::{EditorSource, Interpreter, LineSource, ReaderSource, ShellConfig};
use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter, e.g. `POLSHELL_LOG=debug`.
const LOG_ENV: &str = "POLSHELL_LOG";

#[derive(FromArgs)]
/// A minimal command interpreter with variables and two-stage pipelines.
struct Cli {
    #[argh(positional)]
    /// read command lines from this file instead of standard input
    script: Option<PathBuf>,

    #[argh(option, short = 'c')]
    /// run a single command line and exit
    command: Option<String>,

    #[argh(option)]
    /// prompt shown before each interactive read
    prompt: Option<String>,

    #[argh(option)]
    /// session name stored in $0
    name: Option<String>,

    #[argh(switch)]
    /// do not keep a line editor history
    no_history: bool,

    #[argh(switch, short = 'v')]
    /// log dispatch and process events to standard error
    verbose: bool,
}

impl Cli {
    fn config(&self) -> ShellConfig {
        let defaults = ShellConfig::default();
        ShellConfig {
            session_name: self.name.clone().unwrap_or(defaults.session_name),
            prompt: self.prompt.clone().unwrap_or(defaults.prompt),
            history: !self.no_history,
            ..defaults
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(verbose)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = cli.config();
    let history = config.history;
    let sh = Interpreter::new(config)?;

    if let Some(line) = &cli.command {
        debug!(line = %line, "running single command");
        sh.execute_line(line, &mut io::stdout(), &mut io::stderr())?;
        return Ok(());
    }

    let mut source: Box<dyn LineSource> = match &cli.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("can't open script {}", path.display()))?;
            Box::new(ReaderSource::new(BufReader::new(file)))
        }
        None if io::stdin().is_terminal() => Box::new(EditorSource::new(history)?),
        None => Box::new(ReaderSource::new(io::stdin().lock())),
    };
    sh.repl(source.as_mut())
}

fn main() -> ExitCode {
    let cli: Cli = argh::from_env();
    init_logging(cli.verbose);
    debug!("polshell started");

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("polshell: {err:#}");
            ExitCode::FAILURE
        }
    }
}
