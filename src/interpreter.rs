use crate::command::{Command, Flow};
use crate::config::ShellConfig;
use crate::env::VariableTable;
use crate::external;
use crate::io_adapters::LineSource;
use crate::parser::LineParser;
use crate::pipeline::{self, RunError};
use anyhow::{Context, Result};
use std::io::{self, Write};
use tracing::{debug, trace};

/// A minimal interactive command interpreter.
///
/// Holds the session's [`VariableTable`], built once at startup and never
/// changed afterwards, and dispatches each line to a built-in, a single external
/// program or a two-stage pipeline.
///
/// Example
/// ```
/// use polshell::{Flow, Interpreter, ShellConfig};
/// let sh = Interpreter::new(ShellConfig::default()).unwrap();
/// let mut out = Vec::new();
/// let flow = sh.execute_line("echo hello $NOPE world\n", &mut out, &mut Vec::new()).unwrap();
/// assert_eq!(flow, Flow::Continue);
/// assert_eq!(out, b"hello world\n");
/// ```
pub struct Interpreter {
    config: ShellConfig,
    vars: VariableTable,
    parser: LineParser,
}

impl Interpreter {
    /// Create an interpreter whose variables come from the process environment.
    pub fn new(config: ShellConfig) -> Result<Self> {
        let vars = VariableTable::from_process_env(&config);
        Self::with_variables(config, vars)
    }

    /// Create an interpreter with a prepared variable table.
    pub fn with_variables(config: ShellConfig, vars: VariableTable) -> Result<Self> {
        let parser = LineParser::new(&config).context("failed to build tokenizer")?;
        Ok(Self {
            config,
            vars,
            parser,
        })
    }

    /// Classify a line without running it.
    pub fn parse(&self, line: &str) -> Command {
        self.parser.parse(line, &self.vars)
    }

    /// Run one input line.
    ///
    /// Built-in output goes to `stdout`, diagnostics to `stderr`. Child processes
    /// inherit the interpreter's own standard streams. Errors are returned only
    /// when writing to `stdout` or `stderr` fails.
    pub fn execute_line(
        &self,
        line: &str,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> Result<Flow> {
        let command = self.parse(line);
        trace!(?command, "dispatching");
        match command {
            Command::Blank | Command::Empty => Ok(Flow::Continue),
            Command::Builtin(builtin) => {
                debug!(builtin = builtin.name(), "running builtin");
                Ok(builtin.execute(stdout, stderr)?)
            }
            Command::External(argv) => {
                // the child writes to the real stdout; keep ordering with earlier echo output
                stdout.flush()?;
                let code = external::run(&argv, stderr)?;
                debug!(?argv, code, "command finished");
                Ok(Flow::Continue)
            }
            Command::Pipeline(pipeline) => {
                stdout.flush()?;
                match pipeline::run(&pipeline, stderr) {
                    Ok(_) => {}
                    Err(RunError::Shell(err)) => writeln!(stderr, "{err}")?,
                    Err(RunError::Io(err)) => return Err(err.into()),
                }
                Ok(Flow::Continue)
            }
        }
    }

    /// Read-eval loop on the process's standard streams.
    pub fn repl(&self, source: &mut dyn LineSource) -> Result<()> {
        self.run_session(source, &mut io::stdout(), &mut io::stderr())
    }

    /// Read lines from `source` and run them until `exit` or end of input.
    pub fn run_session(
        &self,
        source: &mut dyn LineSource,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> Result<()> {
        let prompt = self.config.prompt.clone();
        while let Some(line) = source.next_line(&prompt)? {
            if self.execute_line(&line, stdout, stderr)? == Flow::Exit {
                debug!("exit requested");
                return Ok(());
            }
        }
        debug!("end of input");
        Ok(())
    }
}
