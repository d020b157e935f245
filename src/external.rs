use crate::command::{EXEC_FAILURE, ExitCode};
use crate::error::{ShellError, Side};
use std::io::{self, Write};
use std::process::{Child, ExitStatus, Stdio};
use tracing::{debug, trace};

/// Start `argv[0]` with the remaining tokens as its arguments.
///
/// The program is looked up through `PATH` and inherits the environment, working
/// directory and standard error of the interpreter. The `Command` is dropped
/// before returning, so the parent gives up its copies of `stdin` and `stdout`
/// right after the spawn attempt.
pub(crate) fn spawn(
    argv: &[String],
    side: Option<Side>,
    stdin: Stdio,
    stdout: Stdio,
) -> Result<Child, ShellError> {
    let (program, args) = match argv.split_first() {
        Some((program, args)) => (program.as_str(), args),
        None => ("", &[][..]),
    };
    let child = std::process::Command::new(program)
        .args(args)
        .stdin(stdin)
        .stdout(stdout)
        .spawn()
        .map_err(|source| ShellError::Exec {
            side,
            program: program.to_string(),
            source,
        })?;
    debug!(pid = child.id(), program, ?side, "spawned child");
    Ok(child)
}

/// Block until `child` terminates and turn its status into an exit code.
pub(crate) fn wait(mut child: Child, argv: &[String]) -> Result<ExitCode, ShellError> {
    let status = child.wait().map_err(|source| ShellError::Wait {
        program: argv.first().cloned().unwrap_or_default(),
        source,
    })?;
    let code = status.code().unwrap_or_else(|| terminated_by_signal(status));
    debug!(pid = child.id(), code, "collected child status");
    Ok(code)
}

/// Run one external command in the foreground.
///
/// A program that cannot be started is reported on `stderr` and yields
/// [`EXEC_FAILURE`]. The interactive loop does not act on the returned status.
pub(crate) fn run(argv: &[String], stderr: &mut dyn Write) -> io::Result<ExitCode> {
    trace!(?argv, "running external command");
    let child = match spawn(argv, None, Stdio::inherit(), Stdio::inherit()) {
        Ok(child) => child,
        Err(err) => {
            writeln!(stderr, "{err}")?;
            return Ok(EXEC_FAILURE);
        }
    };
    match wait(child, argv) {
        Ok(code) => Ok(code),
        Err(err) => {
            writeln!(stderr, "{err}")?;
            Ok(EXEC_FAILURE)
        }
    }
}

#[cfg(unix)]
fn terminated_by_signal(exit_status: ExitStatus) -> ExitCode {
    use std::os::unix::process::ExitStatusExt;
    if let Some(signal) = ExitStatusExt::signal(&exit_status) {
        128 + signal
    } else if ExitStatusExt::core_dumped(&exit_status) {
        255
    } else {
        -1
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(_exit_status: ExitStatus) -> ExitCode {
    -1
}
