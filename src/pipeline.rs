//! Two-stage pipelines: `left | right`.
//!
//! One anonymous pipe connects the stages. The write end becomes the left
//! program's standard output and the read end the right program's standard
//! input. Both endpoints are created close-on-exec, and each one is moved into
//! the `Stdio` of exactly one child command, which is dropped as soon as that
//! child has been spawned. When the left program exits, no other write end
//! exists, so the right program sees end-of-stream.

use crate::command::{EXEC_FAILURE, ExitCode, Pipeline};
use crate::error::{ShellError, Side};
use crate::external;
use std::io::{self, Write};
use std::process::{Child, Stdio};
use thiserror::Error;
use tracing::{debug, trace};

/// Exit codes of both pipeline stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineStatus {
    pub left: ExitCode,
    pub right: ExitCode,
}

/// Run `pipeline.left | pipeline.right` and wait for both programs.
///
/// Fails only when the pipe itself cannot be created, in which case nothing is
/// spawned. A stage that cannot be started is reported on `stderr` with its side
/// as soon as its spawn returns, and gets [`EXEC_FAILURE`]; the other stage still
/// runs. Both children are collected even if writing a diagnostic fails.
pub(crate) fn run(
    pipeline: &Pipeline,
    stderr: &mut dyn Write,
) -> Result<PipelineStatus, RunError> {
    trace!(left = ?pipeline.left, right = ?pipeline.right, "running pipeline");
    let (reader, writer) = io::pipe().map_err(ShellError::Channel)?;

    let left = external::spawn(
        &pipeline.left,
        Some(Side::Left),
        Stdio::inherit(),
        writer.into(),
    );
    let (left, left_reported) = started(left, stderr);
    let right = external::spawn(
        &pipeline.right,
        Some(Side::Right),
        reader.into(),
        Stdio::inherit(),
    );
    let (right, right_reported) = started(right, stderr);

    let (left_code, left_waited) = finish(left, &pipeline.left, stderr);
    let (right_code, right_waited) = finish(right, &pipeline.right, stderr);
    left_reported?;
    right_reported?;
    left_waited?;
    right_waited?;

    let status = PipelineStatus {
        left: left_code,
        right: right_code,
    };
    debug!(left = status.left, right = status.right, "pipeline finished");
    Ok(status)
}

/// Failure of a pipeline as a whole.
#[derive(Debug, Error)]
pub(crate) enum RunError {
    /// The pipeline could not be set up.
    #[error(transparent)]
    Shell(#[from] ShellError),
    /// Writing a diagnostic to the session's standard error failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

fn started(
    spawned: Result<Child, ShellError>,
    stderr: &mut dyn Write,
) -> (Option<Child>, io::Result<()>) {
    match spawned {
        Ok(child) => (Some(child), Ok(())),
        Err(err) => (None, writeln!(stderr, "{err}")),
    }
}

fn finish(
    child: Option<Child>,
    argv: &[String],
    stderr: &mut dyn Write,
) -> (ExitCode, io::Result<()>) {
    let Some(child) = child else {
        return (EXEC_FAILURE, Ok(()));
    };
    match external::wait(child, argv) {
        Ok(code) => (code, Ok(())),
        Err(err) => (EXEC_FAILURE, writeln!(stderr, "{err}")),
    }
}
