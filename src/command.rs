use crate::builtin::Builtin;

/// Conventional process exit code type used by this crate.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
/// This mirrors the convention used by POSIX shells.
pub type ExitCode = i32;

/// Status reported for a program that could not be executed at all
/// (not found, not executable, empty name).
pub const EXEC_FAILURE: ExitCode = 127;

/// What the read-eval loop should do after a line has been dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Prompt for the next line.
    Continue,
    /// Leave the loop; the session ends with status 0.
    Exit,
}

/// Two argument vectors whose programs are connected by a pipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    /// Producer; its standard output is the pipe's write end.
    pub left: Vec<String>,
    /// Consumer; its standard input is the pipe's read end.
    pub right: Vec<String>,
}

/// A classified input line, ready to be executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// The line was just a newline.
    Blank,
    /// The line had no program name after tokenizing and substitution.
    Empty,
    /// A command handled inside the interpreter.
    Builtin(Builtin),
    /// A single external program with its arguments, `argv[0]` first.
    External(Vec<String>),
    /// Two external programs joined by `|`.
    Pipeline(Pipeline),
}
