//! A minimal interactive command interpreter.
//!
//! Each input line is split into whitespace-delimited tokens, `$NAME` tokens are
//! replaced from a small session [`VariableTable`], and the result is either handled
//! by a built-in (`exit`, `cd`, `echo`), run as a single external program, or run as
//! a two-stage pipeline where the first program's standard output feeds the second
//! program's standard input.
//!
//! The main entry point is [`Interpreter`], which dispatches lines and drives a
//! read-eval loop over any [`LineSource`].

pub mod builtin;
pub mod command;
pub mod config;
pub mod env;
pub mod error;
mod expand;
mod external;
mod interpreter;
pub mod io_adapters;
mod lexer;
mod parser;
mod pipeline;

pub use builtin::Builtin;
pub use command::{Command, ExitCode, Flow, Pipeline};
pub use config::ShellConfig;
pub use env::VariableTable;
pub use error::ShellError;
pub use interpreter::Interpreter;
pub use io_adapters::{EditorSource, LineSource, ReaderSource};
pub use pipeline::PipelineStatus;
