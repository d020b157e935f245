//! Errors reported by the execution engine.
//!
//! None of these end the session. The interpreter prints the `Display` form to
//! standard error at the point of detection and moves on to the next line.

use std::io;
use thiserror::Error;

/// Which stage of a pipeline an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("pipe: {0}")]
    Channel(#[source] io::Error),

    #[error("cd: missing directory argument")]
    MissingCdArgument,

    #[error("cd: {path}: {source}")]
    ChangeDir {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("exec{}: {program}: {source}", side_suffix(.side))]
    Exec {
        side: Option<Side>,
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("wait: {program}: {source}")]
    Wait {
        program: String,
        #[source]
        source: io::Error,
    },
}

fn side_suffix(side: &Option<Side>) -> String {
    side.map(|s| format!(" {s}")).unwrap_or_default()
}
