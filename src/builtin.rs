use crate::command::Flow;
use crate::error::ShellError;
use std::env;
use std::io::{self, Write};
use tracing::debug;

/// Commands handled by the interpreter itself, without spawning a child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Builtin {
    /// End the session. Any arguments are ignored.
    Exit,
    /// Change the working directory of the interpreter process.
    ///
    /// `None` when the first argument is missing or was emptied by substitution.
    Cd { target: Option<String> },
    /// Print the non-empty arguments separated by spaces.
    Echo { args: Vec<String> },
}

impl Builtin {
    /// Recognize a built-in from a substituted argument vector.
    pub fn classify(argv: &[String]) -> Option<Self> {
        let (name, args) = argv.split_first()?;
        match name.as_str() {
            "exit" => Some(Builtin::Exit),
            "cd" => Some(Builtin::Cd {
                target: args.first().filter(|t| !t.is_empty()).cloned(),
            }),
            "echo" => Some(Builtin::Echo {
                args: args.to_vec(),
            }),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Builtin::Exit => "exit",
            Builtin::Cd { .. } => "cd",
            Builtin::Echo { .. } => "echo",
        }
    }

    /// Run the built-in.
    ///
    /// Usage errors go to `stderr` and never end the session; only writes to the
    /// session's own streams can fail.
    pub fn execute(self, stdout: &mut dyn Write, stderr: &mut dyn Write) -> io::Result<Flow> {
        match self {
            Builtin::Exit => Ok(Flow::Exit),
            Builtin::Cd { target } => {
                if let Err(err) = change_dir(target) {
                    writeln!(stderr, "{err}")?;
                }
                Ok(Flow::Continue)
            }
            Builtin::Echo { args } => {
                let words: Vec<&str> = args
                    .iter()
                    .map(String::as_str)
                    .filter(|word| !word.is_empty())
                    .collect();
                writeln!(stdout, "{}", words.join(" "))?;
                stdout.flush()?;
                Ok(Flow::Continue)
            }
        }
    }
}

fn change_dir(target: Option<String>) -> Result<(), ShellError> {
    let path = target.ok_or(ShellError::MissingCdArgument)?;
    env::set_current_dir(&path).map_err(|source| ShellError::ChangeDir {
        path: path.clone(),
        source,
    })?;
    debug!(dir = %path, "changed working directory");
    Ok(())
}
