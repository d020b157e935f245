/// Session settings for the interpreter.
///
/// The capacities bound the fixed-size collections of the session: input lines,
/// argument vectors and the variable table. Anything beyond a capacity is
/// silently truncated, never rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    /// Value of the positional variable `$0`.
    pub session_name: String,
    /// Text shown before each interactive read.
    pub prompt: String,
    /// Size of an argument vector including its terminating slot, so a line
    /// yields at most `max_args - 1` tokens.
    pub max_args: usize,
    /// Size of the line buffer including its terminating slot.
    pub max_line_len: usize,
    /// Maximum number of entries in the variable table.
    pub variable_capacity: usize,
    /// Size of a variable name buffer including its terminating slot.
    pub name_capacity: usize,
    /// Size of a variable value buffer including its terminating slot.
    pub value_capacity: usize,
    /// Whether the interactive line editor keeps a history.
    pub history: bool,
}

impl ShellConfig {
    pub const DEFAULT_SESSION_NAME: &'static str = "polshell";
    pub const DEFAULT_PROMPT: &'static str = "$ ";
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            session_name: Self::DEFAULT_SESSION_NAME.to_string(),
            prompt: Self::DEFAULT_PROMPT.to_string(),
            max_args: 64,
            max_line_len: 1024,
            variable_capacity: 100,
            name_capacity: 50,
            value_capacity: 256,
            history: true,
        }
    }
}
