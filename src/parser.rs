use crate::builtin::Builtin;
use crate::command::{Command, Pipeline};
use crate::config::ShellConfig;
use crate::env::{VariableTable, truncate_to_capacity};
use crate::expand::substitute;
use crate::lexer::Tokenizer;

/// Splits a line into the two stages of a pipeline.
pub(crate) const PIPE: char = '|';

/// Turns raw input lines into [`Command`]s.
#[derive(Debug, Clone)]
pub(crate) struct LineParser {
    tokenizer: Tokenizer,
    max_line_len: usize,
}

impl LineParser {
    pub(crate) fn new(config: &ShellConfig) -> Result<Self, regex::Error> {
        Ok(Self {
            tokenizer: Tokenizer::new(config.max_args)?,
            max_line_len: config.max_line_len,
        })
    }

    /// Classify one line.
    ///
    /// - a bare newline is [`Command::Blank`],
    /// - a line containing `|` is cut at the first `|` into a [`Command::Pipeline`];
    ///   later `|` characters are ordinary text of the right stage,
    /// - anything else is tokenized and substituted, then recognized as a
    ///   built-in or an external command, or [`Command::Empty`] when no program
    ///   name is left.
    ///
    /// Pipeline stages are not checked for a program name; an empty stage fails
    /// when it is spawned.
    pub(crate) fn parse(&self, line: &str, vars: &VariableTable) -> Command {
        let line = truncate_to_capacity(line, self.max_line_len);
        if line.strip_suffix('\n').unwrap_or(line).is_empty() {
            return Command::Blank;
        }

        if let Some((left, right)) = line.split_once(PIPE) {
            return Command::Pipeline(Pipeline {
                left: self.argv(left, vars),
                right: self.argv(right, vars),
            });
        }

        let argv = self.argv(line, vars);
        match argv.first() {
            None => Command::Empty,
            Some(name) if name.is_empty() => Command::Empty,
            Some(_) => match Builtin::classify(&argv) {
                Some(builtin) => Command::Builtin(builtin),
                None => Command::External(argv),
            },
        }
    }

    fn argv(&self, segment: &str, vars: &VariableTable) -> Vec<String> {
        substitute(self.tokenizer.tokenize(segment), vars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> LineParser {
        LineParser::new(&ShellConfig::default()).unwrap()
    }

    fn vars() -> VariableTable {
        VariableTable::initialize(&ShellConfig::default(), |key| match key {
            "USER" => Some("carol".to_string()),
            _ => None,
        })
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_bare_newline_is_blank() {
        assert_eq!(parser().parse("\n", &vars()), Command::Blank);
        assert_eq!(parser().parse("", &vars()), Command::Blank);
    }

    #[test]
    fn test_whitespace_line_is_empty() {
        assert_eq!(parser().parse("   \t\n", &vars()), Command::Empty);
    }

    #[test]
    fn test_unresolved_program_name_is_empty() {
        assert_eq!(parser().parse("$NOPE ls\n", &vars()), Command::Empty);
    }

    #[test]
    fn test_external_command_is_substituted() {
        assert_eq!(
            parser().parse("ls -l $USER $NOPE\n", &vars()),
            Command::External(strings(&["ls", "-l", "carol", ""]))
        );
    }

    #[test]
    fn test_builtins_are_recognized() {
        assert_eq!(
            parser().parse("exit now please\n", &vars()),
            Command::Builtin(Builtin::Exit)
        );
        assert_eq!(
            parser().parse("echo $NOPE foo\n", &vars()),
            Command::Builtin(Builtin::Echo {
                args: strings(&["", "foo"])
            })
        );
        assert_eq!(
            parser().parse("cd\n", &vars()),
            Command::Builtin(Builtin::Cd { target: None })
        );
    }

    #[test]
    fn test_pipe_splits_at_first_delimiter() {
        assert_eq!(
            parser().parse("ls -l | grep a | wc\n", &vars()),
            Command::Pipeline(Pipeline {
                left: strings(&["ls", "-l"]),
                right: strings(&["grep", "a", "|", "wc"]),
            })
        );
    }

    #[test]
    fn test_pipe_sides_are_substituted_independently() {
        assert_eq!(
            parser().parse("echo $USER|tr $NOPE x\n", &vars()),
            Command::Pipeline(Pipeline {
                left: strings(&["echo", "carol"]),
                right: strings(&["tr", "", "x"]),
            })
        );
    }

    #[test]
    fn test_pipe_with_empty_sides_is_still_a_pipeline() {
        assert_eq!(
            parser().parse("|\n", &vars()),
            Command::Pipeline(Pipeline {
                left: Vec::new(),
                right: Vec::new(),
            })
        );
    }

    #[test]
    fn test_builtin_names_in_pipeline_are_external() {
        let cmd = parser().parse("echo hi | cat\n", &vars());
        assert!(matches!(cmd, Command::Pipeline(p) if p.left == strings(&["echo", "hi"])));
    }

    #[test]
    fn test_long_lines_are_truncated() {
        let config = ShellConfig {
            max_line_len: 8,
            ..ShellConfig::default()
        };
        let parser = LineParser::new(&config).unwrap();
        // only "echo ab" fits
        assert_eq!(
            parser.parse("echo abcdef | wc\n", &vars()),
            Command::Builtin(Builtin::Echo {
                args: strings(&["ab"])
            })
        );
    }
}
