//! Splitting of input lines into whitespace-delimited tokens.

use regex::Regex;

/// Characters that separate tokens. Runs of them count as one separator.
const DELIMITERS: &str = r"[ \t\n]+";

/// Splits a line into at most `max_args - 1` tokens.
///
/// There is no quoting or escaping: every run of spaces, tabs and newlines ends a
/// token. Tokens past the bound are dropped without an error, leaving the last
/// slot of the argument vector as its terminator.
#[derive(Debug, Clone)]
pub(crate) struct Tokenizer {
    delimiters: Regex,
    max_tokens: usize,
}

impl Tokenizer {
    pub(crate) fn new(max_args: usize) -> Result<Self, regex::Error> {
        Ok(Self {
            delimiters: Regex::new(DELIMITERS)?,
            max_tokens: max_args.saturating_sub(1),
        })
    }

    pub(crate) fn tokenize(&self, line: &str) -> Vec<String> {
        self.delimiters
            .split(line)
            .filter(|token| !token.is_empty())
            .take(self.max_tokens)
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenizer() -> Tokenizer {
        Tokenizer::new(64).unwrap()
    }

    #[test]
    fn test_splits_on_spaces_tabs_and_newlines() {
        let tokens = tokenizer().tokenize("ls  -l\t/tmp\n");
        assert_eq!(tokens, vec!["ls", "-l", "/tmp"]);
    }

    #[test]
    fn test_whitespace_only_line_has_no_tokens() {
        assert!(tokenizer().tokenize(" \t  \n").is_empty());
        assert!(tokenizer().tokenize("\n").is_empty());
        assert!(tokenizer().tokenize("").is_empty());
    }

    #[test]
    fn test_leading_whitespace_is_ignored() {
        assert_eq!(tokenizer().tokenize("   echo hi"), vec!["echo", "hi"]);
    }

    #[test]
    fn test_other_characters_stay_in_tokens() {
        // no quoting: quotes and carriage returns are ordinary characters
        let tokens = tokenizer().tokenize("echo \"a b\"\r\n");
        assert_eq!(tokens, vec!["echo", "\"a", "b\"\r"]);
    }

    #[test]
    fn test_tokens_beyond_bound_are_dropped() {
        let line = (0..100).map(|i| i.to_string()).collect::<Vec<_>>().join(" ");
        let tokens = tokenizer().tokenize(&line);
        assert_eq!(tokens.len(), 63);
        assert_eq!(tokens.last().map(String::as_str), Some("62"));

        let small = Tokenizer::new(3).unwrap();
        assert_eq!(small.tokenize("a b c d"), vec!["a", "b"]);
    }
}
