use crate::env::VariableTable;

/// Marks a token as a variable reference.
pub(crate) const SIGIL: char = '$';

/// Resolve every `$NAME` token against `vars`.
///
/// The result has the same length as the input. A token naming an unknown
/// variable becomes an empty string rather than disappearing, so positions are
/// preserved. Tokens without the sigil pass through unchanged.
pub(crate) fn substitute(tokens: Vec<String>, vars: &VariableTable) -> Vec<String> {
    tokens
        .into_iter()
        .map(|token| match token.strip_prefix(SIGIL) {
            Some(name) => vars.lookup(name).unwrap_or_default().to_string(),
            None => token,
        })
        .collect()
}
