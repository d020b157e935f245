use crate::config::ShellConfig;
use std::env as stdenv;

/// A single session variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub name: String,
    pub value: String,
}

/// Session variables available to `$NAME` substitution.
///
/// The table is filled once when the session starts and is read-only afterwards:
/// - `$0`: the session name,
/// - `$USER`: taken from the environment, `unknown` when absent,
/// - `$PATH`: taken from the environment, empty when absent.
///
/// It is bounded. Inserting into a full table, or inserting a name that already
/// exists, leaves the table unchanged. Names and values longer than their
/// capacity are cut short.
#[derive(Debug, Clone)]
pub struct VariableTable {
    vars: Vec<Variable>,
    capacity: usize,
    name_capacity: usize,
    value_capacity: usize,
}

impl VariableTable {
    /// Create an empty table with the capacities from `config`.
    pub fn with_capacity(config: &ShellConfig) -> Self {
        Self {
            vars: Vec::with_capacity(config.variable_capacity),
            capacity: config.variable_capacity,
            name_capacity: config.name_capacity,
            value_capacity: config.value_capacity,
        }
    }

    /// Build the session table from the process environment.
    pub fn from_process_env(config: &ShellConfig) -> Self {
        Self::initialize(config, |key| stdenv::var(key).ok())
    }

    /// Build the session table, asking `lookup` for environment-derived values.
    pub fn initialize<F>(config: &ShellConfig, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut table = Self::with_capacity(config);
        table.insert("0", &config.session_name);
        table.insert("USER", &lookup("USER").unwrap_or_else(|| "unknown".to_string()));
        table.insert("PATH", &lookup("PATH").unwrap_or_default());
        table
    }

    /// Append a variable. Returns `false` if the table is full or `name` is taken.
    pub fn insert(&mut self, name: &str, value: &str) -> bool {
        let name = truncate_to_capacity(name, self.name_capacity);
        if self.vars.len() >= self.capacity || self.lookup(name).is_some() {
            return false;
        }
        self.vars.push(Variable {
            name: name.to_string(),
            value: truncate_to_capacity(value, self.value_capacity).to_string(),
        });
        true
    }

    /// Value of the variable called `name`, if any.
    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.vars
            .iter()
            .find(|var| var.name == name)
            .map(|var| var.value.as_str())
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

/// Longest prefix of `s` that fits a buffer of `capacity` bytes with one slot
/// reserved for the terminator. Never splits a character.
pub(crate) fn truncate_to_capacity(s: &str, capacity: usize) -> &str {
    let max = capacity.saturating_sub(1);
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn fake_env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_initialize_reads_lookup_service() {
        let config = ShellConfig::default();
        let table = VariableTable::initialize(
            &config,
            fake_env(&[("USER", "alice"), ("PATH", "/bin:/usr/bin")]),
        );

        assert_eq!(table.lookup("0"), Some("polshell"));
        assert_eq!(table.lookup("USER"), Some("alice"));
        assert_eq!(table.lookup("PATH"), Some("/bin:/usr/bin"));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_initialize_falls_back_when_absent() {
        let config = ShellConfig::default();
        let table = VariableTable::initialize(&config, fake_env(&[]));

        assert_eq!(table.lookup("USER"), Some("unknown"));
        assert_eq!(table.lookup("PATH"), Some(""));
    }

    #[test]
    fn test_lookup_undefined_is_none() {
        let table = VariableTable::initialize(&ShellConfig::default(), fake_env(&[]));
        assert_eq!(table.lookup("HOME"), None);
        assert_eq!(table.lookup(""), None);
        // exact match only
        assert_eq!(table.lookup("user"), None);
    }

    #[test]
    fn test_long_values_are_truncated() {
        let config = ShellConfig::default();
        let long_path = "p".repeat(1000);
        let table = VariableTable::initialize(&config, fake_env(&[("PATH", long_path.as_str())]));

        let value = table.lookup("PATH").unwrap();
        assert_eq!(value.len(), config.value_capacity - 1);
        assert!(long_path.starts_with(value));
    }

    #[test]
    fn test_truncation_keeps_whole_characters() {
        // "é" is two bytes; a 4 byte buffer holds 3 bytes of text
        assert_eq!(truncate_to_capacity("éé", 4), "é");
        assert_eq!(truncate_to_capacity("abc", 4), "abc");
        assert_eq!(truncate_to_capacity("abc", 0), "");
    }

    #[test]
    fn test_insert_saturates_and_keeps_first() {
        let config = ShellConfig {
            variable_capacity: 2,
            ..ShellConfig::default()
        };
        let mut table = VariableTable::with_capacity(&config);

        assert!(table.insert("A", "1"));
        assert!(!table.insert("A", "2"));
        assert!(table.insert("B", "3"));
        assert!(!table.insert("C", "4"));

        assert_eq!(table.lookup("A"), Some("1"));
        assert_eq!(table.lookup("C"), None);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_from_process_env_sets_session_name() {
        let config = ShellConfig {
            session_name: "testsh".to_string(),
            ..ShellConfig::default()
        };
        let table = VariableTable::from_process_env(&config);
        assert_eq!(table.lookup("0"), Some("testsh"));
        assert!(table.lookup("USER").is_some());
        assert!(table.lookup("PATH").is_some());
    }
}
