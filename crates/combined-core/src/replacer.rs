//! Placeholder substitution for provisioning
//!
//! Credentials may be written as `{env.NAME}` in configuration so the
//! secret itself lives in the process environment. The replacer performs
//! one round of substitution over a string; it is a pure string transform
//! with no network I/O.

use std::collections::HashMap;

/// Resolves `{env.NAME}` placeholders
///
/// Lookups hit the override map first, then the process environment.
/// Unknown variables resolve to the default value passed to
/// [`Replacer::replace_all`]. Text that merely looks like a placeholder
/// but is not terminated stays literal.
#[derive(Debug, Default)]
pub struct Replacer {
    /// Variables that shadow the process environment (used by tests and
    /// embedding hosts that provision from their own variable table)
    overrides: HashMap<String, String>,
}

/// Placeholder prefix for environment lookups
const ENV_PREFIX: &str = "env.";

impl Replacer {
    /// Create a replacer backed by the process environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable that shadows the process environment
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.overrides.insert(name.into(), value.into());
        self
    }

    /// Replace all `{env.NAME}` placeholders in `input`
    ///
    /// `empty` is substituted for variables that exist nowhere.
    pub fn replace_all(&self, input: &str, empty: &str) -> String {
        let mut out = String::with_capacity(input.len());
        let mut rest = input;

        while let Some(start) = rest.find('{') {
            let (before, after) = rest.split_at(start);
            out.push_str(before);

            match after[1..].find('}') {
                Some(end) => {
                    let placeholder = &after[1..1 + end];
                    match self.lookup(placeholder) {
                        Some(value) => out.push_str(&value),
                        None if placeholder.starts_with(ENV_PREFIX) => out.push_str(empty),
                        // Not a placeholder we understand; keep it literal
                        None => {
                            out.push('{');
                            out.push_str(placeholder);
                            out.push('}');
                        }
                    }
                    rest = &after[end + 2..];
                }
                // Unterminated brace stays literal
                None => {
                    out.push_str(after);
                    return out;
                }
            }
        }

        out.push_str(rest);
        out
    }

    fn lookup(&self, placeholder: &str) -> Option<String> {
        let name = placeholder.strip_prefix(ENV_PREFIX)?;
        if let Some(value) = self.overrides.get(name) {
            return Some(value.clone());
        }
        std::env::var(name).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_known_variable() {
        let repl = Replacer::new().with_var("TOKEN", "secret");
        assert_eq!(repl.replace_all("{env.TOKEN}", ""), "secret");
        assert_eq!(repl.replace_all("pre-{env.TOKEN}-post", ""), "pre-secret-post");
    }

    #[test]
    fn unknown_env_variable_becomes_default() {
        let repl = Replacer::new();
        assert_eq!(
            repl.replace_all("{env.COMBINED_TEST_SURELY_UNSET_VAR}", ""),
            ""
        );
        assert_eq!(
            repl.replace_all("{env.COMBINED_TEST_SURELY_UNSET_VAR}", "fallback"),
            "fallback"
        );
    }

    #[test]
    fn non_env_braces_stay_literal() {
        let repl = Replacer::new();
        assert_eq!(repl.replace_all("{not-a-var}", ""), "{not-a-var}");
        assert_eq!(repl.replace_all("unterminated {env.X", ""), "unterminated {env.X");
    }

    #[test]
    fn plain_strings_pass_through() {
        let repl = Replacer::new();
        assert_eq!(repl.replace_all("plain-token", ""), "plain-token");
    }

    #[test]
    fn multiple_placeholders_in_one_string() {
        let repl = Replacer::new().with_var("A", "1").with_var("B", "2");
        assert_eq!(repl.replace_all("{env.A}:{env.B}", ""), "1:2");
    }
}
