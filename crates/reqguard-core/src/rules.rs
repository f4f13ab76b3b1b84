//! # Rule Registry and Format Checks
//!
//! Built-in format predicates (email, E.164) and the registry of named
//! custom rules consulted for [`Constraint::Rule`](crate::Constraint::Rule).
//! A registry is assembled once and then only read.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;
use validator::ValidateEmail;

/// Name of the built-in "non-blank after trimming whitespace" rule.
pub const NOT_BLANK: &str = "notblank";

/// `+`, an optional non-zero digit, then 7 to 14 digits.
const E164_PATTERN: &str = r"^\+[1-9]?[0-9]{7,14}$";

/// Predicate over a serialized field value.
pub type RuleFn = fn(&Value) -> bool;

/// A named custom rule.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub check: RuleFn,
    /// Violation suffix, e.g. `must not be blank`.
    pub message: &'static str,
}

/// Mapping from rule names to predicates.
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    rules: HashMap<&'static str, Rule>,
}

impl RuleRegistry {
    /// A registry with no rules at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A registry holding the built-in rules (`notblank`).
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        registry.register(NOT_BLANK, not_blank, "must not be blank");
        registry
    }

    /// Register (or replace) a rule under `name`.
    pub fn register(&mut self, name: &'static str, check: RuleFn, message: &'static str) {
        self.rules.insert(name, Rule { check, message });
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Strings must contain something other than whitespace; lists and
/// objects must be non-empty; `null` is blank; other values pass.
pub fn not_blank(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(members) => !members.is_empty(),
        Value::Bool(_) | Value::Number(_) => true,
    }
}

/// Email address check, delegated to the `validator` crate.
pub fn is_email(candidate: &str) -> bool {
    candidate.validate_email()
}

/// E.164 phone number check.
pub fn is_e164(candidate: &str) -> bool {
    e164().is_match(candidate)
}

fn e164() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(E164_PATTERN).expect("E.164 pattern is a valid regex"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builtins_contain_notblank() {
        let registry = RuleRegistry::with_builtins();
        assert!(registry.contains(NOT_BLANK));
        assert_eq!(registry.len(), 1);
        assert!(RuleRegistry::empty().is_empty());
    }

    #[test]
    fn register_adds_and_replaces() {
        fn even(v: &Value) -> bool {
            v.as_i64().is_some_and(|n| n % 2 == 0)
        }
        let mut registry = RuleRegistry::with_builtins();
        registry.register("even", even, "must be even");
        let rule = registry.get("even").unwrap();
        assert!((rule.check)(&json!(4)));
        assert!(!(rule.check)(&json!(3)));
        assert_eq!(rule.message, "must be even");

        registry.register("even", |_| true, "always");
        assert_eq!(registry.get("even").unwrap().message, "always");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn not_blank_trims_whitespace() {
        assert!(not_blank(&json!("x")));
        assert!(not_blank(&json!("  x  ")));
        assert!(!not_blank(&json!("")));
        assert!(!not_blank(&json!(" \t\n ")));
        assert!(!not_blank(&Value::Null));
        assert!(!not_blank(&json!([])));
        assert!(not_blank(&json!([1])));
        assert!(not_blank(&json!(0)));
    }

    #[test]
    fn email_format() {
        assert!(is_email("alice@example.com"));
        assert!(is_email("first.last+tag@sub.example.org"));
        assert!(!is_email("invalid-email"));
        assert!(!is_email(""));
        assert!(!is_email("@example.com"));
    }

    #[test]
    fn e164_format() {
        assert!(is_e164("+1234567890"));
        assert!(is_e164("+442071838750"));
        assert!(!is_e164("invalid-phone"));
        assert!(!is_e164("1234567890"));
        assert!(!is_e164("+12"));
        assert!(!is_e164("+1234567890123456"));
        assert!(!is_e164(""));
    }
}
