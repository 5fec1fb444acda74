use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;
use std::sync::Arc;

use serde::Serialize;

/// Format check for a single field: `Some(message)` when the value is invalid.
pub type FieldCheck = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Rule for one form field.
#[derive(Clone, Default)]
pub struct FieldRule {
    pub required: bool,
    pub required_message: Option<String>,
    pub check: Option<FieldCheck>,
}

impl FieldRule {
    /// Required field with its own "missing" message.
    pub fn required(message: impl Into<String>) -> Self {
        Self {
            required: true,
            required_message: Some(message.into()),
            check: None,
        }
    }

    /// Required field using the generated `"<field> is required"` message.
    pub fn required_default() -> Self {
        Self {
            required: true,
            ..Self::default()
        }
    }

    pub fn optional() -> Self {
        Self::default()
    }

    pub fn with_check<F>(mut self, check: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.check = Some(Arc::new(check));
        self
    }
}

impl fmt::Debug for FieldRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRule")
            .field("required", &self.required)
            .field("required_message", &self.required_message)
            .field("check", &self.check.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// Ordered set of field rules for one form.
#[derive(Clone, Debug, Default)]
pub struct FieldRuleSet {
    rules: Vec<(String, FieldRule)>,
}

impl FieldRuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the rule for `name`, replacing an earlier rule for the same field.
    pub fn field(mut self, name: impl Into<String>, rule: FieldRule) -> Self {
        let name = name.into();
        match self.rules.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = rule,
            None => self.rules.push((name, rule)),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldRule> {
        self.rules
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, rule)| rule)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldRule)> {
        self.rules.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Source of raw field values. Missing fields read as the empty string.
pub trait FormValues {
    fn value(&self, field: &str) -> Option<&str>;
}

impl<S: BuildHasher> FormValues for HashMap<String, String, S> {
    fn value(&self, field: &str) -> Option<&str> {
        self.get(field).map(String::as_str)
    }
}

impl FormValues for BTreeMap<String, String> {
    fn value(&self, field: &str) -> Option<&str> {
        self.get(field).map(String::as_str)
    }
}

impl FormValues for [(&str, &str)] {
    fn value(&self, field: &str) -> Option<&str> {
        self.iter().find(|(name, _)| *name == field).map(|(_, v)| *v)
    }
}

/// Outcome of one validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: BTreeMap<String, String>,
}

impl ValidationResult {
    pub fn from_errors(errors: BTreeMap<String, String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    pub fn valid() -> Self {
        Self::from_errors(BTreeMap::new())
    }

    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Copy without the error for `field` (the user started typing there).
    pub fn clear_field(&self, field: &str) -> Self {
        let mut errors = self.errors.clone();
        errors.remove(field);
        Self::from_errors(errors)
    }

    /// Copy keeping only errors for the given fields (fields the user touched).
    pub fn restricted_to<'a, I>(&self, fields: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let keep: Vec<&str> = fields.into_iter().collect();
        let errors = self
            .errors
            .iter()
            .filter(|(field, _)| keep.contains(&field.as_str()))
            .map(|(field, message)| (field.clone(), message.clone()))
            .collect();
        Self::from_errors(errors)
    }
}

/// Evaluate every field declared in `rules` against `values`.
///
/// A required field that is blank after trimming gets its required message and
/// skips its format check. Fields present only in `values` are ignored.
pub fn validate<V: FormValues + ?Sized>(values: &V, rules: &FieldRuleSet) -> ValidationResult {
    let mut errors = BTreeMap::new();

    for (field, rule) in rules.iter() {
        let value = values.value(field).unwrap_or("");

        if rule.required && value.trim().is_empty() {
            let message = rule
                .required_message
                .clone()
                .unwrap_or_else(|| format!("{} is required", field));
            errors.insert(field.to_string(), message);
            continue;
        }

        if let Some(check) = &rule.check {
            if let Some(message) = check(value).filter(|m| !m.is_empty()) {
                errors.insert(field.to_string(), message);
            }
        }
    }

    ValidationResult::from_errors(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::validation::rules::password_rule;

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_required_message() {
        let rules = FieldRuleSet::new().field("email", FieldRule::required("Email is required"));
        let result = validate(&values(&[("email", "")]), &rules);
        assert!(!result.is_valid);
        assert_eq!(result.error("email"), Some("Email is required"));
        assert_eq!(result.errors.len(), 1);
    }

    #[test]
    fn test_default_required_message_and_missing_value() {
        let rules = FieldRuleSet::new().field("title", FieldRule::required_default());
        let result = validate(&values(&[]), &rules);
        assert_eq!(result.error("title"), Some("title is required"));
    }

    #[test]
    fn test_blank_required_skips_check() {
        let rules = FieldRuleSet::new().field(
            "name",
            FieldRule::required("Name is required").with_check(|_| Some("never".to_string())),
        );
        let result = validate(&values(&[("name", "   ")]), &rules);
        assert_eq!(result.error("name"), Some("Name is required"));
    }

    #[test]
    fn test_check_runs_on_raw_value() {
        let rules = FieldRuleSet::new().field(
            "code",
            FieldRule::required("Code is required").with_check(|v| {
                if v.starts_with(' ') {
                    Some("No leading spaces".to_string())
                } else {
                    None
                }
            }),
        );
        let result = validate(&values(&[("code", " A1")]), &rules);
        assert_eq!(result.error("code"), Some("No leading spaces"));
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let rules = FieldRuleSet::new().field("email", FieldRule::required("Email is required"));
        let result = validate(&values(&[("email", "a@b.com"), ("extra", "")]), &rules);
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_empty_check_message_is_no_error() {
        let rules = FieldRuleSet::new().field("x", FieldRule::optional().with_check(|_| Some(String::new())));
        assert!(validate(&values(&[("x", "1")]), &rules).is_valid);
    }

    #[test]
    fn test_password_rule_reports_length_first() {
        let rules = FieldRuleSet::new().field("password", password_rule());
        let result = validate(&values(&[("password", "abc")]), &rules);
        assert_eq!(
            result.error("password"),
            Some("Password must be at least 8 characters long")
        );
    }

    #[test]
    fn test_validate_is_repeatable() {
        let rules = FieldRuleSet::new()
            .field("email", FieldRule::required("Email is required"))
            .field("password", password_rule());
        let input = values(&[("email", ""), ("password", "short")]);
        assert_eq!(validate(&input, &rules), validate(&input, &rules));
    }

    #[test]
    fn test_field_replaces_previous_rule() {
        let rules = FieldRuleSet::new()
            .field("a", FieldRule::required("first"))
            .field("a", FieldRule::required("second"));
        assert_eq!(rules.len(), 1);
        let result = validate(&values(&[]), &rules);
        assert_eq!(result.error("a"), Some("second"));
    }

    #[test]
    fn test_clear_and_restrict() {
        let rules = FieldRuleSet::new()
            .field("a", FieldRule::required("A"))
            .field("b", FieldRule::required("B"));
        let result = validate(&values(&[]), &rules);
        let cleared = result.clear_field("a");
        assert_eq!(cleared.error("a"), None);
        assert!(!cleared.is_valid);
        let touched = result.restricted_to(["b"]);
        assert_eq!(touched.errors.len(), 1);
        assert!(result.clear_field("a").clear_field("b").is_valid);
    }

    #[test]
    fn test_slice_values() {
        let rules = FieldRuleSet::new().field("a", FieldRule::required("A"));
        let input: &[(&str, &str)] = &[("a", "x")];
        assert!(validate(input, &rules).is_valid);
    }
}
