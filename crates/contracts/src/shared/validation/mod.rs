//! Client-side form validation.
//!
//! [`form`] is the declarative engine used by every form. [`rules`] holds the
//! reusable field checks (email, password strength). [`registration`] is the
//! narrower sign-up validator with the cross-field password confirmation.

pub mod form;
pub mod registration;
pub mod rules;

pub use form::{validate, FieldRule, FieldRuleSet, FormValues, ValidationResult};
