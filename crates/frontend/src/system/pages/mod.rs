pub mod login;
pub mod profile;
pub mod register;

use contracts::shared::validation::ValidationResult;
use leptos::prelude::*;

/// Drops `field`'s error whenever `value` changes after the first run.
pub(crate) fn clear_on_input<T>(value: RwSignal<T>, errors: RwSignal<ValidationResult>, field: &'static str)
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    Effect::new(move |prev: Option<T>| {
        let current = value.get();
        if prev.is_some_and(|p| p != current) {
            errors.update(|e| *e = e.clear_field(field));
        }
        current
    });
}

pub(crate) fn field_error(errors: RwSignal<ValidationResult>, field: &'static str) -> Signal<Option<String>> {
    Signal::derive(move || errors.with(|e| e.error(field).map(str::to_string)))
}
