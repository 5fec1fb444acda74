use crate::shared::icons::icon;
use leptos::prelude::*;
use thaw::*;

/// `12345` -> `"12,345"`
pub fn format_count(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

#[component]
pub fn StatCard(
    /// Label displayed under the value
    label: &'static str,
    /// Icon name from the icon() helper
    icon_name: &'static str,
    value: u64,
) -> impl IntoView {
    view! {
        <Card>
            <div class="stat-card">
                <span class="stat-card__icon">{icon(icon_name)}</span>
                <span class="stat-card__value">{format_count(value)}</span>
                <span class="stat-card__label">{label}</span>
            </div>
        </Card>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
    }
}
