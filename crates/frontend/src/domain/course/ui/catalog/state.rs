use contracts::domain::course::catalog::{CourseFilter, CourseSort};
use contracts::domain::course::{Category, Course, DifficultyLevel};
use leptos::prelude::*;

use crate::shared::load_state::LoadState;

/// Select value meaning "no restriction".
pub const ALL: &str = "all";

/// Filter controls of the catalogue page. `search` is the debounced copy of
/// what the user typed into `search_input`.
#[derive(Clone, Copy)]
pub struct CatalogState {
    pub courses: RwSignal<LoadState<Vec<Course>>>,
    pub categories: RwSignal<Vec<Category>>,
    pub search_input: RwSignal<String>,
    pub search: RwSignal<String>,
    pub level: RwSignal<String>,
    pub category: RwSignal<String>,
    pub sort: RwSignal<String>,
}

impl CatalogState {
    pub fn new(initial_search: String) -> Self {
        Self {
            courses: RwSignal::new(LoadState::Loading),
            categories: RwSignal::new(Vec::new()),
            search_input: RwSignal::new(initial_search.clone()),
            search: RwSignal::new(initial_search),
            level: RwSignal::new(ALL.to_string()),
            category: RwSignal::new(ALL.to_string()),
            sort: RwSignal::new(CourseSort::default().as_str().to_string()),
        }
    }

    pub fn filter(&self) -> CourseFilter {
        to_filter(&self.search.get(), &self.level.get(), &self.category.get())
    }

    pub fn sort_order(&self) -> CourseSort {
        CourseSort::parse(&self.sort.get())
    }

    pub fn reset(&self) {
        self.search_input.set(String::new());
        self.search.set(String::new());
        self.level.set(ALL.to_string());
        self.category.set(ALL.to_string());
    }
}

/// Select values to a filter; unknown values widen to "all".
pub fn to_filter(search: &str, level: &str, category: &str) -> CourseFilter {
    CourseFilter {
        search: search.to_string(),
        level: DifficultyLevel::parse(level).map(|l| l.as_str().to_string()),
        category: category.parse::<i64>().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_filter_all() {
        let filter = to_filter("", ALL, ALL);
        assert_eq!(filter, CourseFilter::default());
    }

    #[test]
    fn test_to_filter_values() {
        let filter = to_filter("rust", "advanced", "3");
        assert_eq!(filter.search, "rust");
        assert_eq!(filter.level.as_deref(), Some("advanced"));
        assert_eq!(filter.category, Some(3));
    }
}
