//! Catalogue browsing: search, filter and sort over loaded courses.

use serde::{Deserialize, Serialize};

use super::aggregate::Course;
use crate::shared::ranking::{sort_desc_by, top_n};

/// Number of courses shown in the student dashboard carousel.
pub const FEATURED_COUNT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseSort {
    #[default]
    Newest,
    Popular,
    Rating,
}

impl CourseSort {
    pub const ALL: [CourseSort; 3] = [CourseSort::Newest, CourseSort::Popular, CourseSort::Rating];

    pub fn as_str(&self) -> &'static str {
        match self {
            CourseSort::Newest => "newest",
            CourseSort::Popular => "popular",
            CourseSort::Rating => "rating",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CourseSort::Newest => "Newest",
            CourseSort::Popular => "Most Popular",
            CourseSort::Rating => "Highest Rated",
        }
    }

    pub fn parse(value: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|sort| sort.as_str() == value)
            .unwrap_or_default()
    }

    fn field(&self) -> &'static str {
        match self {
            CourseSort::Newest => "id",
            CourseSort::Popular => "current_students",
            CourseSort::Rating => "rating",
        }
    }
}

/// Catalogue filter. `None` for level/category means "all".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CourseFilter {
    pub search: String,
    pub level: Option<String>,
    pub category: Option<i64>,
}

impl CourseFilter {
    pub fn matches(&self, course: &Course) -> bool {
        self.matches_search(course) && self.matches_level(course) && self.matches_category(course)
    }

    fn matches_search(&self, course: &Course) -> bool {
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        let title_hit = course
            .title
            .as_deref()
            .is_some_and(|t| t.to_lowercase().contains(&needle));
        let teacher_hit = course
            .teacher_name
            .as_deref()
            .is_some_and(|t| t.to_lowercase().contains(&needle));
        title_hit || teacher_hit
    }

    fn matches_level(&self, course: &Course) -> bool {
        match self.level.as_deref() {
            None | Some("all") => true,
            Some(level) => course
                .difficulty_level
                .as_deref()
                .is_some_and(|l| l.eq_ignore_ascii_case(level)),
        }
    }

    fn matches_category(&self, course: &Course) -> bool {
        match self.category {
            None => true,
            Some(category) => course.category == Some(category),
        }
    }
}

/// Filtered and sorted copy of `courses`.
pub fn browse(courses: &[Course], filter: &CourseFilter, sort: CourseSort) -> Vec<Course> {
    let mut result: Vec<Course> = courses
        .iter()
        .filter(|course| filter.matches(course))
        .cloned()
        .collect();
    sort_desc_by(&mut result, sort.field());
    result
}

/// Highest rated courses for the dashboard carousel.
pub fn featured(courses: &[Course]) -> Vec<Course> {
    top_n(courses, "rating", FEATURED_COUNT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::course::aggregate::test_course;
    use crate::shared::numeric::LooseNumber;

    fn catalog() -> Vec<Course> {
        let mut a = test_course(1, Some(LooseNumber::from("4.8")));
        a.title = Some("Intro to Rust".to_string());
        a.teacher_name = Some("Ferris Crab".to_string());
        a.difficulty_level = Some("beginner".to_string());
        a.category = Some(1);
        a.current_students = Some(30);

        let mut b = test_course(2, Some(LooseNumber::from(3.9)));
        b.title = Some("Async Deep Dive".to_string());
        b.teacher_name = Some("Tokio Team".to_string());
        b.difficulty_level = Some("Advanced".to_string());
        b.category = Some(2);
        b.current_students = Some(80);

        let mut c = test_course(3, None);
        c.title = Some("Web with Leptos".to_string());
        c.difficulty_level = Some("intermediate".to_string());
        c.category = Some(1);

        vec![a, b, c]
    }

    fn ids(courses: &[Course]) -> Vec<i64> {
        courses.iter().map(|c| c.id).collect()
    }

    #[test]
    fn test_sort_orders() {
        let all = CourseFilter::default();
        assert_eq!(ids(&browse(&catalog(), &all, CourseSort::Newest)), vec![3, 2, 1]);
        assert_eq!(ids(&browse(&catalog(), &all, CourseSort::Popular)), vec![2, 1, 3]);
        assert_eq!(ids(&browse(&catalog(), &all, CourseSort::Rating)), vec![1, 2, 3]);
    }

    #[test]
    fn test_search_matches_title_or_teacher() {
        let filter = CourseFilter {
            search: "tokio".to_string(),
            ..CourseFilter::default()
        };
        assert_eq!(ids(&browse(&catalog(), &filter, CourseSort::Newest)), vec![2]);
        let filter = CourseFilter {
            search: "  RUST ".to_string(),
            ..CourseFilter::default()
        };
        assert_eq!(ids(&browse(&catalog(), &filter, CourseSort::Newest)), vec![1]);
    }

    #[test]
    fn test_level_and_category() {
        let filter = CourseFilter {
            level: Some("advanced".to_string()),
            ..CourseFilter::default()
        };
        assert_eq!(ids(&browse(&catalog(), &filter, CourseSort::Newest)), vec![2]);
        let filter = CourseFilter {
            category: Some(1),
            level: Some("all".to_string()),
            ..CourseFilter::default()
        };
        assert_eq!(ids(&browse(&catalog(), &filter, CourseSort::Newest)), vec![3, 1]);
    }

    #[test]
    fn test_featured_takes_top_rated() {
        let mut many = Vec::new();
        for id in 0..15 {
            many.push(test_course(id, Some(LooseNumber::from(id as f64 / 3.0))));
        }
        let top = featured(&many);
        assert_eq!(top.len(), FEATURED_COUNT);
        assert_eq!(top[0].id, 14);
        assert_eq!(top[9].id, 5);
    }

    #[test]
    fn test_sort_parse() {
        assert_eq!(CourseSort::parse("popular"), CourseSort::Popular);
        assert_eq!(CourseSort::parse("whatever"), CourseSort::Newest);
    }
}
