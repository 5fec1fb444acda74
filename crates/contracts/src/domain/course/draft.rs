//! Course create/edit form model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::aggregate::{Course, CourseStatus, DifficultyLevel};
use crate::shared::numeric::parse_leading_f64;
use crate::shared::validation::{validate, FieldRule, FieldRuleSet, ValidationResult};

/// Raw form state; numeric inputs stay text until submit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseDraft {
    pub title: String,
    pub description: String,
    pub price: String,
    pub category: String,
    pub difficulty_level: DifficultyLevel,
    pub duration_weeks: String,
    pub max_students: String,
    pub status: CourseStatus,
}

impl Default for CourseDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            price: "0".to_string(),
            category: String::new(),
            difficulty_level: DifficultyLevel::Beginner,
            duration_weeks: "1".to_string(),
            max_students: "50".to_string(),
            status: CourseStatus::Draft,
        }
    }
}

/// Body for `POST /courses/courses/` and `PATCH /courses/courses/{id}/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoursePayload {
    pub title: String,
    pub description: String,
    pub category: i64,
    pub difficulty_level: DifficultyLevel,
    pub duration_weeks: u32,
    pub max_students: u32,
    pub price: String,
    pub status: CourseStatus,
}

impl CoursePayload {
    /// Text parts of the multipart body sent when a thumbnail file is attached.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("title", self.title.clone()),
            ("description", self.description.clone()),
            ("category", self.category.to_string()),
            ("difficulty_level", self.difficulty_level.as_str().to_string()),
            ("duration_weeks", self.duration_weeks.to_string()),
            ("max_students", self.max_students.to_string()),
            ("price", self.price.clone()),
            ("status", self.status.as_str().to_string()),
        ]
    }
}

/// Body for the publish toggle: only the status goes over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CourseStatusPatch {
    pub status: CourseStatus,
}

fn positive_integer(label: &'static str) -> impl Fn(&str) -> Option<String> + Send + Sync {
    move |value: &str| match value.trim().parse::<u32>() {
        Ok(n) if n >= 1 => None,
        _ => Some(format!("{} must be a whole number of at least 1", label)),
    }
}

fn non_negative_price(value: &str) -> Option<String> {
    let trimmed = value.trim();
    match trimmed.parse::<f64>() {
        Ok(price) if price.is_finite() && price >= 0.0 => None,
        _ => Some("Price must be a number of 0 or more".to_string()),
    }
}

/// Rules for the course form.
pub fn course_rules() -> FieldRuleSet {
    FieldRuleSet::new()
        .field("title", FieldRule::required("Title is required"))
        .field("description", FieldRule::required("Description is required"))
        .field(
            "price",
            FieldRule::required("Price is required").with_check(non_negative_price),
        )
        .field(
            "category",
            FieldRule::required("Please select a category").with_check(|v| {
                v.trim()
                    .parse::<i64>()
                    .err()
                    .map(|_| "Please select a category".to_string())
            }),
        )
        .field(
            "duration_weeks",
            FieldRule::required("Duration is required").with_check(positive_integer("Duration")),
        )
        .field(
            "max_students",
            FieldRule::required("Maximum students is required")
                .with_check(positive_integer("Maximum students")),
        )
}

impl CourseDraft {
    /// Prefill for edit mode, with the same fallbacks the empty form uses.
    pub fn from_course(course: &Course) -> Self {
        let defaults = Self::default();
        Self {
            title: course.title.clone().unwrap_or_default(),
            description: course.description.clone().unwrap_or_default(),
            price: course
                .price
                .as_ref()
                .and_then(|p| p.as_f64())
                .map(|p| format!("{:.2}", p))
                .unwrap_or(defaults.price),
            category: course.category.map(|c| c.to_string()).unwrap_or_default(),
            difficulty_level: course.level().unwrap_or_default(),
            duration_weeks: course
                .duration_weeks
                .map(|w| w.to_string())
                .unwrap_or(defaults.duration_weeks),
            max_students: course
                .max_students
                .map(|m| m.to_string())
                .unwrap_or(defaults.max_students),
            status: course.status,
        }
    }

    pub fn values(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("title".to_string(), self.title.clone()),
            ("description".to_string(), self.description.clone()),
            ("price".to_string(), self.price.clone()),
            ("category".to_string(), self.category.clone()),
            ("duration_weeks".to_string(), self.duration_weeks.clone()),
            ("max_students".to_string(), self.max_students.clone()),
        ])
    }

    pub fn validate(&self) -> ValidationResult {
        validate(&self.values(), &course_rules())
    }

    /// Validated request body, or the validation errors.
    pub fn to_payload(&self) -> Result<CoursePayload, ValidationResult> {
        let result = self.validate();
        if !result.is_valid {
            return Err(result);
        }
        let invalid = || result.clone();
        let price = parse_leading_f64(&self.price).ok_or_else(invalid)?;
        Ok(CoursePayload {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            category: self.category.trim().parse().map_err(|_| invalid())?,
            difficulty_level: self.difficulty_level,
            duration_weeks: self.duration_weeks.trim().parse().map_err(|_| invalid())?,
            max_students: self.max_students.trim().parse().map_err(|_| invalid())?,
            price: format!("{:.2}", price),
            status: self.status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::course::aggregate::test_course;
    use crate::shared::numeric::LooseNumber;

    fn filled() -> CourseDraft {
        CourseDraft {
            title: "Rust Basics".to_string(),
            description: "Ownership and borrowing".to_string(),
            price: "19.5".to_string(),
            category: "3".to_string(),
            ..CourseDraft::default()
        }
    }

    #[test]
    fn test_default_draft_misses_required_text() {
        let result = CourseDraft::default().validate();
        assert_eq!(result.error("title"), Some("Title is required"));
        assert_eq!(result.error("description"), Some("Description is required"));
        assert_eq!(result.error("category"), Some("Please select a category"));
        assert_eq!(result.error("price"), None);
        assert_eq!(result.error("duration_weeks"), None);
    }

    #[test]
    fn test_numeric_checks() {
        let mut draft = filled();
        draft.price = "-1".to_string();
        draft.duration_weeks = "0".to_string();
        draft.max_students = "many".to_string();
        let result = draft.validate();
        assert_eq!(result.error("price"), Some("Price must be a number of 0 or more"));
        assert_eq!(
            result.error("duration_weeks"),
            Some("Duration must be a whole number of at least 1")
        );
        assert_eq!(
            result.error("max_students"),
            Some("Maximum students must be a whole number of at least 1")
        );
    }

    #[test]
    fn test_payload() {
        let payload = filled().to_payload().unwrap();
        assert_eq!(payload.price, "19.50");
        assert_eq!(payload.category, 3);
        assert_eq!(payload.duration_weeks, 1);
        assert_eq!(payload.max_students, 50);
        assert_eq!(payload.status, CourseStatus::Draft);
        assert!(CourseDraft::default().to_payload().is_err());
    }

    #[test]
    fn test_status_patch_carries_only_status() {
        let body = serde_json::to_value(CourseStatusPatch { status: CourseStatus::Published }).unwrap();
        assert_eq!(body, serde_json::json!({"status": "published"}));
    }

    #[test]
    fn test_form_fields() {
        let fields = filled().to_payload().unwrap().form_fields();
        let get = |name: &str| fields.iter().find(|(n, _)| *n == name).map(|(_, v)| v.as_str());
        assert_eq!(fields.len(), 8);
        assert_eq!(get("category"), Some("3"));
        assert_eq!(get("price"), Some("19.50"));
        assert_eq!(get("difficulty_level"), Some("beginner"));
        assert_eq!(get("status"), Some("draft"));
        assert_eq!(get("thumbnail"), None);
    }

    #[test]
    fn test_from_course() {
        let mut course = test_course(5, None);
        course.title = Some("Edit me".to_string());
        course.price = Some(LooseNumber::from("12"));
        course.category = Some(2);
        course.difficulty_level = Some("advanced".to_string());
        course.duration_weeks = Some(6);
        let draft = CourseDraft::from_course(&course);
        assert_eq!(draft.title, "Edit me");
        assert_eq!(draft.price, "12.00");
        assert_eq!(draft.category, "2");
        assert_eq!(draft.difficulty_level, DifficultyLevel::Advanced);
        assert_eq!(draft.duration_weeks, "6");
        assert_eq!(draft.max_students, "50");
        assert_eq!(draft.status, CourseStatus::Published);
    }
}
