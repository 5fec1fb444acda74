use serde::{Deserialize, Serialize};

use super::lesson::Lesson;
use crate::shared::numeric::{coerce_or_zero, format_price, LooseNumber};
use crate::shared::ranking::NumericFields;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

impl CourseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseStatus::Draft => "draft",
            CourseStatus::Published => "published",
            CourseStatus::Archived => "archived",
        }
    }

    /// Publish toggle used by the teacher list: published <-> draft.
    pub fn toggled(&self) -> Self {
        match self {
            CourseStatus::Published => CourseStatus::Draft,
            CourseStatus::Draft | CourseStatus::Archived => CourseStatus::Published,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl DifficultyLevel {
    pub const ALL: [DifficultyLevel; 3] = [
        DifficultyLevel::Beginner,
        DifficultyLevel::Intermediate,
        DifficultyLevel::Advanced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyLevel::Beginner => "beginner",
            DifficultyLevel::Intermediate => "intermediate",
            DifficultyLevel::Advanced => "advanced",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DifficultyLevel::Beginner => "Beginner",
            DifficultyLevel::Intermediate => "Intermediate",
            DifficultyLevel::Advanced => "Advanced",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

/// `teacher` is a bare id on course lists and a nested profile on enrollments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TeacherRef {
    Id(i64),
    Profile(TeacherProfile),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeacherProfile {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub teacher: Option<TeacherRef>,
    #[serde(default)]
    pub teacher_name: Option<String>,
    #[serde(default)]
    pub category: Option<i64>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub difficulty_level: Option<String>,
    #[serde(default)]
    pub duration_weeks: Option<u32>,
    #[serde(default)]
    pub max_students: Option<u32>,
    #[serde(default)]
    pub current_students: Option<u32>,
    #[serde(default)]
    pub status: CourseStatus,
    #[serde(default)]
    pub price: Option<LooseNumber>,
    #[serde(default)]
    pub rating: Option<LooseNumber>,
    #[serde(default)]
    pub is_enrolled: bool,
    #[serde(default)]
    pub enrollment_status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    /// Present on the detail endpoint only.
    #[serde(default)]
    pub lessons: Vec<Lesson>,
}

impl Course {
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or("Untitled Course")
    }

    /// Teacher name from the flat field, then the nested profile.
    pub fn display_teacher(&self) -> Option<&str> {
        let nested = match &self.teacher {
            Some(TeacherRef::Profile(p)) => p
                .name
                .as_deref()
                .or(p.full_name.as_deref())
                .or(p.username.as_deref()),
            _ => None,
        };
        self.teacher_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .or(nested.filter(|n| !n.trim().is_empty()))
    }

    pub fn rating_value(&self) -> f64 {
        coerce_or_zero(self.rating.as_ref())
    }

    pub fn price_value(&self) -> f64 {
        coerce_or_zero(self.price.as_ref())
    }

    pub fn price_label(&self) -> String {
        format_price(self.price.as_ref())
    }

    /// Whole stars out of five for the rating widget.
    pub fn filled_stars(&self) -> usize {
        self.rating_value().clamp(0.0, 5.0).floor() as usize
    }

    pub fn level(&self) -> Option<DifficultyLevel> {
        self.difficulty_level.as_deref().and_then(DifficultyLevel::parse)
    }

    pub fn is_published(&self) -> bool {
        self.status == CourseStatus::Published
    }
}

impl NumericFields for Course {
    fn numeric_field(&self, field: &str) -> f64 {
        match field {
            "id" => self.id as f64,
            "rating" => self.rating_value(),
            "price" => self.price_value(),
            "current_students" => f64::from(self.current_students.unwrap_or(0)),
            "duration_weeks" => f64::from(self.duration_weeks.unwrap_or(0)),
            "max_students" => f64::from(self.max_students.unwrap_or(0)),
            _ => 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub course_count: Option<u32>,
}

#[cfg(test)]
pub(crate) fn test_course(id: i64, rating: Option<LooseNumber>) -> Course {
    Course {
        id,
        title: Some(format!("Course {}", id)),
        description: None,
        teacher: None,
        teacher_name: None,
        category: None,
        category_name: None,
        thumbnail: None,
        difficulty_level: None,
        duration_weeks: None,
        max_students: None,
        current_students: None,
        status: CourseStatus::Published,
        price: None,
        rating,
        is_enrolled: false,
        enrollment_status: None,
        created_at: None,
        lessons: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_response::normalize;
    use crate::shared::ranking::top_n;
    use serde_json::json;

    #[test]
    fn test_course_from_api_body() {
        let course: Course = serde_json::from_value(json!({
            "id": 3,
            "title": "Rust for the Web",
            "teacher": 9,
            "teacher_name": "Grace Hopper",
            "category": 2,
            "difficulty_level": "Intermediate",
            "status": "published",
            "price": "49.90",
            "rating": "4.50",
            "current_students": 12
        }))
        .unwrap();
        assert_eq!(course.price_label(), "$49.90");
        assert_eq!(course.rating_value(), 4.5);
        assert_eq!(course.filled_stars(), 4);
        assert_eq!(course.level(), Some(DifficultyLevel::Intermediate));
        assert_eq!(course.display_teacher(), Some("Grace Hopper"));
        assert!(course.is_published());
    }

    #[test]
    fn test_course_defaults_for_missing_fields() {
        let course: Course = serde_json::from_value(json!({"id": 1})).unwrap();
        assert_eq!(course.display_title(), "Untitled Course");
        assert_eq!(course.price_label(), "$0.00");
        assert_eq!(course.status, CourseStatus::Draft);
        assert_eq!(course.display_teacher(), None);
    }

    #[test]
    fn test_nested_teacher_profile() {
        let course: Course = serde_json::from_value(json!({
            "id": 1,
            "teacher": {"id": 4, "username": "hopper"}
        }))
        .unwrap();
        assert_eq!(course.display_teacher(), Some("hopper"));
    }

    #[test]
    fn test_normalize_then_rank_courses() {
        let courses: Vec<Course> = normalize(json!({
            "count": 3,
            "results": [
                {"id": 1, "rating": "3"},
                {"id": 2, "rating": 5},
                {"id": 3, "rating": null}
            ]
        }));
        let top: Vec<i64> = top_n(&courses, "rating", 2).iter().map(|c| c.id).collect();
        assert_eq!(top, vec![2, 1]);
    }

    #[test]
    fn test_detail_body_carries_lessons() {
        let course: Course = serde_json::from_value(json!({
            "id": 2,
            "lessons": [{"id": 8, "title": "Setup", "order": 1, "is_published": true}]
        }))
        .unwrap();
        assert_eq!(course.lessons.len(), 1);
        assert_eq!(course.lessons[0].title, "Setup");
    }

    #[test]
    fn test_status_toggle() {
        assert_eq!(CourseStatus::Published.toggled(), CourseStatus::Draft);
        assert_eq!(CourseStatus::Draft.toggled(), CourseStatus::Published);
    }
}
