//! Lessons inside a course and the student's progress through them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::shared::numeric::LooseNumber;
use crate::shared::validation::{validate, FieldRule, FieldRuleSet, ValidationResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LessonType {
    Video,
    Live,
    #[default]
    Reading,
    Quiz,
}

impl LessonType {
    pub const ALL: [LessonType; 4] = [
        LessonType::Video,
        LessonType::Live,
        LessonType::Reading,
        LessonType::Quiz,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LessonType::Video => "video",
            LessonType::Live => "live",
            LessonType::Reading => "reading",
            LessonType::Quiz => "quiz",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LessonType::Video => "Video",
            LessonType::Live => "Live session",
            LessonType::Reading => "Reading",
            LessonType::Quiz => "Quiz",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub lesson_type: LessonType,
    #[serde(default)]
    pub order: u32,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub scheduled_at: Option<String>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Lesson {
    pub fn display_title(&self) -> &str {
        let title = self.title.trim();
        if title.is_empty() {
            "Untitled lesson"
        } else {
            title
        }
    }
}

/// Lessons in course order; ties keep server order.
pub fn sorted_lessons(mut lessons: Vec<Lesson>) -> Vec<Lesson> {
    lessons.sort_by_key(|l| l.order);
    lessons
}

/// Order for a lesson appended after `lessons`.
pub fn next_lesson_order(lessons: &[Lesson]) -> u32 {
    lessons.iter().map(|l| l.order).max().map_or(1, |max| max.saturating_add(1))
}

/// Raw add/edit lesson form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonDraft {
    pub title: String,
    pub description: String,
    pub lesson_type: LessonType,
    pub order: String,
    pub duration_minutes: String,
    pub content: String,
    pub video_url: String,
    pub is_published: bool,
}

impl Default for LessonDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            lesson_type: LessonType::Reading,
            order: "1".to_string(),
            duration_minutes: "30".to_string(),
            content: String::new(),
            video_url: String::new(),
            is_published: false,
        }
    }
}

/// Body for `POST /courses/courses/{id}/lessons/` and `PUT /courses/lessons/{id}/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonPayload {
    pub title: String,
    pub description: String,
    pub lesson_type: LessonType,
    pub order: u32,
    pub duration_minutes: u32,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    pub is_published: bool,
}

fn at_least_one(label: &'static str) -> impl Fn(&str) -> Option<String> + Send + Sync {
    move |value: &str| match value.trim().parse::<u32>() {
        Ok(n) if n >= 1 => None,
        _ => Some(format!("{} must be a whole number of at least 1", label)),
    }
}

fn optional_http_url(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() || value.starts_with("http://") || value.starts_with("https://") {
        None
    } else {
        Some("Video URL must start with http:// or https://".to_string())
    }
}

pub fn lesson_rules() -> FieldRuleSet {
    FieldRuleSet::new()
        .field("title", FieldRule::required("Lesson title is required"))
        .field("description", FieldRule::required("Lesson description is required"))
        .field(
            "order",
            FieldRule::required("Order is required").with_check(at_least_one("Order")),
        )
        .field(
            "duration_minutes",
            FieldRule::required("Duration is required").with_check(at_least_one("Duration")),
        )
        .field("video_url", FieldRule::optional().with_check(optional_http_url))
}

impl LessonDraft {
    pub fn from_lesson(lesson: &Lesson) -> Self {
        let defaults = Self::default();
        Self {
            title: lesson.title.clone(),
            description: lesson.description.clone(),
            lesson_type: lesson.lesson_type,
            order: lesson.order.max(1).to_string(),
            duration_minutes: lesson
                .duration_minutes
                .map(|d| d.to_string())
                .unwrap_or(defaults.duration_minutes),
            content: lesson.content.clone().unwrap_or_default(),
            video_url: lesson.video_url.clone().unwrap_or_default(),
            is_published: lesson.is_published,
        }
    }

    pub fn values(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("title".to_string(), self.title.clone()),
            ("description".to_string(), self.description.clone()),
            ("order".to_string(), self.order.clone()),
            ("duration_minutes".to_string(), self.duration_minutes.clone()),
            ("video_url".to_string(), self.video_url.clone()),
        ])
    }

    pub fn validate(&self) -> ValidationResult {
        validate(&self.values(), &lesson_rules())
    }

    pub fn to_payload(&self) -> Result<LessonPayload, ValidationResult> {
        let result = self.validate();
        if !result.is_valid {
            return Err(result);
        }
        let invalid = || result.clone();
        let video_url = Some(self.video_url.trim().to_string()).filter(|u| !u.is_empty());
        Ok(LessonPayload {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            lesson_type: self.lesson_type,
            order: self.order.trim().parse().map_err(|_| invalid())?,
            duration_minutes: self.duration_minutes.trim().parse().map_err(|_| invalid())?,
            content: self.content.clone(),
            video_url,
            is_published: self.is_published,
        })
    }
}

/// `GET /courses/courses/{id}/progress/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CourseProgress {
    #[serde(default)]
    pub total_lessons: u32,
    #[serde(default)]
    pub completed_lessons: u32,
    #[serde(default)]
    pub progress_percentage: Option<LooseNumber>,
    #[serde(default)]
    pub completed_lesson_ids: Vec<i64>,
}

impl CourseProgress {
    /// Percentage in `0..=100`; recomputed from the counts when the server
    /// sent none.
    pub fn percent(&self) -> f64 {
        let reported = self.progress_percentage.as_ref().and_then(LooseNumber::as_f64);
        let value = match reported {
            Some(p) => p,
            None if self.total_lessons > 0 => {
                f64::from(self.completed_lessons) / f64::from(self.total_lessons) * 100.0
            }
            None => 0.0,
        };
        value.clamp(0.0, 100.0)
    }

    pub fn is_completed(&self, lesson_id: i64) -> bool {
        self.completed_lesson_ids.contains(&lesson_id)
    }

    /// Local update after the server accepted a completion. Idempotent.
    pub fn mark_completed(&mut self, lesson_id: i64) {
        if self.is_completed(lesson_id) {
            return;
        }
        self.completed_lesson_ids.push(lesson_id);
        self.completed_lessons = self.completed_lessons.saturating_add(1);
        if self.total_lessons > 0 {
            let completed = self.completed_lessons.min(self.total_lessons);
            let percent = f64::from(completed) / f64::from(self.total_lessons) * 100.0;
            self.progress_percentage = Some(LooseNumber::from((percent * 100.0).round() / 100.0));
        }
    }

    pub fn remaining(&self) -> u32 {
        self.total_lessons.saturating_sub(self.completed_lessons)
    }
}

/// First lesson not yet completed, else the first lesson.
pub fn resume_lesson<'a>(lessons: &'a [Lesson], progress: &CourseProgress) -> Option<&'a Lesson> {
    lessons
        .iter()
        .find(|l| !progress.is_completed(l.id))
        .or_else(|| lessons.first())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn lesson(id: i64, order: u32) -> Lesson {
        serde_json::from_value(json!({"id": id, "title": format!("L{}", id), "order": order})).unwrap()
    }

    #[test]
    fn test_lesson_from_api_body() {
        let lesson: Lesson = serde_json::from_value(json!({
            "id": 4,
            "title": "Borrowing",
            "description": "References",
            "lesson_type": "video",
            "order": 2,
            "duration_minutes": 45,
            "video_url": "https://videos.example.com/4",
            "scheduled_at": null,
            "is_published": true
        }))
        .unwrap();
        assert_eq!(lesson.lesson_type, LessonType::Video);
        assert_eq!(lesson.duration_minutes, Some(45));
        assert!(lesson.is_published);

        let bare: Lesson = serde_json::from_value(json!({"id": 1})).unwrap();
        assert_eq!(bare.display_title(), "Untitled lesson");
        assert_eq!(bare.lesson_type, LessonType::Reading);
    }

    #[test]
    fn test_sorted_and_next_order() {
        let lessons = sorted_lessons(vec![lesson(1, 3), lesson(2, 1), lesson(3, 2)]);
        let ids: Vec<i64> = lessons.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
        assert_eq!(next_lesson_order(&lessons), 4);
        assert_eq!(next_lesson_order(&[]), 1);
    }

    #[test]
    fn test_draft_requires_title_and_description() {
        let result = LessonDraft::default().validate();
        assert_eq!(result.error("title"), Some("Lesson title is required"));
        assert_eq!(result.error("description"), Some("Lesson description is required"));
        assert_eq!(result.error("order"), None);
        assert_eq!(result.error("video_url"), None);
    }

    #[test]
    fn test_draft_numeric_and_url_checks() {
        let draft = LessonDraft {
            title: "Intro".to_string(),
            description: "Start here".to_string(),
            order: "0".to_string(),
            duration_minutes: "abc".to_string(),
            video_url: "ftp://example.com".to_string(),
            ..LessonDraft::default()
        };
        let result = draft.validate();
        assert_eq!(result.error("order"), Some("Order must be a whole number of at least 1"));
        assert_eq!(
            result.error("duration_minutes"),
            Some("Duration must be a whole number of at least 1")
        );
        assert_eq!(
            result.error("video_url"),
            Some("Video URL must start with http:// or https://")
        );
    }

    #[test]
    fn test_lesson_payload() {
        let draft = LessonDraft {
            title: " Intro ".to_string(),
            description: "Start here".to_string(),
            lesson_type: LessonType::Quiz,
            order: "3".to_string(),
            ..LessonDraft::default()
        };
        let payload = draft.to_payload().unwrap();
        assert_eq!(payload.title, "Intro");
        assert_eq!(payload.order, 3);
        assert_eq!(payload.duration_minutes, 30);
        let body = serde_json::to_value(&payload).unwrap();
        assert_eq!(body["lesson_type"], "quiz");
        assert!(body.get("video_url").is_none());
    }

    #[test]
    fn test_progress_percent_and_completion() {
        let mut progress: CourseProgress = serde_json::from_value(json!({
            "total_lessons": 4,
            "completed_lessons": 1,
            "progress_percentage": 25.0
        }))
        .unwrap();
        assert_eq!(progress.percent(), 25.0);
        assert_eq!(progress.remaining(), 3);

        progress.mark_completed(7);
        progress.mark_completed(7);
        assert_eq!(progress.completed_lessons, 2);
        assert_eq!(progress.percent(), 50.0);
        assert!(progress.is_completed(7));
    }

    #[test]
    fn test_progress_without_percentage_uses_counts() {
        let progress = CourseProgress {
            total_lessons: 3,
            completed_lessons: 3,
            ..CourseProgress::default()
        };
        assert_eq!(progress.percent(), 100.0);
        assert_eq!(CourseProgress::default().percent(), 0.0);
    }

    #[test]
    fn test_resume_lesson() {
        let lessons = vec![lesson(1, 1), lesson(2, 2)];
        let mut progress = CourseProgress::default();
        assert_eq!(resume_lesson(&lessons, &progress).map(|l| l.id), Some(1));
        progress.completed_lesson_ids = vec![1];
        assert_eq!(resume_lesson(&lessons, &progress).map(|l| l.id), Some(2));
        progress.completed_lesson_ids = vec![1, 2];
        assert_eq!(resume_lesson(&lessons, &progress).map(|l| l.id), Some(1));
        assert!(resume_lesson(&[], &progress).is_none());
    }
}
