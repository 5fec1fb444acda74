//! Student enrollments and the flattened "my courses" view.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use super::aggregate::{Course, TeacherRef};
use crate::shared::numeric::{coerce_or_zero, LooseNumber};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: i64,
    #[serde(default)]
    pub course: Option<Course>,
    #[serde(default)]
    pub progress_percentage: Option<LooseNumber>,
    #[serde(default)]
    pub enrolled_at: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
}

/// One row of the student's course list.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrolledCourse {
    pub course: Course,
    pub title: String,
    pub teacher_name: String,
    pub progress: f64,
    pub enrollment_id: i64,
    pub enrolled_at: Option<String>,
    pub enrollment_status: Option<String>,
    pub completed_at: Option<String>,
}

impl EnrolledCourse {
    pub fn from_enrollment(enrollment: Enrollment) -> Option<Self> {
        let course = enrollment.course?;
        let title = course.display_title().to_string();
        let teacher_name = teacher_name(&course);
        Some(Self {
            title,
            teacher_name,
            progress: coerce_or_zero(enrollment.progress_percentage.as_ref()).clamp(0.0, 100.0),
            enrollment_id: enrollment.id,
            enrolled_at: enrollment.enrolled_at,
            enrollment_status: enrollment.status,
            completed_at: enrollment.completed_at,
            course,
        })
    }

    /// Calendar date of enrollment, when the timestamp parses.
    pub fn enrolled_on(&self) -> Option<NaiveDate> {
        let raw = self.enrolled_at.as_deref()?;
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.date_naive())
            .ok()
            .or_else(|| NaiveDate::parse_from_str(raw.get(..10)?, "%Y-%m-%d").ok())
    }

    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some() || self.enrollment_status.as_deref() == Some("completed")
    }
}

fn teacher_name(course: &Course) -> String {
    if let Some(name) = course.teacher_name.as_deref().filter(|n| !n.trim().is_empty()) {
        return name.to_string();
    }
    if let Some(TeacherRef::Profile(profile)) = &course.teacher {
        let nested = profile
            .name
            .as_deref()
            .or(profile.full_name.as_deref())
            .or(profile.username.as_deref());
        if let Some(name) = nested.filter(|n| !n.trim().is_empty()) {
            return name.to_string();
        }
    }
    "Unknown Teacher".to_string()
}

/// Flatten enrollments, dropping (and reporting) rows without course data.
pub fn enrolled_courses(enrollments: Vec<Enrollment>) -> Vec<EnrolledCourse> {
    enrollments
        .into_iter()
        .filter_map(|enrollment| {
            let id = enrollment.id;
            let row = EnrolledCourse::from_enrollment(enrollment);
            if row.is_none() {
                log::warn!("enrollment {} has no course data", id);
            }
            row
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_response::normalize;
    use serde_json::json;

    #[test]
    fn test_flatten_enrollments() {
        let enrollments: Vec<Enrollment> = normalize(json!({
            "results": [
                {
                    "id": 10,
                    "course": {"id": 1, "title": "Rust", "teacher": {"full_name": "Ada L"}},
                    "progress_percentage": "42.50",
                    "enrolled_at": "2024-03-15T14:02:26.123Z",
                    "status": "active"
                },
                {"id": 11, "course": null},
                {"id": 12, "course": {"id": 2}}
            ]
        }));
        let rows = enrolled_courses(enrollments);
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].course.id, 1);
        assert_eq!(rows[0].enrollment_id, 10);
        assert_eq!(rows[0].teacher_name, "Ada L");
        assert_eq!(rows[0].progress, 42.5);
        assert_eq!(
            rows[0].enrolled_on(),
            NaiveDate::from_ymd_opt(2024, 3, 15)
        );
        assert!(!rows[0].is_completed());

        assert_eq!(rows[1].title, "Untitled Course");
        assert_eq!(rows[1].teacher_name, "Unknown Teacher");
        assert_eq!(rows[1].progress, 0.0);
        assert_eq!(rows[1].enrolled_on(), None);
    }
}
