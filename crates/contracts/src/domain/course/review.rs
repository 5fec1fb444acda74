//! Course reviews left by enrolled students.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::shared::validation::ValidationResult;
use crate::system::auth::UserInfo;

pub const RATING_RANGE: &str = "Please choose a rating from 1 to 5";
pub const COMMENT_TOO_LONG: &str = "Reviews are limited to 2000 characters";
const MAX_COMMENT_CHARS: usize = 2000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseReview {
    pub id: i64,
    #[serde(default)]
    pub student: Option<UserInfo>,
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl CourseReview {
    pub fn author(&self) -> String {
        self.student
            .as_ref()
            .map(UserInfo::display_name)
            .unwrap_or_else(|| "Anonymous student".to_string())
    }

    pub fn stars(&self) -> usize {
        usize::from(self.rating.min(5))
    }
}

/// Mean rating, `None` for no reviews.
pub fn average_rating(reviews: &[CourseReview]) -> Option<f64> {
    if reviews.is_empty() {
        return None;
    }
    let total: u32 = reviews.iter().map(|r| u32::from(r.rating.min(5))).sum();
    Some(f64::from(total) / reviews.len() as f64)
}

/// Whether `user` already reviewed; the API accepts one review per student.
pub fn has_reviewed(reviews: &[CourseReview], user_id: i64) -> bool {
    reviews
        .iter()
        .any(|r| r.student.as_ref().is_some_and(|s| s.id == user_id))
}

/// Review form state. `rating` 0 means "not chosen yet".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewDraft {
    pub rating: u8,
    pub comment: String,
}

/// Body for `POST /courses/courses/{id}/reviews/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewPayload {
    pub rating: u8,
    pub comment: String,
}

impl ReviewDraft {
    pub fn validate(&self) -> ValidationResult {
        let mut errors = BTreeMap::new();
        if !(1..=5).contains(&self.rating) {
            errors.insert("rating".to_string(), RATING_RANGE.to_string());
        }
        if self.comment.chars().count() > MAX_COMMENT_CHARS {
            errors.insert("comment".to_string(), COMMENT_TOO_LONG.to_string());
        }
        ValidationResult::from_errors(errors)
    }

    pub fn to_payload(&self) -> Result<ReviewPayload, ValidationResult> {
        let result = self.validate();
        if !result.is_valid {
            return Err(result);
        }
        Ok(ReviewPayload {
            rating: self.rating,
            comment: self.comment.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_response::normalize;
    use serde_json::json;

    fn reviews() -> Vec<CourseReview> {
        normalize(json!([
            {
                "id": 1,
                "student": {"id": 5, "email": "a@example.com", "first_name": "Ada"},
                "rating": 5,
                "comment": "Great"
            },
            {"id": 2, "rating": 2}
        ]))
    }

    #[test]
    fn test_reviews_from_api_body() {
        let list = reviews();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].author(), "Ada");
        assert_eq!(list[1].author(), "Anonymous student");
        assert_eq!(list[1].comment, "");
    }

    #[test]
    fn test_average_and_has_reviewed() {
        let list = reviews();
        assert_eq!(average_rating(&list), Some(3.5));
        assert_eq!(average_rating(&[]), None);
        assert!(has_reviewed(&list, 5));
        assert!(!has_reviewed(&list, 6));
    }

    #[test]
    fn test_draft_rating_bounds() {
        assert_eq!(ReviewDraft::default().validate().error("rating"), Some(RATING_RANGE));
        let six = ReviewDraft { rating: 6, comment: String::new() };
        assert_eq!(six.validate().error("rating"), Some(RATING_RANGE));

        let ok = ReviewDraft { rating: 4, comment: "  Solid course ".to_string() };
        let payload = ok.to_payload().unwrap();
        assert_eq!(payload, ReviewPayload { rating: 4, comment: "Solid course".to_string() });
    }

    #[test]
    fn test_draft_comment_length() {
        let draft = ReviewDraft { rating: 3, comment: "x".repeat(MAX_COMMENT_CHARS + 1) };
        assert_eq!(draft.validate().error("comment"), Some(COMMENT_TOO_LONG));
    }
}
