//! Course endpoints under `/api/courses/`.
//!
//! List endpoints may answer with a bare array, a paginated envelope or
//! nothing at all; they all come back as a plain `Vec` here.

use contracts::domain::course::draft::{CoursePayload, CourseStatusPatch};
use contracts::domain::course::enrollment::{enrolled_courses, EnrolledCourse, Enrollment};
use contracts::domain::course::lesson::{sorted_lessons, CourseProgress, Lesson, LessonPayload};
use contracts::domain::course::review::{CourseReview, ReviewPayload};
use contracts::domain::course::{Category, Course, CourseStatus};
use contracts::shared::list_response::ListResponse;
use serde::de::DeserializeOwned;
use serde_json::Value;
use web_sys::File;

use crate::shared::api_utils::{
    delete, get_json, patch_form, patch_json, post_empty, post_form, post_json, put_json, Upload,
};

const THUMBNAIL_FIELD: &str = "thumbnail";

async fn get_list<T: DeserializeOwned>(path: &str) -> Result<Vec<T>, String> {
    let body: Value = get_json(path).await?;
    Ok(ListResponse::<T>::from_value(body).into_items_with(|e| {
        log::warn!("GET {} returned an unusable list: {}", path, e);
    }))
}

/// Public catalogue.
pub async fn fetch_courses() -> Result<Vec<Course>, String> {
    get_list("/courses/courses/").await
}

pub async fn fetch_course(id: i64) -> Result<Course, String> {
    get_json(&format!("/courses/courses/{}/", id)).await
}

pub async fn fetch_categories() -> Result<Vec<Category>, String> {
    get_list("/courses/categories/").await
}

/// Courses owned by the signed-in teacher.
pub async fn fetch_teacher_courses() -> Result<Vec<Course>, String> {
    get_list("/courses/my-courses/").await
}

/// Courses the signed-in student is enrolled in.
pub async fn fetch_enrolled_courses() -> Result<Vec<EnrolledCourse>, String> {
    let enrollments: Vec<Enrollment> = get_list("/courses/enrolled-courses/").await?;
    Ok(enrolled_courses(enrollments))
}

/// JSON without a thumbnail, multipart with one.
pub async fn create_course(payload: &CoursePayload, thumbnail: Option<File>) -> Result<Course, String> {
    let path = "/courses/courses/";
    match thumbnail {
        Some(file) => {
            let upload = Upload { field: THUMBNAIL_FIELD, file: &file };
            post_form(path, &payload.form_fields(), Some(upload)).await
        }
        None => post_json(path, payload).await,
    }
}

/// Partial update; the stored thumbnail is kept unless a new file is given.
pub async fn update_course(id: i64, payload: &CoursePayload, thumbnail: Option<File>) -> Result<Course, String> {
    let path = format!("/courses/courses/{}/", id);
    match thumbnail {
        Some(file) => {
            let upload = Upload { field: THUMBNAIL_FIELD, file: &file };
            patch_form(&path, &payload.form_fields(), Some(upload)).await
        }
        None => patch_json(&path, payload).await,
    }
}

/// Change only the status of a course.
pub async fn set_course_status(id: i64, status: CourseStatus) -> Result<Course, String> {
    patch_json(&format!("/courses/courses/{}/", id), &CourseStatusPatch { status }).await
}

pub async fn delete_course(id: i64) -> Result<(), String> {
    delete(&format!("/courses/courses/{}/", id)).await
}

pub async fn enroll(id: i64) -> Result<(), String> {
    post_empty(&format!("/courses/courses/{}/enroll/", id)).await
}

pub async fn unenroll(id: i64) -> Result<(), String> {
    post_empty(&format!("/courses/courses/{}/unenroll/", id)).await
}

/// Lessons in course order. Students only get published lessons.
pub async fn fetch_lessons(course_id: i64) -> Result<Vec<Lesson>, String> {
    let lessons = get_list(&format!("/courses/courses/{}/lessons/", course_id)).await?;
    Ok(sorted_lessons(lessons))
}

pub async fn fetch_lesson(id: i64) -> Result<Lesson, String> {
    get_json(&format!("/courses/lessons/{}/", id)).await
}

pub async fn create_lesson(course_id: i64, payload: &LessonPayload) -> Result<Lesson, String> {
    post_json(&format!("/courses/courses/{}/lessons/", course_id), payload).await
}

pub async fn update_lesson(id: i64, payload: &LessonPayload) -> Result<Lesson, String> {
    put_json(&format!("/courses/lessons/{}/", id), payload).await
}

pub async fn delete_lesson(id: i64) -> Result<(), String> {
    delete(&format!("/courses/lessons/{}/", id)).await
}

pub async fn mark_lesson_complete(id: i64) -> Result<(), String> {
    post_empty(&format!("/courses/lessons/{}/complete/", id)).await
}

/// The signed-in student's progress through a course.
pub async fn fetch_course_progress(course_id: i64) -> Result<CourseProgress, String> {
    get_json(&format!("/courses/courses/{}/progress/", course_id)).await
}

pub async fn fetch_reviews(course_id: i64) -> Result<Vec<CourseReview>, String> {
    get_list(&format!("/courses/courses/{}/reviews/", course_id)).await
}

pub async fn add_review(course_id: i64, payload: &ReviewPayload) -> Result<CourseReview, String> {
    post_json(&format!("/courses/courses/{}/reviews/", course_id), payload).await
}
