use contracts::domain::course::{Course, CourseStatus};
use leptos::prelude::*;

use crate::shared::load_state::LoadState;

#[derive(Clone, Copy)]
pub struct TeacherCoursesState {
    pub courses: RwSignal<LoadState<Vec<Course>>>,
    /// Course with a delete or publish request in flight.
    pub pending: RwSignal<Option<i64>>,
    pub action_error: RwSignal<Option<String>>,
}

impl TeacherCoursesState {
    pub fn new() -> Self {
        Self {
            courses: RwSignal::new(LoadState::Loading),
            pending: RwSignal::new(None),
            action_error: RwSignal::new(None),
        }
    }

    /// Applied only after the server confirmed the delete.
    pub fn remove(&self, id: i64) {
        self.courses.update(|state| {
            if let LoadState::Ready(list) = state {
                remove_course(list, id);
            }
        });
    }

    /// Applied only after the server confirmed the status change.
    pub fn set_status(&self, id: i64, status: CourseStatus) {
        self.courses.update(|state| {
            if let LoadState::Ready(list) = state {
                apply_status(list, id, status);
            }
        });
    }
}

impl Default for TeacherCoursesState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn remove_course(list: &mut Vec<Course>, id: i64) {
    list.retain(|c| c.id != id);
}

pub fn apply_status(list: &mut [Course], id: i64, status: CourseStatus) {
    if let Some(course) = list.iter_mut().find(|c| c.id == id) {
        course.status = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(id: i64) -> Course {
        serde_json::from_value(serde_json::json!({ "id": id, "title": format!("Course {}", id) }))
            .unwrap()
    }

    #[test]
    fn test_remove_course() {
        let mut list = vec![course(1), course(2), course(3)];
        remove_course(&mut list, 2);
        let ids: Vec<i64> = list.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 3]);

        remove_course(&mut list, 42);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_apply_status() {
        let mut list = vec![course(1), course(2)];
        apply_status(&mut list, 2, CourseStatus::Published);
        assert_eq!(list[0].status, CourseStatus::Draft);
        assert_eq!(list[1].status, CourseStatus::Published);
    }
}
