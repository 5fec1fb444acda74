use contracts::domain::course::lesson::Lesson;
use contracts::domain::course::Course;
use leptos::prelude::*;

use crate::shared::load_state::LoadState;

/// A course with its lessons, as the teacher manages them.
#[derive(Clone, Debug, PartialEq)]
pub struct CourseLessons {
    pub course: Course,
    pub lessons: Vec<Lesson>,
}

#[derive(Clone, Copy)]
pub struct CourseLessonsState {
    pub data: RwSignal<LoadState<CourseLessons>>,
    /// Lesson with a delete or publish request in flight.
    pub pending: RwSignal<Option<i64>>,
    pub action_error: RwSignal<Option<String>>,
}

impl CourseLessonsState {
    pub fn new() -> Self {
        Self {
            data: RwSignal::new(LoadState::Loading),
            pending: RwSignal::new(None),
            action_error: RwSignal::new(None),
        }
    }

    pub fn remove(&self, id: i64) {
        self.data.update(|state| {
            if let LoadState::Ready(data) = state {
                remove_lesson(&mut data.lessons, id);
            }
        });
    }

    pub fn replace(&self, lesson: Lesson) {
        self.data.update(|state| {
            if let LoadState::Ready(data) = state {
                replace_lesson(&mut data.lessons, lesson);
            }
        });
    }
}

impl Default for CourseLessonsState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn remove_lesson(list: &mut Vec<Lesson>, id: i64) {
    list.retain(|l| l.id != id);
}

/// Swap in the server's copy of a lesson, keeping list order.
pub fn replace_lesson(list: &mut [Lesson], lesson: Lesson) {
    if let Some(slot) = list.iter_mut().find(|l| l.id == lesson.id) {
        *slot = lesson;
    }
}

/// Total minutes across lessons that state a duration.
pub fn total_minutes(lessons: &[Lesson]) -> u64 {
    lessons
        .iter()
        .filter_map(|l| l.duration_minutes)
        .map(u64::from)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lesson(id: i64, minutes: Option<u32>) -> Lesson {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": format!("Lesson {}", id),
            "duration_minutes": minutes
        }))
        .unwrap()
    }

    #[test]
    fn test_remove_lesson() {
        let mut list = vec![lesson(1, None), lesson(2, None)];
        remove_lesson(&mut list, 1);
        assert_eq!(list.iter().map(|l| l.id).collect::<Vec<_>>(), vec![2]);
        remove_lesson(&mut list, 9);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_replace_lesson_keeps_position() {
        let mut list = vec![lesson(1, None), lesson(2, None), lesson(3, None)];
        let mut updated = lesson(2, Some(10));
        updated.is_published = true;
        replace_lesson(&mut list, updated);
        assert_eq!(list[1].id, 2);
        assert!(list[1].is_published);
        assert!(!list[0].is_published);
    }

    #[test]
    fn test_total_minutes() {
        let list = vec![lesson(1, Some(30)), lesson(2, None), lesson(3, Some(45))];
        assert_eq!(total_minutes(&list), 75);
        assert_eq!(total_minutes(&[]), 0);
    }
}
