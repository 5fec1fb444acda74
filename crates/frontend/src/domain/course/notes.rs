//! Per-lesson study notes, kept in localStorage on this device.

use web_sys::window;

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

fn notes_key(course_id: i64, lesson_id: i64) -> String {
    format!("course_notes_{}_{}", course_id, lesson_id)
}

pub fn load_notes(course_id: i64, lesson_id: i64) -> String {
    get_local_storage()
        .and_then(|s| s.get_item(&notes_key(course_id, lesson_id)).ok().flatten())
        .unwrap_or_default()
}

/// Blank notes remove the entry.
pub fn save_notes(course_id: i64, lesson_id: i64, notes: &str) -> Result<(), String> {
    let storage = get_local_storage().ok_or_else(|| "Local storage is not available".to_string())?;
    let key = notes_key(course_id, lesson_id);
    let result = if notes.trim().is_empty() {
        storage.remove_item(&key)
    } else {
        storage.set_item(&key, notes)
    };
    result.map_err(|e| format!("Failed to save notes: {:?}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notes_key_is_per_lesson() {
        assert_eq!(notes_key(3, 14), "course_notes_3_14");
        assert_ne!(notes_key(3, 14), notes_key(31, 4));
    }
}
