use contracts::domain::course::draft::CourseDraft;
use contracts::domain::course::{Category, CourseStatus, DifficultyLevel};
use contracts::shared::media::check_image_upload;
use contracts::shared::validation::ValidationResult;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::File;

use crate::domain::course::api;
use crate::system::pages::clear_on_input;

/// ViewModel for the course create/edit form
#[derive(Clone, Copy)]
pub struct CourseFormViewModel {
    pub id: RwSignal<Option<i64>>,
    pub title: RwSignal<String>,
    pub description: RwSignal<String>,
    pub price: RwSignal<String>,
    pub category: RwSignal<String>,
    pub difficulty_level: RwSignal<String>,
    pub duration_weeks: RwSignal<String>,
    pub max_students: RwSignal<String>,
    pub published: RwSignal<bool>,
    pub categories: RwSignal<Vec<Category>>,
    /// Picked thumbnail, sent as multipart on save. Browser-only handle.
    pub thumbnail_file: StoredValue<Option<File>, LocalStorage>,
    pub thumbnail_name: RwSignal<Option<String>>,
    pub thumbnail_error: RwSignal<Option<String>>,
    /// Thumbnail already stored for the course being edited.
    pub current_thumbnail: RwSignal<Option<String>>,
    pub errors: RwSignal<ValidationResult>,
    pub load_error: RwSignal<Option<String>>,
    pub save_error: RwSignal<Option<String>>,
    pub is_loading: RwSignal<bool>,
    pub is_saving: RwSignal<bool>,
}

impl CourseFormViewModel {
    pub fn new() -> Self {
        let vm = Self {
            id: RwSignal::new(None),
            title: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            price: RwSignal::new(String::new()),
            category: RwSignal::new(String::new()),
            difficulty_level: RwSignal::new(String::new()),
            duration_weeks: RwSignal::new(String::new()),
            max_students: RwSignal::new(String::new()),
            published: RwSignal::new(false),
            categories: RwSignal::new(Vec::new()),
            thumbnail_file: StoredValue::new_local(None),
            thumbnail_name: RwSignal::new(None),
            thumbnail_error: RwSignal::new(None),
            current_thumbnail: RwSignal::new(None),
            errors: RwSignal::new(ValidationResult::valid()),
            load_error: RwSignal::new(None),
            save_error: RwSignal::new(None),
            is_loading: RwSignal::new(false),
            is_saving: RwSignal::new(false),
        };
        vm.fill(&CourseDraft::default());

        clear_on_input(vm.title, vm.errors, "title");
        clear_on_input(vm.description, vm.errors, "description");
        clear_on_input(vm.price, vm.errors, "price");
        clear_on_input(vm.category, vm.errors, "category");
        clear_on_input(vm.duration_weeks, vm.errors, "duration_weeks");
        clear_on_input(vm.max_students, vm.errors, "max_students");
        vm
    }

    pub fn is_edit_mode(&self) -> bool {
        self.id.get().is_some()
    }

    fn fill(&self, draft: &CourseDraft) {
        self.title.set(draft.title.clone());
        self.description.set(draft.description.clone());
        self.price.set(draft.price.clone());
        self.category.set(draft.category.clone());
        self.difficulty_level.set(draft.difficulty_level.as_str().to_string());
        self.duration_weeks.set(draft.duration_weeks.clone());
        self.max_students.set(draft.max_students.clone());
        self.published.set(draft.status == CourseStatus::Published);
    }

    pub fn draft(&self) -> CourseDraft {
        CourseDraft {
            title: self.title.get_untracked(),
            description: self.description.get_untracked(),
            price: self.price.get_untracked(),
            category: self.category.get_untracked(),
            difficulty_level: DifficultyLevel::parse(&self.difficulty_level.get_untracked())
                .unwrap_or_default(),
            duration_weeks: self.duration_weeks.get_untracked(),
            max_students: self.max_students.get_untracked(),
            status: if self.published.get_untracked() {
                CourseStatus::Published
            } else {
                CourseStatus::Draft
            },
        }
    }

    /// Accept or reject a file from the thumbnail input.
    pub fn pick_thumbnail(&self, file: Option<File>) {
        let accepted = file.filter(|f| match check_image_upload(&f.type_(), f.size()) {
            Some(message) => {
                self.thumbnail_error.set(Some(message));
                false
            }
            None => {
                self.thumbnail_error.set(None);
                true
            }
        });
        self.thumbnail_name.set(accepted.as_ref().map(File::name));
        self.thumbnail_file.set_value(accepted);
    }

    pub fn load_categories(&self) {
        let categories = self.categories;
        spawn_local(async move {
            match api::fetch_categories().await {
                Ok(list) => {
                    let _ = categories.try_set(list);
                }
                Err(e) => log::warn!("categories unavailable: {}", e),
            }
        });
    }

    /// Load the course into the form when editing
    pub fn load_if_needed(&self, id: Option<i64>) {
        self.id.set(id);
        let Some(id) = id else {
            return;
        };
        let vm = *self;
        vm.is_loading.set(true);
        vm.load_error.set(None);
        spawn_local(async move {
            match api::fetch_course(id).await {
                Ok(course) => {
                    vm.fill(&CourseDraft::from_course(&course));
                    vm.current_thumbnail.set(course.thumbnail.clone());
                    vm.errors.set(ValidationResult::valid());
                }
                Err(e) => vm.load_error.set(Some(e)),
            }
            vm.is_loading.set(false);
        });
    }

    /// Validate and save; `on_saved` runs after the server accepted the course.
    pub fn save_command(&self, on_saved: impl Fn() + 'static) {
        if self.is_saving.get_untracked() {
            return;
        }
        let payload = match self.draft().to_payload() {
            Ok(payload) => payload,
            Err(result) => {
                self.errors.set(result);
                return;
            }
        };

        let thumbnail = self.thumbnail_file.get_value();
        let vm = *self;
        vm.is_saving.set(true);
        vm.save_error.set(None);
        spawn_local(async move {
            let result = match vm.id.get_untracked() {
                Some(id) => api::update_course(id, &payload, thumbnail).await,
                None => api::create_course(&payload, thumbnail).await,
            };
            match result {
                Ok(course) => {
                    log::info!("saved course {}", course.id);
                    on_saved();
                }
                Err(e) => {
                    log::error!("failed to save course: {}", e);
                    vm.save_error.set(Some(e));
                    vm.is_saving.set(false);
                }
            }
        });
    }
}

impl Default for CourseFormViewModel {
    fn default() -> Self {
        Self::new()
    }
}
