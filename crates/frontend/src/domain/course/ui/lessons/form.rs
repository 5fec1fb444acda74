use contracts::domain::course::lesson::{next_lesson_order, LessonDraft, LessonType};
use contracts::shared::validation::ValidationResult;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_navigate, use_params_map};
use thaw::*;

use crate::domain::course::api;
use crate::shared::components::form_field::FormField;
use crate::shared::components::spinner::PageSpinner;
use crate::system::pages::{clear_on_input, field_error};

fn course_view_path(course_id: i64) -> String {
    format!("/dashboard/teacher/courses/{}/view", course_id)
}

#[derive(Clone, Copy)]
pub struct LessonFormViewModel {
    pub course_id: RwSignal<Option<i64>>,
    pub lesson_id: RwSignal<Option<i64>>,
    pub course_title: RwSignal<String>,
    pub title: RwSignal<String>,
    pub description: RwSignal<String>,
    pub lesson_type: RwSignal<String>,
    pub order: RwSignal<String>,
    pub duration_minutes: RwSignal<String>,
    pub content: RwSignal<String>,
    pub video_url: RwSignal<String>,
    pub is_published: RwSignal<bool>,
    pub errors: RwSignal<ValidationResult>,
    pub load_error: RwSignal<Option<String>>,
    pub save_error: RwSignal<Option<String>>,
    pub is_loading: RwSignal<bool>,
    pub is_saving: RwSignal<bool>,
}

impl LessonFormViewModel {
    pub fn new() -> Self {
        let vm = Self {
            course_id: RwSignal::new(None),
            lesson_id: RwSignal::new(None),
            course_title: RwSignal::new(String::new()),
            title: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            lesson_type: RwSignal::new(String::new()),
            order: RwSignal::new(String::new()),
            duration_minutes: RwSignal::new(String::new()),
            content: RwSignal::new(String::new()),
            video_url: RwSignal::new(String::new()),
            is_published: RwSignal::new(false),
            errors: RwSignal::new(ValidationResult::valid()),
            load_error: RwSignal::new(None),
            save_error: RwSignal::new(None),
            is_loading: RwSignal::new(false),
            is_saving: RwSignal::new(false),
        };
        vm.fill(&LessonDraft::default());

        clear_on_input(vm.title, vm.errors, "title");
        clear_on_input(vm.description, vm.errors, "description");
        clear_on_input(vm.order, vm.errors, "order");
        clear_on_input(vm.duration_minutes, vm.errors, "duration_minutes");
        clear_on_input(vm.video_url, vm.errors, "video_url");
        vm
    }

    pub fn is_edit_mode(&self) -> bool {
        self.lesson_id.get().is_some()
    }

    fn fill(&self, draft: &LessonDraft) {
        self.title.set(draft.title.clone());
        self.description.set(draft.description.clone());
        self.lesson_type.set(draft.lesson_type.as_str().to_string());
        self.order.set(draft.order.clone());
        self.duration_minutes.set(draft.duration_minutes.clone());
        self.content.set(draft.content.clone());
        self.video_url.set(draft.video_url.clone());
        self.is_published.set(draft.is_published);
    }

    pub fn draft(&self) -> LessonDraft {
        LessonDraft {
            title: self.title.get_untracked(),
            description: self.description.get_untracked(),
            lesson_type: LessonType::parse(&self.lesson_type.get_untracked()).unwrap_or_default(),
            order: self.order.get_untracked(),
            duration_minutes: self.duration_minutes.get_untracked(),
            content: self.content.get_untracked(),
            video_url: self.video_url.get_untracked(),
            is_published: self.is_published.get_untracked(),
        }
    }

    /// New lessons get the course title and the next free order; edits load
    /// the stored lesson.
    pub fn load(&self, course_id: Option<i64>, lesson_id: Option<i64>) {
        self.course_id.set(course_id);
        self.lesson_id.set(lesson_id);
        let Some(course_id) = course_id else {
            self.load_error.set(Some("Course not found".to_string()));
            return;
        };
        let vm = *self;
        vm.is_loading.set(true);
        vm.load_error.set(None);
        spawn_local(async move {
            let outcome = async {
                let course = api::fetch_course(course_id).await?;
                vm.course_title.set(course.display_title().to_string());
                match lesson_id {
                    Some(id) => {
                        let lesson = api::fetch_lesson(id).await?;
                        vm.fill(&LessonDraft::from_lesson(&lesson));
                    }
                    None => {
                        let lessons = api::fetch_lessons(course_id).await?;
                        vm.order.set(next_lesson_order(&lessons).to_string());
                    }
                }
                Ok::<(), String>(())
            }
            .await;
            if let Err(e) = outcome {
                log::warn!("lesson form for course {} failed to load: {}", course_id, e);
                vm.load_error.set(Some(e));
            }
            vm.is_loading.set(false);
        });
    }

    pub fn save_command(&self, on_saved: impl Fn(i64) + 'static) {
        if self.is_saving.get_untracked() {
            return;
        }
        let Some(course_id) = self.course_id.get_untracked() else {
            return;
        };
        let payload = match self.draft().to_payload() {
            Ok(payload) => payload,
            Err(result) => {
                self.errors.set(result);
                return;
            }
        };

        let vm = *self;
        vm.is_saving.set(true);
        vm.save_error.set(None);
        spawn_local(async move {
            let result = match vm.lesson_id.get_untracked() {
                Some(id) => api::update_lesson(id, &payload).await,
                None => api::create_lesson(course_id, &payload).await,
            };
            match result {
                Ok(lesson) => {
                    log::info!("saved lesson {} in course {}", lesson.id, course_id);
                    on_saved(course_id);
                }
                Err(e) => {
                    log::error!("failed to save lesson: {}", e);
                    vm.save_error.set(Some(if e.is_empty() {
                        "Failed to save lesson".to_string()
                    } else {
                        e
                    }));
                    vm.is_saving.set(false);
                }
            }
        });
    }
}

impl Default for LessonFormViewModel {
    fn default() -> Self {
        Self::new()
    }
}

/// Add (`/teacher/courses/:course_id/lessons/new`) and edit
/// (`/teacher/courses/:course_id/lessons/:lesson_id/edit`) lesson form.
#[component]
pub fn LessonForm() -> impl IntoView {
    let vm = LessonFormViewModel::new();
    let params = use_params_map();
    let navigate = use_navigate();

    Effect::new(move |_| {
        let (course_id, lesson_id) = params.with(|p| {
            let id = |key: &str| p.get(key).and_then(|v| v.parse::<i64>().ok());
            (id("course_id"), id("lesson_id"))
        });
        vm.load(course_id, lesson_id);
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let navigate = navigate.clone();
        vm.save_command(move |course_id| navigate(&course_view_path(course_id), Default::default()));
    };

    let busy = Signal::derive(move || vm.is_saving.get() || vm.is_loading.get());
    let errors = vm.errors;
    let back = move || vm.course_id.get().map(course_view_path).unwrap_or_else(|| "/dashboard/teacher/courses".to_string());

    view! {
        <div class="page">
            <div class="page__header">
                <div>
                    <h1>{move || if vm.is_edit_mode() { "Edit lesson" } else { "Add new lesson" }}</h1>
                    <p class="text-muted">{move || vm.course_title.get()}</p>
                </div>
                <a href=back>"Back to course"</a>
            </div>

            {move || vm.load_error.get().map(|e| view! {
                <div class="alert alert--error" role="alert">{format!("Couldn't load the course: {}", e)}</div>
            })}
            {move || vm.save_error.get().map(|e| view! {
                <div class="alert alert--error" role="alert">{e}</div>
            })}

            {move || vm.is_loading.get().then(|| view! { <PageSpinner label="Loading..." /> })}

            <form class="lesson-form" class:hidden=move || vm.is_loading.get() on:submit=on_submit novalidate>
                <FormField label="Lesson title" error=field_error(errors, "title")>
                    <Input value=vm.title disabled=busy />
                </FormField>

                <FormField label="Description" error=field_error(errors, "description")>
                    <Textarea value=vm.description disabled=busy />
                </FormField>

                <Flex gap=FlexGap::Medium>
                    <FormField label="Type" error=Signal::derive(|| None::<String>)>
                        <Select value=vm.lesson_type>
                            {LessonType::ALL
                                .into_iter()
                                .map(|t| view! { <option value=t.as_str()>{t.label()}</option> })
                                .collect_view()}
                        </Select>
                    </FormField>
                    <FormField label="Duration (minutes)" error=field_error(errors, "duration_minutes")>
                        <Input value=vm.duration_minutes input_type=InputType::Number disabled=busy />
                    </FormField>
                    <FormField label="Order" error=field_error(errors, "order")>
                        <Input value=vm.order input_type=InputType::Number disabled=busy />
                    </FormField>
                </Flex>

                <FormField label="Content" error=Signal::derive(|| None::<String>)>
                    <Textarea value=vm.content disabled=busy />
                </FormField>

                <FormField label="Video URL" error=field_error(errors, "video_url")>
                    <Input value=vm.video_url placeholder="https://" disabled=busy />
                </FormField>

                <Checkbox checked=vm.is_published label="Visible to enrolled students" />

                <Flex gap=FlexGap::Small>
                    <Button appearance=ButtonAppearance::Primary button_type=ButtonType::Submit disabled=busy>
                        {move || match (vm.is_saving.get(), vm.is_edit_mode()) {
                            (true, _) => "Saving...",
                            (false, true) => "Save lesson",
                            (false, false) => "Create lesson",
                        }}
                    </Button>
                    <a class="button" href=back>"Cancel"</a>
                </Flex>
            </form>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_view_path() {
        assert_eq!(course_view_path(7), "/dashboard/teacher/courses/7/view");
    }
}
