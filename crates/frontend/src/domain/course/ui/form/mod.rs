pub mod view_model;

use contracts::domain::course::DifficultyLevel;
use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_params_map};
use thaw::*;

use self::view_model::CourseFormViewModel;
use crate::shared::api_utils::media_url;
use crate::shared::components::form_field::FormField;
use crate::shared::components::spinner::PageSpinner;
use crate::system::pages::field_error;

const LIST_PATH: &str = "/dashboard/teacher/courses";

/// Create (`/new`) and edit (`/:id/edit`) form for teacher courses.
#[component]
pub fn CourseForm() -> impl IntoView {
    let vm = CourseFormViewModel::new();
    let params = use_params_map();
    let navigate = use_navigate();

    vm.load_categories();
    Effect::new(move |_| {
        let id = params.with(|p| p.get("id").and_then(|id| id.parse::<i64>().ok()));
        vm.load_if_needed(id);
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let navigate = navigate.clone();
        vm.save_command(move || navigate(LIST_PATH, Default::default()));
    };

    let busy = Signal::derive(move || vm.is_saving.get() || vm.is_loading.get());
    let errors = vm.errors;

    view! {
        <div class="page">
            <div class="page__header">
                <h1>{move || if vm.is_edit_mode() { "Edit course" } else { "Create course" }}</h1>
                <a href=LIST_PATH>"Back to my courses"</a>
            </div>

            {move || vm.load_error.get().map(|e| view! {
                <div class="alert alert--error" role="alert">{format!("Couldn't load the course: {}", e)}</div>
            })}
            {move || vm.save_error.get().map(|e| view! {
                <div class="alert alert--error" role="alert">{e}</div>
            })}

            {move || vm.is_loading.get().then(|| view! { <PageSpinner label="Loading course..." /> })}

            <form class="course-form" class:hidden=move || vm.is_loading.get() on:submit=on_submit novalidate>
                <FormField label="Title" error=field_error(errors, "title")>
                    <Input value=vm.title disabled=busy />
                </FormField>

                <FormField label="Description" error=field_error(errors, "description")>
                    <Textarea value=vm.description disabled=busy />
                </FormField>

                <FormField label="Category" error=field_error(errors, "category")>
                    <Select value=vm.category>
                        <option value="">"Select a category"</option>
                        <For
                            each=move || vm.categories.get()
                            key=|c| c.id
                            children=|c| view! { <option value=c.id.to_string()>{c.name}</option> }
                        />
                    </Select>
                </FormField>

                <FormField label="Difficulty" error=Signal::derive(|| None::<String>)>
                    <Select value=vm.difficulty_level>
                        {DifficultyLevel::ALL
                            .into_iter()
                            .map(|l| view! { <option value=l.as_str()>{l.label()}</option> })
                            .collect_view()}
                    </Select>
                </FormField>

                <Flex gap=FlexGap::Medium>
                    <FormField label="Price ($)" error=field_error(errors, "price")>
                        <Input value=vm.price input_type=InputType::Number disabled=busy />
                    </FormField>
                    <FormField label="Duration (weeks)" error=field_error(errors, "duration_weeks")>
                        <Input value=vm.duration_weeks input_type=InputType::Number disabled=busy />
                    </FormField>
                    <FormField label="Max students" error=field_error(errors, "max_students")>
                        <Input value=vm.max_students input_type=InputType::Number disabled=busy />
                    </FormField>
                </Flex>

                <FormField label="Thumbnail" error=Signal::derive(move || vm.thumbnail_error.get())>
                    {move || vm.current_thumbnail.get().and_then(|t| media_url(Some(&t))).map(|src| view! {
                        <img class="course-form__thumb" src=src alt="Current thumbnail" />
                    })}
                    <input
                        type="file"
                        accept="image/*"
                        disabled=move || busy.get()
                        on:change=move |ev| {
                            let input = event_target::<web_sys::HtmlInputElement>(&ev);
                            vm.pick_thumbnail(input.files().and_then(|files| files.get(0)));
                        }
                    />
                    {move || vm.thumbnail_name.get().map(|name| view! {
                        <span class="text-muted">{name}</span>
                    })}
                </FormField>

                <Checkbox checked=vm.published label="Publish now" />

                <Flex gap=FlexGap::Small>
                    <Button appearance=ButtonAppearance::Primary button_type=ButtonType::Submit disabled=busy>
                        {move || match (vm.is_saving.get(), vm.is_edit_mode()) {
                            (true, _) => "Saving...",
                            (false, true) => "Save changes",
                            (false, false) => "Create course",
                        }}
                    </Button>
                    <a class="button" href=LIST_PATH>"Cancel"</a>
                </Flex>
            </form>
        </div>
    }
}
